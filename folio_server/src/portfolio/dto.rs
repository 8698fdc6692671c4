use folio_core::portfolio::valuation::{PortfolioCoin, PortfolioSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct PortfolioResponse {
    pub currency: String,
    pub coins: Vec<PortfolioCoin>,
    pub summary: PortfolioSummary,
}
