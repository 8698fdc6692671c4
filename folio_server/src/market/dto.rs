use folio_core::portfolio::dto::DEFAULT_CURRENCY;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Deserialize, Debug, IntoParams)]
pub struct CurrencyQuery {
    pub currency: Option<String>,
}

impl CurrencyQuery {
    pub fn currency(&self) -> String {
        self.currency
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CURRENCY)
            .to_lowercase()
    }
}

#[derive(Deserialize, Debug, IntoParams)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}
