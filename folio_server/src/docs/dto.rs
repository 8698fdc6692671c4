use crate::{auth, info, market, portfolio, profile};
use folio_core::{
    auth::dto::{AuthResponse, LoginRequest, SessionResponse, SignupRequest},
    market::dto::{CoinMarket, SearchCoin},
    portfolio::{
        dto::{
            AddCoinRequest, CurrencyRequest, Holding, ProfileUpdate, TrackCoinRequest,
            UpdateAmountRequest, UserProfile,
        },
        valuation::{AllocationSlice, PortfolioCoin, PortfolioSummary, TopHolding},
    },
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        info::handler::info,
        auth::handler::signup,
        auth::handler::login,
        auth::handler::session,
        auth::handler::logout,
        profile::handler::get_profile,
        profile::handler::update_profile,
        profile::handler::update_currency,
        portfolio::handler::get_portfolio,
        portfolio::handler::track_coin,
        portfolio::handler::add_coin,
        portfolio::handler::update_coin_amount,
        portfolio::handler::remove_coin,
        market::handler::trending,
        market::handler::coin,
        market::handler::search,
        market::handler::currencies,
        market::live::live_search,
    ),
    components(schemas(
        info::dto::Info,
        SignupRequest,
        LoginRequest,
        AuthResponse,
        SessionResponse,
        UserProfile,
        Holding,
        ProfileUpdate,
        CurrencyRequest,
        TrackCoinRequest,
        AddCoinRequest,
        UpdateAmountRequest,
        CoinMarket,
        SearchCoin,
        PortfolioCoin,
        PortfolioSummary,
        TopHolding,
        AllocationSlice,
        portfolio::dto::PortfolioResponse,
    )),
    modifiers(&BearerAuth)
)]
pub struct ApiDoc;
