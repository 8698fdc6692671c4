use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::{
    auth::handler::{login, logout, session, signup},
    docs::{dto::ApiDoc, handler::api_docs},
    info::handler::info,
    market::{
        handler::{coin, currencies, search, trending},
        live::live_search,
    },
    middlewares::handler::auth,
    portfolio::handler::{add_coin, get_portfolio, remove_coin, track_coin, update_coin_amount},
    profile::handler::{get_profile, update_currency, update_profile},
    state::ServerState,
};

pub fn router(state: Arc<ServerState>) -> Router {
    let doc = ApiDoc::openapi();

    let auth_router = Router::new()
        .route("/auth/session", get(session))
        .route("/auth/logout", post(logout))
        .route("/profile", get(get_profile).patch(update_profile))
        .route("/settings/currency", put(update_currency))
        .route("/portfolio", get(get_portfolio))
        .route("/portfolio/track", post(track_coin))
        .route("/portfolio/coins", post(add_coin))
        .route(
            "/portfolio/coins/{id}",
            put(update_coin_amount).delete(remove_coin),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .merge(Redoc::with_url("/redoc", doc))
        .merge(auth_router)
        .route("/", get(info))
        .route("/docs", get(api_docs))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/market/trending", get(trending))
        .route("/market/coins/{id}", get(coin))
        .route("/market/search", get(search))
        .route("/market/search/live", get(live_search))
        .route("/market/currencies", get(currencies))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
