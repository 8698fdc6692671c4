use folio_core::{
    auth::storage::AuthStorage, helpers::jwt::JwtManager, market::handler::CoinGecko,
    portfolio::storage::PortfolioStorage,
};

#[derive(Clone)]
pub struct ServerState {
    portfolio: PortfolioStorage,
    auth: AuthStorage,
    jwt: JwtManager,
    market: CoinGecko,
}

impl From<(PortfolioStorage, AuthStorage, JwtManager, CoinGecko)> for ServerState {
    fn from(states: (PortfolioStorage, AuthStorage, JwtManager, CoinGecko)) -> Self {
        let (portfolio, auth, jwt, market) = states;
        Self {
            portfolio,
            auth,
            jwt,
            market,
        }
    }
}

impl ServerState {
    pub fn portfolio(&self) -> &PortfolioStorage {
        &self.portfolio
    }

    pub fn auth(&self) -> &AuthStorage {
        &self.auth
    }

    pub fn jwt(&self) -> &JwtManager {
        &self.jwt
    }

    pub fn market(&self) -> &CoinGecko {
        &self.market
    }
}
