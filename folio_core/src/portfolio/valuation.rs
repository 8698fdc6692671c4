use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::dto::Holding;
use crate::market::dto::CoinMarket;

/// A live market row together with the quantity the user holds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PortfolioCoin {
    #[serde(flatten)]
    pub market: CoinMarket,
    pub amount: f64,
}

impl PortfolioCoin {
    pub fn price(&self) -> f64 {
        self.market.current_price.unwrap_or(0.0)
    }

    /// Coins held with a zero amount are tracked for their price only.
    pub fn is_valued(&self) -> bool {
        self.amount > 0.0
    }

    pub fn value(&self) -> f64 {
        if self.is_valued() {
            self.price() * self.amount
        } else {
            0.0
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TopHolding {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image: Option<String>,
    pub value: f64,
    pub percentage: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct AllocationSlice {
    pub id: String,
    pub symbol: String,
    pub value: f64,
    pub percentage: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct PortfolioSummary {
    pub currency: String,
    pub total_value: f64,
    pub valued_coins: usize,
    pub tracked_coins: usize,
    pub top_holding: Option<TopHolding>,
    pub allocation: Vec<AllocationSlice>,
}

/// Zips live market rows with the stored holdings by coin id, in the order
/// the market rows arrive. Holdings the provider returned no row for are
/// left out.
pub fn merge_holdings(holdings: &[Holding], markets: Vec<CoinMarket>) -> Vec<PortfolioCoin> {
    markets
        .into_iter()
        .map(|market| {
            let amount = holdings
                .iter()
                .find(|holding| holding.id == market.id)
                .map(|holding| holding.amount)
                .unwrap_or(0.0);

            PortfolioCoin { market, amount }
        })
        .collect()
}

fn percentage_of(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        value / total * 100.0
    } else {
        0.0
    }
}

pub fn summarize(coins: &[PortfolioCoin], currency: &str) -> PortfolioSummary {
    let valued: Vec<&PortfolioCoin> = coins.iter().filter(|coin| coin.is_valued()).collect();

    let total_value: f64 = valued.iter().map(|coin| coin.value()).sum();

    let mut top: Option<(&PortfolioCoin, f64)> = None;
    for coin in valued.iter().copied() {
        let value = coin.value();
        let is_higher = match top {
            Some((_, highest)) => value > highest,
            None => value > 0.0,
        };
        if is_higher {
            top = Some((coin, value));
        }
    }

    let top_holding = top.map(|(coin, value)| TopHolding {
        id: coin.market.id.clone(),
        name: coin.market.name.clone(),
        symbol: coin.market.symbol.clone(),
        image: coin.market.image.clone(),
        value,
        percentage: percentage_of(value, total_value),
    });

    let allocation = valued
        .iter()
        .map(|coin| AllocationSlice {
            id: coin.market.id.clone(),
            symbol: coin.market.symbol.to_uppercase(),
            value: coin.value(),
            percentage: percentage_of(coin.value(), total_value),
        })
        .filter(|slice| slice.percentage > 0.0)
        .collect();

    PortfolioSummary {
        currency: currency.to_lowercase(),
        total_value,
        valued_coins: valued.len(),
        tracked_coins: coins.len() - valued.len(),
        top_holding,
        allocation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(id: &str, price: Option<f64>) -> CoinMarket {
        CoinMarket {
            id: id.to_string(),
            symbol: id[..3].to_string(),
            name: id.to_string(),
            image: None,
            current_price: price,
            price_change_percentage_24h: Some(0.0),
            market_cap: None,
            market_cap_rank: None,
            total_volume: None,
        }
    }

    fn holding(id: &str, amount: f64) -> Holding {
        Holding {
            id: id.to_string(),
            amount,
            added_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn coin(id: &str, price: f64, amount: f64) -> PortfolioCoin {
        PortfolioCoin {
            market: market(id, Some(price)),
            amount,
        }
    }

    #[test]
    fn test_merge_follows_market_order() {
        let holdings = vec![holding("ethereum", 2.0), holding("bitcoin", 0.5)];
        let markets = vec![market("bitcoin", Some(100.0)), market("ethereum", Some(10.0))];

        let merged = merge_holdings(&holdings, markets);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].market.id, "bitcoin");
        assert_eq!(merged[0].amount, 0.5);
        assert_eq!(merged[1].amount, 2.0);
    }

    #[test]
    fn test_merge_drops_holdings_without_market_data() {
        let holdings = vec![holding("bitcoin", 1.0), holding("delisted", 5.0)];
        let markets = vec![market("bitcoin", Some(100.0))];

        let merged = merge_holdings(&holdings, markets);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].market.id, "bitcoin");
    }

    #[test]
    fn test_total_is_sum_of_price_times_amount() {
        let coins = vec![
            coin("bitcoin", 100.0, 0.5),
            coin("ethereum", 10.0, 3.0),
            coin("solana", 2.0, 10.0),
        ];

        let summary = summarize(&coins, "USD");

        assert_eq!(summary.total_value, 50.0 + 30.0 + 20.0);
        assert_eq!(summary.valued_coins, 3);
        assert_eq!(summary.tracked_coins, 0);
        assert_eq!(summary.currency, "usd");
    }

    #[test]
    fn test_zero_amount_is_excluded() {
        let coins = vec![
            coin("bitcoin", 100.0, 1.0),
            coin("ethereum", 10.0, 0.0),
            coin("solana", 50.0, 1.0),
        ];

        let summary = summarize(&coins, "usd");

        assert_eq!(summary.total_value, 150.0);
        assert_eq!(summary.valued_coins, 2);
        assert_eq!(summary.tracked_coins, 1);
        assert!(summary.allocation.iter().all(|slice| slice.id != "ethereum"));

        let total: f64 = summary.allocation.iter().map(|slice| slice.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_holding_and_allocation() {
        let coins = vec![
            coin("bitcoin", 100.0, 1.0),
            coin("ethereum", 100.0, 3.0),
        ];

        let summary = summarize(&coins, "usd");
        let top = summary.top_holding.unwrap();

        assert_eq!(top.id, "ethereum");
        assert_eq!(top.value, 300.0);
        assert_eq!(top.percentage, 75.0);

        assert_eq!(summary.allocation.len(), 2);
        assert_eq!(summary.allocation[0].symbol, "BIT");
        assert_eq!(summary.allocation[0].percentage, 25.0);
    }

    #[test]
    fn test_top_holding_ties_keep_first() {
        let coins = vec![coin("bitcoin", 10.0, 1.0), coin("ethereum", 5.0, 2.0)];

        let summary = summarize(&coins, "usd");
        assert_eq!(summary.top_holding.unwrap().id, "bitcoin");
    }

    #[test]
    fn test_tracking_only_portfolio() {
        let coins = vec![coin("bitcoin", 100.0, 0.0)];

        let summary = summarize(&coins, "usd");

        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.tracked_coins, 1);
        assert!(summary.top_holding.is_none());
        assert!(summary.allocation.is_empty());
    }

    #[test]
    fn test_missing_price_counts_as_zero() {
        let coins = vec![
            PortfolioCoin {
                market: market("illiquid", None),
                amount: 4.0,
            },
            coin("bitcoin", 100.0, 1.0),
        ];

        let summary = summarize(&coins, "usd");

        assert_eq!(summary.total_value, 100.0);
        assert_eq!(summary.valued_coins, 2);
        assert_eq!(summary.allocation.len(), 1);
        assert_eq!(summary.allocation[0].percentage, 100.0);
    }

    #[test]
    fn test_empty_portfolio() {
        let summary = summarize(&[], "usd");

        assert_eq!(summary.total_value, 0.0);
        assert_eq!(summary.valued_coins, 0);
        assert_eq!(summary.tracked_coins, 0);
        assert!(summary.top_holding.is_none());
    }
}
