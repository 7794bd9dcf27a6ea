use crate::datasource::{DataSourceError, ExchangeApi};
use crate::domain::WalletsData;
use crate::engine::enrich_wallets;
use futures::future::join3;
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds the enriched wallet view for one request.
#[derive(Debug, Clone)]
pub struct WalletAggregator {
    api: Arc<dyn ExchangeApi>,
}

impl WalletAggregator {
    pub fn new(api: Arc<dyn ExchangeApi>) -> Self {
        Self { api }
    }

    /// Fetch wallets, orders and rates concurrently, then annotate wallets with
    /// unrealized gain/loss.
    ///
    /// A wallet fetch failure is returned. Order or rate fetch failures degrade
    /// to empty lists, which leaves the affected wallets unannotated.
    pub async fn get_wallets(&self, token: &str) -> Result<WalletsData, DataSourceError> {
        let (wallets, orders, rates) = join3(
            self.api.fetch_wallets(token),
            self.api.fetch_orders(token),
            self.api.fetch_rates(token),
        )
        .await;

        let wallets = wallets?;
        let orders = orders.unwrap_or_else(|e| {
            warn!("Order history unavailable, skipping cost basis: {}", e);
            Vec::new()
        });
        let rates = rates.unwrap_or_else(|e| {
            warn!("Exchange rates unavailable, skipping valuation: {}", e);
            Vec::new()
        });

        debug!(
            wallets = wallets.wallets.len(),
            orders = orders.len(),
            rates = rates.len(),
            "Enriching wallets"
        );

        Ok(WalletsData {
            total_krw_balance: wallets.total_krw_balance,
            wallets: enrich_wallets(&wallets.wallets, &orders, &rates),
        })
    }
}
