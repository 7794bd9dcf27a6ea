//! Wallet balances, optionally annotated with unrealized gain/loss.

use crate::domain::{Currency, Decimal};
use serde::{Deserialize, Serialize};

/// One currency balance held by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub wallet_id: i64,
    pub currency: Currency,
    pub balance: Decimal,
    /// Unrealized gain/loss of the whole balance in KRW, 2 dp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_difference: Option<Decimal>,
    /// Unrealized gain/loss relative to average cost, in percent, 2 dp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_difference_percent: Option<Decimal>,
}

impl Wallet {
    pub fn new(wallet_id: i64, currency: Currency, balance: Decimal) -> Self {
        Wallet {
            wallet_id,
            currency,
            balance,
            price_difference: None,
            price_difference_percent: None,
        }
    }

    /// Attach unrealized gain/loss figures.
    pub fn with_price_difference(mut self, total_krw: Decimal, percent: Decimal) -> Self {
        self.price_difference = Some(total_krw);
        self.price_difference_percent = Some(percent);
        self
    }

    /// Drop any gain/loss annotation.
    pub fn without_price_difference(mut self) -> Self {
        self.price_difference = None;
        self.price_difference_percent = None;
        self
    }

    pub fn is_annotated(&self) -> bool {
        self.price_difference.is_some()
    }
}

/// The user's wallets plus the upstream KRW-equivalent total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletsData {
    pub total_krw_balance: Decimal,
    pub wallets: Vec<Wallet>,
}
