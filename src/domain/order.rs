//! Order type representing one executed KRW exchange.

use crate::domain::{Currency, Decimal, Side, Timestamp};
use serde::{Deserialize, Serialize};

/// A historical exchange order as reported by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub order_id: i64,
    pub from_currency: Currency,
    /// Units of `from_currency` given up.
    pub from_amount: Decimal,
    pub to_currency: Currency,
    /// Units of `to_currency` received.
    pub to_amount: Decimal,
    /// KRW per one unit of the non-KRW leg, locked at order time.
    pub applied_rate: Decimal,
    pub ordered_at: Timestamp,
}

impl Order {
    /// Classify this order relative to `currency`.
    ///
    /// Returns `None` unless the pair is exactly `{KRW, currency}`.
    pub fn side_for(&self, currency: &Currency) -> Option<Side> {
        if currency.is_krw() {
            return None;
        }
        if self.from_currency.is_krw() && &self.to_currency == currency {
            Some(Side::Buy)
        } else if &self.from_currency == currency && self.to_currency.is_krw() {
            Some(Side::Sell)
        } else {
            None
        }
    }

    /// Units of the non-KRW leg moved by this order.
    pub fn quantity(&self, side: Side) -> Decimal {
        match side {
            Side::Buy => self.to_amount,
            Side::Sell => self.from_amount,
        }
    }
}
