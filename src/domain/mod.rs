//! Domain types for the KRW exchange wallet service.
//!
//! This module provides:
//! - Fixed-point numeric handling via the Decimal wrapper
//! - Domain primitives: Currency, Timestamp, Side
//! - Upstream records (Order, Wallet, ExchangeRate, Quote) with camelCase JSON
//! - Stable chronological ordering of orders for replay
//! - Amount and currency-pair validation for quote/order input

pub mod amount;
pub mod decimal;
pub mod order;
pub mod ordering;
pub mod primitives;
pub mod quote;
pub mod rate;
pub mod wallet;

pub use amount::{parse_amount, validate_amount, AmountBounds, AmountError};
pub use decimal::Decimal;
pub use order::Order;
pub use ordering::{sort_orders_chronological, OrderOrderingKey};
pub use primitives::{Currency, CurrencyParseError, Side, Timestamp, TimestampParseError};
pub use quote::{CreateOrderRequest, ExchangeInputError, Quote, QuoteRequest};
pub use rate::{find_rate, ExchangeRate, ExchangeRatesData};
pub use wallet::{Wallet, WalletsData};
