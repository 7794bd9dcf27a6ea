pub mod api;
pub mod config;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use datasource::{DataSourceError, ExchangeApi, HttpExchangeApi, MockExchangeApi};
pub use domain::{Currency, Decimal, ExchangeRate, Order, Side, Timestamp, Wallet, WalletsData};
pub use engine::{average_cost_per_unit, enrich_wallets, Position, PositionTracker};
pub use error::AppError;
pub use orchestration::WalletAggregator;
