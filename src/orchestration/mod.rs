pub mod wallets;

pub use wallets::WalletAggregator;
