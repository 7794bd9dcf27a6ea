//! Pure position accounting over a user's order history.
//!
//! Positions are never stored: every evaluation replays the full order list,
//! so results always reflect the authoritative ledger.

use crate::domain::Decimal;

pub mod position_tracker;
pub mod unrealized;

pub use position_tracker::{average_cost_per_unit, replay_position, Position, PositionTracker};
pub use unrealized::{enrich_wallet, enrich_wallets, UnrealizedPnl};

/// Held quantity at or below this is a closed position (`1e-8`).
pub fn closed_position_epsilon() -> Decimal {
    Decimal::from_parts(1, 8)
}
