//! Unrealized gain/loss of held wallet balances against current rates.

use crate::domain::{find_rate, Decimal, ExchangeRate, Order, Wallet};
use tracing::warn;

use super::position_tracker::average_cost_per_unit;

/// Unrealized gain/loss figures, rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnrealizedPnl {
    /// `(current_rate - avg_cost) * balance`, in KRW.
    pub total_krw: Decimal,
    /// `(current_rate - avg_cost) / avg_cost * 100`.
    pub percent: Decimal,
}

impl UnrealizedPnl {
    /// `None` unless `avg_cost` is a real (positive) cost basis and both
    /// figures fit the decimal range.
    pub fn compute(avg_cost: Decimal, current_rate: Decimal, balance: Decimal) -> Option<Self> {
        if !avg_cost.is_positive() {
            return None;
        }
        let pnl = Self::checked(avg_cost, current_rate, balance);
        if pnl.is_none() {
            warn!(
                avg_cost = %avg_cost,
                rate = %current_rate,
                balance = %balance,
                "unrealized gain/loss overflows decimal range, leaving wallet unannotated"
            );
        }
        pnl
    }

    fn checked(avg_cost: Decimal, current_rate: Decimal, balance: Decimal) -> Option<Self> {
        let per_unit = current_rate.checked_sub(avg_cost)?;
        let percent = per_unit
            .checked_div(avg_cost)?
            .checked_mul(Decimal::hundred())?;
        Some(UnrealizedPnl {
            total_krw: per_unit.checked_mul(balance)?.round_money(),
            percent: percent.round_money(),
        })
    }
}

/// Annotate one wallet. KRW, empty and unpriced wallets come back unannotated.
pub fn enrich_wallet(wallet: &Wallet, orders: &[Order], rates: &[ExchangeRate]) -> Wallet {
    let plain = wallet.clone().without_price_difference();
    if wallet.currency.is_krw() || !wallet.balance.is_positive() {
        return plain;
    }

    let Some(current) = find_rate(rates, &wallet.currency) else {
        return plain;
    };
    let avg_cost = average_cost_per_unit(orders, &wallet.currency);

    match UnrealizedPnl::compute(avg_cost, current.rate, wallet.balance) {
        Some(pnl) => plain.with_price_difference(pnl.total_krw, pnl.percent),
        None => plain,
    }
}

/// Annotate every wallet with unrealized gain/loss, preserving order.
pub fn enrich_wallets(
    wallets: &[Wallet],
    orders: &[Order],
    rates: &[ExchangeRate],
) -> Vec<Wallet> {
    wallets
        .iter()
        .map(|wallet| enrich_wallet(wallet, orders, rates))
        .collect()
}
