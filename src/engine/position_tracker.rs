use crate::domain::{sort_orders_chronological, Currency, Decimal, Order, Side};
use tracing::{debug, warn};

use super::closed_position_epsilon;

/// Held quantity of one currency and its KRW cost basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Units currently held; never negative after a sell.
    pub quantity_held: Decimal,

    /// KRW cost basis of `quantity_held`.
    pub total_cost_krw: Decimal,
}

impl Position {
    pub fn new() -> Self {
        Self {
            quantity_held: Decimal::zero(),
            total_cost_krw: Decimal::zero(),
        }
    }

    /// True while the held quantity is above the residue threshold.
    pub fn is_open(&self) -> bool {
        self.quantity_held > closed_position_epsilon()
    }

    /// KRW cost per held unit, or `None` when nothing is held.
    pub fn average_cost_per_unit(&self) -> Option<Decimal> {
        if self.is_open() {
            self.total_cost_krw.checked_div(self.quantity_held)
        } else {
            None
        }
    }
}

/// Replays KRW buy/sell orders of one currency into an average-cost position.
///
/// Orders must be fed in chronological order; [`replay_position`] sorts for you.
/// Orders on any pair other than `{KRW, currency}` are ignored.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    currency: Currency,
    pub state: Position,
    applied_orders: usize,
    clamped_sells: usize,
    overflowed: bool,
}

impl PositionTracker {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            state: Position::new(),
            applied_orders: 0,
            clamped_sells: 0,
            overflowed: false,
        }
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Apply one order. Returns the side it was applied as, or `None` if ignored.
    ///
    /// An order whose amounts overflow the decimal range drops the cost basis:
    /// the position is emptied and every later order is ignored.
    pub fn process_order(&mut self, order: &Order) -> Option<Side> {
        if self.overflowed {
            return None;
        }
        let side = order.side_for(&self.currency)?;
        let applied = match side {
            Side::Buy => self.handle_buy(order),
            Side::Sell => self.handle_sell(order),
        };
        let Some(next) = applied else {
            warn!(
                currency = %self.currency,
                order_id = order.order_id,
                "order amounts overflow decimal range, dropping cost basis"
            );
            self.overflowed = true;
            self.state = Position::new();
            return None;
        };

        self.state = next;
        self.applied_orders += 1;
        Some(side)
    }

    fn handle_buy(&self, order: &Order) -> Option<Position> {
        let qty = order.quantity(Side::Buy);
        let cost = qty.checked_mul(order.applied_rate)?;
        Some(Position {
            quantity_held: self.state.quantity_held.checked_add(qty)?,
            total_cost_krw: self.state.total_cost_krw.checked_add(cost)?,
        })
    }

    /// Reduce at the current average cost. Selling more than is held clamps to
    /// the held quantity; the excess is logged and counted, never carried.
    fn handle_sell(&mut self, order: &Order) -> Option<Position> {
        let qty = order.quantity(Side::Sell);
        let held = self.state.quantity_held;
        let (avg_cost, reduce) = if held.is_positive() {
            (self.state.total_cost_krw.checked_div(held)?, qty.min(held))
        } else {
            (Decimal::zero(), Decimal::zero())
        };

        if qty > reduce {
            self.clamped_sells += 1;
            warn!(
                currency = %self.currency,
                order_id = order.order_id,
                sold = %qty,
                held = %held,
                unmatched = %(qty - reduce),
                "sell exceeds held quantity, clamping to zero holdings"
            );
        }

        let released = avg_cost.checked_mul(reduce)?;
        let next = Position {
            quantity_held: held.checked_sub(reduce)?,
            total_cost_krw: self.state.total_cost_krw.checked_sub(released)?,
        };

        // A fully closed position forgets its cost basis.
        if next.quantity_held <= closed_position_epsilon() {
            return Some(Position::new());
        }
        Some(next)
    }

    /// Number of orders applied (buys and sells of this currency).
    pub fn applied_orders(&self) -> usize {
        self.applied_orders
    }

    /// Number of sells that exceeded the held quantity and were clamped.
    pub fn clamped_sells(&self) -> usize {
        self.clamped_sells
    }

    /// True once an order overflowed the decimal range; the position then has
    /// no cost basis.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    pub fn into_position(self) -> Position {
        self.state
    }
}

/// Filter `orders` to the `{KRW, currency}` pair, sort them chronologically and
/// replay them from an empty position.
pub fn replay_position(orders: &[Order], currency: &Currency) -> PositionTracker {
    let mut relevant: Vec<&Order> = orders
        .iter()
        .filter(|o| o.side_for(currency).is_some())
        .collect();
    sort_orders_chronological(&mut relevant);

    let mut tracker = PositionTracker::new(currency.clone());
    for order in relevant {
        tracker.process_order(order);
    }

    debug!(
        currency = %currency,
        applied = tracker.applied_orders(),
        clamped = tracker.clamped_sells(),
        overflowed = tracker.overflowed(),
        quantity = %tracker.state.quantity_held,
        "replayed position"
    );
    tracker
}

/// Average KRW acquisition cost of the currently held `currency` position.
///
/// Returns zero when there is no cost basis (no orders, the position was
/// fully closed, or its amounts overflowed). Zero means "unknown", not "acquired for free"; use
/// [`Position::average_cost_per_unit`] to get an `Option` instead.
pub fn average_cost_per_unit(orders: &[Order], currency: &Currency) -> Decimal {
    replay_position(orders, currency)
        .into_position()
        .average_cost_per_unit()
        .unwrap_or_else(Decimal::zero)
}
