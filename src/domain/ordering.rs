//! Stable chronological ordering of orders for replay.

use crate::domain::{Order, Timestamp};

/// Ordering key for orders: `ordered_at`, then `order_id`.
///
/// Orders equal on both keep their input relative order (the sort is stable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OrderOrderingKey {
    pub ordered_at: Timestamp,
    pub order_id: i64,
}

impl OrderOrderingKey {
    pub fn from_order(order: &Order) -> Self {
        OrderOrderingKey {
            ordered_at: order.ordered_at,
            order_id: order.order_id,
        }
    }
}

/// Sort orders chronologically in place.
pub fn sort_orders_chronological(orders: &mut [&Order]) {
    orders.sort_by_key(|order| OrderOrderingKey::from_order(order));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Currency, Decimal};

    fn make_order(order_id: i64, at: &str) -> Order {
        Order {
            order_id,
            from_currency: Currency::krw(),
            from_amount: Decimal::from(1300),
            to_currency: Currency::new("USD"),
            to_amount: Decimal::from(1),
            applied_rate: Decimal::from(1300),
            ordered_at: at.parse().unwrap(),
        }
    }

    #[test]
    fn test_sorts_by_time() {
        let a = make_order(2, "2025-01-02T00:00:00Z");
        let b = make_order(1, "2025-01-03T00:00:00Z");
        let c = make_order(3, "2025-01-01T00:00:00Z");
        let mut orders = vec![&a, &b, &c];

        sort_orders_chronological(&mut orders);

        let ids: Vec<i64> = orders.iter().map(|o| o.order_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_same_time_breaks_tie_by_order_id() {
        let a = make_order(9, "2025-01-01T00:00:00Z");
        let b = make_order(4, "2025-01-01T00:00:00Z");
        let mut orders = vec![&a, &b];

        sort_orders_chronological(&mut orders);

        assert_eq!(orders[0].order_id, 4);
        assert_eq!(orders[1].order_id, 9);
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let mut a = make_order(5, "2025-01-01T00:00:00Z");
        a.to_amount = Decimal::from(10);
        let b = make_order(5, "2025-01-01T00:00:00Z");
        let mut orders = vec![&a, &b];

        sort_orders_chronological(&mut orders);

        assert_eq!(orders[0].to_amount, Decimal::from(10));
        assert_eq!(orders[1].to_amount, Decimal::from(1));
    }
}
