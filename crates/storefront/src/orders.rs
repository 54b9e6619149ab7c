//! Order records.
//!
//! An [`Order`] is an immutable snapshot of the cart taken at checkout.
//! Only `status` may change afterwards, and only by an external process.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use technova_core::{OrderId, OrderStatus, SHIPPING_SURCHARGE, UserId};

use crate::cart::{CartLine, subtotal_of};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Owner of the order.
    pub user_id: UserId,
    pub date: DateTime<Utc>,
    pub items: Vec<CartLine>,
    /// Item subtotal plus the shipping surcharge.
    pub total: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub shipping_address: String,
}

impl Order {
    /// Snapshot a set of cart lines into a new `Processing` order.
    #[must_use]
    pub fn record(
        id: OrderId,
        user_id: UserId,
        date: DateTime<Utc>,
        items: Vec<CartLine>,
        shipping_address: String,
    ) -> Self {
        let total = subtotal_of(&items) + SHIPPING_SURCHARGE;
        Self {
            id,
            user_id,
            date,
            items,
            total,
            status: OrderStatus::Processing,
            shipping_address,
        }
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

/// Time-derived order ID, strictly greater than every ID already in `log`.
///
/// Two orders placed within the same millisecond still get distinct IDs.
#[must_use]
pub fn next_order_id(now: DateTime<Utc>, log: &[Order]) -> OrderId {
    let millis = now.timestamp_millis();
    let floor = log
        .iter()
        .map(|o| o.id.as_i64().saturating_add(1))
        .max()
        .unwrap_or(i64::MIN);
    OrderId::new(millis.max(floor))
}

/// Orders owned by `user_id`, keeping log order.
#[must_use]
pub fn orders_for(log: &[Order], user_id: UserId) -> Vec<Order> {
    log.iter().filter(|o| o.user_id == user_id).cloned().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::catalog::tests::product;

    fn line(id: i64, price: Decimal, quantity: u32) -> CartLine {
        CartLine {
            product: product(id, "Item", "misc", price, Decimal::ONE),
            quantity,
        }
    }

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_record_totals_include_shipping() {
        let order = Order::record(
            OrderId::new(1),
            UserId::new(7),
            at(0),
            vec![line(1, Decimal::from(10), 2)],
            "1 Main St".to_string(),
        );
        assert_eq!(order.total, Decimal::from(10 * 2) + SHIPPING_SURCHARGE);
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.item_count(), 2);
    }

    #[test]
    fn test_next_order_id_uses_clock_when_ahead() {
        assert_eq!(next_order_id(at(1_000), &[]), OrderId::new(1_000));
    }

    #[test]
    fn test_next_order_id_never_repeats() {
        let existing = Order::record(
            OrderId::new(1_000),
            UserId::new(1),
            at(1_000),
            vec![line(1, Decimal::ONE, 1)],
            String::new(),
        );
        assert_eq!(next_order_id(at(1_000), &[existing.clone()]), OrderId::new(1_001));
        assert_eq!(next_order_id(at(500), &[existing]), OrderId::new(1_001));
    }

    #[test]
    fn test_orders_for_filters_by_owner() {
        let mk = |id: i64, user: i64| {
            Order::record(
                OrderId::new(id),
                UserId::new(user),
                at(id),
                vec![line(1, Decimal::ONE, 1)],
                String::new(),
            )
        };
        let log = vec![mk(3, 1), mk(2, 2), mk(1, 1)];

        let mine: Vec<i64> = orders_for(&log, UserId::new(1))
            .iter()
            .map(|o| o.id.as_i64())
            .collect();
        assert_eq!(mine, vec![3, 1]);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let order = Order::record(
            OrderId::new(5),
            UserId::new(9),
            at(0),
            vec![line(1, Decimal::from(10), 1)],
            "Addr".to_string(),
        );
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value.get("userId").and_then(serde_json::Value::as_i64), Some(9));
        assert_eq!(
            value.get("shippingAddress").and_then(serde_json::Value::as_str),
            Some("Addr")
        );
        assert_eq!(
            value.get("status").and_then(serde_json::Value::as_str),
            Some("Processing")
        );

        let back: Order = serde_json::from_value(value).unwrap();
        assert_eq!(back, order);
    }
}
