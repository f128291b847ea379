//! Order domain types.
//!
//! Orders are read-only in this service: checkout and payment happen
//! elsewhere, the catalog only lists a user's order history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use emporium_core::{OrderId, UserId};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// User who placed the order.
    pub user_id: UserId,
    /// Shipping address as captured at checkout.
    pub address: String,
    /// Order total.
    pub total: Decimal,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}
