//! # Business services
//!
//! One service per entity, constructed per request from the shared state.
//! Services own the ORM calls, audit logging and storage interaction;
//! handlers stay thin.

pub mod admins;
pub mod carousel;
pub mod categories;
pub mod countries;
pub mod currency;
pub mod dashboard;
pub mod products;
pub mod subcategories;
pub mod units;

use serde::Serialize;
use serde_json::Value;

/// Serialize an entity for an audit snapshot. Snapshot failures are not
/// worth failing a mutation over; the audit layer already tolerates gaps.
pub(crate) fn snapshot<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}
