//! `pantry-core` — shared building blocks for the inventory analytics engine.
//!
//! This crate contains **pure** primitives (no IO, no clock reads): identifiers,
//! categories, date arithmetic and the error model.

pub mod category;
pub mod entity;
pub mod error;
pub mod id;
pub mod snapshot;
pub mod temporal;

pub use category::Category;
pub use entity::{duplicate_ids, Entity};
pub use error::{DomainError, DomainResult};
pub use id::{DistributionId, ItemId, SupplierId};
pub use snapshot::{RecordSet, RejectedRecord};
pub use temporal::{days_since, days_until, parse_date, FAR_FUTURE_DAYS};
