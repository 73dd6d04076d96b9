//! Supplier records and lead segmentation.
//!
//! Pure logic over supplier snapshots: the data store owns the records, this
//! crate only reads them.

pub mod normalize;
pub mod segmentation;
pub mod supplier;

pub use normalize::{normalize_suppliers, NormalizedSuppliers, RawDonation, RawSupplier};
pub use segmentation::{
    classify, segment_suppliers, suppliers_for_category, LeadTier, RankedSupplier, Segments,
    HOT_MAX_DAYS, WARM_MAX_DAYS,
};
pub use supplier::{Donation, Supplier};
