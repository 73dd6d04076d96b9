use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pantry_core::{Category, Entity, SupplierId};

/// One past donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub date: Option<DateTime<Utc>>,
    pub items: Vec<String>,
    pub quantity: f64,
    pub unit: String,
}

/// A food supplier (grocer, farm, manufacturer, individual donor...).
///
/// Canonical shape produced by
/// [`normalize_suppliers`](crate::normalize::normalize_suppliers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub supplier_type: String,
    pub email: String,
    /// Empty means "any category" (broad match).
    pub preferred_categories: Vec<Category>,
    /// `None` means never contacted (maximally stale).
    pub last_contact: Option<DateTime<Utc>>,
    /// Observed response rate in `[0, 1]`.
    pub response_rate: f64,
    /// Most recent first, by store convention.
    pub donation_history: Vec<Donation>,
}

impl Supplier {
    pub fn new(id: SupplierId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            supplier_type: String::new(),
            email: email.into(),
            preferred_categories: Vec::new(),
            last_contact: None,
            response_rate: 0.0,
            donation_history: Vec::new(),
        }
    }

    pub fn with_preferred(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.preferred_categories = categories.into_iter().collect();
        self
    }

    pub fn with_last_contact(mut self, at: DateTime<Utc>) -> Self {
        self.last_contact = Some(at);
        self
    }

    pub fn with_donation(mut self, donation: Donation) -> Self {
        self.donation_history.push(donation);
        self
    }

    /// Whether this supplier is a candidate for `category`.
    ///
    /// Suppliers without stated preferences match every category.
    pub fn accepts(&self, category: &Category) -> bool {
        self.preferred_categories.is_empty() || self.preferred_categories.contains(category)
    }

    /// Head of the donation history.
    pub fn most_recent_donation(&self) -> Option<&Donation> {
        self.donation_history.first()
    }
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
