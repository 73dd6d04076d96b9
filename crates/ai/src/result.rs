use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pantry_core::SupplierId;
use pantry_inventory::SupplyStatus;
use pantry_suppliers::LeadTier;

use crate::brief::UrgencyTier;

/// Failure of the external text-generation capability.
///
/// Never escapes a batch: the composer turns every variant into placeholder
/// text for the affected supplier.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AiError {
    #[error("text generation unavailable: {0}")]
    Unavailable(String),

    #[error("text generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed reply: {0}")]
    MalformedReply(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Outreach text prepared for one supplier.
///
/// `fallback` carries the reason whenever placeholder text was substituted
/// for any part of the message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachResult {
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    pub supplier_email: String,
    pub lead_tier: LeadTier,
    pub urgency: UrgencyTier,
    pub need_status: SupplyStatus,
    pub subject: String,
    pub body: String,
    pub fallback: Option<String>,
}

impl OutreachResult {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}
