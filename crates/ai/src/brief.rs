//! Outreach briefs: the structured, language-agnostic summary handed to the
//! text-generation capability.

use serde::{Deserialize, Serialize};

use pantry_core::{Category, SupplierId};
use pantry_inventory::{AnalysisConfig, CrisisState, InventoryItem, SupplyGapRecord, SupplyStatus};
use pantry_suppliers::{Donation, LeadTier, RankedSupplier};

use crate::crisis::CrisisSignal;

/// How hard the ask should be.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Urgent,
    Important,
    General,
}

impl From<SupplyStatus> for UrgencyTier {
    fn from(status: SupplyStatus) -> Self {
        match status {
            SupplyStatus::Critical => UrgencyTier::Urgent,
            SupplyStatus::Low => UrgencyTier::Important,
            SupplyStatus::Ok => UrgencyTier::General,
        }
    }
}

/// The category need behind an outreach batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeedSummary {
    pub category: Category,
    /// One decimal, as reported.
    pub days_of_supply: f64,
    pub status: SupplyStatus,
    pub total_quantity: f64,
    /// Unknown when the caller only supplied days of supply.
    pub daily_demand: Option<f64>,
    pub effective_daily_demand: Option<f64>,
    /// Names of stocked items in the category (the category itself if none).
    pub specific_items: Vec<String>,
}

impl NeedSummary {
    /// Need taken from a full supply-gap record.
    pub fn from_gap(gap: &SupplyGapRecord, items: &[InventoryItem]) -> Self {
        Self {
            category: gap.category.clone(),
            days_of_supply: gap.days_of_supply_rounded,
            status: gap.status,
            total_quantity: gap.total_quantity,
            daily_demand: Some(gap.daily_demand),
            effective_daily_demand: Some(gap.effective_daily_demand),
            specific_items: specific_items(&gap.category, items),
        }
    }

    /// Need from a bare days-of-supply figure (status classified here).
    pub fn from_days(
        category: Category,
        days_of_supply: f64,
        items: &[InventoryItem],
        config: &AnalysisConfig,
    ) -> Self {
        let total_quantity = items
            .iter()
            .filter(|i| i.is_active() && i.category == category)
            .map(|i| i.quantity)
            .sum();
        Self {
            status: SupplyStatus::classify(days_of_supply, config),
            days_of_supply,
            total_quantity,
            daily_demand: None,
            effective_daily_demand: None,
            specific_items: specific_items(&category, items),
            category,
        }
    }

    pub fn urgency(&self) -> UrgencyTier {
        self.status.into()
    }
}

fn specific_items(category: &Category, items: &[InventoryItem]) -> Vec<String> {
    let names: Vec<String> = items
        .iter()
        .filter(|i| i.is_active() && &i.category == category)
        .map(|i| i.name.clone())
        .collect();
    if names.is_empty() {
        vec![category.to_string()]
    } else {
        names
    }
}

/// Crisis context snapshot included in a brief.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisSummary {
    pub event_type: String,
    pub severity: String,
    pub description: String,
    pub demand_multiplier: f64,
    /// Expected demand increase in percent (2.5x -> 150).
    pub demand_increase_pct: f64,
}

impl CrisisSummary {
    /// Summary of an active crisis; `None` when inactive.
    pub fn from_state(state: &CrisisState) -> Option<Self> {
        state.active.then(|| Self {
            event_type: state.kind.clone(),
            severity: crate::crisis::severity_of(state),
            description: state.description.clone(),
            demand_multiplier: state.effective_multiplier(),
            demand_increase_pct: state.demand_increase_pct(),
        })
    }

    /// Summary of a classifier signal; `None` when it reports no crisis.
    pub fn from_signal(signal: &CrisisSignal) -> Option<Self> {
        let state = signal.to_state()?;
        Some(Self {
            event_type: signal.event_type.clone(),
            severity: signal.severity.clone(),
            description: signal.reasoning.clone(),
            demand_multiplier: state.effective_multiplier(),
            demand_increase_pct: state.demand_increase_pct(),
        })
    }

    /// Event type with underscores spelled out (`winter_storm` -> `winter storm`).
    pub fn event_label(&self) -> String {
        self.event_type.replace('_', " ")
    }
}

/// Everything the text-generation capability gets for one supplier.
///
/// Built once per supplier and only ever handed out by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachBrief {
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    pub supplier_email: String,
    pub supplier_type: String,
    pub lead_tier: LeadTier,
    pub lead_rationale: String,
    pub urgency: UrgencyTier,
    pub need: NeedSummary,
    pub last_donation: Option<Donation>,
    pub crisis: Option<CrisisSummary>,
}

impl OutreachBrief {
    pub fn build(candidate: &RankedSupplier, need: &NeedSummary, crisis: Option<&CrisisSummary>) -> Self {
        let supplier = &candidate.supplier;
        Self {
            supplier_id: supplier.id.clone(),
            supplier_name: supplier.name.clone(),
            supplier_email: supplier.email.clone(),
            supplier_type: supplier.supplier_type.clone(),
            lead_tier: candidate.tier,
            lead_rationale: candidate.tier.rationale().to_string(),
            urgency: need.urgency(),
            need: need.clone(),
            last_donation: supplier.most_recent_donation().cloned(),
            crisis: crisis.cloned(),
        }
    }
}
