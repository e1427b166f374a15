//! Sales lead model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::source::{Record, Table};

/// Where a lead is in the qualification funnel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    /// Just captured.
    #[default]
    New,
    /// First contact made.
    Contacted,
    /// Confirmed as a real opportunity.
    Qualified,
    /// Proposal sent.
    Proposal,
    /// Terms under discussion.
    Negotiation,
    /// Converted.
    Won,
    /// Dropped.
    Lost,
}

/// An unqualified sales prospect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Unique identifier.
    pub id: Uuid,
    /// Short title.
    pub title: String,
    /// Optional notes.
    #[serde(default)]
    pub description: Option<String>,
    /// Estimated value.
    #[serde(default)]
    pub value: Decimal,
    /// Funnel position.
    #[serde(default)]
    pub status: LeadStatus,
    /// Where the lead came from (website, referral, ...).
    #[serde(default)]
    pub source: Option<String>,
    /// The user who captured the lead.
    #[serde(default)]
    pub created_by: Option<Uuid>,
    /// When the lead was captured.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Lead {
    const TABLE: Table = Table::Leads;
}

/// Fields accepted when capturing a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLead {
    /// Short title; must not be blank.
    pub title: String,
    /// Optional notes.
    #[serde(default)]
    pub description: Option<String>,
    /// Estimated value, zero when unknown.
    #[serde(default)]
    pub value: Decimal,
    /// Initial funnel position.
    #[serde(default)]
    pub status: LeadStatus,
    /// Where the lead came from.
    #[serde(default)]
    pub source: Option<String>,
    /// The user capturing the lead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Uuid>,
}
