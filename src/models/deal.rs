//! Deal model and pipeline stages.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::source::{Record, Table};

/// Position of a deal in the sales pipeline.
///
/// Stages are ordered; [`DealStage::ALL`] lists them in pipeline order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    /// Initial outreach.
    #[default]
    Prospecting = 0,
    /// Fit and budget being confirmed.
    Qualification = 1,
    /// Proposal delivered.
    Proposal = 2,
    /// Terms under discussion.
    Negotiation = 3,
    /// Signed.
    ClosedWon = 4,
    /// Abandoned.
    ClosedLost = 5,
}

impl DealStage {
    /// Every stage in pipeline order.
    pub const ALL: [DealStage; 6] = [
        DealStage::Prospecting,
        DealStage::Qualification,
        DealStage::Proposal,
        DealStage::Negotiation,
        DealStage::ClosedWon,
        DealStage::ClosedLost,
    ];

    /// Returns the stage's index in [`DealStage::ALL`].
    pub fn position(self) -> usize {
        self as usize
    }

    /// Returns true for the two terminal stages.
    pub fn is_closed(self) -> bool {
        matches!(self, DealStage::ClosedWon | DealStage::ClosedLost)
    }

    /// Returns the stage as stored in the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::Prospecting => "prospecting",
            DealStage::Qualification => "qualification",
            DealStage::Proposal => "proposal",
            DealStage::Negotiation => "negotiation",
            DealStage::ClosedWon => "closed_won",
            DealStage::ClosedLost => "closed_lost",
        }
    }
}

/// A sales opportunity tracked through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    /// Unique identifier.
    pub id: Uuid,
    /// Short title.
    pub title: String,
    /// Expected revenue.
    #[serde(default)]
    pub value: Decimal,
    /// Pipeline stage.
    #[serde(default)]
    pub stage: DealStage,
    /// The customer company, if known.
    #[serde(default)]
    pub company_id: Option<Uuid>,
    /// The customer contact, if known.
    #[serde(default)]
    pub contact_id: Option<Uuid>,
    /// When the deal is expected to close.
    #[serde(default)]
    pub expected_close_date: Option<NaiveDate>,
    /// When the deal was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Deal {
    const TABLE: Table = Table::Deals;
}

/// Fields accepted when opening a deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDeal {
    /// Short title; must not be blank.
    pub title: String,
    /// Expected revenue.
    #[serde(default)]
    pub value: Decimal,
    /// Starting stage.
    #[serde(default)]
    pub stage: DealStage,
    /// The customer company.
    #[serde(default)]
    pub company_id: Option<Uuid>,
    /// The customer contact.
    #[serde(default)]
    pub contact_id: Option<Uuid>,
    /// When the deal is expected to close.
    #[serde(default)]
    pub expected_close_date: Option<NaiveDate>,
}
