//! Deal pipeline grouping.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Deal, DealStage};

/// One stage column of the pipeline board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineColumn {
    /// The stage this column shows.
    pub stage: DealStage,
    /// Number of deals in the stage.
    pub count: usize,
    /// Sum of deal values in the stage.
    pub total_value: Decimal,
    /// Deals in the stage, in input order.
    pub deals: Vec<Deal>,
}

/// Deals grouped by stage, with totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pipeline {
    /// One column per stage, in stage order. Empty stages are included.
    pub columns: Vec<PipelineColumn>,
    /// Value of deals not yet closed.
    pub open_value: Decimal,
    /// Value of deals closed as won.
    pub won_value: Decimal,
}

impl Pipeline {
    /// Total number of deals across every column.
    pub fn deal_count(&self) -> usize {
        self.columns.iter().map(|column| column.count).sum()
    }

    /// Returns the column for `stage`.
    pub fn column(&self, stage: DealStage) -> &PipelineColumn {
        &self.columns[stage.position()]
    }
}

/// Groups deals by stage in a single pass.
///
/// # Example
///
/// ```
/// use bizdash::aggregate::group_by_stage;
/// use bizdash::models::DealStage;
///
/// let pipeline = group_by_stage(Vec::new());
/// assert_eq!(pipeline.columns.len(), DealStage::ALL.len());
/// assert_eq!(pipeline.deal_count(), 0);
/// ```
pub fn group_by_stage(deals: impl IntoIterator<Item = Deal>) -> Pipeline {
    let mut columns: Vec<PipelineColumn> = DealStage::ALL
        .iter()
        .map(|stage| PipelineColumn {
            stage: *stage,
            count: 0,
            total_value: Decimal::ZERO,
            deals: Vec::new(),
        })
        .collect();
    let mut open_value = Decimal::ZERO;
    let mut won_value = Decimal::ZERO;

    for deal in deals {
        if !deal.stage.is_closed() {
            open_value += deal.value;
        } else if deal.stage == DealStage::ClosedWon {
            won_value += deal.value;
        }
        let column = &mut columns[deal.stage.position()];
        column.count += 1;
        column.total_value += deal.value;
        column.deals.push(deal);
    }

    Pipeline {
        columns,
        open_value,
        won_value,
    }
}
