//! Deal operations.

use tracing::info;
use uuid::Uuid;

use crate::aggregate::{Pipeline, filter_by_title, group_by_stage};
use crate::error::DashboardResult;
use crate::models::{Deal, DealStage, NewDeal};
use crate::source::{DataSource, Query, Record};

use super::{insert, list, patch, require_title, row_for, update};

/// Lists deals newest first, keeping those whose title contains `search`.
pub async fn list_deals<S>(source: &S, search: Option<&str>) -> DashboardResult<Vec<Deal>>
where
    S: DataSource + ?Sized,
{
    let deals: Vec<Deal> =
        list(source, Query::table(Deal::TABLE).order_by("created_at", false)).await?;
    Ok(match search {
        Some(search) => filter_by_title(deals, search),
        None => deals,
    })
}

/// Opens a deal.
pub async fn create_deal<S>(source: &S, new: NewDeal) -> DashboardResult<Deal>
where
    S: DataSource + ?Sized,
{
    let new = NewDeal {
        title: require_title(&new.title)?,
        ..new
    };
    let deal: Deal = insert(source, row_for::<Deal>(&new)?).await?;
    info!(deal_id = %deal.id, stage = deal.stage.as_str(), "Deal created");
    Ok(deal)
}

/// Moves a deal to another pipeline stage.
pub async fn move_deal<S>(source: &S, id: Uuid, stage: DealStage) -> DashboardResult<Deal>
where
    S: DataSource + ?Sized,
{
    update(source, id, patch("stage", stage)?).await
}

/// Fetches every deal and groups it by stage.
pub async fn pipeline<S>(source: &S) -> DashboardResult<Pipeline>
where
    S: DataSource + ?Sized,
{
    Ok(group_by_stage(list_deals(source, None).await?))
}
