//! Lead operations.

use tracing::info;

use crate::aggregate::filter_by_title;
use crate::error::DashboardResult;
use crate::models::{Lead, NewLead};
use crate::source::{DataSource, Query, Record};

use super::{insert, list, require_title, row_for};

/// Lists leads newest first, keeping those whose title contains `search`.
pub async fn list_leads<S>(source: &S, search: Option<&str>) -> DashboardResult<Vec<Lead>>
where
    S: DataSource + ?Sized,
{
    let leads: Vec<Lead> =
        list(source, Query::table(Lead::TABLE).order_by("created_at", false)).await?;
    Ok(match search {
        Some(search) => filter_by_title(leads, search),
        None => leads,
    })
}

/// Captures a new lead.
pub async fn create_lead<S>(source: &S, new: NewLead) -> DashboardResult<Lead>
where
    S: DataSource + ?Sized,
{
    let new = NewLead {
        title: require_title(&new.title)?,
        ..new
    };
    let lead: Lead = insert(source, row_for::<Lead>(&new)?).await?;
    info!(lead_id = %lead.id, status = ?lead.status, "Lead created");
    Ok(lead)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;
    use crate::source::InMemorySource;
    use rust_decimal::Decimal;
    use serde_json::json;
    use uuid::Uuid;

    async fn seeded() -> InMemorySource {
        let source = InMemorySource::new();
        let rows = [
            ("Acme renewal", "2024-03-01T09:00:00Z"),
            ("Globex pilot", "2024-03-03T09:00:00Z"),
            ("acme expansion", "2024-03-02T09:00:00Z"),
        ]
        .iter()
        .enumerate()
        .map(|(i, (title, created_at))| {
            json!({"id": Uuid::from_u128(i as u128 + 1), "title": title, "created_at": created_at})
                .as_object()
                .unwrap()
                .clone()
        })
        .collect::<Vec<_>>();
        source.seed(Lead::TABLE, rows).await;
        source
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let source = seeded().await;

        let titles: Vec<String> = list_leads(&source, None)
            .await
            .unwrap()
            .into_iter()
            .map(|lead| lead.title)
            .collect();

        assert_eq!(titles, vec!["Globex pilot", "acme expansion", "Acme renewal"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let source = seeded().await;

        let leads = list_leads(&source, Some("ACME")).await.unwrap();

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].title, "acme expansion");
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let source = InMemorySource::new();
        let new = NewLead {
            title: "Website enquiry".to_string(),
            description: None,
            value: Decimal::ZERO,
            status: LeadStatus::default(),
            source: Some("website".to_string()),
            created_by: None,
        };

        let lead = create_lead(&source, new).await.unwrap();

        assert_eq!(lead.status, LeadStatus::New);
        assert_eq!(lead.value, Decimal::ZERO);
        assert!(lead.created_at.is_some());
    }
}
