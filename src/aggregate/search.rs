//! Title search.

use crate::models::{Deal, Lead, WorkItem};

/// A record with a searchable title.
pub trait Titled {
    /// The record's title.
    fn title(&self) -> &str;
}

impl Titled for Lead {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for Deal {
    fn title(&self) -> &str {
        &self.title
    }
}

impl Titled for WorkItem {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Keeps records whose title contains `search`, ignoring case.
///
/// A blank search keeps everything. Order is preserved.
pub fn filter_by_title<T: Titled>(records: Vec<T>, search: &str) -> Vec<T> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| record.title().to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn lead(id: u128, title: &str) -> Lead {
        Lead {
            id: Uuid::from_u128(id),
            title: title.to_string(),
            description: None,
            value: Decimal::ZERO,
            status: LeadStatus::New,
            source: None,
            created_by: None,
            created_at: None,
        }
    }

    #[test]
    fn test_case_insensitive_substring() {
        let leads = vec![lead(1, "Acme renewal"), lead(2, "Globex pilot"), lead(3, "ACME upsell")];

        let found = filter_by_title(leads, "acme");

        let ids: Vec<Uuid> = found.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![Uuid::from_u128(1), Uuid::from_u128(3)]);
    }

    #[test]
    fn test_blank_search_keeps_all() {
        let leads = vec![lead(1, "a"), lead(2, "b")];
        assert_eq!(filter_by_title(leads.clone(), "   "), leads);
    }

    #[test]
    fn test_no_match() {
        assert!(filter_by_title(vec![lead(1, "Acme")], "initech").is_empty());
    }
}
