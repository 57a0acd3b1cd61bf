//! Dataset validation.
//!
//! Shape errors are caught earlier by typed deserialization; this pass
//! covers the cross-record and range rules a schema cannot express.

use std::collections::HashSet;
use th_core::error::{AppError, Result};
use th_core::models::Park;

/// One problem found in the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Index of the offending record in the dataset.
    pub index: usize,
    pub id: String,
    pub message: String,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "park {} (id: {}): {}", self.index, self.id, self.message)
    }
}

/// Checks every record and returns the full list of problems.
pub fn validate_parks(parks: &[Park]) -> Vec<Issue> {
    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, park) in parks.iter().enumerate() {
        let mut push = |message: String| {
            issues.push(Issue {
                index,
                id: park.id.clone(),
                message,
            });
        };

        if park.id.is_empty() {
            push("empty id".into());
        } else if !seen_ids.insert(park.id.as_str()) {
            push("duplicate id".into());
        }
        if park.name.is_empty() {
            push("empty name".into());
        }
        if park.sources.is_empty() {
            push("record has no source".into());
        }
        if !(-90.0..=90.0).contains(&park.lat) {
            push(format!("latitude out of range: {}", park.lat));
        }
        if !(-180.0..=180.0).contains(&park.lon) {
            push(format!("longitude out of range: {}", park.lon));
        }
    }

    issues
}

/// Validates and fails with a summary error when anything is wrong.
pub fn ensure_valid(parks: &[Park]) -> Result<()> {
    let issues = validate_parks(parks);
    if issues.is_empty() {
        return Ok(());
    }
    for issue in &issues {
        log::error!("{issue}");
    }
    Err(AppError::Validation(format!(
        "{} problem(s) in {} record(s)",
        issues.len(),
        parks.len()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use th_core::models::{ReviewStatus, Source};

    fn park(id: &str) -> Park {
        Park {
            id: id.into(),
            name: "Some Park".into(),
            state: "CO".into(),
            lat: 39.0,
            lon: -105.5,
            accessible_restrooms: None,
            accessible_parking: None,
            accessible_trails: None,
            sources: vec![Source::Manual],
            affiliate_links: Default::default(),
            status: ReviewStatus::Verified,
            reviewer_notes: None,
            accessibility_details: None,
            data_status: None,
            osm_tags: vec![],
            osm_ids: vec![],
        }
    }

    #[test]
    fn clean_dataset_passes() {
        let parks = vec![park("a"), park("b")];
        assert!(validate_parks(&parks).is_empty());
        assert!(ensure_valid(&parks).is_ok());
    }

    #[test]
    fn duplicate_ids_are_reported_once_per_duplicate() {
        let parks = vec![park("a"), park("a"), park("a")];
        let issues = validate_parks(&parks);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.message == "duplicate id"));
        assert_eq!(issues[0].index, 1);
    }

    #[test]
    fn out_of_range_coordinates_fail() {
        let mut bad = park("a");
        bad.lat = 91.0;
        bad.lon = -200.0;
        let issues = validate_parks(&[bad]);
        assert_eq!(issues.len(), 2);
        assert!(ensure_valid(&[park("a"), park("a")]).is_err());
    }

    #[test]
    fn empty_fields_fail() {
        let mut bad = park("");
        bad.name.clear();
        bad.sources.clear();
        let issues = validate_parks(&[bad]);
        assert_eq!(issues.len(), 3);
    }
}
