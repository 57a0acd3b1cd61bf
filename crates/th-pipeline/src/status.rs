//! Backfill of the `data_status` bookkeeping field for older records.

use th_core::models::{DataStatus, Park, ReviewStatus};

/// Gives every record without a `data_status` one derived from its review
/// state: verified records are considered complete, the rest unknown.
/// Returns how many records were touched.
pub fn backfill_data_status(parks: &mut [Park]) -> usize {
    let mut updated = 0;
    for park in parks.iter_mut() {
        if park.data_status.is_some() {
            continue;
        }
        park.data_status = Some(match park.status {
            ReviewStatus::Verified => DataStatus::Complete,
            _ => DataStatus::Unknown,
        });
        updated += 1;
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use th_core::models::Source;

    fn park(status: ReviewStatus, data_status: Option<DataStatus>) -> Park {
        Park {
            id: "x".into(),
            name: "X".into(),
            state: "UT".into(),
            lat: 38.0,
            lon: -109.0,
            accessible_restrooms: None,
            accessible_parking: None,
            accessible_trails: None,
            sources: vec![Source::Nps],
            affiliate_links: Default::default(),
            status,
            reviewer_notes: None,
            accessibility_details: None,
            data_status,
            osm_tags: vec![],
            osm_ids: vec![],
        }
    }

    #[test]
    fn backfills_only_missing_statuses() {
        let mut parks = vec![
            park(ReviewStatus::Verified, None),
            park(ReviewStatus::NeedsReview, None),
            park(ReviewStatus::Partial, Some(DataStatus::Enriched)),
        ];
        let updated = backfill_data_status(&mut parks);
        assert_eq!(updated, 2);
        assert_eq!(parks[0].data_status, Some(DataStatus::Complete));
        assert_eq!(parks[1].data_status, Some(DataStatus::Unknown));
        assert_eq!(parks[2].data_status, Some(DataStatus::Enriched));
    }
}
