//! Rollback of a community-map merge.
//!
//! Removes parks that exist only because of an OSM import and strips the
//! OSM traces (source tag, raw tags, segment ids) from everything else.
//! Accessibility flags are left alone: there is no backup of the
//! pre-merge values, and a flipped flag is cheaper to re-review than to
//! guess at.

use th_core::models::{Park, Source};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub removed: usize,
    pub kept: usize,
}

/// Drops OSM-only records and de-enriches the rest.
///
/// Any record with a non-OSM source survives, including manually curated
/// ones that never saw the NPS API.
pub fn strip_osm_enrichment(parks: Vec<Park>) -> (Vec<Park>, ResetReport) {
    let mut report = ResetReport::default();
    let mut kept = Vec::with_capacity(parks.len());

    for mut park in parks {
        if park.is_osm_only() {
            report.removed += 1;
            continue;
        }
        park.sources.retain(|s| *s != Source::Osm);
        park.osm_tags.clear();
        park.osm_ids.clear();
        kept.push(park);
    }

    report.kept = kept.len();
    (kept, report)
}
