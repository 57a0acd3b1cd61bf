//! Proximity merge of community-map entries into the park dataset.
//!
//! An OSM entry within 500 m of an existing park is treated as the same
//! place: its accessibility flags are OR-ed in, its tags are kept, and the
//! record is marked enriched. Everything else either becomes a new park or
//! is dropped as generic roadside infrastructure.

use th_core::models::{DataStatus, Park, Source};

/// Two points closer than this are considered the same place.
pub const MATCH_RADIUS_M: f64 = 500.0;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Facility names too generic to stand alone as park records.
const GENERIC_NAMES: &[&str] = &[
    "parking",
    "parking area",
    "public",
    "visitor parking",
    "public parking",
    "general parking",
    "accessible parking",
    "rest area",
    "restroom",
    "toilets",
    "bathroom",
    "picnic area",
    "playground",
    "shelter",
    "pavilion",
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// OSM entries folded into an existing park.
    pub merged: usize,
    /// OSM entries appended as new parks.
    pub added: usize,
    /// Dataset size after the merge.
    pub total: usize,
}

/// Great-circle distance between two points, in meters.
pub fn haversine_distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * a.sqrt().asin() * EARTH_RADIUS_M
}

/// OR two tri-state flags; absent counts as false, result is concrete.
fn or_flag(a: Option<bool>, b: Option<bool>) -> Option<bool> {
    Some(a.unwrap_or(false) || b.unwrap_or(false))
}

fn is_generic(name: &str) -> bool {
    let lower = name.to_lowercase();
    name.starts_with("OSM: ") || GENERIC_NAMES.contains(&lower.as_str())
}

/// Merges normalized OSM entries into the dataset in place.
pub fn merge_osm_entries(parks: &mut Vec<Park>, osm_entries: Vec<Park>) -> MergeReport {
    let mut report = MergeReport::default();
    let mut new_parks = Vec::new();

    for entry in osm_entries {
        let matched = parks.iter_mut().find(|park| {
            haversine_distance_m(entry.lat, entry.lon, park.lat, park.lon) <= MATCH_RADIUS_M
        });

        match matched {
            Some(park) => {
                log::debug!(
                    "match found: {} -> {} ({:.1}m)",
                    entry.name,
                    park.name,
                    haversine_distance_m(entry.lat, entry.lon, park.lat, park.lon)
                );
                if !park.has_source(Source::Osm) {
                    park.sources.push(Source::Osm);
                }
                park.data_status = Some(DataStatus::Enriched);
                park.accessible_restrooms =
                    or_flag(park.accessible_restrooms, entry.accessible_restrooms);
                park.accessible_parking =
                    or_flag(park.accessible_parking, entry.accessible_parking);
                park.accessible_trails =
                    or_flag(park.accessible_trails, entry.accessible_trails);
                park.osm_tags.extend(entry.osm_tags);
                report.merged += 1;
            }
            None => {
                // Unmatched generic facilities (lone parking lots, toilets)
                // would pollute the park list; keep only named places.
                if is_generic(&entry.name) {
                    continue;
                }
                new_parks.push(entry);
                report.added += 1;
            }
        }
    }

    parks.extend(new_parks);
    report.total = parks.len();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use th_core::models::ReviewStatus;

    fn nps_park(id: &str, lat: f64, lon: f64) -> Park {
        Park {
            id: id.into(),
            name: format!("{id} National Park"),
            state: "CA".into(),
            lat,
            lon,
            accessible_restrooms: Some(false),
            accessible_parking: None,
            accessible_trails: Some(false),
            sources: vec![Source::Nps],
            affiliate_links: Default::default(),
            status: ReviewStatus::NeedsReview,
            reviewer_notes: None,
            accessibility_details: None,
            data_status: None,
            osm_tags: vec![],
            osm_ids: vec![],
        }
    }

    fn osm_entry(name: &str, lat: f64, lon: f64) -> Park {
        Park {
            id: format!("osm-n-{lat}"),
            name: name.into(),
            state: "CA".into(),
            lat,
            lon,
            accessible_restrooms: Some(true),
            accessible_parking: None,
            accessible_trails: None,
            sources: vec![Source::Osm],
            affiliate_links: Default::default(),
            status: ReviewStatus::Partial,
            reviewer_notes: None,
            accessibility_details: None,
            data_status: None,
            osm_tags: vec![serde_json::json!({ "wheelchair": "yes" })],
            osm_ids: vec![],
        }
    }

    #[test]
    fn haversine_one_degree_of_longitude_at_equator() {
        let d = haversine_distance_m(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn nearby_entry_enriches_the_park() {
        // ~110 m apart, well inside the 500 m radius.
        let mut parks = vec![nps_park("yose", 37.0, -119.0)];
        let report = merge_osm_entries(&mut parks, vec![osm_entry("Yosemite Toilets", 37.001, -119.0)]);

        assert_eq!(report, MergeReport { merged: 1, added: 0, total: 1 });
        let park = &parks[0];
        assert_eq!(park.sources, vec![Source::Nps, Source::Osm]);
        assert_eq!(park.data_status, Some(DataStatus::Enriched));
        // OR logic: true from OSM wins, None becomes concrete false.
        assert_eq!(park.accessible_restrooms, Some(true));
        assert_eq!(park.accessible_parking, Some(false));
        assert_eq!(park.accessible_trails, Some(false));
        assert_eq!(park.osm_tags.len(), 1);
    }

    #[test]
    fn distant_named_entry_becomes_a_new_park() {
        let mut parks = vec![nps_park("yose", 37.0, -119.0)];
        let report = merge_osm_entries(&mut parks, vec![osm_entry("Lost Coast Trail", 40.0, -124.0)]);

        assert_eq!(report, MergeReport { merged: 0, added: 1, total: 2 });
        assert_eq!(parks[1].name, "Lost Coast Trail");
    }

    #[test]
    fn generic_and_unnamed_entries_are_dropped() {
        let mut parks = vec![nps_park("yose", 37.0, -119.0)];
        let report = merge_osm_entries(
            &mut parks,
            vec![
                osm_entry("Parking", 40.0, -124.0),
                osm_entry("OSM: path", 41.0, -124.0),
            ],
        );

        assert_eq!(report, MergeReport { merged: 0, added: 0, total: 1 });
    }

    #[test]
    fn matched_entry_does_not_duplicate_the_osm_source() {
        let mut parks = vec![nps_park("yose", 37.0, -119.0)];
        parks[0].sources.push(Source::Osm);
        merge_osm_entries(&mut parks, vec![osm_entry("Toilets Again", 37.0005, -119.0)]);
        assert_eq!(parks[0].sources, vec![Source::Nps, Source::Osm]);
    }
}
