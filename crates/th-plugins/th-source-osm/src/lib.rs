//! # th-source-osm
//!
//! Overpass API client for wheelchair-accessibility features.
//!
//! Queries OpenStreetMap per state for accessible parks, nature reserves,
//! campsites, viewpoints, paths, toilets and parking, normalizes the
//! elements into `Park` records, and deduplicates named trail segments.
//! The query shape is driven by an optional `osm_filters.json` so the
//! fetch can be narrowed without code changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use th_core::error::{AppError, Result};
use th_core::models::{Park, ReviewStatus, Source};

pub const OVERPASS_URL: &str = "http://overpass-api.de/api/interpreter";

/// States queried by default. Kept to a subset so a full run stays under
/// Overpass timeouts.
pub const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("CA", "California"),
    ("NY", "New York"),
    ("TX", "Texas"),
    ("FL", "Florida"),
    ("CO", "Colorado"),
    ("RI", "Rhode Island"),
];

fn default_true() -> bool {
    true
}

/// Feature-class toggles for the Overpass query.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryFeatures {
    #[serde(default = "default_true")]
    pub parks_and_nature: bool,
    #[serde(default = "default_true")]
    pub campsites_and_viewpoints: bool,
    #[serde(default = "default_true")]
    pub paths: bool,
    #[serde(default = "default_true")]
    pub toilets: bool,
    #[serde(default = "default_true")]
    pub parking: bool,
}

impl Default for QueryFeatures {
    fn default() -> Self {
        Self {
            parks_and_nature: true,
            campsites_and_viewpoints: true,
            paths: true,
            toilets: true,
            parking: true,
        }
    }
}

/// Contents of `osm_filters.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OsmFilters {
    #[serde(default)]
    pub query_features: QueryFeatures,
    /// Lowercased keywords that mark urban/commercial infrastructure.
    #[serde(default)]
    pub exclude_name_keywords: Vec<String>,
    /// Tag key -> rejected values.
    #[serde(default)]
    pub exclude_tags: BTreeMap<String, Vec<String>>,
}

/// Builds the Overpass QL query for one state (ISO3166-2 area).
pub fn build_query(state_code: &str, filters: &OsmFilters) -> String {
    let features = &filters.query_features;
    let mut parts: Vec<String> = Vec::new();

    if features.parks_and_nature {
        parts.push(r#"nwr["leisure"~"park|nature_reserve"]["wheelchair"="yes"](area.searchArea);"#.into());
        parts.push(r#"nwr["boundary"="national_park"]["wheelchair"="yes"](area.searchArea);"#.into());
        parts.push(r#"nwr["protected_area"]["wheelchair"="yes"](area.searchArea);"#.into());
    }
    if features.campsites_and_viewpoints {
        parts.push(r#"nwr["tourism"~"camp_site|picnic_site|viewpoint"]["wheelchair"="yes"](area.searchArea);"#.into());
    }
    if features.paths {
        parts.push(r#"nwr["highway"="path"]["wheelchair"="yes"](area.searchArea);"#.into());
    }
    if features.toilets {
        parts.push(r#"nwr["amenity"="toilets"]["wheelchair"="yes"]["building"!="yes"](area.searchArea);"#.into());
    }
    if features.parking {
        // Surface lots only, public access, either explicitly wheelchair
        // tagged or with marked disabled capacity.
        parts.push(
            r#"nwr["amenity"="parking"]
         ["parking"!~"multi-storey|underground|rooftop|garage"]
         ["access"!~"private|customers|permit"]
         ["park_ride"!="yes"]
         ["wheelchair"="yes"]
         (area.searchArea);
      nwr["amenity"="parking"]
         ["parking"!~"multi-storey|underground|rooftop|garage"]
         ["access"!~"private|customers|permit"]
         ["park_ride"!="yes"]
         ["capacity:disabled"]
         (area.searchArea);"#
                .into(),
        );
    }

    let query_body = parts.join("\n      ");
    format!(
        r#"[out:json][timeout:180];
    area["ISO3166-2"="US-{state_code}"]->.searchArea;
    (
      {query_body}
    );
    out center tags;"#
    )
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// One raw Overpass element (`out center tags` form).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Center>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl OverpassElement {
    /// Node coordinates, or the computed center for ways and relations.
    fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => self.center.map(|c| (c.lat, c.lon)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// Names that pass the keyword blocklist even when a keyword matches.
const BLOCKLIST_EXEMPT: &[&str] = &["ranger station", "nature center", "visitor center"];

/// Maps one Overpass element to the site schema.
///
/// Returns `None` for elements excluded by the filters or missing
/// coordinates. Accessibility flags are derived from the element's own
/// class only: a toilets amenity says nothing about trails.
pub fn normalize_element(
    element: &OverpassElement,
    state_code: &str,
    filters: &OsmFilters,
) -> Option<Park> {
    let tags = &element.tags;

    for (key, rejected) in &filters.exclude_tags {
        if let Some(value) = tags.get(key) {
            if rejected.contains(value) {
                return None;
            }
        }
    }

    let id = format!(
        "osm-{}-{}",
        element.kind.chars().next().unwrap_or('?'),
        element.id
    );

    let name = tags.get("name").cloned().unwrap_or_else(|| {
        let class = tags
            .get("leisure")
            .or_else(|| tags.get("highway"))
            .or_else(|| tags.get("amenity"))
            .map(String::as_str)
            .unwrap_or("Unknown Feature");
        format!("OSM: {class}")
    });

    let name_lower = name.to_lowercase();
    if filters
        .exclude_name_keywords
        .iter()
        .any(|kw| name_lower.contains(kw))
        && !BLOCKLIST_EXEMPT.iter().any(|ok| name_lower.contains(ok))
    {
        return None;
    }

    let (lat, lon) = element.coordinates()?;

    let wheelchair_yes = tags.get("wheelchair").map(String::as_str) == Some("yes");
    let amenity = tags.get("amenity").map(String::as_str);

    let accessible_restrooms = (amenity == Some("toilets")).then_some(wheelchair_yes);
    let accessible_parking = (amenity == Some("parking"))
        .then_some(wheelchair_yes || tags.contains_key("capacity:disabled"));
    let accessible_trails =
        (tags.get("highway").map(String::as_str) == Some("path")).then_some(wheelchair_yes);

    Some(Park {
        id,
        name,
        state: state_code.to_string(),
        lat,
        lon,
        accessible_restrooms,
        accessible_parking,
        accessible_trails,
        sources: vec![Source::Osm],
        affiliate_links: Default::default(),
        status: ReviewStatus::Partial,
        reviewer_notes: None,
        accessibility_details: None,
        data_status: None,
        osm_tags: vec![serde_json::to_value(tags).unwrap_or_default()],
        osm_ids: vec![],
    })
}

/// Folds trail segments sharing a (state, name) into one record.
///
/// Long trails come back from Overpass as dozens of way segments; the
/// first keeps the coordinates and collects every segment id in `osm_ids`.
/// Unnamed ("OSM: ...") and non-trail entries pass through untouched.
pub fn dedupe_trails(entries: Vec<Park>) -> Vec<Park> {
    let mut merged: Vec<Park> = Vec::with_capacity(entries.len());
    let mut seen: BTreeMap<(String, String), usize> = BTreeMap::new();

    for mut entry in entries {
        let mergeable = entry.accessible_trails == Some(true)
            && !entry.name.is_empty()
            && !entry.name.starts_with("OSM:");
        if !mergeable {
            merged.push(entry);
            continue;
        }

        let key = (entry.state.clone(), entry.name.clone());
        match seen.get(&key) {
            Some(&index) => {
                let segment_id = entry.id.clone();
                merged[index].osm_ids.push(segment_id);
            }
            None => {
                entry.osm_ids = vec![entry.id.clone()];
                seen.insert(key, merged.len());
                merged.push(entry);
            }
        }
    }

    merged
}

pub struct OverpassClient {
    endpoint: String,
    http: reqwest::Client,
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new(OVERPASS_URL)
    }
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Runs the per-state query and returns the raw elements.
    pub async fn fetch_state(
        &self,
        state_code: &str,
        state_name: &str,
        filters: &OsmFilters,
    ) -> Result<Vec<OverpassElement>> {
        log::info!("fetching data for {state_name} ({state_code})...");
        let query = build_query(state_code, filters);
        let response: OverpassResponse = self
            .http
            .post(&self.endpoint)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| AppError::Upstream(format!("Overpass request for {state_name} failed: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Overpass response for {state_name} unreadable: {e}")))?;

        log::info!("  found {} elements for {state_name}", response.elements.len());
        Ok(response.elements)
    }

    /// Fetches every state in sequence, pausing between requests.
    ///
    /// A failed state costs that state only: the error is logged and the
    /// crawl moves on, so a flaky Overpass timeout still yields a usable
    /// partial dataset. Returns the raw elements and the normalized
    /// entries (not yet trail-deduplicated).
    pub async fn crawl(
        &self,
        states: &[(&str, &str)],
        filters: &OsmFilters,
        pause: Duration,
    ) -> (Vec<OverpassElement>, Vec<Park>) {
        let mut raw = Vec::new();
        let mut normalized = Vec::new();

        for (code, name) in states {
            match self.fetch_state(code, name, filters).await {
                Ok(elements) => {
                    normalized.extend(
                        elements
                            .iter()
                            .filter_map(|el| normalize_element(el, code, filters)),
                    );
                    raw.extend(elements);
                }
                Err(e) => log::error!("{e}"),
            }

            // Be nice to the API.
            tokio::time::sleep(pause).await;
        }

        (raw, normalized)
    }
}
