//! # th-source-nps
//!
//! Client for the National Park Service API.
//!
//! Pages through `/api/v1/parks`, keeps the "National Park" designations,
//! and normalizes the records into `Park` values with unknown accessibility
//! flags and `needs_review` status. Hand-maintained corrections from
//! `manual_overrides.json` are applied on top by id.

use serde::Deserialize;
use th_core::error::{AppError, Result};
use th_core::models::{Park, ReviewStatus, Source};

pub const NPS_API_URL: &str = "https://developer.nps.gov/api/v1/parks";

const PAGE_SIZE: usize = 50;

/// One park record as returned by the NPS API. Everything is a string on
/// the wire, including coordinates and the record count.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsParkRecord {
    #[serde(default)]
    pub park_code: String,
    #[serde(default)]
    pub full_name: String,
    /// Comma-separated state codes ("CA,NV").
    #[serde(default)]
    pub states: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    #[serde(default)]
    pub designation: String,
}

#[derive(Debug, Deserialize)]
struct NpsPage {
    #[serde(default)]
    total: String,
    #[serde(default)]
    data: Vec<NpsParkRecord>,
}

/// Designation filter: the site only lists full National Parks for now.
pub fn is_national_park(designation: &str) -> bool {
    designation.contains("National Park")
}

/// Maps an upstream record to the site schema.
///
/// The standard endpoint has no structured accessibility data, so the
/// flags start unknown and the record is queued for manual review.
/// Unparseable coordinates fall back to 0.0 rather than dropping the park.
pub fn normalize(record: &NpsParkRecord) -> Park {
    Park {
        id: record.park_code.clone(),
        name: record.full_name.clone(),
        state: record.states.clone(),
        lat: record.latitude.parse().unwrap_or(0.0),
        lon: record.longitude.parse().unwrap_or(0.0),
        accessible_restrooms: None,
        accessible_parking: None,
        accessible_trails: None,
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

pub struct NpsClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl NpsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: NPS_API_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Reads `NPS_API_KEY` from the environment (populated via dotenv).
    pub fn from_env() -> Result<Self> {
        match std::env::var("NPS_API_KEY") {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(AppError::Config("NPS_API_KEY not set".into())),
        }
    }

    /// Overrides the endpoint, for tests or a caching proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches every "National Park" record, already normalized.
    pub async fn fetch_national_parks(&self) -> Result<Vec<Park>> {
        let mut parks = Vec::new();
        let mut start = 0usize;

        log::info!("fetching data from NPS API...");
        loop {
            let limit = PAGE_SIZE.to_string();
            let offset = start.to_string();
            let page: NpsPage = self
                .http
                .get(&self.base_url)
                .query(&[
                    ("api_key", self.api_key.as_str()),
                    ("limit", limit.as_str()),
                    ("start", offset.as_str()),
                ])
                .send()
                .await
                .and_then(|resp| resp.error_for_status())
                .map_err(|e| AppError::Upstream(format!("NPS request failed: {e}")))?
                .json()
                .await
                .map_err(|e| AppError::Upstream(format!("NPS response unreadable: {e}")))?;

            if page.data.is_empty() {
                break;
            }

            parks.extend(
                page.data
                    .iter()
                    .filter(|record| is_national_park(&record.designation))
                    .map(normalize),
            );

            let total: usize = page.total.parse().unwrap_or(0);
            start += PAGE_SIZE;
            if start >= total {
                break;
            }
        }

        Ok(parks)
    }
}

/// Applies hand-maintained corrections on top of fetched records.
///
/// Overrides are raw JSON objects keyed by `id`; matching parks get the
/// override's fields spliced over their own, same as a dict update.
pub fn apply_overrides(
    parks: Vec<Park>,
    overrides: &[serde_json::Value],
) -> Result<Vec<Park>> {
    use serde_json::Value;

    let by_id: std::collections::HashMap<&str, &serde_json::Map<String, Value>> = overrides
        .iter()
        .filter_map(|v| v.as_object())
        .filter_map(|obj| obj.get("id").and_then(Value::as_str).map(|id| (id, obj)))
        .collect();

    if by_id.is_empty() {
        return Ok(parks);
    }

    parks
        .into_iter()
        .map(|park| {
            let Some(patch) = by_id.get(park.id.as_str()) else {
                return Ok(park);
            };
            let mut value = serde_json::to_value(&park)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            let Some(fields) = value.as_object_mut() else {
                return Ok(park);
            };
            for (key, val) in patch.iter() {
                fields.insert(key.clone(), val.clone());
            }
            log::info!("applied override for {}", park.id);
            serde_json::from_value(value).map_err(|e| {
                AppError::MalformedData(format!("override for {}", park.id), e.to_string())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(code: &str, designation: &str, lat: &str, lon: &str) -> NpsParkRecord {
        NpsParkRecord {
            park_code: code.into(),
            full_name: format!("{code} full name"),
            states: "MT,WY".into(),
            latitude: lat.into(),
            longitude: lon.into(),
            designation: designation.into(),
        }
    }

    #[test]
    fn designation_filter_matches_park_and_preserve_variants() {
        assert!(is_national_park("National Park"));
        assert!(is_national_park("National Park & Preserve"));
        assert!(!is_national_park("National Monument"));
        assert!(!is_national_park(""));
    }

    #[test]
    fn normalize_parses_coordinates_and_defaults_flags() {
        let park = normalize(&record("yell", "National Park", "44.59824417", "-110.5471695"));
        assert_eq!(park.id, "yell");
        assert!((park.lat - 44.59824417).abs() < 1e-9);
        assert_eq!(park.accessible_trails, None);
        assert_eq!(park.status, ReviewStatus::NeedsReview);
        assert_eq!(park.sources, vec![Source::Nps]);
    }

    #[test]
    fn normalize_falls_back_to_zero_on_bad_coordinates() {
        let park = normalize(&record("badc", "National Park", "", "not-a-number"));
        assert_eq!(park.lat, 0.0);
        assert_eq!(park.lon, 0.0);
    }

    #[test]
    fn overrides_splice_fields_by_id() {
        let parks = vec![
            normalize(&record("yell", "National Park", "44.5", "-110.5")),
            normalize(&record("glac", "National Park", "48.7", "-113.8")),
        ];
        let overrides = vec![json!({
            "id": "yell",
            "accessible_restrooms": true,
            "status": "verified",
            "reviewer_notes": "verified on site"
        })];

        let parks = apply_overrides(parks, &overrides).unwrap();
        assert_eq!(parks[0].accessible_restrooms, Some(true));
        assert_eq!(parks[0].status, ReviewStatus::Verified);
        assert_eq!(parks[0].reviewer_notes.as_deref(), Some("verified on site"));
        // Untouched park stays as fetched.
        assert_eq!(parks[1].status, ReviewStatus::NeedsReview);
    }

    #[test]
    fn override_without_matching_id_is_ignored() {
        let parks = vec![normalize(&record("yell", "National Park", "44.5", "-110.5"))];
        let overrides = vec![json!({ "id": "nope", "status": "verified" })];
        let parks = apply_overrides(parks, &overrides).unwrap();
        assert_eq!(parks[0].status, ReviewStatus::NeedsReview);
    }
}
