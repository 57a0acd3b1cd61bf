//! # Domain Models
//!
//! These structs represent the park records served by the Trailhead site
//! and maintained by the data pipeline. Records are keyed by upstream
//! string ids (NPS park codes, synthetic OSM ids) rather than anything
//! we mint ourselves.

use serde::{Deserialize, Serialize};

/// Where a park record (or part of it) came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Official agency data (National Park Service API).
    Nps,
    /// Manually curated entry.
    Manual,
    /// Community map data (OpenStreetMap / Overpass).
    Osm,
}

/// Manual review state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Verified,
    NeedsReview,
    /// Community-sourced entries carry tag-derived flags only.
    Partial,
}

/// Pipeline bookkeeping: how complete the accessibility data is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataStatus {
    Complete,
    Enriched,
    Unknown,
}

/// Outbound monetized links attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateLinks {
    pub gear: Option<String>,
    pub lodging: Option<String>,
}

impl AffiliateLinks {
    pub fn is_empty(&self) -> bool {
        self.gear.is_none() && self.lodging.is_none()
    }
}

/// A named link to accessibility information for one facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityPlace {
    pub name: String,
    pub url: String,
}

/// Reviewer-collected links grouped by facility category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessibilityDetails {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trails: Vec<AccessibilityPlace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parking: Vec<AccessibilityPlace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub camping: Vec<AccessibilityPlace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lodging: Vec<AccessibilityPlace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrooms: Vec<AccessibilityPlace>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub general: Vec<AccessibilityPlace>,
}

/// A single park/trail record as stored in `parks.json`.
///
/// Accessibility flags are tri-state: `Some(true)` confirmed accessible,
/// `Some(false)` confirmed not, `None` unknown. The `source` field appears
/// in the dataset both as a bare string and as a list; `serde_util::source_list`
/// accepts either and collapses singletons back to a string on output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Park {
    pub id: String,
    pub name: String,
    /// State code, possibly comma-separated for multi-state parks ("CA,NV").
    pub state: String,
    pub lat: f64,
    pub lon: f64,
    pub accessible_restrooms: Option<bool>,
    pub accessible_parking: Option<bool>,
    pub accessible_trails: Option<bool>,
    #[serde(rename = "source", with = "crate::serde_util::source_list")]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "AffiliateLinks::is_empty")]
    pub affiliate_links: AffiliateLinks,
    pub status: ReviewStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_details: Option<AccessibilityDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_status: Option<DataStatus>,
    /// Raw OSM tag objects merged into this record, one per matched element.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub osm_tags: Vec<serde_json::Value>,
    /// Ids of OSM trail segments folded into this record by deduplication.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub osm_ids: Vec<String>,
}

impl Park {
    pub fn has_source(&self, source: Source) -> bool {
        self.sources.contains(&source)
    }

    /// True when the record came from the community map and nowhere else.
    pub fn is_osm_only(&self) -> bool {
        self.sources == [Source::Osm]
    }
}
