//! County and health-facility directory, plus outbreak monitor aggregates.

use super::{KnowledgeBase, OutbreakRecord};
use crate::analysis::ReferralUrgency;
use crate::constants::EMERGENCY_SERVICE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct County {
    pub id: String,
    pub name: String,
    pub sub_counties: Vec<String>,
    pub coordinates: Coordinates,
    pub population: u64,
    pub main_languages: Vec<String>,
}

/// Kenyan health facility tier. Higher levels offer more specialised care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum FacilityLevel {
    #[serde(rename = "Level 1")]
    Level1,
    #[serde(rename = "Level 2")]
    Level2,
    #[serde(rename = "Level 3")]
    Level3,
    #[serde(rename = "Level 4")]
    Level4,
    #[serde(rename = "Level 5")]
    Level5,
    #[serde(rename = "Level 6")]
    Level6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Capacity {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthFacility {
    pub id: String,
    pub name: String,
    pub level: FacilityLevel,
    pub county: String,
    pub sub_county: String,
    pub services: Vec<String>,
    pub specialties: Vec<String>,
    pub phone: String,
    pub coordinates: Coordinates,
    pub capacity: Capacity,
    pub wait_time: String,
}

impl HealthFacility {
    pub fn offers(&self, service: &str) -> bool {
        self.services.iter().any(|s| s == service)
    }

    /// Case-insensitive containment over name, county, sub-county, services and specialties.
    fn matches_query(&self, query_lower: &str) -> bool {
        let hit = |field: &str| field.to_lowercase().contains(query_lower);
        hit(&self.name)
            || hit(&self.county)
            || hit(&self.sub_county)
            || self.services.iter().any(|s| hit(s))
            || self.specialties.iter().any(|s| hit(s))
    }
}

/// Root of `locations.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LocationCatalog {
    #[serde(default)]
    pub counties: Vec<County>,
    #[serde(default)]
    pub facilities: Vec<HealthFacility>,
}

/// Outbreak totals for one county.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CountyCaseTotal {
    pub county: String,
    pub outbreaks: usize,
    pub total_cases: u32,
}

impl KnowledgeBase {
    pub fn counties(&self) -> &[County] {
        &self.counties
    }

    pub fn facilities(&self) -> &[HealthFacility] {
        &self.facilities
    }

    pub fn county_by_id(&self, id: &str) -> Option<&County> {
        self.counties.iter().find(|c| c.id == id)
    }

    pub fn facilities_by_county(&self, county: &str) -> Vec<&HealthFacility> {
        self.facilities.iter().filter(|f| f.county == county).collect()
    }

    pub fn facilities_by_sub_county(&self, sub_county: &str) -> Vec<&HealthFacility> {
        self.facilities
            .iter()
            .filter(|f| f.sub_county == sub_county)
            .collect()
    }

    /// Free-text facility search. A blank query returns every facility.
    pub fn search_facilities(&self, query: &str) -> Vec<&HealthFacility> {
        let query = query.trim().to_lowercase();
        self.facilities
            .iter()
            .filter(|f| query.is_empty() || f.matches_query(&query))
            .collect()
    }

    /// Facilities in `county` suitable for a referral of the given urgency.
    ///
    /// Immediate referrals only go to facilities with an emergency service. Results are ordered
    /// by facility level, highest first; equal levels keep catalog order.
    pub fn referral_facilities(
        &self,
        county: &str,
        urgency: ReferralUrgency,
    ) -> Vec<&HealthFacility> {
        let mut candidates: Vec<&HealthFacility> = self
            .facilities_by_county(county)
            .into_iter()
            .filter(|f| urgency != ReferralUrgency::Immediate || f.offers(EMERGENCY_SERVICE))
            .collect();
        candidates.sort_by(|a, b| b.level.cmp(&a.level));
        candidates
    }

    /// Warning and emergency outbreaks, optionally restricted to one location.
    pub fn active_alerts(&self, location: Option<&str>) -> Vec<&OutbreakRecord> {
        self.outbreaks(location)
            .into_iter()
            .filter(|o| o.is_alerting())
            .collect()
    }

    /// Outbreak count and total cases per county, in catalog order.
    pub fn county_case_totals(&self) -> Vec<CountyCaseTotal> {
        self.counties
            .iter()
            .map(|county| {
                let local = self.outbreaks(Some(&county.name));
                CountyCaseTotal {
                    county: county.name.clone(),
                    outbreaks: local.len(),
                    total_cases: local.iter().map(|o| o.cases).sum(),
                }
            })
            .collect()
    }
}
