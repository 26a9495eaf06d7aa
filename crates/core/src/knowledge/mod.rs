//! Read-only knowledge base: diseases, outbreaks, counties and facilities.
//!
//! The default Kenyan catalog is embedded in the binary as YAML and parsed once at startup. A
//! directory holding `diseases.yaml`, `outbreaks.yaml` and `locations.yaml` can replace it (see
//! [`crate::config::resolve_catalog_dir`]). Nothing in the engine mutates the knowledge base
//! after construction.

mod directory;
mod types;

pub use directory::{Capacity, Coordinates, County, CountyCaseTotal, FacilityLevel, HealthFacility};
pub use types::{AlertLevel, DiseaseCategory, DiseaseDefinition, OutbreakRecord, TriageLevel};

use crate::constants::{DISEASES_FILENAME, LOCATIONS_FILENAME, OUTBREAKS_FILENAME};
use crate::{DiagnosisError, DiagnosisResult};
use directory::LocationCatalog;
use std::collections::HashSet;
use std::path::Path;

const EMBEDDED_DISEASES: &str = include_str!("../../catalog/diseases.yaml");
const EMBEDDED_OUTBREAKS: &str = include_str!("../../catalog/outbreaks.yaml");
const EMBEDDED_LOCATIONS: &str = include_str!("../../catalog/locations.yaml");

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    diseases: Vec<DiseaseDefinition>,
    outbreaks: Vec<OutbreakRecord>,
    counties: Vec<County>,
    facilities: Vec<HealthFacility>,
}

impl KnowledgeBase {
    /// Build a knowledge base from already-parsed records.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnosisError::InvalidCatalog`] if a disease has no common symptoms or two
    /// diseases share an id.
    pub fn new(
        diseases: Vec<DiseaseDefinition>,
        outbreaks: Vec<OutbreakRecord>,
        counties: Vec<County>,
        facilities: Vec<HealthFacility>,
    ) -> DiagnosisResult<Self> {
        let mut seen = HashSet::new();
        for disease in &diseases {
            if disease.common_symptoms.is_empty() {
                return Err(DiagnosisError::InvalidCatalog(format!(
                    "disease '{}' has no common symptoms",
                    disease.id
                )));
            }
            if disease.common_symptoms.iter().any(|s| s.trim().is_empty()) {
                return Err(DiagnosisError::InvalidCatalog(format!(
                    "disease '{}' has a blank symptom",
                    disease.id
                )));
            }
            if !seen.insert(disease.id.as_str()) {
                return Err(DiagnosisError::InvalidCatalog(format!(
                    "duplicate disease id '{}'",
                    disease.id
                )));
            }
        }

        Ok(Self {
            diseases,
            outbreaks,
            counties,
            facilities,
        })
    }

    /// Parse a knowledge base from the three catalog documents.
    pub fn from_yaml(diseases: &str, outbreaks: &str, locations: &str) -> DiagnosisResult<Self> {
        let diseases: Vec<DiseaseDefinition> =
            serde_yaml::from_str(diseases).map_err(DiagnosisError::CatalogParse)?;
        let outbreaks: Vec<OutbreakRecord> =
            serde_yaml::from_str(outbreaks).map_err(DiagnosisError::CatalogParse)?;
        let locations: LocationCatalog =
            serde_yaml::from_str(locations).map_err(DiagnosisError::CatalogParse)?;

        Self::new(diseases, outbreaks, locations.counties, locations.facilities)
    }

    /// The catalog compiled into the crate.
    pub fn embedded() -> DiagnosisResult<Self> {
        Self::from_yaml(EMBEDDED_DISEASES, EMBEDDED_OUTBREAKS, EMBEDDED_LOCATIONS)
    }

    /// Load the catalog from a directory on disk.
    pub fn load_dir(dir: &Path) -> DiagnosisResult<Self> {
        let read = |name: &str| {
            std::fs::read_to_string(dir.join(name)).map_err(DiagnosisError::CatalogRead)
        };

        Self::from_yaml(
            &read(DISEASES_FILENAME)?,
            &read(OUTBREAKS_FILENAME)?,
            &read(LOCATIONS_FILENAME)?,
        )
    }

    /// Load from `dir` when given, otherwise use the embedded catalog.
    pub fn load(dir: Option<&Path>) -> DiagnosisResult<Self> {
        let kb = match dir {
            Some(dir) => Self::load_dir(dir)?,
            None => Self::embedded()?,
        };
        let source = dir
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "embedded".into());
        tracing::info!(
            diseases = kb.diseases.len(),
            outbreaks = kb.outbreaks.len(),
            facilities = kb.facilities.len(),
            source = %source,
            "knowledge base loaded"
        );
        Ok(kb)
    }

    /// All diseases in catalog order.
    pub fn diseases(&self) -> &[DiseaseDefinition] {
        &self.diseases
    }

    pub fn disease_by_id(&self, id: &str) -> Option<&DiseaseDefinition> {
        self.diseases.iter().find(|d| d.id == id)
    }

    /// Outbreak records, optionally filtered to an exact location.
    pub fn outbreaks(&self, location: Option<&str>) -> Vec<&OutbreakRecord> {
        self.outbreaks
            .iter()
            .filter(|o| location.map_or(true, |loc| o.location == loc))
            .collect()
    }

    /// First outbreak at `location` concerning `disease`, if any.
    pub fn outbreak_for(
        &self,
        disease: &DiseaseDefinition,
        location: &str,
    ) -> Option<&OutbreakRecord> {
        self.outbreaks
            .iter()
            .find(|o| o.concerns(&disease.name, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_DISEASE: &str = r#"
- id: flu
  name: Influenza
  category: Respiratory
  commonSymptoms: [fever, cough]
  triageLevel: low
"#;

    #[test]
    fn embedded_catalog_loads() {
        let kb = KnowledgeBase::embedded().unwrap();
        let ids: Vec<_> = kb.diseases().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "malaria",
                "pneumonia",
                "typhoid",
                "cholera",
                "tuberculosis",
                "acute_diarrhea",
                "malnutrition"
            ]
        );
        assert_eq!(kb.outbreaks(None).len(), 2);
        assert_eq!(kb.counties().len(), 10);
        assert_eq!(kb.facilities().len(), 13);
    }

    #[test]
    fn catalog_fields_parse_into_typed_values() {
        let kb = KnowledgeBase::embedded().unwrap();
        let cholera = kb.disease_by_id("cholera").unwrap();
        assert_eq!(cholera.triage_level, TriageLevel::Emergency);
        assert_eq!(cholera.category, DiseaseCategory::Infectious);

        let malaria = kb.disease_by_id("malaria").unwrap();
        assert!(malaria.has_rainy_season());
        assert!(malaria.is_prevalent_in("Kilifi"));
        assert!(!malaria.is_prevalent_in("kilifi"));

        let outbreak = kb.outbreaks(Some("Tana River"))[0];
        assert_eq!(outbreak.alert_level, AlertLevel::Warning);
        assert_eq!(
            outbreak.start_date,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
    }

    #[test]
    fn outbreak_lookup_is_case_insensitive_on_disease_only() {
        let kb = KnowledgeBase::embedded().unwrap();
        let diarrhea = kb.disease_by_id("acute_diarrhea").unwrap();
        assert_eq!(kb.outbreak_for(diarrhea, "Turkana").unwrap().cases, 23);
        assert!(kb.outbreak_for(diarrhea, "turkana").is_none());

        let pneumonia = kb.disease_by_id("pneumonia").unwrap();
        assert!(kb.outbreak_for(pneumonia, "Turkana").is_none());
    }

    #[test]
    fn rejects_disease_without_symptoms() {
        let yaml = r#"
- id: empty
  name: Nothing
  category: Chronic
  commonSymptoms: []
  triageLevel: low
"#;
        let err = KnowledgeBase::from_yaml(yaml, "[]", "{}").unwrap_err();
        assert!(matches!(err, DiagnosisError::InvalidCatalog(msg) if msg.contains("empty")));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let yaml = format!("{}{}", MINIMAL_DISEASE, MINIMAL_DISEASE);
        let err = KnowledgeBase::from_yaml(&yaml, "[]", "{}").unwrap_err();
        assert!(err.to_string().contains("duplicate disease id 'flu'"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = KnowledgeBase::from_yaml("- id: [", "[]", "{}").unwrap_err();
        assert!(matches!(err, DiagnosisError::CatalogParse(_)));
    }

    #[test]
    fn load_dir_reads_override_catalog() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DISEASES_FILENAME), MINIMAL_DISEASE).unwrap();
        std::fs::write(dir.path().join(OUTBREAKS_FILENAME), "[]").unwrap();
        std::fs::write(dir.path().join(LOCATIONS_FILENAME), "counties: []\n").unwrap();

        let kb = KnowledgeBase::load(Some(dir.path())).unwrap();
        assert_eq!(kb.diseases().len(), 1);
        assert_eq!(kb.diseases()[0].name, "Influenza");
        assert!(kb.facilities().is_empty());
    }

    #[test]
    fn load_dir_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = KnowledgeBase::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, DiagnosisError::CatalogRead(_)));
    }
}
