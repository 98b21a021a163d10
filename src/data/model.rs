use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::error::DataError;

// ---------------------------------------------------------------------------
// Column names as they appear in the source table
// ---------------------------------------------------------------------------

pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_LAUNCH_SITE: &str = "Launch Site";
pub const COL_PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";

/// Columns that every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    COL_LAUNCH_SITE,
    COL_PAYLOAD_MASS,
    COL_CLASS,
    COL_BOOSTER_CATEGORY,
];

// ---------------------------------------------------------------------------
// OutcomeClass – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Ordered so that failure (0) sorts before success (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum OutcomeClass {
    Failure,
    Success,
}

impl OutcomeClass {
    /// Interpret a raw `class` cell. Only 0 and 1 are accepted.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(OutcomeClass::Failure),
            1 => Some(OutcomeClass::Success),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            OutcomeClass::Failure => 0,
            OutcomeClass::Success => 1,
        }
    }
}

impl From<OutcomeClass> for u8 {
    fn from(class: OutcomeClass) -> Self {
        class.code()
    }
}

impl fmt::Display for OutcomeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    /// Optional `Flight Number` column.
    pub flight_number: Option<i64>,
    pub launch_site: String,
    /// Payload mass in kilograms; always finite.
    pub payload_mass_kg: f64,
    pub class: OutcomeClass,
    /// Optional `Booster Version` column (e.g. `F9 v1.1 B1003`).
    pub booster_version: Option<String>,
    pub booster_version_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded launch table together with the aggregates the controls need.
///
/// Built once and never mutated afterwards; all fields are private so the
/// derived site set and payload bounds cannot drift from the records.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    site_names: BTreeSet<String>,
    booster_categories: BTreeSet<String>,
    payload_min: f64,
    payload_max: f64,
}

impl LaunchDataset {
    /// Build the column aggregates from parsed records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }

        let mut site_names = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;

        for (row, rec) in records.iter().enumerate() {
            if !rec.payload_mass_kg.is_finite() {
                return Err(DataError::InvalidValue {
                    row,
                    column: COL_PAYLOAD_MASS,
                    value: rec.payload_mass_kg.to_string(),
                });
            }
            site_names.insert(rec.launch_site.clone());
            booster_categories.insert(rec.booster_version_category.clone());
            payload_min = payload_min.min(rec.payload_mass_kg);
            payload_max = payload_max.max(rec.payload_mass_kg);
        }

        Ok(LaunchDataset {
            records,
            site_names,
            booster_categories,
            payload_min,
            payload_max,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    /// Distinct launch sites, sorted.
    pub fn site_names(&self) -> &BTreeSet<String> {
        &self.site_names
    }

    /// Distinct booster version categories, sorted.
    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// `(min, max)` of the payload mass column.
    pub fn payload_bounds(&self) -> (f64, f64) {
        (self.payload_min, self.payload_max)
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty. Always false for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn aggregates_are_derived_from_records() {
        let ds = three_launches();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.payload_bounds(), (500.0, 2000.0));
        let sites: Vec<&str> = ds.site_names().iter().map(String::as_str).collect();
        assert_eq!(sites, ["SiteA", "SiteB"]);
        let cats: Vec<&str> = ds.booster_categories().iter().map(String::as_str).collect();
        assert_eq!(cats, ["FT", "v1.0"]);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(LaunchDataset::from_records(Vec::new()).unwrap_err(), DataError::Empty);
    }

    #[test]
    fn non_finite_payload_is_rejected() {
        let err = LaunchDataset::from_records(vec![
            record("SiteA", 10.0, OutcomeClass::Success, "FT"),
            record("SiteA", f64::NAN, OutcomeClass::Success, "FT"),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::InvalidValue { row: 1, column: COL_PAYLOAD_MASS, .. }));
    }

    #[test]
    fn outcome_class_codes() {
        assert_eq!(OutcomeClass::from_code(0), Some(OutcomeClass::Failure));
        assert_eq!(OutcomeClass::from_code(1), Some(OutcomeClass::Success));
        assert_eq!(OutcomeClass::from_code(2), None);
        assert_eq!(OutcomeClass::Success.to_string(), "1");
        assert!(OutcomeClass::Failure < OutcomeClass::Success);
        assert_eq!(serde_json::to_string(&OutcomeClass::Success).unwrap(), "1");
    }
}
