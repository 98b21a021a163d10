use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};

/// Value carried by the "All Sites" selector entry.
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site filter
// ---------------------------------------------------------------------------

/// Either every launch site or one named site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteFilter {
    #[default]
    All,
    Site(String),
}

impl SiteFilter {
    /// Parse a selector value. `"ALL"` is the sentinel; anything else is taken
    /// as a literal site name, whether or not it exists in the table.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES {
            SiteFilter::All
        } else {
            SiteFilter::Site(value.to_string())
        }
    }

    /// The selector value for this filter.
    pub fn value(&self) -> &str {
        match self {
            SiteFilter::All => ALL_SITES,
            SiteFilter::Site(name) => name.as_str(),
        }
    }

    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteFilter::All => true,
            SiteFilter::Site(name) => name == site,
        }
    }
}

impl fmt::Display for SiteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload mass interval in kilograms, with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Build a range from two handle positions, swapping them if reversed.
    pub fn new(a: f64, b: f64) -> Self {
        if b < a {
            PayloadRange { low: b, high: a }
        } else {
            PayloadRange { low: a, high: b }
        }
    }

    /// Build a range and clamp both ends into `bounds` (`(min, max)`).
    pub fn clamped(a: f64, b: f64, bounds: (f64, f64)) -> Self {
        let (min, max) = bounds;
        let range = PayloadRange::new(a, b);
        PayloadRange {
            low: range.low.max(min).min(max),
            high: range.high.max(min).min(max),
        }
    }

    /// The dataset's own bounds; includes every launch.
    pub fn full(dataset: &LaunchDataset) -> Self {
        let (min, max) = dataset.payload_bounds();
        PayloadRange { low: min, high: max }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Launches from the selected site(s).
pub fn launches_at<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteFilter,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    dataset
        .records()
        .iter()
        .filter(move |rec| site.matches(&rec.launch_site))
}

/// Launches within `range` and from the selected site(s).
pub fn launches_in_range<'a>(
    dataset: &'a LaunchDataset,
    site: &'a SiteFilter,
    range: PayloadRange,
) -> impl Iterator<Item = &'a LaunchRecord> + 'a {
    launches_at(dataset, site).filter(move |rec| range.contains(rec.payload_mass_kg))
}
