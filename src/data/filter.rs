use std::fmt;

use super::model::{Record, Table};

/// Selector value meaning "do not filter on this dimension".
pub const WILDCARD: &str = "total";

// ---------------------------------------------------------------------------
// Categorical selector: one value or the wildcard
// ---------------------------------------------------------------------------

/// Selection for a categorical column (region or smoker).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Every value passes.
    Total,
    /// Only this exact value passes.
    Only(String),
}

impl Selector {
    /// `"total"` becomes the wildcard, anything else an exact match.
    pub fn parse(value: &str) -> Self {
        if value == WILDCARD {
            Selector::Total
        } else {
            Selector::Only(value.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selector::Total => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Total => f.write_str(WILDCARD),
            Selector::Only(v) => f.write_str(v),
        }
    }
}

// ---------------------------------------------------------------------------
// Filter criteria: the widget values every chart is derived from
// ---------------------------------------------------------------------------

/// Chart pane dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub region: Selector,
    pub smoker: Selector,
    /// Inclusive lower bound.
    pub age_min: u32,
    /// Inclusive upper bound.
    pub age_max: u32,
    pub plot_size: Option<PlotSize>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            region: Selector::Only("southeast".to_string()),
            smoker: Selector::Total,
            age_min: 20,
            age_max: 50,
            plot_size: None,
        }
    }
}

impl FilterCriteria {
    /// Same criteria with the region filter dropped.  Bar and pie charts
    /// compare regions, so they must see all of them.
    pub fn across_regions(&self) -> Self {
        Self {
            region: Selector::Total,
            ..self.clone()
        }
    }

    pub fn accepts(&self, record: &Record) -> bool {
        (self.age_min..=self.age_max).contains(&record.age)
            && self.region.matches(&record.region)
            && self.smoker.matches(&record.smoker)
    }
}

/// Keep the rows that satisfy the region, smoker and age predicates at once.
pub fn filter_records(
    table: &Table,
    region: &Selector,
    smoker: &Selector,
    age_min: u32,
    age_max: u32,
) -> Table {
    let criteria = FilterCriteria {
        region: region.clone(),
        smoker: smoker.clone(),
        age_min,
        age_max,
        plot_size: None,
    };
    apply(table, &criteria)
}

/// [`filter_records`] driven by a whole [`FilterCriteria`].
pub fn apply(table: &Table, criteria: &FilterCriteria) -> Table {
    table
        .iter()
        .filter(|record| criteria.accepts(record))
        .cloned()
        .collect()
}
