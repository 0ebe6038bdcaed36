use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::UnmappedCategoryError;

/// Columns every input file must carry (in any order).
pub const REQUIRED_COLUMNS: [&str; 7] =
    ["age", "sex", "bmi", "children", "smoker", "region", "charges"];

// ---------------------------------------------------------------------------
// SmokerStatus – the two-valued smoker domain
// ---------------------------------------------------------------------------

/// Smoker column values, accepting both the raw (`yes`/`no`) and the
/// relabeled (`smoker`/`nonsmoker`) spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SmokerStatus {
    Smoker,
    NonSmoker,
}

impl SmokerStatus {
    pub fn parse(value: &str) -> Result<Self, UnmappedCategoryError> {
        match value {
            "yes" | "smoker" => Ok(SmokerStatus::Smoker),
            "no" | "nonsmoker" => Ok(SmokerStatus::NonSmoker),
            other => Err(UnmappedCategoryError(other.to_string())),
        }
    }

    /// Relabeled spelling.
    pub fn label(self) -> &'static str {
        match self {
            SmokerStatus::Smoker => "smoker",
            SmokerStatus::NonSmoker => "nonsmoker",
        }
    }
}

impl fmt::Display for SmokerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the insurance CSV
// ---------------------------------------------------------------------------

/// A single insured person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub age: u32,
    pub sex: String,
    pub bmi: f64,
    pub children: u32,
    /// Kept as text so unexpected categories survive loading and relabeling.
    pub smoker: String,
    pub region: String,
    pub charges: f64,
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Ordered collection of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    pub fn from_records(records: Vec<Record>) -> Self {
        Table { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Replace `yes`/`no` in the smoker column with `smoker`/`nonsmoker`.
    ///
    /// Any other value is left untouched, so applying this twice is the same
    /// as applying it once. Returns the number of cells that changed.
    pub fn relabel_smoker(&mut self) -> usize {
        let mut changed = 0;
        for record in &mut self.records {
            let relabeled = match record.smoker.as_str() {
                "yes" => "smoker",
                "no" => "nonsmoker",
                _ => continue,
            };
            record.smoker = relabeled.to_string();
            changed += 1;
        }
        changed
    }

    /// Sorted distinct regions.
    pub fn regions(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.region.clone()).collect()
    }

    /// Sorted distinct smoker column values.
    pub fn smoker_values(&self) -> BTreeSet<String> {
        self.records.iter().map(|r| r.smoker.clone()).collect()
    }

    /// Distinct smoker values with no colour mapping.
    pub fn unmapped_smoker_values(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .filter(|r| SmokerStatus::parse(&r.smoker).is_err())
            .map(|r| r.smoker.clone())
            .collect()
    }

    /// Smallest and largest age, or `None` for an empty table.
    pub fn age_bounds(&self) -> Option<(u32, u32)> {
        let min = self.records.iter().map(|r| r.age).min()?;
        let max = self.records.iter().map(|r| r.age).max()?;
        Some((min, max))
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Table::from_records(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) fn record(age: u32, region: &str, smoker: &str, bmi: f64, charges: f64) -> Record {
    Record {
        age,
        sex: "female".to_string(),
        bmi,
        children: 0,
        smoker: smoker.to_string(),
        region: region.to_string(),
        charges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relabel_smoker_leaves_no_raw_values() {
        let mut table = Table::from_records(vec![
            record(25, "southeast", "yes", 22.0, 1000.0),
            record(60, "northwest", "no", 30.0, 5000.0),
            record(41, "northeast", "no", 27.5, 2500.0),
        ]);

        assert_eq!(table.relabel_smoker(), 3);

        let values = table.smoker_values();
        assert!(!values.contains("yes"));
        assert!(!values.contains("no"));
        assert_eq!(
            values.into_iter().collect::<Vec<_>>(),
            vec!["nonsmoker".to_string(), "smoker".to_string()]
        );
    }

    #[test]
    fn test_relabel_smoker_is_idempotent() {
        let mut once = Table::from_records(vec![
            record(25, "southeast", "yes", 22.0, 1000.0),
            record(60, "northwest", "no", 30.0, 5000.0),
        ]);
        once.relabel_smoker();

        let mut twice = once.clone();
        assert_eq!(twice.relabel_smoker(), 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_relabel_smoker_passes_unknown_values_through() {
        let mut table = Table::from_records(vec![record(30, "southwest", "sometimes", 25.0, 10.0)]);
        assert_eq!(table.relabel_smoker(), 0);
        assert_eq!(table.records[0].smoker, "sometimes");
    }

    #[test]
    fn test_smoker_status_accepts_both_spellings() {
        assert_eq!(SmokerStatus::parse("yes"), Ok(SmokerStatus::Smoker));
        assert_eq!(SmokerStatus::parse("smoker"), Ok(SmokerStatus::Smoker));
        assert_eq!(SmokerStatus::parse("no"), Ok(SmokerStatus::NonSmoker));
        assert_eq!(SmokerStatus::parse("nonsmoker"), Ok(SmokerStatus::NonSmoker));
        assert_eq!(
            SmokerStatus::parse("Yes"),
            Err(UnmappedCategoryError("Yes".to_string()))
        );
    }

    #[test]
    fn test_unmapped_smoker_values_are_distinct() {
        let table = Table::from_records(vec![
            record(30, "southwest", "sometimes", 25.0, 10.0),
            record(31, "southwest", "yes", 25.0, 10.0),
            record(32, "southwest", "sometimes", 25.0, 10.0),
            record(33, "southwest", "smoker", 25.0, 10.0),
            record(34, "southwest", "", 25.0, 10.0),
        ]);
        let unmapped: Vec<String> = table.unmapped_smoker_values().into_iter().collect();
        assert_eq!(unmapped, vec!["".to_string(), "sometimes".to_string()]);
    }

    #[test]
    fn test_age_bounds() {
        assert_eq!(Table::default().age_bounds(), None);
        let table = Table::from_records(vec![
            record(64, "southeast", "yes", 22.0, 1.0),
            record(18, "southeast", "no", 22.0, 1.0),
            record(33, "northwest", "no", 22.0, 1.0),
        ]);
        assert_eq!(table.age_bounds(), Some((18, 64)));
        assert_eq!(table.regions().len(), 2);
    }
}
