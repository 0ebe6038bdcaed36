use std::collections::BTreeMap;
use std::f64::consts::TAU;

use eframe::egui::Color32;

use crate::color;
use crate::error::EmptyResultError;

use super::model::{SmokerStatus, Table};

// ---------------------------------------------------------------------------
// Scatter: BMI vs. charges, coloured by smoker status
// ---------------------------------------------------------------------------

/// Colour category of one scatter point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointCategory {
    Known(SmokerStatus),
    /// Smoker value outside the two-valued domain (kept for the legend).
    Unmapped(String),
}

impl PointCategory {
    pub fn of(smoker: &str) -> Self {
        match SmokerStatus::parse(smoker) {
            Ok(status) => PointCategory::Known(status),
            Err(err) => PointCategory::Unmapped(err.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub bmi: f64,
    pub charges: f64,
    pub category: PointCategory,
    pub color: Color32,
}

/// One point per row, in table order.
pub fn scatter_points(table: &Table) -> Vec<ScatterPoint> {
    table
        .iter()
        .map(|r| {
            let category = PointCategory::of(&r.smoker);
            ScatterPoint {
                bmi: r.bmi,
                charges: r.charges,
                color: color::point_color(&category),
                category,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Per-region aggregates (bar and pie)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RegionAverage {
    pub region: String,
    pub mean_charges: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionShare {
    pub region: String,
    pub total_charges: f64,
    /// Wedge angle in radians; all wedges add up to a full turn.
    pub angle: f64,
}

impl RegionShare {
    /// Share of the grand total in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        self.angle / TAU
    }
}

/// Sum and count of charges per region, sorted by region name.
fn charges_by_region(table: &Table) -> BTreeMap<&str, (f64, usize)> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in table {
        let entry = groups.entry(r.region.as_str()).or_default();
        entry.0 += r.charges;
        entry.1 += 1;
    }
    groups
}

/// Mean charges per region.  Regions without rows are absent, and an
/// empty table yields an empty list.
pub fn average_charges_by_region(table: &Table) -> Vec<RegionAverage> {
    charges_by_region(table)
        .into_iter()
        .map(|(region, (sum, count))| RegionAverage {
            region: region.to_string(),
            mean_charges: sum / count as f64,
            count,
        })
        .collect()
}

/// Total charges per region with each region's wedge angle.
///
/// Fails when there is nothing to divide into wedges: no rows, a zero grand
/// total, or a region whose total is negative or not finite.
pub fn total_charges_by_region(table: &Table) -> Result<Vec<RegionShare>, EmptyResultError> {
    let groups = charges_by_region(table);
    let grand_total: f64 = groups.values().map(|(sum, _)| sum).sum();
    // Every wedge must lie in 0..=TAU.
    let drawable = groups.values().all(|(sum, _)| sum.is_finite() && *sum >= 0.0);
    if groups.is_empty() || !drawable || !grand_total.is_finite() || grand_total <= 0.0 {
        return Err(EmptyResultError);
    }

    Ok(groups
        .into_iter()
        .map(|(region, (sum, _))| RegionShare {
            region: region.to_string(),
            total_charges: sum,
            angle: sum / grand_total * TAU,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    #[test]
    fn test_average_charges_by_region() {
        let table = Table::from_records(vec![
            record(30, "southeast", "no", 20.0, 100.0),
            record(40, "southeast", "yes", 25.0, 300.0),
            record(50, "northeast", "no", 30.0, 50.0),
        ]);
        let averages = average_charges_by_region(&table);
        assert_eq!(
            averages,
            vec![
                RegionAverage { region: "northeast".into(), mean_charges: 50.0, count: 1 },
                RegionAverage { region: "southeast".into(), mean_charges: 200.0, count: 2 },
            ]
        );
    }

    #[test]
    fn test_empty_table_aggregates() {
        let empty = Table::default();
        assert!(average_charges_by_region(&empty).is_empty());
        assert_eq!(total_charges_by_region(&empty), Err(EmptyResultError));
    }

    #[test]
    fn test_zero_charges_cannot_form_a_pie() {
        let table = Table::from_records(vec![record(30, "southeast", "no", 20.0, 0.0)]);
        assert_eq!(total_charges_by_region(&table), Err(EmptyResultError));
    }

    #[test]
    fn test_negative_region_total_cannot_form_a_pie() {
        let table = Table::from_records(vec![
            record(30, "southeast", "no", 20.0, 1000.0),
            record(40, "northwest", "no", 25.0, -999.0),
        ]);
        assert_eq!(total_charges_by_region(&table), Err(EmptyResultError));
    }

    #[test]
    fn test_non_finite_charges_cannot_form_a_pie() {
        let table = Table::from_records(vec![
            record(30, "southeast", "no", 20.0, 100.0),
            record(40, "northwest", "no", 25.0, f64::NAN),
        ]);
        assert_eq!(total_charges_by_region(&table), Err(EmptyResultError));

        let table = Table::from_records(vec![record(40, "northwest", "no", 25.0, f64::INFINITY)]);
        assert_eq!(total_charges_by_region(&table), Err(EmptyResultError));
    }

    #[test]
    fn test_angles_sum_to_full_turn() {
        let table = Table::from_records(vec![
            record(30, "southeast", "no", 20.0, 1234.5),
            record(40, "southwest", "yes", 25.0, 98765.4),
            record(50, "northeast", "no", 30.0, 333.3),
            record(22, "northwest", "no", 30.0, 7.1),
            record(61, "southwest", "no", 30.0, 4500.0),
        ]);
        let shares = total_charges_by_region(&table).unwrap();
        assert_eq!(shares.len(), 4);

        assert!(shares.iter().all(|s| (0.0..=TAU).contains(&s.angle)));
        let total_angle: f64 = shares.iter().map(|s| s.angle).sum();
        assert!((total_angle - TAU).abs() < 1e-9);

        let southwest = shares.iter().find(|s| s.region == "southwest").unwrap();
        assert!((southwest.total_charges - 103265.4).abs() < 1e-6);
    }

    #[test]
    fn test_single_region_is_the_whole_pie() {
        let table = Table::from_records(vec![
            record(30, "southeast", "no", 20.0, 10.0),
            record(31, "southeast", "no", 20.0, 30.0),
        ]);
        let shares = total_charges_by_region(&table).unwrap();
        assert_eq!(shares.len(), 1);
        assert!((shares[0].fraction() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scatter_points_one_per_row_with_colours() {
        let table = Table::from_records(vec![
            record(30, "southeast", "yes", 20.0, 100.0),
            record(31, "southeast", "nonsmoker", 21.0, 200.0),
            record(32, "southeast", "unknown", 22.0, 300.0),
        ]);
        let points = scatter_points(&table);
        assert_eq!(points.len(), 3);

        assert_eq!(points[0].category, PointCategory::Known(SmokerStatus::Smoker));
        assert_eq!(points[0].color, color::SMOKER_COLOR);
        assert_eq!((points[0].bmi, points[0].charges), (20.0, 100.0));

        assert_eq!(points[1].category, PointCategory::Known(SmokerStatus::NonSmoker));
        assert_eq!(points[1].color, color::NONSMOKER_COLOR);

        assert_eq!(points[2].category, PointCategory::Unmapped("unknown".into()));
        assert_eq!(points[2].color, color::NEUTRAL_COLOR);
    }
}
