use crate::color::RegionColors;
use crate::data::aggregate::{
    average_charges_by_region, scatter_points, total_charges_by_region, RegionAverage, RegionShare,
    ScatterPoint,
};
use crate::data::filter::{self, filter_records, FilterCriteria, PlotSize, Selector};
use crate::data::model::Table;
use crate::data::store::InsuranceStore;
use crate::error::EmptyResultError;
use crate::reactive::{Binding, Signal};

// ---------------------------------------------------------------------------
// Chart bindings
// ---------------------------------------------------------------------------

/// Rows passing every filter and the scatter points drawn from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub rows: Table,
    pub points: Vec<ScatterPoint>,
}

impl Selection {
    fn compute(table: &Table, criteria: &FilterCriteria) -> Self {
        let rows = filter_records(
            table,
            &criteria.region,
            &criteria.smoker,
            criteria.age_min,
            criteria.age_max,
        );
        let points = scatter_points(&rows);
        Selection { rows, points }
    }
}

/// Everything the central panel draws, each recomputed from the table and
/// the current criteria when one of its signals fires.
#[derive(Debug)]
pub struct Charts {
    pub selection: Binding<Selection>,
    pub bars: Binding<Vec<RegionAverage>>,
    pub pie: Binding<Result<Vec<RegionShare>, EmptyResultError>>,
}

const SELECTION: [Signal; 3] = [Signal::Region, Signal::Smoker, Signal::AgeRange];
const ACROSS_REGIONS: [Signal; 2] = [Signal::Smoker, Signal::AgeRange];

impl Charts {
    pub fn new(table: &Table, criteria: &FilterCriteria) -> Self {
        Self {
            selection: Binding::new("selection", &SELECTION, table, criteria, Selection::compute),
            bars: Binding::new("bars", &ACROSS_REGIONS, table, criteria, |t, c| {
                average_charges_by_region(&filter::apply(t, &c.across_regions()))
            }),
            pie: Binding::new("pie", &ACROSS_REGIONS, table, criteria, |t, c| {
                total_charges_by_region(&filter::apply(t, &c.across_regions()))
            }),
        }
    }

    /// Raise `signal` on every binding.  Returns how many recomputed.
    pub fn notify(&mut self, signal: Signal, table: &Table, criteria: &FilterCriteria) -> usize {
        [
            self.selection.notify(signal, table, criteria),
            self.bars.notify(signal, table, criteria),
            self.pie.notify(signal, table, criteria),
        ]
        .into_iter()
        .filter(|ran| *ran)
        .count()
    }

    pub fn refresh(&mut self, table: &Table, criteria: &FilterCriteria) {
        self.selection.refresh(table, criteria);
        self.bars.refresh(table, criteria);
        self.pie.refresh(table, criteria);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which view the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Charts,
    Data,
}

/// The full UI state, independent of rendering.
#[derive(Debug)]
pub struct AppState {
    /// Loaded dataset.
    pub store: InsuranceStore,

    /// Current widget values.
    pub criteria: FilterCriteria,

    /// Derived chart data.
    pub charts: Charts,

    /// Region colours for the bar and pie charts.
    pub region_colors: RegionColors,

    /// Apply the smoker relabel to every dataset opened later.
    pub relabel_smoker: bool,

    pub show_pie: bool,

    pub tab: Tab,

    /// Data tab shows every record instead of the filtered ones.
    pub show_all_rows: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(store: InsuranceStore, criteria: FilterCriteria) -> Self {
        warn_unmapped(store.data());
        let charts = Charts::new(store.data(), &criteria);
        let region_colors = RegionColors::new(&store.data().regions());
        Self {
            store,
            criteria,
            charts,
            region_colors,
            relabel_smoker: false,
            show_pie: false,
            tab: Tab::default(),
            show_all_rows: false,
            status_message: None,
        }
    }

    pub fn table(&self) -> &Table {
        self.store.data()
    }

    /// Ingest a newly loaded dataset and recompute every chart.
    pub fn set_store(&mut self, mut store: InsuranceStore) {
        if self.relabel_smoker {
            store.relabel_smoker();
        }
        warn_unmapped(store.data());
        self.region_colors = RegionColors::new(&store.data().regions());
        if let Some((lo, hi)) = store.data().age_bounds() {
            self.criteria.age_min = self.criteria.age_min.clamp(lo, hi);
            self.criteria.age_max = self.criteria.age_max.clamp(lo, hi);
        }
        self.store = store;
        self.charts.refresh(self.store.data(), &self.criteria);
        self.status_message = None;
    }

    fn raise(&mut self, signal: Signal) {
        self.charts.notify(signal, self.store.data(), &self.criteria);
    }

    pub fn set_region(&mut self, region: Selector) {
        if self.criteria.region != region {
            self.criteria.region = region;
            self.raise(Signal::Region);
        }
    }

    pub fn set_smoker(&mut self, smoker: Selector) {
        if self.criteria.smoker != smoker {
            self.criteria.smoker = smoker;
            self.raise(Signal::Smoker);
        }
    }

    /// Update the age range; the bounds are put in order first.
    pub fn set_age_range(&mut self, age_min: u32, age_max: u32) {
        let (lo, hi) = (age_min.min(age_max), age_min.max(age_max));
        if (self.criteria.age_min, self.criteria.age_max) != (lo, hi) {
            self.criteria.age_min = lo;
            self.criteria.age_max = hi;
            self.raise(Signal::AgeRange);
        }
    }

    pub fn set_plot_size(&mut self, size: Option<PlotSize>) {
        if self.criteria.plot_size != size {
            self.criteria.plot_size = size;
            self.raise(Signal::PlotSize);
        }
    }

    /// Number of rows passing the current filters.
    pub fn visible_count(&self) -> usize {
        self.charts.selection.value().rows.len()
    }

    /// Records shown on the Data tab.
    pub fn data_view(&self) -> &Table {
        if self.show_all_rows {
            self.table()
        } else {
            &self.charts.selection.value().rows
        }
    }

    /// Selectors naming a value that does not occur in the table, as
    /// `(widget, value)` pairs.
    pub fn unknown_selections(&self) -> Vec<(&'static str, String)> {
        let mut unknown = Vec::new();
        if let Selector::Only(region) = &self.criteria.region {
            if !self.table().regions().contains(region) {
                unknown.push(("region", region.clone()));
            }
        }
        if let Selector::Only(smoker) = &self.criteria.smoker {
            if !self.table().smoker_values().contains(smoker) {
                unknown.push(("smoker", smoker.clone()));
            }
        }
        unknown
    }
}

/// Log each smoker value that will be drawn with the neutral colour, once.
fn warn_unmapped(table: &Table) {
    for value in table.unmapped_smoker_values() {
        log::warn!("smoker value '{value}' has no colour mapping; drawing it grey");
    }
}
