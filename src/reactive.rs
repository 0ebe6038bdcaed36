use std::collections::BTreeSet;
use std::fmt;

use crate::data::filter::FilterCriteria;
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Input signals a widget can raise
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    Region,
    Smoker,
    AgeRange,
    PlotSize,
}

// ---------------------------------------------------------------------------
// Binding: a cached derived value with its subscriptions
// ---------------------------------------------------------------------------

type Compute<T> = Box<dyn Fn(&Table, &FilterCriteria) -> T>;

/// A function of (table, criteria) registered against a set of signals.
///
/// The value is computed when the binding is created and recomputed
/// synchronously whenever one of its signals is raised.
pub struct Binding<T> {
    name: &'static str,
    inputs: BTreeSet<Signal>,
    compute: Compute<T>,
    value: T,
    evaluations: u64,
}

impl<T> Binding<T> {
    pub fn new(
        name: &'static str,
        inputs: &[Signal],
        table: &Table,
        criteria: &FilterCriteria,
        compute: impl Fn(&Table, &FilterCriteria) -> T + 'static,
    ) -> Self {
        let value = compute(table, criteria);
        Self {
            name,
            inputs: inputs.iter().copied().collect(),
            compute: Box::new(compute),
            value,
            evaluations: 1,
        }
    }

    pub fn depends_on(&self, signal: Signal) -> bool {
        self.inputs.contains(&signal)
    }

    /// Recompute if subscribed to `signal`.  Returns whether it ran.
    pub fn notify(&mut self, signal: Signal, table: &Table, criteria: &FilterCriteria) -> bool {
        if !self.depends_on(signal) {
            return false;
        }
        log::debug!("{} re-evaluated on {signal:?}", self.name());
        self.refresh(table, criteria);
        true
    }

    /// Recompute unconditionally (e.g. after the table itself changed).
    pub fn refresh(&mut self, table: &Table, criteria: &FilterCriteria) {
        self.value = (self.compute)(table, criteria);
        self.evaluations += 1;
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// How many times the compute function has run.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("inputs", &self.inputs)
            .field("value", &self.value)
            .field("evaluations", &self.evaluations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, Selector};
    use crate::data::model::record;

    fn table() -> Table {
        Table::from_records(vec![
            record(25, "southeast", "yes", 22.0, 1000.0),
            record(60, "northwest", "no", 30.0, 5000.0),
        ])
    }

    #[test]
    fn test_binding_evaluates_on_creation() {
        let t = table();
        let criteria = FilterCriteria::default();
        let binding = Binding::new("rows", &[Signal::Region], &t, &criteria, |t, c| apply(t, c).len());
        assert_eq!(*binding.value(), 1);
        assert_eq!(binding.evaluations(), 1);
        assert_eq!(binding.name(), "rows");
    }

    #[test]
    fn test_notify_only_reruns_for_subscribed_signals() {
        let t = table();
        let mut criteria = FilterCriteria::default();
        let mut binding = Binding::new(
            "rows",
            &[Signal::Region, Signal::AgeRange],
            &t,
            &criteria,
            |t, c| apply(t, c).len(),
        );

        criteria.plot_size = Some(crate::data::filter::PlotSize { width: 1.0, height: 1.0 });
        assert!(!binding.notify(Signal::PlotSize, &t, &criteria));
        assert_eq!(binding.evaluations(), 1);

        criteria.region = Selector::parse("northwest");
        criteria.age_max = 70;
        assert!(binding.notify(Signal::Region, &t, &criteria));
        assert_eq!(*binding.value(), 1);
        assert_eq!(binding.evaluations(), 2);

        criteria.region = Selector::Total;
        assert!(!binding.notify(Signal::Smoker, &t, &criteria));
        assert_eq!(*binding.value(), 1, "stale until a subscribed signal fires");
    }

    #[test]
    fn test_refresh_ignores_subscriptions() {
        let t = table();
        let criteria = FilterCriteria::default();
        let mut binding = Binding::new("n", &[], &t, &criteria, |t, _| t.len());
        binding.refresh(&Table::default(), &criteria);
        assert_eq!(*binding.value(), 0);
        assert_eq!(binding.evaluations(), 2);
    }
}
