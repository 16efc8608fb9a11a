use std::collections::BTreeSet;

use crate::data::aggregate::{PipelineResult, compute};
use crate::data::filter::{FilterSelection, init_filter_selection};
use crate::data::model::{CategoryValue, Dimension, SalaryDataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<SalaryDataset>,

    /// Where the current dataset came from (URL or path), for the top bar.
    pub source: Option<String>,

    /// Per-dimension filter selections.
    pub selection: FilterSelection,

    /// Output of the last pipeline run over `selection`.
    pub result: PipelineResult,

    /// Load error shown in place of the dashboard.
    pub status_message: Option<String>,
}

impl AppState {
    /// Ingest a newly loaded dataset, select everything and run the pipeline.
    pub fn set_dataset(&mut self, dataset: SalaryDataset, source: impl Into<String>) {
        self.selection = init_filter_selection(&dataset);
        self.dataset = Some(dataset);
        self.source = Some(source.into());
        self.status_message = None;
        self.recompute();
    }

    /// Record a load failure. A previously loaded dataset stays visible.
    pub fn set_load_error(&mut self, err: &anyhow::Error) {
        log::error!("Failed to load dataset: {err:#}");
        self.status_message = Some(format!("Error: {err:#}"));
    }

    /// Re-run the whole pipeline for the current selection.
    pub fn recompute(&mut self) {
        self.result = match &self.dataset {
            Some(ds) => compute(ds, &self.selection),
            None => PipelineResult::default(),
        };
        log::debug!("Selection matches {} records", self.result.indices.len());
    }

    /// Toggle a single value in a dimension's selection.
    pub fn toggle_value(&mut self, dim: Dimension, value: &CategoryValue) {
        let selected = self.selection.entry(dim).or_default();
        if !selected.remove(value) {
            selected.insert(value.clone());
        }
        self.recompute();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(all_vals) = self.dataset.as_ref().and_then(|ds| ds.unique_values.get(&dim)) {
            self.selection.insert(dim, all_vals.clone());
            self.recompute();
        }
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dim: Dimension) {
        self.selection.insert(dim, BTreeSet::new());
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(
            SalaryDataset::from_records(vec![
                record(2023, "SE", "Data Scientist", "M", 100.0, "remoto", "USA"),
                record(2024, "MI", "Data Engineer", "L", 300.0, "presencial", "ESP"),
            ]),
            "memory",
        );
        state
    }

    #[test]
    fn new_dataset_shows_everything() {
        let state = loaded();
        assert_eq!(state.result.indices, vec![0, 1]);
        assert_eq!(state.result.metrics.total_records, 2);
        assert_eq!(state.source.as_deref(), Some("memory"));
    }

    #[test]
    fn toggling_recomputes_wholesale() {
        let mut state = loaded();
        state.toggle_value(Dimension::WorkYear, &CategoryValue::Integer(2024));
        assert_eq!(state.result.indices, vec![0]);
        assert_eq!(state.result.metrics.max_salary, 100.0);

        state.toggle_value(Dimension::WorkYear, &CategoryValue::Integer(2024));
        assert_eq!(state.result.indices, vec![0, 1]);
    }

    #[test]
    fn none_then_all_restores_full_view() {
        let mut state = loaded();
        state.select_none(Dimension::CompanySize);
        assert!(state.result.is_empty());
        assert!(state.result.top_roles.is_none());

        state.select_all(Dimension::CompanySize);
        assert_eq!(state.result.indices.len(), 2);
    }

    #[test]
    fn load_error_keeps_previous_dataset() {
        let mut state = loaded();
        state.set_load_error(&anyhow::anyhow!("network down"));
        assert!(state.dataset.is_some());
        assert_eq!(state.status_message.as_deref(), Some("Error: network down"));
    }
}
