use std::collections::{BTreeMap, BTreeSet};

use super::model::{CategoryValue, Dimension, SalaryDataset};

// ---------------------------------------------------------------------------
// Filter predicate: which distinct values are selected per dimension
// ---------------------------------------------------------------------------

/// Per-dimension selection: maps dimension → set of selected values.
/// An absent dimension is unconstrained; an empty set matches nothing.
pub type FilterSelection = BTreeMap<Dimension, BTreeSet<CategoryValue>>;

/// Initialise a [`FilterSelection`] with all values selected (i.e., show everything).
pub fn init_filter_selection(dataset: &SalaryDataset) -> FilterSelection {
    dataset
        .unique_values
        .iter()
        .map(|(dim, vals)| (*dim, vals.clone()))
        .collect()
}

/// Return indices of records that pass every dimension, in source order.
///
/// A record passes a dimension when:
/// * The dimension is not present in `selection` → passes (no constraint)
/// * The selected set for that dimension is empty → fails
/// * The record's value for that dimension is in the selected set → passes
pub fn filtered_indices(dataset: &SalaryDataset, selection: &FilterSelection) -> Vec<usize> {
    // Dimensions where every distinct value is selected cannot reject anything.
    let active: Vec<(Dimension, &BTreeSet<CategoryValue>)> = selection
        .iter()
        .filter(|(dim, selected)| {
            selected.is_empty()
                || dataset
                    .unique_values
                    .get(*dim)
                    .map_or(true, |all| !all.is_subset(selected))
        })
        .map(|(dim, selected)| (*dim, selected))
        .collect();

    if active.iter().any(|(_, selected)| selected.is_empty()) {
        return Vec::new();
    }

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            active
                .iter()
                .all(|(dim, selected)| rec.category_in(*dim, selected))
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;
    use crate::data::model::SalaryRecord;

    fn sample() -> SalaryDataset {
        SalaryDataset::from_records(vec![
            record(2023, "SE", "Data Scientist", "M", 100.0, "remoto", "USA"),
            record(2024, "MI", "Data Engineer", "L", 300.0, "presencial", "ESP"),
            record(2023, "EN", "Data Analyst", "S", 50.0, "híbrido", "MEX"),
            record(2022, "SE", "Data Scientist", "L", 200.0, "remoto", "USA"),
            record(2024, "SE", "ML Engineer", "M", 250.0, "remoto", "CAN"),
        ])
    }

    fn set(values: &[CategoryValue]) -> BTreeSet<CategoryValue> {
        values.iter().cloned().collect()
    }

    fn text(s: &str) -> CategoryValue {
        CategoryValue::Text(s.to_string())
    }

    fn satisfies(rec: &SalaryRecord, selection: &FilterSelection) -> bool {
        selection
            .iter()
            .all(|(dim, selected)| selected.contains(&rec.category(*dim)))
    }

    #[test]
    fn full_selection_keeps_every_record() {
        let ds = sample();
        let sel = init_filter_selection(&ds);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn single_year_keeps_matching_rows_in_order() {
        let ds = sample();
        let mut sel = init_filter_selection(&ds);
        sel.insert(Dimension::WorkYear, set(&[CategoryValue::Integer(2023)]));
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 2]);
    }

    #[test]
    fn empty_dimension_selects_nothing() {
        let ds = sample();
        let mut sel = init_filter_selection(&ds);
        sel.insert(Dimension::CompanySize, BTreeSet::new());
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn absent_dimension_is_unconstrained() {
        let ds = sample();
        let mut sel = FilterSelection::new();
        sel.insert(Dimension::ExperienceLevel, set(&[text("SE")]));
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 3, 4]);
    }

    #[test]
    fn result_is_exactly_the_records_matching_all_dimensions() {
        let ds = sample();
        let mut sel = init_filter_selection(&ds);
        sel.insert(Dimension::ExperienceLevel, set(&[text("SE"), text("MI")]));
        sel.insert(Dimension::CompanySize, set(&[text("M"), text("L")]));
        sel.insert(
            Dimension::WorkYear,
            set(&[CategoryValue::Integer(2024), CategoryValue::Integer(2022)]),
        );

        let kept = filtered_indices(&ds, &sel);
        assert_eq!(kept, vec![1, 3, 4]);
        for (i, rec) in ds.records.iter().enumerate() {
            assert_eq!(kept.contains(&i), satisfies(rec, &sel), "row {i}");
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample();
        let mut sel = init_filter_selection(&ds);
        sel.insert(Dimension::JobTitle, set(&[text("Data Scientist"), text("ML Engineer")]));

        let once = filtered_indices(&ds, &sel);
        let subset = SalaryDataset::from_records(
            once.iter().map(|&i| ds.records[i].clone()).collect(),
        );
        let twice = filtered_indices(&subset, &sel);

        let once_records: Vec<_> = once.iter().map(|&i| &ds.records[i]).collect();
        let twice_records: Vec<_> = twice.iter().map(|&i| &subset.records[i]).collect();
        assert_eq!(once_records, twice_records);
    }

    #[test]
    fn selecting_unseen_values_matches_nothing_extra() {
        let ds = sample();
        let mut sel = init_filter_selection(&ds);
        sel.insert(Dimension::WorkYear, set(&[CategoryValue::Integer(1999)]));
        assert!(filtered_indices(&ds, &sel).is_empty());
    }
}
