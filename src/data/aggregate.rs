//! Summary metrics and chart aggregates over a filtered subset.
//!
//! Every aggregate is `None` when the subset is empty so the UI can show a
//! "no data" notice instead of computing statistics over nothing.

use std::collections::{BTreeMap, HashMap};

use crate::config::{HIGHLIGHT_ROLE, HISTOGRAM_BINS, TOP_ROLES};

use super::filter::{filtered_indices, FilterSelection};
use super::model::{SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Headline numbers. All fields default to zero / empty for an empty subset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryMetrics {
    pub average_salary: f64,
    pub max_salary: f64,
    pub total_records: usize,
    pub most_frequent_role: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleSalary {
    pub job_title: String,
    pub mean_salary: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalaryHistogram {
    /// Lower edge of the first bin.
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl SalaryHistogram {
    /// `(lower, upper)` edges of bin `i`.
    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        let lo = self.start + i as f64 * self.bin_width;
        (lo, lo + self.bin_width)
    }

    pub fn bin_center(&self, i: usize) -> f64 {
        self.start + (i as f64 + 0.5) * self.bin_width
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RemoteShare {
    pub remote_type: String,
    pub count: usize,
    /// Share of the filtered subset, 0–100.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountrySalary {
    pub iso3: String,
    pub mean_salary: f64,
}

/// Everything the dashboard renders for one filter selection.
#[derive(Debug, Clone, Default)]
pub struct PipelineResult {
    /// Filtered row indices, in source order.
    pub indices: Vec<usize>,
    pub metrics: SummaryMetrics,
    pub top_roles: Option<Vec<RoleSalary>>,
    pub distribution: Option<SalaryHistogram>,
    pub remote_split: Option<Vec<RemoteShare>>,
    pub country_salary: Option<Vec<CountrySalary>>,
}

impl PipelineResult {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Filter `dataset` by `selection` and recompute every aggregate from scratch.
pub fn compute(dataset: &SalaryDataset, selection: &FilterSelection) -> PipelineResult {
    let indices = filtered_indices(dataset, selection);
    let subset: Vec<&SalaryRecord> = indices.iter().map(|&i| &dataset.records[i]).collect();

    PipelineResult {
        metrics: summary_metrics(&subset),
        top_roles: top_paid_roles(&subset, TOP_ROLES),
        distribution: salary_histogram(&subset, HISTOGRAM_BINS),
        remote_split: remote_split(&subset),
        country_salary: country_salary(&subset, HIGHLIGHT_ROLE),
        indices,
    }
}

pub fn summary_metrics(subset: &[&SalaryRecord]) -> SummaryMetrics {
    if subset.is_empty() {
        return SummaryMetrics::default();
    }

    let total: f64 = subset.iter().map(|r| r.salary_usd).sum();
    let max = subset
        .iter()
        .map(|r| r.salary_usd)
        .fold(f64::NEG_INFINITY, f64::max);
    let role = counts_in_first_seen_order(subset.iter().map(|r| r.job_title.as_str()))
        .into_iter()
        .fold(None::<(&str, usize)>, |best, (title, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((title, n)),
        })
        .map(|(title, _)| title.to_string())
        .unwrap_or_default();

    SummaryMetrics {
        average_salary: total / subset.len() as f64,
        max_salary: max,
        total_records: subset.len(),
        most_frequent_role: role,
    }
}

/// Mean salary per job title, the `n` highest means, sorted ascending.
///
/// Titles are grouped in ascending order; equal means keep that order.
pub fn top_paid_roles(subset: &[&SalaryRecord], n: usize) -> Option<Vec<RoleSalary>> {
    if subset.is_empty() {
        return None;
    }

    let mut roles: Vec<RoleSalary> = group_means(subset.iter().map(|r| (r.job_title.as_str(), r.salary_usd)))
        .into_iter()
        .map(|(job_title, mean_salary)| RoleSalary {
            job_title: job_title.to_string(),
            mean_salary,
        })
        .collect();

    roles.sort_by(|a, b| b.mean_salary.total_cmp(&a.mean_salary));
    roles.truncate(n);
    roles.sort_by(|a, b| a.mean_salary.total_cmp(&b.mean_salary));
    Some(roles)
}

/// Count salaries into `bins` equal-width bins spanning the observed range.
/// The last bin includes the maximum.
pub fn salary_histogram(subset: &[&SalaryRecord], bins: usize) -> Option<SalaryHistogram> {
    if subset.is_empty() || bins == 0 {
        return None;
    }

    let (min, max) = subset.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
        (lo.min(r.salary_usd), hi.max(r.salary_usd))
    });
    let span = max - min;
    let bin_width = if span > 0.0 { span / bins as f64 } else { 1.0 };

    let mut counts = vec![0usize; bins];
    for rec in subset {
        let slot = ((rec.salary_usd - min) / bin_width) as usize;
        counts[slot.min(bins - 1)] += 1;
    }

    Some(SalaryHistogram {
        start: min,
        bin_width,
        counts,
    })
}

/// Records per remote type, most common first; ties keep first-seen order.
pub fn remote_split(subset: &[&SalaryRecord]) -> Option<Vec<RemoteShare>> {
    if subset.is_empty() {
        return None;
    }

    let total = subset.len() as f64;
    let mut shares: Vec<RemoteShare> =
        counts_in_first_seen_order(subset.iter().map(|r| r.remote_type.as_str()))
            .into_iter()
            .map(|(remote_type, count)| RemoteShare {
                remote_type: remote_type.to_string(),
                count,
                percent: count as f64 * 100.0 / total,
            })
            .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    Some(shares)
}

/// Mean salary per residence country for records with `job_title == role`.
pub fn country_salary(subset: &[&SalaryRecord], role: &str) -> Option<Vec<CountrySalary>> {
    if subset.is_empty() {
        return None;
    }

    let rows = subset
        .iter()
        .filter(|r| r.job_title == role)
        .map(|r| (r.residence_iso3.as_str(), r.salary_usd));

    Some(
        group_means(rows)
            .into_iter()
            .map(|(iso3, mean_salary)| CountrySalary {
                iso3: iso3.to_string(),
                mean_salary,
            })
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mean value per key, keys in ascending order.
fn group_means<'a>(rows: impl Iterator<Item = (&'a str, f64)>) -> BTreeMap<&'a str, f64> {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (key, value) in rows {
        let slot = sums.entry(key).or_insert((0.0, 0));
        slot.0 += value;
        slot.1 += 1;
    }
    sums.into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect()
}

/// Occurrence counts, keys in the order they first appear.
fn counts_in_first_seen_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match position.get(value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::init_filter_selection;
    use crate::data::model::tests::record;
    use crate::data::model::{CategoryValue, Dimension};

    fn refs(records: &[SalaryRecord]) -> Vec<&SalaryRecord> {
        records.iter().collect()
    }

    #[test]
    fn year_filter_example() {
        let ds = SalaryDataset::from_records(vec![
            record(2023, "SE", "Data Scientist", "M", 100.0, "remoto", "USA"),
            record(2024, "SE", "Data Scientist", "M", 300.0, "remoto", "USA"),
        ]);
        let mut sel = init_filter_selection(&ds);
        sel.insert(
            Dimension::WorkYear,
            [CategoryValue::Integer(2023)].into_iter().collect(),
        );

        let result = compute(&ds, &sel);
        assert_eq!(result.indices, vec![0]);
        assert_eq!(result.metrics.average_salary, 100.0);
        assert_eq!(result.metrics.max_salary, 100.0);
        assert_eq!(result.metrics.total_records, 1);
        assert_eq!(result.metrics.most_frequent_role, "Data Scientist");
    }

    #[test]
    fn empty_subset_yields_defaults_and_no_data() {
        let ds = SalaryDataset::from_records(vec![record(
            2023, "SE", "Data Scientist", "M", 100.0, "remoto", "USA",
        )]);
        let mut sel = init_filter_selection(&ds);
        sel.insert(Dimension::JobTitle, BTreeSet::new());

        let result = compute(&ds, &sel);
        assert!(result.is_empty());
        assert_eq!(result.metrics, SummaryMetrics::default());
        assert_eq!(result.metrics.average_salary, 0.0);
        assert_eq!(result.metrics.max_salary, 0.0);
        assert_eq!(result.metrics.total_records, 0);
        assert_eq!(result.metrics.most_frequent_role, "");
        assert!(result.top_roles.is_none());
        assert!(result.distribution.is_none());
        assert!(result.remote_split.is_none());
        assert!(result.country_salary.is_none());
    }

    #[test]
    fn empty_dataset_does_not_panic() {
        let ds = SalaryDataset::from_records(Vec::new());
        let result = compute(&ds, &init_filter_selection(&ds));
        assert!(result.is_empty());
        assert!(result.top_roles.is_none());
    }

    #[test]
    fn mode_ties_go_to_first_seen_role() {
        let rows = vec![
            record(2023, "SE", "Data Engineer", "M", 1.0, "remoto", "USA"),
            record(2023, "SE", "Data Analyst", "M", 1.0, "remoto", "USA"),
            record(2023, "SE", "Data Analyst", "M", 1.0, "remoto", "USA"),
            record(2023, "SE", "Data Engineer", "M", 1.0, "remoto", "USA"),
        ];
        assert_eq!(summary_metrics(&refs(&rows)).most_frequent_role, "Data Engineer");

        let mut rows = rows;
        rows.push(record(2023, "SE", "Data Analyst", "M", 1.0, "remoto", "USA"));
        assert_eq!(summary_metrics(&refs(&rows)).most_frequent_role, "Data Analyst");
    }

    #[test]
    fn top_roles_are_capped_and_ascending() {
        let rows: Vec<SalaryRecord> = (0..15)
            .flat_map(|i| {
                let title = format!("Role {i:02}");
                [
                    record(2024, "SE", &title, "M", 1000.0 * i as f64, "remoto", "USA"),
                    record(2024, "SE", &title, "M", 1000.0 * i as f64 + 500.0, "remoto", "USA"),
                ]
            })
            .collect();

        let top = top_paid_roles(&refs(&rows), 10).unwrap();
        assert_eq!(top.len(), 10);
        assert!(top.windows(2).all(|w| w[0].mean_salary <= w[1].mean_salary));
        assert_eq!(top[0].job_title, "Role 05");
        assert_eq!(top[0].mean_salary, 5250.0);
        assert_eq!(top[9].job_title, "Role 14");
    }

    #[test]
    fn top_roles_ties_keep_alphabetical_group_order() {
        let rows = vec![
            record(2024, "SE", "Zeta", "M", 10.0, "remoto", "USA"),
            record(2024, "SE", "Alpha", "M", 10.0, "remoto", "USA"),
            record(2024, "SE", "Mid", "M", 10.0, "remoto", "USA"),
            record(2024, "SE", "Low", "M", 5.0, "remoto", "USA"),
        ];
        let top = top_paid_roles(&refs(&rows), 2).unwrap();
        let titles: Vec<_> = top.iter().map(|r| r.job_title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha", "Mid"]);
    }

    #[test]
    fn histogram_spans_min_to_max() {
        let rows: Vec<SalaryRecord> = [0.0, 10.0, 15.0, 29.9, 30.0]
            .iter()
            .map(|&s| record(2024, "SE", "X", "M", s, "remoto", "USA"))
            .collect();

        let hist = salary_histogram(&refs(&rows), 3).unwrap();
        assert_eq!(hist.start, 0.0);
        assert_eq!(hist.bin_width, 10.0);
        assert_eq!(hist.counts, vec![1, 2, 2]);
        assert_eq!(hist.bin_range(1), (10.0, 20.0));
        assert_eq!(hist.bin_center(0), 5.0);
        assert_eq!(hist.counts.iter().sum::<usize>(), rows.len());
    }

    #[test]
    fn histogram_with_single_value_uses_first_bin() {
        let rows = vec![
            record(2024, "SE", "X", "M", 42.0, "remoto", "USA"),
            record(2024, "SE", "X", "M", 42.0, "remoto", "USA"),
        ];
        let hist = salary_histogram(&refs(&rows), HISTOGRAM_BINS).unwrap();
        assert_eq!(hist.counts.len(), HISTOGRAM_BINS);
        assert_eq!(hist.counts[0], 2);
        assert_eq!(hist.counts.iter().sum::<usize>(), 2);
    }

    #[test]
    fn remote_counts_sum_to_subset_size() {
        let rows = vec![
            record(2024, "SE", "X", "M", 1.0, "presencial", "USA"),
            record(2024, "SE", "X", "M", 1.0, "remoto", "USA"),
            record(2024, "SE", "X", "M", 1.0, "remoto", "USA"),
            record(2024, "SE", "X", "M", 1.0, "híbrido", "USA"),
        ];
        let split = remote_split(&refs(&rows)).unwrap();
        let labels: Vec<_> = split.iter().map(|s| s.remote_type.as_str()).collect();
        assert_eq!(labels, vec!["remoto", "presencial", "híbrido"]);
        assert_eq!(split.iter().map(|s| s.count).sum::<usize>(), rows.len());
        assert_eq!(split[0].percent, 50.0);
    }

    #[test]
    fn country_means_only_use_highlighted_role() {
        let rows = vec![
            record(2024, "SE", "Data Scientist", "M", 100.0, "remoto", "USA"),
            record(2024, "SE", "Data Scientist", "M", 200.0, "remoto", "USA"),
            record(2024, "SE", "Data Scientist", "M", 80.0, "remoto", "BRA"),
            record(2024, "SE", "Data Engineer", "M", 999.0, "remoto", "USA"),
        ];
        let countries = country_salary(&refs(&rows), "Data Scientist").unwrap();
        assert_eq!(
            countries,
            vec![
                CountrySalary { iso3: "BRA".into(), mean_salary: 80.0 },
                CountrySalary { iso3: "USA".into(), mean_salary: 150.0 },
            ]
        );
    }

    #[test]
    fn country_chart_is_empty_not_missing_without_scientists() {
        let rows = vec![record(2024, "SE", "Data Engineer", "M", 1.0, "remoto", "USA")];
        assert_eq!(country_salary(&refs(&rows), "Data Scientist"), Some(Vec::new()));
    }
}
