use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Deserialize;

use crate::config;

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// One reported salary observation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "año_trabajo", deserialize_with = "de_work_year")]
    pub work_year: i64,
    #[serde(rename = "nivel_experiencia")]
    pub experience_level: String,
    #[serde(rename = "puesto")]
    pub job_title: String,
    #[serde(rename = "tamaño_empresa")]
    pub company_size: String,
    #[serde(rename = "salario_en_usd")]
    pub salary_usd: f64,
    #[serde(rename = "remoto")]
    pub remote_type: String,
    #[serde(rename = "residencia_iso3")]
    pub residence_iso3: String,
}

/// Years arrive as `2023`, `2023.0` or `"2023"` depending on who wrote the file.
#[derive(Deserialize)]
#[serde(untagged)]
enum YearRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

fn de_work_year<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let repr = YearRepr::deserialize(deserializer)?;
    let year = match repr {
        YearRepr::Int(i) => Some(i),
        YearRepr::Float(f) => integral_f64(f),
        YearRepr::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral_f64))
        }
    };
    year.ok_or_else(|| serde::de::Error::custom("work year is not an integer"))
}

pub(crate) fn integral_f64(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0).then_some(f as i64)
}

impl SalaryRecord {
    /// The record's value along one filter dimension.
    pub fn category(&self, dim: Dimension) -> CategoryValue {
        match dim {
            Dimension::WorkYear => CategoryValue::Integer(self.work_year),
            Dimension::ExperienceLevel => CategoryValue::Text(self.experience_level.clone()),
            Dimension::JobTitle => CategoryValue::Text(self.job_title.clone()),
            Dimension::CompanySize => CategoryValue::Text(self.company_size.clone()),
        }
    }

    /// Membership test without allocating a [`CategoryValue`] for text columns.
    pub fn category_in(&self, dim: Dimension, selected: &BTreeSet<CategoryValue>) -> bool {
        let text = match dim {
            Dimension::WorkYear => {
                return selected.contains(&CategoryValue::Integer(self.work_year));
            }
            Dimension::ExperienceLevel => &self.experience_level,
            Dimension::JobTitle => &self.job_title,
            Dimension::CompanySize => &self.company_size,
        };
        selected
            .iter()
            .any(|v| matches!(v, CategoryValue::Text(s) if s == text))
    }
}

// ---------------------------------------------------------------------------
// Dimension – the four filterable columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    WorkYear,
    ExperienceLevel,
    JobTitle,
    CompanySize,
}

impl Dimension {
    /// Sidebar order.
    pub const ALL: [Dimension; 4] = [
        Dimension::WorkYear,
        Dimension::ExperienceLevel,
        Dimension::JobTitle,
        Dimension::CompanySize,
    ];

    /// Label shown above the multiselect.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::WorkYear => "año_trabajo",
            Dimension::ExperienceLevel => "nivel_experiencia",
            Dimension::JobTitle => "Tipo de Contrato",
            Dimension::CompanySize => "Tamaño de la Empresa",
        }
    }

    /// Source column backing this dimension.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::WorkYear => config::COL_WORK_YEAR,
            Dimension::ExperienceLevel => config::COL_EXPERIENCE_LEVEL,
            Dimension::JobTitle => config::COL_JOB_TITLE,
            Dimension::CompanySize => config::COL_COMPANY_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// CategoryValue – a distinct value of one dimension
// ---------------------------------------------------------------------------

/// Categorical cell value. Years sort numerically, everything else lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Integer(i) => write!(f, "{i}"),
            CategoryValue::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with the distinct values of every filter dimension.
/// Never mutated after construction.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    pub records: Vec<SalaryRecord>,
    pub unique_values: BTreeMap<Dimension, BTreeSet<CategoryValue>>,
}

impl SalaryDataset {
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut unique_values: BTreeMap<Dimension, BTreeSet<CategoryValue>> = Dimension::ALL
            .iter()
            .map(|&dim| (dim, BTreeSet::new()))
            .collect();

        for rec in &records {
            for dim in Dimension::ALL {
                if let Some(set) = unique_values.get_mut(&dim) {
                    set.insert(rec.category(dim));
                }
            }
        }

        SalaryDataset {
            records,
            unique_values,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(
        year: i64,
        level: &str,
        title: &str,
        size: &str,
        salary: f64,
        remote: &str,
        iso3: &str,
    ) -> SalaryRecord {
        SalaryRecord {
            work_year: year,
            experience_level: level.to_string(),
            job_title: title.to_string(),
            company_size: size.to_string(),
            salary_usd: salary,
            remote_type: remote.to_string(),
            residence_iso3: iso3.to_string(),
        }
    }

    #[test]
    fn unique_values_are_sorted_per_dimension() {
        let ds = SalaryDataset::from_records(vec![
            record(2024, "senior", "Data Engineer", "M", 150_000.0, "remoto", "USA"),
            record(2022, "junior", "Data Analyst", "L", 60_000.0, "presencial", "ESP"),
            record(2024, "senior", "Data Analyst", "M", 90_000.0, "híbrido", "USA"),
        ]);

        let years: Vec<_> = ds.unique_values[&Dimension::WorkYear].iter().cloned().collect();
        assert_eq!(
            years,
            vec![CategoryValue::Integer(2022), CategoryValue::Integer(2024)]
        );
        let titles: Vec<String> = ds.unique_values[&Dimension::JobTitle]
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(titles, vec!["Data Analyst", "Data Engineer"]);
        assert_eq!(ds.unique_values[&Dimension::CompanySize].len(), 2);
    }

    #[test]
    fn empty_dataset_has_every_dimension_with_no_values() {
        let ds = SalaryDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for dim in Dimension::ALL {
            assert!(ds.unique_values[&dim].is_empty());
        }
    }

    #[test]
    fn category_in_matches_text_and_year() {
        let rec = record(2023, "senior", "ML Engineer", "S", 1.0, "remoto", "CAN");
        let years: BTreeSet<_> = [CategoryValue::Integer(2023)].into_iter().collect();
        let titles: BTreeSet<_> = [CategoryValue::Text("Data Scientist".into())]
            .into_iter()
            .collect();
        assert!(rec.category_in(Dimension::WorkYear, &years));
        assert!(!rec.category_in(Dimension::JobTitle, &titles));
    }

    #[test]
    fn integral_floats_convert_to_years() {
        assert_eq!(integral_f64(2023.0), Some(2023));
        assert_eq!(integral_f64(2023.5), None);
        assert_eq!(integral_f64(f64::NAN), None);
    }
}
