//! Writes a synthetic salary dataset as `sample_salaries.csv` and
//! `sample_salaries.parquet` so the dashboard can be used offline
//! (File → Open…).

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const ROWS: usize = 2000;

const YEARS: [i64; 4] = [2021, 2022, 2023, 2024];
const LEVELS: [(&str, f64); 4] = [
    ("junior", 0.6),
    ("pleno", 0.85),
    ("senior", 1.15),
    ("ejecutivo", 1.6),
];
const TITLES: [(&str, f64); 8] = [
    ("Data Scientist", 145_000.0),
    ("Data Engineer", 140_000.0),
    ("Data Analyst", 95_000.0),
    ("Machine Learning Engineer", 165_000.0),
    ("Analytics Engineer", 130_000.0),
    ("Research Scientist", 170_000.0),
    ("BI Developer", 90_000.0),
    ("Data Architect", 160_000.0),
];
const SIZES: [&str; 3] = ["pequeña", "media", "grande"];
const REMOTE: [&str; 3] = ["remoto", "híbrido", "presencial"];
const COUNTRIES: [(&str, f64); 8] = [
    ("USA", 1.0),
    ("CAN", 0.85),
    ("GBR", 0.75),
    ("DEU", 0.7),
    ("ESP", 0.5),
    ("BRA", 0.35),
    ("MEX", 0.35),
    ("IND", 0.25),
];

/// splitmix64; deterministic so the sample is reproducible.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Columns {
    years: Vec<i64>,
    levels: Vec<&'static str>,
    titles: Vec<&'static str>,
    sizes: Vec<&'static str>,
    salaries: Vec<f64>,
    remote: Vec<&'static str>,
    countries: Vec<&'static str>,
}

fn generate(rows: usize, rng: &mut Rng) -> Columns {
    let mut cols = Columns {
        years: Vec::with_capacity(rows),
        levels: Vec::with_capacity(rows),
        titles: Vec::with_capacity(rows),
        sizes: Vec::with_capacity(rows),
        salaries: Vec::with_capacity(rows),
        remote: Vec::with_capacity(rows),
        countries: Vec::with_capacity(rows),
    };

    for _ in 0..rows {
        let year = *rng.pick(&YEARS);
        let &(level, level_factor) = rng.pick(&LEVELS);
        let &(title, base) = rng.pick(&TITLES);
        let &(country, country_factor) = rng.pick(&COUNTRIES);
        let growth = 1.0 + 0.04 * (year - YEARS[0]) as f64;
        let noise = 0.75 + 0.5 * rng.unit();

        cols.years.push(year);
        cols.levels.push(level);
        cols.titles.push(title);
        cols.sizes.push(*rng.pick(&SIZES));
        cols.salaries.push((base * level_factor * country_factor * growth * noise).round());
        cols.remote.push(*rng.pick(&REMOTE));
        cols.countries.push(country);
    }
    cols
}

fn write_csv(cols: &Columns, path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "año_trabajo",
        "nivel_experiencia",
        "puesto",
        "tamaño_empresa",
        "salario_en_usd",
        "remoto",
        "residencia_iso3",
    ])?;
    for i in 0..cols.years.len() {
        writer.write_record([
            cols.years[i].to_string().as_str(),
            cols.levels[i],
            cols.titles[i],
            cols.sizes[i],
            cols.salaries[i].to_string().as_str(),
            cols.remote[i],
            cols.countries[i],
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(cols: &Columns, path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("año_trabajo", DataType::Int64, false),
        Field::new("nivel_experiencia", DataType::Utf8, false),
        Field::new("puesto", DataType::Utf8, false),
        Field::new("tamaño_empresa", DataType::Utf8, false),
        Field::new("salario_en_usd", DataType::Float64, false),
        Field::new("remoto", DataType::Utf8, false),
        Field::new("residencia_iso3", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(cols.years.clone())),
        Arc::new(StringArray::from(cols.levels.clone())),
        Arc::new(StringArray::from(cols.titles.clone())),
        Arc::new(StringArray::from(cols.sizes.clone())),
        Arc::new(Float64Array::from(cols.salaries.clone())),
        Arc::new(StringArray::from(cols.remote.clone())),
        Arc::new(StringArray::from(cols.countries.clone())),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = Rng(42);
    let cols = generate(ROWS, &mut rng);

    write_csv(&cols, "sample_salaries.csv")?;
    write_parquet(&cols, "sample_salaries.parquet")?;

    log::info!("Wrote {ROWS} rows to sample_salaries.csv and sample_salaries.parquet");
    println!("Wrote {ROWS} synthetic salary records to sample_salaries.{{csv,parquet}}");
    Ok(())
}
