//! Compile-time configuration. There are no CLI flags or config files; the
//! only runtime knob is `RUST_LOG`, read by `env_logger`.

/// Remote CSV loaded at startup.
pub const DATASET_URL: &str =
    "https://github.com/SamCasman/inmercion-datos-alura-python-2025/blob/main/DatosAulaFinal.csv?raw=true";

/// Number of equal-width bins in the salary distribution.
pub const HISTOGRAM_BINS: usize = 30;

/// Number of roles shown in the top-paid chart.
pub const TOP_ROLES: usize = 10;

/// Role whose per-country mean salary feeds the country chart.
pub const HIGHLIGHT_ROLE: &str = "Data Scientist";

// Column headers in the source dataset.
pub const COL_WORK_YEAR: &str = "año_trabajo";
pub const COL_EXPERIENCE_LEVEL: &str = "nivel_experiencia";
pub const COL_JOB_TITLE: &str = "puesto";
pub const COL_COMPANY_SIZE: &str = "tamaño_empresa";
pub const COL_SALARY_USD: &str = "salario_en_usd";
pub const COL_REMOTE_TYPE: &str = "remoto";
pub const COL_RESIDENCE_ISO3: &str = "residencia_iso3";

/// Every column a dataset must provide, in table order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_WORK_YEAR,
    COL_EXPERIENCE_LEVEL,
    COL_JOB_TITLE,
    COL_COMPANY_SIZE,
    COL_SALARY_USD,
    COL_REMOTE_TYPE,
    COL_RESIDENCE_ISO3,
];

pub const WINDOW_SIZE: [f32; 2] = [1400.0, 900.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [800.0, 500.0];
