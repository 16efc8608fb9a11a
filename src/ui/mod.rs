pub mod charts;
pub mod metrics;
pub mod panels;
pub mod table;
