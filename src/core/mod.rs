pub mod coerce;
pub mod format;
pub mod kpi;
pub mod timeseries;
