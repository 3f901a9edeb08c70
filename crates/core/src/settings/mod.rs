//! Settings module - configuration for the analytics computations.

mod settings_model;

pub use settings_model::AnalyticsSettings;
