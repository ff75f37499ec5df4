pub mod configuration;
pub mod data_processing;
pub mod domain;
pub mod numerical;
pub mod predict;
pub mod systems;
pub mod telemetry;
