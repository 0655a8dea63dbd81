pub mod best_xi;
pub mod comparison;
pub mod config;
pub mod fixtures;
pub mod formation;
pub mod insights;
pub mod league;
pub mod model;
pub mod scoring;
pub mod state;
pub mod stats;
pub mod telemetry;
