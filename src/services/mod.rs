pub mod focus;
pub mod metrics;
pub mod tags;
