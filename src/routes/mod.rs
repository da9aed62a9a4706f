pub mod focus;
pub mod health;
pub mod metrics;
pub mod tags;
