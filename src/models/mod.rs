pub mod focus;
pub mod tag;
