pub mod actor;
pub mod limit;
