pub mod priority;
pub mod snapshot;
