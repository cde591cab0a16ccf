pub mod params;
pub mod queue;
pub mod task;
