// Domain layer: core models and the ports (interfaces) the pipeline is built against.

pub mod model;
pub mod ports;

pub use model::{is_valid_location, split_location, Course, EnrichmentResult, Institution, OutputRow};
