pub mod clean;
pub mod config;
pub mod core;
pub mod domain;
pub mod scrape;
pub mod utils;

pub use config::{CliConfig, CrawlConfig, DomainTarget, LocalStorage};
pub use core::{etl::EtlEngine, pipeline::CrawlPipeline};
pub use utils::error::{EtlError, Result};
