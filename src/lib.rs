pub mod adapters;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

pub use core::{etl::EtlEngine, pipeline::ElectionPipeline};
pub use utils::error::{Result, ScrapeError};
