pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, directory::DirectoryConfig, Settings};

pub use adapters::directory::MastodonDirectory;
pub use core::{
    activity::ActivityFilter,
    etl::{EtlEngine, RunSummary},
    pipeline::RosterPipeline,
};
pub use domain::handle::Handle;
pub use utils::error::{Result, RosterError};
