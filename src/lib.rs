pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CommonArgs;

pub use crate::adapters::{http::RepositoryClient, invenio_cli::ProcessInvenioCli, storage::LocalStorage};
pub use crate::config::{OpsConfig, Target};
pub use crate::core::{
    curator::CuratorProvisioner, rag::RagFeasibility, roles::RoleSetup,
    search_tests::SearchTestRunner,
};
pub use utils::error::{OpsError, Result};
