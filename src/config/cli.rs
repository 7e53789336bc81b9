use super::toml_config::TomlConfig;
use super::{OpsConfig, Overrides, Target};
use crate::utils::error::Result;
use clap::Args;
use std::path::PathBuf;

/// Flags shared by every binary.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Target environment to run against
    #[arg(long, value_enum, default_value_t = Target::Local)]
    pub target: Target,

    /// Override the repository base URL of the selected target
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the IIIF annotation service URL of the selected target
    #[arg(long)]
    pub iiif_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl CommonArgs {
    pub fn resolve(&self) -> Result<OpsConfig> {
        self.resolve_with_admin(None)
    }

    pub fn resolve_with_admin(&self, admin_email: Option<String>) -> Result<OpsConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };

        OpsConfig::resolve(
            self.target,
            file,
            Overrides {
                base_url: self.base_url.clone(),
                iiif_url: self.iiif_url.clone(),
                timeout_seconds: self.timeout,
                admin_email,
            },
        )
    }
}
