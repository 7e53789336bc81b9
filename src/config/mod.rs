#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_email, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@turath-project.com";

/// Deployment the scripts talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Local,
    Prod,
}

impl Target {
    pub fn base_url(self) -> &'static str {
        match self {
            Target::Local => "https://127.0.0.1:5000",
            Target::Prod => "https://invenio.turath-project.com",
        }
    }

    /// Prod is assumed to expose the IIIF search service on 5001 of the same
    /// host; an nginx proxy in front of it may need `--iiif-url` instead.
    pub fn iiif_url(self) -> &'static str {
        match self {
            Target::Local => "https://127.0.0.1:5001",
            Target::Prod => "https://invenio.turath-project.com:5001",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Target::Local => "local",
            Target::Prod => "prod",
        }
    }
}

/// Fully resolved settings: CLI flags over file values over defaults.
#[derive(Debug, Clone)]
pub struct OpsConfig {
    pub target: Target,
    pub base_url: String,
    pub iiif_url: String,
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
    pub invenio_command: Vec<String>,
    pub admin_email: String,
    pub file: TomlConfig,
}

/// Command-line values that take part in resolution.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub iiif_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub admin_email: Option<String>,
}

impl OpsConfig {
    pub fn for_target(target: Target) -> Self {
        Self {
            target,
            base_url: target.base_url().to_string(),
            iiif_url: target.iiif_url().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: true,
            invenio_command: vec!["pipenv".into(), "run".into(), "invenio".into()],
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            file: TomlConfig::default(),
        }
    }

    pub fn resolve(target: Target, file: Option<TomlConfig>, overrides: Overrides) -> Result<Self> {
        let mut config = Self::for_target(target);

        if let Some(file) = file {
            file.validate()?;

            if let Some(endpoints) = &file.endpoints {
                if let Some(url) = &endpoints.base_url {
                    config.base_url = url.clone();
                }
                if let Some(url) = &endpoints.iiif_url {
                    config.iiif_url = url.clone();
                }
            }
            if let Some(http) = &file.http {
                if let Some(secs) = http.timeout_seconds {
                    config.timeout = Duration::from_secs(secs);
                }
                if let Some(accept) = http.accept_invalid_certs {
                    config.accept_invalid_certs = accept;
                }
            }
            if let Some(invenio) = &file.invenio {
                if let Some(command) = &invenio.command {
                    config.invenio_command = command.clone();
                }
                if let Some(email) = &invenio.admin_email {
                    config.admin_email = email.clone();
                }
            }
            config.file = file;
        }

        if let Some(url) = overrides.base_url {
            config.base_url = url;
        }
        if let Some(url) = overrides.iiif_url {
            config.iiif_url = url;
        }
        if let Some(secs) = overrides.timeout_seconds {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(email) = overrides.admin_email {
            config.admin_email = email;
        }

        config.base_url = config.base_url.trim_end_matches('/').to_string();
        config.iiif_url = config.iiif_url.trim_end_matches('/').to_string();

        config.validate()?;
        Ok(config)
    }
}

impl Validate for OpsConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_url("iiif_url", &self.iiif_url)?;
        validate_range("timeout_seconds", self.timeout.as_secs(), 1, 300)?;
        validate_email(&self.admin_email)?;
        Ok(())
    }
}

impl ConfigProvider for OpsConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn iiif_url(&self) -> &str {
        &self.iiif_url
    }

    fn request_timeout(&self) -> Duration {
        self.timeout
    }

    fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }

    fn invenio_command(&self) -> &[String] {
        &self.invenio_command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_map_to_known_endpoints() {
        let local = OpsConfig::for_target(Target::Local);
        assert_eq!(local.base_url, "https://127.0.0.1:5000");
        assert_eq!(local.iiif_url, "https://127.0.0.1:5001");

        let prod = OpsConfig::for_target(Target::Prod);
        assert_eq!(prod.base_url, "https://invenio.turath-project.com");
        assert_eq!(prod.iiif_url, "https://invenio.turath-project.com:5001");
        assert_eq!(prod.invenio_command, vec!["pipenv", "run", "invenio"]);
    }

    #[test]
    fn flags_win_over_file_values() {
        let file = TomlConfig::from_toml_str(
            r#"
[endpoints]
base_url = "https://from-file.example.org"
iiif_url = "https://from-file.example.org:5001"

[http]
timeout_seconds = 20
"#,
        )
        .unwrap();

        let overrides = Overrides {
            base_url: Some("http://127.0.0.1:8080/".to_string()),
            ..Default::default()
        };
        let config = OpsConfig::resolve(Target::Prod, Some(file), overrides).unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.iiif_url, "https://from-file.example.org:5001");
        assert_eq!(config.timeout, Duration::from_secs(20));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let overrides = Overrides {
            iiif_url: Some("ftp://nope".to_string()),
            ..Default::default()
        };
        assert!(OpsConfig::resolve(Target::Local, None, overrides).is_err());
    }
}
