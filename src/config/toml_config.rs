use crate::domain::model::SearchCase;
use crate::utils::error::{OpsError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional `--config` file. Every section may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub endpoints: Option<EndpointsConfig>,
    pub http: Option<HttpConfig>,
    pub invenio: Option<InvenioConfig>,
    pub search: Option<SearchConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsConfig {
    pub base_url: Option<String>,
    pub iiif_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvenioConfig {
    pub command: Option<Vec<String>>,
    pub admin_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub page_size: Option<u32>,
    pub pagination_query: Option<String>,
    pub malformed_query: Option<String>,
    #[serde(default)]
    pub cases: Vec<SearchCase>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OpsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OpsError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoints) = &self.endpoints {
            if let Some(url) = &endpoints.base_url {
                validate_url("endpoints.base_url", url)?;
            }
            if let Some(url) = &endpoints.iiif_url {
                validate_url("endpoints.iiif_url", url)?;
            }
        }

        if let Some(timeout) = self.http.as_ref().and_then(|h| h.timeout_seconds) {
            validate_range("http.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(command) = self.invenio.as_ref().and_then(|i| i.command.as_ref()) {
            match command.first() {
                Some(program) => validate_non_empty_string("invenio.command", program)?,
                None => {
                    return Err(OpsError::ConfigValidationError {
                        field: "invenio.command".to_string(),
                        message: "command must name at least the program to run".to_string(),
                    })
                }
            }
        }

        if let Some(search) = &self.search {
            if let Some(size) = search.page_size {
                validate_range("search.page_size", size, 1, 100)?;
            }
            for case in &search.cases {
                validate_non_empty_string("search.cases.name", &case.name)?;
                validate_non_empty_string("search.cases.query", &case.query)?;
            }
        }

        Ok(())
    }
}
