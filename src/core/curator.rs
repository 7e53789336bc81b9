use crate::domain::ports::InvenioCli;
use crate::utils::error::Result;
use crate::utils::validation::validate_email;

pub const CURATOR_ROLE: &str = "curator";
pub const DEFAULT_TOKEN_NAME: &str = "Curator Token";

/// Creates curator accounts. Every step is safe to repeat.
pub struct CuratorProvisioner<C: InvenioCli> {
    cli: C,
    login_url: String,
}

impl<C: InvenioCli> CuratorProvisioner<C> {
    pub fn new(cli: C, base_url: &str) -> Self {
        tracing::info!("Curator user creator initialized");
        Self {
            cli,
            login_url: format!("{}/login", base_url.trim_end_matches('/')),
        }
    }

    pub fn validate_email(&self, email: &str) -> bool {
        match validate_email(email) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("{}", e);
                false
            }
        }
    }

    pub async fn create_user(&self, email: &str, password: &str) -> Result<bool> {
        tracing::info!("Creating user account for {}...", email);

        let out = self
            .cli
            .run(
                &["users", "create", email, "--password", password, "--active", "--confirm"],
                true,
            )
            .await?;

        if out.success {
            tracing::info!("✓ User {} created successfully", email);
            Ok(true)
        } else if out.mentions_any(&["already exists", "duplicate"]) {
            tracing::info!("✓ User {} already exists", email);
            Ok(true)
        } else {
            tracing::error!("✗ Failed to create user: {}", out.output);
            Ok(false)
        }
    }

    pub async fn assign_curator_role(&self, email: &str) -> Result<bool> {
        tracing::info!("Assigning curator role to {}...", email);

        let out = self
            .cli
            .run(&["roles", "add", email, CURATOR_ROLE], true)
            .await?;

        if out.success {
            tracing::info!("✓ Curator role assigned to {}", email);
            Ok(true)
        } else if out.mentions_any(&["already"]) {
            tracing::info!("✓ User {} already has curator role", email);
            Ok(true)
        } else {
            tracing::error!("✗ Failed to assign role: {}", out.output);
            Ok(false)
        }
    }

    /// Informational only; a missing user is logged, never fatal.
    pub async fn verify_user(&self, email: &str) -> Result<bool> {
        tracing::info!("Verifying user {}...", email);

        let out = self.cli.run(&["users", "list"], true).await?;
        let found = out.success && out.output.contains(email);
        if found {
            tracing::info!("✓ User {} found in system", email);
        } else {
            tracing::warn!("✗ User {} not found in user list", email);
        }
        Ok(found)
    }

    /// Issues a personal API token; returns the CLI's stdout (the token).
    pub async fn create_token(&self, email: &str, name: &str) -> Result<Option<String>> {
        tracing::info!("Creating API token '{}' for {}...", name, email);

        let out = self
            .cli
            .run(&["tokens", "create", "-n", name, "-u", email], true)
            .await?;

        if out.success {
            tracing::info!("✓ Token '{}' created for {}", name, email);
            Ok(Some(out.output))
        } else {
            tracing::error!("✗ Failed to create token: {}", out.output);
            Ok(None)
        }
    }

    pub async fn create_curator(&self, email: &str, password: &str) -> Result<bool> {
        tracing::info!("{}", "=".repeat(60));
        tracing::info!("Creating Curator User: {}", email);
        tracing::info!("{}", "=".repeat(60));

        if !self.validate_email(email) {
            return Ok(false);
        }

        if !self.create_user(email, password).await? {
            return Ok(false);
        }

        if !self.assign_curator_role(email).await? {
            return Ok(false);
        }

        self.verify_user(email).await?;

        tracing::info!("{}", "=".repeat(60));
        tracing::info!("✓ Curator user {} is ready!", email);
        tracing::info!("{}", "=".repeat(60));
        tracing::info!("Next steps:");
        tracing::info!("  1. User can login at: {}", self.login_url);
        tracing::info!("  2. User email: {}", email);
        tracing::info!("  3. User has '{}' role for API access", CURATOR_ROLE);
        tracing::info!(
            "  4. Generate API token: invenio tokens create -n '{}' -u {}",
            DEFAULT_TOKEN_NAME,
            email
        );

        Ok(true)
    }
}
