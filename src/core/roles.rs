use crate::domain::ports::InvenioCli;
use crate::utils::error::Result;

pub const ADMIN_ROLE: &str = "admin";
pub const ADMIN_PERMISSIONS: [&str; 2] = ["superuser-access", "administration-access"];

/// Ensures the admin and curator roles and their permission bindings.
pub struct RoleSetup<C: InvenioCli> {
    cli: C,
    admin_email: String,
}

impl<C: InvenioCli> RoleSetup<C> {
    pub fn new(cli: C, admin_email: impl Into<String>) -> Self {
        tracing::info!("Production role setup initialized");
        Self {
            cli,
            admin_email: admin_email.into(),
        }
    }

    pub async fn create_role(&self, role_name: &str, description: &str) -> Result<bool> {
        tracing::info!("Ensuring '{}' role exists...", role_name);

        let out = self
            .cli
            .run(&["roles", "create", role_name, "-d", description], true)
            .await?;

        if out.success {
            tracing::info!("✓ Role '{}' created successfully", role_name);
            Ok(true)
        } else if out.mentions_any(&["already exists", "duplicate"]) {
            tracing::info!("✓ Role '{}' already exists", role_name);
            Ok(true)
        } else {
            tracing::warn!("✗ Failed to create role '{}': {}", role_name, out.output);
            Ok(false)
        }
    }

    pub async fn assign_permission_to_role(&self, permission: &str, role: &str) -> Result<bool> {
        tracing::info!("Assigning '{}' to role '{}'...", permission, role);

        let out = self
            .cli
            .run(&["access", "allow", permission, "role", role], true)
            .await?;

        if out.success {
            tracing::info!("✓ Permission '{}' granted to role '{}'", permission, role);
            Ok(true)
        } else if out.mentions_any(&["already exists", "already granted"]) {
            tracing::info!(
                "✓ Permission '{}' already granted to role '{}'",
                permission,
                role
            );
            Ok(true)
        } else {
            tracing::warn!("✗ Failed to grant permission: {}", out.output);
            Ok(false)
        }
    }

    pub async fn assign_user_to_role(&self, email: &str, role: &str) -> Result<bool> {
        tracing::info!("Adding user '{}' to role '{}'...", email, role);

        let out = self.cli.run(&["roles", "add", email, role], true).await?;

        if out.success {
            tracing::info!("✓ User '{}' added to role '{}'", email, role);
            Ok(true)
        } else if out.mentions_any(&["already"]) {
            tracing::info!("✓ User '{}' already in role '{}'", email, role);
            Ok(true)
        } else {
            tracing::warn!("✗ Failed to add user to role: {}", out.output);
            Ok(false)
        }
    }

    pub async fn verify_user_exists(&self, email: &str) -> Result<bool> {
        tracing::info!("Verifying user '{}' exists...", email);

        let out = self.cli.run(&["users", "list"], true).await?;
        if out.success && out.output.contains(email) {
            tracing::info!("✓ User '{}' exists", email);
            Ok(true)
        } else {
            tracing::warn!("✗ User '{}' not found", email);
            Ok(false)
        }
    }

    /// Fails only when the role itself cannot be created; permission and
    /// membership problems are warnings.
    pub async fn setup_admin_role(&self) -> Result<bool> {
        tracing::info!("{}", "=".repeat(60));
        tracing::info!("Setting up ADMIN role...");
        tracing::info!("{}", "=".repeat(60));

        if !self.create_role(ADMIN_ROLE, "Administrator role").await? {
            return Ok(false);
        }

        for permission in ADMIN_PERMISSIONS {
            if !self.assign_permission_to_role(permission, ADMIN_ROLE).await? {
                tracing::warn!("Failed to assign {}, continuing...", permission);
            }
        }

        if self.verify_user_exists(&self.admin_email).await? {
            self.assign_user_to_role(&self.admin_email, ADMIN_ROLE)
                .await?;
        } else {
            tracing::warn!(
                "Admin user {} does not exist - manual creation needed",
                self.admin_email
            );
        }

        tracing::info!("✓ Admin role setup complete");
        Ok(true)
    }

    pub async fn setup_curator_role(&self) -> Result<bool> {
        tracing::info!("{}", "=".repeat(60));
        tracing::info!("Setting up CURATOR role...");
        tracing::info!("{}", "=".repeat(60));

        if !self
            .create_role(super::curator::CURATOR_ROLE, "Content curator role")
            .await?
        {
            return Ok(false);
        }

        // curators act through record ownership and community roles
        tracing::info!("✓ Curator role created (permissions via record ownership)");
        tracing::info!("✓ Curator role setup complete");
        Ok(true)
    }

    /// Prints the role list and admin permissions to stdout when available.
    pub async fn generate_report(&self) -> Result<()> {
        tracing::info!("{}", "=".repeat(60));
        tracing::info!("VERIFICATION REPORT");
        tracing::info!("{}", "=".repeat(60));

        tracing::info!("--- Roles in System ---");
        let roles = self.cli.run(&["roles", "list"], true).await?;
        if roles.success {
            println!("{}", roles.output);
        }

        tracing::info!("--- Admin Role Permissions ---");
        let access = self
            .cli
            .run(&["access", "show", "role", ADMIN_ROLE], true)
            .await?;
        if access.success {
            println!("{}", access.output);
        } else {
            tracing::info!("(Use 'invenio access show role admin' to view)");
        }

        tracing::info!("{}", "=".repeat(60));
        tracing::info!("Setup complete! Roles are ready for use.");
        tracing::info!("{}", "=".repeat(60));
        Ok(())
    }

    pub async fn setup(&self) -> Result<bool> {
        tracing::info!("Starting production role setup...");
        tracing::info!(
            "Environment: {}",
            std::env::var("INVENIO_INSTANCE_PATH").unwrap_or_else(|_| "default".to_string())
        );

        if !self.setup_admin_role().await? {
            tracing::error!("Admin role setup failed");
            return Ok(false);
        }

        if !self.setup_curator_role().await? {
            tracing::error!("Curator role setup failed");
            return Ok(false);
        }

        self.generate_report().await?;

        tracing::info!("✓ Production role setup completed successfully");
        Ok(true)
    }
}
