use crate::domain::model::CommandOutput;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn iiif_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn accept_invalid_certs(&self) -> bool;
    fn invenio_command(&self) -> &[String];
}

/// The repository's management CLI (`invenio ...`).
#[async_trait]
pub trait InvenioCli: Send + Sync {
    /// Runs one subcommand. With `ignore_errors` a non-zero exit comes back as
    /// a failed [`CommandOutput`]; otherwise it is an error.
    async fn run(&self, args: &[&str], ignore_errors: bool) -> Result<CommandOutput>;
}
