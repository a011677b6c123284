//! Deployment targets (Vercel; future: Netlify, static).
//!
//! The adapter owns the only error-shape translation in the system:
//! provider-specific error payloads become plain failures that preserve
//! the provider's own message for the caller. No retries happen here; a
//! failed deploy is reported once and the caller decides what to do.

pub mod vercel;

use async_trait::async_trait;
use pagekit_core::SiteFiles;

/// Result of submitting one deployment.
#[derive(Debug, Clone)]
pub struct DeploymentOutcome {
    pub id: String,
    pub url: String,
    pub status: String,
}

/// Point-in-time status of an existing deployment.
#[derive(Debug, Clone)]
pub struct DeploymentStatus {
    pub status: String,
    pub ready: bool,
}

#[async_trait]
pub trait Deployer {
    /// Submit a generated file set under `target_name`. The provider may
    /// auto-create the target on first deploy and reuse it afterwards.
    /// `production` promotes the deploy; otherwise it is a preview.
    async fn deploy(
        &self,
        target_name: &str,
        files: &SiteFiles,
        production: bool,
    ) -> anyhow::Result<DeploymentOutcome>;

    /// Re-query a deployment by id. `None` means the provider does not
    /// know the id (not found), distinct from a transport failure.
    async fn get_status(&self, deployment_id: &str) -> anyhow::Result<Option<DeploymentStatus>>;
}
