//! Vercel API client: project upsert-by-name, deployment submission with
//! inline file contents, and deployment status lookup.

use crate::{DeploymentOutcome, DeploymentStatus, Deployer};
use anyhow::{Context, Result};
use async_trait::async_trait;
use pagekit_core::SiteFiles;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://api.vercel.com";

/// Build settings sent with every deployment; must match the manifest the
/// generator emits.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectSettings {
    framework: &'static str,
    install_command: &'static str,
    build_command: &'static str,
    output_directory: &'static str,
}

impl ProjectSettings {
    fn vite() -> Self {
        ProjectSettings {
            framework: "vite",
            install_command: "npm install",
            build_command: "npm run build",
            output_directory: "dist",
        }
    }
}

#[derive(Debug, Serialize)]
struct DeployFile<'a> {
    file: &'a str,
    /// Plain UTF-8 text; the API rejects base64 here.
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeployRequest<'a> {
    name: &'a str,
    files: Vec<DeployFile<'a>>,
    project_settings: ProjectSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'static str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeployResponse {
    id: String,
    url: Option<String>,
    ready_state: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateProjectRequest<'a> {
    name: &'a str,
    framework: &'static str,
}

/// Extract the human-readable message from a Vercel error payload,
/// falling back to the raw body when it is not the expected shape.
fn provider_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
            .or_else(|| value.get("message").and_then(|m| m.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}

pub struct VercelClient {
    client: reqwest::Client,
}

impl VercelClient {
    pub fn new(api_token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_token))
                .context("Invalid API token")?,
        );
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(VercelClient { client })
    }

    /// Upsert the target project by name: touch it if it exists, create
    /// it on 404. Deploying twice to the same name reuses the project.
    async fn ensure_project(&self, project_name: &str) -> Result<()> {
        let url = format!("{}/v9/projects/{}", API_BASE, project_name);
        let response = self
            .client
            .patch(&url)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                let request = CreateProjectRequest {
                    name: project_name,
                    framework: "vite",
                };
                let response = self
                    .client
                    .post(format!("{}/v9/projects", API_BASE))
                    .json(&request)
                    .send()
                    .await?;
                if !response.status().is_success() {
                    let body = response.text().await?;
                    anyhow::bail!("Vercel project create failed: {}", provider_message(&body));
                }
                Ok(())
            }
            status if status.is_success() => Ok(()),
            _ => {
                let body = response.text().await?;
                anyhow::bail!("Vercel project lookup failed: {}", provider_message(&body));
            }
        }
    }
}

#[async_trait]
impl Deployer for VercelClient {
    async fn deploy(
        &self,
        target_name: &str,
        files: &SiteFiles,
        production: bool,
    ) -> Result<DeploymentOutcome> {
        self.ensure_project(target_name).await?;

        let request = DeployRequest {
            name: target_name,
            files: files
                .iter()
                .map(|(path, content)| DeployFile {
                    file: path,
                    data: content,
                })
                .collect(),
            project_settings: ProjectSettings::vite(),
            target: production.then_some("production"),
        };

        let response = self
            .client
            .post(format!("{}/v13/deployments", API_BASE))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            anyhow::bail!("Vercel deploy failed ({}): {}", status, provider_message(&body));
        }

        let deploy: DeployResponse =
            serde_json::from_str(&body).context("Unexpected deploy response shape")?;
        let url = match deploy.url {
            Some(host) => format!("https://{}", host),
            None => format!("https://{}.vercel.app", target_name),
        };
        Ok(DeploymentOutcome {
            id: deploy.id,
            url,
            status: deploy.ready_state.unwrap_or_else(|| "QUEUED".to_string()),
        })
    }

    async fn get_status(&self, deployment_id: &str) -> Result<Option<DeploymentStatus>> {
        let response = self
            .client
            .get(format!("{}/v13/deployments/{}", API_BASE, deployment_id))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            anyhow::bail!("Vercel status lookup failed: {}", provider_message(&body));
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct StatusResponse {
            ready_state: Option<String>,
        }
        let parsed: StatusResponse =
            serde_json::from_str(&body).context("Unexpected status response shape")?;
        let state = parsed.ready_state.unwrap_or_else(|| "UNKNOWN".to_string());
        let ready = state == "READY";
        Ok(Some(DeploymentStatus {
            status: state,
            ready,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_nested_error() {
        let body = r#"{"error":{"code":"forbidden","message":"Token is invalid"}}"#;
        assert_eq!(provider_message(body), "Token is invalid");
    }

    #[test]
    fn test_provider_message_flat_message() {
        let body = r#"{"message":"Rate limited"}"#;
        assert_eq!(provider_message(body), "Rate limited");
    }

    #[test]
    fn test_provider_message_falls_back_to_raw_body() {
        assert_eq!(provider_message("gateway timeout"), "gateway timeout");
        assert_eq!(provider_message(r#"{"weird":true}"#), r#"{"weird":true}"#);
    }

    #[test]
    fn test_deploy_request_shape() {
        let mut files = SiteFiles::new();
        files.insert("index.html".into(), "<html></html>".into());
        let request = DeployRequest {
            name: "acme",
            files: files
                .iter()
                .map(|(path, content)| DeployFile {
                    file: path,
                    data: content,
                })
                .collect(),
            project_settings: ProjectSettings::vite(),
            target: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["name"], "acme");
        assert_eq!(json["files"][0]["file"], "index.html");
        assert_eq!(json["projectSettings"]["framework"], "vite");
        assert_eq!(json["projectSettings"]["outputDirectory"], "dist");
        // Preview deploys omit the target field entirely.
        assert!(json.get("target").is_none());
    }

    #[test]
    fn test_deploy_request_production_target() {
        let request = DeployRequest {
            name: "acme",
            files: vec![],
            project_settings: ProjectSettings::vite(),
            target: Some("production"),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["target"], "production");
    }
}
