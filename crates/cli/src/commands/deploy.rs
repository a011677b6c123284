use anyhow::{Context, Result};
use chrono::Utc;
use pagekit_core::{DeployBranch, DeploymentRecord, load_site, slugify};
use pagekit_deployer::{Deployer, vercel::VercelClient};
use pagekit_generator::generate_site;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const DEPLOY_LOG: &str = "deployments.json";

/// Global configuration for deployments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub vercel: VercelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VercelConfig {
    pub api_token: String,
}

/// Get path to global config file
fn config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    let config_dir = PathBuf::from(home).join(".pagekit");
    fs::create_dir_all(&config_dir)?;
    Ok(config_dir.join("config.toml"))
}

/// Load global config
fn load_config() -> Result<Option<GlobalConfig>> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&path).context("Failed to read config file")?;
    let config: GlobalConfig = toml::from_str(&contents).context("Failed to parse config file")?;
    Ok(Some(config))
}

/// Save global config
fn save_config(config: &GlobalConfig) -> Result<()> {
    let path = config_path()?;
    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&path, contents).context("Failed to write config file")?;
    println!("✅ Configuration saved to: {}", path.display());
    Ok(())
}

/// Helper to read user input
fn read_input(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Read the deployment log for a site directory, newest record last.
fn load_deploy_log(site_dir: &Path) -> Result<Vec<DeploymentRecord>> {
    let path = site_dir.join(DEPLOY_LOG);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(&path).context("Failed to read deployment log")?;
    serde_json::from_str(&contents).context("Failed to parse deployment log")
}

/// Append one record to the deployment log. The log is append-only;
/// existing entries are never rewritten.
fn append_deploy_log(site_dir: &Path, record: DeploymentRecord) -> Result<()> {
    let mut records = load_deploy_log(site_dir)?;
    records.push(record);
    let contents = serde_json::to_string_pretty(&records)?;
    fs::write(site_dir.join(DEPLOY_LOG), contents).context("Failed to write deployment log")?;
    Ok(())
}

/// Configure Vercel credentials
pub async fn configure() -> Result<()> {
    println!("🔧 Configuring Vercel deployment...\n");

    let existing = load_config()?;

    println!("📋 You'll need:");
    println!("   1. Vercel API Token");
    println!("      Create at: https://vercel.com/account/tokens");
    println!();

    let default_token = existing
        .as_ref()
        .map(|c| c.vercel.api_token.as_str())
        .unwrap_or("");
    let api_token = if !default_token.is_empty() {
        let input = read_input(&format!(
            "API Token [current: {}...]: ",
            &default_token[..10.min(default_token.len())]
        ))?;
        if input.is_empty() {
            default_token.to_string()
        } else {
            input
        }
    } else {
        read_input("API Token: ")?
    };

    if api_token.is_empty() {
        anyhow::bail!("API token is required");
    }

    save_config(&GlobalConfig {
        vercel: VercelConfig { api_token },
    })?;

    println!();
    println!("✅ Configuration complete!");
    println!("🚀 Ready to deploy! Try: pagekit deploy publish <site-path>");

    Ok(())
}

/// Publish site to Vercel
pub async fn publish(path: PathBuf, production: bool, force: bool) -> Result<()> {
    println!("🚀 Publishing site to Vercel...\n");

    let (manifest, pages) = load_site(&path).context("Failed to load site")?;
    let project_name = manifest
        .deploy_name
        .clone()
        .unwrap_or_else(|| slugify(&manifest.project.name));
    if project_name.is_empty() {
        anyhow::bail!(
            "Could not derive a project name from '{}'.\nSet deploy.project_name in site.toml",
            manifest.project.name
        );
    }

    let branch = if production {
        DeployBranch::Main
    } else {
        DeployBranch::Preview
    };

    println!("📋 Deployment Plan:");
    println!("   Site: {}", manifest.project.name);
    println!("   Project: {}", project_name);
    println!("   Branch: {}", branch);
    println!("   Target: Vercel");
    println!();

    // Generate in memory first; a site that fails validation never
    // reaches the provider.
    println!("📦 Generating site...");
    let files = generate_site(&manifest.project, &pages).context("Site generation failed")?;
    println!("   ✓ Generated {} files", files.len());
    println!();

    let config = load_config()?
        .context("No Vercel configuration found.\nRun 'pagekit deploy configure' first")?;

    if !force {
        let prompt = if production {
            "❓ Deploy to Vercel production? (y/N): "
        } else {
            "❓ Deploy preview to Vercel? (y/N): "
        };
        let input = read_input(prompt)?;
        if !input.eq_ignore_ascii_case("y") {
            println!("❌ Deployment cancelled");
            return Ok(());
        }
        println!();
    }

    println!("☁️  Deploying to Vercel...");
    let client = VercelClient::new(&config.vercel.api_token)?;
    let outcome = client.deploy(&project_name, &files, production).await?;
    println!("   ✓ Deployment submitted");
    println!();

    append_deploy_log(
        &path,
        DeploymentRecord {
            id: outcome.id.clone(),
            project: project_name.clone(),
            branch,
            status: outcome.status.clone(),
            url: outcome.url.clone(),
            created_at: Utc::now(),
        },
    )?;

    println!("✅ Deployed!");
    println!("   Id:     {}", outcome.id);
    println!("   Url:    {}", outcome.url);
    println!("   Status: {}", outcome.status);
    println!();
    println!("Check progress with: pagekit deploy status {}", path.display());

    Ok(())
}

/// Show status of the most recent deployment
pub async fn status(path: Option<PathBuf>) -> Result<()> {
    let site_dir = path.unwrap_or_else(|| PathBuf::from("."));

    let records = load_deploy_log(&site_dir)?;
    let Some(last) = records.last() else {
        println!("No deployments recorded in {}", site_dir.display());
        println!("Deploy first with: pagekit deploy publish {}", site_dir.display());
        return Ok(());
    };

    println!("📋 Last deployment:");
    println!("   Id:      {}", last.id);
    println!("   Project: {}", last.project);
    println!("   Branch:  {}", last.branch);
    println!("   Url:     {}", last.url);
    println!("   Created: {}", last.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!();

    let config = load_config()?
        .context("No Vercel configuration found.\nRun 'pagekit deploy configure' first")?;
    let client = VercelClient::new(&config.vercel.api_token)?;

    println!("🔍 Querying provider...");
    match client.get_status(&last.id).await? {
        Some(status) if status.ready => {
            println!("   ✅ {} - live at {}", status.status, last.url);
        }
        Some(status) => {
            println!("   ⏳ {}", status.status);
        }
        None => {
            println!("   ⚠ Deployment not found at provider (it may have been deleted)");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> DeploymentRecord {
        DeploymentRecord {
            id: id.to_string(),
            project: "acme".to_string(),
            branch: DeployBranch::Preview,
            status: "QUEUED".to_string(),
            url: format!("https://{}.vercel.app", id),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_deploy_log_appends_in_order() {
        let dir = std::env::temp_dir().join(format!("pagekit-log-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        assert!(load_deploy_log(&dir).unwrap().is_empty());

        append_deploy_log(&dir, record("dpl_1")).unwrap();
        append_deploy_log(&dir, record("dpl_2")).unwrap();

        let records = load_deploy_log(&dir).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "dpl_1");
        assert_eq!(records.last().unwrap().id, "dpl_2");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_deploy_log_roundtrips_branch() {
        let dir = std::env::temp_dir().join(format!("pagekit-log-br-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let mut rec = record("dpl_main");
        rec.branch = DeployBranch::Main;
        append_deploy_log(&dir, rec).unwrap();

        let records = load_deploy_log(&dir).unwrap();
        assert_eq!(records[0].branch, DeployBranch::Main);

        fs::remove_dir_all(&dir).unwrap();
    }
}
