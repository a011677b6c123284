use anyhow::{Context, Result};
use pagekit_core::load_site;
use std::path::PathBuf;

/// Validate site configuration and every page layout.
pub async fn run(path: PathBuf) -> Result<()> {
    println!("🔍 Validating site: {}", path.display());

    if !path.exists() {
        anyhow::bail!(
            "Site directory does not exist: {}\nRun 'pagekit init {}' first",
            path.display(),
            path.display()
        );
    }

    let (manifest, pages) = load_site(&path).context("Failed to load site")?;

    println!("✓ Loaded: {}", manifest.project.name);
    println!("  Pages: {}", pages.len());
    println!();

    let report = pagekit_validator::validate(&manifest.project, &pages);

    for finding in report.findings() {
        println!("   {}", finding);
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();

    println!();
    if errors > 0 {
        anyhow::bail!("Validation failed: {} error(s), {} warning(s)", errors, warnings);
    }
    if warnings > 0 {
        println!("⚠ Valid with {} warning(s)", warnings);
    } else {
        println!("✅ Site is valid");
    }

    Ok(())
}
