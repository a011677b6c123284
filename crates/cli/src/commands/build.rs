use anyhow::{Context, Result};
use pagekit_core::load_site;
use pagekit_generator::generate_site;
use std::fs;
use std::path::{Path, PathBuf};

/// Build the deployable site into an output directory.
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Building site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

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

    let files = generate_site(&manifest.project, &pages).context("Site generation failed")?;

    println!("📄 Writing {} files...", files.len());
    write_files(&output, &files)?;

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To build the app for deployment:");
    println!("   cd {} && npm install && npm run build", output.display());
    println!();

    Ok(())
}

/// Write a generated file mapping to disk, creating parent directories
/// as needed. Paths in the mapping are always relative.
pub fn write_files(output: &Path, files: &pagekit_core::SiteFiles) -> Result<()> {
    for (rel_path, content) in files {
        let dest = output.join(rel_path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&dest, content)
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        println!("   ✓ {}", rel_path);
    }
    Ok(())
}
