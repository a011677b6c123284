use anyhow::{Context, Result};
use pagekit_core::PageTemplate;
use std::fs;
use std::path::PathBuf;

/// Escape a string for safe inclusion in a TOML basic string.
///
/// Manual escaping is used instead of toml crate serialization because
/// the template carries comments and specific formatting that a full
/// serializer would not preserve.
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Initialize a new site directory with a home page built from the
/// chosen template.
pub async fn run(path: PathBuf, template: PageTemplate) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let site_toml_path = path.join("site.toml");
    if site_toml_path.exists() {
        anyhow::bail!(
            "site.toml already exists at {}\nHint: Delete it first or use a different directory",
            site_toml_path.display()
        );
    }

    fs::create_dir_all(path.join("layouts")).context("Failed to create layouts directory")?;

    // The directory name doubles as the initial project name.
    let project_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "My Site".to_string());

    let layout = template.layout();
    let layout_json = serde_json::to_string_pretty(layout.components())
        .context("Failed to serialize template layout")?;
    fs::write(path.join("layouts/home.json"), layout_json)
        .context("Failed to write home layout")?;

    let site_toml = format!(
        "# Generated by pagekit init\n\
         # Edit this file to customize your site\n\
         \n\
         [project]\n\
         name = \"{name}\"\n\
         description = \"Description of this site\"  # TODO: Add description\n\
         \n\
         [deploy]\n\
         # Optional: overrides the project name used at the hosting provider\n\
         # project_name = \"my-site\"\n\
         \n\
         [[page]]\n\
         title = \"Home\"\n\
         slug = \"home\"\n\
         is_home = true\n\
         layout = \"layouts/home.json\"\n",
        name = toml_escape_string(&project_name)
    );

    // Catch escaping bugs before they reach the user.
    toml::from_str::<toml::Value>(&site_toml)
        .context("Generated TOML is invalid - this is a bug in the template generator")?;
    fs::write(&site_toml_path, site_toml).context("Failed to write site.toml")?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml            ← Edit this to set the project name, add pages");
    println!("  └── layouts/");
    println!("      └── home.json        ← {} layout", template.name());

    println!("\nNext steps:");
    println!("  1. Edit site.toml (set project name and description)");
    println!("  2. Edit layouts/home.json to customize components");
    println!("  3. Preview: pagekit preview {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string(r#"Test "Quote""#), r#"Test \"Quote\""#);
        assert_eq!(toml_escape_string(r"Test\Back"), r"Test\\Back");
        assert_eq!(toml_escape_string("Test\nNewline"), r"Test\nNewline");
        assert_eq!(toml_escape_string("Normal String"), "Normal String");
    }

    #[tokio::test]
    async fn test_init_creates_site_structure() {
        let dir = std::env::temp_dir().join(format!("pagekit-init-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        run(dir.clone(), PageTemplate::Landing).await.unwrap();

        assert!(dir.join("site.toml").exists());
        assert!(dir.join("layouts/home.json").exists());

        let manifest = pagekit_core::config::parse_site_toml(dir.join("site.toml")).unwrap();
        assert_eq!(manifest.pages.len(), 1);
        assert!(manifest.pages[0].is_home);

        let (_, pages) = pagekit_core::load_site(&dir).unwrap();
        assert_eq!(pages[0].layout.len(), 5);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_init_refuses_existing_site() {
        let dir = std::env::temp_dir().join(format!("pagekit-init-dup-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("site.toml"), "[project]\nname = \"x\"\n").unwrap();

        let result = run(dir.clone(), PageTemplate::Landing).await;
        assert!(result.is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
