//! `site.toml` parsing: project metadata, deployment settings and the
//! ordered page list. Each page points at a layout JSON file relative to
//! the site directory; an absent file means "no components yet".

use crate::error::{Error, Result};
use crate::layout::LayoutDocument;
use crate::types::{Page, Project};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw TOML structure; matches the site.toml file exactly.
#[derive(Debug, Deserialize)]
struct RawConfig {
    project: RawProject,
    #[serde(default)]
    deploy: Option<RawDeploy>,
    #[serde(default, rename = "page")]
    pages: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    name: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDeploy {
    /// Overrides the project name used at the hosting provider.
    project_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    title: String,
    slug: String,
    #[serde(default)]
    is_home: bool,
    /// Layout JSON file, relative to the site directory.
    layout: Option<String>,
}

/// Parsed site manifest before layout files are resolved.
#[derive(Debug, Clone)]
pub struct SiteManifest {
    pub project: Project,
    pub deploy_name: Option<String>,
    pub pages: Vec<ManifestPage>,
}

#[derive(Debug, Clone)]
pub struct ManifestPage {
    pub title: String,
    pub slug: String,
    pub is_home: bool,
    pub layout_path: Option<PathBuf>,
    pub order_index: usize,
}

/// Parse site.toml from a string (useful for testing).
pub fn parse_site_toml_str(content: &str) -> Result<SiteManifest> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.project.name.trim().is_empty() {
        return Err(Error::ConfigParse("project.name must not be empty".into()));
    }

    let pages: Result<Vec<ManifestPage>> = raw
        .pages
        .into_iter()
        .enumerate()
        .map(|(order_index, p)| {
            let layout_path = match p.layout {
                Some(path) => Some(validate_rel_path(&path, &format!("page.{}.layout", p.slug))?),
                None => None,
            };
            Ok(ManifestPage {
                title: p.title,
                slug: p.slug,
                is_home: p.is_home,
                layout_path,
                order_index,
            })
        })
        .collect();

    Ok(SiteManifest {
        project: Project {
            name: raw.project.name,
            description: raw.project.description,
        },
        deploy_name: raw.deploy.and_then(|d| d.project_name),
        pages: pages?,
    })
}

/// Parse site.toml from a file path.
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<SiteManifest> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Load a full site from a directory: site.toml plus every referenced
/// layout file. A listed-but-missing layout file loads as the empty
/// document, matching the "stored null means no components" rule.
pub fn load_site(dir: &Path) -> Result<(SiteManifest, Vec<Page>)> {
    let manifest_path = dir.join("site.toml");
    if !manifest_path.exists() {
        return Err(Error::NotFound(format!(
            "site.toml not found in {}",
            dir.display()
        )));
    }
    let manifest = parse_site_toml(&manifest_path)?;

    let pages: Result<Vec<Page>> = manifest
        .pages
        .iter()
        .map(|p| {
            let layout = match &p.layout_path {
                Some(rel) => {
                    let path = dir.join(rel);
                    if path.exists() {
                        let blob = fs::read_to_string(&path)?;
                        LayoutDocument::from_stored(Some(&blob))?
                    } else {
                        LayoutDocument::default()
                    }
                }
                None => LayoutDocument::default(),
            };
            Ok(Page {
                title: p.title.clone(),
                slug: p.slug.clone(),
                is_home: p.is_home,
                order_index: p.order_index,
                layout,
            })
        })
        .collect();

    Ok((manifest, pages?))
}

/// Validate and convert a path string to a relative PathBuf. Rejects
/// absolute paths and parent-directory references so a site.toml cannot
/// reach outside its own directory.
fn validate_rel_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    Ok(path.to_path_buf())
}
