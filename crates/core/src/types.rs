use crate::layout::LayoutDocument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generated site output: relative file path to file content. A sorted map
/// keeps iteration order deterministic across runs.
pub type SiteFiles = BTreeMap<String, String>;

/// Project metadata as the generator sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One page of a project. `slug` determines the route path: the home page
/// maps to `/`, every other page to `/<slug>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub title: String,
    pub slug: String,
    pub is_home: bool,
    pub order_index: usize,
    pub layout: LayoutDocument,
}

impl Page {
    pub fn route(&self) -> String {
        if self.is_home {
            "/".to_string()
        } else {
            format!("/{}", self.slug)
        }
    }

    /// Code-safe identifier derived from the slug: alphanumeric runs are
    /// kept and capitalized, everything else is a separator. A leading
    /// digit gets a `Page` prefix so the result is a valid module name.
    pub fn module_ident(&self) -> String {
        let mut ident = String::new();
        let mut start_of_word = true;
        for c in self.slug.chars() {
            if c.is_ascii_alphanumeric() {
                if start_of_word {
                    ident.extend(c.to_uppercase());
                } else {
                    ident.push(c);
                }
                start_of_word = false;
            } else {
                start_of_word = true;
            }
        }
        if ident.is_empty() {
            ident.push_str("Page");
        } else if ident.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            ident = format!("Page{}", ident);
        }
        ident
    }
}

/// URL-safe slug from a display name: lowercase alphanumeric runs joined
/// by single hyphens, everything else dropped.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Deployment target branch: preview deploys get a throwaway URL,
/// main deploys are the published site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployBranch {
    Preview,
    Main,
}

impl std::fmt::Display for DeployBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeployBranch::Preview => f.write_str("preview"),
            DeployBranch::Main => f.write_str("main"),
        }
    }
}

/// One entry in the append-only deployment log. Never mutated after
/// creation; current status comes from re-querying the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// The provider's deployment id.
    pub id: String,
    /// Target project name at the provider.
    pub project: String,
    pub branch: DeployBranch,
    pub status: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(slug: &str, is_home: bool) -> Page {
        Page {
            title: slug.to_string(),
            slug: slug.to_string(),
            is_home,
            order_index: 0,
            layout: LayoutDocument::default(),
        }
    }

    #[test]
    fn test_route_home_and_slug() {
        assert_eq!(page("home", true).route(), "/");
        assert_eq!(page("about-us", false).route(), "/about-us");
    }

    #[test]
    fn test_module_ident_capitalizes_segments() {
        assert_eq!(page("home", false).module_ident(), "Home");
        assert_eq!(page("about-us", false).module_ident(), "AboutUs");
        assert_eq!(page("faq2024", false).module_ident(), "Faq2024");
    }

    #[test]
    fn test_module_ident_leading_digit_prefixed() {
        assert_eq!(page("2024-recap", false).module_ident(), "Page2024Recap");
    }

    #[test]
    fn test_module_ident_never_empty() {
        assert_eq!(page("---", false).module_ident(), "Page");
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("My Cool Site"), "my-cool-site");
    }

    #[test]
    fn test_slugify_special_chars_and_runs() {
        assert_eq!(slugify("Acme & Sons!"), "acme-sons");
        assert_eq!(slugify("The   Cool  Site"), "the-cool-site");
        assert_eq!(slugify("Café 42"), "caf-42");
    }
}
