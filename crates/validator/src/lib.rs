//! Pre-generation validation of a project and its pages. The generator
//! refuses to emit files while any fatal finding is present; warnings are
//! reported but do not block.

use pagekit_core::{ComponentKind, Page, Project};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Finding {
    pub severity: Severity,
    /// Slug of the page the finding refers to, when page-scoped.
    pub page: Option<String>,
    pub message: String,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match &self.page {
            Some(slug) => write!(f, "{}: page '{}': {}", tag, slug, self.message),
            None => write!(f, "{}: {}", tag, self.message),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    findings: Vec<Finding>,
}

impl ValidationReport {
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Joined error messages, for wrapping into a validation error.
    pub fn error_summary(&self) -> String {
        self.errors()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn error(&mut self, page: Option<&str>, message: String) {
        self.findings.push(Finding {
            severity: Severity::Error,
            page: page.map(str::to_string),
            message,
        });
    }

    fn warning(&mut self, page: Option<&str>, message: String) {
        self.findings.push(Finding {
            severity: Severity::Warning,
            page: page.map(str::to_string),
            message,
        });
    }
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Validate a project snapshot before generation.
///
/// Policy decisions (deliberate, not inherited): duplicate slugs are
/// rejected, and a project must have exactly one home page.
pub fn validate(_project: &Project, pages: &[Page]) -> ValidationReport {
    let mut report = ValidationReport::default();

    if pages.is_empty() {
        report.error(None, "project has no pages; nothing to publish".into());
        return report;
    }

    let home_count = pages.iter().filter(|p| p.is_home).count();
    if home_count == 0 {
        report.error(None, "no page is flagged as the home page".into());
    } else if home_count > 1 {
        report.error(
            None,
            format!("{} pages are flagged as the home page; exactly one is required", home_count),
        );
    }

    let mut seen_slugs = HashSet::new();
    for page in pages {
        if !is_valid_slug(&page.slug) {
            report.error(
                Some(&page.slug),
                "slug must be non-empty lowercase letters, digits and hyphens".into(),
            );
        }
        if !seen_slugs.insert(page.slug.as_str()) {
            report.error(
                Some(&page.slug),
                "duplicate slug; routes would collide".into(),
            );
        }

        let mut seen_ids = HashSet::new();
        for component in &page.layout {
            if !seen_ids.insert(component.id.as_str()) {
                report.error(
                    Some(&page.slug),
                    format!("duplicate component id '{}'", component.id),
                );
            }
            if ComponentKind::parse(&component.kind).is_none() {
                report.warning(
                    Some(&page.slug),
                    format!(
                        "unknown component kind '{}'; it will render as a placeholder",
                        component.kind
                    ),
                );
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_core::{Component, ComponentKind, LayoutDocument};

    fn project() -> Project {
        Project {
            name: "Acme".into(),
            description: None,
        }
    }

    fn page(slug: &str, is_home: bool, layout: LayoutDocument) -> Page {
        Page {
            title: slug.to_string(),
            slug: slug.to_string(),
            is_home,
            order_index: 0,
            layout,
        }
    }

    #[test]
    fn test_empty_page_list_is_fatal() {
        let report = validate(&project(), &[]);
        assert!(!report.is_ok());
        assert!(report.error_summary().contains("no pages"));
    }

    #[test]
    fn test_single_home_page_is_ok() {
        let pages = vec![
            page("home", true, LayoutDocument::default()),
            page("about", false, LayoutDocument::default()),
        ];
        assert!(validate(&project(), &pages).is_ok());
    }

    #[test]
    fn test_missing_home_page_rejected() {
        let pages = vec![page("about", false, LayoutDocument::default())];
        let report = validate(&project(), &pages);
        assert!(!report.is_ok());
        assert!(report.error_summary().contains("no page is flagged"));
    }

    #[test]
    fn test_multiple_home_pages_rejected() {
        let pages = vec![
            page("home", true, LayoutDocument::default()),
            page("landing", true, LayoutDocument::default()),
        ];
        let report = validate(&project(), &pages);
        assert!(!report.is_ok());
        assert!(report.error_summary().contains("exactly one"));
    }

    #[test]
    fn test_duplicate_slugs_rejected() {
        let pages = vec![
            page("home", true, LayoutDocument::default()),
            page("about", false, LayoutDocument::default()),
            page("about", false, LayoutDocument::default()),
        ];
        let report = validate(&project(), &pages);
        assert!(!report.is_ok());
        assert!(report.error_summary().contains("duplicate slug"));
    }

    #[test]
    fn test_bad_slug_rejected() {
        for slug in ["", "About", "with space", "-lead", "trail-"] {
            let pages = vec![page(slug, true, LayoutDocument::default())];
            assert!(!validate(&project(), &pages).is_ok(), "slug {:?}", slug);
        }
    }

    #[test]
    fn test_duplicate_component_ids_rejected() {
        let layout = LayoutDocument::new(vec![
            Component::new(ComponentKind::Hero, "a"),
            Component::new(ComponentKind::Text, "a"),
        ]);
        let pages = vec![page("home", true, layout)];
        let report = validate(&project(), &pages);
        assert!(!report.is_ok());
        assert!(report.error_summary().contains("duplicate component id"));
    }

    #[test]
    fn test_unknown_kind_is_warning_only() {
        let layout = LayoutDocument::new(vec![Component {
            id: "x".into(),
            kind: "unknown_kind_x".into(),
            props: serde_json::json!({}),
        }]);
        let pages = vec![page("home", true, layout)];
        let report = validate(&project(), &pages);
        assert!(report.is_ok());
        assert_eq!(report.warnings().count(), 1);
    }
}
