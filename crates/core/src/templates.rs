//! Pre-built page templates: starter layout documents assembled from
//! registry defaults. Used by `pagekit init`.

use crate::component::{Component, ComponentKind, TextProps};
use crate::layout::LayoutDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTemplate {
    Landing,
    About,
    Pricing,
    Contact,
}

impl PageTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            PageTemplate::Landing => "Landing Page",
            PageTemplate::About => "About Page",
            PageTemplate::Pricing => "Pricing Page",
            PageTemplate::Contact => "Contact Page",
        }
    }

    /// Build the template's layout document. Component ids are derived
    /// from kind and position, so a fresh template is always valid.
    pub fn layout(&self) -> LayoutDocument {
        let kinds: &[ComponentKind] = match self {
            PageTemplate::Landing => &[
                ComponentKind::Navbar,
                ComponentKind::Hero,
                ComponentKind::Features,
                ComponentKind::Cta,
                ComponentKind::Footer,
            ],
            PageTemplate::About => &[
                ComponentKind::Navbar,
                ComponentKind::Text,
                ComponentKind::Team,
                ComponentKind::Footer,
            ],
            PageTemplate::Pricing => &[
                ComponentKind::Navbar,
                ComponentKind::Pricing,
                ComponentKind::Faq,
                ComponentKind::Footer,
            ],
            PageTemplate::Contact => &[
                ComponentKind::Navbar,
                ComponentKind::ContactForm,
                ComponentKind::Footer,
            ],
        };

        let mut doc = LayoutDocument::default();
        for (i, kind) in kinds.iter().enumerate() {
            let mut component =
                Component::with_defaults(*kind, format!("{}-{}", kind.as_str(), i));
            // The about template leads with a large centered heading
            // instead of the stock text block.
            if *self == PageTemplate::About && *kind == ComponentKind::Text {
                let props = TextProps {
                    content: "About Us".into(),
                    align: "center".into(),
                    size: "large".into(),
                };
                component.props =
                    serde_json::to_value(props).expect("text props serialize to JSON");
            }
            doc.append(component);
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_landing_template_shape() {
        let doc = PageTemplate::Landing.layout();
        let kinds: Vec<_> = doc.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, ["navbar", "hero", "features", "cta", "footer"]);
    }

    #[test]
    fn test_template_ids_unique() {
        for template in [
            PageTemplate::Landing,
            PageTemplate::About,
            PageTemplate::Pricing,
            PageTemplate::Contact,
        ] {
            let doc = template.layout();
            let ids: HashSet<_> = doc.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids.len(), doc.len(), "{} has duplicate ids", template.name());
        }
    }

    #[test]
    fn test_about_template_overrides_text_block() {
        let doc = PageTemplate::About.layout();
        let text = doc.iter().find(|c| c.kind == "text").unwrap();
        assert_eq!(text.props["content"], "About Us");
        assert_eq!(text.props["size"], "large");
    }
}
