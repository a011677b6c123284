//! The site generator: a pure function from a project snapshot to the
//! complete file mapping of a deployable single-page application. Output
//! is byte-for-byte deterministic for identical inputs.

use crate::render::render_document;
use crate::scaffold;
use pagekit_core::{Error, Page, Project, Result, SiteFiles};
use std::collections::HashSet;

struct RouteEntry<'a> {
    path: String,
    ident: String,
    page: &'a Page,
}

/// Generate the full static application for a project.
///
/// Fails with a validation error when the page list is empty or any
/// pre-emission invariant is violated (duplicate slugs, home-page count,
/// duplicate component ids). A page with an empty layout generates an
/// empty-bodied view and is not an error.
pub fn generate_site(project: &Project, pages: &[Page]) -> Result<SiteFiles> {
    let report = pagekit_validator::validate(project, pages);
    if !report.is_ok() {
        return Err(Error::Validation(report.error_summary()));
    }

    let mut ordered: Vec<&Page> = pages.iter().collect();
    ordered.sort_by_key(|p| p.order_index);

    let routes: Vec<RouteEntry> = ordered
        .iter()
        .map(|p| RouteEntry {
            path: p.route(),
            ident: p.module_ident(),
            page: p,
        })
        .collect();

    // Distinct slugs can still collapse to one module identifier
    // ("about-us" and "aboutus"); that would silently overwrite a view
    // file, so it is rejected here rather than discovered at build time.
    let mut seen_idents = HashSet::new();
    for route in &routes {
        if !seen_idents.insert(route.ident.as_str()) {
            return Err(Error::Validation(format!(
                "pages '{}' and another slug both map to module '{}'",
                route.page.slug, route.ident
            )));
        }
    }

    let mut files = SiteFiles::new();
    files.insert("package.json".into(), scaffold::package_json(project));
    files.insert("vite.config.js".into(), scaffold::VITE_CONFIG.to_string());
    files.insert("index.html".into(), scaffold::index_html(project));
    files.insert("src/styles.css".into(), scaffold::BASE_STYLESHEET.to_string());
    files.insert("src/render.js".into(), scaffold::RUNTIME_MODULE.to_string());
    files.insert("src/main.js".into(), entry_module(&routes));
    for route in &routes {
        files.insert(
            format!("src/pages/{}.js", route.ident),
            page_module(route)?,
        );
    }
    Ok(files)
}

/// JS string literal via the JSON serializer; quoting and escaping are
/// never done by hand.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).expect("strings serialize to JSON")
}

/// One view module per page: the layout document embedded as a literal
/// data value next to the markup rendered from it at generation time.
fn page_module(route: &RouteEntry) -> Result<String> {
    let title = js_string(&route.page.title);
    let layout = serde_json::to_string_pretty(route.page.layout.components())?;
    let html = js_string(&render_document(&route.page.layout));
    Ok(format!(
        "// Generated page module; do not edit by hand.\n\
         export default {{\n  title: {title},\n  layout: {layout},\n  html: {html},\n}}\n"
    ))
}

/// Entry module: imports every page view, binds routes, and falls back to
/// the first page for unmatched paths.
fn entry_module(routes: &[RouteEntry]) -> String {
    let mut out = String::from(
        "import './styles.css'\nimport { startRouter } from './render.js'\n",
    );
    for route in routes {
        out.push_str(&format!(
            "import {ident} from './pages/{ident}.js'\n",
            ident = route.ident
        ));
    }
    out.push_str("\nconst routes = {\n");
    for route in routes {
        out.push_str(&format!("  {}: {},\n", js_string(&route.path), route.ident));
    }
    out.push_str("}\n\n// Unmatched routes fall back to the first page.\n");
    out.push_str(&format!(
        "startRouter(document.getElementById('root'), routes, {})\n",
        routes[0].ident
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagekit_core::{Component, ComponentKind, LayoutDocument};
    use serde_json::json;

    fn project(name: &str) -> Project {
        Project {
            name: name.into(),
            description: None,
        }
    }

    fn page(slug: &str, is_home: bool, order_index: usize, layout: LayoutDocument) -> Page {
        Page {
            title: slug.to_string(),
            slug: slug.to_string(),
            is_home,
            order_index,
            layout,
        }
    }

    fn acme_pages() -> Vec<Page> {
        let layout = LayoutDocument::new(vec![
            Component {
                id: "nav".into(),
                kind: "navbar".into(),
                props: json!({ "brandName": "Acme" }),
            },
            Component {
                id: "hero".into(),
                kind: "hero".into(),
                props: json!({ "title": "Welcome" }),
            },
            Component {
                id: "foot".into(),
                kind: "footer".into(),
                props: json!({ "text": "© Acme" }),
            },
        ]);
        vec![page("home", true, 0, layout)]
    }

    #[test]
    fn test_acme_end_to_end() {
        let files = generate_site(&project("Acme"), &acme_pages()).unwrap();

        assert!(files.contains_key("package.json"));
        assert!(files.contains_key("index.html"));
        assert!(files.contains_key("src/render.js"));

        let main = &files["src/main.js"];
        assert_eq!(main.matches("'/'").count() + main.matches("\"/\"").count(), 1);
        assert!(main.contains("\"/\": Home"));

        let view = &files["src/pages/Home.js"];
        let brand = view.find("Acme").unwrap();
        let title = view.find("Welcome").unwrap();
        let footer = view.find("© Acme").unwrap();
        assert!(brand < title && title < footer);
    }

    #[test]
    fn test_generate_site_is_deterministic() {
        let pages = acme_pages();
        let first = generate_site(&project("Acme"), &pages).unwrap();
        let second = generate_site(&project("Acme"), &pages).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_page_list_fails() {
        let result = generate_site(&project("Acme"), &[]);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_empty_layout_generates_empty_view() {
        let pages = vec![page("home", true, 0, LayoutDocument::default())];
        let files = generate_site(&project("Acme"), &pages).unwrap();
        let view = &files["src/pages/Home.js"];
        assert!(view.contains("layout: []"));
        assert!(view.contains("html: \"\""));
    }

    #[test]
    fn test_gallery_page_grid_spans() {
        let layout = LayoutDocument::new(vec![Component {
            id: "g".into(),
            kind: "gallery".into(),
            props: json!({ "columns": 3, "images": [
                { "src": "/1.png", "alt": "img1" },
                { "src": "/2.png", "alt": "img2" },
                { "src": "/3.png", "alt": "img3" },
                { "src": "/4.png", "alt": "img4" },
            ]}),
        }]);
        let pages = vec![page("home", true, 0, layout)];
        let files = generate_site(&project("Acme"), &pages).unwrap();
        let view = &files["src/pages/Home.js"];
        // 4 entries, each spanning 4 of 12 units (12 / 3 columns).
        assert_eq!(view.matches("gallery-img").count(), 4);
        assert_eq!(view.matches("col-4").count(), 4);
    }

    #[test]
    fn test_unknown_kind_survives_generation() {
        let layout = LayoutDocument::new(vec![Component {
            id: "x".into(),
            kind: "unknown_kind_x".into(),
            props: json!({}),
        }]);
        let pages = vec![page("home", true, 0, layout)];
        let files = generate_site(&project("Acme"), &pages).unwrap();
        assert!(files["src/pages/Home.js"].contains("unknown_kind_x"));
    }

    #[test]
    fn test_router_imports_resolve_to_emitted_files() {
        let pages = vec![
            page("home", true, 0, LayoutDocument::default()),
            page("about-us", false, 1, LayoutDocument::default()),
            page("pricing", false, 2, LayoutDocument::default()),
        ];
        let files = generate_site(&project("Acme"), &pages).unwrap();
        let main = &files["src/main.js"];
        for line in main.lines().filter(|l| l.contains("./pages/")) {
            let module = line
                .split("./pages/")
                .nth(1)
                .and_then(|rest| rest.split('\'').next())
                .unwrap();
            assert!(
                files.contains_key(&format!("src/pages/{}", module)),
                "unresolved import {}",
                module
            );
        }
        assert!(main.contains("\"/about-us\": AboutUs"));
    }

    #[test]
    fn test_pages_emitted_in_order_index_order() {
        let pages = vec![
            page("zeta", false, 1, LayoutDocument::default()),
            page("home", true, 0, LayoutDocument::default()),
        ];
        let files = generate_site(&project("Acme"), &pages).unwrap();
        let main = &files["src/main.js"];
        assert!(main.find("\"/\": Home").unwrap() < main.find("\"/zeta\": Zeta").unwrap());
        // Fallback is the first page by order, the home page.
        assert!(main.contains("routes, Home)"));
    }

    #[test]
    fn test_duplicate_slugs_rejected() {
        let pages = vec![
            page("home", true, 0, LayoutDocument::default()),
            page("about", false, 1, LayoutDocument::default()),
            page("about", false, 2, LayoutDocument::default()),
        ];
        assert!(matches!(
            generate_site(&project("Acme"), &pages),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_colliding_module_idents_rejected() {
        let pages = vec![
            page("home", true, 0, LayoutDocument::default()),
            page("about-us", false, 1, LayoutDocument::default()),
            page("aboutus", false, 2, LayoutDocument::default()),
        ];
        assert!(matches!(
            generate_site(&project("Acme"), &pages),
            Err(Error::Validation(_))
        ));
    }

}
