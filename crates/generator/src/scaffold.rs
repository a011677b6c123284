//! Fixed scaffolding for the generated application: build manifest, entry
//! shell, runtime module and the baseline stylesheet. None of it is
//! derived from user data beyond the project name/description, and nothing
//! here embeds timestamps or random identifiers.

use crate::fragment::escape;
use pagekit_core::{Project, slugify};

/// Build manifest for the generated app: framework identity plus
/// install/build/output commands.
pub fn package_json(project: &Project) -> String {
    let name = {
        let slug = slugify(&project.name);
        if slug.is_empty() { "site".to_string() } else { slug }
    };
    let manifest = serde_json::json!({
        "name": name,
        "version": "1.0.0",
        "private": true,
        "scripts": {
            "dev": "vite",
            "build": "vite build",
            "preview": "vite preview"
        },
        "devDependencies": {
            "vite": "^5.1.4"
        }
    });
    serde_json::to_string_pretty(&manifest).expect("manifest serializes to JSON")
}

pub const VITE_CONFIG: &str = "import { defineConfig } from 'vite'

export default defineConfig({})
";

/// Minimal document shell. The generated router owns everything inside
/// `#root`.
pub fn index_html(project: &Project) -> String {
    let title = escape(&project.name);
    let description = escape(project.description.as_deref().unwrap_or(&project.name));
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <meta name="description" content="{description}" />
    <title>{title}</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.js"></script>
  </body>
</html>
"#
    )
}

/// Shared runtime module: mounts a page's pre-rendered markup and handles
/// history-based navigation between generated routes.
pub const RUNTIME_MODULE: &str = "// Shared page runtime for generated sites.
export function mountPage(root, page) {
  document.title = page.title
  root.innerHTML = page.html
}

export function startRouter(root, routes, fallback) {
  function show(path) {
    mountPage(root, routes[path] || fallback)
  }

  document.addEventListener('click', (event) => {
    const link = event.target.closest('a')
    if (!link) return
    const href = link.getAttribute('href')
    if (!href || !(href in routes)) return
    event.preventDefault()
    window.history.pushState({}, '', href)
    show(href)
  })

  window.addEventListener('popstate', () => show(window.location.pathname))
  show(window.location.pathname)
}
";

/// Baseline responsive/accessible stylesheet: typography scales at 768px,
/// touch targets stay at 44px minimum, transitions respect
/// prefers-reduced-motion.
pub const BASE_STYLESHEET: &str = "/* Base styles for generated sites */
* {
  box-sizing: border-box;
}

body {
  margin: 0;
  padding: 0;
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto',
    'Helvetica Neue', sans-serif;
  line-height: 1.6;
  color: #212529;
}

#root {
  min-height: 100vh;
  display: flex;
  flex-direction: column;
}

img {
  max-width: 100%;
  height: auto;
  display: block;
}

h1 { font-size: 2rem; }
h2 { font-size: 1.75rem; }
h3 { font-size: 1.5rem; }
.hero-title { font-size: 2.5rem; margin-bottom: 1rem; }

@media (min-width: 768px) {
  h1 { font-size: 3rem; }
  h2 { font-size: 2.5rem; }
  h3 { font-size: 2rem; }
  .hero-title { font-size: 3.5rem; }
}

.container {
  width: 100%;
  max-width: 1140px;
  margin: 0 auto;
  padding: 0 1rem;
}

.container.narrow {
  max-width: 720px;
}

.section {
  padding: 2rem 0;
}

@media (min-width: 768px) {
  .section {
    padding: 3rem 0;
  }
}

.section-title {
  text-align: center;
  margin-bottom: 2rem;
}

/* 12-unit grid */
.grid {
  display: flex;
  flex-wrap: wrap;
  gap: 1rem 0;
  margin: 0 -0.5rem;
}

.grid > [class^='col-'] {
  padding: 0 0.5rem;
  width: 100%;
}

@media (min-width: 768px) {
  .col-3 { width: 25%; }
  .col-4 { width: 33.3333%; }
  .col-6 { width: 50%; }
}

/* Theme colors */
.bg-primary { background-color: #0d6efd; color: #fff; }
.bg-secondary { background-color: #6c757d; color: #fff; }
.bg-dark { background-color: #212529; color: #fff; }
.bg-light { background-color: #f8f9fa; }

.text-left { text-align: left; }
.text-center { text-align: center; }
.text-right { text-align: right; }
.text-muted { color: #6c757d; }
.bg-primary .text-muted, .bg-dark .text-muted { color: rgba(255, 255, 255, 0.7); }

.fs-3 { font-size: 1.75rem; }
.fs-5 { font-size: 1.25rem; }
.fs-6 { font-size: 1rem; }
.lead { font-size: 1.25rem; }

/* Touch-friendly buttons */
.btn {
  display: inline-block;
  min-height: 44px;
  min-width: 44px;
  padding: 0.75rem 1.5rem;
  font-size: 1rem;
  border: 1px solid transparent;
  border-radius: 0.375rem;
  cursor: pointer;
  text-decoration: none;
  touch-action: manipulation;
}

.btn-primary { background-color: #0d6efd; color: #fff; }
.btn-light { background-color: #f8f9fa; color: #212529; }
.btn-outline { background-color: transparent; color: #0d6efd; border-color: #0d6efd; }

.navbar {
  padding: 0.75rem 0;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}

.navbar .container {
  display: flex;
  align-items: center;
  justify-content: space-between;
  flex-wrap: wrap;
}

.navbar-brand {
  font-weight: 700;
  text-decoration: none;
  color: inherit;
}

.nav-link {
  padding: 0.75rem;
  text-decoration: none;
  color: inherit;
}

.card {
  height: 100%;
  border: 1px solid rgba(0, 0, 0, 0.125);
  border-radius: 0.375rem;
  box-shadow: 0 1px 3px rgba(0, 0, 0, 0.08);
  transition: transform 0.2s;
}

.card:hover {
  transform: translateY(-5px);
}

.card-body {
  padding: 1.5rem;
}

.plan.highlighted {
  border: 3px solid #0d6efd;
}

.badge {
  display: inline-block;
  padding: 0.35em 0.65em;
  border-radius: 0.375rem;
  background-color: #0d6efd;
  color: #fff;
  font-size: 0.875rem;
}

.price {
  font-size: 2.5rem;
  margin: 1rem 0;
}

.plan-features {
  list-style: none;
  padding: 0;
  text-align: left;
}

.plan-features li {
  margin-bottom: 0.75rem;
}

.feature-icon, .avatar {
  font-size: 2.5rem;
  margin-bottom: 1rem;
}

.avatar-img {
  width: 120px;
  height: 120px;
  object-fit: cover;
  border-radius: 50%;
  margin: 0 auto 1rem;
}

.gallery-img {
  width: 100%;
  object-fit: cover;
  aspect-ratio: 16 / 9;
  border-radius: 0.375rem;
}

.video-frame {
  position: relative;
  height: 0;
  overflow: hidden;
  border-radius: 0.375rem;
}

.video-frame iframe {
  position: absolute;
  inset: 0;
  width: 100%;
  height: 100%;
  border: 0;
}

.accordion-item {
  border: 1px solid rgba(0, 0, 0, 0.125);
  border-radius: 0.375rem;
  padding: 1rem;
  margin-bottom: 0.5rem;
}

.accordion-item summary {
  cursor: pointer;
  font-weight: 600;
  min-height: 44px;
  display: flex;
  align-items: center;
}

/* Forms: 16px inputs prevent zoom on mobile */
.form-group {
  margin-bottom: 1rem;
}

.form-label {
  display: block;
  font-weight: 700;
  margin-bottom: 0.25rem;
}

.form-control {
  width: 100%;
  padding: 0.5rem 0.75rem;
  font-size: 16px;
  border: 1px solid #ced4da;
  border-radius: 0.375rem;
}

.footer {
  margin-top: auto;
  padding: 1.5rem 0;
  text-align: center;
}

.footer-link {
  color: inherit;
  text-decoration: none;
  margin: 0 0.5rem;
}

a:focus, button:focus, summary:focus {
  outline: 2px solid #0d6efd;
  outline-offset: 2px;
}

@media (prefers-reduced-motion: reduce) {
  .card {
    transition: none;
  }
  .card:hover {
    transform: none;
  }
}
";

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str) -> Project {
        Project {
            name: name.into(),
            description: None,
        }
    }

    #[test]
    fn test_package_json_slugifies_name() {
        let manifest = package_json(&project("My Cool Site"));
        assert!(manifest.contains("\"name\": \"my-cool-site\""));
        assert!(manifest.contains("\"build\": \"vite build\""));
    }

    #[test]
    fn test_package_json_name_never_empty() {
        let manifest = package_json(&project("!!!"));
        assert!(manifest.contains("\"name\": \"site\""));
    }

    #[test]
    fn test_index_html_escapes_project_metadata() {
        let html = index_html(&Project {
            name: "A & B <Co>".into(),
            description: Some("\"quoted\"".into()),
        });
        assert!(html.contains("<title>A &amp; B &lt;Co&gt;</title>"));
        assert!(html.contains("content=\"&quot;quoted&quot;\""));
    }
}
