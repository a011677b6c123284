use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::Uri,
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use pagekit_core::load_site;
use pagekit_generator::fragment::escape;
use pagekit_generator::{render_document, scaffold};
use std::{net::SocketAddr, path::PathBuf};
use tokio::sync::broadcast;

#[derive(Clone)]
struct AppState {
    site_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
}

/// Start a preview server with hot reload for local editing.
///
/// Every request reloads site.toml and the layout files from disk, so
/// edits show up on the next reload without restarting the server.
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    println!("🌐 Starting preview server...");
    println!("   Site: {}", path.display());

    if !path.exists() {
        anyhow::bail!(
            "Site directory does not exist: {}\nRun 'pagekit init {}' first",
            path.display(),
            path.display()
        );
    }

    let (manifest, pages) = load_site(&path).context("Failed to load site")?;
    println!("   ✓ Loaded: {}", manifest.project.name);
    println!("   ✓ Pages: {}", pages.len());

    let (reload_tx, _) = broadcast::channel::<()>(100);

    let state = AppState {
        site_dir: path.clone(),
        reload_tx: reload_tx.clone(),
    };

    let app = Router::new()
        .route("/_reload", get(sse_handler))
        .fallback(get(page_handler))
        .with_state(state);

    let watcher_path = path.clone();
    let watcher_tx = reload_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_files(watcher_path, watcher_tx).await {
            eprintln!("File watcher error: {}", e);
        }
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Watch the site directory and trigger a reload on changes.
async fn watch_files(path: PathBuf, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    watcher.watch(&path, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                // Skip editor temp files and hidden files.
                if event.paths.iter().any(|p| {
                    let filename = p.file_name().unwrap_or_default().to_string_lossy();
                    !filename.starts_with('.') && !filename.ends_with('~')
                }) {
                    println!("   📝 File changed, reloading...");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            if rx.recv().await.is_ok() {
                yield Ok(Event::default().data("reload"));
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Render the requested page, falling back to the first page for
/// unmatched paths, the same way the generated router does.
async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let (manifest, pages) = match load_site(&state.site_dir) {
        Ok(loaded) => loaded,
        Err(e) => return error_page(&e.to_string()),
    };

    let mut ordered: Vec<_> = pages.iter().collect();
    ordered.sort_by_key(|p| p.order_index);
    if ordered.is_empty() {
        return error_page("site has no pages");
    }

    let page = ordered
        .iter()
        .find(|p| p.route() == uri.path())
        .unwrap_or(&ordered[0]);

    let body = render_document(&page.layout);
    Html(preview_shell(&page.title, &manifest.project.name, &body)).into_response()
}

/// The preview document shell. `body` is renderer output and already
/// escaped; the title data is not and gets escaped here, matching the
/// generator's index shell.
fn preview_shell(page_title: &str, project_name: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - {project} | Preview</title>
    <style>{stylesheet}</style>
</head>
<body>
    <div id="root">{body}</div>
    <script>
        // Hot reload via Server-Sent Events
        const eventSource = new EventSource('/_reload');
        eventSource.onmessage = () => {{
            console.log('Reloading...');
            location.reload();
        }};
        eventSource.onerror = () => {{
            console.log('Preview server disconnected');
            eventSource.close();
        }};
    </script>
</body>
</html>"#,
        title = escape(page_title),
        project = escape(project_name),
        stylesheet = scaffold::BASE_STYLESHEET,
        body = body,
    )
}

fn error_page(message: &str) -> Response {
    Html(format!(
        r#"<!DOCTYPE html>
<html><head><title>Error</title></head><body>
<h1>Configuration Error</h1>
<pre>{}</pre>
</body></html>"#,
        escape(message)
    ))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_shell_escapes_title_data() {
        let html = preview_shell("A <b>Page</b>", "Acme & Sons", "<section></section>");
        assert!(html.contains("<title>A &lt;b&gt;Page&lt;/b&gt; - Acme &amp; Sons | Preview</title>"));
        // Renderer output is passed through untouched.
        assert!(html.contains("<div id=\"root\"><section></section></div>"));
    }
}
