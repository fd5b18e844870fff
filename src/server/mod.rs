//! Preview server for the generated site

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::path::Path;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Blog;

/// Router serving the public directory, `index.html` for directories
pub fn router(public_dir: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

/// Parse a bind address - handle "localhost" specially
pub fn bind_addr(ip: &str, port: u16) -> Result<SocketAddr> {
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    format!("{}:{}", bind_ip, port)
        .parse()
        .with_context(|| format!("Invalid address {}:{}", ip, port))
}

/// Serve the already generated site until interrupted
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let addr = bind_addr(ip, port)?;
    let app = router(&blog.public_dir);

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
