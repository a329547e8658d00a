use anyhow::Context;
use docgraph::{DocServer, DocsEngine, EngineOptions};
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;

/// Options come from `DOCGRAPH_CONFIG` (a TOML file), else `DOCGRAPH_ROOT` or the first
/// argument (a directory holding `manifest.json`).
fn load_options() -> anyhow::Result<EngineOptions> {
    if let Ok(config) = std::env::var("DOCGRAPH_CONFIG") {
        let path = PathBuf::from(docgraph::config::expand_tilde(&config).into_owned());
        return EngineOptions::from_toml_file(&path);
    }

    let root = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DOCGRAPH_ROOT").ok())
        .context("Usage: docgraph-mcp <root> (or set DOCGRAPH_ROOT / DOCGRAPH_CONFIG)")?;
    let mut options = EngineOptions::from_root(docgraph::config::expand_tilde(&root).into_owned());
    if let Ok(home) = std::env::var("DOCGRAPH_HOME_PACKAGE") {
        options = options.with_home_package(home);
    }
    Ok(options)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging goes to stderr; stdout carries the MCP protocol
    docgraph::tracing::init();

    tracing::info!("Starting docgraph MCP server");

    let options = load_options()?;
    let engine = DocsEngine::create(options)
        .await
        .context("Failed to build documentation graph")?;

    let server = DocServer::new(engine);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
