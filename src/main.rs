//! Land Area Manager (LAM)
//!
//! An MCP server for farmer land records and land-area conversion.

use std::path::PathBuf;

use lam::build_info;
use lam::dataset::Dataset;
use lam::mcp::LamService;
use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

/// Get the dataset path from environment or use default
fn get_dataset_path() -> PathBuf {
    std::env::var("LAM_DATASET_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(grandparent) = path.parent().and_then(|p| p.parent()) {
                    path = grandparent.to_path_buf();
                }
            }

            path.push("data");
            path.push("lam.json");
            path
        })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log to stderr so stdout stays clean for MCP
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("lam=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let dataset_path = get_dataset_path();
    eprintln!("Dataset path: {}", dataset_path.display());

    let dataset = if dataset_path.exists() {
        Dataset::load(&dataset_path)?
    } else {
        tracing::warn!(
            "Dataset {} not found, starting with no records",
            dataset_path.display()
        );
        Dataset::default()
    };

    let service = LamService::new(dataset_path, dataset);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
