//! Operator probe: fetch one page of a list endpoint and print the rows.
//!
//! Usage: `cargo run --bin probe -- <path> [key=value ...]`
//!
//! `page` and `limit` are treated as paging parameters, everything else
//! becomes a filter. Requires `API_BASE_URL` (reads .env). Example:
//! `cargo run --bin probe -- /api/pathfinders search=ivan page=2`

use fleetdesk::config::ConsoleConfig;
use fleetdesk::models::pagination::Page;
use fleetdesk::models::query::ListQuery;
use fleetdesk::transport::{HttpSource, ListSource};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "fleetdesk=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: probe <path> [key=value ...]"))?;

    let mut pairs = Vec::new();
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("expected key=value, got '{arg}'"))?;
        pairs.push((key.to_string(), value.to_string()));
    }

    let config = ConsoleConfig::from_env()?;
    let mut query = ListQuery::with_per_page(config.default_per_page);

    // Filters first: they reset the page, so explicit page/limit win.
    for (key, value) in &pairs {
        if key != "page" && key != "limit" {
            query.set_filter(key.clone(), value.clone());
        }
    }
    for (key, value) in &pairs {
        if key == "limit" {
            query.set_per_page(value.parse()?);
        }
    }
    for (key, value) in &pairs {
        if key == "page" {
            query.set_page(value.parse()?);
        }
    }

    let source = HttpSource::new(&config, &path)?;
    tracing::info!(endpoint = source.endpoint(), "fetching page");

    let page: Page<Value> = source.fetch_page(query.to_request()).await?;

    println!(
        "page {}/{} ({} records total)",
        page.meta.current_page, page.meta.total_pages, page.meta.total
    );
    for item in &page.items {
        println!("{}", serde_json::to_string(item)?);
    }

    Ok(())
}
