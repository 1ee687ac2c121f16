use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assigncache::storage::cached::{CacheAdapter, Invalidator};
use assigncache::Config;
use assigncache_core::assignment::Id;
use assigncache_core::cache::Cache;

/// assigncache - inspect and purge the assignment cache
#[derive(Parser, Debug)]
#[command(name = "assigncache")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Redis connection URL, overriding `REDIS_URL`
    #[arg(long)]
    redis_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every cached key matching a glob pattern
    Keys {
        /// Glob pattern, e.g. "Assignment:GetByUser:*"
        pattern: String,
    },
    /// Drop every cached assignment list page for one user
    PurgeUser {
        /// User id, e.g. "User/5f0c..."
        user: Id,
    },
    /// Drop every cached list page and projection for one resource
    PurgeResource {
        /// Resource id, e.g. "Issue/5f0c..."
        resource: Id,
    },
    /// Drop every assignment list page and every embedding projection
    PurgeAll,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "assigncache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(url) = cli.redis_url {
        config.redis_url = url;
    }

    let cache = config
        .redis_cache()
        .await
        .with_context(|| format!("failed to connect to {}", config.redis_url))?;
    let cache = Arc::new(cache);

    let mut adapter = CacheAdapter::new(Arc::clone(&cache));
    if let Some(timeout) = config.cache_timeout() {
        adapter = adapter.with_timeout(timeout);
    }
    let invalidator = Invalidator::new(adapter);

    match cli.command {
        Command::Keys { pattern } => {
            for key in cache.keys(&pattern).await? {
                println!("{key}");
            }
        }
        Command::PurgeUser { user } => {
            invalidator.clear_assignments_by_user(user).await?;
            tracing::info!(user = %user, "Purged user assignment lists");
        }
        Command::PurgeResource { resource } => {
            invalidator.clear_resource(resource).await?;
            tracing::info!(resource = %resource, "Purged resource caches");
        }
        Command::PurgeAll => {
            invalidator.clear_all().await?;
            tracing::info!("Purged all assignment caches");
        }
    }

    Ok(())
}
