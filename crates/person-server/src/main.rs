//! person-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) layered under
//! `PERSON_*` environment variables, opens the SQLite store, seeds demo data
//! into an empty store, and serves the JSON API and HTML pages over HTTP.
//!
//! ```
//! cargo run -p person-server -- --config config.toml
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use person_core::{PersonService, avatar::AvatarProvisioner};
use person_server::{ServerConfig, avatar::HttpAvatarFetcher, seed::demo_people};
use person_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Person CRUD server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PERSON").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);
  if let Some(parent) = store_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let fetcher = HttpAvatarFetcher::new(
    server_cfg.avatar_connect_timeout(),
    server_cfg.avatar_read_timeout(),
  )
  .context("failed to build avatar HTTP client")?;
  let avatars = AvatarProvisioner::new(fetcher).with_size(server_cfg.avatar_size);
  let service = Arc::new(PersonService::new(store, avatars));

  if server_cfg.seed_demo_data {
    let created = service
      .seed_if_empty(demo_people())
      .await
      .context("failed to seed demo data")?;
    if created > 0 {
      tracing::info!(created, "database initialised with demo persons");
    }
  }

  let app = person_server::router(service);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  tracing::info!("JSON API at http://{address}/api/persons");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
