use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pezzottify_assistant::catalog_store::{CatalogStore, SqliteCatalogStore, DEMO_PLAYLIST_NAME};
use pezzottify_assistant::classifier::{IntentClassifier, NullClassifier, RasaClassifier};
use pezzottify_assistant::config;
use pezzottify_assistant::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory containing the catalog database (catalog.db).
    /// Can also be specified in config file.
    #[clap(long, value_parser = parse_path)]
    pub db_dir: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3002)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9092)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Base URL of the NLU service. Without it free text is never understood,
    /// only slash commands work.
    #[clap(long)]
    pub classifier_url: Option<String>,

    /// Timeout in seconds for classification requests.
    #[clap(long, default_value_t = 10)]
    pub classifier_timeout_sec: u64,

    /// Directory of the playlist viewer frontend, served at the root.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            db_dir: args.db_dir.clone(),
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            classifier_url: args.classifier_url.clone(),
            classifier_timeout_sec: args.classifier_timeout_sec,
            frontend_dir_path: args.frontend_dir_path.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  db_dir: {:?}", app_config.db_dir);
    info!("  port: {}", app_config.port);
    info!("  dialogue: {:?}", app_config.dialogue);

    if !app_config.catalog_db_path().exists() {
        info!(
            "Creating new catalog database at {:?}",
            app_config.catalog_db_path()
        );
    }
    let catalog_store = Arc::new(SqliteCatalogStore::new(app_config.catalog_db_path())?);
    catalog_store.ensure_playlist(app_config.dialogue.playlist_id, DEMO_PLAYLIST_NAME)?;

    info!("Initializing metrics...");
    metrics::init_metrics();
    metrics::set_catalog_songs(catalog_store.songs_count()?);

    let classifier: Arc<dyn IntentClassifier> = match &app_config.classifier_url {
        Some(url) => {
            info!("Classifying messages with NLU service at {}", url);
            Arc::new(RasaClassifier::new(url.clone(), app_config.classifier_timeout()))
        }
        None => {
            info!("No classifier configured, only slash commands will be understood");
            Arc::new(NullClassifier)
        }
    };

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        port: app_config.port,
        metrics_port: app_config.metrics_port,
        frontend_dir_path: app_config.frontend_dir_path.clone(),
        dialogue: app_config.dialogue.clone(),
    };
    run_server(server_config, catalog_store, classifier).await
}
