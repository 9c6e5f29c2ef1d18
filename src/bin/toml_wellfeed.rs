use clap::Parser;
use std::time::Duration;
use wellfeed::config::toml_config::TomlConfig;
use wellfeed::core::prefs::PREFS_KEY;
use wellfeed::domain::ports::{ConfigProvider, KeyValueStore};
use wellfeed::utils::{logger, monitor::PollMonitor, validation::Validate};
use wellfeed::{DisplayPrefs, HttpFeedSource, JsonFileStore, PollEngine};

#[derive(Parser)]
#[command(name = "toml-wellfeed")]
#[command(about = "Drilling-stage feed poller driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "wellfeed.toml")]
    config: String,

    /// File holding display preferences between runs
    #[arg(long, default_value = "./wellfeed_prefs.json")]
    prefs_file: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-configured wellfeed poller");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated");
    display_config_summary(&config);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let monitor = PollMonitor::new(monitor_enabled);

    // Stored preferences win over the config seed; the seed only applies on
    // a fresh prefs file.
    let store = JsonFileStore::new(&args.prefs_file);
    let prefs = match store.get(PREFS_KEY) {
        Ok(Some(_)) => DisplayPrefs::load(&store),
        _ => {
            let seeded = config.display_prefs();
            if let Err(e) = seeded.save(&store) {
                tracing::warn!("could not persist seeded preferences: {}", e);
            }
            seeded
        }
    };

    let mut source = HttpFeedSource::from_config(&config);
    if let Some(headers) = &config.source.headers {
        for (name, value) in headers {
            source = source.with_header(name, value);
        }
    }
    let mut engine = PollEngine::new(source);
    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval_secs()));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match engine.poll_once().await {
                    Ok(Some(snapshot)) => {
                        for well in prefs.visible_wells(&snapshot.feed) {
                            tracing::info!("🛢️ {}: {} stages", well.name, well.stages.len());
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!("❌ Poll failed: {}", e);
                        tracing::error!("💡 {}", e.recovery_suggestion());
                    }
                }
                monitor.log_cycle(engine.polls(), engine.updates());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down after {} polls", engine.polls());
                monitor.log_final_stats();
                break;
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Dashboard: {}", config.dashboard.name);
    if let Some(description) = &config.dashboard.description {
        println!("  Description: {}", description);
    }
    println!("  Source: {}", config.source.endpoint);
    println!("  Poll interval: {}s", config.poll_interval_secs());
    if let Some(timeout) = config.request_timeout_secs() {
        println!("  Request timeout: {}s", timeout);
    }
    println!("  Monitoring: {}", config.monitoring_enabled());
    println!();
}
