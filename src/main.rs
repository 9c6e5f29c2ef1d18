use clap::Parser;
use std::time::Duration;
use wellfeed::domain::model::FeedSnapshot;
use wellfeed::utils::{logger, monitor::PollMonitor, validation::Validate};
use wellfeed::{CliConfig, DisplayPrefs, HttpFeedSource, JsonFileStore, PollEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting wellfeed poller");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let monitor = PollMonitor::new(config.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 Resource monitoring enabled");
    }

    let store = JsonFileStore::new(&config.prefs_file);
    let prefs = DisplayPrefs::load(&store);
    if !prefs.hidden_wells.is_empty() {
        tracing::info!("{} wells hidden by preference", prefs.hidden_wells.len());
    }

    let source = HttpFeedSource::new(config.feed_url.clone())
        .with_timeout(Duration::from_secs(config.request_timeout));
    let mut engine = PollEngine::new(source);

    if config.once {
        match engine.poll_once().await {
            Ok(Some(snapshot)) => {
                print_snapshot(&snapshot, &prefs);
                println!("✅ Feed fetched and normalized");
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("❌ Poll failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    tracing::info!("Polling every {}s", config.poll_interval);
    let mut ticker = tokio::time::interval(Duration::from_secs(config.poll_interval));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match engine.poll_once().await {
                    Ok(Some(snapshot)) => print_snapshot(&snapshot, &prefs),
                    Ok(None) => {}
                    Err(e) => {
                        // A failed poll never stops the daemon; the next
                        // cycle retries.
                        tracing::error!("❌ Poll failed: {}", e);
                        tracing::error!("💡 {}", e.recovery_suggestion());
                    }
                }
                monitor.log_cycle(engine.polls(), engine.updates());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down after {} polls ({} updates)",
                    engine.polls(), engine.updates());
                monitor.log_final_stats();
                break;
            }
        }
    }

    Ok(())
}

fn print_snapshot(snapshot: &FeedSnapshot, prefs: &DisplayPrefs) {
    if let Some(last_update) = &snapshot.last_update {
        tracing::info!("Feed last update: {}", last_update);
    }

    for well in prefs.visible_wells(&snapshot.feed) {
        let fractured = well
            .stages
            .iter()
            .filter(|s| s.fracture_date.is_some() || s.fracture_date_text.is_some())
            .count();
        let last_depth = well.stages.iter().rev().find_map(|s| s.depth);

        match last_depth {
            Some(depth) => tracing::info!(
                "🛢️ {}: {} stages, {} fractured, last depth {:.1}",
                well.name,
                well.stages.len(),
                fractured,
                depth
            ),
            None => tracing::info!(
                "🛢️ {}: {} stages, {} fractured",
                well.name,
                well.stages.len(),
                fractured
            ),
        }
    }

    for entry in prefs.visible_stock(&snapshot.stock) {
        tracing::info!("📦 {}: {}", entry.item, entry.stock);
    }
}
