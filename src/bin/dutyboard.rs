//! Terminal dashboard: loads the roster, prints each employee's week and
//! then a live headcount line every time the counter samples.
//!
//! The config file is read from `$DUTYBOARD_CONFIG`, or from the platform
//! config directory when unset. Diagnostics go to stderr.

use dutyboard::counter::CountSnapshot;
use dutyboard::schedule::render_week;
use dutyboard::{DashboardConfig, HttpPersistence, LiveCounter, ScheduleStore, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;

fn config_path() -> PathBuf {
    std::env::var_os("DUTYBOARD_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(DashboardConfig::default_config_path)
}

fn print_snapshot(snapshot: &CountSnapshot) {
    let counts = snapshot
        .counts
        .iter()
        .map(|(kind, n)| format!("{}={n}", kind.label()))
        .collect::<Vec<_>>()
        .join("  ");
    println!(
        "[{} {}] {counts}  ({} of {} on duty)",
        snapshot.weekday,
        snapshot.sampled_at.format("%H:%M"),
        snapshot.counts.total(),
        snapshot.roster_size
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = config_path();
    let config = DashboardConfig::from_file_or_default(&path)
        .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", path.display()))?;
    tracing::info!(base_url = %config.api.base_url, "dutyboard starting");

    let store = ScheduleStore::new(HttpPersistence::new(&config.api));
    let roster = store.load().await.map_err(|e| {
        tracing::error!(error = %e, "could not load roster");
        anyhow::anyhow!("roster load failed: {e}")
    })?;

    for employee in roster.employees() {
        println!("{}", employee.display_name());
        for cell in render_week(employee) {
            let titles: Vec<String> = cell.blocks.iter().map(|b| b.title()).collect();
            println!("  {:<9} {}", cell.weekday.name(), titles.join(", "));
        }
    }

    let counter = LiveCounter::new(store.subscribe(), Arc::new(SystemClock))
        .with_period(config.counter.period())
        .attach();
    let mut counts = counter.subscribe();
    print_snapshot(&counts.borrow_and_update());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = counts.changed() => {
                if changed.is_err() {
                    break;
                }
                print_snapshot(&counts.borrow_and_update());
            }
        }
    }

    counter.detach().await;
    tracing::info!("dutyboard shut down cleanly");
    Ok(())
}
