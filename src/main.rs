use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use vacancy::config::report_window;
use vacancy::{AvailabilityEngine, EngineConfig, InMemoryStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let metrics_port: Option<u16> = std::env::var("VACANCY_METRICS_PORT")
        .ok()
        .and_then(|s| s.parse().ok());
    vacancy::observability::init(metrics_port)?;

    let snapshot = std::env::var("VACANCY_SNAPSHOT").unwrap_or_else(|_| "./snapshot.json".into());
    let window_days: i64 = std::env::var("VACANCY_WINDOW_DAYS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(30);
    let config = EngineConfig::from_env();

    let store = Arc::new(InMemoryStore::load_snapshot(&PathBuf::from(&snapshot))?);
    info!("vacancy report");
    info!("  snapshot: {snapshot}");
    info!("  rooms: {}", store.room_count()?);
    info!("  bookings: {}", store.booking_count()?);
    info!("  max_query_window_days: {}", config.max_query_window_days);

    let engine = AvailabilityEngine::new(store.clone(), store).with_config(config);

    let tomorrow = engine.today().succ_opt().ok_or("no calendar day after today")?;
    let window = report_window(tomorrow, window_days)
        .ok_or(format!("VACANCY_WINDOW_DAYS out of range: {window_days}"))?;
    let until = window.end;

    match engine.find_available_room(tomorrow, tomorrow)? {
        Some(room) => info!("first free room for {tomorrow}: {room}"),
        None => info!("no room free for {tomorrow}"),
    }

    let spans = engine.fully_occupied_spans(tomorrow, until)?;
    if spans.is_empty() {
        info!("no fully occupied dates in [{tomorrow}, {until}]");
    }
    for span in &spans {
        info!(
            "fully occupied: {} .. {} ({} days)",
            span.start,
            span.end,
            span.len_days()
        );
    }

    Ok(())
}
