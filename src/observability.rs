use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total engine operations. Labels: operation, status.
pub const QUERIES_TOTAL: &str = "vacancy_queries_total";

/// Histogram: operation latency in seconds. Labels: operation.
pub const QUERY_DURATION_SECONDS: &str = "vacancy_query_duration_seconds";

// ── Booking outcomes ────────────────────────────────────────────

/// Counter: bookings persisted by `create_booking`.
pub const BOOKINGS_CREATED_TOTAL: &str = "vacancy_bookings_created_total";

/// Counter: bookings refused by `create_booking`. Labels: reason.
pub const BOOKINGS_REJECTED_TOTAL: &str = "vacancy_bookings_rejected_total";

/// Serve Prometheus metrics on `0.0.0.0:port`. Without a port nothing is
/// installed and metric calls stay no-ops. Fails if the listener can't be set up.
pub fn init(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Engine operations, as they appear in the `operation` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FindAvailableRoom,
    AvailableRooms,
    CreateBooking,
    FullyOccupiedDates,
    FullyOccupiedSpans,
}

impl Operation {
    pub fn label(self) -> &'static str {
        match self {
            Operation::FindAvailableRoom => "find_available_room",
            Operation::AvailableRooms => "available_rooms",
            Operation::CreateBooking => "create_booking",
            Operation::FullyOccupiedDates => "fully_occupied_dates",
            Operation::FullyOccupiedSpans => "fully_occupied_spans",
        }
    }
}

/// Record one finished operation.
pub fn record(op: Operation, ok: bool, started: std::time::Instant) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(QUERIES_TOTAL, "operation" => op.label(), "status" => status).increment(1);
    metrics::histogram!(QUERY_DURATION_SECONDS, "operation" => op.label())
        .record(started.elapsed().as_secs_f64());
}
