/// Default cap on the number of days an occupancy query may enumerate (~10 years).
pub const MAX_QUERY_WINDOW_DAYS: i64 = 3660;

/// Rooms accepted by `InMemoryStore` before `add_room` is rejected.
pub const MAX_ROOMS: usize = 100_000;

/// Longest room description accepted by `InMemoryStore`.
pub const MAX_DESCRIPTION_LEN: usize = 1024;
