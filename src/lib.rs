pub mod clock;
pub mod config;
pub mod engine;
pub mod limits;
pub mod model;
pub mod observability;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::{AvailabilityEngine, EngineError};
pub use model::{Booking, BookingId, CustomerId, DateRange, Room, RoomId};
pub use store::{BookingStore, InMemoryStore, RoomStore, StoreError, WriteGate};
