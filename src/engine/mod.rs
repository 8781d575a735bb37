//! Room availability over snapshots pulled from the store collaborators.
//!
//! The engine keeps no state between calls. Every operation validates its
//! range first, then takes fresh snapshots of rooms and bookings, computes in
//! memory and (for `create_booking` only) appends through the booking store.

mod availability;
mod conflict;
mod error;
mod mutations;
mod queries;

pub use availability::{
    first_free_room, free_rooms, fully_occupied_dates, fully_occupied_spans, intersect_days,
    merge_days,
};
pub use error::EngineError;

use chrono::NaiveDate;

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::model::*;
use crate::store::{BookingStore, RoomStore};

use conflict::validate_range;

pub struct AvailabilityEngine<R, B, C = SystemClock> {
    rooms: R,
    bookings: B,
    clock: C,
    config: EngineConfig,
}

impl<R: RoomStore, B: BookingStore> AvailabilityEngine<R, B, SystemClock> {
    pub fn new(rooms: R, bookings: B) -> Self {
        Self::with_clock(rooms, bookings, SystemClock)
    }
}

impl<R: RoomStore, B: BookingStore, C: Clock> AvailabilityEngine<R, B, C> {
    pub fn with_clock(rooms: R, bookings: B, clock: C) -> Self {
        Self {
            rooms,
            bookings,
            clock,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub(super) fn validate(&self, start: NaiveDate, end: NaiveDate) -> Result<DateRange, EngineError> {
        validate_range(start, end, self.clock.today())
    }

    /// Fresh snapshot of both stores, rooms first.
    pub(super) fn snapshot(&self) -> Result<(Vec<Room>, Vec<Booking>), EngineError> {
        let rooms = self.rooms.all_rooms()?;
        let bookings = self.bookings.all_bookings()?;
        Ok((rooms, bookings))
    }
}
