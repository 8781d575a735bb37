use std::time::Instant;

use chrono::NaiveDate;
use tracing::debug;

use crate::clock::Clock;
use crate::model::*;
use crate::observability::{self, Operation};
use crate::store::{BookingStore, RoomStore};

use super::availability;
use super::conflict::validate_window;
use super::{AvailabilityEngine, EngineError};

impl<R: RoomStore, B: BookingStore, C: Clock> AvailabilityEngine<R, B, C> {
    /// First room, in room-store order, free for every day of `[start, end]`.
    /// `None` when every room has an overlapping active booking.
    pub fn find_available_room(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<RoomId>, EngineError> {
        let started = Instant::now();
        let result = self.find_available_room_inner(start, end);
        observability::record(Operation::FindAvailableRoom, result.is_ok(), started);
        result
    }

    fn find_available_room_inner(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<RoomId>, EngineError> {
        let query = self.validate(start, end)?;
        let (rooms, bookings) = self.snapshot()?;
        let room = availability::first_free_room(&rooms, &bookings, &query);
        debug!(%start, %end, ?room, "find_available_room");
        Ok(room)
    }

    /// Every room free for the whole of `[start, end]`, in room-store order.
    pub fn available_rooms(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RoomId>, EngineError> {
        let started = Instant::now();
        let result = self.validate(start, end).and_then(|query| {
            let (rooms, bookings) = self.snapshot()?;
            Ok(availability::free_rooms(&rooms, &bookings, &query))
        });
        observability::record(Operation::AvailableRooms, result.is_ok(), started);
        result
    }

    /// Days in `[start, end]` on which every room has an active booking, ascending.
    /// Windows wider than `max_query_window_days` are refused.
    pub fn fully_occupied_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, EngineError> {
        let started = Instant::now();
        let result = self.occupancy_window(start, end).and_then(|window| {
            let (rooms, bookings) = self.snapshot()?;
            let dates = availability::fully_occupied_dates(&rooms, &bookings, &window);
            debug!(%start, %end, days = dates.len(), "fully_occupied_dates");
            Ok(dates)
        });
        observability::record(Operation::FullyOccupiedDates, result.is_ok(), started);
        result
    }

    /// Same days as `fully_occupied_dates`, collapsed into runs of consecutive days.
    /// Never enumerates days, so the window is not capped.
    pub fn fully_occupied_spans(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DateRange>, EngineError> {
        let started = Instant::now();
        let result = self.validate(start, end).and_then(|window| {
            let (rooms, bookings) = self.snapshot()?;
            Ok(availability::fully_occupied_spans(&rooms, &bookings, &window))
        });
        observability::record(Operation::FullyOccupiedSpans, result.is_ok(), started);
        result
    }

    fn occupancy_window(&self, start: NaiveDate, end: NaiveDate) -> Result<DateRange, EngineError> {
        let window = self.validate(start, end)?;
        validate_window(&window, self.config.max_query_window_days)?;
        Ok(window)
    }
}
