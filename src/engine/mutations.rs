use std::time::Instant;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::model::*;
use crate::observability::{self, BOOKINGS_CREATED_TOTAL, BOOKINGS_REJECTED_TOTAL, Operation};
use crate::store::{BookingStore, RoomStore};

use super::availability::first_free_room;
use super::{AvailabilityEngine, EngineError};

impl<R: RoomStore, B: BookingStore, C: Clock> AvailabilityEngine<R, B, C> {
    /// Book the first free room for `booking`'s dates.
    ///
    /// `Ok(false)` when the range is invalid or no room is free; nothing is
    /// written in either case. On `Ok(true)` exactly one booking was appended
    /// and `booking` carries the assigned id, room and `is_active = true`.
    /// `Err` only for store failures.
    pub fn create_booking(&self, booking: &mut Booking) -> Result<bool, EngineError> {
        let started = Instant::now();
        let result = self.create_booking_inner(booking);
        observability::record(Operation::CreateBooking, result.is_ok(), started);
        result
    }

    fn create_booking_inner(&self, booking: &mut Booking) -> Result<bool, EngineError> {
        let query = match self.validate(booking.start, booking.end) {
            Ok(query) => query,
            Err(e) => {
                debug!("booking rejected: {e}");
                metrics::counter!(BOOKINGS_REJECTED_TOTAL, "reason" => "invalid_range").increment(1);
                return Ok(false);
            }
        };

        // Held until return: snapshot, selection and append happen as one step.
        let _gate = self.bookings.write_gate()?;
        let (rooms, bookings) = self.snapshot()?;

        let Some(room_id) = first_free_room(&rooms, &bookings, &query) else {
            debug!(start = %query.start, end = %query.end, "booking rejected: no room free");
            metrics::counter!(BOOKINGS_REJECTED_TOTAL, "reason" => "no_room").increment(1);
            return Ok(false);
        };

        let candidate = Booking {
            room_id,
            is_active: true,
            ..booking.clone()
        };
        let id = self.bookings.add_booking(candidate)?;

        booking.id = id;
        booking.room_id = room_id;
        booking.is_active = true;
        metrics::counter!(BOOKINGS_CREATED_TOTAL).increment(1);
        info!(
            booking_id = id,
            room_id,
            customer_id = booking.customer_id,
            start = %query.start,
            end = %query.end,
            "booking created"
        );
        Ok(true)
    }
}
