use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type RoomId = i32;
pub type BookingId = i32;
pub type CustomerId = i32;

/// Closed interval `[start, end]` of calendar days.
///
/// A range with `end < start` is empty: it contains no day and overlaps nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end, "DateRange start must not be after end");
        Self { start, end }
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Inclusive overlap: touching boundary days count.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.start <= other.end
            && other.start <= self.end
    }

    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Number of days covered, counting both ends. Zero for an empty range.
    pub fn len_days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }

    /// Every day in the range, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Intersection with `window`, or `None` if they don't overlap.
    pub fn clamp_to(&self, window: &DateRange) -> Option<DateRange> {
        if !self.overlaps(window) {
            return None;
        }
        Some(DateRange::new(
            self.start.max(window.start),
            self.end.min(window.end),
        ))
    }
}

/// A bookable room from the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub description: String,
}

impl Room {
    pub fn new(id: RoomId, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }
}

/// A stay of one customer in one room, both dates inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default)]
    pub id: BookingId,
    #[serde(default)]
    pub room_id: RoomId,
    #[serde(default)]
    pub customer_id: CustomerId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Soft-delete marker; inactive bookings never block a room.
    #[serde(default)]
    pub is_active: bool,
}

impl Booking {
    /// A not-yet-persisted request for `[start, end]`. Room and identity are
    /// assigned on creation.
    pub fn request(customer_id: CustomerId, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: 0,
            room_id: 0,
            customer_id,
            start,
            end,
            is_active: false,
        }
    }

    /// Dates as stored. May be empty if the store holds an inverted booking.
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start,
            end: self.end,
        }
    }

    /// Stored dates against `query`, both ends inclusive: `start <= query.end
    /// && query.start <= end`. Compares the stored dates as they are, so an
    /// inverted booking still collides with a query spanning both its dates.
    pub fn overlaps_dates(&self, query: &DateRange) -> bool {
        self.start <= query.end && query.start <= self.end
    }

    /// True if this booking currently holds `room_id` on any day of `query`.
    pub fn blocks(&self, room_id: RoomId, query: &DateRange) -> bool {
        self.is_active && self.room_id == room_id && self.overlaps_dates(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, day).unwrap()
    }

    #[test]
    fn range_basics() {
        let r = DateRange::new(d(10), d(20));
        assert_eq!(r.len_days(), 11);
        assert!(r.contains_day(d(10)));
        assert!(r.contains_day(d(20))); // inclusive end
        assert!(!r.contains_day(d(21)));
    }

    #[test]
    fn single_day_range() {
        let r = DateRange::single_day(d(5));
        assert_eq!(r.len_days(), 1);
        assert_eq!(r.days().collect::<Vec<_>>(), vec![d(5)]);
    }

    #[test]
    fn range_overlap_touching_end_is_inclusive() {
        let booked = DateRange::new(d(1), d(6));
        let query = DateRange::new(d(6), d(7));
        assert!(booked.overlaps(&query));
        assert!(query.overlaps(&booked));
    }

    #[test]
    fn range_overlap_adjacent_days_do_not_overlap() {
        let a = DateRange::new(d(1), d(5));
        let b = DateRange::new(d(6), d(9));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn range_overlap_containment() {
        let outer = DateRange::new(d(1), d(20));
        let inner = DateRange::new(d(5), d(6));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn inverted_range_is_empty() {
        let inverted = DateRange {
            start: d(9),
            end: d(3),
        };
        assert!(inverted.is_empty());
        assert_eq!(inverted.len_days(), 0);
        assert_eq!(inverted.days().count(), 0);
        assert!(!inverted.overlaps(&DateRange::new(d(1), d(20))));
        assert!(!inverted.contains_day(d(5)));
    }

    #[test]
    fn days_are_ascending_and_cross_month_end() {
        let r = DateRange::new(d(30), NaiveDate::from_ymd_opt(2030, 2, 2).unwrap());
        let days: Vec<_> = r.days().collect();
        assert_eq!(days.len(), 4);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2030, 2, 1).unwrap());
    }

    #[test]
    fn clamp_to_window() {
        let window = DateRange::new(d(10), d(20));
        assert_eq!(
            DateRange::new(d(5), d(12)).clamp_to(&window),
            Some(DateRange::new(d(10), d(12)))
        );
        assert_eq!(
            DateRange::new(d(18), d(25)).clamp_to(&window),
            Some(DateRange::new(d(18), d(20)))
        );
        assert_eq!(DateRange::new(d(1), d(9)).clamp_to(&window), None);
    }

    #[test]
    fn booking_blocks_only_its_active_room() {
        let mut b = Booking::request(7, d(10), d(12));
        b.room_id = 1;
        let query = DateRange::new(d(12), d(14));
        assert!(!b.blocks(1, &query)); // not active yet
        b.is_active = true;
        assert!(b.blocks(1, &query));
        assert!(!b.blocks(2, &query));
        assert!(!b.blocks(1, &DateRange::new(d(13), d(14))));
    }

    #[test]
    fn inverted_booking_overlaps_by_stored_dates() {
        let b = Booking {
            is_active: true,
            room_id: 1,
            ..Booking::request(1, d(9), d(3))
        };
        assert!(b.overlaps_dates(&DateRange::new(d(1), d(10))));
        assert!(b.overlaps_dates(&DateRange::new(d(3), d(9))));
        assert!(!b.overlaps_dates(&DateRange::new(d(4), d(8))));
        assert!(!b.overlaps_dates(&DateRange::new(d(10), d(12))));
        // A single day never falls inside an inverted booking.
        assert!(!b.blocks(1, &DateRange::single_day(d(5))));
        assert!(!b.range().overlaps(&DateRange::new(d(1), d(10))));
    }

    #[test]
    fn booking_json_defaults() {
        let json = r#"{"start":"2030-01-03","end":"2030-01-04"}"#;
        let b: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(b.start, d(3));
        assert_eq!(b.id, 0);
        assert!(!b.is_active);
    }
}
