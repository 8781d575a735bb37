use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use serde::{Deserialize, Serialize};

use crate::limits::*;
use crate::model::*;

/// Failure inside a store collaborator. The engine passes these through untouched.
#[derive(Debug)]
pub enum StoreError {
    /// A lock holder panicked; the data behind it can no longer be trusted.
    Poisoned(&'static str),
    Io(std::io::Error),
    Decode(String),
    /// The store refused the write (limits, duplicate identity, ...).
    Rejected(&'static str),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Poisoned(what) => write!(f, "store lock poisoned: {what}"),
            StoreError::Io(e) => write!(f, "store I/O error: {e}"),
            StoreError::Decode(e) => write!(f, "store decode error: {e}"),
            StoreError::Rejected(msg) => write!(f, "store rejected write: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Read access to the room catalog. Iteration order is the tie-break order
/// for availability, so implementations must return a stable order.
pub trait RoomStore {
    fn all_rooms(&self) -> Result<Vec<Room>, StoreError>;
}

/// Read + append access to bookings, inactive ones included.
pub trait BookingStore {
    fn all_bookings(&self) -> Result<Vec<Booking>, StoreError>;

    /// Persist one new booking and return the identity the store assigned.
    fn add_booking(&self, booking: Booking) -> Result<BookingId, StoreError>;

    /// Exclusive access for one read-select-append sequence.
    ///
    /// While a gate is held, no other gated caller may append. Stores shared
    /// between concurrent callers must override this; the default gate is empty.
    fn write_gate(&self) -> Result<WriteGate<'_>, StoreError> {
        Ok(WriteGate::none())
    }
}

/// Held for the duration of a booking creation. Released on drop.
#[must_use]
pub struct WriteGate<'a> {
    guard: Option<MutexGuard<'a, ()>>,
}

impl<'a> WriteGate<'a> {
    pub fn none() -> Self {
        Self { guard: None }
    }

    pub fn locked(guard: MutexGuard<'a, ()>) -> Self {
        Self {
            guard: Some(guard),
        }
    }

    pub fn is_exclusive(&self) -> bool {
        self.guard.is_some()
    }
}

impl<T: RoomStore + ?Sized> RoomStore for &T {
    fn all_rooms(&self) -> Result<Vec<Room>, StoreError> {
        (**self).all_rooms()
    }
}

impl<T: RoomStore + ?Sized> RoomStore for Arc<T> {
    fn all_rooms(&self) -> Result<Vec<Room>, StoreError> {
        (**self).all_rooms()
    }
}

impl<T: BookingStore + ?Sized> BookingStore for &T {
    fn all_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        (**self).all_bookings()
    }

    fn add_booking(&self, booking: Booking) -> Result<BookingId, StoreError> {
        (**self).add_booking(booking)
    }

    fn write_gate(&self) -> Result<WriteGate<'_>, StoreError> {
        (**self).write_gate()
    }
}

impl<T: BookingStore + ?Sized> BookingStore for Arc<T> {
    fn all_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        (**self).all_bookings()
    }

    fn add_booking(&self, booking: Booking) -> Result<BookingId, StoreError> {
        (**self).add_booking(booking)
    }

    fn write_gate(&self) -> Result<WriteGate<'_>, StoreError> {
        (**self).write_gate()
    }
}

/// On-disk shape of a catalog + booking history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

/// Rooms and bookings held in memory, safe to share between threads.
pub struct InMemoryStore {
    rooms: RwLock<Vec<Room>>,
    bookings: RwLock<Vec<Booking>>,
    gate: Mutex<()>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default())
    }

    pub fn with_rooms(rooms: Vec<Room>) -> Self {
        Self::from_snapshot(Snapshot {
            rooms,
            bookings: Vec::new(),
        })
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            rooms: RwLock::new(snapshot.rooms),
            bookings: RwLock::new(snapshot.bookings),
            gate: Mutex::new(()),
        }
    }

    /// Load a JSON snapshot (`{"rooms": [...], "bookings": [...]}`).
    pub fn load_snapshot(path: &Path) -> Result<Self, StoreError> {
        let bytes = std::fs::read(path)?;
        let snapshot: Snapshot =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Self::from_snapshot(snapshot))
    }

    pub fn room_count(&self) -> Result<usize, StoreError> {
        Ok(self.read_rooms()?.len())
    }

    pub fn booking_count(&self) -> Result<usize, StoreError> {
        Ok(self.read_bookings()?.len())
    }

    /// Append a room to the end of the catalog (lowest tie-break priority).
    pub fn add_room(&self, room: Room) -> Result<(), StoreError> {
        if room.description.len() > MAX_DESCRIPTION_LEN {
            return Err(StoreError::Rejected("room description too long"));
        }
        let mut rooms = self
            .rooms
            .write()
            .map_err(|_| StoreError::Poisoned("rooms"))?;
        if rooms.len() >= MAX_ROOMS {
            return Err(StoreError::Rejected("too many rooms"));
        }
        if rooms.iter().any(|r| r.id == room.id) {
            return Err(StoreError::Rejected("duplicate room id"));
        }
        rooms.push(room);
        Ok(())
    }

    fn read_rooms(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Room>>, StoreError> {
        self.rooms.read().map_err(|_| StoreError::Poisoned("rooms"))
    }

    fn read_bookings(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Booking>>, StoreError> {
        self.bookings
            .read()
            .map_err(|_| StoreError::Poisoned("bookings"))
    }
}

impl RoomStore for InMemoryStore {
    fn all_rooms(&self) -> Result<Vec<Room>, StoreError> {
        Ok(self.read_rooms()?.clone())
    }
}

impl BookingStore for InMemoryStore {
    fn all_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        Ok(self.read_bookings()?.clone())
    }

    fn add_booking(&self, mut booking: Booking) -> Result<BookingId, StoreError> {
        let mut bookings = self
            .bookings
            .write()
            .map_err(|_| StoreError::Poisoned("bookings"))?;
        let next_id = bookings
            .iter()
            .map(|b| b.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(StoreError::Rejected("booking ids exhausted"))?;
        booking.id = next_id;
        bookings.push(booking);
        Ok(next_id)
    }

    fn write_gate(&self) -> Result<WriteGate<'_>, StoreError> {
        let guard = self
            .gate
            .lock()
            .map_err(|_| StoreError::Poisoned("booking write gate"))?;
        Ok(WriteGate::locked(guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 3, day).unwrap()
    }

    #[test]
    fn rooms_keep_insertion_order() {
        let store = InMemoryStore::new();
        for id in [3, 1, 2] {
            store.add_room(Room::new(id, format!("Room {id}"))).unwrap();
        }
        let ids: Vec<_> = store.all_rooms().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn duplicate_room_rejected() {
        let store = InMemoryStore::with_rooms(vec![Room::new(1, "Room 1")]);
        let result = store.add_room(Room::new(1, "again"));
        assert!(matches!(result, Err(StoreError::Rejected("duplicate room id"))));
    }

    #[test]
    fn long_description_rejected() {
        let store = InMemoryStore::new();
        let result = store.add_room(Room::new(1, "x".repeat(MAX_DESCRIPTION_LEN + 1)));
        assert!(matches!(result, Err(StoreError::Rejected(_))));
    }

    #[test]
    fn add_booking_assigns_next_id() {
        let mut existing = Booking::request(1, d(1), d(2));
        existing.id = 41;
        let store = InMemoryStore::from_snapshot(Snapshot {
            rooms: vec![],
            bookings: vec![existing],
        });
        let id = store.add_booking(Booking::request(2, d(3), d(4))).unwrap();
        assert_eq!(id, 42);
        let all = store.all_bookings().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].id, 42);
    }

    #[test]
    fn first_booking_gets_id_one() {
        let store = InMemoryStore::new();
        assert_eq!(store.add_booking(Booking::request(1, d(1), d(1))).unwrap(), 1);
    }

    #[test]
    fn write_gate_is_exclusive() {
        let store = InMemoryStore::new();
        let gate = store.write_gate().unwrap();
        assert!(gate.is_exclusive());
        assert!(store.gate.try_lock().is_err());
        drop(gate);
        assert!(store.gate.try_lock().is_ok());
    }

    #[test]
    fn gate_through_arc_and_ref() {
        let store = Arc::new(InMemoryStore::new());
        assert!(store.write_gate().unwrap().is_exclusive());
        let by_ref: &InMemoryStore = &store;
        assert!(BookingStore::write_gate(&by_ref).unwrap().is_exclusive());
    }

    #[test]
    fn load_snapshot_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "rooms": [{{"id": 1, "description": "Room 1"}}, {{"id": 2, "description": "Room 2"}}],
                "bookings": [{{"id": 1, "room_id": 2, "customer_id": 9,
                               "start": "2030-03-10", "end": "2030-03-12", "is_active": true}}]
            }}"#
        )
        .unwrap();

        let store = InMemoryStore::load_snapshot(file.path()).unwrap();
        assert_eq!(store.room_count().unwrap(), 2);
        let bookings = store.all_bookings().unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].room_id, 2);
        assert_eq!(bookings[0].range(), crate::model::DateRange::new(d(10), d(12)));
    }

    #[test]
    fn load_snapshot_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let result = InMemoryStore::load_snapshot(file.path());
        assert!(matches!(result, Err(StoreError::Decode(_))));
    }

    #[test]
    fn load_snapshot_missing_file() {
        let result = InMemoryStore::load_snapshot(Path::new("/nonexistent/vacancy.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
