use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::model::*;

// ── Room selection ────────────────────────────────────────────────

/// Rooms holding at least one active booking that overlaps `query`.
fn blocked_rooms(bookings: &[Booking], query: &DateRange) -> HashSet<RoomId> {
    bookings
        .iter()
        .filter(|b| b.is_active && b.overlaps_dates(query))
        .map(|b| b.room_id)
        .collect()
}

/// First room, in catalog order, with no active booking overlapping `query`.
pub fn first_free_room(rooms: &[Room], bookings: &[Booking], query: &DateRange) -> Option<RoomId> {
    let blocked = blocked_rooms(bookings, query);
    rooms.iter().map(|r| r.id).find(|id| !blocked.contains(id))
}

/// Every room free for the whole of `query`, in catalog order.
pub fn free_rooms(rooms: &[Room], bookings: &[Booking], query: &DateRange) -> Vec<RoomId> {
    let blocked = blocked_rooms(bookings, query);
    rooms
        .iter()
        .map(|r| r.id)
        .filter(|id| !blocked.contains(id))
        .collect()
}

// ── Occupancy ─────────────────────────────────────────────────────

/// Merge sorted ranges that overlap or sit on consecutive days into disjoint runs.
pub fn merge_days(sorted: &[DateRange]) -> Vec<DateRange> {
    let mut merged: Vec<DateRange> = Vec::new();
    for &range in sorted {
        if let Some(last) = merged.last_mut()
            && last.end.succ_opt().is_none_or(|next| range.start <= next)
        {
            last.end = last.end.max(range.end);
            continue;
        }
        merged.push(range);
    }
    merged
}

/// Intersection of two sorted, disjoint run lists.
pub fn intersect_days(a: &[DateRange], b: &[DateRange]) -> Vec<DateRange> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(common) = a[i].clamp_to(&b[j]) {
            result.push(common);
        }
        if a[i].end < b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

/// Days of `window` covered by at least one active booking, per room id.
fn coverage_by_room(bookings: &[Booking], window: &DateRange) -> HashMap<RoomId, Vec<DateRange>> {
    let mut by_room: HashMap<RoomId, Vec<DateRange>> = HashMap::new();
    for booking in bookings.iter().filter(|b| b.is_active) {
        if let Some(clamped) = booking.range().clamp_to(window) {
            by_room.entry(booking.room_id).or_default().push(clamped);
        }
    }
    for ranges in by_room.values_mut() {
        ranges.sort_by_key(|r| r.start);
        *ranges = merge_days(ranges);
    }
    by_room
}

/// Maximal runs of days in `window` on which every room has an active booking.
///
/// An empty catalog is never fully occupied.
pub fn fully_occupied_spans(rooms: &[Room], bookings: &[Booking], window: &DateRange) -> Vec<DateRange> {
    if rooms.is_empty() || window.is_empty() {
        return Vec::new();
    }
    let coverage = coverage_by_room(bookings, window);

    let mut occupied = vec![*window];
    for room in rooms {
        let Some(covered) = coverage.get(&room.id) else {
            return Vec::new();
        };
        occupied = intersect_days(&occupied, covered);
        if occupied.is_empty() {
            break;
        }
    }
    occupied
}

/// Every fully occupied day in `window`, ascending.
pub fn fully_occupied_dates(rooms: &[Room], bookings: &[Booking], window: &DateRange) -> Vec<NaiveDate> {
    fully_occupied_spans(rooms, bookings, window)
        .iter()
        .flat_map(|run| run.days())
        .collect()
}
