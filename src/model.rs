use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Slot index on the timeline grid — the only scheduling coordinate.
/// Signed: the mapper may produce negative indices for instants before
/// the timeline start, and callers range-check.
pub type Slot = i32;

/// Signed minute offset from the timeline start.
pub type Minutes = i32;

pub type ReservationId = Ulid;
pub type TableId = Ulid;
pub type SectorId = Ulid;

/// Half-open slot interval `[start_slot, end_slot)`.
///
/// An inverted range (`end_slot <= start_slot`) is never valid for
/// scheduling; the conflict checker rejects it as data rather than this
/// type panicking, because inverted candidates are an ordinary outcome of
/// raw pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRange {
    pub start_slot: Slot,
    pub end_slot: Slot,
}

impl SlotRange {
    pub fn new(start_slot: Slot, end_slot: Slot) -> Self {
        Self { start_slot, end_slot }
    }

    pub fn duration_slots(&self) -> Slot {
        self.end_slot - self.start_slot
    }

    /// Open-interval overlap: touching endpoints do not overlap, so
    /// back-to-back reservations are legal.
    pub fn overlaps(&self, other: &SlotRange) -> bool {
        self.start_slot < other.end_slot && other.start_slot < self.end_slot
    }

    pub fn contains_slot(&self, s: Slot) -> bool {
        self.start_slot <= s && s < self.end_slot
    }

    /// Returns true if `self` fully contains `other`.
    pub fn contains_range(&self, other: &SlotRange) -> bool {
        self.start_slot <= other.start_slot && other.end_slot <= self.end_slot
    }
}

/// One permitted sub-range of the day (e.g. lunch or dinner service).
/// A candidate is within service hours only when fully contained in a
/// single window — straddling a boundary is a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceWindow {
    pub start_slot: Slot,
    pub end_slot: Slot,
}

impl ServiceWindow {
    pub fn new(start_slot: Slot, end_slot: Slot) -> Self {
        Self { start_slot, end_slot }
    }

    pub fn contains(&self, start_slot: Slot, end_slot: Slot) -> bool {
        start_slot >= self.start_slot && end_slot <= self.end_slot
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Seated,
    Finished,
    NoShow,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Standard,
    Vip,
    LargeGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    pub id: SectorId,
    pub name: String,
    pub color: String,
    pub sort_order: u32,
}

/// Party-size range a table can seat. `min` is advisory (the generator
/// respects it); only `max` is a hard ceiling in conflict checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRange {
    pub min: u32,
    pub max: u32,
}

/// Static reference data — tables are never mutated by the scheduling
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub sector_id: SectorId,
    pub name: String,
    pub capacity: CapacityRange,
    pub sort_order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub table_id: TableId,
    pub customer: Customer,
    pub party_size: u32,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub duration_minutes: Minutes,
    pub status: ReservationStatus,
    pub priority: Priority,
    pub notes: Option<String>,
    pub source: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

/// A proposed reservation (new, moved, or resized) not yet committed.
/// `id` carries the candidate's own identity during edit/move so the
/// checker can exclude the reservation from colliding with itself.
/// Slots are raw pointer-derived integers; the checker validates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub id: Option<ReservationId>,
    pub table_id: TableId,
    pub start_slot: Slot,
    pub end_slot: Slot,
    pub party_size: u32,
}

/// Checker-facing snapshot of a committed reservation on one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Existing {
    pub id: ReservationId,
    pub start_slot: Slot,
    pub end_slot: Slot,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    Overlap,
    CapacityExceeded,
    OutsideServiceHours,
}

/// Outcome of a conflict check. Exactly one reason per failing check;
/// colliding ids are populated only for `Overlap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictCheck {
    pub has_conflict: bool,
    pub conflicting_reservation_ids: Vec<ReservationId>,
    pub reason: Option<ConflictReason>,
}

impl ConflictCheck {
    pub fn clean() -> Self {
        Self {
            has_conflict: false,
            conflicting_reservation_ids: Vec::new(),
            reason: None,
        }
    }

    pub fn rejected(reason: ConflictReason) -> Self {
        Self {
            has_conflict: true,
            conflicting_reservation_ids: Vec::new(),
            reason: Some(reason),
        }
    }

    pub fn overlapping(ids: Vec<ReservationId>) -> Self {
        Self {
            has_conflict: true,
            conflicting_reservation_ids: ids,
            reason: Some(ConflictReason::Overlap),
        }
    }
}

/// Opening hours as configured, "HH:MM" pairs. An end of "00:00" means
/// midnight at the close of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHours {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: Ulid,
    pub name: String,
    pub timezone: chrono_tz::Tz,
    pub service_hours: Vec<ServiceHours>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedData {
    pub date: chrono::NaiveDate,
    pub restaurant: Restaurant,
    pub sectors: Vec<Sector>,
    pub tables: Vec<Table>,
    pub reservations: Vec<Reservation>,
}
