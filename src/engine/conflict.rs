use crate::model::{
    Candidate, ConflictCheck, ConflictReason, Existing, ReservationStatus, ServiceWindow, Slot,
    SlotRange,
};

use super::windows::is_within_service_windows;

/// Whether reservations with CANCELLED status still occupy their table
/// during overlap checks. `Block` reproduces the board's behavior of a
/// cancelled block holding its slot until deleted; `Ignore` frees the
/// range for new candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelledPolicy {
    #[default]
    Block,
    Ignore,
}

/// Order two unordered pointer-derived slot coordinates. This is the only
/// place swapped endpoints get fixed up — a genuinely inverted range
/// anywhere else is rejected by the checker, not repaired.
pub fn normalize_range(a: Slot, b: Slot) -> SlotRange {
    SlotRange::new(a.min(b), a.max(b))
}

/// Decide whether a candidate may legally occupy its table, and if not,
/// why and against which reservations.
///
/// Rules run in a fixed order and the first failure wins: structural
/// validity, service-hours containment, capacity, overlap. A single
/// reason is therefore always surfaced even when several apply. The
/// check is pure and allocation-light — it runs on every pointer move
/// during a drag and again at commit, and both calls must agree.
///
/// Malformed ranges (inverted or off the grid) report
/// `OutsideServiceHours`; there is no separate malformed reason, so
/// callers needing that distinction must validate structure themselves.
pub fn check_conflict(
    candidate: &Candidate,
    existing_same_table: &[Existing],
    table_capacity_max: u32,
    total_slots: Slot,
    service_windows: &[ServiceWindow],
    cancelled: CancelledPolicy,
) -> ConflictCheck {
    if candidate.start_slot < 0
        || candidate.end_slot > total_slots
        || candidate.start_slot >= candidate.end_slot
    {
        return ConflictCheck::rejected(ConflictReason::OutsideServiceHours);
    }
    let range = SlotRange::new(candidate.start_slot, candidate.end_slot);

    if !is_within_service_windows(&range, service_windows) {
        return ConflictCheck::rejected(ConflictReason::OutsideServiceHours);
    }

    // Only the maximum is a hard ceiling; seating a party below a table's
    // advisory minimum is allowed here.
    if candidate.party_size > table_capacity_max {
        return ConflictCheck::rejected(ConflictReason::CapacityExceeded);
    }

    let mut conflicts = Vec::new();
    for r in existing_same_table {
        if candidate.id.is_some_and(|id| id == r.id) {
            continue; // editing a reservation never collides with itself
        }
        if cancelled == CancelledPolicy::Ignore && r.status == ReservationStatus::Cancelled {
            continue;
        }
        if range.overlaps(&SlotRange::new(r.start_slot, r.end_slot)) {
            conflicts.push(r.id);
        }
    }
    if !conflicts.is_empty() {
        return ConflictCheck::overlapping(conflicts);
    }

    ConflictCheck::clean()
}
