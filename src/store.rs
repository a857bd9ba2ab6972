use std::collections::HashMap;

use crate::engine::{CancelledPolicy, check_conflict};
use crate::model::{
    Candidate, ConflictCheck, Existing, Reservation, ReservationId, ServiceWindow, Table, TableId,
};
use crate::timeline::TimelineConfig;

/// In-memory reservation board — the single-actor store the interaction
/// layer commits to. The scheduling core only ever sees snapshots taken
/// from here; it never reads the store itself, so callers re-check after
/// any mutation between snapshot and commit.
#[derive(Debug, Default)]
pub struct BoardStore {
    by_id: HashMap<ReservationId, Reservation>,
    ids_by_table: HashMap<TableId, Vec<ReservationId>>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reservations(reservations: impl IntoIterator<Item = Reservation>) -> Self {
        let mut store = Self::new();
        for r in reservations {
            store.upsert(r);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: &ReservationId) -> Option<&Reservation> {
        self.by_id.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reservation> {
        self.by_id.values()
    }

    /// Insert or replace a reservation, keeping the per-table index
    /// sorted by start time. A move to another table drops the old index
    /// entry.
    pub fn upsert(&mut self, r: Reservation) {
        let id = r.id;
        let table_id = r.table_id;
        if let Some(prev) = self.by_id.insert(id, r)
            && prev.table_id != table_id
            && let Some(ids) = self.ids_by_table.get_mut(&prev.table_id)
        {
            ids.retain(|x| x != &id);
        }
        let ids = self.ids_by_table.entry(table_id).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
        ids.sort_by_key(|rid| self.by_id[rid].start_time);
    }

    pub fn remove(&mut self, id: &ReservationId) -> Option<Reservation> {
        let r = self.by_id.remove(id)?;
        if let Some(ids) = self.ids_by_table.get_mut(&r.table_id) {
            ids.retain(|x| x != id);
        }
        Some(r)
    }

    /// Reservations on one table, ordered by start time.
    pub fn reservations_for_table(&self, table_id: TableId) -> Vec<&Reservation> {
        self.ids_by_table
            .get(&table_id)
            .map(|ids| ids.iter().map(|id| &self.by_id[id]).collect())
            .unwrap_or_default()
    }

    /// Checker-facing snapshot of one table's reservations.
    pub fn existing_on_table(&self, table_id: TableId, config: &TimelineConfig) -> Vec<Existing> {
        self.reservations_for_table(table_id)
            .into_iter()
            .map(|r| config.existing_of(r))
            .collect()
    }

    /// Run the conflict check against the current board and apply the
    /// reservation only when clean. Returns the check either way so the
    /// caller can surface the rejection reason; the candidate carries the
    /// reservation's own id, so re-committing an edit never collides with
    /// its previous version.
    pub fn try_commit(
        &mut self,
        reservation: Reservation,
        table: &Table,
        config: &TimelineConfig,
        service_windows: &[ServiceWindow],
        cancelled: CancelledPolicy,
    ) -> ConflictCheck {
        let range = config.slot_range_of(&reservation);
        let candidate = Candidate {
            id: Some(reservation.id),
            table_id: reservation.table_id,
            start_slot: range.start_slot,
            end_slot: range.end_slot,
            party_size: reservation.party_size,
        };
        let existing = self.existing_on_table(reservation.table_id, config);
        let verdict = check_conflict(
            &candidate,
            &existing,
            table.capacity.max,
            config.total_slots(),
            service_windows,
            cancelled,
        );
        if !verdict.has_conflict {
            self.upsert(reservation);
        }
        verdict
    }
}
