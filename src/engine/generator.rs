use chrono::Utc;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};
use ulid::Ulid;

use crate::model::{
    Candidate, Customer, Existing, Minutes, Priority, Reservation, ReservationStatus, SeedData,
    ServiceWindow, Slot, TableId,
};
use crate::timeline::TimelineConfig;

use super::conflict::{CancelledPolicy, check_conflict};
use super::windows::{open_starts, service_windows_from_hours};

const FIRST_NAMES: [&str; 10] = [
    "Ana", "Juan", "Sofía", "Mateo", "Lucía", "Pedro", "Valen", "Nico", "Mili", "Tomi",
];
const LAST_NAMES: [&str; 8] = [
    "Gómez", "Pérez", "Rodríguez", "Fernández", "López", "Martínez", "Díaz", "Sánchez",
];
const SOURCES: [&str; 4] = ["web", "phone", "walkin", "app"];
const STATUSES: [ReservationStatus; 6] = [
    ReservationStatus::Pending,
    ReservationStatus::Confirmed,
    ReservationStatus::Seated,
    ReservationStatus::Finished,
    ReservationStatus::NoShow,
    ReservationStatus::Cancelled,
];
const PRIORITIES: [Priority; 3] = [Priority::Standard, Priority::Vip, Priority::LargeGroup];

/// Candidate duration menu, minutes.
const DURATION_MENU: [Minutes; 7] = [30, 45, 60, 75, 90, 105, 120];
const MIN_DURATION_MINUTES: Minutes = 30;

fn random_name(rng: &mut impl Rng) -> String {
    format!(
        "{} {}",
        FIRST_NAMES.choose(rng).unwrap(),
        LAST_NAMES.choose(rng).unwrap()
    )
}

fn random_phone(rng: &mut impl Rng) -> String {
    format!(
        "+54 9 11 {:04}-{:04}",
        rng.gen_range(1000..=9999),
        rng.gen_range(1000..=9999)
    )
}

/// Produce up to `count` synthetic reservations satisfying every
/// constraint the conflict checker enforces. Candidates are validated
/// through the same `check_conflict` the interactive path uses, against
/// the list being built, so the generator cannot drift from the checker's
/// rules.
///
/// Best-effort: a bounded retry budget of `count * 10` attempts caps the
/// loop, and a short result is a valid outcome the caller must accept —
/// not a failure to retry.
///
/// The random source is injected so tests can seed it; the contract is
/// constraint satisfaction, not reproducibility.
pub fn generate_reservations(
    seed: &SeedData,
    config: &TimelineConfig,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Reservation> {
    if count == 0 || seed.tables.is_empty() {
        return Vec::new();
    }

    let windows = match service_windows_from_hours(config, &seed.restaurant.service_hours) {
        Ok(w) => w,
        Err(e) => {
            warn!("generating without service-hour restriction: {e}");
            Vec::new()
        }
    };

    let slot_minutes = config.slot_minutes as Minutes;
    let min_duration_slots = (MIN_DURATION_MINUTES + slot_minutes - 1) / slot_minutes;
    let duration_menu: Vec<Slot> = DURATION_MENU
        .iter()
        .filter(|d| *d % slot_minutes == 0)
        .map(|d| d / slot_minutes)
        .collect();

    // An unrestricted board still needs a start table to draw from.
    let start_pool = if windows.is_empty() {
        open_starts(&[ServiceWindow::new(0, config.total_slots())], min_duration_slots)
    } else {
        open_starts(&windows, min_duration_slots)
    };
    if start_pool.is_empty() || duration_menu.is_empty() {
        warn!("no legal start slots on this timeline, nothing generated");
        return Vec::new();
    }

    let mut out: Vec<Reservation> = Vec::with_capacity(count);
    let mut placed: Vec<(TableId, Existing)> = Vec::with_capacity(count);
    let mut attempts = 0usize;
    let max_attempts = count * 10;

    while out.len() < count && attempts < max_attempts {
        attempts += 1;

        let table = seed.tables.choose(rng).unwrap();
        let start = *start_pool.choose(rng).unwrap();
        let duration = *duration_menu.choose(rng).unwrap();

        // Clip to the room left in the window; too-short remainders are
        // rejected rather than padded.
        let duration = duration.min(start.room);
        if duration < min_duration_slots {
            continue;
        }

        let party_size = rng.gen_range(table.capacity.min..=table.capacity.max);
        let candidate = Candidate {
            id: None,
            table_id: table.id,
            start_slot: start.slot,
            end_slot: start.slot + duration,
            party_size,
        };

        let same_table: Vec<Existing> = placed
            .iter()
            .filter(|(tid, _)| *tid == table.id)
            .map(|(_, e)| *e)
            .collect();
        let verdict = check_conflict(
            &candidate,
            &same_table,
            table.capacity.max,
            config.total_slots(),
            &windows,
            CancelledPolicy::Block,
        );
        if verdict.has_conflict {
            continue;
        }

        let id = Ulid::new();
        let status = *STATUSES.choose(rng).unwrap();
        let start_time = config.timestamp_at_slot(candidate.start_slot);
        let end_time = config.timestamp_at_slot(candidate.end_slot);
        let now = Utc::now().fixed_offset();
        placed.push((
            table.id,
            Existing {
                id,
                start_slot: candidate.start_slot,
                end_slot: candidate.end_slot,
                status,
            },
        ));
        out.push(Reservation {
            id,
            table_id: table.id,
            customer: Customer {
                name: random_name(rng),
                phone: random_phone(rng),
                email: None,
                notes: None,
            },
            party_size,
            start_time,
            end_time,
            duration_minutes: duration * slot_minutes,
            status,
            priority: *PRIORITIES.choose(rng).unwrap(),
            notes: None,
            source: Some((*SOURCES.choose(rng).unwrap()).to_string()),
            created_at: now,
            updated_at: now,
        });
    }

    if out.len() < count {
        warn!(
            generated = out.len(),
            requested = count,
            attempts,
            "reservation generation fell short of request"
        );
    } else {
        debug!(generated = out.len(), attempts, "seed generation finished");
    }

    out
}
