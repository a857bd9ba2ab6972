use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use tableline::engine::{self, CancelledPolicy};
use tableline::model::Candidate;
use tableline::seed;
use tableline::store::BoardStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let count: usize = std::env::var("TABLELINE_SEED_COUNT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);
    let rng_seed: Option<u64> = std::env::var("TABLELINE_RNG_SEED")
        .ok()
        .and_then(|s| s.parse().ok());

    let config = seed::timeline_config();
    let data = seed::seed_data();
    let windows = engine::service_windows_from_hours(&config, &data.restaurant.service_hours)?;

    let mut rng = match rng_seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let generated = engine::generate_reservations(&data, &config, count, &mut rng);

    let mut store = BoardStore::from_reservations(data.reservations.iter().cloned());
    for r in generated {
        store.upsert(r);
    }

    info!(
        "{} — {} on a {}-slot grid of {} minutes",
        data.restaurant.name,
        config.date,
        config.total_slots(),
        config.slot_minutes
    );
    let spans: Vec<String> = windows
        .iter()
        .map(|w| format!("[{}..{})", w.start_slot, w.end_slot))
        .collect();
    info!("  service windows: {}", spans.join(" "));
    info!("  reservations on the board: {}", store.len());

    for table in &data.tables {
        let on_table = store.reservations_for_table(table.id);
        let blocks: Vec<String> = on_table
            .iter()
            .map(|r| {
                let range = config.slot_range_of(r);
                format!(
                    "[{}..{}) {} x{}",
                    range.start_slot, range.end_slot, r.customer.name, r.party_size
                )
            })
            .collect();
        info!(
            "  {} (seats {}-{}): {}",
            table.name,
            table.capacity.min,
            table.capacity.max,
            if blocks.is_empty() { "free all day".into() } else { blocks.join(", ") }
        );
    }

    // A sample drag verdict over the first table's dinner service.
    let table = &data.tables[0];
    let candidate = Candidate {
        id: None,
        table_id: table.id,
        start_slot: 38,
        end_slot: 44,
        party_size: 2,
    };
    let verdict = engine::check_conflict(
        &candidate,
        &store.existing_on_table(table.id, &config),
        table.capacity.max,
        config.total_slots(),
        &windows,
        CancelledPolicy::Block,
    );
    info!(
        "drag check on {} [38..44): conflict={} reason={:?} against={:?}",
        table.name, verdict.has_conflict, verdict.reason, verdict.conflicting_reservation_ids
    );

    Ok(())
}
