use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::America::Argentina::Buenos_Aires;
use ulid::Ulid;

use crate::model::{
    CapacityRange, Customer, Priority, Reservation, ReservationStatus, Restaurant, SeedData,
    Sector, ServiceHours, Table,
};
use crate::timeline::TimelineConfig;

/// The demo timeline: 2025-10-15, 11:00–24:00 in Buenos Aires, 15-minute
/// slots, 60px cells.
pub fn timeline_config() -> TimelineConfig {
    TimelineConfig::new(
        NaiveDate::from_ymd_opt(2025, 10, 15).expect("static demo date"),
        11,
        24,
        15,
        Buenos_Aires,
        60.0,
    )
    .expect("static demo config is valid")
}

fn ts(s: &str) -> DateTime<FixedOffset> {
    s.parse().expect("static demo timestamp")
}

/// Fixed demo dataset: Bistro Central, two sectors, five tables, two
/// committed reservations. Lunch and dinner service with a closed gap in
/// between.
pub fn seed_data() -> SeedData {
    let main_hall = Sector {
        id: Ulid::new(),
        name: "Main Hall".into(),
        color: "#3B82F6".into(),
        sort_order: 0,
    };
    let terrace = Sector {
        id: Ulid::new(),
        name: "Terrace".into(),
        color: "#10B981".into(),
        sort_order: 1,
    };

    let capacities = [(2u32, 2u32), (2, 4), (4, 6), (2, 4), (4, 8)];
    let tables: Vec<Table> = capacities
        .iter()
        .enumerate()
        .map(|(i, &(min, max))| Table {
            id: Ulid::new(),
            sector_id: if i < 3 { main_hall.id } else { terrace.id },
            name: format!("Table {}", i + 1),
            capacity: CapacityRange { min, max },
            sort_order: (i % 3) as u32,
        })
        .collect();

    let reservations = vec![
        Reservation {
            id: Ulid::new(),
            table_id: tables[0].id,
            customer: Customer {
                name: "John Doe".into(),
                phone: "+54 9 11 5555-1234".into(),
                email: Some("john@example.com".into()),
                notes: None,
            },
            party_size: 2,
            start_time: ts("2025-10-15T20:00:00-03:00"),
            end_time: ts("2025-10-15T21:30:00-03:00"),
            duration_minutes: 90,
            status: ReservationStatus::Confirmed,
            priority: Priority::Standard,
            notes: None,
            source: Some("web".into()),
            created_at: ts("2025-10-14T15:30:00-03:00"),
            updated_at: ts("2025-10-14T15:30:00-03:00"),
        },
        Reservation {
            id: Ulid::new(),
            table_id: tables[2].id,
            customer: Customer {
                name: "Jane Smith".into(),
                phone: "+54 9 11 5555-5678".into(),
                email: Some("jane@example.com".into()),
                notes: None,
            },
            party_size: 6,
            start_time: ts("2025-10-15T20:30:00-03:00"),
            end_time: ts("2025-10-15T22:00:00-03:00"),
            duration_minutes: 90,
            status: ReservationStatus::Seated,
            priority: Priority::Vip,
            notes: Some("Birthday celebration".into()),
            source: Some("phone".into()),
            created_at: ts("2025-10-15T19:45:00-03:00"),
            updated_at: ts("2025-10-15T20:35:00-03:00"),
        },
    ];

    SeedData {
        date: NaiveDate::from_ymd_opt(2025, 10, 15).expect("static demo date"),
        restaurant: Restaurant {
            id: Ulid::new(),
            name: "Bistro Central".into(),
            timezone: Buenos_Aires,
            service_hours: vec![
                ServiceHours {
                    start: "12:00".into(),
                    end: "16:00".into(),
                },
                ServiceHours {
                    start: "20:00".into(),
                    end: "00:00".into(),
                },
            ],
        },
        sectors: vec![main_hall, terrace],
        tables,
        reservations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CancelledPolicy, check_conflict, service_windows_from_hours};
    use crate::model::Candidate;

    #[test]
    fn seed_reservations_land_on_grid_inside_service_hours() {
        let cfg = timeline_config();
        let data = seed_data();
        let windows =
            service_windows_from_hours(&cfg, &data.restaurant.service_hours).unwrap();

        for r in &data.reservations {
            let range = cfg.slot_range_of(r);
            assert_eq!(
                range.duration_slots() * cfg.slot_minutes as i32,
                r.duration_minutes
            );
            let table = data.tables.iter().find(|t| t.id == r.table_id).unwrap();
            let candidate = Candidate {
                id: Some(r.id),
                table_id: r.table_id,
                start_slot: range.start_slot,
                end_slot: range.end_slot,
                party_size: r.party_size,
            };
            let verdict = check_conflict(
                &candidate,
                &[],
                table.capacity.max,
                cfg.total_slots(),
                &windows,
                CancelledPolicy::Block,
            );
            assert!(!verdict.has_conflict, "seed reservation {} conflicts", r.id);
        }
    }

    #[test]
    fn seed_layout_matches_floor_plan() {
        let data = seed_data();
        assert_eq!(data.sectors.len(), 2);
        assert_eq!(data.tables.len(), 5);
        let maxes: Vec<u32> = data.tables.iter().map(|t| t.capacity.max).collect();
        assert_eq!(maxes, vec![2, 4, 6, 4, 8]);
        // three tables in the main hall, two on the terrace
        let hall = data.sectors[0].id;
        assert_eq!(data.tables.iter().filter(|t| t.sector_id == hall).count(), 3);
    }
}
