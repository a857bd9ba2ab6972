use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::engine::EngineError;
use crate::model::{Existing, Minutes, Reservation, Slot, SlotRange};

/// Immutable description of one day's scheduling grid. Threaded as a
/// parameter into every mapping and checking call — there is no
/// process-wide singleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    pub date: NaiveDate,
    pub start_hour: u32,
    /// Hour 24 represents midnight at the close of the day.
    pub end_hour: u32,
    pub slot_minutes: u32,
    pub timezone: Tz,
    /// Base width of one slot cell at zoom 1.0, for pixel mapping only.
    pub cell_width_px: f64,
}

impl TimelineConfig {
    pub fn new(
        date: NaiveDate,
        start_hour: u32,
        end_hour: u32,
        slot_minutes: u32,
        timezone: Tz,
        cell_width_px: f64,
    ) -> Result<Self, EngineError> {
        if start_hour >= 24 {
            return Err(EngineError::InvalidConfig("start hour must be below 24"));
        }
        if end_hour > 24 {
            return Err(EngineError::InvalidConfig("end hour must be at most 24"));
        }
        if end_hour <= start_hour {
            return Err(EngineError::InvalidConfig("end hour must be after start hour"));
        }
        if slot_minutes == 0 {
            return Err(EngineError::InvalidConfig("slot granularity must be nonzero"));
        }
        if (end_hour - start_hour) * 60 % slot_minutes != 0 {
            return Err(EngineError::InvalidConfig(
                "slot granularity must divide the window evenly",
            ));
        }
        if !(cell_width_px.is_finite() && cell_width_px > 0.0) {
            return Err(EngineError::InvalidConfig("cell width must be positive"));
        }
        Ok(Self {
            date,
            start_hour,
            end_hour,
            slot_minutes,
            timezone,
            cell_width_px,
        })
    }

    pub fn total_minutes(&self) -> Minutes {
        ((self.end_hour - self.start_hour) * 60) as Minutes
    }

    pub fn total_slots(&self) -> Slot {
        self.total_minutes() / self.slot_minutes as Slot
    }

    /// The instant of slot 0: the configured date at the start hour in the
    /// configured timezone. The UTC offset is resolved per date by the
    /// timezone database; on a DST gap the UTC interpretation is used.
    pub fn day_start(&self) -> DateTime<Tz> {
        let naive = self
            .date
            .and_hms_opt(self.start_hour, 0, 0)
            .expect("start_hour validated below 24");
        naive
            .and_local_timezone(self.timezone)
            .latest()
            .unwrap_or_else(|| naive.and_utc().with_timezone(&self.timezone))
    }

    /// Signed minute offset of `t` from the timeline start. May be
    /// negative (before the window) or exceed `total_minutes` (after);
    /// callers range-check, this does not clamp.
    pub fn minutes_from_start(&self, t: DateTime<FixedOffset>) -> Minutes {
        t.signed_duration_since(self.day_start()).num_minutes() as Minutes
    }

    /// Nearest-slot rounding, not truncation, so drag gestures snap to the
    /// closest boundary.
    pub fn slot_from_minutes(&self, minutes: Minutes) -> Slot {
        (minutes as f64 / self.slot_minutes as f64).round() as Slot
    }

    pub fn minutes_at_slot(&self, slot: Slot) -> Minutes {
        slot * self.slot_minutes as Minutes
    }

    pub fn slot_of(&self, t: DateTime<FixedOffset>) -> Slot {
        self.slot_from_minutes(self.minutes_from_start(t))
    }

    /// Inverse mapping: slot index to absolute instant. Hour 24 lands on
    /// the next day's midnight as a real zoned instant.
    pub fn timestamp_at_slot(&self, slot: Slot) -> DateTime<FixedOffset> {
        (self.day_start() + Duration::minutes(self.minutes_at_slot(slot) as i64)).fixed_offset()
    }

    /// Snap a committed reservation's timestamps onto the grid.
    pub fn slot_range_of(&self, r: &Reservation) -> SlotRange {
        SlotRange::new(self.slot_of(r.start_time), self.slot_of(r.end_time))
    }

    /// Checker-facing snapshot of a committed reservation.
    pub fn existing_of(&self, r: &Reservation) -> Existing {
        let range = self.slot_range_of(r);
        Existing {
            id: r.id,
            start_slot: range.start_slot,
            end_slot: range.end_slot,
            status: r.status,
        }
    }

    // ── Pixel mapping ────────────────────────────────────────

    pub fn slot_to_px(&self, slot: Slot, zoom: f64) -> f64 {
        slot as f64 * self.cell_width_px * zoom
    }

    /// Same rounding convention as `slot_from_minutes`. Total for any
    /// float input: non-finite pixels saturate instead of panicking.
    pub fn px_to_slot(&self, px: f64, zoom: f64) -> Slot {
        (px / (self.cell_width_px * zoom)).round() as Slot
    }

    /// Pointer x-coordinate to a slot index, clamped onto the grid.
    pub fn slot_from_pointer(
        &self,
        client_x: f64,
        grid_left: f64,
        scroll_left: f64,
        zoom: f64,
    ) -> Slot {
        let x = (client_x - grid_left) + scroll_left;
        self.px_to_slot(x, zoom).clamp(0, self.total_slots())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Argentina::Buenos_Aires;

    fn config() -> TimelineConfig {
        TimelineConfig::new(
            NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
            11,
            24,
            15,
            Buenos_Aires,
            60.0,
        )
        .unwrap()
    }

    #[test]
    fn spec_window_has_52_slots() {
        let cfg = config();
        assert_eq!(cfg.total_minutes(), 780);
        assert_eq!(cfg.total_slots(), 52);
    }

    #[test]
    fn invalid_configs_rejected() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
        assert!(TimelineConfig::new(date, 24, 24, 15, Buenos_Aires, 60.0).is_err());
        assert!(TimelineConfig::new(date, 12, 12, 15, Buenos_Aires, 60.0).is_err());
        assert!(TimelineConfig::new(date, 12, 11, 15, Buenos_Aires, 60.0).is_err());
        assert!(TimelineConfig::new(date, 11, 24, 0, Buenos_Aires, 60.0).is_err());
        assert!(TimelineConfig::new(date, 11, 24, 7, Buenos_Aires, 60.0).is_err());
        assert!(TimelineConfig::new(date, 11, 24, 15, Buenos_Aires, f64::NAN).is_err());
    }

    #[test]
    fn day_start_carries_zone_offset() {
        let start = config().day_start();
        assert_eq!(
            start.fixed_offset(),
            "2025-10-15T11:00:00-03:00".parse::<DateTime<FixedOffset>>().unwrap()
        );
    }

    #[test]
    fn slot_time_roundtrip_over_whole_grid() {
        let cfg = config();
        for k in 0..=cfg.total_slots() {
            assert_eq!(cfg.slot_from_minutes(cfg.minutes_at_slot(k)), k);
            let t = cfg.timestamp_at_slot(k);
            assert_eq!(cfg.minutes_from_start(t), cfg.minutes_at_slot(k));
            assert_eq!(cfg.slot_of(t), k);
        }
    }

    #[test]
    fn final_slot_is_next_day_midnight() {
        let cfg = config();
        let t = cfg.timestamp_at_slot(cfg.total_slots());
        assert_eq!(
            t,
            "2025-10-16T00:00:00-03:00".parse::<DateTime<FixedOffset>>().unwrap()
        );
    }

    #[test]
    fn minutes_from_start_is_signed_and_unclamped() {
        let cfg = config();
        let before: DateTime<FixedOffset> = "2025-10-15T10:00:00-03:00".parse().unwrap();
        let after: DateTime<FixedOffset> = "2025-10-16T01:00:00-03:00".parse().unwrap();
        assert_eq!(cfg.minutes_from_start(before), -60);
        assert_eq!(cfg.minutes_from_start(after), 840);
    }

    #[test]
    fn slot_rounding_snaps_to_nearest() {
        let cfg = config();
        assert_eq!(cfg.slot_from_minutes(7), 0);
        assert_eq!(cfg.slot_from_minutes(8), 1);
        assert_eq!(cfg.slot_from_minutes(-8), -1);
        assert_eq!(cfg.slot_from_minutes(22), 1);
        assert_eq!(cfg.slot_from_minutes(23), 2);
    }

    #[test]
    fn pixel_mapping_matches_slot_rounding() {
        let cfg = config();
        assert_eq!(cfg.slot_to_px(4, 1.0), 240.0);
        assert_eq!(cfg.slot_to_px(4, 2.0), 480.0);
        assert_eq!(cfg.px_to_slot(240.0, 1.0), 4);
        assert_eq!(cfg.px_to_slot(90.0, 1.0), 2); // 1.5 cells rounds up
        assert_eq!(cfg.px_to_slot(89.0, 1.0), 1);
        assert_eq!(cfg.px_to_slot(240.0, 2.0), 2);
    }

    #[test]
    fn pointer_mapping_clamps_to_grid() {
        let cfg = config();
        assert_eq!(cfg.slot_from_pointer(-500.0, 0.0, 0.0, 1.0), 0);
        assert_eq!(cfg.slot_from_pointer(1_000_000.0, 0.0, 0.0, 1.0), 52);
        // 130px from grid left at 60px cells → 2.17 cells → slot 2
        assert_eq!(cfg.slot_from_pointer(150.0, 20.0, 0.0, 1.0), 2);
        // scroll offset shifts the visible origin
        assert_eq!(cfg.slot_from_pointer(150.0, 20.0, 600.0, 1.0), 12);
        assert_eq!(cfg.px_to_slot(f64::NAN, 1.0), 0); // saturating cast
    }
}
