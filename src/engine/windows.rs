use crate::engine::EngineError;
use crate::model::{Minutes, ServiceHours, ServiceWindow, Slot, SlotRange};
use crate::timeline::TimelineConfig;

/// True iff some window fully contains the candidate range. An empty
/// window list means "no restriction" — always true — so the checker can
/// run in contexts without service-hour enforcement.
pub fn is_within_service_windows(range: &SlotRange, windows: &[ServiceWindow]) -> bool {
    windows.is_empty()
        || windows
            .iter()
            .any(|w| w.contains(range.start_slot, range.end_slot))
}

/// "HH:MM" to minutes of day. "00:00" reads as 24:00 so an end-of-day
/// close compares correctly against evening starts.
fn minutes_of_day(hhmm: &str) -> Result<Minutes, EngineError> {
    let bad = || EngineError::BadServiceHours(hhmm.to_string());
    let (hh, mm) = hhmm.split_once(':').ok_or_else(bad)?;
    let hh: u32 = hh.parse().map_err(|_| bad())?;
    let mm: u32 = mm.parse().map_err(|_| bad())?;
    if hh > 24 || mm > 59 {
        return Err(bad());
    }
    let hours = if hh == 0 { 24 } else { hh };
    Ok((hours * 60 + mm) as Minutes)
}

/// Convert configured opening hours into slot windows on the timeline
/// grid. Windows are clamped onto the grid; ones that fall entirely
/// outside it are dropped.
pub fn service_windows_from_hours(
    config: &TimelineConfig,
    hours: &[ServiceHours],
) -> Result<Vec<ServiceWindow>, EngineError> {
    let open_minute = (config.start_hour * 60) as Minutes;
    let total = config.total_slots();

    let mut windows = Vec::with_capacity(hours.len());
    for h in hours {
        let start = minutes_of_day(&h.start)?;
        let end = minutes_of_day(&h.end)?;
        if end <= start {
            return Err(EngineError::BadServiceHours(format!(
                "{}-{}",
                h.start, h.end
            )));
        }
        let start_slot = config.slot_from_minutes(start - open_minute).clamp(0, total);
        let end_slot = config.slot_from_minutes(end - open_minute).clamp(0, total);
        if start_slot < end_slot {
            windows.push(ServiceWindow::new(start_slot, end_slot));
        }
    }
    Ok(windows)
}

/// A legal generation start: slot index plus the contiguous room, in
/// slots, before its window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenStart {
    pub slot: Slot,
    pub room: Slot,
}

/// Precompute every start slot whose remaining room before the window
/// boundary fits at least `min_duration_slots`. The generator draws
/// uniformly from this table instead of rejecting its way out of the
/// closed gap.
pub fn open_starts(windows: &[ServiceWindow], min_duration_slots: Slot) -> Vec<OpenStart> {
    let mut starts = Vec::new();
    for w in windows {
        for slot in w.start_slot..w.end_slot {
            let room = w.end_slot - slot;
            if room >= min_duration_slots {
                starts.push(OpenStart { slot, room });
            }
        }
    }
    starts
}
