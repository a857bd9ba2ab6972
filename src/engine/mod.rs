mod conflict;
mod error;
mod generator;
mod windows;

pub use conflict::{CancelledPolicy, check_conflict, normalize_range};
pub use error::EngineError;
pub use generator::generate_reservations;
pub use windows::{OpenStart, is_within_service_windows, open_starts, service_windows_from_hours};
