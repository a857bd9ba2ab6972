//! Slot-based scheduling core for a reservation timeline board.
//!
//! Wall-clock time maps onto a discrete grid of 15-minute slots;
//! candidate reservations (new, moved, or resized) are validated against
//! overlap, capacity, and service-hour rules; and the board can be seeded
//! with non-conflicting synthetic data. Every check is a pure function
//! over a caller-supplied snapshot. Conflicts are reported as data, not
//! errors — rejection is the common case while a block is being dragged,
//! and the live preview must agree exactly with the verdict at commit.

pub mod engine;
pub mod model;
pub mod seed;
pub mod store;
pub mod timeline;
