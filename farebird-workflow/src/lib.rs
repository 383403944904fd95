//! Session-gated booking workflow.
//!
//! [`BookingController`] sits between a UI adapter and the backend: it
//! decides which actions require authentication, sequences the
//! search/book/refresh calls, and turns every failure into a
//! [`NotificationSink`](farebird_core::notify::NotificationSink) event so
//! adapters never handle raw errors.

pub mod controller;

pub use controller::{ActionError, BookingController, BookingOutcome, Section, SectionView};
