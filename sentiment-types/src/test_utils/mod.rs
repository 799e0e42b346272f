//! In-memory fakes for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that let protocol code be exercised without a ledger
//! or a real status sink.

mod recording_reporter;
mod static_source;

pub use recording_reporter::{RecordedStatus, RecordingReporter};
pub use static_source::StaticSource;
