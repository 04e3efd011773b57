//! Presentation events.
//!
//! The engine reports reveals, resolutions, eliminations and victory as
//! discrete `GameEvent`s pushed into an `EventSink`. Rendering them is the
//! adapter's job.

pub mod event;
pub mod sink;

pub use event::{GameEvent, HandReveal, SeatInfo};
pub use sink::{EventLog, EventSink};
