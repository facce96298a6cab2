//! Seams implemented outside `freshguard-core`.

pub mod clock;
pub mod dispatcher;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dispatcher::Dispatcher;
