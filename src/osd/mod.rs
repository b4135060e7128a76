//! On-screen display core.
//!
//! - `state`: windows and their items
//! - `timer`: auto-hide timers
//! - `reader`: stdin reader thread that parses commands
//! - `daemon`: event loop that owns state, timers and the renderer

pub mod daemon;
pub mod reader;
pub mod state;
pub mod timer;

pub use daemon::{Event, LoopState, Osd};
pub use state::{Item, OverlayStateStore, Placement, Window};
pub use timer::{Expiry, TimerManager};
