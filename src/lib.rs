// wlosd - on-screen display daemon for Wayland compositors
// Command state machine, auto-hide timers and display backends

pub mod config;
pub mod osd;
pub mod render;

pub use osd::{Event, LoopState, Osd};
pub use render::{RenderError, Renderer};
