//! Display backends.
//!
//! The event loop describes what should be on screen; a [`Renderer`] makes it
//! so. Backends:
//! - `headless`: keeps surface records and logs changes (scripting, tests)
//! - `gtk`: GTK4 windows on the wlr-layer-shell overlay layer (feature `gtk`)

pub mod headless;

#[cfg(feature = "gtk")]
pub mod gtk;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::osd::state::Window;

/// Errors from display backends
#[derive(Error, Debug)]
pub enum RenderError {
    /// No display connection could be made
    #[error("no display: {0}")]
    NoDisplay(String),

    /// The display cannot host overlay surfaces, or the backend is missing
    #[error("backend not supported: {0}")]
    Unsupported(String),

    /// Stylesheet could not be read
    #[error("failed to read css file {path:?}: {source}")]
    Stylesheet {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can put overlay windows on screen.
///
/// All calls happen on the event loop thread.
pub trait Renderer {
    /// Create the surface for `window` if needed and bring it up to date
    /// with the window's placement and items.
    fn present(&mut self, window: &Window);

    /// Tear down the surface of a window that no longer exists.
    fn destroy(&mut self, window_uid: &str);

    /// Read a stylesheet and make it the active one. On error the
    /// previously applied stylesheet stays in effect.
    fn load_stylesheet(&mut self, path: &Path) -> Result<(), RenderError>;
}
