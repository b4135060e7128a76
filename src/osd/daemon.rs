//! Event loop: the single owner of all display state.
//!
//! The stdin reader thread, the auto-hide timers and the signal handler only
//! ever post [`Event`]s. The loop applies them one at a time, so windows,
//! items and timers are never mutated concurrently.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};
use wlosd_protocol::{help_text, Address, Command, Hide, Show};

use super::state::{HideOutcome, Item, OverlayStateStore, Placement};
use super::timer::{Expiry, TimerManager};
use crate::render::Renderer;

/// Work posted to the event loop.
#[derive(Debug)]
pub enum Event {
    /// A parsed protocol command (a `show` already carries its body)
    Command(Command),
    /// An auto-hide timer ran out
    Expired(Expiry),
    /// stdin reached end-of-file or became unreadable
    Closed,
    /// SIGINT or SIGTERM
    Interrupted,
}

/// Loop state after handling an event. `Exiting` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Exiting,
}

/// Display context: windows, timers, renderer and stdout.
pub struct Osd<R: Renderer> {
    store: OverlayStateStore,
    timers: TimerManager,
    renderer: R,
    stylesheet: Option<PathBuf>,
    out: Box<dyn Write>,
}

impl<R: Renderer> Osd<R> {
    /// Create the context and apply the stylesheet, if one is configured.
    pub fn new(
        renderer: R,
        timers: TimerManager,
        stylesheet: Option<PathBuf>,
        out: Box<dyn Write>,
    ) -> Self {
        let mut osd = Self {
            store: OverlayStateStore::new(),
            timers,
            renderer,
            stylesheet,
            out,
        };
        if let Some(path) = osd.stylesheet.clone() {
            osd.apply_stylesheet(&path);
        }
        osd
    }

    /// Drain events until one ends the loop. Returns the context for
    /// inspection; pending timers are left to die with the runtime.
    pub async fn run(mut self, mut events: UnboundedReceiver<Event>) -> Self {
        info!("event loop running");
        while let Some(event) = events.recv().await {
            if self.handle(event) == LoopState::Exiting {
                break;
            }
        }
        info!("event loop exiting");
        self
    }

    /// Apply one event to completion.
    pub fn handle(&mut self, event: Event) -> LoopState {
        match event {
            Event::Command(command) => return self.dispatch(command),
            Event::Expired(expiry) => {
                if self.timers.claim(&expiry) {
                    debug!(uid = %expiry.address, "auto-hide");
                    self.hide(&expiry.address.window, &expiry.address.sub);
                } else {
                    debug!(uid = %expiry.address, "ignoring superseded timer");
                }
            }
            Event::Closed => {
                info!("stdin was closed");
                return LoopState::Exiting;
            }
            Event::Interrupted => {
                info!("interrupted");
                return LoopState::Exiting;
            }
        }
        LoopState::Running
    }

    fn dispatch(&mut self, command: Command) -> LoopState {
        match command {
            Command::Show(show) => self.show(show),
            Command::Hide(Hide::Uids(addrs)) => {
                for addr in &addrs {
                    self.hide(&addr.window, &addr.sub);
                }
            }
            Command::Hide(Hide::Patterns(patterns)) => {
                let hidden = self.hide_matching(|uid| patterns.matches(uid));
                debug!(hidden, "pattern hide");
            }
            Command::ListUids => self.print_uids(),
            Command::ReloadCss => self.reload_css(),
            Command::Help(cmd) => {
                let mut text = help_text(cmd.as_deref());
                if !text.ends_with('\n') {
                    text.push('\n');
                }
                self.emit(&text);
            }
            Command::Exit => return LoopState::Exiting,
        }
        LoopState::Running
    }

    /// Show or replace a message and re-arm its auto-hide timer.
    pub fn show(&mut self, show: Show) {
        let Show {
            address,
            classes,
            window_classes,
            markup,
            output,
            hide_after,
            anchors,
            text,
            ..
        } = show;

        self.timers.cancel(&address.window, &address.sub);

        let item = Item {
            sub_uid: address.sub.clone(),
            text,
            markup,
            classes,
        };
        let placement = Placement {
            classes: window_classes,
            anchors,
            output,
        };
        let outcome = self.store.show(&address.window, item, placement);
        if outcome.created {
            debug!(window = %address.window, "created window");
        }
        for sub in &outcome.evicted {
            self.timers.cancel(&address.window, sub);
        }

        if let Some(window) = self.store.window(&address.window) {
            self.renderer.present(window);
        }

        if let Some(after) = hide_after {
            self.timers.schedule(&address.window, &address.sub, after);
        }
    }

    /// Hide a whole window (empty `sub_uid`) or one item of it.
    pub fn hide(&mut self, window_uid: &str, sub_uid: &str) {
        if sub_uid.is_empty() {
            self.timers.cancel_all(window_uid);
        } else {
            self.timers.cancel(window_uid, sub_uid);
        }

        match self.store.hide(window_uid, sub_uid) {
            HideOutcome::WindowDestroyed => {
                self.timers.cancel_all(window_uid);
                self.renderer.destroy(window_uid);
            }
            HideOutcome::ItemRemoved => {
                if let Some(window) = self.store.window(window_uid) {
                    self.renderer.present(window);
                }
            }
            HideOutcome::UnknownWindow | HideOutcome::UnknownItem => {
                warn!("no such uid: {}", Address::new(window_uid, sub_uid));
            }
        }
    }

    /// Hide every currently listed uid accepted by `predicate`.
    ///
    /// The list is taken once up front and each selected uid is hidden as a
    /// literal target, so a matching window address takes its items with it.
    pub fn hide_matching<F: Fn(&str) -> bool>(&mut self, predicate: F) -> usize {
        let targets: Vec<String> = self
            .store
            .list_uids()
            .into_iter()
            .filter(|uid| predicate(uid))
            .collect();

        for uid in &targets {
            let (window, sub) = Address::split(uid);
            self.hide(window, sub);
        }
        targets.len()
    }

    pub fn list_uids(&self) -> Vec<String> {
        self.store.list_uids()
    }

    /// Re-read the configured stylesheet and apply it again.
    pub fn reload_css(&mut self) {
        match self.stylesheet.clone() {
            Some(path) => self.apply_stylesheet(&path),
            None => warn!("no css file configured; nothing to reload"),
        }
    }

    fn apply_stylesheet(&mut self, path: &Path) {
        match self.renderer.load_stylesheet(path) {
            Ok(()) => info!("applied css file {}", path.display()),
            Err(e) => warn!("{e}; keeping the previous style"),
        }
    }

    fn print_uids(&mut self) {
        let uids = self.store.list_uids();
        if uids.is_empty() {
            return;
        }
        let mut text = uids.join("\n");
        text.push('\n');
        self.emit(&text);
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = write_flush(&mut self.out, text) {
            warn!("failed to write to stdout: {e}");
        }
    }

    pub fn store(&self) -> &OverlayStateStore {
        &self.store
    }

    pub fn timers(&self) -> &TimerManager {
        &self.timers
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

fn write_flush(out: &mut dyn Write, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}
