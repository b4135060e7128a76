//! Window and item bookkeeping.
//!
//! Windows are kept in creation order and items in insertion order, both in
//! plain vectors with linear lookup. Display side effects and timers are the
//! caller's business; this module only reports what changed.

use wlosd_protocol::Anchors;

/// One message inside a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Empty for a whole-window message
    pub sub_uid: String,
    pub text: String,
    pub markup: bool,
    pub classes: Vec<String>,
}

/// Window-level settings, overwritten on every show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    pub classes: Vec<String>,
    pub anchors: Anchors,
    pub output: Option<String>,
}

/// An overlay window and its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub uid: String,
    pub items: Vec<Item>,
    pub placement: Placement,
}

impl Window {
    fn new(uid: &str) -> Self {
        Self {
            uid: uid.to_string(),
            items: Vec::new(),
            placement: Placement::default(),
        }
    }

    /// True while the window shows a single whole-window message.
    pub fn is_whole(&self) -> bool {
        matches!(self.items.as_slice(), [only] if only.sub_uid.is_empty())
    }

    pub fn item(&self, sub_uid: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.sub_uid == sub_uid)
    }

    /// Insert or replace an item. Returns the sub-uids of items pushed out.
    fn put(&mut self, item: Item) -> Vec<String> {
        if item.sub_uid.is_empty() {
            let evicted = self
                .items
                .drain(..)
                .map(|i| i.sub_uid)
                .filter(|sub| !sub.is_empty())
                .collect();
            self.items.push(item);
            return evicted;
        }

        let mut evicted = Vec::new();
        if self.is_whole() {
            self.items.clear();
            evicted.push(String::new());
        }

        match self.items.iter_mut().find(|i| i.sub_uid == item.sub_uid) {
            Some(slot) => *slot = item,
            None => self.items.push(item),
        }
        evicted
    }
}

/// What a show changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowOutcome {
    /// The window did not exist before
    pub created: bool,
    /// Sub-uids of items dropped to make room (their timers must go too)
    pub evicted: Vec<String>,
}

/// What a hide changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideOutcome {
    /// The window is gone, along with all of its items
    WindowDestroyed,
    /// One item was removed; the window still has others
    ItemRemoved,
    UnknownWindow,
    UnknownItem,
}

/// All windows currently on screen.
#[derive(Debug, Default)]
pub struct OverlayStateStore {
    windows: Vec<Window>,
}

impl OverlayStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, window_uid: &str) -> Option<usize> {
        self.windows.iter().position(|w| w.uid == window_uid)
    }

    /// Show `item` in `window_uid`, creating the window on first use.
    ///
    /// An empty `sub_uid` replaces every item of the window. A non-empty one
    /// replaces the item with the same sub-uid in place, or is appended.
    pub fn show(&mut self, window_uid: &str, item: Item, placement: Placement) -> ShowOutcome {
        let (index, created) = match self.position(window_uid) {
            Some(index) => (index, false),
            None => {
                self.windows.push(Window::new(window_uid));
                (self.windows.len() - 1, true)
            }
        };

        let window = &mut self.windows[index];
        window.placement = placement;
        let evicted = window.put(item);
        ShowOutcome { created, evicted }
    }

    /// Hide a whole window (empty `sub_uid`) or one of its items.
    pub fn hide(&mut self, window_uid: &str, sub_uid: &str) -> HideOutcome {
        let Some(index) = self.position(window_uid) else {
            return HideOutcome::UnknownWindow;
        };

        if sub_uid.is_empty() {
            self.windows.remove(index);
            return HideOutcome::WindowDestroyed;
        }

        let window = &mut self.windows[index];
        let Some(pos) = window.items.iter().position(|i| i.sub_uid == sub_uid) else {
            return HideOutcome::UnknownItem;
        };
        window.items.remove(pos);

        if window.items.is_empty() {
            self.windows.remove(index);
            HideOutcome::WindowDestroyed
        } else {
            HideOutcome::ItemRemoved
        }
    }

    /// Every showing address: each window, then its list items in order.
    pub fn list_uids(&self) -> Vec<String> {
        let mut uids = Vec::new();
        for window in &self.windows {
            uids.push(window.uid.clone());
            for item in &window.items {
                if !item.sub_uid.is_empty() {
                    uids.push(format!("{}.{}", window.uid, item.sub_uid));
                }
            }
        }
        uids
    }

    pub fn window(&self, window_uid: &str) -> Option<&Window> {
        self.windows.iter().find(|w| w.uid == window_uid)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}
