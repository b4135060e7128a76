//! Headless renderer: records surfaces instead of drawing them.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::info;
use wlosd_protocol::Anchors;

use super::{RenderError, Renderer};
use crate::osd::state::Window;

/// What a real backend would currently be displaying for one window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Surface {
    /// Label text, top to bottom
    pub labels: Vec<String>,
    pub classes: Vec<String>,
    pub anchors: Anchors,
    pub output: Option<String>,
    /// Number of times the surface was presented
    pub presented: usize,
}

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    surfaces: BTreeMap<String, Surface>,
    stylesheet: Option<String>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self, window_uid: &str) -> Option<&Surface> {
        self.surfaces.get(window_uid)
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Contents of the active stylesheet
    pub fn stylesheet(&self) -> Option<&str> {
        self.stylesheet.as_deref()
    }
}

impl Renderer for HeadlessRenderer {
    fn present(&mut self, window: &Window) {
        let surface = self
            .surfaces
            .entry(window.uid.clone())
            .or_insert_with(|| {
                info!(window = %window.uid, "creating surface");
                Surface::default()
            });

        surface.labels = window.items.iter().map(|i| i.text.clone()).collect();
        surface.classes = window.placement.classes.clone();
        surface.anchors = window.placement.anchors;
        surface.output = window.placement.output.clone();
        surface.presented += 1;

        info!(
            window = %window.uid,
            items = window.items.len(),
            anchors = %surface.anchors,
            output = surface.output.as_deref().unwrap_or("-"),
            "presenting surface"
        );
    }

    fn destroy(&mut self, window_uid: &str) {
        if self.surfaces.remove(window_uid).is_some() {
            info!(window = window_uid, "destroyed surface");
        }
    }

    fn load_stylesheet(&mut self, path: &Path) -> Result<(), RenderError> {
        let css = std::fs::read_to_string(path).map_err(|source| RenderError::Stylesheet {
            path: path.to_path_buf(),
            source,
        })?;
        self.stylesheet = Some(css);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::osd::state::{Item, Placement};

    fn window(uid: &str, texts: &[&str]) -> Window {
        let mut store = crate::osd::OverlayStateStore::new();
        for (i, text) in texts.iter().enumerate() {
            store.show(
                uid,
                Item {
                    sub_uid: i.to_string(),
                    text: text.to_string(),
                    markup: false,
                    classes: Vec::new(),
                },
                Placement::default(),
            );
        }
        store.window(uid).unwrap().clone()
    }

    #[test]
    fn test_present_updates_in_place() {
        let mut renderer = HeadlessRenderer::new();
        renderer.present(&window("a", &["x"]));
        renderer.present(&window("a", &["x", "y"]));

        let surface = renderer.surface("a").unwrap();
        assert_eq!(surface.labels, ["x", "y"]);
        assert_eq!(surface.presented, 2);
        assert_eq!(renderer.surface_count(), 1);

        renderer.destroy("a");
        renderer.destroy("a");
        assert_eq!(renderer.surface_count(), 0);
    }

    #[test]
    fn test_missing_stylesheet_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.css");
        std::fs::write(&path, "label { font-size: 20px; }").unwrap();

        let mut renderer = HeadlessRenderer::new();
        renderer.load_stylesheet(&path).unwrap();

        let err = renderer
            .load_stylesheet(&dir.path().join("missing.css"))
            .unwrap_err();
        assert!(matches!(err, RenderError::Stylesheet { .. }));
        assert_eq!(renderer.stylesheet(), Some("label { font-size: 20px; }"));
    }
}
