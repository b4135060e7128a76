//! GTK4 renderer on the wlr-layer-shell overlay layer.
//!
//! One `gtk::Window` per window uid, named after the uid so stylesheets can
//! select it with `#uid`. Items are labels in a `ListBox`. Surfaces get an
//! empty input region, so clicks pass through to whatever is underneath.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

use gtk::prelude::*;
use gtk::{gdk, glib};
use gtk4_layer_shell::{Layer, LayerShell};
use tracing::{debug, warn};
use wlosd_protocol::Edge;

use super::{RenderError, Renderer};
use crate::osd::state::Window;

struct Surface {
    window: gtk::Window,
    list: gtk::ListBox,
}

pub struct GtkRenderer {
    display: gdk::Display,
    css: gtk::CssProvider,
    surfaces: HashMap<String, Surface>,
}

impl GtkRenderer {
    /// Initialise GTK on the current thread and check for layer-shell.
    pub fn open() -> Result<Self, RenderError> {
        gtk::init().map_err(|e| RenderError::NoDisplay(e.to_string()))?;

        let display = gdk::Display::default()
            .ok_or_else(|| RenderError::NoDisplay("no default display".to_string()))?;

        if !gtk4_layer_shell::is_supported() {
            return Err(RenderError::Unsupported(
                "the compositor does not support wlr-layer-shell".to_string(),
            ));
        }

        let css = gtk::CssProvider::new();
        css.connect_parsing_error(|_, section, error| {
            warn!("css {}: {error}", section.to_str());
        });
        gtk::style_context_add_provider_for_display(
            &display,
            &css,
            gtk::STYLE_PROVIDER_PRIORITY_USER,
        );

        Ok(Self {
            display,
            css,
            surfaces: HashMap::new(),
        })
    }

    fn create_surface(uid: &str) -> Surface {
        debug!(window = uid, "creating layer surface");

        let window = gtk::Window::new();
        window.set_widget_name(uid);
        window.connect_realize(|w| {
            if let Some(surface) = w.surface() {
                surface.set_input_region(&gtk::cairo::Region::create());
            }
        });

        window.init_layer_shell();
        window.set_layer(Layer::Overlay);

        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        window.set_child(Some(&list));

        Surface { window, list }
    }

    fn find_monitor(&self, connector: &str) -> Option<gdk::Monitor> {
        let monitors = self.display.monitors();
        (0..monitors.n_items())
            .filter_map(|i| monitors.item(i))
            .filter_map(|obj| obj.downcast::<gdk::Monitor>().ok())
            .find(|m| m.connector().is_some_and(|c| c.as_str() == connector))
    }
}

fn layer_edge(edge: Edge) -> gtk4_layer_shell::Edge {
    match edge {
        Edge::Left => gtk4_layer_shell::Edge::Left,
        Edge::Right => gtk4_layer_shell::Edge::Right,
        Edge::Top => gtk4_layer_shell::Edge::Top,
        Edge::Bottom => gtk4_layer_shell::Edge::Bottom,
    }
}

fn class_refs(classes: &[String]) -> Vec<&str> {
    classes.iter().map(String::as_str).collect()
}

impl Renderer for GtkRenderer {
    fn present(&mut self, state: &Window) {
        let placement = &state.placement;
        let monitor = match placement.output.as_deref() {
            Some(output) => {
                let found = self.find_monitor(output);
                if found.is_none() {
                    warn!("did not find output: {output}");
                }
                found
            }
            None => None,
        };

        let surface = self
            .surfaces
            .entry(state.uid.clone())
            .or_insert_with(|| Self::create_surface(&state.uid));
        let window = &surface.window;

        window.set_css_classes(&class_refs(&placement.classes));
        window.set_monitor(monitor.as_ref());
        for &edge in Edge::ALL {
            window.set_anchor(layer_edge(edge), placement.anchors.contains(edge));
        }

        while let Some(row) = surface.list.first_child() {
            surface.list.remove(&row);
        }
        for item in &state.items {
            let label = gtk::Label::new(None);
            if item.markup {
                label.set_markup(&item.text);
            } else {
                label.set_text(&item.text);
            }
            label.set_css_classes(&class_refs(&item.classes));
            surface.list.append(&label);
        }

        // Shrink to fit the labels
        window.set_default_size(1, 1);
        window.present();
    }

    fn destroy(&mut self, window_uid: &str) {
        if let Some(surface) = self.surfaces.remove(window_uid) {
            debug!(window = window_uid, "destroying layer surface");
            surface.window.destroy();
        }
    }

    fn load_stylesheet(&mut self, path: &Path) -> Result<(), RenderError> {
        let css = std::fs::read_to_string(path).map_err(|source| RenderError::Stylesheet {
            path: path.to_path_buf(),
            source,
        })?;
        self.css.load_from_data(&css);
        Ok(())
    }
}

/// Drive a future on the GLib main context, so GTK events are processed on
/// the same thread while it runs.
pub fn block_on<F: Future>(future: F) -> F::Output {
    glib::MainContext::default().block_on(future)
}
