use crate::gui::window;
use gtk::pango;
use gtk::pango::prelude::*;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{KeyboardMode, LayerShell};
use radial::geometry::Point;
use radial::host::{InputFocus, ParticipantId, UiSurface};
use radial::resources::{FontFamily, FontHandle, ResourceProvider};

/// Layer-shell window with an overlay that the menu's drawing area is mounted into.
pub struct GtkSurface {
    window: gtk::ApplicationWindow,
    overlay: gtk::Overlay,
    canvas: gtk::DrawingArea,
}

impl GtkSurface {
    pub fn new(
        window: gtk::ApplicationWindow,
        overlay: gtk::Overlay,
        canvas: gtk::DrawingArea,
    ) -> Self {
        Self {
            window,
            overlay,
            canvas,
        }
    }
}

impl UiSurface for GtkSurface {
    fn contains_menu(&self) -> bool {
        self.canvas.parent().is_some()
    }

    fn attach_menu(&mut self) {
        self.overlay.set_child(Some(&self.canvas));
    }

    fn detach_menu(&mut self) {
        self.overlay.set_child(None::<&gtk::Widget>);
    }

    fn set_menu_visible(&mut self, visible: bool) {
        self.window.set_visible(visible);
    }

    fn mark_dirty(&mut self) {
        self.canvas.queue_draw();
    }

    fn menu_center(&self) -> Point {
        window::get_cursor_position(&self.window)
            .or_else(window::get_monitor_center)
            .unwrap_or_default()
    }
}

/// Keyboard and cursor ownership for the overlay. The window only grabs the
/// keyboard while at least one participant wants the cursor.
pub struct LayerShellFocus {
    window: gtk::ApplicationWindow,
    registered: Vec<ParticipantId>,
    holders: Vec<ParticipantId>,
}

impl LayerShellFocus {
    pub fn new(window: gtk::ApplicationWindow) -> Self {
        Self {
            window,
            registered: Vec::new(),
            holders: Vec::new(),
        }
    }

    fn apply(&self) {
        if self.holders.is_empty() {
            self.window.set_keyboard_mode(KeyboardMode::OnDemand);
            self.window.set_cursor(None::<&gtk::gdk::Cursor>);
        } else {
            self.window.set_keyboard_mode(KeyboardMode::Exclusive);
            self.window.set_cursor_from_name(Some("default"));
        }
    }
}

impl InputFocus for LayerShellFocus {
    fn register(&mut self, participant: ParticipantId) {
        log::debug!("Input participant {} registered", participant);
        self.registered.push(participant);
    }

    fn unregister(&mut self, participant: ParticipantId) {
        log::debug!("Input participant {} unregistered", participant);
        self.registered.retain(|p| *p != participant);
        self.holders.retain(|p| *p != participant);
        self.apply();
    }

    fn request_cursor(&mut self, participant: ParticipantId, visible: bool) {
        if !self.registered.contains(&participant) {
            log::warn!("Cursor request from unregistered participant {}", participant);
            return;
        }
        if visible {
            if !self.holders.contains(&participant) {
                self.holders.push(participant);
            }
        } else {
            self.holders.retain(|p| *p != participant);
        }
        self.apply();
    }
}

/// Finds the configured label font among the installed families.
pub struct PangoFonts {
    context: pango::Context,
    wanted: Option<FontFamily>,
}

impl PangoFonts {
    pub fn new(widget: &impl IsA<gtk::Widget>, wanted: Option<FontFamily>) -> Self {
        Self {
            context: widget.pango_context(),
            wanted,
        }
    }
}

impl ResourceProvider for PangoFonts {
    fn label_font(&self) -> Option<FontHandle> {
        let wanted = self.wanted.as_ref()?.to_lowercase();
        self.context
            .list_families()
            .iter()
            .map(|f| f.name().to_string())
            .find(|name| name.to_lowercase().contains(&wanted))
            .map(|name| FontHandle::new(FontFamily::new(name)))
    }
}
