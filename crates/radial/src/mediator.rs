use crate::geometry::{Point, Radii};
use crate::host::{CursorRequest, EscapeResult, InputFocus, ParticipantId, PointerButton, UiSurface};
use crate::menu::{ClickOutcome, EscapeMode, EscapeOutcome, HoverChange, RadialMenu, Subscribers};
use crate::option::MenuOption;
use std::sync::atomic::{AtomicU64, Ordering};

/// Look/camera axes zeroed while the menu is open.
pub const DEFAULT_LOOK_AXES: &[usize] = &[2, 3, 4, 5];

static NEXT_PARTICIPANT: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSettings {
    pub radii: Radii,
    pub escape: EscapeMode,
    pub look_axes: Vec<usize>,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            radii: Radii::default(),
            escape: EscapeMode::default(),
            look_axes: DEFAULT_LOOK_AXES.to_vec(),
        }
    }
}

/// Sits between the host's surface and input stack and the menu state machine.
/// Construct one per surface and hand it to whatever delivers input.
pub struct Mediator<S: UiSurface, F: InputFocus> {
    menu: RadialMenu,
    settings: MenuSettings,
    surface: S,
    focus: F,
    participant: ParticipantId,
}

impl<S: UiSurface, F: InputFocus> Mediator<S, F> {
    pub fn new(settings: MenuSettings, surface: S, mut focus: F) -> Self {
        let participant = ParticipantId::from(NEXT_PARTICIPANT.fetch_add(1, Ordering::Relaxed));
        focus.register(participant);
        Self {
            menu: RadialMenu::new(settings.radii),
            settings,
            surface,
            focus,
            participant,
        }
    }

    pub fn notify_open_requested(&mut self, options: Vec<MenuOption>, subscribers: Subscribers) {
        log::info!("Opening radial menu with {} options", options.len());
        if !self.surface.contains_menu() {
            log::debug!("Radial menu not mounted, attaching to surface");
            self.surface.attach_menu();
        }

        // shown first: some hosts only know the cursor position of a mapped surface
        self.surface.set_menu_visible(true);
        let center = self.surface.menu_center();
        self.menu.open(center, options, subscribers);

        self.focus.request_cursor(self.participant, true);
        self.surface.mark_dirty();
    }

    pub fn on_escape_key(&mut self) -> EscapeResult {
        match self.menu.escape(self.settings.escape) {
            EscapeOutcome::Ignored => EscapeResult::PassThrough,
            EscapeOutcome::Cancelled | EscapeOutcome::Dismissed => {
                self.release();
                EscapeResult::Handled
            }
        }
    }

    pub fn on_pointer_move(&mut self, point: Point) -> HoverChange {
        let change = self.menu.update_hover(point);
        if change.is_changed() {
            self.surface.mark_dirty();
        }
        change
    }

    pub fn on_pointer_leave(&mut self) -> HoverChange {
        let change = self.menu.clear_hover();
        if change.is_changed() {
            self.surface.mark_dirty();
        }
        change
    }

    pub fn on_pointer_down(&mut self, button: PointerButton, point: Point) -> ClickOutcome {
        if button != PointerButton::Primary {
            return ClickOutcome::Ignored;
        }
        let outcome = self.menu.click(point);
        if outcome != ClickOutcome::Ignored {
            self.release();
        }
        outcome
    }

    pub fn translate_axes(&self, axes: &mut [f32]) {
        if !self.menu.is_open() {
            return;
        }
        for &axis in &self.settings.look_axes {
            if let Some(value) = axes.get_mut(axis) {
                *value = 0.0;
            }
        }
    }

    pub fn cursor_request(&self) -> CursorRequest {
        if self.menu.is_open() {
            CursorRequest::Show
        } else {
            CursorRequest::Ignore
        }
    }

    /// Returns whether the menu was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.menu.close();
        if was_open {
            self.release();
        }
        was_open
    }

    pub fn reconfigure(&mut self, settings: MenuSettings) {
        if settings.radii != self.settings.radii {
            self.menu.reconfigure(settings.radii);
            self.surface.mark_dirty();
        }
        self.settings = settings;
    }

    fn release(&mut self) {
        self.focus.request_cursor(self.participant, false);
        self.surface.set_menu_visible(false);
        self.surface.mark_dirty();
    }

    pub fn menu(&self) -> &RadialMenu {
        &self.menu
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn participant(&self) -> ParticipantId {
        self.participant
    }
}

impl<S: UiSurface, F: InputFocus> Drop for Mediator<S, F> {
    fn drop(&mut self) {
        if self.menu.close() {
            self.focus.request_cursor(self.participant, false);
        }
        if self.surface.contains_menu() {
            self.surface.detach_menu();
        }
        self.focus.unregister(self.participant);
    }
}
