use crate::geometry::Point;
use derive_more::{Display, From, Into};

/// The visual tree the menu is mounted into.
pub trait UiSurface {
    fn contains_menu(&self) -> bool;
    fn attach_menu(&mut self);
    fn detach_menu(&mut self);
    fn set_menu_visible(&mut self, visible: bool);
    /// Requests a repaint of the menu region.
    fn mark_dirty(&mut self);
    /// Where the menu should be centered when it opens, usually the cursor.
    fn menu_center(&self) -> Point;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct ParticipantId(u64);

/// The host's input focus stack.
pub trait InputFocus {
    fn register(&mut self, participant: ParticipantId);
    fn unregister(&mut self, participant: ParticipantId);
    /// Asks for a visible cursor while `visible` is set, releases it otherwise.
    fn request_cursor(&mut self, participant: ParticipantId, visible: bool);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeResult {
    Handled,
    PassThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorRequest {
    Show,
    Ignore,
}

/// Mouse buttons, numbered the way GDK and X11 number them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
    Other(u32),
}

impl From<u32> for PointerButton {
    fn from(button: u32) -> Self {
        match button {
            1 => Self::Primary,
            2 => Self::Middle,
            3 => Self::Secondary,
            n => Self::Other(n),
        }
    }
}
