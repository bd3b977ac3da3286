pub mod geometry;
pub mod host;
pub mod macros;
pub mod mediator;
pub mod menu;
pub mod option;
pub mod resources;

pub use geometry::{GeometryError, Point, Radii, SectorLayout, SliceBounds};
pub use host::{CursorRequest, EscapeResult, InputFocus, ParticipantId, PointerButton, UiSurface};
pub use mediator::{Mediator, MenuSettings};
pub use menu::{ClickOutcome, EscapeMode, HoverChange, RadialMenu, Subscribers};
pub use option::{Description, IconHandle, MenuOption, OptionName};
