use radial::geometry::DEFAULT_ANGULAR_STEP;

pub mod model;
pub mod view;

pub use model::{MenuAssets, build_options, session_subscribers};
pub use view::{DrawError, draw};

pub const OUTLINE_STEP: f64 = DEFAULT_ANGULAR_STEP;
pub const ICON_SIZE: i32 = 110;
pub const ICON_MARGIN: f64 = 2.0;
pub const SLICE_FONT_SIZE: f64 = 17.0;
pub const HOVER_LINE_WIDTH: f64 = 3.0;
pub const CENTER_BORDER_WIDTH: f64 = 2.0;
pub const TITLE_FONT_SIZE: f64 = 22.0;
pub const SEPARATOR_WIDTH: f64 = 40.0;
pub const SEPARATOR_HEIGHT: f64 = 2.0;
pub const SEPARATOR_MARGIN: f64 = 4.0;
pub const DESCRIPTION_FONT_SIZE: f64 = 14.0;
pub const DESCRIPTION_LINE_HEIGHT: f64 = 16.0;
pub const DESCRIPTION_MAX_LINES: usize = 2;
pub const DESCRIPTION_WIDTH_FACTOR: f64 = 0.8; // of the center circle diameter
