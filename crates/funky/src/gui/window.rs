use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};
use radial::geometry::Point;

pub fn get_cursor_position(window: &gtk::ApplicationWindow) -> Option<Point> {
    gdk::Display::default()
        .and_then(|d| d.default_seat())
        .and_then(|s| s.pointer())
        .zip(window.surface())
        .and_then(|(p, s)| s.device_position(&p))
        .map(|(x, y, _)| Point::new(x, y))
}

/// Center of the first monitor, used when the cursor position is unknown.
pub fn get_monitor_center() -> Option<Point> {
    let display = gdk::Display::default()?;
    let monitor = display
        .monitors()
        .item(0)
        .and_then(|item| item.downcast::<gdk::Monitor>().ok())?;
    let geometry = monitor.geometry();
    Some(Point::new(
        geometry.width() as f64 / 2.0,
        geometry.height() as f64 / 2.0,
    ))
}

pub fn init_layer_shell(window: &gtk::ApplicationWindow) {
    window.init_layer_shell();
    window.set_layer(Layer::Overlay);
    window.set_namespace(Some("funky"));
    window.set_exclusive_zone(-1);
    for edge in [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom] {
        window.set_anchor(edge, true);
    }
    window.set_keyboard_mode(KeyboardMode::OnDemand);
}
