use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub slice: Srgba<f64>,
    pub slice_hovered: Srgba<f64>,
    pub hover_border: Srgba<f64>,
    pub slice_text: Srgba<f64>,
    pub center_fill: Srgba<f64>,
    pub center_border: Srgba<f64>,
    pub title: Srgba<f64>,
    pub separator: Srgba<f64>,
    pub description: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            slice: Srgba::new(0.0, 0.0, 0.0, 0.35),
            slice_hovered: Srgba::new(0.01, 0.01, 0.01, 0.7),
            hover_border: Srgba::new(1.0, 1.0, 1.0, 1.0),
            slice_text: Srgba::new(0.9, 0.9, 0.9, 1.0),
            center_fill: Srgba::new(0.02, 0.02, 0.02, 0.9),
            center_border: Srgba::new(1.0, 1.0, 1.0, 0.15),
            title: Srgba::new(1.0, 1.0, 1.0, 1.0),
            separator: Srgba::new(1.0, 1.0, 1.0, 0.4),
            description: Srgba::new(1.0, 1.0, 1.0, 0.7),
        }
    }
}

impl ThemeColors {
    /// Theme colors where the stylesheet defines them, the built-in palette otherwise.
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            slice_hovered: Self::lookup_color(
                context,
                "funky_slice_hovered_color",
                fallback.slice_hovered,
                None,
            ),
            hover_border: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.hover_border,
                Some(1.0),
            ),
            center_fill: Self::lookup_color(
                context,
                "funky_center_color",
                fallback.center_fill,
                None,
            ),
            ..fallback
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.funky-window, .funky-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
