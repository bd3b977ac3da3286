use super::model::MenuAssets;
use super::{
    CENTER_BORDER_WIDTH, DESCRIPTION_FONT_SIZE, DESCRIPTION_LINE_HEIGHT, DESCRIPTION_MAX_LINES,
    DESCRIPTION_WIDTH_FACTOR, HOVER_LINE_WIDTH, ICON_MARGIN, ICON_SIZE, OUTLINE_STEP,
    SEPARATOR_HEIGHT, SEPARATOR_MARGIN, SEPARATOR_WIDTH, SLICE_FONT_SIZE, TITLE_FONT_SIZE,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use radial::geometry::{GeometryError, Point, SectorLayout};
use radial::menu::{CenterLabel, RadialMenu, Slice};
use radial::option::MenuOption;
use radial::resources::FontHandle;
use std::f64::consts::PI;
use std::iter::zip;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error(transparent)]
    Cairo(#[from] cairo::Error),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn set_font(cr: &Context, font: &FontHandle, size: f64) {
    let weight = if font.bold {
        cairo::FontWeight::Bold
    } else {
        cairo::FontWeight::Normal
    };
    cr.select_font_face(font.family.as_str(), cairo::FontSlant::Normal, weight);
    cr.set_font_size(size);
}

fn trace(cr: &Context, points: &[Point]) {
    if let Some((first, rest)) = points.split_first() {
        cr.move_to(first.x, first.y);
        for p in rest {
            cr.line_to(p.x, p.y);
        }
    }
}

/// Draws `text` horizontally centered on `x` with its baseline at `y`.
fn show_centered(cr: &Context, text: &str, x: f64, y: f64) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(x - ext.width() / 2.0 - ext.x_bearing(), y);
    cr.show_text(text)
}

/// Greedy word wrap. A single word wider than `max_width` gets a line of its own.
pub fn wrap_words(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if current.is_empty() || measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SliceState {
    Hovered,
    Idle,
}

impl SliceState {
    fn resolve(slice: &Slice) -> Self {
        if slice.hovered {
            Self::Hovered
        } else {
            Self::Idle
        }
    }

    fn color(&self, colors: &ThemeColors) -> Srgba<f64> {
        match self {
            Self::Hovered => colors.slice_hovered,
            Self::Idle => colors.slice,
        }
    }
}

struct SliceRenderer<'a> {
    slice: &'a Slice,
    option: &'a MenuOption,
    layout: &'a SectorLayout,
    assets: &'a MenuAssets,
}

impl<'a> SliceRenderer<'a> {
    fn new(
        slice: &'a Slice,
        option: &'a MenuOption,
        layout: &'a SectorLayout,
        assets: &'a MenuAssets,
    ) -> Self {
        Self {
            slice,
            option,
            layout,
            assets,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), DrawError> {
        let state = SliceState::resolve(self.slice);
        self.draw_sector(cr, state.color(colors))?;
        if state == SliceState::Hovered {
            self.draw_border(cr, colors.hover_border)?;
        }
        self.draw_content(cr, colors)?;
        Ok(())
    }

    fn draw_sector(&self, cr: &Context, color: Srgba<f64>) -> Result<(), DrawError> {
        let outline = self
            .layout
            .outline(self.slice.index, OUTLINE_STEP)
            .transpose()?
            .unwrap_or_default();
        set_color(cr, color);
        cr.new_path();
        trace(cr, &outline);
        cr.close_path();
        cr.fill()?;
        Ok(())
    }

    fn draw_border(&self, cr: &Context, color: Srgba<f64>) -> Result<(), DrawError> {
        let arc = self
            .layout
            .highlight_arc(self.slice.index, OUTLINE_STEP, HOVER_LINE_WIDTH)
            .transpose()?
            .unwrap_or_default();
        set_color(cr, color);
        cr.set_line_width(HOVER_LINE_WIDTH);
        cr.new_path();
        trace(cr, &arc);
        cr.stroke()?;
        Ok(())
    }

    fn draw_content(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let Some(anchor) = self.layout.label_anchor(self.slice.index) else {
            return Ok(());
        };
        let icon = self.option.icon.as_ref().and_then(|h| self.assets.icon(h));

        set_font(cr, &self.assets.font(), SLICE_FONT_SIZE);
        set_color(cr, colors.slice_text);
        match icon {
            Some(pixbuf) => {
                // icon above the name, the pair centered on the anchor
                let group_height = ICON_SIZE as f64 + ICON_MARGIN + SLICE_FONT_SIZE;
                let top = anchor.y - group_height / 2.0;
                let icon_center = Point::new(anchor.x, top + ICON_SIZE as f64 / 2.0);
                self.draw_icon(cr, &pixbuf, icon_center)?;
                set_color(cr, colors.slice_text);
                show_centered(cr, &self.option.title(), anchor.x, top + group_height)
            }
            None => {
                let baseline = anchor.y + SLICE_FONT_SIZE / 2.0;
                show_centered(cr, &self.option.title(), anchor.x, baseline)
            }
        }
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf, center: Point) -> Result<(), cairo::Error> {
        // fit icon into the icon box
        let icon_scale = ICON_SIZE as f64 / pixbuf.width().max(pixbuf.height()).max(1) as f64;
        let (iw, ih) = (
            pixbuf.width() as f64 * icon_scale,
            pixbuf.height() as f64 * icon_scale,
        );

        cr.save()?;
        cr.translate(center.x - iw / 2.0, center.y - ih / 2.0);
        cr.scale(icon_scale, icon_scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    menu: &RadialMenu,
    colors: &ThemeColors,
    assets: &MenuAssets,
) -> Result<(), DrawError> {
    if !menu.is_open() {
        return Ok(());
    }

    let layout = menu.layout();
    for (slice, option) in zip(menu.slices(), menu.options()) {
        SliceRenderer::new(slice, option, layout, assets).draw(cr, colors)?;
    }

    draw_center(cr, layout, menu.center_label(), colors, &assets.font())?;
    Ok(())
}

fn draw_center(
    cr: &Context,
    layout: &SectorLayout,
    label: &CenterLabel,
    colors: &ThemeColors,
    font: &FontHandle,
) -> Result<(), cairo::Error> {
    let center = layout.center;
    let radius = layout.radii.inner();

    cr.new_path();
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    set_color(cr, colors.center_fill);
    cr.fill_preserve()?;
    set_color(cr, colors.center_border);
    cr.set_line_width(CENTER_BORDER_WIDTH);
    cr.stroke()?;

    if !label.visible {
        return Ok(());
    }

    set_font(cr, font, TITLE_FONT_SIZE);
    set_color(cr, colors.title);
    let title_baseline = center.y - SEPARATOR_MARGIN - SEPARATOR_HEIGHT;
    show_centered(cr, &label.title, center.x, title_baseline)?;

    if label.separator_visible {
        set_color(cr, colors.separator);
        cr.rectangle(
            center.x - SEPARATOR_WIDTH / 2.0,
            center.y - SEPARATOR_HEIGHT / 2.0,
            SEPARATOR_WIDTH,
            SEPARATOR_HEIGHT,
        );
        cr.fill()?;
    }

    if let Some(description) = &label.description {
        let description_font = FontHandle {
            bold: false,
            ..font.clone()
        };
        set_font(cr, &description_font, DESCRIPTION_FONT_SIZE);
        set_color(cr, colors.description);

        let max_width = radius * 2.0 * DESCRIPTION_WIDTH_FACTOR;
        let lines = wrap_words(description, max_width, |s| {
            cr.text_extents(s).map(|e| e.width()).unwrap_or(0.0)
        });
        let first_baseline = center.y + SEPARATOR_MARGIN + DESCRIPTION_FONT_SIZE;
        for (i, line) in lines.iter().take(DESCRIPTION_MAX_LINES).enumerate() {
            show_centered(
                cr,
                line,
                center.x,
                first_baseline + i as f64 * DESCRIPTION_LINE_HEIGHT,
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // one unit per character
    fn chars(s: &str) -> f64 {
        s.chars().count() as f64
    }

    #[test]
    fn test_wrap_words() {
        let lines = wrap_words("Examine item details and durability.", 16.0, chars);
        assert_eq!(lines, vec!["Examine item", "details and", "durability."]);
    }

    #[test]
    fn test_wrap_words_long_word_and_empty() {
        assert_eq!(
            wrap_words("incomprehensibilities ok", 5.0, chars),
            vec!["incomprehensibilities", "ok"]
        );
        assert!(wrap_words("   ", 10.0, chars).is_empty());
    }
}
