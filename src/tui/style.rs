//! Color constants and canvas-fitting helpers for the TUI.

use ratatui::style::Color;

use crate::geometry::Rgb;
use crate::scene::Bounds;

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Highlighted library entry.
pub const SELECTED_FG: Color = Color::Yellow;
/// Error line color.
pub const ERROR_FG: Color = Color::Red;
/// Label text on the plan view.
pub const LABEL_FG: Color = Color::White;
/// Toggle marker when a category is shown.
pub const ON_FG: Color = Color::Green;
/// Toggle marker when a category is hidden.
pub const OFF_FG: Color = Color::DarkGray;

/// Half-width of the plan view when there is nothing to fit.
const EMPTY_HALF_EXTENT: f64 = 10.0;

/// Terminal color for a drawable color.
pub fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Computes canvas `(x, y)` bounds from the scene extent with 10% padding.
///
/// Both axes get the same span so squares stay square up to the cell ratio.
pub fn fit_bounds(bounds: Option<Bounds>) -> ([f64; 2], [f64; 2]) {
    let Some(b) = bounds else {
        let e = EMPTY_HALF_EXTENT;
        return ([-e, e], [-e, e]);
    };
    let span = (b.max_x - b.min_x).max(b.max_z - b.min_z).max(1.0);
    let half = span * 1.1 / 2.0;
    let cx = (b.min_x + b.max_x) / 2.0;
    let cz = (b.min_z + b.max_z) / 2.0;
    ([cx - half, cx + half], [cz - half, cz + half])
}
