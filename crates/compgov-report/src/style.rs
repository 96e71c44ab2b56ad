//! Shared cell formats: blue header band, coverage traffic lights, zebra rows.

use compgov_core::Coverage;
use rust_xlsxwriter::{Color, Format, FormatAlign};

pub const HEADER_BLUE: u32 = 0x4472C4;
pub const FULL_GREEN: u32 = 0xC6EFCE;
pub const LIMITED_YELLOW: u32 = 0xFFEB9C;
pub const NO_RED: u32 = 0xFFC7CE;
pub const ALT_ROW_GRAY: u32 = 0xF2F2F2;

pub fn title() -> Format {
    Format::new().set_bold().set_font_size(14)
}

pub fn subtitle() -> Format {
    Format::new().set_font_size(10).set_italic()
}

/// White bold text on the header blue.
pub fn header() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_BLUE))
}

/// Centered, wrapped header cell.
pub fn header_wrapped() -> Format {
    header().set_align(FormatAlign::Center).set_text_wrap()
}

pub fn fill(rgb: u32) -> Color {
    Color::RGB(rgb)
}

/// Traffic-light colour for a coverage level.
pub fn coverage_color(coverage: Coverage) -> Color {
    match coverage {
        Coverage::Full => fill(FULL_GREEN),
        Coverage::Limited => fill(LIMITED_YELLOW),
        Coverage::No => fill(NO_RED),
    }
}

/// Small top-aligned wrapped body text.
pub fn body_top() -> Format {
    Format::new()
        .set_font_size(9)
        .set_align(FormatAlign::Top)
        .set_text_wrap()
}

/// Gray fill on every second data row; `index` is 0-based.
pub fn zebra(format: Format, index: usize) -> Format {
    if index % 2 == 1 {
        format.set_background_color(fill(ALT_ROW_GRAY))
    } else {
        format
    }
}

/// `62.5` → `62.5%`.
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_keeps_one_decimal() {
        assert_eq!(percent(62.5), "62.5%");
        assert_eq!(percent(100.0), "100.0%");
        assert_eq!(percent(0.0), "0.0%");
    }

    #[test]
    fn coverage_colors_are_distinct() {
        let colors: Vec<_> = Coverage::ALL.iter().map(|c| coverage_color(*c)).collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
    }
}
