//! Shared drawing style: the pitch-type palette, ink colors, and font
//! helpers that degrade cleanly on systems without a usable font.
//!
//! Every text draw in this crate goes through [`try_text`] (or checks
//! [`fonts_available`] first). Headless machines with no fontconfig still
//! produce complete sheets; they just come out without labels.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::sync::OnceLock;
use tracing::debug;

/// Table and label text.
pub const INK: RGBColor = RGBColor(33, 37, 41);
/// Table header band fill.
pub const HEADER_FILL: RGBColor = RGBColor(222, 226, 230);
/// Light rule lines between table rows.
pub const RULE: RGBColor = RGBColor(189, 195, 199);
/// Values sitting above the league average.
pub const ABOVE_AVG: RGBColor = RGBColor(202, 51, 59);
/// Values sitting below the league average.
pub const BELOW_AVG: RGBColor = RGBColor(38, 90, 166);
/// Anything without a palette entry.
pub const FALLBACK_PITCH: RGBColor = RGBColor(128, 128, 128);

/// Statcast-style palette, keyed by pitch-type code.
const PITCH_COLORS: [(&str, RGBColor); 14] = [
    ("FF", RGBColor(210, 45, 73)),
    ("SI", RGBColor(254, 157, 0)),
    ("FC", RGBColor(147, 63, 44)),
    ("SL", RGBColor(204, 190, 20)),
    ("ST", RGBColor(221, 179, 58)),
    ("SV", RGBColor(147, 175, 212)),
    ("CU", RGBColor(0, 209, 237)),
    ("KC", RGBColor(98, 54, 205)),
    ("CH", RGBColor(29, 190, 58)),
    ("FS", RGBColor(59, 172, 172)),
    ("FO", RGBColor(85, 204, 171)),
    ("SC", RGBColor(242, 123, 185)),
    ("KN", RGBColor(60, 68, 205)),
    ("EP", RGBColor(133, 82, 51)),
];

/// Chart color for a pitch-type code.
pub fn pitch_color(pitch_type: &str) -> RGBColor {
    PITCH_COLORS
        .iter()
        .find(|(code, _)| *code == pitch_type)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_PITCH)
}

static FONTS: OnceLock<bool> = OnceLock::new();

/// Whether the backend can shape text at all. Probed once; plotters
/// resolves fonts through the system, and a headless box may have none.
pub fn fonts_available() -> bool {
    *FONTS.get_or_init(|| ("sans-serif", 12).into_font().layout_box("M").is_ok())
}

pub fn label_font(size: u32) -> TextStyle<'static> {
    ("sans-serif", size).into_font().color(&INK)
}

/// Label style anchored at the text center, for cell and title text.
pub fn centered_font(size: u32) -> TextStyle<'static> {
    label_font(size).pos(Pos::new(HPos::Center, VPos::Center))
}

/// Best-effort text draw. Missing fonts or a failed glyph draw degrade to
/// no text rather than failing the sheet.
pub fn try_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    pos: (i32, i32),
    style: &TextStyle,
) {
    if !fonts_available() {
        return;
    }
    if let Err(err) = area.draw(&Text::new(text.to_string(), pos, style.clone())) {
        debug!("text draw failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_the_common_arsenal() {
        assert_eq!(pitch_color("FF"), RGBColor(210, 45, 73));
        assert_eq!(pitch_color("SL"), RGBColor(204, 190, 20));
        assert_eq!(pitch_color("CH"), RGBColor(29, 190, 58));
    }

    #[test]
    fn unknown_pitch_type_falls_back_to_gray() {
        assert_eq!(pitch_color("ZZ"), FALLBACK_PITCH);
        assert_eq!(pitch_color(""), FALLBACK_PITCH);
    }

    #[test]
    fn font_probe_is_stable() {
        // Whatever the answer is on this machine, it must not flap.
        assert_eq!(fonts_available(), fonts_available());
    }
}
