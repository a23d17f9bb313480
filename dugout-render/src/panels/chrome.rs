//! Sheet chrome: the header and footer bands, the bio block, and the
//! headshot and logo blits.

use anyhow::{anyhow, Result};
use chrono::Utc;
use image::imageops::FilterType;
use image::DynamicImage;
use plotters::coord::Shift;
use plotters::element::BitMapElement;
use plotters::prelude::*;
use tracing::debug;

use dugout_core::domain::{Player, Team};
use dugout_core::providers::PersonRecord;

use crate::style::{centered_font, label_font, try_text, ABOVE_AVG, RULE};

/// Player name over the sheet subtitle, centered in the top band.
pub fn draw_header<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    player: &Player,
    subtitle: &str,
) {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    try_text(area, &player.full_name, (w / 2, h / 2 - 12), &centered_font(26));
    try_text(area, subtitle, (w / 2, h / 2 + 14), &centered_font(15));
}

/// Rule line plus the provenance sentence. Synthetic sheets say so in
/// red instead of citing sources they never touched.
pub fn draw_footer<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    synthetic: bool,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    area.draw(&PathElement::new(
        vec![(12, 0), (w - 12, 0)],
        RULE.stroke_width(1),
    ))
    .map_err(|e| anyhow!("footer rule: {e}"))?;

    let generated = Utc::now().format("%Y-%m-%d");
    let (line, style) = if synthetic {
        (
            format!("SYNTHETIC DATA: deterministic offline sample, generated {generated}"),
            centered_font(13).color(&ABOVE_AVG),
        )
    } else {
        (
            format!(
                "Data: MLB Stats API, Baseball Savant, FanGraphs, Baseball Reference. Generated {generated}"
            ),
            centered_font(12),
        )
    };
    try_text(area, &line, (w / 2, h / 2), &style);
    Ok(())
}

/// Text lines for the bio block. Missing fields drop out rather than
/// printing placeholders; a player with nothing on file still gets an
/// identifying line.
pub fn bio_lines(player: &Player, person: Option<&PersonRecord>, team: Option<&Team>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(team) = team {
        lines.push(team.to_string());
    }
    if let Some(person) = person {
        let mut idents = Vec::new();
        if let Some(number) = &person.primary_number {
            idents.push(format!("#{number}"));
        }
        if let Some(position) = &person.primary_position {
            idents.push(position.clone());
        }
        if !idents.is_empty() {
            lines.push(idents.join("  "));
        }
        match (&person.bat_side, &person.pitch_hand) {
            (Some(bats), Some(throws)) => lines.push(format!("B/T {bats}/{throws}")),
            (Some(bats), None) => lines.push(format!("Bats {bats}")),
            (None, Some(throws)) => lines.push(format!("Throws {throws}")),
            (None, None) => {}
        }
        let mut build = Vec::new();
        if let Some(height) = &person.height {
            build.push(height.clone());
        }
        if let Some(weight) = person.weight {
            build.push(format!("{weight} lb"));
        }
        if let Some(age) = person.current_age {
            build.push(format!("Age {age}"));
        }
        if !build.is_empty() {
            lines.push(build.join("  "));
        }
    }
    if lines.is_empty() {
        lines.push(format!("MLBAM {}", player.mlbam_id));
    }
    lines
}

/// Bio lines top down, as many as the block can hold.
pub fn draw_bio<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, lines: &[String]) {
    let (_, h) = area.dim_in_pixel();
    let line_h = 22i32;
    let max_lines = (h as i32 / line_h).max(0) as usize;
    for (i, line) in lines.iter().take(max_lines).enumerate() {
        try_text(area, line, (8, 8 + i as i32 * line_h), &label_font(14));
    }
}

/// Blit an image into the block, scaled to fit and centered. A missing
/// image is a skip, not an error.
pub fn draw_image<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    image: Option<&DynamicImage>,
) -> Result<()> {
    let Some(image) = image else {
        debug!("image block skipped: nothing fetched");
        return Ok(());
    };
    let (w, h) = area.dim_in_pixel();
    if w < 8 || h < 8 {
        return Ok(());
    }
    let scaled = image.resize(w, h, FilterType::Triangle);
    let (sw, sh) = (scaled.width(), scaled.height());
    let x = ((w - sw) / 2) as i32;
    let y = ((h - sh) / 2) as i32;
    let buf = scaled.to_rgb8().into_raw();
    match BitMapElement::with_owned_buffer((x, y), (sw, sh), buf) {
        Some(bitmap) => area.draw(&bitmap).map_err(|e| anyhow!("image blit: {e}"))?,
        None => debug!("image blit skipped: buffer size mismatch"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn person() -> PersonRecord {
        PersonRecord {
            id: 694973,
            full_name: "Paul Skenes".into(),
            primary_number: Some("30".into()),
            birth_date: Some("2002-05-29".into()),
            current_age: Some(23),
            height: Some("6' 6\"".into()),
            weight: Some(235),
            primary_position: Some("P".into()),
            bat_side: Some("R".into()),
            pitch_hand: Some("R".into()),
            current_team_id: Some(134),
        }
    }

    #[test]
    fn bio_lines_read_like_a_card() {
        let player = Player::new(694973, "Paul Skenes");
        let team = Team::new(134, "Pittsburgh Pirates", "PIT");
        let lines = bio_lines(&player, Some(&person()), Some(&team));
        assert_eq!(
            lines,
            vec![
                "Pittsburgh Pirates (PIT)".to_string(),
                "#30  P".to_string(),
                "B/T R/R".to_string(),
                "6' 6\"  235 lb  Age 23".to_string(),
            ]
        );
    }

    #[test]
    fn sparse_records_drop_lines_instead_of_padding() {
        let player = Player::new(694973, "Paul Skenes");
        let mut sparse = person();
        sparse.primary_number = None;
        sparse.bat_side = None;
        sparse.height = None;
        sparse.weight = None;
        sparse.current_age = None;
        let lines = bio_lines(&player, Some(&sparse), None);
        assert_eq!(lines, vec!["P".to_string(), "Throws R".to_string()]);
    }

    #[test]
    fn unknown_player_still_gets_an_identifying_line() {
        let player = Player::new(900001, "Sample Arm");
        assert_eq!(bio_lines(&player, None, None), vec!["MLBAM 900001".to_string()]);
    }

    #[test]
    fn image_blit_lands_in_the_buffer() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb([200, 30, 30])));
        let mut buf = vec![0u8; 100 * 100 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (100, 100)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            draw_image(&root, Some(&image)).unwrap();
            root.present().unwrap();
        }
        assert!(buf.iter().any(|b| *b == 30));
    }

    #[test]
    fn missing_image_is_a_silent_skip() {
        let mut buf = vec![0u8; 30 * 30 * 3];
        let root = BitMapBackend::with_buffer(&mut buf, (30, 30)).into_drawing_area();
        draw_image(&root, None).unwrap();
    }

    #[test]
    fn footer_draws_its_rule_even_without_fonts() {
        let mut buf = vec![0u8; 200 * 40 * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (200, 40)).into_drawing_area();
            root.fill(&WHITE).unwrap();
            draw_footer(&root, true).unwrap();
            root.present().unwrap();
        }
        assert!(buf.iter().any(|b| *b != 255));
    }
}
