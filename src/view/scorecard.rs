use std::io::Cursor;

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::error::RenderError;
use crate::model::{Course, HoleNumber, Round};
use crate::score::{NineSummary, ScoreDisplay, summarize};

pub const CARD_WIDTH: u32 = 600;
pub const CARD_HEIGHT: u32 = 1060;

const MARGIN: i32 = 40;
const HEADER_HEIGHT: i32 = 140;
const ROW_HEIGHT: i32 = 40;
const GLYPH: i32 = 8;
const TEXT_SCALE: i32 = 2;
const TITLE_SCALE: i32 = 3;
// hole, par, score
const COLUMNS: [(i32, i32); 3] = [(MARGIN, 160), (MARGIN + 160, 160), (MARGIN + 320, 200)];

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([20, 20, 20]);
const HEADER_FILL: Rgb<u8> = Rgb([0, 100, 50]);
const HEADER_INK: Rgb<u8> = Rgb([255, 255, 255]);
const SUBTOTAL_FILL: Rgb<u8> = Rgb([225, 235, 225]);
const GRID: Rgb<u8> = Rgb([150, 150, 150]);

fn score_colours(display: ScoreDisplay) -> (Rgb<u8>, Rgb<u8>) {
    match display {
        ScoreDisplay::Condor | ScoreDisplay::Albatross | ScoreDisplay::Eagle => {
            (Rgb([200, 150, 0]), Rgb([255, 255, 255]))
        }
        ScoreDisplay::Birdie => (Rgb([200, 30, 30]), Rgb([255, 255, 255])),
        ScoreDisplay::Par => (PAPER, INK),
        ScoreDisplay::Bogey => (Rgb([120, 170, 230]), INK),
        ScoreDisplay::DoubleBogey
        | ScoreDisplay::TripleBogey
        | ScoreDisplay::QuadrupleBogeyOrWorse => (Rgb([30, 60, 140]), Rgb([255, 255, 255])),
    }
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn text_width(text: &str, scale: i32) -> i32 {
    i32::try_from(text.chars().count()).unwrap_or(i32::MAX / 64) * GLYPH * scale
}

fn draw_text(img: &mut RgbImage, text: &str, x: i32, y: i32, scale: i32, colour: Rgb<u8>) {
    let size = u32::try_from(scale).unwrap_or(1);
    for (i, c) in text.chars().enumerate() {
        let origin = x + i32::try_from(i).unwrap_or(0) * GLYPH * scale;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..8 {
                // bit 0 is the leftmost pixel
                if bits & (1 << col) != 0 {
                    let px = origin + col * scale;
                    let py = y + i32::try_from(row).unwrap_or(0) * scale;
                    draw_filled_rect_mut(img, Rect::at(px, py).of_size(size, size), colour);
                }
            }
        }
    }
}

fn draw_centered(img: &mut RgbImage, text: &str, left: i32, width: i32, top: i32, colour: Rgb<u8>) {
    let x = left + (width - text_width(text, TEXT_SCALE)) / 2;
    let y = top + (ROW_HEIGHT - GLYPH * TEXT_SCALE) / 2;
    draw_text(img, text, x, y, TEXT_SCALE, colour);
}

fn fill_row(img: &mut RgbImage, top: i32, colour: Rgb<u8>) {
    let width = COLUMNS[2].0 + COLUMNS[2].1 - MARGIN;
    draw_filled_rect_mut(
        img,
        Rect::at(MARGIN, top).of_size(width.unsigned_abs(), ROW_HEIGHT.unsigned_abs()),
        colour,
    );
}

fn draw_grid_row(img: &mut RgbImage, top: i32) {
    for (left, width) in COLUMNS {
        draw_hollow_rect_mut(
            img,
            Rect::at(left, top).of_size(width.unsigned_abs(), ROW_HEIGHT.unsigned_abs() + 1),
            GRID,
        );
    }
}

fn draw_row(img: &mut RgbImage, top: i32, cells: [&str; 3], fill: Rgb<u8>, ink: Rgb<u8>) {
    fill_row(img, top, fill);
    for ((left, width), text) in COLUMNS.into_iter().zip(cells) {
        draw_centered(img, text, left, width, top, ink);
    }
    draw_grid_row(img, top);
}

fn draw_subtotal(img: &mut RgbImage, top: i32, label: &str, nine: &NineSummary) {
    draw_row(
        img,
        top,
        [label, &nine.par.to_string(), &nine.strokes.to_string()],
        SUBTOTAL_FILL,
        INK,
    );
}

fn fit(text: &str, scale: i32) -> String {
    let room = usize::try_from((CARD_WIDTH as i32 - 2 * MARGIN) / (GLYPH * scale)).unwrap_or(0);
    if text.chars().count() <= room {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(room.saturating_sub(3)).collect();
        cut.push_str("...");
        cut
    }
}

/// Draw the scorecard of a completed round as a PNG. Output depends only on
/// the round and course, so the same input yields the same bytes.
///
/// # Errors
///
/// Will return `Err` if the round is not complete or the encoder fails
pub fn render_scorecard_png(round: &Round, course: &Course) -> Result<Vec<u8>, RenderError> {
    let summary = summarize(&round.hole_scores, &course.pars);
    if !round.is_complete || !summary.is_complete {
        return Err(RenderError::Incomplete(round.round_id));
    }

    let mut img = RgbImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, PAPER);

    draw_filled_rect_mut(
        &mut img,
        Rect::at(0, 0).of_size(CARD_WIDTH, HEADER_HEIGHT.unsigned_abs() - 20),
        HEADER_FILL,
    );
    draw_text(&mut img, "SCORECARD", MARGIN, 20, TITLE_SCALE, HEADER_INK);
    draw_text(&mut img, &fit(&course.name, TEXT_SCALE), MARGIN, 58, TEXT_SCALE, HEADER_INK);
    let date = round.date_played.format("%Y-%m-%d").to_string();
    let to_par = summary.score_to_par_label();
    draw_text(&mut img, &date, MARGIN, 86, TEXT_SCALE, HEADER_INK);
    draw_text(
        &mut img,
        &to_par,
        CARD_WIDTH as i32 - MARGIN - text_width(&to_par, TITLE_SCALE),
        78,
        TITLE_SCALE,
        HEADER_INK,
    );

    let mut top = HEADER_HEIGHT;
    draw_row(&mut img, top, ["HOLE", "PAR", "SCORE"], HEADER_FILL, HEADER_INK);
    top += ROW_HEIGHT;

    for hole in HoleNumber::all() {
        let par = course.pars.at(hole.index());
        let strokes = round
            .hole_scores
            .get(hole)
            .ok_or(RenderError::Incomplete(round.round_id))?;
        let (fill, ink) = score_colours(ScoreDisplay::from_relative(strokes - par));

        fill_row(&mut img, top, PAPER);
        let (score_left, score_width) = COLUMNS[2];
        draw_filled_rect_mut(
            &mut img,
            Rect::at(score_left, top).of_size(score_width.unsigned_abs(), ROW_HEIGHT.unsigned_abs()),
            fill,
        );
        draw_centered(&mut img, &hole.get().to_string(), COLUMNS[0].0, COLUMNS[0].1, top, INK);
        draw_centered(&mut img, &par.to_string(), COLUMNS[1].0, COLUMNS[1].1, top, INK);
        draw_centered(&mut img, &strokes.to_string(), score_left, score_width, top, ink);
        draw_grid_row(&mut img, top);
        top += ROW_HEIGHT;

        if hole.get() == 9 {
            draw_subtotal(&mut img, top, "OUT", &summary.front_nine);
            top += ROW_HEIGHT;
        }
    }

    draw_subtotal(&mut img, top, "IN", &summary.back_nine);
    top += ROW_HEIGHT;
    draw_row(
        &mut img,
        top,
        [
            "TOTAL",
            &course.pars.total().to_string(),
            &summary.total_score.to_string(),
        ],
        HEADER_FILL,
        HEADER_INK,
    );

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
