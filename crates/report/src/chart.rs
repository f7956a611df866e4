//! Summary bar chart rendered straight into an RGBA buffer
//!
//! One bar per outcome category, count label above each bar, category name
//! below, render timestamp in the title. Labels use a small embedded 5x7
//! glyph set, so the output is deterministic for a given tally and time.

use std::path::Path;

use chrono::Local;
use image::{Rgba, RgbaImage};

use crate::error::ReportResult;
use crate::recorder::RunTally;

pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 500;

const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 40;
const MARGIN_TOP: u32 = 70;
const MARGIN_BOTTOM: u32 = 60;

const BACKGROUND: Rgba<u8> = Rgba([245, 245, 245, 255]);
const AXIS: Rgba<u8> = Rgba([80, 80, 80, 255]);
const TEXT: Rgba<u8> = Rgba([30, 30, 30, 255]);

const GREEN: Rgba<u8> = Rgba([0, 128, 0, 255]);
const RED: Rgba<u8> = Rgba([200, 30, 30, 255]);
const ORANGE: Rgba<u8> = Rgba([255, 165, 0, 255]);

/// Render the tally as `summary_graph.png`-style bar chart at `path`.
///
/// An all-zero tally still renders: axes, labels and zero-height bars.
pub fn render_tally_chart(tally: &RunTally, path: &Path) -> ReportResult<()> {
    let mut img = RgbaImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);

    let title = format!(
        "TEST SUMMARY ({})",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    let title_w = text_width(&title, 2);
    draw_text(
        &mut img,
        (CHART_WIDTH.saturating_sub(title_w)) / 2,
        20,
        &title,
        2,
        TEXT,
    );

    let plot_w = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;

    // Axes
    fill_rect(&mut img, MARGIN_LEFT, MARGIN_TOP, 2, plot_h, AXIS);
    fill_rect(&mut img, MARGIN_LEFT, baseline, plot_w, 2, AXIS);

    let bars: [(&str, u32, Rgba<u8>); 3] = [
        ("PASSED", tally.passed, GREEN),
        ("FAILED", tally.failed, RED),
        ("SKIPPED", tally.skipped, ORANGE),
    ];
    let max = bars.iter().map(|(_, n, _)| *n).max().unwrap_or(0).max(1);

    let slot = plot_w / bars.len() as u32;
    let bar_w = slot / 2;

    for (i, (label, count, color)) in bars.iter().enumerate() {
        let slot_x = MARGIN_LEFT + i as u32 * slot;
        let bar_x = slot_x + (slot - bar_w) / 2;
        let bar_h = (u64::from(*count) * u64::from(plot_h) / u64::from(max)) as u32;
        let bar_y = baseline - bar_h;

        fill_rect(&mut img, bar_x, bar_y, bar_w, bar_h, *color);

        // Count above the bar
        let count_text = count.to_string();
        let cw = text_width(&count_text, 2);
        draw_text(
            &mut img,
            bar_x + (bar_w.saturating_sub(cw)) / 2,
            bar_y.saturating_sub(20),
            &count_text,
            2,
            TEXT,
        );

        // Category name below the baseline
        let lw = text_width(label, 2);
        draw_text(
            &mut img,
            bar_x + (bar_w.saturating_sub(lw)) / 2,
            baseline + 12,
            label,
            2,
            TEXT,
        );
    }

    img.save(path)?;
    Ok(())
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    for dy in 0..h {
        for dx in 0..w {
            let (px, py) = (x + dx, y + dy);
            if px < img.width() && py < img.height() {
                img.put_pixel(px, py, color);
            }
        }
    }
}

/// Pixel width of `text` at the given scale, including inter-glyph gaps.
fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * 6 * scale
}

fn draw_text(img: &mut RgbaImage, x: u32, y: u32, text: &str, scale: u32, color: Rgba<u8>) {
    let mut cursor = x;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch.to_ascii_uppercase()) {
            for (ry, row) in rows.iter().enumerate() {
                for rx in 0..5u32 {
                    if row & (0b10000 >> rx) != 0 {
                        fill_rect(
                            img,
                            cursor + rx * scale,
                            y + ry as u32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
        cursor += 6 * scale;
    }
}

/// 5x7 bitmap glyphs for the characters the chart needs; anything else
/// renders as a blank advance.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'I' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        _ => return None,
    };
    Some(rows)
}
