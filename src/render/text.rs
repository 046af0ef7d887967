use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use image::RgbaImage;

use crate::{document::color::Color, render::cpu::blend_pixel};

/// A glyph positioned relative to its line's left edge.
#[derive(Clone, Copy, Debug)]
struct LineGlyph {
    id: GlyphId,
    ch: char,
    x: f32,
    color: Color,
}

#[derive(Clone, Debug, Default)]
struct Line {
    glyphs: Vec<LineGlyph>,
    width: f32,
}

/// Word-wrapped, multi-color text ready to draw.
#[derive(Clone, Debug)]
pub(crate) struct TextBlock {
    lines: Vec<Line>,
    px: f32,
    line_height: f32,
    ascent: f32,
    descent: f32,
}

impl TextBlock {
    /// Lay out colored runs at `px`, breaking after whitespace so lines fit in `max_width`.
    /// A word wider than `max_width` gets a line of its own. `\n` forces a break.
    pub(crate) fn layout(
        font: &FontArc,
        runs: &[(&str, Color)],
        px: f32,
        line_height_factor: f32,
        max_width: f32,
    ) -> Self {
        let scaled = font.as_scaled(px);
        let mut lines = vec![Line::default()];

        for word in words(runs) {
            if word.is_empty() {
                lines.push(Line::default());
                continue;
            }
            let ink_w = measure(
                font,
                px,
                word.iter()
                    .map(|(c, _)| *c)
                    .take_while(|c| !c.is_whitespace()),
            );
            let Some(line) = lines.last_mut() else {
                continue;
            };
            let fits = line.width + ink_w <= max_width;
            if !line.glyphs.is_empty() && !fits {
                lines.push(Line::default());
            }
            let Some(line) = lines.last_mut() else {
                continue;
            };

            let mut prev: Option<GlyphId> = None;
            for &(c, color) in &word {
                let id = font.glyph_id(c);
                if let Some(p) = prev {
                    line.width += scaled.kern(p, id);
                }
                line.glyphs.push(LineGlyph {
                    id,
                    ch: c,
                    x: line.width,
                    color,
                });
                line.width += scaled.h_advance(id);
                prev = Some(id);
            }
        }

        // Trailing whitespace does not count towards the visible width.
        for line in &mut lines {
            while let Some(last) = line.glyphs.last().filter(|g| g.ch.is_whitespace()) {
                line.width = last.x;
                line.glyphs.pop();
            }
        }
        lines.retain(|l| !l.glyphs.is_empty());

        Self {
            lines,
            px,
            line_height: px * line_height_factor,
            ascent: scaled.ascent(),
            descent: scaled.descent(),
        }
    }

    /// Number of laid-out lines.
    pub(crate) fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total block height.
    pub(crate) fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    /// Widest line.
    pub(crate) fn width(&self) -> f32 {
        self.lines.iter().map(|l| l.width).fold(0.0, f32::max)
    }

    /// Draw with the block's top-left corner at `(left, top)`.
    pub(crate) fn draw(&self, font: &FontArc, canvas: &mut RgbaImage, left: f32, top: f32) {
        let half_leading = (self.line_height - (self.ascent - self.descent)) * 0.5;
        for (i, line) in self.lines.iter().enumerate() {
            let baseline = top + i as f32 * self.line_height + half_leading + self.ascent;
            for g in &line.glyphs {
                let glyph = g
                    .id
                    .with_scale_and_position(self.px, point(left + g.x, baseline));
                let Some(outlined) = font.outline_glyph(glyph) else {
                    continue;
                };
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let x = bounds.min.x as i64 + i64::from(gx);
                    let y = bounds.min.y as i64 + i64::from(gy);
                    blend_pixel(canvas, x, y, g.color, coverage);
                });
            }
        }
    }
}

fn measure(font: &FontArc, px: f32, chars: impl Iterator<Item = char>) -> f32 {
    let scaled = font.as_scaled(px);
    let mut w = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    for c in chars {
        let id = font.glyph_id(c);
        if let Some(p) = prev {
            w += scaled.kern(p, id);
        }
        w += scaled.h_advance(id);
        prev = Some(id);
    }
    w
}

/// Split colored runs into break units: each unit is a word plus its trailing whitespace.
/// Words may span runs. An empty unit stands for a forced line break.
fn words(runs: &[(&str, Color)]) -> Vec<Vec<(char, Color)>> {
    let mut out = Vec::new();
    let mut cur: Vec<(char, Color)> = Vec::new();
    let mut in_space = false;
    for &(text, color) in runs {
        for c in text.chars() {
            if c == '\n' {
                if !cur.is_empty() {
                    out.push(std::mem::take(&mut cur));
                }
                out.push(Vec::new());
                in_space = false;
                continue;
            }
            if in_space && !c.is_whitespace() {
                out.push(std::mem::take(&mut cur));
                in_space = false;
            }
            if c.is_whitespace() {
                in_space = true;
            }
            cur.push((c, color));
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
