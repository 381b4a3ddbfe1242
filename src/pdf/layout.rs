use pdf_writer::{Content, Name, Str};

use crate::fonts::{FontEntry, FontPair};

pub(super) type Rgb = [f32; 3];

pub(super) const TEXT: Rgb = [0.12, 0.14, 0.17];
pub(super) const MUTED: Rgb = [0.42, 0.45, 0.50];
pub(super) const ACCENT: Rgb = [0.15, 0.39, 0.92];
pub(super) const GREEN: Rgb = [0.13, 0.55, 0.29];
pub(super) const AMBER: Rgb = [0.85, 0.55, 0.04];
pub(super) const RED: Rgb = [0.80, 0.20, 0.20];
pub(super) const GRAY: Rgb = [0.55, 0.57, 0.61];
pub(super) const RULE: Rgb = [0.85, 0.87, 0.90];
pub(super) const PANEL_BG: Rgb = [0.96, 0.97, 0.98];
pub(super) const WHITE: Rgb = [1.0, 1.0, 1.0];

/// Font weight, size and colour of one draw call. Passed explicitly; the
/// content stream carries no "current style" between calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct TextStyle {
    pub(super) bold: bool,
    pub(super) size: f32,
    pub(super) color: Rgb,
}

impl TextStyle {
    pub(super) const TITLE: TextStyle = TextStyle::new(true, 26.0, TEXT);
    pub(super) const SUBTITLE: TextStyle = TextStyle::new(false, 14.0, MUTED);
    pub(super) const HEADING: TextStyle = TextStyle::new(true, 16.0, ACCENT);
    pub(super) const SUBHEADING: TextStyle = TextStyle::new(true, 12.0, TEXT);
    pub(super) const BODY: TextStyle = TextStyle::new(false, 10.0, TEXT);
    pub(super) const BODY_BOLD: TextStyle = TextStyle::new(true, 10.0, TEXT);
    pub(super) const SMALL: TextStyle = TextStyle::new(false, 8.5, MUTED);
    pub(super) const SMALL_BOLD: TextStyle = TextStyle::new(true, 8.5, TEXT);

    pub(super) const fn new(bold: bool, size: f32, color: Rgb) -> Self {
        Self { bold, size, color }
    }

    pub(super) const fn with_color(self, color: Rgb) -> Self {
        Self { color, ..self }
    }

    pub(super) const fn with_size(self, size: f32) -> Self {
        Self { size, ..self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Align {
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub(super) struct TextLine {
    pub(super) text: String,
    pub(super) width: f32,
}

/// Scripts written without inter-word spaces; any character may start a line.
fn is_cjk(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x11FF
        | 0x2E80..=0x303F
        | 0x3040..=0x30FF
        | 0x3100..=0x9FFF
        | 0xA960..=0xA97F
        | 0xAC00..=0xD7AF
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFFEF
        | 0x20000..=0x2FA1F)
}

/// Breakable units of one paragraph: (text, preceded by whitespace).
fn tokens(para: &str) -> Vec<(String, bool)> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_space = false;
    let mut pending_space = false;

    for ch in para.chars() {
        if ch.is_whitespace() {
            if !current.is_empty() {
                out.push((std::mem::take(&mut current), current_space));
            }
            pending_space = true;
        } else if is_cjk(ch) {
            if !current.is_empty() {
                out.push((std::mem::take(&mut current), current_space));
            }
            out.push((ch.to_string(), pending_space));
            pending_space = false;
        } else {
            if current.is_empty() {
                current_space = pending_space;
                pending_space = false;
            }
            current.push(ch);
        }
    }
    if !current.is_empty() {
        out.push((current, current_space));
    }
    out
}

/// Greedy line wrapping. Words wider than `max_width` break per character;
/// explicit newlines start a new line.
pub(super) fn wrap_text(text: &str, font: &FontEntry, size: f32, max_width: f32) -> Vec<TextLine> {
    let max_width = max_width.max(size);
    let space_w = font.space_width(size);
    let mut lines = Vec::new();

    for para in text.trim().split('\n') {
        let mut line = String::new();
        let mut width = 0.0f32;

        for (token, space_before) in tokens(para) {
            let tw = font.text_width(&token, size);
            let sw = if space_before && !line.is_empty() { space_w } else { 0.0 };

            if tw > max_width {
                if sw > 0.0 && width + sw < max_width {
                    line.push(' ');
                    width += sw;
                }
                for ch in token.chars() {
                    let cw = font.char_width_1000(ch) * size / 1000.0;
                    if !line.is_empty() && width + cw > max_width {
                        lines.push(finish_line(font, size, &mut line, &mut width));
                    }
                    line.push(ch);
                    width += cw;
                }
                continue;
            }

            if !line.is_empty() && width + sw + tw > max_width {
                lines.push(finish_line(font, size, &mut line, &mut width));
            } else if sw > 0.0 {
                line.push(' ');
                width += sw;
            }
            line.push_str(&token);
            width += tw;
        }

        if !line.is_empty() {
            lines.push(finish_line(font, size, &mut line, &mut width));
        }
    }
    lines
}

fn finish_line(font: &FontEntry, size: f32, line: &mut String, width: &mut f32) -> TextLine {
    let text = std::mem::take(line).trim_end().to_string();
    *width = 0.0;
    TextLine {
        width: font.text_width(&text, size),
        text,
    }
}

/// Wrapped, measured text ready to be placed.
#[derive(Clone, Debug)]
pub(super) struct Paragraph {
    pub(super) lines: Vec<TextLine>,
    pub(super) style: TextStyle,
    pub(super) line_h: f32,
}

impl Paragraph {
    pub(super) fn new(fonts: &FontPair, text: &str, style: TextStyle, max_width: f32) -> Self {
        let font = fonts.get(style.bold);
        Self {
            lines: wrap_text(text, font, style.size, max_width),
            style,
            line_h: font.line_height(style.size),
        }
    }

    pub(super) fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_h
    }

    pub(super) fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines that fit in `max_height`, and the rest.
    pub(super) fn split_lines(mut self, max_height: f32) -> (Paragraph, Paragraph) {
        let fit = ((max_height / self.line_h).floor().max(0.0) as usize).min(self.lines.len());
        let rest = Paragraph {
            lines: self.lines.split_off(fit),
            style: self.style,
            line_h: self.line_h,
        };
        (self, rest)
    }

    /// Draw every line starting with its top edge at `top`.
    pub(super) fn draw(&self, content: &mut Content, fonts: &FontPair, x: f32, top: f32, width: f32, align: Align) {
        for (i, line) in self.lines.iter().enumerate() {
            draw_line(
                content,
                fonts,
                self.style,
                x,
                top - i as f32 * self.line_h,
                width,
                line,
                align,
            );
        }
    }
}

/// One line of text whose line box has its top edge at `top`.
#[allow(clippy::too_many_arguments)]
pub(super) fn draw_line(
    content: &mut Content,
    fonts: &FontPair,
    style: TextStyle,
    x: f32,
    top: f32,
    width: f32,
    line: &TextLine,
    align: Align,
) {
    if line.text.is_empty() {
        return;
    }
    let font = fonts.get(style.bold);
    let line_h = font.line_height(style.size);
    let ascent = font.ascent(style.size);
    let baseline = top - (line_h - style.size) / 2.0 - ascent;
    let line_x = match align {
        Align::Left => x,
        Align::Center => x + (width - line.width) / 2.0,
        Align::Right => x + width - line.width,
    };
    draw_text_at(content, font, style, line_x, baseline, &line.text);
}

/// Raw text at a baseline position.
pub(super) fn draw_text_at(
    content: &mut Content,
    font: &FontEntry,
    style: TextStyle,
    x: f32,
    baseline: f32,
    text: &str,
) {
    let [r, g, b] = style.color;
    content.set_fill_rgb(r, g, b);
    content.begin_text();
    content.set_font(Name(font.pdf_name.as_bytes()), style.size);
    content.next_line(x, baseline);
    content.show(Str(&font.encode(text)));
    content.end_text();
}

/// Single line of text that fits in `max_width`, truncated with an ellipsis.
pub(super) fn fit_line(fonts: &FontPair, text: &str, style: TextStyle, max_width: f32) -> TextLine {
    let font = fonts.get(style.bold);
    let text = text.trim().replace('\n', " ");
    let width = font.text_width(&text, style.size);
    if width <= max_width {
        return TextLine { text, width };
    }
    let ellipsis = if font.is_embedded() { "…" } else { "..." };
    let ell_w = font.text_width(ellipsis, style.size);
    let mut out = String::new();
    let mut w = 0.0;
    for ch in text.chars() {
        let cw = font.char_width_1000(ch) * style.size / 1000.0;
        if w + cw + ell_w > max_width {
            break;
        }
        out.push(ch);
        w += cw;
    }
    let out = format!("{}{ellipsis}", out.trim_end());
    let width = font.text_width(&out, style.size);
    TextLine { text: out, width }
}

pub(super) fn fill_rect(content: &mut Content, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
    let [r, g, b] = color;
    content.set_fill_rgb(r, g, b);
    content.rect(x, y, w, h);
    content.fill_nonzero();
}

pub(super) fn hline(content: &mut Content, x1: f32, x2: f32, y: f32, width: f32, color: Rgb) {
    let [r, g, b] = color;
    content.set_stroke_rgb(r, g, b);
    content.set_line_width(width);
    content.move_to(x1, y);
    content.line_to(x2, y);
    content.stroke();
}

/// Lighter tint of a colour for box backgrounds.
pub(super) fn tint(color: Rgb, amount: f32) -> Rgb {
    color.map(|c| c + (1.0 - c) * amount)
}

/// Five-point star polygon centered at (cx, cy).
fn star_path(content: &mut Content, cx: f32, cy: f32, outer: f32) {
    let inner = outer * 0.5;
    for i in 0..10 {
        let r = if i % 2 == 0 { outer } else { inner };
        let angle = std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
        let (px, py) = (cx + r * angle.cos(), cy + r * angle.sin());
        if i == 0 {
            content.move_to(px, py);
        } else {
            content.line_to(px, py);
        }
    }
    content.close_path();
}

pub(super) const STAR_GOLD: Rgb = [0.98, 0.73, 0.09];
pub(super) const STAR_EMPTY: Rgb = [0.82, 0.84, 0.87];

/// Five stars of `size` starting at `x` with their vertical center at `cy`.
/// Half stars are drawn by clipping a gold star to its left half.
pub(super) fn draw_stars(content: &mut Content, stars: crate::model::StarRating, x: f32, cy: f32, size: f32) -> f32 {
    let step = size * 1.15;
    let outer = size / 2.0;
    for i in 0..5u8 {
        let cx = x + i as f32 * step + outer;
        let color = if i < stars.full { STAR_GOLD } else { STAR_EMPTY };
        let [r, g, b] = color;
        content.set_fill_rgb(r, g, b);
        star_path(content, cx, cy, outer);
        content.fill_nonzero();

        if i == stars.full && stars.half == 1 {
            content.save_state();
            content.rect(cx - outer, cy - outer, outer, outer * 2.0);
            content.clip_nonzero();
            content.end_path();
            let [r, g, b] = STAR_GOLD;
            content.set_fill_rgb(r, g, b);
            star_path(content, cx, cy, outer);
            content.fill_nonzero();
            content.restore_state();
        }
    }
    5.0 * step
}

/// Small triangle pointing up, down or right.
pub(super) fn draw_trend_arrow(content: &mut Content, trend: crate::model::Trend, x: f32, cy: f32, size: f32, color: Rgb) {
    use crate::model::Trend;
    let h = size / 2.0;
    let [r, g, b] = color;
    content.set_fill_rgb(r, g, b);
    match trend {
        Trend::Up => {
            content.move_to(x, cy - h);
            content.line_to(x + size, cy - h);
            content.line_to(x + h, cy + h);
        }
        Trend::Down => {
            content.move_to(x, cy + h);
            content.line_to(x + size, cy + h);
            content.line_to(x + h, cy - h);
        }
        Trend::Stable => {
            content.move_to(x, cy + h);
            content.line_to(x + size, cy);
            content.line_to(x, cy - h);
        }
    }
    content.close_path();
    content.fill_nonzero();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cjk_characters_are_individual_tokens() {
        let t = tokens("日本 abc語");
        let texts: Vec<&str> = t.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(texts, vec!["日", "本", "abc", "語"]);
        assert_eq!(t[2].1, true);
        assert_eq!(t[3].1, false);
    }

    #[test]
    fn tint_moves_toward_white() {
        assert_eq!(tint([0.0, 0.5, 1.0], 0.5), [0.5, 0.75, 1.0]);
    }
}
