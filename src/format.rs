//! Number and glyph formatting shared by both renderers.

use crate::locale::NumberFormat;

pub const BAR_BLOCKS: usize = 10;

/// Integer with locale thousands separators.
pub fn format_count(n: u64, nf: NumberFormat) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(nf.thousands);
        }
        out.push(ch);
    }
    out
}

/// One decimal place, with the locale decimal separator.
pub fn format_decimal(v: f64, nf: NumberFormat) -> String {
    let s = format!("{:.1}", round1(v));
    if nf.decimal == '.' {
        s
    } else {
        s.replace('.', &nf.decimal.to_string())
    }
}

pub fn format_percent(v: f64, nf: NumberFormat) -> String {
    format!("{}%", format_decimal(v, nf))
}

/// Round half away from zero to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Filled block count of a 10-block bar for a percentage value.
pub fn bar_filled(value: f64) -> usize {
    if !value.is_finite() {
        return 0;
    }
    let clamped = value.clamp(0.0, 100.0);
    ((clamped / 100.0 * BAR_BLOCKS as f64).round() as usize).min(BAR_BLOCKS)
}

pub fn bar_glyph(value: f64) -> String {
    let filled = bar_filled(value);
    let mut s = "█".repeat(filled);
    s.push_str(&"░".repeat(BAR_BLOCKS - filled));
    s
}

/// Text folded onto one line: line breaks become single spaces.
pub fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape text placed inside a pipe table cell.
pub fn table_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: NumberFormat = NumberFormat {
        thousands: ',',
        decimal: '.',
    };
    const DE: NumberFormat = NumberFormat {
        thousands: '.',
        decimal: ',',
    };

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0, EN), "0");
        assert_eq!(format_count(999, EN), "999");
        assert_eq!(format_count(1000, EN), "1,000");
        assert_eq!(format_count(1234567, EN), "1,234,567");
        assert_eq!(format_count(1234567, DE), "1.234.567");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(20.0, EN), "20.0%");
        assert_eq!(format_percent(33.333, EN), "33.3%");
        assert_eq!(format_percent(12.25, DE), "12,3%");
    }

    #[test]
    fn bar_filled_rounds_after_clamping() {
        let cases = [
            (-10.0, 0),
            (0.0, 0),
            (33.0, 3),
            (50.0, 5),
            (66.0, 7),
            (100.0, 10),
            (150.0, 10),
        ];
        for (value, expected) in cases {
            assert_eq!(bar_filled(value), expected, "value {value}");
        }
        assert_eq!(bar_filled(f64::NAN), 0);
    }

    #[test]
    fn bar_glyph_is_always_ten_blocks() {
        assert_eq!(bar_glyph(50.0), "█████░░░░░");
        assert_eq!(bar_glyph(150.0).chars().count(), BAR_BLOCKS);
    }

    #[test]
    fn table_cells_escape_pipes() {
        assert_eq!(table_cell("a|b\nc"), "a\\|b c");
    }

    #[test]
    fn line_breaks_fold_to_spaces() {
        assert_eq!(single_line("  Faster\r\n  cold start \n\nfor all "), "Faster cold start for all");
    }
}
