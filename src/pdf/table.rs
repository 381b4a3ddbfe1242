use crate::error::Error;
use crate::fonts::FontPair;

use super::Canvas;
use super::layout::{Align, Paragraph, RULE, PANEL_BG, TextStyle, fill_rect, hline};

const CELL_PAD_X: f32 = 6.0;
const CELL_PAD_Y: f32 = 4.0;
/// No column may claim more than this share of the table for its longest word.
const MAX_WORD_SHARE: f32 = 0.6;

pub(super) struct Column<'a> {
    pub(super) header: &'a str,
    pub(super) weight: f32,
    pub(super) align: Align,
}

impl<'a> Column<'a> {
    pub(super) fn new(header: &'a str, weight: f32) -> Self {
        Self {
            header,
            weight,
            align: Align::Left,
        }
    }

    pub(super) fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

pub(super) struct TableSpec<'a> {
    pub(super) columns: Vec<Column<'a>>,
    pub(super) rows: Vec<Vec<String>>,
}

const HEADER_STYLE: TextStyle = TextStyle::SMALL_BOLD;
const CELL_STYLE: TextStyle = TextStyle::BODY.with_size(9.0);

/// Column widths from weights, widened so that the longest unbreakable word
/// of each column fits. Columns that need more space grow; the others shrink
/// proportionally. Total width is preserved.
fn fit_columns(table: &TableSpec, fonts: &FontPair, total: f32) -> Vec<f32> {
    let ncols = table.columns.len();
    if ncols == 0 {
        return Vec::new();
    }
    let weight_sum: f32 = table.columns.iter().map(|c| c.weight.max(0.0)).sum();
    let mut widths: Vec<f32> = if weight_sum > 0.0 {
        table
            .columns
            .iter()
            .map(|c| total * c.weight.max(0.0) / weight_sum)
            .collect()
    } else {
        vec![total / ncols as f32; ncols]
    };

    let word_cap = total * MAX_WORD_SHARE;
    let longest_word = |text: &str, style: TextStyle| -> f32 {
        let font = fonts.get(style.bold);
        text.split_whitespace()
            .map(|w| font.text_width(w, style.size))
            .fold(0.0f32, f32::max)
    };
    let mut min_widths: Vec<f32> = table
        .columns
        .iter()
        .map(|c| longest_word(c.header, HEADER_STYLE))
        .collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate().take(ncols) {
            min_widths[i] = min_widths[i].max(longest_word(cell, CELL_STYLE));
        }
    }
    for w in &mut min_widths {
        *w = (*w + 2.0 * CELL_PAD_X).min(word_cap);
    }

    let mut extra_needed = 0.0f32;
    let mut shrinkable = 0.0f32;
    for i in 0..ncols {
        if min_widths[i] > widths[i] {
            extra_needed += min_widths[i] - widths[i];
            widths[i] = min_widths[i];
        } else {
            shrinkable += widths[i] - min_widths[i];
        }
    }

    if extra_needed > 0.0 && shrinkable > 0.0 {
        let factor = extra_needed.min(shrinkable) / shrinkable;
        for i in 0..ncols {
            if widths[i] > min_widths[i] {
                widths[i] -= (widths[i] - min_widths[i]) * factor;
            }
        }
    }
    let new_total: f32 = widths.iter().sum();
    if new_total > 0.0 && (new_total - total).abs() > 0.01 {
        let scale = total / new_total;
        for w in &mut widths {
            *w *= scale;
        }
    }
    widths
}

/// One measured row: its wrapped cells and the height they need.
struct RowLayout {
    cells: Vec<Paragraph>,
    height: f32,
}

impl RowLayout {
    fn measure(
        fonts: &FontPair,
        texts: &[&str],
        widths: &[f32],
        style: TextStyle,
    ) -> Self {
        let cells: Vec<Paragraph> = texts
            .iter()
            .zip(widths)
            .map(|(text, w)| Paragraph::new(fonts, text, style, w - 2.0 * CELL_PAD_X))
            .collect();
        Self::from_cells(cells)
    }

    fn from_cells(cells: Vec<Paragraph>) -> Self {
        let content_h = cells.iter().map(Paragraph::height).fold(0.0f32, f32::max);
        Self {
            height: content_h + 2.0 * CELL_PAD_Y,
            cells,
        }
    }

    /// Split into the lines that fit in `max_height` and the remainder.
    /// Returns `None` when not even one line fits.
    fn split(self, max_height: f32) -> Option<(RowLayout, RowLayout)> {
        let avail = max_height - 2.0 * CELL_PAD_Y;
        let mut head = Vec::with_capacity(self.cells.len());
        let mut tail = Vec::with_capacity(self.cells.len());
        let mut progressed = false;
        for cell in self.cells {
            let (fit, rest) = cell.split_lines(avail);
            progressed |= !fit.is_empty();
            head.push(fit);
            tail.push(rest);
        }
        progressed.then(|| (RowLayout::from_cells(head), RowLayout::from_cells(tail)))
    }
}

fn draw_row(canvas: &mut Canvas, row: &RowLayout, widths: &[f32], columns: &[Column], shade: bool) {
    let x0 = canvas.left();
    let total: f32 = widths.iter().sum();
    let top = canvas.top();
    if shade {
        fill_rect(canvas.content(), x0, top - row.height, total, row.height, PANEL_BG);
    }
    let mut x = x0;
    for ((cell, w), col) in row.cells.iter().zip(widths).zip(columns) {
        let fonts = canvas.fonts;
        cell.draw(
            canvas.content(),
            fonts,
            x + CELL_PAD_X,
            top - CELL_PAD_Y,
            w - 2.0 * CELL_PAD_X,
            col.align,
        );
        x += w;
    }
    hline(canvas.content(), x0, x0 + total, top - row.height, 0.5, RULE);
    canvas.advance(row.height);
}

fn draw_header(canvas: &mut Canvas, header: &RowLayout, widths: &[f32], columns: &[Column]) {
    let x0 = canvas.left();
    let total: f32 = widths.iter().sum();
    let top = canvas.top();
    hline(canvas.content(), x0, x0 + total, top, 0.75, RULE);
    draw_row(canvas, header, widths, columns, true);
}

fn measure_table(fonts: &FontPair, table: &TableSpec, widths: &[f32]) -> (RowLayout, Vec<RowLayout>) {
    let headers: Vec<&str> = table.columns.iter().map(|c| c.header).collect();
    let header = RowLayout::measure(fonts, &headers, widths, HEADER_STYLE);
    let rows = table
        .rows
        .iter()
        .map(|r| {
            let texts: Vec<&str> = r.iter().map(String::as_str).collect();
            RowLayout::measure(fonts, &texts, widths, CELL_STYLE)
        })
        .collect();
    (header, rows)
}

/// Height of the table when no page break falls inside it.
pub(super) fn table_height(fonts: &FontPair, table: &TableSpec, width: f32) -> f32 {
    let widths = fit_columns(table, fonts, width);
    let (header, rows) = measure_table(fonts, table, &widths);
    header.height + rows.iter().map(|r| r.height).sum::<f32>()
}

/// Draw a table at the cursor. Rows are measured before placement; a row
/// that does not fit moves to a new page below a repeated header row. A row
/// taller than a whole page is split line by line.
pub(super) fn draw_table(canvas: &mut Canvas, table: &TableSpec) -> Result<(), Error> {
    let ncols = table.columns.len();
    if ncols == 0 {
        return Err(Error::Layout("table without columns".into()));
    }
    if let Some(bad) = table.rows.iter().find(|r| r.len() != ncols) {
        return Err(Error::Layout(format!(
            "table row has {} cells, expected {ncols}",
            bad.len()
        )));
    }

    let widths = fit_columns(table, canvas.fonts, canvas.width());
    let (header, mut rows) = measure_table(canvas.fonts, table, &widths);

    let first_h = rows.first().map_or(0.0, |r| r.height);
    canvas.ensure(header.height + first_h.min(canvas.cursor.capacity() / 3.0));
    let mut fresh_page = canvas.cursor.at_top();
    draw_header(canvas, &header, &widths, &table.columns);

    let mut index = 0usize;
    rows.reverse();
    while let Some(row) = rows.pop() {
        let remaining = canvas.cursor.remaining();
        if row.height <= remaining {
            draw_row(canvas, &row, &widths, &table.columns, index % 2 == 1);
            fresh_page = false;
            index += 1;
            continue;
        }
        if !fresh_page {
            canvas.new_page();
            draw_header(canvas, &header, &widths, &table.columns);
            fresh_page = true;
            rows.push(row);
            continue;
        }
        // Taller than everything a fresh page offers: place what fits.
        let row_height = row.height;
        match row.split(remaining) {
            Some((head, tail)) => {
                draw_row(canvas, &head, &widths, &table.columns, index % 2 == 1);
                rows.push(tail);
                canvas.new_page();
                draw_header(canvas, &header, &widths, &table.columns);
            }
            None => {
                log::debug!("table row of {:.0}pt cannot be placed, dropped", row_height);
                index += 1;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::helvetica_pair;

    #[test]
    fn long_words_widen_their_column() {
        let fonts = helvetica_pair();
        let table = TableSpec {
            columns: vec![Column::new("File", 1.0), Column::new("Note", 1.0)],
            rows: vec![vec![
                "src/components/onboarding/WelcomeCarousel.tsx".into(),
                "ok".into(),
            ]],
        };
        let widths = fit_columns(&table, &fonts, 400.0);
        assert!(widths[0] > widths[1]);
        assert!((widths.iter().sum::<f32>() - 400.0).abs() < 0.1);
    }

    #[test]
    fn weights_set_widths_when_words_fit() {
        let fonts = helvetica_pair();
        let table = TableSpec {
            columns: vec![Column::new("A", 3.0), Column::new("B", 1.0)],
            rows: vec![vec!["x".into(), "y".into()]],
        };
        let widths = fit_columns(&table, &fonts, 400.0);
        assert!((widths[0] - 300.0).abs() < 0.1);
        assert!((widths[1] - 100.0).abs() < 0.1);
    }

    #[test]
    fn oversized_row_splits_by_lines() {
        let fonts = helvetica_pair();
        let text = "word ".repeat(400);
        let row = RowLayout::measure(&fonts, &[&text, "short"], &[100.0, 100.0], CELL_STYLE);
        let total_lines = row.cells[0].lines.len();
        let (head, tail) = row.split(100.0).unwrap();
        assert!(head.height <= 100.0);
        assert_eq!(head.cells[0].lines.len() + tail.cells[0].lines.len(), total_lines);
        assert_eq!(head.cells[1].lines.len(), 1);
        assert!(tail.cells[1].is_empty());
    }

    #[test]
    fn table_height_covers_header_and_rows() {
        let fonts = helvetica_pair();
        let mut table = TableSpec {
            columns: vec![Column::new("File", 1.0), Column::new("Line", 1.0)],
            rows: Vec::new(),
        };
        let header_only = table_height(&fonts, &table, 400.0);
        assert!(header_only > 0.0);
        table.rows = vec![vec!["a.rs".into(), "1".into()], vec!["b.rs".into(), "2".into()]];
        assert!(table_height(&fonts, &table, 400.0) > header_only + 4.0 * CELL_PAD_Y);
    }

    #[test]
    fn split_without_room_for_a_line_fails() {
        let fonts = helvetica_pair();
        let row = RowLayout::measure(&fonts, &["text"], &[100.0], CELL_STYLE);
        assert!(row.split(CELL_PAD_Y).is_none());
    }
}
