mod images;
mod layout;
mod sections;
mod table;

use std::collections::{BTreeMap, HashSet};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::charts::{ChartKind, ChartSet};
use crate::config::PageGeometry;
use crate::error::Error;
use crate::fonts::{FontPair, register_fonts};
use crate::locale::LocaleCatalog;
use crate::model::Section;

use images::ChartXObject;
use layout::{Align, Paragraph, TextLine, TextStyle, draw_line, hline};

/// A rendered report.
#[derive(Clone, Debug)]
pub struct PdfDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Chart panels actually drawn, in placement order.
    pub placed_charts: Vec<ChartKind>,
    /// Elements dropped during rendering: undecodable chart images and
    /// sections whose layout failed.
    pub skipped_elements: usize,
}

/// Vertical position on the current page, in PDF points from the bottom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageCursor {
    y: f32,
    top: f32,
    bottom: f32,
    pages: usize,
    lowest: f32,
}

impl PageCursor {
    pub fn new(geometry: &PageGeometry) -> Self {
        let top = geometry.height - geometry.margin_top;
        Self {
            y: top,
            top,
            bottom: geometry.margin_bottom,
            pages: 1,
            lowest: top,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn remaining(&self) -> f32 {
        self.y - self.bottom
    }

    pub fn capacity(&self) -> f32 {
        self.top - self.bottom
    }

    pub fn at_top(&self) -> bool {
        (self.top - self.y).abs() < 0.5
    }

    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
        self.lowest = self.lowest.min(self.y);
    }

    /// Distance the cursor ever went past the bottom margin, on any page.
    pub fn overrun(&self) -> f32 {
        (self.bottom - self.lowest).max(0.0)
    }

    pub fn page_break(&mut self) {
        self.y = self.top;
        self.pages += 1;
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }
}

const CONTINUED_GAP: f32 = 8.0;

/// Page list under construction plus the cursor into the last page.
pub(super) struct Canvas<'a> {
    pub(super) fonts: &'a FontPair,
    pub(super) catalog: &'a LocaleCatalog,
    pub(super) geometry: PageGeometry,
    pub(super) cursor: PageCursor,
    pages: Vec<Content>,
    current: Content,
    continued: Option<String>,
    images: &'a BTreeMap<ChartKind, ChartXObject>,
    placed_charts: Vec<ChartKind>,
}

impl<'a> Canvas<'a> {
    fn new(
        fonts: &'a FontPair,
        catalog: &'a LocaleCatalog,
        geometry: PageGeometry,
        images: &'a BTreeMap<ChartKind, ChartXObject>,
    ) -> Self {
        Self {
            fonts,
            catalog,
            geometry,
            cursor: PageCursor::new(&geometry),
            pages: Vec::new(),
            current: Content::new(),
            continued: None,
            images,
            placed_charts: Vec::new(),
        }
    }

    pub(super) fn content(&mut self) -> &mut Content {
        &mut self.current
    }

    pub(super) fn left(&self) -> f32 {
        self.geometry.margin_left
    }

    pub(super) fn width(&self) -> f32 {
        self.geometry.content_width()
    }

    pub(super) fn top(&self) -> f32 {
        self.cursor.y()
    }

    pub(super) fn advance(&mut self, dy: f32) {
        self.cursor.advance(dy);
    }

    /// Vertical gap that never pushes the cursor below the bottom margin.
    pub(super) fn gap(&mut self, dy: f32) {
        if !self.cursor.at_top() {
            self.cursor.advance(dy.min(self.cursor.remaining()));
        }
    }

    /// Start a page. Inside a section, the new page opens with the section
    /// title and a "(continued)" suffix.
    pub(super) fn new_page(&mut self) {
        self.pages.push(std::mem::replace(&mut self.current, Content::new()));
        self.cursor.page_break();
        if let Some(title) = self.continued.clone() {
            let text = format!("{title} ({})", self.catalog.labels.continued);
            let p = Paragraph::new(
                self.fonts,
                &text,
                TextStyle::HEADING.with_size(12.0),
                self.width(),
            );
            self.place(&p, self.left(), self.width(), Align::Left);
            self.cursor.advance(CONTINUED_GAP);
        }
    }

    /// Break before a block of `height` unless it fits or the page is still
    /// empty. Returns true when a break was inserted.
    pub(super) fn ensure(&mut self, height: f32) -> bool {
        if height > self.cursor.remaining() && !self.cursor.at_top() {
            self.new_page();
            true
        } else {
            false
        }
    }

    /// Draw a measured paragraph at the cursor and advance past it. The
    /// caller has ensured it fits.
    pub(super) fn place(&mut self, p: &Paragraph, x: f32, width: f32, align: Align) {
        let top = self.cursor.y();
        p.draw(&mut self.current, self.fonts, x, top, width, align);
        self.cursor.advance(p.height());
    }

    /// Draw a paragraph line by line, breaking pages between lines.
    pub(super) fn flow(&mut self, p: &Paragraph, x: f32, width: f32, align: Align) {
        for line in &p.lines {
            if p.line_h > self.cursor.remaining() && !self.cursor.at_top() {
                self.new_page();
            }
            let top = self.cursor.y();
            draw_line(&mut self.current, self.fonts, p.style, x, top, width, line, align);
            self.cursor.advance(p.line_h);
        }
    }

    pub(super) fn set_continued(&mut self, title: Option<String>) {
        self.continued = title;
    }

    pub(super) fn chart(&self, kind: ChartKind) -> Option<&'a ChartXObject> {
        self.images.get(&kind)
    }

    pub(super) fn mark_placed(&mut self, kind: ChartKind) {
        self.placed_charts.push(kind);
    }

    fn finish(mut self) -> (Vec<Content>, Vec<ChartKind>) {
        self.pages.push(self.current);
        (self.pages, self.placed_charts)
    }
}

/// Every character the document can contain, for font subsetting.
fn used_chars(sections: &[Section], catalog: &LocaleCatalog) -> HashSet<char> {
    let mut chars: HashSet<char> = (' '..='~').collect();
    chars.extend(['…', '•', '·', '×', '°']);
    chars.extend(catalog.labels.all_text().chars());
    chars.extend(crate::markdown::render_markdown(sections, catalog).chars());
    chars.retain(|c| !c.is_control());
    chars
}

fn document_title(sections: &[Section], catalog: &LocaleCatalog) -> String {
    sections
        .iter()
        .find_map(|s| match s {
            Section::Header(h) => Some(format!("{}: {}", catalog.labels.report_title, h.app_name)),
            _ => None,
        })
        .unwrap_or_else(|| catalog.labels.report_title.to_string())
}

fn stamp_page_footer(
    content: &mut Content,
    fonts: &FontPair,
    catalog: &LocaleCatalog,
    geometry: &PageGeometry,
    page_num: usize,
    total_pages: usize,
) {
    let l = catalog.labels;
    let style = TextStyle::SMALL;
    let text = format!("{} {page_num} {} {total_pages}", l.page, l.page_of);
    let font = fonts.get(style.bold);
    let line = TextLine {
        width: font.text_width(&text, style.size),
        text,
    };
    let rule_y = geometry.margin_bottom * 0.75;
    hline(
        content,
        geometry.margin_left,
        geometry.width - geometry.margin_right,
        rule_y,
        0.5,
        layout::RULE,
    );
    draw_line(
        content,
        fonts,
        style,
        geometry.margin_left,
        rule_y - 4.0,
        geometry.content_width(),
        &line,
        Align::Right,
    );
}

/// Lay out the sections as a paginated PDF. Chart images come from `charts`;
/// missing ones leave their panel slot empty.
pub fn render_pdf(
    sections: &[Section],
    catalog: &LocaleCatalog,
    charts: &ChartSet,
    geometry: &PageGeometry,
) -> Result<PdfDocument, Error> {
    let t0 = std::time::Instant::now();
    if geometry.content_width() <= 0.0 || geometry.content_height() <= 0.0 {
        return Err(Error::Layout(format!(
            "page {}x{}pt leaves no content area",
            geometry.width, geometry.height
        )));
    }

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    // Phase 1: fonts, subset to every character the report can show
    let chars = used_chars(sections, catalog);
    let fonts = register_fonts(&mut pdf, catalog.font, &mut alloc, &chars);
    let t_fonts = t0.elapsed();

    // Phase 1b: chart images
    let (images, decode_failures) = images::embed_charts(&mut pdf, &mut alloc, charts);
    let t_images = t0.elapsed();

    // Phase 2: layout
    let mut canvas = Canvas::new(&fonts, catalog, *geometry, &images);
    let mut skipped = decode_failures;
    for section in sections {
        if let Err(e) = sections::draw_section(&mut canvas, section) {
            log::warn!("Section {:?} skipped: {e}", section.kind());
            skipped += 1;
        }
    }
    let overrun = canvas.cursor.overrun();
    if overrun > 0.5 {
        log::warn!("Layout ran {overrun:.0}pt past the bottom margin");
    }
    let (mut pages, placed_charts) = canvas.finish();
    let t_layout = t0.elapsed();

    // Phase 2b: page footers, now that the total is known
    let total_pages = pages.len();
    for (i, content) in pages.iter_mut().enumerate() {
        stamp_page_footer(content, &fonts, catalog, geometry, i + 1, total_pages);
    }

    // Phase 3: allocate page and content IDs, write the document
    let page_ids: Vec<Ref> = (0..total_pages).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..total_pages).map(|_| alloc()).collect();

    for (i, c) in pages.into_iter().enumerate() {
        let raw = c.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(total_pages as i32);

    for i in 0..total_pages {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, geometry.width, geometry.height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut font_dict = resources.fonts();
            for entry in fonts.entries() {
                font_dict.pair(Name(entry.pdf_name.as_bytes()), entry.font_ref);
            }
        }
        if !images.is_empty() {
            let mut xobjects = resources.x_objects();
            for xobj in images.values() {
                xobjects.pair(Name(xobj.name.as_bytes()), xobj.xobj);
            }
        }
    }

    let title = document_title(sections, catalog);
    pdf.document_info(info_id)
        .title(TextStr(&title))
        .producer(TextStr(concat!("appreport ", env!("CARGO_PKG_VERSION"))));

    let bytes = pdf.finish();
    log::info!(
        "Render phases: fonts={:.1}ms, images={:.1}ms, layout={:.1}ms, assembly={:.1}ms; {} pages, {} bytes",
        t_fonts.as_secs_f64() * 1000.0,
        (t_images - t_fonts).as_secs_f64() * 1000.0,
        (t_layout - t_images).as_secs_f64() * 1000.0,
        (t0.elapsed() - t_layout).as_secs_f64() * 1000.0,
        total_pages,
        bytes.len(),
    );

    Ok(PdfDocument {
        bytes,
        page_count: total_pages,
        placed_charts,
        skipped_elements: skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_resets_to_top_margin_on_break() {
        let g = PageGeometry::A4;
        let mut c = PageCursor::new(&g);
        assert!(c.at_top());
        assert_eq!(c.capacity(), g.content_height());
        c.advance(100.0);
        assert!(!c.at_top());
        assert!((c.remaining() - (g.content_height() - 100.0)).abs() < 0.01);
        c.page_break();
        assert!(c.at_top());
        assert_eq!(c.page_count(), 2);
        assert_eq!(c.y(), g.height - g.margin_top);
    }

    #[test]
    fn overrun_remembers_the_deepest_point() {
        let g = PageGeometry::A4;
        let mut c = PageCursor::new(&g);
        c.advance(c.capacity());
        assert!(c.overrun() < 0.01);
        c.advance(30.0);
        c.page_break();
        assert!((c.overrun() - 30.0).abs() < 0.01);
    }
}
