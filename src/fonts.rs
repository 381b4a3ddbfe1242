use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use memmap2::Mmap;
use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::locale::FontProfile;

/// Env var listing extra font directories, `:`-separated (`;` on Windows).
pub const FONT_DIRS_ENV: &str = "APPREPORT_FONTS";

pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    widths_1000: Vec<f32>,
    line_h_ratio: Option<f32>,
    ascender_ratio: Option<f32>,
    char_to_gid: Option<HashMap<char, u16>>,
    char_widths_1000: Option<HashMap<char, f32>>,
}

impl FontEntry {
    /// Width of a single character in 1000-units. Embedded fonts know every
    /// character of the document; the built-in face falls back to WinAnsi.
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        if let Some(map) = &self.char_widths_1000
            && let Some(&w) = map.get(&ch)
        {
            return w;
        }
        let byte = char_to_winansi(ch);
        if byte >= 32 {
            self.widths_1000[(byte - 32) as usize]
        } else {
            0.0
        }
    }

    pub(crate) fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(&self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }

    /// Baseline-to-baseline distance for a given size.
    pub(crate) fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_h_ratio.unwrap_or(1.2).max(1.15)
    }

    pub(crate) fn ascent(&self, font_size: f32) -> f32 {
        font_size * self.ascender_ratio.unwrap_or(0.75)
    }

    pub(crate) fn is_embedded(&self) -> bool {
        self.char_to_gid.is_some()
    }

    /// Bytes for a `Tj` operand in this font's encoding.
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.char_to_gid {
            Some(map) => encode_as_gids(text, map),
            None => to_winansi_bytes(text),
        }
    }
}

/// Regular and bold faces for one render.
pub(crate) struct FontPair {
    pub(crate) regular: FontEntry,
    pub(crate) bold: FontEntry,
}

impl FontPair {
    pub(crate) fn get(&self, bold: bool) -> &FontEntry {
        if bold { &self.bold } else { &self.regular }
    }

    pub(crate) fn entries(&self) -> [&FontEntry; 2] {
        [&self.regular, &self.bold]
    }
}

/// (lowercase family name, bold) -> (file path, face index within TTC)
type FontLookup = HashMap<(String, bool), (PathBuf, u32)>;

static FONT_INDEX: OnceLock<FontLookup> = OnceLock::new();

/// All Unicode family names (ID 1) a face carries, localized ones included,
/// so "Hiragino Sans" and its Japanese name both resolve.
fn font_family_names(face: &Face) -> Vec<String> {
    let mut names: Vec<String> = face
        .names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY && name.is_unicode())
        .filter_map(|name| name.to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

fn font_directories() -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();

    if let Ok(val) = std::env::var(FONT_DIRS_ENV) {
        let sep = if cfg!(windows) { ';' } else { ':' };
        dirs.extend(
            val.split(sep)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        );
    }

    #[cfg(target_os = "macos")]
    {
        dirs.extend([
            "/Library/Fonts".into(),
            "/System/Library/Fonts".into(),
            "/System/Library/Fonts/Supplemental".into(),
            "/System/Library/AssetsV2".into(),
        ]);
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(home).join("Library/Fonts"));
        }
    }

    #[cfg(target_os = "linux")]
    {
        dirs.extend([
            "/usr/share/fonts".into(),
            "/usr/local/share/fonts".into(),
            "/usr/share/fonts/opentype/noto".into(),
        ]);
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(&home).join(".local/share/fonts"));
            dirs.push(PathBuf::from(home).join(".fonts"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(windir) = std::env::var("WINDIR") {
            dirs.push(PathBuf::from(windir).join("Fonts"));
        } else {
            dirs.push("C:\\Windows\\Fonts".into());
        }
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            dirs.push(PathBuf::from(local).join("Microsoft\\Windows\\Fonts"));
        }
    }

    dirs
}

fn is_font_file(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref(),
        Some("ttf" | "otf" | "ttc" | "otc")
    )
}

fn is_font_collection(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ttc") || e.eq_ignore_ascii_case("otc"))
}

fn scan_font_dirs() -> FontLookup {
    let t0 = std::time::Instant::now();
    let mut index = FontLookup::new();
    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut files_scanned = 0u32;

    let mut stack = font_directories();
    while let Some(dir) = stack.pop() {
        if !visited.insert(dir.clone()) {
            continue;
        }
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }
            if !is_font_file(&path) {
                continue;
            }
            files_scanned += 1;
            let Ok(file) = std::fs::File::open(&path) else {
                continue;
            };
            // SAFETY: font files are opened read-only and only parsed while mapped.
            let Ok(data) = (unsafe { Mmap::map(&file) }) else {
                continue;
            };
            let face_count = if is_font_collection(&path) {
                ttf_parser::fonts_in_collection(&data).unwrap_or(1)
            } else {
                1
            };
            for face_idx in 0..face_count {
                let Ok(face) = Face::parse(&data, face_idx) else {
                    continue;
                };
                let bold = face.is_bold();
                for family in font_family_names(&face) {
                    index
                        .entry((family.to_lowercase(), bold))
                        .or_insert((path.clone(), face_idx));
                }
            }
        }
    }

    log::info!(
        "Font scan: {:.1}ms, {} dirs, {} files parsed → {} entries",
        t0.elapsed().as_secs_f64() * 1000.0,
        visited.len(),
        files_scanned,
        index.len(),
    );
    index
}

fn get_font_index() -> &'static FontLookup {
    FONT_INDEX.get_or_init(scan_font_dirs)
}

/// Falls back to the regular face when no bold one is installed.
fn find_font_file(family: &str, bold: bool) -> Option<(PathBuf, u32)> {
    let index = get_font_index();
    let key = family.to_lowercase();
    index
        .get(&(key.clone(), bold))
        .or_else(|| if bold { index.get(&(key, false)) } else { None })
        .cloned()
}

/// Windows-1252 byte to Unicode; 0x80-0x9F are remapped, the rest are identity.
fn winansi_to_char(byte: u8) -> char {
    match byte {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => byte as char,
    }
}

/// Unicode char to its WinAnsi byte, 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007F | 0x00A0..=0x00FF => c as u8,
        _ => (0x80u8..=0x9F)
            .find(|&b| winansi_to_char(b) == c && !matches!(b, 0x81 | 0x8D | 0x8F | 0x90 | 0x9D))
            .unwrap_or(0),
    }
}

/// WinAnsi bytes for a `Str` operand; unmappable characters are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match char_to_winansi(c) {
            0 => None,
            b => Some(b),
        })
        .collect()
}

/// Big-endian 2-byte glyph IDs for Identity-H content streams.
pub(crate) fn encode_as_gids(text: &str, char_to_gid: &HashMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.extend_from_slice(&gid.to_be_bytes());
    }
    out
}

/// Helvetica advance widths at 1000 units/em for WinAnsi 32..=255, from the
/// standard AFM metrics for ASCII and an average for the upper half.
fn helvetica_widths(bold: bool) -> Vec<f32> {
    const REGULAR: [u16; 95] = [
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667,
        667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
        667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500,
        556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333, 500, 278,
        556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
    ];
    const BOLD: [u16; 95] = [
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, 556,
        556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, 975, 722,
        722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722,
        667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, 333, 556, 611, 556,
        611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389, 556, 333,
        611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
    ];
    let ascii = if bold { &BOLD } else { &REGULAR };
    (32u16..=255)
        .map(|code| match code {
            32..=126 => f32::from(ascii[(code - 32) as usize]),
            0x95 => 350.0,
            0x96 => 556.0,
            0x97 => 1000.0,
            0xB7 => 278.0,
            _ if bold => 611.0,
            _ => 556.0,
        })
        .collect()
}

struct EmbeddedMetrics {
    widths_1000: Vec<f32>,
    line_h_ratio: f32,
    ascender_ratio: f32,
    char_to_gid: HashMap<char, u16>,
    char_widths_1000: HashMap<char, f32>,
}

/// Embed a TrueType/OpenType face as a CIDFont (Type0, Identity-H), subset
/// to the characters the document uses.
#[allow(clippy::too_many_arguments)]
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    descriptor_ref: Ref,
    data_ref: Ref,
    font_name: &str,
    font_data: &[u8],
    face_index: u32,
    used_chars: &HashSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Option<EmbeddedMetrics> {
    let face = Face::parse(font_data, face_index).ok()?;

    let units = face.units_per_em() as f32;
    let scale = |v: f32| v / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| scale(h as f32))
        .unwrap_or(700.0);
    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        scale(bb.x_min as f32),
        scale(bb.y_min as f32),
        scale(bb.x_max as f32),
        scale(bb.y_max as f32),
    );

    let widths_1000: Vec<f32> = (32u8..=255u8)
        .map(|byte| {
            face.glyph_index(winansi_to_char(byte))
                .and_then(|gid| face.glyph_hor_advance(gid))
                .map(|adv| scale(adv as f32))
                .unwrap_or(0.0)
        })
        .collect();

    let mut chars: Vec<char> = used_chars.iter().copied().collect();
    chars.sort_unstable();
    let mut remapper = subsetter::GlyphRemapper::new();
    let mut char_to_gid = HashMap::new();
    let mut char_widths_1000 = HashMap::new();
    let mut gid_widths: Vec<(u16, f32)> = Vec::new();
    for ch in chars {
        let Some(gid) = face.glyph_index(ch) else {
            continue;
        };
        let new_gid = remapper.remap(gid.0);
        let w = face
            .glyph_hor_advance(gid)
            .map(|adv| scale(adv as f32))
            .unwrap_or(0.0);
        char_to_gid.insert(ch, new_gid);
        char_widths_1000.insert(ch, w);
        gid_widths.push((new_gid, w));
    }
    gid_widths.sort_by_key(|&(gid, _)| gid);
    gid_widths.dedup_by_key(|&mut (gid, _)| gid);

    let subset_data = subsetter::subset(font_data, face_index, &remapper).unwrap_or_else(|e| {
        log::warn!("Font subsetting failed for {font_name}: {e}, embedding full font");
        font_data.to_vec()
    });

    let data_len = i32::try_from(subset_data.len()).ok()?;
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&subset_data, 6);
    pdf.stream(data_ref, &compressed)
        .filter(pdf_writer::Filter::FlateDecode)
        .pair(Name(b"Length1"), data_len);

    let ps_name: String = font_name.chars().filter(|c| !c.is_whitespace()).collect();

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(bbox)
        .italic_angle(0.0)
        .ascent(scale(face.ascender() as f32))
        .descent(scale(face.descender() as f32))
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    let identity = || pdf_writer::types::SystemInfo {
        registry: pdf_writer::Str(b"Adobe"),
        ordering: pdf_writer::Str(b"Identity"),
        supplement: 0,
    };

    let cid_font_ref = alloc();
    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(pdf_writer::types::CidFontType::Type2);
        cid.base_font(Name(ps_name.as_bytes()));
        cid.system_info(identity());
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        if !gid_widths.is_empty() {
            let mut w = cid.widths();
            for &(gid, width) in &gid_widths {
                w.consecutive(gid, [width]);
            }
        }
    }

    let tounicode_ref = alloc();
    let cmap_name = format!("{ps_name}-UTF16");
    let mut cmap = pdf_writer::types::UnicodeCmap::new(Name(cmap_name.as_bytes()), identity());
    for (&ch, &new_gid) in &char_to_gid {
        cmap.pair(new_gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    let line_gap = face.line_gap() as f32;
    Some(EmbeddedMetrics {
        widths_1000,
        line_h_ratio: (face.ascender() as f32 - face.descender() as f32 + line_gap) / units,
        ascender_ratio: face.ascender() as f32 / units,
        char_to_gid,
        char_widths_1000,
    })
}

/// Register one face for the profile: the first installed family candidate
/// is subset and embedded; Latin, or no candidate found, uses the built-in
/// Helvetica.
pub(crate) fn register_font(
    pdf: &mut Pdf,
    profile: FontProfile,
    bold: bool,
    pdf_name: String,
    alloc: &mut impl FnMut() -> Ref,
    used_chars: &HashSet<char>,
) -> FontEntry {
    let t0 = std::time::Instant::now();
    let font_ref = alloc();

    let embedded = profile.families().and_then(|families| {
        let descriptor_ref = alloc();
        let data_ref = alloc();
        let found = families.split(';').map(str::trim).find_map(|candidate| {
            let (path, face_index) = find_font_file(candidate, bold)?;
            let data = std::fs::read(&path).ok()?;
            log::debug!("{profile:?} bold={bold}: using {candidate} from {}", path.display());
            embed_truetype(
                pdf,
                font_ref,
                descriptor_ref,
                data_ref,
                candidate,
                &data,
                face_index,
                used_chars,
                alloc,
            )
        });
        if found.is_none() {
            log::warn!("No font installed for {profile:?} ({families}), using Helvetica");
        }
        found
    });

    let entry = match embedded {
        Some(m) => FontEntry {
            pdf_name,
            font_ref,
            widths_1000: m.widths_1000,
            line_h_ratio: Some(m.line_h_ratio),
            ascender_ratio: Some(m.ascender_ratio),
            char_to_gid: Some(m.char_to_gid),
            char_widths_1000: Some(m.char_widths_1000),
        },
        None => {
            let base: &[u8] = if bold { b"Helvetica-Bold" } else { b"Helvetica" };
            pdf.type1_font(font_ref)
                .base_font(Name(base))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            FontEntry {
                pdf_name,
                font_ref,
                widths_1000: helvetica_widths(bold),
                line_h_ratio: None,
                ascender_ratio: None,
                char_to_gid: None,
                char_widths_1000: None,
            }
        }
    };

    log::debug!(
        "register_font: {profile:?} bold={bold} → {:.1}ms",
        t0.elapsed().as_secs_f64() * 1000.0,
    );
    entry
}

/// Regular (`F1`) and bold (`F2`) faces for the catalog's font profile.
pub(crate) fn register_fonts(
    pdf: &mut Pdf,
    profile: FontProfile,
    alloc: &mut impl FnMut() -> Ref,
    used_chars: &HashSet<char>,
) -> FontPair {
    FontPair {
        regular: register_font(pdf, profile, false, "F1".into(), alloc, used_chars),
        bold: register_font(pdf, profile, true, "F2".into(), alloc, used_chars),
    }
}

/// Built-in Helvetica pair without a document, for layout tests.
#[cfg(test)]
pub(crate) fn helvetica_pair() -> FontPair {
    let entry = |bold: bool, name: &str, id: i32| FontEntry {
        pdf_name: name.into(),
        font_ref: Ref::new(id),
        widths_1000: helvetica_widths(bold),
        line_h_ratio: None,
        ascender_ratio: None,
        char_to_gid: None,
        char_widths_1000: None,
    };
    FontPair {
        regular: entry(false, "F1", 1),
        bold: entry(true, "F2", 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winansi_round_trips_special_range() {
        assert_eq!(char_to_winansi('\u{2022}'), 0x95);
        assert_eq!(char_to_winansi('€'), 0x80);
        assert_eq!(char_to_winansi('é'), 0xE9);
        assert_eq!(char_to_winansi('日'), 0);
        assert_eq!(to_winansi_bytes("a•日b"), vec![b'a', 0x95, b'b']);
    }

    #[test]
    fn gids_are_big_endian_pairs() {
        let map = HashMap::from([('A', 0x0102u16)]);
        assert_eq!(encode_as_gids("AZ", &map), vec![0x01, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn builtin_latin_profile_uses_helvetica() {
        let mut pdf = Pdf::new();
        let mut next = 1;
        let mut alloc = || {
            next += 1;
            Ref::new(next)
        };
        let fonts = register_fonts(&mut pdf, FontProfile::Latin, &mut alloc, &HashSet::new());
        assert!(!fonts.regular.is_embedded());
        assert_eq!(fonts.regular.pdf_name, "F1");
        assert_eq!(fonts.bold.pdf_name, "F2");
        // Bold digits share regular widths, bold lowercase is wider.
        assert_eq!(fonts.regular.text_width("0", 10.0), fonts.bold.text_width("0", 10.0));
        assert!(fonts.bold.text_width("abc", 10.0) > fonts.regular.text_width("abc", 10.0));
        assert_eq!(fonts.regular.encode("Hi"), b"Hi".to_vec());
    }
}
