use std::collections::BTreeMap;

use pdf_writer::{Content, Filter, Name, Pdf, Ref};

use crate::charts::{ChartImage, ChartKind, ChartSet};
use crate::error::Error;

/// An embedded chart image and its pixel size.
pub(super) struct ChartXObject {
    pub(super) name: String,
    pub(super) xobj: Ref,
    pub(super) width: u32,
    pub(super) height: u32,
}

/// Decoded PNG split into an RGB stream and an optional alpha mask.
struct DecodedImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

fn decode_png(image: &ChartImage) -> Result<DecodedImage, Error> {
    let cursor = std::io::Cursor::new(&image.bytes);
    let reader =
        image::ImageReader::with_format(std::io::BufReader::new(cursor), image::ImageFormat::Png);
    let decoded = reader.decode().map_err(|e| Error::ImageDecode {
        kind: image.kind,
        detail: e.to_string(),
    })?;
    let rgba: image::RgbaImage = decoded.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    if width == 0 || height == 0 {
        return Err(Error::ImageDecode {
            kind: image.kind,
            detail: "zero-sized image".into(),
        });
    }
    let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);
    let rgb = rgba
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());
    Ok(DecodedImage {
        width,
        height,
        rgb,
        alpha,
    })
}

fn write_image(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref, img: &DecodedImage) -> Ref {
    let xobj_ref = alloc();
    let smask_ref = img.alpha.as_ref().map(|alpha| {
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
        let mask_ref = alloc();
        let mut mask = pdf.image_xobject(mask_ref, &compressed);
        mask.filter(Filter::FlateDecode);
        mask.width(img.width as i32);
        mask.height(img.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask_ref
    });

    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&img.rgb, 6);
    let mut xobj = pdf.image_xobject(xobj_ref, &compressed);
    xobj.filter(Filter::FlateDecode);
    xobj.width(img.width as i32);
    xobj.height(img.height as i32);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    if let Some(mask_ref) = smask_ref {
        xobj.s_mask(mask_ref);
    }
    xobj_ref
}

/// Embed every chart of the set. Images that fail to decode are logged and
/// left out; the count of those is returned alongside.
pub(super) fn embed_charts(
    pdf: &mut Pdf,
    alloc: &mut impl FnMut() -> Ref,
    charts: &ChartSet,
) -> (BTreeMap<ChartKind, ChartXObject>, usize) {
    let mut out = BTreeMap::new();
    let mut failures = 0;
    for image in charts.images() {
        match decode_png(image) {
            Ok(decoded) => {
                let xobj = write_image(pdf, alloc, &decoded);
                log::debug!(
                    "Embedded chart {} ({}x{}, alpha={})",
                    image.kind,
                    decoded.width,
                    decoded.height,
                    decoded.alpha.is_some()
                );
                out.insert(
                    image.kind,
                    ChartXObject {
                        name: format!("Im{}", out.len() + 1),
                        xobj,
                        width: decoded.width,
                        height: decoded.height,
                    },
                );
            }
            Err(e) => {
                log::warn!("{e}");
                failures += 1;
            }
        }
    }
    (out, failures)
}

/// Place an image inside a box, scaled to fit with its aspect ratio kept and
/// centered. `(x, y)` is the bottom-left corner of the box.
pub(super) fn draw_contained(content: &mut Content, img: &ChartXObject, x: f32, y: f32, w: f32, h: f32) {
    let scale = (w / img.width as f32).min(h / img.height as f32);
    let (dw, dh) = (img.width as f32 * scale, img.height as f32 * scale);
    content.save_state();
    content.transform([dw, 0.0, 0.0, dh, x + (w - dw) / 2.0, y + (h - dh) / 2.0]);
    content.x_object(Name(img.name.as_bytes()));
    content.restore_state();
}
