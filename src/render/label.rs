use std::sync::Arc;

use usvg::fontdb;

use crate::effects::composite::blend_in_place;
use crate::foundation::core::Canvas;
use crate::foundation::error::{StudioError, StudioResult};
use crate::params::config::LabelConfig;
use crate::render::glyphs;

/// Cut `text` to `max_chars` characters, marking the cut with `...`.
pub(crate) fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

pub(crate) fn font_px(canvas: Canvas, cfg: &LabelConfig) -> f64 {
    (cfg.font_px_at_1024 * canvas.min_side() / 1024.0).max(cfg.min_font_px)
}

/// Font database for label text: optional system fonts plus any configured directories.
pub(crate) fn load_fontdb(cfg: &LabelConfig) -> Arc<fontdb::Database> {
    let mut db = fontdb::Database::new();
    if cfg.system_fonts {
        db.load_system_fonts();
    }
    for dir in &cfg.font_dirs {
        db.load_fonts_dir(dir);
    }

    // Keep the generic `sans-serif` family resolvable when its default face is missing.
    let has_sans = db
        .query(&fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..fontdb::Query::default()
        })
        .is_some();
    if !has_sans {
        let fallback = db
            .faces()
            .filter_map(|f| f.families.first().map(|(name, _)| name.clone()))
            .min_by_key(|name| (!name.contains("Sans"), name.clone()));
        if let Some(name) = fallback {
            db.set_sans_serif_family(name);
        }
    }

    tracing::debug!(faces = db.len(), "label font database ready");
    Arc::new(db)
}

/// Draw the label panel and text onto `pixels` (premultiplied RGBA8 covering `canvas`).
///
/// A missing or unusable font is not an error: the built-in bitmap font is used instead.
pub(crate) fn draw_label(
    pixels: &mut [u8],
    canvas: Canvas,
    text: &str,
    cfg: &LabelConfig,
    fonts: &Arc<fontdb::Database>,
) -> StudioResult<()> {
    let text = truncate_label(text, cfg.max_chars);
    if text.trim().is_empty() {
        return Ok(());
    }
    let size = font_px(canvas, cfg);

    let overlay = match svg_label(canvas, &text, size, cfg, fonts) {
        Some(overlay) => overlay,
        None => {
            tracing::warn!("no usable font for label text, using built-in bitmap font");
            builtin_label(canvas, &text, size, cfg)?
        }
    };
    blend_in_place(pixels, &overlay, 1.0)
}

fn svg_label(
    canvas: Canvas,
    text: &str,
    size: f64,
    cfg: &LabelConfig,
    fonts: &Arc<fontdb::Database>,
) -> Option<Vec<u8>> {
    if fonts.is_empty() {
        return None;
    }
    let (w, h) = (canvas.width, canvas.height);
    let families = font_family_attr(cfg);
    let text_el = |x: f64, y: f64| {
        format!(
            r#"<text x="{x}" y="{y}" font-family="{families}" font-size="{size}" fill="rgb({},{},{})">{}</text>"#,
            cfg.text_rgb.r,
            cfg.text_rgb.g,
            cfg.text_rgb.b,
            escape_xml(text)
        )
    };

    // First pass: measure the shaped run. No glyph outlines means no font matched.
    let measure = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">{}</svg>"#,
        text_el(0.0, size)
    );
    let measure = parse_svg(&measure, fonts)?;
    if !measure.root().has_children() {
        return None;
    }
    let text_w = f64::from(measure.root().bounding_box().right()).max(0.0);

    let pad = cfg.padding_px;
    let panel_w = text_w + 2.0 * pad;
    let panel_h = size * 1.25 + 2.0 * pad;
    let panel_x = cfg.margin_px;
    let panel_y = f64::from(h) - cfg.margin_px - panel_h;
    let baseline = panel_y + pad + size;

    let doc = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><rect x="{panel_x}" y="{panel_y}" width="{panel_w}" height="{panel_h}" fill="rgb({},{},{})" fill-opacity="{}"/>{}</svg>"#,
        cfg.panel_rgb.r,
        cfg.panel_rgb.g,
        cfg.panel_rgb.b,
        f64::from(cfg.panel_alpha) / 255.0,
        text_el(panel_x + pad, baseline)
    );
    let tree = parse_svg(&doc, fonts)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    Some(pixmap.data().to_vec())
}

fn parse_svg(doc: &str, fonts: &Arc<fontdb::Database>) -> Option<usvg::Tree> {
    let opts = usvg::Options {
        fontdb: fonts.clone(),
        ..Default::default()
    };
    match usvg::Tree::from_str(doc, &opts) {
        Ok(tree) => Some(tree),
        Err(err) => {
            tracing::warn!(%err, "label svg did not parse");
            None
        }
    }
}

/// Panel and text drawn with the bitmap font, one filled square per lit font pixel.
pub(crate) fn builtin_label(
    canvas: Canvas,
    text: &str,
    size: f64,
    cfg: &LabelConfig,
) -> StudioResult<Vec<u8>> {
    use vello_cpu::kurbo::Rect;
    use vello_cpu::peniko::Color;

    let scale = (size / 8.0).round().max(1.0);
    let pad = cfg.padding_px.round();
    let text_w = f64::from(glyphs::text_width(text)) * scale;
    let text_h = f64::from(glyphs::GLYPH_H) * scale;

    let panel_x = cfg.margin_px.round();
    let panel_y = f64::from(canvas.height) - cfg.margin_px.round() - text_h - 2.0 * pad;
    let origin_x = panel_x + pad;
    let origin_y = panel_y + pad;

    let mut ctx = vello_cpu::RenderContext::new(canvas.width_u16(), canvas.height_u16());
    ctx.set_paint(Color::from_rgba8(
        cfg.panel_rgb.r,
        cfg.panel_rgb.g,
        cfg.panel_rgb.b,
        cfg.panel_alpha,
    ));
    ctx.fill_rect(&Rect::new(
        panel_x,
        panel_y,
        panel_x + text_w + 2.0 * pad,
        panel_y + text_h + 2.0 * pad,
    ));

    ctx.set_paint(Color::from_rgba8(
        cfg.text_rgb.r,
        cfg.text_rgb.g,
        cfg.text_rgb.b,
        255,
    ));
    for (i, c) in text.chars().enumerate() {
        let gx = origin_x + f64::from(i as u32 * glyphs::ADVANCE) * scale;
        for (col, row) in glyphs::lit_cells(c) {
            let x = gx + f64::from(col) * scale;
            let y = origin_y + f64::from(row) * scale;
            ctx.fill_rect(&Rect::new(x, y, x + scale, y + scale));
        }
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(canvas.width_u16(), canvas.height_u16());
    ctx.render_to_pixmap(&mut pixmap);
    let data = pixmap.data_as_u8_slice().to_vec();
    if data.len() != canvas.rgba_len() {
        return Err(StudioError::render("label pixmap size mismatch"));
    }
    Ok(data)
}

fn font_family_attr(cfg: &LabelConfig) -> String {
    let mut families: Vec<String> = cfg
        .families
        .iter()
        .map(|f| format!("'{}'", f.replace(['\'', '"'], "")))
        .collect();
    families.push("sans-serif".to_string());
    families.join(", ")
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/label.rs"]
mod tests;
