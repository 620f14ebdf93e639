use tracing::{debug, warn};

use crate::{
    error::{SymrowError, SymrowResult},
    surface::Surface,
};

/// Candidate font files tried in order; the first readable one wins.
const FONT_CANDIDATES: [&str; 8] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl TextBrushRgba8 {
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: 255,
        }
    }
}

struct ResolvedFont {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Text shaping and drawing, with the font resolved once at construction.
///
/// A machine with none of the candidate fonts degrades to rendering without
/// text rather than failing; the condition is logged once.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    resolved: Option<ResolvedFont>,
}

impl TextEngine {
    pub fn new() -> Self {
        let mut font_ctx = parley::FontContext::default();
        let resolved = resolve_font(&mut font_ctx);
        if resolved.is_none() {
            warn!("no usable font found among candidates; text will not be drawn");
        }
        Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            resolved,
        }
    }

    pub fn has_font(&self) -> bool {
        self.resolved.is_some()
    }

    /// Draw `text` so its measured bounding box is centered on
    /// `(center_x, center_y)`.
    pub fn draw_centered(
        &mut self,
        surface: &mut Surface,
        text: &str,
        size_px: f32,
        center_x: f64,
        center_y: f64,
        rgb: [u8; 3],
    ) -> SymrowResult<()> {
        let Some(layout) = self.layout_plain(text, size_px, TextBrushRgba8::from_rgb(rgb))? else {
            return Ok(());
        };
        let (w, h) = measure(&layout);
        let origin_x = center_x - w / 2.0;
        let origin_y = center_y - h / 2.0;
        self.draw_layout(surface, &layout, origin_x, origin_y);
        Ok(())
    }

    /// Draw `text` horizontally centered on `center_x` with its top edge at
    /// `top_y`.
    pub fn draw_top_centered(
        &mut self,
        surface: &mut Surface,
        text: &str,
        size_px: f32,
        center_x: f64,
        top_y: f64,
        rgb: [u8; 3],
    ) -> SymrowResult<()> {
        let Some(layout) = self.layout_plain(text, size_px, TextBrushRgba8::from_rgb(rgb))? else {
            return Ok(());
        };
        let (w, _) = measure(&layout);
        self.draw_layout(surface, &layout, center_x - w / 2.0, top_y);
        Ok(())
    }

    fn layout_plain(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> SymrowResult<Option<parley::Layout<TextBrushRgba8>>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SymrowError::validation("text size_px must be finite and > 0"));
        }
        let Some(resolved) = self.resolved.as_ref() else {
            return Ok(None);
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(resolved.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(Some(layout))
    }

    fn draw_layout(
        &mut self,
        surface: &mut Surface,
        layout: &parley::Layout<TextBrushRgba8>,
        origin_x: f64,
        origin_y: f64,
    ) {
        let Some(resolved) = self.resolved.as_ref() else {
            return;
        };

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                let font_size = run.run().font_size();
                // positioned_glyphs applies the run offset and baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x + origin_x as f32,
                    y: g.y + origin_y as f32,
                });
                surface.fill_glyphs(&resolved.font, font_size, [brush.r, brush.g, brush.b], glyphs);
            }
        }
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Measured extent of a laid-out run: widest line advance by summed line
/// heights. Metrics come from the resolved font, so centering stays correct
/// across fonts.
fn measure(layout: &parley::Layout<TextBrushRgba8>) -> (f64, f64) {
    let mut w = 0.0f64;
    let mut h = 0.0f64;
    for line in layout.lines() {
        let m = line.metrics();
        w = w.max(f64::from(m.advance));
        h += f64::from(m.ascent + m.descent + m.leading);
    }
    (w, h)
}

fn resolve_font(font_ctx: &mut parley::FontContext) -> Option<ResolvedFont> {
    for candidate in FONT_CANDIDATES {
        let Ok(bytes) = std::fs::read(candidate) else {
            continue;
        };

        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let Some(family_id) = families.first().map(|(id, _)| *id) else {
            continue;
        };
        let Some(family) = font_ctx
            .collection
            .family_name(family_id)
            .map(|name| name.to_string())
        else {
            continue;
        };

        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        debug!(candidate, family = %family, "resolved text font");
        return Some(ResolvedFont { family, font });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::FrameRgba;

    /// Min and max row indices containing any non-white pixel.
    fn inked_rows(frame: &FrameRgba) -> Option<(u32, u32)> {
        let mut min = None;
        let mut max = None;
        for (i, px) in frame.data.chunks_exact(4).enumerate() {
            if px != [255, 255, 255, 255] {
                let row = i as u32 / frame.width;
                min.get_or_insert(row);
                max = Some(row);
            }
        }
        Some((min?, max?))
    }

    #[test]
    fn rejects_non_positive_font_size() {
        let mut engine = TextEngine::new();
        let brush = TextBrushRgba8::from_rgb([0, 0, 0]);
        assert!(engine.layout_plain("A", 0.0, brush).is_err());
        assert!(engine.layout_plain("A", f32::NAN, brush).is_err());
    }

    #[test]
    fn centered_text_ink_brackets_the_midline() {
        let mut engine = TextEngine::new();
        if !engine.has_font() {
            return;
        }
        let mut surface = Surface::new(100, 100).unwrap();
        engine
            .draw_centered(&mut surface, "A", 40.0, 50.0, 50.0, [0, 0, 0])
            .unwrap();
        let frame = surface.into_frame().unwrap();
        let (top, bottom) = inked_rows(&frame).expect("glyph left no ink");
        assert!(top < 50, "ink starts at row {top}, below the midline");
        assert!(bottom > 50, "ink ends at row {bottom}, above the midline");
    }

    #[test]
    fn top_anchored_text_ink_stays_below_the_anchor() {
        let mut engine = TextEngine::new();
        if !engine.has_font() {
            return;
        }
        let mut surface = Surface::new(100, 100).unwrap();
        engine
            .draw_top_centered(&mut surface, "0", 30.0, 50.0, 40.0, [0, 0, 0])
            .unwrap();
        let frame = surface.into_frame().unwrap();
        let (top, bottom) = inked_rows(&frame).expect("glyph left no ink");
        assert!(top >= 40, "ink starts at row {top}, above the anchor");
        assert!(bottom < 80, "ink extends to row {bottom}, far past one line");
    }

    #[test]
    fn drawn_text_uses_the_requested_brush_color() {
        let mut engine = TextEngine::new();
        if !engine.has_font() {
            return;
        }
        let mut surface = Surface::new(100, 100).unwrap();
        engine
            .draw_centered(&mut surface, "B", 40.0, 50.0, 50.0, [255, 0, 0])
            .unwrap();
        let frame = surface.into_frame().unwrap();
        let reddish = frame
            .data
            .chunks_exact(4)
            .any(|px| px[0] > px[1].saturating_add(50));
        assert!(reddish, "no red ink found");
    }

    #[test]
    fn drawing_without_any_font_is_a_no_op() {
        let mut engine = TextEngine::new();
        engine.resolved = None;
        let mut surface = Surface::new(8, 8).unwrap();
        engine
            .draw_centered(&mut surface, "A", 10.0, 4.0, 4.0, [0, 0, 0])
            .unwrap();
        let frame = surface.into_frame().unwrap();
        assert!(frame.data.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn measure_of_nonempty_text_is_positive_when_a_font_exists() {
        let mut engine = TextEngine::new();
        if !engine.has_font() {
            return; // nothing to measure on a fontless machine
        }
        let layout = engine
            .layout_plain("3", 20.0, TextBrushRgba8::default())
            .unwrap()
            .unwrap();
        let (w, h) = measure(&layout);
        assert!(w > 0.0);
        assert!(h > 0.0);
    }
}
