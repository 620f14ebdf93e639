use crate::error::{SymrowError, SymrowResult};

/// One rendered frame in row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// A white drawing surface backed by a `vello_cpu` render context.
///
/// Created fresh per frame; `into_frame` flushes the context and reads the
/// pixels back. All coordinates are in canvas pixels.
pub struct Surface {
    width: u32,
    height: u32,
    pixmap: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> SymrowResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| SymrowError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| SymrowError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(SymrowError::render("surface dimensions must be non-zero"));
        }

        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        for px in pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&[255, 255, 255, 255]);
        }

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        Ok(Self {
            width,
            height,
            pixmap,
            ctx,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn fill_path(&mut self, path: &kurbo::BezPath, rgb: [u8; 3]) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    pub fn fill_rect(&mut self, rect: kurbo::Rect, rgb: [u8; 3]) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255));
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
    }

    /// Draw positioned glyphs with the given font and color. Glyph
    /// coordinates are absolute canvas coordinates (baseline-relative y).
    pub fn fill_glyphs(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        font_size: f32,
        rgb: [u8; 3],
        glyphs: impl Iterator<Item = vello_cpu::Glyph>,
    ) {
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255));
        self.ctx
            .glyph_run(font)
            .font_size(font_size)
            .fill_glyphs(glyphs);
    }

    /// Flush pending draw ops and read the frame back.
    pub fn into_frame(mut self) -> SymrowResult<FrameRgba> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(FrameRgba {
            width: self.width,
            height: self.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Flatten a frame over an opaque background, producing straight RGBA8 with
/// alpha forced to 255. Used before piping frames to the encoder and before
/// writing PNGs.
pub fn flatten_to_opaque(frame: &FrameRgba, bg_rgb: [u8; 3]) -> SymrowResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(SymrowError::render(
            "frame byte length does not match width*height*4",
        ));
    }

    let bg_r = u16::from(bg_rgb[0]);
    let bg_g = u16::from(bg_rgb[1]);
    let bg_b = u16::from(bg_rgb[2]);

    let mut out = vec![0u8; expected];
    for (d, s) in out.chunks_exact_mut(4).zip(frame.data.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            d[3] = 255;
            continue;
        }

        let inv = 255u16 - a;
        let (r, g, b) = if frame.premultiplied {
            (
                u16::from(s[0]) + mul_div255(bg_r, inv),
                u16::from(s[1]) + mul_div255(bg_g, inv),
                u16::from(s[2]) + mul_div255(bg_b, inv),
            )
        } else {
            (
                mul_div255(u16::from(s[0]), a) + mul_div255(bg_r, inv),
                mul_div255(u16::from(s[1]), a) + mul_div255(bg_g, inv),
                mul_div255(u16::from(s[2]), a) + mul_div255(bg_b, inv),
            )
        };

        d[0] = r.min(255) as u8;
        d[1] = g.min(255) as u8;
        d[2] = b.min(255) as u8;
        d[3] = 255;
    }

    Ok(out)
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_surface_reads_back_as_opaque_white() {
        let frame = Surface::new(4, 3).unwrap().into_frame().unwrap();
        assert_eq!(frame.width, 4);
        assert_eq!(frame.height, 3);
        assert_eq!(frame.data.len(), 4 * 3 * 4);
        assert!(frame.data.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn fill_rect_colors_the_covered_pixels() {
        let mut s = Surface::new(4, 4).unwrap();
        s.fill_rect(kurbo::Rect::new(0.0, 0.0, 4.0, 4.0), [220, 50, 50]);
        let frame = s.into_frame().unwrap();
        let center = &frame.data[(2 * 4 + 2) * 4..(2 * 4 + 2) * 4 + 4];
        assert_eq!(center, [220, 50, 50, 255]);
    }

    #[test]
    fn surface_rejects_zero_dimensions() {
        assert!(Surface::new(0, 10).is_err());
        assert!(Surface::new(10, 0).is_err());
    }

    #[test]
    fn flatten_premul_over_white_produces_expected_rgb() {
        // Premultiplied black @ 50% alpha over white => mid gray.
        let frame = FrameRgba {
            width: 1,
            height: 1,
            data: vec![0, 0, 0, 128],
            premultiplied: true,
        };
        let out = flatten_to_opaque(&frame, [255, 255, 255]).unwrap();
        assert_eq!(out, vec![127, 127, 127, 255]);
    }

    #[test]
    fn flatten_rejects_mismatched_lengths() {
        let frame = FrameRgba {
            width: 2,
            height: 1,
            data: vec![0, 0, 0, 255],
            premultiplied: true,
        };
        assert!(flatten_to_opaque(&frame, [0, 0, 0]).is_err());
    }
}
