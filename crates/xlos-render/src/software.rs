//! CPU rasterizer.
//!
//! [`SoftwareRenderer`] draws into a premultiplied RGBA buffer held in memory.
//! Shapes are evaluated per pixel from signed distance functions, which gives
//! anti-aliased edges without any GPU. Text goes through cosmic-text's swash
//! rasterizer; the font database is only loaded the first time text is drawn.

use std::path::Path;

use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping, SwashCache};
use glam::Vec2;
use image::{ImageFormat, Rgba, RgbaImage};
use xlos_core::logging::targets;

use crate::error::{RenderError, RenderResult};
use crate::paint::{BoxShadow, Stroke};
use crate::renderer::{FrameStats, RenderStateStack, Renderer};
use crate::text::TextStyle;
use crate::types::{Color, CornerRadii, Point, Rect, RoundedRect, Size};

/// A renderer that rasterizes into an in-memory pixel buffer.
pub struct SoftwareRenderer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    state: RenderStateStack,
    stats: FrameStats,
    text: Option<TextRasterizer>,
}

impl std::fmt::Debug for SoftwareRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftwareRenderer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stats", &self.stats)
            .field("fonts_loaded", &self.text.is_some())
            .finish()
    }
}

impl SoftwareRenderer {
    /// Create a renderer with a transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![Color::TRANSPARENT; width as usize * height as usize],
            state: RenderStateStack::new(),
            stats: FrameStats::default(),
            text: None,
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read back one pixel as non-premultiplied RGBA.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize].to_rgba8())
    }

    /// Copy the surface into an [`RgbaImage`].
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(self.pixels[(y * self.width + x) as usize].to_rgba8())
        })
    }

    /// Encode the surface as PNG and write it to `path`.
    pub fn save_png(&self, path: &Path) -> RenderResult<()> {
        let file = std::fs::File::create(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = std::io::BufWriter::new(file);
        self.to_image().write_to(&mut writer, ImageFormat::Png)?;
        tracing::debug!(target: targets::RENDER, path = %path.display(), "frame written");
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        tracing::debug!(target: targets::RENDER, width, height, "surface resized");
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::TRANSPARENT; width as usize * height as usize];
    }

    /// The pixel region a draw call may touch: surface ∩ clip ∩ `bounds`.
    fn pixel_bounds(&self, bounds: Rect) -> Option<(u32, u32, u32, u32)> {
        let surface = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
        let mut area = surface.intersect(&bounds)?;
        if let Some(clip) = self.state.clip_bounds() {
            area = area.intersect(&clip)?;
        }
        let x0 = area.left().floor().max(0.0) as u32;
        let y0 = area.top().floor().max(0.0) as u32;
        let x1 = (area.right().ceil() as u32).min(self.width);
        let y1 = (area.bottom().ceil() as u32).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Blend `color` into every pixel of `bounds`, weighted by `coverage`
    /// evaluated at the pixel center.
    fn paint(&mut self, bounds: Rect, color: Color, coverage: impl Fn(Vec2) -> f32) {
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(bounds) else {
            self.stats.culled += 1;
            return;
        };
        let clip = self.state.clip_bounds();
        self.stats.draw_calls += 1;
        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if let Some(clip) = clip
                    && !clip.contains(Point::from_vec2(center))
                {
                    continue;
                }
                let cov = coverage(center).clamp(0.0, 1.0);
                if cov <= 0.0 {
                    continue;
                }
                let index = (y * self.width + x) as usize;
                self.pixels[index] = color.scaled(cov).over(self.pixels[index]);
            }
        }
    }
}

impl Renderer for SoftwareRenderer {
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size) {
        self.resize(
            viewport_size.width.round() as u32,
            viewport_size.height.round() as u32,
        );
        self.state.reset();
        self.stats = FrameStats::default();
        self.pixels.fill(clear_color);
    }

    fn end_frame(&mut self) -> FrameStats {
        self.stats.clone()
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip_rect(rect);
    }

    fn clip_bounds(&self) -> Option<Rect> {
        self.state.clip_bounds()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.paint(rect, color, |p| {
            if rect.contains(Point::from_vec2(p)) {
                1.0
            } else {
                0.0
            }
        });
    }

    fn fill_rounded_rect(&mut self, rect: RoundedRect, color: Color) {
        if rect.is_rect() {
            self.fill_rect(rect.rect, color);
            return;
        }
        self.paint(rect.rect, color, |p| {
            0.5 - sd_rounded_rect(p, rect.rect, &rect.radii)
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        let hw = stroke.half_width();
        let outer = rect.inflate(hw);
        let inner = rect.deflate(hw);
        self.paint(outer, stroke.color, |p| {
            let p = Point::from_vec2(p);
            if outer.contains(p) && !inner.contains(p) {
                1.0
            } else {
                0.0
            }
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, stroke: &Stroke) {
        let hw = stroke.half_width().max(0.5);
        let bounds = Rect::from_corners(
            Point::new(from.x.min(to.x), from.y.min(to.y)),
            Point::new(from.x.max(to.x), from.y.max(to.y)),
        )
        .inflate(hw + 1.0);
        let (a, b) = (from.to_vec2(), to.to_vec2());
        self.paint(bounds, stroke.color, |p| 0.5 - (sd_segment(p, a, b) - hw));
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        let mut bounds = Rect::new(points[0].x, points[0].y, 0.0, 0.0);
        for point in &points[1..] {
            bounds = bounds.union(&Rect::new(point.x, point.y, 0.0, 0.0));
        }
        self.paint(bounds, color, |p| {
            if point_in_polygon(p, points) {
                1.0
            } else {
                0.0
            }
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        let bounds = Rect::from_center(center, Size::new(radius * 2.0, radius * 2.0)).inflate(1.0);
        let c = center.to_vec2();
        self.paint(bounds, color, |p| 0.5 - (p.distance(c) - radius));
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke) {
        let hw = stroke.half_width().max(0.5);
        let extent = (radius + hw) * 2.0;
        let bounds = Rect::from_center(center, Size::new(extent, extent)).inflate(1.0);
        let c = center.to_vec2();
        self.paint(bounds, stroke.color, |p| {
            0.5 - ((p.distance(c) - radius).abs() - hw)
        });
    }

    fn draw_box_shadow(&mut self, rect: Rect, shadow: &BoxShadow) {
        let shape = shadow.shape_rect(rect);
        let radii = CornerRadii::uniform(shadow.corner_radius);
        let blur = shadow.blur_radius.max(1.0);
        self.paint(shadow.expanded_bounds(rect), shadow.color, |p| {
            0.5 - sd_rounded_rect(p, shape, &radii) / blur
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        if text.is_empty() || style.color.a <= 0.0 {
            return;
        }
        let spans = self
            .text
            .get_or_insert_with(TextRasterizer::new)
            .rasterize(text, style);
        if spans.is_empty() {
            return;
        }
        self.stats.draw_calls += 1;

        let clip = self.state.clip_bounds();
        let origin = (position.x.round() as i32, position.y.round() as i32);
        for span in spans {
            for dy in 0..span.height as i32 {
                for dx in 0..span.width as i32 {
                    let x = origin.0 + span.x + dx;
                    let y = origin.1 + span.y + dy;
                    if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
                        continue;
                    }
                    if let Some(clip) = clip
                        && !clip.contains(Point::new(x as f32 + 0.5, y as f32 + 0.5))
                    {
                        continue;
                    }
                    let index = (y as u32 * self.width + x as u32) as usize;
                    self.pixels[index] = style.color.scaled(span.coverage).over(self.pixels[index]);
                }
            }
        }
    }
}

/// Lazily created font state.
struct TextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

/// A run of pixels with uniform glyph coverage, relative to the text origin.
struct GlyphSpan {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    coverage: f32,
}

impl TextRasterizer {
    fn new() -> Self {
        tracing::debug!(target: targets::RENDER, "loading font database");
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        }
    }

    fn rasterize(&mut self, text: &str, style: &TextStyle) -> Vec<GlyphSpan> {
        let metrics = Metrics::new(style.size, style.line_height());
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        let attrs = Attrs::new().family(style.family.to_cosmic());
        buffer.set_text(&mut self.font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        let mut spans = Vec::new();
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            cosmic_text::Color::rgb(0xFF, 0xFF, 0xFF),
            |x, y, width, height, color| {
                if color.a() > 0 {
                    spans.push(GlyphSpan {
                        x,
                        y,
                        width,
                        height,
                        coverage: color.a() as f32 / 255.0,
                    });
                }
            },
        );
        spans
    }
}

/// Signed distance from `p` to a rectangle with per-corner radii.
fn sd_rounded_rect(p: Vec2, rect: Rect, radii: &CornerRadii) -> f32 {
    let center = rect.center().to_vec2();
    let half = Vec2::new(rect.width(), rect.height()) * 0.5;
    let local = p - center;
    let radius = match (local.x >= 0.0, local.y >= 0.0) {
        (false, false) => radii.top_left,
        (true, false) => radii.top_right,
        (true, true) => radii.bottom_right,
        (false, true) => radii.bottom_left,
    }
    .min(half.x)
    .min(half.y);
    let q = local.abs() - half + Vec2::splat(radius);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - radius
}

/// Distance from `p` to the segment `a`-`b`.
fn sd_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Even-odd point-in-polygon test.
fn point_in_polygon(p: Vec2, points: &[Point]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}
