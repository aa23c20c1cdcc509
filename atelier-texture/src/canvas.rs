//! Minimal software rasterizer used by the synthesizer.
//!
//! Shapes are sampled at pixel centers with a one pixel coverage ramp on
//! the edges. Everything is clipped to the buffer.

use glam::Vec2;
use image::{Rgba, RgbaImage};
use crate::descriptor::Rgb;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Source-over.
    #[default]
    Normal,
    /// Darkens, white is neutral.
    Multiply,
    /// Lightens, black is neutral.
    Screen,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: f32,
    pub blend: BlendMode,
}

impl Paint {
    pub const fn new(color: Rgb, alpha: f32) -> Self {
        Self {
            color,
            alpha,
            blend: BlendMode::Normal,
        }
    }

    pub const fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

/// Line stroking style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke<'a> {
    pub width: f32,
    /// Alternating on/off lengths along the path, `None` for a solid line.
    pub dash: Option<&'a [f32]>,
}

impl Stroke<'static> {
    pub const fn solid(width: f32) -> Self {
        Self { width, dash: None }
    }
}

impl<'a> Stroke<'a> {
    pub const fn dashed(width: f32, dash: &'a [f32]) -> Self {
        Self { width, dash: Some(dash) }
    }

    fn is_on(&self, distance_along: f32) -> bool {
        let Some(dash) = self.dash else {
            return true;
        };

        let period: f32 = dash.iter().sum();
        if period <= 0.0 {
            return true;
        }

        let mut phase = distance_along.rem_euclid(period);
        for (i, length) in dash.iter().enumerate() {
            if phase < *length {
                return i % 2 == 0;
            }
            phase -= length;
        }
        false
    }
}

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        let [r, g, b] = fill.0;
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba([r, g, b, 255])),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn blend_pixel(&mut self, x: i64, y: i64, paint: &Paint, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }

        let alpha = (paint.alpha * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }

        let source = paint.color.to_linear_f32();
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for (channel, src) in pixel.0.iter_mut().take(3).zip(source) {
            let dst = *channel as f32 / 255.0;
            let blended = match paint.blend {
                BlendMode::Normal => src,
                BlendMode::Multiply => src * dst,
                BlendMode::Screen => 1.0 - (1.0 - src) * (1.0 - dst),
            };
            let out = dst + (blended - dst) * alpha;
            *channel = (out * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }

    /// Clipped pixel range covering `[min, max]` expanded by one pixel for the coverage ramp.
    fn pixel_span(&self, min: Vec2, max: Vec2) -> Option<(i64, i64, i64, i64)> {
        let x0 = (min.x.floor() as i64 - 1).max(0);
        let y0 = (min.y.floor() as i64 - 1).max(0);
        let x1 = (max.x.ceil() as i64 + 1).min(self.width() as i64 - 1);
        let y1 = (max.y.ceil() as i64 + 1).min(self.height() as i64 - 1);
        (x0 <= x1 && y0 <= y1).then_some((x0, y0, x1, y1))
    }

    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: Paint) {
        let min = origin.min(origin + size);
        let max = origin.max(origin + size);
        let x0 = (min.x.round() as i64).max(0);
        let y0 = (min.y.round() as i64).max(0);
        let x1 = (max.x.round() as i64).min(self.width() as i64);
        let y1 = (max.y.round() as i64).min(self.height() as i64);

        for y in y0..y1 {
            for x in x0..x1 {
                self.blend_pixel(x, y, &paint, 1.0);
            }
        }
    }

    pub fn fill_disk(&mut self, center: Vec2, radius: f32, paint: Paint) {
        let Some((x0, y0, x1, y1)) = self.pixel_span(center - radius, center + radius) else {
            return;
        };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let distance = (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center).length();
                let coverage = (radius + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, &paint, coverage);
                }
            }
        }
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke, paint: Paint) {
        let reach = radius + stroke.width;
        let Some((x0, y0, x1, y1)) = self.pixel_span(center - reach, center + reach) else {
            return;
        };

        let half_width = stroke.width * 0.5;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let distance = (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center).length();
                let coverage = (half_width + 0.5 - (distance - radius).abs()).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, &paint, coverage);
                }
            }
        }
    }

    /// Stroke an open polyline. The dash pattern runs continuously across vertices.
    pub fn stroke_path(&mut self, points: &[Vec2], stroke: Stroke, paint: Paint) {
        let mut travelled = 0.0;
        for segment in points.windows(2) {
            self.stroke_segment(segment[0], segment[1], travelled, &stroke, &paint);
            travelled += segment[0].distance(segment[1]);
        }
    }

    pub fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke, paint: Paint) {
        self.stroke_segment(from, to, 0.0, &stroke, &paint);
    }

    fn stroke_segment(&mut self, a: Vec2, b: Vec2, dash_offset: f32, stroke: &Stroke, paint: &Paint) {
        let half_width = stroke.width * 0.5;
        let Some((x0, y0, x1, y1)) = self.pixel_span(a.min(b) - half_width, a.max(b) + half_width) else {
            return;
        };

        let axis = b - a;
        let length = axis.length();
        let direction = if length > 0.0 { axis / length } else { Vec2::ZERO };

        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let along = (p - a).dot(direction).clamp(0.0, length);
                if !stroke.is_on(dash_offset + along) {
                    continue;
                }

                let distance = p.distance(a + direction * along);
                let coverage = (half_width + 0.5 - distance).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, paint, coverage);
                }
            }
        }
    }
}
