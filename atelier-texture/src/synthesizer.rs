//! Procedural upholstery albedo.
//!
//! A texture is built in up to three passes over a flat base fill:
//! the finish noise, the pattern overlay and the stitching overlay.
//! Drawing constants are fixed pixel magnitudes independent of the
//! descriptor.

use std::io::Cursor;
use std::sync::Arc;
use derive_builder::Builder;
use glam::Vec2;
use image::{ImageFormat, RgbaImage};
use rand::Rng;
use serde::{Deserialize, Serialize};
use atelier_core::collections::{SmallVec, StableHasher};
use crate::canvas::{BlendMode, Canvas, Paint, Stroke};
use crate::descriptor::{Finish, PatternKind, Rgb, StitchKind};
use crate::TextureError;

const PEBBLE_COUNT: usize = 3000;
const WRINKLE_COUNT: usize = 150;
const GRAIN_COUNT: usize = 80;
const SPECKLE_COUNT: usize = 2000;

const DIAMOND_CELL: f32 = 40.0;
const QUILT_CELL: f32 = 30.0;
const PERFORATION_SIZE: f32 = 8.0;

const STITCH_ALPHA: f32 = 0.6;
const STITCH_WIDTH: f32 = 2.0;
const STITCH_SPACING: f32 = 40.0;
const STITCH_ORIGIN: f32 = 20.0;
const ZIGZAG_BAND: f32 = 30.0;
const ZIGZAG_PERIOD: f32 = 20.0;

/// One stage of synthesis, recorded in the order it ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SynthesisPass {
    Finish,
    Pattern,
    Stitching,
}

/// Everything that determines the look of a surface texture.
#[derive(Clone, Debug, Hash, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct SurfaceRequest {
    pub finish: Finish,
    pub base_color: Rgb,
    #[builder(default)]
    pub pattern: PatternKind,
    #[builder(default)]
    pub stitching: StitchKind,
    #[builder(default)]
    pub metallic: bool,
}

/// Cache identity of a synthesized texture.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct TextureKey {
    pub request: SurfaceRequest,
    pub resolution: u32,
    pub global_seed: Option<u64>,
}

impl TextureKey {
    pub fn new(request: SurfaceRequest, resolution: u32, global_seed: Option<u64>) -> Self {
        Self {
            request,
            resolution,
            global_seed,
        }
    }

    /// Seed for the random source used to synthesize this texture.
    pub fn seed(&self) -> u64 {
        StableHasher::hash_one(self)
    }
}

/// Fixed-resolution RGBA raster produced by the synthesizer.
#[derive(Clone, Debug)]
pub struct SurfaceImage {
    image: Arc<RgbaImage>,
    passes: SmallVec<[SynthesisPass; 3]>,
}

impl SurfaceImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn shared_image(&self) -> Arc<RgbaImage> {
        Arc::clone(&self.image)
    }

    pub fn passes(&self) -> &[SynthesisPass] {
        &self.passes
    }

    /// True when every pixel equals the first one.
    pub fn is_uniform(&self) -> bool {
        let mut pixels = self.image.pixels();
        match pixels.next() {
            Some(first) => pixels.all(|p| p == first),
            None => true,
        }
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, TextureError> {
        let mut bytes = Cursor::new(Vec::new());
        self.image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Synthesizer {
    width: u32,
    height: u32,
}

impl Synthesizer {
    pub fn new(resolution: u32) -> Self {
        Self::with_size(resolution, resolution)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn synthesize<R: Rng + ?Sized>(&self, request: &SurfaceRequest, rng: &mut R) -> SurfaceImage {
        let mut canvas = Canvas::new(self.width, self.height, request.base_color);
        let mut passes = SmallVec::new();

        if self.finish_pass(&mut canvas, &request.finish, rng) {
            passes.push(SynthesisPass::Finish);
        }
        if self.pattern_pass(&mut canvas, request.pattern, request.metallic) {
            passes.push(SynthesisPass::Pattern);
        }
        if self.stitching_pass(&mut canvas, request.stitching) {
            passes.push(SynthesisPass::Stitching);
        }

        SurfaceImage {
            image: Arc::new(canvas.into_image()),
            passes,
        }
    }

    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(
            rng.random_range(0.0..self.width as f32),
            rng.random_range(0.0..self.height as f32),
        )
    }

    fn finish_pass<R: Rng + ?Sized>(&self, canvas: &mut Canvas, finish: &Finish, rng: &mut R) -> bool {
        match finish {
            Finish::Pebbled => {
                for _ in 0..PEBBLE_COUNT {
                    let center = self.random_point(rng);
                    let radius = rng.random_range(1.0..5.0);
                    let alpha = rng.random_range(0.1..0.5);

                    // shadow first, so the light disk sits on top of it
                    canvas.fill_disk(center + Vec2::ONE, radius, Paint::new(Rgb::BLACK, alpha * 0.5));
                    canvas.fill_disk(center, radius, Paint::new(Rgb::WHITE, alpha));
                }
            }
            Finish::Leather => {
                for _ in 0..WRINKLE_COUNT {
                    let origin = self.random_point(rng);
                    let size = Vec2::new(rng.random_range(15.0..45.0), rng.random_range(20.0..60.0));
                    let alpha = rng.random_range(0.0..0.15);
                    canvas.fill_rect(origin, size, Paint::new(Rgb::BLACK, alpha));
                }

                for _ in 0..GRAIN_COUNT {
                    let from = self.random_point(rng);
                    let length = rng.random_range(50.0..150.0);
                    let drift = rng.random_range(-10.0..10.0);
                    let width = rng.random_range(1.0..3.0);
                    let alpha = rng.random_range(0.0..0.1);
                    canvas.stroke_line(from, from + Vec2::new(length, drift), Stroke::solid(width), Paint::new(Rgb::BLACK, alpha));
                }
            }
            Finish::Smooth => {
                for _ in 0..SPECKLE_COUNT {
                    let origin = self.random_point(rng).floor();
                    let alpha = rng.random_range(0.0..0.08);
                    canvas.fill_rect(origin, Vec2::splat(2.0), Paint::new(Rgb::WHITE, alpha));
                }
            }
            Finish::Unknown(_) => return false,
        }

        true
    }

    /// Top-left corners of a `cell` sized grid covering the canvas.
    fn cells(&self, cell: f32) -> impl Iterator<Item = Vec2> {
        let (width, height) = (self.width as f32, self.height as f32);
        let columns = (width / cell).ceil() as u32;
        let rows = (height / cell).ceil() as u32;
        (0..rows).flat_map(move |row| (0..columns).map(move |column| Vec2::new(column as f32, row as f32) * cell))
    }

    fn pattern_pass(&self, canvas: &mut Canvas, pattern: PatternKind, metallic: bool) -> bool {
        match pattern {
            PatternKind::None => return false,
            PatternKind::Diamond => {
                let (line_alpha, highlight_alpha) = if metallic { (0.45, 0.35) } else { (0.3, 0.15) };
                let groove = Paint::new(Rgb::BLACK, line_alpha).with_blend(BlendMode::Multiply);
                let highlight = Paint::new(Rgb::WHITE, highlight_alpha).with_blend(BlendMode::Screen);

                let half = DIAMOND_CELL * 0.5;
                for corner in self.cells(DIAMOND_CELL) {
                    let outline = [
                        corner + Vec2::new(half, 0.0),
                        corner + Vec2::new(DIAMOND_CELL, half),
                        corner + Vec2::new(half, DIAMOND_CELL),
                        corner + Vec2::new(0.0, half),
                        corner + Vec2::new(half, 0.0),
                    ];
                    canvas.stroke_path(&outline, Stroke::solid(2.0), groove);

                    let catch_light = outline.map(|p| p + Vec2::ONE);
                    canvas.stroke_path(&catch_light, Stroke::solid(1.0), highlight);
                }
            }
            PatternKind::Quilted => {
                let outer = Paint::new(Rgb::WHITE, 0.4);
                let inner = Paint::new(Rgb::WHITE, 0.2);

                let half = QUILT_CELL * 0.5;
                for corner in self.cells(QUILT_CELL) {
                    let center = corner + Vec2::splat(half);
                    canvas.stroke_circle(center, QUILT_CELL / 3.0, Stroke::solid(1.0), outer);
                    canvas.stroke_circle(center, QUILT_CELL / 6.0, Stroke::solid(1.0), inner);
                }
            }
            PatternKind::Perforated => {
                let hole = Paint::new(Rgb::BLACK, if metallic { 0.3 } else { 0.2 });
                let bevel = Paint::new(Rgb::WHITE, 0.25);

                let spacing = PERFORATION_SIZE * 2.0;
                let radius = PERFORATION_SIZE * 0.5;
                for corner in self.cells(spacing) {
                    let center = corner + Vec2::splat(PERFORATION_SIZE);
                    canvas.fill_disk(center, radius, hole);
                    if metallic {
                        canvas.fill_disk(center - Vec2::ONE, radius * 0.5, bevel);
                    }
                }
            }
        }

        true
    }

    fn stitching_pass(&self, canvas: &mut Canvas, stitching: StitchKind) -> bool {
        let thread = Paint::new(Rgb::BLACK, STITCH_ALPHA);
        let (width, height) = (self.width as f32, self.height as f32);

        match stitching {
            StitchKind::None => return false,
            StitchKind::Straight => {
                let mut y = STITCH_ORIGIN;
                while y < height {
                    canvas.stroke_line(Vec2::new(0.0, y), Vec2::new(width, y), Stroke::dashed(STITCH_WIDTH, &[5.0, 5.0]), thread);
                    y += STITCH_SPACING;
                }
            }
            StitchKind::Cross => {
                let arm = Vec2::splat(10.0);
                let mirrored = Vec2::new(10.0, -10.0);
                let stroke = Stroke::dashed(STITCH_WIDTH, &[3.0, 3.0]);

                let mut y = STITCH_ORIGIN;
                while y < height {
                    let mut x = STITCH_ORIGIN;
                    while x < width {
                        let center = Vec2::new(x, y);
                        canvas.stroke_line(center - arm, center + arm, stroke, thread);
                        canvas.stroke_line(center + mirrored, center - mirrored, stroke, thread);
                        x += STITCH_SPACING;
                    }
                    y += STITCH_SPACING;
                }
            }
            StitchKind::Zigzag => {
                let amplitude = ZIGZAG_PERIOD * 0.5;

                let mut y = STITCH_ORIGIN;
                while y < height {
                    let mut points = vec![Vec2::new(0.0, y)];
                    let mut x = 0.0;
                    while x < width {
                        points.push(Vec2::new(x + amplitude, y + amplitude));
                        points.push(Vec2::new(x + ZIGZAG_PERIOD, y));
                        x += ZIGZAG_PERIOD;
                    }
                    canvas.stroke_path(&points, Stroke::solid(STITCH_WIDTH), thread);
                    y += ZIGZAG_BAND;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use image::Rgba;
    use super::*;

    const RESOLUTION: u32 = 128;
    const BASE: Rgb = Rgb::new(0x2c, 0x3e, 0x50);

    fn request(finish: Finish, pattern: PatternKind, stitching: StitchKind, metallic: bool) -> SurfaceRequest {
        SurfaceRequestBuilder::default()
            .finish(finish)
            .base_color(BASE)
            .pattern(pattern)
            .stitching(stitching)
            .metallic(metallic)
            .build()
            .unwrap()
    }

    fn synthesize(request: &SurfaceRequest, seed: u64) -> SurfaceImage {
        Synthesizer::new(RESOLUTION).synthesize(request, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn every_combination_is_well_formed() {
        let finishes = [Finish::Pebbled, Finish::Smooth, Finish::Leather, Finish::parse("velvet")];
        let patterns = [PatternKind::None, PatternKind::Diamond, PatternKind::Quilted, PatternKind::Perforated];
        let stitchings = [StitchKind::None, StitchKind::Straight, StitchKind::Cross, StitchKind::Zigzag];

        for finish in &finishes {
            for pattern in patterns {
                for stitching in stitchings {
                    for metallic in [false, true] {
                        let image = synthesize(&request(finish.clone(), pattern, stitching, metallic), 1);
                        assert_eq!(image.width(), RESOLUTION);
                        assert_eq!(image.height(), RESOLUTION);
                        assert_eq!(image.image().as_raw().len(), (RESOLUTION * RESOLUTION * 4) as usize);
                        assert!(image.image().pixels().all(|p| p.0[3] == 255));
                    }
                }
            }
        }
    }

    #[test]
    fn passes_run_once_in_order() {
        let image = synthesize(&request(Finish::Leather, PatternKind::Diamond, StitchKind::Cross, false), 3);
        assert_eq!(image.passes(), &[SynthesisPass::Finish, SynthesisPass::Pattern, SynthesisPass::Stitching]);
        assert!(!image.is_uniform());
    }

    #[test]
    fn unknown_finish_without_overlays_is_flat() {
        let image = synthesize(&request(Finish::parse("velvet"), PatternKind::None, StitchKind::None, false), 3);
        assert!(image.passes().is_empty());
        assert!(image.is_uniform());
        assert_eq!(*image.image().get_pixel(0, 0), Rgba([0x2c, 0x3e, 0x50, 255]));
    }

    #[test]
    fn overlay_free_baseline_only_lightens() {
        // smooth noise is faint white speckle, so nothing may get darker than the base fill
        let image = synthesize(&request(Finish::Smooth, PatternKind::None, StitchKind::None, false), 9);
        assert_eq!(image.passes(), &[SynthesisPass::Finish]);

        for pixel in image.image().pixels() {
            for (channel, base) in pixel.0.iter().zip(BASE.0) {
                assert!(*channel >= base);
                assert!(*channel - base <= 96);
            }
        }
    }

    #[test]
    fn textured_finishes_without_overlays_run_one_pass() {
        for finish in [Finish::Pebbled, Finish::Leather] {
            let image = synthesize(&request(finish.clone(), PatternKind::None, StitchKind::None, false), 9);
            assert_eq!(image.passes(), &[SynthesisPass::Finish], "{:?}", finish);
            assert!(!image.is_uniform(), "{:?}", finish);
        }
    }

    #[test]
    fn stitching_darkens_the_base() {
        let image = synthesize(&request(Finish::parse("flat"), PatternKind::None, StitchKind::Straight, false), 9);
        assert_eq!(image.passes(), &[SynthesisPass::Stitching]);

        // first stitch row at y = 20, dash on for x in 0..5
        let stitched = image.image().get_pixel(2, 20);
        assert!(stitched.0[0] < BASE.0[0]);
    }

    #[test]
    fn same_seed_same_pixels() {
        let request = request(Finish::Pebbled, PatternKind::Quilted, StitchKind::Zigzag, true);
        let a = synthesize(&request, 42);
        let b = synthesize(&request, 42);
        let c = synthesize(&request, 43);

        assert_eq!(a.image().as_raw(), b.image().as_raw());
        assert_ne!(a.image().as_raw(), c.image().as_raw());
    }

    #[test]
    fn metallic_diamond_is_stronger() {
        let plain = synthesize(&request(Finish::parse("flat"), PatternKind::Diamond, StitchKind::None, false), 0);
        let metallic = synthesize(&request(Finish::parse("flat"), PatternKind::Diamond, StitchKind::None, true), 0);
        assert_ne!(plain.image().as_raw(), metallic.image().as_raw());
    }

    #[test]
    fn texture_key_seed_is_stable() {
        let a = TextureKey::new(request(Finish::Leather, PatternKind::None, StitchKind::None, false), 512, None);
        let b = TextureKey::new(request(Finish::Leather, PatternKind::None, StitchKind::None, false), 512, None);
        let c = TextureKey::new(request(Finish::Leather, PatternKind::None, StitchKind::None, false), 512, Some(1));

        assert_eq!(a.seed(), b.seed());
        assert_ne!(a.seed(), c.seed());
    }

    #[test]
    fn encodes_png() {
        let image = synthesize(&request(Finish::Smooth, PatternKind::Perforated, StitchKind::None, true), 5);
        let png = image.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), image.image().as_raw());
    }
}
