//! Text-to-points rasterization.
//!
//! Renders a short string into an off-screen alpha bitmap with `fontdue`,
//! then samples the bitmap on a coarse grid: every covered cell becomes one
//! 3D point. The resulting list feeds [`crate::shape::ShapeKind::Text`].
//!
//! Rasterization and sampling are split so the sampling math can be tested
//! against synthetic bitmaps without loading a font.

use crate::error::FontError;
use fontdue::layout::{
    CoordinateSystem, HorizontalAlign, Layout, LayoutSettings, TextStyle, VerticalAlign,
};
use fontdue::{Font, FontSettings};
use glam::Vec3;
use rand::Rng;

/// Off-screen canvas width in pixels.
pub const CANVAS_WIDTH: usize = 600;
/// Off-screen canvas height in pixels.
pub const CANVAS_HEIGHT: usize = 300;
/// Glyph size in pixels. Large enough that a 10-character string still
/// produces a dense point cloud at the sampling stride below.
const FONT_SIZE_PX: f32 = 120.0;
/// Grid step between samples, in both axes.
const SAMPLE_STRIDE: usize = 3;
/// Minimum coverage for a sampled cell to count as inside a glyph.
const ALPHA_THRESHOLD: u8 = 128;
/// Model-space width the canvas maps onto (x spans ±7).
const MODEL_WIDTH: f32 = 14.0;
/// Model-space height the canvas maps onto (y spans ±3.5).
const MODEL_HEIGHT: f32 = 7.0;

/// Candidate bold sans-serif fonts for [`TextRasterizer::from_system`].
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Single-channel coverage bitmap.
struct AlphaBitmap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl AlphaBitmap {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    #[inline]
    fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// Rasterizes strings into point clouds using a loaded font.
pub struct TextRasterizer {
    font: Font,
}

impl TextRasterizer {
    /// Load a font from raw TTF/OTF bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FontError> {
        let font = Font::from_bytes(data, FontSettings::default()).map_err(FontError::Parse)?;
        Ok(Self { font })
    }

    /// Load a font from a file on disk.
    pub fn from_file(path: &str) -> Result<Self, FontError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Find a usable bold sans-serif font on this system.
    ///
    /// The `MORPHCLOUD_FONT` environment variable overrides the search; after
    /// that a short list of common install locations is probed.
    pub fn from_system() -> Result<Self, FontError> {
        if let Ok(path) = std::env::var("MORPHCLOUD_FONT") {
            return Self::from_file(&path);
        }
        for path in SYSTEM_FONT_PATHS {
            if std::path::Path::new(path).exists() {
                return Self::from_file(path);
            }
        }
        Err(FontError::NotFound)
    }

    /// Rasterize `text` and sample it into model-space points.
    ///
    /// Empty or whitespace-only input yields no points, which downstream
    /// degrades to the filler spiral for every particle.
    pub fn points<R: Rng>(&self, text: &str, rng: &mut R) -> Vec<Vec3> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let bitmap = self.rasterize(text);
        sample_points(&bitmap, rng)
    }

    /// Draw the string centered on the fixed-size canvas.
    fn rasterize(&self, text: &str) -> AlphaBitmap {
        let mut bitmap = AlphaBitmap::new(CANVAS_WIDTH, CANVAS_HEIGHT);

        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings {
            x: 0.0,
            y: 0.0,
            max_width: Some(CANVAS_WIDTH as f32),
            max_height: Some(CANVAS_HEIGHT as f32),
            horizontal_align: HorizontalAlign::Center,
            vertical_align: VerticalAlign::Middle,
            ..LayoutSettings::default()
        });
        layout.append(&[&self.font], &TextStyle::new(text, FONT_SIZE_PX, 0));

        for glyph in layout.glyphs() {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (_, coverage) = self.font.rasterize_config(glyph.key);
            let left = glyph.x as i32;
            let top = glyph.y as i32;
            for gy in 0..glyph.height {
                for gx in 0..glyph.width {
                    let px = left + gx as i32;
                    let py = top + gy as i32;
                    if px < 0 || py < 0 || px >= CANVAS_WIDTH as i32 || py >= CANVAS_HEIGHT as i32 {
                        continue;
                    }
                    let idx = py as usize * CANVAS_WIDTH + px as usize;
                    let a = coverage[gy * glyph.width + gx];
                    bitmap.data[idx] = bitmap.data[idx].max(a);
                }
            }
        }

        bitmap
    }
}

/// Walk the bitmap on a stride-3 grid and lift covered cells into model space.
///
/// Pixel coordinates map to x in ±7 and y in ±3.5 (y flipped so up is up);
/// z gets a small random jitter for visual volume.
fn sample_points<R: Rng>(bitmap: &AlphaBitmap, rng: &mut R) -> Vec<Vec3> {
    let mut points = Vec::new();
    let mut y = 0;
    while y < bitmap.height {
        let mut x = 0;
        while x < bitmap.width {
            if bitmap.get(x, y) > ALPHA_THRESHOLD {
                let px = (x as f32 / bitmap.width as f32 - 0.5) * MODEL_WIDTH;
                let py = -(y as f32 / bitmap.height as f32 - 0.5) * MODEL_HEIGHT;
                let pz = (rng.gen::<f32>() - 0.5) * 1.0;
                points.push(Vec3::new(px, py, pz));
            }
            x += SAMPLE_STRIDE;
        }
        y += SAMPLE_STRIDE;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(11)
    }

    /// Bitmap with one solid rectangle of the given coverage value.
    fn block_bitmap(x0: usize, y0: usize, w: usize, h: usize, alpha: u8) -> AlphaBitmap {
        let mut bitmap = AlphaBitmap::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                bitmap.data[y * CANVAS_WIDTH + x] = alpha;
            }
        }
        bitmap
    }

    #[test]
    fn test_empty_bitmap_yields_no_points() {
        let bitmap = AlphaBitmap::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        assert!(sample_points(&bitmap, &mut rng()).is_empty());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly 128 is not "inside"; 129 is.
        let at = block_bitmap(0, 0, 30, 30, 128);
        assert!(sample_points(&at, &mut rng()).is_empty());

        let above = block_bitmap(0, 0, 30, 30, 129);
        assert!(!sample_points(&above, &mut rng()).is_empty());
    }

    #[test]
    fn test_sample_count_matches_grid() {
        // A 30x30 block aligned to the grid covers a 10x10 set of samples.
        let bitmap = block_bitmap(0, 0, 30, 30, 255);
        let points = sample_points(&bitmap, &mut rng());
        assert_eq!(points.len(), 100);
    }

    #[test]
    fn test_points_land_in_model_extent() {
        let bitmap = block_bitmap(0, 0, CANVAS_WIDTH, CANVAS_HEIGHT, 255);
        for p in sample_points(&bitmap, &mut rng()) {
            assert!(p.x.abs() <= 7.0);
            assert!(p.y.abs() <= 3.5);
            assert!(p.z.abs() <= 0.5);
        }
    }

    #[test]
    fn test_center_pixel_maps_to_origin() {
        // One covered sample at canvas center: x and y should be ~0.
        let bitmap = block_bitmap(CANVAS_WIDTH / 2, CANVAS_HEIGHT / 2, 3, 3, 255);
        let points = sample_points(&bitmap, &mut rng());
        assert_eq!(points.len(), 1);
        assert!(points[0].x.abs() < 0.1);
        assert!(points[0].y.abs() < 0.1);
    }
}
