//! Target shape generation.
//!
//! Each shape maps to a fixed-length list of target coordinates, one per
//! particle. The simulator eases particles toward these targets every frame,
//! so switching shapes is just swapping the target list.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// Number of particles in the cloud. Target lists always have this length.
pub const PARTICLE_COUNT: usize = 12_000;

/// Sphere radius for [`ShapeKind::Earth`].
const EARTH_RADIUS: f32 = 4.0;
/// Spiral winding factor for [`ShapeKind::Galaxy`].
const GALAXY_SPIRAL: f32 = 2.0;
/// Spiral winding factor for the filler ring around text.
const FILLER_SPIRAL: f32 = 3.0;

/// The closed set of shapes the cloud can morph into.
///
/// `Text` uses precomputed points from [`crate::text::TextRasterizer`];
/// particles beyond the available text points land on a wide filler spiral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Earth,
    Heart,
    Galaxy,
    Text,
}

/// Generate `count` target coordinates for a shape.
///
/// `text_points` is only consulted for [`ShapeKind::Text`]; pass an empty
/// slice otherwise. An empty or short list is not an error: the remaining
/// particles fall back to the filler spiral so nothing collapses to the
/// origin.
pub fn generate<R: Rng>(
    kind: ShapeKind,
    count: usize,
    text_points: &[Vec3],
    rng: &mut R,
) -> Vec<Vec3> {
    (0..count)
        .map(|i| match kind {
            ShapeKind::Earth => earth_point(rng),
            ShapeKind::Heart => heart_point(rng),
            ShapeKind::Galaxy => galaxy_point(rng),
            ShapeKind::Text => text_points
                .get(i)
                .copied()
                .unwrap_or_else(|| filler_point(rng)),
        })
        .collect()
}

/// Uniform point on a sphere shell of radius 4 with a small radial jitter.
///
/// Inverse-transform sampling on the polar angle (`phi = acos(2u - 1)`)
/// avoids the pole clustering a naive latitude/longitude draw would produce.
fn earth_point<R: Rng>(rng: &mut R) -> Vec3 {
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let theta = rng.gen::<f32>() * TAU;
    let r = EARTH_RADIUS + (rng.gen::<f32>() - 0.5) * 0.1;
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Point on the classic parametric heart curve, thickened along z.
fn heart_point<R: Rng>(rng: &mut R) -> Vec3 {
    let t = rng.gen::<f32>() * TAU;
    let x = 0.25 * (16.0 * t.sin().powi(3));
    let y = 0.25 * (13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos())
        + 0.5;
    let z = (rng.gen::<f32>() - 0.5) * 2.0;
    Vec3::new(x, y, z)
}

/// Point on a flat spiral disc, radius 1..5, flattened to half a unit on y.
fn galaxy_point<R: Rng>(rng: &mut R) -> Vec3 {
    let angle = rng.gen::<f32>() * TAU;
    let radius = 1.0 + rng.gen::<f32>() * 4.0;
    Vec3::new(
        (angle * GALAXY_SPIRAL).cos() * radius,
        (rng.gen::<f32>() - 0.5) * 1.0,
        (angle * GALAXY_SPIRAL).sin() * radius,
    )
}

/// Wide spiral ring for particles that have no text point to go to.
fn filler_point<R: Rng>(rng: &mut R) -> Vec3 {
    let angle = rng.gen::<f32>() * TAU;
    let radius = 5.0 + rng.gen::<f32>() * 8.0;
    Vec3::new(
        (angle * FILLER_SPIRAL).cos() * radius,
        (rng.gen::<f32>() - 0.5) * 6.0,
        (angle * FILLER_SPIRAL).sin() * radius,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn test_every_shape_fills_the_buffer() {
        let mut rng = rng();
        for kind in [
            ShapeKind::Earth,
            ShapeKind::Heart,
            ShapeKind::Galaxy,
            ShapeKind::Text,
        ] {
            let points = generate(kind, PARTICLE_COUNT, &[], &mut rng);
            assert_eq!(points.len(), PARTICLE_COUNT);
            assert!(points.iter().all(|p| p.is_finite()));
        }
    }

    #[test]
    fn test_earth_stays_on_the_shell() {
        let mut rng = rng();
        let points = generate(ShapeKind::Earth, PARTICLE_COUNT, &[], &mut rng);
        for p in points {
            assert!(
                (p.length() - EARTH_RADIUS).abs() <= 0.05 + 1e-4,
                "point off the sphere shell: {:?} (r = {})",
                p,
                p.length()
            );
        }
    }

    #[test]
    fn test_galaxy_is_flat() {
        let mut rng = rng();
        let points = generate(ShapeKind::Galaxy, 2_000, &[], &mut rng);
        for p in points {
            let ring = (p.x * p.x + p.z * p.z).sqrt();
            assert!((1.0..=5.0).contains(&ring));
            assert!(p.y.abs() <= 0.5);
        }
    }

    #[test]
    fn test_text_points_used_verbatim() {
        let mut rng = rng();
        let text = vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.5, 0.0)];
        let points = generate(ShapeKind::Text, 100, &text, &mut rng);
        assert_eq!(points[0], text[0]);
        assert_eq!(points[1], text[1]);
        // Everything past the text lands on the wide spiral, not the origin.
        for p in &points[2..] {
            let ring = (p.x * p.x + p.z * p.z).sqrt();
            assert!((5.0..=13.0).contains(&ring));
            assert!(p.y.abs() <= 3.0);
        }
    }

    #[test]
    fn test_empty_text_degrades_to_filler() {
        let mut rng = rng();
        let points = generate(ShapeKind::Text, 500, &[], &mut rng);
        assert_eq!(points.len(), 500);
        for p in points {
            let ring = (p.x * p.x + p.z * p.z).sqrt();
            assert!((5.0..=13.0).contains(&ring));
        }
    }
}
