//! Camera distance control.

use glam::{Mat4, Vec3};

/// Fraction of the remaining distance covered per frame.
const ZOOM_EASE: f32 = 0.1;
/// Starting distance from the cloud.
const DEFAULT_DISTANCE: f32 = 15.0;

/// Camera looking at the origin from the positive z axis.
///
/// Only the distance animates: each frame it eases toward the zoom target
/// the interaction source maintains, independently of the shape morph.
pub struct ZoomCamera {
    /// Current distance from the origin.
    pub distance: f32,
}

impl ZoomCamera {
    pub fn new() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
        }
    }

    /// Ease the distance toward `target_zoom`. Call once per frame.
    pub fn update(&mut self, target_zoom: f32) {
        self.distance += (target_zoom - self.distance) * ZOOM_EASE;
    }

    /// Camera world position.
    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }

    /// View matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, Vec3::Y)
    }
}

impl Default for ZoomCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_moves_toward_target() {
        let mut camera = ZoomCamera::new();
        camera.update(5.0);
        assert!(camera.distance < DEFAULT_DISTANCE);
        assert!(camera.distance > 5.0);
    }

    #[test]
    fn test_converges_to_target() {
        let mut camera = ZoomCamera::new();
        for _ in 0..200 {
            camera.update(30.0);
        }
        assert!((camera.distance - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_stationary_at_target() {
        let mut camera = ZoomCamera::new();
        camera.distance = 20.0;
        camera.update(20.0);
        assert_eq!(camera.distance, 20.0);
    }
}
