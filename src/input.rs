//! Interaction fusion: hand tracking and pointer input into one cursor.
//!
//! Two channels feed the simulation: an external hand-landmark detector
//! (delivering [`HandFrame`]s at its own cadence) and the window's pointer.
//! [`InteractionSource`] fuses them into a single normalized cursor sample
//! per frame (hand wins when present) and turns consecutive samples into
//! the motion delta the simulator consumes. It also owns pinch-to-zoom: the
//! thumb/index distance drives a clamped zoom target through a dead-zone.
//!
//! Absence is tracked explicitly. Whenever the active channel reports
//! nothing, the previous sample is dropped so a resumed interaction starts
//! from a zero delta instead of a spurious jump.

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::WindowEvent;

/// Number of landmarks the hand detector reports per hand.
pub const LANDMARK_COUNT: usize = 21;
/// Landmark index of the thumb tip.
pub const THUMB_TIP: usize = 4;
/// Landmark index of the index fingertip.
pub const INDEX_TIP: usize = 8;

/// Scale from normalized cursor delta to simulation motion units.
const MOTION_GAIN: f32 = 30.0;
/// Pinch-distance change below which zoom does not move (jitter filter).
const PINCH_DEADZONE: f32 = 0.02;
/// Zoom units per unit of pinch-distance change.
const ZOOM_GAIN: f32 = 20.0;
/// Zoom target bounds.
const ZOOM_MIN: f32 = 5.0;
const ZOOM_MAX: f32 = 30.0;
/// Default camera distance before any pinch input.
const ZOOM_DEFAULT: f32 = 15.0;

/// One detection cycle's worth of hand landmarks, normalized to [0,1]².
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFrame {
    pub landmarks: [Vec2; LANDMARK_COUNT],
}

impl HandFrame {
    /// Index fingertip position, the cursor when a hand is tracked.
    pub fn index_tip(&self) -> Vec2 {
        self.landmarks[INDEX_TIP]
    }

    /// Euclidean thumb-to-index distance, the zoom gesture signal.
    pub fn pinch_distance(&self) -> f32 {
        self.landmarks[THUMB_TIP].distance(self.landmarks[INDEX_TIP])
    }
}

/// The fused cursor for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorInput {
    /// Neither channel has anything.
    None,
    /// Pointer position, normalized and mirrored.
    Pointer(Vec2),
    /// Hand cursor (index fingertip) plus the current pinch distance.
    Hand { tip: Vec2, pinch: f32 },
}

/// Fuses pointer and hand input into per-frame motion and a zoom target.
#[derive(Debug)]
pub struct InteractionSource {
    pointer: Option<Vec2>,
    hand: Option<Vec2>,
    prev_cursor: Option<Vec2>,
    prev_pinch: Option<f32>,
    zoom_target: f32,
}

impl Default for InteractionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionSource {
    pub fn new() -> Self {
        Self {
            pointer: None,
            hand: None,
            prev_cursor: None,
            prev_pinch: None,
            zoom_target: ZOOM_DEFAULT,
        }
    }

    /// Record a pointer position in window pixels.
    ///
    /// Normalized to [0,1]² and mirrored horizontally so dragging matches
    /// the mirrored-camera view the hand channel assumes.
    pub fn set_pointer(&mut self, position: Vec2, window_size: (u32, u32)) {
        let (w, h) = window_size;
        if w == 0 || h == 0 {
            return;
        }
        self.pointer = Some(Vec2::new(
            1.0 - position.x / w as f32,
            position.y / h as f32,
        ));
    }

    /// Record the latest hand detection result.
    ///
    /// `None` means the detector ran and saw no hand: the hand channel and
    /// both previous-sample states are cleared so the next detection (or the
    /// pointer fallback) starts fresh. A present hand also feeds the pinch
    /// gesture into the zoom target.
    pub fn set_hand(&mut self, frame: Option<&HandFrame>) {
        match frame {
            Some(frame) => {
                self.hand = Some(frame.index_tip());
                let pinch = frame.pinch_distance();
                if let Some(prev) = self.prev_pinch {
                    let delta = prev - pinch;
                    if delta.abs() > PINCH_DEADZONE {
                        self.zoom_target =
                            (self.zoom_target + delta * ZOOM_GAIN).clamp(ZOOM_MIN, ZOOM_MAX);
                    }
                }
                self.prev_pinch = Some(pinch);
            }
            None => {
                self.hand = None;
                self.prev_pinch = None;
                self.prev_cursor = None;
            }
        }
    }

    /// Map winit window events onto the pointer channel.
    pub fn handle_window_event(&mut self, event: &WindowEvent, window_size: (u32, u32)) {
        if let WindowEvent::CursorMoved { position, .. } = event {
            let PhysicalPosition { x, y } = *position;
            self.set_pointer(Vec2::new(x as f32, y as f32), window_size);
        }
    }

    /// The fused cursor right now: hand if present, else pointer.
    pub fn cursor(&self) -> CursorInput {
        if let Some(tip) = self.hand {
            return CursorInput::Hand {
                tip,
                pinch: self.prev_pinch.unwrap_or(0.0),
            };
        }
        match self.pointer {
            Some(p) => CursorInput::Pointer(p),
            None => CursorInput::None,
        }
    }

    /// Produce this frame's motion delta and advance the previous sample.
    ///
    /// Returns `None` when there is no input at all (the simulator idles);
    /// the first sample after a gap returns a zero delta.
    pub fn motion(&mut self) -> Option<Vec2> {
        let current = match self.cursor() {
            CursorInput::Hand { tip, .. } => tip,
            CursorInput::Pointer(p) => p,
            CursorInput::None => {
                self.prev_cursor = None;
                return None;
            }
        };

        let delta = self
            .prev_cursor
            .map(|prev| (current - prev) * MOTION_GAIN)
            .unwrap_or(Vec2::ZERO);
        self.prev_cursor = Some(current);
        Some(delta)
    }

    /// Zoom distance the camera should ease toward.
    pub fn zoom_target(&self) -> f32 {
        self.zoom_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand_at(tip: Vec2, thumb: Vec2) -> HandFrame {
        let mut landmarks = [Vec2::ZERO; LANDMARK_COUNT];
        landmarks[INDEX_TIP] = tip;
        landmarks[THUMB_TIP] = thumb;
        HandFrame { landmarks }
    }

    #[test]
    fn test_pointer_is_normalized_and_mirrored() {
        let mut src = InteractionSource::new();
        src.set_pointer(Vec2::new(200.0, 300.0), (800, 600));
        match src.cursor() {
            CursorInput::Pointer(p) => {
                assert!((p.x - 0.75).abs() < 1e-6);
                assert!((p.y - 0.5).abs() < 1e-6);
            }
            other => panic!("expected pointer cursor, got {:?}", other),
        }
    }

    #[test]
    fn test_hand_takes_priority_over_pointer() {
        let mut src = InteractionSource::new();
        src.set_pointer(Vec2::new(100.0, 100.0), (800, 600));
        src.set_hand(Some(&hand_at(Vec2::new(0.3, 0.4), Vec2::new(0.3, 0.5))));
        assert!(matches!(src.cursor(), CursorInput::Hand { .. }));

        src.set_hand(None);
        assert!(matches!(src.cursor(), CursorInput::Pointer(_)));
    }

    #[test]
    fn test_first_sample_has_zero_delta() {
        let mut src = InteractionSource::new();
        src.set_pointer(Vec2::new(400.0, 300.0), (800, 600));
        assert_eq!(src.motion(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_motion_scales_the_cursor_delta() {
        let mut src = InteractionSource::new();
        src.set_pointer(Vec2::new(400.0, 300.0), (800, 600));
        src.motion();
        // +80 px right is -0.1 after mirroring; +60 px down is +0.1.
        src.set_pointer(Vec2::new(480.0, 360.0), (800, 600));
        let m = src.motion().unwrap();
        assert!((m.x + 3.0).abs() < 1e-4);
        assert!((m.y - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_input_yields_none() {
        let mut src = InteractionSource::new();
        assert_eq!(src.motion(), None);
    }

    #[test]
    fn test_hand_loss_resets_the_delta_baseline() {
        let mut src = InteractionSource::new();
        src.set_hand(Some(&hand_at(Vec2::new(0.1, 0.1), Vec2::new(0.1, 0.2))));
        src.motion();

        // Detector reports no hand, then the hand reappears far away.
        src.set_hand(None);
        src.set_hand(Some(&hand_at(Vec2::new(0.9, 0.9), Vec2::new(0.9, 0.8))));
        assert_eq!(src.motion(), Some(Vec2::ZERO));
    }

    #[test]
    fn test_zoom_respects_deadzone() {
        let mut src = InteractionSource::new();
        src.set_hand(Some(&hand_at(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.6))));
        let before = src.zoom_target();
        // Pinch change of 0.01 sits inside the dead-zone.
        src.set_hand(Some(&hand_at(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.61))));
        assert_eq!(src.zoom_target(), before);
    }

    #[test]
    fn test_zoom_moves_outside_deadzone() {
        let mut src = InteractionSource::new();
        src.set_hand(Some(&hand_at(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.8))));
        let before = src.zoom_target();
        // Pinch closes by 0.2: zoom target moves by 0.2 * 20 = 4.
        src.set_hand(Some(&hand_at(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.6))));
        assert!((src.zoom_target() - (before + 4.0)).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_stays_clamped() {
        let mut src = InteractionSource::new();
        // Arbitrary alternating pinch sequence, some wild.
        let pinches = [0.9, 0.05, 0.7, 0.01, 0.95, 0.3, 0.0, 1.0, 0.5, 0.02];
        for (i, pinch) in pinches.iter().cycle().take(200).enumerate() {
            let thumb = Vec2::new(0.5, 0.5 + pinch);
            src.set_hand(Some(&hand_at(Vec2::new(0.5, 0.5), thumb)));
            let z = src.zoom_target();
            assert!(
                (ZOOM_MIN..=ZOOM_MAX).contains(&z),
                "zoom left its bounds at step {}: {}",
                i,
                z
            );
        }
    }

    #[test]
    fn test_pinch_baseline_clears_on_hand_loss() {
        let mut src = InteractionSource::new();
        src.set_hand(Some(&hand_at(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.9))));
        let before = src.zoom_target();

        // Gap, then a very different pinch: no zoom jump on the first frame.
        src.set_hand(None);
        src.set_hand(Some(&hand_at(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.51))));
        assert_eq!(src.zoom_target(), before);
    }
}
