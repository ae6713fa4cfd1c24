//! Presentation state: shape selection, text submission, status.
//!
//! The shell does not touch particles. It decides which shape is active,
//! runs the transient text display (rasterize, show, revert after five
//! seconds), and carries the human-readable status line. The frame loop asks
//! [`Shell::take_shape_changed`] whether the target shape must be rebuilt.

use crate::shape::ShapeKind;
use crate::text::TextRasterizer;
use glam::Vec3;
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};

/// Longest accepted text submission, in characters.
pub const MAX_TEXT_LEN: usize = 10;
/// How long a submitted text stays up before reverting.
pub const TEXT_REVERT_DELAY: Duration = Duration::from_millis(5000);

/// Connection/detection state shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Initializing,
    /// A hand is tracked; gestures drive the cloud.
    HandControl,
    /// Tracker is up but sees no hand; the pointer drives the cloud.
    PointerControl,
    /// Camera permission was denied at startup.
    CameraDenied,
    /// No hand-tracking feed is available at all.
    TrackerMissing,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Initializing => "Initializing...",
            Status::HandControl => "Hand detected - gesture control active",
            Status::PointerControl => "Camera active - control with the mouse",
            Status::CameraDenied => "Camera permission denied - using the mouse",
            Status::TrackerMissing => "Hand tracking unavailable - using the mouse",
        };
        f.write_str(s)
    }
}

/// UI-facing state machine for shape selection and the text timer.
pub struct Shell {
    shape: ShapeKind,
    /// Shape to return to when a text display expires.
    revert_to: ShapeKind,
    text_points: Vec<Vec3>,
    revert_at: Option<Instant>,
    status: Status,
    shape_changed: bool,
}

impl Shell {
    pub fn new() -> Self {
        Self {
            shape: ShapeKind::Earth,
            revert_to: ShapeKind::Earth,
            text_points: Vec::new(),
            revert_at: None,
            status: Status::Initializing,
            shape_changed: true,
        }
    }

    /// The currently displayed shape.
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Points for the current text display; empty unless a text is showing.
    pub fn text_points(&self) -> &[Vec3] {
        &self.text_points
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Select one of the fixed shapes.
    ///
    /// Takes effect immediately and becomes the shape a later text display
    /// reverts to. Cancels any pending text revert; [`ShapeKind::Text`] is
    /// not directly selectable.
    pub fn select(&mut self, kind: ShapeKind) {
        if kind == ShapeKind::Text {
            return;
        }
        self.shape = kind;
        self.revert_to = kind;
        self.revert_at = None;
        self.text_points.clear();
        self.shape_changed = true;
    }

    /// Submit free text for a transient display.
    ///
    /// Empty or whitespace-only input is a no-op. The text is truncated to
    /// ten characters, upper-cased, rasterized, and shown immediately; the
    /// revert deadline is (re-)armed five seconds from `now`. Returns whether
    /// anything happened.
    pub fn submit_text<R: Rng>(
        &mut self,
        text: &str,
        rasterizer: &TextRasterizer,
        rng: &mut R,
        now: Instant,
    ) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        let display: String = trimmed.chars().take(MAX_TEXT_LEN).collect();
        self.text_points = rasterizer.points(&display.to_uppercase(), rng);
        self.shape = ShapeKind::Text;
        self.revert_at = Some(now + TEXT_REVERT_DELAY);
        self.shape_changed = true;
        true
    }

    /// Advance the text timer. Call once per frame with the current time.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.revert_at {
            if now >= deadline {
                self.shape = self.revert_to;
                self.revert_at = None;
                self.text_points.clear();
                self.shape_changed = true;
            }
        }
    }

    /// Whether the active shape changed since this was last taken. The frame
    /// loop regenerates the target list when it did.
    pub fn take_shape_changed(&mut self) -> bool {
        std::mem::replace(&mut self.shape_changed, false)
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_earth_with_a_pending_change() {
        let mut shell = Shell::new();
        assert_eq!(shell.shape(), ShapeKind::Earth);
        assert!(shell.take_shape_changed());
        assert!(!shell.take_shape_changed());
    }

    #[test]
    fn test_select_switches_and_signals() {
        let mut shell = Shell::new();
        shell.take_shape_changed();
        shell.select(ShapeKind::Galaxy);
        assert_eq!(shell.shape(), ShapeKind::Galaxy);
        assert!(shell.take_shape_changed());
    }

    #[test]
    fn test_text_is_not_directly_selectable() {
        let mut shell = Shell::new();
        shell.take_shape_changed();
        shell.select(ShapeKind::Text);
        assert_eq!(shell.shape(), ShapeKind::Earth);
        assert!(!shell.take_shape_changed());
    }

    #[test]
    fn test_tick_without_deadline_is_inert() {
        let mut shell = Shell::new();
        shell.take_shape_changed();
        shell.tick(Instant::now());
        assert!(!shell.take_shape_changed());
    }

    #[test]
    fn test_select_cancels_a_pending_revert() {
        // Arm a revert by hand (avoids needing a font in tests), then make
        // sure an explicit selection drops it.
        let mut shell = Shell::new();
        shell.shape = ShapeKind::Text;
        let armed = Instant::now();
        shell.revert_at = Some(armed + TEXT_REVERT_DELAY);

        shell.select(ShapeKind::Heart);
        assert_eq!(shell.shape(), ShapeKind::Heart);

        shell.tick(armed + TEXT_REVERT_DELAY * 2);
        assert_eq!(shell.shape(), ShapeKind::Heart);
        assert!(shell.revert_at.is_none());
    }

    #[test]
    fn test_text_reverts_to_prior_shape_at_the_deadline() {
        let mut shell = Shell::new();
        shell.select(ShapeKind::Heart);
        shell.take_shape_changed();

        // Simulate a successful submission without a rasterizer.
        let now = Instant::now();
        shell.shape = ShapeKind::Text;
        shell.text_points = vec![Vec3::ONE; 10];
        shell.revert_at = Some(now + TEXT_REVERT_DELAY);
        shell.shape_changed = true;
        shell.take_shape_changed();

        // Just before the deadline: still text.
        shell.tick(now + TEXT_REVERT_DELAY - Duration::from_millis(1));
        assert_eq!(shell.shape(), ShapeKind::Text);
        assert!(!shell.take_shape_changed());

        // At the deadline: back to the pre-submission shape, text cleared.
        shell.tick(now + TEXT_REVERT_DELAY);
        assert_eq!(shell.shape(), ShapeKind::Heart);
        assert!(shell.text_points().is_empty());
        assert!(shell.take_shape_changed());
    }

    #[test]
    fn test_status_strings_are_human_readable() {
        assert_eq!(Status::Initializing.to_string(), "Initializing...");
        assert!(Status::TrackerMissing.to_string().contains("mouse"));
    }
}
