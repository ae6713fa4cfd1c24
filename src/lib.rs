//! # morphcloud
//!
//! An interactive 3D particle cloud that morphs between procedurally
//! generated shapes (a sphere, a heart, a spiral galaxy, rasterized text)
//! and reacts to hand-tracking or mouse input.
//!
//! ## Quick start
//!
//! ```no_run
//! use morphcloud::prelude::*;
//!
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
//! let mut cloud = ParticleCloud::new(PARTICLE_COUNT);
//! let mut source = InteractionSource::new();
//! let mut camera = ZoomCamera::new();
//!
//! let target = shape::generate(ShapeKind::Heart, PARTICLE_COUNT, &[], &mut rng);
//!
//! // Once per rendered frame:
//! let motion = source.motion();
//! cloud.step(&target, motion);
//! camera.update(source.zoom_target());
//! if cloud.take_dirty() {
//!     // re-upload cloud.positions() to the render backend
//! }
//! ```
//!
//! ## Core pieces
//!
//! - [`shape`]: maps a [`ShapeKind`] to one target coordinate per particle.
//! - [`text`]: rasterizes a short string into points for the text shape.
//! - [`simulation`]: [`ParticleCloud`], the per-frame update: velocity
//!   impulses on interaction, exponential damping, easing toward the target.
//! - [`input`]: [`InteractionSource`], fusing hand landmarks and pointer
//!   position into one cursor plus a pinch-driven zoom target.
//! - [`camera`]: [`ZoomCamera`], easing the view distance toward the zoom.
//! - [`shell`]: shape selection, the transient text display, status text.
//! - [`render`]: a wgpu billboard-point backend consuming the position
//!   buffer.
//!
//! The hand-landmark detector itself is an external collaborator: anything
//! that can produce [`input::HandFrame`]s (21 normalized landmarks per
//! detection) can drive the cloud. Without one, the pointer does.

pub mod camera;
pub mod error;
pub mod input;
pub mod render;
pub mod shape;
pub mod shell;
pub mod simulation;
pub mod text;

pub use camera::ZoomCamera;
pub use glam::{Vec2, Vec3};
pub use input::{CursorInput, HandFrame, InteractionSource};
pub use shape::{ShapeKind, PARTICLE_COUNT};
pub use shell::{Shell, Status};
pub use simulation::ParticleCloud;
pub use text::TextRasterizer;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::camera::ZoomCamera;
    pub use crate::input::{CursorInput, HandFrame, InteractionSource};
    pub use crate::render::Renderer;
    pub use crate::shape::{self, ShapeKind, PARTICLE_COUNT};
    pub use crate::shell::{Shell, Status};
    pub use crate::simulation::ParticleCloud;
    pub use crate::text::TextRasterizer;
    pub use crate::{Vec2, Vec3};
    pub use rand::SeedableRng;
}
