//! Demo application: winit event loop wiring input, shell, simulation,
//! camera, and renderer together.
//!
//! Controls: keys 1/2/3 select the Earth/Heart/Galaxy shapes, typed
//! characters build a short text entry submitted with Enter, and moving the
//! mouse anywhere over the window rotates (and, with fast motion, scatters)
//! the cloud. Hand-tracking frames, when a feed is attached, take priority
//! over the mouse. The status line lives in the window title.

use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Instant;

use glam::{EulerRot, Mat4, Vec3};
use morphcloud::camera::ZoomCamera;
use morphcloud::input::{HandFrame, InteractionSource};
use morphcloud::render::Renderer;
use morphcloud::shape::{self, ShapeKind, PARTICLE_COUNT};
use morphcloud::shell::{Shell, Status, MAX_TEXT_LEN};
use morphcloud::simulation::ParticleCloud;
use morphcloud::text::TextRasterizer;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

/// Events an external hand-tracking feed delivers between frames.
///
/// The detector (camera capture plus landmark model) runs outside this
/// process's frame loop; it only needs to push these through the channel at
/// its own cadence. `Lost` must be sent when a detection cycle sees no hand
/// so stale motion baselines get cleared. `CameraDenied` is sent once if the
/// detector cannot open its camera; the app then stays on pointer control.
pub enum HandEvent {
    Detected(HandFrame),
    Lost,
    CameraDenied,
}

pub struct App {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    cloud: ParticleCloud,
    shell: Shell,
    source: InteractionSource,
    camera: ZoomCamera,
    rasterizer: Option<TextRasterizer>,
    hand_feed: Option<Receiver<HandEvent>>,
    target: Vec<Vec3>,
    rng: SmallRng,
    text_entry: String,
}

impl App {
    pub fn new(rasterizer: Option<TextRasterizer>, hand_feed: Option<Receiver<HandEvent>>) -> Self {
        let mut rng = SmallRng::from_entropy();
        let cloud = ParticleCloud::new(PARTICLE_COUNT);
        let mut shell = Shell::new();
        if hand_feed.is_none() {
            shell.set_status(Status::TrackerMissing);
        }
        let target = shape::generate(shell.shape(), PARTICLE_COUNT, &[], &mut rng);
        shell.take_shape_changed();

        Self {
            window: None,
            renderer: None,
            cloud,
            shell,
            source: InteractionSource::new(),
            camera: ZoomCamera::new(),
            rasterizer,
            hand_feed,
            target,
            rng,
            text_entry: String::new(),
        }
    }

    fn window_size(&self) -> (u32, u32) {
        self.window
            .as_ref()
            .map(|w| {
                let s = w.inner_size();
                (s.width, s.height)
            })
            .unwrap_or((1, 1))
    }

    fn drain_hand_feed(&mut self) {
        let Some(feed) = &self.hand_feed else {
            return;
        };
        while let Ok(event) = feed.try_recv() {
            match event {
                HandEvent::Detected(frame) => {
                    self.source.set_hand(Some(&frame));
                    self.shell.set_status(Status::HandControl);
                }
                HandEvent::Lost => {
                    self.source.set_hand(None);
                    self.shell.set_status(Status::PointerControl);
                }
                HandEvent::CameraDenied => {
                    self.source.set_hand(None);
                    self.shell.set_status(Status::CameraDenied);
                }
            }
        }
    }

    fn handle_key(&mut self, key: &Key) {
        match key {
            Key::Named(NamedKey::Enter) => self.submit_text(),
            Key::Named(NamedKey::Backspace) => {
                self.text_entry.pop();
            }
            Key::Character(s) => match s.as_str() {
                "1" => self.shell.select(ShapeKind::Earth),
                "2" => self.shell.select(ShapeKind::Heart),
                "3" => self.shell.select(ShapeKind::Galaxy),
                s => {
                    for c in s.chars().filter(|c| !c.is_control()) {
                        if self.text_entry.chars().count() < MAX_TEXT_LEN {
                            self.text_entry.push(c);
                        }
                    }
                }
            },
            _ => {}
        }
    }

    fn submit_text(&mut self) {
        let Some(rasterizer) = &self.rasterizer else {
            self.text_entry.clear();
            return;
        };
        let submitted =
            self.shell
                .submit_text(&self.text_entry, rasterizer, &mut self.rng, Instant::now());
        if submitted {
            self.text_entry.clear();
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        self.drain_hand_feed();
        self.shell.tick(Instant::now());

        if self.shell.take_shape_changed() {
            self.target = shape::generate(
                self.shell.shape(),
                self.cloud.len(),
                self.shell.text_points(),
                &mut self.rng,
            );
        }

        let motion = self.source.motion();
        self.cloud.step(&self.target, motion);
        self.camera.update(self.source.zoom_target());

        if let Some(renderer) = &mut self.renderer {
            if self.cloud.take_dirty() {
                renderer.upload_positions(self.cloud.positions());
            }

            let rotation = self.cloud.rotation();
            let model = Mat4::from_euler(EulerRot::XYZ, rotation.x, rotation.y, 0.0);
            match renderer.render(self.camera.view_matrix(), model) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let size = winit::dpi::PhysicalSize {
                        width: renderer.config.width,
                        height: renderer.config.height,
                    };
                    renderer.resize(size);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                Err(e) => eprintln!("Render error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            window.set_title(&self.title());
            window.request_redraw();
        }
    }

    fn title(&self) -> String {
        let shape = match self.shell.shape() {
            ShapeKind::Earth => "EARTH",
            ShapeKind::Heart => "HEART",
            ShapeKind::Galaxy => "GALAXY",
            ShapeKind::Text => "TEXT",
        };
        if self.text_entry.is_empty() {
            format!("morphcloud [{}] | {}", shape, self.shell.status())
        } else {
            format!(
                "morphcloud [{}] | {} | typing: {}",
                shape,
                self.shell.status(),
                self.text_entry
            )
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title("morphcloud")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                eprintln!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(Renderer::new(window, self.cloud.positions())) {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(e) => {
                eprintln!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            WindowEvent::CursorMoved { .. } => {
                let size = self.window_size();
                self.source.handle_window_event(&event, size);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    let key = event.logical_key.clone();
                    self.handle_key(&key);
                }
            }
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }
}
