mod window;

use morphcloud::error::AppError;
use morphcloud::text::TextRasterizer;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> Result<(), AppError> {
    // No font just disables text shapes; everything else still runs.
    let rasterizer = match TextRasterizer::from_system() {
        Ok(rasterizer) => Some(rasterizer),
        Err(e) => {
            eprintln!("Text shapes disabled: {}", e);
            None
        }
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // No hand-tracking feed is wired up here; the app runs pointer-only and
    // says so in the status line. An external detector can be attached by
    // passing the receiving end of a channel of `window::HandEvent`s.
    let mut app = window::App::new(rasterizer, None);
    event_loop.run_app(&mut app)?;
    Ok(())
}
