// What you SEE now:
// • The chosen image, scaled to fit the window and centred.
// • Drag with Left Mouse: a dashed rectangle marks the region to clone.
// • Release: a copy of that region follows the cursor.
// • Click: the copy is stamped into the image at full resolution.
// • S saves the edited image as PNG. ESC quits.

mod config;
mod draw;
mod input;
mod io;

use clap::Parser;
use clone_stamp::{Error, FrameBuffer, Vec2, ViewController};
use config::Args;
use draw::{compose, Drawer};
use input::{PointerEvent, PointerTracker};
use tracing::{error, info, warn};

fn main() -> Result<(), Error> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_max_level(args.log_level()).init();

    /* --- Pick and load the image ---
       Visual: nothing yet, or a file dialog if no --input was given. */
    let path = match io::resolve_input(args.input.clone()) {
        Ok(path) => path,
        Err(Error::NoInputSelected) => {
            info!("no image chosen, exiting");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    let raster = io::load_raster(&path)?;
    let mut view = ViewController::with_filter(raster, args.filter.into())?;

    /* --- Window setup ---
       Visual: window opens at the requested size. */
    let mut drawer = Drawer::new("clone-stamp", args.width, args.height)?;
    let mut pointer = PointerTracker::new();

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(0, 0, draw::BACKGROUND);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Resize: refit the image when the window size changed. */
        let (w, h) = drawer.size();
        let container = Vec2::try_new(w as f64, h as f64);
        if (w, h) != (screen.width, screen.height) {
            screen = FrameBuffer::new(w, h, draw::BACKGROUND);
            match &container {
                Ok(size) => view.on_resize(*size),
                Err(e) => warn!(error = %e, "resize skipped"),
            }
        }

        /* 2) Pointer: select, preview, stamp. A bad position skips this frame's events. */
        match drawer.mouse_pos() {
            Ok(pos) => {
                for event in pointer.update(pos, drawer.left_mouse_down()) {
                    match event {
                        PointerEvent::Enter => view.on_pointer_enter(),
                        PointerEvent::Leave => view.on_pointer_leave(),
                        PointerEvent::Down(p) => view.on_pointer_down(p),
                        PointerEvent::Drag(p) => view.on_pointer_drag(p),
                        PointerEvent::Move(p) => view.on_pointer_move(p),
                        PointerEvent::Up => view.on_pointer_up(),
                    }
                }
            }
            Err(e) => warn!(error = %e, "pointer event skipped"),
        }

        /* 3) Save on S. A failed save is reported, not fatal. */
        if drawer.save_pressed_once() {
            if let Err(e) = io::save_raster(view.save_raster(), args.output.as_deref()) {
                error!(error = %e, "save failed");
            }
        }

        /* 4) Paint: refit for the current size, then composite and present. */
        if screen.is_empty() {
            drawer.present(&FrameBuffer::new(1, 1, draw::BACKGROUND))?;
            continue;
        }
        if let Ok(size) = container {
            view.relayout(size);
        }
        let frame = view.render();
        compose(&mut screen, &frame);
        drawer.present(&screen)?;
    }

    Ok(())
}
