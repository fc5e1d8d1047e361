// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the composited frame.
// 2) Blitting the scaled image and the clone preview at any offset (clipped).
// 3) A dashed outline for the selection rectangle.

use clone_stamp::{Error, Frame, FrameBuffer, ScreenRect, Vec2};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub const BACKGROUND: u32 = 0x00_16_16_16;
pub const BORDER: u32 = 0x00_80_80_80;
const BORDER_WIDTH: i32 = 2;
const DASH: i32 = 8; // visual: length of each dash and gap of the selection outline

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    pub fn save_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::S, KeyRepeat::No)
    }

    /// Current inner size of the window.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Mouse position in window pixels, or None while the cursor is outside.
    pub fn mouse_pos(&self) -> Result<Option<Vec2>, Error> {
        window_point(self.window.get_mouse_pos(MouseMode::Discard))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }
}

/// Checked conversion of a raw minifb mouse position.
fn window_point(raw: Option<(f32, f32)>) -> Result<Option<Vec2>, Error> {
    raw.map(|(x, y)| Vec2::try_new(x as f64, y as f64)).transpose()
}

/* ---------- Software drawing: pixels, blits, dashed rectangle ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Copy `src` onto `dst` with its top-left at (x,y), clipped to `dst`.
pub fn blit(dst: &mut FrameBuffer, src: &FrameBuffer, x: i32, y: i32) {
    let x0 = x.max(0);
    let x1 = (x + src.width as i32).min(dst.width as i32);
    if x0 >= x1 {
        return;
    }
    for sy in 0..src.height as i32 {
        let dy = y + sy;
        if dy < 0 || dy >= dst.height as i32 {
            continue;
        }
        let src_row = sy as usize * src.width;
        let dst_row = dy as usize * dst.width;
        let from = src_row + (x0 - x) as usize;
        let to = src_row + (x1 - x) as usize;
        dst.pixels[dst_row + x0 as usize..dst_row + x1 as usize]
            .copy_from_slice(&src.pixels[from..to]);
    }
}

/// Dashed outline, `BORDER_WIDTH` pixels thick, drawn inside `rect`.
pub fn draw_dashed_rect(fb: &mut FrameBuffer, rect: ScreenRect, color: u32) {
    let on = |i: i32| (i / DASH) % 2 == 0;
    let (x1, y1) = (rect.x + rect.width - 1, rect.y + rect.height - 1);
    for t in 0..BORDER_WIDTH {
        for i in 0..rect.width {
            if on(i) {
                put_pixel(fb, rect.x + i, rect.y + t, color);
                put_pixel(fb, rect.x + i, y1 - t, color);
            }
        }
        for i in 0..rect.height {
            if on(i) {
                put_pixel(fb, rect.x + t, rect.y + i, color);
                put_pixel(fb, x1 - t, rect.y + i, color);
            }
        }
    }
}

/// Paint one frame: background, image, selection outline, clone preview.
pub fn compose(screen: &mut FrameBuffer, frame: &Frame<'_>) {
    screen.pixels.fill(BACKGROUND);

    let (bx, by) = frame.base_top_left;
    blit(screen, frame.base_bitmap, bx, by);

    if let Some(rect) = frame.selection_rect {
        draw_dashed_rect(screen, rect, BORDER);
    }

    if let (Some(bmp), Some((cx, cy))) = (frame.clone_bitmap, frame.clone_top_left) {
        blit(screen, bmp, cx, cy);
    }
}
