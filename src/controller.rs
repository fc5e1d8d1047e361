//! Interaction state machine for the clone-stamp view.
//!
//! The controller owns the base image, the optional clone buffer and the
//! selection, and turns window-space pointer/resize events into operations
//! on them. Selection corners and the last pointer position are kept in
//! display space; only capture and stamp work in native pixels.

use image::imageops::FilterType;
use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::error::Error;
use crate::fit::{fit, ViewTransform};
use crate::selection::SelectionRegion;
use crate::surface::ImageSurface;
use crate::types::{FrameBuffer, ScreenRect};
use crate::vec2::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    /// No selection, no clone buffer.
    Idle,
    /// Selection anchored (and possibly dragged), nothing captured yet.
    Selecting,
    /// Capture taken; the clone buffer follows the pointer until stamped.
    Holding,
}

/// The two suspend switches, changed only through named transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suspension {
    rescale: bool,
    pointer_tracking: bool,
}

impl Suspension {
    pub fn new() -> Self {
        Self { rescale: true, pointer_tracking: false }
    }

    /// A resize gesture re-enables proportional tracking of the overlays.
    pub fn arm_rescale(&mut self) {
        self.rescale = false;
    }

    /// Pointer drags own the overlay coordinates until the next resize.
    pub fn suspend_rescale(&mut self) {
        self.rescale = true;
    }

    pub fn suspend_pointer_tracking(&mut self) {
        self.pointer_tracking = true;
    }

    pub fn resume_pointer_tracking(&mut self) {
        self.pointer_tracking = false;
    }

    pub fn rescale_suspended(&self) -> bool {
        self.rescale
    }

    pub fn pointer_tracking_suspended(&self) -> bool {
        self.pointer_tracking
    }
}

impl Default for Suspension {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the host needs to paint one frame.
pub struct Frame<'a> {
    pub base_bitmap: &'a FrameBuffer,
    pub base_top_left: (i32, i32),
    pub selection_rect: Option<ScreenRect>,
    pub clone_bitmap: Option<&'a FrameBuffer>,
    pub clone_top_left: Option<(i32, i32)>,
}

pub struct ViewController {
    base: ImageSurface,
    clone: Option<ImageSurface>,
    selection: SelectionRegion,
    pointer: Option<Vec2>,
    container: Option<Vec2>,
    suspension: Suspension,
}

/// Rounded screen coordinates, saturating instead of wrapping at extreme zoom.
fn to_i32(v: Vec2) -> (i32, i32) {
    let clamp = |n: i64| n.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    let (x, y) = v.to_i64();
    (clamp(x), clamp(y))
}

impl ViewController {
    pub fn new(raster: RgbaImage) -> Result<Self, Error> {
        Self::with_filter(raster, FilterType::Triangle)
    }

    pub fn with_filter(raster: RgbaImage, filter: FilterType) -> Result<Self, Error> {
        Ok(Self {
            base: ImageSurface::with_filter(raster, filter)?,
            clone: None,
            selection: SelectionRegion::new(),
            pointer: None,
            container: None,
            suspension: Suspension::new(),
        })
    }

    pub fn state(&self) -> InteractionState {
        if self.clone.is_some() {
            InteractionState::Holding
        } else if self.selection.is_anchored() {
            InteractionState::Selecting
        } else {
            InteractionState::Idle
        }
    }

    pub fn suspension(&self) -> Suspension {
        self.suspension
    }

    pub fn selection(&self) -> &SelectionRegion {
        &self.selection
    }

    pub fn clone_buffer(&self) -> Option<&ImageSurface> {
        self.clone.as_ref()
    }

    pub fn base(&self) -> &ImageSurface {
        &self.base
    }

    /// Current window <-> image mapping. Before the first resize the image
    /// is shown at native size in a container of the same size.
    pub fn transform(&self) -> ViewTransform {
        let display = self.base.display_size();
        let container = self.container.unwrap_or(display);
        ViewTransform::centered(container, display, self.base.native_size())
    }

    pub fn on_resize(&mut self, container_size: Vec2) {
        if container_size.x <= 0.0 || container_size.y <= 0.0 {
            warn!(?container_size, "ignoring resize to an empty container");
            return;
        }
        self.suspension.arm_rescale();
        self.relayout(container_size);
    }

    /// Refit the base image to `container_size`. The selection and clone
    /// buffer follow by the same factor unless rescaling is suspended.
    pub fn relayout(&mut self, container_size: Vec2) {
        if container_size.x <= 0.0 || container_size.y <= 0.0 {
            return;
        }
        self.container = Some(container_size);
        let fitted = match fit(container_size, self.base.display_size()) {
            Ok(fitted) => fitted,
            Err(e) => {
                warn!(error = %e, "layout skipped");
                return;
            }
        };
        self.base.set_display_scale(fitted.fitted_size);
        if self.suspension.rescale_suspended() {
            return;
        }

        let factor = fitted.factor();
        if self.selection.is_anchored() {
            self.selection = self.selection.scale_by(factor);
        }
        if let Some(clone) = &mut self.clone {
            clone.set_display_scale(clone.display_size() * factor);
        }
    }

    pub fn on_pointer_down(&mut self, position: Vec2) {
        let transform = self.transform();
        if let Some(clone) = self.clone.take() {
            let top_left = transform.to_image_space(position) - clone.native_size() / 2.0;
            let top_left = top_left.to_i64();
            self.base.paste(&clone, top_left);
            info!(x = top_left.0, y = top_left.1, "stamped clone buffer");
        }
        let anchor = transform.to_display_space(position);
        self.selection = SelectionRegion::new();
        self.selection.open(anchor);
        self.pointer = Some(anchor);
        debug!(?anchor, "selection opened");
    }

    pub fn on_pointer_drag(&mut self, position: Vec2) {
        if self.suspension.pointer_tracking_suspended() {
            return;
        }
        let point = self.transform().to_display_space(position);
        self.pointer = Some(point);
        if self.state() == InteractionState::Idle {
            return;
        }
        self.suspension.suspend_rescale();
        if let Err(e) = self.selection.close(point) {
            debug!(error = %e, "drag without anchor");
        }
    }

    /// Plain pointer motion: only the preview position follows.
    pub fn on_pointer_move(&mut self, position: Vec2) {
        if self.suspension.pointer_tracking_suspended() {
            return;
        }
        self.pointer = Some(self.transform().to_display_space(position));
    }

    pub fn on_pointer_up(&mut self) {
        if self.state() != InteractionState::Selecting {
            return;
        }
        let factor = self.base.native_to_display_factor();
        let capture = match self.selection.to_image_space_rect(factor) {
            Ok(rect) if !rect.is_degenerate() => self.base.extract(rect),
            _ => None,
        };
        match capture {
            Some(mut clone) => {
                clone.set_display_scale(clone.native_size() * factor);
                info!(size = ?clone.native_size(), "captured clone buffer");
                self.clone = Some(clone);
            }
            None => {
                debug!("selection produced no capture, back to idle");
                self.selection = SelectionRegion::new();
            }
        }
    }

    pub fn on_pointer_enter(&mut self) {
        self.suspension.resume_pointer_tracking();
    }

    pub fn on_pointer_leave(&mut self) {
        self.suspension.suspend_pointer_tracking();
    }

    /// Bitmaps and positions for the current state. Resamples only when a
    /// surface's cache is stale.
    pub fn render(&mut self) -> Frame<'_> {
        let transform = self.transform();
        let offset = transform.offset;

        let selection_rect = match (self.selection.normalized(), self.selection.dimensions()) {
            (Ok((top_left, _)), Ok(size)) => {
                let (x, y) = to_i32(top_left + offset);
                let (width, height) = to_i32(size);
                Some(ScreenRect { x, y, width, height })
            }
            _ => None,
        };

        let clone_top_left = match (&self.clone, self.pointer) {
            (Some(clone), Some(pointer)) => {
                Some(to_i32(pointer + offset - clone.display_size() / 2.0))
            }
            _ => None,
        };

        Frame {
            base_bitmap: self.base.rendered(),
            base_top_left: to_i32(transform.to_window_space(Vec2::ZERO)),
            selection_rect,
            clone_bitmap: clone_top_left.and(self.clone.as_mut()).map(ImageSurface::rendered),
            clone_top_left,
        }
    }

    /// Pixels of the base image, including everything stamped so far.
    pub fn save_raster(&self) -> &RgbaImage {
        self.base.raster()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    /// 200x200 image shown 1:1 in a 200x200 window.
    fn one_to_one() -> ViewController {
        let mut view = ViewController::new(gradient(200, 200)).unwrap();
        view.on_resize(Vec2::new(200.0, 200.0));
        view
    }

    fn drag(view: &mut ViewController, from: (f64, f64), to: (f64, f64)) {
        view.on_pointer_down(from.into());
        view.on_pointer_drag(to.into());
        view.on_pointer_up();
    }

    #[test]
    fn suspension_transitions() {
        let mut s = Suspension::default();
        assert!(s.rescale_suspended());
        assert!(!s.pointer_tracking_suspended());

        s.arm_rescale();
        assert!(!s.rescale_suspended());
        s.suspend_rescale();
        assert!(s.rescale_suspended());

        s.suspend_pointer_tracking();
        assert!(s.pointer_tracking_suspended());
        assert!(s.rescale_suspended());
        s.resume_pointer_tracking();
        assert!(!s.pointer_tracking_suspended());
    }

    #[test]
    fn screen_coordinates_saturate() {
        assert_eq!(to_i32(Vec2::new(1e12, -1e12)), (i32::MAX, i32::MIN));
        assert_eq!(to_i32(Vec2::new(-3.5, 2.4)), (-4, 2));
    }

    #[test]
    fn starts_idle_with_rescale_suspended() {
        let view = ViewController::new(gradient(10, 10)).unwrap();
        assert_eq!(view.state(), InteractionState::Idle);
        assert!(view.suspension().rescale_suspended());
        assert!(!view.suspension().pointer_tracking_suspended());
    }

    #[test]
    fn resize_fits_and_centres_the_image() {
        let mut view = ViewController::new(gradient(200, 200)).unwrap();
        view.on_resize(Vec2::new(800.0, 400.0));
        assert_eq!(view.base().display_size(), Vec2::new(400.0, 400.0));
        let t = view.transform();
        assert_eq!(t.offset, Vec2::new(200.0, 0.0));
        assert_eq!(t.to_image_space(Vec2::new(300.0, 100.0)), Vec2::new(50.0, 50.0));
        assert!(!view.suspension().rescale_suspended());
    }

    #[test]
    fn empty_container_is_ignored() {
        let mut view = one_to_one();
        view.on_resize(Vec2::new(0.0, 300.0));
        assert_eq!(view.base().display_size(), Vec2::new(200.0, 200.0));
    }

    #[test]
    fn drag_and_release_captures_clone_buffer() {
        let mut view = one_to_one();
        view.on_pointer_down(Vec2::new(30.0, 30.0));
        assert_eq!(view.state(), InteractionState::Selecting);
        view.on_pointer_drag(Vec2::new(10.0, 10.0));
        assert!(view.suspension().rescale_suspended());
        view.on_pointer_up();

        assert_eq!(view.state(), InteractionState::Holding);
        let clone = view.clone_buffer().unwrap();
        assert_eq!(clone.native_size(), Vec2::new(20.0, 20.0));
        assert_eq!(clone.raster().get_pixel(0, 0), &Rgba([10, 10, 7, 255]));
    }

    #[test]
    fn selection_outside_image_returns_to_idle() {
        let mut view = ViewController::new(gradient(200, 200)).unwrap();
        view.on_resize(Vec2::new(800.0, 400.0));
        // Image occupies x in 200..600; this drag is entirely to its left.
        drag(&mut view, (20.0, 50.0), (150.0, 120.0));
        assert_eq!(view.state(), InteractionState::Idle);
        assert!(view.clone_buffer().is_none());
        assert!(!view.selection().is_anchored());
    }

    #[test]
    fn click_without_drag_returns_to_idle() {
        let mut view = one_to_one();
        view.on_pointer_down(Vec2::new(50.0, 50.0));
        view.on_pointer_up();
        assert_eq!(view.state(), InteractionState::Idle);
    }

    #[test]
    fn click_while_holding_stamps_centred_on_pointer() {
        let mut view = one_to_one();
        drag(&mut view, (10.0, 10.0), (30.0, 30.0));
        view.on_pointer_move(Vec2::new(100.0, 100.0));
        view.on_pointer_down(Vec2::new(100.0, 100.0));

        assert_eq!(view.state(), InteractionState::Selecting);
        assert!(view.clone_buffer().is_none());
        let raster = view.save_raster();
        assert_eq!(raster.get_pixel(90, 90), &Rgba([10, 10, 7, 255]));
        assert_eq!(raster.get_pixel(109, 109), &Rgba([29, 29, 7, 255]));
        assert_eq!(raster.get_pixel(110, 110), &Rgba([110, 110, 7, 255]));
    }

    #[test]
    fn drag_while_holding_moves_rectangle_and_keeps_clone() {
        let mut view = one_to_one();
        drag(&mut view, (10.0, 10.0), (30.0, 30.0));
        view.on_resize(Vec2::new(200.0, 200.0));
        assert!(!view.suspension().rescale_suspended());

        view.on_pointer_drag(Vec2::new(50.0, 60.0));
        assert_eq!(view.state(), InteractionState::Holding);
        assert!(view.suspension().rescale_suspended());
        assert_eq!(
            view.selection().normalized(),
            Ok((Vec2::new(10.0, 10.0), Vec2::new(50.0, 60.0)))
        );

        view.on_pointer_up();
        assert_eq!(view.state(), InteractionState::Holding);
        assert_eq!(view.clone_buffer().unwrap().native_size(), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn pointer_down_while_selecting_reopens() {
        let mut view = one_to_one();
        view.on_pointer_down(Vec2::new(10.0, 10.0));
        view.on_pointer_drag(Vec2::new(30.0, 30.0));
        view.on_pointer_down(Vec2::new(80.0, 90.0));

        assert_eq!(view.state(), InteractionState::Selecting);
        assert_eq!(view.selection().anchor(), Some(Vec2::new(80.0, 90.0)));
        assert!(!view.selection().is_open());
        assert!(view.clone_buffer().is_none());
    }

    #[test]
    fn drag_ignored_while_pointer_tracking_suspended() {
        let mut view = one_to_one();
        view.on_pointer_down(Vec2::new(10.0, 10.0));
        view.on_pointer_leave();
        view.on_pointer_drag(Vec2::new(50.0, 50.0));

        assert!(!view.selection().is_open());
        assert_eq!(view.selection().dimensions(), Err(Error::EmptySelection));
        assert!(!view.suspension().rescale_suspended());
    }

    #[test]
    fn armed_resize_scales_selection_and_clone() {
        let mut view = one_to_one();
        drag(&mut view, (10.0, 10.0), (30.0, 30.0));
        view.on_resize(Vec2::new(400.0, 400.0));

        assert_eq!(view.selection().dimensions(), Ok(Vec2::new(40.0, 40.0)));
        assert_eq!(view.clone_buffer().unwrap().display_size(), Vec2::new(40.0, 40.0));
    }

    #[test]
    fn suspended_relayout_leaves_overlays_alone() {
        let mut view = one_to_one();
        view.on_pointer_down(Vec2::new(10.0, 10.0));
        view.on_pointer_drag(Vec2::new(30.0, 30.0));
        view.relayout(Vec2::new(400.0, 400.0));

        assert_eq!(view.base().display_size(), Vec2::new(400.0, 400.0));
        assert_eq!(view.selection().dimensions(), Ok(Vec2::new(20.0, 20.0)));
    }

    #[test]
    fn leaving_the_view_freezes_the_pointer() {
        let mut view = one_to_one();
        drag(&mut view, (10.0, 10.0), (30.0, 30.0));
        view.on_pointer_move(Vec2::new(50.0, 50.0));
        view.on_pointer_leave();
        view.on_pointer_move(Vec2::new(190.0, 190.0));
        assert_eq!(view.render().clone_top_left, Some((40, 40)));

        view.on_pointer_enter();
        view.on_pointer_move(Vec2::new(60.0, 60.0));
        assert_eq!(view.render().clone_top_left, Some((50, 50)));
    }

    #[test]
    fn render_reports_overlays_per_state() {
        let mut view = ViewController::new(gradient(200, 200)).unwrap();
        view.on_resize(Vec2::new(800.0, 400.0));
        {
            let frame = view.render();
            assert_eq!(frame.base_top_left, (200, 0));
            assert_eq!((frame.base_bitmap.width, frame.base_bitmap.height), (400, 400));
            assert!(frame.selection_rect.is_none());
            assert!(frame.clone_bitmap.is_none());
        }

        view.on_pointer_down(Vec2::new(220.0, 20.0));
        view.on_pointer_drag(Vec2::new(260.0, 80.0));
        let frame = view.render();
        assert_eq!(frame.selection_rect, Some(ScreenRect { x: 220, y: 20, width: 40, height: 60 }));
        assert!(frame.clone_bitmap.is_none());

        view.on_pointer_up();
        let frame = view.render();
        let bmp = frame.clone_bitmap.unwrap();
        assert_eq!((bmp.width, bmp.height), (40, 60));
        assert_eq!(frame.clone_top_left, Some((240, 50)));
    }
}
