// Turns per-frame mouse polling into the edge events the view expects.
// minifb only reports "where is the mouse" and "is the button held", so we
// remember last frame's answers and diff against them.

use clone_stamp::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter,
    Leave,
    Down(Vec2),
    Drag(Vec2),
    Move(Vec2),
    Up,
}

#[derive(Default)]
pub struct PointerTracker {
    pos: Option<Vec2>,
    down: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's poll; returns the events in the order they happened.
    pub fn update(&mut self, pos: Option<Vec2>, down: bool) -> Vec<PointerEvent> {
        let mut events = Vec::new();

        match (self.pos, pos) {
            (None, Some(_)) => events.push(PointerEvent::Enter),
            (Some(_), None) => events.push(PointerEvent::Leave),
            _ => {}
        }

        if let Some(p) = pos {
            let moved = self.pos != Some(p);
            match (self.down, down) {
                (false, true) => events.push(PointerEvent::Down(p)),
                (true, true) if moved => events.push(PointerEvent::Drag(p)),
                (false, false) if moved => events.push(PointerEvent::Move(p)),
                _ => {}
            }
        }
        // Release is reported even if it happened outside the window.
        if self.down && !down {
            events.push(PointerEvent::Up);
        }

        self.pos = pos;
        // A press that started outside the window never becomes a drag.
        self.down = down && (self.down || pos.is_some());
        events
    }
}
