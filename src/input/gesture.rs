//! Mouse drags as swipes
//!
//! Press the left button, drag, release: the dominant axis of the drag picks
//! the direction. A release without movement is a tap.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::game::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Tap,
    Swipe(Direction),
}

/// Terminal cells are roughly twice as tall as they are wide
const ROW_ASPECT: i32 = 2;

#[derive(Debug, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a mouse event; returns a gesture when a drag completes
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<Gesture> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (column, row) = self.start.take()?;
                let dx = event.column as i32 - column as i32;
                let dy = event.row as i32 - row as i32;
                Some(classify(dx, dy * ROW_ASPECT))
            }
            _ => None,
        }
    }
}

/// Horizontal wins only when strictly larger, like a touch swipe
fn classify(dx: i32, dy: i32) -> Gesture {
    if dx == 0 && dy == 0 {
        return Gesture::Tap;
    }

    if dx.abs() > dy.abs() {
        if dx > 0 {
            Gesture::Swipe(Direction::Right)
        } else {
            Gesture::Swipe(Direction::Left)
        }
    } else if dy > 0 {
        Gesture::Swipe(Direction::Down)
    } else {
        Gesture::Swipe(Direction::Up)
    }
}
