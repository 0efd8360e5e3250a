pub mod gesture;
pub mod handler;

pub use gesture::{Gesture, SwipeTracker};
pub use handler::{InputHandler, KeyAction};
