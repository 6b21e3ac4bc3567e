pub mod canvas;
pub mod input;

pub use canvas::MapCanvas;
pub use input::{DragState, InteractionController};
