//! Terminal rendering layer.

pub mod board_view;
pub mod fb;
pub mod renderer;

pub use board_view::BoardView;
pub use fb::{FrameBuffer, Glyph, Rgb};
pub use renderer::TerminalRenderer;
