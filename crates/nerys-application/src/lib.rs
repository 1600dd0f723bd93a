//! Application layer for the Nerys widget: the session controller state
//! machine and the render command stream it publishes.

mod controller;
mod render;

pub use controller::SessionController;
pub use render::RenderCommand;
