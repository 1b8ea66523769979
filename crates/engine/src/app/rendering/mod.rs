mod canvas;
mod renderer;

pub use canvas::{Viewport, ACTOR_COLOR, CLEAR_COLOR, SOLID_COLOR};
pub use renderer::Renderer;
