mod input;
mod loop_runner;
mod metrics;
mod rendering;
mod scene;

pub use input::InputAction;
pub use loop_runner::{run_app, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::LoopMetricsSnapshot;
pub use rendering::{Renderer, Viewport, ACTOR_COLOR, CLEAR_COLOR, SOLID_COLOR};
pub use scene::{DiagnosticsSnapshot, InputSnapshot, Scene};
