pub mod app;
pub mod physics;

pub use app::{
    run_app, AppError, DiagnosticsSnapshot, InputAction, InputSnapshot, LoopConfig,
    LoopMetricsSnapshot, Renderer, Scene, Viewport, ACTOR_COLOR, CLEAR_COLOR, SLOW_FRAME_ENV_VAR,
    SOLID_COLOR,
};
pub use physics::{
    clamp, move_actor_x, move_actor_y, move_solid, overlaps, sign, Aabb, Actor, ActorId, Axis,
    SceneWorld, Solid, SolidId, SolidMoveOutcome, Squish,
};
