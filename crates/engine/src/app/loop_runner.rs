use std::collections::HashSet;
use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use super::input::{ActionStates, PressEdge};
use super::metrics::LoopMetrics;
use super::scene::SceneRuntime;
use super::{DiagnosticsSnapshot, InputAction, InputSnapshot, Renderer, Scene, Viewport};

pub const SLOW_FRAME_ENV_VAR: &str = "PLATFORMER_SLOW_FRAME_MS";

const JUMP_KEYS: [KeyCode; 3] = [KeyCode::ArrowUp, KeyCode::KeyW, KeyCode::Space];

// An action is held while any of its keys is down.
const HELD_BINDINGS: [(InputAction, [KeyCode; 2]); 4] = [
    (InputAction::MoveUp, [KeyCode::ArrowUp, KeyCode::KeyW]),
    (InputAction::MoveDown, [KeyCode::ArrowDown, KeyCode::KeyS]),
    (InputAction::MoveLeft, [KeyCode::ArrowLeft, KeyCode::KeyA]),
    (InputAction::MoveRight, [KeyCode::ArrowRight, KeyCode::KeyD]),
];

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub simulated_slow_frame_ms: u64,
    pub max_render_fps: Option<u32>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "game".to_string(),
            window_width: 800,
            window_height: 600,
            canvas_width: 800,
            canvas_height: 600,
            target_tps: 60,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 5,
            metrics_log_interval: Duration::from_secs(1),
            simulated_slow_frame_ms: 0,
            max_render_fps: Some(60),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

pub fn run_app(config: LoopConfig, scene: Box<dyn Scene>) -> Result<(), AppError> {
    let mut runtime = SceneRuntime::new(scene);

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let canvas = Viewport {
        width: config.canvas_width.max(1),
        height: config.canvas_height.max(1),
    };
    let mut renderer =
        Renderer::new(Arc::clone(&window), canvas).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let slow_frame_delay = resolve_slow_frame_delay(config.simulated_slow_frame_ms);
    let render_cap = config.max_render_fps.filter(|fps| *fps > 0);
    let present_interval = render_cap.map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps)));
    let mut pacer = FramePacer::new(&config, Instant::now());
    let mut input_collector = InputCollector::default();

    runtime.load();
    info!(
        actor_count = runtime.world().actor_count(),
        solid_count = runtime.world().solid_count(),
        "scene_loaded"
    );
    info!(
        target_tps = pacer.target_tps(),
        max_frame_delta_ms = pacer.max_frame_delta.as_millis() as u64,
        max_ticks_per_frame = pacer.max_ticks_per_frame,
        metrics_log_interval_ms = metrics_interval(&config).as_millis() as u64,
        slow_frame_delay_ms = slow_frame_delay.as_millis() as u64,
        render_fps_cap = ?render_cap,
        canvas_width = canvas.width,
        canvas_height = canvas.height,
        "loop_config"
    );

    let mut last_present = Instant::now();
    let mut metrics = LoopMetrics::new(metrics_interval(&config), Instant::now());

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    input_collector.mark_quit_requested();
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                }
                WindowEvent::RedrawRequested => {
                    if slow_frame_delay > Duration::ZERO {
                        // Debug perturbation, separate from the render cap.
                        thread::sleep(slow_frame_delay);
                    }

                    let now = Instant::now();
                    let budget = pacer.begin_frame(now);
                    run_frame_ticks(
                        &mut runtime,
                        &mut input_collector,
                        &mut metrics,
                        budget.ticks,
                    );

                    if budget.dropped_backlog > Duration::ZERO {
                        warn!(
                            dropped_backlog_ms = budget.dropped_backlog.as_millis() as u64,
                            max_ticks_per_frame = pacer.max_ticks_per_frame,
                            "sim_clamp_triggered"
                        );
                    }

                    let pause = present_pause(
                        Instant::now().saturating_duration_since(last_present),
                        present_interval,
                    );
                    if pause > Duration::ZERO {
                        thread::sleep(pause);
                    }

                    if let Err(error) = renderer.render_world(runtime.world()) {
                        warn!(error = %error, "renderer_draw_failed");
                        window_target.exit();
                    }
                    last_present = Instant::now();
                    metrics.record_frame(budget.frame_time);

                    if let Some(snapshot) = metrics.poll(now) {
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            frame_time_ms = snapshot.frame_time_ms,
                            worst_frame_time_ms = snapshot.worst_frame_time_ms,
                            actor_count = runtime.world().actor_count(),
                            "loop_metrics"
                        );
                    }

                    if input_collector.quit_requested {
                        info!(reason = "quit_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                runtime.shutdown();
                info!("shutdown");
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// Runs up to `ticks` simulation ticks. A latched quit ends the frame after
/// the tick that observed it. Returns the number of ticks run.
fn run_frame_ticks(
    runtime: &mut SceneRuntime,
    input_collector: &mut InputCollector,
    metrics: &mut LoopMetrics,
    ticks: u32,
) -> u32 {
    let mut ran = 0;
    while ran < ticks {
        let input_snapshot = input_collector.snapshot_for_tick();
        let report = runtime.tick(&input_snapshot);
        ran += 1;
        metrics.record_tick();

        if report.reset {
            info!(
                actor_count = runtime.world().actor_count(),
                solid_count = runtime.world().solid_count(),
                "scene_reset"
            );
        }
        if let Some(diagnostics) = runtime.take_diagnostics() {
            log_diagnostics(&diagnostics);
        }
        if input_snapshot.quit_requested() {
            break;
        }
    }
    ran
}

fn log_diagnostics(diagnostics: &DiagnosticsSnapshot) {
    info!(
        tick = diagnostics.tick,
        x = diagnostics.actor_position.0,
        y = diagnostics.actor_position.1,
        vx = diagnostics.velocity.0,
        vy = diagnostics.velocity.1,
        ax = diagnostics.acceleration.0,
        ay = diagnostics.acceleration.1,
        riding = ?diagnostics.riding,
        grounded = diagnostics.grounded,
        unresolved_squishes = diagnostics.unresolved_squishes,
        "player_diagnostics"
    );
}

#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    held_keys: HashSet<KeyCode>,
    action_states: ActionStates,
    jump_edges: [PressEdge; JUMP_KEYS.len()],
    reset_edge: PressEdge,
}

impl InputCollector {
    fn mark_quit_requested(&mut self) {
        self.quit_requested = true;
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        if let PhysicalKey::Code(code) = key_event.physical_key {
            self.handle_key(code, is_pressed);
        }
    }

    fn handle_key(&mut self, code: KeyCode, is_pressed: bool) {
        if let Some(slot) = JUMP_KEYS.iter().position(|key| *key == code) {
            self.jump_edges[slot].handle(is_pressed);
            let any_jump_key_down = self.jump_edges.iter().any(PressEdge::is_down);
            self.action_states.set(InputAction::Jump, any_jump_key_down);
        }

        if let Some((action, keys)) = HELD_BINDINGS
            .iter()
            .find(|(_, keys)| keys.contains(&code))
        {
            if is_pressed {
                self.held_keys.insert(code);
            } else {
                self.held_keys.remove(&code);
            }
            let any_key_down = keys.iter().any(|key| self.held_keys.contains(key));
            self.action_states.set(*action, any_key_down);
        }

        match code {
            KeyCode::KeyR => self.reset_edge.handle(is_pressed),
            KeyCode::KeyQ | KeyCode::Escape if is_pressed => self.mark_quit_requested(),
            _ => {}
        }
    }

    fn snapshot_for_tick(&mut self) -> InputSnapshot {
        let mut jump_pressed = false;
        for edge in &mut self.jump_edges {
            jump_pressed |= edge.take();
        }
        InputSnapshot::new(
            self.quit_requested,
            jump_pressed,
            self.reset_edge.take(),
            self.action_states,
        )
    }
}

/// Fixed-timestep accumulator. Wall time is clamped per frame, and backlog
/// beyond `max_ticks_per_frame` ticks is dropped rather than replayed.
#[derive(Debug)]
struct FramePacer {
    fixed_dt: Duration,
    max_frame_delta: Duration,
    max_ticks_per_frame: u32,
    accumulator: Duration,
    last_frame: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrameBudget {
    frame_time: Duration,
    ticks: u32,
    dropped_backlog: Duration,
}

impl FramePacer {
    fn new(config: &LoopConfig, now: Instant) -> Self {
        let max_frame_delta = if config.max_frame_delta.is_zero() {
            Duration::from_millis(250)
        } else {
            config.max_frame_delta
        };
        Self {
            fixed_dt: Duration::from_secs_f64(1.0 / f64::from(config.target_tps.max(1))),
            max_frame_delta,
            max_ticks_per_frame: config.max_ticks_per_frame.max(1),
            accumulator: Duration::ZERO,
            last_frame: now,
        }
    }

    fn target_tps(&self) -> u32 {
        (1.0 / self.fixed_dt.as_secs_f64()).round() as u32
    }

    fn begin_frame(&mut self, now: Instant) -> FrameBudget {
        let frame_time = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.accumulator = self
            .accumulator
            .saturating_add(frame_time.min(self.max_frame_delta));

        let mut ticks = 0;
        while self.accumulator >= self.fixed_dt && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.fixed_dt;
            ticks += 1;
        }

        let dropped_backlog = if self.accumulator >= self.fixed_dt {
            std::mem::take(&mut self.accumulator)
        } else {
            Duration::ZERO
        };

        FrameBudget {
            frame_time,
            ticks,
            dropped_backlog,
        }
    }
}

fn metrics_interval(config: &LoopConfig) -> Duration {
    if config.metrics_log_interval.is_zero() {
        Duration::from_secs(1)
    } else {
        config.metrics_log_interval
    }
}

fn present_pause(since_last_present: Duration, interval: Option<Duration>) -> Duration {
    interval
        .map(|interval| interval.saturating_sub(since_last_present))
        .unwrap_or(Duration::ZERO)
}

fn resolve_slow_frame_delay(config_slow_frame_ms: u64) -> Duration {
    match env::var(SLOW_FRAME_ENV_VAR) {
        Ok(value) => match value.parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                warn!(
                    env_var = SLOW_FRAME_ENV_VAR,
                    value = value.as_str(),
                    "invalid slow-frame env var value; falling back to config"
                );
                Duration::from_millis(config_slow_frame_ms)
            }
        },
        Err(env::VarError::NotPresent) => Duration::from_millis(config_slow_frame_ms),
        Err(err) => {
            warn!(
                env_var = SLOW_FRAME_ENV_VAR,
                error = %err,
                "unable to read slow-frame env var; falling back to config"
            );
            Duration::from_millis(config_slow_frame_ms)
        }
    }
}
