use engine::{LoopConfig, Scene};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, PlayerTuning, TuningError, TUNING_ENV_VAR};

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Platformer Startup ===");

    let tuning = resolve_tuning(PlayerTuning::from_env());
    info!(
        speed = tuning.speed,
        jump_speed = tuning.jump_speed,
        gravity = tuning.gravity,
        top_speed = tuning.top_speed,
        coyote_frames = tuning.coyote_frames,
        "player_tuning"
    );

    AppWiring {
        config: LoopConfig::default(),
        scene: gameplay::build_scene(tuning),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn resolve_tuning(result: Result<PlayerTuning, TuningError>) -> PlayerTuning {
    result.unwrap_or_else(|error| {
        warn!(
            env_var = TUNING_ENV_VAR,
            error = %error,
            "invalid tuning override; falling back to defaults"
        );
        PlayerTuning::default()
    })
}
