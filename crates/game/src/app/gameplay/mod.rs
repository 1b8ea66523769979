mod level;
mod movers;
mod player;
mod scene_impl;
mod tuning;

use engine::Scene;

pub(crate) use tuning::{PlayerTuning, TuningError, TUNING_ENV_VAR};

const DIAGNOSTICS_INTERVAL_TICKS: u64 = 120;

pub(crate) fn build_scene(tuning: PlayerTuning) -> Box<dyn Scene> {
    Box::new(scene_impl::PlatformerScene::new(level::DEFAULT_LEVEL, tuning))
}
