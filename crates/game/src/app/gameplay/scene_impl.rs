use engine::{DiagnosticsSnapshot, InputSnapshot, Scene, SceneWorld};
use tracing::{debug, info};

use super::level::{spawn_level, LevelDesc};
use super::movers::ScriptedMover;
use super::player::Player;
use super::tuning::PlayerTuning;
use super::DIAGNOSTICS_INTERVAL_TICKS;

pub(crate) struct PlatformerScene {
    level: LevelDesc,
    tuning: PlayerTuning,
    player: Option<Player>,
    movers: Vec<ScriptedMover>,
    tick: u64,
    unresolved_squishes: u32,
    pending_diagnostics: Option<DiagnosticsSnapshot>,
}

impl PlatformerScene {
    pub(crate) fn new(level: LevelDesc, tuning: PlayerTuning) -> Self {
        Self {
            level,
            tuning,
            player: None,
            movers: Vec::new(),
            tick: 0,
            unresolved_squishes: 0,
            pending_diagnostics: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    #[cfg(test)]
    pub(crate) fn movers(&self) -> &[ScriptedMover] {
        &self.movers
    }

    #[cfg(test)]
    pub(crate) fn unresolved_squishes(&self) -> u32 {
        self.unresolved_squishes
    }

    fn diagnostics(&self, world: &SceneWorld) -> Option<DiagnosticsSnapshot> {
        let player = self.player.as_ref()?;
        let actor = world.actor(player.actor())?;
        Some(DiagnosticsSnapshot {
            tick: self.tick,
            actor_position: (actor.bounds.x, actor.bounds.y),
            velocity: (player.vx, player.vy),
            acceleration: (player.ax, player.ay),
            riding: actor.riding,
            grounded: player.grounded,
            unresolved_squishes: self.unresolved_squishes,
        })
    }
}

impl Scene for PlatformerScene {
    fn load(&mut self, world: &mut SceneWorld) {
        let spawned = spawn_level(&self.level, world);
        self.player = Some(Player::new(spawned.player_actor, &self.tuning));
        self.movers = spawned.movers;
        self.tick = 0;
        self.unresolved_squishes = 0;
        self.pending_diagnostics = None;
        info!(
            solid_count = self.level.solids.len(),
            mover_count = self.movers.len(),
            spawn_x = self.level.player.x,
            spawn_y = self.level.player.y,
            "level_loaded"
        );
    }

    fn update(&mut self, input: &InputSnapshot, world: &mut SceneWorld) {
        if self.tick % DIAGNOSTICS_INTERVAL_TICKS == 0 {
            self.pending_diagnostics = self.diagnostics(world);
        }
        self.tick = self.tick.saturating_add(1);

        if let Some(player) = self.player.as_mut() {
            player.update(input, world);
        }

        for mover in &mut self.movers {
            let outcome = mover.step(world);
            self.unresolved_squishes = self
                .unresolved_squishes
                .saturating_add(outcome.squished.len() as u32);
        }
    }

    fn unload(&mut self, _world: &mut SceneWorld) {
        debug!(
            tick = self.tick,
            unresolved_squishes = self.unresolved_squishes,
            "level_unloaded"
        );
        self.player = None;
        self.movers.clear();
        self.pending_diagnostics = None;
    }

    fn take_diagnostics(&mut self) -> Option<DiagnosticsSnapshot> {
        self.pending_diagnostics.take()
    }
}
