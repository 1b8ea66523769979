use engine::{clamp, sign, ActorId, InputSnapshot, SceneWorld};

use super::tuning::PlayerTuning;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Player {
    actor: ActorId,
    pub(crate) vx: f32,
    pub(crate) vy: f32,
    pub(crate) ax: f32,
    pub(crate) ay: f32,
    pub(crate) grounded: bool,
    pub(crate) speed: f32,
    pub(crate) jump_speed: f32,
    pub(crate) top_speed: f32,
    pub(crate) coyote_frames: u16,
    pub(crate) coyote_eligible: bool,
    pub(crate) frames_spent_falling: u16,
}

impl Player {
    pub(crate) fn new(actor: ActorId, tuning: &PlayerTuning) -> Self {
        Self {
            actor,
            vx: 0.0,
            vy: 0.0,
            ax: 0.0,
            ay: tuning.gravity,
            grounded: false,
            speed: tuning.speed,
            jump_speed: tuning.jump_speed,
            top_speed: tuning.top_speed,
            coyote_frames: tuning.coyote_frames,
            coyote_eligible: false,
            frames_spent_falling: 0,
        }
    }

    pub(crate) fn actor(&self) -> ActorId {
        self.actor
    }

    pub(crate) fn can_jump(&self) -> bool {
        self.grounded
            || (self.coyote_eligible && self.frames_spent_falling < self.coyote_frames)
    }

    /// One controller tick. Step order is load-bearing: the anti-slide check
    /// reads the velocity used for this tick's move, and jump eligibility reads
    /// the grounded state left by the previous tick.
    pub(crate) fn update(&mut self, input: &InputSnapshot, world: &mut SceneWorld) {
        let axis = f32::from(input.horizontal_axis());

        self.ax = self.speed * axis;
        self.vx = clamp(self.vx + self.ax, -self.top_speed, self.top_speed);
        world.move_actor_x(self.actor, self.vx.round() as i16);

        // Turning around or releasing drops horizontal speed immediately.
        if sign(self.vx) != sign(axis) || axis == 0.0 {
            self.vx = 0.0;
        }

        if input.jump_pressed() && self.can_jump() {
            self.coyote_eligible = false;
            self.vy = -self.jump_speed;
        }

        self.vy += self.ay;
        if let Some(actor) = world.actor_mut(self.actor) {
            actor.riding = None;
        }
        self.grounded = world.move_actor_y(self.actor, self.vy.round() as i16);

        if self.grounded {
            self.vy = 0.0;
            self.coyote_eligible = true;
            self.frames_spent_falling = 0;
        } else {
            self.frames_spent_falling = self.frames_spent_falling.saturating_add(1);
        }
    }
}
