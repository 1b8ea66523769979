use super::input::{ActionStates, InputAction};
use crate::physics::{SceneWorld, SolidId};

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    quit_requested: bool,
    jump_pressed: bool,
    reset_pressed: bool,
    actions: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        quit_requested: bool,
        jump_pressed: bool,
        reset_pressed: bool,
        actions: ActionStates,
    ) -> Self {
        Self {
            quit_requested,
            jump_pressed,
            reset_pressed,
            actions,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// True only on the tick the jump key went down.
    pub fn jump_pressed(&self) -> bool {
        self.jump_pressed
    }

    pub fn reset_pressed(&self) -> bool {
        self.reset_pressed
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn horizontal_axis(&self) -> i8 {
        self.actions
            .axis(InputAction::MoveLeft, InputAction::MoveRight)
    }

    pub fn vertical_axis(&self) -> i8 {
        self.actions.axis(InputAction::MoveUp, InputAction::MoveDown)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_jump_pressed(mut self, jump_pressed: bool) -> Self {
        self.jump_pressed = jump_pressed;
        self
    }

    pub fn with_reset_pressed(mut self, reset_pressed: bool) -> Self {
        self.reset_pressed = reset_pressed;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosticsSnapshot {
    pub tick: u64,
    pub actor_position: (u16, u16),
    pub velocity: (f32, f32),
    pub acceleration: (f32, f32),
    pub riding: Option<SolidId>,
    pub grounded: bool,
    pub unresolved_squishes: u32,
}

pub trait Scene {
    fn load(&mut self, world: &mut SceneWorld);
    fn update(&mut self, input: &InputSnapshot, world: &mut SceneWorld);
    fn unload(&mut self, world: &mut SceneWorld);
    fn take_diagnostics(&mut self) -> Option<DiagnosticsSnapshot> {
        None
    }
}

pub(crate) struct SceneRuntime {
    scene: Box<dyn Scene>,
    world: SceneWorld,
    is_loaded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TickReport {
    pub(crate) reset: bool,
}

impl SceneRuntime {
    pub(crate) fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            world: SceneWorld::default(),
            is_loaded: false,
        }
    }

    pub(crate) fn load(&mut self) {
        if self.is_loaded {
            return;
        }
        self.scene.load(&mut self.world);
        self.world.apply_pending();
        self.is_loaded = true;
    }

    /// Runs one simulation tick. A reset edge rebuilds the world first so the
    /// tick simulates the fresh level. Spawns queued during the tick land
    /// after it completes.
    pub(crate) fn tick(&mut self, input: &InputSnapshot) -> TickReport {
        let reset = input.reset_pressed();
        if reset {
            self.hard_reset();
        } else {
            self.load();
        }

        self.scene.update(input, &mut self.world);
        self.world.apply_pending();
        TickReport { reset }
    }

    pub(crate) fn hard_reset(&mut self) {
        if self.is_loaded {
            self.scene.unload(&mut self.world);
        }
        self.world.clear();
        self.scene.load(&mut self.world);
        self.world.apply_pending();
        self.is_loaded = true;
    }

    pub(crate) fn shutdown(&mut self) {
        if self.is_loaded {
            self.scene.unload(&mut self.world);
            self.world.clear();
            self.is_loaded = false;
        }
    }

    pub(crate) fn take_diagnostics(&mut self) -> Option<DiagnosticsSnapshot> {
        self.scene.take_diagnostics()
    }

    pub(crate) fn world(&self) -> &SceneWorld {
        &self.world
    }
}
