use engine::{Axis, SceneWorld, SolidId, SolidMoveOutcome};

/// Ping-pongs a solid one pixel per tick between `min` and `max` on one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScriptedMover {
    solid: SolidId,
    axis: Axis,
    min: u16,
    max: u16,
    direction: i16,
}

impl ScriptedMover {
    pub(crate) fn new(solid: SolidId, axis: Axis, min: u16, max: u16, direction: i16) -> Self {
        Self {
            solid,
            axis,
            min: min.min(max),
            max: max.max(min),
            direction: if direction < 0 { -1 } else { 1 },
        }
    }

    #[cfg(test)]
    pub(crate) fn direction(&self) -> i16 {
        self.direction
    }

    pub(crate) fn step(&mut self, world: &mut SceneWorld) -> SolidMoveOutcome {
        let Some(solid) = world.solid(self.solid) else {
            return SolidMoveOutcome::default();
        };

        let coord = solid.bounds.coord(self.axis);
        if self.direction > 0 && coord >= self.max {
            self.direction = -1;
        } else if self.direction < 0 && coord <= self.min {
            self.direction = 1;
        }

        match self.axis {
            Axis::X => world.move_solid(self.solid, self.direction, 0),
            Axis::Y => world.move_solid(self.solid, 0, self.direction),
        }
    }
}
