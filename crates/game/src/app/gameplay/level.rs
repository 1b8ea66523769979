use engine::{Aabb, ActorId, Axis, SceneWorld, SolidId};

use super::movers::ScriptedMover;

#[derive(Debug, Clone, Copy)]
pub(crate) struct MoverDesc {
    pub(crate) solid_index: usize,
    pub(crate) axis: Axis,
    pub(crate) min: u16,
    pub(crate) max: u16,
    pub(crate) initial_direction: i16,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LevelDesc {
    pub(crate) solids: &'static [Aabb],
    pub(crate) movers: &'static [MoverDesc],
    pub(crate) player: Aabb,
}

pub(crate) const DEFAULT_LEVEL: LevelDesc = LevelDesc {
    solids: &[
        Aabb::new(100, 400, 600, 10),
        Aabb::new(100, 300, 10, 100),
        Aabb::new(300, 350, 200, 10),
        Aabb::new(300, 350, 100, 10),
        Aabb::new(400, 300, 50, 10),
    ],
    movers: &[
        MoverDesc {
            solid_index: 3,
            axis: Axis::Y,
            min: 275,
            max: 375,
            initial_direction: 1,
        },
        MoverDesc {
            solid_index: 4,
            axis: Axis::X,
            min: 375,
            max: 475,
            initial_direction: 1,
        },
    ],
    player: Aabb::new(400, 300, 10, 10),
};

pub(crate) struct SpawnedLevel {
    pub(crate) player_actor: ActorId,
    pub(crate) movers: Vec<ScriptedMover>,
}

/// Queues every solid and the player actor. Handles are valid once the
/// world applies its pending spawns.
pub(crate) fn spawn_level(level: &LevelDesc, world: &mut SceneWorld) -> SpawnedLevel {
    let solids: Vec<SolidId> = level
        .solids
        .iter()
        .map(|bounds| world.spawn_solid(*bounds))
        .collect();
    let player_actor = world.spawn_actor(level.player);
    let movers = level
        .movers
        .iter()
        .filter_map(|desc| {
            let solid = solids.get(desc.solid_index).copied()?;
            Some(ScriptedMover::new(
                solid,
                desc.axis,
                desc.min,
                desc.max,
                desc.initial_direction,
            ))
        })
        .collect();

    SpawnedLevel {
        player_actor,
        movers,
    }
}
