use super::collision::{self, SolidMoveOutcome};
use super::geometry::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SolidId(pub u32);

impl ActorId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl SolidId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Solid {
    pub bounds: Aabb,
    pub collidable: bool,
}

impl Solid {
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            collidable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub bounds: Aabb,
    /// Solid currently supporting this actor from below. Only a handle; the
    /// solid is owned by the world and the handle is dropped with it on clear.
    pub riding: Option<SolidId>,
}

impl Actor {
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            riding: None,
        }
    }
}

/// Entity store for one level. Actors and solids live in append-only lists
/// addressed by index handles; spawns are queued until `apply_pending` so
/// handles and iteration order stay fixed while a tick resolves collisions.
#[derive(Debug, Default)]
pub struct SceneWorld {
    actors: Vec<Actor>,
    solids: Vec<Solid>,
    pending_actors: Vec<Actor>,
    pending_solids: Vec<Solid>,
}

impl SceneWorld {
    pub fn spawn_actor(&mut self, bounds: Aabb) -> ActorId {
        let id = ActorId((self.actors.len() + self.pending_actors.len()) as u32);
        self.pending_actors.push(Actor::new(at_least_one_pixel(bounds)));
        id
    }

    pub fn spawn_solid(&mut self, bounds: Aabb) -> SolidId {
        let id = SolidId((self.solids.len() + self.pending_solids.len()) as u32);
        self.pending_solids.push(Solid::new(at_least_one_pixel(bounds)));
        id
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_solids.is_empty() {
            self.solids.append(&mut self.pending_solids);
        }
        if !self.pending_actors.is_empty() {
            self.actors.append(&mut self.pending_actors);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.index())
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.index())
    }

    pub fn solid(&self, id: SolidId) -> Option<&Solid> {
        self.solids.get(id.index())
    }

    pub fn solid_mut(&mut self, id: SolidId) -> Option<&mut Solid> {
        self.solids.get_mut(id.index())
    }

    pub fn move_actor_x(&mut self, id: ActorId, dx: i16) -> bool {
        match self.actors.get_mut(id.index()) {
            Some(actor) => collision::move_actor_x(actor, dx, &self.solids),
            None => false,
        }
    }

    pub fn move_actor_y(&mut self, id: ActorId, dy: i16) -> bool {
        match self.actors.get_mut(id.index()) {
            Some(actor) => collision::move_actor_y(actor, dy, &self.solids),
            None => false,
        }
    }

    pub fn move_solid(&mut self, id: SolidId, dx: i16, dy: i16) -> SolidMoveOutcome {
        collision::move_solid(id, dx, dy, &mut self.solids, &mut self.actors)
    }
}

fn at_least_one_pixel(bounds: Aabb) -> Aabb {
    Aabb::new(bounds.x, bounds.y, bounds.width, bounds.height)
}
