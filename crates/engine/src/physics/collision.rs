use tracing::warn;

use super::geometry::{overlaps, Aabb, Axis};
use super::world::{Actor, ActorId, Solid, SolidId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Squish {
    pub actor: ActorId,
    pub solid: SolidId,
    pub axis: Axis,
}

/// Result of one `move_solid` call. Squishes are reported, never resolved:
/// the actor is left wherever the blocked push stopped it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolidMoveOutcome {
    pub squished: Vec<Squish>,
}

pub fn move_actor_x(actor: &mut Actor, dx: i16, solids: &[Solid]) -> bool {
    step_actor(actor, Axis::X, dx, solids).is_some()
}

/// Moving down into a solid records it as the actor's `riding` support.
pub fn move_actor_y(actor: &mut Actor, dy: i16, solids: &[Solid]) -> bool {
    match step_actor(actor, Axis::Y, dy, solids) {
        Some(blocker) => {
            if dy > 0 {
                actor.riding = Some(blocker);
            }
            true
        }
        None => false,
    }
}

fn move_actor_along(actor: &mut Actor, axis: Axis, delta: i16, solids: &[Solid]) -> bool {
    match axis {
        Axis::X => move_actor_x(actor, delta, solids),
        Axis::Y => move_actor_y(actor, delta, solids),
    }
}

// One pixel at a time; the first blocked pixel is undone and ends the move.
fn step_actor(actor: &mut Actor, axis: Axis, delta: i16, solids: &[Solid]) -> Option<SolidId> {
    if delta == 0 {
        return None;
    }

    let step: i16 = if delta < 0 { -1 } else { 1 };
    for _ in 0..delta.unsigned_abs() {
        actor.bounds.translate(axis, step);
        if let Some(blocker) = first_blocking_solid(&actor.bounds, solids) {
            actor.bounds.translate(axis, -step);
            return Some(blocker);
        }
    }

    None
}

fn first_blocking_solid(bounds: &Aabb, solids: &[Solid]) -> Option<SolidId> {
    solids
        .iter()
        .position(|solid| solid.collidable && overlaps(bounds, &solid.bounds))
        .map(|index| SolidId(index as u32))
}

/// Moves a solid by the full delta, X pass then Y pass, pushing overlapped
/// actors out of its leading edge and carrying actors riding on it. Actors
/// are visited in store order.
pub fn move_solid(
    solid_id: SolidId,
    dx: i16,
    dy: i16,
    solids: &mut [Solid],
    actors: &mut [Actor],
) -> SolidMoveOutcome {
    let mut outcome = SolidMoveOutcome::default();
    let index = solid_id.index();
    if (dx == 0 && dy == 0) || index >= solids.len() {
        return outcome;
    }

    let was_collidable = solids[index].collidable;
    solids[index].collidable = false;

    for (axis, delta) in [(Axis::X, dx), (Axis::Y, dy)] {
        if delta == 0 {
            continue;
        }

        solids[index].bounds.translate(axis, delta);
        let solid_bounds = solids[index].bounds;

        for (actor_index, actor) in actors.iter_mut().enumerate() {
            if overlaps(&actor.bounds, &solid_bounds) {
                let push = push_distance(&actor.bounds, &solid_bounds, axis, delta);
                if move_actor_along(actor, axis, push, solids) {
                    let squish = Squish {
                        actor: ActorId(actor_index as u32),
                        solid: solid_id,
                        axis,
                    };
                    warn!(
                        actor = squish.actor.0,
                        solid = squish.solid.0,
                        axis = ?squish.axis,
                        x = actor.bounds.x,
                        y = actor.bounds.y,
                        "squish_unresolved"
                    );
                    outcome.squished.push(squish);
                }
            } else if actor.riding == Some(solid_id) {
                move_actor_along(actor, axis, delta, solids);
            }
        }
    }

    solids[index].collidable = was_collidable;
    outcome
}

// Signed distance that puts the actor flush against the solid's leading edge.
fn push_distance(actor: &Aabb, solid: &Aabb, axis: Axis, delta: i16) -> i16 {
    let actor_start = i32::from(actor.coord(axis));
    let actor_end = actor_start + i32::from(actor.extent(axis));
    let solid_start = i32::from(solid.coord(axis));
    let solid_end = solid_start + i32::from(solid.extent(axis));

    let distance = if delta > 0 {
        solid_end - actor_start
    } else {
        solid_start - actor_end
    };
    distance.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor_at(x: u16, y: u16) -> Actor {
        Actor::new(Aabb::new(x, y, 10, 10))
    }

    fn solid_at(x: u16, y: u16, width: u16, height: u16) -> Solid {
        Solid::new(Aabb::new(x, y, width, height))
    }

    #[test]
    fn zero_delta_is_noop() {
        let solids = [solid_at(0, 0, 50, 50), solid_at(100, 0, 10, 10)];
        let mut actor = actor_at(20, 20);

        assert!(!move_actor_x(&mut actor, 0, &solids));
        assert!(!move_actor_y(&mut actor, 0, &solids));
        assert_eq!(actor, actor_at(20, 20));
    }

    #[test]
    fn moving_exactly_to_edge_does_not_collide() {
        let solids = [solid_at(20, 0, 10, 10)];
        let mut actor = actor_at(0, 0);

        assert!(!move_actor_x(&mut actor, 10, &solids));
        assert_eq!(actor.bounds.x, 10);
    }

    #[test]
    fn one_pixel_past_edge_collides_and_ends_flush() {
        let solids = [solid_at(20, 0, 10, 10)];
        let mut actor = actor_at(0, 0);

        assert!(move_actor_x(&mut actor, 11, &solids));
        assert_eq!(actor.bounds.x, 10);
    }

    #[test]
    fn collision_stops_remaining_steps() {
        let solids = [solid_at(20, 0, 10, 10)];
        let mut actor = actor_at(0, 0);

        assert!(move_actor_x(&mut actor, 300, &solids));
        assert_eq!(actor.bounds.x, 10);
    }

    #[test]
    fn negative_moves_stop_flush_against_left_solid() {
        let solids = [solid_at(0, 0, 10, 10)];
        let mut actor = actor_at(30, 0);

        assert!(move_actor_x(&mut actor, -25, &solids));
        assert_eq!(actor.bounds.x, 10);
    }

    #[test]
    fn non_collidable_solids_are_ignored() {
        let mut wall = solid_at(20, 0, 10, 10);
        wall.collidable = false;
        let mut actor = actor_at(0, 0);

        assert!(!move_actor_x(&mut actor, 40, &[wall]));
        assert_eq!(actor.bounds.x, 40);
    }

    #[test]
    fn falling_onto_floor_lands_and_records_riding() {
        let solids = [solid_at(300, 0, 5, 5), solid_at(0, 400, 600, 10)];
        let mut actor = actor_at(100, 385);

        for expected_y in 386..=390 {
            assert!(!move_actor_y(&mut actor, 1, &solids));
            assert_eq!(actor.bounds.y, expected_y);
        }
        assert_eq!(actor.riding, None);

        assert!(move_actor_y(&mut actor, 1, &solids));
        assert_eq!(actor.bounds.y, 390);
        assert_eq!(actor.riding, Some(SolidId(1)));
    }

    #[test]
    fn head_bump_does_not_record_riding() {
        let solids = [solid_at(0, 0, 100, 10)];
        let mut actor = actor_at(20, 20);

        assert!(move_actor_y(&mut actor, -15, &solids));
        assert_eq!(actor.bounds.y, 10);
        assert_eq!(actor.riding, None);
    }

    #[test]
    fn riding_actor_is_carried_horizontally() {
        let mut solids = vec![solid_at(0, 100, 50, 10)];
        let mut actors = vec![Actor {
            bounds: Aabb::new(10, 90, 10, 10),
            riding: Some(SolidId(0)),
        }];

        let outcome = move_solid(SolidId(0), 3, 0, &mut solids, &mut actors);

        assert!(outcome.squished.is_empty());
        assert_eq!(solids[0].bounds.x, 3);
        assert_eq!(actors[0].bounds.x, 13);
        assert_eq!(actors[0].bounds.y, 90);
        assert_eq!(actors[0].riding, Some(SolidId(0)));
    }

    #[test]
    fn riding_actor_follows_descending_solid() {
        let mut solids = vec![solid_at(0, 100, 50, 10)];
        let mut actors = vec![Actor {
            bounds: Aabb::new(10, 90, 10, 10),
            riding: Some(SolidId(0)),
        }];

        move_solid(SolidId(0), 0, 2, &mut solids, &mut actors);

        assert_eq!(solids[0].bounds.y, 102);
        assert_eq!(actors[0].bounds.y, 92);
        assert_eq!(actors[0].riding, Some(SolidId(0)));
    }

    #[test]
    fn rising_solid_pushes_actor_on_top_upwards() {
        let mut solids = vec![solid_at(0, 100, 50, 10)];
        let mut actors = vec![actor_at(10, 90)];

        move_solid(SolidId(0), 0, -1, &mut solids, &mut actors);

        assert_eq!(solids[0].bounds.y, 99);
        assert_eq!(actors[0].bounds.y, 89);
    }

    #[test]
    fn non_riding_actor_beside_solid_is_not_carried() {
        let mut solids = vec![solid_at(0, 100, 50, 10)];
        let mut actors = vec![actor_at(200, 90)];

        move_solid(SolidId(0), 5, 0, &mut solids, &mut actors);

        assert_eq!(actors[0].bounds.x, 200);
    }

    #[test]
    fn overlapped_actor_is_pushed_flush_to_leading_edge() {
        let mut solids = vec![solid_at(0, 0, 10, 10)];
        let mut actors = vec![actor_at(12, 0)];

        let outcome = move_solid(SolidId(0), 5, 0, &mut solids, &mut actors);

        assert!(outcome.squished.is_empty());
        assert_eq!(solids[0].bounds.x, 5);
        assert_eq!(actors[0].bounds.x, 15);
    }

    #[test]
    fn leftward_push_places_actor_left_of_solid() {
        let mut solids = vec![solid_at(20, 0, 10, 10)];
        let mut actors = vec![actor_at(8, 0)];

        move_solid(SolidId(0), -5, 0, &mut solids, &mut actors);

        assert_eq!(solids[0].bounds.x, 15);
        assert_eq!(actors[0].bounds.x, 5);
    }

    #[test]
    fn blocked_push_is_reported_as_squish_and_left_unresolved() {
        let mut solids = vec![solid_at(0, 0, 10, 10), solid_at(22, 0, 10, 10)];
        let mut actors = vec![actor_at(12, 0)];

        let outcome = move_solid(SolidId(0), 5, 0, &mut solids, &mut actors);

        assert_eq!(
            outcome.squished,
            vec![Squish {
                actor: ActorId(0),
                solid: SolidId(0),
                axis: Axis::X,
            }]
        );
        assert_eq!(actors[0].bounds.x, 12);
        assert!(overlaps(&actors[0].bounds, &solids[0].bounds));
        assert!(solids[0].collidable);
    }

    #[test]
    fn moving_solid_restores_previous_collidable_flag() {
        let mut solids = vec![solid_at(0, 0, 10, 10)];
        solids[0].collidable = false;
        let mut actors = Vec::new();

        move_solid(SolidId(0), 1, 1, &mut solids, &mut actors);

        assert!(!solids[0].collidable);
        assert_eq!((solids[0].bounds.x, solids[0].bounds.y), (1, 1));
    }

    #[test]
    fn zero_solid_move_changes_nothing() {
        let mut solids = vec![solid_at(0, 0, 10, 10)];
        let mut actors = vec![actor_at(5, 5)];

        let outcome = move_solid(SolidId(0), 0, 0, &mut solids, &mut actors);

        assert!(outcome.squished.is_empty());
        assert_eq!(solids[0].bounds, Aabb::new(0, 0, 10, 10));
        assert_eq!(actors[0].bounds, Aabb::new(5, 5, 10, 10));
    }

    #[test]
    fn carried_actor_is_still_blocked_by_other_solids() {
        let mut solids = vec![solid_at(0, 100, 50, 10), solid_at(22, 85, 10, 10)];
        let mut actors = vec![Actor {
            bounds: Aabb::new(10, 90, 10, 10),
            riding: Some(SolidId(0)),
        }];

        move_solid(SolidId(0), 5, 0, &mut solids, &mut actors);

        assert_eq!(solids[0].bounds.x, 5);
        assert_eq!(actors[0].bounds.x, 12);
    }

    #[test]
    fn diagonal_move_resolves_x_pass_before_y_pass() {
        let mut solids = vec![solid_at(0, 0, 10, 10)];
        let mut actors = vec![actor_at(12, 0), actor_at(12, 12)];

        let outcome = move_solid(SolidId(0), 5, 5, &mut solids, &mut actors);

        assert!(outcome.squished.is_empty());
        assert_eq!(solids[0].bounds, Aabb::new(5, 5, 10, 10));
        // Overlapped by the X pass only.
        assert_eq!((actors[0].bounds.x, actors[0].bounds.y), (15, 0));
        // Clear of the X pass, overlapped once the Y pass lands.
        assert_eq!((actors[1].bounds.x, actors[1].bounds.y), (12, 15));
    }

    #[test]
    fn rising_solid_squishes_actor_against_ceiling() {
        let mut solids = vec![solid_at(0, 100, 50, 10), solid_at(0, 78, 50, 10)];
        let mut actors = vec![actor_at(10, 90)];

        let outcome = move_solid(SolidId(0), 0, -5, &mut solids, &mut actors);

        assert_eq!(
            outcome.squished,
            vec![Squish {
                actor: ActorId(0),
                solid: SolidId(0),
                axis: Axis::Y,
            }]
        );
        assert_eq!(solids[0].bounds.y, 95);
        assert_eq!(actors[0].bounds.y, 88);
        assert!(overlaps(&actors[0].bounds, &solids[0].bounds));
    }

    #[test]
    fn blocked_downward_carry_hands_riding_to_the_blocker() {
        let mut solids = vec![solid_at(0, 100, 15, 10), solid_at(15, 102, 50, 10)];
        let mut actors = vec![Actor {
            bounds: Aabb::new(10, 90, 10, 10),
            riding: Some(SolidId(0)),
        }];

        let outcome = move_solid(SolidId(0), 0, 5, &mut solids, &mut actors);

        assert!(outcome.squished.is_empty());
        assert_eq!(solids[0].bounds.y, 105);
        assert_eq!(actors[0].bounds.y, 92);
        assert_eq!(actors[0].riding, Some(SolidId(1)));
    }
}
