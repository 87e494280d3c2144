//! The player-controlled actor: movement, facing, and target acquisition.
//!
//! Collision resolution and the station raycast are external capabilities
//! behind [`CollisionWorld`]; the actor only decides what to ask and how to
//! fall back when a move is blocked.

use crate::fixed::{Fixed64, Seconds};
use crate::holder::Holder;
use crate::id::{ItemId, StationId};
use crate::vec2::Vec2;

/// What a target-acquisition ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayTarget {
    /// A station on the counters layer.
    Station(StationId),
    /// Something that is not a station (selection clears).
    Blocked,
}

/// External physics capability. The host supplies the real implementation;
/// tests use scripted stand-ins.
pub trait CollisionWorld {
    /// Capsule-sweep from `from` along `dir` (unit vector) for `distance`.
    /// Returns true when the move is blocked.
    fn sweep_blocked(&self, from: Vec2, dir: Vec2, distance: Fixed64) -> bool;

    /// Ray cast against the counters layer from `from` along `dir` (unit
    /// vector), up to `max_distance`. `None` when nothing is hit.
    fn raycast(&self, from: Vec2, dir: Vec2, max_distance: Fixed64) -> Option<RayTarget>;
}

/// Movement and targeting tuning. Loaded from config; defaults match the
/// reference kitchen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorTuning {
    /// Units per second.
    pub move_speed: Fixed64,
    /// Facing interpolation rate per second (cosmetic).
    pub turn_rate: Fixed64,
    /// Target-acquisition ray length.
    pub reach: Fixed64,
    /// Minimum axis component magnitude for the axis-isolated move fallback.
    pub axis_deadzone: Fixed64,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            move_speed: Fixed64::from_num(7),
            turn_rate: Fixed64::from_num(13),
            reach: Fixed64::from_num(2),
            axis_deadzone: Fixed64::from_num(0.5),
        }
    }
}

/// The player-controlled holder.
#[derive(Debug)]
pub struct Actor {
    position: Vec2,
    /// Last non-zero movement direction; drives target acquisition even
    /// while stationary.
    aim: Vec2,
    /// Smoothed display facing. Cosmetic only; gameplay reads `aim`.
    facing: Vec2,
    /// Raw input axis, sampled by the host each frame.
    move_axis: Vec2,
    moving: bool,
    held: Option<ItemId>,
    selected: Option<StationId>,
    tuning: ActorTuning,
}

impl Actor {
    pub fn new(tuning: ActorTuning) -> Self {
        Self {
            position: Vec2::ZERO,
            aim: Vec2::from_f64(0.0, 1.0),
            facing: Vec2::from_f64(0.0, 1.0),
            move_axis: Vec2::ZERO,
            moving: false,
            held: None,
            selected: None,
            tuning,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn aim(&self) -> Vec2 {
        self.aim
    }

    /// Whether movement input was non-zero on the last update (the walking
    /// animation plays even when pushing into a wall).
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn selected(&self) -> Option<StationId> {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: Option<StationId>) {
        self.selected = selected;
    }

    pub fn move_axis(&self) -> Vec2 {
        self.move_axis
    }

    /// Sample the raw 2-axis movement input. Normalized internally on use.
    pub fn set_move_axis(&mut self, axis: Vec2) {
        self.move_axis = axis;
    }

    pub fn tuning(&self) -> &ActorTuning {
        &self.tuning
    }

    /// Advance movement by `dt`: normalize the input axis, try the full
    /// move, fall back to axis-isolated X then Z moves when blocked, and
    /// interpolate the display facing.
    pub fn advance_movement(&mut self, dt: Seconds, world: &dyn CollisionWorld) {
        let dir = self.move_axis.normalized();

        if !dir.is_zero() {
            self.aim = dir;
        }
        self.moving = !dir.is_zero();

        if !dir.is_zero() {
            let distance = self.tuning.move_speed * dt;
            let mut move_dir = dir;
            let mut can_move = !world.sweep_blocked(self.position, move_dir, distance);

            if !can_move {
                // Attempt X-only movement.
                let dir_x = Vec2::new(dir.x, Fixed64::ZERO).normalized();
                if dir.x.abs() > self.tuning.axis_deadzone
                    && !world.sweep_blocked(self.position, dir_x, distance)
                {
                    move_dir = dir_x;
                    can_move = true;
                } else {
                    // Attempt Z-only movement.
                    let dir_z = Vec2::new(Fixed64::ZERO, dir.z).normalized();
                    if dir.z.abs() > self.tuning.axis_deadzone
                        && !world.sweep_blocked(self.position, dir_z, distance)
                    {
                        move_dir = dir_z;
                        can_move = true;
                    }
                }
            }

            if can_move {
                self.position += move_dir * distance;
            }

            self.facing = self
                .facing
                .turned_toward(move_dir, self.tuning.turn_rate * dt);
        }
    }

    /// Cast the target-acquisition ray along the aim direction. Returns the
    /// station that should be selected, or `None` when the ray misses or
    /// hits a non-station.
    pub fn acquire_target(&self, world: &dyn CollisionWorld) -> Option<StationId> {
        match world.raycast(self.position, self.aim, self.tuning.reach) {
            Some(RayTarget::Station(id)) => Some(id),
            Some(RayTarget::Blocked) | None => None,
        }
    }
}

impl Holder for Actor {
    fn held_item(&self) -> Option<ItemId> {
        self.held
    }

    fn set_held_item(&mut self, item: Option<ItemId>) {
        self.held = item;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fx(v: f64) -> Fixed64 {
        Fixed64::from_num(v)
    }

    /// A world with nothing in it: moves always succeed, rays never hit.
    struct OpenFloor;

    impl CollisionWorld for OpenFloor {
        fn sweep_blocked(&self, _from: Vec2, _dir: Vec2, _distance: Fixed64) -> bool {
            false
        }
        fn raycast(&self, _from: Vec2, _dir: Vec2, _max: Fixed64) -> Option<RayTarget> {
            None
        }
    }

    /// Blocks full-direction moves; allows axis-isolated ones.
    struct Walled;

    impl CollisionWorld for Walled {
        fn sweep_blocked(&self, _from: Vec2, dir: Vec2, _distance: Fixed64) -> bool {
            // Diagonal moves are blocked; pure-axis moves are free.
            dir.x != Fixed64::ZERO && dir.z != Fixed64::ZERO
        }
        fn raycast(&self, _from: Vec2, _dir: Vec2, _max: Fixed64) -> Option<RayTarget> {
            None
        }
    }

    /// Blocks everything.
    struct Boxed;

    impl CollisionWorld for Boxed {
        fn sweep_blocked(&self, _from: Vec2, _dir: Vec2, _distance: Fixed64) -> bool {
            true
        }
        fn raycast(&self, _from: Vec2, _dir: Vec2, _max: Fixed64) -> Option<RayTarget> {
            None
        }
    }

    #[test]
    fn moves_at_speed_times_dt() {
        let mut actor = Actor::new(ActorTuning::default());
        actor.set_move_axis(Vec2::from_f64(1.0, 0.0));
        actor.advance_movement(fx(0.5), &OpenFloor);
        assert_eq!(actor.position(), Vec2::from_f64(3.5, 0.0));
        assert!(actor.is_moving());
    }

    #[test]
    fn input_axis_is_normalized() {
        let mut actor = Actor::new(ActorTuning::default());
        // Oversized diagonal input still moves at move_speed.
        actor.set_move_axis(Vec2::from_f64(10.0, 0.0));
        actor.advance_movement(fx(1.0), &OpenFloor);
        assert_eq!(actor.position(), Vec2::from_f64(7.0, 0.0));
    }

    #[test]
    fn zero_input_is_stationary() {
        let mut actor = Actor::new(ActorTuning::default());
        actor.advance_movement(fx(1.0), &OpenFloor);
        assert_eq!(actor.position(), Vec2::ZERO);
        assert!(!actor.is_moving());
    }

    #[test]
    fn blocked_diagonal_slides_along_x() {
        let mut actor = Actor::new(ActorTuning::default());
        actor.set_move_axis(Vec2::from_f64(1.0, 1.0));
        actor.advance_movement(fx(1.0), &Walled);

        // X component of the normalized diagonal exceeds the deadzone, so
        // the actor slides along X at full speed.
        assert_eq!(actor.position(), Vec2::from_f64(7.0, 0.0));
        assert!(actor.is_moving());
    }

    #[test]
    fn blocked_diagonal_below_deadzone_tries_z() {
        let mut actor = Actor::new(ActorTuning::default());
        // Mostly-Z input: normalized x component is under 0.5.
        actor.set_move_axis(Vec2::from_f64(0.2, 1.0));
        actor.advance_movement(fx(1.0), &Walled);

        assert_eq!(actor.position(), Vec2::from_f64(0.0, 7.0));
    }

    #[test]
    fn fully_blocked_stays_put_but_is_moving() {
        let mut actor = Actor::new(ActorTuning::default());
        actor.set_move_axis(Vec2::from_f64(1.0, 0.0));
        actor.advance_movement(fx(1.0), &Boxed);

        assert_eq!(actor.position(), Vec2::ZERO);
        // Input was non-zero; the walk animation still plays.
        assert!(actor.is_moving());
    }

    #[test]
    fn aim_remembers_last_direction() {
        let mut actor = Actor::new(ActorTuning::default());
        actor.set_move_axis(Vec2::from_f64(1.0, 0.0));
        actor.advance_movement(fx(1.0), &OpenFloor);
        assert_eq!(actor.aim(), Vec2::from_f64(1.0, 0.0));

        // Releasing the stick keeps the aim.
        actor.set_move_axis(Vec2::ZERO);
        actor.advance_movement(fx(1.0), &OpenFloor);
        assert_eq!(actor.aim(), Vec2::from_f64(1.0, 0.0));
    }

    #[test]
    fn facing_converges_to_move_direction() {
        let mut actor = Actor::new(ActorTuning::default());
        actor.set_move_axis(Vec2::from_f64(1.0, 0.0));
        for _ in 0..200 {
            actor.advance_movement(fx(0.016), &OpenFloor);
        }
        assert!((actor.facing().x - Fixed64::ONE).abs() < fx(1e-3));
        assert!(actor.facing().z.abs() < fx(1e-3));
    }

    #[test]
    fn target_acquisition_uses_aim() {
        struct HitWhenAimingX(StationId);
        impl CollisionWorld for HitWhenAimingX {
            fn sweep_blocked(&self, _: Vec2, _: Vec2, _: Fixed64) -> bool {
                false
            }
            fn raycast(&self, _from: Vec2, dir: Vec2, _max: Fixed64) -> Option<RayTarget> {
                if dir.x > Fixed64::ZERO {
                    Some(RayTarget::Station(self.0))
                } else {
                    None
                }
            }
        }

        let id = {
            let mut sm = slotmap::SlotMap::<StationId, ()>::with_key();
            sm.insert(())
        };
        let world = HitWhenAimingX(id);
        let mut actor = Actor::new(ActorTuning::default());

        // Default aim is +z: no hit.
        assert_eq!(actor.acquire_target(&world), None);

        actor.set_move_axis(Vec2::from_f64(1.0, 0.0));
        actor.advance_movement(fx(0.1), &world);
        assert_eq!(actor.acquire_target(&world), Some(id));
    }

    #[test]
    fn non_station_hit_clears_selection() {
        struct HitsWall;
        impl CollisionWorld for HitsWall {
            fn sweep_blocked(&self, _: Vec2, _: Vec2, _: Fixed64) -> bool {
                false
            }
            fn raycast(&self, _: Vec2, _: Vec2, _: Fixed64) -> Option<RayTarget> {
                Some(RayTarget::Blocked)
            }
        }

        let actor = Actor::new(ActorTuning::default());
        assert_eq!(actor.acquire_target(&HitsWall), None);
    }
}
