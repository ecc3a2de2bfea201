use glam::Vec3;
use voxelsand_core::constants::*;
use voxelsand_core::{Aabb, CollisionClass, WorldConfig};

use crate::collision::CollisionIndex;

/// Tunables for the first-person character, all in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// Horizontal speed, units per second.
    pub speed: f32,
    /// Downward acceleration (negative).
    pub gravity: f32,
    /// Acceleration used while the next step ends inside liquid.
    pub liquid_gravity: f32,
    pub jump_velocity: f32,
    /// Probe box dimensions (footprint and height).
    pub probe_size: Vec3,
    /// Vertical lift applied to every probe so standing on a surface is not
    /// reported as a hit.
    pub bandwidth: f32,
    /// Collision neighborhood radius, in cells.
    pub query_radius: i32,
    /// Exclusive horizontal limits `(min, max)` on X and Z.
    pub bounds: (f32, f32),
}

impl MovementConfig {
    /// Derive the movement model from a world config, for a play area of
    /// `half_extent` cells on each side of the origin.
    pub fn from_world(config: &WorldConfig, half_extent: i32) -> Self {
        let s = config.voxel_size;
        let gravity = GRAVITY_VOXELS * s;
        let [w, h, d] = CHARACTER_SIZE_VOXELS;
        Self {
            speed: MOVE_SPEED_VOXELS * s,
            gravity,
            liquid_gravity: gravity / LIQUID_GRAVITY_DIVISOR,
            jump_velocity: JUMP_VELOCITY_VOXELS * s,
            probe_size: Vec3::new(w, h, d) * s,
            bandwidth: PROBE_BANDWIDTH,
            query_radius: config.collision_query_radius,
            bounds: config.terrain_transform().play_area_bounds(half_extent),
        }
    }
}

/// Character state driven by per-frame movement steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub position: Vec3,
    pub velocity_y: f32,
    pub can_jump: bool,
    pub config: MovementConfig,
}

impl Character {
    pub fn new(position: Vec3, config: MovementConfig) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            can_jump: true,
            config,
        }
    }

    /// Probe box centered on the position reached after `offset`, lifted by
    /// the bandwidth.
    pub fn probe_box(&self, offset: Vec3) -> Aabb {
        let center = self.position + offset + Vec3::Y * self.config.bandwidth;
        Aabb::from_center_size(center, self.config.probe_size)
    }

    /// Whether a horizontal displacement would hit a solid box or leave the
    /// play area.
    pub fn horizontal_blocked(&self, index: &CollisionIndex, displacement: Vec3) -> bool {
        let displacement = Vec3::new(displacement.x, 0.0, displacement.z);
        let probe = self.probe_box(displacement);
        if index.intersects_any(
            &probe,
            self.position,
            self.config.query_radius,
            CollisionClass::Solid,
        ) {
            return true;
        }

        let future = self.position + displacement;
        let (min, max) = self.config.bounds;
        future.x <= min || future.x >= max || future.z <= min || future.z >= max
    }

    /// Commit a horizontal displacement unless blocked. Returns whether the
    /// character moved.
    pub fn try_move_horizontal(&mut self, index: &CollisionIndex, displacement: Vec3) -> bool {
        if self.horizontal_blocked(index, displacement) {
            return false;
        }
        self.position.x += displacement.x;
        self.position.z += displacement.z;
        true
    }

    /// Move along X and Z independently, so a blocked axis does not stop
    /// the other one and the character slides along walls. Returns whether
    /// either axis moved.
    pub fn slide_horizontal(&mut self, index: &CollisionIndex, displacement: Vec3) -> bool {
        let moved_x = displacement.x != 0.0
            && self.try_move_horizontal(index, Vec3::new(displacement.x, 0.0, 0.0));
        let moved_z = displacement.z != 0.0
            && self.try_move_horizontal(index, Vec3::new(0.0, 0.0, displacement.z));
        moved_x || moved_z
    }

    /// Start a jump if grounded.
    pub fn jump(&mut self) -> bool {
        if !self.can_jump {
            return false;
        }
        self.velocity_y = self.config.jump_velocity;
        self.can_jump = false;
        true
    }

    /// Advance vertical motion by `dt` seconds.
    ///
    /// The step is first computed with full gravity. If that step ends in
    /// liquid, velocity is recomputed with the reduced liquid gravity. A
    /// solid hit cancels the step, zeroes velocity and re-enables jumping.
    pub fn step_vertical(&mut self, index: &CollisionIndex, dt: f32) {
        let radius = self.config.query_radius;
        let altered = self.velocity_y + self.config.gravity * dt;
        let liquid_probe = self.probe_box(Vec3::Y * altered * dt);

        self.velocity_y = if index.intersects_any(
            &liquid_probe,
            self.position,
            radius,
            CollisionClass::Liquid,
        ) {
            self.velocity_y + self.config.liquid_gravity * dt
        } else {
            altered
        };

        let distance = self.velocity_y * dt;
        let solid_probe = self.probe_box(Vec3::Y * distance);
        if index.intersects_any(&solid_probe, self.position, radius, CollisionClass::Solid) {
            self.velocity_y = 0.0;
            self.can_jump = true;
        } else {
            self.position.y += distance;
        }
    }
}
