// Playable level: terrain tiles, the player body and the per-frame order

use glam::Vec2;

use super::characters::{
    CharacterStats, GroundContactResolver, PlayerController, PlayerState,
};
use crate::engine::input::InputFacts;
use crate::engine::notify::TickNotifier;
use crate::engine::physics::{
    presets, ColliderHandle, PhysicsWorld, RigidBodyHandle,
};
use crate::engine::state_machine::StateMachineError;

/// Edge length of a terrain tile in world units
pub const TILE_SIZE: f32 = 16.0;

/// One playable level. Created when the level starts, dropped when it ends.
pub struct Level {
    physics: PhysicsWorld,
    controller: PlayerController,
    resolver: GroundContactResolver,
    player_body: RigidBodyHandle,
}

impl Level {
    /// Spawn the player with its centre at `spawn`
    pub fn new(
        spawn: Vec2,
        stats: CharacterStats,
        notifier: Box<dyn TickNotifier>,
    ) -> Result<Self, StateMachineError> {
        let mut physics = PhysicsWorld::new();

        let player_body = physics.add_rigid_body(presets::player_body(spawn.x, spawn.y));
        let player_collider =
            physics.add_collider(presets::player_collider(stats.width, stats.height), player_body);

        let resolver = GroundContactResolver::new(player_collider);
        let controller = PlayerController::new(stats, notifier)?;

        log::info!("Level started, player spawned at ({}, {})", spawn.x, spawn.y);

        Ok(Self {
            physics,
            controller,
            resolver,
            player_body,
        })
    }

    /// Add a solid tile at grid cell (`col`, `row`); row 0 is the top
    pub fn add_solid_tile(&mut self, col: i32, row: i32) -> ColliderHandle {
        let centre = Self::tile_centre(col, row);
        let body = self.physics.add_rigid_body(presets::tile_body(centre.x, centre.y));
        let collider = self.physics.add_collider(presets::tile_collider(TILE_SIZE), body);
        self.resolver.add_terrain(collider);
        collider
    }

    /// Add a horizontal run of solid tiles on `row`
    pub fn add_ground_strip(&mut self, row: i32, cols: std::ops::Range<i32>) {
        for col in cols {
            self.add_solid_tile(col, row);
        }
    }

    /// World position of a tile's centre
    pub fn tile_centre(col: i32, row: i32) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * TILE_SIZE,
            (row as f32 + 0.5) * TILE_SIZE,
        )
    }

    /// Advance the level by one rendered frame.
    ///
    /// Physics integrates last frame's commands and reports contacts; the
    /// contacts reach the controller before its state update runs; the new
    /// commands are then written back into the body for the next step.
    pub fn tick(
        &mut self,
        time_ms: f64,
        elapsed_ms: f32,
        input: InputFacts,
    ) -> Result<(), StateMachineError> {
        self.physics.step(elapsed_ms / 1000.0);

        if let Some(body) = self.physics.get_rigid_body(self.player_body) {
            let velocity = body.linvel();
            self.controller
                .character_mut()
                .sync_velocity(Vec2::new(velocity.x, velocity.y));
        }

        let events = self.physics.collision_events();
        for contact in self.resolver.resolve(&events, &self.physics) {
            self.controller.queue_ground_contact(contact);
        }

        self.controller.tick(time_ms, elapsed_ms, input)?;

        let command = self.controller.take_motion_command();
        if !command.is_empty() {
            self.physics
                .set_linvel_axes(self.player_body, command.x, command.y);
        }

        Ok(())
    }

    /// Centre of the player's body
    pub fn player_position(&self) -> Option<Vec2> {
        self.physics.get_rigid_body(self.player_body).map(|body| {
            let pos = body.translation();
            Vec2::new(pos.x, pos.y)
        })
    }

    pub fn player_state(&self) -> PlayerState {
        self.controller.state()
    }

    pub fn controller(&self) -> &PlayerController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PlayerController {
        &mut self.controller
    }
}
