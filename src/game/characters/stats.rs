// Character stats - movement tuning for the player

/// Horizontal speed while running on the ground (units/second)
pub const RUN_SPEED: f32 = 200.0;

/// Horizontal speed while rising from a jump (units/second)
pub const JUMP_AIR_SPEED: f32 = 175.0;

/// Horizontal speed while falling (units/second)
pub const FALL_AIR_SPEED: f32 = 200.0;

/// Upward speed given at the start of a jump (units/second)
pub const JUMP_IMPULSE: f32 = 500.0;

/// Movement tuning and collider dimensions for the player character.
///
/// Every value can be overridden on its own; the defaults come from
/// [`BASE_STATS`].
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterStats {
    // Movement
    /// Ground speed (units/second)
    pub run_speed: f32,
    /// Air control speed while in the `jump` state
    pub jump_air_speed: f32,
    /// Air control speed while in the `fall` state
    pub fall_air_speed: f32,
    /// Upward launch speed of a jump
    pub jump_impulse: f32,

    // Dimensions (for physics collider)
    /// Character width in world units
    pub width: f32,
    /// Character height in world units
    pub height: f32,
}

pub const BASE_STATS: CharacterStats = CharacterStats {
    run_speed: RUN_SPEED,
    jump_air_speed: JUMP_AIR_SPEED,
    fall_air_speed: FALL_AIR_SPEED,
    jump_impulse: JUMP_IMPULSE,

    // Slightly narrower than the 32px sprite frame so it fits 2-tile gaps
    width: 20.0,
    height: 28.0,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    pub fn with_run_speed(mut self, speed: f32) -> Self {
        self.run_speed = speed;
        self
    }

    pub fn with_air_speeds(mut self, jump: f32, fall: f32) -> Self {
        self.jump_air_speed = jump;
        self.fall_air_speed = fall;
        self
    }

    pub fn with_jump_impulse(mut self, impulse: f32) -> Self {
        self.jump_impulse = impulse;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = CharacterStats::default();
        assert_eq!(stats.run_speed, RUN_SPEED);
        assert_eq!(stats.jump_impulse, JUMP_IMPULSE);
        assert_eq!((stats.width, stats.height), (20.0, 28.0));
    }

    #[test]
    fn test_air_control_is_heavier_while_rising() {
        let stats = CharacterStats::default();
        assert!(stats.jump_air_speed < stats.run_speed);
    }

    #[test]
    fn test_overrides_are_independent() {
        let stats = CharacterStats::default()
            .with_run_speed(120.0)
            .with_jump_impulse(300.0);

        assert_eq!(stats.run_speed, 120.0);
        assert_eq!(stats.jump_impulse, 300.0);
        assert_eq!(stats.jump_air_speed, JUMP_AIR_SPEED);
        assert_eq!(stats.fall_air_speed, FALL_AIR_SPEED);
    }
}
