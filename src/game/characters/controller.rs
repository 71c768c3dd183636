// Player controller - drives the state chart once per frame

use std::collections::VecDeque;

use super::character::{Character, MotionCommand};
use super::ground::GroundContact;
use super::state::{build_state_machine, PlayerState, PlayerStateMachine};
use super::stats::CharacterStats;
use crate::engine::input::InputFacts;
use crate::engine::notify::TickNotifier;
use crate::engine::state_machine::StateMachineError;

/// Owns the player's state machine, its character context, and the queue of
/// ground contacts waiting for the next tick.
///
/// Each tick runs in a fixed order: queued ground contacts first, then the
/// active state's update, then the timestamp notification. A landing
/// therefore always wins over the update logic of the state it interrupts.
pub struct PlayerController {
    machine: PlayerStateMachine,
    character: Character,
    contacts: VecDeque<GroundContact>,
    notifier: Box<dyn TickNotifier>,
}

impl PlayerController {
    /// Build the state chart and enter `idle`. The character is not
    /// grounded until its first landing.
    pub fn new(
        stats: CharacterStats,
        notifier: Box<dyn TickNotifier>,
    ) -> Result<Self, StateMachineError> {
        let mut controller = Self {
            machine: build_state_machine(),
            character: Character::new(stats),
            contacts: VecDeque::new(),
            notifier,
        };
        controller.force_state(PlayerState::Idle)?;
        Ok(controller)
    }

    /// Queue a ground contact for the next tick
    pub fn queue_ground_contact(&mut self, contact: GroundContact) {
        self.contacts.push_back(contact);
    }

    /// Apply the landing rule: the first floor contact while not grounded
    /// forces `idle` and marks the character grounded. Returns whether a
    /// landing happened.
    pub fn land(&mut self, on_floor: bool) -> Result<bool, StateMachineError> {
        if self.character.is_grounded() || !on_floor {
            return Ok(false);
        }

        let from = self.state();
        // Leaving `jump` clears grounded, so the transition goes first and
        // the flag is written once afterwards.
        self.machine
            .set_state(PlayerState::Idle, &mut self.character)?;
        self.character.set_grounded(true);

        log::debug!("Landed while in {:?}", from);
        Ok(true)
    }

    /// Advance one frame
    pub fn tick(
        &mut self,
        time_ms: f64,
        elapsed_ms: f32,
        input: InputFacts,
    ) -> Result<(), StateMachineError> {
        while let Some(contact) = self.contacts.pop_front() {
            self.land(contact.on_floor)?;
        }

        self.character.set_input(input);
        self.machine.update(elapsed_ms, &mut self.character)?;
        self.character.animation.update(elapsed_ms / 1000.0);

        log::trace!(
            "tick {:.1}ms: {:?} grounded={} velocity={:?}",
            time_ms,
            self.state(),
            self.character.is_grounded(),
            self.character.velocity()
        );

        self.notifier.time_changed(time_ms);
        Ok(())
    }

    /// Switch state from outside the chart (e.g. `fall` after a mid-air respawn)
    pub fn force_state(&mut self, state: PlayerState) -> Result<(), StateMachineError> {
        self.machine.set_state(state, &mut self.character)
    }

    /// The active state
    pub fn state(&self) -> PlayerState {
        self.machine.current().unwrap_or_default()
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    /// Take the velocity components commanded since the last call
    pub fn take_motion_command(&mut self) -> MotionCommand {
        self.character.take_motion_command()
    }

    /// Ground contacts waiting for the next tick
    pub fn pending_contacts(&self) -> usize {
        self.contacts.len()
    }
}
