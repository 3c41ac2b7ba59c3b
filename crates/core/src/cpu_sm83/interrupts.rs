//! Interrupt master enable (IME) state machine.

use serde::{Deserialize, Serialize};

use crate::logging::{log, LogCategory, LogLevel};

/// Address of the interrupt flag register (IF).
pub const IF_ADDR: u16 = 0xFF0F;
/// Address of the interrupt enable register (IE).
pub const IE_ADDR: u16 = 0xFFFF;
/// Only the low five bits of IE/IF name real interrupt sources.
pub const INTERRUPT_MASK: u8 = 0x1F;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterruptState {
    #[default]
    Disabled,
    /// EI has executed; IME turns on once the following instruction completes.
    Pending,
    Enabled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterruptController {
    state: InterruptState,
}

impl InterruptController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InterruptState {
        self.state
    }

    pub fn set_state(&mut self, state: InterruptState) {
        self.state = state;
    }

    pub fn is_enabled(&self) -> bool {
        self.state == InterruptState::Enabled
    }

    /// DI: drop IME immediately, cancelling any pending enable.
    pub fn disable(&mut self) {
        self.transition(InterruptState::Disabled);
    }

    /// EI: request IME with one instruction of latency.
    pub fn request_enable(&mut self) {
        if self.state != InterruptState::Enabled {
            self.transition(InterruptState::Pending);
        }
    }

    /// RETI: IME on immediately.
    pub fn enable_now(&mut self) {
        self.transition(InterruptState::Enabled);
    }

    /// Sampled before an instruction executes; true if an EI from an earlier
    /// instruction is waiting to take effect.
    #[inline]
    pub fn armed(&self) -> bool {
        self.state == InterruptState::Pending
    }

    /// Called after an instruction completes with the value `armed()` had
    /// before it started. A DI in between has already moved the state away
    /// from `Pending`, so nothing is promoted in that case.
    #[inline]
    pub fn instruction_completed(&mut self, armed: bool) {
        if armed && self.state == InterruptState::Pending {
            self.transition(InterruptState::Enabled);
        }
    }

    fn transition(&mut self, next: InterruptState) {
        if self.state != next {
            let prev = self.state;
            log(LogCategory::Interrupts, LogLevel::Trace, || {
                format!("IME: {:?} -> {:?}", prev, next)
            });
            self.state = next;
        }
    }
}
