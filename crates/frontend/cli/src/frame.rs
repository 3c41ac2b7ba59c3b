//! Fixed-budget frame loop over any [`Cpu`].

use sm83_core::Cpu;

/// DMG master clock in Hz.
pub const CLOCK_HZ: u32 = 4_194_304;
/// Frames per second the budget is derived from.
pub const FRAME_RATE: u32 = 60;
/// M-cycles per frame (one M-cycle is four clock ticks).
pub const CYCLES_PER_FRAME: u32 = CLOCK_HZ / 4 / FRAME_RATE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// M-cycles spent by instructions started in this frame.
    pub cycles: u32,
    pub instructions: u32,
}

/// Steps a CPU until each frame's cycle budget is used up.
///
/// An instruction never straddles a frame boundary, so the last one usually
/// runs past the budget; the excess is charged to the next frame.
#[derive(Debug)]
pub struct FrameScheduler {
    budget: u32,
    overshoot: u32,
    frames: u64,
}

impl FrameScheduler {
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            overshoot: 0,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn overshoot(&self) -> u32 {
        self.overshoot
    }

    pub fn run_frame<C: Cpu>(&mut self, cpu: &mut C) -> Result<FrameReport, C::Error> {
        let mut elapsed = self.overshoot;
        let mut report = FrameReport {
            cycles: 0,
            instructions: 0,
        };

        while elapsed < self.budget {
            let cycles = cpu.step()?;
            elapsed += cycles;
            report.cycles += cycles;
            report.instructions += 1;
        }

        self.overshoot = elapsed - self.budget;
        self.frames += 1;
        Ok(report)
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(CYCLES_PER_FRAME)
    }
}
