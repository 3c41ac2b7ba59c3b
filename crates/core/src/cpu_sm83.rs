//! Sharp SM83 CPU core (Game Boy CPU)
//!
//! A Z80-like 8-bit CPU with a 16-bit address space. This module owns the
//! register file and interrupt-enable latch and executes one instruction per
//! [`CpuSm83::step`], fetching through a [`MemorySm83`] implementation supplied
//! by the embedding system.
//!
//! Instruction costs are expressed in M-cycles (one M-cycle is four clock
//! ticks). The caller is responsible for turning them into a frame budget and
//! for deciding when an interrupt is serviced; [`CpuSm83::service_interrupt`]
//! performs the vectored call once it has decided to.

pub mod alu;
mod dispatch;
mod exec;
pub mod interrupts;
pub mod memory;
pub mod registers;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::logging::{log, LogCategory, LogLevel};
use dispatch::DispatchTable;

pub use alu::OperationResult;
pub use interrupts::{InterruptController, InterruptState};
pub use memory::{FlatMemory, MemorySm83};
pub use registers::{Condition, Flag, Reg16, Reg8, Registers};

/// First byte of the extended (bit/rotate/shift) instruction table.
pub const PREFIX_CB: u8 = 0xCB;

/// Unprefixed encodings that do not exist on the SM83.
pub const INVALID_OPCODES: [u8; 11] = [
    0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD,
];

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    #[error("invalid opcode {opcode:#04X} (prefixed: {prefixed}) at {addr:#06X}")]
    InvalidOpcode { opcode: u8, prefixed: bool, addr: u16 },
}

/// Register contents the CPU starts from on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResetState {
    /// Everything zero, execution from 0x0000 (boot ROM mapped).
    PowerOn,
    /// Values a DMG leaves behind after its boot ROM hands over at 0x0100.
    #[default]
    PostBoot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CpuConfig {
    pub reset: ResetState,
}

/// Point-in-time copy of the CPU state for debuggers and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub af: u16,
    pub bc: u16,
    pub de: u16,
    pub hl: u16,
    pub sp: u16,
    pub pc: u16,
    pub ime: InterruptState,
    pub halted: bool,
    pub stopped: bool,
    /// Next opcode fetch will not advance PC.
    pub halt_bug: bool,
    pub cycles: u64,
}

/// Operand selected by a 3-bit register field: B, C, D, E, H, L, (HL), A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    Reg(Reg8),
    IndirectHl,
}

impl Operand {
    pub(crate) fn decode(bits: u8) -> Self {
        match bits {
            0 => Operand::Reg(Reg8::B),
            1 => Operand::Reg(Reg8::C),
            2 => Operand::Reg(Reg8::D),
            3 => Operand::Reg(Reg8::E),
            4 => Operand::Reg(Reg8::H),
            5 => Operand::Reg(Reg8::L),
            6 => Operand::IndirectHl,
            7 => Operand::Reg(Reg8::A),
            _ => unreachable!("operand selector out of range: {bits}"),
        }
    }

    /// Source operand in bits 0-2.
    #[inline]
    pub(crate) fn low(opcode: u8) -> Self {
        Self::decode(opcode & 0x07)
    }

    /// Destination operand in bits 3-5.
    #[inline]
    pub(crate) fn high(opcode: u8) -> Self {
        Self::decode((opcode >> 3) & 0x07)
    }
}

/// Register pair in bits 4-5, with SP in the last slot.
pub(crate) fn pair_with_sp(opcode: u8) -> Reg16 {
    match (opcode >> 4) & 0x03 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        3 => Reg16::SP,
        _ => unreachable!(),
    }
}

/// Register pair in bits 4-5, with AF in the last slot (PUSH/POP).
pub(crate) fn pair_with_af(opcode: u8) -> Reg16 {
    match (opcode >> 4) & 0x03 {
        0 => Reg16::BC,
        1 => Reg16::DE,
        2 => Reg16::HL,
        3 => Reg16::AF,
        _ => unreachable!(),
    }
}

/// Sharp SM83 CPU state
#[derive(Debug)]
pub struct CpuSm83<M: MemorySm83> {
    pub regs: Registers,
    interrupts: InterruptController,
    halted: bool,
    stopped: bool,
    /// Next opcode fetch does not advance PC.
    halt_bug: bool,
    /// Total M-cycles executed
    pub cycles: u64,
    config: CpuConfig,
    dispatch: DispatchTable<M>,
    /// Memory interface
    pub memory: M,
}

impl<M: MemorySm83> CpuSm83<M> {
    /// Create a CPU in the post-boot state.
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        let mut cpu = Self {
            regs: Registers::new(),
            interrupts: InterruptController::new(),
            halted: false,
            stopped: false,
            halt_bug: false,
            cycles: 0,
            config,
            dispatch: DispatchTable::new(),
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Reset registers and latches according to the configured profile.
    pub fn reset(&mut self) {
        self.regs = Registers::new();
        if self.config.reset == ResetState::PostBoot {
            self.regs.set16(Reg16::AF, 0x01B0);
            self.regs.set16(Reg16::BC, 0x0013);
            self.regs.set16(Reg16::DE, 0x00D8);
            self.regs.set16(Reg16::HL, 0x014D);
            self.regs.set16(Reg16::SP, 0xFFFE);
            self.regs.set16(Reg16::PC, 0x0100);
        }
        self.interrupts = InterruptController::new();
        self.halted = false;
        self.stopped = false;
        self.halt_bug = false;
        self.cycles = 0;
    }

    /// Execute one instruction and return its cost in M-cycles.
    ///
    /// On an undefined opcode nothing is modified and PC still points at the
    /// offending byte.
    pub fn step(&mut self) -> Result<u32, CpuError> {
        if self.halted || self.stopped {
            if self.pending_interrupts() != 0 {
                log(LogCategory::Interrupts, LogLevel::Debug, || {
                    format!(
                        "CPU: wake from {} at PC={:04X}",
                        if self.halted { "HALT" } else { "STOP" },
                        self.regs.pc()
                    )
                });
                self.halted = false;
                self.stopped = false;
            }
            self.cycles += 1;
            return Ok(1);
        }

        let pc = self.regs.pc();
        let opcode = self.memory.read(pc);
        let armed = self.interrupts.armed();

        let cycles = if opcode == PREFIX_CB {
            // Under the HALT bug PC has not moved past 0xCB, so it is read again
            // as the sub-opcode.
            let cb_addr = if self.halt_bug { pc } else { pc.wrapping_add(1) };
            let cb_op = self.memory.read(cb_addr);
            log(LogCategory::CPU, LogLevel::Trace, || {
                format!("CPU: PC={:04X} op=CB {:02X}", pc, cb_op)
            });
            let handler = self.dispatch.prefixed(cb_op);
            handler(self, cb_op)
        } else {
            let Some(handler) = self.dispatch.unprefixed(opcode) else {
                log(LogCategory::CPU, LogLevel::Warn, || {
                    format!("CPU: invalid opcode {:02X} at PC={:04X}", opcode, pc)
                });
                return Err(CpuError::InvalidOpcode {
                    opcode,
                    prefixed: false,
                    addr: pc,
                });
            };
            log(LogCategory::CPU, LogLevel::Trace, || {
                format!(
                    "CPU: PC={:04X} op={:02X} AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X}",
                    pc,
                    opcode,
                    self.regs.get16(Reg16::AF),
                    self.regs.get16(Reg16::BC),
                    self.regs.get16(Reg16::DE),
                    self.regs.hl(),
                    self.regs.sp()
                )
            });
            handler(self, opcode)
        };

        self.interrupts.instruction_completed(armed);
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    pub fn interrupt_state(&self) -> InterruptState {
        self.interrupts.state()
    }

    /// Override IME, for collaborators restoring or injecting state.
    pub fn set_interrupt_state(&mut self, state: InterruptState) {
        self.interrupts.set_state(state);
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Requested and enabled interrupt sources (`IE & IF`).
    pub fn pending_interrupts(&self) -> u8 {
        self.memory.read(interrupts::IE_ADDR)
            & self.memory.read(interrupts::IF_ADDR)
            & interrupts::INTERRUPT_MASK
    }

    /// Perform the vectored call for an interrupt the caller has chosen to
    /// service: push PC, jump to `vector`, drop IME. Costs 5 M-cycles.
    ///
    /// If the HALT bug is armed the pushed address is the HALT opcode itself
    /// and the bug is consumed.
    ///
    /// Acknowledging the source in IF is left to the caller.
    pub fn service_interrupt(&mut self, vector: u16) -> u32 {
        log(LogCategory::Interrupts, LogLevel::Debug, || {
            format!(
                "CPU: servicing interrupt {:04X} from PC={:04X}",
                vector,
                self.regs.pc()
            )
        });
        self.halted = false;
        self.stopped = false;
        self.interrupts.disable();
        // A pending HALT bug means PC already sits past the HALT; return to it.
        let pc = if self.halt_bug {
            self.halt_bug = false;
            self.regs.pc().wrapping_sub(1)
        } else {
            self.regs.pc()
        };
        self.push16(pc);
        self.regs.set_pc(vector);
        self.cycles += 5;
        5
    }

    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            af: self.regs.get16(Reg16::AF),
            bc: self.regs.get16(Reg16::BC),
            de: self.regs.get16(Reg16::DE),
            hl: self.regs.hl(),
            sp: self.regs.sp(),
            pc: self.regs.pc(),
            ime: self.interrupts.state(),
            halted: self.halted,
            stopped: self.stopped,
            halt_bug: self.halt_bug,
            cycles: self.cycles,
        }
    }

    // Helpers shared by the instruction handlers.

    /// Move PC past an opcode of `len` bytes (1, or 2 for CB-prefixed).
    ///
    /// The HALT bug swallows one increment.
    #[inline]
    pub(crate) fn skip_opcode(&mut self, len: u16) {
        let len = if self.halt_bug {
            self.halt_bug = false;
            len - 1
        } else {
            len
        };
        self.regs.set_pc(self.regs.pc().wrapping_add(len));
    }

    #[inline]
    pub(crate) fn fetch8(&mut self) -> u8 {
        let pc = self.regs.pc();
        let val = self.memory.read(pc);
        self.regs.set_pc(pc.wrapping_add(1));
        val
    }

    #[inline]
    pub(crate) fn fetch16(&mut self) -> u16 {
        let lo = self.fetch8();
        let hi = self.fetch8();
        u16::from_le_bytes([lo, hi])
    }

    pub(crate) fn push16(&mut self, val: u16) {
        let [lo, hi] = val.to_le_bytes();
        let sp = self.regs.sp().wrapping_sub(1);
        self.memory.write(sp, hi);
        let sp = sp.wrapping_sub(1);
        self.memory.write(sp, lo);
        self.regs.set_sp(sp);
    }

    pub(crate) fn pop16(&mut self) -> u16 {
        let sp = self.regs.sp();
        let lo = self.memory.read(sp);
        let hi = self.memory.read(sp.wrapping_add(1));
        self.regs.set_sp(sp.wrapping_add(2));
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub(crate) fn read_operand(&self, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(reg) => self.regs.get8(reg),
            Operand::IndirectHl => self.memory.read(self.regs.hl()),
        }
    }

    #[inline]
    pub(crate) fn write_operand(&mut self, operand: Operand, val: u8) {
        match operand {
            Operand::Reg(reg) => self.regs.set8(reg, val),
            Operand::IndirectHl => self.memory.write(self.regs.hl(), val),
        }
    }

    #[inline]
    pub(crate) fn flag(&self, flag: Flag) -> bool {
        self.regs.flag(flag)
    }

    pub(crate) fn enter_halt(&mut self) {
        if self.interrupts.is_enabled() || self.pending_interrupts() == 0 {
            log(LogCategory::Interrupts, LogLevel::Debug, || {
                format!("CPU: HALT at PC={:04X}", self.regs.pc())
            });
            self.halted = true;
        } else {
            log(LogCategory::Interrupts, LogLevel::Debug, || {
                format!("CPU: HALT bug triggered at PC={:04X}", self.regs.pc())
            });
            self.halt_bug = true;
        }
    }

    pub(crate) fn enter_stop(&mut self) {
        log(LogCategory::CPU, LogLevel::Debug, || {
            format!("CPU: STOP at PC={:04X}", self.regs.pc())
        });
        self.stopped = true;
    }

    pub(crate) fn interrupts_mut(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }
}

impl<M: MemorySm83> crate::Cpu for CpuSm83<M> {
    type Error = CpuError;

    fn reset(&mut self) {
        self.reset();
    }

    fn step(&mut self) -> Result<u32, CpuError> {
        self.step()
    }
}
