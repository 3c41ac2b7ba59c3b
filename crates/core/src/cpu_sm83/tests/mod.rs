//! Instruction-level tests for the SM83 core
//!
//! - `tests_loads`: 8/16-bit loads and high-page access
//! - `tests_alu`: arithmetic, logic, DAA and flag behavior
//! - `tests_bits`: CB-prefixed rotates, shifts and bit operations
//! - `tests_control`: jumps, calls, returns and RST
//! - `tests_stack`: PUSH/POP and SP arithmetic
//! - `tests_system`: IME latency, HALT, STOP, interrupt servicing, invalid opcodes

mod tests_alu;

use crate::cpu_sm83::{CpuConfig, CpuSm83, FlatMemory, ResetState};

/// Program origin used by the tests.
pub(super) const ORIGIN: u16 = 0x0100;

/// CPU with all registers zeroed, PC at [`ORIGIN`] and SP at 0xFFFE, with
/// `program` loaded at PC.
pub(super) fn make_cpu(program: &[u8]) -> CpuSm83<FlatMemory> {
    let mut mem = FlatMemory::new();
    mem.load(ORIGIN, program);
    let mut cpu = CpuSm83::with_config(
        mem,
        CpuConfig {
            reset: ResetState::PowerOn,
        },
    );
    cpu.regs.set_pc(ORIGIN);
    cpu.regs.set_sp(0xFFFE);
    cpu
}

/// Step `n` instructions, returning the total cycle cost.
pub(super) fn run(cpu: &mut CpuSm83<FlatMemory>, n: usize) -> u32 {
    (0..n)
        .map(|_| cpu.step().expect("unexpected invalid opcode"))
        .sum()
}
