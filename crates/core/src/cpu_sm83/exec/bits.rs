//! 0xCB-prefixed instructions.

use super::rotate::ShiftOp;
use crate::cpu_sm83::{CpuSm83, Flag, MemorySm83, Operand};

#[inline]
fn bit_index(opcode: u8) -> u8 {
    (opcode >> 3) & 0x07
}

impl<M: MemorySm83> CpuSm83<M> {
    /// RLC/RRC/RL/RR/SLA/SRA/SWAP/SRL r
    pub(crate) fn cb_rotate_shift(&mut self, opcode: u8) -> u32 {
        let target = Operand::low(opcode);
        self.skip_opcode(2);
        let val = self.read_operand(target);
        let (result, carry) = ShiftOp::decode(opcode).apply(val, self.flag(Flag::Carry));
        self.write_operand(target, result);
        self.regs.set_flags(result == 0, false, false, carry);
        if target == Operand::IndirectHl {
            4
        } else {
            2
        }
    }

    /// BIT b,r
    pub(crate) fn cb_bit(&mut self, opcode: u8) -> u32 {
        let target = Operand::low(opcode);
        self.skip_opcode(2);
        let val = self.read_operand(target);
        self.regs
            .set_flag(Flag::Zero, val & (1 << bit_index(opcode)) == 0);
        self.regs.set_flag(Flag::Subtract, false);
        self.regs.set_flag(Flag::HalfCarry, true);
        if target == Operand::IndirectHl {
            3
        } else {
            2
        }
    }

    /// RES b,r
    pub(crate) fn cb_res(&mut self, opcode: u8) -> u32 {
        let target = Operand::low(opcode);
        self.skip_opcode(2);
        let val = self.read_operand(target) & !(1 << bit_index(opcode));
        self.write_operand(target, val);
        if target == Operand::IndirectHl {
            4
        } else {
            2
        }
    }

    /// SET b,r
    pub(crate) fn cb_set(&mut self, opcode: u8) -> u32 {
        let target = Operand::low(opcode);
        self.skip_opcode(2);
        let val = self.read_operand(target) | (1 << bit_index(opcode));
        self.write_operand(target, val);
        if target == Operand::IndirectHl {
            4
        } else {
            2
        }
    }
}
