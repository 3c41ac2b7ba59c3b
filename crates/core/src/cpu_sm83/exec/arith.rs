use crate::cpu_sm83::alu::{adc8, add16, add8, sbc8, sub8};
use crate::cpu_sm83::{pair_with_sp, CpuSm83, Flag, MemorySm83, Operand};

/// ALU operation selected by bits 3-5 of the 0x80-0xBF and 0xC6-0xFE blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

impl AluOp {
    fn decode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::Adc,
            2 => AluOp::Sub,
            3 => AluOp::Sbc,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            7 => AluOp::Cp,
            _ => unreachable!(),
        }
    }
}

impl<M: MemorySm83> CpuSm83<M> {
    fn alu(&mut self, op: AluOp, val: u8) {
        let a = self.regs.a();
        let carry = self.flag(Flag::Carry);
        match op {
            AluOp::Add | AluOp::Adc => {
                let r = adc8(a, val, op == AluOp::Adc && carry);
                self.regs.set_a(r.result);
                self.regs.set_flags(r.result == 0, false, r.half_carry, r.carry);
            }
            AluOp::Sub | AluOp::Sbc | AluOp::Cp => {
                let r = sbc8(a, val, op == AluOp::Sbc && carry);
                if op != AluOp::Cp {
                    self.regs.set_a(r.result);
                }
                self.regs.set_flags(r.result == 0, true, r.half_carry, r.carry);
            }
            AluOp::And => self.and_a(val),
            AluOp::Xor => self.xor_a(val),
            AluOp::Or => self.or_a(val),
        }
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r and A,(HL)
    pub(crate) fn alu_a_r(&mut self, opcode: u8) -> u32 {
        let src = Operand::low(opcode);
        self.skip_opcode(1);
        let val = self.read_operand(src);
        self.alu(AluOp::decode(opcode), val);
        if src == Operand::IndirectHl {
            2
        } else {
            1
        }
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,n
    pub(crate) fn alu_a_n(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let val = self.fetch8();
        self.alu(AluOp::decode(opcode), val);
        2
    }

    /// INC r / INC (HL); carry is preserved.
    pub(crate) fn inc_r(&mut self, opcode: u8) -> u32 {
        let target = Operand::high(opcode);
        self.skip_opcode(1);
        let r = add8(self.read_operand(target), 1);
        self.write_operand(target, r.result);
        let carry = self.flag(Flag::Carry);
        self.regs.set_flags(r.result == 0, false, r.half_carry, carry);
        if target == Operand::IndirectHl {
            3
        } else {
            1
        }
    }

    /// DEC r / DEC (HL); carry is preserved.
    pub(crate) fn dec_r(&mut self, opcode: u8) -> u32 {
        let target = Operand::high(opcode);
        self.skip_opcode(1);
        let r = sub8(self.read_operand(target), 1);
        self.write_operand(target, r.result);
        let carry = self.flag(Flag::Carry);
        self.regs.set_flags(r.result == 0, true, r.half_carry, carry);
        if target == Operand::IndirectHl {
            3
        } else {
            1
        }
    }

    /// INC rr
    pub(crate) fn inc_rr(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let pair = pair_with_sp(opcode);
        self.regs.set16(pair, self.regs.get16(pair).wrapping_add(1));
        2
    }

    /// DEC rr
    pub(crate) fn dec_rr(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let pair = pair_with_sp(opcode);
        self.regs.set16(pair, self.regs.get16(pair).wrapping_sub(1));
        2
    }

    /// ADD HL,rr; Z is preserved.
    pub(crate) fn add_hl_rr(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let r = add16(self.regs.hl(), self.regs.get16(pair_with_sp(opcode)));
        self.regs.set_hl(r.result);
        let zero = self.flag(Flag::Zero);
        self.regs.set_flags(zero, false, r.half_carry, r.carry);
        2
    }

    /// DAA: decimal-adjust A after a BCD addition or subtraction.
    pub(crate) fn daa(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let mut a = self.regs.a();
        let subtract = self.flag(Flag::Subtract);
        let half_carry = self.flag(Flag::HalfCarry);
        let mut carry = self.flag(Flag::Carry);

        if subtract {
            if carry {
                a = a.wrapping_sub(0x60);
            }
            if half_carry {
                a = a.wrapping_sub(0x06);
            }
        } else {
            if carry || a > 0x99 {
                a = a.wrapping_add(0x60);
                carry = true;
            }
            if half_carry || (a & 0x0F) > 0x09 {
                a = a.wrapping_add(0x06);
            }
        }

        self.regs.set_a(a);
        self.regs.set_flags(a == 0, subtract, false, carry);
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alu_op_decode() {
        assert_eq!(AluOp::decode(0x80), AluOp::Add);
        assert_eq!(AluOp::decode(0x8E), AluOp::Adc);
        assert_eq!(AluOp::decode(0xD6), AluOp::Sub);
        assert_eq!(AluOp::decode(0x9F), AluOp::Sbc);
        assert_eq!(AluOp::decode(0xE6), AluOp::And);
        assert_eq!(AluOp::decode(0xAF), AluOp::Xor);
        assert_eq!(AluOp::decode(0xB6), AluOp::Or);
        assert_eq!(AluOp::decode(0xFE), AluOp::Cp);
    }
}
