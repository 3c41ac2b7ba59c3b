use crate::cpu_sm83::{CpuSm83, Flag, MemorySm83};

/// Rotate/shift operation selected by bits 3-5 of CB 0x00-0x3F.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

impl ShiftOp {
    pub(super) fn decode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => ShiftOp::Rlc,
            1 => ShiftOp::Rrc,
            2 => ShiftOp::Rl,
            3 => ShiftOp::Rr,
            4 => ShiftOp::Sla,
            5 => ShiftOp::Sra,
            6 => ShiftOp::Swap,
            7 => ShiftOp::Srl,
            _ => unreachable!(),
        }
    }

    /// Apply the operation; returns the result and the new carry.
    pub(super) fn apply(self, val: u8, carry_in: bool) -> (u8, bool) {
        match self {
            ShiftOp::Rlc => (val.rotate_left(1), val & 0x80 != 0),
            ShiftOp::Rrc => (val.rotate_right(1), val & 0x01 != 0),
            ShiftOp::Rl => ((val << 1) | carry_in as u8, val & 0x80 != 0),
            ShiftOp::Rr => ((val >> 1) | ((carry_in as u8) << 7), val & 0x01 != 0),
            ShiftOp::Sla => (val << 1, val & 0x80 != 0),
            ShiftOp::Sra => ((val >> 1) | (val & 0x80), val & 0x01 != 0),
            ShiftOp::Swap => (val.rotate_left(4), false),
            ShiftOp::Srl => (val >> 1, val & 0x01 != 0),
        }
    }
}

impl<M: MemorySm83> CpuSm83<M> {
    /// RLCA/RRCA/RLA/RRA: like their CB forms but Z is always cleared.
    fn rotate_a(&mut self, op: ShiftOp) -> u32 {
        self.skip_opcode(1);
        let (result, carry) = op.apply(self.regs.a(), self.flag(Flag::Carry));
        self.regs.set_a(result);
        self.regs.set_flags(false, false, false, carry);
        1
    }

    pub(crate) fn rlca(&mut self, _opcode: u8) -> u32 {
        self.rotate_a(ShiftOp::Rlc)
    }

    pub(crate) fn rrca(&mut self, _opcode: u8) -> u32 {
        self.rotate_a(ShiftOp::Rrc)
    }

    pub(crate) fn rla(&mut self, _opcode: u8) -> u32 {
        self.rotate_a(ShiftOp::Rl)
    }

    pub(crate) fn rra(&mut self, _opcode: u8) -> u32 {
        self.rotate_a(ShiftOp::Rr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_ops() {
        assert_eq!(ShiftOp::Rlc.apply(0x81, false), (0x03, true));
        assert_eq!(ShiftOp::Rrc.apply(0x01, false), (0x80, true));
        assert_eq!(ShiftOp::Rl.apply(0x80, true), (0x01, true));
        assert_eq!(ShiftOp::Rr.apply(0x01, false), (0x00, true));
        assert_eq!(ShiftOp::Sla.apply(0xC0, true), (0x80, true));
        assert_eq!(ShiftOp::Sra.apply(0x81, false), (0xC0, true));
        assert_eq!(ShiftOp::Swap.apply(0x12, true), (0x21, false));
        assert_eq!(ShiftOp::Srl.apply(0x81, false), (0x40, true));
    }

    #[test]
    fn test_decode_covers_row() {
        let ops: Vec<_> = (0..8).map(|i| ShiftOp::decode(i << 3)).collect();
        assert_eq!(
            ops,
            vec![
                ShiftOp::Rlc,
                ShiftOp::Rrc,
                ShiftOp::Rl,
                ShiftOp::Rr,
                ShiftOp::Sla,
                ShiftOp::Sra,
                ShiftOp::Swap,
                ShiftOp::Srl
            ]
        );
    }
}
