use crate::cpu_sm83::{CpuSm83, Flag, MemorySm83};

impl<M: MemorySm83> CpuSm83<M> {
    #[inline]
    pub(super) fn and_a(&mut self, val: u8) {
        let result = self.regs.a() & val;
        self.regs.set_a(result);
        self.regs.set_flags(result == 0, false, true, false);
    }

    #[inline]
    pub(super) fn xor_a(&mut self, val: u8) {
        let result = self.regs.a() ^ val;
        self.regs.set_a(result);
        self.regs.set_flags(result == 0, false, false, false);
    }

    #[inline]
    pub(super) fn or_a(&mut self, val: u8) {
        let result = self.regs.a() | val;
        self.regs.set_a(result);
        self.regs.set_flags(result == 0, false, false, false);
    }

    /// CPL
    pub(crate) fn cpl(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        self.regs.set_a(!self.regs.a());
        self.regs.set_flag(Flag::Subtract, true);
        self.regs.set_flag(Flag::HalfCarry, true);
        1
    }
}
