use crate::cpu_sm83::alu::add_sp_offset;
use crate::cpu_sm83::{pair_with_af, CpuSm83, MemorySm83};

impl<M: MemorySm83> CpuSm83<M> {
    /// PUSH rr
    pub(crate) fn push(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let val = self.regs.get16(pair_with_af(opcode));
        self.push16(val);
        4
    }

    /// POP rr; POP AF drops the low nibble of F.
    pub(crate) fn pop(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let val = self.pop16();
        self.regs.set16(pair_with_af(opcode), val);
        3
    }

    /// ADD SP,e
    pub(crate) fn add_sp_e(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let offset = self.fetch8();
        let r = add_sp_offset(self.regs.sp(), offset);
        self.regs.set_sp(r.result);
        self.regs.set_flags(false, false, r.half_carry, r.carry);
        4
    }

    /// LD HL,SP+e
    pub(crate) fn ld_hl_sp_e(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let offset = self.fetch8();
        let r = add_sp_offset(self.regs.sp(), offset);
        self.regs.set_hl(r.result);
        self.regs.set_flags(false, false, r.half_carry, r.carry);
        3
    }
}
