use crate::cpu_sm83::{CpuSm83, Flag, MemorySm83};

impl<M: MemorySm83> CpuSm83<M> {
    /// NOP
    pub(crate) fn nop(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        1
    }

    /// STOP is two bytes long; the second byte is ignored.
    pub(crate) fn stop(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let _padding = self.fetch8();
        self.enter_stop();
        1
    }

    /// HALT
    pub(crate) fn halt(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        self.enter_halt();
        1
    }

    /// DI
    pub(crate) fn di(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        self.interrupts_mut().disable();
        1
    }

    /// EI; IME turns on after the next instruction.
    pub(crate) fn ei(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        self.interrupts_mut().request_enable();
        1
    }

    /// SCF
    pub(crate) fn scf(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let zero = self.flag(Flag::Zero);
        self.regs.set_flags(zero, false, false, true);
        1
    }

    /// CCF
    pub(crate) fn ccf(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let zero = self.flag(Flag::Zero);
        let carry = self.flag(Flag::Carry);
        self.regs.set_flags(zero, false, false, !carry);
        1
    }
}
