use crate::cpu_sm83::{Condition, CpuSm83, MemorySm83};

impl<M: MemorySm83> CpuSm83<M> {
    #[inline]
    fn jump_relative(&mut self, offset: u8) {
        let pc = self.regs.pc().wrapping_add(offset as i8 as u16);
        self.regs.set_pc(pc);
    }

    /// JR e
    pub(crate) fn jr(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let offset = self.fetch8();
        self.jump_relative(offset);
        3
    }

    /// JR cc,e
    pub(crate) fn jr_cc(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let offset = self.fetch8();
        if self.regs.condition(Condition::from_opcode(opcode)) {
            self.jump_relative(offset);
            3
        } else {
            2
        }
    }

    /// JP nn
    pub(crate) fn jp(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.fetch16();
        self.regs.set_pc(addr);
        4
    }

    /// JP cc,nn
    pub(crate) fn jp_cc(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.fetch16();
        if self.regs.condition(Condition::from_opcode(opcode)) {
            self.regs.set_pc(addr);
            4
        } else {
            3
        }
    }

    /// JP HL
    pub(crate) fn jp_hl(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        self.regs.set_pc(self.regs.hl());
        1
    }

    /// CALL nn
    pub(crate) fn call(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.fetch16();
        let ret = self.regs.pc();
        self.push16(ret);
        self.regs.set_pc(addr);
        6
    }

    /// CALL cc,nn
    pub(crate) fn call_cc(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.fetch16();
        if self.regs.condition(Condition::from_opcode(opcode)) {
            let ret = self.regs.pc();
            self.push16(ret);
            self.regs.set_pc(addr);
            6
        } else {
            3
        }
    }

    /// RET
    pub(crate) fn ret(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.pop16();
        self.regs.set_pc(addr);
        4
    }

    /// RET cc
    pub(crate) fn ret_cc(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        if self.regs.condition(Condition::from_opcode(opcode)) {
            let addr = self.pop16();
            self.regs.set_pc(addr);
            5
        } else {
            2
        }
    }

    /// RETI: RET plus an immediate IME enable.
    pub(crate) fn reti(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.pop16();
        self.regs.set_pc(addr);
        self.interrupts_mut().enable_now();
        4
    }

    /// RST n; the vector is encoded in bits 3-5.
    pub(crate) fn rst(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let ret = self.regs.pc();
        self.push16(ret);
        self.regs.set_pc((opcode & 0x38) as u16);
        4
    }
}
