use crate::cpu_sm83::{pair_with_sp, CpuSm83, MemorySm83, Operand, Reg16, Reg8};

const HIGH_PAGE: u16 = 0xFF00;

impl<M: MemorySm83> CpuSm83<M> {
    /// LD r,r' / LD r,(HL) / LD (HL),r
    pub(crate) fn ld_r_r(&mut self, opcode: u8) -> u32 {
        let dst = Operand::high(opcode);
        let src = Operand::low(opcode);
        self.skip_opcode(1);
        let val = self.read_operand(src);
        self.write_operand(dst, val);
        if src == Operand::IndirectHl || dst == Operand::IndirectHl {
            2
        } else {
            1
        }
    }

    /// LD r,n / LD (HL),n
    pub(crate) fn ld_r_n(&mut self, opcode: u8) -> u32 {
        let dst = Operand::high(opcode);
        self.skip_opcode(1);
        let val = self.fetch8();
        self.write_operand(dst, val);
        if dst == Operand::IndirectHl {
            3
        } else {
            2
        }
    }

    /// LD (BC),A / LD (DE),A
    pub(crate) fn ld_rr_a(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.regs.get16(pair_with_sp(opcode));
        self.memory.write(addr, self.regs.a());
        2
    }

    /// LD A,(BC) / LD A,(DE)
    pub(crate) fn ld_a_rr(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.regs.get16(pair_with_sp(opcode));
        let val = self.memory.read(addr);
        self.regs.set_a(val);
        2
    }

    /// LD (HL+),A
    pub(crate) fn ld_hli_a(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.regs.hl();
        self.memory.write(addr, self.regs.a());
        self.regs.set_hl(addr.wrapping_add(1));
        2
    }

    /// LD (HL-),A
    pub(crate) fn ld_hld_a(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.regs.hl();
        self.memory.write(addr, self.regs.a());
        self.regs.set_hl(addr.wrapping_sub(1));
        2
    }

    /// LD A,(HL+)
    pub(crate) fn ld_a_hli(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.regs.hl();
        let val = self.memory.read(addr);
        self.regs.set_a(val);
        self.regs.set_hl(addr.wrapping_add(1));
        2
    }

    /// LD A,(HL-)
    pub(crate) fn ld_a_hld(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.regs.hl();
        let val = self.memory.read(addr);
        self.regs.set_a(val);
        self.regs.set_hl(addr.wrapping_sub(1));
        2
    }

    /// LDH (n),A
    pub(crate) fn ldh_n_a(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let offset = self.fetch8() as u16;
        self.memory.write(HIGH_PAGE | offset, self.regs.a());
        3
    }

    /// LDH A,(n)
    pub(crate) fn ldh_a_n(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let offset = self.fetch8() as u16;
        let val = self.memory.read(HIGH_PAGE | offset);
        self.regs.set_a(val);
        3
    }

    /// LD (C),A
    pub(crate) fn ldh_c_a(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = HIGH_PAGE | self.regs.get8(Reg8::C) as u16;
        self.memory.write(addr, self.regs.a());
        2
    }

    /// LD A,(C)
    pub(crate) fn ldh_a_c(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = HIGH_PAGE | self.regs.get8(Reg8::C) as u16;
        let val = self.memory.read(addr);
        self.regs.set_a(val);
        2
    }

    /// LD (nn),A
    pub(crate) fn ld_nn_a(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.fetch16();
        self.memory.write(addr, self.regs.a());
        4
    }

    /// LD A,(nn)
    pub(crate) fn ld_a_nn(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.fetch16();
        let val = self.memory.read(addr);
        self.regs.set_a(val);
        4
    }

    /// LD rr,nn
    pub(crate) fn ld_rr_nn(&mut self, opcode: u8) -> u32 {
        self.skip_opcode(1);
        let val = self.fetch16();
        self.regs.set16(pair_with_sp(opcode), val);
        3
    }

    /// LD (nn),SP
    pub(crate) fn ld_nn_sp(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        let addr = self.fetch16();
        let [lo, hi] = self.regs.get16(Reg16::SP).to_le_bytes();
        self.memory.write(addr, lo);
        self.memory.write(addr.wrapping_add(1), hi);
        5
    }

    /// LD SP,HL
    pub(crate) fn ld_sp_hl(&mut self, _opcode: u8) -> u32 {
        self.skip_opcode(1);
        self.regs.set_sp(self.regs.hl());
        2
    }
}
