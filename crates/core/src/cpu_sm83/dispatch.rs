//! Opcode dispatch tables.
//!
//! Two 256-entry arrays of plain function pointers, one for the unprefixed
//! space and one for the 0xCB-prefixed space. Each handler receives the
//! opcode byte it was selected by, so a family of encodings (LD r,r', ALU
//! A,r, the whole CB table) shares one handler that decodes its operand
//! fields from that byte. Undefined encodings have no entry.

use std::fmt;

use super::{CpuSm83, MemorySm83, INVALID_OPCODES, PREFIX_CB};

/// Executes one instruction and returns its cost in M-cycles.
pub(crate) type Handler<M> = fn(&mut CpuSm83<M>, u8) -> u32;

pub(crate) struct DispatchTable<M: MemorySm83> {
    unprefixed: [Option<Handler<M>>; 256],
    prefixed: [Handler<M>; 256],
}

impl<M: MemorySm83> DispatchTable<M> {
    pub(crate) fn new() -> Self {
        let mut table = Self {
            unprefixed: [None; 256],
            prefixed: [CpuSm83::<M>::cb_rotate_shift as Handler<M>; 256],
        };
        table.fill_unprefixed();
        table.fill_prefixed();
        table
    }

    #[inline]
    pub(crate) fn unprefixed(&self, opcode: u8) -> Option<Handler<M>> {
        self.unprefixed[opcode as usize]
    }

    #[inline]
    pub(crate) fn prefixed(&self, opcode: u8) -> Handler<M> {
        self.prefixed[opcode as usize]
    }

    fn set(&mut self, opcode: u8, handler: Handler<M>) {
        debug_assert!(!INVALID_OPCODES.contains(&opcode) && opcode != PREFIX_CB);
        self.unprefixed[opcode as usize] = Some(handler);
    }

    fn set_all(&mut self, opcodes: &[u8], handler: Handler<M>) {
        for &opcode in opcodes {
            self.set(opcode, handler);
        }
    }

    fn fill_unprefixed(&mut self) {
        // Misc / control
        self.set(0x00, CpuSm83::nop);
        self.set(0x10, CpuSm83::stop);
        self.set(0x76, CpuSm83::halt);
        self.set(0xF3, CpuSm83::di);
        self.set(0xFB, CpuSm83::ei);
        self.set(0x27, CpuSm83::daa);
        self.set(0x2F, CpuSm83::cpl);
        self.set(0x37, CpuSm83::scf);
        self.set(0x3F, CpuSm83::ccf);

        // 8-bit loads
        for opcode in 0x40..=0x7F {
            if opcode != 0x76 {
                self.set(opcode, CpuSm83::ld_r_r);
            }
        }
        self.set_all(&[0x06, 0x0E, 0x16, 0x1E, 0x26, 0x2E, 0x36, 0x3E], CpuSm83::ld_r_n);
        self.set_all(&[0x02, 0x12], CpuSm83::ld_rr_a);
        self.set_all(&[0x0A, 0x1A], CpuSm83::ld_a_rr);
        self.set(0x22, CpuSm83::ld_hli_a);
        self.set(0x32, CpuSm83::ld_hld_a);
        self.set(0x2A, CpuSm83::ld_a_hli);
        self.set(0x3A, CpuSm83::ld_a_hld);
        self.set(0xE0, CpuSm83::ldh_n_a);
        self.set(0xF0, CpuSm83::ldh_a_n);
        self.set(0xE2, CpuSm83::ldh_c_a);
        self.set(0xF2, CpuSm83::ldh_a_c);
        self.set(0xEA, CpuSm83::ld_nn_a);
        self.set(0xFA, CpuSm83::ld_a_nn);

        // 16-bit loads and stack
        self.set_all(&[0x01, 0x11, 0x21, 0x31], CpuSm83::ld_rr_nn);
        self.set(0x08, CpuSm83::ld_nn_sp);
        self.set(0xF9, CpuSm83::ld_sp_hl);
        self.set(0xF8, CpuSm83::ld_hl_sp_e);
        self.set(0xE8, CpuSm83::add_sp_e);
        self.set_all(&[0xC5, 0xD5, 0xE5, 0xF5], CpuSm83::push);
        self.set_all(&[0xC1, 0xD1, 0xE1, 0xF1], CpuSm83::pop);

        // 8-bit arithmetic and logic
        for opcode in 0x80..=0xBF {
            self.set(opcode, CpuSm83::alu_a_r);
        }
        self.set_all(&[0xC6, 0xCE, 0xD6, 0xDE, 0xE6, 0xEE, 0xF6, 0xFE], CpuSm83::alu_a_n);
        self.set_all(&[0x04, 0x0C, 0x14, 0x1C, 0x24, 0x2C, 0x34, 0x3C], CpuSm83::inc_r);
        self.set_all(&[0x05, 0x0D, 0x15, 0x1D, 0x25, 0x2D, 0x35, 0x3D], CpuSm83::dec_r);

        // 16-bit arithmetic
        self.set_all(&[0x03, 0x13, 0x23, 0x33], CpuSm83::inc_rr);
        self.set_all(&[0x0B, 0x1B, 0x2B, 0x3B], CpuSm83::dec_rr);
        self.set_all(&[0x09, 0x19, 0x29, 0x39], CpuSm83::add_hl_rr);

        // Accumulator rotates
        self.set(0x07, CpuSm83::rlca);
        self.set(0x0F, CpuSm83::rrca);
        self.set(0x17, CpuSm83::rla);
        self.set(0x1F, CpuSm83::rra);

        // Jumps, calls, returns
        self.set(0x18, CpuSm83::jr);
        self.set_all(&[0x20, 0x28, 0x30, 0x38], CpuSm83::jr_cc);
        self.set(0xC3, CpuSm83::jp);
        self.set_all(&[0xC2, 0xCA, 0xD2, 0xDA], CpuSm83::jp_cc);
        self.set(0xE9, CpuSm83::jp_hl);
        self.set(0xCD, CpuSm83::call);
        self.set_all(&[0xC4, 0xCC, 0xD4, 0xDC], CpuSm83::call_cc);
        self.set(0xC9, CpuSm83::ret);
        self.set_all(&[0xC0, 0xC8, 0xD0, 0xD8], CpuSm83::ret_cc);
        self.set(0xD9, CpuSm83::reti);
        self.set_all(&[0xC7, 0xCF, 0xD7, 0xDF, 0xE7, 0xEF, 0xF7, 0xFF], CpuSm83::rst);
    }

    fn fill_prefixed(&mut self) {
        for opcode in 0x00..=0xFFu8 {
            self.prefixed[opcode as usize] = match opcode >> 6 {
                0 => CpuSm83::cb_rotate_shift,
                1 => CpuSm83::cb_bit,
                2 => CpuSm83::cb_res,
                3 => CpuSm83::cb_set,
                _ => unreachable!(),
            };
        }
    }
}

impl<M: MemorySm83> fmt::Debug for DispatchTable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defined = self.unprefixed.iter().filter(|h| h.is_some()).count();
        f.debug_struct("DispatchTable")
            .field("unprefixed", &defined)
            .field("prefixed", &self.prefixed.len())
            .finish()
    }
}
