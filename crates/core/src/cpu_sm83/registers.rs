//! SM83 register file.
//!
//! Each register pair is stored as one canonical 16-bit word. The 8-bit
//! registers are views over the high and low bytes of those words, so there
//! is exactly one place that holds any given bit of CPU state.
//!
//! Layout of F (bit index, MSB first):
//! - bit 7: Z (zero)
//! - bit 6: N (subtract)
//! - bit 5: H (half carry)
//! - bit 4: C (carry)
//! - bits 0-3 always read as zero

/// 8-bit register selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg8 {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
}

/// 16-bit register selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

/// Condition flags stored in the upper nibble of F.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Zero,
    Subtract,
    HalfCarry,
    Carry,
}

impl Flag {
    #[inline]
    pub const fn mask(self) -> u8 {
        match self {
            Flag::Zero => 0x80,
            Flag::Subtract => 0x40,
            Flag::HalfCarry => 0x20,
            Flag::Carry => 0x10,
        }
    }
}

/// Branch condition encoded in bits 3-4 of JR/JP/CALL/RET cc opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NotCarry,
    Carry,
}

impl Condition {
    /// Decode the condition from an opcode (`xx0cc000`-style encodings).
    pub fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x03 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NotCarry,
            3 => Condition::Carry,
            _ => unreachable!(),
        }
    }
}

/// Mask of the bits of F that actually exist in hardware.
pub const FLAG_MASK: u8 = 0xF0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    af: u16,
    bc: u16,
    de: u16,
    hl: u16,
    sp: u16,
    pc: u16,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get8(&self, reg: Reg8) -> u8 {
        let [hi, lo] = match reg {
            Reg8::A | Reg8::F => self.af,
            Reg8::B | Reg8::C => self.bc,
            Reg8::D | Reg8::E => self.de,
            Reg8::H | Reg8::L => self.hl,
        }
        .to_be_bytes();
        match reg {
            Reg8::A | Reg8::B | Reg8::D | Reg8::H => hi,
            Reg8::F | Reg8::C | Reg8::E | Reg8::L => lo,
        }
    }

    /// Write one half of a register pair, leaving the other half untouched.
    pub fn set8(&mut self, reg: Reg8, value: u8) {
        let word = match reg {
            Reg8::A | Reg8::F => &mut self.af,
            Reg8::B | Reg8::C => &mut self.bc,
            Reg8::D | Reg8::E => &mut self.de,
            Reg8::H | Reg8::L => &mut self.hl,
        };
        let [hi, lo] = word.to_be_bytes();
        *word = match reg {
            Reg8::A | Reg8::B | Reg8::D | Reg8::H => u16::from_be_bytes([value, lo]),
            Reg8::F => u16::from_be_bytes([hi, value & FLAG_MASK]),
            Reg8::C | Reg8::E | Reg8::L => u16::from_be_bytes([hi, value]),
        };
    }

    pub fn get16(&self, reg: Reg16) -> u16 {
        match reg {
            Reg16::AF => self.af,
            Reg16::BC => self.bc,
            Reg16::DE => self.de,
            Reg16::HL => self.hl,
            Reg16::SP => self.sp,
            Reg16::PC => self.pc,
        }
    }

    pub fn set16(&mut self, reg: Reg16, value: u16) {
        match reg {
            // Lower 4 bits of F are always zero.
            Reg16::AF => self.af = value & 0xFFF0,
            Reg16::BC => self.bc = value,
            Reg16::DE => self.de = value,
            Reg16::HL => self.hl = value,
            Reg16::SP => self.sp = value,
            Reg16::PC => self.pc = value,
        }
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        self.get8(Reg8::F) & flag.mask() != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let f = self.get8(Reg8::F);
        let f = if value { f | flag.mask() } else { f & !flag.mask() };
        self.set8(Reg8::F, f);
    }

    /// Overwrite all four flags at once.
    pub fn set_flags(&mut self, zero: bool, subtract: bool, half_carry: bool, carry: bool) {
        let mut f = 0;
        if zero {
            f |= Flag::Zero.mask();
        }
        if subtract {
            f |= Flag::Subtract.mask();
        }
        if half_carry {
            f |= Flag::HalfCarry.mask();
        }
        if carry {
            f |= Flag::Carry.mask();
        }
        self.set8(Reg8::F, f);
    }

    pub fn condition(&self, cond: Condition) -> bool {
        match cond {
            Condition::NotZero => !self.flag(Flag::Zero),
            Condition::Zero => self.flag(Flag::Zero),
            Condition::NotCarry => !self.flag(Flag::Carry),
            Condition::Carry => self.flag(Flag::Carry),
        }
    }

    // Shorthands for the registers the handlers touch constantly.

    #[inline]
    pub fn a(&self) -> u8 {
        self.get8(Reg8::A)
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.set8(Reg8::A, value);
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        self.hl
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        self.hl = value;
    }

    #[inline]
    pub fn sp(&self) -> u16 {
        self.sp
    }

    #[inline]
    pub fn set_sp(&mut self, value: u16) {
        self.sp = value;
    }

    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    #[inline]
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Registers {
        let mut regs = Registers::new();
        regs.set16(Reg16::AF, 0x1230);
        regs.set16(Reg16::BC, 0x5678);
        regs.set16(Reg16::DE, 0x9ABC);
        regs.set16(Reg16::HL, 0xDEF0);
        regs.set16(Reg16::SP, 0x1111);
        regs.set16(Reg16::PC, 0x2222);
        regs
    }

    #[test]
    fn test_get8_splits_pairs() {
        let regs = loaded();
        assert_eq!(regs.get8(Reg8::A), 0x12);
        assert_eq!(regs.get8(Reg8::F), 0x30);
        assert_eq!(regs.get8(Reg8::B), 0x56);
        assert_eq!(regs.get8(Reg8::C), 0x78);
        assert_eq!(regs.get8(Reg8::D), 0x9A);
        assert_eq!(regs.get8(Reg8::E), 0xBC);
        assert_eq!(regs.get8(Reg8::H), 0xDE);
        assert_eq!(regs.get8(Reg8::L), 0xF0);
    }

    #[test]
    fn test_set8_leaves_other_half_alone() {
        let mut regs = loaded();
        regs.set8(Reg8::B, 0x01);
        assert_eq!(regs.get16(Reg16::BC), 0x0178);
        regs.set8(Reg8::C, 0x02);
        assert_eq!(regs.get16(Reg16::BC), 0x0102);
        regs.set8(Reg8::H, 0x07);
        regs.set8(Reg8::L, 0x08);
        assert_eq!(regs.get16(Reg16::HL), 0x0708);
        regs.set8(Reg8::A, 0xAA);
        assert_eq!(regs.get16(Reg16::AF), 0xAA30);
        // untouched pairs
        assert_eq!(regs.get16(Reg16::DE), 0x9ABC);
        assert_eq!(regs.sp(), 0x1111);
        assert_eq!(regs.pc(), 0x2222);
    }

    #[test]
    fn test_f_low_nibble_always_zero() {
        let mut regs = Registers::new();
        regs.set16(Reg16::AF, 0xFFFF);
        assert_eq!(regs.get16(Reg16::AF), 0xFFF0);
        regs.set8(Reg8::F, 0x0F);
        assert_eq!(regs.get8(Reg8::F), 0x00);
    }

    #[test]
    fn test_flags() {
        let mut regs = Registers::new();
        assert!(!regs.flag(Flag::Zero));
        regs.set_flag(Flag::Zero, true);
        regs.set_flag(Flag::Carry, true);
        assert_eq!(regs.get8(Reg8::F), 0x90);
        assert!(regs.flag(Flag::Zero));
        assert!(!regs.flag(Flag::Subtract));
        assert!(!regs.flag(Flag::HalfCarry));
        assert!(regs.flag(Flag::Carry));

        regs.set_flag(Flag::Zero, false);
        assert_eq!(regs.get8(Reg8::F), 0x10);

        regs.set_flags(false, true, true, false);
        assert_eq!(regs.get8(Reg8::F), 0x60);
        // A is not touched by flag writes
        assert_eq!(regs.a(), 0);
    }

    #[test]
    fn test_conditions() {
        let mut regs = Registers::new();
        regs.set_flags(true, false, false, false);
        assert!(regs.condition(Condition::Zero));
        assert!(!regs.condition(Condition::NotZero));
        assert!(regs.condition(Condition::NotCarry));
        assert!(!regs.condition(Condition::Carry));

        assert_eq!(Condition::from_opcode(0x20), Condition::NotZero);
        assert_eq!(Condition::from_opcode(0xC8), Condition::Zero);
        assert_eq!(Condition::from_opcode(0xD2), Condition::NotCarry);
        assert_eq!(Condition::from_opcode(0xDC), Condition::Carry);
    }
}
