//! Pure arithmetic primitives.
//!
//! These compute a wrapped result together with the carry and half-carry
//! outcomes. They never touch CPU state; the handlers decide which flags the
//! outcome is written to.

/// Result of an arithmetic primitive, consumed immediately by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationResult<T> {
    pub result: T,
    pub carry: bool,
    pub half_carry: bool,
}

/// 8-bit addition.
#[inline]
pub fn add8(a: u8, b: u8) -> OperationResult<u8> {
    adc8(a, b, false)
}

/// 8-bit addition with carry-in.
///
/// The carry is added into both the nibble sum and the full sum, so an
/// operand of 0xFF with carry set still reports the carries correctly.
#[inline]
pub fn adc8(a: u8, b: u8, carry_in: bool) -> OperationResult<u8> {
    let c = carry_in as u8;
    let full = a as u16 + b as u16 + c as u16;
    OperationResult {
        result: full as u8,
        carry: full > 0xFF,
        half_carry: (a & 0x0F) + (b & 0x0F) + c > 0x0F,
    }
}

/// 8-bit subtraction; carry signals an unsigned borrow.
#[inline]
pub fn sub8(a: u8, b: u8) -> OperationResult<u8> {
    sbc8(a, b, false)
}

/// 8-bit subtraction with borrow-in.
#[inline]
pub fn sbc8(a: u8, b: u8, carry_in: bool) -> OperationResult<u8> {
    let c = carry_in as u8;
    OperationResult {
        result: a.wrapping_sub(b).wrapping_sub(c),
        carry: (b as u16 + c as u16) > a as u16,
        half_carry: (b & 0x0F) + c > (a & 0x0F),
    }
}

/// 16-bit addition. Half carry is the carry out of bit 11.
#[inline]
pub fn add16(a: u16, b: u16) -> OperationResult<u16> {
    let (result, carry) = a.overflowing_add(b);
    OperationResult {
        result,
        carry,
        half_carry: (a & 0x0FFF) + (b & 0x0FFF) > 0x0FFF,
    }
}

/// SP plus a signed 8-bit offset, as used by `ADD SP,e` and `LD HL,SP+e`.
///
/// The flags come from the unsigned addition of SP's low byte with the raw
/// offset byte, not from the 16-bit sum.
#[inline]
pub fn add_sp_offset(sp: u16, offset: u8) -> OperationResult<u16> {
    let low = add8(sp as u8, offset);
    OperationResult {
        result: sp.wrapping_add(offset as i8 as u16),
        carry: low.carry,
        half_carry: low.half_carry,
    }
}
