//! Tests for 8-bit/16-bit arithmetic, logic and flag instructions

use super::{make_cpu, run, ORIGIN};
use crate::cpu_sm83::{CpuSm83, Flag, FlatMemory, MemorySm83, Reg16, Reg8};

/// (Z, N, H, C)
fn flags(cpu: &CpuSm83<FlatMemory>) -> (bool, bool, bool, bool) {
    (
        cpu.regs.flag(Flag::Zero),
        cpu.regs.flag(Flag::Subtract),
        cpu.regs.flag(Flag::HalfCarry),
        cpu.regs.flag(Flag::Carry),
    )
}

#[test]
fn test_add_a_b() {
    let mut cpu = make_cpu(&[0x80]);
    cpu.regs.set16(Reg16::BC, 0x0200);
    cpu.regs.set_a(0x02);

    assert_eq!(cpu.step(), Ok(1));
    assert_eq!(cpu.regs.a(), 0x04);
    assert_eq!(flags(&cpu), (false, false, false, false));
    assert_eq!(cpu.regs.pc(), ORIGIN + 1);
}

#[test]
fn test_adc_a_b_with_carry_in() {
    let mut cpu = make_cpu(&[0x88]);
    cpu.regs.set_a(0xFF);
    cpu.regs.set8(Reg8::B, 0x01);
    cpu.regs.set_flag(Flag::Carry, true);

    assert_eq!(cpu.step(), Ok(1));
    assert_eq!(cpu.regs.a(), 0x01);
    assert_eq!(flags(&cpu), (false, false, true, true));
}

#[test]
fn test_adc_carry_from_ff_operand() {
    // ADC A,0xFF with A=0x00 and carry set wraps to 0x00
    let mut cpu = make_cpu(&[0xCE, 0xFF]);
    cpu.regs.set_a(0x00);
    cpu.regs.set_flag(Flag::Carry, true);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(flags(&cpu), (true, false, true, true));
}

#[test]
fn test_add_zero_half_carry_carry() {
    // ADD A,n
    let mut cpu = make_cpu(&[0xC6, 0xC6]);
    cpu.regs.set_a(0x3A);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(flags(&cpu), (true, false, true, true));
}

#[test]
fn test_sub_and_cp() {
    // SUB A,C; CP A,0x3E
    let mut cpu = make_cpu(&[0x91, 0xFE, 0x3E]);
    cpu.regs.set_a(0x3E);
    cpu.regs.set8(Reg8::C, 0x0F);

    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a(), 0x2F);
    assert_eq!(flags(&cpu), (false, true, true, false));

    // CP leaves A untouched
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a(), 0x2F);
    assert_eq!(flags(&cpu), (false, true, false, true));
}

#[test]
fn test_sbc_with_borrow() {
    // SBC A,0x01
    let mut cpu = make_cpu(&[0xDE, 0x01]);
    cpu.regs.set_a(0x02);
    cpu.regs.set_flag(Flag::Carry, true);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(flags(&cpu), (true, true, false, false));
}

#[test]
fn test_logic_flags() {
    // AND A,0x0F; OR A,0x00; XOR A,A
    let mut cpu = make_cpu(&[0xE6, 0x0F, 0xF6, 0x00, 0xAF]);
    cpu.regs.set_a(0xF0);
    cpu.regs.set_flag(Flag::Carry, true);

    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(flags(&cpu), (true, false, true, false));

    cpu.regs.set_a(0x80);
    run(&mut cpu, 1);
    assert_eq!(flags(&cpu), (false, false, false, false));

    assert_eq!(cpu.step(), Ok(1));
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(flags(&cpu), (true, false, false, false));
}

#[test]
fn test_alu_indirect_hl_costs_two() {
    // ADD A,(HL)
    let mut cpu = make_cpu(&[0x86]);
    cpu.regs.set_hl(0xC000);
    cpu.memory.write(0xC000, 0x10);
    cpu.regs.set_a(0x01);
    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.regs.a(), 0x11);
}

#[test]
fn test_inc_dec_preserve_carry() {
    // INC A; DEC B
    let mut cpu = make_cpu(&[0x3C, 0x05]);
    cpu.regs.set_a(0x0F);
    cpu.regs.set8(Reg8::B, 0x01);
    cpu.regs.set_flag(Flag::Carry, true);

    assert_eq!(cpu.step(), Ok(1));
    assert_eq!(cpu.regs.a(), 0x10);
    assert_eq!(flags(&cpu), (false, false, true, true));

    assert_eq!(cpu.step(), Ok(1));
    assert_eq!(cpu.regs.get8(Reg8::B), 0x00);
    assert_eq!(flags(&cpu), (true, true, false, true));
}

#[test]
fn test_inc_dec_indirect_hl() {
    // INC (HL); DEC (HL); DEC (HL)
    let mut cpu = make_cpu(&[0x34, 0x35, 0x35]);
    cpu.regs.set_hl(0xC000);
    cpu.memory.write(0xC000, 0xFF);

    assert_eq!(cpu.step(), Ok(3));
    assert_eq!(cpu.memory.read(0xC000), 0x00);
    assert!(cpu.regs.flag(Flag::Zero));
    assert_eq!(run(&mut cpu, 2), 6);
    assert_eq!(cpu.memory.read(0xC000), 0xFE);
}

#[test]
fn test_inc_dec_rr_leave_flags() {
    // INC BC; DEC DE; INC SP
    let mut cpu = make_cpu(&[0x03, 0x1B, 0x33]);
    cpu.regs.set16(Reg16::AF, 0x00F0);
    cpu.regs.set16(Reg16::BC, 0xFFFF);
    cpu.regs.set16(Reg16::DE, 0x0000);

    assert_eq!(run(&mut cpu, 3), 6);
    assert_eq!(cpu.regs.get16(Reg16::BC), 0x0000);
    assert_eq!(cpu.regs.get16(Reg16::DE), 0xFFFF);
    assert_eq!(cpu.regs.sp(), 0xFFFF);
    assert_eq!(cpu.regs.get8(Reg8::F), 0xF0);
}

#[test]
fn test_add_hl_rr_flags() {
    // ADD HL,BC; ADD HL,HL
    let mut cpu = make_cpu(&[0x09, 0x29]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set16(Reg16::BC, 0x0001);
    cpu.regs.set_flag(Flag::Zero, true);

    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.regs.hl(), 0x1000);
    // Z untouched, H from bit 11
    assert_eq!(flags(&cpu), (true, false, true, false));

    cpu.regs.set_hl(0x8000);
    run(&mut cpu, 1);
    assert_eq!(cpu.regs.hl(), 0x0000);
    assert_eq!(flags(&cpu), (true, false, false, true));
}

#[test]
fn test_daa_after_bcd_add() {
    // LD A,0x15; ADD A,0x27; DAA
    let mut cpu = make_cpu(&[0x3E, 0x15, 0xC6, 0x27, 0x27]);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.a(), 0x42);
    assert!(!cpu.regs.flag(Flag::Carry));
}

#[test]
fn test_daa_after_bcd_add_with_carry_out() {
    // LD A,0x99; ADD A,0x01; DAA
    let mut cpu = make_cpu(&[0x3E, 0x99, 0xC6, 0x01, 0x27]);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.a(), 0x00);
    assert_eq!(flags(&cpu), (true, false, false, true));
}

#[test]
fn test_daa_after_bcd_sub() {
    // LD A,0x42; SUB A,0x15; DAA
    let mut cpu = make_cpu(&[0x3E, 0x42, 0xD6, 0x15, 0x27]);
    run(&mut cpu, 3);
    assert_eq!(cpu.regs.a(), 0x27);
    assert_eq!(flags(&cpu), (false, true, false, false));
}

#[test]
fn test_cpl_scf_ccf() {
    // CPL; SCF; CCF
    let mut cpu = make_cpu(&[0x2F, 0x37, 0x3F]);
    cpu.regs.set_a(0x35);
    cpu.regs.set_flag(Flag::Zero, true);

    run(&mut cpu, 1);
    assert_eq!(cpu.regs.a(), 0xCA);
    assert_eq!(flags(&cpu), (true, true, true, false));

    run(&mut cpu, 1);
    assert_eq!(flags(&cpu), (true, false, false, true));

    run(&mut cpu, 1);
    assert_eq!(flags(&cpu), (true, false, false, false));
}
