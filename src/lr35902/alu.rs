//! Arithmetic and flag rules shared by the instruction handlers.
//!
//! Every helper takes the operands, writes the resulting flags and returns the
//! result; storing the result is up to the caller.

use crate::lr35902::registers::{Flags, Registers};

pub fn inc8(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_add(1);
    regs.update_flag(Flags::ZERO, result == 0);
    regs.update_flag(Flags::SUBTRACT, false);
    regs.update_flag(Flags::HALF_CARRY, (value & 0x0f) == 0x0f);
    result
}

pub fn dec8(regs: &mut Registers, value: u8) -> u8 {
    let result = value.wrapping_sub(1);
    regs.update_flag(Flags::ZERO, result == 0);
    regs.update_flag(Flags::SUBTRACT, true);
    regs.update_flag(Flags::HALF_CARRY, (value & 0x0f) == 0x00);
    result
}

/// ADD HL,rr. Zero is left alone.
pub fn add16(regs: &mut Registers, lhs: u16, rhs: u16) -> u16 {
    let result = lhs as u32 + rhs as u32;
    regs.update_flag(Flags::SUBTRACT, false);
    regs.update_flag(Flags::HALF_CARRY, (lhs & 0x0fff) + (rhs & 0x0fff) > 0x0fff);
    regs.update_flag(Flags::CARRY, result > 0xffff);
    result as u16
}

/// SP plus a signed byte, as used by ADD SP,e and LD HL,SP+e. Carries come
/// from the unsigned low byte.
pub fn add_sp(regs: &mut Registers, sp: u16, offset: i8) -> u16 {
    let unsigned = offset as u8 as u16;
    let half_carry = (sp & 0x000f) + (unsigned & 0x000f) > 0x000f;
    let carry = (sp & 0x00ff) + unsigned > 0x00ff;
    regs.set_flags(false, false, half_carry, carry);
    sp.wrapping_add_signed(offset as i16)
}

pub fn add8(regs: &mut Registers, lhs: u8, rhs: u8, carry_in: bool) -> u8 {
    let carry = carry_in as u16;
    let result = lhs as u16 + rhs as u16 + carry;
    let half_carry = (lhs & 0x0f) as u16 + (rhs & 0x0f) as u16 + carry > 0x0f;
    regs.set_flags(result as u8 == 0, false, half_carry, result > 0xff);
    result as u8
}

pub fn sub8(regs: &mut Registers, lhs: u8, rhs: u8, carry_in: bool) -> u8 {
    let carry = carry_in as i16;
    let result = lhs as i16 - rhs as i16 - carry;
    let half_carry = (lhs & 0x0f) as i16 - (rhs & 0x0f) as i16 - carry < 0;
    regs.set_flags(result as u8 == 0, true, half_carry, result < 0);
    result as u8
}

pub fn and8(regs: &mut Registers, lhs: u8, rhs: u8) -> u8 {
    let result = lhs & rhs;
    regs.set_flags(result == 0, false, true, false);
    result
}

pub fn xor8(regs: &mut Registers, lhs: u8, rhs: u8) -> u8 {
    let result = lhs ^ rhs;
    regs.set_flags(result == 0, false, false, false);
    result
}

pub fn or8(regs: &mut Registers, lhs: u8, rhs: u8) -> u8 {
    let result = lhs | rhs;
    regs.set_flags(result == 0, false, false, false);
    result
}

fn shifted(regs: &mut Registers, result: u8, carry: bool) -> u8 {
    regs.set_flags(result == 0, false, false, carry);
    result
}

pub fn rlc(regs: &mut Registers, value: u8) -> u8 {
    shifted(regs, value.rotate_left(1), value & 0x80 != 0)
}

pub fn rrc(regs: &mut Registers, value: u8) -> u8 {
    shifted(regs, value.rotate_right(1), value & 0x01 != 0)
}

pub fn rl(regs: &mut Registers, value: u8) -> u8 {
    let carry_in = regs.carry() as u8;
    shifted(regs, (value << 1) | carry_in, value & 0x80 != 0)
}

pub fn rr(regs: &mut Registers, value: u8) -> u8 {
    let carry_in = regs.carry() as u8;
    shifted(regs, (value >> 1) | (carry_in << 7), value & 0x01 != 0)
}

pub fn sla(regs: &mut Registers, value: u8) -> u8 {
    shifted(regs, value << 1, value & 0x80 != 0)
}

pub fn sra(regs: &mut Registers, value: u8) -> u8 {
    shifted(regs, (value >> 1) | (value & 0x80), value & 0x01 != 0)
}

pub fn srl(regs: &mut Registers, value: u8) -> u8 {
    shifted(regs, value >> 1, value & 0x01 != 0)
}

pub fn swap(regs: &mut Registers, value: u8) -> u8 {
    shifted(regs, value.rotate_left(4), false)
}

pub fn bit(regs: &mut Registers, index: u8, value: u8) {
    regs.update_flag(Flags::ZERO, value & (1 << index) == 0);
    regs.update_flag(Flags::SUBTRACT, false);
    regs.update_flag(Flags::HALF_CARRY, true);
}

/// Decimal adjust of A after a BCD addition or subtraction.
pub fn daa(regs: &mut Registers) {
    let mut a = regs.a();
    let mut carry = regs.carry();

    if !regs.subtract() {
        if carry || a > 0x99 {
            a = a.wrapping_add(0x60);
            carry = true;
        }
        if regs.half_carry() || (a & 0x0f) > 0x09 {
            a = a.wrapping_add(0x06);
        }
    } else {
        if carry {
            a = a.wrapping_sub(0x60);
        }
        if regs.half_carry() {
            a = a.wrapping_sub(0x06);
        }
    }

    regs.set_a(a);
    regs.update_flag(Flags::ZERO, a == 0);
    regs.update_flag(Flags::HALF_CARRY, false);
    regs.update_flag(Flags::CARRY, carry);
}
