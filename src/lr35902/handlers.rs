use crate::lr35902::alu;
use crate::lr35902::context::{pair, stack_pair, Context, HL_OPERAND};
use crate::lr35902::opcodes::PREFIXED;
use crate::lr35902::registers::{Flags, Reg16};
use crate::lr35902::state::CpuState;

/// Base of the high page used by LDH and LD (C).
const HIGH_PAGE: u16 = 0xff00;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    NZ,
    Z,
    NC,
    C,
}

impl Condition {
    /// Condition encoded in bits 3-4 of a branch opcode.
    fn lookup(opcode: u8) -> Condition {
        match (opcode >> 3) & 0b11 {
            0b00 => Condition::NZ,
            0b01 => Condition::Z,
            0b10 => Condition::NC,
            _ => Condition::C,
        }
    }

    fn holds(self, ctx: &Context) -> bool {
        match self {
            Condition::NZ => !ctx.registers.zero(),
            Condition::Z => ctx.registers.zero(),
            Condition::NC => !ctx.registers.carry(),
            Condition::C => ctx.registers.carry(),
        }
    }
}

/// Bits 3-5 of the opcode: destination register, ALU operation or RST vector.
#[inline]
fn y(opcode: u8) -> u8 {
    (opcode >> 3) & 0b111
}

/// Bits 4-5 of the opcode: register pair.
#[inline]
fn p(opcode: u8) -> u8 {
    (opcode >> 4) & 0b11
}

/// Handlers for the unprefixed instruction set. Every handler returns the
/// instruction length in bytes and its cost in T-cycles.
pub struct Handlers {}

impl Handlers {
    pub fn illegal(ctx: &mut Context) -> (u16, usize) {
        panic!("Illegal opcode ${:02x} dispatched at ${:04x}", ctx.opcode, ctx.pc());
    }

    pub fn nop(_ctx: &mut Context) -> (u16, usize) {
        (1, 4)
    }

    pub fn stop(ctx: &mut Context) -> (u16, usize) {
        ctx.state.set_state(CpuState::Stopped);
        (2, 4)
    }

    pub fn halt(ctx: &mut Context) -> (u16, usize) {
        ctx.state.set_state(CpuState::Halted);
        (1, 4)
    }

    pub fn di(ctx: &mut Context) -> (u16, usize) {
        ctx.state.set_ime(false);
        (1, 4)
    }

    pub fn ei(ctx: &mut Context) -> (u16, usize) {
        ctx.state.schedule_ime();
        (1, 4)
    }

    /// CB prefix: the byte after the prefix selects the handler.
    pub fn prefix(ctx: &mut Context) -> (u16, usize) {
        ctx.opcode = ctx.imm8(1);
        PREFIXED[ctx.opcode as usize](ctx)
    }

    // ld rr, imm16
    pub fn ld_rr_imm16(ctx: &mut Context) -> (u16, usize) {
        let value = ctx.imm16();
        ctx.registers.write16(pair(p(ctx.opcode)), value);
        (3, 12)
    }

    // ld (imm16), sp
    pub fn ld_imm16_sp(ctx: &mut Context) -> (u16, usize) {
        let addr = ctx.imm16();
        let sp = ctx.registers.sp.get();
        ctx.write16_unchecked(addr, sp);
        (3, 20)
    }

    /// ld (bc), a / ld (de), a / ld (hl+), a / ld (hl-), a
    pub fn ld_indirect_a(ctx: &mut Context) -> (u16, usize) {
        let addr = Handlers::indirect_address(ctx);
        let a = ctx.registers.a();
        ctx.write_unchecked(addr, a);
        (1, 8)
    }

    /// ld a, (bc) / ld a, (de) / ld a, (hl+) / ld a, (hl-)
    pub fn ld_a_indirect(ctx: &mut Context) -> (u16, usize) {
        let addr = Handlers::indirect_address(ctx);
        let value = ctx.read_unchecked(addr);
        ctx.registers.set_a(value);
        (1, 8)
    }

    /// Address for the indirect accumulator loads. HL is post-incremented or
    /// post-decremented by the last two encodings.
    fn indirect_address(ctx: &mut Context) -> u16 {
        match p(ctx.opcode) {
            0b00 => ctx.registers.read16(Reg16::BC),
            0b01 => ctx.registers.read16(Reg16::DE),
            code => {
                let hl = ctx.registers.read16(Reg16::HL);
                let next = if code == 0b10 {
                    hl.wrapping_add(1)
                } else {
                    hl.wrapping_sub(1)
                };
                ctx.registers.write16(Reg16::HL, next);
                hl
            }
        }
    }

    pub fn inc_rr(ctx: &mut Context) -> (u16, usize) {
        let register = pair(p(ctx.opcode));
        let value = ctx.registers.read16(register).wrapping_add(1);
        ctx.registers.write16(register, value);
        (1, 8)
    }

    pub fn dec_rr(ctx: &mut Context) -> (u16, usize) {
        let register = pair(p(ctx.opcode));
        let value = ctx.registers.read16(register).wrapping_sub(1);
        ctx.registers.write16(register, value);
        (1, 8)
    }

    pub fn add_hl_rr(ctx: &mut Context) -> (u16, usize) {
        let hl = ctx.registers.read16(Reg16::HL);
        let rhs = ctx.registers.read16(pair(p(ctx.opcode)));
        let result = alu::add16(ctx.registers, hl, rhs);
        ctx.registers.write16(Reg16::HL, result);
        (1, 8)
    }

    pub fn inc_r(ctx: &mut Context) -> (u16, usize) {
        let code = y(ctx.opcode);
        let value = ctx.read_operand(code);
        let result = alu::inc8(ctx.registers, value);
        ctx.write_operand(code, result);
        (1, if code == HL_OPERAND { 12 } else { 4 })
    }

    pub fn dec_r(ctx: &mut Context) -> (u16, usize) {
        let code = y(ctx.opcode);
        let value = ctx.read_operand(code);
        let result = alu::dec8(ctx.registers, value);
        ctx.write_operand(code, result);
        (1, if code == HL_OPERAND { 12 } else { 4 })
    }

    // ld r, imm8 / ld (hl), imm8
    pub fn ld_r_imm8(ctx: &mut Context) -> (u16, usize) {
        let code = y(ctx.opcode);
        let value = ctx.imm8(1);
        ctx.write_operand(code, value);
        (2, if code == HL_OPERAND { 12 } else { 8 })
    }

    pub fn rlca(ctx: &mut Context) -> (u16, usize) {
        let a = ctx.registers.a();
        let result = alu::rlc(ctx.registers, a);
        ctx.registers.set_a(result);
        (1, 4)
    }

    pub fn rrca(ctx: &mut Context) -> (u16, usize) {
        let a = ctx.registers.a();
        let result = alu::rrc(ctx.registers, a);
        ctx.registers.set_a(result);
        (1, 4)
    }

    pub fn rla(ctx: &mut Context) -> (u16, usize) {
        let a = ctx.registers.a();
        let result = alu::rl(ctx.registers, a);
        ctx.registers.set_a(result);
        (1, 4)
    }

    pub fn rra(ctx: &mut Context) -> (u16, usize) {
        let a = ctx.registers.a();
        let result = alu::rr(ctx.registers, a);
        ctx.registers.set_a(result);
        (1, 4)
    }

    pub fn daa(ctx: &mut Context) -> (u16, usize) {
        alu::daa(ctx.registers);
        (1, 4)
    }

    pub fn cpl(ctx: &mut Context) -> (u16, usize) {
        let a = !ctx.registers.a();
        ctx.registers.set_a(a);
        ctx.registers.update_flag(Flags::SUBTRACT, true);
        ctx.registers.update_flag(Flags::HALF_CARRY, true);
        (1, 4)
    }

    pub fn scf(ctx: &mut Context) -> (u16, usize) {
        ctx.registers.update_flag(Flags::SUBTRACT, false);
        ctx.registers.update_flag(Flags::HALF_CARRY, false);
        ctx.registers.update_flag(Flags::CARRY, true);
        (1, 4)
    }

    pub fn ccf(ctx: &mut Context) -> (u16, usize) {
        let carry = ctx.registers.carry();
        ctx.registers.update_flag(Flags::SUBTRACT, false);
        ctx.registers.update_flag(Flags::HALF_CARRY, false);
        ctx.registers.update_flag(Flags::CARRY, !carry);
        (1, 4)
    }

    // ld r, r' / ld r, (hl) / ld (hl), r
    pub fn ld_r_r(ctx: &mut Context) -> (u16, usize) {
        let dst = y(ctx.opcode);
        let src = ctx.opcode & 0b111;
        let value = ctx.read_operand(src);
        ctx.write_operand(dst, value);
        let touches_memory = dst == HL_OPERAND || src == HL_OPERAND;
        (1, if touches_memory { 8 } else { 4 })
    }

    /// add/adc/sub/sbc/and/xor/or/cp a, r
    pub fn alu_r(ctx: &mut Context) -> (u16, usize) {
        let src = ctx.opcode & 0b111;
        let value = ctx.read_operand(src);
        Handlers::accumulate(ctx, value);
        (1, if src == HL_OPERAND { 8 } else { 4 })
    }

    /// add/adc/sub/sbc/and/xor/or/cp a, imm8
    pub fn alu_imm8(ctx: &mut Context) -> (u16, usize) {
        let value = ctx.imm8(1);
        Handlers::accumulate(ctx, value);
        (2, 8)
    }

    fn accumulate(ctx: &mut Context, value: u8) {
        let a = ctx.registers.a();
        let carry = ctx.registers.carry();
        let regs = &mut *ctx.registers;
        let result = match y(ctx.opcode) {
            0 => alu::add8(regs, a, value, false),
            1 => alu::add8(regs, a, value, carry),
            2 => alu::sub8(regs, a, value, false),
            3 => alu::sub8(regs, a, value, carry),
            4 => alu::and8(regs, a, value),
            5 => alu::xor8(regs, a, value),
            6 => alu::or8(regs, a, value),
            _ => {
                // cp only sets flags
                alu::sub8(regs, a, value, false);
                a
            }
        };
        ctx.registers.set_a(result);
    }

    pub fn jr(ctx: &mut Context) -> (u16, usize) {
        Handlers::relative_jump(ctx);
        (2, 12)
    }

    pub fn jr_cc(ctx: &mut Context) -> (u16, usize) {
        if Condition::lookup(ctx.opcode).holds(ctx) {
            Handlers::relative_jump(ctx);
            (2, 12)
        } else {
            (2, 8)
        }
    }

    /// The offset is relative to the instruction that follows the jump.
    fn relative_jump(ctx: &mut Context) {
        let offset = ctx.imm8(1) as i8;
        let target = ctx.pc().wrapping_add(2).wrapping_add_signed(offset as i16);
        ctx.jump(target);
    }

    pub fn jp(ctx: &mut Context) -> (u16, usize) {
        let target = ctx.imm16();
        ctx.jump(target);
        (3, 16)
    }

    pub fn jp_cc(ctx: &mut Context) -> (u16, usize) {
        if Condition::lookup(ctx.opcode).holds(ctx) {
            let target = ctx.imm16();
            ctx.jump(target);
            (3, 16)
        } else {
            (3, 12)
        }
    }

    pub fn jp_hl(ctx: &mut Context) -> (u16, usize) {
        let target = ctx.registers.read16(Reg16::HL);
        ctx.jump(target);
        (1, 4)
    }

    pub fn call(ctx: &mut Context) -> (u16, usize) {
        let target = ctx.imm16();
        Handlers::call_to(ctx, target, 3);
        (3, 24)
    }

    pub fn call_cc(ctx: &mut Context) -> (u16, usize) {
        if Condition::lookup(ctx.opcode).holds(ctx) {
            let target = ctx.imm16();
            Handlers::call_to(ctx, target, 3);
            (3, 24)
        } else {
            (3, 12)
        }
    }

    pub fn rst(ctx: &mut Context) -> (u16, usize) {
        let vector = (y(ctx.opcode) as u16) * 8;
        Handlers::call_to(ctx, vector, 1);
        (1, 16)
    }

    fn call_to(ctx: &mut Context, target: u16, length: u16) {
        let ret = ctx.pc().wrapping_add(length);
        ctx.push(ret);
        ctx.jump(target);
    }

    pub fn ret(ctx: &mut Context) -> (u16, usize) {
        let target = ctx.pop();
        ctx.jump(target);
        (1, 16)
    }

    pub fn ret_cc(ctx: &mut Context) -> (u16, usize) {
        if Condition::lookup(ctx.opcode).holds(ctx) {
            let target = ctx.pop();
            ctx.jump(target);
            (1, 20)
        } else {
            (1, 8)
        }
    }

    pub fn reti(ctx: &mut Context) -> (u16, usize) {
        ctx.state.set_ime(true);
        Handlers::ret(ctx)
    }

    pub fn push(ctx: &mut Context) -> (u16, usize) {
        let value = ctx.registers.read16(stack_pair(p(ctx.opcode)));
        ctx.push(value);
        (1, 16)
    }

    pub fn pop(ctx: &mut Context) -> (u16, usize) {
        let value = ctx.pop();
        ctx.registers.write16(stack_pair(p(ctx.opcode)), value);
        (1, 12)
    }

    // ldh (imm8), a
    pub fn ldh_imm8_a(ctx: &mut Context) -> (u16, usize) {
        let addr = HIGH_PAGE + ctx.imm8(1) as u16;
        let a = ctx.registers.a();
        ctx.write_unchecked(addr, a);
        (2, 12)
    }

    // ldh a, (imm8)
    pub fn ldh_a_imm8(ctx: &mut Context) -> (u16, usize) {
        let addr = HIGH_PAGE + ctx.imm8(1) as u16;
        let value = ctx.read_unchecked(addr);
        ctx.registers.set_a(value);
        (2, 12)
    }

    // ld (c), a
    pub fn ld_c_a(ctx: &mut Context) -> (u16, usize) {
        let addr = HIGH_PAGE + ctx.registers.bc.lo() as u16;
        let a = ctx.registers.a();
        ctx.write_unchecked(addr, a);
        (1, 8)
    }

    // ld a, (c)
    pub fn ld_a_c(ctx: &mut Context) -> (u16, usize) {
        let addr = HIGH_PAGE + ctx.registers.bc.lo() as u16;
        let value = ctx.read_unchecked(addr);
        ctx.registers.set_a(value);
        (1, 8)
    }

    // ld (imm16), a
    pub fn ld_imm16_a(ctx: &mut Context) -> (u16, usize) {
        let addr = ctx.imm16();
        let a = ctx.registers.a();
        ctx.write_unchecked(addr, a);
        (3, 16)
    }

    // ld a, (imm16)
    pub fn ld_a_imm16(ctx: &mut Context) -> (u16, usize) {
        let addr = ctx.imm16();
        let value = ctx.read_unchecked(addr);
        ctx.registers.set_a(value);
        (3, 16)
    }

    pub fn add_sp_imm8(ctx: &mut Context) -> (u16, usize) {
        let offset = ctx.imm8(1) as i8;
        let sp = ctx.registers.sp.get();
        let result = alu::add_sp(ctx.registers, sp, offset);
        ctx.registers.sp.set(result);
        (2, 16)
    }

    // ld hl, sp+imm8
    pub fn ld_hl_sp_imm8(ctx: &mut Context) -> (u16, usize) {
        let offset = ctx.imm8(1) as i8;
        let sp = ctx.registers.sp.get();
        let result = alu::add_sp(ctx.registers, sp, offset);
        ctx.registers.write16(Reg16::HL, result);
        (2, 12)
    }

    pub fn ld_sp_hl(ctx: &mut Context) -> (u16, usize) {
        let hl = ctx.registers.read16(Reg16::HL);
        ctx.registers.sp.set(hl);
        (1, 8)
    }
}
