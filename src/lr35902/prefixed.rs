use crate::lr35902::alu;
use crate::lr35902::context::{Context, HL_OPERAND};

/// Bit index for BIT/RES/SET, or the operation for rotates and shifts.
#[inline]
fn selector(opcode: u8) -> u8 {
    (opcode >> 3) & 0b111
}

/// Handlers for the CB-prefixed instruction set. `ctx.opcode` holds the byte
/// after the prefix and the returned length covers both bytes.
pub struct Prefixed {}

impl Prefixed {
    /// rlc/rrc/rl/rr/sla/sra/swap/srl r
    pub fn shift(ctx: &mut Context) -> (u16, usize) {
        let code = ctx.opcode & 0b111;
        let value = ctx.read_operand(code);
        let regs = &mut *ctx.registers;
        let result = match selector(ctx.opcode) {
            0 => alu::rlc(regs, value),
            1 => alu::rrc(regs, value),
            2 => alu::rl(regs, value),
            3 => alu::rr(regs, value),
            4 => alu::sla(regs, value),
            5 => alu::sra(regs, value),
            6 => alu::swap(regs, value),
            _ => alu::srl(regs, value),
        };
        ctx.write_operand(code, result);
        (2, if code == HL_OPERAND { 16 } else { 8 })
    }

    pub fn bit(ctx: &mut Context) -> (u16, usize) {
        let code = ctx.opcode & 0b111;
        let value = ctx.read_operand(code);
        alu::bit(ctx.registers, selector(ctx.opcode), value);
        (2, if code == HL_OPERAND { 12 } else { 8 })
    }

    pub fn res(ctx: &mut Context) -> (u16, usize) {
        let code = ctx.opcode & 0b111;
        let value = ctx.read_operand(code) & !(1 << selector(ctx.opcode));
        ctx.write_operand(code, value);
        (2, if code == HL_OPERAND { 16 } else { 8 })
    }

    pub fn set(ctx: &mut Context) -> (u16, usize) {
        let code = ctx.opcode & 0b111;
        let value = ctx.read_operand(code) | (1 << selector(ctx.opcode));
        ctx.write_operand(code, value);
        (2, if code == HL_OPERAND { 16 } else { 8 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lr35902::opcodes::NO_PREFIX;
    use crate::lr35902::registers::{Reg16, Reg8, Registers};
    use crate::lr35902::state::StateManager;
    use crate::memory::ram::Ram;
    use crate::memory::Memory;

    /// Runs `cb <opcode>` at $c000 with HL pointing at $d000.
    fn run_cb(opcode: u8, hl_value: u8, setup: impl FnOnce(&mut Registers)) -> (Registers, Ram, (u16, usize)) {
        let mut regs = Registers::default();
        regs.pc.set(0xc000);
        regs.write16(Reg16::HL, 0xd000);
        setup(&mut regs);

        let mut ram = Ram::new(0x10000);
        ram.write(0xc000, 0xcb).unwrap();
        ram.write(0xc001, opcode).unwrap();
        ram.write(0xd000, hl_value).unwrap();
        let mut state = StateManager::new();

        let mut ctx = Context::new(&mut regs, &mut ram, &mut state, 0xcb);
        let result = NO_PREFIX[0xcb](&mut ctx);
        assert!(!ctx.jumped());
        (regs, ram, result)
    }

    #[test]
    fn swap_register() {
        // swap a
        let (regs, _, result) = run_cb(0x37, 0, |r| r.set_a(0xab));
        assert_eq!(result, (2, 8));
        assert_eq!(regs.a(), 0xba);
        assert!(!regs.zero() && !regs.carry());
    }

    #[test]
    fn shift_through_memory() {
        // sla (hl)
        let (regs, ram, result) = run_cb(0x26, 0x81, |_| {});
        assert_eq!(result, (2, 16));
        assert_eq!(ram.read(0xd000).unwrap(), 0x02);
        assert!(regs.carry());
    }

    #[test]
    fn rr_uses_carry() {
        // rr c
        let (regs, _, _) = run_cb(0x19, 0, |r| {
            r.write8(Reg8::C, 0x01);
            r.set_flags(false, false, false, false);
        });
        assert_eq!(regs.read8(Reg8::C), 0x00);
        assert!(regs.zero() && regs.carry());
    }

    #[test]
    fn bit_timing_and_flags() {
        // bit 7, h
        let (regs, _, result) = run_cb(0x7c, 0, |r| r.write16(Reg16::HL, 0x8000));
        assert_eq!(result, (2, 8));
        assert!(!regs.zero() && regs.half_carry() && !regs.subtract());

        // bit 0, (hl)
        let (regs, _, result) = run_cb(0x46, 0xfe, |_| {});
        assert_eq!(result, (2, 12));
        assert!(regs.zero());
    }

    #[test]
    fn res_and_set() {
        // res 0, a
        let (regs, _, _) = run_cb(0x87, 0, |r| r.set_a(0xff));
        assert_eq!(regs.a(), 0xfe);

        // set 3, (hl)
        let (regs, ram, result) = run_cb(0xde, 0x00, |_| {});
        assert_eq!(result, (2, 16));
        assert_eq!(ram.read(0xd000).unwrap(), 0x08);
        // flags untouched
        assert_eq!(regs.af.lo(), Registers::default().af.lo());
    }
}
