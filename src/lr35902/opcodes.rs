use crate::lr35902::context::Context;
use crate::lr35902::handlers::Handlers;
use crate::lr35902::prefixed::Prefixed;

/// Executes one instruction and returns its length in bytes and its cost in T-cycles.
pub type Handler = fn(&mut Context) -> (u16, usize);

/// Opcodes with no defined instruction.
pub const ILLEGAL_OPCODES: [u8; 11] = [0xd3, 0xdb, 0xdd, 0xe3, 0xe4, 0xeb, 0xec, 0xed, 0xf4, 0xfc, 0xfd];

pub fn is_illegal(opcode: u8) -> bool {
    ILLEGAL_OPCODES.contains(&opcode)
}

pub static NO_PREFIX: [Handler; 256] = build_no_prefix();
pub static PREFIXED: [Handler; 256] = build_prefixed();

/// Fills `table[start..=end]` in steps of `step`.
const fn fill(mut table: [Handler; 256], start: usize, end: usize, step: usize, handler: Handler) -> [Handler; 256] {
    let mut opcode = start;
    while opcode <= end {
        table[opcode] = handler;
        opcode += step;
    }
    table
}

const fn build_no_prefix() -> [Handler; 256] {
    let mut t: [Handler; 256] = [Handlers::illegal as Handler; 256];

    // 00xx_xxxx
    t[0x00] = Handlers::nop;
    t[0x08] = Handlers::ld_imm16_sp;
    t[0x10] = Handlers::stop;
    t[0x18] = Handlers::jr;
    t = fill(t, 0x20, 0x38, 0x08, Handlers::jr_cc);
    t = fill(t, 0x01, 0x31, 0x10, Handlers::ld_rr_imm16);
    t = fill(t, 0x09, 0x39, 0x10, Handlers::add_hl_rr);
    t = fill(t, 0x02, 0x32, 0x10, Handlers::ld_indirect_a);
    t = fill(t, 0x0a, 0x3a, 0x10, Handlers::ld_a_indirect);
    t = fill(t, 0x03, 0x33, 0x10, Handlers::inc_rr);
    t = fill(t, 0x0b, 0x3b, 0x10, Handlers::dec_rr);
    t = fill(t, 0x04, 0x3c, 0x08, Handlers::inc_r);
    t = fill(t, 0x05, 0x3d, 0x08, Handlers::dec_r);
    t = fill(t, 0x06, 0x3e, 0x08, Handlers::ld_r_imm8);
    t[0x07] = Handlers::rlca;
    t[0x0f] = Handlers::rrca;
    t[0x17] = Handlers::rla;
    t[0x1f] = Handlers::rra;
    t[0x27] = Handlers::daa;
    t[0x2f] = Handlers::cpl;
    t[0x37] = Handlers::scf;
    t[0x3f] = Handlers::ccf;

    // 01xx_xxxx, where ld (hl), (hl) is halt
    t = fill(t, 0x40, 0x7f, 0x01, Handlers::ld_r_r);
    t[0x76] = Handlers::halt;

    // 10xx_xxxx
    t = fill(t, 0x80, 0xbf, 0x01, Handlers::alu_r);

    // 11xx_xxxx
    t = fill(t, 0xc0, 0xd8, 0x08, Handlers::ret_cc);
    t = fill(t, 0xc1, 0xf1, 0x10, Handlers::pop);
    t = fill(t, 0xc5, 0xf5, 0x10, Handlers::push);
    t = fill(t, 0xc2, 0xda, 0x08, Handlers::jp_cc);
    t = fill(t, 0xc4, 0xdc, 0x08, Handlers::call_cc);
    t = fill(t, 0xc6, 0xfe, 0x08, Handlers::alu_imm8);
    t = fill(t, 0xc7, 0xff, 0x08, Handlers::rst);
    t[0xc3] = Handlers::jp;
    t[0xc9] = Handlers::ret;
    t[0xcb] = Handlers::prefix;
    t[0xcd] = Handlers::call;
    t[0xd9] = Handlers::reti;
    t[0xe0] = Handlers::ldh_imm8_a;
    t[0xe2] = Handlers::ld_c_a;
    t[0xe8] = Handlers::add_sp_imm8;
    t[0xe9] = Handlers::jp_hl;
    t[0xea] = Handlers::ld_imm16_a;
    t[0xf0] = Handlers::ldh_a_imm8;
    t[0xf2] = Handlers::ld_a_c;
    t[0xf3] = Handlers::di;
    t[0xf8] = Handlers::ld_hl_sp_imm8;
    t[0xf9] = Handlers::ld_sp_hl;
    t[0xfa] = Handlers::ld_a_imm16;
    t[0xfb] = Handlers::ei;

    t
}

const fn build_prefixed() -> [Handler; 256] {
    let mut t: [Handler; 256] = [Prefixed::shift as Handler; 256];

    t = fill(t, 0x40, 0x7f, 0x01, Prefixed::bit);
    t = fill(t, 0x80, 0xbf, 0x01, Prefixed::res);
    t = fill(t, 0xc0, 0xff, 0x01, Prefixed::set);

    t
}
