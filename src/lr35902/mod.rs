pub mod alu;
pub mod context;
pub mod cpu;
pub mod handlers;
pub mod opcodes;
pub mod prefixed;
pub mod registers;
pub mod state;

pub const T_CYCLES_PER_SECOND: usize = 4_194_304;
