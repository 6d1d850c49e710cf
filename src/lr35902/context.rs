use crate::lr35902::registers::{Reg16, Reg8, Registers};
use crate::lr35902::state::StateManager;
use crate::memory::Memory;

/// Everything an instruction handler may touch.
///
/// Bus accesses go through the `*_unchecked` helpers: once the opcode has
/// been fetched, a failing access means the machine is wired wrongly and the
/// helpers abort.
pub struct Context<'a> {
    pub registers: &'a mut Registers,
    pub bus: &'a mut dyn Memory,
    pub state: &'a mut StateManager,
    /// The byte that selected the handler (for CB instructions, the byte after the prefix).
    pub opcode: u8,
    jumped: bool,
}

impl<'a> Context<'a> {
    pub fn new(
        registers: &'a mut Registers,
        bus: &'a mut dyn Memory,
        state: &'a mut StateManager,
        opcode: u8,
    ) -> Context<'a> {
        Context {
            registers,
            bus,
            state,
            opcode,
            jumped: false,
        }
    }

    /// True when the handler wrote PC itself.
    pub fn jumped(&self) -> bool {
        self.jumped
    }

    pub fn pc(&self) -> u16 {
        self.registers.pc.get()
    }

    pub fn jump(&mut self, addr: u16) {
        self.registers.pc.set(addr);
        self.jumped = true;
    }

    pub fn read_unchecked(&self, addr: u16) -> u8 {
        match self.bus.read(addr) {
            Ok(data) => data,
            Err(e) => panic!("CPU: read from ${:04x} failed: {}", addr, e),
        }
    }

    pub fn write_unchecked(&mut self, addr: u16, data: u8) {
        if let Err(e) = self.bus.write(addr, data) {
            panic!("CPU: write of ${:02x} to ${:04x} failed: {}", data, addr, e);
        }
    }

    pub fn read16_unchecked(&self, addr: u16) -> u16 {
        let lo = self.read_unchecked(addr) as u16;
        let hi = self.read_unchecked(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    pub fn write16_unchecked(&mut self, addr: u16, data: u16) {
        let [lo, hi] = data.to_le_bytes();
        self.write_unchecked(addr, lo);
        self.write_unchecked(addr.wrapping_add(1), hi);
    }

    /// Operand byte `offset` bytes after the opcode.
    pub fn imm8(&self, offset: u16) -> u8 {
        self.read_unchecked(self.pc().wrapping_add(offset))
    }

    /// Little-endian operand word right after the opcode.
    pub fn imm16(&self) -> u16 {
        self.read16_unchecked(self.pc().wrapping_add(1))
    }

    pub fn push(&mut self, value: u16) {
        let sp = self.registers.sp.get().wrapping_sub(2);
        self.registers.sp.set(sp);
        self.write16_unchecked(sp, value);
    }

    pub fn pop(&mut self) -> u16 {
        let sp = self.registers.sp.get();
        let value = self.read16_unchecked(sp);
        self.registers.sp.set(sp.wrapping_add(2));
        value
    }

    /// Reads one of the eight operands encoded in three opcode bits:
    /// B, C, D, E, H, L, (HL), A.
    pub fn read_operand(&self, code: u8) -> u8 {
        match operand(code) {
            Some(register) => self.registers.read8(register),
            None => self.read_unchecked(self.registers.read16(Reg16::HL)),
        }
    }

    pub fn write_operand(&mut self, code: u8, value: u8) {
        match operand(code) {
            Some(register) => self.registers.write8(register, value),
            None => {
                let addr = self.registers.read16(Reg16::HL);
                self.write_unchecked(addr, value);
            }
        }
    }
}

/// Register selected by a 3-bit operand code, or `None` for (HL).
pub fn operand(code: u8) -> Option<Reg8> {
    match code & 0b111 {
        0b000 => Some(Reg8::B),
        0b001 => Some(Reg8::C),
        0b010 => Some(Reg8::D),
        0b011 => Some(Reg8::E),
        0b100 => Some(Reg8::H),
        0b101 => Some(Reg8::L),
        0b110 => None,
        _ => Some(Reg8::A),
    }
}

/// 16-bit register selected by two opcode bits, with SP in the last slot.
pub fn pair(code: u8) -> Reg16 {
    match code & 0b11 {
        0b00 => Reg16::BC,
        0b01 => Reg16::DE,
        0b10 => Reg16::HL,
        _ => Reg16::SP,
    }
}

/// Same as [`pair`], but PUSH/POP use AF in the last slot.
pub fn stack_pair(code: u8) -> Reg16 {
    match code & 0b11 {
        0b00 => Reg16::BC,
        0b01 => Reg16::DE,
        0b10 => Reg16::HL,
        _ => Reg16::AF,
    }
}

pub const HL_OPERAND: u8 = 0b110;
