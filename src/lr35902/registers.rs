use bitflags::bitflags;

pub const BOOT_AF: u16 = 0x01b0;
pub const BOOT_BC: u16 = 0x0013;
pub const BOOT_DE: u16 = 0x00d8;
pub const BOOT_HL: u16 = 0x014d;
pub const BOOT_SP: u16 = 0xfffe;
pub const BOOT_PC: u16 = 0x0100;

/// The low nibble of F does not exist in hardware and always reads as zero.
const AF_MASK: u16 = 0xfff0;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Flags: u8 {
        const ZERO       = 0b1000_0000;
        const SUBTRACT   = 0b0100_0000;
        const HALF_CARRY = 0b0010_0000;
        const CARRY      = 0b0001_0000;
    }
}

/// A 16-bit register that can also be used as two 8-bit halves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Register {
    value: u16,
    mask: u16,
}

impl Register {
    pub const fn new(value: u16) -> Register {
        Register { value, mask: 0xffff }
    }

    /// The mask is applied on every write.
    pub const fn masked(value: u16, mask: u16) -> Register {
        Register { value: value & mask, mask }
    }

    #[inline]
    pub fn get(&self) -> u16 {
        self.value
    }

    #[inline]
    pub fn hi(&self) -> u8 {
        (self.value >> 8) as u8
    }

    #[inline]
    pub fn lo(&self) -> u8 {
        self.value as u8
    }

    #[inline]
    pub fn set(&mut self, value: u16) {
        self.value = value & self.mask;
    }

    #[inline]
    pub fn set_hi(&mut self, value: u8) {
        self.set(((value as u16) << 8) | (self.value & 0x00ff));
    }

    #[inline]
    pub fn set_lo(&mut self, value: u8) {
        self.set((self.value & 0xff00) | value as u16);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
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

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg16 {
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    pub af: Register,
    pub bc: Register,
    pub de: Register,
    pub hl: Register,
    pub sp: Register,
    pub pc: Register,
}

impl Default for Registers {
    fn default() -> Registers {
        Registers {
            af: Register::masked(BOOT_AF, AF_MASK),
            bc: Register::new(BOOT_BC),
            de: Register::new(BOOT_DE),
            hl: Register::new(BOOT_HL),
            sp: Register::new(BOOT_SP),
            pc: Register::new(BOOT_PC),
        }
    }
}

impl Registers {
    pub fn read8(&self, register: Reg8) -> u8 {
        match register {
            Reg8::A => self.af.hi(),
            Reg8::F => self.af.lo(),
            Reg8::B => self.bc.hi(),
            Reg8::C => self.bc.lo(),
            Reg8::D => self.de.hi(),
            Reg8::E => self.de.lo(),
            Reg8::H => self.hl.hi(),
            Reg8::L => self.hl.lo(),
        }
    }

    pub fn write8(&mut self, register: Reg8, value: u8) {
        match register {
            Reg8::A => self.af.set_hi(value),
            Reg8::F => self.af.set_lo(value),
            Reg8::B => self.bc.set_hi(value),
            Reg8::C => self.bc.set_lo(value),
            Reg8::D => self.de.set_hi(value),
            Reg8::E => self.de.set_lo(value),
            Reg8::H => self.hl.set_hi(value),
            Reg8::L => self.hl.set_lo(value),
        }
    }

    pub fn read16(&self, register: Reg16) -> u16 {
        self.pair(register).get()
    }

    pub fn write16(&mut self, register: Reg16, value: u16) {
        self.pair_mut(register).set(value);
    }

    fn pair(&self, register: Reg16) -> &Register {
        match register {
            Reg16::AF => &self.af,
            Reg16::BC => &self.bc,
            Reg16::DE => &self.de,
            Reg16::HL => &self.hl,
            Reg16::SP => &self.sp,
            Reg16::PC => &self.pc,
        }
    }

    fn pair_mut(&mut self, register: Reg16) -> &mut Register {
        match register {
            Reg16::AF => &mut self.af,
            Reg16::BC => &mut self.bc,
            Reg16::DE => &mut self.de,
            Reg16::HL => &mut self.hl,
            Reg16::SP => &mut self.sp,
            Reg16::PC => &mut self.pc,
        }
    }

    #[inline]
    pub fn a(&self) -> u8 {
        self.af.hi()
    }

    #[inline]
    pub fn set_a(&mut self, value: u8) {
        self.af.set_hi(value);
    }

    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.af.lo())
    }

    #[inline]
    pub fn read_flag(&self, flag: Flags) -> bool {
        self.flags().contains(flag)
    }

    #[inline]
    pub fn update_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        self.af.set_lo(flags.bits());
    }

    /// Sets all four flags at once.
    #[inline]
    pub fn set_flags(&mut self, zero: bool, subtract: bool, half_carry: bool, carry: bool) {
        let mut flags = Flags::empty();
        flags.set(Flags::ZERO, zero);
        flags.set(Flags::SUBTRACT, subtract);
        flags.set(Flags::HALF_CARRY, half_carry);
        flags.set(Flags::CARRY, carry);
        self.af.set_lo(flags.bits());
    }

    #[inline]
    pub fn zero(&self) -> bool {
        self.read_flag(Flags::ZERO)
    }

    #[inline]
    pub fn subtract(&self) -> bool {
        self.read_flag(Flags::SUBTRACT)
    }

    #[inline]
    pub fn half_carry(&self) -> bool {
        self.read_flag(Flags::HALF_CARRY)
    }

    #[inline]
    pub fn carry(&self) -> bool {
        self.read_flag(Flags::CARRY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_values() {
        let regs = Registers::default();

        assert_eq!(regs.af.get(), 0x01b0);
        assert_eq!(regs.bc.get(), 0x0013);
        assert_eq!(regs.de.get(), 0x00d8);
        assert_eq!(regs.hl.get(), 0x014d);
        assert_eq!(regs.sp.get(), 0xfffe);
        assert_eq!(regs.pc.get(), 0x0100);
        assert!(regs.zero());
        assert!(!regs.subtract());
        assert!(regs.half_carry());
        assert!(regs.carry());
    }

    #[test]
    fn halves() {
        let mut reg = Register::new(0x1234);

        assert_eq!(reg.hi(), 0x12);
        assert_eq!(reg.lo(), 0x34);
        reg.set_hi(0xab);
        assert_eq!(reg.get(), 0xab34);
        reg.set_lo(0xcd);
        assert_eq!(reg.get(), 0xabcd);
    }

    #[test]
    fn flag_register_low_nibble_is_always_zero() {
        let mut regs = Registers::default();

        for value in 0..=0xffu8 {
            regs.af.set_lo(value);
            assert_eq!(regs.af.lo() & 0x0f, 0, "F = ${:02x}", value);
            assert_eq!(regs.af.lo(), value & 0xf0);
        }

        regs.af.set(0xffff);
        assert_eq!(regs.af.get(), 0xfff0);
        regs.write8(Reg8::F, 0x0f);
        assert_eq!(regs.read8(Reg8::F), 0x00);
        regs.write16(Reg16::AF, 0x123f);
        assert_eq!(regs.read16(Reg16::AF), 0x1230);
    }

    #[test]
    fn flags_follow_bit_positions() {
        let mut regs = Registers::default();

        regs.af.set_lo(0x00);
        regs.update_flag(Flags::SUBTRACT, true);
        assert_eq!(regs.af.lo(), 0b0100_0000);
        regs.update_flag(Flags::CARRY, true);
        assert_eq!(regs.af.lo(), 0b0101_0000);
        regs.update_flag(Flags::SUBTRACT, false);
        assert_eq!(regs.af.lo(), 0b0001_0000);
        assert!(regs.carry());
        assert!(!regs.zero());

        regs.set_flags(true, false, true, false);
        assert_eq!(regs.af.lo(), 0b1010_0000);
    }

    #[test]
    fn eight_bit_views_map_onto_pairs() {
        let mut regs = Registers::default();

        regs.write8(Reg8::D, 0x12);
        regs.write8(Reg8::E, 0x34);
        assert_eq!(regs.read16(Reg16::DE), 0x1234);
        regs.write16(Reg16::HL, 0xc0de);
        assert_eq!(regs.read8(Reg8::H), 0xc0);
        assert_eq!(regs.read8(Reg8::L), 0xde);
        regs.set_a(0x99);
        assert_eq!(regs.read8(Reg8::A), 0x99);
    }
}
