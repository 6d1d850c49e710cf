use crate::error::DmgError;
use crate::memory::mapper::Mapper;
use crate::memory::{Memory, EXTERNAL_RAM_END, EXTERNAL_RAM_START, RAM_BANK_SIZE, ROM_BANK_SIZE};
use log::debug;
use std::ops::RangeInclusive;

const RAM_ENABLE_RANGE: RangeInclusive<u16> = 0x0000..=0x1fff;
const ROM_BANK_RANGE: RangeInclusive<u16> = 0x2000..=0x3fff;
const SECONDARY_BANK_REGISTER: RangeInclusive<u16> = 0x4000..=0x5fff;
const BANKING_MODE_REGISTER: RangeInclusive<u16> = 0x6000..=0x7fff;
const ROM_SLOT_0_RANGE: RangeInclusive<u16> = 0x0000..=0x3fff;
const ROM_SLOT_1_RANGE: RangeInclusive<u16> = 0x4000..=0x7fff;
const EXTERNAL_RAM_RANGE: RangeInclusive<u16> = EXTERNAL_RAM_START..=EXTERNAL_RAM_END;

const RAM_ENABLE_VALUE: u8 = 0x0a;
const ROM_BANK_MASK: u8 = 0b0001_1111;
const SECONDARY_BANK_MASK: u8 = 0b11;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BankingMode {
    /// The secondary register supplies bits 5-6 of the ROM bank.
    Rom,
    /// The secondary register selects the RAM bank.
    Ram,
}

#[derive(Clone)]
pub struct Mbc1 {
    rom: Vec<u8>,
    ram: Vec<u8>,
    rom_bank: u8,
    secondary_bank: u8,
    banking_mode: BankingMode,
    ram_enabled: bool,
}

impl Mbc1 {
    /// `ram` may be empty, in which case the external RAM window is unmapped.
    pub fn new(rom: Vec<u8>, ram: Vec<u8>) -> Result<Mbc1, DmgError> {
        if rom.len() < 2 * ROM_BANK_SIZE {
            return Err(DmgError::InsufficientSize {
                what: "MBC1 ROM",
                required: 2 * ROM_BANK_SIZE,
                actual: rom.len(),
            });
        }

        if !ram.is_empty() && ram.len() < RAM_BANK_SIZE {
            return Err(DmgError::InsufficientSize {
                what: "MBC1 RAM",
                required: RAM_BANK_SIZE,
                actual: ram.len(),
            });
        }

        Ok(Mbc1 {
            rom,
            ram,
            rom_bank: 1,
            secondary_bank: 0,
            banking_mode: BankingMode::Rom,
            ram_enabled: false,
        })
    }

    pub fn banking_mode(&self) -> BankingMode {
        self.banking_mode
    }

    pub fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    fn rom_banks(&self) -> usize {
        self.rom.len() / ROM_BANK_SIZE
    }

    fn ram_banks(&self) -> usize {
        self.ram.len() / RAM_BANK_SIZE
    }

    fn has_ram(&self) -> bool {
        !self.ram.is_empty()
    }

    /// Bank mapped at 0x4000-0x7fff before reduction to the cartridge size.
    fn effective_rom_bank(&self) -> u8 {
        match self.banking_mode {
            BankingMode::Rom => self.rom_bank | (self.secondary_bank << 5),
            BankingMode::Ram => self.rom_bank,
        }
    }

    fn effective_ram_bank(&self) -> u8 {
        match self.banking_mode {
            BankingMode::Rom => 0,
            BankingMode::Ram => self.secondary_bank,
        }
    }

    fn rom_offset(&self, addr: u16) -> usize {
        let bank = self.effective_rom_bank() as usize % self.rom_banks();
        bank * ROM_BANK_SIZE + (addr - *ROM_SLOT_1_RANGE.start()) as usize
    }

    fn ram_offset(&self, addr: u16) -> usize {
        let bank = self.effective_ram_bank() as usize % self.ram_banks();
        bank * RAM_BANK_SIZE + (addr - EXTERNAL_RAM_START) as usize
    }
}

impl Memory for Mbc1 {
    #[inline]
    fn read(&self, addr: u16) -> Result<u8, DmgError> {
        match addr {
            addr if ROM_SLOT_0_RANGE.contains(&addr) => Ok(self.rom[addr as usize]),
            addr if ROM_SLOT_1_RANGE.contains(&addr) => Ok(self.rom[self.rom_offset(addr)]),
            addr if EXTERNAL_RAM_RANGE.contains(&addr) && self.has_ram() => {
                if self.ram_enabled {
                    Ok(self.ram[self.ram_offset(addr)])
                } else {
                    Ok(0xff)
                }
            }
            _ => Err(DmgError::OutOfRange { address: addr, component: "MBC1" }),
        }
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) -> Result<(), DmgError> {
        match addr {
            addr if RAM_ENABLE_RANGE.contains(&addr) => {
                self.ram_enabled = (data & 0x0f) == RAM_ENABLE_VALUE;
                debug!("MBC1: RAM enabled: {}", self.ram_enabled);
            }
            addr if ROM_BANK_RANGE.contains(&addr) => {
                // Bank 0 can never be mapped into the switchable slot.
                self.rom_bank = data & ROM_BANK_MASK;
                if self.rom_bank == 0 {
                    self.rom_bank = 1;
                }
                debug!("MBC1: Switched to ROM bank {}", self.effective_rom_bank());
            }
            addr if SECONDARY_BANK_REGISTER.contains(&addr) => {
                self.secondary_bank = data & SECONDARY_BANK_MASK;
                match self.banking_mode {
                    BankingMode::Rom => debug!("MBC1: Switched to ROM bank {}", self.effective_rom_bank()),
                    BankingMode::Ram => debug!("MBC1: Switched to RAM bank {}", self.effective_ram_bank()),
                }
            }
            addr if BANKING_MODE_REGISTER.contains(&addr) => {
                if data == 0 {
                    // ROM mode starts over without upper bank bits
                    self.banking_mode = BankingMode::Rom;
                    self.secondary_bank = 0;
                } else {
                    self.banking_mode = BankingMode::Ram;
                }
                debug!("MBC1: Switched to banking mode: {:?}", self.banking_mode);
            }
            addr if EXTERNAL_RAM_RANGE.contains(&addr) && self.has_ram() => {
                if self.ram_enabled {
                    let offset = self.ram_offset(addr);
                    self.ram[offset] = data;
                }
            }
            _ => return Err(DmgError::OutOfRange { address: addr, component: "MBC1" }),
        }

        Ok(())
    }

    #[inline]
    fn accepts(&self, addr: u16) -> bool {
        ROM_SLOT_0_RANGE.contains(&addr)
            || ROM_SLOT_1_RANGE.contains(&addr)
            || (self.has_ram() && EXTERNAL_RAM_RANGE.contains(&addr))
    }
}

impl Mapper for Mbc1 {
    #[inline]
    fn current_rom_bank(&self) -> u16 {
        (self.effective_rom_bank() as usize % self.rom_banks()) as u16
    }

    #[inline]
    fn current_ram_bank(&self) -> u8 {
        if self.has_ram() {
            (self.effective_ram_bank() as usize % self.ram_banks()) as u8
        } else {
            0
        }
    }

    #[inline]
    fn name(&self) -> String {
        String::from("MBC1")
    }
}
