use crate::error::DmgError;
use crate::memory::mapper::Mapper;
use crate::memory::mmu::Mmu;
use crate::memory::ram::Ram;
use crate::memory::rom::Rom as RomMemory;
use crate::memory::{Memory, EXTERNAL_RAM_END, EXTERNAL_RAM_START, RAM_BANK_SIZE};

pub const ROM_START: u16 = 0x0000;
pub const ROM_END: u16 = 0x7fff;

/// Cartridge without a bank controller: 32 KiB of ROM mapped as-is, plus an
/// optional 8 KiB of external RAM.
#[derive(Clone)]
pub struct Rom {
    memory: Mmu,
    has_ram: bool,
}

impl Rom {
    pub fn new(mut memory: Vec<u8>, ram_banks: usize) -> Result<Rom, DmgError> {
        let required = ROM_END as usize + 1;
        if memory.len() < required {
            return Err(DmgError::InsufficientSize {
                what: "ROM cartridge",
                required,
                actual: memory.len(),
            });
        }

        // Anything past 0x7fff is unreachable without a controller.
        memory.truncate(required);

        let has_ram = ram_banks != 0;
        let mut mmu = Mmu::new().with(ROM_START, Box::new(RomMemory::new(memory)));
        if has_ram {
            mmu.add(EXTERNAL_RAM_START, Box::new(Ram::new(RAM_BANK_SIZE)));
        }

        Ok(Rom { memory: mmu, has_ram })
    }

    pub fn has_ram(&self) -> bool {
        self.has_ram
    }
}

impl Memory for Rom {
    #[inline]
    fn read(&self, addr: u16) -> Result<u8, DmgError> {
        if !self.accepts(addr) {
            return Err(DmgError::OutOfRange { address: addr, component: "ROM controller" });
        }

        Ok(self.memory.read_unchecked(addr))
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) -> Result<(), DmgError> {
        if !self.accepts(addr) {
            return Err(DmgError::OutOfRange { address: addr, component: "ROM controller" });
        }

        self.memory.write_unchecked(addr, data);
        Ok(())
    }

    #[inline]
    fn accepts(&self, addr: u16) -> bool {
        (ROM_START..=ROM_END).contains(&addr)
            || (self.has_ram && (EXTERNAL_RAM_START..=EXTERNAL_RAM_END).contains(&addr))
    }
}

impl Mapper for Rom {
    #[inline]
    fn current_rom_bank(&self) -> u16 {
        1
    }

    #[inline]
    fn current_ram_bank(&self) -> u8 {
        0
    }

    #[inline]
    fn name(&self) -> String {
        String::from("ROM")
    }
}
