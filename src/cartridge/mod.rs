use crate::error::DmgError;
use crate::memory::mapper::mbc1::Mbc1;
use crate::memory::mapper::rom::Rom;
use crate::memory::mapper::Mapper;
use crate::memory::{Memory, RAM_BANK_SIZE};
use log::info;

pub mod header;
pub mod loader;

use header::{Header, MapperKind};

#[derive(Clone)]
pub struct Cartridge {
    header: Header,
    mapper: Box<dyn Mapper>,
}

impl Cartridge {
    pub fn new(rom: Vec<u8>) -> Result<Cartridge, DmgError> {
        let header = Header::parse(&rom)?;
        let ram_banks = header.ram_banks();

        let mapper: Box<dyn Mapper> = match header.mapper_kind()? {
            MapperKind::Rom => Box::new(Rom::new(rom, ram_banks)?),
            MapperKind::Mbc1 => Box::new(Mbc1::new(rom, vec![0; ram_banks * RAM_BANK_SIZE])?),
        };

        info!(
            "Loaded cartridge \"{}\" with {} mapper (valid header: {})",
            header.title(),
            mapper.name(),
            header.is_valid()
        );

        Ok(Cartridge { header, mapper })
    }

    pub fn title(&self) -> &str {
        self.header.title()
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn mapper_name(&self) -> String {
        self.mapper.name()
    }

    pub fn current_rom_bank(&self) -> u16 {
        self.mapper.current_rom_bank()
    }

    pub fn current_ram_bank(&self) -> u8 {
        self.mapper.current_ram_bank()
    }
}

impl Memory for Cartridge {
    #[inline]
    fn read(&self, addr: u16) -> Result<u8, DmgError> {
        self.mapper.read(addr)
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) -> Result<(), DmgError> {
        self.mapper.write(addr, data)
    }

    #[inline]
    fn accepts(&self, addr: u16) -> bool {
        self.mapper.accepts(addr)
    }
}
