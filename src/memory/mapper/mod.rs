use crate::memory::Memory;

pub mod mbc1;
pub mod rom;

/// Cartridge controller: the memory contract plus bank bookkeeping.
pub trait Mapper: Memory {
    fn current_rom_bank(&self) -> u16;
    fn current_ram_bank(&self) -> u8;
    fn name(&self) -> String;
}

dyn_clone::clone_trait_object!(Mapper);
