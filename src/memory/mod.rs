use crate::error::DmgError;
use dyn_clone::DynClone;

pub mod mapper;
pub mod mmu;
pub mod null;
pub mod ram;
pub mod rom;

pub const ROM_BANK_SIZE: usize = 0x4000;
pub const RAM_BANK_SIZE: usize = 0x2000;

pub const EXTERNAL_RAM_START: u16 = 0xa000;
pub const EXTERNAL_RAM_END: u16 = 0xbfff;

/// Byte-addressable memory, addressed from zero.
///
/// If `accepts` reports true for an address, `read` and `write` must succeed
/// for it. Composites such as [`mmu::Mmu`] rely on this and abort when a
/// component breaks it.
pub trait Memory: DynClone {
    fn read(&self, addr: u16) -> Result<u8, DmgError>;
    fn write(&mut self, addr: u16, data: u8) -> Result<(), DmgError>;
    fn accepts(&self, addr: u16) -> bool;

    fn read16(&self, addr: u16) -> Result<u16, DmgError> {
        let lo = self.read(addr)? as u16;
        let hi = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    fn write16(&mut self, addr: u16, data: u16) -> Result<(), DmgError> {
        let [lo, hi] = data.to_le_bytes();
        self.write(addr, lo)?;
        self.write(addr.wrapping_add(1), hi)?;
        Ok(())
    }
}

dyn_clone::clone_trait_object!(Memory);
