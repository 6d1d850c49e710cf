use crate::error::DmgError;
use crate::memory::Memory;

/// Read-only memory. Writes inside the ROM are silently dropped.
#[derive(Clone)]
pub struct Rom {
    memory: Vec<u8>,
}

impl Rom {
    pub fn new(memory: Vec<u8>) -> Rom {
        Rom { memory }
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}

impl Memory for Rom {
    #[inline]
    fn read(&self, addr: u16) -> Result<u8, DmgError> {
        self.memory
            .get(addr as usize)
            .copied()
            .ok_or(DmgError::OutOfRange { address: addr, component: "ROM" })
    }

    #[inline]
    fn write(&mut self, addr: u16, _data: u8) -> Result<(), DmgError> {
        if !self.accepts(addr) {
            return Err(DmgError::OutOfRange { address: addr, component: "ROM" });
        }

        Ok(())
    }

    #[inline]
    fn accepts(&self, addr: u16) -> bool {
        (addr as usize) < self.memory.len()
    }
}
