use crate::error::DmgError;
use crate::memory::Memory;

/// A region that exists but stores nothing: reads return 0x00, writes vanish.
#[derive(Clone)]
pub struct NullMemory {
    len: usize,
}

impl NullMemory {
    pub fn new(len: usize) -> NullMemory {
        NullMemory { len }
    }
}

impl Memory for NullMemory {
    fn read(&self, addr: u16) -> Result<u8, DmgError> {
        if !self.accepts(addr) {
            return Err(DmgError::OutOfRange { address: addr, component: "null memory" });
        }

        Ok(0x00)
    }

    fn write(&mut self, addr: u16, _data: u8) -> Result<(), DmgError> {
        if !self.accepts(addr) {
            return Err(DmgError::OutOfRange { address: addr, component: "null memory" });
        }

        Ok(())
    }

    fn accepts(&self, addr: u16) -> bool {
        (addr as usize) < self.len
    }
}
