use crate::error::DmgError;
use crate::memory::Memory;

#[derive(Clone)]
struct Space {
    base: u16,
    memory: Box<dyn Memory>,
}

impl Space {
    #[inline]
    fn translate(&self, addr: u16) -> u16 {
        addr.wrapping_sub(self.base)
    }
}

/// Composes independently owned memories into one 16-bit address space.
///
/// Spaces are scanned in the order they were added and the first one that
/// accepts `addr - base` handles the access. Overlapping spaces are allowed;
/// the earlier registration shadows the later one.
#[derive(Clone, Default)]
pub struct Mmu {
    spaces: Vec<Space>,
}

impl Mmu {
    pub fn new() -> Mmu {
        Mmu { spaces: Vec::new() }
    }

    pub fn add(&mut self, base: u16, memory: Box<dyn Memory>) {
        self.spaces.push(Space { base, memory });
    }

    pub fn with(mut self, base: u16, memory: Box<dyn Memory>) -> Mmu {
        self.add(base, memory);
        self
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    fn find(&self, addr: u16) -> Option<&Space> {
        self.spaces.iter().find(|space| space.memory.accepts(space.translate(addr)))
    }

    fn find_mut(&mut self, addr: u16) -> Option<&mut Space> {
        self.spaces
            .iter_mut()
            .find(|space| space.memory.accepts(space.translate(addr)))
    }

    pub fn read_unchecked(&self, addr: u16) -> u8 {
        match self.read(addr) {
            Ok(data) => data,
            Err(e) => panic!("MMU: read from ${:04x} failed: {}", addr, e),
        }
    }

    pub fn write_unchecked(&mut self, addr: u16, data: u8) {
        if let Err(e) = self.write(addr, data) {
            panic!("MMU: write of ${:02x} to ${:04x} failed: {}", data, addr, e);
        }
    }

    pub fn read16_unchecked(&self, addr: u16) -> u16 {
        match self.read16(addr) {
            Ok(data) => data,
            Err(e) => panic!("MMU: read16 from ${:04x} failed: {}", addr, e),
        }
    }
}

impl Memory for Mmu {
    fn read(&self, addr: u16) -> Result<u8, DmgError> {
        let space = self
            .find(addr)
            .ok_or(DmgError::OutOfRange { address: addr, component: "MMU" })?;

        match space.memory.read(space.translate(addr)) {
            Ok(data) => Ok(data),
            Err(e) => panic!(
                "MMU: space at ${:04x} accepts ${:04x} but its read failed: {}",
                space.base, addr, e
            ),
        }
    }

    fn write(&mut self, addr: u16, data: u8) -> Result<(), DmgError> {
        let space = self
            .find_mut(addr)
            .ok_or(DmgError::OutOfRange { address: addr, component: "MMU" })?;
        let local = space.translate(addr);

        if let Err(e) = space.memory.write(local, data) {
            panic!(
                "MMU: space at ${:04x} accepts ${:04x} but its write failed: {}",
                space.base, addr, e
            );
        }

        Ok(())
    }

    fn accepts(&self, addr: u16) -> bool {
        self.find(addr).is_some()
    }
}
