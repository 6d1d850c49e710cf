use crate::error::DmgError;
use crate::memory::Memory;

#[derive(Clone)]
pub struct Ram {
    memory: Vec<u8>,
}

impl Ram {
    pub fn new(size: usize) -> Ram {
        Ram { memory: vec![0; size] }
    }

    pub fn with_contents(memory: Vec<u8>) -> Ram {
        Ram { memory }
    }

    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}

impl Memory for Ram {
    #[inline]
    fn read(&self, addr: u16) -> Result<u8, DmgError> {
        self.memory
            .get(addr as usize)
            .copied()
            .ok_or(DmgError::OutOfRange { address: addr, component: "RAM" })
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) -> Result<(), DmgError> {
        match self.memory.get_mut(addr as usize) {
            Some(cell) => {
                *cell = data;
                Ok(())
            }
            None => Err(DmgError::OutOfRange { address: addr, component: "RAM" }),
        }
    }

    #[inline]
    fn accepts(&self, addr: u16) -> bool {
        (addr as usize) < self.memory.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_every_value() {
        let mut ram = Ram::new(0x100);

        for value in 0..=0xffu8 {
            ram.write(value as u16, value).unwrap();
            assert_eq!(ram.read(value as u16).unwrap(), value);
        }
    }

    #[test]
    fn rejects_addresses_past_the_end() {
        let mut ram = Ram::new(0x10);

        assert!(ram.accepts(0x0f));
        assert!(!ram.accepts(0x10));
        assert!(ram.read(0x10).is_err());
        assert!(ram.write(0xffff, 0x01).is_err());
    }

    #[test]
    fn word_access_is_little_endian() {
        let mut ram = Ram::new(0x10);

        ram.write16(0x02, 0xbeef).unwrap();
        assert_eq!(ram.read(0x02).unwrap(), 0xef);
        assert_eq!(ram.read(0x03).unwrap(), 0xbe);
        assert_eq!(ram.read16(0x02).unwrap(), 0xbeef);
    }
}
