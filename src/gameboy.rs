use crate::cartridge::header::Header;
use crate::cartridge::Cartridge;
use crate::error::DmgError;
use crate::lr35902::cpu::Cpu;
use crate::memory::mmu::Mmu;
use crate::memory::null::NullMemory;
use crate::memory::ram::Ram;
use crate::memory::Memory;
use log::info;

const VRAM_START: u16 = 0x8000;
const WRAM_START: u16 = 0xc000;
const ECHO_START: u16 = 0xe000;
const OAM_START: u16 = 0xfe00;
const UNUSABLE_START: u16 = 0xfea0;
const IO_START: u16 = 0xff00;
const HRAM_START: u16 = 0xff80;
const IE_REGISTER: u16 = 0xffff;

pub struct GameBoy {
    cpu: Cpu,
    mmu: Mmu,
    header: Header,
}

impl GameBoy {
    pub fn new(cartridge: Cartridge) -> GameBoy {
        let header = cartridge.header().clone();
        let mmu = Mmu::new()
            .with(0x0000, Box::new(cartridge))
            .with(VRAM_START, Box::new(Ram::new(0x2000)))
            .with(WRAM_START, Box::new(Ram::new(0x2000)))
            .with(ECHO_START, Box::new(NullMemory::new(0x1e00)))
            .with(OAM_START, Box::new(Ram::new(0xa0)))
            .with(UNUSABLE_START, Box::new(NullMemory::new(0x60)))
            .with(IO_START, Box::new(Ram::new(0x80)))
            .with(HRAM_START, Box::new(Ram::new(0x7f)))
            .with(IE_REGISTER, Box::new(Ram::new(1)));

        GameBoy {
            cpu: Cpu::new(),
            mmu,
            header,
        }
    }

    /// Runs one instruction and returns its cost in T-cycles.
    pub fn tick(&mut self) -> Result<usize, DmgError> {
        self.cpu.tick(&mut self.mmu)
    }

    /// Runs until `max_steps` instructions have executed or the CPU stops
    /// running. Returns the number of instructions executed.
    pub fn run(&mut self, max_steps: usize) -> Result<usize, DmgError> {
        let mut steps = 0;
        while steps < max_steps && self.cpu.state().is_running() {
            self.tick()?;
            steps += 1;
        }

        info!(
            "Executed {} instructions ({} cycles), CPU {}",
            steps,
            self.cpu.cycles(),
            self.cpu.state().state()
        );
        Ok(steps)
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn read(&self, addr: u16) -> Result<u8, DmgError> {
        self.mmu.read(addr)
    }

    pub fn write(&mut self, addr: u16, data: u8) -> Result<(), DmgError> {
        self.mmu.write(addr, data)
    }
}

impl std::fmt::Display for GameBoy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}\n{}", self.header, self.cpu)
    }
}
