use crate::error::DmgError;
use crate::lr35902::context::Context;
use crate::lr35902::opcodes::{is_illegal, NO_PREFIX};
use crate::lr35902::registers::{Reg8, Registers};
use crate::lr35902::state::{CpuState, StateManager};
use crate::memory::Memory;
use log::{trace, warn};

/// Cost of a tick while the CPU is halted or stopped.
const IDLE_CYCLES: usize = 4;

#[derive(Clone, Debug, Default)]
pub struct Cpu {
    registers: Registers,
    state: StateManager,
    cycles: usize,
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu::default()
    }

    /// Runs one instruction and returns the T-cycles it took.
    ///
    /// Only the opcode fetch and an illegal opcode are reported as errors; a
    /// bus failure while the instruction executes aborts.
    pub fn tick(&mut self, bus: &mut dyn Memory) -> Result<usize, DmgError> {
        if !self.state.is_running() {
            self.cycles += IDLE_CYCLES;
            return Ok(IDLE_CYCLES);
        }

        let pc = self.registers.pc.get();
        let opcode = match bus.read(pc) {
            Ok(opcode) => opcode,
            Err(e) => {
                warn!("Failed to fetch opcode at ${:04x}: {}", pc, e);
                return Err(e);
            }
        };

        if is_illegal(opcode) {
            warn!("Illegal opcode ${:02x} at ${:04x}\n{}", opcode, pc, self);
            return Err(DmgError::IllegalOpcode { opcode, address: pc });
        }

        // EI only takes effect once the instruction after it has run
        let enable_ime = self.state.has_pending_ime();

        let mut ctx = Context::new(&mut self.registers, bus, &mut self.state, opcode);
        let (length, cycles) = NO_PREFIX[opcode as usize](&mut ctx);
        let jumped = ctx.jumped();
        trace!("[${:04x}] ${:02x} ({} bytes, {} cycles)  {}", pc, opcode, length, cycles, self);

        if !jumped {
            self.registers.pc.set(pc.wrapping_add(length));
        }
        if enable_ime {
            self.state.commit_ime();
        }

        self.cycles += cycles;
        Ok(cycles)
    }

    /// Returns a halted or stopped CPU to running.
    pub fn resume(&mut self) {
        self.state.set_state(CpuState::Running);
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn state(&self) -> &StateManager {
        &self.state
    }

    /// Total T-cycles since power-on.
    pub fn cycles(&self) -> usize {
        self.cycles
    }
}

impl std::fmt::Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let r = &self.registers;
        write!(
            f,
            "A: ${:02x}  F: ${:02x}  B: ${:02x}  C: ${:02x}  D: ${:02x}  E: ${:02x}  H: ${:02x}  L: ${:02x}  SP: ${:04x}  PC: ${:04x}  {}",
            r.read8(Reg8::A),
            r.read8(Reg8::F),
            r.read8(Reg8::B),
            r.read8(Reg8::C),
            r.read8(Reg8::D),
            r.read8(Reg8::E),
            r.read8(Reg8::H),
            r.read8(Reg8::L),
            r.sp.get(),
            r.pc.get(),
            self.state.state()
        )
    }
}
