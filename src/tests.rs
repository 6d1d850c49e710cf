use crate::error::DmgError;
use crate::lr35902::cpu::Cpu;
use crate::lr35902::registers::{Reg16, Reg8};
use crate::lr35902::state::CpuState;
use crate::memory::ram::Ram;
use crate::memory::Memory;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const REGISTERS: [(&str, Reg8); 8] = [
    ("a", Reg8::A),
    ("f", Reg8::F),
    ("b", Reg8::B),
    ("c", Reg8::C),
    ("d", Reg8::D),
    ("e", Reg8::E),
    ("h", Reg8::H),
    ("l", Reg8::L),
];

/// A CPU at the boot state with `program` at $0100 of a flat 64 KiB RAM.
fn setup(program: &[u8]) -> (Cpu, Ram) {
    let mut bus = Ram::new(0x10000);
    for (offset, byte) in program.iter().enumerate() {
        bus.write(0x0100 + offset as u16, *byte).unwrap();
    }
    (Cpu::new(), bus)
}

#[test]
fn nop() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    let before = cpu.registers().clone();

    assert_eq!(cpu.tick(&mut bus).unwrap(), 4);
    assert_eq!(cpu.registers().pc.get(), 0x0101);

    let mut after = cpu.registers().clone();
    after.pc.set(0x0100);
    assert_eq!(after, before);
}

#[test]
fn load_immediate_pair() {
    let (mut cpu, mut bus) = setup(&[0x01, 0x01, 0x11]);

    assert_eq!(cpu.tick(&mut bus).unwrap(), 12);
    assert_eq!(cpu.registers().read16(Reg16::BC), 0x1101);
    assert_eq!(cpu.registers().pc.get(), 0x0103);
}

#[test]
fn rotate_accumulator_left() {
    let (mut cpu, mut bus) = setup(&[0x07]);
    cpu.registers_mut().set_a(0xf0);

    assert_eq!(cpu.tick(&mut bus).unwrap(), 4);
    assert_eq!(cpu.registers().a(), 0xe1);
    assert!(cpu.registers().carry());
    assert!(!cpu.registers().zero());
    assert!(!cpu.registers().subtract());
    assert!(!cpu.registers().half_carry());
}

#[test]
fn stop() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00]);

    assert_eq!(cpu.tick(&mut bus).unwrap(), 4);
    assert_eq!(cpu.state().state(), CpuState::Stopped);
    assert_eq!(cpu.registers().pc.get(), 0x0102);
}

#[test]
fn increment_half_carry_and_wrap() {
    // inc b; inc b
    let (mut cpu, mut bus) = setup(&[0x04, 0x04]);
    cpu.registers_mut().write8(Reg8::B, 0x0f);

    cpu.tick(&mut bus).unwrap();
    assert_eq!(cpu.registers().read8(Reg8::B), 0x10);
    assert!(cpu.registers().half_carry());
    assert!(!cpu.registers().zero());

    cpu.registers_mut().write8(Reg8::B, 0xff);
    cpu.tick(&mut bus).unwrap();
    assert_eq!(cpu.registers().read8(Reg8::B), 0x00);
    assert!(cpu.registers().zero());
    assert!(cpu.registers().half_carry());
    assert!(!cpu.registers().subtract());
}

#[test]
fn decrement_through_memory() {
    // ld hl, $c000; dec (hl)
    let (mut cpu, mut bus) = setup(&[0x21, 0x00, 0xc0, 0x35]);
    bus.write(0xc000, 0x01).unwrap();

    cpu.tick(&mut bus).unwrap();
    assert_eq!(cpu.tick(&mut bus).unwrap(), 12);
    assert_eq!(bus.read(0xc000).unwrap(), 0x00);
    assert!(cpu.registers().zero());
    assert!(cpu.registers().subtract());
    assert!(!cpu.registers().half_carry());
}

#[test]
fn add_pairs_overflow() {
    // add hl, de
    let (mut cpu, mut bus) = setup(&[0x19]);
    cpu.registers_mut().write16(Reg16::HL, 0xffff);
    cpu.registers_mut().write16(Reg16::DE, 0x0001);
    cpu.registers_mut().set_flags(false, true, false, false);

    assert_eq!(cpu.tick(&mut bus).unwrap(), 8);
    assert_eq!(cpu.registers().read16(Reg16::HL), 0x0000);
    assert!(cpu.registers().carry());
    assert!(cpu.registers().half_carry());
    assert!(!cpu.registers().subtract());
    assert!(!cpu.registers().zero());
}

#[test]
fn pair_increment_leaves_flags() {
    // dec sp; inc de
    let (mut cpu, mut bus) = setup(&[0x3b, 0x13]);
    cpu.registers_mut().sp.set(0x0000);
    cpu.registers_mut().write16(Reg16::DE, 0xffff);
    let flags = cpu.registers().flags();

    cpu.tick(&mut bus).unwrap();
    cpu.tick(&mut bus).unwrap();
    assert_eq!(cpu.registers().sp.get(), 0xffff);
    assert_eq!(cpu.registers().read16(Reg16::DE), 0x0000);
    assert_eq!(cpu.registers().flags(), flags);
}

#[test]
fn store_and_load_indirect() {
    // ld bc, $c010; ld a, $77; ld (bc), a; ld a, $00; ld a, (bc)
    let (mut cpu, mut bus) = setup(&[0x01, 0x10, 0xc0, 0x3e, 0x77, 0x02, 0x3e, 0x00, 0x0a]);

    for _ in 0..5 {
        cpu.tick(&mut bus).unwrap();
    }
    assert_eq!(bus.read(0xc010).unwrap(), 0x77);
    assert_eq!(cpu.registers().a(), 0x77);
    assert_eq!(cpu.cycles(), 12 + 8 + 8 + 8 + 8);
}

#[test]
fn bcd_addition() {
    // ld a, $15; add a, $27; daa
    let (mut cpu, mut bus) = setup(&[0x3e, 0x15, 0xc6, 0x27, 0x27]);

    for _ in 0..3 {
        cpu.tick(&mut bus).unwrap();
    }
    assert_eq!(cpu.registers().a(), 0x42);
    assert!(!cpu.registers().carry());
    assert!(!cpu.registers().half_carry());
}

#[test]
fn call_and_return() {
    // call $0200 ... $0200: ret
    let (mut cpu, mut bus) = setup(&[0xcd, 0x00, 0x02, 0x00]);
    bus.write(0x0200, 0xc9).unwrap();

    assert_eq!(cpu.tick(&mut bus).unwrap(), 24);
    assert_eq!(cpu.registers().pc.get(), 0x0200);
    assert_eq!(cpu.registers().sp.get(), 0xfffc);

    assert_eq!(cpu.tick(&mut bus).unwrap(), 16);
    assert_eq!(cpu.registers().pc.get(), 0x0103);
    assert_eq!(cpu.registers().sp.get(), 0xfffe);
}

#[test]
fn prefixed_instruction() {
    // swap a; bit 7, a
    let (mut cpu, mut bus) = setup(&[0xcb, 0x37, 0xcb, 0x7f]);
    cpu.registers_mut().set_a(0x0f);

    assert_eq!(cpu.tick(&mut bus).unwrap(), 8);
    assert_eq!(cpu.registers().a(), 0xf0);
    assert_eq!(cpu.registers().pc.get(), 0x0102);

    assert_eq!(cpu.tick(&mut bus).unwrap(), 8);
    assert!(!cpu.registers().zero());
    assert_eq!(cpu.registers().pc.get(), 0x0104);
}

#[test]
fn opcode_fetch_out_of_range() {
    let mut cpu = Cpu::new();
    let mut bus = Ram::new(0x0080);

    assert!(matches!(cpu.tick(&mut bus), Err(DmgError::OutOfRange { address: 0x0100, .. })));
}

#[test]
#[should_panic(expected = "CPU: read from")]
fn operand_read_out_of_range_aborts() {
    let mut cpu = Cpu::new();
    // ld a, (hl) with HL = $014d, past the end of the bus
    let mut bus = Ram::new(0x0101);
    bus.write(0x0100, 0x7e).unwrap();

    let _ = cpu.tick(&mut bus);
}

fn vector_files() -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/lr35902/testdata");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

fn field(state: &Map<String, Value>, name: &str) -> u64 {
    state.get(name).unwrap().as_u64().unwrap()
}

fn ram_entries(state: &Map<String, Value>) -> Vec<(u16, u8)> {
    state
        .get("ram")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| {
            let entry = entry.as_array().unwrap();
            (entry[0].as_u64().unwrap() as u16, entry[1].as_u64().unwrap() as u8)
        })
        .collect()
}

#[test]
fn single_step_vectors() {
    let files = vector_files();
    assert!(!files.is_empty());

    for file in files {
        let input = std::fs::read_to_string(&file).unwrap();
        let tests: Value = serde_json::from_str(&input).unwrap();

        for test in tests.as_array().unwrap() {
            let test = test.as_object().unwrap();
            let name = test.get("name").unwrap().as_str().unwrap();
            let initial = test.get("initial").unwrap().as_object().unwrap();
            let final_state = test.get("final").unwrap().as_object().unwrap();
            let m_cycles = test.get("cycles").unwrap().as_array().unwrap().len();

            let mut bus = Ram::new(0x10000);
            let mut cpu = Cpu::new();

            for (key, register) in REGISTERS {
                cpu.registers_mut().write8(register, field(initial, key) as u8);
            }
            cpu.registers_mut().sp.set(field(initial, "sp") as u16);
            cpu.registers_mut().pc.set(field(initial, "pc") as u16);
            for (addr, value) in ram_entries(initial) {
                bus.write(addr, value).unwrap();
            }

            let cycles = cpu.tick(&mut bus).unwrap();
            assert_eq!(cycles, m_cycles * 4, "Cycle count failed for {}", name);

            for (key, register) in REGISTERS {
                assert_eq!(
                    cpu.registers().read8(register),
                    field(final_state, key) as u8,
                    "Comparison with register {} failed for {}",
                    key.to_uppercase(),
                    name
                );
            }
            assert_eq!(
                cpu.registers().sp.get(),
                field(final_state, "sp") as u16,
                "Comparison with register SP failed for {}",
                name
            );
            assert_eq!(
                cpu.registers().pc.get(),
                field(final_state, "pc") as u16,
                "Comparison with register PC failed for {}",
                name
            );

            for (addr, value) in ram_entries(final_state) {
                assert_eq!(bus.read(addr).unwrap(), value, "Comparison with RAM failed for {}", name);
            }
        }
    }
}
