pub mod cartridge;
pub mod error;
pub mod gameboy;
pub mod lr35902;
pub mod memory;

#[cfg(test)]
mod tests;
