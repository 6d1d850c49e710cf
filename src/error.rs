use snafu::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DmgError {
    #[snafu(display("{} does not accept address ${:04x}", component, address))]
    OutOfRange { address: u16, component: &'static str },
    #[snafu(display("{} requires at least {} bytes, got {}", what, required, actual))]
    InsufficientSize {
        what: &'static str,
        required: usize,
        actual: usize,
    },
    #[snafu(display("Unsupported cartridge type: ${:02x}", cartridge_type))]
    UnsupportedType { cartridge_type: u8 },
    #[snafu(display("Illegal opcode ({:02x}) at address: ${:04x}", opcode, address))]
    IllegalOpcode { opcode: u8, address: u16 },
    #[snafu(display("Unsupported cartridge file format: {}", path.display()))]
    InvalidFileFormat { path: PathBuf },
    #[snafu(display("Failed to read cartridge {}: {}", path.display(), source))]
    ReadCartridge { path: PathBuf, source: std::io::Error },
    #[snafu(display("Failed to open archive {}: {}", path.display(), source))]
    OpenArchive {
        path: PathBuf,
        source: zip::result::ZipError,
    },
    #[snafu(display("No cartridge image found in archive {}", path.display()))]
    EmptyArchive { path: PathBuf },
}
