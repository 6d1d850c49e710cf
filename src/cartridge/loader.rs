use crate::cartridge::Cartridge;
use crate::error::{DmgError, EmptyArchiveSnafu, OpenArchiveSnafu, ReadCartridgeSnafu};
use log::debug;
use snafu::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 2] = ["gb", "gbc"];

/// Largest image an MBC1 cartridge can address; caps the preallocation for archive entries.
const MAX_IMAGE_SIZE: u64 = 8 * 1024 * 1024;

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn is_image_name(name: &str) -> bool {
    extension(Path::new(name)).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Reads a raw cartridge image, unpacking it first if it sits in a zip archive.
pub fn read_image(path: &Path) -> Result<Vec<u8>, DmgError> {
    match extension(path).as_deref() {
        Some("gb") | Some("gbc") => std::fs::read(path).context(ReadCartridgeSnafu { path }),
        Some("zip") => read_archive(path),
        _ => Err(DmgError::InvalidFileFormat { path: path.to_path_buf() }),
    }
}

fn read_archive(path: &Path) -> Result<Vec<u8>, DmgError> {
    let file = File::open(path).context(ReadCartridgeSnafu { path })?;
    let mut archive = zip::ZipArchive::new(file).context(OpenArchiveSnafu { path })?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).context(OpenArchiveSnafu { path })?;
        if !entry.is_file() || !is_image_name(entry.name()) {
            continue;
        }

        debug!("Using {} from {}", entry.name(), path.display());
        let mut image = Vec::with_capacity(entry.size().min(MAX_IMAGE_SIZE) as usize);
        entry.read_to_end(&mut image).context(ReadCartridgeSnafu { path })?;
        return Ok(image);
    }

    EmptyArchiveSnafu { path }.fail()
}

impl Cartridge {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Cartridge, DmgError> {
        Cartridge::new(read_image(path.as_ref())?)
    }
}
