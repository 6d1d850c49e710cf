use crate::error::DmgError;
use crate::memory::ROM_BANK_SIZE;

pub const LOGO_START: usize = 0x0104;
pub const LOGO_END: usize = 0x0133;
pub const TITLE_START: usize = 0x0134;
pub const TITLE_END: usize = 0x0143;
pub const CGB_FLAG: usize = 0x0143;
pub const CARTRIDGE_TYPE: usize = 0x0147;
pub const ROM_SIZE: usize = 0x0148;
pub const RAM_SIZE: usize = 0x0149;
pub const HEADER_CHECKSUM: usize = 0x014d;
pub const HEADER_END: usize = 0x014f;

const CHECKSUM_START: usize = 0x0134;
const CHECKSUM_END: usize = 0x014c;
const CGB_ONLY: u8 = 0xc0;

pub const NINTENDO_LOGO: [u8; 48] = [
    0xce, 0xed, 0x66, 0x66, 0xcc, 0x0d, 0x00, 0x0b, 0x03, 0x73, 0x00, 0x83, 0x00, 0x0c, 0x00, 0x0d,
    0x00, 0x08, 0x11, 0x1f, 0x88, 0x89, 0x00, 0x0e, 0xdc, 0xcc, 0x6e, 0xe6, 0xdd, 0xdd, 0xd9, 0x99,
    0xbb, 0xbb, 0x67, 0x63, 0x6e, 0x0e, 0xec, 0xcc, 0xdd, 0xdc, 0x99, 0x9f, 0xbb, 0xb9, 0x33, 0x3e,
];

const BATTERY_TYPES: [u8; 11] = [0x03, 0x06, 0x09, 0x0d, 0x0f, 0x10, 0x13, 0x1b, 0x1e, 0x20, 0x22];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapperKind {
    Rom,
    Mbc1,
}

impl MapperKind {
    pub fn from_cartridge_type(cartridge_type: u8) -> Result<MapperKind, DmgError> {
        match cartridge_type {
            0x00 | 0x08 | 0x09 => Ok(MapperKind::Rom),
            0x01..=0x03 => Ok(MapperKind::Mbc1),
            _ => Err(DmgError::UnsupportedType { cartridge_type }),
        }
    }
}

/// The cartridge header found at 0x0100-0x014f.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    title: String,
    logo: [u8; 48],
    cgb_flag: u8,
    cartridge_type: u8,
    rom_size: u8,
    ram_size: u8,
    header_checksum: u8,
    computed_checksum: u8,
}

impl Header {
    pub fn parse(rom: &[u8]) -> Result<Header, DmgError> {
        if rom.len() <= HEADER_END {
            return Err(DmgError::InsufficientSize {
                what: "cartridge header",
                required: HEADER_END + 1,
                actual: rom.len(),
            });
        }

        let mut logo = [0u8; 48];
        logo.copy_from_slice(&rom[LOGO_START..=LOGO_END]);

        // The last title byte doubles as the CGB flag on newer cartridges.
        let title: String = rom[TITLE_START..=TITLE_END]
            .iter()
            .take_while(|&&byte| byte != 0 && (byte.is_ascii_graphic() || byte == b' '))
            .map(|&byte| byte as char)
            .collect();
        let title = title.trim_end().to_string();

        let computed_checksum = rom[CHECKSUM_START..=CHECKSUM_END]
            .iter()
            .fold(0u8, |sum, byte| sum.wrapping_sub(*byte).wrapping_sub(1));

        Ok(Header {
            title,
            logo,
            cgb_flag: rom[CGB_FLAG],
            cartridge_type: rom[CARTRIDGE_TYPE],
            rom_size: rom[ROM_SIZE],
            ram_size: rom[RAM_SIZE],
            header_checksum: rom[HEADER_CHECKSUM],
            computed_checksum,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cartridge_type(&self) -> u8 {
        self.cartridge_type
    }

    pub fn mapper_kind(&self) -> Result<MapperKind, DmgError> {
        MapperKind::from_cartridge_type(self.cartridge_type)
    }

    /// Declared ROM size in bytes. Banking decisions use the actual image
    /// length instead, since dumps are not always the declared size.
    pub fn rom_size(&self) -> usize {
        self.rom_banks() * ROM_BANK_SIZE
    }

    pub fn rom_banks(&self) -> usize {
        match self.rom_size {
            code @ 0x00..=0x08 => 2 << code,
            0x52 => 72,
            0x53 => 80,
            0x54 => 96,
            _ => 0,
        }
    }

    pub fn ram_banks(&self) -> usize {
        match self.ram_size {
            0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            _ => 0,
        }
    }

    pub fn header_checksum(&self) -> u8 {
        self.header_checksum
    }

    pub fn compute_checksum(&self) -> u8 {
        self.computed_checksum
    }

    pub fn is_logo_valid(&self) -> bool {
        self.logo == NINTENDO_LOGO
    }

    pub fn is_cgb_only(&self) -> bool {
        self.cgb_flag == CGB_ONLY
    }

    pub fn has_battery(&self) -> bool {
        BATTERY_TYPES.contains(&self.cartridge_type)
    }

    /// What the boot ROM would check: logo, header checksum, and DMG support.
    /// The global checksum is ignored, just like on hardware.
    pub fn is_valid(&self) -> bool {
        !self.is_cgb_only() && self.is_logo_valid() && self.computed_checksum == self.header_checksum
    }
}

impl std::fmt::Display for Header {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Title: {}  Type: ${:02x}  ROM: {} KiB  RAM banks: {}  Battery: {}  Valid: {}",
            self.title,
            self.cartridge_type,
            self.rom_size() / 1024,
            self.ram_banks(),
            self.has_battery(),
            self.is_valid()
        )
    }
}
