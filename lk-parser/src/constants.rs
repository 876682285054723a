pub const LK_MAGIC: &[u8] = b"\x88\x16\x88\x58";

pub const LK_HEADER_OFFSET_SIZE: usize = 4;
pub const LK_HEADER_OFFSET_NAME: usize = 8;
pub const LK_HEADER_NAME_SIZE: usize = 8;

pub const CMDLINE_MARKER: &[u8] = b"console=";
pub const PRODUCT_MARKER: &[u8] = b"product";
pub const PLATFORM_MARKER: &[u8] = b"platform/";
pub const PLATFORM_SIZE: usize = 6;
pub const HARDWARE_TOKEN: &str = "androidboot.hardware=";

pub const UNLOCK_CODE_MARKER: &[u8] = b"unlock code";
pub const VERIFIED_BOOT_MARKER: &[u8] = b"verified boot";

pub const OEM_MARKER: &[u8] = b"oem ";
pub const OEM_TOKEN_LEN: usize = 100;
pub const OEM_CHUNK_SIZE: usize = 50;
pub const OEM_CHUNK_TOKEN_LEN: usize = 50;
pub const OEM_TOKEN_BOUNDARY: &[char] = &['\\', '[', '\'', '\n', ' ', ')', '('];
pub const OEM_COMMAND_PREFIX: &str = "fastboot oem";

pub const NOT_AVAILABLE: &str = "N/A";
