use crate::constants::{
    CMDLINE_MARKER, HARDWARE_TOKEN, LK_HEADER_NAME_SIZE, LK_HEADER_OFFSET_NAME,
    LK_HEADER_OFFSET_SIZE, LK_MAGIC, PLATFORM_MARKER, PLATFORM_SIZE, PRODUCT_MARKER,
    UNLOCK_CODE_MARKER, VERIFIED_BOOT_MARKER,
};
use crate::field::{ExtractedField, Field, FieldKind, locate_cstr, locate_fixed};
use crate::oem::{OemCommandSet, OemScanOptions, scan_oem_commands};
use crate::utils::SliceExt;
use anyhow::bail;
use paste::paste;
use std::str::from_utf8;

pub struct LkHeader<'a> {
    pub(crate) data: &'a [u8],
}

impl<'a> LkHeader<'a> {
    pub fn parse(data: &'a [u8]) -> anyhow::Result<Self> {
        if !data.starts_with(LK_MAGIC) {
            bail!("invalid LK image")
        }
        let end = data.len().min(LK_HEADER_OFFSET_NAME + LK_HEADER_NAME_SIZE);
        Ok(Self { data: &data[..end] })
    }

    pub fn get_magic(&self) -> &[u8] {
        &self.data[..LK_MAGIC.len()]
    }

    /// Size recorded in the header. It is not checked against the image length.
    pub fn get_declared_size(&self) -> Option<u32> {
        self.data.u32_at(LK_HEADER_OFFSET_SIZE)
    }

    /// The fixed name field. Shorter than 8 bytes only for truncated images.
    pub fn get_name_raw(&self) -> &[u8] {
        self.data.get(LK_HEADER_OFFSET_NAME..).unwrap_or_default()
    }

    pub fn get_name(&self) -> anyhow::Result<&str> {
        Ok(from_utf8(self.get_name_raw())?)
    }
}

pub fn parse_cmdline(data: &[u8]) -> Field {
    locate_cstr(data, FieldKind::Cmdline, CMDLINE_MARKER, 0)
}

pub fn parse_product(data: &[u8]) -> Field {
    locate_cstr(data, FieldKind::Product, PRODUCT_MARKER, PRODUCT_MARKER.len() + 1)
}

/// Platform comes from `androidboot.hardware=` in the command line when it is
/// there, otherwise from the six bytes after `platform/`.
pub fn parse_platform(data: &[u8], cmdline: &Field) -> Field {
    if let Field::Found(cmdline) = cmdline {
        if let Some(pos) = cmdline.value.find(HARDWARE_TOKEN) {
            let start = pos + HARDWARE_TOKEN.len();
            return Field::Found(ExtractedField {
                kind: FieldKind::Platform,
                offset: cmdline.offset + start,
                value: cmdline.value[start..].to_uppercase(),
            });
        }
    }
    locate_fixed(data, FieldKind::Platform, PLATFORM_MARKER, PLATFORM_SIZE)
        .map_value(str::to_uppercase)
}

macro_rules! impl_flag_check {
    ($($name:ident => $marker:expr),+ $(,)?) => {
        paste! {
            $(
                pub fn [<check_ $name>](data: &[u8]) -> bool {
                    data.contains_seq($marker)
                }
            )+
        }
    };
}

impl_flag_check! {
    needs_unlock_code => UNLOCK_CODE_MARKER,
    uses_verified_boot => VERIFIED_BOOT_MARKER,
}

pub struct LkImage<'a> {
    pub(crate) header: LkHeader<'a>,
    pub(crate) cmdline: Field,
    pub(crate) platform: Field,
    pub(crate) product: Field,
    pub(crate) needs_unlock_code: bool,
    pub(crate) uses_verified_boot: bool,
    pub(crate) oem_commands: OemCommandSet,
}

macro_rules! impl_field_getter {
    ($($name:ident),+ $(,)?) => {
        paste! {
            $(
                pub fn [<get_ $name>](&self) -> &Field {
                    &self.$name
                }
            )+
        }
    };
}

impl<'a> LkImage<'a> {
    pub fn parse(data: &'a [u8]) -> anyhow::Result<Self> {
        Self::parse_with(data, &OemScanOptions::default())
    }

    pub fn parse_with(data: &'a [u8], options: &OemScanOptions) -> anyhow::Result<Self> {
        let header = LkHeader::parse(data)?;
        log::info!(
            "LK header: declared size {:?}, name {:?}",
            header.get_declared_size(),
            String::from_utf8_lossy(header.get_name_raw())
        );

        let cmdline = parse_cmdline(data);
        let platform = parse_platform(data, &cmdline);
        let product = parse_product(data);
        let needs_unlock_code = check_needs_unlock_code(data);
        let uses_verified_boot = check_uses_verified_boot(data);
        let oem_commands = scan_oem_commands(data, options);

        Ok(Self {
            header,
            cmdline,
            platform,
            product,
            needs_unlock_code,
            uses_verified_boot,
            oem_commands,
        })
    }

    impl_field_getter! { cmdline, platform, product }

    pub fn get_header(&self) -> &LkHeader<'a> {
        &self.header
    }

    pub fn needs_unlock_code(&self) -> bool {
        self.needs_unlock_code
    }

    pub fn uses_verified_boot(&self) -> bool {
        self.uses_verified_boot
    }

    pub fn get_oem_commands(&self) -> &OemCommandSet {
        &self.oem_commands
    }
}
