use lk_parser::constants::LK_MAGIC;
use lk_parser::{Field, FieldKind, LkImage, OemScanOptions};

fn build_image() -> Vec<u8> {
    let mut data = LK_MAGIC.to_vec();
    data.extend_from_slice(&0x0009_8c40u32.to_le_bytes());
    data.extend_from_slice(b"lk\0\0\0\0\0\0");
    data.resize(0x200, 0xff);
    data.extend_from_slice(b"\0[LK] ../platform/mt6765/platform.c\0");
    data.extend_from_slice(b"console=tty0 console=ttyS0,921600n1 androidboot.hardware=mt6762\0");
    data.extend_from_slice(b"\x12\x34product=k62v1_64_bsp\0");
    data.extend_from_slice(b"\0oem unlock\0oem lock\0");
    data.extend_from_slice(b"[fastboot] oem p2u on\0oem off-mode-charge 0\0");
    data.extend_from_slice(b"please enter unlock code\0");
    data.extend_from_slice(b"\xde\xadoem unlock\0\xbe\xef");
    data
}

#[test]
fn parse_full_image() {
    let data = build_image();
    let image = LkImage::parse(&data).unwrap();

    let header = image.get_header();
    assert_eq!(header.get_declared_size(), Some(0x0009_8c40));
    assert_eq!(header.get_name_raw(), b"lk\0\0\0\0\0\0");

    assert_eq!(
        image.get_cmdline().value(),
        Some("console=tty0 console=ttyS0,921600n1 androidboot.hardware=mt6762")
    );
    assert_eq!(image.get_platform().value(), Some("MT6762"));
    assert_eq!(image.get_product().value(), Some("k62v1_64_bsp"));
    assert!(image.needs_unlock_code());
    assert!(!image.uses_verified_boot());

    let commands: Vec<&str> = image.get_oem_commands().commands().collect();
    assert_eq!(
        commands,
        vec![
            "fastboot oem unlock",
            "fastboot oem lock",
            "fastboot oem p2u",
            "fastboot oem off-mode-charge",
        ]
    );
    assert!(
        image
            .get_oem_commands()
            .iter()
            .all(|c| c.kind == FieldKind::OemCommand)
    );
}

#[test]
fn parse_is_repeatable() {
    let data = build_image();
    let first = LkImage::parse(&data).unwrap();
    let second = LkImage::parse(&data).unwrap();
    assert_eq!(first.get_cmdline(), second.get_cmdline());
    assert_eq!(first.get_platform(), second.get_platform());
    assert_eq!(first.get_oem_commands(), second.get_oem_commands());
}

#[test]
fn chunked_strategy_on_full_image() {
    let data = build_image();
    let image = LkImage::parse_with(&data, &OemScanOptions::chunked()).unwrap();
    assert!(image.get_oem_commands().contains("fastboot oem unlock"));
    assert_eq!(image.get_product().value(), Some("k62v1_64_bsp"));
}

#[test]
fn missing_fields_are_reported_absent() {
    let mut data = LK_MAGIC.to_vec();
    data.extend_from_slice(&[0u8; 4]);
    let image = LkImage::parse(&data).unwrap();

    assert_eq!(image.get_header().get_declared_size(), Some(0));
    assert!(image.get_header().get_name_raw().is_empty());
    assert_eq!(image.get_cmdline(), &Field::Absent);
    assert_eq!(image.get_platform(), &Field::Absent);
    assert_eq!(image.get_product().to_string(), "N/A");
    assert!(!image.needs_unlock_code());
    assert!(!image.uses_verified_boot());
    assert!(image.get_oem_commands().is_empty());
}

#[test]
fn invalid_magic_extracts_nothing() {
    let mut data = b"ANDROID!".to_vec();
    data.extend_from_slice(b"console=tty0\0product=x\0oem unlock\0");
    assert!(LkImage::parse(&data).is_err());
}

#[test]
fn invalid_field_does_not_cascade() {
    let mut data = LK_MAGIC.to_vec();
    data.extend_from_slice(&[0x20, 0, 0, 0]);
    data.extend_from_slice(b"lk\0\0\0\0\0\0");
    data.extend_from_slice(b"console=\xff\xfe\0product=good\0verified boot\0");
    let image = LkImage::parse(&data).unwrap();

    assert!(matches!(
        image.get_cmdline(),
        Field::Invalid {
            kind: FieldKind::Cmdline,
            offset: 16,
            ..
        }
    ));
    assert!(image.get_platform().is_absent());
    assert_eq!(image.get_product().value(), Some("good"));
    assert!(image.uses_verified_boot());
}
