use anyhow::Result;
use lk_parser::{LkImage, OemScanOptions};
use memmap2::Mmap;
use paste::paste;
use std::env;
use std::fs::File;
use std::process::ExitCode;

const EXIT_OPEN_FAILED: u8 = 1;
const EXIT_INVALID_IMAGE: u8 = 2;
const EXIT_BAD_ARGUMENT: u8 = 3;

fn map_file(path: &str) -> Result<Mmap> {
    let file = File::open(path)?;
    let mem = unsafe { Mmap::map(&file)? };
    Ok(mem)
}

fn print_info(image: &LkImage) {
    macro_rules! print_info_item {
        ($label:expr, $name:ident) => {
            paste! {
                println!("[?] {}: {}", $label, image.[<get_ $name>]());
            }
        };
    }

    let header = image.get_header();
    match header.get_declared_size() {
        Some(size) => println!("[?] Image size (from header) = {} bytes", size),
        None => println!("[?] Image size (from header) = N/A"),
    }
    match header.get_name() {
        Ok(name) => println!("[?] Image name (from header) = {}", name),
        Err(e) => println!(
            "[?] Image name (from header) = {:?} ({})",
            header.get_name_raw(),
            e
        ),
    }

    print_info_item! { "Command Line", cmdline }
    print_info_item! { "Platform", platform }
    print_info_item! { "Product", product }

    println!("[?] Needs unlock code: {}", image.needs_unlock_code());
    println!("[?] Uses verified boot: {}", image.uses_verified_boot());

    let commands: Vec<&str> = image.get_oem_commands().commands().collect();
    println!("[?] Available OEM commands: {:?}", commands);
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "lk-parser-cli".to_string());

    let Some(path) = args.next() else {
        println!("[?] Usage: {} <lk.bin> [--chunked]", program);
        return ExitCode::SUCCESS;
    };

    let options = match args.next().as_deref() {
        None => OemScanOptions::default(),
        Some("--chunked") => OemScanOptions::chunked(),
        Some(other) => {
            eprintln!("[-] Unknown option '{}'.", other);
            return ExitCode::from(EXIT_BAD_ARGUMENT);
        }
    };

    let mem = match map_file(&path) {
        Ok(mem) => mem,
        Err(e) => {
            log::debug!("open {}: {:#}", path, e);
            println!("[-] Couldn't open '{}'.", path);
            return ExitCode::from(EXIT_OPEN_FAILED);
        }
    };

    match LkImage::parse_with(&mem, &options) {
        Ok(image) => {
            print_info(&image);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("parse {}: {:#}", path, e);
            println!("[-] Invalid LK image.");
            ExitCode::from(EXIT_INVALID_IMAGE)
        }
    }
}
