pub mod constants;
pub mod field;
pub mod oem;
pub mod parser;
mod utils;

pub use field::{ExtractedField, Field, FieldKind};
pub use oem::{OemCommandSet, OemScanOptions, OemScanStrategy};
pub use parser::{LkHeader, LkImage};
