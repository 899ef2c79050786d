pub mod config;
pub mod driver;
pub mod lexer;
pub mod number;
pub mod operand;
pub mod translate;

pub mod isa {
    pub mod i8086; // target
    pub mod pdp11; // source
}

pub use config::{Features, Semicolon, TranslatorConfig};
pub use driver::{translate_source, DriverError, Summary};
pub use operand::{AddrMode, Operand};
pub use translate::{Line, Skip, TranslateError, Translator};
