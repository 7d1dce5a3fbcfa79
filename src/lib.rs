#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::non_ascii_literal,
    clippy::module_name_repetitions,
)]

//! Reads Macromedia/Adobe Director archives.
//!
//! A Director movie/cast is a standalone RIFX container; a projector is an
//! operating-system executable with a RIFX container (an `APPL` archive)
//! embedded somewhere inside it. This crate locates that container, walks
//! its resource map, and exposes a typed graph of the resources it
//! references. It does not render, play, or interpret Lingo bytecode.

pub mod archive;
pub mod config;
pub mod error;
pub mod io;
pub mod projector;
pub mod resources;
pub(crate) mod types;

pub(crate) use byteordered::Endianness;
pub use crate::archive::{Archive, ArchiveBody};
pub use crate::config::ParserConfig;
pub use crate::error::{Error, Result};
pub use crate::io::{EndianReader, SharedStream};
pub use crate::projector::Projector;
pub use crate::types::os_type::*;
pub use crate::types::reader::*;

/// Builds an [`OSType`] literal from a 4-byte string literal, e.g. `os!(b"RIFX")`.
#[macro_export]
macro_rules! os {
    ($os_type:literal) => {
        $crate::OSType::new(*$os_type)
    };
}

#[macro_export]
macro_rules! assert_sample(
    ($test:expr, $($arg:tt)+) => (
        if !$test {
            $crate::panic_sample!($($arg)+)
        }
    )
);

#[macro_export]
macro_rules! bail_sample(
    ($msg:expr) => ({
        ::anyhow::bail!("{}. Please send this file for analysis.", $msg)
    });
    ($msg:expr,) => ({
        $crate::bail_sample!($msg)
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::bail_sample!(format_args!($fmt, $($arg)+))
    });
);

#[macro_export]
macro_rules! ensure_sample(
    ($test:expr, $msg:expr) => ({
        ::anyhow::ensure!($test, "{}. Please send this file for analysis.", $msg)
    });
    ($test:expr, $msg:expr,) => ({
        $crate::ensure_sample!($test, $msg)
    });
    ($test:expr, $fmt:expr, $($arg:tt)+) => ({
        $crate::ensure_sample!($test, format_args!($fmt, $($arg)+))
    });
);

#[macro_export]
macro_rules! panic_sample(
    ($msg:expr) => ({
        panic!("{}. Please send this file for analysis.", $msg)
    });
    ($msg:expr,) => ({
        $crate::panic_sample!($msg)
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::panic_sample!(format_args!($fmt, $($arg)+))
    });
);
