//! A library for encoding rectangular Micro QR Code (rMQR) symbols, as
//! defined by ISO/IEC 23941:2022.
//!
//! # Basic usage
//!
//! ```
//! use rmqrcode::{EccLevel, Mode, Symbol};
//!
//! let mut symbol = Symbol::new("R13x99", EccLevel::M).unwrap();
//! symbol.add_segment(Mode::Byte, "Hello, world!");
//! symbol.make().unwrap();
//! let grid = symbol.to_grid(true);
//! assert_eq!(grid.len(), 17);
//! ```
//!
//! Callers that don't care which of the 32 legal versions is used can
//! have one picked for them:
//!
//! ```
//! use rmqrcode::{fit, EccLevel, FitStrategy};
//!
//! let symbol = fit("https://example.com/", EccLevel::M, FitStrategy::Balanced).unwrap();
//! ```

mod bch;
mod bitbuffer;
mod codec;
mod color;
mod error;
mod fit;
mod gf;
mod mask;
mod mode;
mod segment;
mod symbol;
mod version;

pub use color::Color;
pub use error::{Result, RmqrError};
pub use fit::{fit, FitStrategy};
pub use mode::Mode;
pub use segment::{optimize, Segment, MAX_CHARACTERS};
pub use symbol::Symbol;
pub use version::{EccLevel, VersionInfo, VERSIONS};
