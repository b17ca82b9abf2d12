mod config;
pub use self::config::*;

mod convert;
pub use self::convert::*;

mod error;
pub use self::error::*;

pub mod io;
