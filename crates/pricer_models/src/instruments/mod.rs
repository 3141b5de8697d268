//! Option contract definitions.

pub mod error;
mod option_kind;

pub use error::InstrumentError;
pub use option_kind::OptionKind;
