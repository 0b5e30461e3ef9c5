mod capture;
mod core;
mod field;
mod parameter;

pub use self::core::*;
pub use capture::InvalidConversion;
pub(crate) use capture::ValueCell;
pub(crate) use field::create_cell;
pub use parameter::*;
