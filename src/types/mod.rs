pub(crate) mod numeric;
pub mod views;

pub use numeric::{U128, U64};
