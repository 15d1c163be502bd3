/// The `Value` enum and its conversions.
pub mod core;
