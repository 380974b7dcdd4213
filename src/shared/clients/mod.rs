// External API clients
pub mod slip_verify;

pub use slip_verify::*;
