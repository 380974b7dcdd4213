// QR domain models
pub mod qr;
pub mod slip;

pub use qr::*;
pub use slip::*;
