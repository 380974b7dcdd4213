// QR domain handlers
pub mod qr_handler;
