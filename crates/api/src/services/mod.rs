//! Outbound service integrations: email, object storage, QR and PDF
//! rendering.

pub mod email;
pub mod pdf;
pub mod qr;
pub mod storage;
