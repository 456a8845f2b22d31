//! Repository layer for database operations.

pub mod graduate;
pub mod guest;
pub mod qr_code;
pub mod user;

pub use graduate::{GraduateRepository, NewGraduate};
pub use guest::GuestRepository;
pub use qr_code::QrCodeRepository;
pub use user::UserRepository;
