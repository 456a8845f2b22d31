//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod graduate;
pub mod guest;
pub mod qr_code;
pub mod user;

pub use graduate::GraduateEntity;
pub use guest::{GuestEntity, GuestWithCodeEntity};
pub use qr_code::{QrCodeEntity, QrKindDb, QrStatusDb};
pub use user::{AdminUserRowEntity, UserEntity, UserRoleDb};
