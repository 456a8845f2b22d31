//! Domain models for GradPass.

pub mod admin;
pub mod graduate;
pub mod guest;
pub mod qr_code;
pub mod user;

pub use admin::{AdminUserSummary, AdminUsersQuery, AdminUsersResponse, RegistrationStats};
pub use graduate::{CreateGraduateRequest, Graduate, GraduateResponse};
pub use guest::{CreateGuestRequest, Guest, GuestResponse};
pub use qr_code::{
    generate_code, split_display_name, verify_url, Attendee, QrCode, QrCodeKind, QrCodeStatus,
    Redemption, VerifyResponse, VerifyStatus,
};
pub use user::{CreateUserRequest, User, UserResponse, UserRole};
