//! Redemption ledger domain model.
//!
//! One `QrCode` row is issued per invitee (guest or graduate). The only
//! state-changing operation is redemption: VALID -> USED, with USED
//! terminal. `scanned_at` is set exactly once, on the transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What kind of invitee owns a code. Cosmetic only; redemption logic does
/// not branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrCodeKind {
    Guest,
    Graduate,
}

impl QrCodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QrCodeKind::Guest => "GUEST",
            QrCodeKind::Graduate => "GRADUATE",
        }
    }
}

/// Redemption state of a code. USED is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrCodeStatus {
    Valid,
    Used,
}

impl QrCodeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QrCodeStatus::Valid => "VALID",
            QrCodeStatus::Used => "USED",
        }
    }
}

/// A single issued, redeemable code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCode {
    pub id: Uuid,
    /// Opaque identifier embedded in the verify URL and the printed QR.
    pub code: String,
    pub kind: QrCodeKind,
    pub status: QrCodeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduate_id: Option<Uuid>,
}

impl QrCode {
    /// Whether a redemption attempt on this code could still succeed.
    pub fn can_redeem(&self) -> bool {
        self.status == QrCodeStatus::Valid
    }

    /// Whether the code has reached its terminal state.
    pub fn is_redeemed(&self) -> bool {
        self.status == QrCodeStatus::Used
    }

    /// Ledger invariant: `scanned_at` is set iff the code is USED.
    pub fn is_consistent(&self) -> bool {
        self.scanned_at.is_some() == self.is_redeemed()
    }
}

/// Display identity of the invitee who owns a redeemed code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub first_name: String,
    pub last_name: String,
    pub government_id: String,
}

/// Outcome of a redemption attempt.
///
/// The persistence layer performs the VALID -> USED transition as a single
/// conditional update, so under concurrent attempts on one code exactly one
/// caller observes `Success`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redemption {
    /// The code was VALID and is now USED; first and only successful scan.
    Success {
        attendee: Attendee,
        scanned_at: DateTime<Utc>,
    },
    /// The code was already USED; no mutation. Carries the original scan time.
    AlreadyUsed { scanned_at: Option<DateTime<Utc>> },
    /// No code with this identifier exists.
    NotFound,
}

/// Wire status values for the verify endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerifyStatus {
    Success,
    Invalid,
    Used,
    Error,
}

/// JSON body returned by `GET /verify/:code`.
///
/// Field names are fixed by the deployed door-scanner clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub message: String,
    pub status: VerifyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<Attendee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<DateTime<Utc>>,
}

impl From<Redemption> for VerifyResponse {
    fn from(redemption: Redemption) -> Self {
        match redemption {
            Redemption::Success {
                attendee,
                scanned_at,
            } => VerifyResponse {
                message: "QR code verified successfully".to_string(),
                status: VerifyStatus::Success,
                guest: Some(attendee),
                scanned_at: Some(scanned_at),
            },
            Redemption::AlreadyUsed { scanned_at } => VerifyResponse {
                message: "QR code has already been used".to_string(),
                status: VerifyStatus::Used,
                guest: None,
                scanned_at,
            },
            Redemption::NotFound => VerifyResponse {
                message: "Invalid QR code".to_string(),
                status: VerifyStatus::Invalid,
                guest: None,
                scanned_at: None,
            },
        }
    }
}

/// Generates a fresh opaque code identifier.
pub fn generate_code() -> String {
    Uuid::new_v4().to_string()
}

/// Builds the public redemption URL a scanner visits.
pub fn verify_url(base_url: &str, code: &str) -> String {
    format!("{}/verify/{}", base_url.trim_end_matches('/'), code)
}

/// Splits a single display name into (first, last) on the last space.
///
/// Graduates store one `name` field while the scanner payload expects
/// first/last; single-token names land entirely in the first slot.
pub fn split_display_name(name: &str) -> (String, String) {
    match name.trim().rsplit_once(' ') {
        Some((first, last)) => (first.to_string(), last.to_string()),
        None => (name.trim().to_string(), String::new()),
    }
}
