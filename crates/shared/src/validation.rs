//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Content types accepted for uploaded identity documents.
pub const ALLOWED_ID_DOCUMENT_TYPES: [&str; 4] = [
    "application/pdf",
    "image/jpeg",
    "image/jpg",
    "image/png",
];

lazy_static! {
    // E.164-ish: optional +, 7 to 15 digits.
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9]{7,15}$").expect("Invalid phone regex");
}

/// Validates that an uploaded file's content type is an accepted identity
/// document format (PDF or image).
pub fn validate_id_document_type(content_type: &str) -> Result<(), ValidationError> {
    if ALLOWED_ID_DOCUMENT_TYPES.contains(&content_type) {
        Ok(())
    } else {
        let mut err = ValidationError::new("id_document_type");
        err.message = Some("Invalid file type. Please upload a PDF or image file.".into());
        Err(err)
    }
}

/// Validates a phone number (digits with optional leading +).
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let normalized: String = phone.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    if PHONE_RE.is_match(&normalized) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_number");
        err.message = Some("Phone number must be 7-15 digits with optional leading +".into());
        Err(err)
    }
}

/// Derives a lowercase file extension from an uploaded filename.
///
/// Falls back to `bin` when the name carries no usable extension.
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .filter(|ext| !ext.is_empty() && ext.len() <= 8 && *ext != filename)
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_pdf_and_images() {
        assert!(validate_id_document_type("application/pdf").is_ok());
        assert!(validate_id_document_type("image/jpeg").is_ok());
        assert!(validate_id_document_type("image/jpg").is_ok());
        assert!(validate_id_document_type("image/png").is_ok());
    }

    #[test]
    fn test_rejects_other_content_types() {
        assert!(validate_id_document_type("image/gif").is_err());
        assert!(validate_id_document_type("text/html").is_err());
        assert!(validate_id_document_type("").is_err());
    }

    #[test]
    fn test_phone_plain_digits() {
        assert!(validate_phone_number("07911123456").is_ok());
    }

    #[test]
    fn test_phone_with_country_code() {
        assert!(validate_phone_number("+447911123456").is_ok());
    }

    #[test]
    fn test_phone_with_separators() {
        assert!(validate_phone_number("+44 7911 123-456").is_ok());
    }

    #[test]
    fn test_phone_too_short() {
        assert!(validate_phone_number("12345").is_err());
    }

    #[test]
    fn test_phone_with_letters() {
        assert!(validate_phone_number("07911abc456").is_err());
    }

    #[test]
    fn test_file_extension_simple() {
        assert_eq!(file_extension("passport.PDF"), "pdf");
        assert_eq!(file_extension("id.front.jpeg"), "jpeg");
    }

    #[test]
    fn test_file_extension_missing() {
        assert_eq!(file_extension("scan"), "bin");
        assert_eq!(file_extension(""), "bin");
    }

    #[test]
    fn test_file_extension_oversized_suffix_ignored() {
        assert_eq!(file_extension("weird.reallylongext"), "bin");
    }
}
