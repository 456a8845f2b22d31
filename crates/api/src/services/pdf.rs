//! PDF rendering with `lopdf`.
//!
//! Produces the graduate entry ticket (heading, registration details and
//! the QR image) and the tabular roster exports for administrators.

use chrono::Utc;
use domain::models::graduate::Graduate;
use domain::models::guest::Guest;
use domain::models::qr_code::{QrCode as LedgerCode, QrCodeStatus};
use image::{ImageBuffer, Luma};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use thiserror::Error;

/// A4 portrait in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
const LINE_HEIGHT: i64 = 16;
const LINES_PER_PAGE: usize = 44;

/// Errors that can occur while building a PDF.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to build PDF: {0}")]
    Build(#[from] lopdf::Error),

    #[error("Failed to serialize PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the entry ticket for a graduate: registration details plus the
/// QR code the door scanner reads.
pub fn graduate_ticket(
    graduate: &Graduate,
    qr: &ImageBuffer<Luma<u8>, Vec<u8>>,
) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => qr.width() as i64,
            "Height" => qr.height() as i64,
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
        },
        qr.as_raw().clone(),
    ));

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id, "F2" => bold_font_id },
        "XObject" => dictionary! { "Qr" => image_id },
    });

    let mut operations = Vec::new();

    // Heading
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec!["F2".into(), 22.into()]));
    operations.push(Operation::new(
        "Td",
        vec![MARGIN.into(), (PAGE_HEIGHT - 80).into()],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::string_literal("Graduation Ceremony Entry Ticket")],
    ));
    operations.push(Operation::new("ET", vec![]));

    // Registration details
    let details = [
        format!("Name: {}", graduate.name),
        format!("Major: {}", graduate.major),
        format!("Date of birth: {}", graduate.date_of_birth),
        format!("GAF ID: {}", graduate.gaf_id_number),
        format!("Government ID: {}", graduate.government_id),
    ];

    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
    operations.push(Operation::new(
        "Td",
        vec![MARGIN.into(), (PAGE_HEIGHT - 130).into()],
    ));
    operations.push(Operation::new("TL", vec![LINE_HEIGHT.into()]));
    for line in &details {
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(line.as_str())],
        ));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    // QR code, centered
    let qr_size: i64 = 220;
    let qr_x = (PAGE_WIDTH - qr_size) / 2;
    let qr_y = PAGE_HEIGHT - 530;
    operations.push(Operation::new("q", vec![]));
    operations.push(Operation::new(
        "cm",
        vec![
            qr_size.into(),
            0.into(),
            0.into(),
            qr_size.into(),
            qr_x.into(),
            qr_y.into(),
        ],
    ));
    operations.push(Operation::new("Do", vec!["Qr".into()]));
    operations.push(Operation::new("Q", vec![]));

    // Footer
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
    operations.push(Operation::new(
        "Td",
        vec![MARGIN.into(), (qr_y - 40).into()],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::string_literal(
            "Present this code at the entrance. Valid for a single scan.",
        )],
    ));
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    });

    finish_document(&mut doc, pages_id, vec![page_id])
}

/// Renders the guest roster for the admin export.
pub fn guest_roster(rows: &[(Guest, Option<LedgerCode>)]) -> Result<Vec<u8>, PdfError> {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!(
        "{:<24} {:<20} {:<26} {:<10}",
        "Name", "Government ID", "Email", "Code"
    ));
    for (guest, code) in rows {
        let status = code_status_label(code.as_ref());
        lines.push(format!(
            "{:<24} {:<20} {:<26} {:<10}",
            truncate(&format!("{} {}", guest.first_name, guest.last_name), 24),
            truncate(&guest.government_id, 20),
            truncate(&guest.email, 26),
            status,
        ));
    }
    lines.push(String::new());
    lines.push(format!("Total guests: {}", rows.len()));

    text_document("Guest Roster", &lines)
}

/// Renders the graduate roster for the admin export.
pub fn graduate_roster(rows: &[Graduate]) -> Result<Vec<u8>, PdfError> {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!(
        "{:<26} {:<24} {:<14} {:<14}",
        "Name", "Major", "GAF ID", "Date of birth"
    ));
    for graduate in rows {
        lines.push(format!(
            "{:<26} {:<24} {:<14} {:<14}",
            truncate(&graduate.name, 26),
            truncate(&graduate.major, 24),
            truncate(&graduate.gaf_id_number, 14),
            graduate.date_of_birth,
        ));
    }
    lines.push(String::new());
    lines.push(format!("Total graduates: {}", rows.len()));

    text_document("Graduate Roster", &lines)
}

fn code_status_label(code: Option<&LedgerCode>) -> &'static str {
    match code {
        Some(code) if code.status == QrCodeStatus::Used => "USED",
        Some(_) => "VALID",
        None => "-",
    }
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let mut out: String = value.chars().take(max.saturating_sub(1)).collect();
        out.push('~');
        out
    }
}

/// Builds a multi-page monospaced text document with a heading and a
/// generated-at line.
fn text_document(title: &str, lines: &[String]) -> Result<Vec<u8>, PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let bold_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id, "F2" => bold_font_id },
    });

    let generated = format!("Generated {}", Utc::now().format("%Y-%m-%d %H:%M UTC"));
    let mut page_ids = Vec::new();

    for (page_index, chunk) in lines.chunks(LINES_PER_PAGE).enumerate() {
        let mut operations = Vec::new();

        if page_index == 0 {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F2".into(), 18.into()]));
            operations.push(Operation::new(
                "Td",
                vec![MARGIN.into(), (PAGE_HEIGHT - 60).into()],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(title)]));
            operations.push(Operation::new("ET", vec![]));

            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 9.into()]));
            operations.push(Operation::new(
                "Td",
                vec![MARGIN.into(), (PAGE_HEIGHT - 78).into()],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(generated.as_str())],
            ));
            operations.push(Operation::new("ET", vec![]));
        }

        let body_top = if page_index == 0 {
            PAGE_HEIGHT - 110
        } else {
            PAGE_HEIGHT - 60
        };

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), 9.into()]));
        operations.push(Operation::new("Td", vec![MARGIN.into(), body_top.into()]));
        operations.push(Operation::new("TL", vec![LINE_HEIGHT.into()]));
        for line in chunk {
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(line.as_str())],
            ));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    if page_ids.is_empty() {
        let content = Content {
            operations: Vec::new(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    finish_document(&mut doc, pages_id, page_ids)
}

fn finish_document(
    doc: &mut Document,
    pages_id: lopdf::ObjectId,
    page_ids: Vec<lopdf::ObjectId>,
) -> Result<Vec<u8>, PdfError> {
    let kids: Vec<Object> = page_ids.iter().map(|id| (*id).into()).collect();
    let count = kids.len() as i64;

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::qr;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample_graduate() -> Graduate {
        Graduate {
            id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            major: "Computer Science".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 6, 15).unwrap(),
            gaf_id_number: "GAF-2026-0042".to_string(),
            government_id: "X1".to_string(),
            id_image_url: "graduate-ids/abc.pdf".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    fn sample_guest(i: usize) -> Guest {
        Guest {
            id: Uuid::new_v4(),
            first_name: format!("Guest{}", i),
            last_name: "Doe".to_string(),
            government_id: format!("G-{}", i),
            id_image_url: "government-ids/abc.pdf".to_string(),
            phone_number: "+447911123456".to_string(),
            email: format!("guest{}@example.edu", i),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_graduate_ticket_is_pdf() {
        let qr = qr::render_luma("https://example.edu/verify/abc-123").unwrap();
        let bytes = graduate_ticket(&sample_graduate(), &qr).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_guest_roster_is_pdf() {
        let rows: Vec<_> = (0..3).map(|i| (sample_guest(i), None)).collect();
        let bytes = guest_roster(&rows).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_guest_roster_paginates() {
        let rows: Vec<_> = (0..200).map(|i| (sample_guest(i), None)).collect();
        let bytes = guest_roster(&rows).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn test_graduate_roster_empty() {
        let bytes = graduate_roster(&[]).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-rather-long-value", 8), "a-rathe~");
    }

    #[test]
    fn test_code_status_label() {
        assert_eq!(code_status_label(None), "-");
    }
}
