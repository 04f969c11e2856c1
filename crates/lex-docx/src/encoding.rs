use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use lex_core::entities::Petition;

use crate::error::DocxError;

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Standard alphabet, padded.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// # Errors
///
/// Returns `DocxError::Base64` for malformed input. Surrounding whitespace is
/// ignored.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, DocxError> {
    Ok(STANDARD.decode(encoded.trim())?)
}

/// `<kind>-<process number>.docx`, with every non-alphanumeric character of
/// the process number replaced by `-`.
#[must_use]
pub fn document_filename(petition: &Petition) -> String {
    let number: String = petition
        .process_number
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    if number.is_empty() {
        return format!("{}-{}.docx", petition.kind.as_str(), petition.id);
    }
    format!("{}-{number}.docx", petition.kind.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lex_core::enums::PetitionKind;

    fn petition(process_number: &str) -> Petition {
        Petition {
            id: "pet-a3f8b2c1".into(),
            user_id: "usr-1".into(),
            customer_id: None,
            process_number: process_number.into(),
            kind: PetitionKind::Rebuttal,
            entity: "e".into(),
            reason: "r".into(),
            description: "d".into(),
            arguments: "a".into(),
            request: "p".into(),
            authority: None,
            counterparty: None,
            city: None,
            document_date: None,
            attorney_name: None,
            attorney_bar_number: None,
            content: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn filename_sanitizes_process_number() {
        assert_eq!(
            document_filename(&petition("0001234-56.2024.8.26.0100")),
            "rebuttal-0001234-56-2024-8-26-0100.docx"
        );
        assert_eq!(
            document_filename(&petition("Proc/12 ç")),
            "rebuttal-Proc-12--.docx"
        );
    }

    #[test]
    fn blank_process_number_falls_back_to_id() {
        assert_eq!(
            document_filename(&petition("  ")),
            "rebuttal-pet-a3f8b2c1.docx"
        );
    }

    #[test]
    fn base64_roundtrip_and_errors() {
        let bytes = b"PK\x03\x04 petition";
        let encoded = encode_base64(bytes);
        assert_eq!(decode_base64(&format!(" {encoded}\n")).unwrap(), bytes);
        assert!(matches!(decode_base64("***"), Err(DocxError::Base64(_))));
    }
}
