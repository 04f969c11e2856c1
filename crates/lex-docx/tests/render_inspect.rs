//! Render packages and read them back through the public inspection API.

use chrono::Utc;
use lex_core::entities::{Customer, Petition};
use lex_core::enums::PetitionKind;
use lex_docx::{DocxError, inspect, render_petition, render_text};
use pretty_assertions::assert_eq;

fn petition() -> Petition {
    Petition {
        id: "pet-a3f8b2c1".into(),
        user_id: "usr-00ff00ff".into(),
        customer_id: Some("cus-1".into()),
        process_number: "0001234-56.2024.8.26.0100".into(),
        kind: PetitionKind::AdministrativeAppeal,
        entity: "Prefeitura de Campinas".into(),
        reason: "Inabilitação".into(),
        description: "d".into(),
        arguments: "a".into(),
        request: "p".into(),
        authority: Some("Pregoeiro".into()),
        counterparty: None,
        city: Some("Campinas".into()),
        document_date: Some("2024-10-01".into()),
        attorney_name: Some("Ana Souza".into()),
        attorney_bar_number: Some("SP 123.456".into()),
        content: "EXCELENTÍSSIMO SENHOR PREGOEIRO\n\n   \nA empresa <Alfa> & cia recorre.\nPede deferimento.  ".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn customer() -> Customer {
    Customer {
        id: "cus-1".into(),
        user_id: "usr-00ff00ff".into(),
        legal_name: "Construtora Alfa Ltda".into(),
        tax_id: "12345678000195".into(),
        street: "Rua das Flores".into(),
        number: "100".into(),
        complement: None,
        district: "Centro".into(),
        city: "Campinas".into(),
        state: "SP".into(),
        postal_code: "13010-000".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn petition_package_has_all_parts() {
    let bytes = render_petition(&petition(), None).unwrap();
    assert_eq!(&bytes[..2], b"PK");

    let summary = inspect(&bytes).unwrap();
    assert_eq!(
        summary.entries,
        [
            "[Content_Types].xml",
            "_rels/.rels",
            "word/document.xml",
            "word/_rels/document.xml.rels",
            "word/styles.xml",
            "docProps/core.xml",
        ]
    );
}

#[test]
fn petition_text_layout() {
    let customer = customer();
    let bytes = render_petition(&petition(), Some(&customer)).unwrap();
    let paragraphs = inspect(&bytes).unwrap().paragraphs;

    assert_eq!(paragraphs[0], "RECURSO ADMINISTRATIVO");
    assert!(paragraphs.contains(&"Processo nº 0001234-56.2024.8.26.0100".to_string()));
    assert!(paragraphs.contains(&"Autoridade: Pregoeiro".to_string()));
    assert!(
        paragraphs
            .iter()
            .any(|p| p.starts_with("Requerente: Construtora Alfa Ltda, CPF/CNPJ 12.345.678/0001-95"))
    );
    assert!(!paragraphs.iter().any(|p| p.starts_with("Parte contrária")));

    // Escaped on the way in, unescaped on the way out.
    assert!(paragraphs.contains(&"A empresa <Alfa> & cia recorre.".to_string()));
    assert!(paragraphs.contains(&"Campinas, 1º de outubro de 2024.".to_string()));

    let tail: Vec<&str> = paragraphs.iter().rev().take(2).map(String::as_str).collect();
    assert_eq!(tail, ["OAB SP 123.456", "Ana Souza"]);
}

#[test]
fn blank_content_lines_are_skipped() {
    let bytes = render_text("Título", "linha 1\n\n   \nlinha 2").unwrap();
    assert_eq!(inspect(&bytes).unwrap().paragraphs, ["Título", "linha 1", "linha 2"]);
}

#[test]
fn template_placeholders_are_listed() {
    let template = render_text("Modelo", "Cliente: {{razao_social}}\nCNPJ {cnpj} / {cnpj}\n{sem_valor}").unwrap();
    let summary = inspect(&template).unwrap();
    assert_eq!(summary.placeholders, ["razao_social", "cnpj", "sem_valor"]);
    assert_eq!(summary.entries.len(), 6);
}

#[test]
fn not_a_zip() {
    assert!(matches!(inspect(b"plain text"), Err(DocxError::Zip(_))));
}

#[test]
fn missing_document_part() {
    let bytes = {
        use std::io::Write;
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        zip.start_file("word/styles.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<w:styles/>").unwrap();
        zip.finish().unwrap().into_inner()
    };
    assert!(matches!(inspect(&bytes), Err(DocxError::MissingPart(p)) if p == "word/document.xml"));
}
