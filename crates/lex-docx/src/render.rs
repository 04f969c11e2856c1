//! Petition and plain-text document rendering.

use chrono::{Datelike, NaiveDate};

use lex_core::entities::{Customer, Petition};
use lex_core::input::format_tax_id;

use crate::error::DocxError;
use crate::package;
use crate::xml::{Align, empty_paragraph, paragraph};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// `2024-10-01` → `1º de outubro de 2024`; anything unparseable is kept as-is.
fn long_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_or_else(
        |_| raw.trim().to_string(),
        |d| {
            let day = if d.day() == 1 {
                "1º".to_string()
            } else {
                d.day().to_string()
            };
            format!("{day} de {} de {}", MONTHS[d.month0() as usize], d.year())
        },
    )
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn body_paragraphs(body: &str) -> impl Iterator<Item = String> + '_ {
    body.lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(|line| paragraph(line.trim_start(), Align::Justify, false))
}

/// Render a petition as a `.docx` package.
///
/// # Errors
///
/// Returns `DocxError` if the zip package cannot be written.
pub fn render_petition(petition: &Petition, customer: Option<&Customer>) -> Result<Vec<u8>, DocxError> {
    let title = petition.kind.label().to_uppercase();
    let mut xml = String::new();

    xml.push_str(&paragraph(&title, Align::Center, true));
    xml.push_str(&empty_paragraph());

    let mut header = vec![format!("Processo nº {}", petition.process_number.trim())];
    header.push(format!("Destinatário: {}", petition.entity.trim()));
    if let Some(authority) = present(petition.authority.as_deref()) {
        header.push(format!("Autoridade: {authority}"));
    }
    if let Some(customer) = customer {
        header.push(format!(
            "Requerente: {}, CPF/CNPJ {}",
            customer.legal_name,
            format_tax_id(&customer.tax_id)
        ));
        header.push(format!("Endereço: {}", customer.address_line()));
    }
    if let Some(counterparty) = present(petition.counterparty.as_deref()) {
        header.push(format!("Parte contrária: {counterparty}"));
    }
    for line in &header {
        xml.push_str(&paragraph(line, Align::Left, false));
    }
    xml.push_str(&empty_paragraph());

    for p in body_paragraphs(&petition.content) {
        xml.push_str(&p);
    }
    xml.push_str(&empty_paragraph());

    xml.push_str(&paragraph("Nestes termos, pede deferimento.", Align::Left, false));
    let place_date = match (
        present(petition.city.as_deref()),
        present(petition.document_date.as_deref()),
    ) {
        (Some(city), Some(date)) => Some(format!("{city}, {}.", long_date(date))),
        (Some(city), None) => Some(format!("{city}.")),
        (None, Some(date)) => Some(format!("{}.", long_date(date))),
        (None, None) => None,
    };
    if let Some(place_date) = place_date {
        xml.push_str(&paragraph(&place_date, Align::Right, false));
    }

    let attorney = present(petition.attorney_name.as_deref());
    let bar = present(petition.attorney_bar_number.as_deref());
    if attorney.is_some() || bar.is_some() {
        xml.push_str(&empty_paragraph());
        xml.push_str(&paragraph("________________________________", Align::Center, false));
        if let Some(name) = attorney {
            xml.push_str(&paragraph(name, Align::Center, true));
        }
        if let Some(bar) = bar {
            xml.push_str(&paragraph(&format!("OAB {bar}"), Align::Center, false));
        }
    }

    package::build(&title, &xml)
}

/// Render a titled plain-text document, one paragraph per non-empty line.
///
/// # Errors
///
/// Returns `DocxError` if the zip package cannot be written.
pub fn render_text(title: &str, body: &str) -> Result<Vec<u8>, DocxError> {
    let mut xml = String::new();
    if !title.trim().is_empty() {
        xml.push_str(&paragraph(title.trim(), Align::Center, true));
        xml.push_str(&empty_paragraph());
    }
    for p in body_paragraphs(body) {
        xml.push_str(&p);
    }
    package::build(title.trim(), &xml)
}
