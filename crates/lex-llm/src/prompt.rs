//! Prompt construction for petition drafting.

use lex_core::entities::Customer;
use lex_core::enums::PetitionKind;
use lex_core::input::{PetitionInput, format_tax_id};

/// A two-part chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const COMMON_RULES: &str = "Você é um advogado brasileiro especialista em direito \
administrativo e licitações públicas. Redija a peça completa em português formal, \
pronta para protocolo: endereçamento, qualificação, fatos, fundamentos jurídicos \
e pedidos. Não invente fatos, números ou nomes além dos informados. Cite a \
legislação pertinente (Lei nº 14.133/2021, Lei nº 8.666/1993 quando aplicável, \
Constituição Federal) apenas quando relevante. Responda somente com o texto da \
peça, sem comentários adicionais e sem formatação Markdown.";

fn kind_instructions(kind: PetitionKind) -> &'static str {
    match kind {
        PetitionKind::AdministrativeAppeal => {
            "Redija um RECURSO ADMINISTRATIVO contra a decisão indicada, demonstrando \
             o erro da Administração e requerendo a reforma da decisão e, se cabível, \
             o efeito suspensivo."
        }
        PetitionKind::RateAdjustment => {
            "Redija um PEDIDO DE REAJUSTE/REEQUILÍBRIO ECONÔMICO-FINANCEIRO do contrato, \
             demonstrando o fato superveniente, o desequilíbrio da equação contratual \
             e requerendo a recomposição dos valores."
        }
        PetitionKind::Rebuttal => {
            "Redija CONTRARRAZÕES ao recurso interposto pela parte contrária, \
             refutando cada argumento do recurso e requerendo seu não provimento \
             com a manutenção da decisão recorrida."
        }
        PetitionKind::SanctionDefense => {
            "Redija uma DEFESA PRÉVIA em processo administrativo sancionador, \
             apontando ausência de culpa, vícios do procedimento e a \
             desproporcionalidade da sanção, requerendo o arquivamento."
        }
    }
}

/// Build the drafting prompt for one petition.
///
/// The user message lists every provided field; optionals that are absent or
/// blank are left out.
#[must_use]
pub fn build_prompt(input: &PetitionInput, customer: Option<&Customer>) -> Prompt {
    let system = format!("{COMMON_RULES}\n\n{}", kind_instructions(input.kind));

    let mut lines = vec![
        format!("Tipo de peça: {}", input.kind.label()),
        format!("Número do processo: {}", input.process_number.trim()),
        format!("Órgão/entidade destinatária: {}", input.entity.trim()),
    ];

    let optional = [
        ("Autoridade competente", &input.authority),
        ("Parte contrária", &input.counterparty),
    ];
    push_present(&mut lines, &optional);

    if let Some(customer) = customer {
        lines.push(format!(
            "Cliente (requerente): {}, inscrito no CPF/CNPJ sob o nº {}, com endereço em {}",
            customer.legal_name,
            format_tax_id(&customer.tax_id),
            customer.address_line()
        ));
    }

    lines.push(format!("Motivo: {}", input.reason.trim()));
    lines.push(format!("Descrição dos fatos:\n{}", input.description.trim()));
    lines.push(format!("Fundamentos:\n{}", input.arguments.trim()));
    lines.push(format!("Pedido:\n{}", input.request.trim()));

    let closing = [
        ("Cidade", &input.city),
        ("Data", &input.document_date),
        ("Advogado(a)", &input.attorney_name),
        ("OAB", &input.attorney_bar_number),
    ];
    push_present(&mut lines, &closing);

    Prompt {
        system,
        user: lines.join("\n\n"),
    }
}

fn push_present(lines: &mut Vec<String>, fields: &[(&str, &Option<String>)]) {
    for (label, value) in fields {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            lines.push(format!("{label}: {value}"));
        }
    }
}
