//! Render-ready view of a quote.
//!
//! This is what a document renderer (PDF or otherwise) receives: the
//! customer-facing number, amounts already rounded and formatted, and the
//! items decoded from storage.

use crate::core::format::{digits_only, format_brl, format_date_br, round_cents};
use crate::core::normalizer::decode_items;
use crate::domain::model::Quote;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentLine {
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub subtotal: f64,
    pub unit_price_text: String,
    pub subtotal_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteDocument {
    pub business_name: String,
    pub quote_id: String,
    pub number: String,
    pub title: String,
    pub customer: String,
    pub contact: String,
    pub date: String,
    pub status: String,
    pub lines: Vec<DocumentLine>,
    pub total: f64,
    pub total_text: String,
}

impl QuoteDocument {
    /// Stored totals win over the recomputed one unless they are unusable.
    pub fn from_quote(quote: &Quote, business_name: &str) -> Self {
        let decoded = decode_items(&quote.items_json);
        let total = if quote.total.is_finite() {
            quote.total
        } else {
            decoded.total
        };
        let total = round_cents(total);
        let number = quote.id.display_form();

        let lines = decoded
            .items
            .iter()
            .map(|item| {
                let unit_price = round_cents(item.unit_price);
                let subtotal = round_cents(item.subtotal());
                DocumentLine {
                    description: item.description.clone(),
                    quantity: item.quantity,
                    unit_price,
                    subtotal,
                    unit_price_text: format_brl(unit_price),
                    subtotal_text: format_brl(subtotal),
                }
            })
            .collect();

        Self {
            business_name: business_name.to_string(),
            quote_id: quote.id.to_string(),
            title: format!("Orçamento Nº {}", number),
            number,
            customer: quote.customer.clone(),
            contact: digits_only(&quote.contact),
            date: format_date_br(quote.date),
            status: quote.status.label().to_string(),
            lines,
            total,
            total_text: format_brl(total),
        }
    }

    pub fn file_name(&self) -> String {
        format!("ORC_{}_{}.pdf", self.quote_id, self.customer)
    }

    /// Fixed-width preview with the same sections as the printed quote.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{:^80}\n", self.business_name));
        out.push_str(&format!("{:^80}\n\n", self.title));
        out.push_str(&format!("Cliente: {}\n", self.customer));
        out.push_str(&format!("WhatsApp: {}\n", self.contact));
        out.push_str(&format!("Data: {}\n", self.date));
        out.push_str(&format!("Status: {}\n\n", self.status));

        out.push_str(&format!(
            "{:<40} {:>6} {:>16} {:>16}\n",
            "Item", "Qtd", "V. Unit.", "Subtotal"
        ));
        out.push_str(&format!("{}\n", "-".repeat(81)));
        for line in &self.lines {
            out.push_str(&format!(
                "{:<40} {:>6} {:>16} {:>16}\n",
                line.description, line.quantity, line.unit_price_text, line.subtotal_text
            ));
        }
        out.push_str(&format!("\n{:>64} {:>16}\n", "TOTAL:", self.total_text));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{QuoteId, QuoteStatus};
    use chrono::NaiveDate;

    fn sample_quote(total: f64) -> Quote {
        Quote {
            id: QuoteId::from("2026-003"),
            date: NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            customer: "Maria".to_string(),
            contact: "(11) 91234-5678".to_string(),
            status: QuoteStatus::InProgress,
            total,
            items_summary: "Compressor, Visita".to_string(),
            items_json: r#"[{"Item":"Compressor","Qtd":2,"Valor Unit.":150.5},{"Item":"Visita","Qtd":1,"Valor Unit.":80}]"#
                .to_string(),
        }
    }

    #[test]
    fn test_document_fields() {
        let doc = QuoteDocument::from_quote(&sample_quote(381.0), "P&S REFRIGERAÇÃO");
        assert_eq!(doc.number, "003/26");
        assert_eq!(doc.title, "Orçamento Nº 003/26");
        assert_eq!(doc.contact, "11912345678");
        assert_eq!(doc.date, "05/03/2026");
        assert_eq!(doc.status, "Em Andamento");
        assert_eq!(doc.lines.len(), 2);
        assert_eq!(doc.lines[0].subtotal_text, "R$ 301,00");
        assert_eq!(doc.total_text, "R$ 381,00");
        assert_eq!(doc.file_name(), "ORC_2026-003_Maria.pdf");
    }

    #[test]
    fn test_unusable_stored_total_is_recomputed() {
        let doc = QuoteDocument::from_quote(&sample_quote(f64::NAN), "P&S");
        assert_eq!(doc.total, 381.0);
    }

    #[test]
    fn test_text_preview_lists_items() {
        let text = QuoteDocument::from_quote(&sample_quote(381.0), "P&S").to_text();
        assert!(text.contains("Orçamento Nº 003/26"));
        assert!(text.contains("Compressor"));
        assert!(text.contains("TOTAL:"));
        assert!(text.contains("R$ 381,00"));
    }
}
