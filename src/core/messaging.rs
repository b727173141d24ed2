use crate::core::format::{digits_only, format_brl};

pub fn share_message(business_name: &str, customer: &str, display_id: &str, total: f64) -> String {
    format!(
        "*{}*\n\nOlá *{}*, segue seu orçamento.\nNº: {}\nValor total: {}",
        business_name,
        customer,
        display_id,
        format_brl(total)
    )
}

/// `https://wa.me/<country><digits>?text=<message>`, message percent-encoded.
pub fn share_link(base_url: &str, country_code: &str, contact: &str, message: &str) -> String {
    format!(
        "{}/{}{}?text={}",
        base_url.trim_end_matches('/'),
        digits_only(country_code),
        digits_only(contact),
        urlencoding::encode(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_message() {
        let message = share_message("P&S REFRIGERAÇÃO", "Ana", "003/26", 1500.0);
        assert_eq!(
            message,
            "*P&S REFRIGERAÇÃO*\n\nOlá *Ana*, segue seu orçamento.\nNº: 003/26\nValor total: R$ 1.500,00"
        );
    }

    #[test]
    fn test_share_link_encodes_message() {
        let link = share_link("https://wa.me/", "55", "(11) 98765-4321", "Nº 1/26 & total");
        assert_eq!(
            link,
            "https://wa.me/5511987654321?text=N%C2%BA%201%2F26%20%26%20total"
        );
    }
}
