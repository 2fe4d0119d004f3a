//! Outbound messaging deep links (`scheme://send?to=<number>&text=<message>`).

use crate::domain::types::PhoneNumber;

/// Builds a deep link that opens a chat with `to` prefilled with `text`.
pub fn deep_link(scheme: &str, to: &PhoneNumber, text: &str) -> String {
    format!(
        "{scheme}://send?to={}&text={}",
        to.digits(),
        urlencoding::encode(text)
    )
}

/// Message used when a visitor asks about a product.
pub fn product_inquiry(product_name: &str) -> String {
    format!("Hello! I would like to know more about \"{product_name}\".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_link_encodes_message() {
        let phone = PhoneNumber::new("+1 415 555 2671").unwrap();
        let link = deep_link("whatsapp", &phone, "Gold bar & coins?");
        assert_eq!(
            link,
            "whatsapp://send?to=14155552671&text=Gold%20bar%20%26%20coins%3F"
        );
    }

    #[test]
    fn inquiry_mentions_product() {
        assert!(product_inquiry("Keychain").contains("\"Keychain\""));
    }
}
