//! URI component encoding shared by share links and remote renderers

use url::form_urlencoded;

/// Percent-encode `value` for use inside a query parameter or `mailto:` field.
///
/// Spaces become `%20` rather than `+` so the result is also valid in
/// `mailto:` and `sms:` bodies.
pub fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaces_and_reserved_characters() {
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("a+b"), "a%2Bb");
        assert_eq!(encode_component("https://x.test/?q=1&r=2"), "https%3A%2F%2Fx.test%2F%3Fq%3D1%26r%3D2");
        assert_eq!(encode_component("line\nbreak"), "line%0Abreak");
    }

    #[test]
    fn unreserved_pass_through() {
        assert_eq!(encode_component("AZaz09-_.*"), "AZaz09-_.*");
    }

    #[test]
    fn utf8_is_percent_encoded() {
        assert_eq!(encode_component("é"), "%C3%A9");
    }
}
