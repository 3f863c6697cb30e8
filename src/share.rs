use webbrowser::Browser;

use crate::sign::ZodiacSign;

/// Where the quiz lives; appended to the share text so readers can play too.
pub const APP_URL: &str = "https://github.com/zodiq/zodiq";

/// Human-readable share line for a finished session.
pub fn text(sign: ZodiacSign) -> String {
    format!("I scored {sign} in the Zodiac Quiz! {APP_URL}")
}

/// Tweet-intent URL carrying the share line.
pub fn url(sign: ZodiacSign) -> String {
    format!("https://twitter.com/intent/tweet?text={}", encode(&text(sign)))
}

/// Hands the share URL to the default browser. Returns false when no
/// browser is available or the hand-off fails.
pub fn open(sign: ZodiacSign) -> bool {
    Browser::is_available() && webbrowser::open(&url(sign)).is_ok()
}

// Just enough escaping for the characters the share line can contain.
fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '!' => out.push_str("%21"),
            '#' => out.push_str("%23"),
            '&' => out.push_str("%26"),
            '/' => out.push_str("%2F"),
            ':' => out.push_str("%3A"),
            '=' => out.push_str("%3D"),
            '?' => out.push_str("%3F"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_text_names_the_sign_and_the_app() {
        let text = text(ZodiacSign::Leo);

        assert_eq!(text, format!("I scored leo in the Zodiac Quiz! {APP_URL}"));
    }

    #[test]
    fn test_share_url_is_percent_encoded() {
        let url = url(ZodiacSign::Aquarius);

        assert!(url.starts_with("https://twitter.com/intent/tweet?text="));
        assert!(url.contains("I%20scored%20aquarius%20in%20the%20Zodiac%20Quiz%21"));

        let query = url.split_once("?text=").unwrap().1;
        assert!(!query.contains(' '));
        assert!(!query.contains('!'));
        assert!(!query.contains('/'));
    }

    #[test]
    fn test_encode_leaves_safe_characters_alone() {
        assert_eq!(encode("zodiac-quiz_1.0"), "zodiac-quiz_1.0");
        assert_eq!(encode("a b"), "a%20b");
    }
}
