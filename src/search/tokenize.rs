//! Identifier tokenization for search entries.

use ahash::AHashSet;

/// Tokenizes identifier-like text into lowercase search terms.
///
/// Words are maximal alphanumeric runs; each word is further split on case boundaries:
/// - **camelCase**: "fooBar" → ["foo", "bar", "foobar"]
/// - **Acronyms**: "HTTPServer" → ["http", "server", "httpserver"]
/// - **Separators**: "parse_json" → ["parse", "json"]
///
/// A word that splits into several parts also yields itself as a compound token.
/// Tokens are deduplicated, keeping first-seen order.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut seen = AHashSet::new();
    extend_tokens(text, &mut tokens, &mut seen);
    tokens
}

/// Tokenize several texts into one deduplicated list.
pub fn tokenize_all<'a>(texts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut seen = AHashSet::new();
    for text in texts {
        extend_tokens(text, &mut tokens, &mut seen);
    }
    tokens
}

fn extend_tokens(text: &str, tokens: &mut Vec<String>, seen: &mut AHashSet<String>) {
    let mut push = |token: &str| {
        let lowercase = token.to_lowercase();
        if !lowercase.is_empty() && seen.insert(lowercase.clone()) {
            tokens.push(lowercase);
        }
    };

    for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        let parts = split_case(word);
        for part in &parts {
            push(part);
        }
        if parts.len() > 1 {
            push(word);
        }
    }
}

/// Split one alphanumeric word at case boundaries.
///
/// A boundary falls before an uppercase letter that follows a lowercase letter or digit,
/// and before the last capital of an acronym when a lowercase letter follows it.
fn split_case(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (offset, c) = chars[i];
        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|(_, n)| *n);

        let camel = c.is_uppercase() && (prev.is_lowercase() || prev.is_numeric());
        let acronym_end =
            c.is_uppercase() && prev.is_uppercase() && next.is_some_and(char::is_lowercase);

        if camel || acronym_end {
            parts.push(&word[start..offset]);
            start = offset;
        }
    }
    parts.push(&word[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case("fooBar", vec!["foo", "bar", "foobar"])]
    #[case("HTTPServer", vec!["http", "server", "httpserver"])]
    #[case("XMLHttpRequest", vec!["xml", "http", "request", "xmlhttprequest"])]
    #[case("parse_json", vec!["parse", "json"])]
    #[case("utf8Decode", vec!["utf8", "decode", "utf8decode"])]
    #[case("Client.send", vec!["client", "send"])]
    #[case("$on", vec!["on"])]
    #[case("ID", vec!["id"])]
    #[case("", vec![])]
    fn test_tokenize(#[case] input: &str, #[case] expected: Vec<&str>) {
        check!(tokenize(input) == expected);
    }

    #[test]
    fn test_tokenize_all_dedupes_in_first_seen_order() {
        let tokens = tokenize_all(["HttpClient", "net.HttpClient", "client"]);
        check!(tokens == vec!["http", "client", "httpclient", "net"]);
    }
}
