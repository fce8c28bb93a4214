//! Minimal HTML-to-text for scraped feed lines.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("Invalid regex")
});

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "lsquo" | "rsquo" => '\'',
        "ldquo" | "rdquo" => '"',
        "ndash" | "mdash" => '-',
        "hellip" => '\u{2026}',
        "copy" => '\u{a9}',
        "eacute" => '\u{e9}',
        _ => return None,
    };
    Some(c)
}

/// Decode numeric and common named character references. Unknown entities
/// are left as written.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or(body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                named_entity(body)
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Remove tags, then decode character references
pub fn html_to_text(html: &str) -> String {
    decode_entities(&TAG.replace_all(html, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_removed() {
        assert_eq!(html_to_text("<B>Why</B> did the <i>chicken</i>"), "Why did the chicken");
        assert_eq!(html_to_text("<BR>"), "");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(html_to_text("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(html_to_text("it&#39;s &#x27;ok&#X27;"), "it's 'ok'");
        assert_eq!(html_to_text("&quot;hi&quot;&nbsp;there"), "\"hi\" there");
        assert_eq!(html_to_text("caf&eacute;"), "caf\u{e9}");
    }

    #[test]
    fn test_unknown_entity_kept() {
        assert_eq!(decode_entities("&bogus; &#xZZ;"), "&bogus; &#xZZ;");
    }
}
