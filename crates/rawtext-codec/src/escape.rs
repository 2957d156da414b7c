//! The two string-escaping regimes used when rendering commands.
//!
//! Rendered component JSON lands in one of two contexts. Substituted
//! directly into a command argument (tellraw, title, bare nbt), string
//! values need only the direct regime: backslash and double quote. Embedded
//! inside a single-quoted NBT string literal (sign lines, book pages), the
//! whole rendered string additionally passes through [`inline_escape`],
//! which protects backslashes, single quotes, and line feeds. Both layers
//! have exact inverses.

/// Escape a string value for direct placement inside component JSON.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape`]. Unrecognized escape sequences pass through
/// untouched.
pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(c @ ('\\' | '"')) => out.push(c),
            Some(c) => {
                out.push('\\');
                out.push(c);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Escape an already-rendered component string for embedding inside a
/// single-quoted outer literal. Line feeds become the two-character
/// sequence `\n`, which is what the outer literal expects.
pub fn inline_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`inline_escape`].
pub fn inline_unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(c @ ('\\' | '\'')) => out.push(c),
            Some('n') => out.push('\n'),
            Some(c) => {
                out.push('\\');
                out.push(c);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_regime_escapes_quotes_and_backslashes_only() {
        let escaped = escape("say \"hi\" \\ don't\n");
        assert_eq!(escaped, "say \\\"hi\\\" \\\\ don't\n");
    }

    #[test]
    fn direct_regime_roundtrips() {
        let original = "a\"b'c\\d\ne";
        assert_eq!(unescape(&escape(original)), original);
    }

    #[test]
    fn nested_regime_protects_single_quotes_and_newlines() {
        let escaped = inline_escape("it's\nfine\\");
        assert_eq!(escaped, "it\\'s\\nfine\\\\");
    }

    #[test]
    fn nested_regime_roundtrips_all_special_characters() {
        let original = "quote\" apostrophe' backslash\\ newline\n end";
        let nested = inline_escape(&escape(original));
        assert_eq!(unescape(&inline_unescape(&nested)), original);
    }

    #[test]
    fn unknown_escapes_pass_through() {
        assert_eq!(unescape("\\x"), "\\x");
        assert_eq!(inline_unescape("\\x"), "\\x");
    }
}
