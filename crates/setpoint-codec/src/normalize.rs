//! Payload normalization: stripping foreign numeric annotations.
//!
//! Mailbox payloads may arrive with values wrapped in another ecosystem's
//! constructor-call syntax, e.g. `np.float64(1.5)` or `np.array([1.0, 2.0])`,
//! and with foreign spellings of the boolean and absent-value literals.
//! Normalization rewrites such text into the plain bracketed literal form
//! the parser accepts.
//!
//! # Rewrite rules
//!
//! One pass applies three rewrites left to right, and the pass repeats until
//! it changes nothing, so wrappers nested inside wrappers unwrap across
//! iterations:
//!
//! 1. `alias.array([...])` becomes the bracketed literal, even while call
//!    wrappers remain inside the brackets.
//! 2. `alias.ident(args)` with no parentheses inside `args` becomes `args`.
//! 3. `None` / `True` / `False` become `null` / `true` / `false`, matched
//!    as whole words only.
//!
//! The scanner only ever copies spans of the input; nothing is evaluated.

/// Normalize a raw payload into plain literal text.
///
/// Trims surrounding whitespace, then applies the rewrite rules to a
/// fixpoint. Idempotent: normalizing already-normalized text returns it
/// unchanged.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let next = replace_foreign_tokens(&strip_wrappers(&current));
        if next == current {
            return current;
        }
        // stripping a wrapper can expose padding from inside its argument
        current = next.trim().to_string();
    }
}

const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// True when an identifier at `i` continues a dotted path (`np.random.rand`)
/// rather than starting a two-component wrapper.
fn continues_path(bytes: &[u8], i: usize) -> bool {
    i > 0 && (is_ident_byte(bytes[i - 1]) || bytes[i - 1] == b'.')
}

fn scan_ident(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_ident_byte(bytes[i]) {
        i += 1;
    }
    i
}

/// One left-to-right pass replacing annotation wrappers with their contents.
///
/// At each candidate identifier the array rule is tried before the general
/// call rule; the array rule is the only one that may keep parenthesized
/// wrappers (inside its brackets) for a later pass to strip.
fn strip_wrappers(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if is_ident_start(bytes[i]) && !continues_path(bytes, i) {
            let matched = match_array_wrapper(bytes, i).or_else(|| match_call_wrapper(bytes, i));
            if let Some((span_start, span_end, resume)) = matched {
                out.push_str(&text[copied..i]);
                out.push_str(&text[span_start..span_end]);
                copied = resume;
                i = resume;
                continue;
            }
            i = scan_ident(bytes, i);
        } else {
            i += 1;
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Match `alias.ident(args)` at `start` where `args` contains no
/// parentheses. Returns the argument span and the offset one past the
/// closing parenthesis.
fn match_call_wrapper(bytes: &[u8], start: usize) -> Option<(usize, usize, usize)> {
    let alias_end = scan_ident(bytes, start);
    if alias_end >= bytes.len() || bytes[alias_end] != b'.' {
        return None;
    }
    let ident_start = alias_end + 1;
    if ident_start >= bytes.len() || !is_ident_start(bytes[ident_start]) {
        return None;
    }
    let ident_end = scan_ident(bytes, ident_start);
    if ident_end >= bytes.len() || bytes[ident_end] != b'(' {
        return None;
    }
    let args_start = ident_end + 1;
    let mut j = args_start;
    while j < bytes.len() {
        match bytes[j] {
            b')' => return Some((args_start, j, j + 1)),
            b'(' => return None,
            _ => j += 1,
        }
    }
    None
}

/// Match `alias.array([...])` at `start` where the argument is a complete
/// balanced bracketed literal. Returns the literal span and the offset one
/// past the closing parenthesis.
fn match_array_wrapper(bytes: &[u8], start: usize) -> Option<(usize, usize, usize)> {
    let alias_end = scan_ident(bytes, start);
    if alias_end >= bytes.len() || bytes[alias_end] != b'.' {
        return None;
    }
    let ident_start = alias_end + 1;
    let ident_end = scan_ident(bytes, ident_start);
    if &bytes[ident_start..ident_end] != b"array" {
        return None;
    }
    if ident_end >= bytes.len() || bytes[ident_end] != b'(' {
        return None;
    }
    let lit_start = ident_end + 1;
    if lit_start >= bytes.len() || bytes[lit_start] != b'[' {
        return None;
    }
    let mut depth = 1usize;
    let mut j = lit_start + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    // the literal must be the whole argument
                    if j + 1 < bytes.len() && bytes[j + 1] == b')' {
                        return Some((lit_start, j + 1, j + 2));
                    }
                    return None;
                }
            }
            _ => {}
        }
        j += 1;
    }
    None
}

/// One pass rewriting whole-word foreign literals into neutral tokens.
fn replace_foreign_tokens(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if is_ident_start(bytes[i]) && (i == 0 || !is_ident_byte(bytes[i - 1])) {
            let end = scan_ident(bytes, i);
            let replacement = match &bytes[i..end] {
                b"None" => Some("null"),
                b"True" => Some("true"),
                b"False" => Some("false"),
                _ => None,
            };
            if let Some(token) = replacement {
                out.push_str(&text[copied..i]);
                out.push_str(token);
                copied = end;
            }
            i = end;
        } else {
            i += 1;
        }
    }
    out.push_str(&text[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scalar_wrapper() {
        assert_eq!(normalize("np.float64(1.5)"), "1.5");
        assert_eq!(normalize("[np.float64(1.5), 2.0]"), "[1.5, 2.0]");
    }

    #[test]
    fn strips_array_wrapper() {
        assert_eq!(normalize("np.array([1.0, 2.0])"), "[1.0, 2.0]");
    }

    #[test]
    fn unwraps_nested_wrappers() {
        // wrappers inside the array literal need a second pass
        assert_eq!(
            normalize("np.array([np.float64(1.0), np.float64(2.0)])"),
            "[1.0, 2.0]"
        );
        assert_eq!(normalize("np.float64(np.float64(2.5))"), "2.5");
    }

    #[test]
    fn array_rule_requires_whole_argument() {
        // a call wrapper still fires, copying the argument text verbatim
        assert_eq!(normalize("np.array([1], 2)"), "[1], 2");
    }

    #[test]
    fn replaces_foreign_tokens_as_whole_words() {
        assert_eq!(normalize("[None, True, False]"), "[null, true, false]");
        assert_eq!(normalize("[NoneType, Trueish]"), "[NoneType, Trueish]");
    }

    #[test]
    fn leaves_plain_literals_alone() {
        assert_eq!(normalize("[1, 2, 3]"), "[1, 2, 3]");
        assert_eq!(normalize("[1.0, [2.0, 3.0]]"), "[1.0, [2.0, 3.0]]");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize("  [1.0, 2.0]\n"), "[1.0, 2.0]");
        assert_eq!(normalize("np.float64( 1.5 )"), "1.5");
    }

    #[test]
    fn longer_dotted_paths_are_not_wrappers() {
        assert_eq!(normalize("[np.random.rand(4)]"), "[np.random.rand(4)]");
    }

    #[test]
    fn idempotent_on_normalized_text() {
        let inputs = [
            "np.array([np.float64(1.0), None])",
            "[True, 2.5, [3, np.int64(4)]]",
            "[]",
            "plain junk",
        ];
        for raw in inputs {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn unbalanced_wrapper_left_untouched() {
        assert_eq!(normalize("np.float64(1.5"), "np.float64(1.5");
        assert_eq!(normalize("np.array([1.0, 2.0"), "np.array([1.0, 2.0");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // idempotence must hold for arbitrary text, not just payloads
            #[test]
            fn idempotent_for_arbitrary_text(raw in "[\\[\\](),. a-zA-Z0-9_+-]{0,48}") {
                let once = normalize(&raw);
                prop_assert_eq!(&normalize(&once), &once);
            }
        }
    }
}
