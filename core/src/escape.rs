//! Regex escaping for literal row keys, family names, qualifiers and values.
//!
//! Store-side regex filters must match the whole value, so a literal becomes an
//! exact-match filter once every byte with special meaning is neutralized.
//! Printable ASCII metacharacters get a backslash; every other byte outside
//! printable ASCII is written as `\xHH` so binary literals stay byte-exact.

const META: &[u8] = br"\.+*?()|[]{}^$#&-~";

/// Escapes `literal` so the resulting pattern matches exactly those bytes.
pub fn escape_literal(literal: &[u8]) -> String {
    let mut out = String::with_capacity(literal.len() + 8);
    for &b in literal {
        if META.contains(&b) {
            out.push('\\');
            out.push(b as char);
        } else if (0x20..0x7f).contains(&b) {
            out.push(b as char);
        } else {
            out.push_str(&format!("\\x{b:02X}"));
        }
    }
    out
}

/// Builds an alternation matching exactly one of `literals`.
///
/// Returns `None` for an empty input; callers translate that into a filter that
/// blocks everything.
pub fn escape_alternation<I, L>(literals: I) -> Option<String>
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    let mut out: Option<String> = None;
    for literal in literals {
        let escaped = escape_literal(literal.as_ref());
        match out.as_mut() {
            Some(s) => {
                s.push('|');
                s.push_str(&escaped);
            }
            None => out = Some(escaped),
        }
    }
    out
}
