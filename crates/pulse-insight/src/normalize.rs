//! Log message normalization
//!
//! Collapses a raw log message into a canonical template key so that
//! messages differing only in ids, addresses, or counters group together:
//! `"User 42 not found"` and `"User 17 not found"` both normalize to
//! `"user not found"`.

/// Maximum length of a normalized key, in characters
pub const MAX_KEY_LEN: usize = 120;

/// Key used when a message normalizes to nothing
pub const OTHER_KEY: &str = "other";

/// Normalize a log message into its template key.
///
/// The message is lowercased; hex literals (`0x` + hex digits), decimal
/// digit runs, and punctuation each collapse to a single space; whitespace
/// runs are collapsed and trimmed; the result is capped at
/// [`MAX_KEY_LEN`] characters. An empty result yields [`OTHER_KEY`].
///
/// Total and deterministic over any input string, and idempotent:
/// `normalize_message(normalize_message(m)) == normalize_message(m)`.
pub fn normalize_message(message: &str) -> String {
    let lower = message.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    let mut out = String::with_capacity(lower.len().min(MAX_KEY_LEN));
    let mut i = 0;
    while i < chars.len() {
        // Hex literal: 0x followed by at least one hex digit
        if chars[i] == '0'
            && chars.get(i + 1) == Some(&'x')
            && chars.get(i + 2).is_some_and(|c| c.is_ascii_hexdigit())
        {
            i += 2;
            while i < chars.len() && chars[i].is_ascii_hexdigit() {
                i += 1;
            }
            push_space(&mut out);
            continue;
        }
        let c = chars[i];
        if c.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                // A hex literal starting mid-run belongs to the hex branch
                if chars[i] == '0'
                    && chars.get(i + 1) == Some(&'x')
                    && chars.get(i + 2).is_some_and(|c| c.is_ascii_hexdigit())
                {
                    break;
                }
                i += 1;
            }
            push_space(&mut out);
            continue;
        }
        if c.is_ascii_lowercase() {
            out.push(c);
        } else {
            // Whitespace and punctuation alike collapse to one space
            push_space(&mut out);
        }
        i += 1;
    }

    // Trim again after truncation: a cut at a word boundary must not leave
    // a trailing space, or the function would stop being idempotent.
    let key: String = out.trim().chars().take(MAX_KEY_LEN).collect();
    let key = key.trim_end();

    if key.is_empty() {
        OTHER_KEY.to_string()
    } else {
        key.to_string()
    }
}

/// Append a separator space unless one is already pending
fn push_space(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_decimal_runs() {
        assert_eq!(normalize_message("User 42 not found"), "user not found");
        assert_eq!(normalize_message("User 17 not found"), "user not found");
    }

    #[test]
    fn strips_hex_literals() {
        assert_eq!(normalize_message("Timeout at 0xFF"), "timeout at");
        assert_eq!(normalize_message("fault 0xdeadbeef raised"), "fault raised");
    }

    #[test]
    fn strips_hex_literals_preceded_by_digits() {
        // The digit run must not swallow the leading 0 of the literal
        assert_eq!(normalize_message("error code 10xff"), "error code");
        assert_eq!(normalize_message("page 30x1f loaded"), "page loaded");
    }

    #[test]
    fn bare_0x_without_digits_is_not_a_hex_literal() {
        // "0x" alone: the 0 is a digit run, the x survives as a letter
        assert_eq!(normalize_message("0x marks the spot"), "x marks the spot");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(
            normalize_message("connection refused: retry (attempt #3)!"),
            "connection refused retry attempt"
        );
    }

    #[test]
    fn collapses_and_trims_whitespace() {
        assert_eq!(normalize_message("  too   many\t\tspaces  "), "too many spaces");
    }

    #[test]
    fn empty_and_symbol_only_messages_fall_back_to_other() {
        assert_eq!(normalize_message(""), OTHER_KEY);
        assert_eq!(normalize_message("12345"), OTHER_KEY);
        assert_eq!(normalize_message("!!! ???"), OTHER_KEY);
        assert_eq!(normalize_message("0x1F 0x2E"), OTHER_KEY);
    }

    #[test]
    fn caps_length_at_120_chars() {
        let long = "word ".repeat(100);
        let key = normalize_message(&long);
        assert!(key.chars().count() <= MAX_KEY_LEN);
        assert!(!key.ends_with(' '));
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "User 42 not found",
            "Timeout at 0xFF",
            "  mixed   CASE  and 123 numbers!! ",
            "",
            "12345",
            &"word ".repeat(100),
        ];
        for input in inputs {
            let once = normalize_message(input);
            assert_eq!(normalize_message(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn deterministic() {
        let input = "Disk /dev/sda1 at 97% capacity";
        assert_eq!(normalize_message(input), normalize_message(input));
    }
}
