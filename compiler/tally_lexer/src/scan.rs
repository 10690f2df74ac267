//! Hand-written scanners for literals that logos only starts.
//!
//! Each scanner looks at the source text following the opening delimiter and
//! reports how many bytes belong to the literal. Scanners never consume a
//! newline: an unterminated literal stops before it so the newline is still
//! lexed as a statement terminator.

/// Outcome of scanning a delimited literal.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Scanned {
    /// Closing delimiter found. `consumed` includes it.
    Closed { text: String, consumed: usize },
    /// Newline or end of input reached first. `consumed` stops before the
    /// newline.
    Unterminated { consumed: usize },
}

/// Scan a string body up to the closing `"`.
///
/// Recognized escapes: `\"`, `\\`, `\n`, `\t`. Other escapes are kept as
/// written.
pub(crate) fn scan_string(rest: &str) -> Scanned {
    scan_delimited(rest, '"', |c, text| match c {
        '"' => text.push('"'),
        '\\' => text.push('\\'),
        'n' => text.push('\n'),
        't' => text.push('\t'),
        other => {
            text.push('\\');
            text.push(other);
        }
    })
}

/// Scan a regex body up to the closing `/`.
///
/// `\/` becomes `/`; every other escape is passed through untouched for the
/// regex engine.
pub(crate) fn scan_regex(rest: &str) -> Scanned {
    scan_delimited(rest, '/', |c, text| {
        if c != '/' {
            text.push('\\');
        }
        text.push(c);
    })
}

fn scan_delimited(rest: &str, close: char, mut escape: impl FnMut(char, &mut String)) -> Scanned {
    let mut text = String::new();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\n' => return Scanned::Unterminated { consumed: i },
            '\\' => match chars.next() {
                Some((j, '\n')) => return Scanned::Unterminated { consumed: j },
                Some((_, escaped)) => escape(escaped, &mut text),
                None => return Scanned::Unterminated { consumed: rest.len() },
            },
            c if c == close => {
                return Scanned::Closed {
                    text,
                    consumed: i + c.len_utf8(),
                }
            }
            c => text.push(c),
        }
    }
    Scanned::Unterminated {
        consumed: rest.len(),
    }
}

/// Classification of a number-like lexeme.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum NumberClass {
    Int,
    Float,
    Invalid,
}

/// Length of a signed exponent tail (`-5`, `+12`) that logos left behind
/// after a lexeme ending in `e`/`E`, including any trailing word characters
/// so `1e-5x` is classified as a whole.
pub(crate) fn exponent_tail_len(lexeme: &str, rest: &str) -> usize {
    if !lexeme.ends_with(['e', 'E']) {
        return 0;
    }
    let bytes = rest.as_bytes();
    if bytes.len() < 2 || !matches!(bytes[0], b'+' | b'-') || !bytes[1].is_ascii_digit() {
        return 0;
    }
    1 + rest[1..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'.')
        .count()
}

/// Classify a lexeme matched by `[0-9][0-9A-Za-z_.]*` (plus exponent tail).
///
/// Accepted forms: `123`, `1.5`, `1.`, `1e9`, `1.5e-3`.
pub(crate) fn classify_number(lexeme: &str) -> NumberClass {
    let bytes = lexeme.as_bytes();
    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut i = digits(0);
    if i == bytes.len() {
        return NumberClass::Int;
    }
    if bytes[i] == b'.' {
        i += 1;
        i += digits(i);
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp = digits(i);
        if exp == 0 {
            return NumberClass::Invalid;
        }
        i += exp;
    }
    if i == bytes.len() {
        NumberClass::Float
    } else {
        NumberClass::Invalid
    }
}
