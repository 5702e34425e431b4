//! Line code ordering.
//!
//! Norwegian Bokmål collation at base strength with numeric runs compared
//! by value: "2" < "12" < "12E" < "N12", case and accents ignored, and
//! æ, ø, å sorting after z.

use std::cmp::Ordering;

/// Collation element. Variant order is significant: symbols sort before
/// numbers, numbers before letters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Token {
    Symbol(u32),
    /// (significant digit count, digits without leading zeros)
    Number(usize, String),
    Letter(u32),
}

/// Compare two line codes the way a Norwegian reader would sort them.
///
/// Codes that differ only in case (or accents) compare equal, so a stable
/// sort keeps their original relative order.
pub fn compare_line_codes(a: &str, b: &str) -> Ordering {
    tokens(a).cmp(&tokens(b))
}

fn tokens(s: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            let mut digits = String::from(c);
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_digit() {
                    break;
                }
                digits.push(next);
                chars.next();
            }
            let significant = digits.trim_start_matches('0').to_string();
            out.push(Token::Number(significant.len(), significant));
        } else if c.is_alphabetic() {
            out.push(Token::Letter(letter_weight(c)));
        } else {
            out.push(Token::Symbol(c as u32));
        }
    }

    out
}

fn letter_weight(c: char) -> u32 {
    let lower = c.to_lowercase().next().unwrap_or(c);
    let base = match lower {
        'á' | 'à' | 'â' | 'ã' => 'a',
        'ç' => 'c',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ó' | 'ò' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'û' => 'u',
        'ü' => 'y',
        other => other,
    };

    match base {
        'a'..='z' => base as u32 - 'a' as u32,
        'æ' | 'ä' => 26,
        'ø' | 'ö' => 27,
        'å' => 28,
        other => 100 + other as u32,
    }
}
