//! Translation of algebraic text such as `"18*x1 + 12.5*x2"` or
//! `"x1 + x2 <= 20"` into coefficient vectors over a fixed list of names.
//!
//! Numbers may carry an exponent (`1e3`, `2.5E-2`). Names are matched as
//! whole identifiers, so `x1` never matches inside `x10`. A missing
//! coefficient means 1 and repeated names are summed.

use crate::error::ParseError;

#[derive(Clone, Debug, PartialEq)]
enum Token<'a> {
    Num(f64),
    Ident(&'a str),
    Plus,
    Minus,
    Star,
    Le,
}

impl<'a> Token<'a> {
    fn describe(&self) -> String {
        match self {
            Token::Num(v) => v.to_string(),
            Token::Ident(s) => s.to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Le => "<=".to_string(),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<(usize, Token<'_>)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
        } else if ch.is_ascii_digit() || ch == '.' {
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_ascii_digit() || c == '.' {
                    end = i + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            end += exponent_len(&text[end..]);
            while chars.peek().map_or(false, |&(i, _)| i < end) {
                chars.next();
            }
            let lit = &text[start..end];
            let v = lit
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidNumber(lit.to_string()))?;
            tokens.push((start, Token::Num(v)));
        } else if ch.is_alphabetic() || ch == '_' {
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_alphanumeric() || c == '_' {
                    end = i + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push((start, Token::Ident(&text[start..end])));
        } else {
            chars.next();
            let tok = match ch {
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' => Token::Star,
                '\u{2264}' => Token::Le,
                '<' => match chars.peek() {
                    Some(&(_, '=')) => {
                        chars.next();
                        Token::Le
                    }
                    _ => {
                        return Err(ParseError::UnexpectedToken {
                            token: "<".to_string(),
                            offset: start,
                        })
                    }
                },
                other => {
                    return Err(ParseError::UnexpectedToken {
                        token: other.to_string(),
                        offset: start,
                    })
                }
            };
            tokens.push((start, tok));
        }
    }
    Ok(tokens)
}

/// Length of an exponent suffix `e[+-]digits` at the start of `rest`, or 0.
/// `2e` and `2ex1` keep the `e` for the identifier that follows.
fn exponent_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    let digits = bytes[1 + sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        0
    } else {
        1 + sign + digits
    }
}

fn unexpected(tokens: &[(usize, Token)], i: usize, end: usize) -> ParseError {
    match tokens.get(i) {
        Some((offset, tok)) => ParseError::UnexpectedToken {
            token: tok.describe(),
            offset: *offset,
        },
        None => ParseError::UnexpectedToken {
            token: "end of input".to_string(),
            offset: end,
        },
    }
}

fn linear_from_tokens<S: AsRef<str>>(
    tokens: &[(usize, Token)],
    names: &[S],
    end: usize,
) -> Result<Vec<f64>, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut coeffs = vec![0.0_f64; names.len()];
    let mut i = 0;
    let mut first = true;

    while i < tokens.len() {
        //every term after the first needs a sign in front of it
        let mut sign = 1.0_f64;
        let mut signed = false;
        while let Some((_, tok @ (Token::Plus | Token::Minus))) = tokens.get(i) {
            if *tok == Token::Minus {
                sign = -sign;
            }
            signed = true;
            i += 1;
        }
        if !first && !signed {
            return Err(unexpected(tokens, i, end));
        }

        let mut coeff = 1.0_f64;
        if let Some((_, Token::Num(v))) = tokens.get(i) {
            coeff = *v;
            i += 1;
            if let Some((_, Token::Star)) = tokens.get(i) {
                i += 1;
            }
        }

        match tokens.get(i) {
            Some((_, Token::Ident(name))) => {
                let ix = names
                    .iter()
                    .position(|n| n.as_ref() == *name)
                    .ok_or_else(|| ParseError::UnknownVariable(name.to_string()))?;
                coeffs[ix] += sign * coeff;
                i += 1;
            }
            _ => return Err(unexpected(tokens, i, end)),
        }
        first = false;
    }
    Ok(coeffs)
}

/// Parses a sum of terms `[sign][coefficient][*]name` into one coefficient
/// per entry of `names`.
pub fn parse_linear<S: AsRef<str>>(text: &str, names: &[S]) -> Result<Vec<f64>, ParseError> {
    let tokens = tokenize(text)?;
    linear_from_tokens(&tokens, names, text.len())
}

/// Parses `lhs <= number` (or `lhs ≤ number`) into the lhs coefficients and rhs.
pub fn parse_constraint<S: AsRef<str>>(
    text: &str,
    names: &[S],
) -> Result<(Vec<f64>, f64), ParseError> {
    let tokens = tokenize(text)?;
    let split = tokens
        .iter()
        .position(|(_, t)| *t == Token::Le)
        .ok_or_else(|| ParseError::MissingOperator(text.to_string()))?;

    let (lhs, rhs) = tokens.split_at(split);
    let end = tokens[split].0;
    let coeffs = linear_from_tokens(lhs, names, end)?;

    let rhs = &rhs[1..];
    let mut sign = 1.0_f64;
    let mut i = 0;
    while let Some((_, tok @ (Token::Plus | Token::Minus))) = rhs.get(i) {
        if *tok == Token::Minus {
            sign = -sign;
        }
        i += 1;
    }
    match (rhs.get(i), rhs.len()) {
        (Some((_, Token::Num(v))), len) if len == i + 1 => Ok((coeffs, sign * v)),
        (None, _) => Err(ParseError::UnexpectedToken {
            token: "end of input".to_string(),
            offset: text.len(),
        }),
        _ => Err(unexpected(rhs, i + 1, text.len())),
    }
}
