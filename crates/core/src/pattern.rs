//! SQL `LIKE` pattern helpers.
//!
//! Postgres evaluates `LIKE` server-side; [`like_matches`] reproduces the
//! same semantics for the in-process store so both backends agree.

const ESCAPE: char = '\\';

/// Escape `%`, `_` and `\` so `fragment` matches literally inside a pattern.
pub fn escape_like(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// `%fragment%` with the fragment escaped.
pub fn contains_pattern(fragment: &str) -> String {
    format!("%{}%", escape_like(fragment))
}

/// Case-sensitive `LIKE` match with `\` as the escape character.
pub fn like_matches(pattern: &str, value: &str) -> bool {
    let pattern = tokenize(pattern);
    let value: Vec<char> = value.chars().collect();
    matches_from(&pattern, &value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Literal(char),
    AnyOne,
    AnyRun,
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        let token = match ch {
            '%' => Token::AnyRun,
            '_' => Token::AnyOne,
            ESCAPE => Token::Literal(chars.next().unwrap_or(ESCAPE)),
            other => Token::Literal(other),
        };
        tokens.push(token);
    }
    tokens
}

/// Iterative wildcard match with single-star backtracking.
fn matches_from(pattern: &[Token], value: &[char]) -> bool {
    let (mut p, mut v) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while v < value.len() {
        match pattern.get(p) {
            Some(Token::AnyRun) => {
                backtrack = Some((p, v));
                p += 1;
            }
            Some(Token::AnyOne) => {
                p += 1;
                v += 1;
            }
            Some(Token::Literal(c)) if *c == value[v] => {
                p += 1;
                v += 1;
            }
            _ => match backtrack {
                Some((bp, bv)) => {
                    p = bp + 1;
                    v = bv + 1;
                    backtrack = Some((bp, bv + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|t| *t == Token::AnyRun)
}
