//! Pattern tokenization, validation, and optional-parameter expansion.
//!
//! A pattern is split into literal runs, `:name` / `:name?` parameter tokens,
//! and a trailing `*`. Validation happens here so that the tree only ever sees
//! well-formed input.

use crate::error::RouterError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Param { name: String, optional: bool },
    Wildcard,
}

impl Token {
    fn is_optional(&self) -> bool {
        matches!(self, Token::Param { optional: true, .. })
    }
}

/// One parameter plus the literal run that follows it (empty when the
/// parameter ends the pattern).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParamStep {
    pub(crate) name: String,
    pub(crate) tail: String,
}

/// A concrete (optional-free) pattern ready for tree insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedPattern {
    pub(crate) head: String,
    pub(crate) steps: Vec<ParamStep>,
    pub(crate) wildcard: bool,
}

/// Empty becomes `/`; anything else gets a leading `/` if it lacks one.
pub(crate) fn normalize(pattern: &str) -> String {
    if pattern.is_empty() {
        "/".to_string()
    } else if pattern.starts_with('/') {
        pattern.to_string()
    } else {
        format!("/{pattern}")
    }
}

fn check_char(pattern: &str, c: char) -> Result<(), RouterError> {
    if c.is_whitespace() || c.is_control() {
        return Err(RouterError::invalid(
            pattern,
            "whitespace and control characters are not allowed",
        ));
    }
    if c == '#' {
        return Err(RouterError::invalid(pattern, "fragments ('#') are not allowed"));
    }
    Ok(())
}

fn param_token(pattern: &str, raw: &str) -> Result<Token, RouterError> {
    let (name, optional) = match raw.strip_suffix('?') {
        Some(name) => (name, true),
        None => (raw, false),
    };
    if name.is_empty() {
        return Err(RouterError::invalid(pattern, "empty parameter name"));
    }
    if name.ends_with('*') {
        return Err(RouterError::invalid(
            pattern,
            "a wildcard cannot directly follow a parameter",
        ));
    }
    if let Some(bad) = name.chars().find(|c| matches!(c, ':' | '*' | '?')) {
        return Err(RouterError::invalid(
            pattern,
            format!("parameter \"{name}\" contains '{bad}'"),
        ));
    }
    for c in name.chars() {
        check_char(pattern, c)?;
    }
    Ok(Token::Param {
        name: name.to_string(),
        optional,
    })
}

/// Split a normalized pattern into tokens, rejecting anything that is not
/// path-shaped.
pub(crate) fn tokenize(pattern: &str) -> Result<Vec<Token>, RouterError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while let Some(c) = pattern[i..].chars().next() {
        match c {
            ':' => {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                let start = i + 1;
                let end = pattern[start..]
                    .find('/')
                    .map_or(pattern.len(), |offset| start + offset);
                tokens.push(param_token(pattern, &pattern[start..end])?);
                i = end;
                continue;
            }
            '*' => {
                if i + 1 != pattern.len() {
                    return Err(RouterError::invalid(
                        pattern,
                        "'*' is only allowed as the final character",
                    ));
                }
                if literal.is_empty() && matches!(tokens.last(), Some(Token::Param { .. })) {
                    return Err(RouterError::invalid(
                        pattern,
                        "a wildcard cannot directly follow a parameter",
                    ));
                }
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Wildcard);
            }
            '?' => {
                return Err(RouterError::invalid(
                    pattern,
                    "'?' is only allowed as an optional parameter marker",
                ));
            }
            other => {
                check_char(pattern, other)?;
                literal.push(other);
            }
        }
        i += c.len_utf8();
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }

    check_optional_placement(pattern, &tokens)?;
    Ok(tokens)
}

/// Optional parameters must be whole segments at the end of the pattern.
fn check_optional_placement(pattern: &str, tokens: &[Token]) -> Result<(), RouterError> {
    let Some(first) = tokens.iter().position(Token::is_optional) else {
        return Ok(());
    };
    let err = || RouterError::invalid(pattern, "optional parameters must be whole trailing segments");

    match first.checked_sub(1).and_then(|prev| tokens.get(prev)) {
        Some(Token::Literal(lit)) if lit.ends_with('/') => {}
        _ => return Err(err()),
    }
    for pair in tokens[first + 1..].chunks(2) {
        match pair {
            [Token::Literal(lit), Token::Param { optional: true, .. }] if lit == "/" => {}
            _ => return Err(err()),
        }
    }
    Ok(())
}

/// Expand optional parameters into concrete patterns.
///
/// The first entry is the pattern with every optional marker removed; each
/// following entry drops one more trailing optional segment, so `k` optional
/// segments yield `k + 1` patterns.
pub(crate) fn expand(pattern: &str) -> Result<Vec<String>, RouterError> {
    let tokens = tokenize(pattern)?;
    if !tokens.iter().any(Token::is_optional) {
        return Ok(vec![pattern.to_string()]);
    }

    let mut variants = vec![pattern.replace('?', "")];
    let cut = pattern.rfind('/').unwrap_or(0);
    variants.extend(expand(&normalize(&pattern[..cut]))?);
    Ok(variants)
}

/// Parse a concrete pattern (no optional markers) into insertion steps.
pub(crate) fn parse(pattern: &str) -> Result<ParsedPattern, RouterError> {
    let mut parsed = ParsedPattern {
        head: String::new(),
        steps: Vec::new(),
        wildcard: false,
    };

    for token in tokenize(pattern)? {
        match token {
            Token::Literal(lit) => match parsed.steps.last_mut() {
                Some(step) => step.tail = lit,
                None => parsed.head = lit,
            },
            Token::Param { optional: true, .. } => {
                return Err(RouterError::invalid(
                    pattern,
                    "optional parameters must be expanded before insertion",
                ));
            }
            Token::Param { name, .. } => parsed.steps.push(ParamStep {
                name,
                tail: String::new(),
            }),
            Token::Wildcard => parsed.wildcard = true,
        }
    }

    if !parsed.head.starts_with('/') {
        return Err(RouterError::invalid(pattern, "patterns must begin with '/'"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("hello"), "/hello");
        assert_eq!(normalize("*"), "/*");
        assert_eq!(normalize("/a/b"), "/a/b");
    }

    #[test]
    fn test_tokenize_params_and_literals() {
        let tokens = tokenize("/users/:id/posts/:post?").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Literal("/users/".into()),
                Token::Param { name: "id".into(), optional: false },
                Token::Literal("/posts/".into()),
                Token::Param { name: "post".into(), optional: true },
            ]
        );
    }

    #[test]
    fn test_tokenize_wildcard() {
        let tokens = tokenize("/:name/*").unwrap();
        assert_eq!(tokens.last(), Some(&Token::Wildcard));
        assert_eq!(tokenize("/*").unwrap(), vec![Token::Literal("/".into()), Token::Wildcard]);
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        for bad in [
            "/a b",
            "/a#b",
            "/a?b",
            "/:",
            "/:?",
            "/a/*/b",
            "/:name*",
            "/:a:b",
            "/a/:b?/c",
            "/a/x:b?",
            "/**",
            "/tab\there",
        ] {
            assert!(
                matches!(tokenize(bad), Err(RouterError::InvalidPattern { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_expand_single_optional() {
        assert_eq!(expand("/files/:id?").unwrap(), vec!["/files/:id", "/files"]);
        assert_eq!(expand("/:id?").unwrap(), vec!["/:id", "/"]);
    }

    #[test]
    fn test_expand_many_optionals_yields_k_plus_one() {
        assert_eq!(
            expand("/a/:b?/:c?").unwrap(),
            vec!["/a/:b/:c", "/a/:b", "/a"]
        );
    }

    #[test]
    fn test_parse_steps() {
        let parsed = parse("/users/:id/posts/:post").unwrap();
        assert_eq!(parsed.head, "/users/");
        assert_eq!(parsed.steps.len(), 2);
        assert_eq!(parsed.steps[0].name, "id");
        assert_eq!(parsed.steps[0].tail, "/posts/");
        assert_eq!(parsed.steps[1].name, "post");
        assert!(parsed.steps[1].tail.is_empty());
        assert!(!parsed.wildcard);

        let wild = parse("/:name/*").unwrap();
        assert_eq!(wild.head, "/");
        assert_eq!(wild.steps[0].tail, "/");
        assert!(wild.wildcard);
    }
}
