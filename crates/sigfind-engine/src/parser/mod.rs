//! Query parsing.
//!
//! A query is split once at its first top-level `:` into a head (name
//! pattern, active-pattern marker, or computation-expression braces) and a
//! signature. Signatures are lexed into tokens and parsed by recursive
//! descent; the two dialect front ends share the token stream and differ in
//! atom handling.

use regex::Regex;
use sigfind_model::{ByNameItem, LowType, NameMatchMethod, SearchError};

pub mod csharp;
pub mod fsharp;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token {
    Ident(String),
    /// `'a`
    Variable(String),
    /// `^a`
    StaticVariable(String),
    /// `?` or `?tag`
    Question(Option<String>),
    Arrow,
    Star,
    Lt,
    Gt,
    Comma,
    Dot,
    LParen,
    RParen,
    /// `...`
    Ellipsis,
    Struct,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize one signature. Identifiers may carry a trailing `!` so that
/// computation-expression syntax words lex as single tokens.
pub(crate) fn tokenize(text: &str) -> Result<Vec<(Token, usize)>, SearchError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let position = i;
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '-' if chars.get(i + 1) == Some(&'>') => {
                tokens.push((Token::Arrow, position));
                i += 2;
            }
            '.' if chars.get(i + 1) == Some(&'.') && chars.get(i + 2) == Some(&'.') => {
                tokens.push((Token::Ellipsis, position));
                i += 3;
            }
            '.' => {
                tokens.push((Token::Dot, position));
                i += 1;
            }
            '*' => {
                tokens.push((Token::Star, position));
                i += 1;
            }
            '<' => {
                tokens.push((Token::Lt, position));
                i += 1;
            }
            '>' => {
                tokens.push((Token::Gt, position));
                i += 1;
            }
            ',' => {
                tokens.push((Token::Comma, position));
                i += 1;
            }
            '(' => {
                tokens.push((Token::LParen, position));
                i += 1;
            }
            ')' => {
                tokens.push((Token::RParen, position));
                i += 1;
            }
            '\'' | '^' => {
                i += 1;
                let start = i;
                while i < chars.len() && is_ident_continue(chars[i]) {
                    i += 1;
                }
                if start == i {
                    return Err(SearchError::syntax(position, "expected a variable name"));
                }
                let name: String = chars[start..i].iter().collect();
                if c == '\'' {
                    tokens.push((Token::Variable(name), position));
                } else {
                    tokens.push((Token::StaticVariable(name), position));
                }
            }
            '?' => {
                i += 1;
                let start = i;
                while i < chars.len() && is_ident_continue(chars[i]) {
                    i += 1;
                }
                let tag = if start == i {
                    None
                } else {
                    Some(chars[start..i].iter().collect())
                };
                tokens.push((Token::Question(tag), position));
            }
            c if is_ident_start(c) => {
                let start = i;
                while i < chars.len() && is_ident_continue(chars[i]) {
                    i += 1;
                }
                if i < chars.len() && chars[i] == '!' {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if word == "struct" {
                    tokens.push((Token::Struct, position));
                } else {
                    tokens.push((Token::Ident(word), position));
                }
            }
            other => {
                return Err(SearchError::syntax(position, format!("unexpected character `{other}`")));
            }
        }
    }
    Ok(tokens)
}

/// Split a query once at its first `:` outside parentheses, angle brackets,
/// and braces.
pub(crate) fn split_head(text: &str) -> (Option<&str>, &str) {
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '<' | '{' => depth += 1,
            ')' | '>' | '}' => depth -= 1,
            ':' if depth == 0 => {
                return (Some(text[..i].trim()), text[i + 1..].trim());
            }
            _ => {}
        }
    }
    (None, text.trim())
}

/// Does a colon-free query read as a name pattern rather than a signature?
pub(crate) fn looks_like_name(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| is_ident_continue(c) || c == '.' || c == '*')
}

/// Parse one name pattern (`List.map`, `*map*`, `tryPick<'a>`) into
/// innermost-first items.
pub(crate) fn parse_name_pattern(text: &str, offset: usize) -> Result<Vec<ByNameItem>, SearchError> {
    let mut items = Vec::new();
    for segment in text.split('.') {
        let segment = segment.trim();
        if segment.is_empty() {
            return Err(SearchError::syntax(offset, "empty name segment"));
        }
        let (base, generics) = match segment.find('<') {
            Some(open) => {
                let inner = segment[open..]
                    .strip_prefix('<')
                    .and_then(|s| s.strip_suffix('>'))
                    .ok_or_else(|| SearchError::syntax(offset, "unclosed generic parameter list"))?;
                let names: Vec<String> = inner
                    .split(',')
                    .map(|p| p.trim().trim_start_matches('\'').to_string())
                    .filter(|p| !p.is_empty())
                    .collect();
                (&segment[..open], names)
            }
            None => (segment, Vec::new()),
        };
        let method = if base == "*" {
            NameMatchMethod::Any
        } else if base.contains('*') {
            let mut pattern = String::from("^");
            for c in base.chars() {
                match c {
                    '*' => pattern.push_str(".*"),
                    c => pattern.push_str(&regex::escape(&c.to_string())),
                }
            }
            pattern.push('$');
            let compiled = Regex::new(&pattern)
                .map_err(|e| SearchError::syntax(offset, format!("bad name pattern: {e}")))?;
            NameMatchMethod::Regex(compiled)
        } else {
            NameMatchMethod::StringCompare
        };
        items.push(ByNameItem {
            expected: base.to_string(),
            generic_parameters: generics,
            method,
        });
    }
    // The user writes outermost-first; the matcher zips innermost-first.
    items.reverse();
    Ok(items)
}

/// Shared recursive-descent state over the token stream.
pub(crate) struct SignatureParser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl SignatureParser {
    pub(crate) fn new(tokens: Vec<(Token, usize)>) -> Self {
        SignatureParser { tokens, pos: 0 }
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    pub(crate) fn position(&self) -> usize {
        self.tokens.get(self.pos).map_or(usize::MAX, |(_, p)| *p)
    }

    pub(crate) fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, expected: Token) -> Result<(), SearchError> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(SearchError::syntax(
                self.position(),
                format!("expected {expected:?}"),
            ))
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> SearchError {
        SearchError::syntax(self.position(), message.into())
    }

    /// A dotted identifier path, returned outermost-first as written.
    pub(crate) fn parse_path(&mut self) -> Result<Vec<String>, SearchError> {
        let mut path = Vec::new();
        loop {
            match self.next() {
                Some(Token::Ident(name)) => path.push(name),
                _ => return Err(SearchError::syntax(self.position(), "expected an identifier")),
            }
            if !self.eat(&Token::Dot) {
                break;
            }
        }
        Ok(path)
    }

    /// `< arg, arg, ... >`
    pub(crate) fn parse_generic_arguments(
        &mut self,
        parse_argument: &mut impl FnMut(&mut Self) -> Result<LowType, SearchError>,
    ) -> Result<Vec<LowType>, SearchError> {
        self.expect(Token::Lt)?;
        let mut arguments = vec![parse_argument(self)?];
        while self.eat(&Token::Comma) {
            arguments.push(parse_argument(self)?);
        }
        self.expect(Token::Gt)?;
        Ok(arguments)
    }
}
