//! Secondary-dialect query parser.
//!
//! C#-flavored surface: `(int, string) -> bool`, `Func<int, string>`,
//! single-uppercase identifiers as type parameters. Lowercase builtin
//! aliases are kept as written here and normalized during query
//! initialization. Active-pattern and computation-expression forms do not
//! exist in this dialect.

use sigfind_model::{
    DisplayNameItem, Identity, LowType, PartialIdentity, Query, QueryMethod, SearchError,
    SignatureQuery, TypeVariable, VariableSource,
};

use super::{SignatureParser, Token, looks_like_name, parse_name_pattern, split_head, tokenize};

pub fn parse(text: &str) -> Result<Query, SearchError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SearchError::syntax(0, "empty query"));
    }
    let (head, tail) = split_head(trimmed);
    let method = match head {
        Some(head) if head.starts_with('(') || head.starts_with('{') => {
            return Err(SearchError::syntax(
                0,
                "active patterns and computation expressions are not part of this dialect",
            ));
        }
        Some(head) => {
            let items = parse_name_pattern(head, 0)?;
            let signature = if tail == "_" {
                SignatureQuery::Wildcard
            } else {
                SignatureQuery::Signature(parse_signature(tail)?)
            };
            QueryMethod::ByName(items, signature)
        }
        None if looks_like_name(trimmed) => {
            QueryMethod::ByName(parse_name_pattern(trimmed, 0)?, SignatureQuery::Wildcard)
        }
        None => QueryMethod::BySignature(SignatureQuery::Signature(parse_signature(trimmed)?)),
    };
    Ok(Query {
        original_string: text.to_string(),
        method,
    })
}

pub(crate) fn parse_signature(text: &str) -> Result<LowType, SearchError> {
    let mut parser = SignatureParser::new(tokenize(text)?);
    let result = parse_arrow(&mut parser)?;
    if !parser.at_end() {
        return Err(parser.error("trailing input after signature"));
    }
    Ok(result)
}

fn partial_identity(path: &[String], generic_parameter_count: usize) -> LowType {
    LowType::Identity(Identity::Partial(PartialIdentity {
        name: path.iter().rev().map(|s| DisplayNameItem::symbol(s.clone())).collect(),
        generic_parameter_count,
    }))
}

/// A single uppercase letter reads as a type parameter, following the
/// dialect's `<T>` convention.
fn is_type_parameter(path: &[String]) -> bool {
    matches!(path, [only] if only.len() == 1 && only.chars().all(|c| c.is_ascii_uppercase()))
}

fn parse_arrow(parser: &mut SignatureParser) -> Result<LowType, SearchError> {
    let mut elements = vec![parse_atom(parser)?];
    while parser.eat(&Token::Arrow) {
        elements.push(parse_atom(parser)?);
    }
    Ok(if elements.len() == 1 {
        elements.pop().expect("nonempty")
    } else {
        LowType::Arrow(elements)
    })
}

fn parse_atom(parser: &mut SignatureParser) -> Result<LowType, SearchError> {
    match parser.next() {
        Some(Token::Question(tag)) => Ok(LowType::Wildcard(tag)),
        Some(Token::LParen) => {
            let mut elements = vec![parse_arrow(parser)?];
            while parser.eat(&Token::Comma) {
                elements.push(parse_arrow(parser)?);
            }
            parser.expect(Token::RParen)?;
            Ok(if elements.len() == 1 {
                elements.pop().expect("nonempty")
            } else {
                // An argument block `(a, b)` is a positional parameter list,
                // which the model carries as a tuple segment.
                LowType::Tuple {
                    elements,
                    is_struct: false,
                }
            })
        }
        Some(Token::Ident(first)) => {
            let mut path = vec![first];
            while parser.eat(&Token::Dot) {
                match parser.next() {
                    Some(Token::Ident(name)) => path.push(name),
                    _ => return Err(parser.error("expected an identifier after `.`")),
                }
            }
            if matches!(parser.peek(), Some(Token::Lt)) {
                let arguments = parser.parse_generic_arguments(&mut parse_arrow)?;
                let count = arguments.len();
                Ok(LowType::Generic(
                    Box::new(partial_identity(&path, count)),
                    arguments,
                ))
            } else if is_type_parameter(&path) {
                Ok(LowType::Variable(
                    VariableSource::Query,
                    TypeVariable::new(path.pop().expect("nonempty path")),
                ))
            } else {
                Ok(partial_identity(&path, 0))
            }
        }
        Some(Token::Variable(_)) | Some(Token::StaticVariable(_)) => {
            Err(parser.error("quoted type variables are not part of this dialect"))
        }
        _ => Err(parser.error("expected a type")),
    }
}
