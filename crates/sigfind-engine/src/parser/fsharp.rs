//! Primary-dialect query parser.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! query     := name ':' sig | '(||)' ':' ap | '(|_|)' ':' ap
//!            | '{' syntaxes '}' ':' arrow | name | arrow
//! arrow     := tuple ('->' tuple)*
//! tuple     := app ('*' app)*
//! app       := atom path*                    -- postfix: 'a list, int option
//! atom      := '?'tag? | var | '^'var | 'struct' '(' tuple ')'
//!            | '(' arrow ')' | path ('<' arrow (',' arrow)* '>')?
//! ```

use sigfind_model::{
    ActivePatternKind, ActivePatternQuery, ActivePatternSignature, ComputationExpressionQuery,
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
        Some("(||)") => QueryMethod::ByActivePattern(parse_active_pattern(
            ActivePatternKind::ActivePattern,
            tail,
        )?),
        Some("(|_|)") => QueryMethod::ByActivePattern(parse_active_pattern(
            ActivePatternKind::PartialActivePattern,
            tail,
        )?),
        Some(head) if head.starts_with('{') => {
            QueryMethod::ByComputationExpression(parse_computation_expression(head, tail)?)
        }
        Some(head) => {
            let items = parse_name_pattern(head, 0)?;
            QueryMethod::ByName(items, parse_signature_query(tail)?)
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

fn parse_signature_query(text: &str) -> Result<SignatureQuery, SearchError> {
    if text == "_" {
        Ok(SignatureQuery::Wildcard)
    } else {
        Ok(SignatureQuery::Signature(parse_signature(text)?))
    }
}

pub(crate) fn parse_signature(text: &str) -> Result<LowType, SearchError> {
    let mut parser = SignatureParser::new(tokenize(text)?);
    let result = parse_arrow(&mut parser)?;
    if !parser.at_end() {
        return Err(parser.error("trailing input after signature"));
    }
    Ok(result)
}

fn parse_active_pattern(
    kind: ActivePatternKind,
    text: &str,
) -> Result<ActivePatternQuery, SearchError> {
    let mut parser = SignatureParser::new(tokenize(text)?);
    let signature = if parser.eat(&Token::Ellipsis) {
        parser.expect(Token::Arrow)?;
        let rest = parse_arrow(&mut parser)?;
        match rest {
            LowType::Arrow(elements) if elements.len() == 2 => {
                let mut elements = elements;
                let result = elements.pop().expect("arrow arity");
                let input = elements.pop().expect("arrow arity");
                ActivePatternSignature::AnyParameter { input, result }
            }
            _ => {
                return Err(parser.error("`... ->` must be followed by exactly `input -> result`"));
            }
        }
    } else {
        ActivePatternSignature::Specified(parse_arrow(&mut parser)?)
    };
    if !parser.at_end() {
        return Err(parser.error("trailing input after active pattern"));
    }
    Ok(ActivePatternQuery { kind, signature })
}

fn parse_computation_expression(
    head: &str,
    tail: &str,
) -> Result<ComputationExpressionQuery, SearchError> {
    let inner = head
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| SearchError::syntax(0, "unclosed computation-expression braces"))?;
    let syntaxes: Vec<String> = inner
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    Ok(ComputationExpressionQuery {
        syntaxes,
        type_: parse_signature(tail)?,
    })
}

fn partial_identity(path: &[String], generic_parameter_count: usize) -> LowType {
    LowType::Identity(Identity::Partial(PartialIdentity {
        name: path.iter().rev().map(|s| DisplayNameItem::symbol(s.clone())).collect(),
        generic_parameter_count,
    }))
}

fn parse_arrow(parser: &mut SignatureParser) -> Result<LowType, SearchError> {
    let mut elements = vec![parse_tuple(parser)?];
    while parser.eat(&Token::Arrow) {
        elements.push(parse_tuple(parser)?);
    }
    Ok(if elements.len() == 1 {
        elements.pop().expect("nonempty")
    } else {
        LowType::Arrow(elements)
    })
}

fn parse_tuple(parser: &mut SignatureParser) -> Result<LowType, SearchError> {
    let mut elements = vec![parse_app(parser)?];
    while parser.eat(&Token::Star) {
        elements.push(parse_app(parser)?);
    }
    Ok(if elements.len() == 1 {
        elements.pop().expect("nonempty")
    } else {
        LowType::Tuple {
            elements,
            is_struct: false,
        }
    })
}

/// An atom followed by any number of postfix constructors.
fn parse_app(parser: &mut SignatureParser) -> Result<LowType, SearchError> {
    let mut t = parse_atom(parser)?;
    while matches!(parser.peek(), Some(Token::Ident(_))) {
        let path = parser.parse_path()?;
        t = LowType::Generic(Box::new(partial_identity(&path, 1)), vec![t]);
    }
    Ok(t)
}

fn parse_atom(parser: &mut SignatureParser) -> Result<LowType, SearchError> {
    match parser.next() {
        Some(Token::Question(tag)) => Ok(LowType::Wildcard(tag)),
        Some(Token::Variable(name)) => Ok(LowType::Variable(
            VariableSource::Query,
            TypeVariable::new(name),
        )),
        Some(Token::StaticVariable(name)) => Ok(LowType::Variable(
            VariableSource::Query,
            TypeVariable::compile_time(name),
        )),
        Some(Token::Struct) => {
            parser.expect(Token::LParen)?;
            let tuple = parse_tuple(parser)?;
            parser.expect(Token::RParen)?;
            match tuple {
                LowType::Tuple { elements, .. } => Ok(LowType::Tuple {
                    elements,
                    is_struct: true,
                }),
                _ => Err(parser.error("`struct` requires a tuple")),
            }
        }
        Some(Token::LParen) => {
            let inner = parse_arrow(parser)?;
            parser.expect(Token::RParen)?;
            Ok(inner)
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
            } else {
                Ok(partial_identity(&path, 0))
            }
        }
        _ => Err(parser.error("expected a type")),
    }
}
