//! Parser for grammar lines of the form `Class : Type name, Type name`.

pub mod ast;
pub mod lexer;

use self::lexer::{Lexer, Spanned, Token};
use std::fmt;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} (column {column})")]
pub struct SyntaxError {
    /// 1-based column where the problem was detected.
    pub column: usize,
    pub kind: SyntaxErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    UnexpectedChar,
    MissingClassName,
    MissingSeparator,
    UnexpectedToken(String),
    EmptyField,
    MissingFieldName(String),
    ExtraFieldWords(String),
    InvalidIdent(String),
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar => f.write_str("unexpected character"),
            Self::MissingClassName => f.write_str("missing class name"),
            Self::MissingSeparator => f.write_str("missing `:' between class name and fields"),
            Self::UnexpectedToken(tok) => write!(f, "unexpected `{}'", tok),
            Self::EmptyField => f.write_str("empty field declaration"),
            Self::MissingFieldName(ty) => write!(f, "field of type `{}' has no name", ty),
            Self::ExtraFieldWords(word) => {
                write!(f, "field declaration has trailing word `{}'", word)
            }
            Self::InvalidIdent(name) => write!(f, "`{}' is not a valid identifier", name),
        }
    }
}

/// Parse one grammar line into its class name and ordered field list.
///
/// An empty field list (`"Empty :"`) is accepted and yields no fields.
pub fn parse_line(source: &str) -> Result<ast::VariantDecl<'_>, SyntaxError> {
    let span = tracing::trace_span!("parse_line");
    let _entered = span.enter();

    let tokens = tokenize(source)?;
    let end = source.chars().count() + 1;
    let mut tokens = tokens.into_iter().peekable();

    let class_name = match tokens.next() {
        Some((loc, Token::Word(name), _)) => {
            verify(name, column(&loc))?;
            name
        }
        Some((loc, Token::Colon, _)) => {
            return Err(error(column(&loc), SyntaxErrorKind::MissingClassName))
        }
        Some((loc, Token::Comma, _)) => {
            return Err(error(
                column(&loc),
                SyntaxErrorKind::UnexpectedToken(",".into()),
            ))
        }
        None => return Err(error(end, SyntaxErrorKind::MissingClassName)),
    };

    match tokens.next() {
        Some((_, Token::Colon, _)) => (),
        Some((loc, _, _)) => return Err(error(column(&loc), SyntaxErrorKind::MissingSeparator)),
        None => return Err(error(end, SyntaxErrorKind::MissingSeparator)),
    }

    let mut fields = vec![];
    if tokens.peek().is_none() {
        tracing::trace!("{} has no fields", class_name);
        return Ok(ast::VariantDecl { class_name, fields });
    }

    loop {
        // A field runs up to the next comma or the end of line.
        let mut words = vec![];
        let mut stop = end;
        let mut saw_comma = false;
        for (loc, tok, _) in tokens.by_ref() {
            match tok {
                Token::Word(word) => words.push((column(&loc), word)),
                Token::Comma => {
                    stop = column(&loc);
                    saw_comma = true;
                    break;
                }
                Token::Colon => {
                    return Err(error(
                        column(&loc),
                        SyntaxErrorKind::UnexpectedToken(":".into()),
                    ))
                }
            }
        }

        match words[..] {
            [] => return Err(error(stop, SyntaxErrorKind::EmptyField)),
            [(_, type_name)] => {
                return Err(error(
                    stop,
                    SyntaxErrorKind::MissingFieldName(type_name.to_owned()),
                ))
            }
            [(_, type_name), (name_col, name)] => {
                verify(name, name_col)?;
                tracing::trace!("field: {} {}", type_name, name);
                fields.push(ast::FieldDecl { type_name, name });
            }
            [_, _, (col, extra), ..] => {
                return Err(error(
                    col,
                    SyntaxErrorKind::ExtraFieldWords(extra.to_owned()),
                ))
            }
        }

        if !saw_comma {
            break;
        }
    }

    Ok(ast::VariantDecl { class_name, fields })
}

fn tokenize(source: &str) -> Result<Vec<Spanned<'_>>, SyntaxError> {
    let mut tokens = vec![];
    for item in Lexer::new(source) {
        match item {
            Ok(spanned) => {
                tracing::trace!("token {:?}", spanned.1);
                tokens.push(spanned);
            }
            Err(err) => {
                return Err(error(
                    column(&err.location),
                    SyntaxErrorKind::UnexpectedChar,
                ))
            }
        }
    }
    Ok(tokens)
}

fn column(loc: &lexgen_util::Loc) -> usize {
    loc.col as usize + 1
}

fn error(column: usize, kind: SyntaxErrorKind) -> SyntaxError {
    SyntaxError { column, kind }
}

fn verify(name: &str, column: usize) -> Result<(), SyntaxError> {
    if crate::grammar::verify_ident(name) {
        Ok(())
    } else {
        Err(error(column, SyntaxErrorKind::InvalidIdent(name.to_owned())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{FieldDecl, VariantDecl};

    fn kind(source: &str) -> SyntaxErrorKind {
        parse_line(source).unwrap_err().kind
    }

    #[test]
    fn smoketest() {
        let parsed = parse_line("Binary     : Expr left, Token operator, Expr right").unwrap();
        assert_eq!(
            parsed,
            VariantDecl {
                class_name: "Binary",
                fields: vec![
                    FieldDecl {
                        type_name: "Expr",
                        name: "left",
                    },
                    FieldDecl {
                        type_name: "Token",
                        name: "operator",
                    },
                    FieldDecl {
                        type_name: "Expr",
                        name: "right",
                    },
                ],
            }
        );
    }

    #[test]
    fn irregular_whitespace() {
        let parsed = parse_line("  Unary:Token   operator ,Expr right  ").unwrap();
        assert_eq!(parsed.class_name, "Unary");
        let names: Vec<_> = parsed.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["operator", "right"]);
    }

    #[test]
    fn generic_types() {
        let parsed = parse_line("Call : Expr callee, Token paren, List<Expr> arguments").unwrap();
        assert_eq!(parsed.fields[2].type_name, "List<Expr>");
        assert_eq!(parsed.fields[2].name, "arguments");
    }

    #[test]
    fn empty_field_list() {
        let parsed = parse_line("Nil :").unwrap();
        assert_eq!(parsed.class_name, "Nil");
        assert!(parsed.fields.is_empty());
    }

    #[test]
    fn missing_separator() {
        let err = parse_line("Binary Expr left").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::MissingSeparator);
        assert_eq!(err.column, 8);
    }

    #[test]
    fn missing_separator_at_end() {
        assert_eq!(kind("Binary"), SyntaxErrorKind::MissingSeparator);
    }

    #[test]
    fn missing_class_name() {
        assert_eq!(kind(""), SyntaxErrorKind::MissingClassName);
        assert_eq!(kind(": Expr left"), SyntaxErrorKind::MissingClassName);
    }

    #[test]
    fn field_without_name() {
        assert_eq!(
            kind("Grouping : Exprexpression"),
            SyntaxErrorKind::MissingFieldName("Exprexpression".into())
        );
    }

    #[test]
    fn field_with_extra_words() {
        assert_eq!(
            kind("Literal : final Object value"),
            SyntaxErrorKind::ExtraFieldWords("value".into())
        );
    }

    #[test]
    fn trailing_comma() {
        let err = parse_line("Unary : Token operator,").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::EmptyField);
        assert_eq!(err.column, 24);
    }

    #[test]
    fn stray_colon() {
        assert_eq!(
            kind("Unary : Token operator : Expr right"),
            SyntaxErrorKind::UnexpectedToken(":".into())
        );
    }

    #[test]
    fn unexpected_character() {
        let err = parse_line("Unary : Token operator; Expr right").unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnexpectedChar);
        assert_eq!(err.column, 23);
    }

    #[test]
    fn invalid_identifiers() {
        assert_eq!(
            kind("List<Expr> : Expr left"),
            SyntaxErrorKind::InvalidIdent("List<Expr>".into())
        );
        assert_eq!(
            kind("Binary : Expr class"),
            SyntaxErrorKind::InvalidIdent("class".into())
        );
    }

    #[test]
    fn error_message() {
        let err = parse_line("Binary Expr left").unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing `:' between class name and fields (column 8)"
        );
    }
}
