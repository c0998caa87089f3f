//! Built-in grammar definitions handed to the generator.

use crate::grammar::{Grammar, GrammarDefError};

/// The unparsed definition of one grammar: its base name and variant lines.
#[derive(Debug, Copy, Clone)]
pub struct GrammarSource<'a> {
    pub base_name: &'a str,
    pub lines: &'a [&'a str],
}

impl GrammarSource<'_> {
    pub fn parse(&self) -> Result<Grammar, GrammarDefError> {
        Grammar::from_lines(self.base_name, self.lines)
    }
}

/// Variants of the `Expr` hierarchy.
pub const EXPR_LINES: &[&str] = &[
    "Binary   : Expr left, Token operator, Expr right",
    "Grouping : Expr expression",
    "Literal  : Object value",
    "Unary    : Token operator, Expr right",
];

/// Every grammar the generator emits by default, in output order.
pub const BUILTIN: &[GrammarSource<'static>] = &[GrammarSource {
    base_name: "Expr",
    lines: EXPR_LINES,
}];

pub fn expr() -> Result<Grammar, GrammarDefError> {
    Grammar::from_lines("Expr", EXPR_LINES)
}

pub fn builtin() -> Result<Vec<Grammar>, GrammarDefError> {
    BUILTIN.iter().map(GrammarSource::parse).collect()
}
