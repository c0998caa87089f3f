//! Java source generation for a grammar's AST hierarchy.

use crate::{
    grammar::{Grammar, Variant},
    util::separated,
};
use std::{borrow::Cow, fmt};

/// Extension of the generated source file.
pub const FILE_EXTENSION: &str = "java";

const DEFAULT_PACKAGE: &str = "lox";
const IMPORTS: &[&str] = &["java.util.List"];
const INDENT: &str = "    ";

/// Emits the base class, the visitor interface and one nested class per variant.
///
/// The output depends on nothing but the grammar and the package name.
#[derive(Debug)]
pub struct Codegen<'g> {
    grammar: &'g Grammar,
    package: Cow<'g, str>,
}

impl<'g> Codegen<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            package: Cow::Borrowed(DEFAULT_PACKAGE),
        }
    }

    /// Set the package declared at the top of the generated file.
    pub fn package(mut self, package: impl Into<Cow<'g, str>>) -> Self {
        self.package = package.into();
        self
    }

    /// `"<BaseName>.java"`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.grammar.base_name(), FILE_EXTENSION)
    }

    /// Return the generated source, one entry per line, without terminators.
    pub fn lines(&self) -> Vec<String> {
        let base_name = self.grammar.base_name();
        let mut w = LineWriter::default();

        w.line(0, format_args!("package {};", self.package));
        w.blank();
        for import in IMPORTS {
            w.line(0, format_args!("import {};", import));
        }
        w.blank();

        w.line(0, format_args!("abstract class {}", base_name));
        w.line(0, "{");
        self.visitor(&mut w);
        for variant in self.grammar.variants() {
            self.variant(&mut w, variant);
        }
        w.line(1, "abstract <R> R accept(Visitor<R> visitor);");
        w.line(0, "}");

        w.lines
    }

    fn visitor(&self, w: &mut LineWriter) {
        let param = self.grammar.base_name().to_lowercase();
        w.line(1, "interface Visitor<R>");
        w.line(1, "{");
        for variant in self.grammar.variants() {
            w.line(
                2,
                format_args!(
                    "R {}({} {});",
                    self.visit_method(variant),
                    variant.class_name(),
                    param
                ),
            );
        }
        w.line(1, "}");
    }

    fn variant(&self, w: &mut LineWriter, variant: &Variant) {
        let class_name = variant.class_name();
        let fields = variant.fields();

        w.line(
            1,
            format_args!(
                "static class {} extends {}",
                class_name,
                self.grammar.base_name()
            ),
        );
        w.line(1, "{");

        // constructor
        w.line(
            2,
            format_args!(
                "{}({})",
                class_name,
                separated(fields, ", ", |f, field| write!(f, "{}", field))
            ),
        );
        w.line(2, "{");
        for field in fields {
            w.line(3, format_args!("this.{0} = {0};", field.name()));
        }
        w.line(2, "}");
        w.blank();

        w.line(2, "@Override");
        w.line(2, "<R> R accept(Visitor<R> visitor)");
        w.line(2, "{");
        w.line(
            3,
            format_args!("return visitor.{}(this);", self.visit_method(variant)),
        );
        w.line(2, "}");
        w.blank();

        for field in fields {
            w.line(
                2,
                format_args!("final {} {};", field.type_name(), field.name()),
            );
        }
        w.line(1, "}");
        w.blank();
    }

    /// `visit<ClassName><BaseName>`
    fn visit_method(&self, variant: &Variant) -> String {
        format!("visit{}{}", variant.class_name(), self.grammar.base_name())
    }
}

/// Writes the generated file content, each line followed by `\n`.
impl fmt::Display for Codegen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct LineWriter {
    lines: Vec<String>,
}

impl LineWriter {
    fn line(&mut self, depth: usize, text: impl fmt::Display) {
        self.lines.push(format!("{}{}", INDENT.repeat(depth), text));
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary() -> Grammar {
        Grammar::from_lines("Expr", ["Binary : Expr left, Token operator, Expr right"]).unwrap()
    }

    #[test]
    fn single_variant() {
        let grammar = binary();
        let generated = Codegen::new(&grammar).to_string();
        assert_eq!(
            generated,
            "\
package lox;

import java.util.List;

abstract class Expr
{
    interface Visitor<R>
    {
        R visitBinaryExpr(Binary expr);
    }
    static class Binary extends Expr
    {
        Binary(Expr left, Token operator, Expr right)
        {
            this.left = left;
            this.operator = operator;
            this.right = right;
        }

        @Override
        <R> R accept(Visitor<R> visitor)
        {
            return visitor.visitBinaryExpr(this);
        }

        final Expr left;
        final Token operator;
        final Expr right;
    }

    abstract <R> R accept(Visitor<R> visitor);
}
"
        );
    }

    #[test]
    fn deterministic() {
        let grammar = crate::grammars::expr().unwrap();
        let first = Codegen::new(&grammar).to_string();
        let second = Codegen::new(&grammar).to_string();
        assert_eq!(first, second);
    }

    #[test]
    fn one_visit_method_per_variant() {
        let grammar = crate::grammars::expr().unwrap();
        let lines = Codegen::new(&grammar).lines();

        let decls: Vec<_> = lines
            .iter()
            .filter(|line| line.starts_with("        R visit"))
            .map(|line| line.trim())
            .collect();
        assert_eq!(
            decls,
            [
                "R visitBinaryExpr(Binary expr);",
                "R visitGroupingExpr(Grouping expr);",
                "R visitLiteralExpr(Literal expr);",
                "R visitUnaryExpr(Unary expr);",
            ]
        );

        let calls: Vec<_> = lines
            .iter()
            .filter_map(|line| line.trim().strip_prefix("return visitor."))
            .collect();
        assert_eq!(
            calls,
            [
                "visitBinaryExpr(this);",
                "visitGroupingExpr(this);",
                "visitLiteralExpr(this);",
                "visitUnaryExpr(this);",
            ]
        );
    }

    #[test]
    fn field_order_is_preserved() {
        let grammar = Grammar::from_lines("Stmt", ["Var : Token name, Expr initializer, int depth"])
            .unwrap();
        let lines = Codegen::new(&grammar).lines();

        assert!(lines.contains(&"        Var(Token name, Expr initializer, int depth)".to_owned()));

        let assigns: Vec<_> = lines
            .iter()
            .filter(|line| line.trim_start().starts_with("this."))
            .map(|line| line.trim())
            .collect();
        assert_eq!(
            assigns,
            [
                "this.name = name;",
                "this.initializer = initializer;",
                "this.depth = depth;",
            ]
        );

        let decls: Vec<_> = lines
            .iter()
            .filter(|line| line.trim_start().starts_with("final "))
            .map(|line| line.trim())
            .collect();
        assert_eq!(
            decls,
            [
                "final Token name;",
                "final Expr initializer;",
                "final int depth;",
            ]
        );
    }

    #[test]
    fn visitor_param_is_lowercased_base_name() {
        let grammar = Grammar::from_lines("Stmt", ["Print : Expr expression"]).unwrap();
        let lines = Codegen::new(&grammar).lines();
        assert!(lines.contains(&"        R visitPrintStmt(Print stmt);".to_owned()));
        assert!(lines.contains(&"abstract class Stmt".to_owned()));
        assert!(lines.contains(&"    static class Print extends Stmt".to_owned()));
    }

    #[test]
    fn custom_package() {
        let grammar = binary();
        let codegen = Codegen::new(&grammar).package("com.craftinginterpreters.lox");
        assert_eq!(
            codegen.lines()[0],
            "package com.craftinginterpreters.lox;"
        );
    }

    #[test]
    fn zero_field_variant_still_emits() {
        let grammar = Grammar::from_lines("Expr", ["Nil :"]).unwrap();
        let lines = Codegen::new(&grammar).lines();
        let start = lines
            .iter()
            .position(|line| line == "    static class Nil extends Expr")
            .unwrap();
        assert_eq!(
            &lines[start..start + 12],
            [
                "    static class Nil extends Expr",
                "    {",
                "        Nil()",
                "        {",
                "        }",
                "",
                "        @Override",
                "        <R> R accept(Visitor<R> visitor)",
                "        {",
                "            return visitor.visitNilExpr(this);",
                "        }",
                "",
            ]
        );
        assert_eq!(lines[start + 12], "    }");
    }

    #[test]
    fn file_name() {
        let grammar = binary();
        assert_eq!(Codegen::new(&grammar).file_name(), "Expr.java");
    }
}
