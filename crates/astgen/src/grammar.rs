//! Grammar types.

use crate::{syntax, util::separated};
use indexmap::IndexMap;
use std::{fmt, marker::PhantomData};

/// A typed field of a variant, e.g. `Expr left`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    type_name: String,
    name: String,
}
impl Field {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.name)
    }
}

/// A concrete node kind under the base type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    class_name: String,
    fields: Vec<Field>,
}
impl Variant {
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Return the fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields[..]
    }
}

// `"Class : Type1 name1, Type2 name2"`
impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :", self.class_name)?;
        if !self.fields.is_empty() {
            write!(f, " {}", separated(&self.fields, ", ", |f, field| write!(f, "{}", field)))?;
        }
        Ok(())
    }
}

/// The grammar definition used to generate the AST source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    base_name: String,
    variants: IndexMap<String, Variant>,
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.base_name)?;
        for variant in self.variants.values() {
            writeln!(f, "{}", variant)?;
        }
        Ok(())
    }
}

impl Grammar {
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Return the variants in definition order.
    pub fn variants(&self) -> impl ExactSizeIterator<Item = &Variant> + '_ {
        self.variants.values()
    }

    pub fn variant(&self, class_name: &str) -> Option<&Variant> {
        self.variants.get(class_name)
    }

    /// Build a grammar from lines of the form `Class : Type name, Type name`.
    ///
    /// All lines are parsed before the grammar is returned, so a malformed
    /// line anywhere in the input fails the whole definition.
    pub fn from_lines<I, S>(base_name: &str, lines: I) -> Result<Self, GrammarDefError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Grammar::define(base_name, |g| {
            for (index, line) in lines.into_iter().enumerate() {
                let line = line.as_ref();
                let decl = syntax::parse_line(line).map_err(|reason| {
                    GrammarDefError::MalformedLine {
                        index,
                        line: line.to_owned(),
                        reason,
                    }
                })?;
                g.variant(
                    decl.class_name,
                    decl.fields.iter().map(|field| (field.type_name, field.name)),
                )?;
            }
            Ok(())
        })
    }

    /// Define a grammar using the specified function.
    pub fn define<F>(base_name: &str, f: F) -> Result<Self, GrammarDefError>
    where
        F: FnOnce(&mut GrammarDef) -> Result<(), GrammarDefError>,
    {
        if !verify_ident(base_name) {
            return Err(GrammarDefError::InvalidIdent {
                name: base_name.to_owned(),
            });
        }
        if base_name == VISITOR {
            return Err(GrammarDefError::NameClash {
                name: base_name.to_owned(),
                with: "the visitor interface",
            });
        }
        // used as the parameter name of the visit methods.
        let param = base_name.to_lowercase();
        if !verify_ident(&param) {
            return Err(GrammarDefError::InvalidIdent { name: param });
        }

        let mut def = GrammarDef {
            base_name: base_name.to_owned(),
            variants: IndexMap::new(),
            _marker: PhantomData,
        };

        f(&mut def)?;

        Ok(def.end())
    }
}

/// The contextural values for building a `Grammar`.
#[derive(Debug)]
pub struct GrammarDef<'def> {
    base_name: String,
    variants: IndexMap<String, Variant>,
    _marker: PhantomData<&'def mut ()>,
}

impl<'def> GrammarDef<'def> {
    /// Declare a variant of the base type with its fields in order.
    pub fn variant<'a, I>(&mut self, class_name: &str, fields: I) -> Result<(), GrammarDefError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        if !verify_ident(class_name) {
            return Err(GrammarDefError::InvalidIdent {
                name: class_name.to_owned(),
            });
        }
        if class_name == self.base_name {
            return Err(GrammarDefError::NameClash {
                name: class_name.to_owned(),
                with: "the base class",
            });
        }
        if class_name == VISITOR {
            return Err(GrammarDefError::NameClash {
                name: class_name.to_owned(),
                with: "the visitor interface",
            });
        }
        if self.variants.contains_key(class_name) {
            return Err(GrammarDefError::DuplicateVariant {
                class_name: class_name.to_owned(),
            });
        }

        let mut fields_ = Vec::<Field>::new();
        for (type_name, name) in fields {
            if !verify_ident(name) {
                return Err(GrammarDefError::InvalidIdent {
                    name: name.to_owned(),
                });
            }
            if type_name.is_empty() || type_name.chars().any(char::is_whitespace) {
                return Err(GrammarDefError::InvalidType {
                    type_name: type_name.to_owned(),
                });
            }
            if fields_.iter().any(|field| field.name == name) {
                return Err(GrammarDefError::DuplicateField {
                    class_name: class_name.to_owned(),
                    name: name.to_owned(),
                });
            }
            fields_.push(Field {
                type_name: type_name.to_owned(),
                name: name.to_owned(),
            });
        }

        if fields_.is_empty() {
            tracing::warn!("variant `{}' has no fields", class_name);
        }

        self.variants.insert(
            class_name.to_owned(),
            Variant {
                class_name: class_name.to_owned(),
                fields: fields_,
            },
        );

        Ok(())
    }

    fn end(self) -> Grammar {
        let grammar = Grammar {
            base_name: self.base_name,
            variants: self.variants,
        };
        tracing::debug!("defined grammar:\n{}", grammar);
        grammar
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarDefError {
    #[error("malformed grammar line at index {index} (`{line}'): {reason}")]
    MalformedLine {
        index: usize,
        line: String,
        reason: syntax::SyntaxError,
    },

    #[error("`{name}' is not a valid identifier")]
    InvalidIdent { name: String },

    #[error("`{type_name}' is not a valid type name")]
    InvalidType { type_name: String },

    #[error("`{name}' clashes with {with}")]
    NameClash { name: String, with: &'static str },

    #[error("The variant `{class_name}' has already been defined")]
    DuplicateVariant { class_name: String },

    #[error("The field `{name}' is declared twice in variant `{class_name}'")]
    DuplicateField { class_name: String, name: String },
}

/// Name of the interface nested in the base class.
pub(crate) const VISITOR: &str = "Visitor";

/// Check that `s` can be used as a class or field name in the generated Java source.
pub(crate) fn verify_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let first = match chars.next() {
        Some(ch) => ch,
        // The identifier must not be empty.
        None => return false,
    };

    if is_keyword(s) || is_literal(s) {
        return false;
    }

    if !is_ident_start(first) {
        // The identifier must be started with XID-Start.
        return false;
    }
    if chars.any(|ch| !is_ident_continue(ch)) {
        // The idenfier must be continued with XID-Continue.
        return false;
    }

    true
}

fn is_ident_start(ch: char) -> bool {
    matches!(ch, '_' | '$') || unicode_ident::is_xid_start(ch)
}

fn is_ident_continue(ch: char) -> bool {
    ch == '$' || unicode_ident::is_xid_continue(ch)
}

fn is_keyword(s: &str) -> bool {
    matches!(
        s,
        "abstract" | "assert" | "boolean" | "break" | "byte" | "case" | "catch" | "char"
        | "class" | "const" | "continue" | "default" | "do" | "double" | "else" | "enum"
        | "extends" | "final" | "finally" | "float" | "for" | "goto" | "if" | "implements"
        | "import" | "instanceof" | "int" | "interface" | "long" | "native" | "new"
        | "package" | "private" | "protected" | "public" | "return" | "short" | "static"
        | "strictfp" | "super" | "switch" | "synchronized" | "this" | "throw" | "throws"
        | "transient" | "try" | "void" | "volatile" | "while"
        // since Java 9
        | "_"
    )
}

fn is_literal(s: &str) -> bool {
    matches!(s, "true" | "false" | "null")
}
