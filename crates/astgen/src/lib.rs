//! Generator of AST class hierarchies with visitor dispatch.
//!
//! The pipeline is: grammar lines → [`grammar::Grammar`] (via [`syntax`]) →
//! [`codegen::Codegen`] → [`output::Output`].

pub mod build;
pub mod codegen;
pub mod grammar;
pub mod grammars;
pub mod output;
pub mod syntax;
pub mod util;
