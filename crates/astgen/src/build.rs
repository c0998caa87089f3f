//! Running the whole pipeline over a set of grammars.

use crate::{
    codegen::Codegen,
    grammar::{Grammar, GrammarDefError},
    grammars::GrammarSource,
    output::{Output, OutputError},
};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("invalid grammar `{base_name}'")]
    Grammar {
        base_name: String,
        #[source]
        source: GrammarDefError,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Generate one source file per grammar into `out_dir`.
///
/// Every grammar is parsed before the first file is written, so a malformed
/// definition leaves the output directory untouched.
pub fn generate(
    out_dir: impl Into<PathBuf>,
    package: &str,
    sources: &[GrammarSource<'_>],
) -> Result<Vec<PathBuf>, BuildError> {
    let grammars = sources
        .iter()
        .map(|source| {
            source.parse().map_err(|err| BuildError::Grammar {
                base_name: source.base_name.to_owned(),
                source: err,
            })
        })
        .collect::<Result<Vec<Grammar>, _>>()?;

    let output = Output::new(out_dir);
    let mut written = vec![];
    for grammar in &grammars {
        let codegen = Codegen::new(grammar).package(package);
        written.push(output.write(&codegen)?);
    }
    Ok(written)
}
