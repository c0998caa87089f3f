//! Writing generated sources into the output directory.

use crate::codegen::Codegen;
use std::{
    fs,
    io::{self, BufWriter, Write as _},
    path::PathBuf,
};

#[derive(Debug)]
pub struct Output {
    out_dir: PathBuf,
}

impl Output {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// `<out_dir>/<BaseName>.java`
    pub fn path_for(&self, codegen: &Codegen<'_>) -> PathBuf {
        self.out_dir.join(codegen.file_name())
    }

    /// Create or overwrite the file for `codegen` and return its path.
    ///
    /// Nothing is created when the output directory is missing. A failure
    /// while writing may leave a truncated file behind.
    pub fn write(&self, codegen: &Codegen<'_>) -> Result<PathBuf, OutputError> {
        match fs::metadata(&self.out_dir) {
            Ok(meta) if meta.is_dir() => (),
            Ok(_) => {
                return Err(OutputError::NotADirectory {
                    path: self.out_dir.clone(),
                })
            }
            Err(source) => {
                return Err(OutputError::Io {
                    path: self.out_dir.clone(),
                    source,
                })
            }
        }

        let out_file = self.path_for(codegen);
        let generated = codegen.to_string();

        let io_error = |source| OutputError::Io {
            path: out_file.clone(),
            source,
        };
        let file = fs::File::options()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&out_file)
            .map_err(io_error)?;
        let mut out = BufWriter::new(file);
        out.write_all(generated.as_bytes()).map_err(io_error)?;
        out.flush().map_err(io_error)?;

        tracing::info!("wrote {} ({} bytes)", out_file.display(), generated.len());

        Ok(out_file)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
