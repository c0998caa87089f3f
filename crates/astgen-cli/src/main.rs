use anyhow::Context as _;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The package declared by the generated sources.
    #[arg(long, default_value = "lox")]
    package: String,

    /// The directory where the generated sources are written.
    output_directory: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::debug!("parsed CLI args = {:?}", args);

    let written = astgen::build::generate(
        &args.output_directory,
        &args.package,
        astgen::grammars::BUILTIN,
    )
    .with_context(|| {
        anyhow::anyhow!(
            "errored during generating into {}",
            args.output_directory.display()
        )
    })?;
    tracing::debug!("generated {:?}", written);

    Ok(())
}
