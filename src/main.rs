//! gltf2glb - convert a .gltf file and its resources into a single .glb

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use gltf2glb::{StdFs, convert_gltf_to_glb};

#[derive(Parser)]
#[command(name = "gltf2glb")]
#[command(about = "Convert a glTF file into a self-contained GLB")]
#[command(version)]
struct Cli {
    /// Input .gltf file
    input: PathBuf,

    /// Output .glb file (defaults to the input path with a .glb extension)
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("glb"));

    convert_gltf_to_glb(&cli.input, &output, &StdFs)?;
    tracing::info!("wrote {}", output.display());
    Ok(())
}
