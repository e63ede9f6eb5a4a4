//! # scene_tool
//!
//! Works with Duniya scene files from the command line:
//!
//! - `demo <path>`: write a small sample scene.
//! - `inspect <path> [--json]`: print the registry and every entity.
//! - `verify <path>`: decode, re-encode, and check the bytes match.

mod demo;
mod inspect;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use duniya_component::TypeRegistry;
use duniya_component::wire::DecodeLimits;
use duniya_scene::{CodecConfig, SceneCodec, load_scene, save_scene};

#[derive(Parser)]
#[command(name = "scene_tool", about = "Create, inspect and verify Duniya scene files")]
struct Args {
    /// Maximum entity count accepted when decoding
    #[arg(long, global = true, default_value_t = DecodeLimits::default().max_entities)]
    max_entities: u32,

    /// Maximum components per entity accepted when decoding
    #[arg(long, global = true, default_value_t = DecodeLimits::default().max_components_per_entity)]
    max_components: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a sample scene (camera, textured mesh, texture) to a file
    Demo {
        /// Output path
        path: PathBuf,
    },
    /// Print the contents of a scene file
    Inspect {
        /// Scene file to read
        path: PathBuf,
        /// Print a JSON document instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check that a scene file re-encodes to identical bytes
    Verify {
        /// Scene file to read
        path: PathBuf,
    },
}

impl Args {
    fn codec(&self) -> SceneCodec {
        let limits = DecodeLimits {
            max_entities: self.max_entities,
            max_components_per_entity: self.max_components,
            ..DecodeLimits::default()
        };
        SceneCodec::with_config(CodecConfig::default().with_limits(limits))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let codec = args.codec();
    let mut registry = TypeRegistry::builtin();

    match &args.command {
        Command::Demo { path } => write_demo(&codec, path, &registry)?,
        Command::Inspect { path, json } => {
            let table = load_scene(&codec, path, &mut registry)
                .with_context(|| format!("reading {}", path.display()))?;
            let summary = inspect::summarize(&table, &registry)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{summary}");
            }
        }
        Command::Verify { path } => {
            let bytes = verify(&codec, path)?;
            info!(path = %path.display(), bytes, "scene verified");
        }
    }
    Ok(())
}

fn write_demo(codec: &SceneCodec, path: &Path, registry: &TypeRegistry) -> Result<()> {
    let table = demo::build_scene().context("building demo scene")?;
    save_scene(codec, path, &table, registry)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Decode `path` and re-encode it with the registry it carries. Returns the
/// file length when the bytes match.
fn verify(codec: &SceneCodec, path: &Path) -> Result<usize> {
    let original = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut stream_registry = TypeRegistry::new();
    let table = codec
        .decode_from_slice(&original, &mut stream_registry)
        .with_context(|| format!("decoding {}", path.display()))?;
    let reencoded = codec.encode_to_vec(&table, &stream_registry)?;
    if reencoded != original {
        bail!(
            "{} does not re-encode byte-exact ({} bytes in, {} bytes out)",
            path.display(),
            original.len(),
            reencoded.len()
        );
    }
    Ok(original.len())
}
