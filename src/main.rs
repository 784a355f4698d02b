// ftm-import: write an XML channel list into an FTM-400DR memory dump
//
// Usage: ftm-import <channels.xml> <in.dat> <out.dat>
// The input dump is never modified; the mutated image is written to the
// output path only after the whole document has been processed.

use anyhow::Context;
use ftm400_rs::{import_channels, Image};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <channels.xml> <in.dat> <out.dat>", args[0]);
        std::process::exit(1);
    }

    let xml_file = &args[1];
    let in_file = &args[2];
    let out_file = &args[3];

    let xml = std::fs::read_to_string(xml_file)
        .with_context(|| format!("failed to read {}", xml_file))?;

    // Loaded whole and mutated in memory; a failure anywhere below leaves
    // both files on disk untouched.
    let mut image =
        Image::load(in_file).with_context(|| format!("failed to load image {}", in_file))?;

    let written = import_channels(&xml, &mut image)
        .with_context(|| format!("failed to process {}", xml_file))?;
    tracing::info!("wrote {} channels", written);

    image
        .save(out_file)
        .with_context(|| format!("failed to write {}", out_file))?;

    Ok(())
}
