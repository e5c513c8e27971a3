use crate::utils::nbs_files;
use anyhow::{Context, Result};
use clap::Args;
use log::warn;
use nbs::NbsFile;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

/// Print the metadata of .nbs files, or entire directories of them
#[derive(Args)]
#[clap(author, version)]
pub struct InspectArgs {
    /// The path(s) to inspect
    path: Vec<PathBuf>,

    /// Search folders recursively
    #[clap(short, long)]
    recursive: bool,

    /// List the name and volume of every layer
    #[clap(short, long)]
    layers: bool,
}

pub fn inspect(args: &InspectArgs) -> Result<()> {
    let paths = nbs_files(&args.path, args.recursive);

    if paths.is_empty() {
        warn!("No .nbs files found");
    }

    if let Some((last, rest)) = paths.split_last() {
        for path in rest {
            print(path, args.layers)?;
            println!();
        }

        print(last, args.layers)?;
    }

    Ok(())
}

fn print(path: &Path, layers: bool) -> Result<()> {
    let file = NbsFile::from_path(path)
        .with_context(|| format!("Reading {} failed", path.to_string_lossy()))?;
    let NbsFile { header, song } = &file;

    let length = Duration::from_millis(file.length_millis().max(0) as u64);

    println!("{}", path.file_name().unwrap_or_default().to_string_lossy());
    println!("  {:<11} | {}", "Name", header.name);
    println!("  {:<11} | {}", "Author", header.author);
    println!("  {:<11} | {}", "Ticks", song.tick_count());
    println!("  {:<11} | {}", "Layers", song.layer_count());
    println!("  {:<11} | {}", "Notes", song.note_count());
    println!("  {:<11} | {:.2} t/s", "Tempo", header.tempo as f32 / 100.0);
    println!("  {:<11} | {}", "Length", humantime::format_duration(length));

    for (slot, instrument) in song.custom_instruments().iter().enumerate() {
        if let Some(instrument) = instrument {
            println!("  {:<11} | {}", format!("Instrument{slot}"), instrument.name());
        }
    }

    if layers {
        for layer in 0..song.layer_count() {
            println!(
                "{layer:>7} | {:<16} | {:>4}%",
                song.layer_name(layer).unwrap_or("-"),
                song.layer_volume(layer)
            );
        }
    }

    Ok(())
}
