use crate::utils::confirm_overwrite;
use anyhow::{Context, Result};
use clap::Args;
use log::info;
use nbs::NbsFile;
use std::{
    io::{stdin, stdout},
    path::PathBuf,
};

/// Read a .nbs file and write it back out, with its header brought in line with the song
#[derive(Args)]
#[clap(author, version)]
pub struct RewriteArgs {
    /// The path to the file to rewrite
    path: PathBuf,

    /// Where to write the result. Defaults to overwriting the input
    #[clap(short, long)]
    output: Option<PathBuf>,
}

pub fn rewrite(args: RewriteArgs) -> Result<()> {
    let file = NbsFile::from_path(&args.path).context("Reading the song from file failed")?;

    let output = match args.output {
        Some(output) => {
            if !confirm_overwrite(&output, stdin().lock(), stdout())? {
                info!("Left {} untouched", output.to_string_lossy());
                return Ok(());
            }

            output
        }
        None => args.path,
    };

    file.to_path(&output)
        .context("Could not write the song to file")?;

    info!(
        "Wrote {} ({} ticks, {} layers)",
        output.to_string_lossy(),
        file.song.tick_count(),
        file.song.layer_count()
    );

    Ok(())
}
