use anyhow::{Context, Result};
use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};
use walkdir::{DirEntry, WalkDir};

/// The extension of Note Block Studio song files
pub const NBS_EXTENSION: &str = "nbs";

/// Collect the `.nbs` files at or (optionally recursively) below the given paths
///
/// Hidden files are skipped. Files named explicitly are included as long as they carry
/// the `.nbs` extension.
pub fn nbs_files<I>(paths: I, recursive: bool) -> Vec<PathBuf>
where
    I: IntoIterator,
    I::Item: AsRef<Path>,
{
    let max_depth = if recursive { usize::MAX } else { 1 };

    paths
        .into_iter()
        .flat_map(|root| WalkDir::new(root.as_ref()).max_depth(max_depth))
        .filter_map(Result::ok)
        .filter(is_song)
        .map(DirEntry::into_path)
        .collect()
}

fn is_song(entry: &DirEntry) -> bool {
    let hidden = entry.file_name().to_string_lossy().starts_with('.');
    let song = entry
        .path()
        .extension()
        .is_some_and(|extension| extension == NBS_EXTENSION);

    entry.file_type().is_file() && song && !hidden
}

/// Ask on `output` whether `path` may be overwritten, reading the answer from `input`
///
/// Returns `true` right away when nothing exists at `path` yet, and otherwise keeps asking
/// until the answer is either `Y` or `n`.
pub fn confirm_overwrite<R, W>(path: &Path, mut input: R, mut output: W) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    if !path.exists() {
        return Ok(true);
    }

    loop {
        writeln!(
            output,
            "{} already exists. Do you want to overwrite it? Y/n",
            path.to_string_lossy()
        )?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Could not read terminal input")?;

        match line.trim_end() {
            "Y" => return Ok(true),
            "n" => return Ok(false),
            _ if read == 0 => return Ok(false),
            _ => (),
        }
    }
}
