//! Scan command for listing time blocks across note files.
//!
//! Files are read and scanned in parallel; output keeps the order of the
//! given paths, and within a directory files are sorted by path.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use tb_core::{Note, ParagraphType};

const NOTE_EXTENSIONS: [&str; 2] = ["md", "txt"];

/// A time-block paragraph found in a note file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundBlock {
    pub path: String,
    /// One-based line number.
    pub line: usize,
    #[serde(rename = "type")]
    pub para_type: ParagraphType,
    pub time_block: String,
    pub content: String,
}

/// Expands directories into the note files beneath them.
fn note_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            collect_dir(path, &mut found)?;
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn collect_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_dir(&path, files)?;
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| NOTE_EXTENSIONS.contains(&ext))
        {
            files.push(path);
        }
    }
    Ok(())
}

fn scan_file(path: &Path, must_contain: Option<&str>) -> Result<Vec<FoundBlock>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let note = Note::parse(&text);
    let found: Vec<FoundBlock> = note
        .paragraphs
        .iter()
        .filter_map(|para| {
            let (time_block, content) = tb_core::time_block_details(para, must_contain)?;
            Some(FoundBlock {
                path: path.display().to_string(),
                line: para.line_index + 1,
                para_type: para.para_type,
                time_block,
                content,
            })
        })
        .collect();
    tracing::debug!(path = %path.display(), blocks = found.len(), "scanned note");
    Ok(found)
}

/// Finds every time-block paragraph in the given files and directories.
pub fn scan(paths: &[PathBuf], must_contain: Option<&str>) -> Result<Vec<FoundBlock>> {
    let files = note_files(paths)?;
    let per_file = files
        .par_iter()
        .map(|path| scan_file(path, must_contain))
        .collect::<Result<Vec<_>>>()?;
    Ok(per_file.into_iter().flatten().collect())
}

/// Runs the scan command.
pub fn run<W: Write>(
    writer: &mut W,
    paths: &[PathBuf],
    must_contain: Option<&str>,
    json: bool,
) -> Result<()> {
    let found = scan(paths, must_contain)?;

    if json {
        for block in &found {
            writeln!(writer, "{}", serde_json::to_string(block)?)?;
        }
        return Ok(());
    }

    if found.is_empty() {
        writeln!(writer, "No time blocks found.")?;
        return Ok(());
    }

    for block in &found {
        writeln!(
            writer,
            "{}:{}: {} | {}",
            block.path, block.line, block.time_block, block.content
        )?;
    }

    Ok(())
}
