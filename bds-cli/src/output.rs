//! Writes the generated searches to stdout or to a file.
use std::io::{self, Write};
use std::path::Path;

use dialoguer::Confirm;
use log::info;
use owo_colors::OwoColorize;

use crate::error::CliError;

/// Writes `lines` to `path`, or to stdout when there is no path.
///
/// An existing file is only replaced when `overwrite` is set or the user agrees to it. No lines
/// leave the file empty. Returns `false` if the user declined.
pub async fn write_lines(
    lines: &[String],
    path: Option<&Path>,
    overwrite: bool,
) -> Result<bool, CliError> {
    let Some(path) = path else {
        let mut stdout = io::stdout().lock();
        for line in lines {
            writeln!(stdout, "{line}")?;
        }
        stdout.flush()?;
        return Ok(true);
    };

    if path.exists() && !overwrite && !confirm_overwrite(path)? {
        return Ok(false);
    }

    let mut contents = lines.join("\n");
    if !contents.is_empty() {
        contents.push('\n');
    }
    tokio::fs::write(path, contents).await?;

    info!("Searches saved to {}", path.display());
    Ok(true)
}

fn confirm_overwrite(path: &Path) -> Result<bool, CliError> {
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "The file {} already exists. Do you want to overwrite it?",
            path.display().bold().blue().italic()
        ))
        .wait_for_newline(true)
        .interact()?;

    Ok(confirmed)
}
