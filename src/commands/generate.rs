//! `generate` subcommand: shell completions and man pages.
use anyhow::{Context, Result};
use clap_complete::Shell;
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write the completion script for `shell` to `writer`.
pub fn write_completions<W: Write>(
    shell: Shell,
    cmd: &mut clap::Command,
    writer: &mut W,
) {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, writer);
}

/// Render a man page for `cmd` and one per (nested) subcommand into
/// `output_dir`, or the current directory if none is given. Subcommand pages
/// are named `<parent>-<sub>.1`.
///
/// Returns the paths of the pages written.
///
/// # Errors
///
/// Returns an [`anyhow::Error`] if the output directory or a page file could
/// not be created or written.
pub fn generate_man_pages(
    cmd: &clap::Command,
    output_dir: Option<PathBuf>,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Opening current directory")?,
    };
    std::fs::create_dir_all(&output_dir)
        .context("create output Man directories")?;

    let mut written = vec![];
    let mut pending = vec![(cmd.get_name().to_string(), cmd.clone())];

    while let Some((page_name, page_cmd)) = pending.pop() {
        for sub in page_cmd.get_subcommands() {
            pending.push((format!("{page_name}-{}", sub.get_name()), sub.clone()));
        }
        // clap_mangen takes the NAME/SYNOPSIS text from the command name.
        // Generation is one-shot, so leaking the prefixed name is fine.
        let leaked: &'static str = Box::leak(page_name.clone().into_boxed_str());
        let renamed = page_cmd.name(leaked).disable_help_subcommand(true);
        let path = render_page(renamed, &output_dir, &page_name)?;
        info!("wrote man page {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn render_page(cmd: clap::Command, dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{name}.1"));
    let mut file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    clap_mangen::Man::new(cmd)
        .render(&mut file)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
