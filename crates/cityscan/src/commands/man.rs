//! Man page rendering with `clap_mangen`.

use std::fs;
use std::io::Write;
use std::path::Path;

use clap::CommandFactory;

use crate::cli::{Cli, GlobalOpts, ManArgs};
use crate::error::CliError;

pub fn handle(args: &ManArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cmd = Cli::command();

    let Some(dir) = args.out_dir.as_deref() else {
        let mut stdout = std::io::stdout().lock();
        clap_mangen::Man::new(cmd).render(&mut stdout)?;
        stdout.flush()?;
        return Ok(());
    };

    fs::create_dir_all(dir)?;
    let written = write_pages(&cmd, dir)?;
    tracing::debug!(pages = written, dir = %dir.display(), "man pages written");
    if !global.quiet {
        eprintln!("Wrote {written} man pages to {}", dir.display());
    }
    Ok(())
}

/// Write `<name>.1` for `cmd` and each visible subcommand, named
/// `<parent>-<sub>.1`. Returns the number of pages written.
fn write_pages(cmd: &clap::Command, dir: &Path) -> Result<usize, CliError> {
    let name = cmd.get_name().to_owned();

    let mut page = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut page)?;
    fs::write(dir.join(format!("{name}.1")), page)?;

    let mut written = 1;
    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        written += write_pages(&sub, dir)?;
    }
    Ok(written)
}
