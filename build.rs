use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Command, CommandFactory};
use clap_complete::{Shell, generate_to};
use clap_mangen::Man;

#[path = "src/cli.rs"]
mod cli;

const BIN: &str = "citedit";

fn render_man(cmd: Command, title: &str, dir: &Path) -> io::Result<()> {
    let mut page = Vec::new();
    Man::new(cmd).title(title).render(&mut page)?;
    fs::write(dir.join(format!("{title}.1")), page)
}

fn main() -> io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=build.rs");

    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return Ok(());
    };
    let mut cmd = cli::Cli::command();

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        generate_to(shell, &mut cmd, BIN, &out_dir)?;
    }

    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;
    render_man(cmd.clone(), BIN, &man_dir)?;

    // citedit-shift-left.1, citedit-check.1, ...
    for sub in cmd.get_subcommands().filter(|sub| sub.get_name() != "help") {
        let title = format!("{BIN}-{}", sub.get_name());
        render_man(sub.clone(), &title, &man_dir)?;
    }

    Ok(())
}
