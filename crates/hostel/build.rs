use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::Shell;

// cli.rs depends only on clap and clap_complete, so it can be compiled
// here on its own.
#[allow(dead_code)]
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR").map(PathBuf::from) else {
        println!("cargo::warning=OUT_DIR not set; skipping man pages and completions");
        return;
    };

    let cmd = cli::Cli::command();

    let man_dir = out_dir.join("man");
    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo::warning=cannot create {}: {e}", man_dir.display());
        return;
    }
    write_manpages(&cmd, &man_dir);

    let completions_dir = out_dir.join("completions");
    if fs::create_dir_all(&completions_dir).is_ok() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            let mut cmd = cmd.clone();
            if let Err(e) = clap_complete::generate_to(shell, &mut cmd, "hostel", &completions_dir) {
                println!("cargo::warning=completion generation for {shell} failed: {e}");
            }
        }
    }
}

/// One page per visible (sub)command, named `hostel-<sub>.1`.
fn write_manpages(cmd: &clap::Command, dir: &Path) {
    let name = cmd.get_name().to_owned();
    let mut buf = Vec::new();
    let rendered = clap_mangen::Man::new(cmd.clone()).render(&mut buf);
    let path = dir.join(format!("{name}.1"));
    if let Err(e) = rendered.and_then(|()| fs::write(&path, &buf)) {
        println!("cargo::warning=man page {} failed: {e}", path.display());
    }

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        write_manpages(&sub, dir);
    }
}
