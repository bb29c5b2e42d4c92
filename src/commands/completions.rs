use anyhow::{bail, Context, Result};
use clap::{ArgMatches, Command};
use clap_complete::{generate, Shell};
use std::io;

pub const SUPPORTED_SHELLS: &str = "bash, zsh, fish, powershell, elvish";

/// Generate shell completions for the specified shell
pub fn execute(matches: &ArgMatches, cli: &mut Command) -> Result<()> {
    let shell_str = matches
        .get_one::<String>("shell")
        .context("Shell argument is required")?;
    let shell = parse_shell(shell_str)?;

    generate(shell, cli, "nagkit", &mut io::stdout());
    Ok(())
}

pub fn parse_shell(name: &str) -> Result<Shell> {
    let shell = match name.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => bail!(
            "Unsupported shell: {} (supported: {})",
            name,
            SUPPORTED_SHELLS
        ),
    };
    Ok(shell)
}
