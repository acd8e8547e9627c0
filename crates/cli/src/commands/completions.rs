//! # CLI Completions Command
//!
//! Shell completions generation for the volley CLI.

use clap::Command;
use clap_complete::Shell;
use error::Result;

/// Generates shell completions for the CLI
///
/// # Arguments
///
/// * `shell` - The shell to generate completions for
/// * `cmd` - The CLI command to generate completions for
/// * `out` - Where the script is written
pub fn completions(shell: Shell, cmd: &mut Command, out: &mut dyn std::io::Write) -> Result<()> {
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, cmd, name, out);
    Ok(())
}
