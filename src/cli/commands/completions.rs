//! `swe-cli completions <shell>`: print a completion script.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Prints the completion script for one shell to stdout.
pub struct CompletionsCommand {
    shell: Shell,
}

impl CompletionsCommand {
    pub fn new(args: CompletionsArgs) -> Self {
        Self { shell: args.shell }
    }

    /// Render the script into `out`, named after the binary clap knows about.
    pub fn write_to(&self, out: &mut dyn Write) -> Result<()> {
        let mut cmd = Cli::command();
        let bin_name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, bin_name, out);
        out.flush()?;
        Ok(())
    }
}

impl Command for CompletionsCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.write_to(&mut std::io::stdout().lock())?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        CompletionsCommand::new(CompletionsArgs { shell })
            .write_to(&mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn bash_script_registers_binary() {
        let output = script(Shell::Bash);
        assert!(output.contains("complete"));
        assert!(output.contains("swe-cli"));
    }

    #[test]
    fn zsh_script_lists_subcommands() {
        let output = script(Shell::Zsh);
        for sub in ["new", "upgrade", "cache", "completions"] {
            assert!(output.contains(sub), "missing {}", sub);
        }
    }

    #[test]
    fn fish_script_knows_new_flags() {
        let output = script(Shell::Fish);
        assert!(output.contains("skip-install"));
        assert!(output.contains("strip-replace"));
    }
}
