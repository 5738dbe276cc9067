//! The command-line tokenizer collaborator.
//!
//! This is the only clap-aware module. The core hands the tokenizer the
//! registered groups and an argv; it gets back raw `(identifier, value)`
//! string pairs plus the two built-in outcomes (rendered help, dump
//! request). The merge algorithm never sees a flag.
//!
//! [`ClapTokenizer`], the default implementation, builds a
//! [`clap::Command`] at parse time from the registered groups: every option
//! becomes a value-taking argument under its group's help heading, with its
//! short and alias forms attached. Each argument overrides itself, so a
//! flag repeated in one invocation (under any of its forms) takes the
//! last occurrence.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, Command};

use crate::env::EnvSource;
use crate::error::ConfigError;
use crate::help::expand_help;
use crate::spec::OptionGroup;

/// Built-in flag that prints the fully resolved config and exits.
pub(crate) const DUMP_FLAG: &str = "dump-config";

/// Identifiers no option may use; they collide with built-in flags.
pub(crate) const RESERVED_NAMES: &[&str] = &["help", DUMP_FLAG];

/// Command identity handed to the tokenizer by the manager.
#[derive(Debug, Clone)]
pub struct CommandInfo {
    pub name: String,
    pub about: Option<String>,
}

/// Result of tokenizing an argument vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliParse {
    /// Raw values supplied on the command line, as `(identifier, value)`.
    pub values: Vec<(String, String)>,
    /// Rendered help text, if the user asked for it.
    pub help: Option<String>,
    /// Whether the dump flag was given.
    pub dump_requested: bool,
}

/// Capability interface for the command-line tokenizer.
///
/// `argv` includes the program name in position zero, matching
/// `std::env::args`.
pub trait CliTokenizer {
    fn tokenize(
        &self,
        command: &CommandInfo,
        groups: &[OptionGroup],
        argv: &[String],
        env: &dyn EnvSource,
    ) -> Result<CliParse, ConfigError>;
}

/// Default tokenizer over a runtime-built [`clap::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClapTokenizer;

impl ClapTokenizer {
    fn build_command(
        command: &CommandInfo,
        groups: &[OptionGroup],
        env: &dyn EnvSource,
    ) -> Command {
        let mut cmd = Command::new(command.name.clone()).disable_version_flag(true);
        if let Some(about) = &command.about {
            cmd = cmd.about(about.clone());
        }

        cmd = cmd.arg(
            Arg::new(DUMP_FLAG)
                .long(DUMP_FLAG)
                .action(ArgAction::SetTrue)
                .help("Print the fully resolved configuration in config-file format and exit"),
        );

        for group in groups {
            for opt in group.options() {
                let mut arg = Arg::new(opt.name().to_string())
                    .long(opt.name().to_string())
                    .action(ArgAction::Set)
                    .overrides_with(opt.name().to_string())
                    .help(expand_help(opt, env))
                    .help_heading(group.name().to_string());
                if let Some(c) = opt.short {
                    arg = arg.short(c);
                }
                for alias in &opt.aliases {
                    arg = arg.alias(alias.clone());
                }
                cmd = cmd.arg(arg);
            }
        }
        cmd
    }
}

impl CliTokenizer for ClapTokenizer {
    fn tokenize(
        &self,
        command: &CommandInfo,
        groups: &[OptionGroup],
        argv: &[String],
        env: &dyn EnvSource,
    ) -> Result<CliParse, ConfigError> {
        let cmd = Self::build_command(command, groups, env);

        let matches = match cmd.try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(err) => {
                return match err.kind() {
                    ErrorKind::DisplayHelp => Ok(CliParse {
                        help: Some(err.to_string()),
                        ..CliParse::default()
                    }),
                    ErrorKind::UnknownArgument => {
                        let flag = match err.get(ContextKind::InvalidArg) {
                            Some(ContextValue::String(s)) => s.clone(),
                            _ => String::new(),
                        };
                        Err(ConfigError::UnknownOption { flag })
                    }
                    _ => Err(ConfigError::Usage(err.to_string())),
                };
            }
        };

        // No defaults are registered with clap, so every present value was
        // explicitly supplied.
        let mut values = Vec::new();
        for group in groups {
            for opt in group.options() {
                if let Some(raw) = matches.get_one::<String>(opt.name()) {
                    values.push((opt.name().to_string(), raw.clone()));
                }
            }
        }

        Ok(CliParse {
            values,
            help: None,
            dump_requested: matches.get_flag(DUMP_FLAG),
        })
    }
}
