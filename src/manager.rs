//! The orchestrator: registration, duplicate detection, and the one
//! `parse_args` call that drives the four-layer merge.
//!
//! A manager is configured in two phases. During setup the caller points it
//! at config files and registers option groups; every duplicate-identifier
//! check happens at registration time, so a manager that finished setup
//! cannot fail on programmer error later. Resolution itself borrows the
//! manager immutably; calling it twice with the same inputs produces the
//! same result, because there is nothing to accumulate.

use std::path::PathBuf;

use tracing::debug;

use crate::cli::{ClapTokenizer, CliTokenizer, CommandInfo, RESERVED_NAMES};
use crate::dump;
use crate::env::{EnvSource, StdEnv};
use crate::error::ConfigError;
use crate::files::read_config_files;
use crate::format::{ConfigFormat, TomlFormat};
use crate::resolve::{ResolveInput, resolve};
use crate::resolved::ResolvedConfig;
use crate::spec::{OptionGroup, find_option};

/// Result of a non-exiting parse.
#[derive(Debug)]
pub enum ParseOutcome {
    /// The fully resolved configuration.
    Config(ResolvedConfig),
    /// Text to print before exiting 0: rendered help or a config dump.
    Exit(String),
}

pub struct ConfigManager {
    app_name: String,
    about: Option<String>,
    groups: Vec<OptionGroup>,
    config_files: Vec<PathBuf>,
    format: Box<dyn ConfigFormat>,
    tokenizer: Box<dyn CliTokenizer>,
}

impl ConfigManager {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            about: None,
            groups: Vec::new(),
            config_files: Vec::new(),
            format: Box::new(TomlFormat),
            tokenizer: Box::new(ClapTokenizer),
        }
    }

    /// Description shown at the top of `--help`.
    pub fn about(mut self, text: impl Into<String>) -> Self {
        self.about = Some(text.into());
        self
    }

    /// Substitute the file-format collaborator (default: [`TomlFormat`]).
    pub fn with_format(mut self, format: impl ConfigFormat + 'static) -> Self {
        self.format = Box::new(format);
        self
    }

    /// Substitute the CLI tokenizer collaborator (default: [`ClapTokenizer`]).
    pub fn with_tokenizer(mut self, tokenizer: impl CliTokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    /// Set the ordered config-file path list. Paths are stored verbatim and
    /// not checked for existence; a missing config file is expected and
    /// normal. Later paths override earlier ones.
    pub fn set_config_files<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config_files = paths.into_iter().map(Into::into).collect();
    }

    /// Register a group. All duplicate detection happens here: the incoming
    /// group's identifiers are checked against the reserved built-in flags,
    /// against each other, and against every group registered so far.
    pub fn add_option_group(&mut self, group: OptionGroup) -> Result<(), ConfigError> {
        for (i, opt) in group.options().iter().enumerate() {
            let duplicate = RESERVED_NAMES.contains(&opt.name())
                || group.options()[..i].iter().any(|o| o.name() == opt.name())
                || find_option(&self.groups, opt.name()).is_some();
            if duplicate {
                return Err(ConfigError::DuplicateOption {
                    name: opt.name().to_string(),
                    group: group.name().to_string(),
                });
            }
        }
        self.groups.push(group);
        Ok(())
    }

    pub fn groups(&self) -> &[OptionGroup] {
        &self.groups
    }

    pub fn config_files(&self) -> &[PathBuf] {
        &self.config_files
    }

    /// Parse the process's real arguments and environment.
    ///
    /// Prints help or the config dump and exits 0 when either was requested;
    /// otherwise returns the resolved configuration.
    pub fn parse_args(&self) -> Result<ResolvedConfig, ConfigError> {
        let argv: Vec<String> = std::env::args().collect();
        match self.try_parse_from(&argv, &StdEnv)? {
            ParseOutcome::Config(resolved) => Ok(resolved),
            ParseOutcome::Exit(text) => {
                print!("{text}");
                std::process::exit(0);
            }
        }
    }

    /// Non-exiting variant with injectable argv and environment, for tests
    /// and embedders. `argv` includes the program name in position zero.
    pub fn try_parse_from(
        &self,
        argv: &[String],
        env: &dyn EnvSource,
    ) -> Result<ParseOutcome, ConfigError> {
        let command = CommandInfo {
            name: self.app_name.clone(),
            about: self.about.clone(),
        };
        let parse = self.tokenizer.tokenize(&command, &self.groups, argv, env)?;

        if let Some(help) = parse.help {
            return Ok(ParseOutcome::Exit(help));
        }

        let files = read_config_files(&self.config_files);
        let resolved = resolve(
            &self.groups,
            self.format.as_ref(),
            ResolveInput {
                files,
                env,
                cli_values: &parse.values,
            },
        )?;

        if parse.dump_requested {
            debug!("dump requested, rendering resolved configuration");
            return Ok(ParseOutcome::Exit(self.dump_config(&resolved)));
        }
        Ok(ParseOutcome::Config(resolved))
    }

    /// Render the resolved configuration in the same format the file layer
    /// reads, using final resolved values.
    pub fn dump_config(&self, resolved: &ResolvedConfig) -> String {
        dump::dump(&self.groups, resolved, self.format.as_ref())
    }
}
