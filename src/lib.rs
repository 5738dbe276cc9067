//! Layered, group-based configuration resolution for CLI applications.
//! Declare your options in groups, point at your files, and parse once.
//!
//! Cfgmgr merges four ordered sources — built-in defaults, config files,
//! environment variables, and command-line arguments — into a single typed,
//! provenance-tracked result at process startup.
//!
//! ```ignore
//! let mut mgr = ConfigManager::new("cfgmgr").about("An example daemon.");
//! mgr.set_config_files(["/etc/cfgmgr/cfgmgr.toml", "/home/me/.cfgmgr.toml"]);
//!
//! mgr.add_option_group(
//!     OptionGroup::new("Daemon", "Settings for running as a daemon.")
//!         .add_option(
//!             OptionSpec::new("pidfile", ValueKind::Str)
//!                 .short('p')
//!                 .env("CFGMGR_PIDFILE")
//!                 .default_value("/var/run/cfgmgr.pid")
//!                 .help("Pid file location. [env: %envvar, default: %default]"),
//!         ),
//! )?;
//!
//! let config = mgr.parse_args()?;
//! let pidfile = config.get_str("pidfile");
//! ```
//!
//! # Design: registration as the schema
//!
//! Every configurable setting is declared once, as an [`OptionSpec`] inside
//! an [`OptionGroup`]. That registration drives everything downstream: the
//! config-file keys the file layer will accept, the environment variable
//! bound to each option, the CLI flags and grouped `--help` output, and the
//! sections of the `--dump-config` rendering. There is no separate schema
//! and no key can exist in one surface but not the others.
//!
//! Identifiers form a flat namespace — an option's name is unique across
//! the whole manager, so the resolved result is a plain identifier → value
//! mapping with typed getters. Duplicates are rejected when a group is
//! registered, not discovered at parse time.
//!
//! # Layer precedence
//!
//! ```text
//! Built-in defaults      OptionSpec::default_value(...)
//!        ↑ overridden by
//! Config files           set_config_files paths in order, later paths win
//!        ↑ overridden by
//! Environment vars       one variable per option, OptionSpec::env(...)
//!        ↑ overridden by
//! Command line           -p / --pidfile, strict about unknown flags
//! ```
//!
//! Every layer is sparse: it only touches the options it actually names,
//! and each later layer overwrites both the staged value and its recorded
//! provenance. [`ResolvedConfig::provenance`] tells you which layer won for
//! any identifier.
//!
//! The two lenient spots are deliberate and the only ones: a config file
//! that cannot be read is treated as absent (listing a path is a
//! suggestion), and file keys or sections that match no registered option
//! are ignored so old binaries tolerate new config files. Everything else
//! (malformed files, unknown flags, failed coercions, missing required
//! options) aborts resolution with a [`ConfigError`]; there is no partial
//! success.
//!
//! # Groups and sections
//!
//! A group binds to a config-file section (by default, one named after the
//! group), and only keys inside a matching section can reach the group's
//! options. A group created with `without_section()` is invisible to the
//! file layer entirely: its options come from env or CLI or not at all,
//! and it is omitted from dumps.
//!
//! # Dumping
//!
//! `--dump-config` (or [`ConfigManager::dump_config`]) renders the fully
//! resolved state — final values, not defaults — in the same format the
//! file layer reads. Parsing a dump back as the sole config file reproduces
//! the same values for every file-backed option, which makes the dump a
//! faithful "freeze my current configuration" artifact.
//!
//! # Help-text interpolation
//!
//! Help strings may carry `%envvar` and `%default` tags. They are expanded
//! when help is generated, not when the option is registered, so
//! `--help` shows the environment the process actually sees.
//!
//! # Collaborators, not grammars
//!
//! The merge algorithm knows nothing about file or flag syntax. The file
//! format sits behind [`ConfigFormat`] (default: [`TomlFormat`], where
//! top-level tables are sections), the argument vector behind
//! [`CliTokenizer`] (default: [`ClapTokenizer`], a runtime-built
//! [clap](https://docs.rs/clap) command), and environment access behind
//! [`EnvSource`] (default: the process environment; [`MockEnv`] for
//! deterministic tests). Each can be substituted on the manager.

pub mod error;

mod cli;
mod dump;
mod env;
mod files;
mod format;
mod help;
mod manager;
mod resolve;
mod resolved;
mod spec;
mod value;

pub use cli::{ClapTokenizer, CliParse, CliTokenizer, CommandInfo};
pub use env::{EnvSource, MockEnv, StdEnv};
pub use error::ConfigError;
pub use files::default_config_files;
pub use format::{ConfigFormat, DumpSection, FormatError, RawSection, TomlFormat};
pub use help::expand_help;
pub use manager::{ConfigManager, ParseOutcome};
pub use resolved::{Layer, ResolvedConfig};
pub use spec::{OptionGroup, OptionSpec};
pub use value::{Value, ValueKind};
