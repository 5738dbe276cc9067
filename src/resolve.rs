//! Core resolution pipeline: fold the four layers into one resolved mapping.
//!
//! Operates on pre-loaded data (`ResolveInput`) with no I/O, making the full
//! pipeline testable with synthetic inputs. The layers are applied strictly
//! in order (defaults, files, environment, command line) and each layer
//! overwrites the staged value *and* provenance for any identifier it
//! supplies, so every later layer's override decision sees the state left
//! by the earlier ones. There is no priority comparison anywhere; order of
//! application is the whole algorithm.

use std::path::PathBuf;

use tracing::debug;

use crate::env::EnvSource;
use crate::error::ConfigError;
use crate::format::ConfigFormat;
use crate::resolved::{Layer, ResolvedConfig};
use crate::spec::{OptionGroup, OptionSpec, find_option};
use crate::value::Value;

/// All pre-loaded data needed to resolve a configuration.
pub(crate) struct ResolveInput<'a> {
    /// File contents in path-list order: first = lowest priority.
    pub files: Vec<(PathBuf, String)>,
    /// Environment lookup for per-option envvars.
    pub env: &'a dyn EnvSource,
    /// Raw CLI values keyed by identifier, one entry per supplied option
    /// (repeats already folded to the last occurrence by the tokenizer).
    pub cli_values: &'a [(String, String)],
}

pub(crate) fn resolve(
    groups: &[OptionGroup],
    format: &dyn ConfigFormat,
    input: ResolveInput<'_>,
) -> Result<ResolvedConfig, ConfigError> {
    let mut resolved = ResolvedConfig::default();

    // Layer 1: built-in defaults.
    for group in groups {
        for opt in group.options() {
            if let Some(default) = &opt.default {
                resolved.stage(opt.name(), default.clone(), Layer::Default);
            }
        }
    }

    // Layer 2: config files, in order; later files win for the same key.
    for (path, content) in &input.files {
        let sections = format
            .parse(content)
            .map_err(|source| ConfigError::ConfigFile {
                path: path.clone(),
                source,
            })?;

        for section in sections {
            let Some(group) = groups
                .iter()
                .find(|g| g.section_name() == Some(section.name.as_str()))
            else {
                debug!(section = %section.name, "ignoring unregistered section");
                continue;
            };
            for (key, raw) in &section.entries {
                let Some(opt) = group.options().iter().find(|o| o.matches_key(key)) else {
                    debug!(section = %section.name, key = %key, "ignoring unregistered key");
                    continue;
                };
                let value = coerce(opt, Layer::File, raw)?;
                resolved.stage(opt.name(), value, Layer::File);
            }
        }
    }

    // Layer 3: environment variables. Absent or empty leaves the staged
    // value untouched.
    for group in groups {
        for opt in group.options() {
            if let Some(var) = &opt.envvar
                && let Some(raw) = input.env.get(var).filter(|v| !v.is_empty())
            {
                debug!(option = opt.name(), var = %var, "environment override");
                let value = coerce(opt, Layer::Env, &raw)?;
                resolved.stage(opt.name(), value, Layer::Env);
            }
        }
    }

    // Layer 4: command line, highest priority. The tokenizer only emits
    // registered identifiers.
    for (name, raw) in input.cli_values {
        if let Some((_, opt)) = find_option(groups, name) {
            let value = coerce(opt, Layer::Cli, raw)?;
            resolved.stage(opt.name(), value, Layer::Cli);
        }
    }

    // Every required option must have been supplied by some layer.
    for group in groups {
        for opt in group.options() {
            if opt.required && !resolved.contains(opt.name()) {
                return Err(ConfigError::MissingRequired {
                    name: opt.name().to_string(),
                    forms: opt.forms(group.section_name()),
                });
            }
        }
    }

    Ok(resolved)
}

fn coerce(opt: &OptionSpec, layer: Layer, raw: &str) -> Result<Value, ConfigError> {
    opt.kind().coerce(raw).ok_or_else(|| ConfigError::Coercion {
        name: opt.name().to_string(),
        layer,
        value: raw.to_string(),
        reason: format!("expected {}", opt.kind()),
    })
}
