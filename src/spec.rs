//! The registration model: options and the groups that own them.
//!
//! An [`OptionSpec`] describes one configurable setting; an [`OptionGroup`]
//! is an ordered, named collection of specs, optionally bound to a
//! config-file section. Both are plain data; all validation (duplicate
//! detection in particular) happens when the group is handed to the
//! manager, and nothing mutates after that.

use crate::value::{Value, ValueKind};

/// Declarative description of one configurable setting.
///
/// The name is the canonical identifier: it doubles as the `--long` flag
/// and as the config-file key, and must be unique across the whole manager.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    pub(crate) name: String,
    pub(crate) short: Option<char>,
    pub(crate) aliases: Vec<String>,
    pub(crate) envvar: Option<String>,
    pub(crate) default: Option<Value>,
    pub(crate) help: String,
    pub(crate) kind: ValueKind,
    pub(crate) required: bool,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            short: None,
            aliases: Vec::new(),
            envvar: None,
            default: None,
            help: String::new(),
            kind,
            required: false,
        }
    }

    /// Add a short flag form, e.g. `-p`.
    pub fn short(mut self, c: char) -> Self {
        self.short = Some(c);
        self
    }

    /// Add an extra long flag form. Alias keys also match in config files.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Bind an environment variable to this option.
    pub fn env(mut self, var: impl Into<String>) -> Self {
        self.envvar = Some(var.into());
        self
    }

    /// The built-in default: the lowest layer, present unless overridden.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Help text. May contain `%envvar` and `%default` tags, expanded at
    /// help-generation time against the runtime environment.
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = text.into();
        self
    }

    /// Require that some layer supplies a value.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether a config-file key refers to this option.
    pub(crate) fn matches_key(&self, key: &str) -> bool {
        self.name == key || self.aliases.iter().any(|a| a == key)
    }

    /// Human-readable list of the ways a value can be supplied, for the
    /// missing-required error.
    pub(crate) fn forms(&self, section: Option<&str>) -> String {
        let mut forms = vec![format!("--{}", self.name)];
        if let Some(c) = self.short {
            forms.push(format!("-{c}"));
        }
        if let Some(var) = &self.envvar {
            forms.push(var.clone());
        }
        if let Some(section) = section {
            forms.push(format!("[{section}].{}", self.name));
        }
        forms.join(", ")
    }
}

/// A named, ordered collection of options, optionally bound to a
/// config-file section.
///
/// The section binding defaults to the group name; call
/// [`without_section`](Self::without_section) for a group whose options can
/// only come from env or CLI. Options in unbound groups are invisible to
/// the file layer and absent from dumps.
#[derive(Debug, Clone)]
pub struct OptionGroup {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) section: Option<String>,
    pub(crate) options: Vec<OptionSpec>,
}

impl OptionGroup {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            section: Some(name.clone()),
            name,
            description: description.into(),
            options: Vec::new(),
        }
    }

    /// Bind to a different section name than the group name.
    pub fn section(mut self, name: impl Into<String>) -> Self {
        self.section = Some(name.into());
        self
    }

    /// Detach from the file layer entirely.
    pub fn without_section(mut self) -> Self {
        self.section = None;
        self
    }

    /// Append an option, preserving insertion order for help and dump.
    pub fn add_option(mut self, spec: OptionSpec) -> Self {
        self.options.push(spec);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn section_name(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }
}

/// Look up an option by identifier across all groups, with its owning group.
pub(crate) fn find_option<'a>(
    groups: &'a [OptionGroup],
    name: &str,
) -> Option<(&'a OptionGroup, &'a OptionSpec)> {
    groups.iter().find_map(|group| {
        group
            .options
            .iter()
            .find(|opt| opt.name == name)
            .map(|opt| (group, opt))
    })
}
