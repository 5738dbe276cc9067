//! The config-file format collaborator.
//!
//! The core knows nothing about the file grammar. It requires exactly two
//! capabilities: parse a document into named sections of raw string
//! key/value pairs, and render ordered sections of typed key/value pairs
//! back into a document the parser accepts. [`TomlFormat`] is the default
//! collaborator — top-level tables are sections, scalar values are read
//! back as raw strings so the per-option coercion path is the same for
//! every layer. Rendering goes through the `toml` serializer, never a
//! hand-assembled string, so keys and values are quoted and escaped
//! correctly whatever the identifiers look like. The crate's
//! `preserve_order` feature keeps tables in insertion order, which is what
//! makes the rendered sections follow registration order.

use thiserror::Error;

use crate::value::Value;

/// A parse failure from the format collaborator. Wrapped by the core into
/// a config-file error carrying the offending path.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FormatError {
    message: String,
}

impl FormatError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One parsed section of raw string pairs, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSection {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

/// One section to render: resolved values in registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpSection {
    pub name: String,
    pub entries: Vec<(String, Value)>,
}

/// Capability interface for the sectioned key=value file format.
pub trait ConfigFormat {
    /// Parse a document into its sections. Values come back as raw strings;
    /// the core coerces them per option.
    fn parse(&self, text: &str) -> Result<Vec<RawSection>, FormatError>;

    /// Render sections into a document that [`parse`](Self::parse) accepts,
    /// preserving section and key order.
    fn render(&self, sections: &[DumpSection]) -> String;
}

/// TOML-backed format: `[Section]` tables with scalar entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlFormat;

impl ConfigFormat for TomlFormat {
    fn parse(&self, text: &str) -> Result<Vec<RawSection>, FormatError> {
        let table: toml::Table =
            toml::from_str(text).map_err(|e| FormatError::new(e.message()))?;

        let mut sections = Vec::new();
        for (name, value) in table {
            // Only top-level tables are sections; bare top-level keys have
            // no owning group and are ignored.
            let toml::Value::Table(entries) = value else {
                continue;
            };
            let entries = entries
                .into_iter()
                .filter_map(|(key, v)| scalar_to_string(v).map(|s| (key, s)))
                .collect();
            sections.push(RawSection { name, entries });
        }
        Ok(sections)
    }

    fn render(&self, sections: &[DumpSection]) -> String {
        let mut root = toml::Table::new();
        for section in sections {
            let mut table = toml::Table::new();
            for (key, value) in &section.entries {
                table.insert(key.clone(), to_toml(value));
            }
            root.insert(section.name.clone(), toml::Value::Table(table));
        }
        // Serializing a table of scalar sub-tables cannot fail.
        toml::to_string(&root).unwrap_or_default()
    }
}

/// Raw string form of a scalar TOML value. Arrays and nested tables are not
/// part of the format contract and are skipped.
fn scalar_to_string(value: toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(dt) => Some(dt.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

fn to_toml(value: &Value) -> toml::Value {
    match value {
        Value::Str(s) => toml::Value::String(s.clone()),
        Value::Int(i) => toml::Value::Integer(*i),
        Value::Float(f) => toml::Value::Float(*f),
        Value::Bool(b) => toml::Value::Boolean(*b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sections_and_keys() {
        let sections = TomlFormat
            .parse("[Daemon]\npidfile = \"/tmp/a.pid\"\n\n[Log]\nloglevel = \"warn\"\n")
            .unwrap();
        assert_eq!(sections.len(), 2);
        let daemon = sections.iter().find(|s| s.name == "Daemon").unwrap();
        assert_eq!(daemon.entries, vec![("pidfile".into(), "/tmp/a.pid".into())]);
    }

    #[test]
    fn parse_stringifies_scalars() {
        let sections = TomlFormat
            .parse("[Stomp]\nport = 61613\nrate = 1.5\nenabled = true\n")
            .unwrap();
        let stomp = &sections[0];
        let get = |k: &str| {
            stomp
                .entries
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get("port"), "61613");
        assert_eq!(get("rate"), "1.5");
        assert_eq!(get("enabled"), "true");
    }

    #[test]
    fn parse_ignores_bare_top_level_keys() {
        let sections = TomlFormat
            .parse("stray = 1\n[Daemon]\npidfile = \"x\"\n")
            .unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Daemon");
    }

    #[test]
    fn parse_skips_non_scalar_entries() {
        let sections = TomlFormat
            .parse("[Daemon]\npidfile = \"x\"\nextras = [1, 2]\n")
            .unwrap();
        assert_eq!(sections[0].entries.len(), 1);
    }

    #[test]
    fn parse_malformed_is_error() {
        let result = TomlFormat.parse("[Daemon\npidfile = x");
        assert!(result.is_err());
    }

    #[test]
    fn render_preserves_order() {
        let doc = TomlFormat.render(&[
            DumpSection {
                name: "Daemon".into(),
                entries: vec![
                    ("pidfile".into(), Value::Str("/tmp/a.pid".into())),
                    ("stdin".into(), Value::Str("/dev/null".into())),
                ],
            },
            DumpSection {
                name: "Stomp".into(),
                entries: vec![("port".into(), Value::Int(61613))],
            },
        ]);
        let daemon_pos = doc.find("[Daemon]").unwrap();
        let stomp_pos = doc.find("[Stomp]").unwrap();
        assert!(daemon_pos < stomp_pos);
        let pidfile_pos = doc.find("pidfile").unwrap();
        let stdin_pos = doc.find("stdin").unwrap();
        assert!(pidfile_pos < stdin_pos);
        assert!(doc.contains("port = 61613"));
    }

    #[test]
    fn render_quotes_strings() {
        let doc = TomlFormat.render(&[DumpSection {
            name: "Log".into(),
            entries: vec![("logfile".into(), Value::Str("/var/log/app.log".into()))],
        }]);
        assert!(doc.contains("logfile = \"/var/log/app.log\""));
    }

    #[test]
    fn render_escapes_special_characters() {
        let doc = TomlFormat.render(&[DumpSection {
            name: "S".into(),
            entries: vec![("v".into(), Value::Str("a\"b\\c\nd".into()))],
        }]);
        // The serializer picks the representation; what matters is that the
        // exact string survives a re-parse.
        let sections = TomlFormat.parse(&doc).unwrap();
        assert_eq!(sections[0].entries, vec![("v".into(), "a\"b\\c\nd".into())]);
    }

    #[test]
    fn render_quotes_non_bare_keys() {
        // An identifier that is not a bare TOML key must come back intact,
        // not re-parsed as a nested table.
        let doc = TomlFormat.render(&[DumpSection {
            name: "Db".into(),
            entries: vec![("db.url".into(), Value::Str("postgres://localhost".into()))],
        }]);
        let sections = TomlFormat.parse(&doc).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].entries,
            vec![("db.url".into(), "postgres://localhost".into())]
        );
    }

    #[test]
    fn render_then_parse_round_trips() {
        let doc = TomlFormat.render(&[DumpSection {
            name: "Daemon".into(),
            entries: vec![
                ("pidfile".into(), Value::Str("/tmp/a.pid".into())),
                ("workers".into(), Value::Int(4)),
                ("verbose".into(), Value::Bool(true)),
            ],
        }]);
        let sections = TomlFormat.parse(&doc).unwrap();
        assert_eq!(sections.len(), 1);
        let get = |k: &str| {
            sections[0]
                .entries
                .iter()
                .find(|(key, _)| key == k)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get("pidfile"), "/tmp/a.pid");
        assert_eq!(get("workers"), "4");
        assert_eq!(get("verbose"), "true");
    }

    #[test]
    fn render_empty_is_empty() {
        assert_eq!(TomlFormat.render(&[]), "");
    }
}
