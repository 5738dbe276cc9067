//! Render a resolved configuration back into file format.
//!
//! The dump is the file-backed subset of the resolved state: one section
//! per section-bound group in registration order, one key per option with a
//! resolved value in insertion order, each carrying the FINAL value rather
//! than the default. Feeding the dump back in as the sole config file (with
//! no env or CLI overrides) reproduces the same value mapping.
//!
//! Groups without a section binding have no place in a config file and are
//! omitted, as are options that ended up with no value at all.

use crate::format::{ConfigFormat, DumpSection};
use crate::resolved::ResolvedConfig;
use crate::spec::OptionGroup;

pub(crate) fn dump(
    groups: &[OptionGroup],
    resolved: &ResolvedConfig,
    format: &dyn ConfigFormat,
) -> String {
    let mut sections = Vec::new();
    for group in groups {
        let Some(section_name) = group.section_name() else {
            continue;
        };
        let entries: Vec<_> = group
            .options()
            .iter()
            .filter_map(|opt| {
                resolved
                    .get(opt.name())
                    .map(|value| (opt.name().to_string(), value.clone()))
            })
            .collect();
        if entries.is_empty() {
            continue;
        }
        sections.push(DumpSection {
            name: section_name.to_string(),
            entries,
        });
    }
    format.render(&sections)
}
