//! Lazy help-text interpolation.
//!
//! Help strings are stored verbatim at registration and expanded only when
//! help is generated, so the rendered text reflects the environment at that
//! moment rather than a string baked in at startup.
//!
//! Two tags are recognized:
//! - `%envvar` is replaced with the current value of the option's bound
//!   environment variable, if that variable is set and non-empty. If the
//!   variable is unset (or the option has none), the text is left as
//!   written.
//! - `%default` is replaced with the display form of the option's default
//!   value, if any.

use crate::env::EnvSource;
use crate::spec::OptionSpec;

pub(crate) const ENVVAR_TAG: &str = "%envvar";
pub(crate) const DEFAULT_TAG: &str = "%default";

/// Expand the interpolation tags in an option's help text.
pub fn expand_help(opt: &OptionSpec, env: &dyn EnvSource) -> String {
    let mut help = opt.help.clone();

    if help.contains(ENVVAR_TAG)
        && let Some(var) = &opt.envvar
        && let Some(value) = env.get(var).filter(|v| !v.is_empty())
    {
        help = help.replace(ENVVAR_TAG, &value);
    }

    if help.contains(DEFAULT_TAG)
        && let Some(default) = &opt.default
    {
        help = help.replace(DEFAULT_TAG, &default.to_string());
    }

    help
}
