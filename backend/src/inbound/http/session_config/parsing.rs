//! Value parsing shared by the session toggles.

use actix_web::cookie::SameSite;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError, SessionEnv};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// A boolean toggle and the value debug builds fall back to.
pub(super) struct BoolEnvConfig {
    name: &'static str,
    fallback: bool,
}

impl BoolEnvConfig {
    pub(super) const fn new(name: &'static str, fallback: bool) -> Self {
        Self { name, fallback }
    }
}

/// Read a boolean toggle, passing parsed values through `check`.
pub(super) fn parse_bool_env<E, F>(
    env: &E,
    mode: BuildMode,
    config: BoolEnvConfig,
    check: F,
) -> Result<bool, SessionConfigError>
where
    E: SessionEnv + ?Sized,
    F: FnOnce(bool, BuildMode) -> Result<bool, SessionConfigError>,
{
    let BoolEnvConfig { name, fallback } = config;
    let Some(value) = env.string(name) else {
        return debug_warn_or_error(mode, fallback, SessionConfigError::MissingEnv { name }, || {
            warn!(fallback, "{name} not set; using fallback");
        });
    };

    match parse_bool(&value) {
        Some(flag) => check(flag, mode),
        None => {
            let error = SessionConfigError::InvalidEnv {
                name,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            };
            debug_warn_or_error(mode, fallback, error, || {
                warn!(%value, fallback, "invalid {name}; using fallback");
            })
        }
    }
}

/// Debug builds log and use `fallback`; release builds fail with `error`.
pub(super) fn debug_warn_or_error<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
    warn_fn: impl FnOnce(),
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn_fn();
        Ok(fallback)
    } else {
        Err(error)
    }
}

/// Parse a `SameSite` policy, case-insensitively.
pub(super) fn parse_same_site_value(
    value: String,
    mode: BuildMode,
    cookie_secure: bool,
    fallback: SameSite,
) -> Result<SameSite, SessionConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => debug_warn_or_error(
            mode,
            SameSite::None,
            SessionConfigError::InsecureSameSiteNone,
            || warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it"),
        ),
        _ => {
            let error = SessionConfigError::InvalidEnv {
                name: SAMESITE_ENV,
                value: value.clone(),
                expected: SAMESITE_EXPECTED,
            };
            debug_warn_or_error(mode, fallback, error, || {
                warn!(%value, "invalid SESSION_SAMESITE; using default");
            })
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1", Some(true))]
    #[case(" Yes ", Some(true))]
    #[case("n", Some(false))]
    #[case("FALSE", Some(false))]
    #[case("maybe", None)]
    #[case("", None)]
    fn bool_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }

    #[rstest]
    #[case("Strict", SameSite::Strict)]
    #[case("lax", SameSite::Lax)]
    #[case("NONE", SameSite::None)]
    fn same_site_spellings(#[case] raw: &str, #[case] expected: SameSite) {
        let parsed = parse_same_site_value(raw.to_owned(), BuildMode::Release, true, SameSite::Lax)
            .expect("valid policy");
        assert_eq!(parsed, expected);
    }
}
