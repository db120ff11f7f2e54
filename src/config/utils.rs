use std::env;
use std::str::FromStr;

/// Read `key` and parse it, falling back to `default` when the variable is unset.
///
/// A variable that is set but does not parse is an error rather than silently
/// using the default.
pub fn parse_env_or<T>(key: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| format!("Invalid value for {key} ('{raw}'): {e}")),
        Err(_) => Ok(default),
    }
}

/// Read a string variable, treating an empty value as unset.
pub fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
