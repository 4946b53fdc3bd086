//! Small value conversions shared by the post-processing rules.

use std::path::{Component, Path, PathBuf};

use anyhow::{Result, anyhow};

use crate::core::value::Value;

/// Interpret a value as a boolean.
///
/// Accepts `true/yes/1` and `false/no/0` in any case, or a `Bool` as-is.
pub fn str2bool(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(anyhow!("'{s}' is not a boolean")),
        },
        other => Err(anyhow!("{} value is not a boolean", other.kind())),
    }
}

/// Flatten a scalar, list, or nested list into one ordered list of strings.
///
/// `NotSet` members are dropped; booleans are rendered as `true`/`false`.
pub fn flatten_list(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    flatten_into(value, &mut out);
    out
}

fn flatten_into(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::NotSet => {}
        Value::Bool(b) => out.push(b.to_string()),
        Value::String(s) => out.push(s.clone()),
        Value::List(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        Value::Mapping(map) => out.extend(map.iter().map(|(key, value)| format!("{key}={value}"))),
    }
}

/// Join quoted items for a sentence: `'a'`, `'a' or 'b'`, `'a', 'b', or 'c'`.
pub fn oxford_comma<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    let quoted: Vec<String> = items
        .iter()
        .map(|item| format!("'{}'", item.as_ref()))
        .collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} {conjunction} {second}"),
        [init @ .., last] => format!("{}, {conjunction} {last}", init.join(", ")),
    }
}

/// Expand `~` and return an absolute, lexically normalized path.
pub fn abs_user_path(path: &str) -> String {
    let expanded = expand_tilde(path);
    let candidate = PathBuf::from(expanded);
    let absolute = if candidate.is_absolute() {
        candidate
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(candidate),
            Err(_) => candidate,
        }
    };
    normalize(&absolute).to_string_lossy().into_owned()
}

fn expand_tilde(path: &str) -> String {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str2bool_accepts_truthy_and_falsy_forms() {
        for raw in ["true", "TRUE", "Yes", "1"] {
            assert!(str2bool(&Value::string(raw)).expect(raw), "{raw}");
        }
        for raw in ["false", "False", "NO", "0"] {
            assert!(!str2bool(&Value::string(raw)).expect(raw), "{raw}");
        }
        assert!(str2bool(&Value::Bool(true)).expect("bool"));
    }

    #[test]
    fn str2bool_rejects_other_input() {
        assert!(str2bool(&Value::string("maybe")).is_err());
        assert!(str2bool(&Value::string("")).is_err());
        assert!(str2bool(&Value::NotSet).is_err());
        assert!(str2bool(&Value::strings(["true"])).is_err());
    }

    #[test]
    fn flatten_nested_preserves_order() {
        let nested = Value::List(vec![Value::strings(["a", "b"]), Value::string("c")]);
        assert_eq!(flatten_list(&nested), vec!["a", "b", "c"]);
    }

    #[test]
    fn flatten_is_idempotent() {
        let flat = Value::strings(["x", "y"]);
        let once = flatten_list(&flat);
        let twice = flatten_list(&Value::strings(once.clone()));
        assert_eq!(once, vec!["x", "y"]);
        assert_eq!(once, twice);
        assert_eq!(flatten_list(&Value::string("solo")), vec!["solo"]);
    }

    #[test]
    fn oxford_comma_joins() {
        let empty: [&str; 0] = [];
        assert_eq!(oxford_comma(&empty, "and"), "");
        assert_eq!(oxford_comma(&["stdout"], "and"), "'stdout'");
        assert_eq!(oxford_comma(&["a", "b"], "or"), "'a' or 'b'");
        assert_eq!(oxford_comma(&["a", "b", "c"], "and"), "'a', 'b', and 'c'");
    }

    #[test]
    fn abs_user_path_is_idempotent() {
        let once = abs_user_path("some/dir/../file.yml");
        assert!(Path::new(&once).is_absolute());
        assert!(once.ends_with("some/file.yml"));
        assert_eq!(abs_user_path(&once), once);
    }

    #[test]
    fn abs_user_path_expands_home() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let expanded = abs_user_path("~/ansible-navigator.log");
        assert_eq!(
            PathBuf::from(expanded),
            normalize(&home.join("ansible-navigator.log"))
        );
    }
}
