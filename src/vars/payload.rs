//! Edits `export KEY='value'` lines inside an activation payload. Any other
//! line (shebang, comment, arbitrary script) is preserved verbatim, so the
//! payload stays an ordinary shell script the host can source.

use crate::error::{Result, ShctxError};
use crate::path_utils::safe_parent_for_creation;
use crate::shell::emit::quote_posix_single;
use std::fs;
use std::path::Path;

pub fn is_valid_env_key(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }

    for ch in chars {
        if !(ch.is_ascii_alphanumeric() || ch == '_') {
            return false;
        }
    }

    true
}

fn validate_keys<'a>(keys: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut invalid: Vec<&str> = keys.filter(|key| !is_valid_env_key(key)).collect();
    invalid.sort_unstable();
    invalid.dedup();

    if !invalid.is_empty() {
        return Err(ShctxError::InvalidVarName {
            name: invalid.join(", "),
        });
    }
    Ok(())
}

fn render_export(key: &str, value: &str) -> String {
    format!("export {key}={}", quote_posix_single(value))
}

fn parse_export_line(line: &str) -> Option<(String, String)> {
    let rest = line.trim().strip_prefix("export ")?;
    let (key, value) = rest.split_once('=')?;
    let key = key.trim();
    if !is_valid_env_key(key) {
        return None;
    }
    Some((key.to_string(), unquote_single(value)))
}

fn unquote_single(value: &str) -> String {
    let value = value.trim();
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        value[1..value.len() - 1].replace("'\\''", "'")
    } else {
        value.to_string()
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(content.lines().map(str::to_string).collect())
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = safe_parent_for_creation(path) {
        fs::create_dir_all(parent)?;
    }

    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    fs::write(path, content)?;
    Ok(())
}

/// Upserts export lines in place: an existing key keeps its position, new
/// keys are appended. Creates the payload when missing.
pub fn set_vars(path: &Path, vars: &[(String, String)]) -> Result<()> {
    validate_keys(vars.iter().map(|(key, _)| key.as_str()))?;

    let mut lines = read_lines(path)?;
    for (key, value) in vars {
        let rendered = render_export(key, value);
        let existing = lines
            .iter()
            .position(|line| parse_export_line(line).is_some_and(|(k, _)| &k == key));
        match existing {
            Some(index) => lines[index] = rendered,
            None => lines.push(rendered),
        }
    }

    write_lines(path, &lines)
}

/// Removes the export lines for the given keys, returning how many were
/// actually present.
pub fn unset_vars(path: &Path, keys: &[String]) -> Result<usize> {
    validate_keys(keys.iter().map(String::as_str))?;

    let mut lines = read_lines(path)?;
    let before = lines.len();
    lines.retain(|line| {
        parse_export_line(line).is_none_or(|(key, _)| !keys.iter().any(|k| k == &key))
    });
    let removed = before - lines.len();

    if removed > 0 {
        write_lines(path, &lines)?;
    }
    Ok(removed)
}

/// The export lines of a payload, in file order.
pub fn list_vars(path: &Path) -> Result<Vec<(String, String)>> {
    let lines = read_lines(path)?;
    Ok(lines
        .iter()
        .filter_map(|line| parse_export_line(line))
        .collect())
}

pub fn mask_secret(value: &str) -> String {
    if value.len() <= 8 {
        "*".repeat(value.len())
    } else {
        format!("{}...{}", &value[..4], &value[value.len() - 4..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn is_valid_env_key_accepts_usual_names() {
        assert!(is_valid_env_key("HTTP_PROXY"));
        assert!(is_valid_env_key("_private"));
        assert!(is_valid_env_key("EDITOR2"));
    }

    #[test]
    fn is_valid_env_key_rejects_bad_names() {
        assert!(!is_valid_env_key(""));
        assert!(!is_valid_env_key("2ND"));
        assert!(!is_valid_env_key("BAD-KEY"));
        assert!(!is_valid_env_key("SPACED KEY"));
    }

    #[test]
    fn set_vars_creates_payload() {
        let temp = TempDir::new().expect("temp dir");
        let payload = temp.path().join("activate");

        set_vars(
            &payload,
            &[("HTTP_PROXY".to_string(), "http://proxy:3128".to_string())],
        )
        .unwrap();

        let content = fs::read_to_string(&payload).unwrap();
        assert_eq!(content, "export HTTP_PROXY='http://proxy:3128'\n");
    }

    #[test]
    fn set_vars_replaces_in_place_and_appends() {
        let temp = TempDir::new().expect("temp dir");
        let payload = temp.path().join("activate");
        fs::write(
            &payload,
            "#!/bin/sh\nexport A='1'\n# keep me\nexport B='2'\n",
        )
        .unwrap();

        set_vars(
            &payload,
            &[
                ("A".to_string(), "changed".to_string()),
                ("C".to_string(), "3".to_string()),
            ],
        )
        .unwrap();

        let content = fs::read_to_string(&payload).unwrap();
        assert_eq!(
            content,
            "#!/bin/sh\nexport A='changed'\n# keep me\nexport B='2'\nexport C='3'\n"
        );
    }

    #[test]
    fn set_vars_round_trips_single_quotes() {
        let temp = TempDir::new().expect("temp dir");
        let payload = temp.path().join("activate");

        set_vars(&payload, &[("MOTD".to_string(), "it's fine".to_string())]).unwrap();

        let vars = list_vars(&payload).unwrap();
        assert_eq!(vars, vec![("MOTD".to_string(), "it's fine".to_string())]);
    }

    #[test]
    fn set_vars_rejects_invalid_keys_listing_all() {
        let temp = TempDir::new().expect("temp dir");
        let payload = temp.path().join("activate");

        let result = set_vars(
            &payload,
            &[
                ("BAD-KEY".to_string(), "1".to_string()),
                ("2ND".to_string(), "2".to_string()),
            ],
        );

        match result {
            Err(ShctxError::InvalidVarName { name }) => {
                assert_eq!(name, "2ND, BAD-KEY");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!payload.exists());
    }

    #[test]
    fn unset_vars_removes_only_named_keys() {
        let temp = TempDir::new().expect("temp dir");
        let payload = temp.path().join("activate");
        fs::write(&payload, "export A='1'\nexport B='2'\necho sourced\n").unwrap();

        let removed = unset_vars(&payload, &["A".to_string(), "MISSING".to_string()]).unwrap();
        assert_eq!(removed, 1);

        let content = fs::read_to_string(&payload).unwrap();
        assert_eq!(content, "export B='2'\necho sourced\n");
    }

    #[test]
    fn list_vars_skips_non_export_lines() {
        let temp = TempDir::new().expect("temp dir");
        let payload = temp.path().join("activate");
        fs::write(
            &payload,
            "#!/bin/sh\nexport A='1'\nalias ll='ls -l'\nexport B=plain\n",
        )
        .unwrap();

        let vars = list_vars(&payload).unwrap();
        assert_eq!(
            vars,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "plain".to_string()),
            ]
        );
    }

    #[test]
    fn mask_secret_hides_short_and_long_values() {
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret("sk-1234567890"), "sk-1...7890");
    }
}
