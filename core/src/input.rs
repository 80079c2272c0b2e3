use std::collections::HashMap;

use anyhow::{anyhow, Result};

/// A free-form command line split into a chore name and `key:value` fields.
#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub fields: HashMap<String, String>,
}

/// Splits words into a name and fields, expanding unambiguous key prefixes
/// against `known_keys` ("du:3d" becomes "due"). Words without a colon join
/// the name in order.
pub fn parse_input(args: &[String], known_keys: &[&str]) -> Result<ParsedInput> {
    let mut name_parts = Vec::new();
    let mut fields = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                fields.insert(expand_key(key, known_keys)?, value.to_string());
                continue;
            }
        }
        name_parts.push(arg.as_str());
    }

    Ok(ParsedInput {
        name: name_parts.join(" "),
        fields,
    })
}

fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|candidate| candidate.starts_with(key))
        .copied()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: &[&str] = &["due", "overdue", "description", "tag"];

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_name_and_fields() {
        let parsed = parse_input(
            &args(&["Water", "plants", "due:3d", "tag:garden"]),
            KEYS,
        )
        .unwrap();

        assert_eq!(parsed.name, "Water plants");
        assert_eq!(parsed.fields.get("due"), Some(&"3d".to_string()));
        assert_eq!(parsed.fields.get("tag"), Some(&"garden".to_string()));
    }

    #[test]
    fn test_key_prefixes_expand() {
        let parsed = parse_input(&args(&["Dust", "du:3d", "o:1d", "t:home"]), KEYS).unwrap();

        assert_eq!(parsed.fields.get("due"), Some(&"3d".to_string()));
        assert_eq!(parsed.fields.get("overdue"), Some(&"1d".to_string()));
        assert_eq!(parsed.fields.get("tag"), Some(&"home".to_string()));
    }

    #[test]
    fn test_ambiguous_and_unknown_keys_fail() {
        // "d" matches both "due" and "description".
        assert!(parse_input(&args(&["Dust", "d:3d"]), KEYS).is_err());
        assert!(parse_input(&args(&["Dust", "x:1"]), KEYS).is_err());
    }

    #[test]
    fn test_leading_colon_joins_the_name() {
        let parsed = parse_input(&args(&["Fix", ":thing"]), KEYS).unwrap();

        assert_eq!(parsed.name, "Fix :thing");
        assert!(parsed.fields.is_empty());
    }
}
