// src/github/resolve.rs
// =============================================================================
// Walks a fixed path of keys through a parsed JSON document.
//
// The branches endpoint buries the tree URL four objects deep
// (commit -> commit -> tree -> url). Instead of chaining index lookups and
// hoping for the best, the caller declares the whole path up front and gets
// back either the value or one precise error:
//
//   PathNotFound  - a key along the path is missing
//   TypeMismatch  - a step is not an object, or the terminal has the wrong type
// =============================================================================

use serde_json::Value;

use crate::error::{ApiError, Result};

/// Returns the string at the end of `path`.
pub fn resolve_field(doc: &Value, path: &[&str]) -> Result<String> {
    match resolve_value(doc, path)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(mismatch(path, "a string")),
    }
}

/// Returns the array at the end of `path`.
pub fn resolve_array<'a>(doc: &'a Value, path: &[&str]) -> Result<&'a Vec<Value>> {
    resolve_value(doc, path)?
        .as_array()
        .ok_or_else(|| mismatch(path, "an array"))
}

/// Returns whatever value sits at the end of `path`, of any type.
pub fn resolve_value<'a>(doc: &'a Value, path: &[&str]) -> Result<&'a Value> {
    let mut current = doc;

    for (depth, key) in path.iter().enumerate() {
        let object = current
            .as_object()
            .ok_or_else(|| mismatch(&path[..depth], "an object"))?;

        current = object.get(*key).ok_or_else(|| ApiError::PathNotFound {
            path: dotted(&path[..=depth]),
        })?;
    }

    Ok(current)
}

/// Re-roots the path of a resolve error under `prefix`, e.g. `size` under
/// `tree[3]` becomes `tree[3].size`. Other errors pass through untouched.
pub fn under(prefix: &str, err: ApiError) -> ApiError {
    let rebase = |path: String| {
        if path == "$" {
            prefix.to_string()
        } else {
            format!("{}.{}", prefix, path)
        }
    };

    match err {
        ApiError::PathNotFound { path } => ApiError::PathNotFound { path: rebase(path) },
        ApiError::TypeMismatch { path, expected } => ApiError::TypeMismatch {
            path: rebase(path),
            expected,
        },
        other => other,
    }
}

fn mismatch(path: &[&str], expected: &'static str) -> ApiError {
    ApiError::TypeMismatch {
        path: dotted(path),
        expected,
    }
}

// The root document is reported as "$"
fn dotted(path: &[&str]) -> String {
    if path.is_empty() {
        "$".to_string()
    } else {
        path.join(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TREE_URL_PATH: [&str; 4] = ["commit", "commit", "tree", "url"];

    #[test]
    fn test_resolves_nested_string() {
        let doc = json!({
            "name": "main",
            "commit": {"sha": "abc", "commit": {"tree": {"sha": "def", "url": "https://t/def"}}}
        });
        assert_eq!(resolve_field(&doc, &TREE_URL_PATH).unwrap(), "https://t/def");
    }

    #[test]
    fn test_missing_intermediate_key() {
        let doc = json!({"commit": {"sha": "abc"}});
        let err = resolve_field(&doc, &TREE_URL_PATH).unwrap_err();
        match err {
            ApiError::PathNotFound { path } => assert_eq!(path, "commit.commit"),
            other => panic!("expected PathNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_first_key() {
        let doc = json!({"message": "Branch not found"});
        let err = resolve_field(&doc, &TREE_URL_PATH).unwrap_err();
        assert!(matches!(err, ApiError::PathNotFound { ref path } if path == "commit"));
    }

    #[test]
    fn test_intermediate_not_an_object() {
        let doc = json!({"commit": {"commit": "oops"}});
        let err = resolve_field(&doc, &TREE_URL_PATH).unwrap_err();
        match err {
            ApiError::TypeMismatch { path, expected } => {
                assert_eq!(path, "commit.commit");
                assert_eq!(expected, "an object");
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_terminal_not_a_string() {
        let doc = json!({"commit": {"commit": {"tree": {"url": 42}}}});
        let err = resolve_field(&doc, &TREE_URL_PATH).unwrap_err();
        assert!(matches!(err, ApiError::TypeMismatch { expected: "a string", .. }));
    }

    #[test]
    fn test_root_not_an_object() {
        let doc = json!([1, 2, 3]);
        let err = resolve_field(&doc, &["commit"]).unwrap_err();
        assert!(matches!(err, ApiError::TypeMismatch { ref path, .. } if path == "$"));
    }

    #[test]
    fn test_null_terminal_is_mismatch_not_default() {
        let doc = json!({"a": {"b": null}});
        assert!(matches!(
            resolve_field(&doc, &["a", "b"]),
            Err(ApiError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_resolve_array() {
        let doc = json!({"tree": [{"path": "a"}], "sha": "x"});
        assert_eq!(resolve_array(&doc, &["tree"]).unwrap().len(), 1);
        assert!(matches!(
            resolve_array(&doc, &["sha"]),
            Err(ApiError::TypeMismatch { expected: "an array", .. })
        ));
    }

    #[test]
    fn test_under_rebases_paths() {
        let doc = json!({"path": "a"});
        let err = under("tree[2]", resolve_field(&doc, &["size"]).unwrap_err());
        assert!(matches!(err, ApiError::PathNotFound { ref path } if path == "tree[2].size"));

        let err = under("tree[0]", resolve_field(&json!(7), &["path"]).unwrap_err());
        assert!(matches!(err, ApiError::TypeMismatch { ref path, .. } if path == "tree[0]"));
    }

    #[test]
    fn test_empty_path_returns_root() {
        let doc = json!("just a string");
        assert_eq!(resolve_field(&doc, &[]).unwrap(), "just a string");
    }
}
