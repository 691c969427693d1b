//! Import validation
//!
//! An import replaces the whole collection, so it is all-or-nothing: the
//! document must be a JSON array whose every element looks like a category
//! and whose every site decodes, or nothing is accepted.

use serde_json::Value;
use thiserror::Error;

use super::types::{Category, Collection, Site};

/// Why an import document was rejected
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Document is not a JSON array")]
    NotAnArray,

    #[error("Category #{index} is invalid: {reason}")]
    InvalidCategory { index: usize, reason: String },

    #[error("Site #{index} in category '{category}' is invalid: {reason}")]
    InvalidSite {
        category: String,
        index: usize,
        reason: String,
    },
}

/// Check the minimum category shape: object with string `id`, `name`,
/// `icon` and an array `sites`.
pub fn check_category_shape(value: &Value) -> Result<(), String> {
    let Some(obj) = value.as_object() else {
        return Err("not an object".to_string());
    };
    for field in ["id", "name", "icon"] {
        match obj.get(field) {
            Some(Value::String(_)) => {}
            Some(_) => return Err(format!("'{}' is not a string", field)),
            None => return Err(format!("missing '{}'", field)),
        }
    }
    match obj.get("sites") {
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err("'sites' is not an array".to_string()),
        None => Err("missing 'sites'".to_string()),
    }
}

/// Parse and validate an import document
pub fn parse_collection(json: &str) -> Result<Collection, ImportError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray);
    };

    for (index, item) in items.iter().enumerate() {
        check_category_shape(item)
            .map_err(|reason| ImportError::InvalidCategory { index, reason })?;
    }

    let mut categories = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let category = decode_category(item).map_err(|e| match e {
            DecodeFailure::Category(reason) => ImportError::InvalidCategory { index, reason },
            DecodeFailure::Site {
                category,
                index,
                reason,
            } => ImportError::InvalidSite {
                category,
                index,
                reason,
            },
        })?;
        categories.push(category);
    }

    Ok(categories)
}

enum DecodeFailure {
    Category(String),
    Site {
        category: String,
        index: usize,
        reason: String,
    },
}

fn decode_category(mut item: Value) -> Result<Category, DecodeFailure> {
    let category_id = item["id"].as_str().unwrap_or_default().to_string();
    let raw_sites = match item.get_mut("sites") {
        Some(Value::Array(sites)) => std::mem::take(sites),
        _ => Vec::new(),
    };

    let mut sites = Vec::with_capacity(raw_sites.len());
    for (index, raw) in raw_sites.into_iter().enumerate() {
        let site: Site = serde_json::from_value(raw).map_err(|e| DecodeFailure::Site {
            category: category_id.clone(),
            index,
            reason: e.to_string(),
        })?;
        sites.push(site);
    }

    let mut category: Category =
        serde_json::from_value(item).map_err(|e| DecodeFailure::Category(e.to_string()))?;
    category.sites = sites;
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::default_categories;

    #[test]
    fn test_accepts_exported_document() {
        let cats = default_categories();
        let json = serde_json::to_string_pretty(&cats).unwrap();
        let parsed = parse_collection(&json).unwrap();
        assert_eq!(parsed, cats);
    }

    #[test]
    fn test_accepts_empty_array() {
        assert!(parse_collection("[]").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            parse_collection("{not json"),
            Err(ImportError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_object_document() {
        assert!(matches!(
            parse_collection(r#"{"id":"a"}"#),
            Err(ImportError::NotAnArray)
        ));
    }

    #[test]
    fn test_rejects_missing_icon() {
        let json = r#"[
            {"id":"a","name":"A","icon":"x","sites":[]},
            {"id":"b","name":"B","sites":[]}
        ]"#;
        match parse_collection(json) {
            Err(ImportError::InvalidCategory { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("icon"));
            }
            other => panic!("expected InvalidCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_string_name() {
        let json = r#"[{"id":"a","name":3,"icon":"x","sites":[]}]"#;
        assert!(matches!(
            parse_collection(json),
            Err(ImportError::InvalidCategory { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_sites_not_array() {
        let json = r#"[{"id":"a","name":"A","icon":"x","sites":{}}]"#;
        assert!(parse_collection(json).is_err());
    }

    #[test]
    fn test_rejects_malformed_site() {
        let json = r#"[{"id":"a","name":"A","icon":"x","sites":[{"id":"s","name":"S"}]}]"#;
        match parse_collection(json) {
            Err(ImportError::InvalidSite {
                category, index, ..
            }) => {
                assert_eq!(category, "a");
                assert_eq!(index, 0);
            }
            other => panic!("expected InvalidSite, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_category_ids_not_rejected() {
        let json = r#"[
            {"id":"a","name":"A","icon":"x","sites":[]},
            {"id":"a","name":"A again","icon":"y","sites":[]}
        ]"#;
        assert_eq!(parse_collection(json).unwrap().len(), 2);
    }
}
