//! Shape validation for untrusted API payloads
//!
//! The upstream service is a third party whose responses can change shape at
//! any time, so every field this crate consumes is checked before use.
//! Validation is declarative (a [`Contract`] lists the required fields and
//! what each must hold) and all-or-nothing: one mismatched field rejects the
//! whole value with a [`ShapeMismatch`] and no partial result.
//!
//! On top of the generic contract layer sit the two typed products the rest
//! of the crate works with, [`WorkSummary`] and [`WorkDetail`], so downstream
//! code never handles raw [`serde_json::Value`]s directly.

use crate::error::ShapeMismatch;
use serde_json::Value;

/// Requirement a single field must satisfy
#[derive(Debug, Clone)]
pub enum FieldRule {
    /// The field must hold any string
    Str,
    /// The field must hold exactly this string literal
    StrEquals(String),
    /// The field must hold an empty array
    EmptyArray,
}

/// Declarative description of the fields an object must expose
///
/// ```
/// use corpus_dl::shape::{Contract, FieldRule};
/// use serde_json::json;
///
/// let contract = Contract::new().field("slug", FieldRule::Str);
/// assert!(contract.check(&json!({"slug": "pan-tadeusz"})).is_ok());
/// assert!(contract.check(&json!({"slug": 7})).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Contract {
    rules: Vec<(String, FieldRule)>,
}

impl Contract {
    /// Create an empty contract
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required field to the contract
    pub fn field(mut self, name: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.push((name.into(), rule));
        self
    }

    /// Check `value` against the contract
    ///
    /// Returns a [`Checked`] view on success. Any missing field, wrong type,
    /// literal mismatch, or non-empty array rejects the whole value.
    pub fn check<'a>(&self, value: &'a Value) -> Result<Checked<'a>, ShapeMismatch> {
        let object = value.as_object().ok_or(ShapeMismatch::NotAnObject)?;

        for (name, rule) in &self.rules {
            let field = object.get(name).ok_or_else(|| ShapeMismatch::MissingField {
                field: name.clone(),
            })?;

            match rule {
                FieldRule::Str => {
                    if !field.is_string() {
                        return Err(ShapeMismatch::WrongType {
                            field: name.clone(),
                            expected: "string",
                        });
                    }
                }
                FieldRule::StrEquals(expected) => {
                    let actual = field.as_str().ok_or_else(|| ShapeMismatch::WrongType {
                        field: name.clone(),
                        expected: "string",
                    })?;
                    if actual != expected {
                        return Err(ShapeMismatch::LiteralMismatch {
                            field: name.clone(),
                            expected: expected.clone(),
                            actual: actual.to_string(),
                        });
                    }
                }
                FieldRule::EmptyArray => {
                    let items = field.as_array().ok_or_else(|| ShapeMismatch::WrongType {
                        field: name.clone(),
                        expected: "array",
                    })?;
                    if !items.is_empty() {
                        return Err(ShapeMismatch::NotEmpty {
                            field: name.clone(),
                        });
                    }
                }
            }
        }

        Ok(Checked { object })
    }
}

/// View over an object that passed a [`Contract`] check
#[derive(Debug, Clone, Copy)]
pub struct Checked<'a> {
    object: &'a serde_json::Map<String, Value>,
}

impl<'a> Checked<'a> {
    /// Read a string field by name
    pub fn str_field(&self, name: &str) -> Result<&'a str, ShapeMismatch> {
        self.object
            .get(name)
            .ok_or_else(|| ShapeMismatch::MissingField {
                field: name.to_string(),
            })?
            .as_str()
            .ok_or_else(|| ShapeMismatch::WrongType {
                field: name.to_string(),
                expected: "string",
            })
    }
}

/// One entry of an author's works list: just the work's identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkSummary {
    /// Identifier used to build the work's detail URL
    pub slug: String,
}

/// A single work that passed the detail contract
///
/// Produced by the metadata phase, where the `txt` field holds a URL to the
/// work's plain-text body. The raw body text fetched from that URL in the
/// download phase is a different thing and never flows through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDetail {
    /// URL of the work's downloadable plain-text body
    pub body_url: String,
}

/// Validate a works-list payload
///
/// The value must be an array whose every entry exposes a string `slug`.
/// Any malformed entry rejects the whole list: a malformed top-level listing
/// means nothing downstream can be trusted.
pub fn works_list(value: &Value) -> Result<Vec<WorkSummary>, ShapeMismatch> {
    let entries = value.as_array().ok_or(ShapeMismatch::NotAnArray)?;
    let contract = Contract::new().field("slug", FieldRule::Str);

    let mut works = Vec::with_capacity(entries.len());
    for entry in entries {
        let checked = contract.check(entry)?;
        works.push(WorkSummary {
            slug: checked.str_field("slug")?.to_string(),
        });
    }
    Ok(works)
}

/// Validate a work-detail payload against the configured language
///
/// Accepts only a single text: the work must carry exactly the expected
/// `language` literal, an empty `children` array (any child makes it a
/// collection, which is excluded entirely rather than partially processed),
/// and a string `txt` field holding the body URL.
pub fn work_detail(value: &Value, language: &str) -> Result<WorkDetail, ShapeMismatch> {
    let contract = Contract::new()
        .field("language", FieldRule::StrEquals(language.to_string()))
        .field("children", FieldRule::EmptyArray)
        .field("txt", FieldRule::Str);

    let checked = contract.check(value)?;
    Ok(WorkDetail {
        body_url: checked.str_field("txt")?.to_string(),
    })
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail(language: &str, children: Value, txt: Value) -> Value {
        json!({
            "language": language,
            "children": children,
            "txt": txt,
            "title": "Some Work",
        })
    }

    #[test]
    fn works_list_accepts_entries_with_slugs_in_order() {
        let value = json!([
            {"slug": "a", "title": "A"},
            {"slug": "b"},
            {"slug": "c", "extra": 42},
        ]);

        let works = works_list(&value).unwrap();
        let slugs: Vec<&str> = works.iter().map(|w| w.slug.as_str()).collect();
        assert_eq!(slugs, ["a", "b", "c"]);
    }

    #[test]
    fn works_list_rejects_non_array_payload() {
        assert_eq!(
            works_list(&json!({"slug": "a"})).unwrap_err(),
            ShapeMismatch::NotAnArray
        );
    }

    #[test]
    fn works_list_rejects_whole_list_on_one_bad_entry() {
        let value = json!([{"slug": "a"}, {"title": "no slug"}]);
        assert_eq!(
            works_list(&value).unwrap_err(),
            ShapeMismatch::MissingField {
                field: "slug".to_string()
            }
        );
    }

    #[test]
    fn works_list_rejects_non_string_slug() {
        let value = json!([{"slug": 7}]);
        assert_eq!(
            works_list(&value).unwrap_err(),
            ShapeMismatch::WrongType {
                field: "slug".to_string(),
                expected: "string"
            }
        );
    }

    #[test]
    fn work_detail_accepts_single_text_and_extracts_body_url() {
        let value = detail("pol", json!([]), json!("https://example.com/a.txt"));
        let work = work_detail(&value, "pol").unwrap();
        assert_eq!(work.body_url, "https://example.com/a.txt");
    }

    #[test]
    fn work_detail_rejects_language_mismatch() {
        let value = detail("eng", json!([]), json!("https://example.com/a.txt"));
        assert_eq!(
            work_detail(&value, "pol").unwrap_err(),
            ShapeMismatch::LiteralMismatch {
                field: "language".to_string(),
                expected: "pol".to_string(),
                actual: "eng".to_string(),
            }
        );
    }

    #[test]
    fn work_detail_rejects_collections_with_children() {
        let value = detail("pol", json!([{"href": "child"}]), json!("x"));
        assert_eq!(
            work_detail(&value, "pol").unwrap_err(),
            ShapeMismatch::NotEmpty {
                field: "children".to_string()
            }
        );
    }

    #[test]
    fn work_detail_rejects_missing_body_field() {
        let value = json!({"language": "pol", "children": []});
        assert_eq!(
            work_detail(&value, "pol").unwrap_err(),
            ShapeMismatch::MissingField {
                field: "txt".to_string()
            }
        );
    }

    #[test]
    fn work_detail_rejects_non_string_body_field() {
        let value = detail("pol", json!([]), json!(null));
        assert_eq!(
            work_detail(&value, "pol").unwrap_err(),
            ShapeMismatch::WrongType {
                field: "txt".to_string(),
                expected: "string"
            }
        );
    }

    #[test]
    fn work_detail_rejects_non_object_payload() {
        assert_eq!(
            work_detail(&json!(["not", "an", "object"]), "pol").unwrap_err(),
            ShapeMismatch::NotAnObject
        );
    }
}
