//! Checked field access over a JSON object.
//!
//! Tag dispatch and the plain scalars are read here; payloads with a fixed
//! shape go through their serde impls via `parse`. Every accessor reports
//! failures as a `DecodeError` naming the entity kind, the dotted field path
//! and the offending fragment.

use crate::error::DecodeError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub(crate) struct Fields<'a> {
    kind: &'static str,
    path: String,
    raw: &'a Value,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn of(kind: &'static str, raw: &'a Value) -> Result<Self, DecodeError> {
        Self::at(kind, String::new(), raw)
    }

    fn at(kind: &'static str, path: String, raw: &'a Value) -> Result<Self, DecodeError> {
        match raw.as_object() {
            Some(map) => Ok(Self {
                kind,
                path,
                raw,
                map,
            }),
            None => {
                let field = if path.is_empty() { "<root>".to_string() } else { path };
                Err(DecodeError::new(kind, field, "is not an object", raw))
            }
        }
    }

    fn path_of(&self, field: &str) -> String {
        if self.path.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.path, field)
        }
    }

    fn error(&self, field: &str, reason: impl Into<String>) -> DecodeError {
        DecodeError::new(self.kind, self.path_of(field), reason, self.raw)
    }

    fn missing(&self, field: &str) -> DecodeError {
        DecodeError::missing(self.kind, self.path_of(field), self.raw)
    }

    /// Present with a non-null value.
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|value| !value.is_null())
    }

    pub fn required(&self, field: &str) -> Result<&'a Value, DecodeError> {
        self.get(field).ok_or_else(|| self.missing(field))
    }

    pub fn str(&self, field: &str) -> Result<&'a str, DecodeError> {
        self.opt_str(field)?.ok_or_else(|| self.missing(field))
    }

    pub fn opt_str(&self, field: &str) -> Result<Option<&'a str>, DecodeError> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| self.error(field, "is not a string")),
        }
    }

    pub fn opt_string(&self, field: &str) -> Result<Option<String>, DecodeError> {
        Ok(self.opt_str(field)?.map(str::to_string))
    }

    pub fn bool_or(&self, field: &str, default: bool) -> Result<bool, DecodeError> {
        match self.get(field) {
            None => Ok(default),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| self.error(field, "is not a boolean")),
        }
    }

    pub fn array(&self, field: &str) -> Result<&'a [Value], DecodeError> {
        self.required(field)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.error(field, "is not an array"))
    }

    /// Absent and null both read as an empty list.
    pub fn array_or_empty(&self, field: &str) -> Result<&'a [Value], DecodeError> {
        match self.get(field) {
            None => Ok(&[]),
            Some(_) => self.array(field),
        }
    }

    pub fn object(&self, field: &str) -> Result<Fields<'a>, DecodeError> {
        Fields::at(self.kind, self.path_of(field), self.required(field)?)
    }

    /// A present, non-null field read through its serde impl.
    pub fn parse<T: DeserializeOwned>(&self, field: &str) -> Result<T, DecodeError> {
        self.deserialize(field, self.required(field)?)
    }

    /// Like `parse`, with absent and null both reading as `None`.
    pub fn opt_parse<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>, DecodeError> {
        self.get(field)
            .map(|value| self.deserialize(field, value))
            .transpose()
    }

    fn deserialize<T: DeserializeOwned>(
        &self,
        field: &str,
        value: &'a Value,
    ) -> Result<T, DecodeError> {
        T::deserialize(value).map_err(|e| self.error(field, e.to_string()))
    }

    /// The variant tag of a tagged union.
    ///
    /// Reads `type` when present. Request-shaped objects have no `type`, so
    /// the tag is then inferred from the single payload key among `known`.
    pub fn discriminator(&self, known: &[&'static str]) -> Result<&'a str, DecodeError> {
        if self.get("type").is_some() {
            return self.str("type");
        }
        let mut present = known.iter().copied().filter(|key| self.map.contains_key(*key));
        match (present.next(), present.next()) {
            (Some(key), None) => Ok(key),
            (Some(_), Some(_)) => Err(self.error("type", "is missing and ambiguous")),
            (None, _) => Err(self.missing("type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DateOrDateRange, Number};
    use serde_json::json;

    #[test]
    fn nested_errors_carry_the_dotted_path() {
        let raw = json!({"number": {"format": 4}});
        let fields = Fields::of("property spec", &raw).unwrap();
        let err = fields.object("number").unwrap().str("format").unwrap_err();
        assert_eq!(err.field, "number.format");
        assert_eq!(err.kind, "property spec");
    }

    #[test]
    fn null_reads_as_absent() {
        let raw = json!({"url": null, "list": null});
        let fields = Fields::of("page", &raw).unwrap();
        assert_eq!(fields.opt_str("url").unwrap(), None);
        assert!(fields.array_or_empty("list").unwrap().is_empty());
        assert!(fields.required("url").is_err());
    }

    #[test]
    fn discriminator_is_inferred_from_single_payload_key() {
        let known = ["number", "checkbox"];
        let tagged = json!({"type": "rollup", "rollup": {}});
        let request = json!({"number": 4});
        let ambiguous = json!({"number": 4, "checkbox": true});
        let neither = json!({"id": "x"});

        let tag = |raw: &Value| {
            Fields::of("property value", raw)
                .unwrap()
                .discriminator(&known)
                .map(str::to_string)
        };
        assert_eq!(tag(&tagged).unwrap(), "rollup");
        assert_eq!(tag(&request).unwrap(), "number");
        assert!(tag(&ambiguous).is_err());
        assert!(tag(&neither).is_err());
    }

    #[test]
    fn parse_reads_payloads_through_serde() {
        let raw = json!({
            "date": {"start": "2024-03-01", "end": null, "time_zone": null},
            "number": "four",
            "empty": null
        });
        let fields = Fields::of("page", &raw).unwrap();

        let date: DateOrDateRange = fields.parse("date").unwrap();
        assert!(!date.is_range());
        assert_eq!(date.time_zone, None);
        assert_eq!(fields.opt_parse::<DateOrDateRange>("empty").unwrap(), None);

        let err = fields.parse::<Number>("number").unwrap_err();
        assert_eq!(err.field, "number");
        assert!(err.reason.contains("four"));
        assert_eq!(fields.parse::<Number>("empty").unwrap_err().reason, "is missing");
    }
}
