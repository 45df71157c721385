use super::ValidationError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// A numeric value as it travels on the wire.
///
/// Integers stay integers so `4` is sent as `4` and not `4.0`. Floats must be
/// finite: JSON has no NaN or infinity, and sending `null` would clear the
/// property. No range checking happens here; the API owns that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number(Repr);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Repr {
    Int(i64),
    Float(f64),
}

impl Number {
    pub const fn int(n: i64) -> Self {
        Number(Repr::Int(n))
    }

    pub fn float(n: f64) -> Result<Self, ValidationError> {
        if n.is_finite() {
            Ok(Number(Repr::Float(n)))
        } else {
            Err(ValidationError::NonFiniteNumber(n))
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.0 {
            Repr::Int(n) => Some(n),
            Repr::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self.0 {
            Repr::Int(n) => n as f64,
            Repr::Float(n) => n,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.0, Repr::Int(_))
    }

    pub(crate) fn to_json(self) -> Value {
        match self.0 {
            Repr::Int(n) => Value::from(n),
            // Finite by construction, so never null
            Repr::Float(n) => Value::from(n),
        }
    }

    pub(crate) fn from_json(value: &serde_json::Number) -> Option<Self> {
        if let Some(n) = value.as_i64() {
            Some(Number::int(n))
        } else {
            value.as_f64().and_then(|n| Number::float(n).ok())
        }
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(n: $t) -> Self {
                Number::int(i64::from(n))
            }
        })*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl TryFrom<f64> for Number {
    type Error = ValidationError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        Number::float(n)
    }
}

impl TryFrom<f32> for Number {
    type Error = ValidationError;

    fn try_from(n: f32) -> Result<Self, Self::Error> {
        Number::float(f64::from(n))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Repr::Int(n) => write!(f, "{}", n),
            Repr::Float(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Repr::Int(n) => serializer.serialize_i64(n),
            Repr::Float(n) => serializer.serialize_f64(n),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        Number::from_json(&number)
            .ok_or_else(|| de::Error::custom(format!("{} is not a representable number", number)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn integers_stay_integers_on_the_wire() {
        assert_eq!(Number::from(4).to_json(), json!(4));
        assert_eq!(Number::float(4.5).unwrap().to_json(), json!(4.5));
    }

    #[test]
    fn reading_back_prefers_integers() {
        let int = serde_json::Number::from(7);
        assert_eq!(Number::from_json(&int), Some(Number::int(7)));
        assert_eq!(Number::from_json(&int).unwrap().as_i64(), Some(7));

        let float = serde_json::Number::from_f64(0.25).unwrap();
        assert_eq!(Number::from_json(&float), Some(Number::float(0.25).unwrap()));
        assert!(!Number::from_json(&float).unwrap().is_integer());
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert_eq!(
            Number::float(f64::NAN).unwrap_err().to_string(),
            "Number must be finite, got NaN"
        );
        assert_eq!(
            Number::try_from(f64::INFINITY),
            Err(ValidationError::NonFiniteNumber(f64::INFINITY))
        );
        assert!(Number::try_from(f32::NEG_INFINITY).is_err());
        assert_eq!(Number::try_from(1.5_f32).unwrap().to_json(), json!(1.5));
    }

    #[test]
    fn serde_matches_the_wire_form() {
        let legs: Number = serde_json::from_value(json!(8)).unwrap();
        assert_eq!(legs, Number::int(8));
        assert_eq!(serde_json::to_value(legs).unwrap(), json!(8));

        let err = serde_json::from_value::<Number>(json!("eight")).unwrap_err();
        assert!(err.to_string().contains("eight"));
    }
}
