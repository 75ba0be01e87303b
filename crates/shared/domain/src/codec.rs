//! Forward-compatible enum codec.
//!
//! Every vocabulary is a closed set of named ordinals with two designated members:
//! the zero value (`<PREFIX>_UNSPECIFIED`, ordinal `0`, "not set") and the sentinel
//! (`UNRECOGNIZED`, ordinal `-1`, "present but unknown to this build").
//!
//! Decoding never fails. A known ordinal or an exact, case-sensitive known name maps to
//! its value; everything else (unknown integers, unknown strings, `null`, an absent
//! field, floats, booleans, arrays, objects) maps to the sentinel. Unknown integers are
//! never passed through, whatever the vocabulary. Encoding is total: any `i32` yields a
//! name, with unknown ordinals encoding as `UNRECOGNIZED`.
//!
//! | Input                   | `Engine` decodes to          |
//! |-------------------------|------------------------------|
//! | `2` / `"MYSQL"`         | `Engine::Mysql`              |
//! | `0`                     | `Engine::Unspecified`        |
//! | `-1` / `"UNRECOGNIZED"` | `Engine::Unrecognized`       |
//! | `42`, `"mysql"`, `null` | `Engine::Unrecognized`       |

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::{Deserializer, Serializer};
use serde_json::Value;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::marker::PhantomData;
use tracing::trace;

/// Wire name of the sentinel, shared by every vocabulary.
pub const UNRECOGNIZED: &str = "UNRECOGNIZED";

/// Ordinal of the sentinel, shared by every vocabulary.
pub const UNRECOGNIZED_ORDINAL: i32 = -1;

/// A raw enum field as it arrived on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireValue<'a> {
    /// The field was not present at all.
    Absent,
    /// Explicit JSON `null`.
    Null,
    Int(i64),
    Str(&'a str),
    /// Any other JSON shape (bool, fractional number, array, object).
    Other,
}

impl From<i32> for WireValue<'_> {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for WireValue<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for WireValue<'_> {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Other, Self::Int)
    }
}

impl<'a> From<&'a str> for WireValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for WireValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value.as_str())
    }
}

impl<'a, T: Into<WireValue<'a>>> From<Option<T>> for WireValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

impl<'a> From<&'a Value> for WireValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::Str(s.as_str()),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(integral))
                .map_or(Self::Other, Self::Int),
            Value::Bool(_) | Value::Array(_) | Value::Object(_) => Self::Other,
        }
    }
}

/// JSON numbers such as `2.0` still name ordinal `2`.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral(value: f64) -> Option<i64> {
    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&value);
    (in_range && value.fract() == 0.0).then(|| value as i64)
}

/// A closed wire vocabulary, normally implemented by `#[wire_enum]`.
pub trait WireEnum: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Vocabulary name used in diagnostics, e.g. `"Engine"`.
    const TYPE_NAME: &'static str;
    /// The ordinal-0 "not set" value.
    const UNSPECIFIED: Self;
    /// The ordinal `-1` "present but unknown" value.
    const UNRECOGNIZED: Self;
    /// Every named member in declaration order, excluding the sentinel.
    const VARIANTS: &'static [Self];

    fn ordinal(self) -> i32;

    /// Canonical wire name.
    fn name(self) -> &'static str;

    /// Exact ordinal lookup; `-1` resolves to the sentinel.
    fn from_ordinal(ordinal: i32) -> Option<Self>;

    /// Exact, case-sensitive name lookup; `"UNRECOGNIZED"` resolves to the sentinel.
    fn from_name(name: &str) -> Option<Self>;

    /// Decodes any wire input. Total: unknown input becomes [`WireEnum::UNRECOGNIZED`].
    fn decode<'a>(input: impl Into<WireValue<'a>>) -> Self {
        let input = input.into();
        let known = match input {
            WireValue::Int(raw) => i32::try_from(raw).ok().and_then(Self::from_ordinal),
            WireValue::Str(raw) => Self::from_name(raw),
            WireValue::Absent | WireValue::Null | WireValue::Other => None,
        };

        known.unwrap_or_else(|| {
            trace!(vocabulary = Self::TYPE_NAME, input = ?input, "Unrecognized wire value");
            Self::UNRECOGNIZED
        })
    }

    /// Decodes a JSON value that was already parsed.
    fn decode_json(value: &Value) -> Self {
        Self::decode(value)
    }

    /// Canonical wire name of this value.
    fn encode(self) -> &'static str {
        self.name()
    }

    /// Encodes a raw ordinal. Total: unknown ordinals encode as `"UNRECOGNIZED"`.
    fn encode_ordinal(ordinal: i32) -> &'static str {
        Self::from_ordinal(ordinal).map_or(UNRECOGNIZED, Self::name)
    }

    fn is_recognized(self) -> bool {
        self != Self::UNRECOGNIZED
    }

    fn is_unspecified(self) -> bool {
        self == Self::UNSPECIFIED
    }

    /// `(ordinal, name)` rows of the vocabulary, sentinel first.
    fn table() -> Vec<(i32, &'static str)> {
        std::iter::once(Self::UNRECOGNIZED)
            .chain(Self::VARIANTS.iter().copied())
            .map(|v| (v.ordinal(), v.name()))
            .collect()
    }
}

/// Checks that an entity payload is a JSON object before it reaches a derived `Deserialize`.
///
/// Derived struct impls also accept arrays as positional fields; entity payloads are
/// keyed by field name only.
///
/// # Errors
/// Returns an `invalid_type` error naming `expected` for any other JSON shape.
pub fn expect_object<'a>(
    payload: &'a Value,
    expected: &'static str,
) -> Result<&'a serde_json::Map<String, Value>, serde_json::Error> {
    let unexpected = match payload {
        Value::Object(map) => return Ok(map),
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
    };
    Err(de::Error::invalid_type(unexpected, &expected))
}

/// Serializes a vocabulary value as its canonical name.
///
/// # Errors
/// Only the errors of the underlying serializer.
pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: WireEnum,
    S: Serializer,
{
    serializer.serialize_str(value.name())
}

/// Deserializes a vocabulary value from any self-describing input.
///
/// No input shape is rejected: values the vocabulary does not know become the
/// sentinel. Structurally broken input (e.g. invalid JSON) still fails in the
/// underlying deserializer.
///
/// # Errors
/// Only the errors of the underlying deserializer.
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: WireEnum,
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(WireEnumVisitor::<T>(PhantomData))
}

struct WireEnumVisitor<T>(PhantomData<T>);

impl<'de, T: WireEnum> Visitor<'de> for WireEnumVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {} name or ordinal", T::TYPE_NAME)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<T, E> {
        Ok(T::decode(WireValue::Other))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        Ok(T::decode(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        Ok(T::decode(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<T, E> {
        Ok(T::decode(integral(v).map_or(WireValue::Other, WireValue::Int)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        Ok(T::decode(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<T, E> {
        Ok(T::decode(std::str::from_utf8(v).map_or(WireValue::Other, WireValue::Str)))
    }

    fn visit_none<E: de::Error>(self) -> Result<T, E> {
        Ok(T::decode(WireValue::Null))
    }

    fn visit_unit<E: de::Error>(self) -> Result<T, E> {
        Ok(T::decode(WireValue::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<T, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<T, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(T::decode(WireValue::Other))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<T, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(T::decode(WireValue::Other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_values_from_json() {
        assert_eq!(WireValue::from(&json!(null)), WireValue::Null);
        assert_eq!(WireValue::from(&json!(3)), WireValue::Int(3));
        assert_eq!(WireValue::from(&json!(3.0)), WireValue::Int(3));
        assert_eq!(WireValue::from(&json!(3.5)), WireValue::Other);
        assert_eq!(WireValue::from(&json!("CSV")), WireValue::Str("CSV"));
        assert_eq!(WireValue::from(&json!(true)), WireValue::Other);
        assert_eq!(WireValue::from(&json!([1])), WireValue::Other);
        assert_eq!(WireValue::from(&json!({"a": 1})), WireValue::Other);
    }

    #[test]
    fn wire_values_from_rust() {
        assert_eq!(WireValue::from(None::<i32>), WireValue::Absent);
        assert_eq!(WireValue::from(Some("ACTIVE")), WireValue::Str("ACTIVE"));
        assert_eq!(WireValue::from(u64::MAX), WireValue::Other);
        assert_eq!(WireValue::from(-1_i32), WireValue::Int(-1));
    }

    #[test]
    fn only_objects_pass_the_payload_check() {
        assert!(expect_object(&json!({"name": "x"}), "an entity object").is_ok());

        let err = expect_object(&json!(["x"]), "an entity object").unwrap_err();
        assert_eq!(err.to_string(), "invalid type: sequence, expected an entity object");
        assert!(expect_object(&json!(null), "an entity object").is_err());
        assert!(expect_object(&json!("x"), "an entity object").is_err());
        assert!(expect_object(&json!(7), "an entity object").is_err());
    }

    #[test]
    fn integral_rejects_out_of_range_and_fractions() {
        assert_eq!(integral(-1.0), Some(-1));
        assert_eq!(integral(0.5), None);
        assert_eq!(integral(1e12), None);
        assert_eq!(integral(f64::NAN), None);
    }
}
