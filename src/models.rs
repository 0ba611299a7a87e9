use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{id, value}` pair used by the World Bank for country and indicator metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CodeName {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Raw entry from the World Bank response (position 1 array).
///
/// Every field is optional: the API is not consistent about which keys it sends,
/// and a record that is missing metadata is still usable as long as it has a value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    #[serde(default)]
    pub indicator: Option<CodeName>,
    #[serde(default)]
    pub country: Option<CodeName>,
    #[serde(default)]
    pub countryiso3code: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Either a JSON number, a numeric string, or null.
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default, rename = "obs_status")]
    pub obs_status: Option<String>,
}

/// Outcome of reading a record's `value` field.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueField {
    Number(f64),
    Missing,
    /// Present but not a decimal number (kept verbatim for the error message).
    Unparseable(String),
}

impl Entry {
    pub fn country_name(&self) -> Option<&str> {
        self.country.as_ref().and_then(|c| c.value.as_deref())
    }

    pub fn indicator_id(&self) -> Option<&str> {
        self.indicator.as_ref().and_then(|i| i.id.as_deref())
    }

    pub fn indicator_name(&self) -> Option<&str> {
        self.indicator.as_ref().and_then(|i| i.value.as_deref())
    }

    pub fn value_field(&self) -> ValueField {
        match &self.value {
            Value::Null => ValueField::Missing,
            Value::Number(n) => n
                .as_f64()
                .map(ValueField::Number)
                .unwrap_or_else(|| ValueField::Unparseable(n.to_string())),
            Value::String(s) => parse_decimal(s)
                .map(ValueField::Number)
                .unwrap_or_else(|| ValueField::Unparseable(s.clone())),
            other => ValueField::Unparseable(other.to_string()),
        }
    }
}

/// Parse a decimal number as reported by the upstream APIs (`"3.5"`, `" 12 "`, `"-0.4"`).
pub fn parse_decimal(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Pick the first record out of a World Bank body shaped `[meta, [records...]]`.
///
/// Anything that does not have that shape is treated as "no record".
pub fn first_record(body: &Value) -> Option<&Value> {
    body.as_array()
        .filter(|arr| arr.len() > 1)
        .and_then(|arr| arr[1].as_array())
        .and_then(|records| records.first())
}

/// A single FRED observation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    #[serde(default)]
    pub date: String,
    /// FRED encodes missing values as `"."`; `null` is read as `""`.
    #[serde(default, deserialize_with = "de_string_lenient")]
    pub value: String,
}

impl Observation {
    /// True when the observation carries an actual reading (not blank, not `"."`).
    pub fn has_value(&self) -> bool {
        !matches!(self.value.trim(), "" | ".")
    }
}

/// Extract `observations` from a FRED response body. Malformed bodies yield an empty list.
pub fn observations(body: &Value) -> Vec<Observation> {
    body.get("observations")
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(|o| serde_json::from_value::<Observation>(o.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Serde helper: read a string, a number (as its text), or `null` (as `""`).
fn de_string_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Serde helper: parse an integer from either a JSON number or a string.
///
/// Tool hosts are not consistent about argument types; `2020` and `"2020"` are both accepted.
pub fn de_i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(v).map_err(E::custom)
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.fract() == 0.0 && v.is_finite() {
                Ok(v as i64)
            } else {
                Err(E::custom(format!("expected a whole number, got {v}")))
            }
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<i64>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// Same as [`de_i64_from_string_or_number`], but `null` maps to `None`.
pub fn de_opt_i64_from_string_or_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "de_i64_from_string_or_number")] i64);

    Option::<Wrapper>::deserialize(deserializer).map(|w| w.map(|Wrapper(v)| v))
}
