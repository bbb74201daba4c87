use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format the backend delivers (`03.11.2020`).
const SOURCE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Date format records carry after normalization.
const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single forecast observation within a component.
///
/// Dates arrive in `DD.MM.YYYY` form and vote shares arrive as strings
/// or bare numbers; [`Record::normalize`] rewrites both into their
/// canonical representation. The three optional dates use the empty
/// string as their wire encoding for "absent".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Date the forecast refers to.
    pub fcdate: String,
    /// Two-party vote share forecast for the Democratic candidate.
    #[serde(deserialize_with = "string_or_number")]
    pub fcdemvs: String,
    /// Two-party vote share forecast for the Republican candidate.
    #[serde(deserialize_with = "string_or_number")]
    pub fcrepvs: String,
    /// Publication date of the underlying forecast, if any.
    #[serde(default, with = "empty_string_option")]
    pub released: Option<String>,
    /// First day of the underlying survey's field period, if any.
    #[serde(default, with = "empty_string_option")]
    pub firstsurveyday: Option<String>,
    /// Last day of the underlying survey's field period, if any.
    #[serde(default, with = "empty_string_option")]
    pub lastsurveyday: Option<String>,
}

/// One backend response: the remote-side component name plus its raw
/// record series.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Vec<Record>,
}

/// A field that could not be rewritten into canonical form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field {field} holds unparseable value {value:?}")]
pub struct MalformedField {
    pub field: &'static str,
    pub value: String,
}

impl Record {
    /// Rewrite this record into canonical form, in place.
    ///
    /// Dates become `YYYY-MM-DD`, vote shares become strings with
    /// exactly one fractional digit. Absent optional dates stay
    /// absent, and the survey-day pair is only touched when
    /// `firstsurveyday` is present (`lastsurveyday` is never checked
    /// on its own). The first unparseable field aborts with an error,
    /// leaving it and any later fields as delivered.
    pub fn normalize(&mut self) -> Result<(), MalformedField> {
        self.fcdate = normalize_date("fcdate", &self.fcdate)?;
        self.fcdemvs = normalize_share("fcdemvs", &self.fcdemvs)?;
        self.fcrepvs = normalize_share("fcrepvs", &self.fcrepvs)?;
        if let Some(released) = &self.released {
            self.released = Some(normalize_date("released", released)?);
        }
        if let Some(first) = &self.firstsurveyday {
            self.firstsurveyday = Some(normalize_date("firstsurveyday", first)?);
            let last = self.lastsurveyday.as_deref().unwrap_or_default();
            self.lastsurveyday = Some(normalize_date("lastsurveyday", last)?);
        }
        Ok(())
    }
}

fn normalize_date(field: &'static str, value: &str) -> Result<String, MalformedField> {
    NaiveDate::parse_from_str(value, SOURCE_DATE_FORMAT)
        .map(|d| d.format(CANONICAL_DATE_FORMAT).to_string())
        .map_err(|_| MalformedField {
            field,
            value: value.to_string(),
        })
}

fn normalize_share(field: &'static str, value: &str) -> Result<String, MalformedField> {
    value
        .trim()
        .parse::<f64>()
        .map(|v| format!("{:.1}", v))
        .map_err(|_| MalformedField {
            field,
            value: value.to_string(),
        })
}

/// The backend is inconsistent about vote shares: some components send
/// `"51.2345"`, others send `51.2345`. Accept both as a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Num(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

/// Wire encoding for the optional dates: the empty string (or null)
/// means absent, and absent serializes back to the empty string so
/// persisted raw copies round-trip byte-compatibly.
mod empty_string_option {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.filter(|s| !s.is_empty()))
    }

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }
}
