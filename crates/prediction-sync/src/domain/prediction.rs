//! Prediction Entity
//!
//! One weather forecast entry: a date (or inclusive date range), a temperature
//! display value, a condition label and optional notes.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::entity::{DomainError, DomainResult, Entity};

/// Stable identifier assigned when a prediction is created or first loaded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionId(String);

impl PredictionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PredictionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PredictionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A weather prediction as stored locally and mirrored remotely.
///
/// Records written before ids existed (and the static baseline file) have no
/// `id`; one is generated on read and persisted by the next save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default = "PredictionId::generate")]
    pub id: PredictionId,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Inclusive end of a date range
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub to_date: Option<String>,
    /// Numeric display value, unit implicit
    #[serde(deserialize_with = "string_or_number")]
    pub temperature: String,
    pub condition: String,
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

impl Prediction {
    /// Create a single-day prediction with a fresh id
    pub fn new(
        date: impl Into<String>,
        temperature: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            id: PredictionId::generate(),
            date: date.into(),
            to_date: None,
            temperature: temperature.into(),
            condition: condition.into(),
            notes: None,
        }
    }

    /// `date` or `date to toDate` for display
    pub fn date_range(&self) -> String {
        match &self.to_date {
            Some(to) => format!("{} to {}", self.date, to),
            None => self.date.clone(),
        }
    }
}

impl Entity for Prediction {
    type Id = PredictionId;

    fn id(&self) -> &PredictionId {
        &self.id
    }
}

/// `""` and `null` both mean the field is absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|text| !text.trim().is_empty()))
}

/// Hand-edited baseline files carry temperatures as bare numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Operator input for a new prediction. Empty optional fields mean absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionDraft {
    pub date: String,
    pub to_date: String,
    pub temperature: String,
    pub condition: String,
    pub notes: String,
}

impl PredictionDraft {
    /// Check the required fields and build the record.
    pub fn validate(self) -> DomainResult<Prediction> {
        let required = [
            ("date", &self.date),
            ("temperature", &self.temperature),
            ("condition", &self.condition),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(field));
            }
        }

        Ok(Prediction {
            id: PredictionId::generate(),
            date: self.date.trim().to_string(),
            to_date: non_empty(self.to_date),
            temperature: self.temperature.trim().to_string(),
            condition: self.condition.trim().to_string(),
            notes: non_empty(self.notes),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PredictionDraft {
        PredictionDraft {
            date: "2024-03-01".into(),
            temperature: "12".into(),
            condition: "Sunny".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_builds_prediction() {
        let mut input = draft();
        input.to_date = "2024-03-03".into();
        input.notes = "  ".into();

        let prediction = input.validate().expect("valid draft");
        assert_eq!(prediction.condition, "Sunny");
        assert_eq!(prediction.to_date.as_deref(), Some("2024-03-03"));
        assert!(prediction.notes.is_none());
        assert_eq!(prediction.date_range(), "2024-03-01 to 2024-03-03");
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut input = draft();
        input.condition = String::new();
        assert!(matches!(
            input.validate(),
            Err(DomainError::Validation("condition"))
        ));

        let mut input = draft();
        input.temperature = "   ".into();
        assert!(matches!(
            input.validate(),
            Err(DomainError::Validation("temperature"))
        ));
    }

    #[test]
    fn test_legacy_record_without_id() {
        let json = r#"{"date":"2024-01-01","temperature":5,"condition":"Snow"}"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.temperature, "5");
        assert!(!prediction.id.as_str().is_empty());
        assert!(prediction.to_date.is_none());
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent() {
        let mut prediction = Prediction::new("2024-01-01", "-3.5", "Snow");
        prediction.to_date = Some("2024-01-02".into());

        let value = serde_json::to_value(&prediction).unwrap();
        assert_eq!(value["toDate"], "2024-01-02");
        assert_eq!(value["temperature"], "-3.5");
        assert!(value.get("notes").is_none());
    }

    #[test]
    fn test_blank_optional_fields_read_as_absent() {
        let json = r#"{"date":"2024-01-01","toDate":"","temperature":"5","condition":"Snow","notes":"  "}"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert!(prediction.to_date.is_none());
        assert!(prediction.notes.is_none());
        assert_eq!(prediction.date_range(), "2024-01-01");

        let json = r#"{"date":"2024-01-01","toDate":null,"temperature":"5","condition":"Snow"}"#;
        let prediction: Prediction = serde_json::from_str(json).unwrap();
        assert!(prediction.to_date.is_none());
    }
}
