use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// UserProgress
// ---------------------------------------------------------------------------

/// Read-only snapshot of a learner's onboarding state as reported by the
/// backend's user record.
///
/// Missing fields and JSON `null` both read as empty. Records inside the
/// sequences are opaque to the resolver; only their presence matters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picked_skill: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills_assessment: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub selected_skills: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub career_assessment: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub learning_path: Vec<Value>,
    #[serde(
        default,
        deserialize_with = "code_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub verification_code: Option<String>,
}

impl UserProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from a backend response body. Accepts the bare user
    /// object or one wrapped in a `user` / `data` envelope.
    pub fn from_json(body: &str) -> crate::Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> crate::Result<Self> {
        let inner = match value {
            Value::Object(mut map) => {
                let envelope = ["user", "data"]
                    .iter()
                    .find(|k| map.get(**k).is_some_and(Value::is_object))
                    .copied();
                match envelope.and_then(|k| map.remove(k)) {
                    Some(inner) => inner,
                    None => Value::Object(map),
                }
            }
            other => other,
        };
        Ok(serde_json::from_value(inner)?)
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    pub fn with_picked_skill(mut self, skill: impl Into<String>) -> Self {
        self.picked_skill = Some(skill.into());
        self
    }

    pub fn with_skills_assessment(mut self, record: Value) -> Self {
        self.skills_assessment.push(record);
        self
    }

    pub fn with_selected_skill(mut self, record: Value) -> Self {
        self.selected_skills.push(record);
        self
    }

    pub fn with_career_assessment(mut self, record: Value) -> Self {
        self.career_assessment.push(record);
        self
    }

    pub fn with_learning_path(mut self, record: Value) -> Self {
        self.learning_path.push(record);
        self
    }

    pub fn with_verification_code(mut self, code: impl Into<String>) -> Self {
        self.verification_code = Some(code.into());
        self
    }

    // -----------------------------------------------------------------------
    // Predicates
    // -----------------------------------------------------------------------

    /// The picked skill, if one is set and not blank.
    pub fn picked_skill(&self) -> Option<&str> {
        self.picked_skill
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn has_picked_skill(&self) -> bool {
        self.picked_skill().is_some()
    }

    /// A numeric verification code means the email address is still
    /// unverified.
    ///
    /// Numeric is digits only: after trimming, the code must be non-empty
    /// ASCII `0-9`. Signs, decimal points and exponents do not count, so a
    /// JSON float such as `482913.0` is not a pending code.
    pub fn awaiting_verification(&self) -> bool {
        self.verification_code
            .as_deref()
            .map(str::trim)
            .is_some_and(|c| !c.is_empty() && c.bytes().all(|b| b.is_ascii_digit()))
    }

    pub fn has_skills_assessment(&self) -> bool {
        !self.skills_assessment.is_empty()
    }

    pub fn has_selected_skills(&self) -> bool {
        !self.selected_skills.is_empty()
    }

    pub fn has_career_assessment(&self) -> bool {
        !self.career_assessment.is_empty()
    }

    pub fn has_learning_path(&self) -> bool {
        !self.learning_path.is_empty()
    }

    /// True when none of the four onboarding sequences has entries.
    pub fn onboarding_untouched(&self) -> bool {
        !self.has_skills_assessment()
            && !self.has_selected_skills()
            && !self.has_career_assessment()
            && !self.has_learning_path()
    }
}

// ---------------------------------------------------------------------------
// Field adapters
// ---------------------------------------------------------------------------

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The backend sends the code as a string or a bare number; anything else
/// reads as absent.
fn code_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
