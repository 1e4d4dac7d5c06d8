use serde::{Deserialize, Deserializer, Serialize};

/// Structured job record produced by the extraction API for a single apply link.
///
/// Missing or `null` fields collapse to their empty value; any other type
/// mismatch fails deserialization and the link contributes no record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedJob {
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_division_of_organization: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub compensation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apply_link: String,
}

/// One ranked role returned to the caller. Exactly three fields, unknown keys dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub compensation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apply_link: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
