//! Application Models
//! Mission: Define the tracked job-application record and its request shapes

use serde::{Deserialize, Deserializer, Serialize};

/// One tracked job application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub company: String,
    pub role: String,
    pub status: String,
    pub location: Option<String>,
    pub job_url: Option<String>,
    pub notes: Option<String>,
}

/// Create request body. `company` and `role` are required; missing values
/// are rejected by body deserialization before reaching the store.
#[derive(Debug, Deserialize)]
pub struct ApplicationCreate {
    pub company: String,
    pub role: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub location: Option<String>,
    pub job_url: Option<String>,
    pub notes: Option<String>,
}

fn default_status() -> String {
    "Applied".to_string()
}

/// Partial update body. Only fields present in the request change.
///
/// Nullable columns use a double `Option` so that an omitted field
/// (outer `None`) keeps the stored value while an explicit JSON null
/// (inner `None`) clears it.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationUpdate {
    pub company: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub job_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub notes: Option<Option<String>>,
}

impl ApplicationUpdate {
    /// True when the body named no fields at all.
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.role.is_none()
            && self.status.is_none()
            && self.location.is_none()
            && self.job_url.is_none()
            && self.notes.is_none()
    }
}

/// Marks a field as present even when its value is null. Serde only calls
/// this when the key exists in the input, so absence stays `None` via
/// `#[serde(default)]`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
