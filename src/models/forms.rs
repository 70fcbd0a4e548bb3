use serde::Deserialize;

// Absent fields default to the empty string, which can never match a
// stored record (create rejects empty required fields).
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
