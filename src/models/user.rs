use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// A registered user. Clients may submit fields beyond the four required
// ones; those are captured in `extra` and re-serialized verbatim.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    #[serde(rename = "firstName")]
    pub first_name: String,
    pub email: String,       // Unique key across the collection
    pub username: String,
    pub password: String,    // Stored in clear form as given
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
