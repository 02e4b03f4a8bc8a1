use serde::{Deserialize, Serialize};

/// A registered student, one row of the roster
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StudentRecord {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub course: Option<String>,
}

impl StudentRecord {
    pub fn new(name: String, email: String, course: Option<String>) -> Self {
        StudentRecord {
            name,
            email,
            course,
        }
    }

    pub fn new_test() -> Self {
        StudentRecord {
            name: "Alice Smith".to_string(),
            email: "alice@example.com".to_string(),
            course: Some("Data Science".to_string()),
        }
    }

    /// Exact match on both fields. A blank name or email never matches.
    pub fn matches(&self, name: &str, email: &str) -> bool {
        !name.is_empty() && !email.is_empty() && self.name == name && self.email == email
    }
}
