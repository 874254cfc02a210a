//! The authenticated user's grant (identity and responsibilities).

use serde::{Deserialize, Serialize};

/// Read-only snapshot of the authenticated user, refreshed on demand via
/// [`crate::Session::get_grant`]. `login` may also be populated with a
/// minimal subset straight from the login response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Grant {
    pub login: Option<String>,
    pub userid: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub lang: Option<String>,
    pub responsibilities: Vec<String>,
}

impl Grant {
    /// Does the user hold the given responsibility (role/group)?
    pub fn has_responsibility(&self, group: &str) -> bool {
        self.responsibilities.iter().any(|r| r == group)
    }
}
