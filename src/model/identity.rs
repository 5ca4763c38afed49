use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Opaque per-browser owner token. Every per-user row is scoped by it; it is
/// never authenticated, only compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(String);

impl OwnerId {
    /// Accepts 1 to 100 characters of `[A-Za-z0-9_-]`.
    ///
    /// # Panics
    ///
    /// Will panic if the regex is invalid
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9_-]{1,100}$")
                .expect("Invalid regex pattern - this is a programming error")
        });

        if re.is_match(input) {
            Some(OwnerId(input.to_string()))
        } else {
            None
        }
    }

    /// Mint a fresh token for a browser that does not carry one yet.
    #[must_use]
    pub fn mint() -> Self {
        OwnerId(uuid::Uuid::new_v4().simple().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
