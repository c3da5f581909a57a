//! Caller policies for zero-match and collision outcomes.

use serde::{Deserialize, Serialize};

/// What to do when a scoped operation matches no records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoneFound {
    #[default]
    Raise,
    Ignore,
}

/// What to do when adding a record whose primary key already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Existing {
    #[default]
    Raise,
    Update,
    Replace,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Policies travel through config as the same lowercase words the
    // automation scripts use.
    #[test]
    fn policies_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&NoneFound::Ignore).unwrap(), "\"ignore\"");
        assert_eq!(serde_json::to_string(&Existing::Replace).unwrap(), "\"replace\"");
        let parsed: Existing = serde_json::from_str("\"update\"").unwrap();
        assert_eq!(parsed, Existing::Update);
    }
}
