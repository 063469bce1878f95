use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity record for the signed-in user, persisted verbatim under the
/// session store's user key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Synthesize a display name from the local part of an email address.
///
/// Used when the identity service omits a full name. The result is a
/// local presentation fallback only and is never written back upstream.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);

    local
        .split(['.', '_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_wire_field_names() {
        let profile = UserProfile {
            email: "a@b.com".to_string(),
            full_name: "A B".to_string(),
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"fullName\":\"A B\""));
        assert!(json.contains("\"createdAt\""));

        let parsed: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn test_display_name_from_email() {
        assert_eq!(display_name_from_email("jane.doe@example.com"), "Jane Doe");
        assert_eq!(display_name_from_email("sam_r@example.com"), "Sam R");
        assert_eq!(display_name_from_email("alex@example.com"), "Alex");
        // Degenerate input still yields something usable
        assert_eq!(display_name_from_email("no-at-sign"), "No At Sign");
    }
}
