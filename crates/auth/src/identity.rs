//! The authenticated identity.

use serde::{Deserialize, Serialize};

use skillsight_core::UserId;

/// The signed-in user as reported by the identity provider.
///
/// `email` and `display_name` are provider-owned data and carried verbatim;
/// only user *input* goes through [`skillsight_core::EmailAddress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
}

impl Identity {
    /// Name to greet the user with: display name when set, else the email.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefers_display_name() {
        let mut identity = Identity {
            id: "u1".parse().unwrap(),
            email: "a@b.com".to_string(),
            display_name: None,
        };
        assert_eq!(identity.label(), "a@b.com");

        identity.display_name = Some("Ada".to_string());
        assert_eq!(identity.label(), "Ada");
    }
}
