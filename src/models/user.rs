use serde::Deserialize;

/// A single named attribute on a directory user entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UserAttribute {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// One user entry as returned by the directory listing.
///
/// The directory may return entries without a username or without any
/// usable attributes; callers must treat both fields as best-effort.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub attributes: Vec<UserAttribute>,
}

impl DirectoryUser {
    /// Look up the `email` attribute, if present with a value.
    pub fn email(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == "email")
            .and_then(|attr| attr.value.as_deref())
    }
}

/// One page of a paginated directory listing.
///
/// An absent or empty `page_token` means the listing is exhausted.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<DirectoryUser>,
    #[serde(default)]
    pub page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_attrs(attrs: Vec<(&str, Option<&str>)>) -> DirectoryUser {
        DirectoryUser {
            username: Some("u1".to_string()),
            attributes: attrs
                .into_iter()
                .map(|(name, value)| UserAttribute {
                    name: name.to_string(),
                    value: value.map(String::from),
                })
                .collect(),
        }
    }

    #[test]
    fn test_email_lookup() {
        let user = user_with_attrs(vec![
            ("given_name", Some("Ada")),
            ("email", Some("ada@example.com")),
        ]);
        assert_eq!(user.email(), Some("ada@example.com"));
    }

    #[test]
    fn test_email_missing() {
        let user = user_with_attrs(vec![("given_name", Some("Ada"))]);
        assert_eq!(user.email(), None);
    }

    #[test]
    fn test_email_attribute_without_value() {
        let user = user_with_attrs(vec![("email", None)]);
        assert_eq!(user.email(), None);
    }

    #[test]
    fn test_page_deserialization() {
        let page: UserPage = serde_json::from_str(
            r#"{
                "users": [
                    {"username": "u1", "attributes": [{"name": "email", "value": "a@b.c"}]},
                    {"attributes": []}
                ],
                "page_token": "next"
            }"#,
        )
        .unwrap();

        assert_eq!(page.users.len(), 2);
        assert_eq!(page.users[0].email(), Some("a@b.c"));
        assert!(page.users[1].username.is_none());
        assert_eq!(page.page_token.as_deref(), Some("next"));
    }

    #[test]
    fn test_page_without_token() {
        let page: UserPage = serde_json::from_str(r#"{"users": []}"#).unwrap();
        assert!(page.users.is_empty());
        assert!(page.page_token.is_none());
    }
}
