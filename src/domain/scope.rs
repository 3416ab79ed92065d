use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier of a system scope
pub type ScopeId = u64;

/// One system scope as exchanged with `api/scopes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeRecord {
    /// Assigned by the server; absent until the first successful save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ScopeId>,

    /// The scope string clients request (e.g. "openid", "read_profile")
    #[serde(default, deserialize_with = "null_as_empty")]
    pub value: String,

    /// Human-readable description shown to users on the approval page
    #[serde(default)]
    pub description: Option<String>,

    /// Symbolic icon name (e.g. "star", "user")
    #[serde(default)]
    pub icon: Option<String>,

    /// Granted to new clients without an explicit request
    #[serde(default)]
    pub default_scope: bool,

    /// Dynamically registered clients may request this scope
    #[serde(default)]
    pub allow_dyn_reg: bool,

    /// The scope carries a parameter (`value:param`)
    #[serde(default)]
    pub structured: bool,

    /// Describes the parameter of a structured scope
    #[serde(default)]
    pub structured_param_description: Option<String>,

    #[serde(default)]
    pub structured_value: Option<String>,
}

impl ScopeRecord {
    /// Create an unsaved scope with the given value and defaults everywhere else
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Whether the server has assigned an id yet
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// A scope value must contain something other than whitespace
    pub fn has_valid_value(&self) -> bool {
        !self.value.trim().is_empty()
    }

    /// Icon name, or `None` when unset or blank
    pub fn icon_name(&self) -> Option<&str> {
        self.icon.as_deref().filter(|icon| !icon.trim().is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_server_payload() {
        let payload = json!({
            "id": 7,
            "value": "phone",
            "description": "Phone number",
            "icon": "bell",
            "defaultScope": true,
            "allowDynReg": false,
            "structured": false,
            "structuredParamDescription": null,
            "structuredValue": null
        });

        let scope: ScopeRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(scope.id, Some(7));
        assert_eq!(scope.value, "phone");
        assert_eq!(scope.icon_name(), Some("bell"));
        assert!(scope.default_scope);
        assert!(!scope.allow_dyn_reg);
        assert_eq!(scope.structured_param_description, None);
    }

    #[test]
    fn test_null_value_becomes_empty() {
        let scope: ScopeRecord = serde_json::from_value(json!({"id": 1, "value": null})).unwrap();
        assert_eq!(scope.value, "");
        assert!(!scope.has_valid_value());
    }

    #[test]
    fn test_new_scope_omits_id_on_the_wire() {
        let mut scope = ScopeRecord::new("read_profile");
        scope.allow_dyn_reg = true;
        scope.structured_param_description = Some("Profile id".to_string());

        let body = serde_json::to_value(&scope).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["value"], "read_profile");
        assert_eq!(body["allowDynReg"], true);
        assert_eq!(body["defaultScope"], false);
        assert_eq!(body["structuredParamDescription"], "Profile id");
    }

    #[test]
    fn test_blank_value_is_invalid() {
        assert!(!ScopeRecord::new("").has_valid_value());
        assert!(!ScopeRecord::new("   ").has_valid_value());
        assert!(ScopeRecord::new(" email ").has_valid_value());
    }

    #[test]
    fn test_blank_icon_is_unset() {
        let mut scope = ScopeRecord::new("email");
        scope.icon = Some("  ".to_string());
        assert_eq!(scope.icon_name(), None);
    }
}
