//! Character models: the domain record, the stored document and the
//! resource/data-source state shapes.

use buildonaws_opensearch::Document;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Index holding character documents.
pub const BACKEND_INDEX: &str = "buildonaws";

/// Category of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CharacterType {
    /// `hero`
    Hero,
    /// `super-hero`
    SuperHero,
    /// `anti-hero`
    AntiHero,
    /// `villain`
    Villain,
}

impl CharacterType {
    /// All types, in schema order.
    pub const ALL: [CharacterType; 4] = [
        CharacterType::Hero,
        CharacterType::SuperHero,
        CharacterType::AntiHero,
        CharacterType::Villain,
    ];

    /// Configuration value of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterType::Hero => "hero",
            CharacterType::SuperHero => "super-hero",
            CharacterType::AntiHero => "anti-hero",
            CharacterType::Villain => "villain",
        }
    }

    /// Configuration values of all types.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|t| t.as_str())
    }

    /// Attribute description listing the allowed values.
    pub fn description() -> String {
        let names: Vec<&str> = Self::names().collect();
        format!(
            "The type of character. Possible values: '{}'.",
            names.join(",")
        )
    }
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown character type '{}'", s))
    }
}

/// The flat attribute record of a character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Character {
    /// Store-assigned identifier; empty until created.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Real name.
    pub identity: String,
    /// Catchphrase.
    pub known_as: String,
    /// Category, one of [`CharacterType`] when accepted through the schema.
    pub kind: String,
}

/// The `_source` body persisted in the index.
///
/// Empty fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSource {
    /// Display name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub fullname: String,
    /// Real name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub identity: String,
    /// Catchphrase.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub knownas: String,
    /// Category.
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
}

impl Document for CharacterSource {
    fn index_name() -> &'static str {
        BACKEND_INDEX
    }
}

/// Partial-update body. Every field is sent, so clearing one clears it in
/// the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharacterPatch<'a> {
    /// Display name.
    pub fullname: &'a str,
    /// Real name.
    pub identity: &'a str,
    /// Catchphrase.
    pub knownas: &'a str,
    /// Category.
    #[serde(rename = "type")]
    pub kind: &'a str,
}

impl<'a> From<&'a CharacterSource> for CharacterPatch<'a> {
    fn from(source: &'a CharacterSource) -> Self {
        Self {
            fullname: &source.fullname,
            identity: &source.identity,
            knownas: &source.knownas,
            kind: &source.kind,
        }
    }
}

/// A character document as the store exposes it: `_id` next to the
/// source fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDocument {
    /// Store-assigned identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Persisted fields.
    #[serde(flatten)]
    pub source: CharacterSource,
}

/// State of the `buildonaws_character` resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterResourceModel {
    /// Unknown until created.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name.
    pub fullname: String,
    /// Real name.
    pub identity: String,
    /// Catchphrase.
    pub knownas: String,
    /// Category.
    #[serde(rename = "type")]
    pub kind: String,
    /// Timestamp of the last successful create or update.
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl CharacterResourceModel {
    /// A planned character, not yet created.
    pub fn new(
        fullname: impl Into<String>,
        identity: impl Into<String>,
        knownas: impl Into<String>,
        kind: CharacterType,
    ) -> Self {
        Self {
            id: None,
            fullname: fullname.into(),
            identity: identity.into(),
            knownas: knownas.into(),
            kind: kind.to_string(),
            last_updated: None,
        }
    }

    /// State holding only an identifier, as produced by an import.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Identifier, if the character exists in the store.
    pub fn document_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// State of the `buildonaws_character` data source.
///
/// Every attribute is populated after a read; when nothing matched they are
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDataSourceModel {
    /// Identifier of the matched document.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub fullname: String,
    /// Real name, the lookup key.
    pub identity: String,
    /// Catchphrase.
    #[serde(default)]
    pub knownas: String,
    /// Category.
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl CharacterDataSourceModel {
    /// Lookup configuration for an identity.
    pub fn lookup(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_character_type_names() {
        assert_eq!(
            CharacterType::names().collect::<Vec<_>>(),
            vec!["hero", "super-hero", "anti-hero", "villain"]
        );
        assert_eq!(
            CharacterType::description(),
            "The type of character. Possible values: 'hero,super-hero,anti-hero,villain'."
        );
    }

    #[test]
    fn test_character_type_parse() {
        assert_eq!("anti-hero".parse::<CharacterType>(), Ok(CharacterType::AntiHero));
        assert!("Hero".parse::<CharacterType>().is_err());
        assert_eq!(
            serde_json::to_value(CharacterType::SuperHero).unwrap(),
            json!("super-hero")
        );
    }

    #[test]
    fn test_source_omits_empty_fields() {
        let source = CharacterSource {
            fullname: "Deadpool".to_string(),
            identity: "Wade Wilson".to_string(),
            knownas: String::new(),
            kind: "anti-hero".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&source).unwrap(),
            json!({ "fullname": "Deadpool", "identity": "Wade Wilson", "type": "anti-hero" })
        );
    }

    #[test]
    fn test_patch_keeps_empty_fields() {
        let source = CharacterSource {
            fullname: "Deadpool".to_string(),
            identity: "Wade Wilson".to_string(),
            knownas: String::new(),
            kind: "anti-hero".to_string(),
        };
        assert_eq!(
            serde_json::to_value(CharacterPatch::from(&source)).unwrap(),
            json!({
                "fullname": "Deadpool",
                "identity": "Wade Wilson",
                "knownas": "",
                "type": "anti-hero"
            })
        );
    }

    #[test]
    fn test_document_shape() {
        let doc: CharacterDocument = serde_json::from_value(json!({
            "_id": "dp-1",
            "fullname": "Deadpool",
            "identity": "Wade Wilson",
            "knownas": "Merc with a mouth",
            "type": "anti-hero"
        }))
        .unwrap();

        assert_eq!(doc.id, "dp-1");
        assert_eq!(doc.source.knownas, "Merc with a mouth");
    }

    #[test]
    fn test_resource_model_from_plan_json() {
        let plan: CharacterResourceModel = serde_json::from_value(json!({
            "fullname": "Daredevil",
            "identity": "Matt Murdock",
            "knownas": "The man without fear",
            "type": "super-hero"
        }))
        .unwrap();

        assert_eq!(plan.id, None);
        assert_eq!(plan.document_id(), None);
        assert_eq!(plan.kind, "super-hero");
        assert_eq!(CharacterResourceModel::with_id("abc").document_id(), Some("abc"));
        assert_eq!(CharacterResourceModel::with_id("").document_id(), None);
    }
}
