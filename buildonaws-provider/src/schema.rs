//! Declarative schemas for the provider, the resource and the data source.
//!
//! A [`Schema`] describes the attributes a configuration block accepts and
//! can check a JSON configuration object against them. Plan computation is
//! left to the plugin host.

use crate::diag::Diagnostics;
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Attribute names and descriptions
// ============================================================================

/// Provider block: backend address.
pub const BACKEND_ADDRESS_FIELD: &str = "backend_address";
/// Provider block: TLS verification bypass.
pub const SKIP_TLS_VALIDATION_FIELD: &str = "skip_tls_validation";

/// Character: identifier.
pub const ID_FIELD: &str = "id";
/// Character: display name.
pub const FULL_NAME_FIELD: &str = "fullname";
/// Character: real name, used as lookup key.
pub const IDENTITY_FIELD: &str = "identity";
/// Character: catchphrase.
pub const KNOWN_AS_FIELD: &str = "knownas";
/// Character: category.
pub const TYPE_FIELD: &str = "type";
/// Character: last write timestamp.
pub const LAST_UPDATED_FIELD: &str = "last_updated";

const PROVIDER_DESC: &str = "Provider to manage characters from comic books.";
const BACKEND_ADDRESS_DESC: &str = "Address to connect to the OpenSearch backend.";
const SKIP_TLS_VALIDATION_DESC: &str =
    "Skip the validation of the TLS certificate presented by the backend.";
const ID_DESC: &str = "Unique identifier of the character.";
const FULL_NAME_DESC: &str = "The name to which we know the character of.";
const IDENTITY_DESC: &str = "The real name of the character, which is usually a secret.";
const KNOWN_AS_DESC: &str = "A catchphrase for which we know the character of.";
const LAST_UPDATED_DESC: &str = "Timestamp of the last create or update of the character.";

// ============================================================================
// Schema types
// ============================================================================

/// Value type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// String value.
    String,
    /// Boolean value.
    Bool,
}

impl AttributeType {
    fn matches(&self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
            AttributeType::Bool => value.is_boolean(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Bool => "bool",
        }
    }
}

/// Value validator attached to an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// The value must be one of the listed strings.
    OneOf(Vec<String>),
}

impl Validator {
    /// Build a one-of validator.
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Validator::OneOf(values.into_iter().map(Into::into).collect())
    }

    fn check(&self, name: &str, value: &Value, diags: &mut Diagnostics) {
        match self {
            Validator::OneOf(allowed) => {
                let Some(s) = value.as_str() else { return };
                if !allowed.iter().any(|a| a == s) {
                    let quoted: Vec<String> = allowed.iter().map(|a| format!("{:?}", a)).collect();
                    diags.add_attribute_error(
                        name,
                        "Invalid Attribute Value Match",
                        format!(
                            "Attribute {} value must be one of: [{}], got: {:?}",
                            name,
                            quoted.join(" "),
                            s
                        ),
                    );
                }
            }
        }
    }
}

/// Plan modifier attached to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanModifier {
    /// Keep the prior state value instead of marking it unknown.
    UseStateForUnknown,
}

/// A single schema attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Human readable description.
    pub description: Option<String>,
    /// Value type.
    pub attr_type: AttributeType,
    /// Must be set in configuration.
    pub required: bool,
    /// May be set in configuration.
    pub optional: bool,
    /// Set by the provider.
    pub computed: bool,
    /// Validators run against configured values.
    pub validators: Vec<Validator>,
    /// Plan modifiers.
    pub plan_modifiers: Vec<PlanModifier>,
}

impl Attribute {
    fn new(attr_type: AttributeType, required: bool, optional: bool, computed: bool) -> Self {
        Self {
            description: None,
            attr_type,
            required,
            optional,
            computed,
            validators: Vec::new(),
            plan_modifiers: Vec::new(),
        }
    }

    /// A required string attribute.
    pub fn required_string() -> Self {
        Self::new(AttributeType::String, true, false, false)
    }

    /// An optional string attribute.
    pub fn optional_string() -> Self {
        Self::new(AttributeType::String, false, true, false)
    }

    /// A string attribute only the provider sets.
    pub fn computed_string() -> Self {
        Self::new(AttributeType::String, false, false, true)
    }

    /// A string attribute the user may set and the provider fills otherwise.
    pub fn optional_computed_string() -> Self {
        Self::new(AttributeType::String, false, true, true)
    }

    /// An optional boolean attribute.
    pub fn optional_bool() -> Self {
        Self::new(AttributeType::Bool, false, true, false)
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a validator.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Add a plan modifier.
    pub fn with_plan_modifier(mut self, modifier: PlanModifier) -> Self {
        self.plan_modifiers.push(modifier);
        self
    }

    /// Whether only the provider may set this attribute.
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}

/// Schema of a configuration block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Human readable description.
    pub description: Option<String>,
    /// Attributes by name.
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Look up an attribute.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Check a configuration object against this schema.
    ///
    /// `null` counts as not set. All problems are collected; nothing
    /// short-circuits.
    pub fn validate_config(&self, config: &Value) -> Diagnostics {
        let mut diags = Diagnostics::new();

        let Some(object) = config.as_object() else {
            diags.add_error(
                "Invalid configuration",
                "The configuration block must be an object.",
            );
            return diags;
        };

        for name in object.keys() {
            if !self.attributes.contains_key(name) {
                diags.add_attribute_error(
                    name.as_str(),
                    "Unsupported argument",
                    format!("An argument named {:?} is not expected here.", name),
                );
            }
        }

        for (name, attribute) in &self.attributes {
            let value = object.get(name).filter(|v| !v.is_null());

            match value {
                None if attribute.required => diags.add_attribute_error(
                    name.as_str(),
                    "Missing required argument",
                    format!("The argument {:?} is required, but no definition was found.", name),
                ),
                None => {}
                Some(_) if attribute.is_read_only() => diags.add_attribute_error(
                    name.as_str(),
                    "Invalid Configuration for Read-Only Attribute",
                    format!(
                        "Cannot set value for this attribute as the provider has marked it as read-only. Remove the configuration line setting the value. {:?}",
                        name
                    ),
                ),
                Some(v) if !attribute.attr_type.matches(v) => diags.add_attribute_error(
                    name.as_str(),
                    "Incorrect attribute value type",
                    format!("Inappropriate value for attribute {:?}: {} required.", name, attribute.attr_type.name()),
                ),
                Some(v) => {
                    for validator in &attribute.validators {
                        validator.check(name, v, &mut diags);
                    }
                }
            }
        }

        diags
    }
}

// ============================================================================
// Concrete schemas
// ============================================================================

/// Schema of the `provider "buildonaws"` block.
pub fn provider_schema() -> Schema {
    Schema::new()
        .with_description(PROVIDER_DESC)
        .with_attribute(
            BACKEND_ADDRESS_FIELD,
            Attribute::optional_string().with_description(BACKEND_ADDRESS_DESC),
        )
        .with_attribute(
            SKIP_TLS_VALIDATION_FIELD,
            Attribute::optional_bool().with_description(SKIP_TLS_VALIDATION_DESC),
        )
}

/// Schema of the `buildonaws_character` resource.
pub fn character_resource_schema() -> Schema {
    Schema::new()
        .with_attribute(
            ID_FIELD,
            Attribute::computed_string()
                .with_description(ID_DESC)
                .with_plan_modifier(PlanModifier::UseStateForUnknown),
        )
        .with_attribute(
            FULL_NAME_FIELD,
            Attribute::required_string().with_description(FULL_NAME_DESC),
        )
        .with_attribute(
            IDENTITY_FIELD,
            Attribute::required_string().with_description(IDENTITY_DESC),
        )
        .with_attribute(
            KNOWN_AS_FIELD,
            Attribute::required_string().with_description(KNOWN_AS_DESC),
        )
        .with_attribute(
            TYPE_FIELD,
            Attribute::required_string()
                .with_description(crate::model::CharacterType::description())
                .with_validator(Validator::one_of(crate::model::CharacterType::names())),
        )
        .with_attribute(
            LAST_UPDATED_FIELD,
            Attribute::computed_string().with_description(LAST_UPDATED_DESC),
        )
}

/// Schema of the `buildonaws_character` data source.
pub fn character_data_source_schema() -> Schema {
    Schema::new()
        .with_attribute(ID_FIELD, Attribute::computed_string().with_description(ID_DESC))
        .with_attribute(
            FULL_NAME_FIELD,
            Attribute::optional_computed_string().with_description(FULL_NAME_DESC),
        )
        .with_attribute(
            IDENTITY_FIELD,
            Attribute::required_string().with_description(IDENTITY_DESC),
        )
        .with_attribute(
            KNOWN_AS_FIELD,
            Attribute::optional_computed_string().with_description(KNOWN_AS_DESC),
        )
        .with_attribute(
            TYPE_FIELD,
            Attribute::optional_computed_string()
                .with_description(crate::model::CharacterType::description()),
        )
}
