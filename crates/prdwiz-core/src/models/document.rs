//! PRD document model and its field groups.

use std::str::FromStr;

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::serde_helpers::empty_as_none;

/// Sentinel selection meaning "use the matching `custom_*` value instead".
pub const OTHER: &str = "Other";

/// Frontend framework choices offered by the wizard.
pub const FRONTEND_FRAMEWORKS: &[&str] = &[
    "NextJS", "React", "Vue", "Angular", "Svelte", "Ember", "Backbone", OTHER,
];

/// Backend framework choices offered by the wizard.
pub const BACKEND_FRAMEWORKS: &[&str] = &[
    "FastAPI", "Django", "Flask", "Express", "Laravel", "Rails", OTHER,
];

/// Deployment choices offered by the wizard.
pub const DEPLOYMENT_OPTIONS: &[&str] = &["Docker", "Kubernetes", OTHER];

/// A reference product or page together with the features worth borrowing
/// from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ReferenceLink {
    /// URL of the reference
    #[serde(default)]
    pub link: String,
    /// Features taken from this reference
    #[serde(default)]
    pub features: Vec<String>,
}

/// Technology choices for the project.
///
/// The `custom_*` fields only matter when the companion selection equals
/// [`OTHER`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct TechStack {
    /// Domain where the project will be hosted
    pub domain: String,
    /// Repository name for the project
    pub repo_name: String,
    pub frontend_framework: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_frontend_framework: Option<String>,
    pub backend_framework: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_backend_framework: Option<String>,
    /// Databases in use, in the order they were chosen
    pub databases: Vec<String>,
    pub team_members: Vec<String>,
    pub deployment_option: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_deployment_option: Option<String>,
}

impl TechStack {
    /// Frontend framework name with the `Other` override applied.
    pub fn effective_frontend(&self) -> &str {
        resolve_other(&self.frontend_framework, self.custom_frontend_framework.as_deref())
    }

    /// Backend framework name with the `Other` override applied.
    pub fn effective_backend(&self) -> &str {
        resolve_other(&self.backend_framework, self.custom_backend_framework.as_deref())
    }

    /// Deployment option with the `Other` override applied.
    pub fn effective_deployment(&self) -> &str {
        resolve_other(&self.deployment_option, self.custom_deployment_option.as_deref())
    }

    /// Non-blank database names, trimmed.
    pub fn configured_databases(&self) -> impl Iterator<Item = &str> {
        self.databases
            .iter()
            .map(|db| db.trim())
            .filter(|db| !db.is_empty())
    }
}

fn resolve_other<'a>(selected: &'a str, custom: Option<&'a str>) -> &'a str {
    match custom {
        Some(custom) if selected == OTHER && !custom.trim().is_empty() => custom.trim(),
        _ => selected,
    }
}

/// Primitive column kinds a schema field can take.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Datetime,
    Text,
    Json,
    Array,
    Uuid,
    Enum,
}

impl FieldType {
    /// Every field type, in the order the wizard offers them.
    pub const ALL: [FieldType; 11] = [
        FieldType::String,
        FieldType::Integer,
        FieldType::Float,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::Datetime,
        FieldType::Text,
        FieldType::Json,
        FieldType::Array,
        FieldType::Uuid,
        FieldType::Enum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Text => "text",
            FieldType::Json => "json",
            FieldType::Array => "array",
            FieldType::Uuid => "uuid",
            FieldType::Enum => "enum",
        }
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        FieldType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("Invalid field type: {s}"))
    }
}

/// Cardinality of a relationship between two tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::OneToOne => "one-to-one",
            RelationshipType::OneToMany => "one-to-many",
            RelationshipType::ManyToMany => "many-to-many",
        }
    }
}

impl FromStr for RelationshipType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one-to-one" => Ok(RelationshipType::OneToOne),
            "one-to-many" => Ok(RelationshipType::OneToMany),
            "many-to-many" => Ok(RelationshipType::ManyToMany),
            _ => Err(format!("Invalid relationship type: {s}")),
        }
    }
}

/// A column of a table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Field {
    #[serde(default)]
    pub name: String,
    /// Column kind; absent while the author has not picked one
    #[serde(
        rename = "type",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schema", schemars(with = "Option<FieldType>"))]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: String,
}

/// A link from one table to another table of the same schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Relationship {
    /// Name of the related table
    #[serde(default)]
    pub table: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "schema", schemars(with = "Option<RelationshipType>"))]
    pub relationship_type: Option<RelationshipType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Table {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DatabaseSchema {
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// A complete document as submitted for persistence, before an id exists.
///
/// Any `id` present in an incoming JSON body is ignored; ids are assigned by
/// the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct NewDocument {
    pub project_name: String,
    pub vision: String,
    pub reference_links: Vec<ReferenceLink>,
    pub tech_stack: TechStack,
    pub database_schema: DatabaseSchema,
    pub user_stories: Vec<String>,
}

impl NewDocument {
    /// Attach the store-assigned id.
    pub fn with_id(self, id: String) -> PrdDocument {
        PrdDocument {
            id,
            project_name: self.project_name,
            vision: self.vision,
            reference_links: self.reference_links,
            tech_stack: self.tech_stack,
            database_schema: self.database_schema,
            user_stories: self.user_stories,
        }
    }
}

/// A persisted Product Requirements Document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct PrdDocument {
    /// Store-assigned identifier, immutable once created
    pub id: String,
    pub project_name: String,
    pub vision: String,
    pub reference_links: Vec<ReferenceLink>,
    pub tech_stack: TechStack,
    pub database_schema: DatabaseSchema,
    pub user_stories: Vec<String>,
}

impl From<PrdDocument> for NewDocument {
    fn from(document: PrdDocument) -> Self {
        NewDocument {
            project_name: document.project_name,
            vision: document.vision,
            reference_links: document.reference_links,
            tech_stack: document.tech_stack,
            database_schema: document.database_schema,
            user_stories: document.user_stories,
        }
    }
}

/// A document as handed out by the export endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DocumentExport {
    #[serde(flatten)]
    pub document: PrdDocument,
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub exported_at: Timestamp,
}
