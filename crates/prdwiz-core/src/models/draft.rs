//! Partially authored document held by the wizard.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{DatabaseSchema, NewDocument, ReferenceLink, TechStack};
use crate::{error::PrdError, validation};

/// Structurally optional variant of [`NewDocument`].
///
/// Every top-level group is optional so the wizard can fill them in one step
/// at a time. Nested groups such as `tech_stack` are whole values: a caller
/// changing one database replaces the entire `TechStack`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct PrdDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_links: Option<Vec<ReferenceLink>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<TechStack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_schema: Option<DatabaseSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_stories: Option<Vec<String>>,
}

impl PrdDraft {
    /// Shallow merge: every group present in `partial` replaces the current
    /// one, absent groups are left untouched.
    pub fn merge(&mut self, partial: PrdDraft) {
        let PrdDraft {
            project_name,
            vision,
            reference_links,
            tech_stack,
            database_schema,
            user_stories,
        } = partial;

        if project_name.is_some() {
            self.project_name = project_name;
        }
        if vision.is_some() {
            self.vision = vision;
        }
        if reference_links.is_some() {
            self.reference_links = reference_links;
        }
        if tech_stack.is_some() {
            self.tech_stack = tech_stack;
        }
        if database_schema.is_some() {
            self.database_schema = database_schema;
        }
        if user_stories.is_some() {
            self.user_stories = user_stories;
        }
    }

    /// True when no group has been filled in.
    pub fn is_empty(&self) -> bool {
        *self == PrdDraft::default()
    }
}

impl From<NewDocument> for PrdDraft {
    fn from(document: NewDocument) -> Self {
        PrdDraft {
            project_name: Some(document.project_name),
            vision: Some(document.vision),
            reference_links: Some(document.reference_links),
            tech_stack: Some(document.tech_stack),
            database_schema: Some(document.database_schema),
            user_stories: Some(document.user_stories),
        }
    }
}

impl TryFrom<PrdDraft> for NewDocument {
    type Error = PrdError;

    /// Promote a draft to a submittable document.
    ///
    /// Runs the whole-document validator first, so a draft that converts is
    /// complete by construction.
    fn try_from(draft: PrdDraft) -> Result<Self, Self::Error> {
        let report = validation::validate_document(&draft);
        if !report.is_valid {
            return Err(PrdError::Validation {
                errors: report.errors,
            });
        }

        match draft {
            PrdDraft {
                project_name: Some(project_name),
                vision: Some(vision),
                reference_links: Some(reference_links),
                tech_stack: Some(tech_stack),
                database_schema: Some(database_schema),
                user_stories: Some(user_stories),
            } => Ok(NewDocument {
                project_name,
                vision,
                reference_links,
                tech_stack,
                database_schema,
                user_stories,
            }),
            _ => Err(PrdError::Validation {
                errors: vec!["Document is incomplete".to_string()],
            }),
        }
    }
}
