//! Completeness validators for each wizard step and for whole documents.
//!
//! Every validator is a pure function returning a [`ValidationResult`].
//! Messages accumulate instead of short-circuiting so a caller can show every
//! problem of a step at once.

use serde::{Deserialize, Serialize};

use crate::models::{DatabaseSchema, PrdDraft, ReferenceLink, TechStack, OTHER};

/// Outcome of a validator run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Messages joined by newlines, the form stored in the wizard's error slot.
    pub fn joined(&self) -> String {
        self.errors.join("\n")
    }

    /// First message, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn has_non_blank(values: &[String]) -> bool {
    values.iter().any(|v| !v.trim().is_empty())
}

/// Step 1: project name and vision.
pub fn validate_project_info(project_name: Option<&str>, vision: Option<&str>) -> ValidationResult {
    let mut errors = Vec::new();

    if is_blank(project_name) {
        errors.push("Project name is required".to_string());
    }
    if is_blank(vision) {
        errors.push("Project vision is required".to_string());
    }

    ValidationResult::from_errors(errors)
}

/// Step 2: reference links, each with a URL and at least one feature.
pub fn validate_reference_links(links: Option<&[ReferenceLink]>) -> ValidationResult {
    let links = match links {
        Some(links) if !links.is_empty() => links,
        _ => {
            return ValidationResult::from_errors(vec![
                "At least one reference link is required".to_string(),
            ])
        }
    };

    let mut errors = Vec::new();
    for (index, link) in links.iter().enumerate() {
        let position = index + 1;
        if link.link.trim().is_empty() {
            errors.push(format!("Reference link {position} URL is required"));
        }
        if !has_non_blank(&link.features) {
            errors.push(format!(
                "Reference link {position} must have at least one feature"
            ));
        }
    }

    ValidationResult::from_errors(errors)
}

/// Step 3: tech stack, including `Other` overrides.
pub fn validate_tech_stack(tech_stack: Option<&TechStack>) -> ValidationResult {
    let Some(stack) = tech_stack else {
        return ValidationResult::from_errors(vec![
            "Tech stack information is required".to_string(),
        ]);
    };

    let mut errors = Vec::new();

    if stack.domain.trim().is_empty() {
        errors.push("Domain is required".to_string());
    }
    if stack.repo_name.trim().is_empty() {
        errors.push("Repository name is required".to_string());
    }

    check_selection(
        &mut errors,
        &stack.frontend_framework,
        stack.custom_frontend_framework.as_deref(),
        "Frontend framework is required",
        "Custom frontend framework name is required",
    );
    check_selection(
        &mut errors,
        &stack.backend_framework,
        stack.custom_backend_framework.as_deref(),
        "Backend framework is required",
        "Custom backend framework name is required",
    );

    if !has_non_blank(&stack.databases) {
        errors.push("At least one database is required".to_string());
    }
    if !has_non_blank(&stack.team_members) {
        errors.push("At least one team member is required".to_string());
    }

    check_selection(
        &mut errors,
        &stack.deployment_option,
        stack.custom_deployment_option.as_deref(),
        "Deployment option is required",
        "Custom deployment option is required",
    );

    ValidationResult::from_errors(errors)
}

fn check_selection(
    errors: &mut Vec<String>,
    selected: &str,
    custom: Option<&str>,
    missing: &str,
    missing_custom: &str,
) {
    if selected.trim().is_empty() {
        errors.push(missing.to_string());
    } else if selected == OTHER && is_blank(custom) {
        errors.push(missing_custom.to_string());
    }
}

/// Step 4: database schema.
pub fn validate_database_schema(schema: Option<&DatabaseSchema>) -> ValidationResult {
    let tables = match schema {
        Some(schema) if !schema.tables.is_empty() => &schema.tables,
        _ => {
            return ValidationResult::from_errors(vec![
                "At least one database table is required".to_string(),
            ])
        }
    };

    let mut errors = Vec::new();
    for (table_index, table) in tables.iter().enumerate() {
        let table_label = if table.name.trim().is_empty() {
            errors.push(format!("Table {} name is required", table_index + 1));
            (table_index + 1).to_string()
        } else {
            table.name.clone()
        };

        if table.fields.is_empty() {
            errors.push(format!(
                "Table {} must have at least one field",
                table_index + 1
            ));
        }

        for (field_index, field) in table.fields.iter().enumerate() {
            let field_label = if field.name.trim().is_empty() {
                errors.push(format!(
                    "Field {} in table {table_label} must have a name",
                    field_index + 1
                ));
                (field_index + 1).to_string()
            } else {
                field.name.clone()
            };

            if field.field_type.is_none() {
                errors.push(format!(
                    "Field {field_label} in table {table_label} must have a type"
                ));
            }
        }

        for (rel_index, relationship) in table.relationships.iter().enumerate() {
            if relationship.table.trim().is_empty() {
                errors.push(format!(
                    "Relationship {} in table {table_label} must specify a related table",
                    rel_index + 1
                ));
            }
            if relationship.relationship_type.is_none() {
                errors.push(format!(
                    "Relationship {} in table {table_label} must specify a relationship type",
                    rel_index + 1
                ));
            }
        }
    }

    ValidationResult::from_errors(errors)
}

/// Step 5: user stories. Reports the aggregate and every blank story.
pub fn validate_user_stories(stories: Option<&[String]>) -> ValidationResult {
    let stories = stories.unwrap_or_default();
    let mut errors = Vec::new();

    if !has_non_blank(stories) {
        errors.push("At least one user story is required".to_string());
    }

    for (index, story) in stories.iter().enumerate() {
        if story.trim().is_empty() {
            errors.push(format!("User story {} cannot be empty", index + 1));
        }
    }

    ValidationResult::from_errors(errors)
}

/// Whole-document validator: the logical AND of the five step validators,
/// with messages concatenated in step order.
pub fn validate_document(draft: &PrdDraft) -> ValidationResult {
    let parts = [
        validate_project_info(draft.project_name.as_deref(), draft.vision.as_deref()),
        validate_reference_links(draft.reference_links.as_deref()),
        validate_tech_stack(draft.tech_stack.as_ref()),
        validate_database_schema(draft.database_schema.as_ref()),
        validate_user_stories(draft.user_stories.as_deref()),
    ];

    ValidationResult::from_errors(parts.into_iter().flat_map(|part| part.errors).collect())
}
