//! The five wizard steps, in order.

use std::fmt;

use crate::{
    models::PrdDraft,
    validation::{
        validate_database_schema, validate_project_info, validate_reference_links,
        validate_tech_stack, validate_user_stories, ValidationResult,
    },
};

/// Number of steps in the wizard.
pub const STEP_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WizardStep {
    ProjectInfo = 1,
    ReferenceLinks = 2,
    TechStack = 3,
    DatabaseSchema = 4,
    UserStories = 5,
}

impl WizardStep {
    pub const ALL: [WizardStep; STEP_COUNT] = [
        WizardStep::ProjectInfo,
        WizardStep::ReferenceLinks,
        WizardStep::TechStack,
        WizardStep::DatabaseSchema,
        WizardStep::UserStories,
    ];

    /// The step at a 1-based position, if it exists.
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// 1-based position of the step.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_last(self) -> bool {
        self.index() == STEP_COUNT
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::ProjectInfo => "Project Information",
            WizardStep::ReferenceLinks => "Reference Links",
            WizardStep::TechStack => "Tech Stack",
            WizardStep::DatabaseSchema => "Database Schema",
            WizardStep::UserStories => "User Stories",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WizardStep::ProjectInfo => "Basic project details",
            WizardStep::ReferenceLinks => "Important resources",
            WizardStep::TechStack => "Technology choices",
            WizardStep::DatabaseSchema => "Data structure",
            WizardStep::UserStories => "Requirements",
        }
    }

    /// Run this step's validator against the draft.
    pub fn validate(self, draft: &PrdDraft) -> ValidationResult {
        match self {
            WizardStep::ProjectInfo => {
                validate_project_info(draft.project_name.as_deref(), draft.vision.as_deref())
            }
            WizardStep::ReferenceLinks => validate_reference_links(draft.reference_links.as_deref()),
            WizardStep::TechStack => validate_tech_stack(draft.tech_stack.as_ref()),
            WizardStep::DatabaseSchema => validate_database_schema(draft.database_schema.as_ref()),
            WizardStep::UserStories => validate_user_stories(draft.user_stories.as_deref()),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {}: {}", self.index(), STEP_COUNT, self.title())
    }
}
