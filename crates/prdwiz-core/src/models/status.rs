//! Status enumerations for tracker stages and proofs.

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Type-safe enumeration of stage statuses.
///
/// A stage's status is never set directly; it is derived from the completion
/// flags of its subtasks via [`StageStatus::from_completion`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// No subtask is completed
    #[default]
    NotStarted,

    /// Some, but not all, subtasks are completed
    InProgress,

    /// Every subtask is completed
    Completed,
}

impl StageStatus {
    /// Derive the status from a completed/total subtask count.
    ///
    /// Zero completed subtasks is `NotStarted` even for an empty stage.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prdwiz_core::models::StageStatus;
    ///
    /// assert_eq!(StageStatus::from_completion(0, 2), StageStatus::NotStarted);
    /// assert_eq!(StageStatus::from_completion(1, 2), StageStatus::InProgress);
    /// assert_eq!(StageStatus::from_completion(2, 2), StageStatus::Completed);
    /// ```
    pub fn from_completion(completed: usize, total: usize) -> Self {
        if completed == 0 {
            StageStatus::NotStarted
        } else if completed == total {
            StageStatus::Completed
        } else {
            StageStatus::InProgress
        }
    }

    /// Serialized string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            StageStatus::NotStarted => "not_started",
            StageStatus::InProgress => "in_progress",
            StageStatus::Completed => "completed",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prdwiz_core::models::StageStatus;
    ///
    /// assert_eq!(StageStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(StageStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(StageStatus::NotStarted.with_icon(), "○ Not Started");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            StageStatus::Completed => "✓ Completed",
            StageStatus::InProgress => "➤ In Progress",
            StageStatus::NotStarted => "○ Not Started",
        }
    }
}

impl FromStr for StageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" | "notstarted" => Ok(StageStatus::NotStarted),
            "in_progress" | "inprogress" => Ok(StageStatus::InProgress),
            "completed" => Ok(StageStatus::Completed),
            _ => Err(format!("Invalid stage status: {s}")),
        }
    }
}

/// Kind of evidence attached to a stage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ProofKind {
    /// An inline `data:` URL holding an image
    Screenshot,

    /// A plain URL
    Link,
}

impl ProofKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofKind::Screenshot => "screenshot",
            ProofKind::Link => "link",
        }
    }
}

impl FromStr for ProofKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "screenshot" => Ok(ProofKind::Screenshot),
            "link" => Ok(ProofKind::Link),
            _ => Err(format!("Invalid proof type: {s}")),
        }
    }
}
