//! Implementation tracker model: stages, subtasks and proofs.

use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ProofKind, StageStatus};
use crate::error::{PrdError, Result};

/// Evidence that a stage (or subtask) was completed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Proof {
    #[serde(rename = "type")]
    pub kind: ProofKind,
    /// A URL for links, a `data:` URL for screenshots
    pub content: String,
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub timestamp: Timestamp,
}

/// A single checklist item within a stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SubTask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl SubTask {
    /// A fresh, uncompleted subtask.
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            completed: false,
            proof: None,
        }
    }
}

/// A group of subtasks whose status is derived from their completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: StageStatus,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl Stage {
    /// Build a stage whose status already agrees with its subtasks.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        sub_tasks: Vec<SubTask>,
    ) -> Self {
        let mut stage = Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            status: StageStatus::NotStarted,
            sub_tasks,
            proof: None,
        };
        stage.refresh_status();
        stage
    }

    /// `(completed, total)` subtask counts.
    pub fn progress(&self) -> (usize, usize) {
        let completed = self.sub_tasks.iter().filter(|task| task.completed).count();
        (completed, self.sub_tasks.len())
    }

    /// Status as derived from the subtasks, regardless of the stored value.
    pub fn derived_status(&self) -> StageStatus {
        let (completed, total) = self.progress();
        StageStatus::from_completion(completed, total)
    }

    /// Re-derive `status` from the subtasks.
    pub fn refresh_status(&mut self) {
        self.status = self.derived_status();
    }
}

/// The implementation checklist attached to one PRD document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    /// Id of the PRD document this tracker belongs to
    pub prd_id: String,
    pub project_name: String,
    #[cfg_attr(feature = "schema", schemars(with = "String"))]
    pub last_updated: Timestamp,
    pub stages: Vec<Stage>,
}

impl Tracker {
    /// Look up a stage by id.
    pub fn stage(&self, stage_id: &str) -> Option<&Stage> {
        self.stages.iter().find(|stage| stage.id == stage_id)
    }

    fn stage_mut(&mut self, stage_id: &str) -> Result<&mut Stage> {
        self.stages
            .iter_mut()
            .find(|stage| stage.id == stage_id)
            .ok_or_else(|| PrdError::StageNotFound {
                id: stage_id.to_string(),
            })
    }

    /// Flip the completion flag of one subtask and re-derive its stage status.
    ///
    /// Returns the new `completed` value. Nothing is changed when the stage or
    /// subtask does not exist.
    pub fn toggle_subtask(&mut self, stage_id: &str, task_id: &str, now: Timestamp) -> Result<bool> {
        let stage = self.stage_mut(stage_id)?;
        let task = stage
            .sub_tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| PrdError::SubTaskNotFound {
                stage_id: stage_id.to_string(),
                task_id: task_id.to_string(),
            })?;

        task.completed = !task.completed;
        let completed = task.completed;
        stage.refresh_status();
        self.last_updated = now;
        Ok(completed)
    }

    /// Attach stage-level proof, replacing any earlier proof.
    ///
    /// Content must not be blank. No size limit is applied.
    pub fn attach_proof(
        &mut self,
        stage_id: &str,
        kind: ProofKind,
        content: String,
        now: Timestamp,
    ) -> Result<&Proof> {
        if content.trim().is_empty() {
            return Err(PrdError::invalid_input("content").with_reason("Proof content cannot be empty"));
        }

        let stage = self.stage_mut(stage_id)?;
        stage.proof = Some(Proof {
            kind,
            content,
            timestamp: now,
        });
        self.last_updated = now;

        self.stage(stage_id)
            .and_then(|stage| stage.proof.as_ref())
            .ok_or_else(|| PrdError::StageNotFound {
                id: stage_id.to_string(),
            })
    }

    /// Re-derive every stage status from its subtasks.
    ///
    /// Used on trackers arriving from outside so a stored tracker never
    /// carries a status that disagrees with its subtasks.
    pub fn normalize(&mut self) {
        for stage in &mut self.stages {
            stage.refresh_status();
        }
    }

    /// `(completed, total)` subtask counts across all stages.
    pub fn progress(&self) -> (usize, usize) {
        self.stages.iter().fold((0, 0), |(done, total), stage| {
            let (stage_done, stage_total) = stage.progress();
            (done + stage_done, total + stage_total)
        })
    }
}
