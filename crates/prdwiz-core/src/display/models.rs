//! Display implementations for domain models.
//!
//! Everything renders as markdown so the terminal renderer can style it.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{
        DocumentSummary, FieldType, PrdDocument, ProofKind, RelationshipType, Stage, StageStatus,
        Table, Tracker,
    },
    notify::{Notification, NotificationKind},
};

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ProofKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn fmt_list(f: &mut fmt::Formatter<'_>, heading: &str, items: &[String]) -> fmt::Result {
    writeln!(f, "## {heading}")?;
    writeln!(f)?;
    if items.is_empty() {
        writeln!(f, "None.")?;
    }
    for item in items {
        writeln!(f, "- {item}")?;
    }
    writeln!(f)
}

impl Table {
    fn fmt_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "| Field | Type | Required | Description |")?;
        writeln!(f, "|---|---|---|---|")?;
        for field in &self.fields {
            let kind = field.field_type.map_or("?", |kind| kind.as_str());
            let required = if field.required { "yes" } else { "no" };
            writeln!(
                f,
                "| {} | {kind} | {required} | {} |",
                field.name, field.description
            )?;
        }
        writeln!(f)?;

        for relationship in &self.relationships {
            let kind = relationship
                .relationship_type
                .map_or("?", |kind| kind.as_str());
            writeln!(f, "- {kind} → {}", relationship.table)?;
        }
        if !self.relationships.is_empty() {
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for PrdDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.project_name)?;
        writeln!(f)?;
        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f)?;
        writeln!(f, "{}", self.vision)?;
        writeln!(f)?;

        writeln!(f, "## Reference Links")?;
        writeln!(f)?;
        for link in &self.reference_links {
            writeln!(f, "- {}: {}", link.link, link.features.join(", "))?;
        }
        writeln!(f)?;

        let stack = &self.tech_stack;
        writeln!(f, "## Tech Stack")?;
        writeln!(f)?;
        writeln!(f, "- **Domain**: {}", stack.domain)?;
        writeln!(f, "- **Repository**: {}", stack.repo_name)?;
        writeln!(f, "- **Frontend**: {}", stack.effective_frontend())?;
        writeln!(f, "- **Backend**: {}", stack.effective_backend())?;
        writeln!(f, "- **Databases**: {}", stack.databases.join(", "))?;
        writeln!(f, "- **Team**: {}", stack.team_members.join(", "))?;
        writeln!(f, "- **Deployment**: {}", stack.effective_deployment())?;
        writeln!(f)?;

        writeln!(f, "## Database Schema")?;
        writeln!(f)?;
        for table in &self.database_schema.tables {
            table.fmt_table(f)?;
        }

        fmt_list(f, "User Stories", &self.user_stories)
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.project_name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Vision**: {}", self.vision)?;
        writeln!(f, "- **Stack**: {} / {}", self.frontend, self.backend)?;
        writeln!(f, "- **User stories**: {}", self.story_count)?;
        writeln!(f)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (done, total) = self.progress();
        writeln!(
            f,
            "## {} ({}) {done}/{total}",
            self.title,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;

        for task in &self.sub_tasks {
            let mark = if task.completed { "x" } else { " " };
            writeln!(f, "- [{mark}] {} (`{}`)", task.title, task.id)?;
        }
        writeln!(f)?;

        if let Some(proof) = &self.proof {
            let content = match proof.kind {
                ProofKind::Link => proof.content.clone(),
                // Inline images are too large to print.
                ProofKind::Screenshot => format!("{} bytes of image data", proof.content.len()),
            };
            writeln!(
                f,
                "Proof ({}, {}): {content}",
                proof.kind,
                LocalDateTime(&proof.timestamp)
            )?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (done, total) = self.progress();
        writeln!(f, "# Implementation: {}", self.project_name)?;
        writeln!(f)?;
        writeln!(f, "- PRD: {}", self.prd_id)?;
        writeln!(f, "- Progress: {done}/{total} tasks")?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.last_updated))?;
        writeln!(f)?;

        for stage in &self.stages {
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.kind {
            NotificationKind::Success => "✓",
            NotificationKind::Error => "✗",
            NotificationKind::Info => "ℹ",
        };
        write!(f, "{icon} {}", self.message)
    }
}
