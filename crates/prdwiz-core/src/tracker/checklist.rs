//! Initial implementation checklist derived from a document's tech stack.

use std::collections::HashSet;

use jiff::Timestamp;

use crate::{
    models::{PrdDocument, Stage, SubTask, TechStack, Tracker},
    storage::ids::slugify,
};

/// Build the five-stage checklist for a freshly opened document.
///
/// Titles and descriptions are templated with the effective tech stack
/// selections. The database stage gets one setup and one schema subtask per
/// configured database, in the order the databases were chosen. Databases
/// that share a slug (`Postgres`, `postgres`) get a single pair.
pub fn initial_tracker(document: &PrdDocument, now: Timestamp) -> Tracker {
    let stack = &document.tech_stack;

    Tracker {
        prd_id: document.id.clone(),
        project_name: document.project_name.clone(),
        last_updated: now,
        stages: vec![
            initial_setup(stack),
            frontend_setup(stack),
            backend_setup(stack),
            database_setup(stack),
            deployment_setup(stack),
        ],
    }
}

fn initial_setup(stack: &TechStack) -> Stage {
    Stage::new(
        "initial-setup",
        "Initial Setup",
        "Set up the project repository and development environment",
        vec![
            SubTask::new(
                "create-repo",
                format!("Create GitHub Repository: {}", stack.repo_name),
                "Create a new repository on GitHub with the specified name",
            ),
            SubTask::new(
                "clone-repo",
                "Clone Repository",
                "Clone the repository to your local development environment",
            ),
            SubTask::new(
                "setup-readme",
                "Initialize README",
                "Create and populate README.md with project information",
            ),
        ],
    )
}

fn frontend_setup(stack: &TechStack) -> Stage {
    let framework = stack.effective_frontend();
    Stage::new(
        "frontend-setup",
        "Frontend Setup",
        format!("Set up {framework} project"),
        vec![
            SubTask::new(
                "create-frontend",
                format!("Initialize {framework} Project"),
                "Create a new frontend project with the specified framework",
            ),
            SubTask::new(
                "setup-dependencies",
                "Install Dependencies",
                "Install and configure required dependencies",
            ),
            SubTask::new(
                "setup-structure",
                "Project Structure",
                "Set up project directory structure and base configuration",
            ),
        ],
    )
}

fn backend_setup(stack: &TechStack) -> Stage {
    let framework = stack.effective_backend();
    Stage::new(
        "backend-setup",
        "Backend Setup",
        format!("Set up {framework} project"),
        vec![
            SubTask::new(
                "create-backend",
                format!("Initialize {framework} Project"),
                "Create a new backend project with the specified framework",
            ),
            SubTask::new(
                "setup-api",
                "Setup API Structure",
                "Create basic API structure and endpoints",
            ),
            SubTask::new(
                "setup-middleware",
                "Configure Middleware",
                "Set up necessary middleware and configurations",
            ),
        ],
    )
}

fn database_setup(stack: &TechStack) -> Stage {
    let mut seen = HashSet::new();
    let databases: Vec<(&str, String)> = stack
        .configured_databases()
        .map(|db| (db, slugify(db)))
        .filter(|(_, key)| seen.insert(key.clone()))
        .collect();

    let sub_tasks = databases
        .iter()
        .flat_map(|(db, key)| {
            [
                SubTask::new(
                    format!("setup-{key}"),
                    format!("Setup {db}"),
                    format!("Initialize and configure {db} database"),
                ),
                SubTask::new(
                    format!("{key}-schema"),
                    format!("Create {db} Schema"),
                    "Create and configure database schema",
                ),
            ]
        })
        .collect();

    Stage::new(
        "database-setup",
        "Database Setup",
        format!(
            "Set up {}",
            databases
                .iter()
                .map(|(db, _)| *db)
                .collect::<Vec<_>>()
                .join(" and ")
        ),
        sub_tasks,
    )
}

fn deployment_setup(stack: &TechStack) -> Stage {
    Stage::new(
        "deployment-setup",
        "Deployment Setup",
        format!("Configure {} deployment", stack.effective_deployment()),
        vec![
            SubTask::new("create-dockerfile", "Create Dockerfile", "Create and configure Dockerfile"),
            SubTask::new(
                "setup-compose",
                "Setup Docker Compose",
                "Create and configure docker-compose.yml",
            ),
            SubTask::new(
                "setup-cicd",
                "Configure CI/CD",
                "Set up continuous integration and deployment pipeline",
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixtures::sample_document,
        models::{StageStatus, OTHER},
    };

    #[test]
    fn test_stage_layout() {
        let document = sample_document("Acme").with_id("1-acme".to_string());
        let now = Timestamp::from_second(1_700_000_000).unwrap();
        let tracker = initial_tracker(&document, now);

        let ids: Vec<_> = tracker.stages.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["initial-setup", "frontend-setup", "backend-setup", "database-setup", "deployment-setup"]
        );
        assert_eq!(tracker.prd_id, "1-acme");
        assert_eq!(tracker.last_updated, now);
        assert!(tracker.stages.iter().all(|s| s.status == StageStatus::NotStarted));
        assert_eq!(
            tracker.stages[0].sub_tasks[0].title,
            "Create GitHub Repository: acme-app"
        );
        assert_eq!(tracker.stages[1].sub_tasks[0].title, "Initialize React Project");
        assert_eq!(tracker.stages[2].description, "Set up FastAPI project");
        assert_eq!(tracker.stages[4].description, "Configure Docker deployment");
    }

    #[test]
    fn test_database_stage_has_pair_per_database() {
        let document = sample_document("Acme").with_id("1-acme".to_string());
        let tracker = initial_tracker(&document, Timestamp::now());
        let stage = tracker.stage("database-setup").unwrap();

        let ids: Vec<_> = stage.sub_tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["setup-postgres", "postgres-schema", "setup-redis", "redis-schema"]
        );
        assert_eq!(stage.description, "Set up Postgres and Redis");
        assert_eq!(stage.sub_tasks[1].title, "Create Postgres Schema");
    }

    #[test]
    fn test_databases_sharing_a_slug_get_one_pair() {
        let mut document = sample_document("Acme").with_id("1-acme".to_string());
        document.tech_stack.databases = vec![
            "Postgres".to_string(),
            "postgres".to_string(),
            "Redis".to_string(),
        ];

        let mut tracker = initial_tracker(&document, Timestamp::now());
        let ids: Vec<_> = tracker
            .stage("database-setup")
            .unwrap()
            .sub_tasks
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(
            ids,
            vec!["setup-postgres", "postgres-schema", "setup-redis", "redis-schema"]
        );

        for id in &ids {
            tracker.toggle_subtask("database-setup", id, Timestamp::now()).unwrap();
        }
        let stage = tracker.stage("database-setup").unwrap();
        assert_eq!(stage.status, StageStatus::Completed);
        assert_eq!(stage.description, "Set up Postgres and Redis");
    }

    #[test]
    fn test_uses_custom_framework_names() {
        let mut document = sample_document("Acme").with_id("1-acme".to_string());
        document.tech_stack.frontend_framework = OTHER.to_string();
        document.tech_stack.custom_frontend_framework = Some("Solid".to_string());

        let tracker = initial_tracker(&document, Timestamp::now());
        assert_eq!(tracker.stages[1].description, "Set up Solid project");
    }
}
