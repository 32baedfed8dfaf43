use super::EntityForm;
use crate::client::{ProjectDraft, ProjectPatch};
use crate::domain::{Project, ProjectStatus};

/// Fields of the project create/edit form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
}

impl EntityForm for ProjectForm {
    type Entity = Project;
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    fn from_entity(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone().unwrap_or_default(),
            status: project.status,
        }
    }

    fn is_submittable(&self) -> bool {
        !self.name.trim().is_empty()
    }

    fn to_draft(&self) -> ProjectDraft {
        let description = self.description.trim();
        ProjectDraft {
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            status: self.status,
        }
    }

    /// Description is always sent so an edit can clear it
    fn to_patch(&self) -> ProjectPatch {
        ProjectPatch {
            name: Some(self.name.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            status: Some(self.status),
        }
    }
}
