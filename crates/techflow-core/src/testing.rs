//! In-memory clients for store and form tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::client::{
    ListPage, ListRequest, ProjectDraft, ProjectFilters, ProjectPatch, ResourceClient,
    StatusClient, TaskDraft, TaskFilters, TaskPatch,
};
use crate::domain::{Project, ProjectStatus, Task, TaskStatus};
use crate::error::{ApiError, ApiResult};

fn paginate<E: Clone>(items: &[E], page: u32, limit: u32) -> ListPage<E> {
    let limit = limit as usize;
    let total_pages = items.len().div_ceil(limit).max(1) as u32;
    let start = (page as usize - 1) * limit;
    ListPage {
        items: items.iter().skip(start).take(limit).cloned().collect(),
        total_pages,
        current_page: page,
    }
}

pub fn project_page(names: &[&str]) -> ListPage<Project> {
    ListPage {
        items: names
            .iter()
            .enumerate()
            .map(|(i, name)| Project::new(format!("p{}", i + 1), *name, ProjectStatus::Active))
            .collect(),
        total_pages: 1,
        current_page: 1,
    }
}

#[derive(Default)]
pub struct MockProjects {
    pub projects: RefCell<Vec<Project>>,
    pub requests: RefCell<Vec<ListRequest<ProjectFilters>>>,
    pub created: RefCell<Vec<ProjectDraft>>,
    pub updated: RefCell<Vec<(String, ProjectPatch)>>,
    pub removed: RefCell<Vec<String>>,
    pub fail_lists: Cell<bool>,
    pub fail_writes: Cell<bool>,
}

impl MockProjects {
    /// Projects `p1..=pN` named `Project 1..=N`
    pub fn with_projects(count: usize) -> Rc<Self> {
        let projects = (1..=count)
            .map(|i| Project::new(format!("p{}", i), format!("Project {}", i), ProjectStatus::Active))
            .collect();
        Rc::new(Self {
            projects: RefCell::new(projects),
            ..Default::default()
        })
    }

    pub fn list_calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn write_calls(&self) -> usize {
        self.created.borrow().len() + self.updated.borrow().len() + self.removed.borrow().len()
    }

    pub fn last_request(&self) -> Option<ListRequest<ProjectFilters>> {
        self.requests.borrow().last().cloned()
    }

    fn check_writes(&self) -> ApiResult<()> {
        if self.fail_writes.get() {
            return Err(ApiError::rejected(500, "write failed"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl ResourceClient for MockProjects {
    type Entity = Project;
    type Filters = ProjectFilters;
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    const DEFAULT_LIMIT: u32 = 10;

    async fn list(&self, request: &ListRequest<ProjectFilters>) -> ApiResult<ListPage<Project>> {
        self.requests.borrow_mut().push(request.clone());
        if self.fail_lists.get() {
            return Err(ApiError::rejected(503, "unavailable"));
        }
        let term = request.filters.search.clone().unwrap_or_default().to_lowercase();
        let matching: Vec<Project> = self
            .projects
            .borrow()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(term.trim()))
            .cloned()
            .collect();
        Ok(paginate(&matching, request.page, request.limit))
    }

    async fn create(&self, draft: &ProjectDraft) -> ApiResult<Project> {
        self.check_writes()?;
        self.created.borrow_mut().push(draft.clone());
        let id = format!("p{}", self.projects.borrow().len() + 100);
        let mut project = Project::new(id, draft.name.clone(), draft.status);
        project.description = draft.description.clone();
        self.projects.borrow_mut().push(project.clone());
        Ok(project)
    }

    async fn update(&self, id: &str, patch: &ProjectPatch) -> ApiResult<Project> {
        self.check_writes()?;
        self.updated.borrow_mut().push((id.to_string(), patch.clone()));
        let mut projects = self.projects.borrow_mut();
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::rejected(404, "project not found"))?;
        if let Some(name) = &patch.name {
            project.name = name.clone();
        }
        if let Some(description) = &patch.description {
            project.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            project.status = status;
        }
        Ok(project.clone())
    }

    async fn remove(&self, id: &str) -> ApiResult<()> {
        self.check_writes()?;
        self.removed.borrow_mut().push(id.to_string());
        self.projects.borrow_mut().retain(|p| p.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockTasks {
    pub tasks: RefCell<Vec<Task>>,
    pub requests: RefCell<Vec<ListRequest<TaskFilters>>>,
    pub created: RefCell<Vec<TaskDraft>>,
    pub updated: RefCell<Vec<(String, TaskPatch)>>,
    pub status_changes: RefCell<Vec<(String, TaskStatus)>>,
    pub fail_writes: Cell<bool>,
}

impl MockTasks {
    /// Tasks `t1..=tN` in project `p1`
    pub fn with_tasks(count: usize) -> Rc<Self> {
        let tasks = (1..=count)
            .map(|i| Task::new(format!("t{}", i), format!("Task {}", i), "p1"))
            .collect();
        Rc::new(Self {
            tasks: RefCell::new(tasks),
            ..Default::default()
        })
    }

    pub fn list_calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn write_calls(&self) -> usize {
        self.created.borrow().len() + self.updated.borrow().len() + self.status_changes.borrow().len()
    }

    fn check_writes(&self) -> ApiResult<()> {
        if self.fail_writes.get() {
            return Err(ApiError::rejected(500, "write failed"));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl ResourceClient for MockTasks {
    type Entity = Task;
    type Filters = TaskFilters;
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const DEFAULT_LIMIT: u32 = 20;

    async fn list(&self, request: &ListRequest<TaskFilters>) -> ApiResult<ListPage<Task>> {
        self.requests.borrow_mut().push(request.clone());
        let filters = &request.filters;
        let matching: Vec<Task> = self
            .tasks
            .borrow()
            .iter()
            .filter(|t| filters.status.map_or(true, |s| t.status == s))
            .filter(|t| filters.priority.map_or(true, |p| t.priority == p))
            .filter(|t| filters.project_id.as_deref().map_or(true, |id| t.project_id == id))
            .cloned()
            .collect();
        Ok(paginate(&matching, request.page, request.limit))
    }

    async fn create(&self, draft: &TaskDraft) -> ApiResult<Task> {
        self.check_writes()?;
        self.created.borrow_mut().push(draft.clone());
        let id = format!("t{}", self.tasks.borrow().len() + 100);
        let mut task = Task::new(id, draft.title.clone(), draft.project_id.clone());
        task.priority = draft.priority;
        self.tasks.borrow_mut().push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> ApiResult<Task> {
        self.check_writes()?;
        self.updated.borrow_mut().push((id.to_string(), patch.clone()));
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::rejected(404, "task not found"))?;
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        Ok(task.clone())
    }

    async fn remove(&self, id: &str) -> ApiResult<()> {
        self.check_writes()?;
        self.tasks.borrow_mut().retain(|t| t.id != id);
        Ok(())
    }
}

#[async_trait(?Send)]
impl StatusClient for MockTasks {
    type Status = TaskStatus;

    async fn update_status(&self, id: &str, status: TaskStatus) -> ApiResult<Task> {
        self.check_writes()?;
        self.status_changes.borrow_mut().push((id.to_string(), status));
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ApiError::rejected(404, "task not found"))?;
        task.status = status;
        Ok(task.clone())
    }
}

/// List calls resolve only when the test sends the page through the
/// matching gate, in call order.
pub struct GatedProjects {
    gates: RefCell<VecDeque<oneshot::Receiver<ListPage<Project>>>>,
}

impl GatedProjects {
    pub fn new(gates: Vec<oneshot::Receiver<ListPage<Project>>>) -> Rc<Self> {
        Rc::new(Self {
            gates: RefCell::new(gates.into()),
        })
    }
}

#[async_trait(?Send)]
impl ResourceClient for GatedProjects {
    type Entity = Project;
    type Filters = ProjectFilters;
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    const DEFAULT_LIMIT: u32 = 10;

    async fn list(&self, _request: &ListRequest<ProjectFilters>) -> ApiResult<ListPage<Project>> {
        let gate = self.gates.borrow_mut().pop_front();
        match gate {
            Some(gate) => gate.await.map_err(|_| ApiError::rejected(499, "gate dropped")),
            None => Err(ApiError::rejected(500, "no gate left")),
        }
    }

    async fn create(&self, _draft: &ProjectDraft) -> ApiResult<Project> {
        Err(ApiError::rejected(405, "read-only"))
    }

    async fn update(&self, _id: &str, _patch: &ProjectPatch) -> ApiResult<Project> {
        Err(ApiError::rejected(405, "read-only"))
    }

    async fn remove(&self, _id: &str) -> ApiResult<()> {
        Err(ApiError::rejected(405, "read-only"))
    }
}
