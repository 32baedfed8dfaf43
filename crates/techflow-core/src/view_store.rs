//! View-State Store
//!
//! Per-page holder of the fetched snapshot, pagination and active
//! filters. The snapshot is replaced wholesale on every successful
//! refresh and never patched in place.
//!
//! Overlapping refreshes are resolved by generation: each refresh takes
//! the next number, and a response that is not from the latest refresh is
//! dropped. Results that arrive after [`ViewStore::unmount`] are dropped
//! too.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info};

use crate::client::{ListRequest, ResourceClient, StatusClient};
use crate::error::{ApiError, ApiResult};

/// Observable state of one list view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<E, F> {
    pub entities: Vec<E>,
    pub loading: bool,
    /// 1-based page the entities belong to
    pub page: u32,
    pub total_pages: u32,
    /// Filters the entities were fetched with
    pub filters: F,
    /// Message of the most recent failed call, cleared by the next success
    pub last_error: Option<String>,
}

impl<E, F: Default> Default for ViewState<E, F> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            loading: false,
            page: 1,
            total_pages: 1,
            filters: F::default(),
            last_error: None,
        }
    }
}

impl<E, F> ViewState<E, F> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page to show after the only entity on a page > 1 disappears
    fn page_after_removal(&self) -> u32 {
        if self.entities.len() == 1 && self.page > 1 {
            self.page - 1
        } else {
            self.page
        }
    }
}

/// What happened to one refresh call
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The response replaced the snapshot
    Applied,
    /// A newer refresh was issued meanwhile; the response was dropped
    Stale,
    /// Target page out of range; no request was made
    Skipped,
    /// The store was unmounted; nothing was applied
    Detached,
    /// The request failed; the previous snapshot is kept
    Failed(ApiError),
}

impl RefreshOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, RefreshOutcome::Applied)
    }
}

type Listener<E, F> = Rc<dyn Fn(&ViewState<E, F>)>;

struct Inner<E, F> {
    state: ViewState<E, F>,
    limit: u32,
    generation: u64,
    mounted: bool,
    listeners: Vec<Listener<E, F>>,
}

/// Shared handle to one page's list state. Clones observe the same state.
pub struct ViewStore<C: ResourceClient> {
    client: Rc<C>,
    inner: Rc<RefCell<Inner<C::Entity, C::Filters>>>,
}

impl<C: ResourceClient> Clone for ViewStore<C> {
    fn clone(&self) -> Self {
        Self {
            client: Rc::clone(&self.client),
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: ResourceClient> ViewStore<C> {
    pub fn new(client: Rc<C>, limit: u32) -> Self {
        Self::with_filters(client, limit, C::Filters::default())
    }

    /// Start with a filter set already active (nothing is fetched yet)
    pub fn with_filters(client: Rc<C>, limit: u32, filters: C::Filters) -> Self {
        let state = ViewState {
            filters,
            ..ViewState::default()
        };
        Self {
            client,
            inner: Rc::new(RefCell::new(Inner {
                state,
                limit: limit.max(1),
                generation: 0,
                mounted: true,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn client(&self) -> &Rc<C> {
        &self.client
    }

    pub fn limit(&self) -> u32 {
        self.inner.borrow().limit
    }

    pub fn snapshot(&self) -> ViewState<C::Entity, C::Filters> {
        self.inner.borrow().state.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.borrow().mounted
    }

    /// Register a listener called with every new state
    pub fn subscribe(&self, listener: impl Fn(&ViewState<C::Entity, C::Filters>) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Detach from the page: in-flight results are dropped, listeners released
    pub fn unmount(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.mounted = false;
        inner.listeners.clear();
    }

    fn notify(&self) {
        let (state, listeners) = {
            let inner = self.inner.borrow();
            if !inner.mounted {
                return;
            }
            (inner.state.clone(), inner.listeners.clone())
        };
        for listener in listeners {
            listener(&state);
        }
    }

    fn record_error(&self, err: &ApiError) {
        self.inner.borrow_mut().state.last_error = Some(err.to_string());
        self.notify();
    }

    /// Fetch `page` with `filters` and replace the snapshot on success.
    pub async fn refresh(&self, page: u32, filters: C::Filters) -> RefreshOutcome {
        let (generation, request) = {
            let mut inner = self.inner.borrow_mut();
            if !inner.mounted {
                return RefreshOutcome::Detached;
            }
            inner.generation += 1;
            inner.state.loading = true;
            (inner.generation, ListRequest::new(page, inner.limit, filters))
        };
        self.notify();

        let result = self.client.list(&request).await;

        let outcome = {
            let mut inner = self.inner.borrow_mut();
            if !inner.mounted {
                debug!("dropping page {} response for unmounted view", request.page);
                return RefreshOutcome::Detached;
            }
            if inner.generation != generation {
                info!(
                    "dropping stale page {} response (generation {}, latest {})",
                    request.page, generation, inner.generation
                );
                return RefreshOutcome::Stale;
            }

            let state = &mut inner.state;
            state.loading = false;
            match result {
                Ok(page) => {
                    debug!("loaded {} entities (page {}/{})", page.items.len(), page.current_page, page.total_pages);
                    state.entities = page.items;
                    state.total_pages = page.total_pages;
                    state.page = page.current_page.max(1);
                    state.filters = request.filters;
                    state.last_error = None;
                    RefreshOutcome::Applied
                }
                Err(err) => {
                    error!("failed to load page {}: {}", request.page, err);
                    state.last_error = Some(err.to_string());
                    RefreshOutcome::Failed(err)
                }
            }
        };
        self.notify();
        outcome
    }

    /// Refetch the current page with the current filters
    pub async fn reload(&self) -> RefreshOutcome {
        let (page, filters) = {
            let inner = self.inner.borrow();
            (inner.state.page, inner.state.filters.clone())
        };
        self.refresh(page, filters).await
    }

    /// Move `delta` pages; out-of-range targets issue no request
    pub async fn change_page(&self, delta: i64) -> RefreshOutcome {
        let current = i64::from(self.inner.borrow().state.page);
        match u32::try_from(current + delta) {
            Ok(target) => self.go_to_page(target).await,
            Err(_) => RefreshOutcome::Skipped,
        }
    }

    /// Jump to `page` keeping the filters; no-op outside `1..=total_pages`
    pub async fn go_to_page(&self, page: u32) -> RefreshOutcome {
        let (total_pages, filters) = {
            let inner = self.inner.borrow();
            (inner.state.total_pages, inner.state.filters.clone())
        };
        if page < 1 || page > total_pages {
            debug!("page {} outside 1..={}, not fetching", page, total_pages);
            return RefreshOutcome::Skipped;
        }
        self.refresh(page, filters).await
    }

    /// New filters always restart from page 1
    pub async fn apply_filters(&self, filters: C::Filters) -> RefreshOutcome {
        self.refresh(1, filters).await
    }

    /// Delete an entity, then refresh, stepping back a page if it was the
    /// last one on a page > 1.
    pub async fn remove(&self, id: &str) -> ApiResult<RefreshOutcome> {
        if let Err(err) = self.client.remove(id).await {
            error!("failed to delete {}: {}", id, err);
            self.record_error(&err);
            return Err(err);
        }
        let (page, filters) = {
            let inner = self.inner.borrow();
            (inner.state.page_after_removal(), inner.state.filters.clone())
        };
        Ok(self.refresh(page, filters).await)
    }
}

impl<C: StatusClient> ViewStore<C> {
    /// Narrow status transition followed by a reload
    pub async fn set_status(&self, id: &str, status: C::Status) -> ApiResult<RefreshOutcome> {
        if let Err(err) = self.client.update_status(id, status).await {
            error!("failed to set status {:?} on {}: {}", status, id, err);
            self.record_error(&err);
            return Err(err);
        }
        Ok(self.reload().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use futures::poll;
    use tokio::sync::oneshot;

    use crate::client::{ProjectFilters, TaskFilters};
    use crate::domain::TaskStatus;
    use crate::testing::{project_page, GatedProjects, MockProjects, MockTasks};

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let client = MockProjects::with_projects(12);
        let store = ViewStore::new(client.clone(), 5);

        let outcome = store.refresh(2, ProjectFilters::default()).await;
        assert!(outcome.is_applied());

        let state = store.snapshot();
        assert!(!state.loading);
        assert_eq!(state.page, 2);
        assert_eq!(state.total_pages, 3);
        assert_eq!(state.entities.len(), 5);
        assert_eq!(state.entities[0].name, "Project 6");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_entities() {
        let client = MockProjects::with_projects(3);
        let store = ViewStore::new(client.clone(), 5);
        store.refresh(1, ProjectFilters::default()).await;

        client.fail_lists.set(true);
        let outcome = store.refresh(1, ProjectFilters::search("nothing")).await;
        assert!(matches!(outcome, RefreshOutcome::Failed(_)));

        let state = store.snapshot();
        assert!(!state.loading);
        assert_eq!(state.entities.len(), 3);
        assert_eq!(state.filters, ProjectFilters::default());
        assert!(state.last_error.is_some());
    }

    #[tokio::test]
    async fn test_change_page_out_of_range_makes_no_request() {
        let client = MockProjects::with_projects(7);
        let store = ViewStore::new(client.clone(), 5);
        store.refresh(1, ProjectFilters::default()).await;
        assert_eq!(client.list_calls(), 1);

        assert!(matches!(store.change_page(-1).await, RefreshOutcome::Skipped));
        assert!(matches!(store.go_to_page(0).await, RefreshOutcome::Skipped));
        assert!(matches!(store.go_to_page(3).await, RefreshOutcome::Skipped));
        assert_eq!(client.list_calls(), 1);

        assert!(store.change_page(1).await.is_applied());
        assert_eq!(store.snapshot().page, 2);
        assert!(matches!(store.change_page(1).await, RefreshOutcome::Skipped));
        assert_eq!(client.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_apply_filters_restarts_at_page_one() {
        let client = MockProjects::with_projects(12);
        let store = ViewStore::new(client.clone(), 5);
        store.refresh(3, ProjectFilters::default()).await;
        assert_eq!(store.snapshot().page, 3);

        store.apply_filters(ProjectFilters::search("Project 1")).await;

        let last = client.last_request().unwrap();
        assert_eq!(last.page, 1);
        assert_eq!(last.filters, ProjectFilters::search("Project 1"));

        let state = store.snapshot();
        assert_eq!(state.page, 1);
        assert_eq!(state.filters, ProjectFilters::search("Project 1"));
    }

    #[tokio::test]
    async fn test_reload_uses_last_known_page_and_filters() {
        let client = MockProjects::with_projects(12);
        let store = ViewStore::new(client.clone(), 5);
        store.refresh(2, ProjectFilters::search("Project")).await;

        store.reload().await;
        let last = client.last_request().unwrap();
        assert_eq!(last.page, 2);
        assert_eq!(last.filters, ProjectFilters::search("Project"));
    }

    #[tokio::test]
    async fn test_remove_last_entity_steps_back_a_page() {
        let client = MockProjects::with_projects(6);
        let store = ViewStore::new(client.clone(), 5);
        store.refresh(2, ProjectFilters::default()).await;
        assert_eq!(store.snapshot().entities.len(), 1);

        let id = store.snapshot().entities[0].id.clone();
        let outcome = store.remove(&id).await.unwrap();
        assert!(outcome.is_applied());
        assert_eq!(client.removed.borrow().as_slice(), &[id]);

        let state = store.snapshot();
        assert_eq!(state.page, 1);
        assert_eq!(state.total_pages, 1);
        assert_eq!(state.entities.len(), 5);
    }

    #[tokio::test]
    async fn test_failed_remove_surfaces_error_without_refetch() {
        let client = MockProjects::with_projects(2);
        let store = ViewStore::new(client.clone(), 5);
        store.refresh(1, ProjectFilters::default()).await;

        client.fail_writes.set(true);
        assert!(store.remove("p1").await.is_err());
        assert_eq!(client.list_calls(), 1);
        assert!(store.snapshot().last_error.is_some());
        assert_eq!(store.snapshot().entities.len(), 2);
    }

    #[tokio::test]
    async fn test_set_status_reloads() {
        let client = MockTasks::with_tasks(2);
        let store = ViewStore::new(client.clone(), 50);
        store.refresh(1, TaskFilters::default()).await;

        store.set_status("t1", TaskStatus::Completed).await.unwrap();

        assert_eq!(client.list_calls(), 2);
        let state = store.snapshot();
        assert_eq!(state.entities[0].status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_newer_refresh_wins_when_it_resolves_first() {
        let (tx_old, rx_old) = oneshot::channel();
        let (tx_new, rx_new) = oneshot::channel();
        let store = ViewStore::new(GatedProjects::new(vec![rx_old, rx_new]), 5);

        let mut old = Box::pin(store.refresh(1, ProjectFilters::default()));
        let mut new = Box::pin(store.apply_filters(ProjectFilters::search("new")));
        assert!(poll!(&mut old).is_pending());
        assert!(poll!(&mut new).is_pending());
        assert!(store.snapshot().loading);

        tx_new.send(project_page(&["new"])).unwrap();
        assert!(new.await.is_applied());
        tx_old.send(project_page(&["old"])).unwrap();
        assert!(matches!(old.await, RefreshOutcome::Stale));

        let state = store.snapshot();
        assert_eq!(state.entities[0].name, "new");
        assert_eq!(state.filters, ProjectFilters::search("new"));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_stale_response_resolving_first_is_dropped() {
        let (tx_old, rx_old) = oneshot::channel();
        let (tx_new, rx_new) = oneshot::channel();
        let store = ViewStore::new(GatedProjects::new(vec![rx_old, rx_new]), 5);

        let mut old = Box::pin(store.refresh(1, ProjectFilters::default()));
        let mut new = Box::pin(store.refresh(1, ProjectFilters::default()));
        assert!(poll!(&mut old).is_pending());
        assert!(poll!(&mut new).is_pending());

        tx_old.send(project_page(&["old"])).unwrap();
        assert!(matches!(old.await, RefreshOutcome::Stale));
        let state = store.snapshot();
        assert!(state.entities.is_empty());
        assert!(state.loading, "newer request still in flight");

        tx_new.send(project_page(&["new"])).unwrap();
        assert!(new.await.is_applied());
        assert_eq!(store.snapshot().entities[0].name, "new");
    }

    #[tokio::test]
    async fn test_unmount_drops_in_flight_result() {
        let (tx, rx) = oneshot::channel();
        let store = ViewStore::new(GatedProjects::new(vec![rx]), 5);
        let notified = Rc::new(Cell::new(0));
        let counter = notified.clone();
        store.subscribe(move |_| counter.set(counter.get() + 1));

        let mut pending = Box::pin(store.refresh(1, ProjectFilters::default()));
        assert!(poll!(&mut pending).is_pending());
        assert_eq!(notified.get(), 1);

        store.unmount();
        tx.send(project_page(&["late"])).unwrap();
        assert!(matches!(pending.await, RefreshOutcome::Detached));
        assert!(store.snapshot().entities.is_empty());
        assert_eq!(notified.get(), 1);
        assert!(matches!(
            store.refresh(1, ProjectFilters::default()).await,
            RefreshOutcome::Detached
        ));
    }

    #[tokio::test]
    async fn test_listeners_see_loading_then_result() {
        let client = MockProjects::with_projects(1);
        let store = ViewStore::new(client, 5);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        store.subscribe(move |state| log.borrow_mut().push((state.loading, state.entities.len())));

        store.refresh(1, ProjectFilters::default()).await;
        assert_eq!(seen.borrow().as_slice(), &[(true, 0), (false, 1)]);
    }
}
