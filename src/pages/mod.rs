//! Pages
//!
//! Each list page owns a `ViewStore` plus `FormController` pair, mirrors
//! their state into signals, and releases both when it unmounts.

mod dashboard;
mod projects;
mod tasks;

pub use dashboard::DashboardPage;
pub use projects::ProjectsPage;
pub use tasks::TasksPage;

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use techflow_core::{EntityForm, FormController, FormState, ResourceClient, ViewState, ViewStore};

pub(crate) type ListState<C> =
    ViewState<<C as ResourceClient>::Entity, <C as ResourceClient>::Filters>;

/// Copyable handles of one list page
pub(crate) struct PageHandles<C: ResourceClient + 'static, F: 'static> {
    pub state: ReadSignal<ListState<C>>,
    pub form_state: ReadSignal<FormState<F>>,
    store: StoredValue<ViewStore<C>, LocalStorage>,
    form: StoredValue<FormController<C, F>, LocalStorage>,
}

impl<C: ResourceClient + 'static, F: 'static> Clone for PageHandles<C, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ResourceClient + 'static, F: 'static> Copy for PageHandles<C, F> {}

impl<C, F> PageHandles<C, F>
where
    C: ResourceClient + 'static,
    C::Entity: Send + Sync,
    C::Filters: Send + Sync,
    F: EntityForm<Entity = C::Entity, Draft = C::Draft, Patch = C::Patch> + Send + Sync,
{
    /// Bind a store and its form to the current component.
    ///
    /// Listeners write with `try_set`: a response may land after the
    /// signals are gone, even though `unmount` normally drops it first.
    pub fn bind(store: ViewStore<C>) -> Self {
        let form = FormController::<C, F>::new(store.clone());
        let (state, set_state) = signal(store.snapshot());
        let (form_state, set_form_state) = signal(form.state());
        store.subscribe(move |snapshot| {
            let _ = set_state.try_set(snapshot.clone());
        });
        form.subscribe(move |snapshot| {
            let _ = set_form_state.try_set(snapshot.clone());
        });

        let store = StoredValue::new_local(store);
        let form = StoredValue::new_local(form);
        on_cleanup(move || {
            store.try_with_value(|store| store.unmount());
            form.try_with_value(|form| form.detach());
        });

        Self {
            state,
            form_state,
            store,
            form,
        }
    }

    /// Run an async operation against the store without blocking the UI
    pub fn with_store<Fut>(&self, action: impl FnOnce(ViewStore<C>) -> Fut)
    where
        Fut: Future + 'static,
    {
        if let Some(store) = self.store.try_get_value() {
            let pending = action(store);
            spawn_local(async move {
                pending.await;
            });
        }
    }

    pub fn with_form<Fut>(&self, action: impl FnOnce(FormController<C, F>) -> Fut)
    where
        Fut: Future + 'static,
    {
        if let Some(form) = self.form.try_get_value() {
            let pending = action(form);
            spawn_local(async move {
                pending.await;
            });
        }
    }

    /// Synchronous form edits (field input, start/cancel edit)
    pub fn edit_form(&self, edit: impl FnOnce(&FormController<C, F>)) {
        self.form.try_with_value(edit);
    }
}
