//! Form Controller
//!
//! Create/edit state for one page. Editing copies the entity once; later
//! changes to that entity are not reflected until editing starts again.
//! A submission that fails remotely keeps the fields and mode so nothing
//! typed is lost.

mod project;
mod task;

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, error, info};

use crate::client::ResourceClient;
use crate::domain::Entity;
use crate::error::ApiError;
use crate::view_store::ViewStore;

pub use project::ProjectForm;
pub use task::TaskForm;

/// Editable field set of one resource
pub trait EntityForm: Clone + Default + PartialEq + std::fmt::Debug + 'static {
    type Entity: Entity;
    type Draft;
    type Patch;

    /// One-time copy of an entity's editable fields
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Local required-field check; failing it means no request at all
    fn is_submittable(&self) -> bool;

    fn to_draft(&self) -> Self::Draft;

    fn to_patch(&self) -> Self::Patch;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    /// Editing the entity with this id
    Edit(String),
}

impl FormMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            FormMode::Edit(id) => Some(id),
            FormMode::Create => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState<F> {
    pub mode: FormMode,
    pub fields: F,
    /// A create/update call is in flight
    pub submitting: bool,
    /// Message of the last failed submission
    pub error: Option<String>,
}

#[derive(Debug)]
pub enum SubmitOutcome<E> {
    /// Required fields missing; nothing changed, nothing sent
    Invalid,
    /// Another submission is still running; ignored
    InFlight,
    /// Written remotely; form reset and list reloaded
    Saved(E),
    /// Remote write failed; fields and mode kept
    Failed(ApiError),
}

type Listener<F> = Rc<dyn Fn(&FormState<F>)>;

struct Inner<F> {
    state: FormState<F>,
    listeners: Vec<Listener<F>>,
}

/// Shared handle to one page's form; clones observe the same state.
pub struct FormController<C: ResourceClient, F> {
    store: ViewStore<C>,
    inner: Rc<RefCell<Inner<F>>>,
}

impl<C: ResourceClient, F> Clone for FormController<C, F> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C, F> FormController<C, F>
where
    C: ResourceClient,
    F: EntityForm<Entity = C::Entity, Draft = C::Draft, Patch = C::Patch>,
{
    /// Writes go through the store's client; saves reload the store.
    pub fn new(store: ViewStore<C>) -> Self {
        Self {
            store,
            inner: Rc::new(RefCell::new(Inner {
                state: FormState::default(),
                listeners: Vec::new(),
            })),
        }
    }

    pub fn state(&self) -> FormState<F> {
        self.inner.borrow().state.clone()
    }

    pub fn subscribe(&self, listener: impl Fn(&FormState<F>) + 'static) {
        self.inner.borrow_mut().listeners.push(Rc::new(listener));
    }

    /// Release listeners when the page goes away
    pub fn detach(&self) {
        self.inner.borrow_mut().listeners.clear();
    }

    fn set_state(&self, update: impl FnOnce(&mut FormState<F>)) {
        let (state, listeners) = {
            let mut inner = self.inner.borrow_mut();
            update(&mut inner.state);
            (inner.state.clone(), inner.listeners.clone())
        };
        for listener in listeners {
            listener(&state);
        }
    }

    /// Empty fields, create mode
    pub fn start_create(&self) {
        self.set_state(|state| *state = FormState::default());
    }

    pub fn start_edit(&self, entity: &C::Entity) {
        let mode = FormMode::Edit(entity.id().to_string());
        let fields = F::from_entity(entity);
        self.set_state(|state| {
            state.mode = mode;
            state.fields = fields;
            state.error = None;
        });
    }

    /// Back to create mode without any request
    pub fn cancel_edit(&self) {
        self.start_create();
    }

    pub fn update_fields(&self, edit: impl FnOnce(&mut F)) {
        self.set_state(|state| edit(&mut state.fields));
    }

    pub async fn submit(&self) -> SubmitOutcome<C::Entity> {
        let (mode, fields) = {
            let inner = self.inner.borrow();
            if inner.state.submitting {
                return SubmitOutcome::InFlight;
            }
            if !inner.state.fields.is_submittable() {
                debug!("form incomplete, not submitting");
                return SubmitOutcome::Invalid;
            }
            (inner.state.mode.clone(), inner.state.fields.clone())
        };
        self.set_state(|state| {
            state.submitting = true;
            state.error = None;
        });

        let client = Rc::clone(self.store.client());
        let result = match &mode {
            FormMode::Create => client.create(&fields.to_draft()).await,
            FormMode::Edit(id) => client.update(id, &fields.to_patch()).await,
        };

        match result {
            Ok(entity) => {
                info!("saved {} ({:?})", entity.id(), mode);
                self.start_create();
                self.store.reload().await;
                SubmitOutcome::Saved(entity)
            }
            Err(err) => {
                error!("failed to save ({:?}): {}", mode, err);
                let message = err.to_string();
                self.set_state(|state| {
                    state.submitting = false;
                    state.error = Some(message);
                });
                SubmitOutcome::Failed(err)
            }
        }
    }
}
