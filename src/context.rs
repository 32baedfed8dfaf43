//! Application Context
//!
//! Shared state provided via Leptos Context API: the API configuration,
//! the resource clients built from it, and the active page.

use leptos::prelude::*;
use techflow_core::{ApiConfig, ApiResult, HttpClient, ProjectClient, TaskClient};

/// Top-level pages reachable from the tab bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Projects,
    Tasks,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::Projects, Page::Tasks];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Projects => "Projects",
            Page::Tasks => "Tasks",
        }
    }
}

/// Clients sharing one connection pool
#[derive(Clone)]
struct Clients {
    projects: ProjectClient,
    tasks: TaskClient,
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub config: StoredValue<ApiConfig>,
    clients: StoredValue<Clients, LocalStorage>,
    /// Active page - read
    pub current_page: ReadSignal<Page>,
    /// Active page - write
    set_current_page: WriteSignal<Page>,
}

impl AppContext {
    pub fn new(config: ApiConfig, current_page: (ReadSignal<Page>, WriteSignal<Page>)) -> ApiResult<Self> {
        let http = HttpClient::new(&config)?;
        let clients = Clients {
            projects: ProjectClient::from_http(http.clone()),
            tasks: TaskClient::from_http(http),
        };
        Ok(Self {
            config: StoredValue::new(config),
            clients: StoredValue::new_local(clients),
            current_page: current_page.0,
            set_current_page: current_page.1,
        })
    }

    pub fn navigate(&self, page: Page) {
        self.set_current_page.set(page);
    }

    pub fn project_client(&self) -> ProjectClient {
        self.clients.with_value(|c| c.projects.clone())
    }

    pub fn task_client(&self) -> TaskClient {
        self.clients.with_value(|c| c.tasks.clone())
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Build the API configuration from build-time environment.
///
/// `TECHFLOW_CONFIG` (a JSON document) is the base; `TECHFLOW_API_URL` and
/// `TECHFLOW_API_TOKEN` override single fields when non-blank.
pub fn config_from_env(
    document: Option<&str>,
    base_url: Option<&str>,
    token: Option<&str>,
) -> ApiResult<ApiConfig> {
    let mut config = match document.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => ApiConfig::from_json(raw)?,
        None => ApiConfig::default(),
    };
    if let Some(url) = base_url.map(str::trim).filter(|url| !url.is_empty()) {
        config.base_url = url.to_string();
    }
    if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
        config = config.with_token(token);
    }
    config.validate()?;
    Ok(config)
}

pub fn build_config() -> ApiResult<ApiConfig> {
    config_from_env(
        option_env!("TECHFLOW_CONFIG"),
        option_env!("TECHFLOW_API_URL"),
        option_env!("TECHFLOW_API_TOKEN"),
    )
}
