//! Domain Layer
//!
//! Entities as the remote API returns them. Snapshots only: nothing here
//! is written back without an explicit client call.

mod entity;
mod project;
mod task;
pub mod timestamp;

pub use entity::Entity;
pub use project::{Project, ProjectStatus};
pub use task::{ProjectSnapshot, Task, TaskPriority, TaskStatus};
