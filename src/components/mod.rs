//! UI Components
//!
//! Reusable Leptos components.

mod badges;
mod confirm_delete;
mod nav_tab_bar;
mod pagination;
mod stat_card;

pub use badges::{
    activity_label, PriorityBadge, ProjectStatusBadge, TaskStatusBadge,
};
pub use confirm_delete::ConfirmDelete;
pub use nav_tab_bar::NavTabBar;
pub use pagination::Pagination;
pub use stat_card::StatCard;
