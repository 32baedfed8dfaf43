//! Domain Layer - Core Entity Trait

/// Core trait for remotely owned entities
pub trait Entity: Clone + std::fmt::Debug {
    /// Server-assigned opaque identifier
    fn id(&self) -> &str;
}
