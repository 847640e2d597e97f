use crate::domain::foundation::Timestamp;

/// Source of the current instant.
///
/// Handlers never call the system clock directly; tests substitute a
/// fixed clock to pin time-sensitive rules.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
