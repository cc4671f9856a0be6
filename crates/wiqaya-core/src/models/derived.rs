use serde::{Deserialize, Serialize};

/// A field that may arrive pre-computed from an external import.
///
/// `Provided` values are authoritative and skip computation entirely;
/// `Compute` means the scoring engine derives the value itself. On the wire
/// this is a nullable `T`: `null` or a missing key is `Compute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "Option<T>",
    into = "Option<T>",
    bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>")
)]
pub enum Derived<T: Clone> {
    Provided(T),
    Compute,
}

impl<T: Clone> Derived<T> {
    /// Return the provided value, or run `compute` when none was supplied.
    pub fn resolve(self, compute: impl FnOnce() -> T) -> T {
        match self {
            Derived::Provided(value) => value,
            Derived::Compute => compute(),
        }
    }

    pub fn is_compute(&self) -> bool {
        matches!(self, Derived::Compute)
    }
}

impl<T: Clone> Default for Derived<T> {
    fn default() -> Self {
        Derived::Compute
    }
}

impl<T: Clone> From<Option<T>> for Derived<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Derived::Provided(v),
            None => Derived::Compute,
        }
    }
}

impl<T: Clone> From<Derived<T>> for Option<T> {
    fn from(value: Derived<T>) -> Self {
        match value {
            Derived::Provided(v) => Some(v),
            Derived::Compute => None,
        }
    }
}
