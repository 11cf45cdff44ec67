//! The item model: a named node with declared dependencies.

use serde::{Deserialize, Serialize};

/// One entry in the input collection handed to [`crate::order`].
///
/// An item is identified by its `id` and optionally declares the ids of
/// items it requires. A missing `depends` field deserializes to an empty
/// list; the two are equivalent everywhere in this crate.
///
/// Identity within a graph is positional: the engine reports results as
/// indices into the input slice, and a dependency identifier resolves to
/// the *first* item whose `id` matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, compared for exact equality against `depends`
    /// entries of other items.
    pub id: String,

    /// Ids this item requires. Order is preserved but carries no meaning
    /// for the computed result.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<String>,
}

impl Item {
    /// Create an item with no dependencies.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            depends: Vec::new(),
        }
    }

    /// Builder-style helper: declare the ids this item depends on.
    #[must_use]
    pub fn depends_on<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends = deps.into_iter().map(Into::into).collect();
        self
    }
}
