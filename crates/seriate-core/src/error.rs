//! Typed errors for the ordering engine.

#![allow(clippy::module_name_repetitions)]

/// Errors from [`crate::order`].
///
/// Both variants are fatal to the call: no partial ordering is returned,
/// and neither condition is transient. The caller must fix the input
/// graph and re-invoke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    /// A `depends` entry named an id that no item in the graph carries.
    #[error("dependency not found: {dependency} (declared by {declared_by})")]
    UnknownDependency {
        /// The identifier that failed to resolve.
        dependency: String,
        /// Id of the item whose `depends` list named it.
        declared_by: String,
    },

    /// The declared dependencies contain at least one cycle, so no valid
    /// linearization exists. Each inner list is the sorted member ids of
    /// one strongly connected component forming a cycle.
    #[error("dependency cycle among: {}", render_cycles(.cycles))]
    DependencyCycle {
        /// The offending cycles, as reported by [`crate::cycles::find_cycles`].
        cycles: Vec<Vec<String>>,
    },
}

/// Format cycle member lists as `[a -> b -> a], [c -> c]` for error display.
fn render_cycles(cycles: &[Vec<String>]) -> String {
    let rendered: Vec<String> = cycles
        .iter()
        .map(|members| {
            let mut path = members.join(" -> ");
            if let Some(first) = members.first() {
                path.push_str(" -> ");
                path.push_str(first);
            }
            format!("[{path}]")
        })
        .collect();
    rendered.join(", ")
}
