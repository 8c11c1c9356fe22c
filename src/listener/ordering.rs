//! Stable topological ordering of listeners declared with `before` / `after`.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::listener::error::ListenerConfigError;

/// An item that can be ordered relative to its siblings.
///
/// Several items may share an identifier; a constraint naming it applies to
/// each of them.
pub trait Ordered {
    fn identifier(&self) -> Cow<'_, str>;
    /// Identifiers this item must run before.
    fn before(&self) -> &[String];
    /// Identifiers this item must run after.
    fn after(&self) -> &[String];
}

impl<T: Ordered> Ordered for &T {
    fn identifier(&self) -> Cow<'_, str> {
        (**self).identifier()
    }

    fn before(&self) -> &[String] {
        (**self).before()
    }

    fn after(&self) -> &[String] {
        (**self).after()
    }
}

/// Orders `items` so every `before` / `after` constraint holds.
///
/// Among items whose constraints are satisfied, declaration order is kept.
/// Constraints naming unknown identifiers are ignored.
pub fn order_by_dependencies<T: Ordered>(items: &[T]) -> Result<Vec<&T>, ListenerConfigError> {
    let mut index: HashMap<Cow<'_, str>, Vec<usize>> = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        index.entry(item.identifier()).or_default().push(position);
    }

    // successors[a] contains b when a must run before b.
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); items.len()];
    let mut in_degree: Vec<usize> = vec![0; items.len()];
    let mut add_edge = |from: usize, to: usize| {
        if from != to && !successors[from].contains(&to) {
            successors[from].push(to);
            in_degree[to] += 1;
        }
    };

    for (position, item) in items.iter().enumerate() {
        for target in item.before() {
            for &other in index.get(target.as_str()).into_iter().flatten() {
                add_edge(position, other);
            }
        }
        for target in item.after() {
            for &other in index.get(target.as_str()).into_iter().flatten() {
                add_edge(other, position);
            }
        }
    }

    let mut placed = vec![false; items.len()];
    let mut ordered = Vec::with_capacity(items.len());
    while let Some(next) = (0..items.len()).find(|&i| !placed[i] && in_degree[i] == 0) {
        placed[next] = true;
        ordered.push(&items[next]);
        for &successor in &successors[next] {
            in_degree[successor] -= 1;
        }
    }

    if ordered.len() < items.len() {
        let identifiers = items
            .iter()
            .zip(&placed)
            .filter(|(_, placed)| !**placed)
            .map(|(item, _)| item.identifier().into_owned())
            .collect();
        return Err(ListenerConfigError::CircularDependency { identifiers });
    }

    Ok(ordered)
}
