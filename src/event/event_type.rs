//! Static type descriptors used to match events against listener registrations.
//!
//! An event type may extend a single parent type and may satisfy any number of
//! capability sets. Capabilities may themselves extend other capabilities.
//! Descriptors are `static` items, so the whole hierarchy is known at compile
//! time and never needs runtime reflection:
//!
//! ```
//! use cms_core::event::Capability;
//! use cms_core::event::EventType;
//!
//! static AUDITABLE: Capability = Capability::new("auditable");
//! static PAGE_EVENT: EventType = EventType::new("page.event");
//! static PAGE_SAVED: EventType = EventType {
//!     name: "page.saved",
//!     parent: Some(&PAGE_EVENT),
//!     capabilities: &[&AUDITABLE],
//! };
//!
//! assert_eq!(PAGE_SAVED.lineage(), ["page.saved", "page.event", "auditable"]);
//! ```

use std::fmt;

/// Descriptor of a concrete (or abstract parent) event type.
#[derive(Debug)]
pub struct EventType {
    pub name: &'static str,
    pub parent: Option<&'static EventType>,
    pub capabilities: &'static [&'static Capability],
}

/// Descriptor of a capability set (an interface-like contract).
#[derive(Debug)]
pub struct Capability {
    pub name: &'static str,
    pub extends: &'static [&'static Capability],
}

impl EventType {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            parent: None,
            capabilities: &[],
        }
    }

    /// Iterates over the ancestors of this type, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'static EventType> {
        std::iter::successors(self.parent, |event_type| event_type.parent)
    }

    /// Every capability satisfied by this type or any of its ancestors.
    ///
    /// Order: this type, then each ancestor nearest first. For each type its
    /// declared capabilities are taken in declaration order, each followed
    /// depth-first by the capabilities it extends. Duplicates keep their first
    /// position.
    pub fn all_capabilities(&self) -> Vec<&'static Capability> {
        let mut collected: Vec<&'static Capability> = Vec::new();
        let own = std::iter::once(self.capabilities);
        for declared in own.chain(self.ancestors().map(|ancestor| ancestor.capabilities)) {
            for capability in declared {
                capability.collect_into(&mut collected);
            }
        }
        collected
    }

    /// Type identifiers to look listeners up under, in dispatch order: the
    /// exact type, its ancestors nearest first, then its capability sets.
    pub fn lineage(&self) -> Vec<&'static str> {
        std::iter::once(self.name)
            .chain(self.ancestors().map(|ancestor| ancestor.name))
            .chain(self.all_capabilities().into_iter().map(|c| c.name))
            .collect()
    }

    /// Whether this type is `other`, extends it, or satisfies it as a capability.
    pub fn is_a(&self, other: &str) -> bool {
        self.lineage().iter().any(|name| *name == other)
    }
}

impl Capability {
    pub const fn new(name: &'static str) -> Self {
        Self { name, extends: &[] }
    }

    fn collect_into(&'static self, collected: &mut Vec<&'static Capability>) {
        if collected.iter().any(|known| std::ptr::eq(*known, self)) {
            return;
        }
        collected.push(self);
        for parent in self.extends {
            parent.collect_into(collected);
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TRAVERSABLE: Capability = Capability::new("Traversable");
    static ITERATOR_AGGREGATE: Capability = Capability {
        name: "IteratorAggregate",
        extends: &[&TRAVERSABLE],
    };
    static COUNTABLE: Capability = Capability::new("Countable");
    static STOPPABLE: Capability = Capability::new("Stoppable");

    static ROOT: EventType = EventType {
        name: "Root",
        parent: None,
        capabilities: &[&STOPPABLE, &COUNTABLE],
    };
    static MIDDLE: EventType = EventType {
        name: "Middle",
        parent: Some(&ROOT),
        capabilities: &[],
    };
    static LEAF: EventType = EventType {
        name: "Leaf",
        parent: Some(&MIDDLE),
        capabilities: &[&ITERATOR_AGGREGATE, &COUNTABLE],
    };

    #[test]
    fn test_plain_type_lineage_is_itself() {
        static PLAIN: EventType = EventType::new("Plain");
        assert_eq!(PLAIN.lineage(), ["Plain"]);
        assert_eq!(PLAIN.ancestors().count(), 0);
    }

    #[test]
    fn test_ancestors_are_nearest_first() {
        let names: Vec<_> = LEAF.ancestors().map(|a| a.name).collect();
        assert_eq!(names, ["Middle", "Root"]);
    }

    #[test]
    fn test_capabilities_follow_declaration_then_ancestors() {
        let names: Vec<_> = LEAF.all_capabilities().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            ["IteratorAggregate", "Traversable", "Countable", "Stoppable"]
        );
    }

    #[test]
    fn test_lineage_order() {
        assert_eq!(
            LEAF.lineage(),
            [
                "Leaf",
                "Middle",
                "Root",
                "IteratorAggregate",
                "Traversable",
                "Countable",
                "Stoppable"
            ]
        );
    }

    #[test]
    fn test_is_a() {
        assert!(LEAF.is_a("Root"));
        assert!(LEAF.is_a("Traversable"));
        assert!(!ROOT.is_a("Leaf"));
        assert!(!MIDDLE.is_a("IteratorAggregate"));
    }
}
