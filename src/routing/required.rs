//! Required-middleware propagation.
//!
//! # Responsibilities
//! - Carry prefix/postfix handler names from a group down to its bindings
//! - Enforce per-entry depth budgets
//!
//! # Design Decisions
//! - Pure function of (inherited, own declaration); no shared state
//! - An entry without an explicit depth takes the declaring group's default
//!   depth when it is introduced, never re-evaluated later
//! - Prefix lists read outermost first (ancestor then own); postfix lists
//!   read own then ancestor, so the entries declared closest to a binding run
//!   first after it

use serde::Deserialize;

/// How many more group levels an entry may descend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    #[default]
    Unbounded,
    Levels(u32),
}

impl Depth {
    /// Depth after descending into a child group, or `None` once the budget
    /// is exhausted.
    fn descend(self) -> Option<Depth> {
        match self {
            Depth::Unbounded => Some(Depth::Unbounded),
            Depth::Levels(0) => None,
            Depth::Levels(n) => Some(Depth::Levels(n - 1)),
        }
    }
}

impl From<Option<u32>> for Depth {
    fn from(value: Option<u32>) -> Self {
        value.map(Depth::Levels).unwrap_or_default()
    }
}

/// A handler name tagged with its remaining depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredEntry {
    pub name: String,
    pub depth: Depth,
}

impl RequiredEntry {
    pub fn new(name: impl Into<String>, depth: Depth) -> Self {
        Self {
            name: name.into(),
            depth,
        }
    }
}

/// A `Required` declaration as written on a group.
///
/// Entries are either a bare handler name or `{ "name": .., "depth": .. }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequiredDecl {
    #[serde(default)]
    pub prefix: Vec<DeclEntry>,
    #[serde(default)]
    pub postfix: Vec<DeclEntry>,
    /// Default depth for entries that do not name one. Absent means unbounded.
    #[serde(default)]
    pub depth: Option<u32>,
}

/// One entry of a `Required` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DeclEntry {
    Name(String),
    Tagged { name: String, depth: Option<u32> },
}

impl RequiredDecl {
    fn resolve(entries: &[DeclEntry], default: Depth) -> Vec<RequiredEntry> {
        entries
            .iter()
            .map(|entry| match entry {
                DeclEntry::Name(name) => RequiredEntry::new(name.clone(), default),
                DeclEntry::Tagged { name, depth } => RequiredEntry::new(
                    name.clone(),
                    depth.map(Depth::Levels).unwrap_or(default),
                ),
            })
            .collect()
    }
}

/// Effective prefix/postfix lists visible at one group level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredSpec {
    pub prefix: Vec<RequiredEntry>,
    pub postfix: Vec<RequiredEntry>,
}

impl RequiredSpec {
    /// Names to run before a binding's own handlers.
    pub fn prefix_names(&self) -> impl Iterator<Item = &str> {
        self.prefix.iter().map(|e| e.name.as_str())
    }

    /// Names to run after a binding's own handlers.
    pub fn postfix_names(&self) -> impl Iterator<Item = &str> {
        self.postfix.iter().map(|e| e.name.as_str())
    }

    /// Entries that survive one more level of descent.
    fn descended(entries: &[RequiredEntry]) -> Vec<RequiredEntry> {
        entries
            .iter()
            .filter_map(|e| e.depth.descend().map(|depth| RequiredEntry::new(e.name.clone(), depth)))
            .collect()
    }
}

/// Compute the prefix/postfix lists for a group's children.
///
/// `inherited` is what the parent group handed down (`None` at the tree
/// root). Inherited entries lose one level and are pruned once exhausted;
/// the group's own entries start at their declared depth.
pub fn propagate(inherited: Option<&RequiredSpec>, own: Option<&RequiredDecl>) -> RequiredSpec {
    let (mut prefix, ancestor_postfix) = match inherited {
        Some(spec) => (
            RequiredSpec::descended(&spec.prefix),
            RequiredSpec::descended(&spec.postfix),
        ),
        None => (Vec::new(), Vec::new()),
    };

    let Some(decl) = own else {
        return RequiredSpec {
            prefix,
            postfix: ancestor_postfix,
        };
    };

    let default = Depth::from(decl.depth);
    prefix.extend(RequiredDecl::resolve(&decl.prefix, default));

    let mut postfix = RequiredDecl::resolve(&decl.postfix, default);
    postfix.extend(ancestor_postfix);

    RequiredSpec { prefix, postfix }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(prefix: &[&str], postfix: &[&str], depth: Option<u32>) -> RequiredDecl {
        RequiredDecl {
            prefix: prefix.iter().map(|n| DeclEntry::Name(n.to_string())).collect(),
            postfix: postfix.iter().map(|n| DeclEntry::Name(n.to_string())).collect(),
            depth,
        }
    }

    fn names(entries: &[RequiredEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_prefix_outer_first_postfix_inner_first() {
        let root = propagate(None, Some(&decl(&["outer.pre"], &["outer.post"], None)));
        let child = propagate(Some(&root), Some(&decl(&["inner.pre"], &["inner.post"], None)));

        assert_eq!(names(&child.prefix), vec!["outer.pre", "inner.pre"]);
        assert_eq!(names(&child.postfix), vec!["inner.post", "outer.post"]);
    }

    #[test]
    fn test_depth_zero_stops_at_first_level() {
        let root = propagate(None, Some(&decl(&["auth"], &[], Some(0))));
        assert_eq!(names(&root.prefix), vec!["auth"]);

        let child = propagate(Some(&root), None);
        assert!(child.prefix.is_empty());
    }

    #[test]
    fn test_depth_counts_down_per_level() {
        let root = propagate(None, Some(&decl(&["auth"], &["log"], Some(2))));
        let l1 = propagate(Some(&root), None);
        let l2 = propagate(Some(&l1), None);
        let l3 = propagate(Some(&l2), None);

        assert_eq!(l1.prefix[0].depth, Depth::Levels(1));
        assert_eq!(names(&l2.prefix), vec!["auth"]);
        assert_eq!(names(&l2.postfix), vec!["log"]);
        assert!(l3.prefix.is_empty());
        assert!(l3.postfix.is_empty());
    }

    #[test]
    fn test_explicit_entry_depth_overrides_group_default() {
        let own = RequiredDecl {
            prefix: vec![
                DeclEntry::Tagged { name: "short".into(), depth: Some(0) },
                DeclEntry::Name("long".into()),
            ],
            postfix: vec![],
            depth: None,
        };
        let root = propagate(None, Some(&own));
        let child = propagate(Some(&root), None);

        assert_eq!(root.prefix[1].depth, Depth::Unbounded);
        assert_eq!(names(&child.prefix), vec!["long"]);
    }

    #[test]
    fn test_decl_deserializes_mixed_entries() {
        let decl: RequiredDecl = serde_json::from_str(
            r#"{ "prefix": ["a.b", { "name": "c.d", "depth": 1 }], "depth": 3 }"#,
        )
        .unwrap();

        assert_eq!(decl.depth, Some(3));
        assert_eq!(decl.prefix[0], DeclEntry::Name("a.b".into()));
        assert_eq!(
            decl.prefix[1],
            DeclEntry::Tagged { name: "c.d".into(), depth: Some(1) }
        );
        assert!(decl.postfix.is_empty());
    }
}
