//! Ordered sets with interchangeable balancing strategies.
//!
//! This crate implements one ordered-set contract five times over — as an
//! AVL tree, a red-black tree, a treap, a splay tree and a skip list — plus
//! a thin wrapper over the standard library's B-tree as a reference
//! baseline.  Every variant stores unique elements of an [`Ord`] type,
//! iterates them in ascending order, and exposes the same operations:
//!
//! - `insert` / `remove` (duplicates and absent keys are quiet no-ops),
//! - `find` / `lower_bound` / `contains`,
//! - bidirectional cursors with an explicit one-past-the-end position,
//! - deep copies via `Clone`, bulk construction via `FromIterator`.
//!
//! The variants differ only in how they stay balanced, which is the point:
//! the [`harness`] module drives all of them through the same workloads and
//! records comparative timings, and the [`OrderedSet`] enum dispatches over
//! the variants statically so the comparison measures the algorithms, not
//! the dispatch.
//!
//! ```
//! use ordset::{Kind, OrderedSet};
//!
//! let mut set = OrderedSet::with_seed(Kind::SkipList, 0);
//! set.extend([3, 1, 4, 1, 5]);
//! assert!(set.iter().copied().eq([1, 3, 4, 5]));
//!
//! let mut cursor = set.lower_bound(&2);
//! assert_eq!(cursor.value(), Ok(&3));
//! cursor.move_prev().unwrap();
//! assert_eq!(cursor.value(), Ok(&1));
//! ```
//!
//! # Cursors and mutation
//!
//! A cursor borrows its set, so the borrow checker already rules out using
//! a cursor across a mutation.  Two semantic caveats remain.  Erasing an
//! element conceptually invalidates exactly the cursors that pointed at it,
//! and `clear` invalidates all of them.  And the splay tree restructures
//! itself on *every* access, including lookups — which is why `find`,
//! `lower_bound` and `contains` take `&mut self` on [`SplaySet`] and on
//! [`OrderedSet`].
//!
//! # Randomness
//!
//! The treap and the skip list are the only consumers of randomness.  Each
//! set owns its generator; construct with `with_seed` for deterministic,
//! reproducible behaviour, or with `new` to seed from the operating system.

#![warn(missing_docs)]

pub mod avl;
mod error;
pub mod harness;
mod random;
pub mod red_black;
pub mod set;
pub mod skip_list;
pub mod splay;
pub mod std_set;
pub mod treap;

pub use crate::avl::AvlSet;
pub use crate::error::Error;
pub use crate::red_black::RbSet;
pub use crate::set::{Cursor, IntoIter, Iter, Kind, OrderedSet};
pub use crate::skip_list::SkipListSet;
pub use crate::splay::SplaySet;
pub use crate::std_set::StdSet;
pub use crate::treap::TreapSet;
