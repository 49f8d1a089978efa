//! This crate provides a doubly-linked list whose nodes live in an arena, and
//! detached cursors that detect when the element they point to is gone.
//!
//! The [`List`] allows inserting, removing elements at any given position in
//! constant time. In compromise, accessing or mutating elements by index takes
//! *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use ds_list::{Error, List};
//!
//! let mut list = List::from([1, 2, 3, 4]);
//!
//! let mut cursor = list.begin();
//! list.insert_before(&cursor, 0).unwrap(); // insert 0 at the front
//! assert_eq!(cursor.get(&list), Ok(&1));
//! assert_eq!(list, List::from([0, 1, 2, 3, 4]));
//!
//! cursor.seek_forward(&list, 2); // move the cursor to 3, and remove it
//! let removed = cursor;
//! assert_eq!(list.remove(&mut cursor), Ok(Some(3)));
//! assert_eq!(cursor.get(&list), Ok(&4));
//! assert_eq!(list, List::from([0, 1, 2, 4]));
//!
//! // The copy taken before the removal is stale now.
//! assert_eq!(removed.get(&list), Err(Error::UndefinedReference));
//! ```
//!
//! # Memory Layout
//!
//! The memory layout of the list is like the following graph:
//! ```text
//!  ╔═══════════╗
//!  ║   head    ║ ─────────────┐                      ┌────────── tail
//!  ╟───────────╢              ↓                      ↓
//!  ║   tail    ║     ┌─────────────┬─────────────┬─────────────┬─────────────┐
//!  ╟───────────╢     │ slot 0      │ slot 1      │ slot 2      │ slot 3      │
//!  ║   len     ║     │ gen 0       │ gen 1       │ gen 0       │ gen 2       │
//!  ╟───────────╢     │ next: 2     │ (vacant)    │ next: None  │ next: 0     │
//!  ║   owner   ║     │ prev: 3     │ next free   │ prev: 0     │ prev: None  │
//!  ╟───────────╢     │ payload T   │ ┄┄┄┄┄┄┄┄┄   │ payload T   │ payload T   │
//!  ║   arena   ║ ──→ └─────────────┴─────────────┴─────────────┴─────────────┘
//!  ╚═══════════╝
//!      List           list order: slot 3 → slot 0 → slot 2
//! ```
//! The `List` contains:
//! - `head` and `tail`, the slots of the first and last elements (both absent
//!   in an empty list);
//! - a length field `len`;
//! - an `owner` tag unique to the list;
//! - the `arena`, a vector of slots. Vacant slots are chained into a free list
//!   and reused by later insertions.
//!
//! Each occupied slot holds:
//! - the `next` link to the slot of the next element (absent for the last
//!   element);
//! - the `prev` link to the slot of the previous element (absent for the first
//!   element);
//! - the actual payload `T`.
//!
//! Every slot also carries a *generation*, bumped each time the slot is freed.
//!
//! # Cursors
//!
//! A [`Cursor`] is a copyable position in a list: the owner tag, slot and
//! generation of its node, plus a [`Direction`]. It does not borrow the list,
//! so cursors can be kept across mutations. If the node is removed, the
//! generation no longer matches and the cursor is detected as stale; it is
//! never dereferenced to a freed or reused slot.
//!
//! A cursor that points to no element is an *end marker*: [`List::end`] for
//! forward cursors and [`List::rend`] for reverse ones.
//!
//! ## Examples
//!
//! ```
//! use ds_list::List;
//!
//! let list = List::from([1, 2, 3]);
//!
//! let mut cursor = list.rbegin();
//! let mut seen = Vec::new();
//! while cursor != list.rend() {
//!     seen.push(*cursor.get(&list).unwrap());
//!     cursor.move_next(&list);
//! }
//! assert_eq!(seen, vec![3, 2, 1]);
//! ```
//!
//! # Iteration
//!
//! Iterating over a list is by the [`Iter`] and [`IterMut`] iterators. These are
//! double-ended iterators and iterate the list like an array (fused and
//! exact-size). [`IterMut`] provides mutability of the elements (but not the
//! linked structure of the list).
//!
//! ```
//! use ds_list::List;
//!
//! let mut list = List::from([1, 2, 3]);
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(&1));
//! assert_eq!(iter.next_back(), Some(&3));
//! assert_eq!(iter.next(), Some(&2));
//! assert_eq!(iter.next(), None);
//! assert_eq!(iter.next(), None); // Fused
//!
//! list.iter_mut().for_each(|item| *item *= 2);
//! assert_eq!(list.into_vec(), vec![2, 4, 6]);
//! ```
//!
//! # Algorithms
//!
//! On top of the cursor primitives the list provides [`splice`], [`join`],
//! [`concat`], [`reversed`], [`filter`], [`shuffle`] and [`sort`]. Containers
//! other than [`List`] can reuse the traversal algorithms of the
//! [`algorithms`] module by implementing [`Bidirectional`].
//!
//! ```
//! use ds_list::List;
//!
//! let mut list = List::from_iter(1..=5);
//! list.splice(1, 2, [9, 10]);
//! assert_eq!(list.to_vec(), vec![1, 9, 10, 4, 5]);
//!
//! assert_eq!(list.filter(|x| x % 2 == 0).into_vec(), vec![10, 4]);
//! assert_eq!(list.sorted().into_vec(), vec![1, 4, 5, 9, 10]);
//! ```
//!
//! # Features
//!
//! - `rand` (default): provides [`Uniform`], a [`RandomSource`] backed by the
//!   `rand` crate. Without it, any `FnMut(usize, usize) -> usize` can be used as
//!   a random source.
//!
//! # Logging
//!
//! Bulk operations and rejected cursors are reported through the [`log`]
//! facade at `trace` and `debug` level. No logger is installed by this crate.
//!
//! [`splice`]: List::splice
//! [`join`]: List::join
//! [`concat`]: List::concat
//! [`reversed`]: List::reversed
//! [`filter`]: List::filter
//! [`shuffle`]: List::shuffle
//! [`sort`]: List::sort
//! [`Bidirectional`]: algorithms::Bidirectional
//! [`Uniform`]: random::Uniform

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use list::cursor::{Cursor, Direction};
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter, IterMut};
#[doc(inline)]
pub use list::List;
#[doc(inline)]
pub use random::RandomSource;
#[cfg(feature = "rand")]
#[doc(inline)]
pub use random::Uniform;

pub mod algorithms;
pub mod list;
pub mod random;

mod error;
