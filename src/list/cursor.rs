use crate::algorithms::Bidirectional;
use crate::error::{Error, Result};
use crate::list::arena::Ptr;
use crate::list::List;
use log::debug;
use std::fmt;
use std::fmt::Formatter;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// The direction a [`Cursor`] advances in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Advancing follows `next` links, from front to back.
    Forward,
    /// Advancing follows `prev` links, from back to front.
    Reverse,
}

/// A checked reference to one node: the list it came from, its slot, and the
/// slot generation observed when the reference was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeRef {
    pub(crate) owner: u64,
    pub(crate) ptr: Ptr,
    pub(crate) generation: u32,
}

/// A position in a [`List`], tagged with a [`Direction`].
///
/// A `Cursor` does not borrow the list. Every operation takes the list as an
/// argument, so any number of cursors can be held while the list is mutated.
/// A cursor whose element has been removed is *stale*: the removal is
/// detected, and dereferencing it returns [`Error::UndefinedReference`]
/// instead of touching a freed or reused node. The same goes for a cursor
/// handed to a list other than the one that created it.
///
/// A cursor pointing to no element is an *end marker*. Advancing past the
/// last element (in the cursor's direction) yields the end marker.
///
/// # Examples
///
/// ```
/// use ds_list::List;
///
/// // Create a list: [A B C D]
/// let list = List::from(['A', 'B', 'C', 'D']);
///
/// // A forward cursor at the front: [|A B C D]
/// let mut cursor = list.begin();
/// assert_eq!(cursor.get(&list), Ok(&'A'));
///
/// // Move it forward: [A|B C D]
/// cursor.move_next(&list);
/// assert_eq!(cursor.get(&list), Ok(&'B'));
///
/// // A reverse cursor at the back walks towards the front: [A B|C D]
/// let mut cursor = list.rbegin();
/// cursor.seek_forward(&list, 2);
/// assert_eq!(cursor.get(&list), Ok(&'B'));
///
/// // Walking off the front yields the reverse end marker.
/// cursor.seek_forward(&list, 5);
/// assert_eq!(cursor, list.rend());
/// assert!(cursor.get(&list).is_err());
/// ```
pub struct Cursor<T> {
    pub(crate) current: Option<NodeRef>,
    direction: Direction,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Cursor<T> {
    pub(crate) fn new(current: Option<NodeRef>, direction: Direction) -> Self {
        Self {
            current,
            direction,
            _marker: PhantomData,
        }
    }

    /// The slot of the current node, or `None` if the cursor is an end marker
    /// or stale.
    fn live_node(&self, list: &List<T>) -> Option<Ptr> {
        self.current.and_then(|node| list.resolve_node(node))
    }

    /// Returns `true` if the cursor is an end marker.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if the cursor points to a live element of `list`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let mut cursor = list.begin();
    /// let copy = cursor;
    /// assert!(copy.is_valid(&list));
    ///
    /// list.remove(&mut cursor).unwrap();
    /// assert!(!copy.is_valid(&list));
    /// assert!(cursor.is_valid(&list));
    /// assert!(!list.end().is_valid(&list));
    /// ```
    pub fn is_valid(&self, list: &List<T>) -> bool {
        self.live_node(list).is_some()
    }

    /// Provides a reference to the element the cursor points to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedReference`] if the cursor is an end marker
    /// or stale.
    pub fn get<'a>(&self, list: &'a List<T>) -> Result<&'a T> {
        match list.resolve(self)? {
            Some(ptr) => Ok(&list.node(ptr).element),
            None => Err(Error::UndefinedReference),
        }
    }

    /// Provides a mutable reference to the element the cursor points to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedReference`] if the cursor is an end marker
    /// or stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// let cursor = list.rbegin();
    /// *cursor.get_mut(&mut list).unwrap() = 30;
    /// assert_eq!(list.back(), Some(&30));
    /// assert!(list.rend().get_mut(&mut list).is_err());
    /// ```
    pub fn get_mut<'a>(&self, list: &'a mut List<T>) -> Result<&'a mut T> {
        match list.resolve(self)? {
            Some(ptr) => Ok(&mut list.node_mut(ptr).element),
            None => Err(Error::UndefinedReference),
        }
    }

    /// Move the cursor one element along its direction.
    ///
    /// Moving past the last element yields the end marker; an end marker
    /// stays where it is. A stale cursor becomes an end marker.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn move_next(&mut self, list: &List<T>) -> &mut Self {
        let node = match self.current {
            Some(node) => node,
            None => return self,
        };
        match list.resolve_node(node) {
            Some(ptr) => {
                let node = list.node(ptr);
                let next = match self.direction {
                    Direction::Forward => node.next,
                    Direction::Reverse => node.prev,
                };
                self.current = next.map(|ptr| list.node_ref(ptr));
            }
            None => {
                debug!("stale cursor at {:?} demoted to an end marker", node.ptr);
                self.current = None;
            }
        }
        self
    }

    /// Move the cursor one element against its direction, if there is such
    /// an element. Otherwise the cursor is left unchanged, so retreating
    /// from the first element never yields an end marker.
    ///
    /// End markers and stale cursors are left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let list = List::from([1, 2]);
    /// let mut cursor = list.begin();
    /// cursor.move_prev(&list);
    /// assert_eq!(cursor, list.begin());
    ///
    /// cursor.move_next(&list).move_prev(&list);
    /// assert_eq!(cursor.get(&list), Ok(&1));
    /// ```
    pub fn move_prev(&mut self, list: &List<T>) -> &mut Self {
        if let Some(ptr) = self.live_node(list) {
            let node = list.node(ptr);
            let prev = match self.direction {
                Direction::Forward => node.prev,
                Direction::Reverse => node.next,
            };
            if let Some(prev) = prev {
                self.current = Some(list.node_ref(prev));
            }
        }
        self
    }

    /// Move the cursor forward and return its position before the move.
    pub fn post_move_next(&mut self, list: &List<T>) -> Self {
        let old = *self;
        self.move_next(list);
        old
    }

    /// Move the cursor backward and return its position before the move.
    pub fn post_move_prev(&mut self, list: &List<T>) -> Self {
        let old = *self;
        self.move_prev(list);
        old
    }

    /// Move the cursor `steps` elements along its direction, stopping early
    /// at the end marker.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(min(*steps*, *n*)) time.
    pub fn seek_forward(&mut self, list: &List<T>, steps: usize) -> &mut Self {
        for _ in 0..steps {
            if self.is_end() {
                break;
            }
            self.move_next(list);
        }
        self
    }

    /// Move the cursor `steps` elements against its direction, stopping early
    /// at the first element.
    pub fn seek_backward(&mut self, list: &List<T>, steps: usize) -> &mut Self {
        for _ in 0..steps {
            let before = *self;
            self.move_prev(list);
            if *self == before {
                break;
            }
        }
        self
    }

    /// Returns a cursor `steps` elements ahead of this one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let list = List::from([1, 2, 3, 4]);
    /// let third = list.begin().forward(&list, 2);
    /// assert_eq!(third.get(&list), Ok(&3));
    /// assert_eq!(third.backward(&list, 1).get(&list), Ok(&2));
    /// assert!(third.forward(&list, 10).is_end());
    /// ```
    pub fn forward(mut self, list: &List<T>, steps: usize) -> Self {
        self.seek_forward(list, steps);
        self
    }

    /// Returns a cursor `steps` elements behind this one.
    pub fn backward(mut self, list: &List<T>, steps: usize) -> Self {
        self.seek_backward(list, steps);
        self
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<T> {}

/// Cursors are equal if they point to the same node with the same direction.
/// End markers of the same direction are always equal.
impl<T> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current && self.direction == other.direction
    }
}

impl<T> Eq for Cursor<T> {}

impl<T> Hash for Cursor<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.current.hash(state);
        self.direction.hash(state);
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.current.map(|node| node.ptr))
            .field("direction", &self.direction)
            .finish()
    }
}

impl<T> Bidirectional for List<T> {
    type Item = T;
    type Cursor = Cursor<T>;

    fn begin(&self) -> Cursor<T> {
        List::begin(self)
    }

    fn end(&self) -> Cursor<T> {
        List::end(self)
    }

    fn rbegin(&self) -> Cursor<T> {
        List::rbegin(self)
    }

    fn rend(&self) -> Cursor<T> {
        List::rend(self)
    }

    fn advance(&self, cursor: &mut Cursor<T>) {
        cursor.move_next(self);
    }

    fn retreat(&self, cursor: &mut Cursor<T>) {
        cursor.move_prev(self);
    }

    fn element<'a>(&'a self, cursor: &Cursor<T>) -> Option<&'a T> {
        cursor.get(self).ok()
    }
}
