use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::list::arena::{Arena, Ptr};
use crate::list::cursor::{Cursor, Direction, NodeRef};
use crate::{Iter, IterMut};

pub mod cursor;
pub mod iterator;

mod algorithms;
mod arena;

/// The `List` is a doubly-linked list whose nodes live in a slot arena.
/// It allows inserting, removing elements at any given position in constant time.
/// In compromise, accessing or mutating elements by index takes *O*(*n*) time.
///
/// The `List` contains:
/// - the `arena` holding every node, addressed by slot pointers;
/// - `head` and `tail`, the slot pointers of the first and last nodes (both
///   absent iff the list is empty);
/// - a length field `len`, maintained on every insertion and removal;
/// - an `owner` tag, unique to this list, stamped into every [`Cursor`] it
///   creates.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed range of list nodes, both inclusive;
/// - `start..end`: a half-open range of list nodes, left inclusive and right
///   exclusive. A `None` end stands for the position past the last node.
pub struct List<T> {
    arena: Arena<T>,
    head: Option<Ptr>,
    tail: Option<Ptr>,
    /// the length of the list
    len: usize,
    owner: u64,
}

pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) next: Option<Ptr>,
    pub(crate) prev: Option<Ptr>,
}

impl<T> Node<T> {
    pub(crate) fn new(element: T) -> Self {
        Node {
            element,
            next: None,
            prev: None,
        }
    }
}

static NEXT_OWNER: AtomicU64 = AtomicU64::new(0);

fn next_owner() -> u64 {
    NEXT_OWNER.fetch_add(1, Ordering::Relaxed)
}

// private methods
impl<T> List<T> {
    pub(crate) fn front_node(&self) -> Option<Ptr> {
        self.head
    }

    pub(crate) fn back_node(&self) -> Option<Ptr> {
        self.tail
    }

    pub(crate) fn node(&self, ptr: Ptr) -> &Node<T> {
        self.arena.node(ptr)
    }

    pub(crate) fn node_mut(&mut self, ptr: Ptr) -> &mut Node<T> {
        self.arena.node_mut(ptr)
    }

    /// The node after `link`, where a `None` link is the position past both
    /// ends of the list (so its successor is the head).
    pub(crate) fn next_of(&self, link: Option<Ptr>) -> Option<Ptr> {
        match link {
            Some(ptr) => self.node(ptr).next,
            None => self.head,
        }
    }

    /// The node before `link`, where a `None` link is the position past both
    /// ends of the list (so its predecessor is the tail).
    pub(crate) fn prev_of(&self, link: Option<Ptr>) -> Option<Ptr> {
        match link {
            Some(ptr) => self.node(ptr).prev,
            None => self.tail,
        }
    }

    /// Make `prev` and `next` adjacent. A `None` on either side updates
    /// `head` or `tail` instead of a node link.
    pub(crate) fn connect(&mut self, prev: Option<Ptr>, next: Option<Ptr>) {
        match prev {
            Some(ptr) => self.node_mut(ptr).next = next,
            None => self.head = next,
        }
        match next {
            Some(ptr) => self.node_mut(ptr).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Allocate a node holding `element` and link it between the adjacent
    /// positions `prev` and `next`.
    fn attach_node(&mut self, prev: Option<Ptr>, next: Option<Ptr>, element: T) -> Ptr {
        #[cfg(debug_assertions)]
        self.assert_adjacent(prev, next);
        let mut node = Node::new(element);
        node.prev = prev;
        node.next = next;
        let ptr = self.arena.alloc(node);
        self.connect(prev, Some(ptr));
        self.connect(Some(ptr), next);
        self.len += 1;
        ptr
    }

    /// Unlink the node `ptr`, reconnecting its neighbours, and free its slot.
    fn detach_node(&mut self, ptr: Ptr) -> Node<T> {
        let node = self.node(ptr);
        let (prev, next) = (node.prev, node.next);
        self.connect(prev, next);
        self.len -= 1;
        self.arena.free(ptr)
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: Option<Ptr>, next: Option<Ptr>) {
        assert_eq!(self.next_of(prev), next);
        assert_eq!(self.prev_of(next), prev);
    }

    pub(crate) fn node_ref(&self, ptr: Ptr) -> NodeRef {
        NodeRef {
            owner: self.owner,
            ptr,
            generation: self.arena.generation(ptr),
        }
    }

    /// Map a node reference back to its slot, or `None` if the node was
    /// removed or belongs to another list.
    pub(crate) fn resolve_node(&self, node: NodeRef) -> Option<Ptr> {
        if node.owner == self.owner && self.arena.is_live(node.ptr, node.generation) {
            Some(node.ptr)
        } else {
            None
        }
    }

    /// Resolve the node a cursor points to: `Ok(None)` for an end marker,
    /// `Err` for a stale cursor.
    pub(crate) fn resolve(&self, cursor: &Cursor<T>) -> Result<Option<Ptr>> {
        match cursor.current {
            None => Ok(None),
            Some(node) => match self.resolve_node(node) {
                Some(ptr) => Ok(Some(ptr)),
                None => {
                    debug!("rejected stale cursor at {:?}", node.ptr);
                    Err(Error::UndefinedReference)
                }
            },
        }
    }

    pub(crate) fn cursor_at_node(&self, ptr: Option<Ptr>, direction: Direction) -> Cursor<T> {
        Cursor::new(ptr.map(|ptr| self.node_ref(ptr)), direction)
    }

    /// Find the node at `index`, walking from whichever end is nearer.
    fn ptr_at(&self, index: usize) -> Result<Ptr> {
        let out_of_range = Error::IndexOutOfRange {
            index,
            len: self.len,
        };
        if index >= self.len {
            return Err(out_of_range);
        }
        let from_back = self.len - 1 - index;
        let found = if index <= from_back {
            (0..index).fold(self.head, |current, _| self.next_of(current))
        } else {
            (0..from_back).fold(self.tail, |current, _| self.prev_of(current))
        };
        found.ok_or(out_of_range)
    }

    /// Walk the whole chain and check the structural invariants, including
    /// that `len` matches the number of reachable nodes.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.len == 0, self.head.is_none());
        assert_eq!(self.len == 0, self.tail.is_none());
        if let Some(head) = self.head {
            assert!(self.node(head).prev.is_none());
        }
        if let Some(tail) = self.tail {
            assert!(self.node(tail).next.is_none());
        }

        let (mut count, mut prev, mut current) = (0, None, self.head);
        while let Some(ptr) = current {
            assert_eq!(self.node(ptr).prev, prev);
            count += 1;
            assert!(count <= self.len, "forward chain is longer than len");
            prev = current;
            current = self.node(ptr).next;
        }
        assert_eq!(prev, self.tail);
        assert_eq!(count, self.len);

        let (mut count, mut current) = (0, self.tail);
        while let Some(ptr) = current {
            count += 1;
            assert!(count <= self.len, "backward chain is longer than len");
            current = self.node(ptr).prev;
        }
        assert_eq!(count, self.len);
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use ds_list::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            head: None,
            tail: None,
            len: 0,
            owner: next_owner(),
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 2);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Removes all elements from the `List`, in order from front to back.
    ///
    /// Every cursor obtained from the list before the call becomes stale,
    /// except end markers.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time and *O*(1) memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let cursor = list.begin();
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.front(), None);
    /// assert!(cursor.get(&list).is_err());
    /// ```
    pub fn clear(&mut self) {
        if self.len > 0 {
            trace!("clearing a list of {} elements", self.len);
        }
        let mut current = self.head;
        while let Some(ptr) = current {
            current = self.arena.free(ptr).next;
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Provides a reference to the front element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|ptr| &self.node(ptr).element)
    }

    /// Provides a mutable reference to the front element, or `None` if the list
    /// is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// if let Some(x) = list.front_mut() {
    ///     *x = 5;
    /// }
    /// assert_eq!(list.front(), Some(&5));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let head = self.head?;
        Some(&mut self.node_mut(head).element)
    }

    /// Provides a reference to the back element, or `None` if the list is
    /// empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|ptr| &self.node(ptr).element)
    }

    /// Provides a mutable reference to the back element, or `None` if the list
    /// is empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let tail = self.tail?;
        Some(&mut self.node_mut(tail).element)
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Some(&2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(&1));
    /// assert_eq!(list.back(), Some(&2));
    /// ```
    pub fn push_front(&mut self, elt: T) {
        self.attach_node(None, self.head, elt);
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Some(&3));
    /// ```
    pub fn push_back(&mut self, elt: T) {
        self.attach_node(self.tail, None, elt);
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([3, 1]);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        Some(self.detach_node(head).element)
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        Some(self.detach_node(tail).element)
    }

    /// Provides a forward cursor at the element with given index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(min(*index*, *len* - *index*)) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::{Error, List};
    ///
    /// let list = List::from(['a', 'b', 'c']);
    /// let cursor = list.find(1).unwrap();
    /// assert_eq!(cursor.get(&list), Ok(&'b'));
    ///
    /// assert_eq!(list.find(3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn find(&self, index: usize) -> Result<Cursor<T>> {
        let ptr = self.ptr_at(index)?;
        Ok(self.cursor_at_node(Some(ptr), Direction::Forward))
    }

    /// Provides a forward cursor at the first element, or the end marker if
    /// the list is empty.
    pub fn begin(&self) -> Cursor<T> {
        self.cursor_at_node(self.head, Direction::Forward)
    }

    /// Provides the forward end marker.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// let mut cursor = list.begin();
    /// let mut seen = Vec::new();
    /// while cursor != list.end() {
    ///     seen.push(*cursor.get(&list).unwrap());
    ///     cursor.move_next(&list);
    /// }
    /// assert_eq!(seen, vec![1, 2, 3]);
    /// ```
    pub fn end(&self) -> Cursor<T> {
        Cursor::new(None, Direction::Forward)
    }

    /// Provides a reverse cursor at the last element, or the reverse end
    /// marker if the list is empty.
    pub fn rbegin(&self) -> Cursor<T> {
        self.cursor_at_node(self.tail, Direction::Reverse)
    }

    /// Provides the reverse end marker.
    pub fn rend(&self) -> Cursor<T> {
        Cursor::new(None, Direction::Reverse)
    }

    /// Inserts an element right after the element the cursor points to.
    ///
    /// If the cursor is an end marker, the element is appended to the back
    /// of the list. "After" always means the list order, whatever the
    /// direction of the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedReference`] if the cursor is stale; the list
    /// is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([1, 2, 4]);
    /// let cursor = list.find(1).unwrap();
    /// list.insert_after(&cursor, 3).unwrap();
    /// list.insert_after(&list.end(), 5).unwrap();
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_after(&mut self, cursor: &Cursor<T>, elt: T) -> Result<()> {
        match self.resolve(cursor)? {
            None => self.push_back(elt),
            Some(ptr) => {
                let next = self.node(ptr).next;
                self.attach_node(Some(ptr), next, elt);
            }
        }
        Ok(())
    }

    /// Inserts an element right after the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn insert_after_index(&mut self, index: usize, elt: T) -> Result<()> {
        let cursor = self.find(index)?;
        self.insert_after(&cursor, elt)
    }

    /// Inserts an element right before the element the cursor points to.
    ///
    /// If the cursor is an end marker, the element is added to the front
    /// of the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedReference`] if the cursor is stale; the list
    /// is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([2, 4]);
    /// let cursor = list.find(1).unwrap();
    /// list.insert_before(&cursor, 3).unwrap();
    /// list.insert_before(&list.end(), 1).unwrap();
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn insert_before(&mut self, cursor: &Cursor<T>, elt: T) -> Result<()> {
        match self.resolve(cursor)? {
            None => self.push_front(elt),
            Some(ptr) => {
                let prev = self.node(ptr).prev;
                self.attach_node(prev, Some(ptr), elt);
            }
        }
        Ok(())
    }

    /// Inserts an element right before the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn insert_before_index(&mut self, index: usize, elt: T) -> Result<()> {
        let cursor = self.find(index)?;
        self.insert_before(&cursor, elt)
    }

    /// Removes the element the cursor points to and returns it, or returns
    /// `None` if the cursor is an end marker.
    ///
    /// After removal, the cursor is moved to the element that followed the
    /// removed one in the cursor's direction, or becomes an end marker if
    /// there is none. This allows removing elements while walking the list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UndefinedReference`] if the cursor is stale; the list
    /// is left untouched.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list: List<_> = (1..=6).collect();
    /// let mut cursor = list.begin();
    /// while !cursor.is_end() {
    ///     if cursor.get(&list).unwrap() % 2 == 0 {
    ///         list.remove(&mut cursor).unwrap();
    ///     } else {
    ///         cursor.move_next(&list);
    ///     }
    /// }
    /// assert_eq!(list.into_vec(), vec![1, 3, 5]);
    /// ```
    pub fn remove(&mut self, cursor: &mut Cursor<T>) -> Result<Option<T>> {
        let ptr = match self.resolve(cursor)? {
            None => return Ok(None),
            Some(ptr) => ptr,
        };
        let node = self.detach_node(ptr);
        let successor = match cursor.direction() {
            Direction::Forward => node.next,
            Direction::Reverse => node.prev,
        };
        cursor.current = successor.map(|ptr| self.node_ref(ptr));
        Ok(Some(node.element))
    }

    /// Removes the element at `index` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// assert_eq!(list.remove_at(1), Ok(2));
    /// assert!(list.remove_at(2).is_err());
    /// assert_eq!(list.into_vec(), vec![1, 3]);
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let mut cursor = self.find(index)?;
        self.remove(&mut cursor)?.ok_or(Error::UndefinedReference)
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let ptr = self.ptr_at(index)?;
        Ok(&self.node(ptr).element)
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([1, 2, 3]);
    /// *list.get_mut(1).unwrap() *= 10;
    /// assert_eq!(list.get(1), Ok(&20));
    /// ```
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let ptr = self.ptr_at(index)?;
        Ok(&mut self.node_mut(ptr).element)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Moves all elements of the list into a `Vec`, front to back.
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Copies all elements of the list into a `Vec`, front to back.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<T> Index<usize> for List<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(elt) => elt,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T> IndexMut<usize> for List<T> {
    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(elt) => elt,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::list::List;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::RefCell;

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
        list.check_invariants();
    }

    #[test]
    fn list_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        list.push_front(DropChecker::new(1, &dropped));
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn list_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<List<String>>();
        assert_send_sync::<crate::Cursor<String>>();
        assert_send_sync::<crate::Iter<'static, String>>();
        assert_send_sync::<crate::IterMut<'static, String>>();
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);

        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        assert_eq!(list.back(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
        list.check_invariants();

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        list.check_invariants();
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));

        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert!(list.is_empty());
        list.check_invariants();
    }

    #[test]
    fn list_len_tracks_appends() {
        for n in 0..20 {
            let mut list = List::new();
            (0..n).for_each(|i| list.push_back(i));
            assert_eq!(list.len(), n);
            assert_eq!(list.is_empty(), n == 0);
            list.check_invariants();
        }
    }

    #[test]
    fn list_find_bounds() {
        for len in 0..8 {
            let list = List::from_iter(0..len);
            for index in 0..len + 3 {
                match list.find(index) {
                    Ok(cursor) => {
                        assert!(index < len);
                        assert_eq!(cursor.get(&list), Ok(&index));
                    }
                    Err(err) => {
                        assert!(index >= len);
                        assert_eq!(err, Error::IndexOutOfRange { index, len });
                    }
                }
            }
        }
    }

    #[test]
    fn list_index_matches_iteration() {
        let list = List::from_iter((0..13).map(|i| i * 7));
        for (i, elt) in list.iter().enumerate() {
            assert_eq!(&list[i], elt);
            assert_eq!(list.get(i), Ok(elt));
        }
    }

    #[test]
    #[should_panic(expected = "index 3 is out of range for a list of length 3")]
    fn list_index_out_of_range_panics() {
        let list = List::from([1, 2, 3]);
        let _ = list[3];
    }

    #[test]
    fn list_index_mut() {
        let mut list = List::from([1, 2, 3]);
        list[0] = 10;
        list[2] += 20;
        assert_eq!(list.to_vec(), vec![10, 2, 23]);
    }

    #[test]
    fn list_insert_around_cursor() {
        let mut list = List::from([2]);
        let cursor = list.begin();
        list.insert_before(&cursor, 1).unwrap();
        list.insert_after(&cursor, 4).unwrap();
        list.insert_after(&cursor, 3).unwrap();
        list.check_invariants();
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);

        // Inserting after the tail keeps the tail consistent.
        let tail = list.rbegin();
        list.insert_after(&tail, 5).unwrap();
        assert_eq!(list.back(), Some(&5));

        // End markers degrade to append and prepend respectively.
        list.insert_after(&list.end(), 6).unwrap();
        list.insert_before(&list.rend(), 0).unwrap();
        list.check_invariants();
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn list_insert_by_index() {
        let mut list = List::from([1, 3]);
        list.insert_after_index(0, 2).unwrap();
        list.insert_before_index(0, 0).unwrap();
        list.insert_after_index(3, 4).unwrap();
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);

        assert_eq!(
            list.insert_after_index(5, 9),
            Err(Error::IndexOutOfRange { index: 5, len: 5 })
        );
        assert_eq!(
            list.insert_before_index(7, 9),
            Err(Error::IndexOutOfRange { index: 7, len: 5 })
        );
        assert_eq!(list.len(), 5);
        list.check_invariants();
    }

    #[test]
    fn list_remove_moves_cursor_to_successor() {
        let mut list = List::from([1, 2, 3]);
        let mut cursor = list.find(1).unwrap();
        assert_eq!(list.remove(&mut cursor), Ok(Some(2)));
        assert_eq!(cursor.get(&list), Ok(&3));

        assert_eq!(list.remove(&mut cursor), Ok(Some(3)));
        assert!(cursor.is_end());
        assert_eq!(cursor.get(&list), Err(Error::UndefinedReference));

        // Removing at an end marker is a no-op.
        assert_eq!(list.remove(&mut cursor), Ok(None));
        assert_eq!(list.to_vec(), vec![1]);
        list.check_invariants();
    }

    #[test]
    fn list_remove_with_reverse_cursor() {
        let mut list = List::from([1, 2, 3]);
        let mut cursor = list.rbegin();
        assert_eq!(list.remove(&mut cursor), Ok(Some(3)));
        assert_eq!(cursor.get(&list), Ok(&2));
        assert_eq!(list.remove(&mut cursor), Ok(Some(2)));
        assert_eq!(list.remove(&mut cursor), Ok(Some(1)));
        assert_eq!(cursor, list.rend());
        assert!(list.is_empty());
        list.check_invariants();
    }

    #[test]
    fn list_stale_cursor_is_rejected() {
        let mut list = List::from([1, 2, 3]);
        let mut cursor = list.find(1).unwrap();
        let copy = cursor;
        list.remove(&mut cursor).unwrap();

        assert_eq!(copy.get(&list), Err(Error::UndefinedReference));
        // The freed slot is reused by the next insertion, but the old cursor
        // still does not see it.
        list.push_back(4);
        assert_eq!(copy.get(&list), Err(Error::UndefinedReference));

        let mut stale = copy;
        assert_eq!(list.remove(&mut stale), Err(Error::UndefinedReference));
        assert_eq!(list.insert_after(&copy, 9), Err(Error::UndefinedReference));
        assert_eq!(list.insert_before(&copy, 9), Err(Error::UndefinedReference));
        assert_eq!(list.to_vec(), vec![1, 3, 4]);
        list.check_invariants();
    }

    #[test]
    fn list_stale_cursor_survives_generation_exhaustion() {
        let mut list = List::from([7]);
        let head = list.head.unwrap();
        list.arena.set_generation(head, u32::MAX - 1);
        let stale = list.begin();

        // Two more cycles exhaust the slot's generations.
        list.pop_front();
        list.push_back(0);
        let mut cursor = list.begin();
        list.remove(&mut cursor).unwrap();
        list.push_back(42);

        assert_eq!(stale.get(&list), Err(Error::UndefinedReference));
        assert_eq!(cursor.get(&list), Err(Error::UndefinedReference));
        assert_eq!(list.begin().get(&list), Ok(&42));
        assert_ne!(list.head, Some(head));
        list.check_invariants();
    }

    #[test]
    fn list_cursor_from_another_list_is_rejected() {
        let list = List::from([1, 2, 3]);
        let other = list.clone();
        let cursor = other.begin();
        assert_eq!(cursor.get(&other), Ok(&1));
        assert_eq!(cursor.get(&list), Err(Error::UndefinedReference));
    }

    #[test]
    fn list_remove_at() {
        let mut list = List::from_iter(0..5);
        assert_eq!(list.remove_at(4), Ok(4));
        assert_eq!(list.remove_at(0), Ok(0));
        assert_eq!(
            list.remove_at(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        list.check_invariants();
    }

    #[test]
    fn list_remove_from_front_until_empty() {
        let mut list = List::from_iter(0..10);
        let mut expected = 0;
        while !list.is_empty() {
            let mut cursor = list.begin();
            assert_eq!(list.remove(&mut cursor), Ok(Some(expected)));
            expected += 1;
            list.check_invariants();
        }
        assert_eq!(list.len(), 0);
        assert!(list.head.is_none());
        assert!(list.tail.is_none());
    }

    #[test]
    fn list_clear() {
        let mut list = List::from_iter(0..10);
        let cursor = list.find(3).unwrap();
        list.clear();
        list.check_invariants();
        assert!(list.is_empty());
        assert_eq!(cursor.get(&list), Err(Error::UndefinedReference));

        list.clear();
        list.push_back(1);
        assert_eq!(list.to_vec(), vec![1]);
        // Cleared slots are reused instead of growing the arena.
        assert_eq!(list.arena.capacity(), 10);
    }

    #[test]
    fn list_matches_vec_model() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut list = List::new();
        let mut model: Vec<u32> = Vec::new();

        for step in 0..2000 {
            let value = rng.random::<u32>();
            match rng.random_range(0..7) {
                0 => {
                    list.push_back(value);
                    model.push(value);
                }
                1 => {
                    list.push_front(value);
                    model.insert(0, value);
                }
                2 if !model.is_empty() => {
                    let index = rng.random_range(0..model.len());
                    list.insert_before_index(index, value).unwrap();
                    model.insert(index, value);
                }
                3 if !model.is_empty() => {
                    let index = rng.random_range(0..model.len());
                    list.insert_after_index(index, value).unwrap();
                    model.insert(index + 1, value);
                }
                4 if !model.is_empty() => {
                    let index = rng.random_range(0..model.len());
                    assert_eq!(list.remove_at(index), Ok(model.remove(index)));
                }
                5 => {
                    assert_eq!(list.pop_back(), model.pop());
                }
                _ => {
                    let expected = if model.is_empty() {
                        None
                    } else {
                        Some(model.remove(0))
                    };
                    assert_eq!(list.pop_front(), expected);
                }
            }
            if step % 100 == 0 {
                list.check_invariants();
            }
            assert_eq!(list.len(), model.len());
        }
        list.check_invariants();
        assert_eq!(list.to_vec(), model);
    }
}
