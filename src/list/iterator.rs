use crate::list::arena::{Ptr, Slot};
use crate::list::List;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;

/// An iterator over the elements of a `List`.
///
/// It keeps the two outermost nodes not yet yielded, `front..=back`, together
/// with the number of elements between them, so it can be consumed from both
/// ends.
///
/// The iterator borrows the list immutably, so the list cannot be mutated
/// while it is alive.
///
/// # Examples
///
/// ```compile_fail
/// use ds_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter();
///
/// // Won't compile, because list is already borrowed immutably.
/// list.push_back(4);
/// println!("{:?}", iter.next());
/// ```
pub struct Iter<'a, T: 'a> {
    list: &'a List<T>,
    front: Option<Ptr>,
    back: Option<Ptr>,
    len: usize,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            list,
            front: list.front_node(),
            back: list.back_node(),
            len: list.len(),
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

impl<'a, T: fmt::Debug + 'a> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.clone().collect::<Vec<_>>()).finish()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    /// Return `*front` and shrink the range to `(front.next)..=back`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.list.node(self.front?);
        self.front = node.next;
        self.len -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    /// Return `*back` and shrink the range to `front..=(back.prev)`.
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let node = self.list.node(self.back?);
        self.back = node.prev;
        self.len -= 1;
        Some(&node.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a `List`.
///
/// `front..=back` denotes the nodes not yet yielded.
///
/// The iterator holds a raw pointer to the slot storage rather than the list
/// itself, so that it can hand out one `&mut` per node. It still *borrows*
/// the list mutably, so a phantom marker of `&'a mut List<T>` keeps the list
/// from being read while it is alive.
///
/// # Examples
///
/// `List` is not readable after an `IterMut` is created.
/// ```compile_fail
/// use ds_list::List;
///
/// let mut list = List::from([1, 2, 3]);
/// let mut iter = list.iter_mut();
/// println!("{:?}", list.back());
/// println!("{:?}", iter.next());
/// ```
pub struct IterMut<'a, T: 'a> {
    slots: *mut Slot<T>,
    front: Option<Ptr>,
    back: Option<Ptr>,
    len: usize,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        let front = list.front_node();
        let back = list.back_node();
        let len = list.len();
        Self {
            slots: list.arena.slots_ptr(),
            front,
            back,
            len,
            _marker: PhantomData,
        }
    }

    /// # Safety
    ///
    /// `ptr` must be a node of the borrowed list that has not been yielded yet.
    unsafe fn slot(&mut self, ptr: Ptr) -> &'a mut Slot<T> {
        &mut *self.slots.add(ptr.index())
    }
}

impl<'a, T: 'a> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.len).finish()
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let ptr = self.front?;
        // SAFETY: `front..=back` holds `len` unyielded nodes of the borrowed
        // list, and `len > 0`, so `ptr` is occupied and yielded only once.
        let node = unsafe { self.slot(ptr) }.node_mut();
        self.front = node.next;
        self.len -= 1;
        Some(&mut node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: 'a> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let ptr = self.back?;
        // SAFETY: same as `next`, from the other end of the range.
        let node = unsafe { self.slot(ptr) }.node_mut();
        self.back = node.prev;
        self.len -= 1;
        Some(&mut node.element)
    }
}

impl<'a, T: 'a> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T, const N: usize> From<[T; N]> for List<T> {
    fn from(array: [T; N]) -> Self {
        array.into_iter().collect()
    }
}

impl<T> From<Vec<T>> for List<T> {
    fn from(vec: Vec<T>) -> Self {
        vec.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::List;
    use std::fmt::Debug;

    /// Builds a list of `elements` whose nodes sit in slots running against
    /// list order, with a freed slot between every two of them.
    fn scattered<T: Clone>(elements: &[T]) -> List<T> {
        let mut list = List::new();
        for elt in elements.iter().rev() {
            list.push_front(elt.clone());
            list.push_front(elt.clone());
        }
        let mut cursor = list.begin();
        while !cursor.is_end() {
            list.remove(&mut cursor).unwrap();
            cursor.move_next(&list);
        }
        list.check_invariants();
        list
    }

    #[test]
    fn test_iter() {
        // Walks `list` with `$ITER` (reversed if `$REV` is given) and checks
        // it against the same walk over `expected`: once from one end, then
        // switching ends after `mid` elements.
        macro_rules! check_walk {
            ($FN:ident, $ITER:ident $(, $REV:ident)?) => {
                #[allow(unused_mut)]
                fn $FN<T: Eq + Debug>(mut expected: Vec<T>, mut list: List<T>, mid: usize) {
                    let len = expected.len();
                    let mut iter = list.$ITER() $( .$REV() )?;
                    assert_eq!(iter.len(), len);
                    for (i, item) in expected.$ITER() $( .$REV() )?.enumerate() {
                        assert_eq!(iter.next(), Some(item));
                        assert_eq!(iter.len(), len - i - 1);
                    }
                    assert_eq!((iter.next(), iter.next_back(), iter.len()), (None, None, 0));

                    let mut front = list.$ITER() $( .$REV() )?;
                    let mut wanted = expected.$ITER() $( .$REV() )?;
                    for _ in 0..mid {
                        assert_eq!(front.next(), wanted.next());
                    }
                    let mut back = front.rev();
                    let mut wanted = wanted.rev();
                    for i in 0..len - mid {
                        assert_eq!(back.next(), wanted.next());
                        assert_eq!(back.len(), len - mid - i - 1);
                    }
                    assert_eq!((back.next(), back.next_back(), back.len()), (None, None, 0));
                }
            };
        }
        check_walk!(walk_iter, iter);
        check_walk!(walk_iter_mut, iter_mut);
        check_walk!(walk_back_iter, iter, rev);
        check_walk!(walk_back_iter_mut, iter_mut, rev);

        fn check_all<T: Eq + Debug + Clone>(elements: Vec<T>, mid: usize) {
            let lists = [List::from(elements.clone()), scattered(&elements)];
            for list in lists {
                assert_eq!(list.to_vec(), elements);
                walk_iter(elements.clone(), list.clone(), mid);
                walk_iter_mut(elements.clone(), list.clone(), mid);
                walk_back_iter(elements.clone(), list.clone(), mid);
                walk_back_iter_mut(elements.clone(), list, mid);
            }
        }
        for (len, mids) in [
            (10, &[10, 8, 5, 2, 0][..]),
            (2, &[2, 1, 0][..]),
            (1, &[1, 0][..]),
            (0, &[0][..]),
        ] {
            for &mid in mids {
                check_all((0..len).collect(), mid);
                check_all((0..len).map(|i| i.to_string()).collect(), mid);
            }
        }
    }

    #[test]
    fn test_iter_mut_modifies_in_place() {
        let mut list = List::from([1, 2, 3, 4]);
        for elt in &mut list {
            *elt *= 10;
        }
        let mut iter = list.iter_mut();
        *iter.next_back().unwrap() += 1;
        *iter.next().unwrap() += 2;
        assert_eq!(list.into_vec(), vec![12, 20, 30, 41]);
    }

    #[test]
    fn test_into_iter() {
        let list = List::from(vec!['a', 'b', 'c', 'd']);
        let mut iter = list.into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some('a'));
        assert_eq!(iter.next_back(), Some('d'));
        assert_eq!(iter.len(), 2);
        assert_eq!(format!("{:?}", iter), "IntoIter(['b', 'c'])");
        assert_eq!(iter.last(), Some('c'));
    }

    #[test]
    fn test_iter_debug_and_clone() {
        let list = List::from([1, 2, 3]);
        let mut iter = list.iter();
        iter.next();
        let copy = iter.clone();
        assert_eq!(format!("{:?}", iter), "Iter([2, 3])");
        assert_eq!(copy.collect::<Vec<_>>(), vec![&2, &3]);
        assert_eq!(iter.len(), 2);
    }

    #[test]
    fn test_extend() {
        let mut list = List::from([1]);
        list.extend(vec![2, 3]);
        list.extend(&[4, 5]);
        assert_eq!(list.len(), 5);
        assert_eq!(list.into_vec(), vec![1, 2, 3, 4, 5]);
        let empty: List<i32> = std::iter::empty().collect();
        assert!(empty.is_empty());
    }
}
