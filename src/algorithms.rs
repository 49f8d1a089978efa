//! Algorithms written against any container that can be walked in both
//! directions with copyable cursors.
//!
//! [`List`](crate::List) implements [`Bidirectional`], and several of its own
//! algorithms are expressed with the functions here.

use std::iter::FusedIterator;

/// A container that can be traversed in both directions by detached cursors.
///
/// A cursor is either at an element or at one of the two end markers
/// (`end()` for forward traversal, `rend()` for reverse traversal).
/// Advancing moves along the cursor's own direction and yields the end marker
/// past the last element; retreating moves against it and never leaves the
/// first element.
pub trait Bidirectional {
    type Item;
    type Cursor: Copy + Eq;

    /// Forward cursor at the first element, or `end()` if empty.
    fn begin(&self) -> Self::Cursor;
    /// Forward end marker.
    fn end(&self) -> Self::Cursor;
    /// Reverse cursor at the last element, or `rend()` if empty.
    fn rbegin(&self) -> Self::Cursor;
    /// Reverse end marker.
    fn rend(&self) -> Self::Cursor;

    fn advance(&self, cursor: &mut Self::Cursor);
    fn retreat(&self, cursor: &mut Self::Cursor);

    /// The element under `cursor`, or `None` at an end marker or when the
    /// cursor no longer refers to an element of this container.
    fn element<'a>(&'a self, cursor: &Self::Cursor) -> Option<&'a Self::Item>;
}

/// An iterator over the elements of a [`Bidirectional`] container between two
/// cursors, `start..end`.
///
/// It is created by [`walk`], [`forward`] and [`backward`].
pub struct Walk<'a, C: Bidirectional + ?Sized> {
    container: &'a C,
    cursor: C::Cursor,
    end: C::Cursor,
}

impl<'a, C: Bidirectional + ?Sized> Clone for Walk<'a, C> {
    fn clone(&self) -> Self {
        Self {
            container: self.container,
            cursor: self.cursor,
            end: self.end,
        }
    }
}

impl<'a, C: Bidirectional + ?Sized> Iterator for Walk<'a, C> {
    type Item = &'a C::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.end {
            return None;
        }
        match self.container.element(&self.cursor) {
            Some(elt) => {
                self.container.advance(&mut self.cursor);
                Some(elt)
            }
            None => {
                // A cursor that does not reach `end` stops the walk for good.
                self.cursor = self.end;
                None
            }
        }
    }
}

impl<'a, C: Bidirectional + ?Sized> FusedIterator for Walk<'a, C> {}

/// Walk the elements of `container` from `start` up to, not including, `end`.
///
/// The walk stops early if `start` runs into an end marker before it meets
/// `end`.
///
/// # Examples
///
/// ```
/// use ds_list::algorithms::walk;
/// use ds_list::List;
///
/// let list = List::from([1, 2, 3, 4, 5]);
/// let start = list.find(1).unwrap();
/// let end = list.find(4).unwrap();
/// assert_eq!(walk(&list, start, end).collect::<Vec<_>>(), vec![&2, &3, &4]);
/// ```
pub fn walk<C: Bidirectional + ?Sized>(
    container: &C,
    start: C::Cursor,
    end: C::Cursor,
) -> Walk<'_, C> {
    Walk {
        container,
        cursor: start,
        end,
    }
}

/// Walk every element of `container`, from `begin()` to `end()`.
pub fn forward<C: Bidirectional + ?Sized>(container: &C) -> Walk<'_, C> {
    walk(container, container.begin(), container.end())
}

/// Walk every element of `container`, from `rbegin()` to `rend()`.
///
/// # Examples
///
/// ```
/// use ds_list::algorithms::backward;
/// use ds_list::List;
///
/// let list = List::from(['a', 'b', 'c']);
/// assert_eq!(backward(&list).collect::<String>(), "cba");
/// ```
pub fn backward<C: Bidirectional + ?Sized>(container: &C) -> Walk<'_, C> {
    walk(container, container.rbegin(), container.rend())
}

/// Returns `true` if any element of `container` equals `value`.
pub fn contains<C>(container: &C, value: &C::Item) -> bool
where
    C: Bidirectional + ?Sized,
    C::Item: PartialEq,
{
    forward(container).any(|elt| elt == value)
}

/// Returns a forward cursor at the first element matching `pred`, or `end()`.
///
/// # Examples
///
/// ```
/// use ds_list::algorithms::position;
/// use ds_list::List;
///
/// let list = List::from([3, 8, 5, 10]);
/// let cursor = position(&list, |x| x % 2 == 0);
/// assert_eq!(cursor.get(&list), Ok(&8));
/// assert_eq!(position(&list, |x| *x > 100), list.end());
/// ```
pub fn position<C, F>(container: &C, mut pred: F) -> C::Cursor
where
    C: Bidirectional + ?Sized,
    F: FnMut(&C::Item) -> bool,
{
    let end = container.end();
    let mut cursor = container.begin();
    while cursor != end {
        match container.element(&cursor) {
            Some(elt) if pred(elt) => return cursor,
            Some(_) => container.advance(&mut cursor),
            None => break,
        }
    }
    end
}

/// Counts the elements of `container` matching `pred`.
pub fn count_where<C, F>(container: &C, mut pred: F) -> usize
where
    C: Bidirectional + ?Sized,
    F: FnMut(&C::Item) -> bool,
{
    forward(container).filter(|elt| pred(*elt)).count()
}
