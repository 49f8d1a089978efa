use crate::algorithms;
use crate::error::{Error, Result};
use crate::list::arena::Ptr;
use crate::list::List;
use crate::random::RandomSource;
use log::trace;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

mod sort;

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other)
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: PartialOrd> PartialOrd for List<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other)
    }
}

impl<T: Ord> Ord for List<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other)
    }
}

impl<T: Clone> Clone for List<T> {
    /// Appends a clone of each element of `self`, in order, to a new list.
    ///
    /// The clone is a different list: cursors of `self` are not valid for it.
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    fn clone_from(&mut self, other: &Self) {
        while self.len() > other.len() {
            self.pop_back();
        }
        for (elt, elt_other) in self.iter_mut().zip(other) {
            elt.clone_from(elt_other);
        }
        let len = self.len();
        self.extend(other.iter().skip(len).cloned());
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the
    /// given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let list = List::from([0, 1, 2]);
    /// assert!(list.contains(&0));
    /// assert!(!list.contains(&10));
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        algorithms::contains(self, x)
    }

    /// Appends a clone of every element of `other`, in order.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*m*) time, where *m* is the
    /// length of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let other = List::from([3, 4]);
    /// list.join(&other);
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4]);
    /// assert_eq!(other.len(), 2);
    /// ```
    pub fn join(&mut self, other: &List<T>)
    where
        T: Clone,
    {
        self.extend(algorithms::forward(other).cloned());
    }

    /// Builds a new list by joining every list of `lists` in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let (a, b, c) = (List::from([1, 2]), List::from([3, 4]), List::from([5]));
    /// assert_eq!(List::concat([&a, &b, &c]).into_vec(), vec![1, 2, 3, 4, 5]);
    /// assert!(List::<i32>::concat([]).is_empty());
    /// ```
    pub fn concat<'a, I>(lists: I) -> List<T>
    where
        I: IntoIterator<Item = &'a List<T>>,
        T: Clone + 'a,
    {
        let mut result = List::new();
        for list in lists {
            result.join(list);
        }
        trace!("concatenated lists into {} elements", result.len());
        result
    }

    /// Moves all elements from `other` to the back of the list, leaving
    /// `other` empty.
    ///
    /// Elements change arenas on the way, so cursors of `other` become stale.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*m*) time, where *m* is the
    /// length of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([1, 2]);
    /// let mut other = List::from([3, 4]);
    /// list.append(&mut other);
    /// assert!(other.is_empty());
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn append(&mut self, other: &mut List<T>) {
        while let Some(elt) = other.pop_front() {
            self.push_back(elt);
        }
    }

    /// Moves all elements from `other` to the front of the list, leaving
    /// `other` empty.
    pub fn prepend(&mut self, other: &mut List<T>) {
        while let Some(elt) = other.pop_back() {
            self.push_front(elt);
        }
    }

    /// Returns a new list with the elements in reverse order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let list = List::from([1, 2, 3]);
    /// assert_eq!(list.reversed().into_vec(), vec![3, 2, 1]);
    /// assert_eq!(list.reversed().reversed(), list);
    /// ```
    pub fn reversed(&self) -> List<T>
    where
        T: Clone,
    {
        algorithms::backward(self).cloned().collect()
    }

    /// Reverses the list in place by relinking its nodes.
    ///
    /// Cursors stay attached to their elements, and keep advancing in list
    /// order, which is now reversed.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    pub fn reverse(&mut self) {
        let mut current = self.head;
        while let Some(ptr) = current {
            let node = self.node_mut(ptr);
            std::mem::swap(&mut node.next, &mut node.prev);
            current = node.prev;
        }
        std::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Returns a new list of the elements matching `pred`, in their original
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let list = List::from_iter(1..=10);
    /// let evens = list.filter(|x| x % 2 == 0);
    /// assert_eq!(evens.into_vec(), vec![2, 4, 6, 8, 10]);
    /// ```
    pub fn filter<F>(&self, mut pred: F) -> List<T>
    where
        F: FnMut(&T) -> bool,
        T: Clone,
    {
        algorithms::forward(self)
            .filter(|elt| pred(*elt))
            .cloned()
            .collect()
    }

    /// Shuffles the list in place with a Fisher-Yates shuffle: for every
    /// position `i`, an index `j` is drawn from `i..len` and the elements at
    /// `i` and `j` are swapped.
    ///
    /// All indices are drawn before the first swap, so if `rng` fails the
    /// list is left as it was. Elements move between nodes, so cursors keep
    /// their positions but may see different elements.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `rng` returns an index out of its
    /// requested range.
    pub fn shuffle<R>(&mut self, rng: &mut R) -> Result<()>
    where
        R: RandomSource + ?Sized,
    {
        let len = self.len();
        trace!("shuffling a list of {} elements", len);
        let draws = (0..len)
            .map(|i| rng.random_index(i, len))
            .collect::<Result<Vec<_>>>()?;
        let nodes = self.node_ptrs();
        for (i, j) in draws.into_iter().enumerate() {
            self.arena.swap_elements(nodes[i], nodes[j]);
        }
        Ok(())
    }

    /// Returns a shuffled copy of the list. See [`List::shuffle`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `rng` returns an index out of its
    /// requested range.
    pub fn shuffled<R>(&self, rng: &mut R) -> Result<List<T>>
    where
        R: RandomSource + ?Sized,
        T: Clone,
    {
        let mut list = self.clone();
        list.shuffle(rng)?;
        Ok(list)
    }

    /// Inserts `items` before the element at `from`, then removes up to
    /// `delete_count` elements starting at that element. The removed
    /// elements are returned in order.
    ///
    /// If `from` is past the back of the list, `items` are appended and
    /// nothing is removed. Removal stops silently at the back of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from_iter(1..=5);
    /// let removed = list.splice(1, 2, [9, 10]);
    /// assert_eq!(list.to_vec(), vec![1, 9, 10, 4, 5]);
    /// assert_eq!(removed.into_vec(), vec![2, 3]);
    ///
    /// let mut list = List::from([1, 2, 3, 4]);
    /// assert!(list.splice(20, 1, [13]).is_empty());
    /// assert_eq!(list.into_vec(), vec![1, 2, 3, 4, 13]);
    /// ```
    pub fn splice<I>(&mut self, from: usize, delete_count: usize, items: I) -> List<T>
    where
        I: IntoIterator<Item = T>,
    {
        trace!(
            "splicing at {} deleting {} in a list of {} elements",
            from,
            delete_count,
            self.len()
        );
        let target = match self.ptr_at(from) {
            Ok(ptr) => ptr,
            Err(_) => {
                self.extend(items);
                return List::new();
            }
        };
        for item in items {
            let prev = self.node(target).prev;
            self.attach_node(prev, Some(target), item);
        }
        let mut removed = List::new();
        let mut current = Some(target);
        for _ in 0..delete_count {
            match current {
                Some(ptr) => {
                    let node = self.detach_node(ptr);
                    current = node.next;
                    removed.push_back(node.element);
                }
                None => break,
            }
        }
        removed
    }

    /// Removes the first element and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySequence`] if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::{Error, List};
    ///
    /// let mut list = List::from(['x']);
    /// assert_eq!(list.shift(), Ok('x'));
    /// assert_eq!(list.shift(), Err(Error::EmptySequence));
    /// ```
    pub fn shift(&mut self) -> Result<T> {
        self.pop_front().ok_or(Error::EmptySequence)
    }

    /// Sorts the list in place with a stable merge sort.
    ///
    /// Nodes are relinked rather than reallocated, so cursors stay attached
    /// to their elements.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n* log *n*) time and *O*(log *n*)
    /// stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let mut list = List::from([5, 1, 4, 2, 3]);
    /// let one = list.find(1).unwrap();
    /// list.sort();
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
    /// assert_eq!(one, list.begin());
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp)
    }

    /// Sorts the list in place with a comparator function, keeping the
    /// order of equal elements.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        trace!("sorting a list of {} elements", self.len());
        sort::merge_sort(self, |a, b| compare(a, b) == Ordering::Less);
    }

    /// Sorts the list in place with a key extraction function, keeping the
    /// order of elements with equal keys.
    pub fn sort_by_key<K, F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> K,
        K: Ord,
    {
        self.sort_by(|a, b| f(a).cmp(&f(b)))
    }

    /// Returns a sorted copy of the list.
    pub fn sorted(&self) -> List<T>
    where
        T: Ord + Clone,
    {
        self.sorted_by(T::cmp)
    }

    /// Returns a copy of the list sorted with a comparator function, keeping
    /// the order of equal elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_list::List;
    ///
    /// let list = List::from([2, 3, 1]);
    /// let descending = list.sorted_by(|a, b| b.cmp(a));
    /// assert_eq!(descending.into_vec(), vec![3, 2, 1]);
    /// assert_eq!(list.into_vec(), vec![2, 3, 1]);
    /// ```
    pub fn sorted_by<F>(&self, compare: F) -> List<T>
    where
        F: FnMut(&T, &T) -> Ordering,
        T: Clone,
    {
        let mut list = self.clone();
        list.sort_by(compare);
        list
    }

    fn node_ptrs(&self) -> Vec<Ptr> {
        let mut nodes = Vec::with_capacity(self.len());
        let mut current = self.head;
        while let Some(ptr) = current {
            nodes.push(ptr);
            current = self.node(ptr).next;
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::List;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_eq_ord_hash() {
        let a = List::from([1, 2, 3]);
        let b = List::from_iter(1..=3);
        let c = List::from([1, 2, 4]);
        let d = List::from([1, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert!(a < c);
        assert!(d < a);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(hash_of(&a), hash_of(&d));
    }

    #[test]
    fn test_clone_and_clone_from() {
        let list = List::from([1, 2, 3]);
        let copy = list.clone();
        assert_eq!(copy, list);
        copy.check_invariants();

        for len in 0..6 {
            let mut target = List::from_iter(10..10 + len);
            target.clone_from(&list);
            target.check_invariants();
            assert_eq!(target, list);
        }
    }

    #[test]
    fn test_contains() {
        let list = List::from(["a", "b"]);
        assert!(list.contains(&"b"));
        assert!(!list.contains(&"c"));
        assert!(!List::<i32>::new().contains(&0));
    }

    #[test]
    fn test_join_and_concat() {
        let mut list = List::from([1, 2]);
        list.join(&List::new());
        list.join(&List::from([3]));
        assert_eq!(list.to_vec(), vec![1, 2, 3]);

        let lists = [List::from([1, 2]), List::from([3, 4]), List::from([5])];
        let joined = List::concat(&lists);
        joined.check_invariants();
        assert_eq!(joined.into_vec(), vec![1, 2, 3, 4, 5]);
        assert_eq!(lists[1].to_vec(), vec![3, 4]);

        let none: [List<i32>; 0] = [];
        assert!(List::concat(&none).is_empty());
    }

    #[test]
    fn test_append_and_prepend() {
        let mut list = List::from([3, 4]);
        let mut front = List::from([1, 2]);
        let mut back = List::from([5, 6]);
        list.prepend(&mut front);
        list.append(&mut back);
        list.check_invariants();
        assert!(front.is_empty());
        assert!(back.is_empty());
        assert_eq!(list.into_vec(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_reversed_twice_round_trips() {
        for len in 0..10 {
            let list = List::from_iter(0..len);
            let reversed = list.reversed();
            assert_eq!(reversed.to_vec(), (0..len).rev().collect::<Vec<_>>());
            assert_eq!(reversed.reversed(), list);
        }
    }

    #[test]
    fn test_reverse_in_place() {
        for len in 0..10 {
            let mut list = List::from_iter(0..len);
            let first = list.begin();
            list.reverse();
            list.check_invariants();
            assert_eq!(list.to_vec(), (0..len).rev().collect::<Vec<_>>());
            // The old front node is now the back.
            assert_eq!(first.get(&list).ok(), list.back());
            if len > 0 {
                assert!(first.forward(&list, 1).is_end());
            }
        }
    }

    #[test]
    fn test_filter() {
        let list = List::from_iter(1..=10);
        let evens = list.filter(|x| x % 2 == 0);
        evens.check_invariants();
        assert_eq!(evens.to_vec(), vec![2, 4, 6, 8, 10]);
        assert!(list.filter(|_| false).is_empty());
        assert_eq!(list.filter(|_| true), list);
    }

    #[test]
    fn test_shuffle_with_min_source_is_identity() {
        let list = List::from_iter(0..20);
        let mut first = |min: usize, _max: usize| min;
        assert_eq!(list.shuffled(&mut first), Ok(list.clone()));
    }

    #[test]
    fn test_shuffle_with_max_source() {
        // Always drawing the last index rotates the first element to the back.
        let mut list = List::from([1, 2, 3, 4]);
        let mut last = |_min: usize, max: usize| max - 1;
        list.shuffle(&mut last).unwrap();
        assert_eq!(list.into_vec(), vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut source = |min: usize, max: usize| rng.random_range(min..max);
        let list = List::from_iter(0..100);
        let shuffled = list.shuffled(&mut source).unwrap();
        shuffled.check_invariants();
        assert_ne!(shuffled, list);
        assert_eq!(shuffled.sorted(), list);
    }

    #[test]
    fn test_shuffle_failure_leaves_list_untouched() {
        let mut list = List::from([1, 2, 3]);
        let mut calls = 0;
        let mut broken = |min: usize, _max: usize| {
            calls += 1;
            if calls == 2 {
                usize::MAX
            } else {
                min + 1
            }
        };
        assert!(matches!(
            list.shuffle(&mut broken),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(list.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_splice() {
        let mut list = List::from([1, 2, 3, 4]);
        let removed = list.splice(20, 1, [13]);
        assert!(removed.is_empty());
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 13]);

        let mut list = List::from_iter(1..=5);
        let removed = list.splice(1, 2, [9, 10]);
        list.check_invariants();
        assert_eq!(list.to_vec(), vec![1, 9, 10, 4, 5]);
        assert_eq!(removed.into_vec(), vec![2, 3]);
    }

    #[test]
    fn test_splice_edges() {
        // Insert only.
        let mut list = List::from([1, 4]);
        assert!(list.splice(1, 0, [2, 3]).is_empty());
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);

        // Delete only, running off the back.
        let removed = list.splice(2, 10, []);
        list.check_invariants();
        assert_eq!(list.to_vec(), vec![1, 2]);
        assert_eq!(removed.into_vec(), vec![3, 4]);

        // At the front.
        let removed = list.splice(0, 1, [0]);
        assert_eq!(list.to_vec(), vec![0, 2]);
        assert_eq!(removed.into_vec(), vec![1]);

        // On an empty list everything is appended.
        let mut empty = List::new();
        assert!(empty.splice(0, 3, [7, 8]).is_empty());
        assert_eq!(empty.into_vec(), vec![7, 8]);
    }

    #[test]
    fn test_shift() {
        let mut list = List::from([1, 2]);
        assert_eq!(list.shift(), Ok(1));
        assert_eq!(list.shift(), Ok(2));
        assert_eq!(list.shift(), Err(Error::EmptySequence));
        list.check_invariants();
    }

    #[test]
    fn test_sort_variants() {
        let mut list = List::from([3, 1, 2]);
        list.sort();
        assert_eq!(list.to_vec(), vec![1, 2, 3]);

        list.sort_by(|a, b| b.cmp(a));
        assert_eq!(list.to_vec(), vec![3, 2, 1]);

        let mut words = List::from(["ccc", "a", "bb", "dd", "e"]);
        words.sort_by_key(|word| word.len());
        assert_eq!(words.to_vec(), vec!["a", "e", "bb", "dd", "ccc"]);

        let list = List::from([2, 1]);
        assert_eq!(list.sorted().into_vec(), vec![1, 2]);
        assert_eq!(list.to_vec(), vec![2, 1]);
    }

    #[test]
    fn test_sorted_by_is_stable() {
        let list = List::from_iter((0..40).map(|i| (i % 3, i)));
        let sorted = list.sorted_by(|a, b| a.0.cmp(&b.0));
        let mut expected = list.to_vec();
        expected.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(sorted.into_vec(), expected);
    }
}
