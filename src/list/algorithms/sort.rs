use crate::list::arena::Ptr;
use crate::List;

const INSERTION_SORT_THRESHOLD: usize = 8;

/// A position in the list: a node, or `None` for the position past the back.
type Link = Option<Ptr>;

/// Stable in-place merge sort. Nodes are relinked, never reallocated, so
/// cursors keep pointing to the same elements.
pub(crate) fn merge_sort<T, F>(list: &mut List<T>, mut less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    let (start, end) = (list.front_node(), None);
    if list.len() < 2 {
    } else if list.len() <= INSERTION_SORT_THRESHOLD {
        insertion_sort_range(list, start, end, &mut less);
    } else {
        merge_sort_range(list, start, end, &mut less);
    }
}

fn element<T>(list: &List<T>, link: Link) -> &T {
    match link {
        Some(ptr) => &list.node(ptr).element,
        None => unreachable!("the position past the back has no element"),
    }
}

fn less_at<T, F>(list: &List<T>, less: &mut F, a: Link, b: Link) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    less(element(list, a), element(list, b))
}

fn mid_of_range<T>(list: &List<T>, mut start: Link, end: Link) -> (Link, usize) {
    let mut mid = start;
    let mut len = 0;
    while start != end {
        len += 1;
        start = list.next_of(start);
        if start != end {
            len += 1;
            start = list.next_of(start);
            mid = list.next_of(mid);
        }
    }
    (mid, len)
}

fn merge_sort_range<T, F>(list: &mut List<T>, mut start: Link, end: Link, less: &mut F) -> Link
where
    F: FnMut(&T, &T) -> bool,
{
    let (mut mid, len) = mid_of_range(list, start, end);
    if len <= INSERTION_SORT_THRESHOLD {
        return insertion_sort_range(list, start, end, less);
    }

    if start != mid && list.next_of(start) != mid {
        start = merge_sort_range(list, start, mid, less);
    }
    if mid != end && list.next_of(mid) != end {
        mid = merge_sort_range(list, mid, end, less);
    }

    if start != mid && mid != end {
        start = merge_range(list, start, mid, end, less);
    }
    start
}

/// Merge the sorted ranges `start..mid` and `mid..end`, returning the new
/// front of the merged range.
fn merge_range<T, F>(list: &mut List<T>, mut start: Link, mid: Link, end: Link, less: &mut F) -> Link
where
    F: FnMut(&T, &T) -> bool,
{
    // `start..to_merge` is merged, `to_merge..end` is not. Runs from the
    // unmerged side are moved into the merged side one at a time.
    let (mut merged, merged_back, mut to_merge) = (start, list.prev_of(mid), mid);
    // Once the front of the unmerged range is not less than the back of the
    // merged range, everything is in order.
    while to_merge != end && less_at(list, less, to_merge, merged_back) {
        // Find the first `merged` with `*to_merge < *merged`.
        while merged != to_merge && !less_at(list, less, to_merge, merged) {
            merged = list.next_of(merged);
        }
        if merged == to_merge {
            break;
        }

        // Extend the run `to_merge..next_to_merge` while it stays below `*merged`.
        let mut next_to_merge = list.next_of(to_merge);
        while next_to_merge != end && less_at(list, less, next_to_merge, merged) {
            next_to_merge = list.next_of(next_to_merge);
        }
        if merged == start {
            start = to_merge;
        }
        let run_back = list.prev_of(next_to_merge);
        move_nodes(list, to_merge, run_back, merged);
        to_merge = next_to_merge;
    }
    start
}

/// Sort the non-empty range `start..end`, returning its new front.
fn insertion_sort_range<T, F>(list: &mut List<T>, mut start: Link, end: Link, less: &mut F) -> Link
where
    F: FnMut(&T, &T) -> bool,
{
    let (mut sorted_back, mut to_sort) = (start, list.next_of(start));
    loop {
        // Skip nodes already in order.
        while to_sort != end && !less_at(list, less, to_sort, sorted_back) {
            sorted_back = to_sort;
            to_sort = list.next_of(to_sort);
        }
        if to_sort == end {
            break;
        }
        // Find the first `sorted` with `*to_sort < *sorted`.
        let mut sorted = start;
        while sorted != to_sort && !less_at(list, less, to_sort, sorted) {
            sorted = list.next_of(sorted);
        }
        if sorted == start {
            start = to_sort;
        }
        let next = list.next_of(to_sort);
        move_node(list, std::mem::replace(&mut to_sort, next), sorted);
    }
    start
}

fn move_node<T>(list: &mut List<T>, from: Link, to: Link) {
    move_nodes(list, from, from, to);
}

/// Unlink `from_front..=from_back` and relink it right before `to`.
fn move_nodes<T>(list: &mut List<T>, from_front: Link, from_back: Link, to: Link) {
    let (before, after) = (list.prev_of(from_front), list.next_of(from_back));
    list.connect(before, after);
    let to_prev = list.prev_of(to);
    list.connect(to_prev, from_front);
    list.connect(from_back, to);
}
