use crate::list::Node;
use log::debug;
use std::fmt;
use std::num::NonZeroU32;

/// A slot pointer into an [`Arena`].
///
/// It is stored 1-based in a `NonZeroU32`, so `Option<Ptr>` is as small as
/// `Ptr` itself and `None` plays the role of a null link.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub(crate) struct Ptr(NonZeroU32);

impl fmt::Debug for Ptr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ptr({})", self.index())
    }
}

impl Ptr {
    fn from_index(index: usize) -> Self {
        assert!(index < u32::MAX as usize, "Arena cannot hold more than u32::MAX - 1 nodes");
        match NonZeroU32::new(index as u32 + 1) {
            Some(raw) => Ptr(raw),
            None => unreachable!("index + 1 is never zero"),
        }
    }

    pub(crate) fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

#[cold]
#[inline(never)]
fn assert_vacant() -> ! {
    panic!("Attempted to access the node of a vacant slot");
}

enum SlotState<T> {
    Vacant { next_free: Option<Ptr> },
    Occupied(Node<T>),
}

pub(crate) struct Slot<T> {
    /// Bumped every time the slot is freed, so handles taken before the
    /// removal no longer match.
    generation: u32,
    state: SlotState<T>,
}

impl<T> Slot<T> {
    pub(crate) fn node(&self) -> &Node<T> {
        match &self.state {
            SlotState::Occupied(node) => node,
            SlotState::Vacant { .. } => assert_vacant(),
        }
    }

    pub(crate) fn node_mut(&mut self) -> &mut Node<T> {
        match &mut self.state {
            SlotState::Occupied(node) => node,
            SlotState::Vacant { .. } => assert_vacant(),
        }
    }
}

/// Slot storage for the nodes of one list.
///
/// Freed slots are threaded onto a free list through `next_free` and reused
/// by later allocations.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<Ptr>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free_head: None,
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> Ptr {
        match self.free_head {
            Some(ptr) => {
                let slot = &mut self.slots[ptr.index()];
                let next_free = match slot.state {
                    SlotState::Vacant { next_free } => next_free,
                    SlotState::Occupied(_) => unreachable!("free list points to an occupied slot"),
                };
                slot.state = SlotState::Occupied(node);
                self.free_head = next_free;
                ptr
            }
            None => {
                let ptr = Ptr::from_index(self.slots.len());
                self.slots.push(Slot {
                    generation: 0,
                    state: SlotState::Occupied(node),
                });
                ptr
            }
        }
    }

    /// Free an occupied slot and return its node.
    ///
    /// A slot whose generation cannot be bumped any further is retired: it
    /// stays vacant and is never handed out again, so no old handle can
    /// match it.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already vacant.
    pub(crate) fn free(&mut self, ptr: Ptr) -> Node<T> {
        let slot = &mut self.slots[ptr.index()];
        if let SlotState::Vacant { .. } = slot.state {
            assert_vacant();
        }
        let next_generation = slot.generation.checked_add(1);
        let next_free = match next_generation {
            Some(_) => self.free_head,
            None => None,
        };
        let state = std::mem::replace(&mut slot.state, SlotState::Vacant { next_free });
        match next_generation {
            Some(generation) => {
                slot.generation = generation;
                self.free_head = Some(ptr);
            }
            None => debug!("retired slot {:?} after exhausting its generations", ptr),
        }
        match state {
            SlotState::Occupied(node) => node,
            SlotState::Vacant { .. } => unreachable!(),
        }
    }

    pub(crate) fn generation(&self, ptr: Ptr) -> u32 {
        self.slots[ptr.index()].generation
    }

    /// Returns `true` if `ptr` names an occupied slot that has not been
    /// freed since `generation` was observed.
    pub(crate) fn is_live(&self, ptr: Ptr, generation: u32) -> bool {
        match self.slots.get(ptr.index()) {
            Some(slot) => {
                slot.generation == generation && matches!(slot.state, SlotState::Occupied(_))
            }
            None => false,
        }
    }

    pub(crate) fn node(&self, ptr: Ptr) -> &Node<T> {
        self.slots[ptr.index()].node()
    }

    pub(crate) fn node_mut(&mut self, ptr: Ptr) -> &mut Node<T> {
        self.slots[ptr.index()].node_mut()
    }

    /// Swap the elements stored in two occupied slots, leaving their links
    /// untouched.
    pub(crate) fn swap_elements(&mut self, a: Ptr, b: Ptr) {
        let (a, b) = (a.index(), b.index());
        if a == b {
            return;
        }
        let (low, high) = (a.min(b), a.max(b));
        let (left, right) = self.slots.split_at_mut(high);
        std::mem::swap(
            &mut left[low].node_mut().element,
            &mut right[0].node_mut().element,
        );
    }

    /// Raw base pointer of the slot storage, used by [`IterMut`] to hand out
    /// disjoint mutable references.
    ///
    /// [`IterMut`]: crate::IterMut
    pub(crate) fn slots_ptr(&mut self) -> *mut Slot<T> {
        self.slots.as_mut_ptr()
    }

    /// Fast-forward the generation of a slot, standing in for that many
    /// free and alloc cycles.
    #[cfg(test)]
    pub(crate) fn set_generation(&mut self, ptr: Ptr, generation: u32) {
        self.slots[ptr.index()].generation = generation;
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }
}
