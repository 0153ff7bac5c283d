/// A plain binary min-heap over a `Vec`.
///
/// `std::collections::BinaryHeap` is a max-heap and would need every
/// element wrapped in `Reverse`; keeping the handful of sift operations
/// explicit here reads better at the one call site that matters
/// (Huffman tree construction, where the ordering key carries an
/// insertion sequence for deterministic tie-breaking).
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap { elements: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, value: T) {
        self.elements.push(value);
        self.sift_up(self.elements.len() - 1);
    }

    /// Removes and returns the smallest element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.elements.is_empty() {
            return None;
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let smallest = self.elements.pop();
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        smallest
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.elements[i] >= self.elements[parent] {
                break;
            }
            self.elements.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;

            if left < n && self.elements[left] < self.elements[smallest] {
                smallest = left;
            }
            if right < n && self.elements[right] < self.elements[smallest] {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn pops_in_ascending_order() {
        let mut heap = MinHeap::new();
        for value in [5, 1, 4, 1, 9, 2, 6] {
            heap.push(value);
        }
        let mut popped = Vec::new();
        while let Some(value) = heap.pop() {
            popped.push(value);
        }
        assert_eq!(popped, vec![1, 1, 2, 4, 5, 6, 9]);
    }

    #[test]
    fn empty_heap_pops_none() {
        let mut heap: MinHeap<u32> = MinHeap::new();
        assert!(heap.pop().is_none());
        assert!(heap.is_empty());
    }

    #[test]
    fn equal_weights_break_ties_by_sequence() {
        // The ordering key the tree builder uses: (weight, insertion seq).
        let mut heap = MinHeap::new();
        heap.push((7u64, 2u32));
        heap.push((7u64, 0u32));
        heap.push((7u64, 1u32));
        assert_eq!(heap.pop(), Some((7, 0)));
        assert_eq!(heap.pop(), Some((7, 1)));
        assert_eq!(heap.pop(), Some((7, 2)));
    }
}
