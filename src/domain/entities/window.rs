/// Number of points a chart window keeps by default.
pub const DEFAULT_WINDOW_CAPACITY: usize = 10;

/// Fixed-capacity, insertion-ordered buffer of recent chart points.
///
/// Backed by a pre-sized ring: `head` is the slot of the oldest point and
/// `len` the number of occupied slots. Once full, every push overwrites the
/// oldest point, so the window never reallocates and never exceeds its
/// capacity.
#[derive(Debug, Clone)]
pub struct MetricsWindow<T> {
    slots: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> MetricsWindow<T> {
    /// Create an empty window. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            head: 0,
            len: 0,
        }
    }

    /// Append a point at the tail, evicting the oldest one when full.
    ///
    /// Returns the evicted point, if any.
    pub fn push(&mut self, point: T) -> Option<T> {
        let capacity = self.capacity();
        if self.len == capacity {
            let evicted = self.slots[self.head].replace(point);
            self.head = (self.head + 1) % capacity;
            evicted
        } else {
            let tail = (self.head + self.len) % capacity;
            self.slots[tail] = Some(point);
            self.len += 1;
            None
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    #[must_use]
    pub fn oldest(&self) -> Option<&T> {
        self.get(0)
    }

    #[must_use]
    pub fn newest(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Point at logical position `index`, where `0` is the oldest.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.slots[(self.head + index) % self.capacity()].as_ref()
    }

    /// Iterate oldest → newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }
}

impl<T: Clone> MetricsWindow<T> {
    /// Copy of the window contents, oldest first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for MetricsWindow<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

impl<T: serde::Serialize> serde::Serialize for MetricsWindow<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
