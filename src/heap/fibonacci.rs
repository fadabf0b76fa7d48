use super::KeyedMinQueue;
use crate::error::GraphError;
use ahash::RandomState;
use std::collections::HashMap;
use std::hash::Hash;

struct Node<K, P> {
    key: K,
    prio: P,
    parent: Option<usize>,
    children: Vec<usize>,
    marked: bool,
}

/// A keyed Fibonacci heap.
///
/// Nodes live in a slot arena and refer to each other by index, so keys can
/// be relocated in O(1) during cuts.
/// A key-to-slot map makes decrease-key addressable by key instead of by a
/// node reference.
///
/// | operation      | complexity          |
/// | -------------- | ------------------- |
/// | `push`         | O(1)                |
/// | `peek`         | O(1)                |
/// | `pop`          | amortized O(log n)  |
/// | `decrease`     | amortized O(1)      |
/// | `remove`       | amortized O(log n)  |
/// | `merge`        | O(m) slot relocation for the smaller side |
pub struct FibonacciHeap<K, P> {
    slots: Vec<Option<Node<K, P>>>,
    free: Vec<usize>,
    index: HashMap<K, usize, RandomState>,
    roots: Vec<usize>,
    min: Option<usize>,
    len: usize,
}

impl<K, P> Default for FibonacciHeap<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> FibonacciHeap<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    pub fn new() -> Self {
        Self {
            slots: vec![],
            free: vec![],
            index: HashMap::with_hasher(RandomState::new()),
            roots: vec![],
            min: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push(&mut self, key: K, priority: P) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        let idx = self.alloc(Node {
            key: key.clone(),
            prio: priority,
            parent: None,
            children: vec![],
            marked: false,
        });
        self.index.insert(key, idx);
        self.roots.push(idx);
        match self.min {
            Some(m) if self.node(m).prio <= self.node(idx).prio => {}
            _ => self.min = Some(idx),
        }
        self.len += 1;
        true
    }

    pub fn peek(&self) -> Result<(&K, &P), GraphError> {
        self.min
            .map(|m| {
                let n = self.node(m);
                (&n.key, &n.prio)
            })
            .ok_or(GraphError::Empty)
    }

    pub fn pop(&mut self) -> Option<(K, P)> {
        let min_idx = self.min?;
        let children = std::mem::take(&mut self.node_mut(min_idx).children);
        for c in children {
            let cn = self.node_mut(c);
            cn.parent = None;
            cn.marked = false;
            self.roots.push(c);
        }
        self.detach_root(min_idx);
        let node = self.release(min_idx);
        self.consolidate();
        Some((node.key, node.prio))
    }

    pub fn decrease(&mut self, key: &K, priority: P) -> Result<(), GraphError> {
        let idx = *self.index.get(key).ok_or(GraphError::NotFound)?;
        if priority >= self.node(idx).prio {
            return Ok(());
        }
        self.node_mut(idx).prio = priority;
        if let Some(parent) = self.node(idx).parent {
            if self.node(idx).prio < self.node(parent).prio {
                self.cut(idx);
                self.cascading_cut(parent);
            }
        }
        if self.node(idx).parent.is_none() {
            let m = self.min.unwrap();
            if self.node(idx).prio < self.node(m).prio {
                self.min = Some(idx);
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, key: &K) -> Option<P> {
        let idx = *self.index.get(key)?;
        if Some(idx) == self.min {
            return self.pop().map(|(_, p)| p);
        }
        if let Some(parent) = self.node(idx).parent {
            self.cut(idx);
            self.cascading_cut(parent);
        }
        let children = std::mem::take(&mut self.node_mut(idx).children);
        for c in children {
            let cn = self.node_mut(c);
            cn.parent = None;
            cn.marked = false;
            self.roots.push(c);
        }
        self.detach_root(idx);
        let node = self.release(idx);
        Some(node.prio)
    }

    pub fn merge(&mut self, mut other: Self) {
        let offset = self.slots.len();
        for (i, slot) in other.slots.iter_mut().enumerate() {
            match slot.take() {
                Some(mut node) => {
                    node.parent = node.parent.map(|p| p + offset);
                    for c in node.children.iter_mut() {
                        *c += offset;
                    }
                    let prev = self.index.insert(node.key.clone(), i + offset);
                    debug_assert!(prev.is_none());
                    self.slots.push(Some(node));
                }
                None => {
                    self.slots.push(None);
                    self.free.push(i + offset);
                }
            }
        }
        for r in other.roots {
            self.roots.push(r + offset);
        }
        self.len += other.len;
        let other_min = other.min.map(|m| m + offset);
        self.min = match (self.min, other_min) {
            (None, m) | (m, None) => m,
            (Some(a), Some(b)) => {
                if self.node(b).prio < self.node(a).prio {
                    Some(b)
                } else {
                    Some(a)
                }
            }
        };
    }

    fn node(&self, idx: usize) -> &Node<K, P> {
        self.slots[idx].as_ref().unwrap()
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<K, P> {
        self.slots[idx].as_mut().unwrap()
    }

    fn alloc(&mut self, node: Node<K, P>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn detach_root(&mut self, idx: usize) {
        let pos = self.roots.iter().position(|&r| r == idx).unwrap();
        self.roots.swap_remove(pos);
    }

    fn release(&mut self, idx: usize) -> Node<K, P> {
        let node = self.slots[idx].take().unwrap();
        self.free.push(idx);
        self.index.remove(&node.key);
        self.len -= 1;
        node
    }

    /// Links roots of equal degree until all degrees are distinct, then
    /// rescans for the minimum.
    fn consolidate(&mut self) {
        let mut by_degree: Vec<Option<usize>> = vec![];
        let roots = std::mem::take(&mut self.roots);
        for root in roots {
            let mut cur = root;
            loop {
                let d = self.node(cur).children.len();
                if by_degree.len() <= d {
                    by_degree.resize(d + 1, None);
                }
                match by_degree[d].take() {
                    None => {
                        by_degree[d] = Some(cur);
                        break;
                    }
                    Some(other) => {
                        cur = self.link(cur, other);
                    }
                }
            }
        }
        self.roots = by_degree.into_iter().flatten().collect();
        self.min = None;
        for i in 0..self.roots.len() {
            let r = self.roots[i];
            match self.min {
                Some(m) if self.node(m).prio <= self.node(r).prio => {}
                _ => self.min = Some(r),
            }
        }
    }

    fn link(&mut self, a: usize, b: usize) -> usize {
        let (parent, child) = if self.node(a).prio <= self.node(b).prio {
            (a, b)
        } else {
            (b, a)
        };
        self.node_mut(child).parent = Some(parent);
        self.node_mut(child).marked = false;
        self.node_mut(parent).children.push(child);
        parent
    }

    /// Moves a non-root node to the root list.
    fn cut(&mut self, idx: usize) {
        if let Some(p) = self.node(idx).parent {
            let pos = self
                .node(p)
                .children
                .iter()
                .position(|&c| c == idx)
                .unwrap();
            self.node_mut(p).children.swap_remove(pos);
            self.node_mut(idx).parent = None;
            self.node_mut(idx).marked = false;
            self.roots.push(idx);
        }
    }

    /// Walks up from a node that just lost a child, cutting every marked
    /// ancestor and marking the first unmarked one.
    fn cascading_cut(&mut self, mut idx: usize) {
        while let Some(p) = self.node(idx).parent {
            if !self.node(idx).marked {
                self.node_mut(idx).marked = true;
                return;
            }
            self.cut(idx);
            idx = p;
        }
    }
}

impl<K, P> KeyedMinQueue<K, P> for FibonacciHeap<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord,
{
    fn new() -> Self {
        FibonacciHeap::new()
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, key: K, priority: P) -> bool {
        FibonacciHeap::push(self, key, priority)
    }

    fn peek(&self) -> Result<(&K, &P), GraphError> {
        FibonacciHeap::peek(self)
    }

    fn pop(&mut self) -> Option<(K, P)> {
        FibonacciHeap::pop(self)
    }

    fn decrease(&mut self, key: &K, priority: P) -> Result<(), GraphError> {
        FibonacciHeap::decrease(self, key, priority)
    }

    fn remove(&mut self, key: &K) -> Option<P> {
        FibonacciHeap::remove(self, key)
    }

    fn merge(&mut self, other: Self) {
        FibonacciHeap::merge(self, other)
    }
}
