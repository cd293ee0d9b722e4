//! Frontier containers and the per-search bookkeeping shared by every solver.
//!
//! Nodes are identified by their discovery index in [SearchState], which is an insertion-ordered
//! map. That index is also what breaks ties between equal priorities in [BestFirst].
use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::map::Entry;
use indexmap::IndexMap;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Marks the start node, which has no parent.
pub const NO_PARENT: usize = usize::MAX;

/// Bookkeeping for one discovered coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub parent: usize,
    pub cost: u32,
    pub closed: bool,
}

/// Per-invocation search state: cost-so-far, predecessor and closed flag for every discovered
/// coordinate. Created at the start of a search and dropped with it.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    nodes: FxIndexMap<Point, SearchNode>,
    open: usize,
}

/// What happened when a successor was offered to [SearchState::relax].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relaxed {
    Discovered(usize),
    Improved(usize),
    Unchanged,
}

impl SearchState {
    pub fn with_start(start: Point) -> SearchState {
        let mut state = SearchState::default();
        state.nodes.insert(
            start,
            SearchNode {
                parent: NO_PARENT,
                cost: 0,
                closed: false,
            },
        );
        state.open = 1;
        state
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// Discovered coordinates that are not closed yet. Unlike a heap's length this ignores
    /// outdated entries left behind by relaxation.
    pub fn open_len(&self) -> usize {
        self.open
    }
    pub fn index_of(&self, point: &Point) -> Option<usize> {
        self.nodes.get_index_of(point)
    }
    pub fn node(&self, index: usize) -> Option<(Point, SearchNode)> {
        self.nodes.get_index(index).map(|(p, n)| (*p, *n))
    }
    pub fn is_closed(&self, point: &Point) -> bool {
        self.nodes.get(point).is_some_and(|n| n.closed)
    }
    pub fn close(&mut self, index: usize) {
        if let Some((_, node)) = self.nodes.get_index_mut(index) {
            if !node.closed {
                node.closed = true;
                self.open -= 1;
            }
        }
    }

    /// Offers `point` reached from `parent` at total `cost`. New coordinates are always
    /// recorded. Known open coordinates are re-parented only when `improve` is set and the new
    /// cost is strictly smaller. Closed coordinates are never touched.
    pub fn relax(&mut self, point: Point, parent: usize, cost: u32, improve: bool) -> Relaxed {
        match self.nodes.entry(point) {
            Entry::Vacant(e) => {
                let index = e.index();
                e.insert(SearchNode {
                    parent,
                    cost,
                    closed: false,
                });
                self.open += 1;
                Relaxed::Discovered(index)
            }
            Entry::Occupied(mut e) => {
                let node = e.get_mut();
                if improve && !node.closed && cost < node.cost {
                    node.parent = parent;
                    node.cost = cost;
                    Relaxed::Improved(e.index())
                } else {
                    Relaxed::Unchanged
                }
            }
        }
    }
}

/// A container of node indices that decides which discovered node is expanded next.
pub trait Frontier {
    /// Adds a node. `estimate` is only consulted by prioritised frontiers.
    fn push(&mut self, index: usize, cost: u32, estimate: u32);
    /// Removes the next node, returning its index and the cost it was pushed with.
    fn pop(&mut self) -> Option<(usize, u32)>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First in, first out. Drives breadth-first search.
#[derive(Clone, Debug, Default)]
pub struct Fifo(VecDeque<(usize, u32)>);

impl Frontier for Fifo {
    fn push(&mut self, index: usize, cost: u32, _: u32) {
        self.0.push_back((index, cost));
    }
    fn pop(&mut self) -> Option<(usize, u32)> {
        self.0.pop_front()
    }
    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Last in, first out. Drives depth-first search.
#[derive(Clone, Debug, Default)]
pub struct Lifo(Vec<(usize, u32)>);

impl Frontier for Lifo {
    fn push(&mut self, index: usize, cost: u32, _: u32) {
        self.0.push((index, cost));
    }
    fn pop(&mut self) -> Option<(usize, u32)> {
        self.0.pop()
    }
    fn len(&self) -> usize {
        self.0.len()
    }
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: smallest estimate first, then earliest discovery
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Binary heap keyed on the estimated total cost, ties broken by discovery order. A node that is
/// improved is pushed again; the caller discards the outdated entry when it surfaces.
pub struct BestFirst<C> {
    heap: BinaryHeap<SmallestCostHolder<C>>,
}

impl<C: Ord> Default for BestFirst<C> {
    fn default() -> Self {
        BestFirst {
            heap: BinaryHeap::new(),
        }
    }
}

impl<C: Zero + Ord + Copy> BestFirst<C> {
    /// Seeds the heap with the zero-cost start node.
    pub fn seeded(index: usize) -> Self {
        let mut frontier = BestFirst::default();
        frontier.heap.push(SmallestCostHolder {
            estimated_cost: C::zero(),
            cost: C::zero(),
            index,
        });
        frontier
    }
    pub fn push_entry(&mut self, index: usize, cost: C, estimated_cost: C) {
        self.heap.push(SmallestCostHolder {
            estimated_cost,
            cost,
            index,
        });
    }
    pub fn pop_entry(&mut self) -> Option<(usize, C)> {
        self.heap.pop().map(|h| (h.index, h.cost))
    }
}

impl Frontier for BestFirst<u32> {
    fn push(&mut self, index: usize, cost: u32, estimate: u32) {
        self.push_entry(index, cost, estimate);
    }
    fn pop(&mut self) -> Option<(usize, u32)> {
        self.pop_entry()
    }
    fn len(&self) -> usize {
        self.heap.len()
    }
}
