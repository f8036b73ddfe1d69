//! Depth-first path enumeration over adjacency mappings

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use tracing::{debug, trace};

/// Lookup from a node to its ordered successors
///
/// Implemented for `HashMap<N, Vec<N>>` and `BTreeMap<N, Vec<N>>`; other
/// graph representations only need to hand out successor slices.
pub trait Adjacency<N> {
    /// Successors of `node`, or `None` if the node has no entry
    fn successors(&self, node: &N) -> Option<&[N]>;
}

impl<N: Eq + Hash, S: BuildHasher> Adjacency<N> for HashMap<N, Vec<N>, S> {
    fn successors(&self, node: &N) -> Option<&[N]> {
        self.get(node).map(Vec::as_slice)
    }
}

impl<N: Ord> Adjacency<N> for BTreeMap<N, Vec<N>> {
    fn successors(&self, node: &N) -> Option<&[N]> {
        self.get(node).map(Vec::as_slice)
    }
}

/// The walk so far: the node just entered plus the trail that led to it
///
/// Each recursion frame owns one `Trail` and borrows its parent's, so the
/// current path is shared structurally and never mutated.
struct Trail<'t, N> {
    node: &'t N,
    parent: Option<&'t Trail<'t, N>>,
    len: usize,
}

impl<'t, N> Trail<'t, N> {
    fn extend(parent: Option<&'t Trail<'t, N>>, node: &'t N) -> Self {
        Trail {
            node,
            parent,
            len: parent.map_or(0, |p| p.len) + 1,
        }
    }
}

/// Copy `prefix` followed by the nodes of `trail` in walk order
fn snapshot<N: Clone>(prefix: &[N], trail: Option<&Trail<'_, N>>) -> Vec<N> {
    let len = trail.map_or(0, |t| t.len);
    let mut reversed = Vec::with_capacity(len);
    let mut cursor = trail;
    while let Some(step) = cursor {
        reversed.push(step.node);
        cursor = step.parent;
    }

    let mut path = Vec::with_capacity(prefix.len() + len);
    path.extend_from_slice(prefix);
    path.extend(reversed.into_iter().rev().cloned());
    path
}

/// A node is terminal when it has no successors or only itself
fn is_terminal<N: PartialEq>(node: &N, successors: Option<&[N]>) -> bool {
    match successors {
        None | Some([]) => true,
        Some([only]) => only == node,
        Some(_) => false,
    }
}

/// Collects every forward path from a start node to the terminals it reaches
///
/// Paths exclude the start node and are produced in pre-order, following
/// each successor list in order. Identical paths are not merged.
///
/// The only cycle guard is that a node never recurses into itself. Longer
/// cycles (`a -> b -> a`) are not detected and recurse until the stack is
/// exhausted, so inputs are expected to be acyclic apart from self-loops.
pub struct PathCollector<'a, N, A: ?Sized> {
    adjacency: &'a A,
    _node: PhantomData<fn(&N)>,
}

impl<'a, N, A> PathCollector<'a, N, A>
where
    N: PartialEq + Clone,
    A: Adjacency<N> + ?Sized,
{
    /// Create a collector over the given adjacency mapping
    pub fn new(adjacency: &'a A) -> Self {
        PathCollector {
            adjacency,
            _node: PhantomData,
        }
    }

    /// Collect all paths reachable from `start`
    pub fn collect(&self, start: &N) -> Vec<Vec<N>> {
        let mut collected = Vec::new();
        self.collect_into(start, &[], &mut collected);
        collected
    }

    /// Append all paths reachable from `start` to `collected`
    ///
    /// Every appended path begins with `prefix`, which lets a caller resume
    /// a walk that was started elsewhere.
    pub fn collect_into(&self, start: &N, prefix: &[N], collected: &mut Vec<Vec<N>>) {
        let before = collected.len();
        debug!(prefix_len = prefix.len(), "Collecting paths");

        self.walk(start, None, prefix, collected);

        debug!(paths = collected.len() - before, "Collected paths");
    }

    fn walk(
        &self,
        node: &N,
        trail: Option<&Trail<'_, N>>,
        prefix: &[N],
        collected: &mut Vec<Vec<N>>,
    ) {
        let successors = self.adjacency.successors(node);

        if is_terminal(node, successors) {
            let path = snapshot(prefix, trail);
            trace!(len = path.len(), "Reached terminal");
            collected.push(path);
            return;
        }

        for next in successors.unwrap_or_default() {
            // Direct self-loops would recurse forever
            if next == node {
                continue;
            }
            let step = Trail::extend(trail, next);
            self.walk(next, Some(&step), prefix, collected);
        }
    }
}

/// Collect every path from `start` to each terminal node it reaches
///
/// ```
/// use pathkey::collect_paths;
/// use std::collections::HashMap;
///
/// let graph = HashMap::from([(1, vec![2, 3]), (2, vec![4]), (3, vec![]), (4, vec![4])]);
/// assert_eq!(collect_paths(&1, &graph), vec![vec![2, 4], vec![3]]);
/// ```
pub fn collect_paths<N, A>(start: &N, adjacency: &A) -> Vec<Vec<N>>
where
    N: PartialEq + Clone,
    A: Adjacency<N> + ?Sized,
{
    PathCollector::new(adjacency).collect(start)
}

/// Append every path from `start` to `collected`, each prefixed by `prefix`
pub fn collect_paths_into<N, A>(
    start: &N,
    adjacency: &A,
    prefix: &[N],
    collected: &mut Vec<Vec<N>>,
) where
    N: PartialEq + Clone,
    A: Adjacency<N> + ?Sized,
{
    PathCollector::new(adjacency).collect_into(start, prefix, collected)
}
