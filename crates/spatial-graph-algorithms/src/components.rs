//! Connected component labeling
//!
//! Components are computed ignoring edge direction (weak connectivity).

use super::common::CsrTopology;

/// Result of component labeling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLabels {
    /// Component label of every vertex, numbered `0..component_count` in order
    /// of the lowest vertex index in each component
    pub labels: Vec<usize>,
    /// Number of vertices carrying each label
    pub counts: Vec<usize>,
}

impl ComponentLabels {
    /// Number of components
    pub fn component_count(&self) -> usize {
        self.counts.len()
    }

    /// Label with the most vertices; ties go to the lowest label.
    pub fn largest(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (label, &count) in self.counts.iter().enumerate() {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((label, count)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Boolean mask selecting the vertices of one component
    pub fn mask(&self, label: usize) -> Vec<bool> {
        self.labels.iter().map(|&l| l == label).collect()
    }
}

/// Union-Find data structure
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut node = i;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Connected components
///
/// Finds all disjoint subgraphs in the graph, ignoring edge direction.
pub fn connected_components(topology: &CsrTopology) -> ComponentLabels {
    let n = topology.vertex_count;
    let mut uf = UnionFind::new(n);

    for u in 0..n {
        for &v in topology.successors(u) {
            uf.union(u, v);
        }
    }

    // Relabel roots densely in ascending vertex order
    let mut root_label = vec![usize::MAX; n];
    let mut labels = Vec::with_capacity(n);
    let mut counts = Vec::new();

    for i in 0..n {
        let root = uf.find(i);
        if root_label[root] == usize::MAX {
            root_label[root] = counts.len();
            counts.push(0);
        }
        let label = root_label[root];
        counts[label] += 1;
        labels.push(label);
    }

    ComponentLabels { labels, counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        // Edges: 0->1, 2->3->4, 5 (isolated)
        let topology = CsrTopology::from_edges(6, &[(0, 1), (2, 3), (3, 4)]);

        let result = connected_components(&topology);

        assert_eq!(result.component_count(), 3);
        assert_eq!(result.labels, vec![0, 0, 1, 1, 1, 2]);
        assert_eq!(result.counts, vec![2, 3, 1]);
        assert_eq!(result.largest(), Some(1));
    }

    #[test]
    fn test_direction_is_ignored() {
        // 1 -> 0 and 2 -> 0 still join one component
        let topology = CsrTopology::from_edges(3, &[(1, 0), (2, 0)]);
        let result = connected_components(&topology);
        assert_eq!(result.counts, vec![3]);
    }

    #[test]
    fn test_largest_ties_take_lowest_label() {
        let topology = CsrTopology::from_edges(4, &[(0, 1), (2, 3)]);
        let result = connected_components(&topology);
        assert_eq!(result.counts, vec![2, 2]);
        assert_eq!(result.largest(), Some(0));
        assert_eq!(result.mask(1), vec![false, false, true, true]);
    }

    #[test]
    fn test_empty_topology() {
        let result = connected_components(&CsrTopology::from_edges(0, &[]));
        assert_eq!(result.component_count(), 0);
        assert_eq!(result.largest(), None);
    }
}
