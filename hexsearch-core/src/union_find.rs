//! Disjoint sets over board cells plus four virtual edge nodes

use crate::board::Edge;

/// Union-find over `size * size` cells followed by TOP, BOTTOM, LEFT, RIGHT
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    cells: usize,
}

impl UnionFind {
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        Self {
            parent: (0..cells + 4).collect(),
            rank: vec![0; cells + 4],
            cells,
        }
    }

    /// Put every element back in its own set
    pub fn reset(&mut self) {
        for (i, p) in self.parent.iter_mut().enumerate() {
            *p = i;
        }
        self.rank.fill(0);
    }

    /// Element index of a virtual edge node
    pub fn edge_node(&self, edge: Edge) -> usize {
        self.cells
            + match edge {
                Edge::Top => 0,
                Edge::Bottom => 1,
                Edge::Left => 2,
                Edge::Right => 3,
            }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        // Path halving
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    pub fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}
