//! Nesting of closed rings.
//!
//! Rings coming out of assembly do not cross each other, so a ring lies
//! inside another exactly when one of its points does and no pair of edges
//! crosses. The forest built from that relation alternates between land and
//! water at every level.
use crate::data::{Interior, Path, PointLocation};
use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionNode {
  /// Index of the ring in the slice the forest was built from.
  pub ring: usize,
  /// Nodes whose rings lie directly inside this one.
  pub children: Vec<usize>,
  pub depth: usize,
}

/// Containment forest over a set of closed rings.
#[derive(Debug, Clone, Default)]
pub struct InclusionForest {
  nodes: Vec<InclusionNode>,
  roots: Vec<usize>,
}

impl InclusionForest {
  /// Builds the forest of the closed paths in `rings`. Other paths are left
  /// out.
  pub fn build(rings: &[Path]) -> InclusionForest {
    let mut nodes = Vec::new();
    for (idx, ring) in rings.iter().enumerate() {
      if ring.is_closed() {
        nodes.push(InclusionNode {
          ring: idx,
          children: Vec::new(),
          depth: 0,
        });
      } else {
        log::debug!("path {} is not closed, leaving it out of the forest", idx);
      }
    }
    let pool = (0..nodes.len()).collect();
    let roots = nest(rings, &mut nodes, pool);
    let mut forest = InclusionForest { nodes, roots };
    forest.set_depths();
    forest
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Node indices of the outermost rings.
  pub fn roots(&self) -> &[usize] {
    &self.roots
  }

  pub fn node(&self, idx: usize) -> &InclusionNode {
    &self.nodes[idx]
  }

  pub fn children(&self, idx: usize) -> impl Iterator<Item = &InclusionNode> + '_ {
    self.nodes[idx].children.iter().map(move |&c| &self.nodes[c])
  }

  /// Nesting depth of the ring at `ring` in the slice the forest was built
  /// from. `None` for rings left out of the forest.
  pub fn depth(&self, ring: usize) -> Option<usize> {
    self
      .nodes
      .iter()
      .find(|node| node.ring == ring)
      .map(|node| node.depth)
  }

  /// Labels every ring by its depth: outermost rings are elevations, rings
  /// directly inside them depressions, and so on.
  pub fn assign(&self, rings: &mut [Path]) -> Result<(), Error> {
    for node in &self.nodes {
      rings[node.ring].set_interior(Interior::at_depth(node.depth))?;
    }
    Ok(())
  }

  fn set_depths(&mut self) {
    let mut stack: Vec<(usize, usize)> = self.roots.iter().map(|&r| (r, 0)).collect();
    while let Some((idx, depth)) = stack.pop() {
      self.nodes[idx].depth = depth;
      stack.extend(self.nodes[idx].children.iter().map(|&c| (c, depth + 1)));
    }
  }
}

/// Builds the containment forest of `rings` and labels each closed ring by
/// its nesting depth.
pub fn classify(rings: &mut [Path]) -> Result<(), Error> {
  let forest = InclusionForest::build(rings);
  log::debug!(
    "classified {} rings, {} at the top level",
    forest.len(),
    forest.roots().len()
  );
  forest.assign(rings)
}

// Moves every node of `pool` that lies inside another node of `pool` below
// it, then does the same among the children. Returns the nodes left at the
// top.
fn nest(rings: &[Path], nodes: &mut [InclusionNode], pool: Vec<usize>) -> Vec<usize> {
  let mut top = pool;
  let mut k = 0;
  while k < top.len() {
    let n = top[k];
    let outer = &rings[nodes[n].ring];
    let mut moved = Vec::new();
    top.retain(|&m| {
      if m != n && contains(outer, &rings[nodes[m].ring]) {
        moved.push(m);
        false
      } else {
        true
      }
    });
    nodes[n].children.extend(moved);
    k = top.iter().position(|&m| m == n).map_or(k, |p| p + 1);
  }
  for &n in &top {
    let children = std::mem::take(&mut nodes[n].children);
    nodes[n].children = nest(rings, nodes, children);
  }
  top
}

fn contains(outer: &Path, inner: &Path) -> bool {
  match (outer.bounding_box(), inner.bounding_box()) {
    (Some(o), Some(i)) if o.contains(&i) => {}
    _ => return false,
  }
  let sample = inner
    .iter()
    .map(|pt| outer.locate(pt))
    .find(|loc| *loc != PointLocation::OnBoundary);
  if sample != Some(PointLocation::Inside) {
    return false;
  }
  !outer
    .edges()
    .any(|e| inner.edges().any(|f| e.crosses(&f)))
}
