use std::collections::HashMap;

use super::PathId;
use crate::utils::{SparseIndex, SparseVec};

/// Selects one of the two ends of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum End {
  /// The first point.
  #[default]
  Leading,
  /// The last point.
  Trailing,
}

impl End {
  pub fn opposite(self) -> End {
    match self {
      End::Leading => End::Trailing,
      End::Trailing => End::Leading,
    }
  }
}

/// A path together with one of its ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DirectedEnd {
  pub path: PathId,
  pub end: End,
}

impl DirectedEnd {
  pub fn new(path: PathId, end: End) -> DirectedEnd {
    DirectedEnd { path, end }
  }

  pub fn leading(path: PathId) -> DirectedEnd {
    DirectedEnd::new(path, End::Leading)
  }

  pub fn trailing(path: PathId) -> DirectedEnd {
    DirectedEnd::new(path, End::Trailing)
  }
}

/// Two directed ends that could be joined, and how far apart they are.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CandidatePair {
  pub a: DirectedEnd,
  pub b: DirectedEnd,
  pub distance_sq: f64,
  /// Set once the pair has survived a complete evaluation sweep.
  pub settled: bool,
}

impl CandidatePair {
  pub fn new(a: DirectedEnd, b: DirectedEnd, distance_sq: f64) -> CandidatePair {
    CandidatePair {
      a,
      b,
      distance_sq,
      settled: false,
    }
  }

  /// Both ends belong to the same path: joining them closes it.
  pub fn is_self_closure(&self) -> bool {
    self.a.path == self.b.path
  }

  pub fn other(&self, end: &DirectedEnd) -> DirectedEnd {
    if self.a == *end {
      self.b
    } else {
      self.a
    }
  }

  fn ends(&self) -> [DirectedEnd; 2] {
    [self.a, self.b]
  }
}

/// Best merge candidate per directed end.
///
/// Pairs live in an arena and the lookup maps each directed end to the index
/// of its current best pair. A pair can be the best for one or both of its
/// ends. When a pair is evicted, the ends that referred to it lose their
/// entry and are reported through [`CandidateTable::take_orphans`] so that
/// the caller can search for a replacement.
#[derive(Default)]
pub struct CandidateTable {
  pairs: SparseVec<CandidatePair>,
  best: HashMap<DirectedEnd, SparseIndex>,
  orphans: Vec<DirectedEnd>,
}

impl CandidateTable {
  pub fn new() -> CandidateTable {
    CandidateTable::default()
  }

  pub fn len(&self) -> usize {
    self.pairs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pairs.len() == 0
  }

  pub fn clear(&mut self) {
    self.pairs = SparseVec::new();
    self.best.clear();
    self.orphans.clear();
  }

  pub fn get(&self, end: &DirectedEnd) -> Option<&CandidatePair> {
    self.best.get(end).map(|&idx| &self.pairs[idx])
  }

  /// Squared distance to the best candidate of `end`, infinite when there is
  /// none.
  pub fn distance_sq(&self, end: &DirectedEnd) -> f64 {
    self
      .get(end)
      .map_or(f64::INFINITY, |pair| pair.distance_sq)
  }

  /// Records `pair` for whichever of its ends it improves. Returns true if it
  /// was kept.
  pub fn offer(&mut self, pair: CandidatePair) -> bool {
    let improves = |end: &DirectedEnd| pair.distance_sq < self.distance_sq(end);
    let improved: Vec<DirectedEnd> = pair.ends().into_iter().filter(|end| improves(end)).collect();
    if improved.is_empty() {
      return false;
    }
    for end in improved.iter() {
      if let Some(&old) = self.best.get(end) {
        self.evict(old);
      }
    }
    let idx = self.pairs.push(pair);
    for end in improved {
      self.orphans.retain(|orphan| *orphan != end);
      self.best.insert(end, idx);
    }
    true
  }

  /// Removes `end` from the table together with every pair that mentions it.
  pub fn forget(&mut self, end: &DirectedEnd) {
    let stale: Vec<SparseIndex> = self
      .pairs
      .iter_indexed()
      .filter(|(_, pair)| pair.a == *end || pair.b == *end)
      .map(|(idx, _)| idx)
      .collect();
    for idx in stale {
      self.evict(idx);
    }
    self.best.remove(end);
    self.orphans.retain(|orphan| orphan != end);
  }

  /// Moves everything recorded for `from` over to `to`. Used when a merge
  /// turns the free end of a consumed path into an end of the survivor.
  pub fn rekey(&mut self, from: &DirectedEnd, to: &DirectedEnd) {
    for orphan in self.orphans.iter_mut() {
      if orphan == from {
        *orphan = *to;
      }
    }
    let affected: Vec<SparseIndex> = self
      .pairs
      .iter_indexed()
      .filter(|(_, pair)| pair.a == *from || pair.b == *from)
      .map(|(idx, _)| idx)
      .collect();
    for idx in affected {
      let pair = &mut self.pairs[idx];
      if pair.a == *from {
        pair.a = *to;
      }
      if pair.b == *from {
        pair.b = *to;
      }
    }
    if let Some(idx) = self.best.remove(from) {
      self.best.insert(*to, idx);
    }
  }

  /// Marks every stored pair as having survived a full sweep.
  pub fn settle_all(&mut self) {
    let indices: Vec<SparseIndex> = self.pairs.iter_indexed().map(|(idx, _)| idx).collect();
    for idx in indices {
      self.pairs[idx].settled = true;
    }
  }

  /// Directed ends that lost their best pair since the last call.
  pub fn take_orphans(&mut self) -> Vec<DirectedEnd> {
    std::mem::take(&mut self.orphans)
  }

  /// The settled pair with the smallest distance. Ties go to the pair with the
  /// smallest ends so that results do not depend on hash order.
  pub fn best(&self) -> Option<CandidatePair> {
    self
      .pairs
      .iter()
      .filter(|pair| pair.settled)
      .min_by(|x, y| {
        x.distance_sq
          .total_cmp(&y.distance_sq)
          .then_with(|| (x.a.min(x.b), x.a.max(x.b)).cmp(&(y.a.min(y.b), y.a.max(y.b))))
      })
      .copied()
  }

  fn evict(&mut self, idx: SparseIndex) {
    let pair = self.pairs.remove(idx);
    for end in pair.ends() {
      if self.best.get(&end) == Some(&idx) {
        self.best.remove(&end);
        self.orphans.push(end);
      }
    }
  }
}
