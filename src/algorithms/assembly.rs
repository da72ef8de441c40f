//! Reassembly of fragmentary traces into rings.
//!
//! The assembler keeps, for every free path end, the closest other end it
//! could be joined with. Merging the globally closest pair changes the ends of
//! the surviving path, so the table is refreshed for the affected paths only
//! and the process repeats until nothing is close enough.
use crate::data::{CandidatePair, CandidateTable, DirectedEnd, End, Interior, Path, PathId, Point};
use crate::progress::checkpoint;
use crate::{Config, Error, NoProgress, Progress};

mod frame;

/// Greedy nearest-endpoint stitching over a collection of paths.
///
/// Paths are addressed by their [`PathId`], which is their index in the
/// collection handed to [`RingAssembler::new`]. A path consumed by a merge
/// disappears; its id is never reused. Closed paths pass through untouched.
pub struct RingAssembler<P = NoProgress> {
  paths: Vec<Option<Path>>,
  // Whether the candidates of a path reflect its current ends.
  evaluated: Vec<bool>,
  table: CandidateTable,
  config: Config,
  progress: P,
}

impl RingAssembler<NoProgress> {
  pub fn new(paths: Vec<Path>) -> RingAssembler<NoProgress> {
    let n = paths.len();
    RingAssembler {
      paths: paths.into_iter().map(Some).collect(),
      evaluated: vec![false; n],
      table: CandidateTable::new(),
      config: Config::default(),
      progress: NoProgress,
    }
  }
}

impl<P: Progress> RingAssembler<P> {
  pub fn with_progress<Q: Progress>(self, progress: Q) -> RingAssembler<Q> {
    RingAssembler {
      paths: self.paths,
      evaluated: self.evaluated,
      table: self.table,
      config: self.config,
      progress,
    }
  }

  pub fn with_config(mut self, config: Config) -> RingAssembler<P> {
    self.config = config;
    self
  }

  /// Number of paths still present.
  pub fn len(&self) -> usize {
    self.paths.iter().flatten().count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn paths(&self) -> impl Iterator<Item = &Path> + '_ {
    self.paths.iter().flatten()
  }

  pub fn path(&self, id: PathId) -> Option<&Path> {
    self.paths.get(id.0)?.as_ref()
  }

  /// The closest pair found by the last [`update`](RingAssembler::update).
  pub fn best_candidate(&self) -> Option<CandidatePair> {
    self.table.best()
  }

  pub fn into_paths(self) -> Vec<Path> {
    self.paths.into_iter().flatten().collect()
  }

  /// Brings the candidate table up to date.
  ///
  /// Only paths whose ends changed, or whose ends lost their candidate to a
  /// closer pair, are compared against the others. This repeats until a
  /// sweep leaves every path evaluated.
  pub fn update(&mut self) -> Result<(), Error> {
    self.progress.set_description("Matching path ends");
    let n = self.paths.len();
    loop {
      let pending: Vec<bool> = (0..n)
        .map(|i| self.participates(i) && !self.evaluated[i])
        .collect();
      let count = pending.iter().filter(|&&p| p).count();
      if count == 0 {
        return Ok(());
      }
      for j in 0..n {
        if pending[j] {
          self.evaluate(j, &pending);
        }
      }
      for j in 0..n {
        if pending[j] {
          self.evaluated[j] = true;
        }
      }
      self.drain_orphans();
      self.table.settle_all();
      checkpoint(&mut self.progress, n - count, n)?;
    }
  }

  /// Compares every pair of paths, ignoring what is known to be up to date.
  /// A merge can free an end that an earlier sweep had rejected for another
  /// path; this catches such pairs. Returns true if any candidate improved.
  pub fn full_sweep(&mut self) -> Result<bool, Error> {
    let n = self.paths.len();
    let mut changed = false;
    for j in 0..n {
      changed |= self.offer_self(j);
      for i in 0..j {
        changed |= self.offer_between(j, i);
      }
    }
    if changed {
      log::debug!("full sweep found better candidates");
      self.drain_orphans();
    }
    self.table.settle_all();
    checkpoint(&mut self.progress, n, n)?;
    Ok(changed)
  }

  /// Merges the closest pair of ends until no pair is within `max_distance`.
  /// Returns the number of merges.
  pub fn merge_all(&mut self, max_distance: f64) -> Result<usize, Error> {
    let max_sq = max_distance * max_distance;
    let mut merges = 0;
    loop {
      self.update()?;
      match self.table.best() {
        Some(pair) if pair.distance_sq <= max_sq => {
          self.merge(pair)?;
          merges += 1;
        }
        _ => {
          if !self.full_sweep()? {
            break;
          }
        }
      }
    }
    log::debug!("{} merges, {} paths left", merges, self.len());
    Ok(merges)
  }

  fn merge(&mut self, pair: CandidatePair) -> Result<(), Error> {
    let overlap = pair.distance_sq <= self.config.overlap_distance_sq;
    if pair.is_self_closure() {
      let id = pair.a.path;
      log::trace!("closing path {} (d² = {})", id.0, pair.distance_sq);
      self.table.forget(&DirectedEnd::leading(id));
      self.table.forget(&DirectedEnd::trailing(id));
      let path = self.slot_mut(id)?;
      if overlap && path.len() > 3 {
        path.pop()?;
      }
      path.close(Interior::Unclassified)?;
      self.drain_orphans();
      return Ok(());
    }

    // The longer path survives; the shorter one is spliced onto it.
    let (keep, gone) = if self.slot(pair.b.path)?.len() > self.slot(pair.a.path)?.len() {
      (pair.b, pair.a)
    } else {
      (pair.a, pair.b)
    };
    log::trace!(
      "joining {:?} of path {} onto {:?} of path {} (d² = {})",
      gone.end,
      gone.path.0,
      keep.end,
      keep.path.0,
      pair.distance_sq
    );
    self.table.forget(&keep);
    self.table.forget(&gone);
    let mut consumed = self
      .paths
      .get_mut(gone.path.0)
      .and_then(Option::take)
      .ok_or(Error::MissingPath(gone.path))?;
    // Joining like ends needs one of the paths flipped. Only the shorter one
    // is ever reversed.
    if keep.end == gone.end {
      consumed.reverse()?;
    }
    let pts = consumed.points();
    let survivor = self.slot_mut(keep.path)?;
    match keep.end {
      End::Trailing => {
        let skip = usize::from(overlap).min(pts.len());
        survivor.append(&pts[skip..])?;
      }
      End::Leading => {
        let keep_len = pts.len() - usize::from(overlap).min(pts.len());
        survivor.prepend(&pts[..keep_len])?;
      }
    }
    // The free end of the consumed path is now an end of the survivor.
    let free = DirectedEnd::new(gone.path, gone.end.opposite());
    self.table.rekey(&free, &keep);
    self.evaluated[keep.path.0] = false;
    self.drain_orphans();
    Ok(())
  }

  // Compares path `j` with every other path. Pairs with a pending path of
  // lower index were already offered when that path was evaluated.
  fn evaluate(&mut self, j: usize, pending: &[bool]) {
    self.offer_self(j);
    for i in 0..self.paths.len() {
      if i == j || (i < j && pending[i]) {
        continue;
      }
      self.offer_between(j, i);
    }
    for end in [End::Leading, End::Trailing] {
      let key = DirectedEnd::new(PathId(j), end);
      if self.table.get(&key).is_none() {
        log::warn!("no merge candidate for {:?} end of path {}", end, j);
      }
    }
  }

  fn offer_self(&mut self, j: usize) -> bool {
    match self.ends(j) {
      Some((first, last, len)) if len >= self.config.min_ring_points => {
        let id = PathId(j);
        self.table.offer(CandidatePair::new(
          DirectedEnd::leading(id),
          DirectedEnd::trailing(id),
          first.squared_euclidean_distance(&last),
        ))
      }
      _ => false,
    }
  }

  // Offers all four combinations of ends, which covers both optional
  // reversals.
  fn offer_between(&mut self, j: usize, i: usize) -> bool {
    let (ends_j, ends_i) = match (self.ends(j), self.ends(i)) {
      (Some((fj, lj, _)), Some((fi, li, _))) => {
        ([(End::Leading, fj), (End::Trailing, lj)], [(End::Leading, fi), (End::Trailing, li)])
      }
      _ => return false,
    };
    let mut kept = false;
    for (end_j, pt_j) in ends_j {
      for (end_i, pt_i) in ends_i {
        kept |= self.table.offer(CandidatePair::new(
          DirectedEnd::new(PathId(j), end_j),
          DirectedEnd::new(PathId(i), end_i),
          pt_j.squared_euclidean_distance(&pt_i),
        ));
      }
    }
    kept
  }

  fn ends(&self, i: usize) -> Option<(Point<f64>, Point<f64>, usize)> {
    let path = self.paths.get(i)?.as_ref()?;
    if path.is_closed() {
      return None;
    }
    Some((*path.first()?, *path.last()?, path.len()))
  }

  fn participates(&self, i: usize) -> bool {
    self.ends(i).is_some()
  }

  fn drain_orphans(&mut self) {
    for orphan in self.table.take_orphans() {
      if self.participates(orphan.path.0) {
        self.evaluated[orphan.path.0] = false;
      }
    }
  }

  fn open_ids(&self) -> Vec<PathId> {
    (0..self.paths.len())
      .filter(|&i| self.participates(i))
      .map(PathId)
      .collect()
  }

  fn slot(&self, id: PathId) -> Result<&Path, Error> {
    self.path(id).ok_or(Error::MissingPath(id))
  }

  fn slot_mut(&mut self, id: PathId) -> Result<&mut Path, Error> {
    self
      .paths
      .get_mut(id.0)
      .and_then(Option::as_mut)
      .ok_or(Error::MissingPath(id))
  }
}
