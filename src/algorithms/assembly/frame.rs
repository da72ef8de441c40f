// Forced closure of open paths along a frame curve.
use super::RingAssembler;
use crate::data::frame::{line_crossing, nearest_position, walk, Direction, Frame};
use crate::data::{balance_crossings, BorderPoint, DirectedEnd, End, Interior, Line, Point};
use crate::progress::checkpoint;
use crate::{Error, Progress};

impl<P: Progress> RingAssembler<P> {
  /// Closes every open path by routing its ends along `frame`.
  ///
  /// Each end is extended along its last segment until it meets the frame,
  /// unless another path end is closer. The hits are sorted around the frame
  /// and paired up, starting next to `reference`: after `reference` when it
  /// lies outside the area being closed, one hit later when it lies inside.
  /// Each pair is joined by the stretch of frame between the two hits, and
  /// the resulting touching ends are merged. Paths that are still open at the
  /// end are closed as they are.
  pub fn close_against_frame<F>(
    &mut self,
    frame: &F,
    reference: &Point<f64>,
    reference_is_inside: bool,
  ) -> Result<(), Error>
  where
    F: Frame + ?Sized,
  {
    if frame.edge_count() < 3 {
      return Err(Error::InsufficientVertices);
    }
    self.update()?;
    self.progress.set_description("Closing paths against the frame");
    let (origin, _, _) =
      nearest_position(frame, reference).ok_or(Error::InsufficientVertices)?;

    let mut crossings = Vec::new();
    for id in self.open_ids() {
      let path = self.slot(id)?;
      for end in [End::Leading, End::Trailing] {
        let endpoint = match path.end_point(end) {
          Some(pt) => pt,
          None => continue,
        };
        let hit = path
          .neighbor(end)
          .filter(|neighbor| *neighbor != endpoint)
          .and_then(|neighbor| line_crossing(frame, &Line::new(neighbor, endpoint), &endpoint))
          .or_else(|| nearest_position(frame, &endpoint));
        if let Some((position, point, distance_sq)) = hit {
          // Closer to another path than to the frame: leave it to merging.
          if distance_sq < self.table.distance_sq(&DirectedEnd::new(id, end)) {
            crossings.push(BorderPoint {
              point,
              position,
              owner: id,
              end,
              min_distance_sq: distance_sq,
            });
          }
        }
      }
    }
    checkpoint(&mut self.progress, 1, 2)?;

    crossings.sort();
    if let Some(dropped) = balance_crossings(&mut crossings) {
      log::warn!(
        "odd number of frame crossings, dropping {:?} end of path {} ({} from the frame)",
        dropped.end,
        dropped.owner.0,
        dropped.min_distance_sq.sqrt()
      );
    }
    // Balancing leaves an even count; anything else is a broken invariant.
    if crossings.len() % 2 == 1 {
      return Err(Error::UnbalancedCrossings(crossings.len()));
    }

    let count = crossings.len();
    if count > 0 {
      let start = (crossings.partition_point(|c| c.position <= origin)
        + usize::from(reference_is_inside))
        % count;
      let mut open: Option<BorderPoint> = None;
      for k in 0..count {
        let crossing = crossings[(start + k) % count];
        match open.take() {
          None => open = Some(crossing),
          Some(first) => self.trace_border(frame, &first, &crossing)?,
        }
      }
      if open.is_some() {
        return Err(Error::UnterminatedBorder);
      }
    }
    checkpoint(&mut self.progress, 2, 2)?;
    log::debug!("traced {} borders along the frame", count / 2);

    // Traced borders leave ends touching; the table no longer matches.
    self.table.clear();
    self.evaluated.iter_mut().for_each(|e| *e = false);
    self.merge_all(f64::INFINITY)?;

    for id in self.open_ids() {
      let path = self.slot_mut(id)?;
      log::warn!("forcing path {} of {} points closed", id.0, path.len());
      path.close(Interior::Unclassified)?;
    }
    Ok(())
  }

  // Extends the path owning `first` along the frame up to `second`.
  fn trace_border<F>(
    &mut self,
    frame: &F,
    first: &BorderPoint,
    second: &BorderPoint,
  ) -> Result<(), Error>
  where
    F: Frame + ?Sized,
  {
    let path = self.slot_mut(first.owner)?;
    let endpoint = path
      .end_point(first.end)
      .ok_or(Error::MissingPath(first.owner))?;
    let mut border = Vec::new();
    if first.point != endpoint {
      border.push(first.point);
    }
    walk(
      frame,
      &first.position,
      &second.position,
      Direction::Forward,
      false,
      &mut border,
    );
    border.push(second.point);
    log::trace!(
      "border of {} points from path {} to path {}",
      border.len(),
      first.owner.0,
      second.owner.0
    );
    match first.end {
      End::Trailing => path.append(&border)?,
      End::Leading => {
        border.reverse();
        path.prepend(&border)?;
      }
    }
    self.evaluated[first.owner.0] = false;
    Ok(())
  }
}
