use crate::Error;

/// Receives progress reports from long running operations.
///
/// Reports are advisory: the operation only looks at
/// [`is_cancelled`](Progress::is_cancelled) at its checkpoints and never
/// stops in the middle of a step.
pub trait Progress {
  fn set_description(&mut self, _description: &str) {}

  /// Percentage in `0..=100`.
  fn progress(&mut self, _percent: u8) {}

  fn is_cancelled(&self) -> bool {
    false
  }
}

/// Ignores every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

impl<P: Progress + ?Sized> Progress for &mut P {
  fn set_description(&mut self, description: &str) {
    (**self).set_description(description)
  }

  fn progress(&mut self, percent: u8) {
    (**self).progress(percent)
  }

  fn is_cancelled(&self) -> bool {
    (**self).is_cancelled()
  }
}

/// Reports `done` out of `total` and fails if the sink asked to stop.
pub(crate) fn checkpoint<P: Progress + ?Sized>(
  sink: &mut P,
  done: usize,
  total: usize,
) -> Result<(), Error> {
  let percent = if total == 0 {
    100
  } else {
    (done.min(total) * 100 / total) as u8
  };
  sink.progress(percent);
  if sink.is_cancelled() {
    return Err(Error::Cancelled);
  }
  Ok(())
}
