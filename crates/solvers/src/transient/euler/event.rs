use levitas_core::Snapshot;

/// Event emitted by the Euler solver for each snapshot.
///
/// Step 0 carries the initial input. Steps `1..=N` follow each update.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    pub step: usize,
    pub snapshot: Snapshot<I, O>,
}
