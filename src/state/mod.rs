pub mod filter;
pub mod snapshot;

pub use filter::{CourseFilter, SearchScope};
pub use snapshot::{LoadPlan, Snapshot, Summary, load_admin, load_student};

/// Load-epoch gate: each load begins by taking a token, and only a snapshot
/// carrying the latest token may be committed. A response that completes
/// after the panel started a newer load (or was torn down) is a no-op.
#[derive(Debug, Default)]
pub struct LoadGate {
    epoch: u64,
}

impl LoadGate {
    pub fn begin(&mut self) -> u64 {
        self.epoch += 1;
        self.epoch
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.epoch == token
    }

    /// Invalidate every in-flight load, e.g. on view teardown.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
    }
}
