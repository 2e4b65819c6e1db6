use super::rotation::RebalanceFlags;

/// Rotation counters accumulated since the tree was created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub single_rotations: usize,
    pub double_rotations: usize,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rotations(&self) -> usize {
        self.single_rotations + self.double_rotations
    }

    pub(crate) fn record(&mut self, flags: RebalanceFlags) {
        if flags.contains(RebalanceFlags::Double) {
            self.double_rotations += 1;
        } else if flags.rotated() {
            self.single_rotations += 1;
        }
    }
}
