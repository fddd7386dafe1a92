use std::collections::VecDeque;

use crate::games::RandomSource;

/// Replays fixed answers and panics when a test consumes more than it scripted.
pub(crate) struct ScriptedRng {
    bools: VecDeque<bool>,
    indices: VecDeque<usize>,
}

impl ScriptedRng {
    pub(crate) fn new(bools: Vec<bool>, indices: Vec<usize>) -> Self {
        Self {
            bools: bools.into(),
            indices: indices.into(),
        }
    }
}

impl RandomSource for ScriptedRng {
    fn random_bool(&mut self) -> bool {
        self.bools.pop_front().expect("scripted rng ran out of bools")
    }

    fn random_index(&mut self, upper: usize) -> usize {
        let index = self.indices.pop_front().expect("scripted rng ran out of indices");
        assert!(index < upper, "scripted index {} out of range 0..{}", index, upper);
        index
    }
}
