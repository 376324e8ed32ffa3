// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Collision layer filtering

use std::collections::BTreeSet;

/// Decides which collision layers interact
///
/// Every pair of layers interacts until disabled. Pairs are unordered:
/// disabling `(1, 2)` also disables `(2, 1)`.
///
/// # Examples
///
/// ```
/// use rigid_physics::layers::LayerFilter;
///
/// let mut filter = LayerFilter::new();
/// filter.disable(1, 2);
/// assert!(!filter.interacts(2, 1));
/// assert!(filter.interacts(1, 1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerFilter {
    disabled: BTreeSet<(u32, u32)>,
}

impl LayerFilter {
    /// Filter where all layers interact
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop bodies on layers `a` and `b` from colliding
    pub fn disable(&mut self, a: u32, b: u32) {
        self.disabled.insert(ordered(a, b));
    }

    /// Let bodies on layers `a` and `b` collide again
    pub fn enable(&mut self, a: u32, b: u32) {
        self.disabled.remove(&ordered(a, b));
    }

    /// Whether layers `a` and `b` collide
    pub fn interacts(&self, a: u32, b: u32) -> bool {
        !self.disabled.contains(&ordered(a, b))
    }
}

fn ordered(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_all_interact() {
        let filter = LayerFilter::new();
        assert!(filter.interacts(0, 0));
        assert!(filter.interacts(3, 7));
    }

    #[test]
    fn test_disable_enable_round_trip() {
        let mut filter = LayerFilter::new();
        filter.disable(4, 0);
        assert!(!filter.interacts(0, 4));
        assert!(filter.interacts(0, 0));
        filter.enable(0, 4);
        assert!(filter.interacts(4, 0));
    }
}
