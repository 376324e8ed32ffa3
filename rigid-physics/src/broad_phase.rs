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
//! Broad phase
//!
//! Sort-and-sweep along the x axis over world-space bounds. Candidate pairs
//! are returned as `(lower, higher)` proxy indices, sorted, so the narrow
//! phase sees the same order for the same input no matter how the sweep
//! visited them.

use crate::collider::Bounds;
use crate::layers::LayerFilter;

/// What the broad phase needs to know about one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proxy {
    /// World-space bounds
    pub bounds: Bounds,
    /// Collision layer
    pub layer: u32,
    /// Static bodies never pair with each other
    pub is_static: bool,
}

/// Candidate pairs whose bounds overlap
///
/// Pairs of two static bodies and pairs whose layers do not interact are
/// dropped. Touching bounds count as overlapping.
pub fn candidate_pairs(proxies: &[Proxy], filter: &LayerFilter) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..proxies.len()).collect();
    order.sort_by(|&a, &b| {
        proxies[a]
            .bounds
            .min
            .x
            .total_cmp(&proxies[b].bounds.min.x)
            .then(a.cmp(&b))
    });

    let mut pairs = Vec::new();
    let mut active: Vec<usize> = Vec::new();
    for &i in &order {
        let current = &proxies[i];
        active.retain(|&j| proxies[j].bounds.max.x >= current.bounds.min.x);

        for &j in &active {
            let other = &proxies[j];
            if current.is_static && other.is_static {
                continue;
            }
            if !filter.interacts(current.layer, other.layer) {
                continue;
            }
            if current.bounds.overlaps(&other.bounds) {
                pairs.push((i.min(j), i.max(j)));
            }
        }
        active.push(i);
    }

    pairs.sort_unstable();
    pairs
}
