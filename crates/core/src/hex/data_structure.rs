use crate::hex::Hex;
use fnv::FnvBuildHasher;
use std::collections::HashSet;

/// A set of hex cells. This is the backing collection for grid membership
/// and for blocked-cell sets, so it gets a fast non-cryptographic hasher.
pub type HexSet = HashSet<Hex, FnvBuildHasher>;
