//! Relationship depth budget.

/// Remaining number of relationship hops the walker may expand.
///
/// The budget is per edge: every recursive step hands its children
/// [`Depth::descend`] of its own budget, so siblings always see the same value.
///
/// # Examples
///
/// ```
/// use reinhardt_sideload_core::Depth;
///
/// let depth = Depth::limited(1);
/// assert!(depth.can_descend());
/// assert!(!depth.descend().can_descend());
/// assert!(Depth::Unbounded.descend().can_descend());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
	/// No limit; cycles are cut by deduplication alone.
	#[default]
	Unbounded,
	/// At most this many further hops.
	Limited(usize),
}

impl Depth {
	/// A budget of `hops` further relationship hops.
	pub fn limited(hops: usize) -> Self {
		Self::Limited(hops)
	}

	/// Only the top-level fields, no relationship expansion.
	pub fn none() -> Self {
		Self::Limited(0)
	}

	/// Whether related entities may still be expanded into their own records.
	pub fn can_descend(&self) -> bool {
		match self {
			Self::Unbounded => true,
			Self::Limited(hops) => *hops > 0,
		}
	}

	/// Budget for the next level down.
	pub fn descend(&self) -> Self {
		match self {
			Self::Unbounded => Self::Unbounded,
			Self::Limited(hops) => Self::Limited(hops.saturating_sub(1)),
		}
	}

	/// Remaining hops, `None` when unbounded.
	pub fn remaining(&self) -> Option<usize> {
		match self {
			Self::Unbounded => None,
			Self::Limited(hops) => Some(*hops),
		}
	}
}

impl From<Option<usize>> for Depth {
	fn from(depth: Option<usize>) -> Self {
		depth.map_or(Self::Unbounded, Self::Limited)
	}
}

impl From<usize> for Depth {
	fn from(hops: usize) -> Self {
		Self::Limited(hops)
	}
}
