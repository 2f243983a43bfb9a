//! Table construction parameters.

use crate::error::Error;

/// Initial sizing and resize thresholds for a table or set.
///
/// Loads are integer percentages of occupied slots over capacity, computed as
/// `count * 100 / capacity`. Inserts grow the table first when the load is
/// above `grow_above`; deletes shrink it first when the load is below
/// `shrink_below`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub base_capacity: usize,
    pub grow_above: usize,
    pub shrink_below: usize,
}

impl Config {
    pub const DEFAULT_GROW_ABOVE: usize = 70;
    pub const DEFAULT_SHRINK_BELOW: usize = 10;

    pub const fn new() -> Self {
        Self {
            base_capacity: 0,
            grow_above: Self::DEFAULT_GROW_ABOVE,
            shrink_below: Self::DEFAULT_SHRINK_BELOW,
        }
    }

    /// 0 selects `DEFAULT_BASE_CAPACITY`.
    pub const fn base_capacity(mut self, base_capacity: usize) -> Self {
        self.base_capacity = base_capacity;
        self
    }

    pub const fn grow_above(mut self, percent: usize) -> Self {
        self.grow_above = percent;
        self
    }

    pub const fn shrink_below(mut self, percent: usize) -> Self {
        self.shrink_below = percent;
        self
    }

    /// The grow threshold must stay below 100% so at least one slot is
    /// always Empty, and the shrink threshold must sit under it so a grow
    /// is never immediately undone by a shrink.
    pub fn validate(&self) -> Result<(), Error> {
        if self.grow_above >= 100 || self.shrink_below >= self.grow_above {
            return Err(Error::InvalidConfig {
                grow_above: self.grow_above,
                shrink_below: self.shrink_below,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
