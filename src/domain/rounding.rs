//! Explicit rounding direction for integer division.

/// Rounding direction for every division that produces an amount.
///
/// The pool never rounds in the caller's favour: quantities the caller
/// owes the pool round [`Up`](Self::Up), quantities the pool owes the
/// caller round [`Down`](Self::Down).  The two constructors
/// [`owed_to_pool`](Self::owed_to_pool) and
/// [`owed_to_caller`](Self::owed_to_caller) name that policy at call sites.
///
/// # Examples
///
/// ```
/// use exchange_amm::domain::Rounding;
///
/// assert!(Rounding::owed_to_pool().is_up());
/// assert!(Rounding::owed_to_caller().is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Direction for amounts the caller pays into the pool.
    #[must_use]
    pub const fn owed_to_pool() -> Self {
        Self::Up
    }

    /// Direction for amounts the pool pays out or mints to the caller.
    #[must_use]
    pub const fn owed_to_caller() -> Self {
        Self::Down
    }

    /// Returns `true` for [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` for [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_constructors() {
        assert_eq!(Rounding::owed_to_pool(), Rounding::Up);
        assert_eq!(Rounding::owed_to_caller(), Rounding::Down);
    }

    #[test]
    fn predicates_are_exclusive() {
        assert!(Rounding::Up.is_up() && !Rounding::Up.is_down());
        assert!(Rounding::Down.is_down() && !Rounding::Down.is_up());
    }
}
