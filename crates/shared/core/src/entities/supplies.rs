use serde::{Deserialize, Serialize};

use crate::math::{MathError, MathResult};
use crate::values::Amount;

/// Which issued token an amount refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Pegged token ("neutron")
    Stable,
    /// Residual token ("proton")
    Volatile,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Stable => write!(f, "STABLE"),
            TokenKind::Volatile => write!(f, "VOLATILE"),
        }
    }
}

/// Outstanding supplies of the two issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Supplies {
    pub stable: Amount,
    pub volatile: Amount,
}

impl Supplies {
    pub fn new(stable: Amount, volatile: Amount) -> Self {
        Self { stable, volatile }
    }

    pub fn get(&self, kind: TokenKind) -> Amount {
        match kind {
            TokenKind::Stable => self.stable,
            TokenKind::Volatile => self.volatile,
        }
    }

    /// Both supplies are non-zero
    pub fn both_outstanding(&self) -> bool {
        self.stable > 0 && self.volatile > 0
    }

    /// Record a mint
    pub fn credit(&mut self, kind: TokenKind, amount: Amount) -> MathResult<()> {
        let slot = self.slot_mut(kind);
        *slot = slot
            .checked_add(amount)
            .ok_or(MathError::Overflow("supply credit"))?;
        Ok(())
    }

    /// Record a burn
    pub fn debit(&mut self, kind: TokenKind, amount: Amount) -> MathResult<()> {
        let slot = self.slot_mut(kind);
        *slot = slot.checked_sub(amount).ok_or(MathError::Negative)?;
        Ok(())
    }

    fn slot_mut(&mut self, kind: TokenKind) -> &mut Amount {
        match kind {
            TokenKind::Stable => &mut self.stable,
            TokenKind::Volatile => &mut self.volatile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_and_debit() {
        let mut supplies = Supplies::default();
        supplies.credit(TokenKind::Stable, 250).unwrap();
        supplies.credit(TokenKind::Volatile, 750).unwrap();
        assert!(supplies.both_outstanding());

        supplies.debit(TokenKind::Volatile, 750).unwrap();
        assert_eq!(supplies, Supplies::new(250, 0));
        assert!(!supplies.both_outstanding());
    }

    #[test]
    fn test_debit_below_zero_fails() {
        let mut supplies = Supplies::new(10, 10);
        assert_eq!(supplies.debit(TokenKind::Stable, 11), Err(MathError::Negative));
        assert_eq!(supplies.get(TokenKind::Stable), 10);
    }

    #[test]
    fn test_credit_overflow_fails() {
        let mut supplies = Supplies::new(u128::MAX, 0);
        assert!(supplies.credit(TokenKind::Stable, 1).is_err());
    }
}
