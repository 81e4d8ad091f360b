use std::num::NonZeroU32;

use super::errors::CartError;

/// Number of units on a cart line. Never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    pub fn new(value: u32) -> Result<Self, CartError> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or(CartError::QuantityBelowMinimum)
    }

    /// Lenient constructor for remote payloads: a missing or zero quantity counts as one.
    pub fn or_one(value: Option<u32>) -> Self {
        value
            .and_then(NonZeroU32::new)
            .map(Self)
            .unwrap_or(Self::ONE)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn saturating_add(self, other: Quantity) -> Self {
        Self(self.0.saturating_add(other.get()))
    }
}

impl TryFrom<u32> for Quantity {
    type Error = CartError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single-step quantity change requested from the cart view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Increment,
    Decrement,
}

impl QuantityChange {
    /// Computes the quantity after the change.
    ///
    /// A decrement at one is rejected rather than clamped or turned into a removal.
    pub fn apply(self, current: Quantity) -> Result<Quantity, CartError> {
        match self {
            QuantityChange::Increment => Ok(current.saturating_add(Quantity::ONE)),
            QuantityChange::Decrement => Quantity::new(current.get() - 1),
        }
    }
}

impl std::fmt::Display for QuantityChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantityChange::Increment => write!(f, "increment"),
            QuantityChange::Decrement => write!(f, "decrement"),
        }
    }
}

/// What a decrement at quantity one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecrementPolicy {
    /// The decrement is rejected and the line stays at one.
    #[default]
    Reject,
    /// The line is removed from the cart.
    RemoveAtFloor,
}

impl std::fmt::Display for DecrementPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecrementPolicy::Reject => write!(f, "reject"),
            DecrementPolicy::RemoveAtFloor => write!(f, "remove"),
        }
    }
}

impl std::str::FromStr for DecrementPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(DecrementPolicy::Reject),
            "remove" => Ok(DecrementPolicy::RemoveAtFloor),
            _ => Err(format!("Invalid decrement policy: {}", s)),
        }
    }
}
