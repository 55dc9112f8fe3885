//! Defines base traits for abstract algebra concepts. Dimensions and units both compose
//! multiplicatively, and the laws they have to obey are exactly the group laws, so they are written
//! down once here.

use std::fmt::Debug;

/// Group element requirements.
pub trait GroupElement: Debug + Clone {}

impl<T: Debug + Clone> GroupElement for T {}

/// A mathematical group: a set and operation that satisfies closure, the existence of an identity,
/// the existence of an inverse, and associativity. Multiple groups, with different semantics, can
/// be defined for a single element type, and the group can operate under a different equivalence
/// relation than the default for the element type.
pub trait Group<E: GroupElement> {
    /// The identity. Must be an e such that ae = ea = a for all a in the group.
    fn identity(&self) -> E;

    /// Computing the inverse: must have ab = ba = e for a to be b's inverse.
    fn inv(&self, element: &E) -> E;

    /// The group operation. Must be associative.
    fn compose(&self, a: &E, b: &E) -> E;

    /// Equivalence relation on group elements.
    fn equiv(&self, a: &E, b: &E) -> bool;

    /// Combines the elements using the composition operation, computing `abc` when given `[a, b,
    /// c]`. Returns the identity when given an empty list.
    fn reduce<'a, T: IntoIterator<Item = &'a E>>(&self, elems: T) -> E
    where
        E: 'a,
    {
        elems
            .into_iter()
            .fold(self.identity(), |acc, el| self.compose(&acc, el))
    }

    /// Integer power of an element. Negative powers compose the inverse.
    fn pow(&self, a: &E, n: i32) -> E {
        let base = if n < 0 { self.inv(a) } else { a.clone() };
        (0..n.unsigned_abs()).fold(self.identity(), |acc, _| self.compose(&acc, &base))
    }

    /// Whether an element is the identity.
    fn is_identity(&self, a: &E) -> bool {
        self.equiv(a, &self.identity())
    }
}
