// charge/set.rs
// Ordered collection of point charges owned by the viewer

use super::types::{Charge, Polarity};
use serde::{Deserialize, Serialize};

/// Insertion-ordered set of charges. Order does not affect the physics but
/// keeps traced output stable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChargeSet {
    charges: Vec<Charge>,
}

impl ChargeSet {
    pub fn new() -> Self {
        Self { charges: Vec::new() }
    }

    /// Append a charge. Does not trigger any recomputation.
    pub fn add(&mut self, charge: Charge) {
        self.charges.push(charge);
    }

    pub fn clear(&mut self) {
        self.charges.clear();
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Charge> {
        self.charges.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Charge> {
        self.charges.iter()
    }

    /// Charges of the given polarity, paired with their index in the set.
    pub fn of_polarity(&self, polarity: Polarity) -> impl Iterator<Item = (usize, &Charge)> + '_ {
        self.charges
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.polarity() == Some(polarity))
    }

    /// Sum of signed magnitudes.
    pub fn net_charge(&self) -> f32 {
        self.charges.iter().map(|c| c.magnitude).sum()
    }
}

impl<'a> IntoIterator for &'a ChargeSet {
    type Item = &'a Charge;
    type IntoIter = std::slice::Iter<'a, Charge>;

    fn into_iter(self) -> Self::IntoIter {
        self.charges.iter()
    }
}

impl FromIterator<Charge> for ChargeSet {
    fn from_iter<I: IntoIterator<Item = Charge>>(iter: I) -> Self {
        Self { charges: iter.into_iter().collect() }
    }
}

impl Extend<Charge> for ChargeSet {
    fn extend<I: IntoIterator<Item = Charge>>(&mut self, iter: I) {
        self.charges.extend(iter);
    }
}
