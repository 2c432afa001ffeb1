//! Suggested offerings for "Let the Oracle Choose".

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Offering, OfferingKind};

const ORACLE_OFFERINGS: [(OfferingKind, &str); 8] = [
    (OfferingKind::Movie, "Spirited Away"),
    (OfferingKind::Artist, "Daft Punk"),
    (OfferingKind::Game, "Stardew Valley"),
    (OfferingKind::Book, "Dune"),
    (OfferingKind::Tv, "Arcane"),
    (OfferingKind::Movie, "Blade Runner 2049"),
    (OfferingKind::Artist, "FKA Twigs"),
    (OfferingKind::Game, "Hades"),
];

/// Pick one suggested offering at random.
pub fn oracle_pick<R: Rng + ?Sized>(rng: &mut R) -> Offering {
    let (kind, name) = ORACLE_OFFERINGS
        .choose(rng)
        .copied()
        .unwrap_or(ORACLE_OFFERINGS[0]);
    Offering::new(kind, name)
}

/// Every offering the Oracle can suggest.
pub fn suggestions() -> impl Iterator<Item = Offering> {
    ORACLE_OFFERINGS
        .iter()
        .map(|(kind, name)| Offering::new(*kind, *name))
}
