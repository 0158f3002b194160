//! Deterministic RNG streams for raid mount assignment.

use hmac::{Hmac, Mac};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sha2::Sha256;
use std::cell::{RefCell, RefMut};

/// Deterministic bundle of RNG streams segregated by draw domain.
///
/// Each raid-generation call gets its own bundle so the chance, tier,
/// and species draws stay reproducible independently of one another.
#[derive(Debug, Clone)]
pub struct RaidRngBundle {
    chance: RefCell<CountingRng<SmallRng>>,
    tier: RefCell<CountingRng<SmallRng>>,
    species: RefCell<CountingRng<SmallRng>>,
}

impl RaidRngBundle {
    /// Construct the bundle from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        let chance = CountingRng::new(derive_stream_seed(seed, b"chance"));
        let tier = CountingRng::new(derive_stream_seed(seed, b"tier"));
        let species = CountingRng::new(derive_stream_seed(seed, b"species"));
        Self {
            chance: RefCell::new(chance),
            tier: RefCell::new(tier),
            species: RefCell::new(species),
        }
    }

    /// Access the per-character chance-roll stream.
    #[must_use]
    pub fn chance(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.chance.borrow_mut()
    }

    /// Access the tier-roll stream.
    #[must_use]
    pub fn tier(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.tier.borrow_mut()
    }

    /// Access the weighted species-draw stream.
    #[must_use]
    pub fn species(&self) -> RefMut<'_, CountingRng<SmallRng>> {
        self.species.borrow_mut()
    }
}

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<SmallRng> {
    fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            draws: 0,
        }
    }
}

impl<R: rand::RngCore> CountingRng<R> {
    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: rand::RngCore> rand::RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
