//! Seeded, named random number streams.
//!
//! Every consumer of randomness declares its own stream with [`define_rng!`]. A stream is
//! seeded from the run's base seed plus a hash of the stream's name, so two streams never
//! share state and drawing more numbers from one of them does not shift the values another
//! produces. The same base seed therefore always reproduces the same population.
//!
//! ```
//! use outbreak::define_rng;
//! use outbreak::random::RandomSource;
//!
//! define_rng!(DocExampleRng);
//!
//! let random = RandomSource::new(42);
//! let roll: u32 = random.sample_range(DocExampleRng, 1..7);
//! assert!((1..7).contains(&roll));
//! ```

use std::any::{Any, TypeId};
use std::cell::{RefCell, RefMut};

use log::trace;
use rand::distr::uniform::{SampleRange, SampleUniform};
use rand::{Rng, SeedableRng};

use crate::hashing::{hash_str, HashMap};

/// Use this to define a unique type which will be used as a key to retrieve
/// an independent rng instance from a [`RandomSource`].
#[macro_export]
macro_rules! define_rng {
    ($random_id:ident) => {
        #[derive(Copy, Clone)]
        struct $random_id;

        impl $crate::random::RngId for $random_id {
            type RngType = $crate::rand::rngs::SmallRng;

            fn get_name() -> &'static str {
                stringify!($random_id)
            }
        }

        // This ensures that you can't define two RngIds with the same name
        $crate::paste::paste! {
            #[doc(hidden)]
            #[no_mangle]
            #[allow(non_upper_case_globals)]
            pub static [<rng_name_duplication_guard_ $random_id>]: () = ();
        }
    };
}
pub use define_rng;

pub trait RngId: Any {
    type RngType: SeedableRng;
    fn get_name() -> &'static str;
}

// This is a wrapper which allows for future support for different types of
// random number generators (anything that implements SeedableRng is valid).
struct RngHolder {
    rng: Box<dyn Any>,
}

/// Holds the base seed and the lazily created streams. The streams live in a `RefCell` so
/// sampling only needs a shared reference.
pub struct RandomSource {
    base_seed: u64,
    rng_holders: RefCell<HashMap<TypeId, RngHolder>>,
}

impl RandomSource {
    #[must_use]
    pub fn new(base_seed: u64) -> RandomSource {
        trace!("initializing random source with seed {}", base_seed);
        RandomSource {
            base_seed,
            rng_holders: RefCell::new(HashMap::default()),
        }
    }

    #[must_use]
    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    /// Gets a mutable reference to the random number generator associated with the given
    /// [`RngId`], creating it from the base seed the first time it is requested.
    fn get_rng<R: RngId + 'static>(&self) -> RefMut<R::RngType> {
        let rng_holders = self.rng_holders.borrow_mut();
        RefMut::map(rng_holders, |holders| {
            holders
                .entry(TypeId::of::<R>())
                .or_insert_with(|| {
                    trace!(
                        "creating new RNG {} (seed={})",
                        R::get_name(),
                        self.base_seed
                    );
                    let seed_offset = hash_str(R::get_name());
                    RngHolder {
                        rng: Box::new(R::RngType::seed_from_u64(
                            self.base_seed.wrapping_add(seed_offset),
                        )),
                    }
                })
                .rng
                .downcast_mut::<R::RngType>()
                .expect("RNG holder type does not match its RngId")
        })
    }

    /// Applies `sampler` to the stream associated with the given [`RngId`].
    pub fn sample<R: RngId + 'static, T>(
        &self,
        _rng_id: R,
        sampler: impl FnOnce(&mut R::RngType) -> T,
    ) -> T {
        let mut rng = self.get_rng::<R>();
        sampler(&mut rng)
    }

    /// Gets a random sample within the range provided by `range`.
    pub fn sample_range<R: RngId + 'static, S, T>(&self, rng_id: R, range: S) -> T
    where
        R::RngType: Rng,
        S: SampleRange<T>,
        T: SampleUniform,
    {
        self.sample(rng_id, |rng| rng.random_range(range))
    }

    /// Gets a random boolean value which is true with probability `p`.
    pub fn sample_bool<R: RngId + 'static>(&self, rng_id: R, p: f64) -> bool
    where
        R::RngType: Rng,
    {
        self.sample(rng_id, |rng| rng.random_bool(p))
    }
}
