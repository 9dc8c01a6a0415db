use crate::utils::error::{Result, TestkitError};
use rand::seq::IteratorRandom;
use strum::IntoEnumIterator;

/// Returns a uniformly selected variant of `E`.
pub fn random_variant<E: IntoEnumIterator>() -> Result<E> {
    E::iter()
        .choose(&mut rand::thread_rng())
        .ok_or(TestkitError::EmptyEnumError {
            type_name: std::any::type_name::<E>(),
        })
}
