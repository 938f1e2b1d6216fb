use {
    crate::Felt,
    starknet_types_core::hash::{Pedersen, StarkHash},
};

/// Pedersen hash of two field elements over the Stark curve.
pub fn pedersen_hash(a: &Felt, b: &Felt) -> Felt {
    Pedersen::hash(a, b)
}

/// Hash of an array of field elements as computed by Cairo's
/// `hash_state`: the elements are folded into a Pedersen chain starting at
/// zero and the result is hashed together with the number of elements.
pub fn compute_hash_on_elements(elements: &[Felt]) -> Felt {
    let folded = elements
        .iter()
        .fold(Felt::ZERO, |state, element| pedersen_hash(&state, element));
    pedersen_hash(&folded, &Felt::from(elements.len() as u64))
}
