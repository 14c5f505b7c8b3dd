use alloy::primitives::{keccak256, Address, B256, U256};

use crate::core::{convention::LayoutConvention, search::SlotIndex};

/// Derive the storage key of `holder`'s entry in a mapping whose base slot is `slot`.
///
/// Both operands are encoded as 32-byte big-endian words (the address left-padded with zeros)
/// and hashed in the order given by `convention`.
///
/// ```
/// use alloy::primitives::{b256, Address};
/// use slot20_balance::{derive_key, LayoutConvention};
///
/// let key = derive_key(&Address::ZERO, 0, LayoutConvention::KeyThenSlot);
/// assert_eq!(key, b256!("ad3228b676f7d3cd4284a5443f17f1962b36e491b30a40b2405849e597ba5fb5"));
/// ```
pub fn derive_key(holder: &Address, slot: SlotIndex, convention: LayoutConvention) -> B256 {
    let holder_word = holder.into_word();
    let slot_word = B256::from(U256::from(slot).to_be_bytes::<32>());

    let (first, second) = match convention {
        LayoutConvention::KeyThenSlot => (holder_word, slot_word),
        LayoutConvention::SlotThenKey => (slot_word, holder_word),
    };

    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(first.as_slice());
    preimage[32..].copy_from_slice(second.as_slice());

    keccak256(preimage)
}
