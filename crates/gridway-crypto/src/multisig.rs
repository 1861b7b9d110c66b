//! Legacy amino multisig support
//!
//! A [`LegacyAminoPubKey`] is an ordered list of constituent keys plus a
//! threshold. Constituents can themselves be multisig keys. Signatures for it
//! travel as an [`AminoMultisignature`]: a [`CompactBitArray`] with one bit per
//! constituent position and the signatures of the set positions, compacted in
//! position order.

use crate::error::KeyError;
use crate::keys::PublicKey;

/// Legacy amino threshold multisig public key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyAminoPubKey {
    threshold: u32,
    public_keys: Vec<PublicKey>,
}

impl LegacyAminoPubKey {
    /// Build a multisig key; the threshold must be between 1 and the key count
    pub fn new(threshold: u32, public_keys: Vec<PublicKey>) -> Result<Self, KeyError> {
        if threshold == 0 || threshold as usize > public_keys.len() {
            return Err(KeyError::InvalidThreshold {
                threshold,
                keys: public_keys.len(),
            });
        }

        Ok(Self {
            threshold,
            public_keys,
        })
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Constituent keys in their fixed order
    pub fn get_pub_keys(&self) -> &[PublicKey] {
        &self.public_keys
    }

    /// Number of constituent keys
    pub fn len(&self) -> usize {
        self.public_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.public_keys.is_empty()
    }
}

/// Space efficient bit array, one bit per multisig constituent.
///
/// Bits are stored most significant first inside each byte, and
/// `extra_bits_stored` is the number of meaningful bits in the last byte
/// (zero meaning the last byte is full).
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct CompactBitArray {
    #[prost(uint32, tag = "1")]
    pub extra_bits_stored: u32,
    #[prost(bytes = "vec", tag = "2")]
    pub elems: Vec<u8>,
}

impl CompactBitArray {
    /// Bit array with `bits` cleared bits, or `None` for zero bits
    pub fn new(bits: usize) -> Option<Self> {
        if bits == 0 {
            return None;
        }

        Some(Self {
            extra_bits_stored: (bits % 8) as u32,
            elems: vec![0; (bits + 7) / 8],
        })
    }

    /// Number of addressable bits
    pub fn count(&self) -> usize {
        match (self.elems.len(), self.extra_bits_stored) {
            (0, _) => 0,
            (len, 0) => len * 8,
            (len, extra) => (len - 1) * 8 + (extra as usize).min(8),
        }
    }

    /// Bit at `index`; indices past the end read as unset
    pub fn get_index(&self, index: usize) -> bool {
        if index >= self.count() {
            return false;
        }
        self.elems[index >> 3] & Self::mask(index) != 0
    }

    /// Set or clear the bit at `index`, returning false when out of range
    pub fn set_index(&mut self, index: usize, value: bool) -> bool {
        if index >= self.count() {
            return false;
        }
        if value {
            self.elems[index >> 3] |= Self::mask(index);
        } else {
            self.elems[index >> 3] &= !Self::mask(index);
        }
        true
    }

    /// Number of set bits strictly before `index`
    pub fn num_true_bits_before(&self, index: usize) -> usize {
        let index = index.min(self.count());
        let full_bytes = index >> 3;
        let mut total: usize = self.elems[..full_bytes]
            .iter()
            .map(|b| b.count_ones() as usize)
            .sum();
        for i in (full_bytes << 3)..index {
            if self.get_index(i) {
                total += 1;
            }
        }
        total
    }

    /// Total number of set bits
    pub fn true_count(&self) -> usize {
        self.num_true_bits_before(self.count())
    }

    /// Set positions in ascending order
    pub fn true_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count()).filter(move |i| self.get_index(*i))
    }

    fn mask(index: usize) -> u8 {
        1 << (7 - (index % 8))
    }
}

/// Legacy multisig signature wire record
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AminoMultisignature {
    #[prost(message, optional, tag = "1")]
    pub bit_array: Option<CompactBitArray>,
    #[prost(bytes = "vec", repeated, tag = "2")]
    pub sigs: Vec<Vec<u8>>,
}

impl AminoMultisignature {
    pub fn new(bit_array: CompactBitArray, sigs: Vec<Vec<u8>>) -> Self {
        Self {
            bit_array: Some(bit_array),
            sigs,
        }
    }

    /// Whether the constituent at `index` signed
    pub fn signed(&self, index: usize) -> bool {
        self.bit_array
            .as_ref()
            .map(|bits| bits.get_index(index))
            .unwrap_or(false)
    }

    /// Size of the bit array, zero when absent
    pub fn bit_count(&self) -> usize {
        self.bit_array.as_ref().map(CompactBitArray::count).unwrap_or(0)
    }
}
