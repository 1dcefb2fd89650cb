//! Hash functions for the string table and the dictionary.

/// sdbm content hash (<http://www.cse.yorku.ca/~oz/hash.html>).
pub(crate) fn sdbm(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0;
    for &c in bytes {
        hash = (c as u32)
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash);
    }
    hash
}

/// Thomas Wang's 64-bit to 32-bit mix. Interned string pointers are unique,
/// so the pointer value itself is the key material.
pub(crate) fn hash6432shift(mut key: u64) -> u32 {
    key = (!key).wrapping_add(key << 18);
    key ^= key >> 31;
    key = key.wrapping_add(key << 2).wrapping_add(key << 4);
    key ^= key >> 11;
    key = key.wrapping_add(key << 6);
    key ^= key >> 22;
    key as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdbm_is_content_stable() {
        assert_eq!(sdbm(b"lol"), sdbm(b"lol"));
        assert_ne!(sdbm(b"lol"), sdbm(b"wtf"));
        assert_eq!(sdbm(b""), 0);
    }

    #[test]
    fn pointer_mix_spreads_nearby_values() {
        // Heap pointers differ in their low bits; the mix must not map
        // neighbours to the same bucket index.
        let a = hash6432shift(0x7f00_0000_1000);
        let b = hash6432shift(0x7f00_0000_1010);
        assert_ne!(a & 0xff, b & 0xff);
    }
}
