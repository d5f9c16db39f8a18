/// 32-bit rolling hash of an id: `h = h * 31 + unit` over the UTF-16 code
/// units of `id`, with two's-complement wrap-around on every step.
///
/// This is the same value a host that stores strings as UTF-16 computes with
/// 32-bit integer arithmetic, so colours and importances line up across
/// implementations. Characters outside the BMP contribute both surrogates.
pub fn id_hash(id: &str) -> i32 {
    id.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_id_hashes_to_zero() {
        assert_eq!(id_hash(""), 0);
    }

    #[test]
    fn known_vectors() {
        assert_eq!(id_hash("1"), 49);
        assert_eq!(id_hash("abc"), 96354);
        assert_eq!(id_hash("hello"), 99162322);
        assert_eq!(id_hash("Hello World"), -862545276);
        assert_eq!(id_hash("a1b2c3d4-0000-4000-8000-000000000001"), -1340998843);
    }

    #[test]
    fn wraps_to_i32_min() {
        assert_eq!(id_hash("polygenelubricants"), i32::MIN);
    }

    #[test]
    fn uses_utf16_code_units() {
        assert_eq!(id_hash("é"), 233);
        // U+1F600 is the surrogate pair D83D DE00
        assert_eq!(id_hash("😀"), 0xD83D * 31 + 0xDE00);
        assert_eq!(id_hash("😀"), 1772899);
    }

    #[test]
    fn collisions_are_hash_collisions() {
        assert_eq!(id_hash("Aa"), id_hash("BB"));
    }

    proptest! {
        #[test]
        fn hash_is_pure(id in ".{0,64}") {
            prop_assert_eq!(id_hash(&id), id_hash(&id));
        }

        #[test]
        fn appending_follows_the_recurrence(id in "[a-z0-9-]{0,40}", c in proptest::char::range('!', '~')) {
            let extended = format!("{id}{c}");
            let expected = id_hash(&id).wrapping_mul(31).wrapping_add(c as i32);
            prop_assert_eq!(id_hash(&extended), expected);
        }
    }
}
