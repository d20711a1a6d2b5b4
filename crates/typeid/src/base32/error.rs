/// Errors produced by [`decode`](crate::decode).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Base32Error {
    /// The input is not exactly [`SUFFIX_LEN`](crate::SUFFIX_LEN) bytes.
    #[error("invalid length: {len}")]
    InvalidLength { len: usize },

    /// The byte at `index` is not part of the alphabet.
    #[error("invalid ascii byte {byte} at index {index}")]
    InvalidCharacter { byte: u8, index: usize },

    /// The two most significant encoded bits are set.
    #[error("decode overflow")]
    Overflow,
}
