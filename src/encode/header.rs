//! Writing the header of encoded values.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use crate::ident::{Ident, Tag};
use crate::length::Length;
use super::target::Target;


/// Returns the length of the header of a value.
///
/// The header in the sense of this function is the identifier octets and the
/// length octets.
pub fn header_len(tag: Tag, content_len: usize) -> usize {
    Ident::from_tag(tag, false).encoded_len()
        + Length::from_usize(content_len).encoded_len()
}

/// Returns the length of the complete encoding of a value.
pub fn total_len(tag: Tag, content_len: usize) -> usize {
    header_len(tag, content_len) + content_len
}

/// Writes the header for a value.
pub fn write_header<T: Target>(
    target: &mut T,
    tag: Tag,
    constructed: bool,
    content_len: usize,
) -> Result<(), T::Error> {
    Ident::from_tag(tag, constructed).write_encoded(target)?;
    Length::from_usize(content_len).write_encoded(target)?;
    Ok(())
}

/// Writes a complete value.
pub fn write_tlv<T: Target>(
    target: &mut T,
    tag: Tag,
    constructed: bool,
    content: &[u8],
) -> Result<(), T::Error> {
    write_header(target, tag, constructed, content.len())?;
    target.write_all(content)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::encode::infallible;

    #[test]
    fn headers() {
        let mut target = Vec::new();
        infallible(write_header(&mut target, Tag::SEQUENCE, true, 3));
        infallible(write_tlv(&mut target, Tag::ctx(0), false, b"\x01"));
        assert_eq!(target, b"\x30\x03\x80\x01\x01");

        assert_eq!(header_len(Tag::SET, 0x7f), 2);
        assert_eq!(total_len(Tag::SET, 0x80), 0x83);
        assert_eq!(total_len(Tag::ctx(40), 1), 4);
    }
}
