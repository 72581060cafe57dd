use super::error::{DecodeError, Result};
use bytes::Bytes;
use nom::{
    bytes::complete::take,
    error::Error as NomError,
    number::complete::{be_u16, be_u24, be_u32, u8 as nom_u8},
    IResult,
};
use serde::{Serialize, Serializer};

/// Owned byte range copied out of a PDU, rendered as hex when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raw(pub Bytes);

impl Raw {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for Raw {
    fn from(v: &[u8]) -> Self {
        Raw(Bytes::copy_from_slice(v))
    }
}

impl Serialize for Raw {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

/// Bytes the decoder could not attribute to a known layout, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opaque {
    pub offset: usize,
    pub reason: DecodeError,
    pub bytes: Raw,
}

/// Bounds-checked big-endian reader over one section of a PDU.
///
/// A cursor only sees its window `[origin, origin + data.len())` of the PDU
/// and reports every position as an absolute PDU offset. Reads past the
/// window end fail with [`DecodeError::Truncated`] and leave the position
/// untouched.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    origin: usize,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    /// Cursor over `data` whose first byte sits at PDU offset `origin`.
    pub fn at(data: &'a [u8], origin: usize) -> Self {
        Self {
            data,
            origin,
            pos: 0,
        }
    }

    /// Absolute PDU offset of the next byte.
    #[inline]
    pub fn offset(&self) -> usize {
        self.origin + self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Bytes read since the window start.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Size of the whole window.
    #[inline]
    pub fn window_len(&self) -> usize {
        self.data.len()
    }

    /// Surplus at the end of a window whose layout is fully decoded.
    pub fn surplus(&mut self) -> Option<Opaque> {
        let declared = self.window_len();
        let consumed = self.consumed();
        self.opaque_rest(DecodeError::InconsistentLength { declared, consumed })
    }

    fn truncated(&self, needed: usize) -> DecodeError {
        DecodeError::Truncated {
            offset: self.offset(),
            needed,
            available: self.remaining(),
        }
    }

    fn parse<T>(
        &mut self,
        needed: usize,
        parser: impl FnOnce(&'a [u8]) -> IResult<&'a [u8], T, NomError<&'a [u8]>>,
    ) -> Result<T> {
        let input = &self.data[self.pos..];
        match parser(input) {
            Ok((rest, value)) => {
                self.pos = self.data.len() - rest.len();
                Ok(value)
            }
            Err(_) => Err(self.truncated(needed)),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.parse(1, nom_u8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.parse(2, be_u16)
    }

    pub fn read_u24(&mut self) -> Result<u32> {
        self.parse(3, be_u24)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.parse(4, be_u32)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.parse(n, move |i: &'a [u8]| take::<_, _, NomError<&'a [u8]>>(n)(i))
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn raw(&mut self, n: usize) -> Result<Raw> {
        self.read_bytes(n).map(Raw::from)
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Fixed-width ASCII field; bytes are widened as Latin-1.
    pub fn read_ascii(&mut self, n: usize) -> Result<String> {
        self.read_bytes(n).map(latin1)
    }

    /// One length byte followed by that many ASCII bytes.
    pub fn read_prefixed_ascii(&mut self) -> Result<String> {
        let start = self.pos;
        let len = self.read_u8()? as usize;
        match self.read_ascii(len) {
            Ok(s) => Ok(s),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }

    /// Everything left in the window.
    pub fn rest(&mut self) -> &'a [u8] {
        let out = &self.data[self.pos..];
        self.pos = self.data.len();
        out
    }

    pub fn raw_rest(&mut self) -> Raw {
        Raw::from(self.rest())
    }

    /// Remaining bytes as an [`Opaque`] tagged with `reason`, or `None` when
    /// the window is exhausted.
    pub fn opaque_rest(&mut self, reason: DecodeError) -> Option<Opaque> {
        if self.is_empty() {
            return None;
        }
        Some(self.remainder(reason))
    }

    /// Remaining bytes, possibly none, as an [`Opaque`] tagged with `reason`.
    pub fn remainder(&mut self, reason: DecodeError) -> Opaque {
        let offset = self.offset();
        Opaque {
            offset,
            reason,
            bytes: self.raw_rest(),
        }
    }

    /// Carve a child cursor of exactly `len` bytes and advance past it.
    pub fn sub(&mut self, len: usize) -> Result<Cursor<'a>> {
        let origin = self.offset();
        let data = self.read_bytes(len)?;
        Ok(Cursor::at(data, origin))
    }

    /// Carve a child cursor of at most `len` bytes, clamped to what is left.
    pub fn sub_clamped(&mut self, len: usize) -> Cursor<'a> {
        let origin = self.offset();
        let take = len.min(self.remaining());
        let data = &self.data[self.pos..self.pos + take];
        self.pos += take;
        Cursor::at(data, origin)
    }

    /// Run `f` on a copy of the cursor. Progress is kept on success; on
    /// failure the whole remaining window becomes an [`Opaque`].
    pub fn attempt<T>(
        &mut self,
        f: impl FnOnce(&mut Cursor<'a>) -> Result<T>,
    ) -> std::result::Result<T, Opaque> {
        let mut probe = self.clone();
        match f(&mut probe) {
            Ok(value) => {
                *self = probe;
                Ok(value)
            }
            Err(e) => Err(self.remainder(e)),
        }
    }

    /// Decode entries with `f` until the window is exhausted, at most `limit`.
    pub fn collect_rest<T>(
        &mut self,
        limit: usize,
        mut f: impl FnMut(&mut Cursor<'a>) -> Result<T>,
    ) -> Vec<Result<T>> {
        let mut out = Vec::new();
        while !self.is_empty() && out.len() < limit {
            let before = self.offset();
            let entry = f(self);
            let stuck = entry.is_err() && self.offset() == before;
            out.push(entry);
            if stuck {
                break;
            }
        }
        out
    }

    /// Decode up to `count` entries with `f`.
    ///
    /// A failing entry is kept in place as `Err`. Decoding stops after a
    /// failure that made no progress or exhausted the window, since no
    /// further entry can start there.
    pub fn collect<T>(
        &mut self,
        count: usize,
        mut f: impl FnMut(&mut Cursor<'a>, usize) -> Result<T>,
    ) -> Vec<Result<T>> {
        let mut out = Vec::with_capacity(count.min(self.remaining().max(1)));
        for index in 0..count {
            let before = self.offset();
            let entry = f(self, index);
            let stuck = entry.is_err() && (self.offset() == before || self.is_empty());
            out.push(entry);
            if stuck {
                break;
            }
        }
        out
    }
}

/// Widen Latin-1 bytes to a `String`
pub(crate) fn latin1(input: &[u8]) -> String {
    input.iter().map(|&b| b as char).collect()
}
