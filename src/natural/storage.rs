//! buffer bookkeeping, everything in here keeps the significant bytes and their value intact
use super::Natural;

/// values build from native ints or text get room for at least a `u64`
pub(super) const MIN_CAPACITY: usize = u64::BITS as usize / 8;

impl Natural {
    pub(super) fn allocate(size: usize) -> Vec<u8> {
        vec![0; size]
    }
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Self::allocate(capacity),
            payload: 0,
        }
    }
    /// takes `buffer` as the new storage, all of it significant up to leading zeros
    pub(super) fn from_buffer(buffer: Vec<u8>) -> Self {
        let mut num = Self {
            payload: buffer.len(),
            buffer,
        };
        num.normalize();
        num
    }
    /// builds from bytes in little endian order
    pub(super) fn from_le_digits(digits: impl IntoIterator<Item = u8>) -> Self {
        let mut buffer: Vec<u8> = digits.into_iter().collect();
        buffer.reverse();
        Self::from_buffer(buffer)
    }

    /// moves the significant bytes into a new buffer of `new_size` bytes,
    /// so that they end `shift` bytes before its end. The `shift` lowest bytes are zero.
    ///
    /// `payload` is not changed.
    pub(super) fn grow_and_copy(&mut self, new_size: usize, shift: usize) {
        assert!(
            self.payload + shift <= new_size,
            "{} bytes don't fit into {new_size} with an offset of {shift}",
            self.payload
        );
        log::trace!(
            "growing buffer from {} to {new_size} bytes, shifted by {shift}",
            self.capacity()
        );
        let mut buffer = Self::allocate(new_size);
        let end = new_size - shift;
        buffer[end - self.payload..end].copy_from_slice(self.as_bytes());
        self.buffer = buffer;
    }

    fn grown_size(&self, required: usize) -> usize {
        required.max(self.capacity() * 2).max(MIN_CAPACITY)
    }

    /// makes sure `additional` more significant bytes fit
    pub(super) fn ensure_capacity(&mut self, additional: usize) {
        let required = self.payload + additional;
        if required > self.capacity() {
            self.grow_and_copy(self.grown_size(required), 0);
        }
    }

    /// appends `count` zero bytes below the significant ones, moving them up.
    /// The payload grows by `count`.
    pub(super) fn push_low_zeros(&mut self, count: usize) {
        if count == 0 || self.is_zero() {
            return;
        }
        let required = self.payload + count;
        if required > self.capacity() {
            self.grow_and_copy(self.grown_size(required), count);
        } else {
            let cap = self.capacity();
            let start = cap - self.payload;
            self.buffer.copy_within(start..cap, start - count);
            self.buffer[cap - count..].fill(0);
        }
        self.payload = required;
    }
    /// drops the `count` lowest significant bytes, moving the rest down
    pub(super) fn drop_low_bytes(&mut self, count: usize) {
        if count >= self.payload {
            self.set_zero();
            return;
        }
        let cap = self.capacity();
        let start = cap - self.payload;
        self.buffer.copy_within(start..cap - count, start + count);
        self.payload -= count;
    }

    /// makes the `len` lowest bytes significant, the newly exposed ones are zeroed.
    ///
    /// This may leave leading zeros, so [`Natural::normalize`] has to follow eventually.
    pub(super) fn widen_payload(&mut self, len: usize) {
        if len <= self.payload {
            return;
        }
        self.ensure_capacity(len - self.payload);
        let cap = self.capacity();
        self.buffer[cap - len..cap - self.payload].fill(0);
        self.payload = len;
    }
    /// keeps only the lowest `len` significant bytes
    pub(super) fn truncate_payload(&mut self, len: usize) {
        self.payload = self.payload.min(len);
        self.normalize();
    }

    /// drops leading zero bytes from the payload
    pub(super) fn normalize(&mut self) {
        let leading = self.as_bytes().iter().take_while(|&&it| it == 0).count();
        self.payload -= leading;
        self.debug_check();
    }
    pub(super) fn set_zero(&mut self) {
        self.payload = 0;
    }
    pub(super) fn set_u64(&mut self, value: u64) {
        self.set_zero();
        self.ensure_capacity(MIN_CAPACITY);
        self.payload = MIN_CAPACITY;
        self.as_bytes_mut().copy_from_slice(&value.to_be_bytes());
        self.normalize();
    }

    pub(super) fn debug_check(&self) {
        debug_assert!(
            self.payload <= self.capacity(),
            "payload {} exceeds capacity {}",
            self.payload,
            self.capacity()
        );
        debug_assert!(
            self.as_bytes().first().map_or(true, |&it| it != 0),
            "leading zero in {self:?}"
        );
    }
}
