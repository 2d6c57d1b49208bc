/// Mulberry32: a 32-bit mix PRNG. Fast, non-cryptographic, and fully
/// determined by its seed, which is what makes generated datasets
/// byte-reproducible across machines and runs.
///
/// The whole state is one `u32`; instances are built per file and discarded
/// once the file is written, so they are never shared between threads.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns the next 32-bit draw. All arithmetic
    /// wraps modulo 2^32.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Fills `buf` with draws serialized little-endian. A trailing partial
    /// word is the little-endian truncation of one extra draw, so the output
    /// for any buffer length is a prefix of the same infinite byte stream.
    pub fn fill(&mut self, buf: &mut [u8]) {
        let mut words = buf.chunks_exact_mut(4);
        for word in &mut words {
            word.copy_from_slice(&self.next_u32().to_le_bytes());
        }
        let tail = words.into_remainder();
        if !tail.is_empty() {
            let bytes = self.next_u32().to_le_bytes();
            tail.copy_from_slice(&bytes[..tail.len()]);
        }
    }
}
