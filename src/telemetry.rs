//! Random telemetry payload generation.

use rand::Rng;

use crate::wire::LogEntry;

/// The 52-letter sampling alphabet, `A-Z` followed by `a-z`.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Produce a string of exactly `len` characters drawn independently and
/// uniformly, with replacement, from the ASCII letters `[A-Za-z]`.
///
/// `len = 0` yields the empty string. There are no error conditions; the
/// only side effect is consuming entropy from the thread-local generator.
///
/// # Examples
///
/// ```
/// use devicelog::telemetry::random_letters;
///
/// let payload = random_letters(10);
/// assert_eq!(payload.len(), 10);
/// assert!(payload.chars().all(|c| c.is_ascii_alphabetic()));
/// assert_eq!(random_letters(0), "");
/// ```
#[must_use]
pub fn random_letters(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

impl LogEntry {
    /// Construct a fresh entry carrying `len` random ASCII letters.
    #[must_use]
    pub fn random(len: usize) -> Self {
        Self {
            log_data: random_letters(len),
        }
    }
}
