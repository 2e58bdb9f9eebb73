//! `custom_debug` formatters that keep large buffers out of debug output

use std::fmt;

/// Elements shown before the remainder is summarised
const PREVIEW: usize = 3;

/// A collection that can show a prefix of itself
pub trait Preview {
    type Item: fmt::Debug;

    fn total(&self) -> usize;
    fn head(&self, n: usize) -> &[Self::Item];
}

impl<T: fmt::Debug> Preview for Vec<T> {
    type Item = T;

    fn total(&self) -> usize {
        self.len()
    }

    fn head(&self, n: usize) -> &[T] {
        &self[..n.min(self.len())]
    }
}

/// Print the first few elements and a count of the rest
pub fn trimmed_collection_fmt<T: Preview>(items: &T, f: &mut fmt::Formatter) -> fmt::Result {
    let head = items.head(PREVIEW);
    match items.total() - head.len() {
        0 => write!(f, "{head:?}"),
        rest => write!(f, "{head:?} + {rest} elements"),
    }
}

/// Print only the length of a byte blob
pub fn byte_len_fmt<T: AsRef<[u8]>>(bytes: &T, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "<{} bytes>", bytes.as_ref().len())
}
