use std::{ascii, fmt};

/// Displays raw bytes as printable ASCII, escaping everything else.
pub struct Escaped<'a>(&'a [u8]);

pub fn escape(bytes: &[u8]) -> Escaped<'_> {
    Escaped(bytes)
}

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .flat_map(|&byte| ascii::escape_default(byte))
            .try_for_each(|ch| write!(f, "{}", ch as char))
    }
}
