//! System notice definitions
//!
//! The wire format is bare newline-terminated text, so the only structured
//! messages are the server-generated notices: a welcome line for the joiner
//! and join/disconnect announcements for everyone else. Each renders to a
//! single `\n`-terminated line.

use bytes::Bytes;

/// Server-generated notice lines
///
/// `others` is the membership count excluding the addressee, computed after
/// the join/leave that triggered the notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Sent to a client right after it joins
    Welcome { others: usize },
    /// Announced to existing members when a new client joins
    Joined { others: usize },
    /// Announced to remaining members when a client disconnects
    Left { others: usize },
}

impl Notice {
    /// Render the notice as a newline-terminated line ready for broadcast
    pub fn to_line(self) -> Bytes {
        let text = match self {
            Notice::Welcome { others } => {
                format!("Welcome. There are {} others currently here.\n", others)
            }
            Notice::Joined { others } => format!(
                "A user has connected to the server. There are now {} others here.\n",
                others
            ),
            Notice::Left { others } => format!(
                "A user has disconnected from the server. There are now {} others here.\n",
                others
            ),
        };
        Bytes::from(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_line() {
        let line = Notice::Welcome { others: 2 }.to_line();
        assert_eq!(&line[..], b"Welcome. There are 2 others currently here.\n");
    }

    #[test]
    fn test_joined_line() {
        let line = Notice::Joined { others: 1 }.to_line();
        assert_eq!(
            &line[..],
            b"A user has connected to the server. There are now 1 others here.\n"
        );
    }

    #[test]
    fn test_left_line_ends_with_delimiter() {
        let line = Notice::Left { others: 0 }.to_line();
        assert_eq!(line.last(), Some(&b'\n'));
        assert_eq!(
            &line[..],
            b"A user has disconnected from the server. There are now 0 others here.\n"
        );
    }
}
