//! Open modes

use bitflags::bitflags;

bitflags! {
    /// How a scene session was opened, or which modes a backend supports
    ///
    /// A session is opened with exactly one mode. Combined masks describe
    /// backend capabilities and filter
    /// [`supported_extensions`](super::registry::supported_extensions).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct OpenMode: u8 {
        /// Read existing content, no mutation
        const READ = 1 << 0;
        /// Create or truncate, then write freely
        const WRITE = 1 << 1;
        /// Add to existing content without destroying it
        const APPEND = 1 << 2;
    }
}

impl OpenMode {
    /// Whether mutating calls are legal
    pub fn is_writable(self) -> bool {
        self.intersects(Self::WRITE | Self::APPEND)
    }

    /// Whether the session only allows reads
    pub fn is_read_only(self) -> bool {
        !self.is_writable()
    }

    /// Whether exactly one of READ, WRITE or APPEND is set
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writability() {
        assert!(OpenMode::READ.is_read_only());
        assert!(OpenMode::WRITE.is_writable());
        assert!(OpenMode::APPEND.is_writable());
    }

    #[test]
    fn test_single_mode() {
        assert!(OpenMode::READ.is_single());
        assert!(!(OpenMode::READ | OpenMode::WRITE).is_single());
        assert!(!OpenMode::empty().is_single());
    }
}
