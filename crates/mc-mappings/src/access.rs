//! JVM access flags.

use bitflags::bitflags;

bitflags! {
    /// Access flags as stored in class files.
    ///
    /// Values arrive as decimal strings in the `modifiers` namespace. Unknown
    /// bits are retained so the raw value round-trips.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Access: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE = 0x0040;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
    }
}

impl Access {
    /// Parse a modifier value, `None` if it is not an integer.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u32>().ok().map(Self::from_bits_retain)
    }

    #[must_use]
    pub const fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    #[must_use]
    pub const fn is_synthetic(self) -> bool {
        self.contains(Self::SYNTHETIC)
    }

    #[must_use]
    pub const fn is_enum(self) -> bool {
        self.contains(Self::ENUM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let access = Access::parse("4114").unwrap();
        assert!(access.is_synthetic());
        assert!(access.is_private());
        assert!(!access.is_enum());
        assert_eq!(access.bits(), 4114);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Access::parse(""), None);
        assert_eq!(Access::parse("public"), None);
        assert_eq!(Access::parse("-1"), None);
    }
}
