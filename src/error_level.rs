use crate::QrError;

/// The error correction level in a QR Code symbol.
///
/// # Note
///
/// The variant ordering here (`L, M, Q, H`) is the one used throughout the
/// capacity and block-layout tables. The format-information bits use a
/// *different* fixed ordering (`M, L, H, Q`); see `format_bits()` below and
/// the note in `symbol.rs`. Both orderings are mandated by the standard and
/// must not be confused with one another.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub enum ErrorLevel {
    /// The QR Code can tolerate about  7% erroneous codewords.
    L,
    /// The QR Code can tolerate about 15% erroneous codewords.
    M,
    /// The QR Code can tolerate about 25% erroneous codewords.
    Q,
    /// The QR Code can tolerate about 30% erroneous codewords.
    H,
}

impl ErrorLevel {
    /// Returns an unsigned 2-bit integer (in the range 0 to 3), used to index
    /// the capacity and block-layout tables (`L,M,Q,H` order).
    pub fn ordinal(self) -> usize {
        use ErrorLevel::*;
        match self {
            L => 0,
            M => 1,
            Q => 2,
            H => 3,
        }
    }

    /// Returns the 2-bit field embedded in the format information codeword.
    /// This uses the standard's own `M,L,H,Q` ordering, not `ordinal()`'s.
    pub fn format_bits(self) -> u8 {
        use ErrorLevel::*;
        match self {
            M => 0,
            L => 1,
            H => 2,
            Q => 3,
        }
    }

    /// Parses the single-letter level name used by the public API
    /// (`"L"`, `"M"`, `"Q"`, `"H"`), case-insensitively.
    pub fn parse(s: &str) -> Result<Self, QrError> {
        match s {
            "L" | "l" => Ok(ErrorLevel::L),
            "M" | "m" => Ok(ErrorLevel::M),
            "Q" | "q" => Ok(ErrorLevel::Q),
            "H" | "h" => Ok(ErrorLevel::H),
            _ => Err(QrError::InvalidErrorLevel),
        }
    }
}

impl Default for ErrorLevel {
    fn default() -> Self {
        ErrorLevel::L
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_matches_capacity_table_order() {
        assert_eq!(ErrorLevel::L.ordinal(), 0);
        assert_eq!(ErrorLevel::M.ordinal(), 1);
        assert_eq!(ErrorLevel::Q.ordinal(), 2);
        assert_eq!(ErrorLevel::H.ordinal(), 3);
    }

    #[test]
    fn format_bits_uses_the_other_ordering() {
        assert_eq!(ErrorLevel::M.format_bits(), 0);
        assert_eq!(ErrorLevel::L.format_bits(), 1);
        assert_eq!(ErrorLevel::H.format_bits(), 2);
        assert_eq!(ErrorLevel::Q.format_bits(), 3);
    }

    #[test]
    fn parse_rejects_unknown_letters() {
        assert!(ErrorLevel::parse("X").is_err());
        assert_eq!(ErrorLevel::parse("h").unwrap(), ErrorLevel::H);
    }
}
