// symbols.rs - Amino acid alphabet and missing-data classification

/// The 20 recognized amino acid residues
pub const AMINO_ACIDS: &[u8; 20] = b"ACDEFGHIKLMNPQRSTVWY";

/// One alignment character, classified against the amino acid alphabet.
///
/// Gaps and unrecognized characters (ambiguity codes, 'X', '?', ...) are kept
/// distinct at parse time but both count as missing data: they are excluded
/// from probability mass, never treated as an extra alphabet category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// One of the 20 amino acids, stored uppercase
    Residue(u8),
    /// Alignment gap ('-')
    Gap,
    /// Any character outside the recognized alphabet
    Other,
}

impl Symbol {
    /// Classify a raw alignment character
    pub fn from_char(c: char) -> Self {
        if c == '-' {
            return Symbol::Gap;
        }
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii() && AMINO_ACIDS.contains(&(upper as u8)) {
            Symbol::Residue(upper as u8)
        } else {
            Symbol::Other
        }
    }

    /// True for gaps and unrecognized characters
    pub fn is_missing(&self) -> bool {
        !matches!(self, Symbol::Residue(_))
    }

    /// Display character (for tests and diagnostics)
    pub fn as_char(&self) -> char {
        match self {
            Symbol::Residue(b) => *b as char,
            Symbol::Gap => '-',
            Symbol::Other => '?',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residue_classification() {
        assert_eq!(Symbol::from_char('A'), Symbol::Residue(b'A'));
        assert_eq!(Symbol::from_char('w'), Symbol::Residue(b'W'));
        assert!(!Symbol::from_char('K').is_missing());
    }

    #[test]
    fn test_gap_and_other_are_missing() {
        assert_eq!(Symbol::from_char('-'), Symbol::Gap);
        assert_eq!(Symbol::from_char('X'), Symbol::Other);
        assert_eq!(Symbol::from_char('B'), Symbol::Other);
        assert_eq!(Symbol::from_char('?'), Symbol::Other);
        assert!(Symbol::Gap.is_missing());
        assert!(Symbol::Other.is_missing());
    }
}
