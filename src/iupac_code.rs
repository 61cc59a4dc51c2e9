/// An IUPAC nucleotide code, eg b'R' for A or G
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct IupacCode(u8);

impl IupacCode {
    pub fn new(letter: u8) -> Self {
        Self(letter.to_ascii_uppercase())
    }

    /// The bracketed regex class for an ambiguity letter, `None` for
    /// plain bases and anything that is not an ambiguity code.
    #[inline(always)]
    pub fn regex_class(&self) -> Option<&'static str> {
        match self.0 {
            b'Y' => Some("[CT]"),
            b'R' => Some("[AG]"),
            b'S' => Some("[CG]"),
            b'W' => Some("[AT]"),
            b'K' => Some("[GT]"),
            b'M' => Some("[CA]"),
            b'B' => Some("[CGT]"),
            b'D' => Some("[AGT]"),
            b'H' => Some("[CAT]"),
            b'V' => Some("[CGA]"),
            b'N' => Some("[ACGT]"),
            _ => None,
        }
    }
}

/// Characters a tidied site pattern may contain.
#[inline(always)]
pub fn is_pattern_char(c: char) -> bool {
    matches!(
        c,
        'A' | 'C' | 'G' | 'T' | 'a' | 'c' | 'g' | 't' | '[' | ']'
    )
}

/// True if `line` holds nothing but A, C, G and T in either case.
/// An empty line is pure.
#[inline(always)]
pub fn is_nucleotide_line(line: &str) -> bool {
    line.bytes()
        .all(|b| matches!(b, b'A' | b'C' | b'G' | b'T' | b'a' | b'c' | b'g' | b't'))
}

/// Uppercases `seq` and replaces each ambiguity letter with its regex class.
pub fn translate_iupac(seq: &str) -> String {
    let upper = seq.to_uppercase();
    let mut ret = String::with_capacity(upper.len() * 2);
    for c in upper.chars() {
        let class = if c.is_ascii() {
            IupacCode::new(c as u8).regex_class()
        } else {
            None
        };
        match class {
            Some(class) => ret.push_str(class),
            None => ret.push(c),
        }
    }
    ret
}

/// Translates ambiguity codes, then drops everything a site pattern may not contain.
pub fn tidy_pattern(seq: &str) -> String {
    translate_iupac(seq)
        .chars()
        .filter(|c| is_pattern_char(*c))
        .collect()
}
