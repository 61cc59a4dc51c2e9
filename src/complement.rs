use crate::iupac_code::translate_iupac;

#[inline(always)]
fn letter_complement(c: char) -> char {
    match c {
        'A' => 'T',
        'T' => 'A',
        'C' => 'G',
        'G' => 'C',
        'a' => 't',
        't' => 'a',
        'c' => 'g',
        'g' => 'c',
        '[' => ']',
        ']' => '[',
        other => other,
    }
}

/// Reverse complement in 5'-3' orientation of the opposite strand.
///
/// Regex class delimiters are swapped so that a reversed class stays a
/// valid bracket expression: `[AG]` becomes `[CT]`. Class members are only
/// complemented and reversed along with everything else, never sorted.
pub fn complement(seq: &str) -> String {
    seq.chars().map(letter_complement).rev().collect()
}

/// Reverse complement of a sequence that may still contain ambiguity codes.
pub fn regex_complement(seq: &str) -> String {
    complement(&translate_iupac(seq))
}

/// A pattern that equals its own reverse complement.
pub fn is_palindromic(pattern: &str) -> bool {
    complement(pattern) == pattern
}
