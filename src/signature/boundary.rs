//! Type/identifier boundary detection
//!
//! Declaration text scraped from a page sometimes loses the space between a
//! parameter's type and its name (`Vector3position`). Each `Boundary`
//! variant is one independent detector; `find_boundary` runs them in
//! priority order and the first hit wins. Detectors scan right to left and
//! return the char index at which a space should be inserted.

/// Characters marking a pointer, reference or handle type
const SIGILS: [char; 3] = ['*', '&', '^'];

/// One boundary detection rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Right after the last `*`, `&` or `^` that is not the final character
    AfterSigil,

    /// Right after a `>` that is directly followed by a lowercase letter
    AfterGenericClose,

    /// Right after a digit that is directly followed by a lowercase letter
    AfterDigit,

    /// Right before an uppercase letter sitting between two lowercase letters
    CamelCase,
}

impl Boundary {
    /// Detectors in priority order
    pub const PRIORITY: [Boundary; 4] = [
        Boundary::AfterSigil,
        Boundary::AfterGenericClose,
        Boundary::AfterDigit,
        Boundary::CamelCase,
    ];

    /// Returns the split index for this rule, if it applies
    pub fn locate(self, chars: &[char]) -> Option<usize> {
        match self {
            Self::AfterSigil => after_sigil(chars),
            Self::AfterGenericClose => after_generic_close(chars),
            Self::AfterDigit => after_digit(chars),
            Self::CamelCase => camel_case(chars),
        }
    }
}

/// Runs every detector in priority order and returns the first hit
pub fn find_boundary(chars: &[char]) -> Option<(Boundary, usize)> {
    Boundary::PRIORITY
        .iter()
        .find_map(|rule| rule.locate(chars).map(|index| (*rule, index)))
}

fn after_sigil(chars: &[char]) -> Option<usize> {
    let last = chars.len().checked_sub(1)?;
    (0..last)
        .rev()
        .find(|&i| SIGILS.contains(&chars[i]))
        .map(|i| i + 1)
}

fn after_generic_close(chars: &[char]) -> Option<usize> {
    chars
        .windows(2)
        .rposition(|pair| pair[0] == '>' && pair[1].is_lowercase())
        .map(|i| i + 1)
}

fn after_digit(chars: &[char]) -> Option<usize> {
    chars
        .windows(2)
        .rposition(|pair| pair[0].is_ascii_digit() && pair[1].is_lowercase())
        .map(|i| i + 1)
}

// The first uppercase letter starts the type name and is never a candidate.
fn camel_case(chars: &[char]) -> Option<usize> {
    let uppercase: Vec<usize> = chars
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_uppercase())
        .map(|(i, _)| i)
        .collect();

    uppercase.iter().skip(1).rev().copied().find(|&pos| {
        pos > 0
            && pos + 1 < chars.len()
            && chars[pos - 1].is_lowercase()
            && chars[pos + 1].is_lowercase()
    })
}
