//! Personal-name detection.
//!
//! The classifier only needs a yes/no answer to "does this line contain a
//! person's name". [`NameDetector`] is the seam; [`CapitalizedNameDetector`]
//! is the built-in deterministic implementation. Closures implement the
//! trait too, which keeps tests pinned to a known answer.

/// Answers whether a line contains a personal name.
pub trait NameDetector: Send + Sync {
    fn contains_person_name(&self, text: &str) -> bool;
}

impl<F> NameDetector for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn contains_person_name(&self, text: &str) -> bool {
        self(text)
    }
}

/// Lowercase connectors allowed inside a name: `van`, `da`, `de`, ...
const PARTICLES: &[&str] = &[
    "van", "von", "da", "de", "del", "della", "der", "den", "di", "du", "la", "le", "ter", "ten",
    "dos", "das", "y",
];

/// Capitalized words that start sentences or label boilerplate, never names.
const STOPWORDS: &[&str] = &[
    "A", "An", "And", "At", "By", "For", "From", "In", "Of", "On", "The", "This", "That",
    "These", "Those", "To", "With", "Oil", "Canvas", "Panel", "Gift", "Purchase", "Acquired",
    "Collection", "Museum", "Gallery", "Born", "Died", "Untitled",
];

/// Word shapes that matter for finding names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// `Vincent`, `O'Keeffe`, `Davidsz.` or an initial like `J.M.W.`
    Name,
    /// `van`, `da`, ...
    Particle,
    Other,
}

fn classify(word: &str) -> Token {
    let word = word.trim_matches(|c: char| {
        matches!(
            c,
            ',' | ';' | ':' | '(' | ')' | '[' | ']' | '"' | '“' | '”' | '‘' | '’' | '!' | '?'
        )
    });

    if PARTICLES.contains(&word) {
        return Token::Particle;
    }
    if STOPWORDS.contains(&word) {
        return Token::Other;
    }
    if is_initials(word) || is_capitalized(word) {
        Token::Name
    } else {
        Token::Other
    }
}

/// `J.` or `J.M.W.`
fn is_initials(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    !chars.is_empty()
        && chars.len() % 2 == 0
        && chars
            .chunks(2)
            .all(|pair| pair[0].is_uppercase() && pair[1] == '.')
}

/// Uppercase first letter, at least one lowercase letter, letters and
/// name punctuation only.
fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_uppercase()
        && word.chars().any(char::is_lowercase)
        && chars.all(|c| c.is_alphabetic() || matches!(c, '\'' | '’' | '-' | '.'))
}

/// Finds runs of two or more capitalized words, optionally joined by name
/// particles (`Vincent van Gogh`, `J.M.W. Turner`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalizedNameDetector;

impl NameDetector for CapitalizedNameDetector {
    fn contains_person_name(&self, text: &str) -> bool {
        let mut names_in_run = 0;

        for word in text.split_whitespace() {
            match classify(word) {
                Token::Name => {
                    names_in_run += 1;
                    if names_in_run >= 2 {
                        return true;
                    }
                }
                // A particle only glues once a name word precedes it.
                Token::Particle if names_in_run > 0 => {}
                _ => names_in_run = 0,
            }
        }

        false
    }
}
