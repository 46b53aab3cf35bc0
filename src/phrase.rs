//! CS2-themed profile phrases in "uwu" style.
//!
//! Generation is split in two: [`generate_description`] picks clauses with
//! the caller's random source, and [`apply_style`] is the deterministic text
//! transform once the trailing token is known.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::PhraseError;

/// Opening clauses; one is picked per phrase.
pub const BASE_CLAUSES: &[&str] = &[
    "Ready to top frag in CS2",
    "Aiming for that ace every match",
    "Holding angles and hitting flicks",
    "Charging with my squad for the win",
    "Watching mid and locking it down",
    "Throwing nades like a pro",
    "Bunny hopping through mid",
    "Rushing B no stop",
    "Saving for the big green",
    "Practicing smokes every day",
    "Clutching one v five",
    "Sweating in ranked matches",
];

/// Closing clauses appended after a comma.
pub const EXTRA_CLAUSES: &[&str] = &[
    "lets go",
    "no fear",
    "time to shine",
    "glhf",
    "take the site",
    "watch this peek",
    "ez game",
    "gg wp",
];

/// Token appended to every styled phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trailer {
    Uwu,
    Owo,
}

impl Trailer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uwu => "uwu",
            Self::Owo => "owo",
        }
    }

    /// Fair coin flip between the two tokens.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::Uwu
        } else {
            Self::Owo
        }
    }
}

/// Build a random `"<base>, <extra>"` phrase and style it.
pub fn generate_description<R: Rng + ?Sized>(rng: &mut R) -> Result<String, PhraseError> {
    generate_from(BASE_CLAUSES, EXTRA_CLAUSES, rng)
}

/// Same as [`generate_description`] with caller-supplied clause lists.
pub fn generate_from<R: Rng + ?Sized>(
    base: &[&str],
    extras: &[&str],
    rng: &mut R,
) -> Result<String, PhraseError> {
    let base = base
        .choose(rng)
        .ok_or(PhraseError::EmptyClauseList("base"))?;
    let extra = extras
        .choose(rng)
        .ok_or(PhraseError::EmptyClauseList("extra"))?;
    Ok(style_transform(&format!("{base}, {extra}"), rng))
}

/// Style `text` with a randomly drawn trailing token.
pub fn style_transform<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    apply_style(text, Trailer::random(rng))
}

/// Deterministic part of the transform.
///
/// `r`/`l` become `w` (`R`/`L` become `W`), an `n` or `N` directly before a
/// vowel becomes `ny` (`No` -> `nyo`), then `" <trailer>"` is appended.
pub fn apply_style(text: &str, trailer: Trailer) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4 + 4);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let c = match c {
            'r' | 'l' => 'w',
            'R' | 'L' => 'W',
            other => other,
        };
        if matches!(c, 'n' | 'N') && chars.peek().copied().is_some_and(is_vowel) {
            out.push_str("ny");
        } else {
            out.push(c);
        }
    }
    out.push(' ');
    out.push_str(trailer.as_str());
    out
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rushing_b_scenario() {
        assert_eq!(
            apply_style("Rushing B no stop", Trailer::Uwu),
            "Wushing B nyo stop uwu"
        );
        assert_eq!(
            apply_style("Rushing B no stop", Trailer::Owo),
            "Wushing B nyo stop owo"
        );
    }

    #[test]
    fn n_before_vowel_becomes_lowercase_ny() {
        assert_eq!(apply_style("NA nt nE Nt", Trailer::Owo), "nyA nt nyE Nt owo");
        assert_eq!(apply_style("No Nap", Trailer::Uwu), "nyo nyap uwu");
        assert_eq!(apply_style("banana", Trailer::Uwu), "banyanya uwu");
        assert_eq!(apply_style("inn", Trailer::Uwu), "inn uwu");
    }

    #[test]
    fn empty_text_still_gets_trailer() {
        assert_eq!(apply_style("", Trailer::Uwu), " uwu");
    }

    #[test]
    fn styled_clauses_never_contain_r_or_l() {
        for base in BASE_CLAUSES {
            for extra in EXTRA_CLAUSES {
                for trailer in [Trailer::Uwu, Trailer::Owo] {
                    let styled = apply_style(&format!("{base}, {extra}"), trailer);
                    assert!(
                        !styled.contains(['r', 'l', 'R', 'L']),
                        "unexpected consonant in {styled:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn generated_description_ends_with_trailer() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let description = generate_description(&mut rng).expect("description");
            assert!(
                description.ends_with(" uwu") || description.ends_with(" owo"),
                "got {description:?}"
            );
            assert!(description.contains(", "));
        }
    }

    #[test]
    fn same_seed_gives_identical_output() {
        let first = generate_description(&mut StdRng::seed_from_u64(42)).expect("first");
        let second = generate_description(&mut StdRng::seed_from_u64(42)).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn every_clause_can_be_selected() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            let description = generate_description(&mut rng).expect("description");
            seen.insert(description.split(", ").next().map(str::to_string));
        }
        assert_eq!(seen.len(), BASE_CLAUSES.len());
    }

    #[test]
    fn empty_clause_lists_fail_loudly() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate_from(&[], EXTRA_CLAUSES, &mut rng),
            Err(PhraseError::EmptyClauseList("base"))
        );
        assert_eq!(
            generate_from(BASE_CLAUSES, &[], &mut rng),
            Err(PhraseError::EmptyClauseList("extra"))
        );
    }

    #[cfg(feature = "fuzz-tests")]
    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn apply_style_removes_r_and_l(
                text in proptest::string::string_regex("[ -~]{0,48}").expect("regex")
            ) {
                let styled = apply_style(&text, Trailer::Owo);
                let body = styled.strip_suffix(" owo").expect("trailer");
                prop_assert!(!body.contains(['r', 'l', 'R', 'L']));
                prop_assert!(body.chars().count() >= text.chars().count());
            }
        }
    }
}
