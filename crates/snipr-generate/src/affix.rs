use std::collections::BTreeSet;

/// Decorate `base` with every number and special at prefix, suffix and
/// surround positions. The undecorated base is always included.
pub fn decorate(
    base: &str,
    numbers: &BTreeSet<String>,
    specials: &BTreeSet<char>,
) -> BTreeSet<String> {
    let mut out = BTreeSet::new();
    out.insert(base.to_string());

    for number in numbers {
        out.insert(format!("{number}{base}"));
        out.insert(format!("{base}{number}"));
        out.insert(format!("{number}{base}{number}"));
    }

    for special in specials {
        out.insert(format!("{special}{base}"));
        out.insert(format!("{base}{special}"));
        out.insert(format!("{special}{base}{special}"));
    }

    out
}

/// [`decorate`] plus, for every number/special pair, the four orders that keep
/// the special adjacent to the number: `s n base`, `n s base`, `base n s` and
/// `base s n`.
pub fn decorate_rich(
    base: &str,
    numbers: &BTreeSet<String>,
    specials: &BTreeSet<char>,
) -> BTreeSet<String> {
    let mut out = decorate(base, numbers, specials);

    for number in numbers {
        for special in specials {
            out.insert(format!("{special}{number}{base}"));
            out.insert(format!("{number}{special}{base}"));
            out.insert(format!("{base}{number}{special}"));
            out.insert(format!("{base}{special}{number}"));
        }
    }

    out
}

/// Affix tokens and fixed wrapping strings for one run.
#[derive(Debug, Clone, Default)]
pub struct Affixes {
    pub numbers: BTreeSet<String>,
    pub specials: BTreeSet<char>,
    pub rich: bool,
    pub prepend: String,
    pub append: String,
}

impl Affixes {
    pub fn decorate(&self, base: &str) -> BTreeSet<String> {
        if self.rich {
            decorate_rich(base, &self.numbers, &self.specials)
        } else {
            decorate(base, &self.numbers, &self.specials)
        }
    }

    /// Apply the configured prepend/append strings.
    pub fn wrap(&self, candidate: &str) -> String {
        if self.prepend.is_empty() && self.append.is_empty() {
            return candidate.to_string();
        }
        format!("{}{candidate}{}", self.prepend, self.append)
    }
}
