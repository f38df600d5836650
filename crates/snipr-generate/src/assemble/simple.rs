use std::collections::BTreeSet;

use snipr_core::{AttributeMap, sanitize_value};

use crate::affix::Affixes;
use crate::classify::{TokenSet, derived_birth_fields};
use crate::lexical::{capitalize, leetspeak};

/// Settings read by the simple strategy.
#[derive(Debug, Clone)]
pub struct SimpleParams<'a> {
    pub use_leet: bool,
    pub specials: &'a str,
    pub separators: &'a [String],
    pub combine_names: bool,
}

const NUMERIC_SUFFIX: &str = "123";

/// Suffix-based expansion of each word token plus first/last name joins.
///
/// Every word contributes its lower-case and capitalized forms (and its leet
/// form when alphabetic). Derived birth fields that are not themselves
/// attribute values are kept verbatim only. Each
/// form is emitted bare, with `123`, with each special, with the birth year,
/// and as its first three characters followed by `123`.
pub fn generate(
    map: &AttributeMap,
    tokens: &TokenSet,
    affixes: &Affixes,
    params: &SimpleParams<'_>,
) -> BTreeSet<String> {
    let derived = derived_birth_fields(map);
    let birth_year = first_clean(map, "birth_year");

    let direct: BTreeSet<String> = map
        .iter()
        .flat_map(|(_, value)| value.as_slice())
        .map(|value| sanitize_value(value))
        .collect();

    let mut forms = Vec::new();
    for word in &tokens.words {
        if derived.contains(word) {
            forms.push(word.clone());
            if !direct.contains(word) {
                continue;
            }
        }
        let lower = word.to_lowercase();
        forms.push(capitalize(word));
        if params.use_leet && word.chars().all(char::is_alphabetic) {
            forms.push(leetspeak(&lower));
        }
        forms.push(lower);
    }

    let mut candidates = BTreeSet::new();
    for form in &forms {
        candidates.insert(affixes.wrap(form));
        candidates.insert(affixes.wrap(&format!("{form}{NUMERIC_SUFFIX}")));
        for special in params.specials.chars() {
            candidates.insert(affixes.wrap(&format!("{form}{special}")));
        }
        if let Some(year) = &birth_year {
            candidates.insert(affixes.wrap(&format!("{form}{year}")));
        }
        if form.chars().count() > 3 {
            let head: String = form.chars().take(3).collect();
            candidates.insert(affixes.wrap(&format!("{head}{NUMERIC_SUFFIX}")));
        }
    }

    if params.combine_names
        && let (Some(first), Some(last)) = (first_clean(map, "first_name"), first_clean(map, "last_name"))
    {
        let separators: Vec<&str> = if params.separators.is_empty() {
            vec![""]
        } else {
            params.separators.iter().map(String::as_str).collect()
        };
        for separator in separators {
            for name in name_joins(&first, &last, separator) {
                candidates.insert(affixes.wrap(&name));
            }
        }
    }

    candidates
}

fn name_joins(first: &str, last: &str, separator: &str) -> [String; 5] {
    let first_lower = first.to_lowercase();
    let last_lower = last.to_lowercase();
    [
        format!("{first}{separator}{last}"),
        format!("{last}{separator}{first}"),
        format!("{first_lower}{separator}{last_lower}"),
        format!("{last_lower}{separator}{first_lower}"),
        format!("{}{separator}{}", capitalize(first), capitalize(last)),
    ]
}

fn first_clean(map: &AttributeMap, key: &str) -> Option<String> {
    map.first(key)
        .map(sanitize_value)
        .filter(|value| !value.is_empty())
}
