/*
Translation of relationship descriptors into edge weights. This is a pure
lookup/parse step; the graph and the traversal only ever see the resulting
non-negative integer weight.
*/

use crate::error::Error;

/// Weight for a relationship descriptor.
///
/// `self` is 0, `parent` and `sibling` are 1, `grandparent` is 2.
/// `"N cousin"` is `2N + 1`: N generations up to the shared ancestor's
/// child and N back down, plus one step across. `"N cousin M removed"`
/// adds the M generations of removal on top.
///
/// Anything outside that vocabulary is an error; weights are never
/// negative by construction.
pub fn relation_weight(relation: &str) -> Result<u64, Error> {
    let tokens: Vec<&str> = relation.split_whitespace().collect();
    match tokens.as_slice() {
        ["self"] => Ok(0),
        ["parent"] | ["sibling"] => Ok(1),
        ["grandparent"] => Ok(2),
        [n, "cousin"] => {
            let degree = parse_count(relation, n)?;
            cousin_base(relation, n, degree)
        }
        [n, "cousin", m, "removed"] => {
            let degree = parse_count(relation, n)?;
            let removed = parse_count(relation, m)?;
            let base = cousin_base(relation, n, degree)?;
            base.checked_add(removed)
                .ok_or_else(|| bad_count(relation, m))
        }
        _ => Err(Error::UnknownRelation(relation.to_string())),
    }
}

// 2N + 1, bounds-checked: a degree that fits u64 can still overflow the
// weight formula, and a wrapped weight would silently reorder paths.
fn cousin_base(relation: &str, token: &str, degree: u64) -> Result<u64, Error> {
    degree
        .checked_mul(2)
        .and_then(|w| w.checked_add(1))
        .ok_or_else(|| bad_count(relation, token))
}

fn parse_count(relation: &str, token: &str) -> Result<u64, Error> {
    token.parse().map_err(|_| bad_count(relation, token))
}

fn bad_count(relation: &str, token: &str) -> Error {
    Error::BadDegree {
        relation: relation.to_string(),
        token: token.to_string(),
    }
}
