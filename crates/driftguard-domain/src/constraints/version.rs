use super::Outcome;
use driftguard_types::Value;

/// Parse a dotted numeric version string, e.g. `"1.2.10"` -> `[1, 2, 10]`.
///
/// Returns `None` for anything that is not purely dotted decimal components;
/// suffixes like `-rc1` are out of scope for this comparison.
pub fn parse_dotted(s: &str) -> Option<Vec<u64>> {
    if s.is_empty() {
        return None;
    }
    s.split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

/// Component-wise >=, the shorter side padded with zeros so `"1.2"` compares
/// as `"1.2.0"`.
pub fn at_least(floor: &str, observed: &Value) -> Outcome {
    let text = match observed {
        Value::String(s) => s.clone(),
        // A bare number in the facts file (e.g. `version: 3`) still reads as
        // a version.
        other => match other.coerce_string() {
            Some(s) if parse_dotted(&s).is_some() => s,
            _ => {
                return Outcome::Incomparable {
                    reason: format!("observed {} is not a version string", other.kind()),
                };
            }
        },
    };

    let Some(observed_parts) = parse_dotted(&text) else {
        return Outcome::Incomparable {
            reason: format!("observed '{text}' does not parse as a dotted numeric version"),
        };
    };
    let Some(floor_parts) = parse_dotted(floor) else {
        // The loader validates the expected side; this guards direct API use.
        return Outcome::Incomparable {
            reason: format!("expected '{floor}' does not parse as a dotted numeric version"),
        };
    };

    let width = observed_parts.len().max(floor_parts.len());
    for i in 0..width {
        let o = observed_parts.get(i).copied().unwrap_or(0);
        let f = floor_parts.get(i).copied().unwrap_or(0);
        if o > f {
            return Outcome::Satisfied;
        }
        if o < f {
            return Outcome::Violated;
        }
    }
    Outcome::Satisfied
}
