use crate::domain::{SieveError, SieveResult, SieveSpec};

/// Parses a comma-separated list of retained weights (grams) against the
/// configured sieve spec. Pure: no partial result escapes on failure.
pub fn parse_weights(source: &str, spec: &SieveSpec) -> SieveResult<Vec<f64>> {
    let mut weights = Vec::with_capacity(spec.expected_count());

    for (index, raw_token) in source.split(',').enumerate() {
        let token = raw_token.trim();
        let value = parse_weight_token(token).ok_or_else(|| SieveError::Parse {
            token: token.to_string(),
            position: index + 1,
        })?;
        weights.push(value);
    }

    if weights.len() != spec.expected_count() {
        return Err(SieveError::CountMismatch {
            expected: spec.expected_count(),
            actual: weights.len(),
        });
    }

    Ok(weights)
}

fn parse_weight_token(token: &str) -> Option<f64> {
    if token.is_empty() {
        return None;
    }

    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::parse_weights;
    use crate::domain::{SieveError, SieveSpec};

    #[test]
    fn parses_trimmed_comma_separated_weights() {
        let spec = SieveSpec::standard();
        let weights =
            parse_weights(" 0, 50 ,100,150,  150,100, 50 ,0 ", &spec).expect("input should parse");
        assert_eq!(weights, vec![0.0, 50.0, 100.0, 150.0, 150.0, 100.0, 50.0, 0.0]);
    }

    #[test]
    fn rejects_non_numeric_token_with_position() {
        let spec = SieveSpec::standard();
        let error = parse_weights("0,50,abc,150,150,100,50,0", &spec)
            .expect_err("non-numeric token should fail");
        assert_eq!(
            error,
            SieveError::Parse {
                token: "abc".to_string(),
                position: 3,
            }
        );
    }

    #[test]
    fn rejects_negative_and_non_finite_tokens() {
        let spec = SieveSpec::standard();

        let error = parse_weights("0,50,-1,150,150,100,50,0", &spec)
            .expect_err("negative weight should fail");
        assert!(matches!(error, SieveError::Parse { position: 3, .. }));

        let error = parse_weights("0,50,NaN,150,150,100,50,0", &spec)
            .expect_err("NaN weight should fail");
        assert!(matches!(error, SieveError::Parse { position: 3, .. }));

        let error = parse_weights("inf,50,100,150,150,100,50,0", &spec)
            .expect_err("infinite weight should fail");
        assert!(matches!(error, SieveError::Parse { position: 1, .. }));
    }

    #[test]
    fn rejects_wrong_count_naming_expected_total() {
        let spec = SieveSpec::standard();
        let error = parse_weights("0,50,100,150,150,100,50", &spec)
            .expect_err("seven weights against eight sieves should fail");
        assert_eq!(
            error,
            SieveError::CountMismatch {
                expected: 8,
                actual: 7,
            }
        );
        assert!(error.to_string().contains("exactly 8"));
    }

    #[test]
    fn rejects_empty_input_and_empty_tokens() {
        let spec = SieveSpec::standard();

        let error = parse_weights("", &spec).expect_err("empty input should fail");
        assert!(matches!(error, SieveError::Parse { position: 1, .. }));

        let error = parse_weights("0,50,,150,150,100,50,0", &spec)
            .expect_err("empty token should fail");
        assert!(matches!(error, SieveError::Parse { position: 3, .. }));
    }

    #[test]
    fn accepts_scientific_notation_weights() {
        let spec = SieveSpec::standard();
        let weights = parse_weights("0,5e1,1.0e2,150,150,100,50,0", &spec)
            .expect("scientific notation should parse");
        assert_eq!(weights[1], 50.0);
        assert_eq!(weights[2], 100.0);
    }
}
