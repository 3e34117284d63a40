use std::fmt;

use crate::error::Error;
use crate::registry::SortSpec;

/// Sort direction of a single ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }

    fn sign(&self) -> char {
        match self {
            SortDir::Asc => '+',
            SortDir::Desc => '-',
        }
    }
}

/// One `(field, direction)` pair parsed from a client-supplied
/// `+field` / `-field` string.
///
/// By construction the field is always a member of the entity's
/// [`SortSpec`]; a token never carries an unvalidated identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortToken {
    pub field: String,
    pub dir: SortDir,
}

impl fmt::Display for SortToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.dir.sign(), self.field)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_token(raw: &str, allowed: &SortSpec) -> Result<SortToken, Error> {
    let dir = match raw.chars().next() {
        Some('+') => SortDir::Asc,
        Some('-') => SortDir::Desc,
        _ => return Err(Error::MalformedToken(raw.to_string())),
    };
    let field = &raw[1..];
    if !is_identifier(field) {
        return Err(Error::MalformedToken(raw.to_string()));
    }
    if allowed.is_empty() {
        return Err(Error::UnsortableEntity(allowed.entity().to_string()));
    }
    if !allowed.contains(field) {
        return Err(Error::UnknownField(field.to_string()));
    }
    Ok(SortToken {
        field: field.to_string(),
        dir,
    })
}

/// Parse raw `+field` / `-field` tokens against an entity whitelist.
///
/// Input order is preserved so the generated SQL is deterministic. Any token
/// with an unexpected prefix, a non-identifier field, or a field outside the
/// whitelist is a hard validation failure; nothing is silently dropped or
/// defaulted. An empty input yields an empty list ("no explicit ordering").
pub fn parse_order_by(raw_tokens: &[String], allowed: &SortSpec) -> Result<Vec<SortToken>, Error> {
    raw_tokens
        .iter()
        .map(|raw| parse_token(raw, allowed))
        .collect()
}

/// Reject a token set that asks for the same field in both directions.
///
/// Duplicate tokens with the *same* direction are tolerated (de-duplicating
/// silently is safe). All conflicting field names are reported at once.
pub fn check_conflicts(tokens: &[SortToken]) -> Result<(), Error> {
    let mut conflicts: Vec<String> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        let clash = tokens[..i]
            .iter()
            .any(|prev| prev.field == token.field && prev.dir != token.dir);
        if clash && !conflicts.contains(&token.field) {
            conflicts.push(token.field.clone());
        }
    }
    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(Error::ConflictingFields(conflicts))
    }
}

/// Drop repeated tokens, keeping the first occurrence of each field.
///
/// Only meaningful after [`check_conflicts`]: at that point any duplicate
/// carries the same direction, so dropping it cannot change the ordering.
pub fn dedupe_tokens(tokens: Vec<SortToken>) -> Vec<SortToken> {
    let mut out: Vec<SortToken> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if !out.iter().any(|t| t.field == token.field) {
            out.push(token);
        }
    }
    out
}

/// The one entry point request handlers use: parse, check conflicts, dedupe.
pub fn validate_order_by(
    raw_tokens: &[String],
    allowed: &SortSpec,
) -> Result<Vec<SortToken>, Error> {
    let tokens = parse_order_by(raw_tokens, allowed)?;
    check_conflicts(&tokens)?;
    Ok(dedupe_tokens(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: SortSpec = SortSpec::new("user", &["name", "created_at", "last_updated_at"]);
    const LINK: SortSpec = SortSpec::new("link", &[]);

    fn raw(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn parses_signed_tokens_preserving_order() {
        let tokens = parse_order_by(&raw(&["+name", "-created_at"]), &USER).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].field, "name");
        assert_eq!(tokens[0].dir, SortDir::Asc);
        assert_eq!(tokens[1].field, "created_at");
        assert_eq!(tokens[1].dir, SortDir::Desc);
    }

    #[test]
    fn rejects_unknown_field() {
        let err = parse_order_by(&raw(&["+ssn"]), &USER).unwrap_err();
        assert_eq!(err, Error::UnknownField("ssn".into()));
    }

    #[test]
    fn rejects_missing_or_bogus_sign() {
        assert_eq!(
            parse_order_by(&raw(&["name"]), &USER).unwrap_err(),
            Error::MalformedToken("name".into())
        );
        assert_eq!(
            parse_order_by(&raw(&["~name"]), &USER).unwrap_err(),
            Error::MalformedToken("~name".into())
        );
        assert_eq!(
            parse_order_by(&raw(&["+"]), &USER).unwrap_err(),
            Error::MalformedToken("+".into())
        );
    }

    #[test]
    fn rejects_non_identifier_field() {
        assert_eq!(
            parse_order_by(&raw(&["+na me"]), &USER).unwrap_err(),
            Error::MalformedToken("+na me".into())
        );
        assert_eq!(
            parse_order_by(&raw(&["-1name"]), &USER).unwrap_err(),
            Error::MalformedToken("-1name".into())
        );
    }

    #[test]
    fn unsortable_entity_rejects_any_token() {
        let err = parse_order_by(&raw(&["+created_at"]), &LINK).unwrap_err();
        assert_eq!(err, Error::UnsortableEntity("link".into()));
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(parse_order_by(&[], &USER).unwrap().is_empty());
    }

    #[test]
    fn opposite_directions_conflict() {
        let tokens = parse_order_by(&raw(&["+name", "-name"]), &USER).unwrap();
        let err = check_conflicts(&tokens).unwrap_err();
        assert_eq!(err, Error::ConflictingFields(vec!["name".into()]));
    }

    #[test]
    fn all_conflicting_fields_are_reported() {
        let tokens = parse_order_by(
            &raw(&["+name", "-name", "+created_at", "-created_at"]),
            &USER,
        )
        .unwrap();
        let err = check_conflicts(&tokens).unwrap_err();
        assert_eq!(
            err,
            Error::ConflictingFields(vec!["name".into(), "created_at".into()])
        );
    }

    #[test]
    fn same_direction_duplicates_are_tolerated() {
        let tokens = validate_order_by(&raw(&["+name", "+name", "-created_at"]), &USER).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].field, "name");
        assert_eq!(tokens[1].field, "created_at");
    }

    #[test]
    fn validate_is_order_insensitive_on_set_equal_input() {
        let a = validate_order_by(&raw(&["+name", "-created_at"]), &USER).unwrap();
        let b = validate_order_by(&raw(&["+name", "-created_at"]), &USER).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn token_displays_in_signed_form() {
        let tokens = parse_order_by(&raw(&["-last_updated_at"]), &USER).unwrap();
        assert_eq!(tokens[0].to_string(), "-last_updated_at");
    }
}
