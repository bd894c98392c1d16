use super::domain::{ColumnFormat, Gender, RawRow, REQUIRED_COLUMNS};

pub(crate) const GENDER_RULE: &str = "Gender must be MALE or FEMALE";

/// Outcome of validating a single raw roster row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowValidation {
    pub errors: Vec<String>,
}

impl RowValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate one uploaded row against the declared column rules.
///
/// Every violation lands in the returned list, each naming the offending
/// column, so a zone can correct the whole row in one pass. Problems never
/// escape as panics or out-of-band errors.
pub fn validate_row(row: &RawRow) -> RowValidation {
    let mut errors = Vec::new();

    for column in REQUIRED_COLUMNS {
        let value = row.get(column.name).map(|cell| cell.trim()).unwrap_or("");
        if value.is_empty() {
            errors.push(format!("{} is required", column.name));
            continue;
        }

        match column.format {
            ColumnFormat::Text => {}
            ColumnFormat::Gender => {
                if Gender::parse(value).is_none() {
                    errors.push(GENDER_RULE.to_string());
                }
            }
            ColumnFormat::Email => {
                if !is_valid_email(value) {
                    errors.push(format!("{} must be a valid email address", column.name));
                }
            }
            ColumnFormat::Phone => {
                if !is_valid_phone(value) {
                    errors.push(format!(
                        "{} must start with + and use only digits, spaces, hyphens, or parentheses",
                        column.name
                    ));
                }
            }
        }
    }

    RowValidation { errors }
}

/// Conservative `local@domain.tld` check. The upload side deliberately
/// avoids full RFC parsing; anything this rejects is corrected by the zone.
pub(crate) fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Phone numbers are stored as asserted: a leading `+` then digits with
/// optional spaces, hyphens, or parentheses.
pub(crate) fn is_valid_phone(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('+') else {
        return false;
    };

    rest.chars().any(|ch| ch.is_ascii_digit())
        && rest
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '-' | '(' | ')'))
}
