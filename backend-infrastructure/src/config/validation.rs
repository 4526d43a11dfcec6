use anyhow::{anyhow, Result};

/// The database name is interpolated into DDL, so it must be a bare identifier.
pub fn validate_database_name(value: &str) -> Result<()> {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return Err(anyhow!("database name is empty"));
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(anyhow!("database name must start with a letter or '_'"));
    }
    if !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Err(anyhow!("database name may only contain [A-Za-z0-9_]"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(validate_database_name("payboard").is_ok());
        assert!(validate_database_name("_pay_2026").is_ok());
    }

    #[test]
    fn rejects_injection_and_empty_names() {
        assert!(validate_database_name("").is_err());
        assert!(validate_database_name("1db").is_err());
        assert!(validate_database_name("db; DROP TABLE x").is_err());
        assert!(validate_database_name("db.name").is_err());
    }
}
