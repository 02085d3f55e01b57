use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Second-factor methods a server may allow for an MFA ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum MfaMethod {
    Password,
    Recovery,
    Totp,
}

/// Parse method names, skipping ones this client does not know.
pub fn parse_allowed_methods<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<MfaMethod> {
    let mut methods = Vec::new();
    for name in names {
        match name.trim().parse::<MfaMethod>() {
            Ok(method) if !methods.contains(&method) => methods.push(method),
            Ok(_) => {}
            Err(_) => {
                if !name.trim().is_empty() {
                    tracing::debug!(method = name, "Ignoring unknown MFA method");
                }
            }
        }
    }
    methods
}

/// Parse the comma-separated form (`"Totp,Recovery"`).
pub fn parse_allowed_methods_csv(csv: &str) -> Vec<MfaMethod> {
    parse_allowed_methods(csv.split(','))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_keeps_order_and_skips_unknown() {
        assert_eq!(
            parse_allowed_methods_csv("Totp, Webauthn,Recovery"),
            vec![MfaMethod::Totp, MfaMethod::Recovery]
        );
    }

    #[test]
    fn duplicates_and_blanks_are_dropped() {
        assert_eq!(
            parse_allowed_methods_csv("Recovery,,Recovery"),
            vec![MfaMethod::Recovery]
        );
        assert!(parse_allowed_methods_csv("").is_empty());
    }
}
