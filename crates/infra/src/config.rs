//! Configuration loading and representation.

use checkout_cart::AddressRules;

/// Environment variable: maximum street lines accepted for raw addresses.
pub const STREET_LINES_VAR: &str = "CHECKOUT_STREET_LINES";
/// Environment variable: whether raw addresses must carry a postcode.
pub const POSTCODE_REQUIRED_VAR: &str = "CHECKOUT_POSTCODE_REQUIRED";
/// Environment variable: whether raw addresses must carry a telephone number.
pub const TELEPHONE_REQUIRED_VAR: &str = "CHECKOUT_TELEPHONE_REQUIRED";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutConfig {
    pub address_rules: AddressRules,
}

impl CheckoutConfig {
    /// Read configuration from the process environment.
    ///
    /// Unset variables use defaults; unparseable ones log a warning and use defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = AddressRules::default();

        let street_lines = match lookup(STREET_LINES_VAR) {
            None => defaults.street_lines,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        var = STREET_LINES_VAR,
                        value = %raw,
                        "invalid value; using default"
                    );
                    defaults.street_lines
                }
            },
        };

        Self {
            address_rules: AddressRules {
                street_lines,
                postcode_required: flag(&lookup, POSTCODE_REQUIRED_VAR, defaults.postcode_required),
                telephone_required: flag(
                    &lookup,
                    TELEPHONE_REQUIRED_VAR,
                    defaults.telephone_required,
                ),
            },
        }
    }
}

fn flag(lookup: &impl Fn(&str) -> Option<String>, var: &'static str, default: bool) -> bool {
    let Some(raw) = lookup(var) else {
        return default;
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(var, value = %raw, "invalid boolean; using default");
            default
        }
    }
}
