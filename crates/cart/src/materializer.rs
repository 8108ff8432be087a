//! Building cart addresses from raw input or stored customer addresses.

use thiserror::Error;

use checkout_core::{PostalAddress, Region};
use checkout_customers::CustomerAddress;

use crate::{AddressInput, AddressRules, CartAddress};

/// One structural problem with a submitted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub problem: &'static str,
}

impl core::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "\"{}\" {}", self.field, self.problem)
    }
}

/// Raw address fields failed structural validation.
///
/// Carries every violation found, in field order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid address fields: {}", join_violations(.violations))]
pub struct InvalidAddressFields {
    pub violations: Vec<FieldViolation>,
}

impl InvalidAddressFields {
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Produces cart-scoped addresses.
pub trait AddressMaterializer: Send + Sync {
    fn from_fields(&self, fields: &AddressInput) -> Result<CartAddress, InvalidAddressFields>;

    /// Copy a stored address; the result keeps no link to the customer record.
    fn from_customer_address(&self, customer_address: &CustomerAddress) -> CartAddress;
}

/// Default [`AddressMaterializer`] driven by [`AddressRules`].
#[derive(Debug, Clone, Default)]
pub struct CartAddressFactory {
    rules: AddressRules,
}

impl CartAddressFactory {
    pub fn new(rules: AddressRules) -> Self {
        Self { rules }
    }
}

impl AddressMaterializer for CartAddressFactory {
    fn from_fields(&self, fields: &AddressInput) -> Result<CartAddress, InvalidAddressFields> {
        let mut violations = Vec::new();

        let firstname = required(&mut violations, "firstname", fields.firstname.as_deref());
        let lastname = required(&mut violations, "lastname", fields.lastname.as_deref());

        let street: Vec<String> = fields
            .street
            .iter()
            .flatten()
            .filter_map(|line| clean(Some(line.as_str())))
            .collect();
        if street.is_empty() {
            violations.push(FieldViolation {
                field: "street",
                problem: "is required",
            });
        } else if street.len() > self.rules.street_lines {
            violations.push(FieldViolation {
                field: "street",
                problem: "has more lines than allowed",
            });
        }

        let city = required(&mut violations, "city", fields.city.as_deref());

        let postcode = if self.rules.postcode_required {
            required(&mut violations, "postcode", fields.postcode.as_deref()).map(Some)
        } else {
            Some(clean(fields.postcode.as_deref()))
        };

        let country_code = match clean(fields.country_code.as_deref()) {
            None => {
                violations.push(FieldViolation {
                    field: "country_code",
                    problem: "is required",
                });
                None
            }
            Some(code) if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                Some(code.to_ascii_uppercase())
            }
            Some(_) => {
                violations.push(FieldViolation {
                    field: "country_code",
                    problem: "must be a two-letter country code",
                });
                None
            }
        };

        let telephone = if self.rules.telephone_required {
            required(&mut violations, "telephone", fields.telephone.as_deref()).map(Some)
        } else {
            Some(clean(fields.telephone.as_deref()))
        };

        match (firstname, lastname, city, postcode, country_code, telephone) {
            (
                Some(firstname),
                Some(lastname),
                Some(city),
                Some(postcode),
                Some(country_code),
                Some(telephone),
            ) if violations.is_empty() => {
                Ok(CartAddress::new(PostalAddress {
                    firstname,
                    lastname,
                    company: clean(fields.company.as_deref()),
                    street,
                    city,
                    region: fields.region.as_ref().and_then(clean_region),
                    postcode,
                    country_code,
                    telephone,
                }))
            }
            _ => {
                tracing::debug!(count = violations.len(), "address fields rejected");
                Err(InvalidAddressFields { violations })
            }
        }
    }

    fn from_customer_address(&self, customer_address: &CustomerAddress) -> CartAddress {
        CartAddress::new(customer_address.address.clone())
    }
}

/// Trimmed value, or `None` when absent or blank.
fn clean(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

fn required(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: Option<&str>,
) -> Option<String> {
    let cleaned = clean(value);
    if cleaned.is_none() {
        violations.push(FieldViolation {
            field,
            problem: "is required",
        });
    }
    cleaned
}

fn clean_region(region: &Region) -> Option<Region> {
    let region = Region {
        code: clean(region.code.as_deref()),
        label: clean(region.label.as_deref()),
        id: region.id,
    };
    (!region.is_empty()).then_some(region)
}
