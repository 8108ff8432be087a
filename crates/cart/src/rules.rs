use serde::{Deserialize, Serialize};

/// Structural rules applied when building a cart address from raw fields.
///
/// Field *formats* (postcode patterns, phone numbers) are not checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRules {
    /// Maximum number of street lines accepted.
    pub street_lines: usize,
    pub postcode_required: bool,
    pub telephone_required: bool,
}

impl AddressRules {
    pub const DEFAULT_STREET_LINES: usize = 2;
}

impl Default for AddressRules {
    fn default() -> Self {
        Self {
            street_lines: Self::DEFAULT_STREET_LINES,
            postcode_required: true,
            telephone_required: true,
        }
    }
}
