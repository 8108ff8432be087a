//! Customer records consumed by checkout (accounts and address books).
//!
//! Storage is an external collaborator; this crate defines the records, the
//! repository seam, and the ownership-enforcing address lookup.

pub mod account;
pub mod address;
pub mod lookup;

pub use account::CustomerAccount;
pub use address::CustomerAddress;
pub use lookup::{
    AddressLookupError, CustomerAddressLookup, CustomerAddressRepository, RepositoryAddressLookup,
};
