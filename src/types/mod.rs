pub mod error;
pub mod facet_cut;
pub mod interfaces;
pub mod provider;
pub mod swap_request;
pub mod token_with_fee;
