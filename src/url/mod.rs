//! URL handling module for lj-chain
//!
//! This module provides the plain-rendering normalization applied before every
//! entry fetch, query parameter lookup, relative link resolution and the
//! username token used to name tabular exports.

mod normalize;

pub use normalize::{
    parse_seed_url, query_value, resolve_link, username_from_url, with_plain_rendering,
    PLAIN_RENDERING_KEY, PLAIN_RENDERING_VALUE,
};
