//! Request and response middleware.

pub(crate) mod locale;
pub(crate) mod security;
