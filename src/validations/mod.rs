mod url;

pub use url::{validate_alias, validate_url};
