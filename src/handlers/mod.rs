mod url;

pub use url::{create_handler, delete_handler, redirect_handler};
