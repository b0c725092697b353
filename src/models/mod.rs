mod url;

pub use url::{CreateUrlDto, UrlResponseDto};
