pub mod daft;
pub mod placeholder;
pub mod traits;
pub mod types;

pub use daft::DaftScraper;
pub use placeholder::PlaceholderSource;
pub use traits::ListingSource;
pub use types::ListingDetails;
