//! Image gallery module
//!
//! Everything between "a request arrived" and "this file was chosen":
//! directory resolution, candidate listing, random selection and the public
//! URL of the chosen file.

pub mod candidates;
pub mod picker;
pub mod redirect;
pub mod source;

// Re-export commonly used types
pub use candidates::{collect_candidates, Candidate, ExtensionFilter};
pub use picker::RandomPicker;
pub use redirect::build_redirect_url;
pub use source::{resolve_image_dir, source_param};
