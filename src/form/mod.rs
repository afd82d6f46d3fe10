//! Form pieces around the image build: field validation, the git ref input, the
//! hidden image field, and the [`ImageBuilder`] session that ties them to a build.

pub mod builder;
pub mod image_field;
pub mod repository;
pub mod text_field;
pub mod validate;

pub use builder::{ImageBuilder, StartBuild};
pub use image_field::{ImageField, WAIT_FOR_BUILD};
pub use repository::{normalize_repository, REPOSITORY_FORMAT};
pub use text_field::TextField;
pub use validate::{validate_field, ValidateConfig};
