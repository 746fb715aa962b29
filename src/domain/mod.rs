pub mod entity;
pub mod gallery;
pub mod news;
pub mod product;
pub mod record;
pub mod settings;

pub use entity::Entity;
pub use gallery::GalleryItem;
pub use news::{NewsItem, NewsPatch};
pub use product::{Product, ProductPatch};
pub use record::{ImageKind, Patchable, Placement, Record};
pub use settings::{OpeningHours, Settings};
