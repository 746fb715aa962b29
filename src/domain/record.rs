use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::Entity;

/// Which placeholder to use when a record has no image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Product,
    News,
    Gallery,
    General,
}

/// Where `add` places a new record in the stored collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    Prepend,
}

/// A record kept in one of the content collections.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    const ENTITY: Entity;
    const IMAGE_KIND: ImageKind;
    const PLACEMENT: Placement;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    fn image(&self) -> &str;
    fn set_image(&mut self, image: String);

    fn set_created_at(&mut self, at: DateTime<Utc>);

    /// Extra defaults applied when a record is created.
    fn on_create(&mut self, _now: DateTime<Utc>) {}

    /// Presentation order applied on every read. Storage order is untouched.
    fn arrange(_items: &mut [Self]) {}
}

/// Records that support partial updates.
pub trait Patchable: Record {
    type Patch;

    fn apply_patch(&mut self, patch: Self::Patch);
    fn set_updated_at(&mut self, at: DateTime<Utc>);
}
