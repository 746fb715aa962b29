use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Entity, ImageKind, Placement, Record};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: String,
    pub title: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GalleryItem {
    pub fn new(title: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image: image.into(),
            ..Default::default()
        }
    }
}

impl Record for GalleryItem {
    const ENTITY: Entity = Entity::Gallery;
    const IMAGE_KIND: ImageKind = ImageKind::Gallery;
    const PLACEMENT: Placement = Placement::Prepend;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn image(&self) -> &str {
        &self.image
    }

    fn set_image(&mut self, image: String) {
        self.image = image;
    }

    fn set_created_at(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
    }
}
