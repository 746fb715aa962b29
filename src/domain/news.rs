use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Entity, ImageKind, Patchable, Placement, Record};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// HTML-safe body text.
    pub content: String,
    pub image: String,
    /// Publication date shown to readers, independent of `created_at`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
    pub date: Option<NaiveDate>,
}

impl Record for NewsItem {
    const ENTITY: Entity = Entity::News;
    const IMAGE_KIND: ImageKind = ImageKind::News;
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

    fn on_create(&mut self, now: DateTime<Utc>) {
        if self.date.is_none() {
            self.date = Some(now.date_naive());
        }
    }

    /// Newest first. Undated items sink to the end.
    fn arrange(items: &mut [Self]) {
        items.sort_by(|a, b| b.date.cmp(&a.date));
    }
}

impl Patchable for NewsItem {
    type Patch = NewsPatch;

    fn apply_patch(&mut self, patch: NewsPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
    }

    fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = Some(at);
    }
}
