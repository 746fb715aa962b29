use std::marker::PhantomData;

use crate::app::Result;
use crate::content::{ContentStore, FetchOptions, SaveOutcome};
use crate::domain::{Patchable, Placement, Record};
use crate::transport::Method;

/// Typed access to one record collection (products, news or gallery).
///
/// Every mutation reads the whole collection, changes it and writes the
/// whole collection back, holding the entity's write lock throughout.
pub struct Collection<'a, T> {
    store: &'a ContentStore,
    _record: PhantomData<T>,
}

impl<'a, T: Record> Collection<'a, T> {
    pub(crate) fn new(store: &'a ContentStore) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// All records in presentation order, images resolved.
    pub async fn get_all(&self) -> Result<Vec<T>> {
        let mut items = self.load().await?;
        for item in &mut items {
            self.resolve_image(item);
        }
        T::arrange(&mut items);
        Ok(items)
    }

    /// Replace the stored collection. Resolved image URLs are turned back
    /// into their stored form first.
    pub async fn save_all(&self, items: &[T]) -> Result<SaveOutcome> {
        let _guard = self.store.lock(T::ENTITY).await;
        let items: Vec<T> = items
            .iter()
            .cloned()
            .map(|mut item| {
                self.unresolve_image(&mut item);
                item
            })
            .collect();
        self.write(&items).await
    }

    /// Create a record. Returns it with its new id, or `None` if the write failed.
    pub async fn add(&self, mut item: T) -> Result<Option<T>> {
        let _guard = self.store.lock(T::ENTITY).await;
        let mut items = self.load().await?;

        let now = self.store.now();
        item.set_id(self.store.next_id(T::ENTITY));
        item.set_created_at(now);
        item.on_create(now);
        self.unresolve_image(&mut item);

        match T::PLACEMENT {
            Placement::Append => items.push(item.clone()),
            Placement::Prepend => items.insert(0, item.clone()),
        }

        let outcome = self.write(&items).await?;
        if !outcome.is_success() {
            tracing::warn!("Adding to {} failed: {:?}", T::ENTITY, outcome.error());
            return Ok(None);
        }
        self.resolve_image(&mut item);
        Ok(Some(item))
    }

    /// Remove the record with `id`. Unknown ids still rewrite the collection
    /// and report success.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.store.lock(T::ENTITY).await;
        let mut items = self.load().await?;

        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            tracing::debug!("{} has no record {}", T::ENTITY, id);
        }

        Ok(self.write(&items).await?.is_success())
    }

    /// Records as stored: stored order, image paths untouched.
    async fn load(&self) -> Result<Vec<T>> {
        let data = self
            .store
            .fetch(T::ENTITY.endpoint(), FetchOptions::get())
            .await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn write(&self, items: &[T]) -> Result<SaveOutcome> {
        let body = serde_json::to_value(items)?;
        Ok(self
            .store
            .save(T::ENTITY.endpoint(), &body, Method::Put)
            .await)
    }

    fn resolve_image(&self, item: &mut T) {
        let resolved = self
            .store
            .images()
            .resolve(Some(item.image()), T::IMAGE_KIND);
        item.set_image(resolved);
    }

    fn unresolve_image(&self, item: &mut T) {
        let stored = self.store.images().unresolve(item.image(), T::IMAGE_KIND);
        item.set_image(stored);
    }
}

impl<'a, T: Patchable> Collection<'a, T> {
    /// Merge `patch` into the record with `id` and stamp `updated_at`.
    ///
    /// Returns `None` when the id is unknown (nothing is written) or the
    /// write failed.
    pub async fn update(&self, id: &str, patch: T::Patch) -> Result<Option<T>> {
        let _guard = self.store.lock(T::ENTITY).await;
        let mut items = self.load().await?;

        let Some(existing) = items.iter_mut().find(|item| item.id() == id) else {
            tracing::debug!("{} has no record {}", T::ENTITY, id);
            return Ok(None);
        };

        existing.apply_patch(patch);
        existing.set_updated_at(self.store.now());
        self.unresolve_image(existing);
        let mut updated = existing.clone();

        let outcome = self.write(&items).await?;
        if !outcome.is_success() {
            return Ok(None);
        }
        self.resolve_image(&mut updated);
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tokio_test::{assert_err, assert_ok};

    use crate::cache::CacheStore;
    use crate::clock::Clock;
    use crate::config::StoreConfig;
    use crate::content::images::{GALLERY_PLACEHOLDER, PRODUCT_PLACEHOLDER};
    use crate::content::tests::{harness, harness_with, Harness};
    use crate::domain::{GalleryItem, NewsItem, NewsPatch, Product, ProductPatch};
    use crate::transport::testing::FakeTransport;

    fn local() -> StoreConfig {
        StoreConfig::default()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn stored(cache: &CacheStore, key: &str) -> Value {
        cache.get::<Value>(key).unwrap()
    }

    fn empty_news() -> Harness {
        harness_with(local(), FakeTransport::new().with_resource("novinky.json", json!([])))
    }

    #[tokio::test]
    async fn test_get_all_resolves_images() {
        let h = harness(FakeTransport::new().with_resource(
            "produkty.json",
            json!([
                {"id": "prod_1", "name": "Medovník", "image": "assets/images/produkty/medovnik.jpg"},
                {"id": "prod_2", "name": "Veterník", "image": ""},
                {"id": "prod_3", "name": "Krémeš", "image": "https://cdn.example.com/kremes.jpg"}
            ]),
        ));

        let products = assert_ok!(h.store.products().get_all().await);
        assert_eq!(
            products[0].image,
            "https://cukrarenjanka.sk/assets/images/produkty/medovnik.jpg"
        );
        assert_eq!(products[1].image, PRODUCT_PLACEHOLDER);
        assert_eq!(products[2].image, "https://cdn.example.com/kremes.jpg");
    }

    #[tokio::test]
    async fn test_second_read_served_from_cache() {
        let h = harness_with(
            local(),
            FakeTransport::new().with_resource("galerie.json", json!([{"id": "gal_1"}])),
        );

        let first = assert_ok!(h.store.gallery().get_all().await);
        let second = assert_ok!(h.store.gallery().get_all().await);
        assert_eq!(first, second);
        assert_eq!(h.transport.reads(), 1);
    }

    #[tokio::test]
    async fn test_save_all_round_trip_preserves_order() {
        let h = harness_with(
            local(),
            FakeTransport::new().with_resource(
                "produkty.json",
                json!([
                    {"id": "prod_2", "name": "B", "image": "b.jpg", "vegan": true},
                    {"id": "prod_1", "name": "A", "image": "a.jpg"}
                ]),
            ),
        );
        let before = assert_ok!(h.store.products().get_all().await);

        let outcome = assert_ok!(h.store.products().save_all(&before).await);
        assert!(outcome.is_success());

        let after = assert_ok!(h.store.products().get_all().await);
        assert_eq!(before, after);
        assert_eq!(
            h.transport.resource("produkty.json").unwrap()[0]["vegan"],
            json!(true)
        );
    }

    #[tokio::test]
    async fn test_remote_round_trip_keeps_stored_image_paths() {
        let h = harness(FakeTransport::new().with_resource(
            "produkty.json",
            json!([
                {"id": "prod_1", "name": "Medovník", "image": "assets/images/produkty/medovnik.jpg"},
                {"id": "prod_2", "name": "Veterník", "image": ""},
                {"id": "prod_3", "name": "Krémeš", "image": "https://cdn.example.com/kremes.jpg"}
            ]),
        ));
        let before = assert_ok!(h.store.products().get_all().await);

        assert!(assert_ok!(h.store.products().save_all(&before).await).is_success());

        let images: Vec<_> = h
            .transport
            .resource("produkty.json")
            .unwrap()
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["image"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            images,
            vec![
                "assets/images/produkty/medovnik.jpg",
                "",
                "https://cdn.example.com/kremes.jpg"
            ]
        );

        h.store.clear_cache(None).unwrap();
        let after = assert_ok!(h.store.products().get_all().await);
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_remote_add_leaves_other_records_untouched() {
        let h = harness(FakeTransport::new().with_resource(
            "galerie.json",
            json!([{"id": "gal_1", "title": "Torta", "image": "assets/images/galeria/1.jpg"}]),
        ));

        let created = assert_ok!(
            h.store
                .gallery()
                .add(GalleryItem::new("Koláče", "assets/images/galeria/2.jpg"))
                .await
        )
        .unwrap();
        assert_eq!(created.image, "https://cukrarenjanka.sk/assets/images/galeria/2.jpg");

        let stored = h.transport.resource("galerie.json").unwrap();
        assert_eq!(stored[0]["image"], "assets/images/galeria/2.jpg");
        assert_eq!(stored[1]["image"], "assets/images/galeria/1.jpg");
    }

    #[tokio::test]
    async fn test_add_news_to_empty_list() {
        let h = empty_news();

        let created = assert_ok!(h.store.news().add(NewsItem::new("X")).await).unwrap();
        assert!(created.id.starts_with("news_"));
        assert_eq!(created.date, Some(date("2024-06-15")));
        assert_eq!(created.created_at, Some(h.clock.now()));
        assert_eq!(created.image, GALLERY_PLACEHOLDER);

        let news = assert_ok!(h.store.news().get_all().await);
        assert_eq!(news, vec![created]);
    }

    #[tokio::test]
    async fn test_add_news_prepends_in_storage() {
        let h = empty_news();
        let news = h.store.news();

        for (title, d) in [("a", "2024-01-01"), ("c", "2024-03-01"), ("b", "2024-02-01")] {
            let mut item = NewsItem::new(title);
            item.date = Some(date(d));
            assert!(assert_ok!(news.add(item).await).is_some());
        }

        let raw = h.transport.resource("novinky.json").unwrap();
        let stored_titles: Vec<_> = raw
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["title"].as_str().unwrap())
            .collect();
        assert_eq!(stored_titles, vec!["b", "c", "a"]);

        let shown: Vec<_> = assert_ok!(news.get_all().await)
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(shown, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_news_sorted_on_read_but_not_in_storage() {
        let h = empty_news();
        let items: Vec<NewsItem> = [("a", "2024-01-01"), ("c", "2024-03-01"), ("b", "2024-02-01")]
            .into_iter()
            .map(|(title, d)| NewsItem {
                id: format!("news_{}", title),
                date: Some(date(d)),
                ..NewsItem::new(title)
            })
            .collect();

        assert!(assert_ok!(h.store.news().save_all(&items).await).is_success());

        let dates: Vec<_> = assert_ok!(h.store.news().get_all().await)
            .into_iter()
            .map(|n| n.date.unwrap().to_string())
            .collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-01"]);

        let raw_ids: Vec<_> = stored(&h.cache, "novinky")
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(raw_ids, vec!["news_a", "news_c", "news_b"]);
    }

    #[tokio::test]
    async fn test_add_product_appends() {
        let h = harness_with(
            local(),
            FakeTransport::new().with_resource("produkty.json", json!([{"id": "prod_1"}])),
        );

        let created = assert_ok!(h.store.products().add(Product::new("Laskonka", "1,20 €")).await)
            .unwrap();
        let products = assert_ok!(h.store.products().get_all().await);

        assert_eq!(products.len(), 2);
        assert_eq!(products[1].id, created.id);
        assert!(created.id.starts_with("prod_"));
    }

    #[tokio::test]
    async fn test_add_gallery_prepends() {
        let h = harness_with(
            local(),
            FakeTransport::new().with_resource("galerie.json", json!([{"id": "gal_1"}])),
        );

        let created = assert_ok!(
            h.store
                .gallery()
                .add(GalleryItem::new("Svadobná torta", "assets/images/galeria/torta.jpg"))
                .await
        )
        .unwrap();

        let gallery = assert_ok!(h.store.gallery().get_all().await);
        assert_eq!(gallery[0].id, created.id);
        assert_eq!(gallery[1].id, "gal_1");
    }

    #[tokio::test]
    async fn test_add_failed_write_returns_none() {
        let h = empty_news();
        h.transport.fail_writes(true);

        let created = assert_ok!(h.store.news().add(NewsItem::new("X")).await);
        assert!(created.is_none());
        assert_eq!(h.transport.resource("novinky.json"), Some(json!([])));
    }

    #[tokio::test]
    async fn test_add_when_collection_unreadable_is_error() {
        let h = harness_with(local(), FakeTransport::new());
        assert_err!(h.store.gallery().add(GalleryItem::new("x", "y.jpg")).await);
        assert_eq!(h.transport.writes(), 0);
    }

    #[tokio::test]
    async fn test_update_changes_only_patched_fields() {
        let h = empty_news();
        let mut item = NewsItem::new("X");
        item.excerpt = "Krátko".into();
        item.content = "<p>Obsah</p>".into();
        let created = assert_ok!(h.store.news().add(item).await).unwrap();

        h.clock.advance(Duration::from_secs(60));
        let patch = NewsPatch {
            title: Some("Y".into()),
            ..Default::default()
        };
        let updated = assert_ok!(h.store.news().update(&created.id, patch).await).unwrap();

        assert_eq!(updated.title, "Y");
        assert_eq!(updated.excerpt, created.excerpt);
        assert_eq!(updated.content, created.content);
        assert_eq!(updated.date, created.date);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, Some(h.clock.now()));

        let news = assert_ok!(h.store.news().get_all().await);
        assert_eq!(news, vec![updated]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let h = harness_with(
            local(),
            FakeTransport::new().with_resource("produkty.json", json!([{"id": "prod_1"}])),
        );

        let result = assert_ok!(
            h.store
                .products()
                .update("prod_404", ProductPatch::default())
                .await
        );
        assert!(result.is_none());
        assert_eq!(h.transport.writes(), 0);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_succeeds_unchanged() {
        let h = harness_with(
            local(),
            FakeTransport::new().with_resource("galerie.json", json!([{"id": "gal_1"}])),
        );
        let before = assert_ok!(h.store.gallery().get_all().await);

        assert!(assert_ok!(h.store.gallery().delete("gal_404").await));
        assert_eq!(assert_ok!(h.store.gallery().get_all().await), before);
    }

    #[tokio::test]
    async fn test_delete_existing_shrinks_by_one() {
        let h = harness_with(
            local(),
            FakeTransport::new().with_resource(
                "produkty.json",
                json!([{"id": "prod_1"}, {"id": "prod_2"}, {"id": "prod_3"}]),
            ),
        );

        assert!(assert_ok!(h.store.products().delete("prod_2").await));

        let ids: Vec<_> = assert_ok!(h.store.products().get_all().await)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["prod_1", "prod_3"]);
    }

    #[tokio::test]
    async fn test_delete_failed_write_reports_false() {
        let h = harness_with(
            local(),
            FakeTransport::new().with_resource("produkty.json", json!([{"id": "prod_1"}])),
        );
        h.transport.fail_writes(true);

        assert!(!assert_ok!(h.store.products().delete("prod_1").await));
    }

    #[tokio::test]
    async fn test_concurrent_adds_both_land() {
        let h = empty_news();
        let news = h.store.news();

        let (a, b) = tokio::join!(news.add(NewsItem::new("A")), news.add(NewsItem::new("B")));
        let a = assert_ok!(a).unwrap();
        let b = assert_ok!(b).unwrap();
        assert_ne!(a.id, b.id);

        let stored = h.transport.resource("novinky.json").unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 2);
    }
}
