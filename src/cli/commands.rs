use crate::app::{AppContext, ContentError, Result};
use crate::cli::{CacheAction, GalleryAction, NewsAction, ProductAction, SettingsAction};
use crate::domain::{GalleryItem, NewsItem, NewsPatch, Product, ProductPatch};

pub async fn products(ctx: &AppContext, action: ProductAction) -> Result<()> {
    let products = ctx.content.products();

    match action {
        ProductAction::List => {
            let items = products.get_all().await?;
            if items.is_empty() {
                println!("No products");
                return Ok(());
            }
            for p in items {
                println!("{}  {} ({})  [{}]", p.id, p.name, p.price, p.category);
            }
        }
        ProductAction::Add {
            name,
            price,
            description,
            category,
            image,
        } => {
            let product = Product {
                description,
                category,
                image,
                ..Product::new(name, price)
            };
            let created = products
                .add(product)
                .await?
                .ok_or_else(|| ContentError::Other("Saving product failed".into()))?;
            println!("Added product: {}", created.id);
        }
        ProductAction::Update {
            id,
            name,
            price,
            description,
            category,
            image,
        } => {
            let patch = ProductPatch {
                name,
                description,
                price,
                category,
                image,
            };
            match products.update(&id, patch).await? {
                Some(p) => println!("Updated product: {}", p.id),
                None => println!("Product not updated: {}", id),
            }
        }
        ProductAction::Delete { id } => report_delete("product", &id, products.delete(&id).await?),
    }

    Ok(())
}

pub async fn news(ctx: &AppContext, action: NewsAction) -> Result<()> {
    let news = ctx.content.news();

    match action {
        NewsAction::List => {
            let items = news.get_all().await?;
            if items.is_empty() {
                println!("No news");
                return Ok(());
            }
            for n in items {
                let date = n
                    .date
                    .map(|d| d.format("%d.%m.%Y").to_string())
                    .unwrap_or_else(|| "          ".to_string());
                println!("{} {}  {}", date, n.id, n.title);
            }
        }
        NewsAction::Add {
            title,
            excerpt,
            content,
            image,
            date,
        } => {
            let item = NewsItem {
                excerpt,
                content,
                image,
                date,
                ..NewsItem::new(title)
            };
            let created = news
                .add(item)
                .await?
                .ok_or_else(|| ContentError::Other("Saving news failed".into()))?;
            println!("Added news: {}", created.id);
        }
        NewsAction::Update {
            id,
            title,
            excerpt,
            content,
            image,
            date,
        } => {
            let patch = NewsPatch {
                title,
                excerpt,
                content,
                image,
                date,
            };
            match news.update(&id, patch).await? {
                Some(n) => println!("Updated news: {}", n.id),
                None => println!("News not updated: {}", id),
            }
        }
        NewsAction::Delete { id } => report_delete("news", &id, news.delete(&id).await?),
    }

    Ok(())
}

pub async fn gallery(ctx: &AppContext, action: GalleryAction) -> Result<()> {
    let gallery = ctx.content.gallery();

    match action {
        GalleryAction::List => {
            let items = gallery.get_all().await?;
            if items.is_empty() {
                println!("No gallery images");
                return Ok(());
            }
            for g in items {
                println!("{}  {}\n  {}", g.id, g.title, g.image);
            }
        }
        GalleryAction::Add { title, image } => {
            let created = gallery
                .add(GalleryItem::new(title, image))
                .await?
                .ok_or_else(|| ContentError::Other("Saving gallery image failed".into()))?;
            println!("Added gallery image: {}", created.id);
        }
        GalleryAction::Delete { id } => {
            report_delete("gallery image", &id, gallery.delete(&id).await?)
        }
    }

    Ok(())
}

pub async fn settings(ctx: &AppContext, action: SettingsAction) -> Result<()> {
    let accessor = ctx.content.settings();

    match action {
        SettingsAction::Show => {
            let s = accessor.get().await?;
            println!("{}", s.shop_name);
            println!("{}, {}", s.address, s.city);
            println!("{} | {}", s.phone, s.email);
            println!("Po - Pi: {}", s.hours.weekdays);
            println!("Sobota:  {}", s.hours.saturday);
            println!("Nedeľa:  {}", s.hours.sunday);
        }
        SettingsAction::Set {
            shop_name,
            address,
            city,
            phone,
            email,
            weekdays,
            saturday,
            sunday,
        } => {
            let mut s = accessor.get().await?;
            let fields = [
                (shop_name, &mut s.shop_name),
                (address, &mut s.address),
                (city, &mut s.city),
                (phone, &mut s.phone),
                (email, &mut s.email),
                (weekdays, &mut s.hours.weekdays),
                (saturday, &mut s.hours.saturday),
                (sunday, &mut s.hours.sunday),
            ];
            for (value, field) in fields {
                if let Some(value) = value {
                    *field = value;
                }
            }

            accessor
                .save(s)
                .await?
                .ok_or_else(|| ContentError::Other("Saving settings failed".into()))?;
            println!("Settings saved");
        }
    }

    Ok(())
}

pub fn cache(ctx: &AppContext, action: CacheAction) -> Result<()> {
    match action {
        CacheAction::Status => {
            let rows = ctx.content.cache_status()?;
            if rows.is_empty() {
                println!("Cache is empty");
                return Ok(());
            }
            for row in rows {
                let age = row
                    .age_minutes
                    .map(|m| format!("{} min", m))
                    .unwrap_or_else(|| "unreadable".to_string());
                let marker = if row.expired { " (expired)" } else { "" };
                println!("{}  {}  {} B{}", row.key, age, row.size_bytes, marker);
            }
        }
        CacheAction::Clear { key } => {
            ctx.content.clear_cache(key.as_deref())?;
            match key {
                Some(key) => println!("Cleared {}", key),
                None => println!("Cache cleared"),
            }
        }
    }

    Ok(())
}

fn report_delete(what: &str, id: &str, success: bool) {
    if success {
        println!("Deleted {}: {}", what, id);
    } else {
        eprintln!("Deleting {} {} failed", what, id);
    }
}
