use url::Url;

use crate::config::{Mode, StoreConfig};
use crate::domain::ImageKind;

pub const PRODUCT_PLACEHOLDER: &str = "assets/images/produkty/placeholder.jpg";
pub const GALLERY_PLACEHOLDER: &str = "assets/images/galeria/placeholder.jpg";
pub const GENERAL_PLACEHOLDER: &str = "assets/images/placeholder.jpg";

impl ImageKind {
    pub fn placeholder(&self) -> &'static str {
        match self {
            ImageKind::Product => PRODUCT_PLACEHOLDER,
            ImageKind::News | ImageKind::Gallery => GALLERY_PLACEHOLDER,
            ImageKind::General => GENERAL_PLACEHOLDER,
        }
    }
}

/// Turns stored image paths into URLs the site can load.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResolver {
    /// Site root for remote mode. `None` leaves paths as they are.
    site_root: Option<String>,
}

impl ImageResolver {
    pub fn local() -> Self {
        Self { site_root: None }
    }

    /// Resolve relative paths against the parent of `api_base_path`.
    pub fn remote(api_base_path: &str) -> Self {
        Self {
            site_root: Some(site_root(api_base_path)),
        }
    }

    pub fn for_config(config: &StoreConfig) -> Self {
        match config.mode {
            Mode::Local => Self::local(),
            Mode::Api => Self::remote(&config.api_base_path),
        }
    }

    pub fn resolve(&self, path: Option<&str>, kind: ImageKind) -> String {
        let path = match path.map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => return kind.placeholder().to_string(),
        };

        match &self.site_root {
            Some(root) if !is_absolute(path) && path != kind.placeholder() => {
                format!("{}{}", root, strip_relative(path))
            }
            _ => path.to_string(),
        }
    }

    /// Undo [`resolve`](Self::resolve) for storage: placeholders become empty
    /// and URLs under the site root become relative again.
    pub fn unresolve(&self, image: &str, kind: ImageKind) -> String {
        if image == kind.placeholder() {
            return String::new();
        }

        match &self.site_root {
            Some(root) if !root.is_empty() => match image.strip_prefix(root.as_str()) {
                Some(rest) if !rest.is_empty() => rest.to_string(),
                _ => image.to_string(),
            },
            _ => image.to_string(),
        }
    }
}

/// `https://host/api/` -> `https://host/`, `/api/` -> `/`.
fn site_root(api_base_path: &str) -> String {
    if let Ok(url) = Url::parse(api_base_path) {
        let up = if api_base_path.ends_with('/') { ".." } else { "." };
        if let Ok(root) = url.join(up) {
            return root.to_string();
        }
    }

    let trimmed = api_base_path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => trimmed[..=idx].to_string(),
        None => String::new(),
    }
}

fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || Url::parse(path).is_ok()
}

fn strip_relative(mut path: &str) -> &str {
    loop {
        if let Some(rest) = path.strip_prefix("./") {
            path = rest;
        } else if let Some(rest) = path.strip_prefix("../") {
            path = rest;
        } else {
            return path;
        }
    }
}
