use std::fmt;

/// The named resources the content store manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Products,
    News,
    Gallery,
    Settings,
}

impl Entity {
    pub const ALL: [Entity; 4] = [
        Entity::Products,
        Entity::News,
        Entity::Gallery,
        Entity::Settings,
    ];

    /// Resource name relative to the local or API base path.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Entity::Products => "produkty.json",
            Entity::News => "novinky.json",
            Entity::Gallery => "galerie.json",
            Entity::Settings => "nastavenia.json",
        }
    }

    /// Prefix of generated record ids. Settings is a singleton and has none.
    pub fn id_prefix(&self) -> Option<&'static str> {
        match self {
            Entity::Products => Some("prod"),
            Entity::News => Some("news"),
            Entity::Gallery => Some("gal"),
            Entity::Settings => None,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Products => "products",
            Entity::News => "news",
            Entity::Gallery => "gallery",
            Entity::Settings => "settings",
        };
        f.write_str(name)
    }
}
