use std::fmt;

/// Identifier of a built-in category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(u32);

impl CategoryId {
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A question category shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: &'static str,
}

const CATALOG: [Category; 9] = [
    Category::builtin(1, "Animales"),
    Category::builtin(2, "Familia"),
    Category::builtin(3, "Comida"),
    Category::builtin(4, "Numeros"),
    Category::builtin(5, "Fechas"),
    Category::builtin(6, "Cultura"),
    Category::builtin(7, "Gramática"),
    Category::builtin(8, "Verbos"),
    Category::builtin(9, "Adjetivos"),
];

impl Category {
    const fn builtin(id: u32, name: &'static str) -> Self {
        Self {
            id: CategoryId(id),
            name,
        }
    }

    /// All built-in categories in display order.
    #[must_use]
    pub fn catalog() -> &'static [Category] {
        &CATALOG
    }

    #[must_use]
    pub fn by_id(id: CategoryId) -> Option<Category> {
        CATALOG.iter().copied().find(|c| c.id == id)
    }

    /// Find a category by name, ignoring case and Spanish accents.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Category> {
        let wanted = fold(name.trim());
        CATALOG.iter().copied().find(|c| fold(c.name) == wanted)
    }

    /// Resolve a user-supplied value that may be either an id or a name.
    #[must_use]
    pub fn lookup(raw: &str) -> Option<Category> {
        match raw.trim().parse::<u32>() {
            Ok(id) => Self::by_id(CategoryId::new(id)),
            Err(_) => Self::by_name(raw),
        }
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Lowercase `s` and strip Spanish accents for name comparisons.
pub(crate) fn fold(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' | 'ü' | 'Ü' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_nine_categories_in_order() {
        let names: Vec<_> = Category::catalog().iter().map(Category::name).collect();
        assert_eq!(names.len(), 9);
        assert_eq!(names[0], "Animales");
        assert_eq!(names[8], "Adjetivos");
    }

    #[test]
    fn lookup_ignores_accents_and_case() {
        let cat = Category::by_name("GRAMATICA").unwrap();
        assert_eq!(cat.name(), "Gramática");
        assert_eq!(cat.id(), CategoryId::new(7));
    }

    #[test]
    fn lookup_accepts_ids() {
        assert_eq!(Category::lookup("3").unwrap().name(), "Comida");
        assert!(Category::lookup("42").is_none());
        assert!(Category::lookup("Plantas").is_none());
    }
}
