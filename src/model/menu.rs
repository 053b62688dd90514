//! The house menu.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    /// Dietary tags such as `vegetarian` or `gluten-free`.
    pub tags: Vec<String>,
    pub available: bool,
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            category: category.into(),
            tags: Vec::new(),
            available: true,
        }
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Whether the name, description or a tag contains `query`, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }
}

/// Read-only catalog of menu items, in display order.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The catalog the service starts with.
    pub fn house() -> Self {
        let cents = |c: i64| Decimal::new(c, 2);
        Self::new(vec![
            MenuItem::new(
                "starter-bruschetta",
                "Bruschetta",
                "Grilled bread, tomato, basil and garlic",
                cents(850),
                "starters",
            )
            .with_tags(&["vegetarian"]),
            MenuItem::new(
                "starter-calamari",
                "Fried Calamari",
                "Crispy squid rings with lemon aioli",
                cents(1150),
                "starters",
            ),
            MenuItem::new(
                "main-burger",
                "House Burger",
                "Beef patty, cheddar, pickles and fries",
                cents(1599),
                "mains",
            ),
            MenuItem::new(
                "main-risotto",
                "Mushroom Risotto",
                "Arborio rice, wild mushrooms and parmesan",
                cents(1750),
                "mains",
            )
            .with_tags(&["vegetarian", "gluten-free"]),
            MenuItem::new(
                "main-salmon",
                "Grilled Salmon",
                "Salmon fillet with seasonal greens",
                cents(2200),
                "mains",
            )
            .with_tags(&["gluten-free"]),
            MenuItem::new(
                "dessert-tiramisu",
                "Tiramisu",
                "Espresso-soaked ladyfingers and mascarpone",
                cents(750),
                "desserts",
            )
            .with_tags(&["vegetarian"]),
            MenuItem::new(
                "dessert-sorbet",
                "Lemon Sorbet",
                "Three scoops, dairy free",
                cents(600),
                "desserts",
            )
            .with_tags(&["vegan", "gluten-free"])
            .unavailable(),
            MenuItem::new(
                "drink-lemonade",
                "Fresh Lemonade",
                "Squeezed to order",
                cents(450),
                "drinks",
            )
            .with_tags(&["vegan"]),
            MenuItem::new(
                "drink-espresso",
                "Espresso",
                "Double shot",
                cents(300),
                "drinks",
            )
            .with_tags(&["vegan"]),
        ])
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn find(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items in `category`, compared case-insensitively.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a MenuItem> + 'a {
        self.items
            .iter()
            .filter(move |item| item.category.eq_ignore_ascii_case(category))
    }

    /// Items matching `query`, see [`MenuItem::matches`].
    pub fn search(&self, query: &str) -> Vec<&MenuItem> {
        self.items.iter().filter(|item| item.matches(query)).collect()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(&item.category);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_menu_lookup() {
        let menu = Menu::house();
        let burger = menu.find("main-burger").unwrap();
        assert_eq!(burger.price, Decimal::new(1599, 2));
        assert!(menu.find("main-pizza").is_none());
    }

    #[test]
    fn test_filters() {
        let menu = Menu::house();
        assert_eq!(menu.by_category("MAINS").count(), 3);
        assert_eq!(menu.categories(), vec!["starters", "mains", "desserts", "drinks"]);

        let names: Vec<_> = menu.search("gluten").iter().map(|i| i.id.as_str()).collect();
        assert_eq!(names, vec!["main-risotto", "main-salmon", "dessert-sorbet"]);
        assert_eq!(menu.search("Lemon").len(), 3);
    }

    #[test]
    fn test_tags_match_ignoring_case() {
        let item = MenuItem::new("special", "Daily Special", "Ask your server", Decimal::new(1400, 2), "mains")
            .with_tags(&["Gluten-Free", "Spicy"]);
        assert!(item.matches("gluten"));
        assert!(item.matches("SPICY"));
        assert!(!item.matches("vegan"));
    }
}
