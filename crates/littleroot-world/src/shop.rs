//! Mart stock and the shop panel.

/// What using an item does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemEffect {
    /// Restore this many hit points
    Heal(u32),
    /// Revive a fainted pokemon with this fraction of its health
    Revive(f32),
    /// Catch-rate multiplier
    Capture(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: &'static str,
    pub effect: ItemEffect,
    pub price: u32,
    /// Trainer level from which the mart stocks it
    pub base_level: u32,
}

/// Everything the mart can sell
pub const ITEMS: &[Item] = &[
    Item { name: "Potion", effect: ItemEffect::Heal(20), price: 300, base_level: 0 },
    Item { name: "Super Potion", effect: ItemEffect::Heal(50), price: 700, base_level: 12 },
    Item { name: "Hyper Potion", effect: ItemEffect::Heal(70), price: 1200, base_level: 23 },
    Item { name: "Revive", effect: ItemEffect::Revive(0.5), price: 1500, base_level: 25 },
    Item { name: "Max Revive", effect: ItemEffect::Revive(1.0), price: 2000, base_level: 30 },
    Item { name: "Pokeball", effect: ItemEffect::Capture(1), price: 200, base_level: 0 },
    Item { name: "Great Ball", effect: ItemEffect::Capture(2), price: 600, base_level: 12 },
];

pub fn item(name: &str) -> Option<&'static Item> {
    ITEMS.iter().find(|i| i.name.eq_ignore_ascii_case(name))
}

/// The mart's item list with a highlighted row
#[derive(Debug, Clone, Default)]
pub struct ShopPanel {
    open: bool,
    cursor: usize,
}

impl ShopPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.cursor = 0;
        self.open = true;
        tracing::debug!("Shop opened");
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the highlight, clamped to the list
    pub fn scroll_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.cursor + 1 < ITEMS.len() {
            self.cursor += 1;
        }
    }

    /// (name, price) rows for drawing
    pub fn rows(&self) -> Vec<(String, u32)> {
        ITEMS.iter().map(|i| (i.name.to_string(), i.price)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(item("great ball").map(|i| i.price), Some(600));
        assert!(item("master ball").is_none());
    }

    #[test]
    fn cursor_is_clamped() {
        let mut shop = ShopPanel::new();
        shop.open();
        shop.scroll_up();
        assert_eq!(shop.cursor(), 0);
        for _ in 0..20 {
            shop.scroll_down();
        }
        assert_eq!(shop.cursor(), ITEMS.len() - 1);
        assert_eq!(shop.rows()[shop.cursor()].0, "Great Ball");
    }

    #[test]
    fn reopening_resets_cursor() {
        let mut shop = ShopPanel::new();
        shop.open();
        shop.scroll_down();
        shop.close();
        assert!(!shop.is_open());
        shop.open();
        assert_eq!(shop.cursor(), 0);
        assert_eq!(shop.rows()[0], ("Potion".to_string(), 300));
        assert_eq!(shop.rows().len(), 7);
    }
}
