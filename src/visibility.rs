//! Show/hide toggles for the four entity categories.

use serde::{Deserialize, Serialize};

use crate::model::Category;

/// Four independent visibility flags. All default to visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Visibility {
    pub buildings: bool,
    pub equipment: bool,
    pub silos: bool,
    pub markers: bool,
}

impl Default for Visibility {
    fn default() -> Self {
        Self {
            buildings: true,
            equipment: true,
            silos: true,
            markers: true,
        }
    }
}

impl Visibility {
    /// Returns whether `category` is currently drawn.
    pub fn is_visible(&self, category: Category) -> bool {
        match category {
            Category::Building => self.buildings,
            Category::Equipment => self.equipment,
            Category::Silo => self.silos,
            Category::Marker => self.markers,
        }
    }

    /// Sets one flag, leaving the others untouched.
    pub fn set(&mut self, category: Category, visible: bool) {
        let flag = match category {
            Category::Building => &mut self.buildings,
            Category::Equipment => &mut self.equipment,
            Category::Silo => &mut self.silos,
            Category::Marker => &mut self.markers,
        };
        *flag = visible;
    }

    /// Flips one flag and returns its new value.
    pub fn toggle(&mut self, category: Category) -> bool {
        let visible = !self.is_visible(category);
        self.set(category, visible);
        visible
    }

    /// Copy with `category` hidden.
    pub fn hiding(mut self, category: Category) -> Self {
        self.set(category, false);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_visible() {
        let v = Visibility::default();
        assert!(Category::ALL.iter().all(|c| v.is_visible(*c)));
    }

    #[test]
    fn toggle_flips_only_one_flag() {
        for category in Category::ALL {
            let mut v = Visibility::default();
            assert!(!v.toggle(category));
            for other in Category::ALL {
                assert_eq!(v.is_visible(other), other != category);
            }
            assert!(v.toggle(category));
            assert_eq!(v, Visibility::default());
        }
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let v: Visibility = toml::from_str("silos = false").unwrap();
        assert!(!v.silos);
        assert!(v.buildings && v.equipment && v.markers);
    }
}
