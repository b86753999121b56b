//! Image selection state for the product hero.

use shared::domain::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaGallery {
    images: Vec<String>,
    selected: usize,
}

impl MediaGallery {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            selected: 0,
        }
    }

    pub fn for_product(product: &Product) -> Self {
        Self::new(product.images().to_vec())
    }

    /// Returns false and keeps the current selection when `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.images.len() {
            return false;
        }
        self.selected = index;
        true
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_image(&self) -> Option<&str> {
        self.images.get(self.selected).map(String::as_str)
    }

    pub fn thumbnails(&self) -> impl Iterator<Item = (usize, &str, bool)> + '_ {
        self.images
            .iter()
            .enumerate()
            .map(move |(index, url)| (index, url.as_str(), index == self.selected))
    }
}

#[cfg(test)]
mod tests {
    use shared::catalog::default_product;

    use super::*;

    #[test]
    fn starts_on_first_image() {
        let gallery = MediaGallery::for_product(&default_product());
        assert_eq!(gallery.selected_index(), 0);
        assert_eq!(
            gallery.selected_image(),
            default_product().images().first().map(String::as_str)
        );
    }

    #[test]
    fn select_ignores_out_of_range_index() {
        let mut gallery = MediaGallery::new(vec!["a.jpg".into(), "b.jpg".into()]);
        assert!(gallery.select(1));
        assert!(!gallery.select(2));
        assert_eq!(gallery.selected_image(), Some("b.jpg"));

        let marks: Vec<bool> = gallery.thumbnails().map(|(_, _, selected)| selected).collect();
        assert_eq!(marks, vec![false, true]);
    }

    #[test]
    fn empty_gallery_has_no_selection() {
        let mut gallery = MediaGallery::new(Vec::new());
        assert!(!gallery.select(0));
        assert_eq!(gallery.selected_image(), None);
    }
}
