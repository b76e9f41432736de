/// A shop note loaded from `shops/<area>/<slug>.md`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Shop {
    /// Area directory the file lives in
    pub area: String,
    /// File name without extension
    pub slug: String,
    pub name: String,
    pub address: String,
    pub image: String,
    pub description: String,
    /// Generic labels
    pub tags: Vec<String>,
    pub price_tags: Vec<String>,
    /// Use-case labels ("date", "solo", ...)
    pub scene_tags: Vec<String>,
    pub access_tags: Vec<String>,
    /// Business-hours labels
    pub business_tags: Vec<String>,
    /// Markdown body after the front-matter block
    pub content: String,
}

impl Shop {
    /// Detail page route for this shop
    pub fn route(&self) -> crate::route::Route {
        crate::route::Route::Shop {
            area: self.area.clone(),
            slug: self.slug.clone(),
        }
    }

    /// True when at least one of the five tag groups has an entry
    pub fn has_tags(&self) -> bool {
        [
            &self.tags,
            &self.price_tags,
            &self.scene_tags,
            &self.access_tags,
            &self.business_tags,
        ]
        .iter()
        .any(|group| !group.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::Route;

    #[test]
    fn test_route_points_at_detail_page() {
        let shop = Shop {
            area: "Shibuya".to_string(),
            slug: "kissa-one".to_string(),
            ..Default::default()
        };

        assert_eq!(
            shop.route(),
            Route::Shop {
                area: "Shibuya".to_string(),
                slug: "kissa-one".to_string()
            }
        );
    }

    #[test]
    fn test_has_tags_checks_every_group() {
        let mut shop = Shop::default();
        assert!(!shop.has_tags());

        shop.business_tags.push("定休日: 月".to_string());
        assert!(shop.has_tags());
    }
}
