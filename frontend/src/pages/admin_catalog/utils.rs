use crate::{
    access::AdminPage,
    api::{Club, GymClass, Package, SiteBanner},
    utils::ordering::Orderable,
};

/// A record shown in one of the ordered catalog managers.
pub trait CatalogItem: Orderable {
    /// Page that manages this collection.
    const PAGE: AdminPage;

    fn title(&self) -> &str;

    /// Secondary line under the title.
    fn summary(&self) -> Option<String>;

    fn is_active(&self) -> bool;

    /// A new, active record with just a title, appended at `order`.
    fn draft(title: &str, order: i64) -> Self;
}

impl CatalogItem for GymClass {
    const PAGE: AdminPage = AdminPage::Classes;

    fn title(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.category.clone(),
            self.duration_minutes.map(|m| format!("{} min", m)),
            self.intensity.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();
        (!parts.is_empty()).then(|| parts.join(" · "))
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn draft(title: &str, order: i64) -> Self {
        Self {
            id: String::new(),
            name: title.to_string(),
            description: None,
            category: None,
            duration_minutes: None,
            intensity: None,
            image_url: None,
            is_active: true,
            order,
        }
    }
}

impl CatalogItem for Club {
    const PAGE: AdminPage = AdminPage::Clubs;

    fn title(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> Option<String> {
        self.address.clone()
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn draft(title: &str, order: i64) -> Self {
        Self {
            id: String::new(),
            name: title.to_string(),
            address: None,
            phone: None,
            opening_hours: None,
            image_url: None,
            is_active: true,
            order,
        }
    }
}

impl CatalogItem for Package {
    const PAGE: AdminPage = AdminPage::Packages;

    fn title(&self) -> &str {
        &self.name
    }

    fn summary(&self) -> Option<String> {
        let price = self.price.map(format_price);
        match (price, self.is_featured) {
            (Some(price), true) => Some(format!("{} · featured", price)),
            (Some(price), false) => Some(price),
            (None, true) => Some("featured".to_string()),
            (None, false) => None,
        }
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn draft(title: &str, order: i64) -> Self {
        Self {
            id: String::new(),
            name: title.to_string(),
            description: None,
            price: None,
            duration_months: None,
            features: Vec::new(),
            is_featured: false,
            is_active: true,
            order,
        }
    }
}

impl CatalogItem for SiteBanner {
    const PAGE: AdminPage = AdminPage::Banners;

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<String> {
        self.subtitle.clone()
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn draft(title: &str, order: i64) -> Self {
        Self {
            id: String::new(),
            title: title.to_string(),
            subtitle: None,
            image_url: None,
            link_url: None,
            is_active: true,
            position: order,
        }
    }
}

pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

/// Page copy for one catalog manager.
#[derive(Debug, Clone, Copy)]
pub struct CatalogCopy {
    pub heading: &'static str,
    pub description: &'static str,
    pub noun: &'static str,
    pub empty: &'static str,
}
