//! Admin page identifiers and permission resolution.
//!
//! `AdminPage` is the single list of admin pages: it names the permission key
//! stored on `UserRole.permissions`, the route under `/admin/`, and the
//! navigation label. Keys arriving from the backend are parsed into it;
//! unknown keys grant nothing.

use std::collections::HashSet;

use crate::api::{Role, UserRole};

pub const DASHBOARD_PATH: &str = "/admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AdminPage {
    Classes,
    Clubs,
    Packages,
    Banners,
    Schedules,
    Bookings,
    Inquiries,
    Content,
    Analytics,
    UserRoles,
}

impl AdminPage {
    pub const ALL: [AdminPage; 10] = [
        AdminPage::Classes,
        AdminPage::Clubs,
        AdminPage::Packages,
        AdminPage::Banners,
        AdminPage::Schedules,
        AdminPage::Bookings,
        AdminPage::Inquiries,
        AdminPage::Content,
        AdminPage::Analytics,
        AdminPage::UserRoles,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AdminPage::Classes => "classes",
            AdminPage::Clubs => "clubs",
            AdminPage::Packages => "packages",
            AdminPage::Banners => "banners",
            AdminPage::Schedules => "schedules",
            AdminPage::Bookings => "bookings",
            AdminPage::Inquiries => "inquiries",
            AdminPage::Content => "content",
            AdminPage::Analytics => "analytics",
            AdminPage::UserRoles => "user_roles",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminPage::Classes => "Classes",
            AdminPage::Clubs => "Clubs",
            AdminPage::Packages => "Packages",
            AdminPage::Banners => "Banners",
            AdminPage::Schedules => "Schedules",
            AdminPage::Bookings => "Bookings",
            AdminPage::Inquiries => "Inquiries",
            AdminPage::Content => "Blog & content",
            AdminPage::Analytics => "Visitor analytics",
            AdminPage::UserRoles => "Roles & permissions",
        }
    }

    pub fn path(&self) -> String {
        format!("{}/{}", DASHBOARD_PATH, self.key())
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|page| page.key() == key)
    }

    /// Pages that stay closed to everyone but super admins, whatever the
    /// permission list says.
    pub fn requires_super_admin(&self) -> bool {
        matches!(self, AdminPage::UserRoles)
    }

    /// Pages an admin can grant to other users.
    pub fn grantable() -> impl Iterator<Item = AdminPage> {
        Self::ALL
            .into_iter()
            .filter(|page| !page.requires_super_admin())
    }
}

/// The resolved access of the signed-in user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionSet {
    role: Option<Role>,
    pages: HashSet<AdminPage>,
}

impl PermissionSet {
    pub fn none() -> Self {
        Self::default()
    }

    /// Inactive or missing records resolve to no permissions.
    pub fn from_record(record: Option<&UserRole>) -> Self {
        let Some(record) = record.filter(|r| r.is_active) else {
            return Self::none();
        };
        Self {
            role: Some(record.role),
            pages: parse_permission_keys(&record.permissions),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_super_admin(&self) -> bool {
        self.role == Some(Role::SuperAdmin)
    }

    /// True iff super admin or the record lists the page key.
    pub fn has_permission(&self, page: AdminPage) -> bool {
        self.is_super_admin() || self.pages.contains(&page)
    }

    /// Whether the page may be opened: the permission plus, for super-admin
    /// pages, the super admin role.
    pub fn can_open(&self, page: AdminPage) -> bool {
        self.has_permission(page) && (!page.requires_super_admin() || self.is_super_admin())
    }

    pub fn has_any_role(&self) -> bool {
        self.role.is_some()
    }

    pub fn permitted_pages(&self) -> Vec<AdminPage> {
        AdminPage::ALL
            .into_iter()
            .filter(|page| self.can_open(*page))
            .collect()
    }
}

pub fn parse_permission_keys(keys: &[String]) -> HashSet<AdminPage> {
    keys.iter()
        .filter_map(|key| {
            let page = AdminPage::from_key(key.trim());
            if page.is_none() {
                log::warn!("ignoring unknown permission key '{}'", key);
            }
            page
        })
        .collect()
}

pub fn permission_keys(pages: &HashSet<AdminPage>) -> Vec<String> {
    let mut sorted: Vec<AdminPage> = pages.iter().copied().collect();
    sorted.sort();
    sorted.into_iter().map(|page| page.key().to_string()).collect()
}
