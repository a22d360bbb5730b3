use std::collections::HashSet;

use crate::{
    access::{parse_permission_keys, permission_keys, AdminPage},
    api::{Role, UserRole},
    utils::filters::is_valid_email,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RoleForm {
    /// Set while editing an existing record.
    pub id: Option<String>,
    pub user_email: String,
    pub role: Role,
    pub pages: HashSet<AdminPage>,
    pub is_active: bool,
}

impl Default for RoleForm {
    fn default() -> Self {
        Self {
            id: None,
            user_email: String::new(),
            role: Role::Editor,
            pages: HashSet::new(),
            is_active: true,
        }
    }
}

impl RoleForm {
    pub fn from_record(record: &UserRole) -> Self {
        Self {
            id: Some(record.id.clone()),
            user_email: record.user_email.clone(),
            role: record.role,
            pages: parse_permission_keys(&record.permissions),
            is_active: record.is_active,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn toggle_page(&mut self, page: AdminPage) {
        if !self.pages.remove(&page) {
            self.pages.insert(page);
        }
    }

    pub fn normalized_email(&self) -> String {
        self.user_email.trim().to_lowercase()
    }

    /// Validates against the existing records and builds the record to save.
    /// Super admins carry no page list; they are granted everything.
    pub fn to_record(
        &self,
        existing: &[UserRole],
        created_by: Option<&str>,
    ) -> Result<UserRole, String> {
        let email = self.normalized_email();
        if !is_valid_email(&email) {
            return Err("Enter a valid email address".into());
        }
        let duplicate = existing.iter().any(|record| {
            record.user_email.eq_ignore_ascii_case(&email)
                && Some(&record.id) != self.id.as_ref()
        });
        if duplicate {
            return Err(format!("{} already has a role record", email));
        }
        let permissions = if self.role == Role::SuperAdmin {
            Vec::new()
        } else {
            let grantable: HashSet<AdminPage> = self
                .pages
                .iter()
                .copied()
                .filter(|page| !page.requires_super_admin())
                .collect();
            permission_keys(&grantable)
        };
        Ok(UserRole {
            id: self.id.clone().unwrap_or_default(),
            user_email: email,
            role: self.role,
            permissions,
            is_active: self.is_active,
            created_by_email: created_by.map(str::to_string),
        })
    }
}

/// Whether a change to `record` would lock `current_email` out of the roles
/// page: removing, deactivating or demoting one's own super admin record.
pub fn is_self_lockout(
    current_email: Option<&str>,
    record_email: &str,
    next: Option<&UserRole>,
) -> bool {
    let Some(current) = current_email else {
        return false;
    };
    if !current.eq_ignore_ascii_case(record_email) {
        return false;
    }
    match next {
        None => true,
        Some(next) => !next.is_active || next.role != Role::SuperAdmin,
    }
}
