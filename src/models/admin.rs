use serde::{Deserialize, Serialize};

use super::OrderKind;

/// Per-admin capability flags, one per order partition.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    #[serde(default)]
    pub recharge: bool,

    #[serde(default)]
    pub withdraw: bool,

    #[serde(default)]
    pub buy_sell: bool,
}

impl Permissions {
    pub fn all() -> Self {
        Permissions {
            recharge: true,
            withdraw: true,
            buy_sell: true,
        }
    }

    pub fn allows(&self, kind: OrderKind) -> bool {
        match kind {
            OrderKind::Recharge => self.recharge,
            OrderKind::Withdraw => self.withdraw,
            OrderKind::Buysell => self.buy_sell,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: String,

    #[serde(skip_serializing)]
    pub password_hash: String,

    pub is_super: bool,
    pub permissions: Permissions,
    pub created: i64,
}

/// What the admin/list endpoint returns: everything but the hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminView {
    pub is_super: bool,
    pub permissions: Permissions,
    pub created: i64,
}

impl From<&Admin> for AdminView {
    fn from(a: &Admin) -> Self {
        AdminView {
            is_super: a.is_super,
            permissions: a.permissions,
            created: a.created,
        }
    }
}

/// Injected into request extensions by the auth middleware once a bearer
/// token resolves to a live directory entry.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    pub id: String,
    pub is_super: bool,
    pub permissions: Permissions,
}

impl CurrentAdmin {
    /// Super admins pass every capability check.
    pub fn can_update(&self, kind: OrderKind) -> bool {
        self.is_super || self.permissions.allows(kind)
    }
}

impl From<&Admin> for CurrentAdmin {
    fn from(a: &Admin) -> Self {
        CurrentAdmin {
            id: a.id.clone(),
            is_super: a.is_super,
            permissions: a.permissions,
        }
    }
}
