//! The injected store handle. In-memory maps behind async locks; the
//! production swap-out point if a real database ever replaces this.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::models::{Admin, Order, OrderEvent, User};

/// An order plus its append-only audit log.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub order: Order,
    pub events: Vec<OrderEvent>,
}

/// Users and orders live under one lock so a status flip and its balance
/// move commit together (or not at all).
#[derive(Default)]
pub struct Ledger {
    pub users: HashMap<String, User>,
    pub orders: HashMap<String, OrderRecord>,
}

#[derive(Clone)]
pub struct Db {
    admins: Arc<RwLock<HashMap<String, Admin>>>,
    ledger: Arc<Mutex<Ledger>>,
    order_seq: Arc<AtomicU64>,
}

impl Db {
    pub fn new() -> Self {
        Db {
            admins: Arc::new(RwLock::new(HashMap::new())),
            ledger: Arc::new(Mutex::new(Ledger::default())),
            order_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Run one critical section over users + orders. Callers must not await
    /// inside `f`; broadcasting and other I/O happen after the guard drops.
    pub async fn with_ledger<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> T {
        let mut guard = self.ledger.lock().await;
        f(&mut guard)
    }

    /// Fresh process-unique order id: millis timestamp plus a counter.
    pub fn next_order_id(&self) -> String {
        let seq = self.order_seq.fetch_add(1, Ordering::Relaxed);
        format!("{}-{:04}", Utc::now().timestamp_millis(), seq)
    }

    // ---- admin directory ----

    pub async fn get_admin(&self, id: &str) -> Option<Admin> {
        self.admins.read().await.get(id).cloned()
    }

    pub async fn list_admins(&self) -> HashMap<String, Admin> {
        self.admins.read().await.clone()
    }

    pub async fn admin_count(&self) -> usize {
        self.admins.read().await.len()
    }

    /// Insert only if the id is free; returns false on a duplicate.
    pub async fn insert_admin(&self, admin: Admin) -> bool {
        let mut admins = self.admins.write().await;
        if admins.contains_key(&admin.id) {
            return false;
        }
        admins.insert(admin.id.clone(), admin);
        true
    }

    pub async fn remove_admin(&self, id: &str) -> bool {
        self.admins.write().await.remove(id).is_some()
    }
}

impl Default for Db {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// First-touch user lookup: unknown ids get a zero-balance record.
    pub fn user_mut(&mut self, user_id: &str) -> &mut User {
        self.users
            .entry(user_id.to_string())
            .or_insert_with(|| User::new(user_id))
    }
}
