//! In-memory repository implementation
//!
//! Backs tests and `DATABASE_URL=memory://` demos. A single mutex guards all
//! collections, so every method is atomic with respect to the others.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::models::{
    Business, BusinessCreate, BusinessStatus, Category, DiningTable, MenuItem, Order, OrderItem,
    OrderStatus, TableStatus, User, UserStatus,
};

use super::repository::{
    BusinessRepository, MenuItemChanges, MenuRepository, NewMenuItem, NewOrder, NewUser,
    OrderRepository, RepoError, RepoResult, StatusChange, TableRepository, TableState,
    UserRepository,
};

#[derive(Default)]
struct Inner {
    next_id: i64,
    users: BTreeMap<i64, User>,
    businesses: BTreeMap<i64, Business>,
    categories: BTreeMap<i64, Category>,
    items: BTreeMap<i64, MenuItem>,
    tables: BTreeMap<i64, DiningTable>,
    orders: BTreeMap<i64, Order>,
}

impl Inner {
    /// Ids are shared across collections and stay above anything seeded
    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn observe_id(&mut self, id: i64) {
        self.next_id = self.next_id.max(id);
    }
}

/// Mutex-guarded maps implementing every repository trait
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Seeding (explicit ids) ==========

    pub fn seed_user(&self, user: User) {
        let mut inner = self.inner.lock();
        inner.observe_id(user.id);
        inner.users.insert(user.id, user);
    }

    pub fn seed_business(&self, business: Business) {
        let mut inner = self.inner.lock();
        inner.observe_id(business.id);
        inner.businesses.insert(business.id, business);
    }

    pub fn seed_category(&self, category: Category) {
        let mut inner = self.inner.lock();
        inner.observe_id(category.id);
        inner.categories.insert(category.id, category);
    }

    pub fn seed_item(&self, item: MenuItem) {
        let mut inner = self.inner.lock();
        inner.observe_id(item.id);
        inner.items.insert(item.id, item);
    }

    pub fn seed_table(&self, table: DiningTable) {
        let mut inner = self.inner.lock();
        inner.observe_id(table.id);
        inner.tables.insert(table.id, table);
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.inner.lock().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let inner = self.inner.lock();
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }

    async fn list(&self, business_id: Option<i64>) -> RepoResult<Vec<User>> {
        let inner = self.inner.lock();
        Ok(inner
            .users
            .values()
            .filter(|u| business_id.is_none() || u.business_id == business_id)
            .cloned()
            .collect())
    }

    async fn create(&self, user: NewUser) -> RepoResult<User> {
        let mut inner = self.inner.lock();
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Duplicate(format!("username {}", user.username)));
        }
        let id = inner.allocate_id();
        let created = User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            email: user.email,
            name: user.name,
            role: user.role,
            status: UserStatus::Active,
            business_id: user.business_id,
            last_active_at: None,
            created_at: user.now,
            updated_at: user.now,
        };
        inner.users.insert(id, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: i64) -> RepoResult<bool> {
        Ok(self.inner.lock().users.remove(&id).is_some())
    }

    async fn touch_last_active(&self, id: i64, at: i64) -> RepoResult<()> {
        if let Some(user) = self.inner.lock().users.get_mut(&id) {
            user.last_active_at = Some(at);
        }
        Ok(())
    }
}

#[async_trait]
impl BusinessRepository for MemoryStore {
    async fn list(&self) -> RepoResult<Vec<Business>> {
        Ok(self.inner.lock().businesses.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Business>> {
        Ok(self.inner.lock().businesses.get(&id).cloned())
    }

    async fn create(&self, data: BusinessCreate, now: i64) -> RepoResult<Business> {
        let mut inner = self.inner.lock();
        let id = inner.allocate_id();
        let business = Business {
            id,
            name: data.name,
            status: BusinessStatus::Active,
            phone: data.phone,
            email: data.email,
            address: data.address,
            created_at: now,
            updated_at: now,
        };
        inner.businesses.insert(id, business.clone());
        Ok(business)
    }

    async fn update_status(
        &self,
        id: i64,
        status: BusinessStatus,
        now: i64,
    ) -> RepoResult<Option<Business>> {
        let mut inner = self.inner.lock();
        Ok(inner.businesses.get_mut(&id).map(|b| {
            b.status = status;
            b.updated_at = now;
            b.clone()
        }))
    }
}

#[async_trait]
impl MenuRepository for MemoryStore {
    async fn list_categories(&self, business_id: i64) -> RepoResult<Vec<Category>> {
        let inner = self.inner.lock();
        Ok(inner
            .categories
            .values()
            .filter(|c| c.business_id == business_id)
            .cloned()
            .collect())
    }

    async fn find_category(&self, id: i64, business_id: i64) -> RepoResult<Option<Category>> {
        let inner = self.inner.lock();
        Ok(inner
            .categories
            .get(&id)
            .filter(|c| c.business_id == business_id)
            .cloned())
    }

    async fn create_category(&self, business_id: i64, name: &str) -> RepoResult<Category> {
        let mut inner = self.inner.lock();
        if inner
            .categories
            .values()
            .any(|c| c.business_id == business_id && c.name == name)
        {
            return Err(RepoError::Duplicate(format!("category {name}")));
        }
        let id = inner.allocate_id();
        let category = Category {
            id,
            name: name.to_string(),
            business_id,
        };
        inner.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn list_items(&self, business_id: i64) -> RepoResult<Vec<MenuItem>> {
        let inner = self.inner.lock();
        Ok(inner
            .items
            .values()
            .filter(|i| i.business_id == business_id)
            .cloned()
            .collect())
    }

    async fn find_item(&self, id: i64, business_id: i64) -> RepoResult<Option<MenuItem>> {
        let inner = self.inner.lock();
        Ok(inner
            .items
            .get(&id)
            .filter(|i| i.business_id == business_id)
            .cloned())
    }

    async fn create_item(&self, item: NewMenuItem) -> RepoResult<MenuItem> {
        let mut inner = self.inner.lock();
        let id = inner.allocate_id();
        let created = MenuItem {
            id,
            name: item.name,
            category_id: item.category_id,
            business_id: item.business_id,
            price: item.price,
            is_available: item.is_available,
            description: item.description,
            created_at: item.now,
            updated_at: item.now,
        };
        inner.items.insert(id, created.clone());
        Ok(created)
    }

    async fn update_item(
        &self,
        id: i64,
        business_id: i64,
        changes: MenuItemChanges,
    ) -> RepoResult<Option<MenuItem>> {
        let mut inner = self.inner.lock();
        Ok(inner
            .items
            .get_mut(&id)
            .filter(|i| i.business_id == business_id)
            .map(|item| {
                item.name = changes.name;
                item.category_id = changes.category_id;
                item.price = changes.price;
                item.is_available = changes.is_available;
                item.description = changes.description;
                item.updated_at = changes.now;
                item.clone()
            }))
    }
}

#[async_trait]
impl TableRepository for MemoryStore {
    async fn list(&self, business_id: i64) -> RepoResult<Vec<DiningTable>> {
        let inner = self.inner.lock();
        let mut tables: Vec<_> = inner
            .tables
            .values()
            .filter(|t| t.business_id == business_id)
            .cloned()
            .collect();
        tables.sort_by_key(|t| t.number);
        Ok(tables)
    }

    async fn find_by_id(&self, id: i64, business_id: i64) -> RepoResult<Option<DiningTable>> {
        let inner = self.inner.lock();
        Ok(inner
            .tables
            .get(&id)
            .filter(|t| t.business_id == business_id)
            .cloned())
    }

    async fn create(&self, business_id: i64, number: i32, seats: i32) -> RepoResult<DiningTable> {
        let mut inner = self.inner.lock();
        if inner
            .tables
            .values()
            .any(|t| t.business_id == business_id && t.number == number)
        {
            return Err(RepoError::Duplicate(format!("table number {number}")));
        }
        let id = inner.allocate_id();
        let table = DiningTable {
            id,
            number,
            seats,
            status: TableStatus::Free,
            reserved_at: None,
            occupied_at: None,
            business_id,
        };
        inner.tables.insert(id, table.clone());
        Ok(table)
    }

    async fn set_state(
        &self,
        id: i64,
        business_id: i64,
        state: TableState,
    ) -> RepoResult<Option<DiningTable>> {
        let mut inner = self.inner.lock();
        Ok(inner
            .tables
            .get_mut(&id)
            .filter(|t| t.business_id == business_id)
            .map(|table| {
                table.status = state.status;
                table.reserved_at = state.reserved_at;
                table.occupied_at = state.occupied_at;
                table.clone()
            }))
    }

    async fn occupy_if_free(&self, id: i64, business_id: i64, now: i64) -> RepoResult<bool> {
        let mut inner = self.inner.lock();
        match inner.tables.get_mut(&id) {
            Some(table) if table.business_id == business_id && table.status == TableStatus::Free => {
                table.status = TableStatus::Occupied;
                table.occupied_at = Some(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn create(&self, order: NewOrder) -> RepoResult<Order> {
        let mut inner = self.inner.lock();
        let order_id = inner.allocate_id();
        let mut items = Vec::with_capacity(order.items.len());
        for item in order.items {
            let id = inner.allocate_id();
            items.push(OrderItem {
                id,
                order_id,
                dish_id: item.dish_id,
                name: item.name,
                quantity: item.quantity,
                price: item.price,
                total: item.total,
                notes: item.notes,
            });
        }
        let created = Order {
            id: order_id,
            table_id: order.table_id,
            waiter_id: order.waiter_id,
            status: OrderStatus::New,
            total_amount: order.total_amount,
            comment: order.comment,
            created_at: order.now,
            updated_at: order.now,
            completed_at: None,
            cancelled_at: None,
            business_id: order.business_id,
            items,
        };
        inner.orders.insert(order_id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64, business_id: i64) -> RepoResult<Option<Order>> {
        let inner = self.inner.lock();
        Ok(inner
            .orders
            .get(&id)
            .filter(|o| o.business_id == business_id)
            .cloned())
    }

    async fn list_by_status(
        &self,
        business_id: Option<i64>,
        statuses: &[OrderStatus],
    ) -> RepoResult<Vec<Order>> {
        let inner = self.inner.lock();
        Ok(inner
            .orders
            .values()
            .rev()
            .filter(|o| business_id.is_none_or(|b| o.business_id == b))
            .filter(|o| statuses.contains(&o.status))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: i64,
        business_id: i64,
        change: StatusChange,
    ) -> RepoResult<bool> {
        let mut inner = self.inner.lock();
        match inner.orders.get_mut(&id) {
            Some(order) if order.business_id == business_id && order.status == change.from => {
                order.status = change.to;
                order.updated_at = change.updated_at;
                order.completed_at = change.completed_at;
                order.cancelled_at = change.cancelled_at;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count_active_for_table(&self, table_id: i64, business_id: i64) -> RepoResult<i64> {
        let inner = self.inner.lock();
        let count = inner
            .orders
            .values()
            .filter(|o| o.table_id == table_id && o.business_id == business_id)
            .filter(|o| o.status.is_active())
            .count();
        Ok(count as i64)
    }

    async fn count_by_waiter(&self, waiter_id: i64) -> RepoResult<i64> {
        let inner = self.inner.lock();
        Ok(inner.orders.values().filter(|o| o.waiter_id == waiter_id).count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::Role;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.into(),
            password_hash: "hash".into(),
            email: String::new(),
            name: String::new(),
            role: Role::Waiter,
            business_id: Some(1),
            now: 1,
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = MemoryStore::new();
        UserRepository::create(&store, new_user("bob")).await.unwrap();
        let err = UserRepository::create(&store, new_user("bob")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_business_scoped_lookup() {
        let store = MemoryStore::new();
        let table = TableRepository::create(&store, 3, 1, 4).await.unwrap();
        assert!(TableRepository::find_by_id(&store, table.id, 3).await.unwrap().is_some());
        assert!(TableRepository::find_by_id(&store, table.id, 4).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_conditional_status_update() {
        let store = MemoryStore::new();
        let order = OrderRepository::create(
            &store,
            NewOrder {
                table_id: 1,
                waiter_id: 2,
                business_id: 3,
                comment: None,
                total_amount: Decimal::ZERO,
                items: vec![],
                now: 1,
            },
        )
        .await
        .unwrap();
        let change = StatusChange {
            from: OrderStatus::New,
            to: OrderStatus::Accepted,
            updated_at: 2,
            completed_at: None,
            cancelled_at: None,
        };
        assert!(OrderRepository::update_status(&store, order.id, 3, change).await.unwrap());
        // Second writer still expects `new`
        assert!(!OrderRepository::update_status(&store, order.id, 3, change).await.unwrap());
    }

    #[tokio::test]
    async fn test_seeded_ids_are_not_reused() {
        let store = MemoryStore::new();
        store.seed_business(Business {
            id: 40,
            name: "Seeded".into(),
            status: BusinessStatus::Active,
            phone: None,
            email: None,
            address: None,
            created_at: 0,
            updated_at: 0,
        });
        let created = BusinessRepository::create(
            &store,
            BusinessCreate {
                name: "Next".into(),
                phone: None,
                email: None,
                address: None,
            },
            1,
        )
        .await
        .unwrap();
        assert!(created.id > 40);
    }
}
