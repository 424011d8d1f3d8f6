//! In-memory storage.
//!
//! Plain key-value maps behind read-write locks; single-record updates are
//! atomic, nothing else is. The one hardened path is `apply_trust`: both
//! trust writers (artist workflow, admin override) must present the product
//! version they read, so a concurrent writer gets a conflict instead of
//! silently losing its write.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::models::{
    Cart, Category, Order, Product, Review, Role, TrustTransition, User,
};

/// Storage-level errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("version conflict: expected {expected}, found {actual}")]
    VersionConflict { expected: u64, actual: u64 },
}

/// Optional filters for product listings.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    pub artist_id: Option<Uuid>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// The in-memory store backing the whole server.
#[derive(Default)]
pub struct MemStore {
    users: RwLock<HashMap<Uuid, User>>,
    categories: RwLock<HashMap<Uuid, Category>>,
    products: RwLock<HashMap<Uuid, Product>>,
    carts: RwLock<HashMap<Uuid, Cart>>,
    orders: RwLock<HashMap<Uuid, Order>>,
    reviews: RwLock<HashMap<Uuid, Review>>,
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Users ──────────────────────────────────────────────────

    pub fn get_user(&self, id: Uuid) -> Option<User> {
        read(&self.users).get(&id).cloned()
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        read(&self.users)
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    pub fn create_user(&self, user: User) -> User {
        write(&self.users).insert(user.id, user.clone());
        user
    }

    /// Applies an in-place edit; returns the updated user, or `None` when
    /// the user does not exist.
    pub fn update_user(&self, id: Uuid, f: impl FnOnce(&mut User)) -> Option<User> {
        let mut users = write(&self.users);
        let user = users.get_mut(&id)?;
        f(user);
        Some(user.clone())
    }

    pub fn users(&self, role: Option<Role>) -> Vec<User> {
        read(&self.users)
            .values()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .cloned()
            .collect()
    }

    // ── Categories ─────────────────────────────────────────────

    pub fn categories(&self) -> Vec<Category> {
        read(&self.categories).values().cloned().collect()
    }

    pub fn get_category(&self, id: Uuid) -> Option<Category> {
        read(&self.categories).get(&id).cloned()
    }

    pub fn get_category_by_slug(&self, slug: &str) -> Option<Category> {
        read(&self.categories)
            .values()
            .find(|c| c.slug == slug)
            .cloned()
    }

    pub fn create_category(&self, category: Category) -> Category {
        write(&self.categories).insert(category.id, category.clone());
        category
    }

    // ── Products ───────────────────────────────────────────────

    /// Filtered product listing, newest first.
    pub fn products(&self, filter: &ProductFilter) -> Vec<Product> {
        let mut products: Vec<Product> = read(&self.products)
            .values()
            .filter(|p| filter.category_id.map_or(true, |c| p.category_id == c))
            .filter(|p| filter.artist_id.map_or(true, |a| p.artist_id == a))
            .cloned()
            .collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let offset = filter.offset.unwrap_or(0).min(products.len());
        let mut products = products.split_off(offset);
        if let Some(limit) = filter.limit {
            products.truncate(limit);
        }
        products
    }

    pub fn get_product(&self, id: Uuid) -> Option<Product> {
        read(&self.products).get(&id).cloned()
    }

    pub fn create_product(&self, product: Product) -> Product {
        write(&self.products).insert(product.id, product.clone());
        product
    }

    /// General product edit; bumps the version like every other write.
    pub fn update_product(&self, id: Uuid, f: impl FnOnce(&mut Product)) -> Option<Product> {
        let mut products = write(&self.products);
        let product = products.get_mut(&id)?;
        f(product);
        product.version += 1;
        Some(product.clone())
    }

    pub fn delete_product(&self, id: Uuid) -> bool {
        write(&self.products).remove(&id).is_some()
    }

    /// The single write path for trust fields. Fails when the product is
    /// gone or its version moved since the caller read it.
    pub fn apply_trust(
        &self,
        id: Uuid,
        expected_version: u64,
        transition: TrustTransition,
    ) -> Result<Product, StoreError> {
        let mut products = write(&self.products);
        let product = products.get_mut(&id).ok_or(StoreError::NotFound("Product"))?;
        if product.version != expected_version {
            return Err(StoreError::VersionConflict {
                expected: expected_version,
                actual: product.version,
            });
        }
        product.apply_trust(transition);
        Ok(product.clone())
    }

    // ── Carts ──────────────────────────────────────────────────

    pub fn cart_for_user(&self, user_id: Uuid) -> Option<Cart> {
        read(&self.carts)
            .values()
            .find(|c| c.user_id == user_id)
            .cloned()
    }

    /// Fetches the user's cart, creating an empty one if absent.
    pub fn cart_for_user_or_create(&self, user_id: Uuid) -> Cart {
        let mut carts = write(&self.carts);
        if let Some(cart) = carts.values().find(|c| c.user_id == user_id) {
            return cart.clone();
        }
        let cart = Cart::empty(user_id);
        carts.insert(cart.id, cart.clone());
        cart
    }

    pub fn update_cart(&self, user_id: Uuid, f: impl FnOnce(&mut Cart)) -> Option<Cart> {
        let mut carts = write(&self.carts);
        let cart = carts.values_mut().find(|c| c.user_id == user_id)?;
        f(cart);
        Some(cart.clone())
    }

    // ── Orders ─────────────────────────────────────────────────

    /// Orders, optionally restricted to one user, newest first.
    pub fn orders(&self, user_id: Option<Uuid>) -> Vec<Order> {
        let mut orders: Vec<Order> = read(&self.orders)
            .values()
            .filter(|o| user_id.map_or(true, |u| o.user_id == u))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    pub fn get_order(&self, id: Uuid) -> Option<Order> {
        read(&self.orders).get(&id).cloned()
    }

    pub fn create_order(&self, order: Order) -> Order {
        write(&self.orders).insert(order.id, order.clone());
        order
    }

    // ── Reviews ────────────────────────────────────────────────

    pub fn reviews_for_product(&self, product_id: Uuid) -> Vec<Review> {
        let mut reviews: Vec<Review> = read(&self.reviews)
            .values()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }

    pub fn create_review(&self, review: Review) -> Review {
        write(&self.reviews).insert(review.id, review.clone());
        review
    }

    // ── Admin ──────────────────────────────────────────────────

    /// Artists awaiting approval and products still pending verification.
    pub fn pending_verifications(&self) -> (Vec<User>, Vec<Product>) {
        let users = read(&self.users)
            .values()
            .filter(|u| u.role == Role::Artist && !u.verified_status)
            .cloned()
            .collect();
        let products = read(&self.products)
            .values()
            .filter(|p| p.authenticity_status == alley_verify::TrustTier::Pending)
            .cloned()
            .collect();
        (users, products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alley_verify::TrustTier;
    use bigdecimal::BigDecimal;
    use chrono::Utc;

    fn sample_product(artist_id: Uuid) -> Product {
        let new: crate::models::NewProduct = serde_json::from_value(serde_json::json!({
            "title": "Test Piece",
            "description": "A test piece",
            "categoryId": Uuid::new_v4(),
            "price": "100.00",
        }))
        .unwrap();
        Product::from_new(new, artist_id)
    }

    fn sample_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: format!("{}@example.com", Uuid::new_v4()),
            password_hash: String::new(),
            role,
            verified_status: false,
            email_verified: true,
            otp: None,
            otp_expiry: None,
            artist_portfolio: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_trust_with_current_version() {
        let store = MemStore::new();
        let product = store.create_product(sample_product(Uuid::new_v4()));

        let updated = store
            .apply_trust(
                product.id,
                product.version,
                TrustTransition {
                    status: TrustTier::Verified,
                    score: Some(92.0),
                    verification_id: Some("AUTH-1-AB12".to_string()),
                    undertaking: None,
                },
            )
            .unwrap();

        assert_eq!(updated.authenticity_status, TrustTier::Verified);
        assert_eq!(updated.version, product.version + 1);
    }

    #[test]
    fn test_apply_trust_stale_version_conflicts() {
        let store = MemStore::new();
        let product = store.create_product(sample_product(Uuid::new_v4()));

        // Another writer slips in first.
        store
            .apply_trust(
                product.id,
                product.version,
                TrustTransition {
                    status: TrustTier::Rejected,
                    score: None,
                    verification_id: None,
                    undertaking: None,
                },
            )
            .unwrap();

        let stale = store.apply_trust(
            product.id,
            product.version,
            TrustTransition {
                status: TrustTier::Verified,
                score: Some(95.0),
                verification_id: None,
                undertaking: None,
            },
        );
        assert!(matches!(
            stale,
            Err(StoreError::VersionConflict {
                expected: 0,
                actual: 1
            })
        ));

        // The first write survived untouched.
        let current = store.get_product(product.id).unwrap();
        assert_eq!(current.authenticity_status, TrustTier::Rejected);
    }

    #[test]
    fn test_apply_trust_missing_product() {
        let store = MemStore::new();
        let result = store.apply_trust(
            Uuid::new_v4(),
            0,
            TrustTransition {
                status: TrustTier::Verified,
                score: None,
                verification_id: None,
                undertaking: None,
            },
        );
        assert!(matches!(result, Err(StoreError::NotFound("Product"))));
    }

    #[test]
    fn test_product_filters() {
        let store = MemStore::new();
        let artist_a = Uuid::new_v4();
        let artist_b = Uuid::new_v4();
        store.create_product(sample_product(artist_a));
        store.create_product(sample_product(artist_a));
        store.create_product(sample_product(artist_b));

        let all = store.products(&ProductFilter::default());
        assert_eq!(all.len(), 3);

        let only_a = store.products(&ProductFilter {
            artist_id: Some(artist_a),
            ..Default::default()
        });
        assert_eq!(only_a.len(), 2);

        let limited = store.products(&ProductFilter {
            limit: Some(2),
            ..Default::default()
        });
        assert_eq!(limited.len(), 2);

        let offset_past_end = store.products(&ProductFilter {
            offset: Some(10),
            ..Default::default()
        });
        assert!(offset_past_end.is_empty());
    }

    #[test]
    fn test_cart_lazily_created() {
        let store = MemStore::new();
        let user_id = Uuid::new_v4();
        assert!(store.cart_for_user(user_id).is_none());

        let cart = store.cart_for_user_or_create(user_id);
        assert!(cart.items.is_empty());

        // Second call returns the same cart.
        let again = store.cart_for_user_or_create(user_id);
        assert_eq!(cart.id, again.id);
    }

    #[test]
    fn test_update_cart_total() {
        let store = MemStore::new();
        let user_id = Uuid::new_v4();
        store.cart_for_user_or_create(user_id);
        let cart = store
            .update_cart(user_id, |c| {
                c.add(Uuid::new_v4(), 2, BigDecimal::from(250));
            })
            .unwrap();
        assert_eq!(cart.total(), BigDecimal::from(500));
    }

    #[test]
    fn test_pending_verifications() {
        let store = MemStore::new();
        let mut unapproved = sample_user(Role::Artist);
        unapproved.verified_status = false;
        let mut approved = sample_user(Role::Artist);
        approved.verified_status = true;
        store.create_user(unapproved);
        store.create_user(approved);
        store.create_user(sample_user(Role::Customer));
        store.create_product(sample_product(Uuid::new_v4()));

        let (users, products) = store.pending_verifications();
        assert_eq!(users.len(), 1);
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn test_user_lookup_by_email() {
        let store = MemStore::new();
        let user = store.create_user(sample_user(Role::Customer));
        assert!(store.get_user_by_email(&user.email).is_some());
        assert!(store.get_user_by_email("nobody@example.com").is_none());
    }
}
