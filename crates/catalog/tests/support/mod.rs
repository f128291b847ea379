//! In-memory store fakes for driving the services without a database.
//!
//! Each fake honors the same contract the Postgres repositories do,
//! including surfacing uniqueness races as [`RepositoryError::Conflict`],
//! so the guards under test see identical collaborator behavior.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use emporium_catalog::db::{
    AttributeStore, FavoriteStore, OrderStore, PAGE_SIZE, ProductStore, RepositoryError,
    ReviewStore, UserStore,
};
use emporium_catalog::models::user::{NewUser, ProfileEdit};
use emporium_catalog::models::{
    AttributeDefinition, Order, Product, Review, ReviewEdit, User, ValidatedFilter,
};
use emporium_core::{
    AttributeId, BrandId, Email, Page, ProductId, ReviewId, Role, SubCategoryId, UserId,
};

fn page_slice<T: Clone>(items: &[T], page: Page) -> Vec<T> {
    let offset = usize::try_from(page.offset(PAGE_SIZE)).unwrap_or(0);
    let limit = usize::try_from(PAGE_SIZE).unwrap_or(0);
    items.iter().skip(offset).take(limit).cloned().collect()
}

/// Build a catalog product for tests.
pub fn product(id: i64, sub_category_id: i64) -> Product {
    Product {
        id: ProductId::from(id),
        description: format!("product {id}"),
        price: Decimal::new(1999, 2),
        picture_url: format!("https://img.example/{id}.jpg"),
        brand_id: BrandId::from(1),
        sub_category_id: SubCategoryId::from(sub_category_id),
        offer_id: None,
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Default)]
pub struct MemoryUsers {
    inner: Mutex<UsersInner>,
}

#[derive(Default)]
struct UsersInner {
    next_id: i64,
    rows: Vec<(User, String)>,
}

impl MemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account directly, bypassing registration.
    pub fn seed(&self, email: &str, password_hash: &str, role: Role) -> UserId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = UserId::from(inner.next_id);
        let user = User {
            id,
            email: Email::parse(email).unwrap(),
            first_name: "Test".to_owned(),
            last_name: "Account".to_owned(),
            phone: None,
            role,
            subscribed: false,
            created_at: Utc::now(),
        };
        inner.rows.push((user, password_hash.to_owned()));
        id
    }
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }

    async fn by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter()
            .find(|(u, _)| u.email == *email)
            .map(|(u, _)| u.clone()))
    }

    async fn with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter()
            .find(|(u, _)| u.email == *email)
            .cloned())
    }

    async fn password_hash(&self, id: UserId) -> Result<Option<String>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .rows
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, h)| h.clone()))
    }

    async fn create(
        &self,
        new_user: &NewUser,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.rows.iter().any(|(u, _)| u.email == new_user.email) {
            return Err(RepositoryError::Conflict("email".to_owned()));
        }
        inner.next_id += 1;
        let user = User {
            id: UserId::from(inner.next_id),
            email: new_user.email.clone(),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            phone: new_user.phone.clone(),
            role: Role::User,
            subscribed: false,
            created_at: Utc::now(),
        };
        inner.rows.push((user.clone(), password_hash.to_owned()));
        Ok(user)
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.iter_mut().find(|(u, _)| u.id == id) {
            Some((_, hash)) => {
                *hash = password_hash.to_owned();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn update_profile(
        &self,
        id: UserId,
        edit: &ProfileEdit,
    ) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.iter_mut().find(|(u, _)| u.id == id) {
            Some((user, _)) => {
                user.first_name.clone_from(&edit.first_name);
                user.last_name.clone_from(&edit.last_name);
                user.phone.clone_from(&edit.phone);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn subscribe(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.rows.iter_mut().find(|(u, _)| u.id == id) {
            Some((user, _)) => {
                user.subscribed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|(u, _)| u.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        let users: Vec<User> = inner.rows.iter().map(|(u, _)| u.clone()).collect();
        Ok(page_slice(&users, page))
    }
}

// =============================================================================
// Products
// =============================================================================

pub struct MemoryProducts {
    rows: Mutex<Vec<Product>>,
}

impl MemoryProducts {
    pub fn with(rows: Vec<Product>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    pub fn empty() -> Self {
        Self::with(Vec::new())
    }
}

#[async_trait]
impl ProductStore for MemoryProducts {
    async fn by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        Ok(page_slice(&rows, page))
    }

    async fn list_by_sub_category(
        &self,
        sub_category_id: SubCategoryId,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let matching: Vec<Product> = rows
            .iter()
            .filter(|p| p.sub_category_id == sub_category_id)
            .cloned()
            .collect();
        Ok(page_slice(&matching, page))
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let needle = query.to_lowercase();
        let matching: Vec<Product> = rows
            .iter()
            .filter(|p| p.description.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(page_slice(&matching, page))
    }

    async fn list_in_offers(&self, page: Page) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.rows.lock().unwrap();
        let matching: Vec<Product> = rows.iter().filter(|p| p.offer_id.is_some()).cloned().collect();
        Ok(page_slice(&matching, page))
    }

    async fn filter(
        &self,
        filter: &ValidatedFilter,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError> {
        let criteria = filter.criteria();
        let rows = self.rows.lock().unwrap();
        let matching: Vec<Product> = rows
            .iter()
            .filter(|p| {
                criteria.brand_id.is_none_or(|b| p.brand_id == b)
                    && criteria
                        .sub_category_id
                        .is_none_or(|s| p.sub_category_id == s)
                    && criteria.min_price.is_none_or(|min| p.price >= min)
                    && criteria.max_price.is_none_or(|max| p.price <= max)
            })
            .cloned()
            .collect();
        Ok(page_slice(&matching, page))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() < before)
    }
}

// =============================================================================
// Attributes
// =============================================================================

#[derive(Default)]
pub struct MemoryAttributes {
    inner: Mutex<AttributesInner>,
}

#[derive(Default)]
struct AttributesInner {
    next_id: i64,
    defs: Vec<AttributeDefinition>,
    edges: Vec<(ProductId, AttributeId, String)>,
}

impl MemoryAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a definition directly.
    pub fn seed(&self, name: &str, sub_category_id: i64) -> AttributeId {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = AttributeId::from(inner.next_id);
        inner.defs.push(AttributeDefinition {
            id,
            name: name.to_owned(),
            sub_category_id: SubCategoryId::from(sub_category_id),
        });
        id
    }
}

#[async_trait]
impl AttributeStore for MemoryAttributes {
    async fn by_id(
        &self,
        id: AttributeId,
    ) -> Result<Option<AttributeDefinition>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.defs.iter().find(|d| d.id == id).cloned())
    }

    async fn by_name(&self, name: &str) -> Result<Option<AttributeDefinition>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.defs.iter().find(|d| d.name == name).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<AttributeDefinition>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        let defs = inner.defs.clone();
        Ok(page_slice(&defs, page))
    }

    async fn insert(
        &self,
        name: &str,
        sub_category_id: SubCategoryId,
    ) -> Result<AttributeDefinition, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.defs.iter().any(|d| d.name == name) {
            return Err(RepositoryError::Conflict("name".to_owned()));
        }
        inner.next_id += 1;
        let def = AttributeDefinition {
            id: AttributeId::from(inner.next_id),
            name: name.to_owned(),
            sub_category_id,
        };
        inner.defs.push(def.clone());
        Ok(def)
    }

    async fn delete(&self, id: AttributeId) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.defs.len();
        inner.defs.retain(|d| d.id != id);
        inner.edges.retain(|(_, a, _)| *a != id);
        Ok(inner.defs.len() < before)
    }

    async fn attach(
        &self,
        product_id: ProductId,
        attribute_id: AttributeId,
        value: &str,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner
            .edges
            .iter()
            .any(|(p, a, _)| *p == product_id && *a == attribute_id)
        {
            return Err(RepositoryError::Conflict("product_attributes".to_owned()));
        }
        inner.edges.push((product_id, attribute_id, value.to_owned()));
        Ok(())
    }

    async fn detach(
        &self,
        product_id: ProductId,
        attribute_id: AttributeId,
    ) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.edges.len();
        inner
            .edges
            .retain(|(p, a, _)| !(*p == product_id && *a == attribute_id));
        Ok(inner.edges.len() < before)
    }
}

// =============================================================================
// Favorites
// =============================================================================

pub struct MemoryFavorites {
    catalog: Vec<Product>,
    edges: Mutex<HashSet<(UserId, ProductId)>>,
}

impl MemoryFavorites {
    /// The fake joins its listing against this catalog snapshot.
    pub fn over(catalog: Vec<Product>) -> Self {
        Self {
            catalog,
            edges: Mutex::new(HashSet::new()),
        }
    }

    pub fn contains_edge(&self, user_id: UserId, product_id: ProductId) -> bool {
        self.edges.lock().unwrap().contains(&(user_id, product_id))
    }
}

#[async_trait]
impl FavoriteStore for MemoryFavorites {
    async fn contains(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.contains_edge(user_id, product_id))
    }

    async fn insert(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<(), RepositoryError> {
        let mut edges = self.edges.lock().unwrap();
        if !edges.insert((user_id, product_id)) {
            return Err(RepositoryError::Conflict("favorites".to_owned()));
        }
        Ok(())
    }

    async fn remove(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.edges.lock().unwrap().remove(&(user_id, product_id)))
    }

    async fn list_products(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Product>, RepositoryError> {
        let edges = self.edges.lock().unwrap();
        let favorites: Vec<Product> = self
            .catalog
            .iter()
            .filter(|p| edges.contains(&(user_id, p.id)))
            .cloned()
            .collect();
        Ok(page_slice(&favorites, page))
    }
}

// =============================================================================
// Reviews
// =============================================================================

#[derive(Default)]
pub struct MemoryReviews {
    inner: Mutex<ReviewsInner>,
}

#[derive(Default)]
struct ReviewsInner {
    next_id: i64,
    rows: Vec<Review>,
}

impl MemoryReviews {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewStore for MemoryReviews {
    async fn by_id(&self, id: ReviewId) -> Result<Option<Review>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(
        &self,
        user_id: UserId,
        product_id: ProductId,
        rating: i32,
        text: &str,
    ) -> Result<Review, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let review = Review {
            id: ReviewId::from(inner.next_id),
            user_id,
            product_id,
            rating,
            text: text.to_owned(),
            created_at: Utc::now(),
        };
        inner.rows.push(review.clone());
        Ok(review)
    }

    async fn update(&self, edit: &ReviewEdit, author: UserId) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        match inner
            .rows
            .iter_mut()
            .find(|r| r.id == edit.id && r.user_id == author)
        {
            Some(review) => {
                review.rating = edit.rating;
                review.text.clone_from(&edit.text);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ReviewId) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Review>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        let rows: Vec<Review> = inner
            .rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        Ok(page_slice(&rows, page))
    }
}

// =============================================================================
// Orders
// =============================================================================

pub struct MemoryOrders {
    rows: Vec<Order>,
}

impl MemoryOrders {
    pub fn with(rows: Vec<Order>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl OrderStore for MemoryOrders {
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut rows: Vec<Order> = self
            .rows
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page_slice(&rows, page))
    }
}
