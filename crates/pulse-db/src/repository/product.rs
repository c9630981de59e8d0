//! SurrealDB implementation of [`ProductRepository`].
//!
//! Deleting a product also deletes its reviews and reports. The three
//! DELETE statements run sequentially without a transaction, so a
//! failure mid-way can leave orphaned child records.

use chrono::{DateTime, Utc};
use pulse_core::error::PulseResult;
use pulse_core::models::product::{
    CreateProduct, ModerateProduct, Product, ProductStatus, UpdateProduct,
};
use pulse_core::repository::{PaginatedResult, Pagination, ProductRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error;

#[derive(Debug, SurrealValue)]
struct ProductRow {
    name: String,
    description: String,
    image: String,
    external_link: String,
    tags: Vec<String>,
    owner_name: String,
    owner_email: String,
    status: String,
    featured: bool,
    reported: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct ProductRowWithId {
    record_id: String,
    name: String,
    description: String,
    image: String,
    external_link: String,
    tags: Vec<String>,
    owner_name: String,
    owner_email: String,
    status: String,
    featured: bool,
    reported: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> PulseResult<ProductStatus> {
    match s {
        "Pending" => Ok(ProductStatus::Pending),
        "Accepted" => Ok(ProductStatus::Accepted),
        "Rejected" => Ok(ProductStatus::Rejected),
        other => Err(error::corrupt(format!("unknown product status: {other}"))),
    }
}

fn status_to_string(s: &ProductStatus) -> &'static str {
    match s {
        ProductStatus::Pending => "Pending",
        ProductStatus::Accepted => "Accepted",
        ProductStatus::Rejected => "Rejected",
    }
}

impl ProductRow {
    fn into_product(self, id: Uuid) -> PulseResult<Product> {
        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            image: self.image,
            external_link: self.external_link,
            tags: self.tags,
            owner_name: self.owner_name,
            owner_email: self.owner_email,
            status: parse_status(&self.status)?,
            featured: self.featured,
            reported: self.reported,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl ProductRowWithId {
    fn try_into_product(self) -> PulseResult<Product> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| error::corrupt(format!("invalid record id: {e}")))?;
        Ok(Product {
            id,
            name: self.name,
            description: self.description,
            image: self.image,
            external_link: self.external_link,
            tags: self.tags,
            owner_name: self.owner_name,
            owner_email: self.owner_email,
            status: parse_status(&self.status)?,
            featured: self.featured,
            reported: self.reported,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn rows_to_products(rows: Vec<ProductRowWithId>) -> PulseResult<Vec<Product>> {
    rows.into_iter().map(|row| row.try_into_product()).collect()
}

/// SurrealDB implementation of the Product repository.
#[derive(Clone)]
pub struct SurrealProductRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealProductRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn list_where(&self, condition: &str, email: Option<&str>) -> PulseResult<Vec<Product>> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM product \
             WHERE {condition} \
             ORDER BY created_at DESC",
        );

        let mut builder = self.db.query(&query);
        if let Some(email) = email {
            builder = builder.bind(("email", email.to_string()));
        }

        let mut result = builder.await.map_err(error::storage)?;
        let rows: Vec<ProductRowWithId> = result.take(0).map_err(error::storage)?;
        rows_to_products(rows)
    }

    async fn paginated_where(
        &self,
        condition: &str,
        tag: Option<&str>,
        pagination: Pagination,
    ) -> PulseResult<PaginatedResult<Product>> {
        let count_query =
            format!("SELECT count() AS total FROM product WHERE {condition} GROUP ALL");
        let mut count_builder = self.db.query(&count_query);
        if let Some(tag) = tag {
            count_builder = count_builder.bind(("tag", tag.to_string()));
        }
        let mut count_result = count_builder.await.map_err(error::storage)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(error::storage)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM product \
             WHERE {condition} \
             ORDER BY created_at DESC \
             LIMIT $limit START $offset",
        );
        let mut builder = self
            .db
            .query(&query)
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));
        if let Some(tag) = tag {
            builder = builder.bind(("tag", tag.to_string()));
        }

        let mut result = builder.await.map_err(error::storage)?;
        let rows: Vec<ProductRowWithId> = result.take(0).map_err(error::storage)?;

        Ok(PaginatedResult {
            items: rows_to_products(rows)?,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}

impl<C: Connection> ProductRepository for SurrealProductRepository<C> {
    async fn create(&self, input: CreateProduct) -> PulseResult<Product> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('product', $id) SET \
                 name = $name, \
                 description = $description, \
                 image = $image, \
                 external_link = $external_link, \
                 tags = $tags, \
                 owner_name = $owner_name, \
                 owner_email = $owner_email, \
                 status = 'Pending', \
                 featured = false, \
                 reported = false",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("description", input.description))
            .bind(("image", input.image))
            .bind(("external_link", input.external_link))
            .bind(("tags", input.tags))
            .bind(("owner_name", input.owner_name))
            .bind(("owner_email", input.owner_email))
            .await
            .map_err(error::storage)?;

        let mut result = result.check().map_err(error::storage)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("product", id_str))?;

        row.into_product(id)
    }

    async fn get_by_id(&self, id: Uuid) -> PulseResult<Product> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('product', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(error::storage)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("product", id_str))?;

        row.into_product(id)
    }

    async fn list_all(&self) -> PulseResult<Vec<Product>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM product")
            .await
            .map_err(error::storage)?;

        let rows: Vec<ProductRowWithId> = result.take(0).map_err(error::storage)?;
        rows_to_products(rows)
    }

    async fn list_accepted(&self, pagination: Pagination) -> PulseResult<PaginatedResult<Product>> {
        self.paginated_where("status = 'Accepted'", None, pagination)
            .await
    }

    async fn search_by_tag(
        &self,
        tag: &str,
        pagination: Pagination,
    ) -> PulseResult<PaginatedResult<Product>> {
        self.paginated_where("status = 'Accepted' AND tags CONTAINS $tag", Some(tag), pagination)
            .await
    }

    async fn list_by_owner(&self, email: &str) -> PulseResult<Vec<Product>> {
        self.list_where("owner_email = $email", Some(email)).await
    }

    async fn list_by_status(&self, status: ProductStatus) -> PulseResult<Vec<Product>> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM product \
             WHERE status = '{}' \
             ORDER BY created_at DESC",
            status_to_string(&status),
        );

        let mut result = self.db.query(&query).await.map_err(error::storage)?;
        let rows: Vec<ProductRowWithId> = result.take(0).map_err(error::storage)?;
        rows_to_products(rows)
    }

    async fn list_featured(&self) -> PulseResult<Vec<Product>> {
        // Exact match on both flags. A featured product that is not
        // accepted must never surface here.
        self.list_where("status = 'Accepted' AND featured = true", None)
            .await
    }

    async fn list_reported(&self) -> PulseResult<Vec<Product>> {
        self.list_where("reported = true", None).await
    }

    async fn update_details(&self, id: Uuid, input: UpdateProduct) -> PulseResult<Product> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.image.is_some() {
            sets.push("image = $image");
        }
        if input.external_link.is_some() {
            sets.push("external_link = $external_link");
        }
        if input.tags.is_some() {
            sets.push("tags = $tags");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('product', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(image) = input.image {
            builder = builder.bind(("image", image));
        }
        if let Some(external_link) = input.external_link {
            builder = builder.bind(("external_link", external_link));
        }
        if let Some(tags) = input.tags {
            builder = builder.bind(("tags", tags));
        }

        let result = builder.await.map_err(error::storage)?;
        let mut result = result.check().map_err(error::storage)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("product", id_str))?;

        row.into_product(id)
    }

    async fn moderate(&self, id: Uuid, input: ModerateProduct) -> PulseResult<Product> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.featured.is_some() {
            sets.push("featured = $featured");
        }
        if input.reported.is_some() {
            sets.push("reported = $reported");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('product', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(ref status) = input.status {
            builder = builder.bind(("status", status_to_string(status).to_string()));
        }
        if let Some(featured) = input.featured {
            builder = builder.bind(("featured", featured));
        }
        if let Some(reported) = input.reported {
            builder = builder.bind(("reported", reported));
        }

        let result = builder.await.map_err(error::storage)?;
        let mut result = result.check().map_err(error::storage)?;

        let rows: Vec<ProductRow> = result.take(0).map_err(error::storage)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| error::not_found("product", id_str))?;

        row.into_product(id)
    }

    async fn delete_cascade(&self, id: Uuid) -> PulseResult<()> {
        let id_str = id.to_string();

        // Product first, then children. Votes are left in place: their
        // rows no longer join to anything and tally as zero.
        self.db
            .query("DELETE type::record('product', $id)")
            .query("DELETE review WHERE product_id = $id")
            .query("DELETE report WHERE product_id = $id")
            .bind(("id", id_str))
            .await
            .map_err(error::storage)?
            .check()
            .map_err(error::storage)?;

        Ok(())
    }
}
