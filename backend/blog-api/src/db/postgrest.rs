/// PostgREST query-builder gateway
///
/// A thin client over the hosted store's REST interface. Queries are built
/// as filter/order/range parameter sets and executed with reqwest; rows are
/// passed through as raw JSON values, since handlers mostly relay store
/// payloads untouched.
use reqwest::{header, Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Errors from the store gateway
#[derive(Debug, Error)]
pub enum DbError {
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store error: {status} - {body}")]
    Api { status: StatusCode, body: String },

    #[error("unexpected store payload: {0}")]
    Decode(String),
}

/// Client for the hosted Postgres-via-REST backend
#[derive(Clone)]
pub struct Database {
    rest_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl Database {
    /// Create a client for the given project base URL and API key
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Start a query against a table
    pub fn from(&self, table: &str) -> Query {
        Query {
            db: self.clone(),
            table: table.to_string(),
            select: None,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    fn request(&self, method: Method, table: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
    }
}

/// A single table query under construction
pub struct Query {
    db: Database,
    table: String,
    select: Option<String>,
    filters: Vec<(String, String)>,
    order: Vec<String>,
    limit: Option<usize>,
    offset: Option<usize>,
}

impl Query {
    /// Restrict returned columns (PostgREST `select=` parameter)
    pub fn select(mut self, columns: &str) -> Self {
        self.select = Some(columns.to_string());
        self
    }

    /// Equality filter (`column=eq.value`)
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters.push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn order_asc(mut self, column: &str) -> Self {
        self.order.push(format!("{}.asc", column));
        self
    }

    pub fn order_desc(mut self, column: &str) -> Self {
        self.order.push(format!("{}.desc", column));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Query parameters in PostgREST wire form
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(select) = &self.select {
            params.push(("select".to_string(), select.clone()));
        }
        for (column, condition) in &self.filters {
            params.push((column.clone(), condition.clone()));
        }
        if !self.order.is_empty() {
            params.push(("order".to_string(), self.order.join(",")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params
    }

    /// Fetch all matching rows
    pub async fn fetch(self) -> Result<Vec<Value>, DbError> {
        let response = self
            .db
            .request(Method::GET, &self.table)
            .query(&self.params())
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch a single row, or `None` when no exact match exists
    ///
    /// Uses the PostgREST single-object representation; zero or multiple
    /// matches come back as 406 and map to `None`.
    pub async fn fetch_optional(self) -> Result<Option<Value>, DbError> {
        let response = self
            .db
            .request(Method::GET, &self.table)
            .query(&self.params())
            .header(header::ACCEPT, "application/vnd.pgrst.object+json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }
        let response = check_status(response).await?;
        Ok(Some(response.json().await?))
    }

    /// Exact row count for the current filters
    pub async fn count(self) -> Result<u64, DbError> {
        let response = self
            .db
            .request(Method::GET, &self.table)
            .query(&self.params())
            .header("Prefer", "count=exact")
            .send()
            .await?;

        let response = check_status(response).await?;
        let content_range = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| DbError::Decode("missing Content-Range header".to_string()))?;

        // Content-Range comes back as "0-9/42" (or "*/0" when empty).
        content_range
            .rsplit('/')
            .next()
            .and_then(|total| total.parse().ok())
            .ok_or_else(|| DbError::Decode(format!("unparseable Content-Range: {content_range}")))
    }

    /// Insert a row (no representation returned)
    pub async fn insert(self, row: &Value) -> Result<(), DbError> {
        let response = self
            .db
            .request(Method::POST, &self.table)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Update all rows matching the current filters
    pub async fn update(self, changes: &Value) -> Result<(), DbError> {
        let response = self
            .db
            .request(Method::PATCH, &self.table)
            .query(&self.params())
            .header("Prefer", "return=minimal")
            .json(changes)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Delete all rows matching the current filters
    pub async fn delete(self) -> Result<(), DbError> {
        let response = self
            .db
            .request(Method::DELETE, &self.table)
            .query(&self.params())
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DbError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    Err(DbError::Api { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> Database {
        Database::new("https://example.supabase.co/", "anon-key")
    }

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        assert_eq!(db().rest_url, "https://example.supabase.co/rest/v1");
    }

    #[test]
    fn params_follow_postgrest_wire_form() {
        let query = db()
            .from("posts")
            .select("*")
            .eq("category", "living")
            .eq("featured", "true")
            .order_desc("published_at")
            .limit(10)
            .offset(20);

        assert_eq!(
            query.params(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("category".to_string(), "eq.living".to_string()),
                ("featured".to_string(), "eq.true".to_string()),
                ("order".to_string(), "published_at.desc".to_string()),
                ("limit".to_string(), "10".to_string()),
                ("offset".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn multiple_order_columns_share_one_parameter() {
        let query = db()
            .from("guides")
            .order_desc("featured")
            .order_desc("published_at");

        let params = query.params();
        assert_eq!(
            params,
            vec![("order".to_string(), "featured.desc,published_at.desc".to_string())]
        );
    }
}
