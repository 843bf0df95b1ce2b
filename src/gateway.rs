//! Remote gateway over the inventory backend.
//!
//! One HTTP request per operation, JSON both ways. No retry, no backoff,
//! no request timeout: a failed call surfaces as a `GatewayError` and the
//! caller keeps whatever state it already had.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GatewayError, Result};
use crate::filters::FilterSelection;
use crate::model::{AdminOutcome, Product, ReportSummary};

/// New-product payload for `POST /api/products`.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    pub price: f64,
    pub quantity: i64,
}

/// Edit payload for `PUT /api/products/{id}` - same fields minus quantity,
/// which only moves through stock transactions.
#[derive(Debug, Clone, Serialize)]
pub struct ProductUpdate {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    pub price: f64,
}

/// Stock movement payload for `POST /api/stock/{in,out}`.
#[derive(Debug, Clone, Serialize)]
pub struct StockMovement {
    pub product_id: i64,
    pub quantity: i64,
    pub notes: String,
}

/// One method per backend operation. The dashboard coordinator is written
/// against this trait so tests can count calls without a server.
pub trait Gateway {
    fn list_products(&self, filter: &FilterSelection) -> Result<Vec<Product>>;
    fn create_product(&self, draft: &ProductDraft) -> Result<()>;
    fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<()>;
    fn delete_product(&self, id: i64) -> Result<()>;
    fn stock_in(&self, movement: &StockMovement) -> Result<()>;
    fn stock_out(&self, movement: &StockMovement) -> Result<()>;
    fn alerts(&self) -> Result<Vec<Product>>;
    fn report_summary(&self) -> Result<ReportSummary>;
    fn categories(&self) -> Result<Vec<String>>;
    fn brands(&self) -> Result<Vec<String>>;
    fn subcategories(&self, category: Option<&str>) -> Result<Vec<String>>;
    fn seed(&self) -> Result<AdminOutcome>;
    fn cleanup_duplicates(&self) -> Result<AdminOutcome>;
    fn clear_all_products(&self) -> Result<AdminOutcome>;
    /// Download `GET /api/reports/export-csv` into `dir` and return the
    /// written path. The body is opaque bytes to this layer.
    fn download_report_csv(&self, dir: &Path) -> Result<PathBuf>;
}

/// Blocking reqwest implementation against a same-origin style base URL.
pub struct HttpGateway {
    base_url: String,
    client: reqwest::blocking::Client,
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::blocking::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        let response = self.client.get(format!("{}{}", self.base_url, path)).send()?;
        handle_response(response)
    }

    fn post_checked<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        tracing::debug!(path, "POST");
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()?;
        expect_success(response)
    }

    fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "POST");
        let response = self.client.post(format!("{}{}", self.base_url, path)).send()?;
        handle_response(response)
    }

    fn put_checked<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        tracing::debug!(path, "PUT");
        let response = self
            .client
            .put(format!("{}{}", self.base_url, path))
            .json(body)
            .send()?;
        expect_success(response)
    }
}

impl Gateway for HttpGateway {
    fn list_products(&self, filter: &FilterSelection) -> Result<Vec<Product>> {
        self.get(&products_path(filter))
    }

    fn create_product(&self, draft: &ProductDraft) -> Result<()> {
        self.post_checked("/api/products", draft)
    }

    fn update_product(&self, id: i64, update: &ProductUpdate) -> Result<()> {
        self.put_checked(&format!("/api/products/{id}"), update)
    }

    fn delete_product(&self, id: i64) -> Result<()> {
        tracing::debug!(id, "DELETE product");
        let response = self
            .client
            .delete(format!("{}/api/products/{id}", self.base_url))
            .send()?;
        expect_success(response)
    }

    fn stock_in(&self, movement: &StockMovement) -> Result<()> {
        self.post_checked("/api/stock/in", movement)
    }

    fn stock_out(&self, movement: &StockMovement) -> Result<()> {
        self.post_checked("/api/stock/out", movement)
    }

    fn alerts(&self) -> Result<Vec<Product>> {
        self.get("/api/alerts")
    }

    fn report_summary(&self) -> Result<ReportSummary> {
        self.get("/api/reports/summary")
    }

    fn categories(&self) -> Result<Vec<String>> {
        self.get("/api/categories")
    }

    fn brands(&self) -> Result<Vec<String>> {
        self.get("/api/brands")
    }

    fn subcategories(&self, category: Option<&str>) -> Result<Vec<String>> {
        self.get(&subcategories_path(category))
    }

    fn seed(&self) -> Result<AdminOutcome> {
        self.post_empty("/api/seed")
    }

    fn cleanup_duplicates(&self) -> Result<AdminOutcome> {
        self.post_empty("/api/cleanup-duplicates")
    }

    fn clear_all_products(&self) -> Result<AdminOutcome> {
        self.post_empty("/api/clear-all-products")
    }

    fn download_report_csv(&self, dir: &Path) -> Result<PathBuf> {
        let response = self
            .client
            .get(format!("{}/api/reports/export-csv", self.base_url))
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Api(format!(
                "export failed with status {status}"
            )));
        }
        let bytes = response.bytes()?;
        let path = dir.join("inventory_report.csv");
        fs::write(&path, &bytes)?;
        Ok(path)
    }
}

/// Product listing path with the current filter selections as query
/// parameters, empty selections omitted.
pub fn products_path(filter: &FilterSelection) -> String {
    let mut query = String::new();
    for (key, value) in filter.params() {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(key);
        query.push('=');
        query.push_str(&urlencoding::encode(value));
    }
    if query.is_empty() {
        "/api/products".to_string()
    } else {
        format!("/api/products?{query}")
    }
}

/// Subcategory listing path, optionally narrowed to one category.
pub fn subcategories_path(category: Option<&str>) -> String {
    match category {
        Some(category) if !category.is_empty() => {
            format!("/api/subcategories?category={}", urlencoding::encode(category))
        }
        _ => "/api/subcategories".to_string(),
    }
}

/// Parse a 2xx JSON body; map non-2xx to the server's `error` string when
/// the body carries one, else a generic status message.
fn handle_response<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(GatewayError::Api(error_message(&body, status)));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Like `handle_response` for operations where the success body is ignored.
fn expect_success(response: reqwest::blocking::Response) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text()?;
        return Err(GatewayError::Api(error_message(&body, status)));
    }
    Ok(())
}

fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| format!("request failed with status {status}"))
}
