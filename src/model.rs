use chrono::{DateTime, Local, NaiveDateTime};
use serde::Deserialize;

/// Quantity below which a product is flagged for replenishment.
/// Display constant only; the alerts endpoint applies the same cutoff.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Product record as returned by the backend. Never mutated locally;
/// every change goes through the gateway and is followed by a re-fetch.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    InStock,
    LowStock,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
        }
    }
}

impl Product {
    pub fn status(&self) -> StockStatus {
        if self.quantity < LOW_STOCK_THRESHOLD {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    pub fn price_display(&self) -> String {
        format_currency(self.price)
    }

    /// Optional fields render as a dash in tables.
    pub fn brand_display(&self) -> &str {
        match self.brand.as_deref() {
            Some(b) if !b.is_empty() => b,
            _ => "-",
        }
    }

    pub fn subcategory_display(&self) -> &str {
        match self.subcategory.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => "-",
        }
    }

    /// Label used by the stock-movement product pickers.
    pub fn picker_label(&self) -> String {
        format!("{} (Qty: {})", self.name, self.quantity)
    }

    /// Alert line annotated with the replenishment threshold.
    pub fn alert_detail(&self) -> String {
        format!(
            "Current stock: {} units (threshold {})",
            self.quantity, LOW_STOCK_THRESHOLD
        )
    }
}

/// Recorded stock movement, read-only to the client. Only appears inside
/// the report summary's recent-transaction feed.
#[derive(Debug, Deserialize, Clone)]
pub struct StockTransaction {
    pub product_id: i64,
    #[serde(default)]
    pub product_name: String,
    pub transaction_type: String,
    pub quantity: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl StockTransaction {
    pub fn is_inbound(&self) -> bool {
        self.transaction_type == "IN"
    }

    pub fn direction_label(&self) -> &'static str {
        if self.is_inbound() {
            "Stock In"
        } else {
            "Stock Out"
        }
    }

    pub fn direction_glyph(&self) -> &'static str {
        if self.is_inbound() {
            "↓"
        } else {
            "↑"
        }
    }

    /// Backend timestamps are SQLite `CURRENT_TIMESTAMP` text in UTC.
    /// Rendered in local time; unparsable values render verbatim.
    pub fn created_at_display(&self) -> String {
        match parse_backend_timestamp(&self.created_at) {
            Some(local) => local.format("%Y-%m-%d %H:%M").to_string(),
            None => self.created_at.clone(),
        }
    }
}

/// Per-category aggregate row from the report summary. The quantity and
/// value SUMs are nullable on the wire.
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryStat {
    pub category: String,
    pub count: i64,
    #[serde(default)]
    pub total_qty: Option<i64>,
    #[serde(default)]
    pub total_value: Option<f64>,
}

impl CategoryStat {
    pub fn total_qty_display(&self) -> i64 {
        self.total_qty.unwrap_or(0)
    }

    pub fn total_value_display(&self) -> String {
        format_currency(self.total_value.unwrap_or(0.0))
    }
}

/// Aggregate report, entirely derived server-side.
#[derive(Debug, Deserialize, Clone)]
pub struct ReportSummary {
    pub total_products: i64,
    pub total_value: f64,
    pub low_stock_count: i64,
    #[serde(default)]
    pub category_stats: Vec<CategoryStat>,
    #[serde(default)]
    pub recent_transactions: Vec<StockTransaction>,
}

impl ReportSummary {
    pub fn total_value_display(&self) -> String {
        format_currency(self.total_value)
    }
}

/// Result envelope of the administrative bulk endpoints.
#[derive(Debug, Deserialize, Clone)]
pub struct AdminOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AdminOutcome {
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or("Operation completed")
    }
}

pub fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

fn parse_backend_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S").ok()?;
    Some(naive.and_utc().with_timezone(&Local))
}
