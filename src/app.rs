//! Dashboard coordinator: active tab, modal dialogs, filter state, and the
//! dependent reloads that follow every mutating call.
//!
//! Everything rendered is a direct projection of the most recent successful
//! fetch; nothing is cached or mutated locally. The coordinator is generic
//! over [`Gateway`] so tests can count calls without a server.

use crate::error::GatewayError;
use crate::filters::FilterSelection;
use crate::gateway::{Gateway, ProductDraft, ProductUpdate, StockMovement};
use crate::model::{Product, ReportSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Products,
    Stock,
    Monitoring,
    Reports,
}

impl Tab {
    pub fn next(&self) -> Self {
        match self {
            Tab::Products => Tab::Stock,
            Tab::Stock => Tab::Monitoring,
            Tab::Monitoring => Tab::Reports,
            Tab::Reports => Tab::Products,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Tab::Products => Tab::Reports,
            Tab::Stock => Tab::Products,
            Tab::Monitoring => Tab::Stock,
            Tab::Reports => Tab::Monitoring,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Products => "Products",
            Tab::Stock => "Stock",
            Tab::Monitoring => "Monitoring",
            Tab::Reports => "Reports",
        }
    }
}

/// Which stock-movement form is being driven on the Stock tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockSide {
    In,
    Out,
}

impl StockSide {
    pub fn title(&self) -> &'static str {
        match self {
            StockSide::In => "Stock In",
            StockSide::Out => "Stock Out",
        }
    }
}

const PRODUCT_FIELD_LABELS: [&str; 6] =
    ["Name", "Brand", "Category", "Subcategory", "Price", "Quantity"];

/// Text-input state for the add/edit product dialogs. The edit variant has
/// no quantity field; quantity only moves through stock transactions.
#[derive(Debug, Clone)]
pub struct ProductForm {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    pub price: String,
    pub quantity: String,
    pub focus: usize,
    include_quantity: bool,
}

impl ProductForm {
    pub fn add() -> Self {
        Self {
            name: String::new(),
            brand: String::new(),
            category: String::new(),
            subcategory: String::new(),
            price: String::new(),
            quantity: String::new(),
            focus: 0,
            include_quantity: true,
        }
    }

    pub fn edit(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone().unwrap_or_default(),
            category: product.category.clone(),
            subcategory: product.subcategory.clone().unwrap_or_default(),
            price: product.price.to_string(),
            quantity: String::new(),
            focus: 0,
            include_quantity: false,
        }
    }

    pub fn field_count(&self) -> usize {
        if self.include_quantity {
            6
        } else {
            5
        }
    }

    pub fn labels(&self) -> &'static [&'static str] {
        &PRODUCT_FIELD_LABELS[..self.field_count()]
    }

    pub fn value(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.brand,
            2 => &self.category,
            3 => &self.subcategory,
            4 => &self.price,
            _ => &self.quantity,
        }
    }

    pub fn active_value_mut(&mut self) -> &mut String {
        match self.focus {
            0 => &mut self.name,
            1 => &mut self.brand,
            2 => &mut self.category,
            3 => &mut self.subcategory,
            4 => &mut self.price,
            _ => &mut self.quantity,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.field_count();
    }

    pub fn focus_previous(&mut self) {
        self.focus = if self.focus == 0 {
            self.field_count() - 1
        } else {
            self.focus - 1
        };
    }

    /// Required fields plus numeric parsing; JSON cannot carry NaN, so an
    /// unparsable price never reaches the wire.
    fn numbers(&self) -> Result<(f64, i64), String> {
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err("Please fill in name, category, and price".to_string());
        }
        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| "Please enter a valid price".to_string())?;
        let quantity: i64 = if self.quantity.trim().is_empty() {
            0
        } else {
            self.quantity
                .trim()
                .parse()
                .map_err(|_| "Please enter a whole-number quantity".to_string())?
        };
        Ok((price, quantity))
    }

    pub fn to_draft(&self) -> Result<ProductDraft, String> {
        let (price, quantity) = self.numbers()?;
        Ok(ProductDraft {
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            category: self.category.trim().to_string(),
            subcategory: self.subcategory.trim().to_string(),
            price,
            quantity,
        })
    }

    pub fn to_update(&self) -> Result<ProductUpdate, String> {
        let (price, _) = self.numbers()?;
        Ok(ProductUpdate {
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            category: self.category.trim().to_string(),
            subcategory: self.subcategory.trim().to_string(),
            price,
        })
    }
}

/// Edit dialog state: the product being edited plus its draft fields.
/// Created on open, dropped on close; ids cannot leak between products.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub product_id: i64,
    pub form: ProductForm,
}

/// One stock-movement form: product picker index, quantity, notes.
#[derive(Debug, Clone, Default)]
pub struct StockForm {
    pub selected: Option<usize>,
    pub quantity: String,
    pub notes: String,
    pub focus: usize,
}

impl StockForm {
    pub const FIELD_COUNT: usize = 3;

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Self::FIELD_COUNT;
    }

    pub fn focus_previous(&mut self) {
        self.focus = if self.focus == 0 {
            Self::FIELD_COUNT - 1
        } else {
            self.focus - 1
        };
    }

    /// Cycle the picker through "Select Product" and the product list.
    pub fn select_next_product(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = match self.selected {
            None => Some(0),
            Some(i) if i + 1 < len => Some(i + 1),
            Some(_) => None,
        };
    }

    pub fn select_previous_product(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = match self.selected {
            None => Some(len - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    pub fn clear_inputs(&mut self) {
        self.quantity.clear();
        self.notes.clear();
    }

    /// Client-side guard: a product must be picked and the quantity must be
    /// a positive integer, otherwise no request is issued at all.
    pub fn movement(&self, picker: &[Product]) -> Option<StockMovement> {
        let product = self.selected.and_then(|i| picker.get(i))?;
        let quantity: i64 = self.quantity.trim().parse().ok()?;
        if quantity <= 0 {
            return None;
        }
        Some(StockMovement {
            product_id: product.id,
            quantity,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Destructive actions that fire only after an explicit confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    DeleteProduct(i64),
    Seed,
    CleanupDuplicates,
    ClearAllProducts,
}

impl Confirm {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirm::DeleteProduct(_) => "Are you sure you want to delete this product?",
            Confirm::Seed => {
                "This will add 20 sample products to the database only if it is empty. Continue?"
            }
            Confirm::CleanupDuplicates => {
                "This will remove duplicate products (keeping the first occurrence of each product name). Continue?"
            }
            Confirm::ClearAllProducts => {
                "WARNING: This will delete ALL products and transactions from the database. This action cannot be undone. Are you sure you want to continue?"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Blocking message popup, the alert() counterpart. Any key dismisses.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// At most one dialog is open at a time; notices stack above it.
#[derive(Debug, Clone)]
pub enum Modal {
    None,
    AddProduct(ProductForm),
    EditProduct(EditSession),
    Confirm(Confirm),
}

pub struct App<G: Gateway> {
    gateway: G,
    pub tab: Tab,
    pub products: Vec<Product>,
    pub alerts: Vec<Product>,
    pub report: Option<ReportSummary>,
    pub picker_products: Vec<Product>,
    pub filters: FilterSelection,
    pub modal: Modal,
    pub notice: Option<Notice>,
    pub stock_in_form: StockForm,
    pub stock_out_form: StockForm,
    pub stock_focus: StockSide,
    pub selected: Option<usize>,
    pub searching: bool,
}

impl<G: Gateway> App<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            tab: Tab::Products,
            products: Vec::new(),
            alerts: Vec::new(),
            report: None,
            picker_products: Vec::new(),
            filters: FilterSelection::new(),
            modal: Modal::None,
            notice: None,
            stock_in_form: StockForm::default(),
            stock_out_form: StockForm::default(),
            stock_focus: StockSide::In,
            selected: None,
            searching: false,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Initial page load: product table plus all filter option lists.
    pub fn bootstrap(&mut self) {
        self.reload_products();
        self.reload_option_lists();
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    pub fn reload_products(&mut self) {
        match self.gateway.list_products(&self.filters) {
            Ok(products) => {
                self.products = products;
                self.selected = if self.products.is_empty() {
                    None
                } else {
                    Some(0)
                };
            }
            Err(err) => self.fail("loading products", err),
        }
    }

    /// Option lists only feed the filter selectors; a failed refresh is
    /// logged but keeps the stale options rather than interrupting the user.
    pub fn reload_option_lists(&mut self) {
        match self.gateway.categories() {
            Ok(options) => self.filters.category.set_options(options),
            Err(err) => tracing::error!(error = %err, "loading categories failed"),
        }
        match self.gateway.brands() {
            Ok(options) => self.filters.brand.set_options(options),
            Err(err) => tracing::error!(error = %err, "loading brands failed"),
        }
        self.reload_subcategories();
    }

    pub fn reload_subcategories(&mut self) {
        let category = self.filters.category.selected().map(str::to_string);
        match self.gateway.subcategories(category.as_deref()) {
            Ok(options) => self.filters.subcategory.set_options(options),
            Err(err) => tracing::error!(error = %err, "loading subcategories failed"),
        }
    }

    pub fn refresh_alerts(&mut self) {
        match self.gateway.alerts() {
            Ok(alerts) => self.alerts = alerts,
            Err(err) => self.fail("loading alerts", err),
        }
    }

    pub fn refresh_report(&mut self) {
        match self.gateway.report_summary() {
            Ok(summary) => self.report = Some(summary),
            Err(err) => self.fail("loading reports", err),
        }
    }

    /// Unfiltered product list for the stock pickers; both pickers reset to
    /// "Select Product" on refresh.
    pub fn reload_pickers(&mut self) {
        match self.gateway.list_products(&FilterSelection::new()) {
            Ok(products) => {
                self.picker_products = products;
                self.stock_in_form.selected = None;
                self.stock_out_form.selected = None;
            }
            Err(err) => self.fail("loading products", err),
        }
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    pub fn activate_tab(&mut self, tab: Tab) {
        self.tab = tab;
        match tab {
            Tab::Monitoring => self.refresh_alerts(),
            Tab::Reports => self.refresh_report(),
            Tab::Stock => self.reload_pickers(),
            Tab::Products => {}
        }
    }

    pub fn next_tab(&mut self) {
        self.activate_tab(self.tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.activate_tab(self.tab.previous());
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn cycle_category(&mut self) {
        self.filters.category.select_next();
        self.reload_subcategories();
        self.reload_products();
    }

    pub fn cycle_subcategory(&mut self) {
        self.filters.subcategory.select_next();
        self.reload_products();
    }

    pub fn cycle_brand(&mut self) {
        self.filters.brand.select_next();
        self.reload_products();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.reload_products();
    }

    pub fn start_search(&mut self) {
        self.searching = true;
    }

    pub fn push_search_char(&mut self, c: char) {
        self.filters.search.push(c);
    }

    pub fn backspace_search(&mut self) {
        self.filters.search.pop();
    }

    pub fn finish_search(&mut self) {
        self.searching = false;
        self.reload_products();
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.and_then(|i| self.products.get(i))
    }

    pub fn select_next(&mut self) {
        let len = self.products.len();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.selected = Some(i);
    }

    pub fn select_previous(&mut self) {
        let len = self.products.len();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
    }

    // ------------------------------------------------------------------
    // Modals
    // ------------------------------------------------------------------

    pub fn open_add_modal(&mut self) {
        self.modal = Modal::AddProduct(ProductForm::add());
    }

    pub fn open_edit_modal(&mut self) {
        if let Some(product) = self.selected_product() {
            self.modal = Modal::EditProduct(EditSession {
                product_id: product.id,
                form: ProductForm::edit(product),
            });
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::None;
    }

    pub fn edit_session_id(&self) -> Option<i64> {
        match &self.modal {
            Modal::EditProduct(session) => Some(session.product_id),
            _ => None,
        }
    }

    pub fn submit_add(&mut self) {
        let draft = match &self.modal {
            Modal::AddProduct(form) => form.to_draft(),
            _ => return,
        };
        match draft {
            Err(message) => self.notice = Some(Notice::error(message)),
            Ok(draft) => match self.gateway.create_product(&draft) {
                Ok(()) => {
                    self.modal = Modal::None;
                    self.notice = Some(Notice::info("Product added successfully!"));
                    self.reload_products();
                    self.reload_option_lists();
                }
                Err(err) => self.fail("adding product", err),
            },
        }
    }

    pub fn submit_edit(&mut self) {
        let payload = match &self.modal {
            Modal::EditProduct(session) => session
                .form
                .to_update()
                .map(|update| (session.product_id, update)),
            _ => return,
        };
        match payload {
            Err(message) => self.notice = Some(Notice::error(message)),
            Ok((id, update)) => match self.gateway.update_product(id, &update) {
                Ok(()) => {
                    self.modal = Modal::None;
                    self.notice = Some(Notice::info("Product updated successfully!"));
                    self.reload_products();
                    self.reload_option_lists();
                }
                Err(err) => self.fail("updating product", err),
            },
        }
    }

    // ------------------------------------------------------------------
    // Confirmation-gated actions
    // ------------------------------------------------------------------

    pub fn request_delete_selected(&mut self) {
        if let Some(product) = self.selected_product() {
            self.modal = Modal::Confirm(Confirm::DeleteProduct(product.id));
        }
    }

    pub fn request_admin(&mut self, action: Confirm) {
        self.modal = Modal::Confirm(action);
    }

    pub fn decline_pending(&mut self) {
        if matches!(self.modal, Modal::Confirm(_)) {
            self.modal = Modal::None;
        }
    }

    pub fn confirm_pending(&mut self) {
        let action = match &self.modal {
            Modal::Confirm(action) => *action,
            _ => return,
        };
        self.modal = Modal::None;
        match action {
            Confirm::DeleteProduct(id) => match self.gateway.delete_product(id) {
                Ok(()) => {
                    self.notice = Some(Notice::info("Product deleted successfully!"));
                    self.reload_products();
                }
                Err(err) => self.fail("deleting product", err),
            },
            Confirm::Seed => match self.gateway.seed() {
                Ok(outcome) => {
                    self.notice = Some(outcome_notice(&outcome));
                    if outcome.success {
                        self.reload_products();
                        self.reload_option_lists();
                    }
                }
                Err(err) => self.fail("loading sample products", err),
            },
            Confirm::CleanupDuplicates => match self.gateway.cleanup_duplicates() {
                Ok(outcome) => {
                    self.notice = Some(outcome_notice(&outcome));
                    if outcome.success {
                        self.reload_products();
                    }
                }
                Err(err) => self.fail("removing duplicates", err),
            },
            Confirm::ClearAllProducts => match self.gateway.clear_all_products() {
                Ok(outcome) => {
                    self.notice = Some(outcome_notice(&outcome));
                    if outcome.success {
                        self.reload_products();
                        self.reload_option_lists();
                    }
                }
                Err(err) => self.fail("clearing products", err),
            },
        }
    }

    // ------------------------------------------------------------------
    // Stock movements
    // ------------------------------------------------------------------

    pub fn submit_stock(&mut self, side: StockSide) {
        let form = match side {
            StockSide::In => &self.stock_in_form,
            StockSide::Out => &self.stock_out_form,
        };
        let Some(movement) = form.movement(&self.picker_products) else {
            self.notice = Some(Notice::error(
                "Please select a product and enter a valid quantity",
            ));
            return;
        };
        let result = match side {
            StockSide::In => self.gateway.stock_in(&movement),
            StockSide::Out => self.gateway.stock_out(&movement),
        };
        match result {
            Ok(()) => {
                let form = match side {
                    StockSide::In => &mut self.stock_in_form,
                    StockSide::Out => &mut self.stock_out_form,
                };
                form.clear_inputs();
                self.notice = Some(Notice::info(match side {
                    StockSide::In => "Stock added successfully!",
                    StockSide::Out => "Stock removed successfully!",
                }));
                self.reload_pickers();
            }
            Err(err) => match side {
                StockSide::In => self.fail("adding stock", err),
                StockSide::Out => self.fail("removing stock", err),
            },
        }
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    /// Terminal counterpart of navigating the CSV download link: save the
    /// response body next to the process.
    pub fn export_csv(&mut self) {
        let dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(err) => {
                self.fail("exporting report", GatewayError::Io(err));
                return;
            }
        };
        match self.gateway.download_report_csv(&dir) {
            Ok(path) => {
                self.notice = Some(Notice::info(format!("Report saved to {}", path.display())));
            }
            Err(err) => self.fail("exporting report", err),
        }
    }

    // ------------------------------------------------------------------
    // Notices
    // ------------------------------------------------------------------

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn fail(&mut self, context: &str, err: GatewayError) {
        tracing::error!(context, error = %err, "gateway call failed");
        let text = match err {
            GatewayError::Api(message) => format!("Error: {message}"),
            other => format!("Error {context}: {other}"),
        };
        self.notice = Some(Notice::error(text));
    }
}

fn outcome_notice(outcome: &crate::model::AdminOutcome) -> Notice {
    if outcome.success {
        Notice::info(outcome.text())
    } else {
        Notice::error(format!("Error: {}", outcome.text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::gateway::products_path;
    use crate::model::AdminOutcome;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    fn product(id: i64, name: &str, quantity: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            brand: Some("Acme".to_string()),
            category: "Tools".to_string(),
            subcategory: None,
            price: 9.99,
            quantity,
        }
    }

    /// Scripted gateway that records every call it receives.
    struct FakeGateway {
        calls: RefCell<Vec<String>>,
        products: Vec<Product>,
        fail_products: bool,
    }

    impl FakeGateway {
        fn new(products: Vec<Product>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                products,
                fail_products: false,
            }
        }

        fn failing_products(products: Vec<Product>) -> Self {
            Self {
                fail_products: true,
                ..Self::new(products)
            }
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }

        fn count(&self, prefix: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| c.starts_with(prefix))
                .count()
        }

        fn last_matching(&self, prefix: &str) -> Option<String> {
            self.calls
                .borrow()
                .iter()
                .rev()
                .find(|c| c.starts_with(prefix))
                .cloned()
        }
    }

    impl Gateway for FakeGateway {
        fn list_products(&self, filter: &FilterSelection) -> Result<Vec<Product>> {
            self.record(format!("list_products {}", products_path(filter)));
            if self.fail_products {
                return Err(GatewayError::Api("backend down".to_string()));
            }
            Ok(self.products.clone())
        }

        fn create_product(&self, _draft: &ProductDraft) -> Result<()> {
            self.record("create_product");
            Ok(())
        }

        fn update_product(&self, id: i64, _update: &ProductUpdate) -> Result<()> {
            self.record(format!("update_product {id}"));
            Ok(())
        }

        fn delete_product(&self, id: i64) -> Result<()> {
            self.record(format!("delete_product {id}"));
            Ok(())
        }

        fn stock_in(&self, movement: &StockMovement) -> Result<()> {
            self.record(format!("stock_in {} {}", movement.product_id, movement.quantity));
            Ok(())
        }

        fn stock_out(&self, movement: &StockMovement) -> Result<()> {
            self.record(format!("stock_out {} {}", movement.product_id, movement.quantity));
            Ok(())
        }

        fn alerts(&self) -> Result<Vec<Product>> {
            self.record("alerts");
            Ok(self
                .products
                .iter()
                .filter(|p| p.quantity < crate::model::LOW_STOCK_THRESHOLD)
                .cloned()
                .collect())
        }

        fn report_summary(&self) -> Result<ReportSummary> {
            self.record("report_summary");
            Ok(ReportSummary {
                total_products: self.products.len() as i64,
                total_value: 0.0,
                low_stock_count: 0,
                category_stats: Vec::new(),
                recent_transactions: Vec::new(),
            })
        }

        fn categories(&self) -> Result<Vec<String>> {
            self.record("categories");
            Ok(vec!["Tools".to_string(), "Toys".to_string()])
        }

        fn brands(&self) -> Result<Vec<String>> {
            self.record("brands");
            Ok(vec!["Acme".to_string()])
        }

        fn subcategories(&self, category: Option<&str>) -> Result<Vec<String>> {
            self.record(format!("subcategories {}", category.unwrap_or("-")));
            Ok(vec!["Hammers".to_string()])
        }

        fn seed(&self) -> Result<AdminOutcome> {
            self.record("seed");
            Ok(AdminOutcome {
                success: true,
                message: Some("20 sample products added successfully".to_string()),
                error: None,
            })
        }

        fn cleanup_duplicates(&self) -> Result<AdminOutcome> {
            self.record("cleanup_duplicates");
            Ok(AdminOutcome {
                success: true,
                message: Some("2 duplicate products removed".to_string()),
                error: None,
            })
        }

        fn clear_all_products(&self) -> Result<AdminOutcome> {
            self.record("clear_all_products");
            Ok(AdminOutcome {
                success: true,
                message: Some("All products cleared".to_string()),
                error: None,
            })
        }

        fn download_report_csv(&self, dir: &Path) -> Result<PathBuf> {
            self.record("download_report_csv");
            Ok(dir.join("inventory_report.csv"))
        }
    }

    fn app_with(products: Vec<Product>) -> App<FakeGateway> {
        let mut app = App::new(FakeGateway::new(products));
        app.bootstrap();
        app
    }

    #[test]
    fn test_bootstrap_loads_products_and_option_lists() {
        let app = app_with(vec![product(1, "Widget", 5)]);
        assert_eq!(app.gateway().count("list_products"), 1);
        assert_eq!(app.gateway().count("categories"), 1);
        assert_eq!(app.gateway().count("brands"), 1);
        assert_eq!(app.gateway().count("subcategories"), 1);
        assert_eq!(app.products.len(), 1);
        assert_eq!(app.selected, Some(0));
    }

    #[test]
    fn test_stock_in_rejected_without_product() {
        let mut app = app_with(vec![product(1, "Widget", 5)]);
        app.activate_tab(Tab::Stock);
        app.stock_in_form.quantity = "5".to_string();
        app.submit_stock(StockSide::In);
        assert_eq!(app.gateway().count("stock_in"), 0);
        assert!(matches!(
            app.notice,
            Some(Notice {
                kind: NoticeKind::Error,
                ..
            })
        ));
    }

    #[test]
    fn test_stock_in_rejected_for_zero_or_garbage_quantity() {
        let mut app = app_with(vec![product(1, "Widget", 5)]);
        app.activate_tab(Tab::Stock);
        app.stock_in_form.selected = Some(0);

        app.stock_in_form.quantity = "0".to_string();
        app.submit_stock(StockSide::In);
        app.stock_in_form.quantity = "-3".to_string();
        app.submit_stock(StockSide::In);
        app.stock_in_form.quantity = "lots".to_string();
        app.submit_stock(StockSide::In);

        assert_eq!(app.gateway().count("stock_in"), 0);
    }

    #[test]
    fn test_stock_in_submits_and_clears_form() {
        let mut app = app_with(vec![product(7, "Widget", 5)]);
        app.activate_tab(Tab::Stock);
        app.stock_in_form.selected = Some(0);
        app.stock_in_form.quantity = "4".to_string();
        app.stock_in_form.notes = "restock".to_string();

        app.submit_stock(StockSide::In);

        assert_eq!(app.gateway().count("stock_in"), 1);
        assert_eq!(
            app.gateway().last_matching("stock_in"),
            Some("stock_in 7 4".to_string())
        );
        assert!(app.stock_in_form.quantity.is_empty());
        assert!(app.stock_in_form.notes.is_empty());
        // Pickers reloaded and reset
        assert_eq!(app.stock_in_form.selected, None);
    }

    #[test]
    fn test_declined_delete_issues_no_request() {
        let mut app = app_with(vec![product(1, "Widget", 5), product(2, "Gadget", 20)]);
        let before = app.products.clone();

        app.request_delete_selected();
        assert!(matches!(app.modal, Modal::Confirm(Confirm::DeleteProduct(1))));
        app.decline_pending();

        assert_eq!(app.gateway().count("delete_product"), 0);
        assert_eq!(app.products, before);
        assert!(matches!(app.modal, Modal::None));
    }

    #[test]
    fn test_confirmed_delete_fires_and_reloads() {
        let mut app = app_with(vec![product(1, "Widget", 5)]);
        app.request_delete_selected();
        app.confirm_pending();

        assert_eq!(app.gateway().count("delete_product"), 1);
        // bootstrap + post-delete reload
        assert_eq!(app.gateway().count("list_products"), 2);
    }

    #[test]
    fn test_edit_session_cleared_on_close() {
        let mut app = app_with(vec![product(7, "Widget", 5), product(9, "Gadget", 20)]);

        app.open_edit_modal();
        assert_eq!(app.edit_session_id(), Some(7));

        app.close_modal();
        assert_eq!(app.edit_session_id(), None);

        app.select_next();
        app.open_edit_modal();
        assert_eq!(app.edit_session_id(), Some(9));
    }

    #[test]
    fn test_edit_form_prefills_without_quantity_field() {
        let mut app = app_with(vec![product(7, "Widget", 5)]);
        app.open_edit_modal();
        let Modal::EditProduct(session) = &app.modal else {
            panic!("edit modal should be open");
        };
        assert_eq!(session.form.name, "Widget");
        assert_eq!(session.form.brand, "Acme");
        assert_eq!(session.form.field_count(), 5);
    }

    #[test]
    fn test_clear_filters_refetches_unfiltered() {
        let mut app = app_with(vec![product(1, "Widget", 5)]);
        app.filters.search = "widget".to_string();
        app.cycle_brand();
        assert!(app
            .gateway()
            .last_matching("list_products")
            .unwrap()
            .contains('?'));

        app.clear_filters();

        assert_eq!(
            app.gateway().last_matching("list_products"),
            Some("list_products /api/products".to_string())
        );
        assert!(app.filters.is_empty());
        assert!(app.filters.subcategory.options().is_empty());
    }

    #[test]
    fn test_category_change_narrows_subcategory_query() {
        let mut app = app_with(vec![product(1, "Widget", 5)]);
        app.cycle_category();
        assert_eq!(
            app.gateway().last_matching("subcategories"),
            Some("subcategories Tools".to_string())
        );
        assert!(app
            .gateway()
            .last_matching("list_products")
            .unwrap()
            .contains("category=Tools"));
    }

    #[test]
    fn test_failed_fetch_keeps_previous_snapshot() {
        let mut app = App::new(FakeGateway::new(vec![product(1, "Widget", 5)]));
        app.bootstrap();
        let before = app.products.clone();

        app.gateway = FakeGateway::failing_products(Vec::new());
        app.reload_products();

        assert_eq!(app.products, before);
        assert!(matches!(
            app.notice,
            Some(Notice {
                kind: NoticeKind::Error,
                ..
            })
        ));
    }

    #[test]
    fn test_tab_activation_triggers_loads() {
        let mut app = app_with(vec![product(1, "Widget", 5)]);
        app.activate_tab(Tab::Monitoring);
        assert_eq!(app.gateway().count("alerts"), 1);
        app.activate_tab(Tab::Reports);
        assert_eq!(app.gateway().count("report_summary"), 1);
        app.activate_tab(Tab::Stock);
        // bootstrap + picker load
        assert_eq!(app.gateway().count("list_products"), 2);
    }

    #[test]
    fn test_create_triggers_dependent_reloads() {
        let mut app = app_with(vec![product(1, "Widget", 5)]);
        app.open_add_modal();
        if let Modal::AddProduct(form) = &mut app.modal {
            form.name = "Hammer".to_string();
            form.category = "Tools".to_string();
            form.price = "12.50".to_string();
        }

        app.submit_add();

        assert_eq!(app.gateway().count("create_product"), 1);
        assert_eq!(app.gateway().count("list_products"), 2);
        assert_eq!(app.gateway().count("categories"), 2);
        assert_eq!(app.gateway().count("brands"), 2);
        assert!(matches!(app.modal, Modal::None));
        assert!(matches!(
            app.notice,
            Some(Notice {
                kind: NoticeKind::Info,
                ..
            })
        ));
    }

    #[test]
    fn test_add_form_rejects_bad_price_without_request() {
        let mut app = app_with(vec![product(1, "Widget", 5)]);
        app.open_add_modal();
        if let Modal::AddProduct(form) = &mut app.modal {
            form.name = "Hammer".to_string();
            form.category = "Tools".to_string();
            form.price = "twelve".to_string();
        }

        app.submit_add();

        assert_eq!(app.gateway().count("create_product"), 0);
        assert!(matches!(app.modal, Modal::AddProduct(_)));
    }

    #[test]
    fn test_admin_actions_gated_on_confirmation() {
        let mut app = app_with(vec![product(1, "Widget", 5)]);

        app.request_admin(Confirm::Seed);
        app.decline_pending();
        assert_eq!(app.gateway().count("seed"), 0);

        app.request_admin(Confirm::Seed);
        app.confirm_pending();
        assert_eq!(app.gateway().count("seed"), 1);
        assert_eq!(
            app.notice.as_ref().map(|n| n.text.as_str()),
            Some("20 sample products added successfully")
        );
    }

    #[test]
    fn test_update_sends_session_product_id() {
        let mut app = app_with(vec![product(7, "Widget", 5)]);
        app.open_edit_modal();
        app.submit_edit();

        assert_eq!(
            app.gateway().last_matching("update_product"),
            Some("update_product 7".to_string())
        );
        assert_eq!(app.edit_session_id(), None);
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app_with(vec![product(1, "Widget", 5), product(2, "Gadget", 20)]);
        assert_eq!(app.selected, Some(0));
        app.select_next();
        assert_eq!(app.selected, Some(1));
        app.select_next();
        assert_eq!(app.selected, Some(0));
        app.select_previous();
        assert_eq!(app.selected, Some(1));
    }
}
