//! The back-office facade.
//!
//! Owns one [`Collection`] per record kind plus the settings, all backed
//! by the same [`Store`]. Business operations compose collection CRUD
//! with the pure functions in `buildbook_finance`.

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;

use buildbook_finance::{finance_overview_at, invoice_from_quote, FinanceOverview};
use buildbook_records::{
    AppSettings, BankStatement, CalendarEvent, CisReturn, Contact, Document, Invoice,
    InvoiceStatus, Project, ProjectStatus, Quote, QuoteStatus, Receipt, Task, TaxReturn,
    Timesheet, VatReturn,
};
use buildbook_storage::{Database, Keyspace, StorageKey, Store, DEFAULT_QUOTA_BYTES};

use crate::collection::Collection;
use crate::config::Config;
use crate::Result;

pub struct Dashboard {
    store: Store,
    projects: Collection<Project>,
    invoices: Collection<Invoice>,
    quotes: Collection<Quote>,
    contacts: Collection<Contact>,
    tasks: Collection<Task>,
    documents: Collection<Document>,
    receipts: Collection<Receipt>,
    timesheets: Collection<Timesheet>,
    bank_statements: Collection<BankStatement>,
    vat_returns: Collection<VatReturn>,
    cis_returns: Collection<CisReturn>,
    tax_returns: Collection<TaxReturn>,
    calendar_events: Collection<CalendarEvent>,
    settings: Arc<RwLock<AppSettings>>,
}

impl Dashboard {
    /// Opens the database named by `config` and loads every collection.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path, config.quota_bytes)?;
        let dashboard = Self::with_store(Store::new(db, Keyspace::new(config.namespace.clone())));

        tracing::info!(path = %config.database_path.display(), "Dashboard opened");

        Ok(dashboard)
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory(DEFAULT_QUOTA_BYTES)?;
        Ok(Self::with_store(Store::new(db, Keyspace::default())))
    }

    /// Builds a dashboard over an existing store and loads it.
    pub fn with_store(store: Store) -> Self {
        let dashboard = Self {
            projects: Collection::new(store.clone()),
            invoices: Collection::new(store.clone()),
            quotes: Collection::new(store.clone()),
            contacts: Collection::new(store.clone()),
            tasks: Collection::new(store.clone()),
            documents: Collection::new(store.clone()),
            receipts: Collection::new(store.clone()),
            timesheets: Collection::new(store.clone()),
            bank_statements: Collection::new(store.clone()),
            vat_returns: Collection::new(store.clone()),
            cis_returns: Collection::new(store.clone()),
            tax_returns: Collection::new(store.clone()),
            calendar_events: Collection::new(store.clone()),
            settings: Arc::new(RwLock::new(AppSettings::default())),
            store,
        };
        dashboard.refresh_data();
        dashboard
    }

    /// Reloads every collection and the settings from storage.
    pub fn refresh_data(&self) {
        let records = self.projects.refresh()
            + self.invoices.refresh()
            + self.quotes.refresh()
            + self.contacts.refresh()
            + self.tasks.refresh()
            + self.documents.refresh()
            + self.receipts.refresh()
            + self.timesheets.refresh()
            + self.bank_statements.refresh()
            + self.vat_returns.refresh()
            + self.cis_returns.refresh()
            + self.tax_returns.refresh()
            + self.calendar_events.refresh();

        *self.settings.write() = self.store.read_singleton(StorageKey::Settings);

        tracing::info!(records, "Data loaded");
    }

    // === Collections ===

    pub fn projects(&self) -> &Collection<Project> {
        &self.projects
    }

    pub fn invoices(&self) -> &Collection<Invoice> {
        &self.invoices
    }

    pub fn quotes(&self) -> &Collection<Quote> {
        &self.quotes
    }

    pub fn contacts(&self) -> &Collection<Contact> {
        &self.contacts
    }

    pub fn tasks(&self) -> &Collection<Task> {
        &self.tasks
    }

    pub fn documents(&self) -> &Collection<Document> {
        &self.documents
    }

    pub fn receipts(&self) -> &Collection<Receipt> {
        &self.receipts
    }

    pub fn timesheets(&self) -> &Collection<Timesheet> {
        &self.timesheets
    }

    pub fn bank_statements(&self) -> &Collection<BankStatement> {
        &self.bank_statements
    }

    pub fn vat_returns(&self) -> &Collection<VatReturn> {
        &self.vat_returns
    }

    pub fn cis_returns(&self) -> &Collection<CisReturn> {
        &self.cis_returns
    }

    pub fn tax_returns(&self) -> &Collection<TaxReturn> {
        &self.tax_returns
    }

    pub fn calendar_events(&self) -> &Collection<CalendarEvent> {
        &self.calendar_events
    }

    // === Queries ===

    pub fn projects_by_status(&self, status: ProjectStatus) -> Vec<Project> {
        self.projects.filter(|p| p.status == status)
    }

    pub fn invoices_by_status(&self, status: InvoiceStatus) -> Vec<Invoice> {
        self.invoices.filter(|i| i.status == status)
    }

    pub fn tasks_by_project(&self, project_id: &str) -> Vec<Task> {
        self.tasks
            .filter(|t| t.project_id.as_deref() == Some(project_id))
    }

    pub fn documents_by_project(&self, project_id: &str) -> Vec<Document> {
        self.documents
            .filter(|d| d.project_id.as_deref() == Some(project_id))
    }

    pub fn receipts_by_project(&self, project_id: &str) -> Vec<Receipt> {
        self.receipts
            .filter(|r| r.project_id.as_deref() == Some(project_id))
    }

    pub fn timesheets_by_employee(&self, employee_id: &str) -> Vec<Timesheet> {
        self.timesheets.filter(|t| t.employee_id == employee_id)
    }

    pub fn events_by_project(&self, project_id: &str) -> Vec<CalendarEvent> {
        self.calendar_events
            .filter(|e| e.project_id.as_deref() == Some(project_id))
    }

    // === Settings ===

    pub fn settings(&self) -> AppSettings {
        self.settings.read().clone()
    }

    pub fn update_settings(&self, settings: AppSettings) -> Result<()> {
        self.store.write_singleton(StorageKey::Settings, &settings)?;
        *self.settings.write() = settings;

        tracing::info!("Settings updated");

        Ok(())
    }

    // === Business operations ===

    /// Turns an accepted quote into a draft invoice and links the two.
    ///
    /// Returns `Ok(None)` without writing anything when the quote is
    /// unknown or not accepted. Converting the same quote twice produces
    /// two invoices.
    pub fn convert_quote_to_invoice(&self, quote_id: &str) -> Result<Option<Invoice>> {
        let Some(mut quote) = self.quotes.get(quote_id) else {
            tracing::debug!(quote_id = %quote_id, "Quote not found, nothing to convert");
            return Ok(None);
        };

        if quote.status != QuoteStatus::Accepted {
            tracing::debug!(quote_id = %quote_id, status = %quote.status, "Quote not accepted, nothing to convert");
            return Ok(None);
        }

        let invoice = invoice_from_quote(&quote, Utc::now());
        self.invoices.add(invoice.clone())?;

        quote.converted_to_invoice = Some(invoice.id.clone());
        quote.status = QuoteStatus::Accepted;
        self.quotes.update(quote)?;

        tracing::info!(quote_id = %quote_id, invoice_id = %invoice.id, "Converted quote to invoice");

        Ok(Some(invoice))
    }

    pub fn finance_overview(&self) -> FinanceOverview {
        finance_overview_at(
            &self.invoices.list(),
            &self.receipts.list(),
            &self.projects.list(),
            Utc::now(),
        )
    }

    // === Backup ===

    pub fn export_data(&self) -> Result<String> {
        Ok(self.store.export_all()?)
    }

    /// Applies an export blob, then reloads every collection whether or
    /// not the import succeeded.
    pub fn import_data(&self, blob: &str) -> Result<()> {
        let result = self.store.import_all(blob);
        self.refresh_data();
        Ok(result?)
    }

    pub fn clear_all_data(&self) -> Result<()> {
        self.store.clear_all()?;
        self.refresh_data();
        Ok(())
    }

    pub fn last_sync(&self) -> Option<chrono::DateTime<Utc>> {
        self.store.last_sync()
    }
}
