//! The shared shape of every stored record kind.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The thirteen collections the back office persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Projects,
    Invoices,
    Quotes,
    Contacts,
    Tasks,
    Documents,
    Receipts,
    Timesheets,
    BankStatements,
    VatReturns,
    CisReturns,
    TaxReturns,
    CalendarEvents,
}

impl EntityKind {
    /// Every kind, in export order.
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Projects,
        EntityKind::Invoices,
        EntityKind::Quotes,
        EntityKind::Contacts,
        EntityKind::Tasks,
        EntityKind::Documents,
        EntityKind::Receipts,
        EntityKind::Timesheets,
        EntityKind::BankStatements,
        EntityKind::VatReturns,
        EntityKind::CisReturns,
        EntityKind::TaxReturns,
        EntityKind::CalendarEvents,
    ];

    /// Suffix of the storage key. These names are part of the on-disk
    /// layout and must never change.
    pub fn storage_name(&self) -> &'static str {
        match self {
            EntityKind::Projects => "projects",
            EntityKind::Invoices => "invoices",
            EntityKind::Quotes => "quotes",
            EntityKind::Contacts => "contacts",
            EntityKind::Tasks => "tasks",
            EntityKind::Documents => "documents",
            EntityKind::Receipts => "receipts",
            EntityKind::Timesheets => "timesheets",
            EntityKind::BankStatements => "bank_statements",
            EntityKind::VatReturns => "vat_returns",
            EntityKind::CisReturns => "cis_returns",
            EntityKind::TaxReturns => "tax_returns",
            EntityKind::CalendarEvents => "calendar_events",
        }
    }

    /// Field name used in export blobs.
    pub fn export_field(&self) -> &'static str {
        match self {
            EntityKind::Projects => "projects",
            EntityKind::Invoices => "invoices",
            EntityKind::Quotes => "quotes",
            EntityKind::Contacts => "contacts",
            EntityKind::Tasks => "tasks",
            EntityKind::Documents => "documents",
            EntityKind::Receipts => "receipts",
            EntityKind::Timesheets => "timesheets",
            EntityKind::BankStatements => "bankStatements",
            EntityKind::VatReturns => "vatReturns",
            EntityKind::CisReturns => "cisReturns",
            EntityKind::TaxReturns => "taxReturns",
            EntityKind::CalendarEvents => "calendarEvents",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.storage_name())
    }
}

/// A record stored in one of the [`EntityKind`] collections.
///
/// `id` is minted by the caller and never changes. `updated_at` is
/// restamped through [`Entity::touch`] whenever an existing record is
/// replaced.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    fn touch(&mut self, now: DateTime<Utc>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_storage_names_are_unique() {
        let names: HashSet<_> = EntityKind::ALL.iter().map(|k| k.storage_name()).collect();
        assert_eq!(names.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_export_fields_are_camel_case() {
        assert_eq!(EntityKind::BankStatements.export_field(), "bankStatements");
        assert_eq!(EntityKind::CalendarEvents.export_field(), "calendarEvents");
        assert_eq!(EntityKind::VatReturns.storage_name(), "vat_returns");
        for kind in EntityKind::ALL {
            assert!(!kind.export_field().contains('_'));
        }
    }
}
