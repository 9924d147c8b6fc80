use std::{fmt, sync::Arc};

use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

use crate::{
    BudgetStore, CatalogStore, EngineError, RecordStore, ResultEngine, store::SeaStore,
};

mod budgets;
mod catalog;
mod records;
mod reconcile;

pub use reconcile::ReconcileOutcome;

/// Entry point of every record, budget and catalog operation.
///
/// The engine owns no state besides its stores; each call is one sequential
/// unit of work for the given user.
pub struct Engine {
    records: Arc<dyn RecordStore>,
    budgets: Arc<dyn BudgetStore>,
    catalog: Arc<dyn CatalogStore>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

/// Fail with `Cancelled` once the caller gave up. Only called before the first
/// write of a command.
fn ensure_active(cancel: &CancellationToken) -> ResultEngine<()> {
    if cancel.is_cancelled() {
        return Err(EngineError::Cancelled);
    }
    Ok(())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    records: Option<Arc<dyn RecordStore>>,
    budgets: Option<Arc<dyn BudgetStore>>,
    catalog: Option<Arc<dyn CatalogStore>>,
}

impl EngineBuilder {
    /// Pass the required database. Every store is backed by it unless
    /// overridden afterwards.
    pub fn database(self, db: DatabaseConnection) -> EngineBuilder {
        let store = Arc::new(SeaStore::new(db));
        self.record_store(store.clone())
            .budget_store(store.clone())
            .catalog_store(store)
    }

    pub fn record_store(mut self, store: Arc<dyn RecordStore>) -> EngineBuilder {
        self.records = Some(store);
        self
    }

    pub fn budget_store(mut self, store: Arc<dyn BudgetStore>) -> EngineBuilder {
        self.budgets = Some(store);
        self
    }

    pub fn catalog_store(mut self, store: Arc<dyn CatalogStore>) -> EngineBuilder {
        self.catalog = Some(store);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            records: self.records.ok_or(EngineError::MissingStore("record"))?,
            budgets: self.budgets.ok_or(EngineError::MissingStore("budget"))?,
            catalog: self.catalog.ok_or(EngineError::MissingStore("catalog"))?,
        })
    }
}
