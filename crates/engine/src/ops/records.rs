use tokio_util::sync::CancellationToken;

use crate::{
    CreateRecordCmd, Currency, EngineError, Money, Note, Record, RecordId, RecordQuery,
    ResultEngine, UpdateRecordCmd, YearMonth, util::ensure_user_id,
};

use super::{Engine, ensure_active};

impl Engine {
    /// Return a record owned by `user_id`.
    pub async fn record(&self, record_id: RecordId, user_id: &str) -> ResultEngine<Record> {
        self.records
            .get_by_id(record_id, user_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("record {record_id}")))
    }

    /// List the records of one month, optionally restricted to a subcategory.
    pub async fn list_records(&self, query: &RecordQuery) -> ResultEngine<Vec<Record>> {
        ensure_user_id(&query.user_id)?;
        let month = YearMonth::new(query.year, query.month)?;
        match query.subcategory_id {
            Some(subcategory_id) => {
                self.records
                    .get_by_subcategory_and_month(&query.user_id, subcategory_id, month)
                    .await
            }
            None => {
                self.records
                    .get_by_user_and_month(&query.user_id, month)
                    .await
            }
        }
    }

    /// Create a record and reconcile the budget of its month, if any.
    pub async fn create_record(
        &self,
        cmd: CreateRecordCmd,
        cancel: &CancellationToken,
    ) -> ResultEngine<RecordId> {
        let amount = Money::new(cmd.amount, &cmd.currency)?;
        let description = Note::new(&cmd.description)?;

        let category = self
            .catalog
            .category_by_id(cmd.category_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("category {}", cmd.category_id)))?;
        let subcategory = self
            .catalog
            .subcategory_by_id(cmd.subcategory_id)
            .await?
            .ok_or_else(|| {
                EngineError::KeyNotFound(format!("subcategory {}", cmd.subcategory_id))
            })?;

        let record = Record::create(
            &cmd.user_id,
            amount,
            category,
            subcategory,
            cmd.occurred_at,
            description,
        )?;
        let month = record.month()?;

        ensure_active(cancel)?;
        self.records.add(&record).await?;
        tracing::debug!(user_id = %cmd.user_id, record_id = %record.id(), "record created");

        self.reconcile_budget(record.user_id(), record.subcategory().id(), month)
            .await?;
        Ok(record.id())
    }

    /// Edit amount and/or description of a record.
    ///
    /// The budget of the record's (unchanged) subcategory and month is
    /// reconciled afterwards.
    pub async fn update_record(
        &self,
        cmd: UpdateRecordCmd,
        cancel: &CancellationToken,
    ) -> ResultEngine<()> {
        let mut record = self.record(cmd.record_id, &cmd.user_id).await?;

        if cmd.amount.is_some() || cmd.currency.is_some() {
            let amount = cmd.amount.unwrap_or_else(|| record.amount().amount());
            let currency = match cmd.currency.as_deref() {
                Some(code) => Currency::new(code)?,
                None => record.amount().currency().clone(),
            };
            record.update_amount(Money::from_parts(amount, currency))?;
        }
        if let Some(description) = cmd.description.as_deref() {
            record.update_description(Note::new(description)?);
        }
        let month = record.month()?;

        ensure_active(cancel)?;
        self.records.update(&record).await?;
        tracing::debug!(user_id = %cmd.user_id, record_id = %record.id(), "record updated");

        self.reconcile_budget(record.user_id(), record.subcategory().id(), month)
            .await?;
        Ok(())
    }

    /// Delete a record and reconcile the budget it contributed to.
    pub async fn delete_record(
        &self,
        record_id: RecordId,
        user_id: &str,
        cancel: &CancellationToken,
    ) -> ResultEngine<()> {
        let record = self.record(record_id, user_id).await?;
        let month = record.month()?;

        ensure_active(cancel)?;
        if !self.records.delete(record_id, user_id).await? {
            return Err(EngineError::KeyNotFound(format!("record {record_id}")));
        }
        tracing::debug!(user_id, %record_id, "record deleted");

        self.reconcile_budget(user_id, record.subcategory().id(), month)
            .await?;
        Ok(())
    }
}
