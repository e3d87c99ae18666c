//! Expenses tag service

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExpensesTag, ExpensesTagId, Identity};
use crate::storage::Storage;

use super::scope;

/// Service for expenses tag management
pub struct ExpensesTagService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpensesTagService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, identity: &Identity, name: &str) -> LedgerResult<ExpensesTag> {
        let tag = ExpensesTag::new(identity.user_id, name);
        tag.validate()?;

        let _guard = self.storage.write_guard()?;

        self.storage.expenses_tags.upsert(tag.clone())?;
        self.storage.expenses_tags.save()?;

        self.storage.log_create(
            identity.user_id,
            EntityType::ExpensesTag,
            tag.id.to_string(),
            Some(tag.name.clone()),
            &tag,
        )?;

        Ok(tag)
    }

    pub fn list(&self, identity: &Identity) -> LedgerResult<Vec<ExpensesTag>> {
        self.storage.expenses_tags.list_for_owner(identity.user_id)
    }

    pub fn get(&self, identity: &Identity, id: ExpensesTagId) -> LedgerResult<ExpensesTag> {
        scope::expenses_tag(self.storage, identity, id)
    }

    /// Find one of the caller's tags by name or ID
    pub fn find(&self, identity: &Identity, identifier: &str) -> LedgerResult<ExpensesTag> {
        if let Some(tag) = self
            .storage
            .expenses_tags
            .get_by_name(identity.user_id, identifier)?
        {
            return Ok(tag);
        }

        match identifier.parse::<ExpensesTagId>() {
            Ok(id) => self.get(identity, id),
            Err(_) => Err(LedgerError::expenses_tag_not_found(identifier)),
        }
    }

    pub fn rename(
        &self,
        identity: &Identity,
        id: ExpensesTagId,
        name: &str,
    ) -> LedgerResult<ExpensesTag> {
        let _guard = self.storage.write_guard()?;

        let before = scope::expenses_tag(self.storage, identity, id)?;
        let mut tag = before.clone();
        tag.rename(name);
        tag.validate()?;

        self.storage.expenses_tags.upsert(tag.clone())?;
        self.storage.expenses_tags.save()?;

        self.storage.log_update(
            identity.user_id,
            EntityType::ExpensesTag,
            tag.id.to_string(),
            Some(tag.name.clone()),
            &before,
            &tag,
        )?;

        Ok(tag)
    }

    /// Delete a tag that no month budget or expense is filed under
    pub fn delete(&self, identity: &Identity, id: ExpensesTagId) -> LedgerResult<ExpensesTag> {
        let _guard = self.storage.write_guard()?;

        let tag = scope::expenses_tag(self.storage, identity, id)?;

        self.storage.delete_expenses_tag(&tag)?;

        self.storage.log_delete(
            identity.user_id,
            EntityType::ExpensesTag,
            tag.id.to_string(),
            Some(tag.name.clone()),
            &tag,
        )?;

        Ok(tag)
    }
}
