use super::NewsFacade;
use crate::caller::Caller;
use crate::response::OperationResult;
use crate::store::ContentStore;

/// A [`NewsFacade`] bound to one caller.
///
/// Shares the facade's store and cache; binding a second caller to the same
/// facade sees the same cached entries.
pub struct CallerProxy<'a, S> {
    facade: &'a NewsFacade<S>,
    caller: &'a Caller,
}

impl<'a, S: ContentStore> CallerProxy<'a, S> {
    pub(crate) fn new(facade: &'a NewsFacade<S>, caller: &'a Caller) -> Self {
        Self { facade, caller }
    }

    pub fn caller(&self) -> &Caller {
        self.caller
    }

    pub fn add_message(&self, title: &str, content: &str) -> OperationResult {
        self.facade.add_message(title, content, self.caller)
    }

    pub fn read_message(&self, id: u64) -> OperationResult {
        self.facade.read_message(id, self.caller)
    }

    pub fn edit_message(&self, id: u64, new_content: &str) -> OperationResult {
        self.facade.edit_message(id, new_content, self.caller)
    }

    pub fn delete_message(&self, id: u64) -> OperationResult {
        self.facade.delete_message(id, self.caller)
    }
}
