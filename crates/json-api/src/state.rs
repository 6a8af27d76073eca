//! State

use std::sync::Arc;

use inventory_app::{context::AppContext, domain::products::import::ImportPolicy};

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) import_policy: ImportPolicy,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, import_policy: ImportPolicy) -> Self {
        Self { app, import_policy }
    }

    #[must_use]
    pub(crate) fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
