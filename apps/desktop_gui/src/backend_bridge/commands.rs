//! Backend commands queued from UI to backend worker.

use client_core::StoreRequest;

pub enum BackendCommand {
    Store(StoreRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Store(request) => request.name(),
        }
    }
}
