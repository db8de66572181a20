//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CalculationsService, UsersService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Calculation BREAD use-cases.
    pub calculations: Arc<dyn CalculationsService>,
    /// Registration and login use-cases.
    pub users: Arc<dyn UsersService>,
}

impl HttpState {
    /// Bundle the two use-case ports.
    pub fn new(
        calculations: Arc<dyn CalculationsService>,
        users: Arc<dyn UsersService>,
    ) -> Self {
        Self {
            calculations,
            users,
        }
    }
}
