use sea_orm::DatabaseConnection;

use crate::infra::db::{DbCustomerRepository, DbMembershipRepository, DbPaymentLedger};
use crate::infra::whatsapp::WhatsAppClient;

/// URLs the workflow hands out in outbound messages.
#[derive(Clone)]
pub struct OnboardingLinks {
    pub checkout_url: String,
    pub health_form_url: String,
    pub face_registration_url: String,
}

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub messaging: WhatsAppClient,
    pub links: OnboardingLinks,
}

impl AppState {
    pub fn customer_repo(&self) -> DbCustomerRepository {
        DbCustomerRepository {
            db: self.db.clone(),
        }
    }

    pub fn membership_repo(&self) -> DbMembershipRepository {
        DbMembershipRepository {
            db: self.db.clone(),
        }
    }

    pub fn payment_ledger(&self) -> DbPaymentLedger {
        DbPaymentLedger {
            db: self.db.clone(),
        }
    }
}
