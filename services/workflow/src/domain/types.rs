use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use solara_domain::package::ServiceKind;
use solara_domain::stage::Stage;

/// Customer progressing through onboarding.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: Uuid,
    /// Canonical digits-only phone with country code (unique join key).
    pub phone: String,
    pub full_name: String,
    pub stage: Stage,
    pub wa_opt_in: bool,
    pub last_message_at: Option<DateTime<Utc>>,
    pub health_form_signed: bool,
    pub face_recognition_id: Option<String>,
    pub is_new_client: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Prepaid session balance of one service kind for one customer.
#[derive(Debug, Clone)]
pub struct Membership {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub kind: ServiceKind,
    pub balance: i32,
    pub total_purchased: i32,
    pub expiry_date: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Days until a newly created membership expires.
pub const MEMBERSHIP_EXPIRY_DAYS: i64 = 90;

/// What a transaction paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Membership,
    Product,
    Service,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Membership => "membership",
            Self::Product => "product",
            Self::Service => "service",
        }
    }
}

/// Settlement status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// Immutable record of one payment event. Write-once.
#[derive(Debug, Clone)]
pub struct PaymentTransaction {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub currency: String,
    pub status: TransactionStatus,
    /// Payment gateway transaction id; the idempotency key.
    pub external_id: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Membership credit applied together with a recorded payment.
#[derive(Debug, Clone)]
pub struct MembershipCredit {
    pub customer_id: Uuid,
    pub kind: ServiceKind,
    pub sessions: i32,
}

/// Result of attempting to record a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// Transaction stored and membership credited.
    Recorded,
    /// The external transaction id was already processed; nothing changed.
    Duplicate,
}

/// Outbound message templates understood by the messaging gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    PurchaseOptions,
    PaymentSuccess,
    HealthFormLink,
    FaceRegistrationLink,
    OnboardingComplete,
}

impl Template {
    /// Template key as registered with the gateway.
    pub fn key(self) -> &'static str {
        match self {
            Self::PurchaseOptions => "purchase_options",
            Self::PaymentSuccess => "payment_success",
            Self::HealthFormLink => "health_form_link",
            Self::FaceRegistrationLink => "face_registration_link",
            Self::OnboardingComplete => "onboarding_complete",
        }
    }
}
