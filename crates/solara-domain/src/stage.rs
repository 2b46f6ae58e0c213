//! Customer onboarding stages and the stage transition table.

use serde::{Deserialize, Serialize};

/// Onboarding stage of a customer.
///
/// Declaration order is the total order of intended progress, so the
/// derived `Ord` makes "only move forward" checks plain comparisons.
/// `LeadInbound` is the initial stage for customers created from an
/// unsolicited inbound contact; `Active` is terminal for this workflow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    LeadInbound,
    WhatsappEngaged,
    CheckoutLinkSent,
    PaymentPending,
    PaymentSuccess,
    HealthFormSent,
    HealthFormCompleted,
    FaceLinkSent,
    FaceEnrolled,
    Active,
}

impl Stage {
    /// Every stage, in workflow order.
    pub const ALL: [Stage; 10] = [
        Stage::LeadInbound,
        Stage::WhatsappEngaged,
        Stage::CheckoutLinkSent,
        Stage::PaymentPending,
        Stage::PaymentSuccess,
        Stage::HealthFormSent,
        Stage::HealthFormCompleted,
        Stage::FaceLinkSent,
        Stage::FaceEnrolled,
        Stage::Active,
    ];

    /// Database and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LeadInbound => "lead_inbound",
            Self::WhatsappEngaged => "whatsapp_engaged",
            Self::CheckoutLinkSent => "checkout_link_sent",
            Self::PaymentPending => "payment_pending",
            Self::PaymentSuccess => "payment_success",
            Self::HealthFormSent => "health_form_sent",
            Self::HealthFormCompleted => "health_form_completed",
            Self::FaceLinkSent => "face_link_sent",
            Self::FaceEnrolled => "face_enrolled",
            Self::Active => "active",
        }
    }

    /// Parse the database representation. Returns `None` for unknown values.
    pub fn from_snake_case(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.as_str() == s)
    }

    /// `active` customers are out of the onboarding workflow; later
    /// visits and purchases go through membership top-up, not stages.
    pub fn is_terminal(self) -> bool {
        self == Self::Active
    }
}

/// Side effect fired when the workflow evaluates a customer at a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageAction {
    /// Send the purchase-options message with a checkout link.
    SendPurchaseOptions,
    /// Send the health-form and face-registration links.
    SendOnboardingLinks,
    /// Send the onboarding-complete message and clear the new-client flag.
    SendOnboardingComplete,
    /// Nothing to do until an external completion event arrives.
    Wait,
}

/// One row of the transition table: the action to fire and the stage to
/// advance to once it has run. `next = None` leaves the stage unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub action: StageAction,
    pub next: Option<Stage>,
}

impl Transition {
    const fn wait() -> Self {
        Self {
            action: StageAction::Wait,
            next: None,
        }
    }
}

/// The stage transition table.
///
/// Most stages are waiting states entered by an explicit completion
/// event (payment webhook, form submission, enrollment callback); only
/// the engagement stages auto-advance by (re)sending the purchase
/// nudge. `payment_success` and `face_enrolled` fold forward: the use
/// case that sets them runs this table entry in the same operation, so
/// neither is ever left standing.
pub fn transition(stage: Stage) -> Transition {
    match stage {
        // First contact and re-engagement currently send the same
        // message; kept as separate arms so they can diverge.
        Stage::LeadInbound => Transition {
            action: StageAction::SendPurchaseOptions,
            next: Some(Stage::CheckoutLinkSent),
        },
        Stage::WhatsappEngaged => Transition {
            action: StageAction::SendPurchaseOptions,
            next: Some(Stage::CheckoutLinkSent),
        },
        Stage::CheckoutLinkSent | Stage::PaymentPending => Transition::wait(),
        Stage::PaymentSuccess => Transition {
            action: StageAction::SendOnboardingLinks,
            next: Some(Stage::HealthFormSent),
        },
        Stage::HealthFormSent | Stage::HealthFormCompleted | Stage::FaceLinkSent => {
            Transition::wait()
        }
        Stage::FaceEnrolled => Transition {
            action: StageAction::SendOnboardingComplete,
            next: Some(Stage::Active),
        },
        Stage::Active => Transition::wait(),
    }
}
