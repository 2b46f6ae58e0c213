use rust_decimal::Decimal;
use uuid::Uuid;

use solara_domain::package::ServiceKind;
use solara_domain::stage::Stage;
use solara_workflow::domain::types::{PaymentOutcome, Template};
use solara_workflow::error::WorkflowServiceError;
use solara_workflow::usecase::payment::{HandlePaymentSuccessUseCase, PaymentSuccessInput};

use crate::helpers::{
    MockCustomerRepo, MockLedger, RecordingMessenger, TEST_FACE_URL, TEST_HEALTH_FORM_URL,
    test_customer,
};

fn usecase(
    customers: MockCustomerRepo,
    ledger: MockLedger,
    messaging: RecordingMessenger,
) -> HandlePaymentSuccessUseCase<MockCustomerRepo, MockLedger, RecordingMessenger> {
    HandlePaymentSuccessUseCase {
        customers,
        ledger,
        messaging,
        health_form_url: TEST_HEALTH_FORM_URL.to_owned(),
        face_registration_url: TEST_FACE_URL.to_owned(),
    }
}

fn payment(customer_id: Uuid, package_id: &str, transaction_id: &str) -> PaymentSuccessInput {
    PaymentSuccessInput {
        customer_id,
        package_id: package_id.to_owned(),
        transaction_id: transaction_id.to_owned(),
        amount: Decimal::from(299u32),
    }
}

// ── First purchase ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_record_payment_create_membership_and_send_onboarding_links() {
    let customer = test_customer(Stage::CheckoutLinkSent);
    let id = customer.id;
    let uc = usecase(
        MockCustomerRepo::new(vec![customer]),
        MockLedger::empty(),
        RecordingMessenger::ok(),
    );

    let outcome = uc.execute(payment(id, "sunbed-10", "txn-001")).await.unwrap();
    assert_eq!(outcome, PaymentOutcome::Recorded);

    let transactions = uc.ledger.transactions();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].amount, Decimal::from(299u32));
    assert_eq!(transactions[0].status.as_str(), "completed");
    assert_eq!(transactions[0].metadata["package_id"], "sunbed-10");

    let membership = uc.ledger.membership(id, ServiceKind::SunBeds).unwrap();
    assert_eq!(membership.balance, 10);
    assert_eq!(membership.total_purchased, 10);

    // Folded forward: never left standing at payment_success.
    assert_eq!(uc.customers.get(id).unwrap().stage, Stage::HealthFormSent);

    assert_eq!(
        uc.messaging.templates(),
        vec![
            Template::PaymentSuccess,
            Template::HealthFormLink,
            Template::FaceRegistrationLink,
        ]
    );
    let sent = uc.messaging.sent();
    assert!(
        sent[1]
            .params
            .iter()
            .any(|(k, v)| k == "url" && v == TEST_HEALTH_FORM_URL)
    );
    assert!(
        sent[2]
            .params
            .iter()
            .any(|(k, v)| k == "url" && v == TEST_FACE_URL)
    );
}

// ── Duplicate delivery ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_credit_exactly_once_for_duplicate_webhook_delivery() {
    let customer = test_customer(Stage::CheckoutLinkSent);
    let id = customer.id;
    let uc = usecase(
        MockCustomerRepo::new(vec![customer]),
        MockLedger::empty(),
        RecordingMessenger::ok(),
    );

    let first = uc.execute(payment(id, "sunbed-10", "txn-001")).await.unwrap();
    let second = uc.execute(payment(id, "sunbed-10", "txn-001")).await.unwrap();

    assert_eq!(first, PaymentOutcome::Recorded);
    assert_eq!(second, PaymentOutcome::Duplicate);
    assert_eq!(uc.ledger.transactions().len(), 1);
    let membership = uc.ledger.membership(id, ServiceKind::SunBeds).unwrap();
    assert_eq!(membership.balance, 10);
    assert_eq!(membership.total_purchased, 10);
    // No extra notifications for the replay.
    assert_eq!(uc.messaging.sent().len(), 3);
}

// ── Top-up ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_top_up_existing_membership_on_second_purchase() {
    let customer = test_customer(Stage::CheckoutLinkSent);
    let id = customer.id;
    let uc = usecase(
        MockCustomerRepo::new(vec![customer]),
        MockLedger::empty(),
        RecordingMessenger::ok(),
    );

    uc.execute(payment(id, "sunbed-10", "txn-001")).await.unwrap();
    uc.execute(payment(id, "sunbed-10", "txn-002")).await.unwrap();

    assert_eq!(uc.ledger.transactions().len(), 2);
    assert_eq!(uc.ledger.membership_count(), 1);
    let membership = uc.ledger.membership(id, ServiceKind::SunBeds).unwrap();
    assert_eq!(membership.balance, 20);
    assert_eq!(membership.total_purchased, 20);
}

#[tokio::test]
async fn should_sum_total_purchased_across_mixed_package_sizes() {
    let customer = test_customer(Stage::CheckoutLinkSent);
    let id = customer.id;
    let uc = usecase(
        MockCustomerRepo::new(vec![customer]),
        MockLedger::empty(),
        RecordingMessenger::ok(),
    );

    uc.execute(payment(id, "sunbed-5", "txn-a")).await.unwrap();
    uc.execute(payment(id, "sunbed-10", "txn-b")).await.unwrap();
    uc.execute(payment(id, "sunbed-20", "txn-c")).await.unwrap();

    let membership = uc.ledger.membership(id, ServiceKind::SunBeds).unwrap();
    assert_eq!(membership.total_purchased, 35);
    assert_eq!(membership.balance, 35);
}

#[tokio::test]
async fn should_keep_memberships_of_different_kinds_separate() {
    let customer = test_customer(Stage::Active);
    let id = customer.id;
    let uc = usecase(
        MockCustomerRepo::new(vec![customer]),
        MockLedger::empty(),
        RecordingMessenger::ok(),
    );

    uc.execute(payment(id, "sunbed-10", "txn-a")).await.unwrap();
    uc.execute(payment(id, "spray-5", "txn-b")).await.unwrap();

    assert_eq!(uc.ledger.membership_count(), 2);
    assert_eq!(
        uc.ledger.membership(id, ServiceKind::SunBeds).unwrap().balance,
        10
    );
    assert_eq!(
        uc.ledger.membership(id, ServiceKind::SprayTan).unwrap().balance,
        5
    );
}

// ── Rejections ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_unknown_customer_with_no_side_effects() {
    let uc = usecase(
        MockCustomerRepo::empty(),
        MockLedger::empty(),
        RecordingMessenger::ok(),
    );

    let result = uc.execute(payment(Uuid::now_v7(), "sunbed-10", "txn-001")).await;

    assert!(matches!(result, Err(WorkflowServiceError::CustomerNotFound)));
    assert!(uc.ledger.transactions().is_empty());
    assert!(uc.messaging.sent().is_empty());
}

#[tokio::test]
async fn should_reject_unknown_package_with_no_side_effects() {
    let customer = test_customer(Stage::CheckoutLinkSent);
    let id = customer.id;
    let uc = usecase(
        MockCustomerRepo::new(vec![customer]),
        MockLedger::empty(),
        RecordingMessenger::ok(),
    );

    let result = uc.execute(payment(id, "gold-plan", "txn-001")).await;

    assert!(matches!(result, Err(WorkflowServiceError::PackageNotFound)));
    assert!(uc.ledger.transactions().is_empty());
    assert!(uc.messaging.sent().is_empty());
    assert_eq!(uc.customers.get(id).unwrap().stage, Stage::CheckoutLinkSent);
}
