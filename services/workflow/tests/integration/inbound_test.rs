use solara_domain::stage::Stage;
use solara_workflow::domain::types::Template;
use solara_workflow::usecase::inbound::{HandleInboundMessageUseCase, InboundMessageInput};

use crate::helpers::{
    MockCustomerRepo, RecordingMessenger, TEST_CHECKOUT_URL, TEST_PHONE, test_customer,
};

fn usecase(
    customers: MockCustomerRepo,
    messaging: RecordingMessenger,
) -> HandleInboundMessageUseCase<MockCustomerRepo, RecordingMessenger> {
    HandleInboundMessageUseCase {
        customers,
        messaging,
        checkout_url: TEST_CHECKOUT_URL.to_owned(),
    }
}

fn message(phone: &str, text: &str) -> InboundMessageInput {
    InboundMessageInput {
        phone: phone.to_owned(),
        text: text.to_owned(),
    }
}

// ── First contact ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_lead_and_send_checkout_link_on_first_contact() {
    let uc = usecase(MockCustomerRepo::empty(), RecordingMessenger::ok());

    uc.execute(message("0501234567", "hi, I'd like to tan")).await.unwrap();

    let customers = uc.customers.customers.lock().unwrap().clone();
    assert_eq!(customers.len(), 1);
    let customer = &customers[0];
    assert_eq!(customer.phone, TEST_PHONE);
    assert_eq!(customer.stage, Stage::CheckoutLinkSent);
    assert!(customer.wa_opt_in);
    assert!(customer.is_new_client);
    assert!(customer.last_message_at.is_some());

    let sent = uc.messaging.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].template, Template::PurchaseOptions);
    assert_eq!(sent[0].phone, TEST_PHONE);
    assert!(
        sent[0]
            .params
            .iter()
            .any(|(k, v)| k == "checkout_url" && v == TEST_CHECKOUT_URL)
    );
}

// ── Repeat contact ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_not_duplicate_customer_for_different_phone_spellings() {
    let uc = usecase(MockCustomerRepo::empty(), RecordingMessenger::ok());

    uc.execute(message("0501234567", "hello")).await.unwrap();
    uc.execute(message("+972 50-123-4567", "hello again"))
        .await
        .unwrap();
    uc.execute(message("972501234567", "still me")).await.unwrap();

    assert_eq!(uc.customers.customers.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_resend_checkout_link_to_engaged_customer() {
    let customer = test_customer(Stage::WhatsappEngaged);
    let id = customer.id;
    let uc = usecase(
        MockCustomerRepo::new(vec![customer]),
        RecordingMessenger::ok(),
    );

    uc.execute(message(TEST_PHONE, "what are the options?"))
        .await
        .unwrap();

    assert_eq!(uc.customers.get(id).unwrap().stage, Stage::CheckoutLinkSent);
    assert_eq!(uc.messaging.templates(), vec![Template::PurchaseOptions]);
}

#[tokio::test]
async fn should_stay_quiet_while_waiting_for_payment() {
    let customer = test_customer(Stage::CheckoutLinkSent);
    let id = customer.id;
    let uc = usecase(
        MockCustomerRepo::new(vec![customer]),
        RecordingMessenger::ok(),
    );

    uc.execute(message(TEST_PHONE, "ok, paying soon")).await.unwrap();

    let stored = uc.customers.get(id).unwrap();
    assert_eq!(stored.stage, Stage::CheckoutLinkSent);
    assert!(stored.last_message_at.is_some());
    assert!(uc.messaging.sent().is_empty());
}

// ── Messaging failure ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_keep_stage_so_next_message_retries_after_send_failure() {
    let uc = usecase(MockCustomerRepo::empty(), RecordingMessenger::failing());

    uc.execute(message("0501234567", "hi")).await.unwrap();

    // Created, but still a lead: the send never happened.
    let customers = uc.customers.customers.lock().unwrap().clone();
    assert_eq!(customers[0].stage, Stage::LeadInbound);
    drop(customers);

    // A later inbound message retries the nudge once the gateway is back.
    let uc = usecase(
        MockCustomerRepo::new(uc.customers.customers.lock().unwrap().clone()),
        RecordingMessenger::ok(),
    );
    uc.execute(message(TEST_PHONE, "hello?")).await.unwrap();

    let customers = uc.customers.customers.lock().unwrap().clone();
    assert_eq!(customers[0].stage, Stage::CheckoutLinkSent);
    assert_eq!(uc.messaging.sent().len(), 1);
}

// ── Stage monotonicity ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_never_regress_stage_over_any_message_burst() {
    let customer = test_customer(Stage::HealthFormCompleted);
    let id = customer.id;
    let uc = usecase(
        MockCustomerRepo::new(vec![customer]),
        RecordingMessenger::ok(),
    );

    let mut last = Stage::HealthFormCompleted;
    for text in ["hi", "hello", "anyone there?", "ok"] {
        uc.execute(message(TEST_PHONE, text)).await.unwrap();
        let stage = uc.customers.get(id).unwrap().stage;
        assert!(stage >= last, "stage regressed from {last:?} to {stage:?}");
        last = stage;
    }
}
