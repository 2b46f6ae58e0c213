use rust_decimal::Decimal;

use solara_domain::stage::Stage;
use solara_workflow::domain::types::Template;
use solara_workflow::usecase::inbound::{HandleInboundMessageUseCase, InboundMessageInput};
use solara_workflow::usecase::onboarding::{
    CompleteFaceEnrollmentUseCase, CompleteHealthFormUseCase, FaceEnrollmentInput,
};
use solara_workflow::usecase::payment::{HandlePaymentSuccessUseCase, PaymentSuccessInput};

use crate::helpers::{
    MockCustomerRepo, MockLedger, RecordingMessenger, TEST_CHECKOUT_URL, TEST_FACE_URL,
    TEST_HEALTH_FORM_URL, TEST_PHONE, test_customer,
};

// ── Health form ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_mark_health_form_signed_without_messaging() {
    let customer = test_customer(Stage::HealthFormSent);
    let id = customer.id;
    let uc = CompleteHealthFormUseCase {
        customers: MockCustomerRepo::new(vec![customer]),
    };

    uc.execute(id).await.unwrap();

    let stored = uc.customers.get(id).unwrap();
    assert!(stored.health_form_signed);
    assert_eq!(stored.stage, Stage::HealthFormCompleted);
}

// ── Face enrollment ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_activate_customer_on_face_enrollment() {
    let customer = test_customer(Stage::FaceLinkSent);
    let id = customer.id;
    let uc = CompleteFaceEnrollmentUseCase {
        customers: MockCustomerRepo::new(vec![customer]),
        messaging: RecordingMessenger::ok(),
    };

    uc.execute(FaceEnrollmentInput {
        customer_id: id,
        face_recognition_id: "face-abc".to_owned(),
    })
    .await
    .unwrap();

    let stored = uc.customers.get(id).unwrap();
    assert_eq!(stored.face_recognition_id.as_deref(), Some("face-abc"));
    assert!(!stored.is_new_client);
    assert_eq!(stored.stage, Stage::Active);
    assert_eq!(uc.messaging.templates(), vec![Template::OnboardingComplete]);
}

// ── Full onboarding walk ─────────────────────────────────────────────────────

/// Drives one customer from first inbound contact to active, asserting
/// the stage sequence never regresses and each milestone notification
/// goes out exactly once.
#[tokio::test]
async fn should_walk_customer_from_lead_to_active() {
    let customers = MockCustomerRepo::empty();
    let customers_handle = customers.handle();
    let messaging = RecordingMessenger::ok();
    let sent_handle = std::sync::Arc::clone(&messaging.sent);
    let ledger = MockLedger::empty();

    // 1. Inbound message creates the lead and sends the checkout link.
    let inbound = HandleInboundMessageUseCase {
        customers,
        messaging,
        checkout_url: TEST_CHECKOUT_URL.to_owned(),
    };
    inbound
        .execute(InboundMessageInput {
            phone: "0501234567".to_owned(),
            text: "hi".to_owned(),
        })
        .await
        .unwrap();

    let customer_id = {
        let customers = customers_handle.lock().unwrap();
        assert_eq!(customers[0].stage, Stage::CheckoutLinkSent);
        customers[0].id
    };

    // 2. Payment webhook records the purchase and sends onboarding links.
    let payment = HandlePaymentSuccessUseCase {
        customers: MockCustomerRepo {
            customers: std::sync::Arc::clone(&customers_handle),
        },
        ledger,
        messaging: RecordingMessenger {
            fail: false,
            sent: std::sync::Arc::clone(&sent_handle),
        },
        health_form_url: TEST_HEALTH_FORM_URL.to_owned(),
        face_registration_url: TEST_FACE_URL.to_owned(),
    };
    payment
        .execute(PaymentSuccessInput {
            customer_id,
            package_id: "sunbed-10".to_owned(),
            transaction_id: "txn-001".to_owned(),
            amount: Decimal::from(299u32),
        })
        .await
        .unwrap();
    assert_eq!(
        customers_handle.lock().unwrap()[0].stage,
        Stage::HealthFormSent
    );

    // 3. Health form completes silently.
    let health = CompleteHealthFormUseCase {
        customers: MockCustomerRepo {
            customers: std::sync::Arc::clone(&customers_handle),
        },
    };
    health.execute(customer_id).await.unwrap();
    assert_eq!(
        customers_handle.lock().unwrap()[0].stage,
        Stage::HealthFormCompleted
    );

    // 4. Face enrollment completes onboarding.
    let face = CompleteFaceEnrollmentUseCase {
        customers: MockCustomerRepo {
            customers: std::sync::Arc::clone(&customers_handle),
        },
        messaging: RecordingMessenger {
            fail: false,
            sent: std::sync::Arc::clone(&sent_handle),
        },
    };
    face.execute(FaceEnrollmentInput {
        customer_id,
        face_recognition_id: "face-abc".to_owned(),
    })
    .await
    .unwrap();

    let final_customer = customers_handle.lock().unwrap()[0].clone();
    assert_eq!(final_customer.stage, Stage::Active);
    assert_eq!(final_customer.phone, TEST_PHONE);
    assert!(final_customer.health_form_signed);
    assert!(!final_customer.is_new_client);
    assert_eq!(final_customer.face_recognition_id.as_deref(), Some("face-abc"));

    // One notification per milestone, in workflow order.
    let templates: Vec<Template> = sent_handle
        .lock()
        .unwrap()
        .iter()
        .map(|m| m.template)
        .collect();
    assert_eq!(
        templates,
        vec![
            Template::PurchaseOptions,
            Template::PaymentSuccess,
            Template::HealthFormLink,
            Template::FaceRegistrationLink,
            Template::OnboardingComplete,
        ]
    );
}
