mod inbound_test;
mod onboarding_test;
mod payment_test;
