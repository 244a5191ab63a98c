//! End-to-end tests running the payment request service and the checkout
//! flow against the simulated native bridge.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;
use wallet_bridge::{
    AppleScript, GoogleScript, SimulatedApplePay, SimulatedGateway, SimulatedGooglePay,
    StaticDevice,
};
use wallet_hex::{
    Checkout, CheckoutOrder, CheckoutOutcome, NativeHost, PaymentRequestService, RequestState,
    ShowOptions, ShowOutcome,
};
use wallet_types::{
    Environment, ErrorKind, MerchantContext, NativeError, PaymentStatus, Platform,
    UserAcceptDetails, VendorConfig, WalletType,
};

fn context() -> MerchantContext {
    MerchantContext::new("pk", "US", "USD", dec!(10)).unwrap()
}

fn apple_host(module: Arc<SimulatedApplePay>) -> NativeHost {
    NativeHost::builder(Arc::new(StaticDevice(Platform::Ios)))
        .apple(module)
        .build()
}

fn google_host(module: Arc<SimulatedGooglePay>) -> NativeHost {
    NativeHost::builder(Arc::new(StaticDevice(Platform::Android)))
        .google(module)
        .environment(Environment::Test)
        .build()
}

fn order() -> CheckoutOrder {
    CheckoutOrder {
        public_key: "pk_test_123".to_string(),
        country_code: "US".to_string(),
        currency_code: "USD".to_string(),
        amount: dec!(25.50),
        currency_id: 840,
        output_currency_id: None,
        idempotency_key: Some("order-1".to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment request service
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_apple_acceptance_then_complete_once() {
    let module = Arc::new(SimulatedApplePay::new(AppleScript::Idle));
    let host = apple_host(module.clone());

    let service = PaymentRequestService::new(&host, context()).await.unwrap();
    let acceptance = service
        .show(ShowOptions::default())
        .await
        .unwrap()
        .into_acceptance()
        .unwrap();

    module.emit(
        &VendorConfig::default().user_accept_event,
        UserAcceptDetails {
            payment_data: "d".to_string(),
            ..Default::default()
        },
    );

    let response = acceptance.await.unwrap();
    assert_eq!(response.details().payment_data, "d");
    assert_eq!(response.method_name(), "apple-pay");

    response.complete(PaymentStatus::Success).await.unwrap();
    let err = response.complete(PaymentStatus::Success).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    let completes = module
        .calls()
        .iter()
        .filter(|call| call.starts_with("complete"))
        .count();
    assert_eq!(completes, 1);
    assert_eq!(module.listener_count(), 0);
}

#[tokio::test]
async fn test_google_dismissal_is_cancellation() {
    let module = Arc::new(SimulatedGooglePay::new(GoogleScript::Cancel));
    let host = google_host(module.clone());

    let service = PaymentRequestService::new(&host, context()).await.unwrap();
    let err = service.show(ShowOptions::default()).await.unwrap_err();

    assert!(err.is_cancellation());
    assert!(!err.is_reportable());
}

#[tokio::test]
async fn test_apple_abort_rejects_pending_acceptance() {
    let module = Arc::new(SimulatedApplePay::new(AppleScript::Idle));
    let host = apple_host(module.clone());

    let service = PaymentRequestService::new(&host, context()).await.unwrap();
    let acceptance = match service.show(ShowOptions::default()).await.unwrap() {
        ShowOutcome::Presented(acceptance) => acceptance,
        other => panic!("expected presentation ack, got {other:?}"),
    };

    service.abort().await.unwrap();
    module.emit(
        &VendorConfig::default().user_accept_event,
        UserAcceptDetails::default(),
    );

    let err = acceptance.await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Aborted);
    assert!(!module.is_sheet_open());
    assert_eq!(module.listener_count(), 0);

    match service.request() {
        wallet_hex::PlatformRequest::Apple(request) => {
            assert_eq!(request.state(), RequestState::Aborted)
        }
        wallet_hex::PlatformRequest::Google(_) => panic!("expected apple request"),
    }
}

#[tokio::test]
async fn test_simulated_user_authorizes_after_ack() {
    let module = Arc::new(SimulatedApplePay::new(AppleScript::Accept {
        delay: Duration::from_millis(20),
        details: wallet_bridge::apple::sample_acceptance(),
    }));
    let host = apple_host(module.clone());

    let service = PaymentRequestService::new(&host, context()).await.unwrap();
    let acceptance = service
        .show(ShowOptions::default())
        .await
        .unwrap()
        .into_acceptance()
        .unwrap();
    assert!(module.is_sheet_open());

    let response = tokio::time::timeout(Duration::from_secs(1), acceptance)
        .await
        .expect("acceptance should arrive")
        .unwrap();
    assert_eq!(response.details().token_data().unwrap().version, "EC_v1");
}

#[tokio::test]
async fn test_capability_probes_on_simulated_devices() {
    let apple = Arc::new(SimulatedApplePay::new(AppleScript::Idle).with_cards(&["Amex"]));
    let host = apple_host(apple);
    assert!(PaymentRequestService::can_make_payments(&host).await.unwrap());
    assert!(!PaymentRequestService::can_make_payments_using_networks(&host)
        .await
        .unwrap());

    let google = Arc::new(SimulatedGooglePay::new(GoogleScript::token()).with_readiness(false));
    let host = google_host(google.clone());
    assert!(!PaymentRequestService::can_make_payments(&host).await.unwrap());
    // test environment skips the card probe
    assert!(PaymentRequestService::can_make_payments_using_networks(&host)
        .await
        .unwrap());
    assert_eq!(google.calls().len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Checkout
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_apple_checkout_submits_token_and_closes_sheet() {
    let module = Arc::new(SimulatedApplePay::new(AppleScript::accept()));
    let gateway = SimulatedGateway::new();
    let checkout = Checkout::new(apple_host(module.clone()), gateway.clone());

    let outcome = checkout.pay(&order()).await;

    assert!(matches!(outcome, CheckoutOutcome::Submitted(_)));
    let requests = gateway.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].wallet, WalletType::ApplePay);
    assert_eq!(requests[0].amount, dec!(25.50));
    assert_eq!(requests[0].idempotency_key.as_deref(), Some("order-1"));
    assert_eq!(module.calls().last().map(String::as_str), Some("complete:success"));
}

#[tokio::test]
async fn test_apple_checkout_reports_gateway_rejection() {
    let module = Arc::new(SimulatedApplePay::new(AppleScript::accept()));
    let checkout = Checkout::new(
        apple_host(module.clone()),
        SimulatedGateway::rejecting("card declined"),
    );

    let outcome = checkout.pay(&order()).await;

    assert!(matches!(outcome, CheckoutOutcome::Failed(reason) if reason.contains("card declined")));
    assert_eq!(module.calls().last().map(String::as_str), Some("complete:failure"));
}

#[tokio::test]
async fn test_apple_checkout_presentation_failure() {
    let module = Arc::new(SimulatedApplePay::new(AppleScript::FailPresentation(
        NativeError::new("wallet locked"),
    )));
    let gateway = SimulatedGateway::new();
    let checkout = Checkout::new(apple_host(module), gateway.clone());

    let outcome = checkout.pay(&order()).await;

    assert!(matches!(outcome, CheckoutOutcome::Failed(reason) if reason.contains("wallet locked")));
    assert!(gateway.requests().await.is_empty());
}

#[tokio::test]
async fn test_google_checkout_submits_token() {
    let module = Arc::new(SimulatedGooglePay::new(GoogleScript::token()));
    let gateway = SimulatedGateway::new().with_challenge("https://3ds.example/auth");
    let checkout = Checkout::new(google_host(module.clone()), gateway.clone());

    let outcome = checkout.pay(&order()).await;

    match outcome {
        CheckoutOutcome::Submitted(receipt) => {
            assert_eq!(receipt.redirect_url.as_deref(), Some("https://3ds.example/auth"))
        }
        other => panic!("expected submission, got {other:?}"),
    }
    let requests = module.requests();
    assert_eq!(requests[0].card_payment_method_map.gateway.merchant_id, "pk_test_123");
    assert_eq!(requests[0].transaction.total_price, "25.5");
    assert_eq!(gateway.requests().await[0].wallet, WalletType::GooglePay);
}

#[tokio::test]
async fn test_google_checkout_cancel_is_silent() {
    let module = Arc::new(SimulatedGooglePay::new(GoogleScript::Cancel));
    let gateway = SimulatedGateway::new();
    let checkout = Checkout::new(google_host(module), gateway.clone());

    assert_eq!(checkout.pay(&order()).await, CheckoutOutcome::Canceled);
    assert!(gateway.requests().await.is_empty());
}

#[tokio::test]
async fn test_checkout_submits_once() {
    let module = Arc::new(SimulatedGooglePay::new(GoogleScript::token()));
    let checkout = Checkout::new(google_host(module.clone()), SimulatedGateway::new());

    assert!(matches!(checkout.pay(&order()).await, CheckoutOutcome::Submitted(_)));
    assert_eq!(checkout.pay(&order()).await, CheckoutOutcome::AlreadySubmitted);
    assert_eq!(module.calls().len(), 1);
}

#[tokio::test]
async fn test_checkout_rejects_incomplete_order() {
    let module = Arc::new(SimulatedGooglePay::new(GoogleScript::token()));
    let checkout = Checkout::new(google_host(module.clone()), SimulatedGateway::new());

    let zero = CheckoutOrder {
        amount: dec!(0),
        ..order()
    };
    assert!(matches!(checkout.pay(&zero).await, CheckoutOutcome::Rejected(_)));

    let checkout = Checkout::new(google_host(module.clone()), SimulatedGateway::new());
    let blank_key = CheckoutOrder {
        public_key: "  ".to_string(),
        ..order()
    };
    assert!(matches!(checkout.pay(&blank_key).await, CheckoutOutcome::Rejected(_)));
    assert!(module.calls().is_empty());
}

#[tokio::test]
async fn test_add_card_on_both_platforms() {
    let apple = Arc::new(SimulatedApplePay::new(AppleScript::Idle));
    let checkout = Checkout::new(apple_host(apple.clone()), SimulatedGateway::new());
    checkout.add_card("pk", "US", "USD").await.unwrap();
    assert_eq!(apple.calls(), vec!["setup"]);

    let google = Arc::new(SimulatedGooglePay::new(GoogleScript::Cancel));
    let checkout = Checkout::new(google_host(google.clone()), SimulatedGateway::new());
    checkout.add_card("pk", "US", "USD").await.unwrap();
    assert_eq!(google.calls(), vec!["request:test:false"]);
    assert_eq!(google.requests()[0].transaction.total_price, "0");
}
