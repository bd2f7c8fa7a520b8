//! End-to-end submit flow against the in-memory form and a mock transport.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{GatedTransport, MockTransport, SlowTransport, fill_valid, init_logging};
use formcheck_lib::config::FormConfig;
use formcheck_lib::error::TransportError;
use formcheck_lib::form::{FieldSource, Form, FormSnapshot, registration_form};
use formcheck_lib::orchestrator::OrchestratorState;
use formcheck_lib::submit::{FAILURE_MESSAGE, SUCCESS_MESSAGE, SubmissionPipeline};
use formcheck_lib::trigger::CORRECT_ERRORS_MESSAGE;
use formcheck_lib::validation::messages::{
    CONFIRM_PASSWORD_MESSAGE, PASSWORD_MESSAGE, PHONE_MESSAGE,
};
use formcheck_lib::{ErrorPresenter, FormController, SubmitAttempt, SubmitEvent, SubmitTarget};

fn setup(transport: MockTransport) -> (Form, FormConfig, FormController) {
    init_logging();
    let config = FormConfig::default();
    let form = registration_form("validate_Form", &config.fields);
    let controller = FormController::for_form(&form, transport, &config);
    (form, config, controller)
}

fn all_field_errors(form: &Form, config: &FormConfig) -> Vec<(String, String)> {
    let ids = &config.fields;
    ids.text_fields()
        .into_iter()
        .chain([ids.choice_group.name.as_str(), ids.checkbox.as_str()])
        .filter_map(|id| form.field_error(id).map(|text| (id.to_string(), text)))
        .collect()
}

#[tokio::test]
async fn test_valid_form_is_submitted_once() {
    let transport = MockTransport::replying(r#"{"success":true}"#);
    let (form, config, controller) = setup(transport.clone());
    fill_valid(&form, &config.fields);

    let mut event = SubmitEvent::new();
    let attempt = controller.handle_submit(&mut event).await;

    assert!(event.is_default_prevented());
    assert!(attempt.is_accepted());
    assert_eq!(form.value("phone").as_deref(), Some("123-456-7890"));
    assert_eq!(form.message().as_deref(), Some(SUCCESS_MESSAGE));
    assert!(all_field_errors(&form, &config).is_empty());
    assert_eq!(controller.orchestrator().state(), OrchestratorState::Idle);

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    let (endpoint, payload) = &calls[0];
    assert_eq!(endpoint, "/submitForm");
    assert_eq!(payload["first_Name"], "John");
    assert_eq!(payload["email"], "john@doe.com");
    assert_eq!(payload["phone"], "123-456-7890");
    assert_eq!(payload["yesNo"], "yes");
    assert_eq!(payload["checkbox"], true);
}

#[tokio::test]
async fn test_short_password_fails_only_password_fields() {
    let transport = MockTransport::replying(r#"{"success":true}"#);
    let (form, config, controller) = setup(transport.clone());
    fill_valid(&form, &config.fields);
    form.set_value("password", "short");
    form.set_value("match_Password", "short");

    let mut event = SubmitEvent::new();
    let attempt = controller.handle_submit(&mut event).await;

    let SubmitAttempt::Invalid(result) = attempt else {
        panic!("expected invalid attempt, got {attempt:?}");
    };
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].field_id, "password");

    let mut errors = all_field_errors(&form, &config);
    errors.sort();
    assert_eq!(
        errors,
        vec![("password".to_string(), PASSWORD_MESSAGE.to_string())]
    );
    assert_eq!(form.message().as_deref(), Some(CORRECT_ERRORS_MESSAGE));
    // Phone is only rewritten on a fully valid pass.
    assert_eq!(form.value("phone").as_deref(), Some("1234567890"));
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_mismatched_confirmation_is_reported() {
    let transport = MockTransport::replying(r#"{"success":true}"#);
    let (form, config, controller) = setup(transport.clone());
    fill_valid(&form, &config.fields);
    form.set_value("password", "short");
    form.set_value("match_Password", "different");

    let attempt = controller.handle_submit(&mut SubmitEvent::new()).await;

    assert!(matches!(attempt, SubmitAttempt::Invalid(_)));
    assert_eq!(form.field_error("password").as_deref(), Some(PASSWORD_MESSAGE));
    assert_eq!(
        form.field_error("match_Password").as_deref(),
        Some(CONFIRM_PASSWORD_MESSAGE)
    );
    assert_eq!(all_field_errors(&form, &config).len(), 2);
}

#[tokio::test]
async fn test_empty_form_reports_every_field() {
    let transport = MockTransport::replying(r#"{"success":true}"#);
    let (form, config, controller) = setup(transport.clone());

    let attempt = controller.handle_submit(&mut SubmitEvent::new()).await;

    let SubmitAttempt::Invalid(result) = attempt else {
        panic!("expected invalid attempt, got {attempt:?}");
    };
    // match_Password equals the empty password, so it passes.
    assert_eq!(result.errors().len(), 8);
    assert_eq!(result.first_error().unwrap().field_id, "first_Name");
    assert!(form.field_error("match_Password").is_none());
    assert!(form.field_error("yesNo").is_some());
    assert!(form.field_error("checkbox").is_some());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_server_rejection_shows_server_message() {
    let transport =
        MockTransport::replying(r#"{"success":false,"message":"Email already exists"}"#);
    let (form, config, controller) = setup(transport.clone());
    fill_valid(&form, &config.fields);

    let attempt = controller.handle_submit(&mut SubmitEvent::new()).await;

    let SubmitAttempt::Submitted(outcome) = &attempt else {
        panic!("expected submitted attempt, got {attempt:?}");
    };
    assert!(!outcome.success);
    assert!(!attempt.is_accepted());
    assert_eq!(form.message().as_deref(), Some("Email already exists"));
    assert!(all_field_errors(&form, &config).is_empty());
}

#[tokio::test]
async fn test_transport_failure_shows_generic_message() {
    let transport = MockTransport::failing("connection refused");
    let (form, config, controller) = setup(transport.clone());
    fill_valid(&form, &config.fields);

    let attempt = controller.handle_submit(&mut SubmitEvent::new()).await;

    assert!(matches!(attempt, SubmitAttempt::Failed(_)));
    assert_eq!(form.message().as_deref(), Some(FAILURE_MESSAGE));
    assert!(all_field_errors(&form, &config).is_empty());
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_undecodable_reply_is_a_failure() {
    let transport = MockTransport::replying("<html>oops</html>");
    let (form, config, controller) = setup(transport);
    fill_valid(&form, &config.fields);

    let attempt = controller.handle_submit(&mut SubmitEvent::new()).await;

    let SubmitAttempt::Failed(err) = attempt else {
        panic!("expected failed attempt, got {attempt:?}");
    };
    assert!(err.is_decode());
    assert_eq!(form.message().as_deref(), Some(FAILURE_MESSAGE));
}

#[tokio::test]
async fn test_stale_errors_cleared_on_next_attempt() {
    let transport = MockTransport::replying(r#"{"success":true}"#);
    let (form, config, controller) = setup(transport.clone());

    let first = controller.handle_submit(&mut SubmitEvent::new()).await;
    assert!(matches!(first, SubmitAttempt::Invalid(_)));
    assert!(!all_field_errors(&form, &config).is_empty());

    fill_valid(&form, &config.fields);
    let second = controller.handle_submit(&mut SubmitEvent::new()).await;

    assert!(second.is_accepted());
    assert!(all_field_errors(&form, &config).is_empty());
    assert_eq!(form.message().as_deref(), Some(SUCCESS_MESSAGE));
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_future_date_rejected_when_enabled() {
    init_logging();
    let config = FormConfig::default().with_reject_future_dates(true);
    let form = registration_form("validate_Form", &config.fields);
    let transport = MockTransport::replying(r#"{"success":true}"#);
    let controller = FormController::for_form(&form, transport.clone(), &config);
    fill_valid(&form, &config.fields);
    form.set_value("date", "2999-01-01");

    let attempt = controller.handle_submit(&mut SubmitEvent::new()).await;

    assert!(matches!(attempt, SubmitAttempt::Invalid(_)));
    assert!(form.field_error("date").is_some());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn test_submit_target_accepts_one_listener() {
    let transport = MockTransport::replying(r#"{"success":true}"#);
    let (form, config, controller) = setup(transport.clone());
    fill_valid(&form, &config.fields);

    let target = SubmitTarget::new();
    let mut event = SubmitEvent::new();
    assert!(target.submit(&mut event).await.is_none());
    assert!(!event.is_default_prevented());

    let controller = Arc::new(controller);
    assert!(target.add_submit_listener(controller.clone()));
    assert!(!target.add_submit_listener(controller));
    assert!(target.has_listener());

    let attempt = target.submit(&mut event).await.unwrap();
    assert!(attempt.is_accepted());
    assert!(event.is_default_prevented());
    assert_eq!(transport.calls().len(), 1);
}

#[tokio::test]
async fn test_submit_while_in_flight_is_ignored() {
    init_logging();
    let config = FormConfig::default();
    let form = registration_form("validate_Form", &config.fields);
    fill_valid(&form, &config.fields);

    let transport = GatedTransport::new(r#"{"success":true}"#);
    let arrived = transport.arrived.clone();
    let release = transport.release.clone();
    let controller = Arc::new(FormController::for_form(&form, transport, &config));

    let first = {
        let controller = controller.clone();
        tokio::spawn(async move {
            let mut event = SubmitEvent::new();
            controller.handle_submit(&mut event).await
        })
    };

    arrived.notified().await;
    assert!(controller.is_submitting());

    let mut event = SubmitEvent::new();
    let second = controller.handle_submit(&mut event).await;
    assert!(matches!(second, SubmitAttempt::Ignored));
    assert!(event.is_default_prevented());

    release.notify_one();
    let first = first.await.unwrap();
    assert!(first.is_accepted());
    assert!(!controller.is_submitting());
}

#[tokio::test]
async fn test_pipeline_times_out_slow_transport() {
    init_logging();
    let config = FormConfig::default();
    let form = registration_form("validate_Form", &config.fields);
    let transport = GatedTransport::new(r#"{"success":true}"#);
    let presenter = ErrorPresenter::new(form.clone());
    let pipeline = SubmissionPipeline::new(transport, "/submitForm", presenter)
        .with_timeout(Some(Duration::from_millis(50)));

    let mut snapshot = FormSnapshot::new();
    snapshot.insert("email", "john@doe.com");
    let err = pipeline.submit(&snapshot).await.unwrap_err();

    assert!(matches!(err, TransportError::Timeout(limit) if limit == Duration::from_millis(50)));
    assert!(err.is_network());
    assert_eq!(form.message().as_deref(), Some(FAILURE_MESSAGE));
}

#[tokio::test]
async fn test_sub_second_timeout_allows_prompt_reply() {
    init_logging();
    let config = FormConfig::default().with_timeout(Duration::from_millis(500));
    assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

    let form = registration_form("validate_Form", &config.fields);
    fill_valid(&form, &config.fields);
    let transport = SlowTransport {
        delay: Duration::from_millis(20),
        body: r#"{"success":true}"#.to_string(),
    };
    let controller = FormController::for_form(&form, transport, &config);

    let attempt = controller.handle_submit(&mut SubmitEvent::new()).await;

    assert!(attempt.is_accepted(), "got {attempt:?}");
    assert_eq!(form.message().as_deref(), Some(SUCCESS_MESSAGE));
}

// The phone is rewritten as soon as a pass succeeds, so a retry after a
// failed submission must re-enter it as ten bare digits.
#[tokio::test]
async fn test_retry_after_failure_needs_phone_reentered() {
    let transport = MockTransport::failing("connection refused");
    let (form, config, controller) = setup(transport.clone());
    fill_valid(&form, &config.fields);

    let first = controller.handle_submit(&mut SubmitEvent::new()).await;
    assert!(matches!(first, SubmitAttempt::Failed(_)));
    assert_eq!(form.value("phone").as_deref(), Some("123-456-7890"));

    let retry = controller.handle_submit(&mut SubmitEvent::new()).await;
    let SubmitAttempt::Invalid(result) = retry else {
        panic!("expected invalid retry, got {retry:?}");
    };
    assert_eq!(result.errors().len(), 1);
    assert_eq!(form.field_error("phone").as_deref(), Some(PHONE_MESSAGE));

    form.set_value("phone", "1234567890");
    let third = controller.handle_submit(&mut SubmitEvent::new()).await;
    assert!(matches!(third, SubmitAttempt::Failed(_)));
    assert!(form.field_error("phone").is_none());
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn test_cancelled_submit_returns_to_idle() {
    init_logging();
    let config = FormConfig::default();
    let form = registration_form("validate_Form", &config.fields);
    fill_valid(&form, &config.fields);

    // Never released, so the submission only ends by being dropped.
    let transport = GatedTransport::new(r#"{"success":true}"#);
    let controller = FormController::for_form(&form, transport, &config);

    let mut event = SubmitEvent::new();
    let cut_short =
        tokio::time::timeout(Duration::from_millis(50), controller.handle_submit(&mut event)).await;

    assert!(cut_short.is_err());
    assert!(!controller.is_submitting());
    assert_eq!(controller.orchestrator().state(), OrchestratorState::Idle);
}
