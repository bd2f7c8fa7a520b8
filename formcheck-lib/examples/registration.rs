//! Fills a registration form, submits it, and prints what the user would see.
//!
//! With a base URL argument the form is POSTed over HTTP:
//!
//! ```text
//! cargo run --example registration -- http://localhost:8080
//! ```
//!
//! Without one, an in-process endpoint answers instead.

use std::io;

use async_trait::async_trait;
use formcheck_lib::config::FormConfig;
use formcheck_lib::error::TransportError;
use formcheck_lib::form::{FieldSource, Form, registration_form};
use formcheck_lib::submit::{HttpTransport, Transport};
use formcheck_lib::{FormController, SubmitAttempt, SubmitEvent};
use simplelog::{Config, LevelFilter, WriteLogger};

/// Rejects one well-known address and accepts everything else.
struct LocalEndpoint;

#[async_trait]
impl Transport for LocalEndpoint {
    async fn post_json(
        &self,
        _endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<String, TransportError> {
        let reply = if payload["email"] == "taken@example.com" {
            serde_json::json!({ "success": false, "message": "Email already exists" })
        } else {
            serde_json::json!({ "success": true })
        };
        Ok(reply.to_string())
    }
}

fn fill(form: &Form, config: &FormConfig, email: &str, password: &str) {
    let ids = &config.fields;
    form.set_value(&ids.first_name, "Ada");
    form.set_value(&ids.last_name, "Lovelace");
    form.set_value(&ids.email, email);
    form.set_value(&ids.password, password);
    form.set_value(&ids.confirm_password, password);
    form.set_value(&ids.phone, "(555) 010-1234");
    form.set_value(&ids.date, "1990-12-10");
    form.set_checked(&ids.choice_group.options[0], true);
    form.set_checked(&ids.checkbox, true);
}

fn report(label: &str, form: &Form, config: &FormConfig, attempt: &SubmitAttempt) {
    println!("== {label}");
    match attempt {
        SubmitAttempt::Ignored => println!("ignored"),
        SubmitAttempt::Invalid(result) => {
            for error in result.errors() {
                println!("  {}: {}", error.field_id, error.message);
            }
        }
        SubmitAttempt::Submitted(outcome) => println!("  success={}", outcome.success),
        SubmitAttempt::Failed(e) => println!("  error: {e}"),
    }
    if let Some(message) = form.message() {
        println!("  form: {message}");
    }
    if let Some(phone) = form.value(&config.fields.phone) {
        println!("  phone: {phone}");
    }
}

#[tokio::main]
async fn main() {
    WriteLogger::init(LevelFilter::Debug, Config::default(), io::stderr())
        .expect("Failed to initialize logger");

    let config = FormConfig::default();

    let runs = [
        ("weak password", "ada@example.com", "secret"),
        ("taken email", "taken@example.com", "analytical1"),
        ("accepted", "ada@example.com", "analytical1"),
    ];

    for (label, email, password) in runs {
        let form = registration_form("validate_Form", &config.fields);
        fill(&form, &config, email, password);

        let controller = match std::env::args().nth(1) {
            Some(base_url) => {
                let transport = match HttpTransport::from_config(&base_url, &config) {
                    Ok(transport) => transport,
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        return;
                    }
                };
                FormController::for_form(&form, transport, &config)
            }
            None => FormController::for_form(&form, LocalEndpoint, &config),
        };

        let attempt = controller.handle_submit(&mut SubmitEvent::new()).await;
        report(label, &form, &config, &attempt);
    }
}
