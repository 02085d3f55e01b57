//! CLI auth command handlers for login, MFA, status, and logout.

use std::io::BufRead;

use crate::auth::{
    parse_allowed_methods_csv, LoginStep, MfaEvent, MfaFlow, VerificationOutcome, HOME_ROUTE,
};
use crate::error::PeptideError;

use super::{Context, MfaArgs};

/// Handle `peptide auth login <email>`.
pub async fn handle_login(ctx: &Context, email: &str) -> Result<(), PeptideError> {
    eprint!("Password: ");
    let password = read_line()?;

    let step = ctx.login_service().login(email, &password).await?;
    report_login_step(step)
}

/// Print the outcome of a primary login. A disabled account is an error so
/// the process exits non-zero.
fn report_login_step(step: LoginStep) -> Result<(), PeptideError> {
    match step {
        LoginStep::Authenticated(credential) => {
            println!("✅ Logged in (session {})", credential.id);
        }
        LoginStep::MfaRequired {
            ticket,
            allowed_methods,
        } => {
            let methods: Vec<String> = allowed_methods.iter().map(ToString::to_string).collect();
            println!("🔐 Second factor required ({})", methods.join(", "));
            println!(
                "   Run: peptide auth mfa --ticket {ticket} --methods {} --totp <code>",
                methods.join(",")
            );
        }
        LoginStep::Disabled { user_id } => {
            return Err(PeptideError::Authentication(format!(
                "account {user_id} is disabled"
            )));
        }
    }
    Ok(())
}

/// Handle `peptide auth mfa`.
pub async fn handle_mfa(ctx: &Context, args: &MfaArgs) -> Result<(), PeptideError> {
    let (flow, proceed) = MfaFlow::new(ctx.client.clone(), ctx.credentials.clone());
    let mut flow = flow.with_friendly_name(ctx.config.friendly_name.clone());
    if let Some(methods) = &args.methods {
        flow = flow.with_allowed_methods(parse_allowed_methods_csv(methods));
    }

    let outcome = match (&args.totp, &args.recovery) {
        (Some(code), _) => {
            flow.set_code(code);
            flow.submit_one_time_code(&args.ticket).await?
        }
        (None, Some(code)) => {
            flow.set_recovery_code(code);
            flow.submit_recovery_code(&args.ticket).await?
        }
        (None, None) => {
            return Err(PeptideError::InvalidArgument(
                "either --totp or --recovery is required".to_string(),
            ))
        }
    };

    match outcome {
        VerificationOutcome::Success(_) => {
            // The event carries the same credential; waiting on it mirrors
            // how an interactive client would move on.
            if let Some(MfaEvent::Proceed(credential)) = proceed.wait().await {
                println!("✅ Verified (session {}), continue to {HOME_ROUTE}", credential.id);
            }
            Ok(())
        }
        VerificationOutcome::TypedError { message }
        | VerificationOutcome::UnexpectedFailure { message } => {
            Err(PeptideError::Authentication(message))
        }
    }
}

/// Handle `peptide auth status`.
pub fn handle_status(ctx: &Context) -> Result<(), PeptideError> {
    match ctx.client.session().current() {
        Some(credential) => println!("✅ Logged in (session {})", credential.id),
        None => println!("❌ Not logged in"),
    }
    println!("   API: {}", ctx.config.api_url);
    Ok(())
}

/// Handle `peptide auth logout`.
pub async fn handle_logout(ctx: &Context) -> Result<(), PeptideError> {
    ctx.login_service().logout().await?;
    println!("✅ Logged out");
    Ok(())
}

fn read_line() -> Result<String, PeptideError> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| PeptideError::InvalidArgument(format!("failed to read stdin: {err}")))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
