//! Host command handlers: list, run, and eval.

use tracing::{error, info, warn};

use hostrig_core::{Host, HostError};
use hostrig_protocols::capability::DispatchRequest;

/// Print handles and providers in the order the host invokes them.
pub(crate) fn list(host: &Host) {
    let registry = host.registry();

    println!("Extension handles ({}):", registry.len_handles());
    for handle in registry.handles() {
        println!("  {:>6}  {}", handle.ordinal(), handle.id());
    }

    println!("Capability providers ({}):", registry.len_providers());
    for provider in registry.providers() {
        println!("  {:>6}  {}", provider.priority(), provider.id());
    }
}

/// Boot, wait for Ctrl-C, then shut down.
pub(crate) async fn run(host: Host) -> Result<(), Box<dyn std::error::Error>> {
    boot(&host).await?;
    info!("hostrig running, press Ctrl-C to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }

    info!("Shutdown requested");
    host.shutdown().await?;
    info!("hostrig stopped");
    Ok(())
}

/// Boot, dispatch one script, print the result, then shut down.
///
/// Shutdown runs even when dispatch or invocation fails.
pub(crate) async fn eval(
    host: &Host,
    request: DispatchRequest,
    args: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    boot(host).await?;

    let outcome = evaluate(host, &request, args).await;
    let shutdown = host.shutdown().await;

    let value = outcome?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    shutdown?;
    Ok(())
}

/// Dispatch `request` and invoke the capability with `args`.
pub(crate) async fn evaluate(
    host: &Host,
    request: &DispatchRequest,
    args: &[String],
) -> Result<serde_json::Value, HostError> {
    let capability = host.dispatch(request).await?;
    let values = args.iter().map(|a| parse_arg(a)).collect();
    Ok(capability.invoke(values).await?)
}

/// Parse a CLI argument as JSON, falling back to a plain string.
pub(crate) fn parse_arg(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

async fn boot(host: &Host) -> Result<(), HostError> {
    let report = host.boot().await?;
    if !report.is_clean() {
        warn!(failures = report.len(), "Host started with after-started failures");
    }
    Ok(())
}

#[cfg(test)]
#[path = "cmd_host_tests.rs"]
mod tests;
