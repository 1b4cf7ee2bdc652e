use super::*;
use crate::test_support::{Journal, RecordingHandle, StaticProvider};
use hostrig_protocols::extension::StaticDiscovery;
use std::path::PathBuf;

fn context() -> BootContext {
    BootContext::new(Vec::<String>::new(), PathBuf::from("."))
}

#[tokio::test]
async fn test_host_creation() {
    let host = Host::new(Registry::empty(), context());
    assert_eq!(host.phase(), Phase::Idle);
    assert!(!host.is_running());
    assert!(host.registry().is_empty());
}

#[tokio::test]
async fn test_host_boot_dispatch_shutdown() {
    let journal = Journal::new();
    let source = StaticDiscovery::new()
        .with_handle(RecordingHandle::new("ext", 0, &journal).into_dyn())
        .with_provider(StaticProvider::new("engine", 1, &["js"]).into_dyn());
    let host = Host::discover(&source, context()).unwrap();

    host.boot().await.unwrap();
    assert!(host.is_running());

    let capability = host.dispatch(&DispatchRequest::new("js", "1 + 1")).await.unwrap();
    let result = capability.invoke(vec![]).await.unwrap();
    assert_eq!(result["provider"], "engine");
    assert_eq!(host.resolve("js").unwrap().id(), "engine");

    host.shutdown().await.unwrap();
    assert_eq!(host.phase(), Phase::Closed);
    assert_eq!(journal.calls("release"), vec!["ext"]);
}

#[tokio::test]
async fn test_host_empty_registry() {
    let host = Host::new(Registry::empty(), context());
    host.boot().await.unwrap();
    assert!(matches!(
        host.dispatch(&DispatchRequest::new("js", "")).await,
        Err(DispatchError::UnsupportedCapability(_))
    ));
    host.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_host_abort_after_before_start() {
    let journal = Journal::new();
    let source = StaticDiscovery::new().with_handle(RecordingHandle::new("ext", 0, &journal).into_dyn());
    let host = Host::discover(&source, context()).unwrap();

    host.orchestrator().before_start().await.unwrap();
    assert!(host.abort().await.unwrap().is_clean());
    assert_eq!(host.phase(), Phase::Closed);
    assert_eq!(journal.calls("release"), vec!["ext"]);
    assert!(host.shutdown().await.is_err());
}

#[tokio::test]
async fn test_host_discover_rejects_duplicates() {
    let provider = StaticProvider::new("engine", 1, &["js"]).into_dyn();
    let source = StaticDiscovery::new()
        .with_provider(provider.clone())
        .with_provider(provider);
    assert!(matches!(
        Host::discover(&source, context()),
        Err(RegistrationError::DuplicateProvider { .. })
    ));
}

#[tokio::test]
async fn test_host_supplied_signal_sees_started_marker() {
    let signal = PhaseSignal::new();
    let mut rx = signal.subscribe();
    let host = Host::with_signal(Registry::empty(), context(), signal);
    host.boot().await.unwrap();
    assert_eq!(rx.recv().await.unwrap(), Phase::BeforeStart);
    assert_eq!(rx.recv().await.unwrap(), Phase::Running);
}
