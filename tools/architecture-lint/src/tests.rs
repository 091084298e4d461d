//! Unit tests for the architecture lint.

use std::path::PathBuf;

use rstest::rstest;

use super::*;

fn lint_single(file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
    lint_sources(&[LintSource {
        file: PathBuf::from(file),
        contents: contents.to_owned(),
    }])
}

#[rstest]
#[case::handler_uses_domain(
    "inbound/http/users.rs",
    "use crate::domain::UserInteractor; fn handler() { let _ = UserInteractor::new; }",
    true
)]
#[case::handler_uses_crate_outbound(
    "inbound/http/users.rs",
    "use crate::outbound::memory::InMemoryUserRepositoryFactory; fn handler() {}",
    false
)]
#[case::handler_uses_bare_outbound(
    "inbound/http/users.rs",
    "use outbound::persistence::DieselUserRepository; fn handler() {}",
    false
)]
#[case::handler_uses_library_outbound(
    "inbound/http/users.rs",
    "use user_service::outbound::persistence::DbPool; fn handler() {}",
    false
)]
#[case::handler_uses_diesel("inbound/http/users.rs", "use diesel::prelude::*; fn handler() {}", false)]
#[case::presenter_uses_tokio(
    "inbound/http/presenter.rs",
    "use tokio::sync::oneshot; fn sink() { let _ = oneshot::channel::<()>(); }",
    true
)]
#[case::domain_uses_inbound("domain/user.rs", "use crate::inbound::http; fn thing() {}", false)]
#[case::domain_uses_utoipa(
    "domain/user.rs",
    "use utoipa::ToSchema; #[derive(ToSchema)] struct Foo;",
    false
)]
#[case::domain_uses_qualified_actix(
    "domain/user_interactor.rs",
    "fn respond() -> actix_web::HttpResponse { actix_web::HttpResponse::Ok().finish() }",
    false
)]
#[case::domain_uses_serde_and_uuid(
    "domain/user.rs",
    "use serde::Deserialize; fn id() -> String { uuid::Uuid::new_v4().to_string() }",
    true
)]
#[case::repository_uses_inbound(
    "outbound/persistence/diesel_user_repository.rs",
    "use crate::inbound::http; fn thing() {}",
    false
)]
#[case::repository_uses_actix(
    "outbound/memory/mod.rs",
    "use actix_web::web; fn thing() {}",
    false
)]
#[case::repository_uses_diesel(
    "outbound/persistence/diesel_user_repository.rs",
    "use diesel::prelude::*; use crate::domain::User; fn thing() {}",
    true
)]
fn detects_boundary_violations(#[case] file: &str, #[case] contents: &str, #[case] ok: bool) {
    let result = lint_single(file, contents);
    assert_eq!(result.is_ok(), ok, "result: {result:?}");
}

#[rstest]
fn reports_each_target_once_per_file() {
    let result = lint_single(
        "inbound/http/users.rs",
        "use crate::outbound::memory; use crate::outbound::persistence; fn handler() {}",
    );

    match result {
        Err(ArchitectureLintError::Violations(violations)) => {
            assert_eq!(violations.len(), 1, "violations: {violations:?}");
            assert_eq!(violations[0].layer, "inbound");
            assert_eq!(violations[0].target, Target::Layer("outbound".to_owned()));
            assert_eq!(
                violations[0].to_string(),
                "inbound/http/users.rs: inbound code depends on the outbound layer"
            );
        }
        other => panic!("expected violations, got: {other:?}"),
    }
}

#[rstest]
#[case::wiring_may_use_everything(
    "server/mod.rs",
    "use user_service::outbound::persistence::DbPool; use actix_web::App; fn main() {}"
)]
#[case::unparsable_wiring("main.rs", "fn broken( {")]
fn files_outside_layers_are_skipped(#[case] file: &str, #[case] contents: &str) {
    assert!(lint_single(file, contents).is_ok());
}

#[rstest]
fn unparsable_layer_file_is_an_error() {
    let result = lint_single("domain/user.rs", "fn broken( {");
    assert!(
        matches!(result, Err(ArchitectureLintError::Parse { .. })),
        "result: {result:?}"
    );
}

#[rstest]
#[case::nested_super(&["super", "super", "outbound", "memory"], Some(Target::Layer("outbound".to_owned())))]
#[case::library_path(&["user_service", "domain", "User"], Some(Target::Layer("domain".to_owned())))]
#[case::wiring_module(&["crate", "settings", "ServerSettings"], None)]
#[case::local_item(&["HttpResponse"], None)]
#[case::external(&["diesel", "prelude", "*"], Some(Target::Crate("diesel".to_owned())))]
fn resolves_path_targets(#[case] segments: &[&str], #[case] expected: Option<Target>) {
    let segments: Vec<String> = segments.iter().map(|s| (*s).to_owned()).collect();
    assert_eq!(Target::resolve(&segments), expected);
}
