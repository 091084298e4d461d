//! Behaviour tests running the lint over a source tree on disk.

use std::fs;
use std::path::{Path, PathBuf};

use architecture_lint::{ArchitectureLintError, Violation};
use rstest::{fixture, rstest};
use tempfile::TempDir;

/// A throwaway `backend/` directory populated file by file.
struct SourceTree {
    root: TempDir,
}

impl SourceTree {
    fn backend_dir(&self) -> PathBuf {
        self.root.path().join("backend")
    }

    fn write(&self, file: &str, contents: &str) -> &Self {
        let path = self.backend_dir().join("src").join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directories");
        }
        fs::write(&path, contents).expect("write source file");
        self
    }

    fn lint(&self) -> Result<(), ArchitectureLintError> {
        architecture_lint::lint_backend_sources(&self.backend_dir())
    }
}

#[fixture]
fn valid_tree() -> SourceTree {
    let tree = SourceTree {
        root: TempDir::new().expect("tempdir"),
    };
    tree.write(
        "domain/user.rs",
        "pub struct UserId(String); impl UserId { pub fn new(v: &str) -> Self { Self(v.to_owned()) } }",
    )
    .write(
        "inbound/http/users.rs",
        "use crate::domain::user::UserId; fn handler() { let _id = UserId::new(\"ok\"); }",
    )
    .write(
        "outbound/memory/mod.rs",
        "use crate::domain::user::UserId; pub struct Store; impl Store { pub fn insert(&self, _id: UserId) {} }",
    )
    .write("main.rs", "mod server; fn main() {}")
    .write("server/mod.rs", "use user_service::outbound::memory; use actix_web::App;");
    tree
}

fn violations(outcome: Result<(), ArchitectureLintError>) -> Vec<Violation> {
    match outcome {
        Err(ArchitectureLintError::Violations(violations)) => violations,
        other => panic!("expected violations error, got: {other:?}"),
    }
}

fn assert_violation(violations: &[Violation], file: &str, substring: &str) {
    let file = Path::new(file);
    assert!(
        violations
            .iter()
            .any(|violation| violation.file == file && violation.to_string().contains(substring)),
        "expected violation in '{file:?}' containing '{substring}', got: {violations:?}"
    );
}

#[rstest]
fn layered_tree_passes(valid_tree: SourceTree) {
    let outcome = valid_tree.lint();
    assert!(outcome.is_ok(), "expected success, got: {outcome:?}");
}

#[rstest]
#[case::inbound_imports_outbound(
    "inbound/http/bad.rs",
    "use user_service::outbound::persistence::DbPool; fn handler() {}",
    "the outbound layer"
)]
#[case::inbound_imports_diesel(
    "inbound/http/bad.rs",
    "use diesel::prelude::*; fn handler() {}",
    "crate `diesel`"
)]
#[case::domain_imports_actix(
    "domain/bad.rs",
    "use actix_web::HttpResponse; fn handler() { let _ = HttpResponse::Ok(); }",
    "crate `actix_web`"
)]
#[case::outbound_imports_inbound(
    "outbound/persistence/bad.rs",
    "use crate::inbound::http; fn handler() {}",
    "the inbound layer"
)]
fn single_violation_is_reported(
    valid_tree: SourceTree,
    #[case] file: &str,
    #[case] contents: &str,
    #[case] expected: &str,
) {
    valid_tree.write(file, contents);

    let violations = violations(valid_tree.lint());

    assert_eq!(violations.len(), 1, "violations: {violations:?}");
    assert_violation(&violations, file, expected);
}

#[rstest]
fn every_violation_is_reported(valid_tree: SourceTree) {
    valid_tree
        .write(
            "inbound/http/bad.rs",
            "use crate::outbound::memory::InMemoryUserStore; fn handler() {}",
        )
        .write(
            "domain/bad.rs",
            "use actix_web::HttpResponse; fn handler() {}",
        );

    let violations = violations(valid_tree.lint());

    assert_eq!(violations.len(), 2, "violations: {violations:?}");
    assert_violation(&violations, "inbound/http/bad.rs", "the outbound layer");
    assert_violation(&violations, "domain/bad.rs", "crate `actix_web`");
}

#[rstest]
fn error_lists_every_violation(valid_tree: SourceTree) {
    valid_tree.write("outbound/memory/bad.rs", "use utoipa::ToSchema; fn thing() {}");

    let message = valid_tree.lint().expect_err("violation").to_string();

    assert!(message.starts_with("layer boundary violations:"), "{message}");
    assert!(
        message.contains("- outbound/memory/bad.rs: outbound code depends on crate `utoipa`"),
        "{message}"
    );
}

#[rstest]
fn missing_layer_directories_are_skipped() {
    let tree = SourceTree {
        root: TempDir::new().expect("tempdir"),
    };
    tree.write("domain/user.rs", "pub struct User;");

    assert!(tree.lint().is_ok());
}
