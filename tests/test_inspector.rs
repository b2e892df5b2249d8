//! The `Inspector` facade end to end.

use std::fs;
use std::path::{Path, PathBuf};

use inspector::hir::{Severity, canonical_path, codes};
use inspector::ide::{Reference, RenameOutcome};
use inspector::{Inspector, InspectorConfig, SourceRange};
use rstest::{fixture, rstest};
use tempfile::TempDir;

/// A workspace with a packages directory next to it:
///
/// ```text
/// packages/console.ol
/// ws/shapes.ol
/// ws/main.ol
/// ws/app/view.ol
/// ```
struct Setup {
    _tmp: TempDir,
    root: PathBuf,
    packages: PathBuf,
    inspector: Inspector,
}

impl Setup {
    fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

#[fixture]
fn setup() -> Setup {
    let tmp = tempfile::tempdir().unwrap();
    let packages = tmp.path().join("packages");
    let root = tmp.path().join("ws");
    fs::create_dir_all(&packages).unwrap();
    fs::create_dir_all(root.join("app")).unwrap();

    fs::write(packages.join("console.ol"), "service Console {}\ninterface ConsoleAPI {}").unwrap();
    fs::write(root.join("shapes.ol"), "type Shape: void\ntype Square: Shape").unwrap();
    fs::write(
        root.join("main.ol"),
        "from console import Console\nfrom .shapes import Shape as Form\n\nservice Main { Form Console }",
    )
    .unwrap();
    fs::write(root.join("app/view.ol"), "from ..shapes import Shape\ntype View: Shape").unwrap();

    let inspector = Inspector::new(InspectorConfig::new().with_packages_dir(&packages));
    Setup {
        _tmp: tmp,
        root,
        packages,
        inspector,
    }
}

fn write(path: &Path, text: &str) {
    fs::write(path, text).unwrap();
}

#[rstest]
fn test_resolve_word_from_buffer(setup: Setup) {
    let word = setup
        .inspector
        .resolve_word(&setup.file("main.ol"), Some("x = foo(1,2)"), 0, 6);
    assert_eq!(word, "foo");
}

#[rstest]
fn test_resolve_word_from_disk(setup: Setup) {
    let word = setup.inspector.resolve_word(&setup.file("main.ol"), None, 3, 16);
    assert_eq!(word, "Form");
}

#[rstest]
fn test_find_definition_through_alias(setup: Setup) {
    let target = setup
        .inspector
        .find_definition(&setup.file("main.ol"), None, 3, 16)
        .unwrap();

    assert_eq!(target.module, canonical_path(&setup.file("shapes.ol")));
    assert_eq!(target.range, SourceRange::new(0, 5, 10));
    assert_eq!(target.symbol_name, "Shape");
}

#[rstest]
fn test_find_definition_in_packages_dir(setup: Setup) {
    let target = setup
        .inspector
        .find_definition(&setup.file("main.ol"), None, 0, 22)
        .unwrap();

    assert_eq!(target.module, canonical_path(&setup.packages.join("console.ol")));
    assert_eq!(target.range, SourceRange::new(0, 8, 15));
}

#[rstest]
fn test_find_definition_uses_unsaved_buffer(setup: Setup) {
    let buffer = "type Circle: void\ntype Ring: Circle";
    let target = setup
        .inspector
        .find_definition(&setup.file("main.ol"), Some(buffer), 1, 13)
        .unwrap();

    assert_eq!(target.range, SourceRange::new(0, 5, 11));
    assert!(setup.inspector.find_definition(&setup.file("main.ol"), Some(buffer), 0, 0).is_none());
}

#[rstest]
fn test_rename_skips_package_symbol(setup: Setup) {
    let outcome = setup
        .inspector
        .plan_rename(&setup.file("main.ol"), 3, 22, &setup.root)
        .unwrap();

    let RenameOutcome::Skipped(notice) = outcome else {
        panic!("expected the rename to be skipped, got {outcome:?}");
    };
    let diagnostic = notice.diagnostic();
    assert_eq!(diagnostic.severity, Severity::Info);
    assert_eq!(diagnostic.code.as_deref(), Some(codes::RENAME_SKIPPED));
}

#[rstest]
fn test_rename_origin_updates_alias_source_only(setup: Setup) {
    let outcome = setup
        .inspector
        .plan_rename_symbol(&setup.file("shapes.ol"), "Shape", &setup.root)
        .unwrap();
    let plan = outcome.plan().unwrap();

    assert_eq!(plan.module_count(), 3);
    assert_eq!(plan.edits(&canonical_path(&setup.file("shapes.ol"))).len(), 2);
    assert_eq!(plan.edits(&canonical_path(&setup.file("main.ol"))).len(), 1);
    assert_eq!(plan.edits(&canonical_path(&setup.file("app/view.ol"))).len(), 2);
}

#[rstest]
fn test_find_references_matches_rename(setup: Setup) {
    let references = setup
        .inspector
        .find_references(&setup.file("app/view.ol"), 1, 12, &setup.root)
        .unwrap();
    let plan = setup
        .inspector
        .plan_rename(&setup.file("app/view.ol"), 1, 12, &setup.root)
        .unwrap();

    let planned: Vec<_> = plan
        .plan()
        .unwrap()
        .iter()
        .flat_map(|(module, edits)| {
            edits.iter().map(move |edit| Reference {
                module: module.to_path_buf(),
                range: edit.range,
            })
        })
        .collect();
    assert_eq!(references, planned);
}

#[rstest]
fn test_find_references_tolerates_broken_module(setup: Setup) {
    write(&setup.file("broken.ol"), "type");
    let references = setup
        .inspector
        .find_references(&setup.file("shapes.ol"), 0, 6, &setup.root)
        .unwrap();
    assert_eq!(references.len(), 5);

    let abandoned = setup
        .inspector
        .plan_rename(&setup.file("shapes.ol"), 0, 6, &setup.root)
        .unwrap_err();
    assert_eq!(abandoned.file, canonical_path(&setup.file("broken.ol")));
}

#[rstest]
fn test_search_workspace_ignores_packages_dir(setup: Setup) {
    let results = setup.inspector.search_workspace(&setup.root, "Console");

    assert!(results.iter().all(|module| module.module.starts_with(canonical_path(&setup.root))));
    let hits: usize = results.iter().map(|module| module.symbols.len()).sum();
    assert_eq!(hits, 1);
}

#[rstest]
fn test_complete_package_path(setup: Setup) {
    let main = setup.file("main.ol");
    assert_eq!(setup.inspector.complete_package_path(&main, "cons"), vec!["console"]);
    assert_eq!(setup.inspector.complete_package_path(&main, ".sha"), vec!["shapes"]);
    assert_eq!(setup.inspector.complete_package_path(&main, ".ap"), vec!["app"]);
}

#[rstest]
fn test_complete_import_symbol(setup: Setup) {
    let main = setup.file("main.ol");
    assert_eq!(
        setup.inspector.complete_import_symbol(&main, ".shapes", "S"),
        vec!["Shape", "Square"]
    );
    assert_eq!(
        setup.inspector.complete_import_symbol(&main, "console", "Console"),
        vec!["Console", "ConsoleAPI"]
    );
}

#[rstest]
fn test_check_module_reports_faults_and_unused_imports(setup: Setup) {
    let main = setup.file("main.ol");
    let clean = setup.inspector.check_module(&main, None);
    assert!(clean.is_empty());

    let diagnostics = setup
        .inspector
        .check_module(&main, Some("from .shapes import Shape, Square\ntype T: Shape"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].code.as_deref(), Some(codes::UNUSED_IMPORT));

    let diagnostics = setup.inspector.check_module(&main, Some("from .nowhere import X"));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Error);
}
