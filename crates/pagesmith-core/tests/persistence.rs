//! Saving and restoring documents through the storage backends.

use pagesmith_core::builder::ColumnPath;
use pagesmith_core::kanva::{DEFAULT_PAGE_SIZE, ShapeKind};
use pagesmith_core::storage::{LAST_DOCUMENT_KEY, export_file, import_file};
use pagesmith_core::{
    AutoSaveManager, CanvasElement, ElementKind, Funnel, KanvaDesign, KanvaEditor, MemoryStorage,
    PageEditor, SaveStatus, SectionConfig, StepKind,
};
use pretty_assertions::assert_eq;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

/// The bundled backends complete without suspending.
fn block_on<F: Future>(f: F) -> F::Output {
    let mut cx = Context::from_waker(Waker::noop());
    let mut f = std::pin::pin!(f);
    loop {
        if let Poll::Ready(output) = f.as_mut().poll(&mut cx) {
            return output;
        }
    }
}

#[test]
fn funnel_survives_autosave_and_restore() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut funnel = Funnel::new("Spring launch");
    let checkout = funnel.add_step("Checkout", StepKind::Checkout);

    let mut editor = PageEditor::new();
    assert!(editor.open_step(&mut funnel, checkout));
    let section = editor.add_section(SectionConfig::with_rows([2])).unwrap();
    let row = editor.tree().section(section).unwrap().rows[0].id;
    let column = editor.tree().row(section, row).unwrap().columns[0].id;
    editor
        .add_element(ColumnPath { section, row, column }, ElementKind::OrderForm, None)
        .unwrap();
    funnel.commit_sections(editor.tree());

    let storage = Arc::new(MemoryStorage::new());
    let mut autosave = AutoSaveManager::new(Arc::clone(&storage));
    autosave.mark_dirty();
    let receipt = block_on(autosave.save(&funnel));
    assert!(receipt.success);
    assert_eq!(autosave.status(), SaveStatus::Saved);

    let ids = block_on(autosave.list_documents()).unwrap();
    assert_eq!(ids, vec![funnel.id.to_string()]);
    assert!(block_on(autosave.exists(LAST_DOCUMENT_KEY)).unwrap());

    let mut restored_from = AutoSaveManager::new(storage);
    let restored: Funnel = block_on(restored_from.load_last()).unwrap();
    assert_eq!(restored, funnel);
    assert_eq!(restored_from.document_id(), Some(funnel.id.to_string().as_str()));

    let mut reopened = PageEditor::new();
    let mut restored = restored;
    assert!(reopened.open_step(&mut restored, checkout));
    assert_eq!(reopened.tree(), editor.tree());
}

#[test]
fn design_export_import_round_trip() {
    let mut editor = KanvaEditor::new(KanvaDesign::new("Story", DEFAULT_PAGE_SIZE));
    editor.add_element(CanvasElement::text("Summer sale", 120.0, 80.0));
    editor.add_element(CanvasElement::shape(ShapeKind::Ellipse, 400.0, 400.0, 200.0, 200.0));
    editor.add_page();
    let design = editor.into_design();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("story.kanva.json");
    export_file(&design, &path).unwrap();
    let imported: KanvaDesign = import_file(&path).unwrap();

    assert_eq!(imported, design);
    assert_eq!(imported.pages.len(), 2);
    assert_eq!(imported.pages[0].elements.len(), 2);
}

#[test]
fn import_rejects_foreign_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.json");
    std::fs::write(&path, r#"{"title": "not a design"}"#).unwrap();

    assert!(import_file::<KanvaDesign>(&path).is_err());
}
