use rawtext::workspace::BufferClipboard;
use rawtext::{
    compose_command, Block, CommandKind, CommandTemplates, ComposeError, ConfirmOutcome,
    Document, EventDescriptor, EventId, EventKind, IdMinter, Inline, Selection, SpanKey,
    SpanNode, TextRun, Workspace,
};

fn descriptor(id: &str, kind: EventKind, payload: &str) -> EventDescriptor {
    EventDescriptor {
        id: EventId(id.to_string()),
        kind,
        payload: payload.to_string(),
    }
}

/// One paragraph with a plain run and a click-annotated span.
fn linked_document() -> Document {
    Document {
        blocks: vec![Block::Paragraph(vec![
            Inline::Run(TextRun::plain("visit ")),
            Inline::Span(SpanNode {
                key: SpanKey("k1".into()),
                ids: vec![EventId("e1".into())],
                children: vec![TextRun::plain("spawn")],
            }),
        ])],
    }
}

fn workspace_with_click() -> Workspace {
    let mut workspace = Workspace::with_minter(IdMinter::from_seed(21));
    workspace
        .cache
        .put(descriptor("e1", EventKind::RunCommand, "/spawn"));
    workspace
        .span_keys
        .insert(EventId("e1".into()), SpanKey("k1".into()));
    workspace
}

#[test]
fn copy_selection_hands_the_command_to_the_clipboard() {
    let workspace = workspace_with_click();
    let document = linked_document();
    let mut clipboard = BufferClipboard::default();
    workspace
        .copy_selection(
            &Selection::over(&document),
            CommandKind::Tellraw,
            &mut clipboard,
        )
        .unwrap();
    let command = clipboard.contents.expect("clipboard should hold a command");
    assert!(command.starts_with("tellraw @a "));
    assert!(command.contains(r#""clickEvent":{"action":"run_command","value":"/spawn"}"#));
    // Composing is read-only.
    assert_eq!(workspace.cache.len(), 1);
}

#[test]
fn empty_selection_leaves_the_clipboard_alone() {
    let workspace = Workspace::with_minter(IdMinter::from_seed(21));
    let mut clipboard = BufferClipboard::default();
    let result = workspace.copy_selection(
        &Selection::over(&Document::new()),
        CommandKind::Tellraw,
        &mut clipboard,
    );
    assert_eq!(result, Err(ComposeError::EmptySelection));
    assert!(clipboard.contents.is_none());
}

#[test]
fn unwrap_span_prunes_the_cache_before_the_tree() {
    let mut workspace = workspace_with_click();
    let mut document = linked_document();

    workspace.unwrap_span(&mut document, &SpanKey("k1".into()));

    assert!(workspace.cache.get(&EventId("e1".into())).is_none());
    assert!(workspace.span_keys.get(&EventId("e1".into())).is_none());
    match &document.blocks[0] {
        Block::Paragraph(inlines) => {
            assert_eq!(inlines.len(), 2);
            assert!(inlines.iter().all(|i| matches!(i, Inline::Run(_))));
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn stale_span_references_encode_without_actions() {
    let mut workspace = workspace_with_click();
    let mut pruned_document = linked_document();
    workspace.unwrap_span(&mut pruned_document, &SpanKey("k1".into()));

    // A layout captured before the unwrap still references e1; encoding it
    // against the pruned cache must simply omit the action.
    let stale_document = linked_document();
    let command = compose_command(
        &Selection::over(&stale_document),
        CommandKind::Nbt,
        &workspace.cache,
        &CommandTemplates::default(),
    )
    .unwrap();
    assert!(!command.contains("clickEvent"));
    assert!(command.contains("spawn"));
}

#[test]
fn clear_formatting_resets_runs_and_unwraps_spans() {
    let mut workspace = workspace_with_click();
    let mut document = linked_document();
    match &mut document.blocks[0] {
        Block::Paragraph(inlines) => match &mut inlines[0] {
            Inline::Run(run) => {
                run.format.bold = true;
                run.color = Some("red".into());
            }
            other => panic!("expected run, got {other:?}"),
        },
        other => panic!("expected paragraph, got {other:?}"),
    }

    workspace.clear_formatting(&mut document);

    assert!(workspace.cache.is_empty());
    match &document.blocks[0] {
        Block::Paragraph(inlines) => {
            for inline in inlines {
                match inline {
                    Inline::Run(run) => {
                        assert!(run.format.is_plain());
                        assert!(run.color.is_none());
                    }
                    other => panic!("expected run, got {other:?}"),
                }
            }
        }
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn import_merges_events_and_replaces_the_document() {
    let mut workspace = Workspace::with_minter(IdMinter::from_seed(4));
    let mut document = Document::new();
    let raw = r#"{"text":"go ","extra":[{"text":"here","clickEvent":{"action":"open_url","value":"https://example.com"}}]}"#;

    workspace.import(raw, &mut document).unwrap();

    assert_eq!(workspace.cache.len(), 1);
    assert_eq!(workspace.span_keys.len(), 1);
    assert_eq!(document.preview(), "go here");
    let ids = document.annotation_ids();
    assert_eq!(ids.len(), 1);
    assert_eq!(
        workspace.cache.get(&ids[0]).map(|d| d.kind),
        Some(EventKind::OpenUrl)
    );
}

#[test]
fn failed_import_changes_nothing() {
    let mut workspace = workspace_with_click();
    let mut document = linked_document();
    let before = document.clone();

    assert!(workspace.import("{\"text\":", &mut document).is_err());

    assert_eq!(document, before);
    assert_eq!(workspace.cache.len(), 1);
    assert_eq!(workspace.span_keys.len(), 1);
}

#[test]
fn add_proceed_stores_a_record_and_clears_the_editor() {
    let mut workspace = Workspace::with_minter(IdMinter::from_seed(8));
    let mut document = linked_document();

    workspace.add(&mut document, ConfirmOutcome::Proceed);

    assert_eq!(workspace.compositions.len(), 1);
    assert_eq!(workspace.compositions[0].preview, "visit spawn");
    assert!(document.is_empty());
    assert_eq!(workspace.active, None);
}

#[test]
fn add_discard_clears_without_saving() {
    let mut workspace = Workspace::with_minter(IdMinter::from_seed(8));
    let mut document = linked_document();

    workspace.add(&mut document, ConfirmOutcome::DeclineWithDiscard);

    assert!(workspace.compositions.is_empty());
    assert!(document.is_empty());
}

#[test]
fn add_cancel_is_a_no_op() {
    let mut workspace = Workspace::with_minter(IdMinter::from_seed(8));
    let mut document = linked_document();

    workspace.add(&mut document, ConfirmOutcome::DeclineWithCancel);

    assert!(workspace.compositions.is_empty());
    assert!(!document.is_empty());
}

#[test]
fn save_refreshes_the_open_record() {
    let mut workspace = Workspace::with_minter(IdMinter::from_seed(8));
    let mut document = linked_document();
    workspace.add(&mut document, ConfirmOutcome::Proceed);

    let mut reopened = Document::new();
    assert!(workspace.open(0, &mut reopened));
    reopened
        .blocks
        .push(Block::Paragraph(vec![Inline::Run(TextRun::plain("more"))]));
    let record_id = workspace.compositions[0].id.clone();

    workspace.save(&mut reopened);

    assert_eq!(workspace.compositions.len(), 1);
    assert_eq!(workspace.compositions[0].id, record_id);
    assert_eq!(workspace.compositions[0].preview, "visit spawn\nmore");
}

#[test]
fn reset_needs_an_explicit_proceed() {
    let mut workspace = workspace_with_click();
    let mut document = linked_document();
    workspace.snapshot(&document);

    workspace.reset(&mut document, ConfirmOutcome::DeclineWithCancel);
    assert_eq!(workspace.cache.len(), 1);
    assert!(!document.is_empty());

    workspace.reset(&mut document, ConfirmOutcome::Proceed);
    assert!(workspace.cache.is_empty());
    assert!(workspace.span_keys.is_empty());
    assert!(workspace.compositions.is_empty());
    assert!(workspace.current.is_none());
    assert!(document.is_empty());
}

#[test]
fn session_state_roundtrips_through_the_external_store() {
    let mut workspace = workspace_with_click();
    let mut document = linked_document();
    workspace.snapshot(&document);
    workspace.add(&mut document, ConfirmOutcome::Proceed);

    let json = serde_json::to_string(&workspace.persistable()).unwrap();
    let state: rawtext::SessionState = serde_json::from_str(&json).unwrap();
    let restored = Workspace::restore(state);

    assert_eq!(restored.cache.len(), 1);
    assert_eq!(restored.span_keys.len(), 1);
    assert_eq!(restored.compositions.len(), 1);
    assert_eq!(restored.compositions[0].preview, "visit spawn");
    assert_eq!(restored.active, None);
}

#[test]
fn compose_then_import_reproduces_structure_and_events() {
    let workspace = workspace_with_click();
    let document = linked_document();
    let command = compose_command(
        &Selection::over(&document),
        CommandKind::Nbt,
        &workspace.cache,
        &workspace.templates,
    )
    .unwrap();

    let mut target = Workspace::with_minter(IdMinter::from_seed(77));
    let mut rebuilt = Document::new();
    target.import(&command, &mut rebuilt).unwrap();

    assert_eq!(rebuilt.preview(), document.preview());
    let ids = rebuilt.annotation_ids();
    assert_eq!(ids.len(), 1);
    // Fresh identifier, same action.
    assert_ne!(ids[0], EventId("e1".into()));
    let event = target.cache.get(&ids[0]).expect("event should be cached");
    assert_eq!(event.kind, EventKind::RunCommand);
    assert_eq!(event.payload, "/spawn");
}
