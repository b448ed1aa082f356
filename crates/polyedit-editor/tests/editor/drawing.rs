//! Drawing new shapes click by click.

use crate::common::{draw_closed, square};
use polyedit_core::Point;
use polyedit_editor::{
    ChainKind, EditOutcome, EditorState, Handle, InMemoryRegistry, PointRole, PolygonEditor,
    RegistryEvent, Validity,
};
use polyedit_settings::EditorConfig;

#[test]
fn test_clicks_append_vertices_with_fillers() {
    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Closed, EditorConfig::default());

    assert_eq!(
        editor.pointer_down(Point::new(0.0, 0.0), None, &mut registry),
        EditOutcome::VertexAdded(0)
    );
    assert_eq!(
        editor.pointer_down(Point::new(40.0, 0.0), None, &mut registry),
        EditOutcome::VertexAdded(2)
    );

    let chain = editor.chain();
    assert_eq!(chain.len(), 3);
    assert_eq!(chain.get(1).unwrap().role, PointRole::Mid);
    assert_eq!(chain.get(1).unwrap().position, Point::new(20.0, 0.0));
    assert_eq!(registry.temporary_points(label).len(), 2);
    assert_eq!(registry.shape_count(), 0);
}

#[test]
fn test_closing_square_commits_vertices() {
    let mut registry = InMemoryRegistry::new();
    let editor = square(&mut registry, 40.0);
    let label = editor.label();

    assert_eq!(editor.state(), &EditorState::EditIdle);
    assert!(editor.chain().is_closed());
    assert_eq!(editor.chain().len(), 8);
    assert_eq!(editor.validity(), Validity::Valid);

    let record = registry.shape(label).unwrap();
    assert_eq!(record.kind, ChainKind::Closed);
    assert_eq!(record.points.len(), 4);
    assert!(record.points.iter().all(|p| p.role == PointRole::Vertex));
    assert!(registry.temporary_points(label).is_empty());

    for point in editor.chain().vertices() {
        assert_eq!(point.label(), Some(label));
        assert_eq!(registry.owner_of(point.id()), Some(label));
    }
    // Fillers are never handed to the registry
    let mid = editor.chain().get(1).unwrap();
    assert_eq!(mid.label(), None);
    assert_eq!(registry.owner_of(mid.id()), None);
    assert_eq!(registry.events().last(), Some(&RegistryEvent::LabelUpdated(label)));
}

#[test]
fn test_clicking_handle_zero_closes() {
    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Closed, EditorConfig::default());
    for (x, y) in [(0.0, 0.0), (40.0, 0.0), (40.0, 40.0)] {
        editor.pointer_down(Point::new(x, y), None, &mut registry);
    }

    let outcome = editor.pointer_down(Point::new(100.0, 100.0), Some(Handle::Point(0)), &mut registry);
    assert_eq!(outcome, EditOutcome::Committed(Validity::Valid));
    assert_eq!(editor.chain().vertex_count(), 3);
}

#[test]
fn test_two_vertices_never_close() {
    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Closed, EditorConfig::default());
    editor.pointer_down(Point::new(0.0, 0.0), None, &mut registry);
    editor.pointer_down(Point::new(40.0, 0.0), None, &mut registry);

    let outcome = editor.pointer_down(Point::new(1.0, 1.0), None, &mut registry);
    assert_eq!(outcome, EditOutcome::VertexAdded(4));
    assert!(editor.is_drawing());
}

#[test]
fn test_close_zone_is_measured_on_screen() {
    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Closed, EditorConfig::default());
    editor.set_scale(0.5);
    for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
        editor.pointer_down(Point::new(x, y), None, &mut registry);
    }

    // 12 canvas units is 6 screen pixels at half scale
    let outcome = editor.pointer_down(Point::new(12.0, 0.0), None, &mut registry);
    assert!(matches!(outcome, EditOutcome::Committed(_)));
}

#[test]
fn test_set_scale_rejects_bad_values() {
    let label = InMemoryRegistry::new().allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Closed, EditorConfig::default());
    assert!(editor.set_scale(2.0));
    assert!(!editor.set_scale(0.0));
    assert!(!editor.set_scale(-1.0));
    assert!(!editor.set_scale(f64::NAN));
    assert_eq!(editor.scale(), 2.0);
}

#[test]
fn test_close_follows_highlight_marker() {
    let mut config = EditorConfig::default();
    config.style.highlight_radius = 20.0;
    assert!(config.validate().is_ok());

    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Closed, config);
    for (x, y) in [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0)] {
        editor.pointer_down(Point::new(x, y), None, &mut registry);
    }

    let outcome = editor.pointer_down(Point::new(25.0, 0.0), None, &mut registry);
    assert_eq!(outcome, EditOutcome::VertexAdded(6));

    let outcome = editor.pointer_down(Point::new(0.0, 10.0), None, &mut registry);
    assert!(matches!(outcome, EditOutcome::Committed(_)));
    assert_eq!(registry.shape(label).unwrap().points.len(), 4);
}

#[test]
fn test_tiny_shape_commits_but_is_invalid() {
    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Closed, EditorConfig::default());
    editor.pointer_down(Point::new(0.0, 0.0), None, &mut registry);
    editor.pointer_down(Point::new(4.0, 0.0), None, &mut registry);
    editor.pointer_down(Point::new(4.0, 4.0), None, &mut registry);

    // Inside the enlarged marker of the first vertex
    let outcome = editor.pointer_down(Point::new(0.0, 4.0), None, &mut registry);
    assert_eq!(
        outcome,
        EditOutcome::Committed(Validity::TooSmall {
            area: 16.0,
            min_area: 25.0
        })
    );
    assert_eq!(registry.shape(label).unwrap().points.len(), 3);
}

#[test]
fn test_polyline_finishes_on_last_vertex() {
    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Open, EditorConfig::default());
    for (x, y) in [(0.0, 0.0), (40.0, 0.0), (40.0, 40.0)] {
        editor.pointer_down(Point::new(x, y), None, &mut registry);
    }

    // Clicking near the first vertex of a polyline just adds a vertex
    assert_eq!(
        editor.pointer_down(Point::new(2.0, 2.0), None, &mut registry),
        EditOutcome::VertexAdded(6)
    );
    let outcome = editor.pointer_down(Point::new(3.0, 2.0), None, &mut registry);
    assert_eq!(outcome, EditOutcome::Committed(Validity::Valid));

    assert_eq!(editor.chain().kind(), ChainKind::Open);
    assert_eq!(editor.chain().vertex_count(), 4);
    let record = registry.shape(label).unwrap();
    assert_eq!(record.kind, ChainKind::Open);
    assert_eq!(record.points.len(), 4);
}

#[test]
fn test_finish_needs_two_vertices() {
    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Open, EditorConfig::default());
    editor.pointer_down(Point::new(0.0, 0.0), None, &mut registry);
    assert_eq!(editor.finish(&mut registry), EditOutcome::Ignored);

    editor.pointer_down(Point::new(40.0, 0.0), None, &mut registry);
    assert_eq!(
        editor.finish(&mut registry),
        EditOutcome::Committed(Validity::TooFewVertices { count: 2, min: 3 })
    );
    assert!(!editor.is_drawing());
    assert_eq!(editor.finish(&mut registry), EditOutcome::Ignored);
}

#[test]
fn test_finish_ignores_polygons() {
    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Closed, EditorConfig::default());
    for (x, y) in [(0.0, 0.0), (40.0, 0.0), (40.0, 40.0)] {
        editor.pointer_down(Point::new(x, y), None, &mut registry);
    }
    assert_eq!(editor.finish(&mut registry), EditOutcome::Ignored);
    assert!(editor.is_drawing());
}

#[test]
fn test_cancel_discards_temporary_points() {
    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Closed, EditorConfig::default());
    editor.pointer_down(Point::new(0.0, 0.0), None, &mut registry);
    editor.pointer_down(Point::new(40.0, 0.0), None, &mut registry);

    assert_eq!(editor.cancel(&mut registry), EditOutcome::Cancelled);
    assert!(editor.chain().is_empty());
    assert!(registry.temporary_points(label).is_empty());
    assert_eq!(registry.events().last(), Some(&RegistryEvent::Discarded(label)));
}

#[test]
fn test_cancel_after_commit_is_ignored() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = draw_closed(&mut registry, &[(0.0, 0.0), (40.0, 0.0), (40.0, 40.0)]);
    assert_eq!(editor.cancel(&mut registry), EditOutcome::Ignored);
    assert_eq!(registry.shape_count(), 1);
}

#[test]
fn test_pointer_move_tracks_cursor_while_drawing() {
    let mut registry = InMemoryRegistry::new();
    let label = registry.allocate_label();
    let mut editor = PolygonEditor::begin(label, ChainKind::Closed, EditorConfig::default());
    editor.pointer_down(Point::new(0.0, 0.0), None, &mut registry);
    editor.pointer_move(Point::new(15.0, 5.0), None);

    assert_eq!(
        editor.state(),
        &EditorState::Draw {
            cursor: Some(Point::new(15.0, 5.0))
        }
    );
    assert_eq!(editor.chain().len(), 1);
}
