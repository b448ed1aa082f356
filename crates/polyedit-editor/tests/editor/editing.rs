//! Editing committed shapes: delete, promote, curve toggle and drags.

use crate::common::{pentagon, square};
use polyedit_core::{ChainError, Point};
use polyedit_editor::{
    EditOutcome, EditorState, Handle, InMemoryRegistry, PointRole, PolygonEditor, RegistryEvent,
    Validity,
};
use polyedit_settings::EditorConfig;

const ANYWHERE: Point = Point { x: 0.0, y: 0.0 };

#[test]
fn test_square_refuses_vertex_deletion() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);
    let before = editor.chain().clone();
    registry.take_events();

    editor.key_down("Alt");
    let outcome = editor.pointer_down(ANYWHERE, Some(Handle::Point(2)), &mut registry);

    assert_eq!(outcome, EditOutcome::Ignored);
    assert_eq!(editor.chain(), &before);
    assert!(registry.events().is_empty());
    assert_eq!(editor.state(), &EditorState::EditIdle);
}

#[test]
fn test_delete_vertex_from_pentagon() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = pentagon(&mut registry);
    let label = editor.label();
    let doomed = editor.chain().get(2).unwrap().id();

    editor.key_down("Alt");
    let outcome = editor.pointer_down(ANYWHERE, Some(Handle::Point(2)), &mut registry);

    assert_eq!(outcome, EditOutcome::VertexDeleted);
    assert_eq!(editor.chain().vertex_count(), 4);
    assert_eq!(editor.chain().len(), 8);
    assert!(editor.chain().check_fillers().is_ok());
    assert_eq!(registry.owner_of(doomed), None);
    assert_eq!(registry.shape(label).unwrap().points.len(), 4);
    assert!(registry
        .events()
        .contains(&RegistryEvent::Unassociated(label, doomed)));
}

#[test]
fn test_alt_click_on_filler_is_ignored() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = pentagon(&mut registry);
    editor.key_down("Alt");
    assert_eq!(
        editor.pointer_down(ANYWHERE, Some(Handle::Point(1)), &mut registry),
        EditOutcome::Ignored
    );
    assert_eq!(editor.chain().vertex_count(), 5);
}

#[test]
fn test_released_key_no_longer_deletes() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = pentagon(&mut registry);
    editor.key_down("Alt");
    editor.key_up("Alt");

    let outcome = editor.pointer_down(ANYWHERE, Some(Handle::Point(2)), &mut registry);
    assert_eq!(outcome, EditOutcome::DragStarted(Handle::Point(2)));
    assert_eq!(editor.chain().vertex_count(), 5);
}

#[test]
fn test_clicking_midpoint_promotes_and_drags() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);
    let label = editor.label();

    let outcome = editor.pointer_down(ANYWHERE, Some(Handle::Point(1)), &mut registry);
    assert_eq!(outcome, EditOutcome::DragStarted(Handle::Point(2)));
    assert!(matches!(editor.state(), EditorState::EditDrag { .. }));

    let chain = editor.chain();
    assert_eq!(chain.vertex_count(), 5);
    assert_eq!(chain.get(2).unwrap().role, PointRole::Vertex);
    assert_eq!(chain.get(1).unwrap().position, Point::new(10.0, 0.0));
    assert_eq!(chain.get(3).unwrap().position, Point::new(30.0, 0.0));
    assert_eq!(registry.shape(label).unwrap().points.len(), 5);

    assert_eq!(
        editor.pointer_drag(Point::new(0.0, -10.0), &mut registry),
        EditOutcome::Dragged
    );
    assert_eq!(editor.chain().get(2).unwrap().position, Point::new(20.0, -10.0));
    assert_eq!(registry.shape(label).unwrap().points[1].y, -10.0);

    assert_eq!(editor.pointer_up(), EditOutcome::Released);
    assert_eq!(editor.state(), &EditorState::EditIdle);
}

#[test]
fn test_drag_deltas_are_cumulative() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);

    editor.pointer_down(ANYWHERE, Some(Handle::Point(4)), &mut registry);
    editor.pointer_drag(Point::new(5.0, 5.0), &mut registry);
    editor.pointer_drag(Point::new(5.0, 5.0), &mut registry);
    editor.pointer_drag(Point::new(10.0, 0.0), &mut registry);
    editor.pointer_up();

    assert_eq!(editor.chain().get(4).unwrap().position, Point::new(50.0, 40.0));
    // Fillers stay where they were
    assert_eq!(editor.chain().get(3).unwrap().position, Point::new(40.0, 20.0));
}

#[test]
fn test_shape_drag_moves_every_point() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);
    let label = editor.label();
    let before = editor.chain().positions();

    assert_eq!(
        editor.pointer_down(Point::new(20.0, 20.0), Some(Handle::Shape), &mut registry),
        EditOutcome::DragStarted(Handle::Shape)
    );
    editor.pointer_drag(Point::new(3.0, -2.0), &mut registry);
    editor.pointer_drag(Point::new(3.0, -2.0), &mut registry);
    editor.pointer_up();

    let after = editor.chain().positions();
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(*new, *old + Point::new(3.0, -2.0));
    }
    assert_eq!(registry.shape(label).unwrap().points[0].x, 3.0);
}

#[test]
fn test_drag_without_pointer_down_is_ignored() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);
    assert_eq!(
        editor.pointer_drag(Point::new(1.0, 1.0), &mut registry),
        EditOutcome::Ignored
    );
    assert_eq!(editor.pointer_up(), EditOutcome::Released);
}

#[test]
fn test_toggle_curve_round_trip() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);
    let label = editor.label();

    editor.key_down("Shift");
    assert_eq!(
        editor.pointer_down(ANYWHERE, Some(Handle::Point(1)), &mut registry),
        EditOutcome::CurveToggled
    );
    assert_eq!(editor.chain().len(), 9);
    let record = registry.shape(label).unwrap();
    assert_eq!(record.points.len(), 6);
    assert_eq!(
        record.points.iter().filter(|p| p.role == PointRole::Curve).count(),
        2
    );
    let control = editor.chain().get(2).unwrap().id();
    assert_eq!(registry.owner_of(control), Some(label));

    // Clicking either control point straightens the gap again
    assert_eq!(
        editor.pointer_down(ANYWHERE, Some(Handle::Point(2)), &mut registry),
        EditOutcome::CurveToggled
    );
    assert_eq!(editor.chain().len(), 8);
    let mid = editor.chain().get(1).unwrap();
    assert_eq!(mid.role, PointRole::Mid);
    assert_eq!(mid.position, Point::new(20.0, 0.0));
    assert_eq!(registry.owner_of(control), None);
    assert_eq!(registry.shape(label).unwrap().points.len(), 4);
}

#[test]
fn test_straighten_after_dragging_bounding_vertex() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);

    editor.key_down("Shift");
    editor.pointer_down(ANYWHERE, Some(Handle::Point(1)), &mut registry);
    editor.key_up("Shift");

    assert_eq!(
        editor.pointer_down(ANYWHERE, Some(Handle::Point(3)), &mut registry),
        EditOutcome::DragStarted(Handle::Point(3))
    );
    assert_eq!(
        editor.pointer_drag(Point::new(20.0, 0.0), &mut registry),
        EditOutcome::Dragged
    );
    assert_eq!(editor.pointer_up(), EditOutcome::Released);
    assert_eq!(editor.chain().get(3).unwrap().position, Point::new(60.0, 0.0));

    editor.key_down("Shift");
    assert_eq!(
        editor.pointer_down(ANYWHERE, Some(Handle::Point(2)), &mut registry),
        EditOutcome::CurveToggled
    );
    let mid = editor.chain().get(1).unwrap();
    assert_eq!(mid.role, PointRole::Mid);
    assert_eq!(mid.position, Point::new(30.0, 0.0));
}

#[test]
fn test_shift_click_on_vertex_is_ignored() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);
    editor.key_down("Shift");
    assert_eq!(
        editor.pointer_down(ANYWHERE, Some(Handle::Point(0)), &mut registry),
        EditOutcome::Ignored
    );
}

#[test]
fn test_dragging_vertex_across_shape_is_invalid() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 10.0);
    assert_eq!(editor.validity(), Validity::Valid);

    editor.pointer_down(ANYWHERE, Some(Handle::Point(4)), &mut registry);
    editor.pointer_drag(Point::new(-15.0, -5.0), &mut registry);
    editor.pointer_up();

    assert_eq!(editor.chain().get(4).unwrap().position, Point::new(-5.0, 5.0));
    assert_eq!(
        editor.validity(),
        Validity::SelfIntersecting {
            first: 1,
            second: 3
        }
    );
}

#[test]
fn test_out_of_range_handle_is_ignored() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);
    assert_eq!(
        editor.pointer_down(ANYWHERE, Some(Handle::Point(99)), &mut registry),
        EditOutcome::Ignored
    );
    assert_eq!(
        editor.pointer_down(ANYWHERE, None, &mut registry),
        EditOutcome::Ignored
    );
}

#[test]
fn test_hover_sets_highlight() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);
    editor.pointer_move(Point::new(1.0, 1.0), Some(Handle::Point(0)));
    assert_eq!(editor.highlight(), Some(Handle::Point(0)));
    editor.pointer_move(Point::new(100.0, 100.0), None);
    assert_eq!(editor.highlight(), None);
}

#[test]
fn test_geometric_hit_test() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);

    assert_eq!(editor.hit_test(Point::new(1.0, 1.0)), Some(Handle::Point(0)));
    assert_eq!(editor.hit_test(Point::new(20.0, 1.0)), Some(Handle::Point(1)));
    assert_eq!(editor.hit_test(Point::new(20.0, 20.0)), Some(Handle::Shape));
    assert_eq!(editor.hit_test(Point::new(60.0, 60.0)), None);

    // Radius shrinks in canvas units when zoomed in
    editor.set_scale(2.0);
    assert_eq!(editor.hit_test(Point::new(3.0, 3.0)), Some(Handle::Shape));
}

#[test]
fn test_reopen_from_record() {
    let mut registry = InMemoryRegistry::new();
    let mut editor = square(&mut registry, 40.0);
    editor.key_down("Shift");
    editor.pointer_down(ANYWHERE, Some(Handle::Point(3)), &mut registry);

    let record = registry.shape(editor.label()).unwrap().clone();
    let reopened = PolygonEditor::from_record(&record, EditorConfig::default()).unwrap();

    assert_eq!(reopened.state(), &EditorState::EditIdle);
    assert_eq!(reopened.chain().positions(), editor.chain().positions());
    assert_eq!(reopened.chain().kind(), editor.chain().kind());
    assert!(reopened
        .chain()
        .points()
        .iter()
        .filter(|p| p.role.is_persisted())
        .all(|p| p.label() == Some(record.label)));
}

#[test]
fn test_reopen_rejects_short_record() {
    let mut registry = InMemoryRegistry::new();
    let editor = square(&mut registry, 40.0);
    let mut record = registry.shape(editor.label()).unwrap().clone();
    record.points.truncate(2);

    let err = PolygonEditor::from_record(&record, EditorConfig::default()).unwrap_err();
    assert_eq!(err, ChainError::TooFewVertices { count: 2, min: 3 });
}
