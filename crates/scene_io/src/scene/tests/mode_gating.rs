//! Read-only sessions reject every mutation and stay unchanged

use crate::backends::MemoryBackend;
use crate::scene::{
    AttributeValue, Bound3, Camera, MissingBehaviour, Name, NodeDocument, OpenMode, Path, Sampled,
    SceneError, SceneInterface, SceneObject, TransformData,
};

fn populated_document() -> NodeDocument {
    let mut geo = NodeDocument::default();
    let mut bounds = Sampled::new();
    bounds
        .insert(0.0, Bound3::from_corners([0.0; 3], [1.0; 3]), false)
        .unwrap();
    geo.data.bounds = bounds;

    let mut root = NodeDocument::default();
    root.children.insert(Name::new("geo").unwrap(), geo);
    root
}

fn read_scene() -> SceneInterface {
    SceneInterface::from_backend(MemoryBackend::from_document(
        populated_document(),
        OpenMode::READ,
    ))
}

fn assert_read_only<T: std::fmt::Debug>(result: Result<T, SceneError>) {
    match result {
        Err(SceneError::ReadOnlyViolation { .. }) => {}
        other => panic!("expected ReadOnlyViolation, got {other:?}"),
    }
}

#[test]
fn test_every_mutation_is_rejected() {
    let root = read_scene();
    let geo = root.child_or_throw("geo").unwrap();
    let bound = Bound3::from_corners([5.0; 3], [6.0; 3]);

    assert_read_only(root.create_child("new"));
    assert_read_only(root.child("new", MissingBehaviour::CreateIfMissing));
    assert_read_only(root.scene(
        &"/x/y".parse::<Path>().unwrap(),
        MissingBehaviour::CreateIfMissing,
    ));
    assert_read_only(geo.write_bound(&bound, 0.0));
    assert_read_only(geo.write_bound(&bound, 2.0));
    assert_read_only(geo.write_transform(&TransformData::identity(), 0.0));
    assert_read_only(geo.write_attribute("a", &AttributeValue::Int(1), 0.0));
    assert_read_only(geo.write_object(&SceneObject::Camera(Camera::default()), 0.0));
}

#[test]
fn test_rejected_mutations_leave_no_trace() {
    let root = read_scene();
    let geo = root.child_or_throw("geo").unwrap();

    let _ = root.create_child("new");
    let _ = root.scene(&"/x/y".parse::<Path>().unwrap(), MissingBehaviour::CreateIfMissing);
    let _ = geo.write_bound(&Bound3::from_corners([5.0; 3], [6.0; 3]), 0.0);
    let _ = geo.write_attribute("a", &AttributeValue::Int(1), 0.0);
    let _ = geo.write_transform(&TransformData::identity(), 0.0);

    let names: Vec<String> = root.child_names().unwrap().into_iter().map(String::from).collect();
    assert_eq!(names, vec!["geo"]);
    assert_eq!(
        geo.read_bound(0.0).unwrap(),
        Bound3::from_corners([0.0; 3], [1.0; 3])
    );
    assert!(!geo.has_attribute("a").unwrap());
    assert!(!geo.has_transform().unwrap());
}

#[test]
fn test_reads_and_lookups_still_work() {
    let root = read_scene();
    assert!(root.mode().is_read_only());
    assert!(root.child("missing", MissingBehaviour::NullIfMissing).unwrap().is_none());
    assert!(root.child_or_throw("missing").unwrap_err().is_not_found());
    assert!(root.has_child("geo").unwrap());
    assert!(root.flush().is_ok());
}

#[test]
fn test_append_allows_new_samples_only() {
    let root = SceneInterface::from_backend(MemoryBackend::from_document(
        populated_document(),
        OpenMode::APPEND,
    ));
    let geo = root.child_or_throw("geo").unwrap();
    let later = Bound3::from_corners([0.0; 3], [3.0; 3]);

    assert!(matches!(
        geo.write_bound(&later, 0.0),
        Err(SceneError::FinalizedData { .. })
    ));
    geo.write_bound(&later, 1.0).unwrap();
    geo.write_bound(&later, 1.0).unwrap();
    assert_eq!(geo.read_bound(1.0).unwrap(), later);

    let extra = root.create_child("extra").unwrap();
    extra.write_attribute("note", &"hello".into(), 0.0).unwrap();
    assert_eq!(
        extra.read_attribute("note", 0.0).unwrap(),
        AttributeValue::String("hello".to_string())
    );
}
