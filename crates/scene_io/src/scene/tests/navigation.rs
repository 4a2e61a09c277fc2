//! Navigation, missing-entity policies and field access on one session

use crate::backends::MemoryBackend;
use crate::foundation::math::{Mat4, Quat, TransformComponents, Vec3};
use crate::scene::{
    AttributeValue, Bound3, MissingBehaviour, OpenMode, Path, SceneError, SceneField,
    SceneInterface, TransformData,
};
use approx::assert_relative_eq;

fn write_scene() -> SceneInterface {
    SceneInterface::from_backend(MemoryBackend::new(OpenMode::WRITE))
}

fn path(s: &str) -> Path {
    s.parse().unwrap()
}

#[test]
fn test_root_identity() {
    let root = write_scene();
    assert_eq!(root.name(), "/");
    assert!(root.path().is_root());
    assert_eq!(root.path_as_string(), "/");
    assert!(root.parent().unwrap().is_none());
    assert!(root.file_name().is_none());
}

#[test]
fn test_throw_if_missing() {
    let root = write_scene();
    match root.child("n", MissingBehaviour::ThrowIfMissing) {
        Err(SceneError::EntityNotFound { path }) => assert_eq!(path.to_string(), "/n"),
        other => panic!("expected EntityNotFound, got {other:?}"),
    }
    assert!(root.child_or_throw("n").unwrap_err().is_not_found());
}

#[test]
fn test_null_if_missing() {
    let root = write_scene();
    assert!(root.child("n", MissingBehaviour::NullIfMissing).unwrap().is_none());
    assert!(!root.has_child("n").unwrap());
}

#[test]
fn test_create_if_missing() {
    let root = write_scene();
    let created = root
        .child("n", MissingBehaviour::CreateIfMissing)
        .unwrap()
        .unwrap();

    assert!(root.has_child("n").unwrap());
    assert_eq!(created.name(), "n");
    assert_eq!(created.path_as_string(), "/n");

    let again = root.child("n", MissingBehaviour::CreateIfMissing).unwrap().unwrap();
    assert!(again.same_node(&created));
    assert_eq!(root.child_names().unwrap().len(), 1);
}

#[test]
fn test_default_policy_is_throw() {
    assert_eq!(MissingBehaviour::default(), MissingBehaviour::ThrowIfMissing);
}

#[test]
fn test_duplicate_creation() {
    let root = write_scene();
    root.create_child("x").unwrap();

    assert!(matches!(
        root.create_child("x"),
        Err(SceneError::DuplicateEntity { .. })
    ));
    let names = root.child_names().unwrap();
    assert_eq!(names.iter().filter(|name| name.as_str() == "x").count(), 1);
}

#[test]
fn test_invalid_child_name() {
    let root = write_scene();
    assert!(matches!(root.create_child("a/b"), Err(SceneError::MalformedPath(_))));
    assert!(matches!(root.create_child(""), Err(SceneError::MalformedPath(_))));
}

#[test]
fn test_scene_creates_every_intermediate() {
    let root = write_scene();
    let leaf = root
        .scene(&path("/a/b/c"), MissingBehaviour::CreateIfMissing)
        .unwrap()
        .unwrap();
    assert_eq!(leaf.path_as_string(), "/a/b/c");

    let a = root.child_or_throw("a").unwrap();
    let b = a.child_or_throw("b").unwrap();
    assert!(root.has_child("a").unwrap());
    assert!(a.has_child("b").unwrap());
    assert!(b.has_child("c").unwrap());
}

#[test]
fn test_scene_policy_applies_at_first_missing_segment() {
    let root = write_scene();
    root.create_child("a").unwrap();

    assert!(root
        .scene(&path("/a/b/c"), MissingBehaviour::NullIfMissing)
        .unwrap()
        .is_none());

    match root.scene(&path("/a/b/c"), MissingBehaviour::ThrowIfMissing) {
        Err(SceneError::EntityNotFound { path }) => assert_eq!(path.to_string(), "/a/b"),
        other => panic!("expected EntityNotFound, got {other:?}"),
    }

    let a = root.child_or_throw("a").unwrap();
    assert!(a.child_names().unwrap().is_empty());
}

#[test]
fn test_scene_is_relative_to_the_handle() {
    let root = write_scene();
    let a = root.create_child("a").unwrap();
    let c = a.scene(&path("b/c"), MissingBehaviour::CreateIfMissing).unwrap().unwrap();
    assert_eq!(c.path_as_string(), "/a/b/c");

    let same = root.scene_or_throw(&path("/a/b/c")).unwrap();
    assert!(same.same_node(&c));

    let itself = a.scene_or_throw(&Path::root()).unwrap();
    assert!(itself.same_node(&a));
}

#[test]
fn test_parent_and_root_navigation() {
    let root = write_scene();
    let c = root.scene(&path("/a/b/c"), MissingBehaviour::CreateIfMissing).unwrap().unwrap();

    let b = c.parent().unwrap().unwrap();
    assert_eq!(b.path_as_string(), "/a/b");
    assert!(c.root().same_node(&root));
}

#[test]
fn test_child_names_are_sorted_and_stable() {
    let root = write_scene();
    for name in ["zeta", "alpha", "mid"] {
        root.create_child(name).unwrap();
    }

    let first: Vec<String> = root.child_names().unwrap().into_iter().map(String::from).collect();
    let second: Vec<String> = root.child_names().unwrap().into_iter().map(String::from).collect();
    assert_eq!(first, vec!["alpha", "mid", "zeta"]);
    assert_eq!(first, second);
}

#[test]
fn test_write_then_read_attribute() {
    let root = write_scene();
    let geo = root.create_child("geo").unwrap();
    let value = AttributeValue::FloatVector(vec![1.0, 2.5, -3.0]);

    assert!(!geo.has_attribute("weights").unwrap());
    geo.write_attribute("weights", &value, 1.0).unwrap();
    assert!(geo.has_attribute("weights").unwrap());
    assert_eq!(geo.read_attribute("weights", 1.0).unwrap(), value);

    geo.write_attribute("visible", &AttributeValue::Bool(true), 0.0).unwrap();
    let names: Vec<String> = geo
        .read_attribute_names()
        .unwrap()
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(names, vec!["visible", "weights"]);
}

#[test]
fn test_writes_are_visible_through_other_handles() {
    let root = write_scene();
    let geo = root.create_child("geo").unwrap();
    geo.write_attribute("id", &AttributeValue::Int(7), 0.0).unwrap();

    let other = root.child_or_throw("geo").unwrap();
    assert_eq!(other.read_attribute("id", 0.0).unwrap(), AttributeValue::Int(7));
}

#[test]
fn test_time_sampled_reads_hold_previous_sample() {
    let root = write_scene();
    let geo = root.create_child("geo").unwrap();
    let early = Bound3::from_corners([0.0; 3], [1.0; 3]);
    let late = Bound3::from_corners([0.0; 3], [2.0; 3]);
    geo.write_bound(&early, 0.0).unwrap();
    geo.write_bound(&late, 1.0).unwrap();

    assert_eq!(geo.read_bound(-1.0).unwrap(), early);
    assert_eq!(geo.read_bound(0.5).unwrap(), early);
    assert_eq!(geo.read_bound(1.0).unwrap(), late);
    assert_eq!(geo.read_bound(10.0).unwrap(), late);
}

#[test]
fn test_no_data_is_distinct_from_not_found() {
    let root = write_scene();
    let geo = root.create_child("geo").unwrap();

    assert!(!geo.has_object().unwrap());
    assert!(!geo.has_bound().unwrap());
    assert!(!geo.has_transform().unwrap());

    let cases = [
        (geo.read_object(0.0).unwrap_err(), SceneField::Object),
        (geo.read_bound(0.0).unwrap_err(), SceneField::Bound),
        (geo.read_transform(0.0).unwrap_err(), SceneField::Transform),
        (
            geo.read_attribute("missing", 0.0).unwrap_err(),
            SceneField::Attribute("missing".to_string()),
        ),
    ];
    for (error, expected) in cases {
        match error {
            SceneError::NoDataAtPath { path, field } => {
                assert_eq!(path.to_string(), "/geo");
                assert_eq!(field, expected);
            }
            other => panic!("expected NoDataAtPath, got {other:?}"),
        }
    }
}

#[test]
fn test_transform_as_matrix() {
    let root = write_scene();
    let xform = root.create_child("xform").unwrap();
    let components = TransformComponents::from_trs(
        Vec3::new(1.0, 2.0, 3.0),
        Quat::from_axis_angle(&Vec3::y_axis(), 0.5),
        Vec3::new(2.0, 2.0, 2.0),
    );
    xform.write_transform(&components.clone().into(), 0.0).unwrap();

    let expected = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0))
        * Quat::from_axis_angle(&Vec3::y_axis(), 0.5).to_homogeneous()
        * Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 2.0, 2.0));
    assert_relative_eq!(xform.read_transform_as_matrix(0.0).unwrap(), expected, epsilon = 1e-12);
    assert_eq!(xform.read_transform(0.0).unwrap(), TransformData::from(components));

    let matrix = Mat4::new_translation(&Vec3::new(-1.0, 0.0, 0.0));
    xform.write_transform(&matrix.into(), 1.0).unwrap();
    assert_eq!(xform.read_transform_as_matrix(1.0).unwrap(), matrix);
}
