//! Opening files through the registry and reading them back

use tempfile::tempdir;

use crate::backends::SceneCacheBackend;
use crate::foundation::logging;
use crate::foundation::math::{Mat4, Vec3};
use crate::scene::{
    backend_modes, register_backend, supported_extensions, unregister_backend, AttributeValue,
    Bound3, MeshPrimitive, MissingBehaviour, OpenMode, SceneError, SceneInterface, SceneObject,
};

#[test]
fn test_write_close_reopen_read() {
    logging::init();
    let dir = tempdir().unwrap();
    let file = dir.path().join("shot.scc");
    let bound = Bound3::from_corners([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);

    {
        let root = SceneInterface::create(&file, OpenMode::WRITE).unwrap();
        assert_eq!(root.file_name().as_deref(), Some(file.as_path()));
        let geo = root.create_child("geo").unwrap();
        geo.write_bound(&bound, 0.0).unwrap();
    }

    let root = SceneInterface::create(&file, OpenMode::READ).unwrap();
    let geo = root.child_or_throw("geo").unwrap();
    assert_eq!(geo.read_bound(0.0).unwrap(), bound);
    assert_eq!(root.mode(), OpenMode::READ);
}

#[test]
fn test_deep_hierarchy_survives_reopen() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("deep.scc");
    let mesh = SceneObject::Mesh(MeshPrimitive {
        positions: vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        vertices_per_face: vec![3],
        vertex_ids: vec![0, 1, 2],
    });
    let scale = Mat4::new_nonuniform_scaling(&Vec3::new(3.0, 3.0, 3.0));

    {
        let root = SceneInterface::create(&file, OpenMode::WRITE).unwrap();
        let leaf = root
            .scene(&"/a/b/c/d".parse().unwrap(), MissingBehaviour::CreateIfMissing)
            .unwrap()
            .unwrap();
        leaf.write_object(&mesh, 0.0).unwrap();
        leaf.write_attribute("tags", &AttributeValue::StringVector(vec!["hero".into()]), 0.0)
            .unwrap();
        leaf.write_transform(&scale.into(), 0.0).unwrap();
        root.flush().unwrap();
    }

    let root = SceneInterface::create(&file, OpenMode::READ).unwrap();
    let leaf = root.scene_or_throw(&"/a/b/c/d".parse().unwrap()).unwrap();
    assert_eq!(leaf.read_object(0.0).unwrap(), mesh);
    assert_eq!(
        leaf.read_attribute("tags", 0.0).unwrap(),
        AttributeValue::StringVector(vec!["hero".to_string()])
    );
    assert_eq!(leaf.read_transform_as_matrix(0.0).unwrap(), scale);
    assert_eq!(leaf.parent().unwrap().unwrap().path_as_string(), "/a/b/c");
}

#[test]
fn test_append_session_extends_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("append.scc");
    let first = Bound3::from_corners([0.0; 3], [1.0; 3]);
    let second = Bound3::from_corners([0.0; 3], [2.0; 3]);

    {
        let root = SceneInterface::create(&file, OpenMode::WRITE).unwrap();
        root.create_child("geo").unwrap().write_bound(&first, 0.0).unwrap();
    }
    {
        let root = SceneInterface::create(&file, OpenMode::APPEND).unwrap();
        let geo = root.child_or_throw("geo").unwrap();
        assert!(matches!(
            geo.write_bound(&second, 0.0),
            Err(SceneError::FinalizedData { .. })
        ));
        geo.write_bound(&second, 1.0).unwrap();
        root.create_child("cam").unwrap();
    }

    let root = SceneInterface::create(&file, OpenMode::READ).unwrap();
    let geo = root.child_or_throw("geo").unwrap();
    assert_eq!(geo.read_bound(0.0).unwrap(), first);
    assert_eq!(geo.read_bound(1.0).unwrap(), second);
    assert!(root.has_child("cam").unwrap());
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        SceneInterface::create(dir.path().join("scene.unknownfmt"), OpenMode::READ),
        Err(SceneError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        SceneInterface::create(dir.path().join("no_extension"), OpenMode::WRITE),
        Err(SceneError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_combined_modes_are_rejected_at_open() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("combo.scc");
    assert!(matches!(
        SceneInterface::create(&file, OpenMode::READ | OpenMode::WRITE),
        Err(SceneError::UnsupportedMode { .. })
    ));
    assert!(!file.exists());
}

#[test]
fn test_capability_query_for_registered_backend() {
    register_backend("scenetestrw", OpenMode::READ | OpenMode::WRITE, |path, mode| {
        SceneCacheBackend::open(path, mode)
    });

    let readable = SceneInterface::supported_extensions(OpenMode::READ);
    let appendable = supported_extensions(OpenMode::APPEND);
    assert!(readable.contains(&"scenetestrw".to_string()));
    assert!(!appendable.contains(&"scenetestrw".to_string()));
    assert!(appendable.contains(&"scc".to_string()));
    assert_eq!(
        backend_modes("scenetestrw"),
        Some(OpenMode::READ | OpenMode::WRITE)
    );

    let dir = tempdir().unwrap();
    let file = dir.path().join("x.scenetestrw");
    SceneInterface::create(&file, OpenMode::WRITE).unwrap();
    match SceneInterface::create(&file, OpenMode::APPEND) {
        Err(SceneError::UnsupportedMode { extension, mode }) => {
            assert_eq!(extension, "scenetestrw");
            assert_eq!(mode, OpenMode::APPEND);
        }
        other => panic!("expected UnsupportedMode, got {other:?}"),
    }

    assert!(unregister_backend("scenetestrw"));
    assert!(backend_modes("scenetestrw").is_none());
}
