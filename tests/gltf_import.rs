//! Tests for reading bone hierarchies from glTF

mod common;

use common::{assert_vec3_eq, init_tests};
use nalgebra_glm as glm;
use rigview::{
    config::ImportOptions, gltf_import, proxy::ProxyManager, rv_error::RvError,
};
use std::path::Path;

const RIG: &str = "./tests/assets/rig.gltf";

/// Skinned file: only joints become bones and the armature scale is folded
/// into the root bone
#[test]
fn skinned_rig() {
    init_tests();
    let options = ImportOptions { scale: 1.0 };
    let sk = gltf_import::load_skeleton(Path::new(RIG), &options).unwrap();
    assert_eq!(sk.len(), 3);
    assert!(sk.find("Armature").is_none());
    assert!(sk.find("Body").is_none());

    let hips = sk.find("mixamorigHips").unwrap();
    let head = sk.find("mixamorigHead").unwrap();
    assert_eq!(sk.roots().collect::<Vec<_>>(), vec![hips]);
    assert_vec3_eq(&sk.world_position(hips).unwrap(), &glm::vec3(0.0, 1.0, 0.0));
    assert_vec3_eq(&sk.world_position(head).unwrap(), &glm::vec3(0.0, 2.0, 0.0));

    let proxies = ProxyManager::build(&sk, 0.03);
    assert_eq!(proxies.len(), 2);
}

#[test]
fn import_scale_is_placement() {
    let options = ImportOptions { scale: 0.01 };
    let sk = gltf_import::load_skeleton(Path::new(RIG), &options).unwrap();
    let head = sk.find("mixamorigHead").unwrap();
    assert_vec3_eq(&sk.world_position(head).unwrap(), &glm::vec3(0.0, 0.02, 0.0));
}

/// Without a skin every node is a bone
#[test]
fn unskinned_nodes() {
    let json = r#"{
        "asset": { "version": "2.0" },
        "scenes": [ { "nodes": [ 0 ] } ],
        "nodes": [
            { "name": "root", "children": [ 1 ] },
            { "name": "tip", "translation": [ 0.0, 0.0, 2.0 ] }
        ]
    }"#;
    let sk = gltf_import::load_skeleton_from_slice(
        json.as_bytes(),
        &ImportOptions { scale: 1.0 },
    )
    .unwrap();
    assert_eq!(sk.len(), 2);
    let tip = sk.find("tip").unwrap();
    assert_eq!(sk.parent(tip), sk.find("root"));
}

#[test]
fn empty_scene_has_no_bones() {
    let json = r#"{ "asset": { "version": "2.0" } }"#;
    let result =
        gltf_import::load_skeleton_from_slice(json.as_bytes(), &ImportOptions::default());
    assert!(matches!(result, Err(RvError::NoBones)));
}

#[test]
fn missing_file_is_io_error() {
    let result = gltf_import::load_skeleton(
        Path::new("./tests/assets/missing.gltf"),
        &ImportOptions::default(),
    );
    assert!(matches!(result, Err(RvError::StdIoError(_))));
}

#[test]
fn unknown_extension_is_unsupported() {
    for path in ["./tests/assets/rig.fbx", "./tests/assets/rig"] {
        let result = gltf_import::load_skeleton(Path::new(path), &ImportOptions::default());
        assert!(matches!(result, Err(RvError::UnsupportedFormat)), "{path}");
    }
}

/// Node quaternions come through as the same rotation, so a quarter turn
/// about Z still swings a +Y child onto -X
#[test]
fn node_rotation_is_kept() {
    let json = r#"{
        "asset": { "version": "2.0" },
        "scenes": [ { "nodes": [ 0 ] } ],
        "nodes": [
            {
                "name": "root",
                "rotation": [ 0.0, 0.0, 0.70710677, 0.70710677 ],
                "children": [ 1 ]
            },
            { "name": "tip", "translation": [ 0.0, 1.0, 0.0 ] }
        ]
    }"#;
    let sk = gltf_import::load_skeleton_from_slice(
        json.as_bytes(),
        &ImportOptions { scale: 1.0 },
    )
    .unwrap();
    let root = sk.find("root").unwrap();
    let r = sk.rotation(root).unwrap();
    assert_vec3_eq(&r, &glm::vec3(0.0, 0.0, std::f32::consts::FRAC_PI_2));
    let tip = sk.find("tip").unwrap();
    assert_vec3_eq(&sk.world_position(tip).unwrap(), &glm::vec3(-1.0, 0.0, 0.0));
}
