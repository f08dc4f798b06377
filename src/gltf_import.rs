use crate::{
    config::ImportOptions,
    rv_error::RvError,
    skeleton::{euler_from_quat, Bone, BoneId, Skeleton},
};
use ahash::HashSet;
use gltf::{Document, Gltf, Node};
use log::{debug, info, warn};
use nalgebra_glm as glm;
use std::{fs, io, path::Path};

fn load_impl(path: &Path) -> Result<Document, RvError> {
    let supported = path.extension().and_then(|e| e.to_str()).is_some_and(|e| {
        e.eq_ignore_ascii_case("gltf") || e.eq_ignore_ascii_case("glb")
    });
    if !supported {
        warn!("{:?} is not a .gltf or .glb file", path);
        return Err(RvError::UnsupportedFormat);
    }
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    let gltf = Gltf::from_reader(reader)?;
    info!(
        "{:?}, node count={}, skin count={}",
        path,
        gltf.document.nodes().count(),
        gltf.document.skins().count(),
    );
    Ok(gltf.document)
}

/// Recursive node tree walk. Nodes that are not bones are folded into the
/// `origin` of the next bone below them.
fn traverse_tree(
    node: &Node,
    bones: &HashSet<usize>,
    parent: Option<BoneId>,
    accumulated: glm::Mat4,
    skeleton: &mut Skeleton,
) {
    let (next_parent, next_accumulated) = if bones.contains(&node.index()) {
        let name = node
            .name()
            .map_or_else(|| format!("node.{}", node.index()), ToString::to_string);
        let (t, r, s) = node.transform().decomposed();
        let mut bone = Bone::new(&name, glm::vec3(t[0], t[1], t[2]));
        bone.rotation = euler_from_quat(&glm::quat(r[0], r[1], r[2], r[3]));
        bone.scale = glm::vec3(s[0], s[1], s[2]);
        bone.origin = accumulated;
        let id = skeleton.add_bone(parent, bone);
        debug!("bone {} {:?} parent={:?}", name, id, parent);
        (Some(id), glm::Mat4::identity())
    } else {
        let local: glm::Mat4 = node.transform().matrix().into();
        (parent, accumulated * local)
    };

    for child in node.children() {
        traverse_tree(&child, bones, next_parent, next_accumulated, skeleton);
    }
}

/// Builds a skeleton from a glTF document. With a skin the bones are the
/// joints of the first skin, otherwise every node is a bone.
///
/// # Errors
/// Returns `RvError::NoBones` if nothing qualifies as a bone
pub fn skeleton_from_document(
    document: &Document,
    options: &ImportOptions,
) -> Result<Skeleton, RvError> {
    let mut skins = document.skins();
    let bones: HashSet<usize> = if let Some(skin) = skins.next() {
        if skins.next().is_some() {
            warn!("only the first skin is used");
        }
        skin.joints().map(|j| j.index()).collect()
    } else {
        debug!("no skin, using every node as a bone");
        document.nodes().map(|n| n.index()).collect()
    };

    let mut skeleton = Skeleton::new();
    for scene in document.scenes() {
        for node in scene.nodes() {
            traverse_tree(&node, &bones, None, glm::Mat4::identity(), &mut skeleton);
        }
    }
    if skeleton.is_empty() {
        return Err(RvError::NoBones);
    }

    let s = options.scale;
    skeleton.set_placement(glm::scaling(&glm::vec3(s, s, s)));
    info!(
        "skeleton has {} bones, {} roots, scale={}",
        skeleton.len(),
        skeleton.roots().count(),
        s
    );
    Ok(skeleton)
}

/// Loads the bone hierarchy of a glTF file. Only the JSON document is read,
/// mesh and image buffers are not.
///
/// # Errors
/// Returns `RvError::UnsupportedFormat` unless the extension is `.gltf` or
/// `.glb`, otherwise may return other `RvError` variants
pub fn load_skeleton(
    path: &Path,
    options: &ImportOptions,
) -> Result<Skeleton, RvError> {
    let document = load_impl(path)?;
    skeleton_from_document(&document, options)
}

/// As `load_skeleton` but from an in-memory `.gltf` or `.glb`
///
/// # Errors
/// May return `RvError`
pub fn load_skeleton_from_slice(
    data: &[u8],
    options: &ImportOptions,
) -> Result<Skeleton, RvError> {
    let gltf = Gltf::from_slice(data)?;
    skeleton_from_document(&gltf.document, options)
}
