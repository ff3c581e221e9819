use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use rand::Rng;
use tempfile::TempDir;

use tessera::gfx::loader::{DirectiveError, LoadError};
use tessera::gfx::scene::TriangleMesh;

/// Writes `<tmp>/<name>/<name>.obj` plus extra files and returns the model directory.
fn write_model(tmp: &TempDir, name: &str, obj: &str, extra: &[(&str, &str)]) -> PathBuf {
    let dir = tmp.path().join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{}.obj", name)), obj).unwrap();
    for (file, contents) in extra {
        fs::write(dir.join(file), contents).unwrap();
    }
    dir
}

const RED_MTL: &str = "newmtl red\nKd 1 0 0\nKa 0.1 0.1 0.1\nKs 0.5 0.5 0.5\nNs 16\n";

const QUAD_OBJ: &str = "\
# unit quad
mtllib quad.mtl
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vn 0 0 1
usemtl red
f 1/1/1 2/1/1 3/1/1 4/1/1
";

fn load(dir: &Path, normalize: bool) -> Result<TriangleMesh, LoadError> {
    TriangleMesh::load_from_file(dir, normalize)
}

#[test]
fn test_quad_with_material() {
    let tmp = TempDir::new().unwrap();
    let dir = write_model(&tmp, "quad", QUAD_OBJ, &[("quad.mtl", RED_MTL)]);

    let mesh = load(&dir, false).unwrap();
    assert_eq!(mesh.name(), "quad");
    assert_eq!(mesh.submeshes().len(), 1);
    assert_eq!(mesh.num_triangles(), 2);
    assert_eq!(mesh.num_vertices(), 4);

    let submesh = &mesh.submeshes()[0];
    assert_eq!(submesh.indices().len(), 6);
    let material = mesh.material_of(submesh).unwrap();
    assert_eq!(material.name(), "red");
    assert_eq!(material.kd, cgmath::Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(material.ns, 16.0);
}

#[test]
fn test_shared_triple_is_one_vertex() {
    let tmp = TempDir::new().unwrap();
    let obj = "\
mtllib m.mtl
v 0 0 0
v 1 0 0
v 0 1 0
v 1 1 0
vt 0 0
vn 0 0 1
usemtl red
f 1/1/1 2/1/1 3/1/1
f 1/1/1 3/1/1 4/1/1
";
    let dir = write_model(&tmp, "shared", obj, &[("m.mtl", RED_MTL)]);

    let mesh = load(&dir, false).unwrap();
    assert_eq!(mesh.num_vertices(), 4);
    let indices = mesh.submeshes()[0].indices();
    assert_eq!(indices[0], indices[3]);
}

#[test]
fn test_normalization() {
    let tmp = TempDir::new().unwrap();
    let obj = "\
mtllib m.mtl
v -2 -1 0
v 2 -1 0
v 2 1 0
v -2 1 0
vt 0 0
vn 0 0 1
usemtl red
f 1/1/1 2/1/1 3/1/1 4/1/1
";
    let dir = write_model(&tmp, "wide", obj, &[("m.mtl", RED_MTL)]);

    let mesh = load(&dir, true).unwrap();
    let info = mesh.normalization().unwrap();
    assert_relative_eq!(info.extent.x, 1.0);
    assert_relative_eq!(info.extent.y, 0.5);
    assert_relative_eq!(info.extent.z, 0.0);
    assert_eq!(mesh.center(), cgmath::Vector3::new(0.0, 0.0, 0.0));

    for vertex in mesh.vertices() {
        assert!(vertex.position[0].abs() <= 0.5 + 1e-6);
        assert!(vertex.position[1].abs() <= 0.25 + 1e-6);
    }

    // without normalization the file coordinates stay
    let raw = load(&dir, false).unwrap();
    assert!(raw.normalization().is_none());
    assert_eq!(raw.vertices()[0].position, [-2.0, -1.0, 0.0]);
}

#[test]
fn test_offset_model_is_centered() {
    let tmp = TempDir::new().unwrap();
    let obj = "\
mtllib m.mtl
v 10 10 10
v 14 10 10
v 14 12 10
vt 0 0
vn 0 0 1
usemtl red
f 1/1/1 2/1/1 3/1/1
";
    let dir = write_model(&tmp, "offset", obj, &[("m.mtl", RED_MTL)]);

    let mesh = load(&dir, true).unwrap();
    assert_eq!(mesh.center(), cgmath::Vector3::new(12.0, 11.0, 10.0));
    assert_eq!(mesh.vertices()[0].position, [-0.5, -0.25, 0.0]);
}

#[test]
fn test_undefined_material_fails() {
    let tmp = TempDir::new().unwrap();
    let obj = "mtllib m.mtl\nv 0 0 0\nusemtl blue\n";
    let dir = write_model(&tmp, "bad", obj, &[("m.mtl", RED_MTL)]);

    match load(&dir, false) {
        Err(LoadError::MalformedGeometry { line, source, .. }) => {
            assert_eq!(line, 3);
            assert_eq!(source, DirectiveError::UndefinedMaterial("blue".into()));
        }
        other => panic!("expected MalformedGeometry, got {:?}", other),
    }
}

#[test]
fn test_face_without_normals_fails() {
    let tmp = TempDir::new().unwrap();
    let obj = "\
mtllib m.mtl
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
usemtl red
f 1/1 2/1 3/1
";
    let dir = write_model(&tmp, "nonormals", obj, &[("m.mtl", RED_MTL)]);

    match load(&dir, false) {
        Err(LoadError::MalformedGeometry { line, source, .. }) => {
            assert_eq!(line, 7);
            assert_eq!(source, DirectiveError::IncompleteFaceVertex("1/1".into()));
        }
        other => panic!("expected MalformedGeometry, got {:?}", other),
    }
}

#[test]
fn test_missing_files() {
    let tmp = TempDir::new().unwrap();
    assert!(matches!(
        load(&tmp.path().join("nothing"), true),
        Err(LoadError::FileNotFound { .. })
    ));

    let dir = write_model(&tmp, "nomtl", "mtllib missing.mtl\n", &[]);
    match load(&dir, true) {
        Err(LoadError::FileNotFound { path, .. }) => assert!(path.ends_with("missing.mtl")),
        other => panic!("expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_malformed_material_reports_line() {
    let tmp = TempDir::new().unwrap();
    let dir = write_model(
        &tmp,
        "badmtl",
        "mtllib m.mtl\n",
        &[("m.mtl", "newmtl a\n\nKs 1 x 1\n")],
    );

    match load(&dir, false) {
        Err(LoadError::MalformedMaterial { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected MalformedMaterial, got {:?}", other),
    }
}

#[test]
fn test_textured_material() {
    let tmp = TempDir::new().unwrap();
    let mtl = "newmtl wood\nKd 1 1 1\nmap_Kd textures/wood.png\n";
    let obj = QUAD_OBJ.replace("red", "wood");
    let dir = write_model(&tmp, "cube", &obj, &[("quad.mtl", mtl)]);
    fs::create_dir_all(dir.join("textures")).unwrap();
    image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 100, 50, 255]))
        .save(dir.join("textures/wood.png"))
        .unwrap();

    let mesh = load(&dir, true).unwrap();
    let material = mesh.material_of(&mesh.submeshes()[0]).unwrap();
    let texture = material.map_kd().unwrap();
    assert_eq!(texture.pixels().width, 2);
    assert_eq!(texture.pixels().texel(1, 1), Some([200, 100, 50, 255]));
    assert_eq!(material.uniform().use_map_kd, 1);
}

#[test]
fn test_broken_texture_degrades() {
    let tmp = TempDir::new().unwrap();
    let mtl = "newmtl red\nKd 1 0 0\nmap_Kd broken.png\n";
    let dir = write_model(
        &tmp,
        "quad",
        QUAD_OBJ,
        &[("quad.mtl", mtl), ("broken.png", "not a png")],
    );

    let mesh = load(&dir, false).unwrap();
    let material = mesh.material_of(&mesh.submeshes()[0]).unwrap();
    assert!(!material.has_texture());
    assert_eq!(material.kd, cgmath::Vector3::new(1.0, 0.0, 0.0));
}

#[test]
fn test_submeshes_follow_usemtl_order() {
    let tmp = TempDir::new().unwrap();
    let mtl = "newmtl a\nKd 1 0 0\nnewmtl b\nKd 0 1 0\n";
    let obj = "\
mtllib m.mtl
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vn 0 0 1
usemtl b
f 1/1/1 2/1/1 3/1/1
usemtl a
f 1/1/1 3/1/1 4/1/1 2/1/1
usemtl b
f 2/1/1 3/1/1 4/1/1
";
    let dir = write_model(&tmp, "multi", obj, &[("m.mtl", mtl)]);

    let mesh = load(&dir, false).unwrap();
    let names: Vec<&str> = mesh
        .submeshes()
        .iter()
        .map(|s| mesh.material_of(s).unwrap().name())
        .collect();
    assert_eq!(names, ["b", "a", "b"]);
    assert_eq!(mesh.num_triangles(), 4);
    assert_eq!(mesh.submeshes()[1].num_triangles(), 2);
    assert_eq!(mesh.submeshes()[0].material(), mesh.submeshes()[2].material());
}

/// Random faces over a small attribute pool: every distinct triple yields
/// exactly one vertex and all indices stay in range.
#[test]
fn test_random_faces_deduplicate_by_triple() {
    let mut rng = rand::rng();
    let tmp = TempDir::new().unwrap();

    let mut obj = String::from("mtllib m.mtl\n");
    for i in 0..5 {
        obj.push_str(&format!("v {} {} 0\n", i, i * i));
        obj.push_str(&format!("vt {} 0\n", i as f32 / 4.0));
        obj.push_str("vn 0 0 1\n");
    }
    obj.push_str("usemtl red\n");

    let mut triples = HashSet::new();
    let mut triangles = 0;
    for _ in 0..50 {
        let corners = rng.random_range(3..=6);
        let mut face = String::from("f");
        for _ in 0..corners {
            let triple = (
                rng.random_range(1..=5),
                rng.random_range(1..=5),
                rng.random_range(1..=5),
            );
            triples.insert(triple);
            face.push_str(&format!(" {}/{}/{}", triple.0, triple.1, triple.2));
        }
        obj.push_str(&face);
        obj.push('\n');
        triangles += corners - 2;
    }

    let dir = write_model(&tmp, "random", &obj, &[("m.mtl", RED_MTL)]);
    let mesh = load(&dir, false).unwrap();

    assert_eq!(mesh.num_vertices(), triples.len());
    assert_eq!(mesh.num_triangles(), triangles);
    for submesh in mesh.submeshes() {
        assert_eq!(submesh.indices().len() % 3, 0);
        assert!(submesh
            .indices()
            .iter()
            .all(|&i| (i as usize) < mesh.num_vertices()));
    }
}
