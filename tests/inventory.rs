// ABOUTME: Integration tests for project discovery.
// ABOUTME: Covers manifest variants, depth limits, and invalid directory names.

use std::fs;
use std::path::Path;

use flotilla::reconcile::discover_projects;

fn add_project(root: &Path, name: &str, manifest: &str) {
    let dir = root.join(name);
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join(manifest), "services: {}\n").unwrap();
}

#[test]
fn discovers_yml_and_yaml_manifests() {
    let root = tempfile::tempdir().unwrap();
    add_project(root.path(), "alpha", "docker-compose.yml");
    add_project(root.path(), "beta", "docker-compose.yaml");

    let mut names: Vec<String> = discover_projects(root.path())
        .unwrap()
        .into_iter()
        .map(|p| p.name.to_string())
        .collect();
    names.sort();

    assert_eq!(names, vec!["alpha", "beta"]);
}

#[test]
fn project_paths_point_at_dir_and_manifest() {
    let root = tempfile::tempdir().unwrap();
    add_project(root.path(), "alpha", "docker-compose.yml");

    let projects = discover_projects(root.path()).unwrap();
    assert_eq!(projects.len(), 1);
    let project = &projects[0];
    assert_eq!(project.dir, root.path().join("alpha"));
    assert_eq!(
        project.manifest,
        root.path().join("alpha").join("docker-compose.yml")
    );
}

#[test]
fn directories_without_manifest_are_excluded() {
    let root = tempfile::tempdir().unwrap();
    add_project(root.path(), "alpha", "docker-compose.yml");
    fs::create_dir(root.path().join("no-manifest")).unwrap();
    fs::write(root.path().join("no-manifest").join("compose.txt"), "x").unwrap();

    let projects = discover_projects(root.path()).unwrap();
    assert_eq!(projects.len(), 1);
}

#[test]
fn plain_files_are_not_projects() {
    let root = tempfile::tempdir().unwrap();
    fs::write(root.path().join("docker-compose.yml"), "services: {}\n").unwrap();

    assert!(discover_projects(root.path()).unwrap().is_empty());
}

#[test]
fn nested_projects_are_not_discovered() {
    let root = tempfile::tempdir().unwrap();
    let outer = root.path().join("outer");
    fs::create_dir(&outer).unwrap();
    add_project(&outer, "inner", "docker-compose.yml");

    // `outer` has no manifest itself; `outer/inner` is one level too deep.
    assert!(discover_projects(root.path()).unwrap().is_empty());
}

#[test]
fn invalid_directory_names_are_skipped() {
    let root = tempfile::tempdir().unwrap();
    add_project(root.path(), "ok-name", "docker-compose.yml");
    add_project(root.path(), "Bad Name", "docker-compose.yml");

    let projects = discover_projects(root.path()).unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name.as_str(), "ok-name");
}

#[test]
fn missing_root_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let gone = root.path().join("nope");
    assert!(discover_projects(&gone).is_err());
}
