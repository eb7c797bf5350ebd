use kodegen_bundler_jpackage::bundler::builder::staging::stage_jpackage_resources;
use std::path::Path;

fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn icon_templates_take_the_application_name() {
    let source = tempfile::tempdir().unwrap();
    std::fs::write(source.path().join("icon.icns"), b"icns").unwrap();
    std::fs::write(source.path().join("Info.plist"), b"<plist/>").unwrap();
    std::fs::write(source.path().join("background.png"), b"png").unwrap();

    let scratch = tempfile::tempdir().unwrap();
    let staging = scratch.path().join("jpackage-resources");
    stage_jpackage_resources(Some(source.path()), &staging, "Demo")
        .await
        .unwrap();

    assert_eq!(names(&staging), vec!["Demo.icns", "Info.plist", "background.png"]);
    assert_eq!(std::fs::read(staging.join("Demo.icns")).unwrap(), b"icns");
    assert!(source.path().join("icon.icns").is_file());
}

#[tokio::test]
async fn staging_replaces_previous_contents() {
    let source = tempfile::tempdir().unwrap();
    std::fs::write(source.path().join("icon.ico"), b"ico").unwrap();

    let scratch = tempfile::tempdir().unwrap();
    let staging = scratch.path().join("res");
    std::fs::create_dir_all(&staging).unwrap();
    std::fs::write(staging.join("left-over.wxs"), b"old").unwrap();

    stage_jpackage_resources(Some(source.path()), &staging, "Tool")
        .await
        .unwrap();

    assert_eq!(names(&staging), vec!["Tool.ico"]);
}

#[tokio::test]
async fn missing_template_directory_leaves_staging_empty() {
    let scratch = tempfile::tempdir().unwrap();
    let staging = scratch.path().join("res");

    stage_jpackage_resources(Some(&scratch.path().join("absent")), &staging, "Demo")
        .await
        .unwrap();
    assert!(staging.is_dir());
    assert!(names(&staging).is_empty());

    stage_jpackage_resources(None, &staging, "Demo").await.unwrap();
    assert!(names(&staging).is_empty());
}
