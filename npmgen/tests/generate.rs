//! Integration tests for project generation

use std::fs;
use std::path::Path;
use std::sync::Arc;

use npmgen::prelude::*;
use npmgen::testing::{FakeInstaller, MemoryReporter};
use tempfile::TempDir;

fn generator(installer: Arc<FakeInstaller>, reporter: Arc<MemoryReporter>) -> ProjectGenerator {
    ProjectGenerator::new(
        GeneratorConfig::default(),
        installer,
        Arc::new(EmbeddedTemplates),
        reporter,
    )
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Test that a valid request produces the full project layout
#[tokio::test]
async fn test_generates_project_layout() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = Arc::new(MemoryReporter::new());
    let installer = Arc::new(FakeInstaller::new());

    let generation = generator(installer.clone(), reporter.clone())
        .generate(GenerationRequest::new("foo").with_cwd(temp_dir.path()))
        .await;
    let Generation::Created(generated) = generation else {
        panic!("generation should succeed: {:?}", reporter.errors());
    };

    let base = temp_dir.path().join("foo");
    assert_eq!(generated.paths.base, base);
    assert!(base.is_dir());
    assert!(base.join("src").is_dir());
    assert_eq!(fs::metadata(base.join("index.js")).unwrap().len(), 0);
    assert!(base.join("package.json").is_file());
    assert!(base.join(".babelrc").is_file());
    assert!(base.join(".eslintrc.js").is_file());
    assert!(entries(&base.join("src")).is_empty());

    let summary = generated.installs.wait().await;
    assert!(summary.is_success());
    assert_eq!(summary.succeeded, vec![InstallKind::Dev, InstallKind::Project]);
}

/// Test that the manifest has the project name substituted
#[tokio::test]
async fn test_manifest_contains_project_name() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = Arc::new(MemoryReporter::new());

    let generation = generator(Arc::new(FakeInstaller::new()), reporter)
        .generate(GenerationRequest::new("foo").with_cwd(temp_dir.path()))
        .await;
    assert!(generation.is_created());

    let manifest = fs::read_to_string(temp_dir.path().join("foo/package.json")).unwrap();
    assert!(manifest.contains("\"foo\""));
    assert!(!manifest.contains("#package_name#"));
    assert!(!manifest.contains("#start_script#"));
    assert!(manifest.contains("nodemon --exec babel-node index"));
}

/// Test that static config files have the expected contents
#[tokio::test]
async fn test_static_config_files() {
    let temp_dir = TempDir::new().unwrap();

    let generation = generator(
        Arc::new(FakeInstaller::new()),
        Arc::new(MemoryReporter::new()),
    )
    .generate(GenerationRequest::new("configs").with_cwd(temp_dir.path()))
    .await;
    assert!(generation.is_created());

    let base = temp_dir.path().join("configs");
    let babelrc = fs::read_to_string(base.join(".babelrc")).unwrap();
    assert!(babelrc.contains("@babel/preset-env"));
    let eslintrc = fs::read_to_string(base.join(".eslintrc.js")).unwrap();
    assert!(eslintrc.contains("airbnb-base"));
}

/// Test that an empty name creates nothing and logs one error
#[tokio::test]
async fn test_empty_name_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = Arc::new(MemoryReporter::new());
    let installer = Arc::new(FakeInstaller::new());

    let generation = generator(installer.clone(), reporter.clone())
        .generate(GenerationRequest::new("").with_cwd(temp_dir.path()))
        .await;

    assert!(matches!(generation, Generation::Failed(GenerateError::Validation(_))));
    assert!(entries(temp_dir.path()).is_empty());

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("name is required"));
    assert!(reporter.infos().is_empty());
    assert!(installer.calls().is_empty());
}

/// Test that an existing directory is never touched
#[tokio::test]
async fn test_existing_directory_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let existing = temp_dir.path().join("taken");
    fs::create_dir(&existing).unwrap();
    fs::write(existing.join("keep.txt"), "mine").unwrap();
    let reporter = Arc::new(MemoryReporter::new());

    let generation = generator(Arc::new(FakeInstaller::new()), reporter.clone())
        .generate(GenerationRequest::new("taken").with_cwd(temp_dir.path()))
        .await;

    assert!(!generation.is_created());
    assert_eq!(entries(temp_dir.path()), vec!["taken"]);
    assert_eq!(entries(&existing), vec!["keep.txt"]);

    let errors = reporter.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("already exists"));
}

/// Test that a rerun after success fails validation
#[tokio::test]
async fn test_second_run_with_same_name_fails() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = Arc::new(MemoryReporter::new());
    let generator = generator(Arc::new(FakeInstaller::new()), reporter.clone());
    let request = GenerationRequest::new("twice").with_cwd(temp_dir.path());

    assert!(generator.generate(request.clone()).await.is_created());
    assert!(!generator.generate(request).await.is_created());
    assert_eq!(reporter.errors().len(), 1);
}

/// Test that installer failures stay inside their tasks
#[tokio::test]
async fn test_install_failure_does_not_stop_generation() {
    let temp_dir = TempDir::new().unwrap();
    let reporter = Arc::new(MemoryReporter::new());

    let generation = generator(
        Arc::new(FakeInstaller::failing("npm ERR! network")),
        reporter.clone(),
    )
    .generate(GenerationRequest::new("offline").with_cwd(temp_dir.path()))
    .await;
    let Generation::Created(generated) = generation else {
        panic!("install failures must not fail generation");
    };

    let base = temp_dir.path().join("offline");
    assert!(base.join(".babelrc").is_file());
    assert!(base.join(".eslintrc.js").is_file());

    let summary = generated.installs.wait().await;
    assert_eq!(summary.failed, vec![InstallKind::Dev, InstallKind::Project]);

    let errors = reporter.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e.contains("dev packages")));
    assert!(errors.iter().any(|e| e.contains("project packages")));
}

/// Test that the installer receives the configured lists and flags
#[tokio::test]
async fn test_installer_receives_package_lists() {
    let temp_dir = TempDir::new().unwrap();
    let installer = Arc::new(FakeInstaller::new());

    let generation = generator(installer.clone(), Arc::new(MemoryReporter::new()))
        .generate(GenerationRequest::new("deps").with_cwd(temp_dir.path()))
        .await;
    let Generation::Created(generated) = generation else {
        panic!("generation should succeed");
    };
    generated.installs.wait().await;

    let packages = PackageList::default();
    let base = temp_dir.path().join("deps");
    let calls = installer.calls();
    assert_eq!(calls.len(), 2);

    let dev = calls.iter().find(|c| c.options.save_dev).unwrap();
    assert_eq!(dev.packages, packages.dev);
    assert_eq!(dev.options.cwd, base);

    let project = calls.iter().find(|c| !c.options.save_dev).unwrap();
    assert_eq!(project.packages, packages.project);
    assert_eq!(project.options.cwd, base);
}

/// Test that a dropped install handle does not block generation
#[tokio::test]
async fn test_detached_installs() {
    let temp_dir = TempDir::new().unwrap();

    let generation = generator(
        Arc::new(FakeInstaller::new()),
        Arc::new(MemoryReporter::new()),
    )
    .generate(GenerationRequest::new("detached").with_cwd(temp_dir.path()))
    .await;
    let Generation::Created(generated) = generation else {
        panic!("generation should succeed");
    };
    assert_eq!(generated.installs.len(), 2);
    drop(generated);

    assert!(temp_dir.path().join("detached/.eslintrc.js").is_file());
}

/// Test templates loaded from a directory
#[tokio::test]
async fn test_template_directory() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(
        templates.join("package.json.tpl"),
        "{\"name\": \"#package_name#\", \"scripts\": {\"dev\": \"#start_script#\"}}",
    )
    .unwrap();

    let generator = ProjectGenerator::new(
        GeneratorConfig::default(),
        Arc::new(FakeInstaller::new()),
        Arc::new(DirTemplateSource::new(&templates)),
        Arc::new(MemoryReporter::new()),
    );
    let generation = generator
        .generate(GenerationRequest::new("custom").with_cwd(temp_dir.path()))
        .await;
    assert!(generation.is_created());

    let manifest = fs::read_to_string(temp_dir.path().join("custom/package.json")).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(manifest["name"], "custom");
    assert_eq!(manifest["scripts"]["dev"], "nodemon --exec babel-node index");
}
