//! Integration tests for the generation pipeline of enablement-core.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use mockall::mock;
use serde_json::{Value, json};

use enablement_core::{
    application::{ApplicationError, EnablementService, GenerationOptions, ports::*},
    domain::{
        ApplicationTemplates, Platform, RenderContext, SERVICE_REGISTRY, ServiceDescriptor,
        ServiceTemplates,
    },
    error::{EnablementError, EnablementResult, ErrorCategory},
    prelude::ProjectFixture,
};

// ============================================================================
// Test doubles
// ============================================================================

#[derive(Clone, Default)]
struct MemFs(Arc<Mutex<BTreeMap<PathBuf, String>>>);

impl MemFs {
    fn get(&self, path: &str) -> Option<String> {
        self.0.lock().unwrap().get(Path::new(path)).cloned()
    }

    fn json(&self, path: &str) -> Value {
        serde_json::from_str(&self.get(path).expect("file written")).unwrap()
    }

    fn put(&self, path: &str, content: &str) {
        self.0
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
    }
}

impl Filesystem for MemFs {
    fn create_dir_all(&self, _: &Path) -> EnablementResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> EnablementResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> EnablementResult<Option<String>> {
        Ok(self.0.lock().unwrap().get(path).cloned())
    }

    fn exists(&self, path: &Path) -> bool {
        self.0.lock().unwrap().contains_key(path)
    }
}

struct Templates;

impl TemplateStore for Templates {
    fn service(
        &self,
        descriptor: &ServiceDescriptor,
        platform: Platform,
    ) -> EnablementResult<ServiceTemplates> {
        Ok(match platform {
            Platform::Swift => ServiceTemplates::new(
                "func {{INIT_FUNCTION}}() throws {\n    let c = manager.getDictionary(name: \"{{LOOKUP_KEY}}\")\n}\n",
                format!(".package(url: \"https://example.net/{}.git\"),\n.package(url: \"https://example.net/shared.git\"),\n", descriptor.lookup_key()),
            ),
            Platform::Python => ServiceTemplates::new(
                "key = IBMCloudEnv.getString('{{LOOKUP_KEY}}_url')\n\ndef getService(app):\n    return key\n",
                format!("{}-client\nibm-cloud-env\n", descriptor.lookup_key()),
            ),
        })
    }

    fn application(&self, platform: Platform) -> EnablementResult<ApplicationTemplates> {
        Ok(ApplicationTemplates {
            application: format!("// {} {{{{PROJECT_NAME}}}}\n{{{{SERVICE_INITIALIZERS}}}}\n", platform),
            package: "{{SERVICE_DEPENDENCIES}}\n".into(),
        })
    }
}

struct Renderer;

impl TemplateRenderer for Renderer {
    fn render(&self, _: &str, source: &str, ctx: &RenderContext) -> EnablementResult<String> {
        Ok(ctx.render(source))
    }
}

mock! {
    Fs {}

    impl Filesystem for Fs {
        fn create_dir_all(&self, path: &Path) -> EnablementResult<()>;
        fn write_file(&self, path: &Path, content: &str) -> EnablementResult<()>;
        fn read_file(&self, path: &Path) -> EnablementResult<Option<String>>;
        fn exists(&self, path: &Path) -> bool;
    }
}

fn service_with(fs: impl Filesystem + 'static) -> EnablementService {
    EnablementService::new(Box::new(Templates), Box::new(Renderer), Box::new(fs))
}

fn all_services_fixture() -> ProjectFixture {
    let mut fixture = json!({"name": "shop", "backendPlatform": "SWIFT"});
    for descriptor in SERVICE_REGISTRY {
        let mut section = json!({
            "serviceInfo": {"name": format!("shop-{}", descriptor.scaffolder_property)}
        });
        for field in descriptor.local_dev_fields {
            section[*field] = json!(format!("{}-value", field));
        }
        fixture[descriptor.scaffolder_property] = section;
    }
    ProjectFixture::from_value(fixture).unwrap()
}

fn swift_services() -> impl Iterator<Item = &'static ServiceDescriptor> {
    SERVICE_REGISTRY.iter().filter(|d| d.supports(Platform::Swift))
}

fn conversation_fixture() -> ProjectFixture {
    ProjectFixture::from_json(
        r#"{
            "name": "chat",
            "conversation": {
                "serviceInfo": {"name": "chat-conversation-service", "label": "conversation"},
                "url": "https://gateway.example.net/conversation/api",
                "username": "user",
                "password": "secret"
            }
        }"#,
    )
    .unwrap()
}

// ============================================================================
// Pipeline behavior
// ============================================================================

#[test]
fn every_enabled_service_gets_three_search_patterns() {
    let fs = MemFs::default();
    let report = service_with(fs.clone())
        .generate(&all_services_fixture(), &GenerationOptions::new("/out"))
        .unwrap();

    assert_eq!(report.services.len(), swift_services().count());
    let mappings = fs.json("/out/config/mappings.json");
    assert!(mappings.get("watson_text_to_speech").is_none());
    for descriptor in swift_services() {
        let instance = format!("shop-{}", descriptor.scaffolder_property);
        assert_eq!(
            mappings[descriptor.lookup_key()]["searchPatterns"],
            json!([
                format!("cloudfoundry:{instance}"),
                format!("env:{}", instance.replace('-', "_")),
                format!("file:/config/localdev-config.json:{instance}"),
            ])
        );
    }
}

#[test]
fn local_dev_entries_hold_exactly_the_declared_fields() {
    let fs = MemFs::default();
    service_with(fs.clone())
        .generate(&all_services_fixture(), &GenerationOptions::new("/out"))
        .unwrap();

    let local_dev = fs.json("/out/config/localdev-config.json");
    for descriptor in swift_services() {
        let entry = &local_dev[format!("shop-{}", descriptor.scaffolder_property)];
        let mut expected: Vec<_> = descriptor.local_dev_fields.to_vec();
        expected.sort_unstable();
        let mut actual: Vec<_> = entry.as_object().unwrap().keys().map(String::as_str).collect();
        actual.sort_unstable();
        assert_eq!(actual, expected, "{}", descriptor);
    }
    assert_eq!(
        fs.get("/out/.gitignore").as_deref(),
        Some("config/localdev-config.json\n")
    );
}

#[test]
fn no_enabled_services_yields_no_dependencies_and_no_local_dev() {
    let fs = MemFs::default();
    let fixture = ProjectFixture::from_json(r#"{"name": "empty"}"#).unwrap();
    let report = service_with(fs.clone())
        .generate(&fixture, &GenerationOptions::new("/out"))
        .unwrap();

    assert!(report.dependencies.is_empty());
    assert!(report.code.is_empty());
    assert!(fs.get("/out/config/localdev-config.json").is_none());
    assert!(fs.get("/out/.gitignore").is_none());
}

#[test]
fn watson_conversation_scenario() {
    let fs = MemFs::default();
    let report = service_with(fs.clone())
        .generate(&conversation_fixture(), &GenerationOptions::new("/out"))
        .unwrap();

    assert_eq!(report.services, vec!["service-watson-conversation"]);
    assert_eq!(report.code.len(), 1);
    assert_eq!(report.code[0].service, "try initializeServiceWatsonConversation()");
    assert!(!report.dependencies.is_empty());

    let mappings = fs.json("/out/config/mappings.json");
    assert_eq!(
        mappings["watson_conversation"]["searchPatterns"][1],
        "env:chat_conversation_service"
    );

    let local_dev = fs.json("/out/config/localdev-config.json");
    assert_eq!(
        local_dev["chat-conversation-service"],
        json!({
            "url": "https://gateway.example.net/conversation/api",
            "username": "user",
            "password": "secret"
        })
    );

    let source = fs
        .get("/out/Sources/Application/Services/ServiceWatsonConversation.swift")
        .unwrap();
    assert!(source.contains("func initializeServiceWatsonConversation()"));
    assert!(source.contains("name: \"watson_conversation\""));

    let application = fs.get("/out/Sources/Application/Application.swift").unwrap();
    assert_eq!(
        application.matches("try initializeServiceWatsonConversation()").count(),
        1
    );
}

#[test]
fn raw_dependencies_keep_repeats_but_manifest_does_not() {
    let fs = MemFs::default();
    let report = service_with(fs.clone())
        .generate(&all_services_fixture(), &GenerationOptions::new("/out"))
        .unwrap();

    let shared = ".package(url: \"https://example.net/shared.git\"),";
    assert_eq!(
        report.dependencies.iter().filter(|d| *d == shared).count(),
        swift_services().count()
    );
    let manifest = fs.get("/out/Package.swift").unwrap();
    assert_eq!(manifest.matches(shared).count(), 1);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let first = MemFs::default();
    let second = MemFs::default();
    for fs in [&first, &second] {
        service_with(fs.clone())
            .generate(&all_services_fixture(), &GenerationOptions::new("/out"))
            .unwrap();
    }

    for doc in ["/out/config/mappings.json", "/out/config/localdev-config.json"] {
        assert_eq!(first.get(doc), second.get(doc));
    }
}

#[test]
fn rerun_over_own_output_changes_nothing() {
    let fs = MemFs::default();
    let service = service_with(fs.clone());
    service
        .generate(&conversation_fixture(), &GenerationOptions::new("/out"))
        .unwrap();
    let before = fs.0.lock().unwrap().clone();

    service
        .generate(&conversation_fixture(), &GenerationOptions::new("/out"))
        .unwrap();
    assert_eq!(*fs.0.lock().unwrap(), before);
}

#[test]
fn existing_documents_are_merged_not_replaced() {
    let fs = MemFs::default();
    fs.put(
        "/out/config/mappings.json",
        r#"{"custom": {"searchPatterns": ["env:CUSTOM"]}}"#,
    );
    fs.put("/out/.gitignore", ".build/\n");

    service_with(fs.clone())
        .generate(&conversation_fixture(), &GenerationOptions::new("/out"))
        .unwrap();

    let mappings = fs.json("/out/config/mappings.json");
    assert_eq!(mappings["custom"]["searchPatterns"][0], "env:CUSTOM");
    assert!(mappings.get("watson_conversation").is_some());
    assert_eq!(
        fs.get("/out/.gitignore").as_deref(),
        Some(".build/\nconfig/localdev-config.json\n")
    );
}

#[test]
fn malformed_existing_document_aborts_the_run() {
    let fs = MemFs::default();
    fs.put("/out/config/mappings.json", "not json");

    let err = service_with(fs.clone())
        .generate(&conversation_fixture(), &GenerationOptions::new("/out"))
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Validation);
    assert!(fs.get("/out/Package.swift").is_none());
}

#[test]
fn dry_run_reports_without_writing() {
    let fs = MemFs::default();
    let report = service_with(fs.clone())
        .generate(
            &conversation_fixture(),
            &GenerationOptions::new("/out").with_dry_run(true),
        )
        .unwrap();

    assert!(report.dry_run);
    assert!(report.files_written.contains(&PathBuf::from("config/mappings.json")));
    assert!(fs.0.lock().unwrap().is_empty());
}

#[test]
fn compose_can_be_disabled() {
    let fs = MemFs::default();
    let report = service_with(fs.clone())
        .generate(
            &conversation_fixture(),
            &GenerationOptions::new("/out").with_compose(false),
        )
        .unwrap();

    assert!(fs.get("/out/Package.swift").is_none());
    assert!(fs.get("/out/Sources/Application/Application.swift").is_none());
    assert_eq!(report.code.len(), 1);
}

#[test]
fn report_serializes_to_json() {
    let report = service_with(MemFs::default())
        .generate(
            &conversation_fixture(),
            &GenerationOptions::new("/out").with_dry_run(true),
        )
        .unwrap();

    let value: Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(value["project"], "chat");
    assert_eq!(value["platform"], "SWIFT");
    assert_eq!(value["code"][0]["service"], "try initializeServiceWatsonConversation()");
}

#[test]
fn python_fixture_writes_python_layout() {
    let fs = MemFs::default();
    let fixture = ProjectFixture::from_value(json!({
        "name": "speech",
        "backendPlatform": "PYTHON",
        "objectStorage": {
            "serviceInfo": {"name": "speech-cos"},
            "project_id": "p-1",
            "region": "dallas"
        },
        "textToSpeech": {
            "serviceInfo": {"name": "speech-tts"},
            "url": "https://stream.example.net/text-to-speech/api",
            "username": "tts-user",
            "password": "tts-pass"
        },
        "redis": {"serviceInfo": {"name": "speech-redis"}, "uri": "redis://x"}
    }))
    .unwrap();

    let report = service_with(fs.clone())
        .generate(&fixture, &GenerationOptions::new("/out"))
        .unwrap();

    assert_eq!(report.platform, "PYTHON");
    assert_eq!(
        report.services,
        vec!["service-object-storage", "service-watson-text-to-speech"]
    );
    assert_eq!(
        report.code[1].service,
        "register(app, 'service_watson_text_to_speech')"
    );

    let source = fs
        .get("/out/server/services/service_watson_text_to_speech.py")
        .unwrap();
    assert!(source.contains("'watson_text_to_speech_url'"));

    let init = fs.get("/out/server/services/__init__.py").unwrap();
    assert!(init.starts_with("// PYTHON speech"));
    assert!(init.contains("    register(app, 'service_object_storage')"));

    let requirements = fs.get("/out/requirements.txt").unwrap();
    assert_eq!(
        requirements,
        "object_storage-client\nibm-cloud-env\nwatson_text_to_speech-client\n"
    );
    assert!(fs.get("/out/Package.swift").is_none());

    let mappings = fs.json("/out/config/mappings.json");
    assert!(mappings.get("redis").is_none());
    assert_eq!(
        fs.json("/out/config/localdev-config.json")["speech-cos"],
        json!({"project_id": "p-1", "region": "dallas"})
    );
}

#[test]
fn fixture_name_with_placeholder_text_is_kept_verbatim() {
    let fs = MemFs::default();
    let fixture = ProjectFixture::from_json(
        r#"{
            "name": "{{SERVICE_INITIALIZERS}}",
            "redis": {"serviceInfo": {"name": "r-1"}, "uri": "redis://x"}
        }"#,
    )
    .unwrap();

    service_with(fs.clone())
        .generate(&fixture, &GenerationOptions::new("/out"))
        .unwrap();

    let application = fs.get("/out/Sources/Application/Application.swift").unwrap();
    assert_eq!(
        application,
        "// SWIFT {{SERVICE_INITIALIZERS}}\n    try initializeServiceRedis()\n"
    );
}

// ============================================================================
// Error propagation (mocked filesystem)
// ============================================================================

#[test]
fn write_failure_propagates() {
    let mut fs = MockFs::new();
    fs.expect_read_file().returning(|_| Ok(None));
    fs.expect_create_dir_all().returning(|_| Ok(()));
    fs.expect_write_file().returning(|path, _| {
        Err(ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "disk full".into(),
        }
        .into())
    });

    let err = service_with(fs)
        .generate(&conversation_fixture(), &GenerationOptions::new("/out"))
        .unwrap_err();

    assert!(matches!(
        err,
        EnablementError::Application(ApplicationError::FilesystemError { .. })
    ));
    assert_eq!(err.category(), ErrorCategory::Internal);
}

#[test]
fn dry_run_never_writes() {
    let mut fs = MockFs::new();
    fs.expect_read_file().returning(|_| Ok(None));
    fs.expect_create_dir_all().never();
    fs.expect_write_file().never();

    service_with(fs)
        .generate(
            &all_services_fixture(),
            &GenerationOptions::new("/out").with_dry_run(true),
        )
        .unwrap();
}
