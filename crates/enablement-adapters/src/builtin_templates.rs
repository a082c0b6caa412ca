//! Templates compiled into the binary.
//!
//! Layout mirrors a user template directory:
//! `<service-name>/<platform>/{instrumentation.<ext>,dependencies.txt}` and
//! `app/<platform>/<composed files>`.

use enablement_core::domain::{ApplicationTemplates, Platform, ServiceTemplates};

pub const DEPENDENCIES_FILE: &str = "dependencies.txt";
pub const APP_DIR: &str = "app";

macro_rules! service_templates {
    ($($name:literal => $platform:literal, $instrumentation:literal);* $(;)?) => {
        &[$(
            (
                $name,
                $platform,
                include_str!(concat!("../templates/", $name, "/", $platform, "/", $instrumentation)),
                include_str!(concat!("../templates/", $name, "/", $platform, "/dependencies.txt")),
            ),
        )*]
    };
}

/// `(service_name, platform_dir, instrumentation, dependencies)` for every
/// built-in service template.
static SERVICES: &[(&str, &str, &str, &str)] = service_templates![
    "service-alert-notification" => "swift", "instrumentation.swift";
    "service-appid" => "swift", "instrumentation.swift";
    "service-cloudant" => "swift", "instrumentation.swift";
    "service-db2" => "swift", "instrumentation.swift";
    "service-finance-historical-instrument-analytics" => "swift", "instrumentation.swift";
    "service-finance-simulated-instrument-analytics" => "swift", "instrumentation.swift";
    "service-object-storage" => "swift", "instrumentation.swift";
    "service-object-storage" => "python", "instrumentation.py";
    "service-postgre" => "swift", "instrumentation.swift";
    "service-push" => "swift", "instrumentation.swift";
    "service-redis" => "swift", "instrumentation.swift";
    "service-watson-conversation" => "swift", "instrumentation.swift";
    "service-watson-language-translator" => "swift", "instrumentation.swift";
    "service-watson-text-to-speech" => "python", "instrumentation.py";
];

static SWIFT_APPLICATION: &str = include_str!("../templates/app/swift/Application.swift");
static SWIFT_PACKAGE: &str = include_str!("../templates/app/swift/Package.swift");
static PYTHON_APPLICATION: &str = include_str!("../templates/app/python/__init__.py");
static PYTHON_REQUIREMENTS: &str = include_str!("../templates/app/python/requirements.txt");

/// Built-in templates for `service_name` on `platform`, if any.
pub fn service(service_name: &str, platform: Platform) -> Option<ServiceTemplates> {
    SERVICES
        .iter()
        .find(|(name, dir, _, _)| *name == service_name && *dir == platform.template_dir())
        .map(|(_, _, instrumentation, dependencies)| {
            ServiceTemplates::new(*instrumentation, *dependencies)
        })
}

pub fn application(platform: Platform) -> ApplicationTemplates {
    let (application, package) = match platform {
        Platform::Swift => (SWIFT_APPLICATION, SWIFT_PACKAGE),
        Platform::Python => (PYTHON_APPLICATION, PYTHON_REQUIREMENTS),
    };
    ApplicationTemplates {
        application: application.to_string(),
        package: package.to_string(),
    }
}

/// File name of a composed output path, used as its template name.
pub fn template_file(output_path: &str) -> &str {
    output_path.rsplit('/').next().unwrap_or(output_path)
}
