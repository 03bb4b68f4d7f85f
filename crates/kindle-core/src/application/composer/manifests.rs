//! Per-language build manifests.
//!
//! In workspace mode these live beside `project.json` and are written with
//! the other standard files. In minimal mode the language manifest is the
//! project's base descriptor.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::{
    application::composer::{to_json, to_toml, workspace::PACKAGE_MANAGER},
    domain::{ArtifactBundle, ArtifactRole, JavaFramework, LanguageProfile, ResolvedContext},
    error::KindleResult,
};

const SPRING_BOOT_VERSION: &str = "3.3.5";
const QUARKUS_VERSION: &str = "3.15.1";
const POSTGRES_DRIVER_VERSION: &str = "42.7.4";

pub(super) fn add(ctx: &ResolvedContext, bundle: &mut ArtifactBundle) -> KindleResult<()> {
    let role = if ctx.config().workspace() {
        ArtifactRole::Standard
    } else {
        ArtifactRole::Descriptor
    };

    match ctx.profile() {
        LanguageProfile::TypeScript | LanguageProfile::JavaScript => {
            let path = ctx.app_path("package.json");
            bundle.add_file(&path, to_json(&path, &node_package(ctx))?, role)?;
            if ctx.profile() == LanguageProfile::TypeScript {
                let path = ctx.app_path("tsconfig.json");
                bundle.add_file(&path, to_json(&path, &tsconfig())?, ArtifactRole::Standard)?;
            }
        }
        LanguageProfile::Python => {
            let path = ctx.app_path("pyproject.toml");
            bundle.add_file(&path, to_toml(&path, &PyProject::for_context(ctx))?, role)?;
            bundle.add_file(
                &ctx.app_path("requirements.txt"),
                requirements(ctx),
                ArtifactRole::Standard,
            )?;
        }
        LanguageProfile::Java(framework) => {
            bundle.add_file(&ctx.app_path("pom.xml"), pom(ctx, framework), role)?;
        }
        LanguageProfile::Rust => {
            let path = ctx.app_path("Cargo.toml");
            bundle.add_file(&path, to_toml(&path, &CargoManifest::for_context(ctx))?, role)?;
        }
        LanguageProfile::Go => {
            bundle.add_file(&ctx.app_path("go.mod"), go_mod(ctx), role)?;
        }
    }
    Ok(())
}

fn native_names(ctx: &ResolvedContext) -> impl Iterator<Item = &str> {
    ctx.dependencies().native.iter().map(|d| d.as_str())
}

// ── Node ────────────────────────────────────────────────────────────────────

fn node_package(ctx: &ResolvedContext) -> Value {
    let typescript = ctx.profile() == LanguageProfile::TypeScript;
    let scripts = if typescript {
        json!({
            "dev": "tsx watch src/main.ts",
            "build": "tsc -p tsconfig.json",
            "start": "node dist/main.js",
            "test": "node --test",
        })
    } else {
        json!({
            "dev": "node --watch src/main.js",
            "build": "node --check src/main.js",
            "start": "node src/main.js",
            "test": "node --test",
        })
    };

    let mut dependencies = Map::new();
    for name in native_names(ctx) {
        dependencies.insert(name.into(), "latest".into());
    }
    if ctx.config().database() {
        dependencies.insert("pg".into(), "^8.13.0".into());
    }

    let mut package = json!({
        "name": ctx.slug(),
        "version": "0.1.0",
        "private": true,
        "description": ctx.config().description(),
        "type": "module",
        "scripts": scripts,
        "dependencies": dependencies,
    });
    if typescript {
        package["devDependencies"] = json!({
            "@types/node": "^22.0.0",
            "tsx": "^4.19.0",
            "typescript": "^5.6.0",
        });
    }
    if !ctx.config().workspace() {
        package["packageManager"] = PACKAGE_MANAGER.into();
    }
    package
}

fn tsconfig() -> Value {
    json!({
        "compilerOptions": {
            "target": "ES2022",
            "module": "NodeNext",
            "moduleResolution": "NodeNext",
            "outDir": "dist",
            "rootDir": "src",
            "strict": true,
            "esModuleInterop": true,
            "skipLibCheck": true,
        },
        "include": ["src"],
    })
}

// ── Python ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PyProject<'a> {
    project: PyProjectTable<'a>,
    #[serde(rename = "dependency-groups")]
    dependency_groups: BTreeMap<&'static str, Vec<&'static str>>,
    #[serde(rename = "build-system")]
    build_system: BuildSystem,
}

#[derive(Serialize)]
struct PyProjectTable<'a> {
    name: &'a str,
    version: &'static str,
    description: &'a str,
    #[serde(rename = "requires-python")]
    requires_python: &'static str,
    dependencies: Vec<String>,
}

#[derive(Serialize)]
struct BuildSystem {
    requires: Vec<&'static str>,
    #[serde(rename = "build-backend")]
    build_backend: &'static str,
}

impl<'a> PyProject<'a> {
    fn for_context(ctx: &'a ResolvedContext) -> Self {
        Self {
            project: PyProjectTable {
                name: ctx.slug(),
                version: "0.1.0",
                description: ctx.config().description(),
                requires_python: ">=3.12",
                dependencies: python_requirements(ctx),
            },
            dependency_groups: BTreeMap::from([("dev", vec!["pytest>=8"])]),
            build_system: BuildSystem {
                requires: vec!["hatchling"],
                build_backend: "hatchling.build",
            },
        }
    }
}

fn python_requirements(ctx: &ResolvedContext) -> Vec<String> {
    let mut requirements: Vec<String> = native_names(ctx).map(str::to_string).collect();
    if ctx.config().database() {
        requirements.push("psycopg[binary]".into());
    }
    requirements
}

fn requirements(ctx: &ResolvedContext) -> String {
    let mut text = String::from("# Runtime requirements; keep in sync with pyproject.toml\n");
    for requirement in python_requirements(ctx) {
        text.push_str(&requirement);
        text.push('\n');
    }
    text
}

// ── Rust ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CargoManifest<'a> {
    package: CargoPackage<'a>,
    dependencies: BTreeMap<String, &'static str>,
}

#[derive(Serialize)]
struct CargoPackage<'a> {
    name: &'a str,
    version: &'static str,
    edition: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    publish: bool,
}

impl<'a> CargoManifest<'a> {
    fn for_context(ctx: &'a ResolvedContext) -> Self {
        let mut dependencies: BTreeMap<String, &'static str> = native_names(ctx)
            .filter(|name| {
                name.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            })
            .map(|name| (name.to_string(), "*"))
            .collect();
        if ctx.config().database() {
            dependencies.insert("postgres".into(), "0.19");
        }

        Self {
            package: CargoPackage {
                name: &ctx.identity().snake,
                version: "0.1.0",
                edition: "2021",
                description: ctx.config().description(),
                publish: false,
            },
            dependencies,
        }
    }
}

// ── Go ──────────────────────────────────────────────────────────────────────

pub(crate) fn go_module_path(ctx: &ResolvedContext) -> String {
    let owner = ctx.config().github_user().unwrap_or("example");
    format!("github.com/{owner}/{}", ctx.slug())
}

fn go_mod(ctx: &ResolvedContext) -> String {
    format!("module {}\n\ngo 1.23\n", go_module_path(ctx))
}

// ── Java ────────────────────────────────────────────────────────────────────

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn dependency(group: &str, artifact: &str, version: Option<&str>, scope: Option<&str>) -> String {
    let mut xml = format!(
        "    <dependency>\n      <groupId>{group}</groupId>\n      <artifactId>{artifact}</artifactId>\n"
    );
    if let Some(version) = version {
        xml.push_str(&format!("      <version>{version}</version>\n"));
    }
    if let Some(scope) = scope {
        xml.push_str(&format!("      <scope>{scope}</scope>\n"));
    }
    xml.push_str("    </dependency>\n");
    xml
}

/// `group:artifact[:version]` coordinates; other names cannot go in a pom.
fn maven_coordinates(name: &str) -> Option<(&str, &str, Option<&str>)> {
    let mut parts = name.split(':');
    let group = parts.next().filter(|s| !s.is_empty())?;
    let artifact = parts.next().filter(|s| !s.is_empty())?;
    let version = parts.next().filter(|s| !s.is_empty());
    if parts.next().is_some() {
        return None;
    }
    Some((group, artifact, version))
}

/// Fully qualified class run by the plain Java starter.
pub(crate) fn java_main_class(ctx: &ResolvedContext) -> String {
    let identity = ctx.identity();
    format!("{}.{}Application", identity.java_package, identity.pascal)
}

fn pom(ctx: &ResolvedContext, framework: Option<JavaFramework>) -> String {
    let identity = ctx.identity();
    let config = ctx.config();
    let group = identity
        .java_package
        .rsplit_once('.')
        .map_or(identity.java_package.as_str(), |(group, _)| group);
    let database = config.database();

    let mut parent = String::new();
    let mut properties = String::new();
    let mut management = String::new();
    let mut dependencies = String::new();
    let plugins;

    match framework {
        Some(JavaFramework::SpringBoot) => {
            parent = format!(
                "  <parent>\n    <groupId>org.springframework.boot</groupId>\n    <artifactId>spring-boot-starter-parent</artifactId>\n    <version>{SPRING_BOOT_VERSION}</version>\n    <relativePath/>\n  </parent>\n\n"
            );
            dependencies.push_str(&dependency(
                "org.springframework.boot",
                "spring-boot-starter-web",
                None,
                None,
            ));
            if database {
                dependencies.push_str(&dependency(
                    "org.springframework.boot",
                    "spring-boot-starter-jdbc",
                    None,
                    None,
                ));
                dependencies.push_str(&dependency("org.postgresql", "postgresql", None, Some("runtime")));
            }
            dependencies.push_str(&dependency(
                "org.springframework.boot",
                "spring-boot-starter-test",
                None,
                Some("test"),
            ));
            plugins = "      <plugin>\n        <groupId>org.springframework.boot</groupId>\n        <artifactId>spring-boot-maven-plugin</artifactId>\n      </plugin>\n".to_string();
        }
        Some(JavaFramework::Quarkus) => {
            properties = format!(
                "    <quarkus.platform.version>{QUARKUS_VERSION}</quarkus.platform.version>\n"
            );
            management = "  <dependencyManagement>\n    <dependencies>\n      <dependency>\n        <groupId>io.quarkus.platform</groupId>\n        <artifactId>quarkus-bom</artifactId>\n        <version>${quarkus.platform.version}</version>\n        <type>pom</type>\n        <scope>import</scope>\n      </dependency>\n    </dependencies>\n  </dependencyManagement>\n\n".to_string();
            for artifact in ["quarkus-rest", "quarkus-rest-jackson", "quarkus-arc"] {
                dependencies.push_str(&dependency("io.quarkus", artifact, None, None));
            }
            if database {
                dependencies.push_str(&dependency("io.quarkus", "quarkus-jdbc-postgresql", None, None));
                dependencies.push_str(&dependency("io.quarkus", "quarkus-agroal", None, None));
            }
            dependencies.push_str(&dependency("io.quarkus", "quarkus-junit5", None, Some("test")));
            plugins = "      <plugin>\n        <groupId>io.quarkus.platform</groupId>\n        <artifactId>quarkus-maven-plugin</artifactId>\n        <version>${quarkus.platform.version}</version>\n        <extensions>true</extensions>\n        <executions>\n          <execution>\n            <goals>\n              <goal>build</goal>\n              <goal>generate-code</goal>\n            </goals>\n          </execution>\n        </executions>\n      </plugin>\n".to_string();
        }
        None => {
            if database {
                dependencies.push_str(&dependency(
                    "org.postgresql",
                    "postgresql",
                    Some(POSTGRES_DRIVER_VERSION),
                    None,
                ));
            }
            let main_class = java_main_class(ctx);
            plugins = format!(
                "      <plugin>\n        <groupId>org.apache.maven.plugins</groupId>\n        <artifactId>maven-jar-plugin</artifactId>\n        <version>3.4.2</version>\n        <configuration>\n          <archive>\n            <manifest>\n              <mainClass>{main_class}</mainClass>\n            </manifest>\n          </archive>\n        </configuration>\n      </plugin>\n      <plugin>\n        <groupId>org.codehaus.mojo</groupId>\n        <artifactId>exec-maven-plugin</artifactId>\n        <version>3.5.0</version>\n        <configuration>\n          <mainClass>{main_class}</mainClass>\n        </configuration>\n      </plugin>\n"
            );
        }
    }

    for (group, artifact, version) in native_names(ctx).filter_map(maven_coordinates) {
        dependencies.push_str(&dependency(group, artifact, version, None));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>

{parent}  <groupId>{group}</groupId>
  <artifactId>{artifact}</artifactId>
  <version>0.1.0</version>
  <name>{name}</name>
  <description>{description}</description>

  <properties>
    <java.version>21</java.version>
    <maven.compiler.release>21</maven.compiler.release>
    <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>
{properties}  </properties>

{management}  <dependencies>
{dependencies}  </dependencies>

  <build>
    <plugins>
{plugins}    </plugins>
  </build>
</project>
"#,
        artifact = identity.slug,
        name = xml_escape(config.repo_name()),
        description = xml_escape(config.description()),
    )
}

#[cfg(test)]
mod tests {
    use super::maven_coordinates;

    #[test]
    fn maven_coordinates_need_group_and_artifact() {
        assert_eq!(
            maven_coordinates("org.flywaydb:flyway-core"),
            Some(("org.flywaydb", "flyway-core", None))
        );
        assert_eq!(
            maven_coordinates("com.google.guava:guava:33.3.1-jre"),
            Some(("com.google.guava", "guava", Some("33.3.1-jre")))
        );
        assert_eq!(maven_coordinates("lombok"), None);
        assert_eq!(maven_coordinates("a:b:c:d"), None);
    }
}
