//! Container build file, compose manifest and ignore list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    application::composer::{DB_PASSWORD, DB_PORT, DB_USER, database_url, to_yaml},
    domain::{
        ArtifactBundle, ArtifactRole, BaseImageFamily, JavaFramework, LanguageProfile,
        ResolvedContext,
    },
    error::KindleResult,
};

pub(super) fn add(ctx: &ResolvedContext, bundle: &mut ArtifactBundle) -> KindleResult<()> {
    bundle.add_file("Dockerfile", dockerfile(ctx), ArtifactRole::Standard)?;
    bundle.add_file(
        "compose.yaml",
        to_yaml("compose.yaml", &ComposeFile::for_context(ctx))?,
        ArtifactRole::Standard,
    )?;
    bundle.add_file(".dockerignore", DOCKERIGNORE, ArtifactRole::Standard)?;
    Ok(())
}

const DOCKERIGNORE: &str = "\
.git
.env
.devbox
.nx
node_modules
dist
target
bin
__pycache__
.venv
";

fn distroless(ctx: &ResolvedContext) -> bool {
    ctx.config().base_image() == BaseImageFamily::Distroless
}

/// `CMD` for the runtime stage. Distroless language images already set the
/// interpreter as entrypoint, so it is dropped there.
fn cmd(ctx: &ResolvedContext, interpreter: Option<&str>, args: &[&str]) -> String {
    let words: Vec<String> = interpreter
        .filter(|_| !distroless(ctx))
        .into_iter()
        .chain(args.iter().copied())
        .map(|w| format!("\"{w}\""))
        .collect();
    format!("CMD [{}]", words.join(", "))
}

/// Source copied into the build stage.
fn copy_source(ctx: &ResolvedContext) -> String {
    let dir = ctx.app_dir();
    if dir.is_empty() {
        "COPY . .".to_string()
    } else {
        format!("COPY {dir}/ ./")
    }
}

pub(crate) fn dockerfile(ctx: &ResolvedContext) -> String {
    let image = ctx.image();
    let port = ctx.ports().application;
    let identity = ctx.identity();

    let (build_steps, copy_steps, cmd_line) = match ctx.profile() {
        profile @ (LanguageProfile::TypeScript | LanguageProfile::JavaScript) => {
            // The workspace orchestrator needs the whole repository.
            let entry = if profile == LanguageProfile::TypeScript {
                ctx.app_path("dist/main.js")
            } else {
                ctx.app_path("src/main.js")
            };
            (
                format!(
                    "RUN corepack enable\nCOPY . .\nRUN pnpm install\nRUN {}",
                    ctx.commands().build
                ),
                "COPY --from=build /src /app\nENV NODE_ENV=production".to_string(),
                cmd(ctx, Some("node"), &[entry.as_str()]),
            )
        }
        LanguageProfile::Python => (
            format!(
                "{}\nRUN pip install --no-cache-dir --prefix=/install -r requirements.txt",
                copy_source(ctx)
            ),
            "COPY --from=build /install /usr/local\nCOPY --from=build /src /app\nENV PYTHONPATH=/app:/usr/local/lib/python3.12/site-packages".to_string(),
            cmd(ctx, Some("python"), &["-m", identity.snake.as_str()]),
        ),
        LanguageProfile::Java(Some(JavaFramework::Quarkus)) => (
            format!("{}\nRUN mvn -q package -DskipTests", copy_source(ctx)),
            "COPY --from=build /src/target/quarkus-app/ /app/".to_string(),
            cmd(ctx, Some("java"), &["-jar", "/app/quarkus-run.jar"]),
        ),
        LanguageProfile::Java(_) => (
            format!("{}\nRUN mvn -q package -DskipTests", copy_source(ctx)),
            "COPY --from=build /src/target/*.jar /app/app.jar".to_string(),
            cmd(ctx, Some("java"), &["-jar", "/app/app.jar"]),
        ),
        LanguageProfile::Rust => {
            let musl = if ctx.config().base_image() == BaseImageFamily::Alpine {
                "RUN apk add --no-cache musl-dev\n"
            } else {
                ""
            };
            let binary = format!("/usr/local/bin/{}", identity.snake);
            (
                format!("{musl}{}\nRUN cargo build --release", copy_source(ctx)),
                format!(
                    "COPY --from=build /src/target/release/{} {binary}",
                    identity.snake
                ),
                cmd(ctx, None, &[binary.as_str()]),
            )
        }
        LanguageProfile::Go => {
            let binary = format!("/usr/local/bin/{}", identity.slug);
            (
                format!(
                    "{}\nRUN CGO_ENABLED=0 go build -o /out/{} .",
                    copy_source(ctx),
                    identity.slug
                ),
                format!("COPY --from=build /out/{} {binary}", identity.slug),
                cmd(ctx, None, &[binary.as_str()]),
            )
        }
    };

    format!(
        "# syntax=docker/dockerfile:1\n\nFROM {build} AS build\nWORKDIR /src\n{build_steps}\n\nFROM {runtime}\nWORKDIR /app\n{copy_steps}\nENV PORT={port}\nEXPOSE {port}\n{cmd_line}\n",
        build = image.build,
        runtime = image.runtime,
    )
}

// ── compose.yaml ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ComposeFile {
    services: BTreeMap<&'static str, ComposeService>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    volumes: BTreeMap<&'static str, BTreeMap<String, String>>,
}

#[derive(Serialize, Default)]
struct ComposeService {
    #[serde(skip_serializing_if = "Option::is_none")]
    build: Option<ComposeBuild>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'static str>,
    ports: Vec<String>,
    environment: BTreeMap<&'static str, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    env_file: Vec<EnvFile>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    depends_on: BTreeMap<&'static str, DependsOn>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    volumes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    healthcheck: Option<HealthCheck>,
}

#[derive(Serialize)]
struct ComposeBuild {
    context: &'static str,
    dockerfile: &'static str,
}

#[derive(Serialize)]
struct EnvFile {
    path: &'static str,
    required: bool,
}

#[derive(Serialize)]
struct DependsOn {
    condition: &'static str,
}

#[derive(Serialize)]
struct HealthCheck {
    test: Vec<String>,
    interval: &'static str,
    timeout: &'static str,
    retries: u32,
}

const DB_VOLUME: &str = "db-data";

impl ComposeFile {
    fn for_context(ctx: &ResolvedContext) -> Self {
        let port = ctx.ports().application;
        let mut app = ComposeService {
            build: Some(ComposeBuild {
                context: ".",
                dockerfile: "Dockerfile",
            }),
            ports: vec![format!("{port}:{port}")],
            environment: BTreeMap::from([("PORT", port.to_string())]),
            env_file: vec![EnvFile {
                path: ".env",
                required: false,
            }],
            ..Default::default()
        };

        let mut services = BTreeMap::new();
        let mut volumes = BTreeMap::new();
        if ctx.config().database() {
            let db_name = ctx.identity().snake.clone();
            app.environment.extend([
                ("DATABASE_URL", database_url(ctx, "db")),
                ("POSTGRES_HOST", "db".to_string()),
                ("POSTGRES_DB", db_name.clone()),
                ("POSTGRES_USER", DB_USER.to_string()),
                ("POSTGRES_PASSWORD", DB_PASSWORD.to_string()),
            ]);
            app.depends_on.insert(
                "db",
                DependsOn {
                    condition: "service_healthy",
                },
            );
            services.insert("db", database_service(db_name));
            volumes.insert(DB_VOLUME, BTreeMap::new());
        }
        services.insert("app", app);

        Self { services, volumes }
    }
}

fn database_service(db_name: String) -> ComposeService {
    ComposeService {
        image: Some("postgres:16-alpine"),
        ports: vec![format!("{DB_PORT}:{DB_PORT}")],
        environment: BTreeMap::from([
            ("POSTGRES_DB", db_name),
            ("POSTGRES_USER", DB_USER.to_string()),
            ("POSTGRES_PASSWORD", DB_PASSWORD.to_string()),
        ]),
        volumes: vec![format!("{DB_VOLUME}:/var/lib/postgresql/data")],
        healthcheck: Some(HealthCheck {
            test: vec!["CMD-SHELL".into(), format!("pg_isready -U {DB_USER}")],
            interval: "5s",
            timeout: "3s",
            retries: 10,
        }),
        ..Default::default()
    }
}
